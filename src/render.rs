//! SVG 渲染与编码
//!
//! SVG → RGBA 位图（resvg）→ WebP（libwebp）→ base64

use std::path::Path;
use std::sync::{Arc, LazyLock};

use anyhow::{Context, Result, anyhow};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};

use crate::config::{RenderOptions, WEBP_METHOD, WEBP_QUALITY};

/// 系统字体只加载一次，所有渲染线程共享
static FONTDB: LazyLock<Arc<usvg::fontdb::Database>> = LazyLock::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
});

/// 读取并渲染 SVG 文件，相对路径的外部资源以文件所在目录为基准
pub fn render_svg(path: &Path, opts: &RenderOptions) -> Result<RgbaImage> {
    let data = std::fs::read(path).with_context(|| format!("读取文件失败: {}", path.display()))?;
    render_svg_data(&data, path.parent(), opts)
}

/// 将 SVG 数据渲染为 `size x size` 的 RGBA 位图（非预乘 alpha）
pub fn render_svg_data(
    data: &[u8],
    resources_dir: Option<&Path>,
    opts: &RenderOptions,
) -> Result<RgbaImage> {
    let options = usvg::Options {
        resources_dir: resources_dir.map(Path::to_path_buf),
        dpi: opts.dpi,
        fontdb: FONTDB.clone(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(data, &options).context("解析 SVG 失败")?;

    let size = opts.size;
    let mut pixmap =
        Pixmap::new(size, size).ok_or_else(|| anyhow!("无法创建 {size}x{size} 的画布"))?;

    // 拉伸到目标尺寸，与原始宽高比无关
    let sx = size as f32 / tree.size().width();
    let sy = size as f32 / tree.size().height();
    resvg::render(&tree, Transform::from_scale(sx, sy), &mut pixmap.as_mut());

    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        pixels.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    RgbaImage::from_raw(size, size, pixels).ok_or_else(|| anyhow!("位图数据长度不匹配"))
}

/// 以固定的有损参数编码为 WebP，非 RGBA 的图片会先转换为 RGBA
///
/// alpha 通道无损压缩
pub fn encode_webp(image: &DynamicImage) -> Result<Vec<u8>> {
    let converted;
    let rgba = match image.as_rgba8() {
        Some(rgba) => rgba,
        None => {
            converted = image.to_rgba8();
            &converted
        }
    };

    let mut config = webp::WebPConfig::new().map_err(|_| anyhow!("初始化 WebP 参数失败"))?;
    config.lossless = 0;
    config.quality = WEBP_QUALITY;
    config.method = WEBP_METHOD;
    config.alpha_compression = 1;

    let memory = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
        .encode_advanced(&config)
        .map_err(|e| anyhow!("WebP 编码失败: {:?}", e))?;
    Ok(memory.to_vec())
}

pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// 渲染单个 SVG 文件并返回 WebP 的 base64 编码
pub fn svg_to_base64(path: &Path, opts: &RenderOptions) -> Result<String> {
    let image = render_svg(path, opts)?;
    let webp = encode_webp(&DynamicImage::ImageRgba8(image))?;
    Ok(encode_base64(&webp))
}
