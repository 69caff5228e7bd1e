use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::*;

/// 渲染后的图标边长
pub const ICON_SIZE: u32 = 80;
/// 解析 SVG 时使用的像素密度
pub const RENDER_DPI: f32 = 600.0;
/// 渲染线程数量上限
pub const MAX_WORKERS: usize = 7;
/// WebP 有损压缩质量
pub const WEBP_QUALITY: f32 = 80.0;
/// WebP 压缩方法（0 最快，6 最慢、体积最小）
pub const WEBP_METHOD: i32 = 6;

#[derive(Parser, Debug, Clone, Copy)]
pub struct RenderOptions {
    /// 输出图片的边长（像素）
    #[arg(long, value_name = "PIXELS", default_value_t = ICON_SIZE, value_parser = clap::value_parser!(u32).range(1..=4096))]
    pub size: u32,
    /// 解析 SVG 时使用的 DPI，影响 mm/in/pt 等物理单位的换算
    #[arg(long, value_name = "DPI", default_value_t = RENDER_DPI)]
    pub dpi: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { size: ICON_SIZE, dpi: RENDER_DPI }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ScanOptions {
    /// 扫描的文件后缀名，多个后缀用逗号分隔
    #[arg(short, long, default_value = "svg")]
    pub suffix: String,
    /// 渲染线程数量，不超过 7，默认为 CPU 核心数
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self { suffix: "svg".to_string(), jobs: None }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "icondb", version)]
pub struct Opts {
    #[command(subcommand)]
    pub subcmd: SubCommand,
    /// 输出的 SQLite 数据库文件，每次导入前会被删除重建
    #[arg(short, long, global = true, default_value = "db/svg_icons/svg-icons-db.db")]
    pub database: PathBuf,
    /// 图标集元数据文件，不存在时使用空元数据
    #[arg(short, long, global = true, default_value = "data/cluster_svg.json")]
    pub metadata: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubCommand {
    /// 将 SVG 图标渲染为 WebP 并写入每个图标集的 JSON 清单
    Render(RenderCommand),
    /// 从 JSON 清单重建 SQLite 数据库
    Load(LoadCommand),
    /// 完整流程：渲染、导入、汇总、校验
    Build(BuildCommand),
    /// 输出已有数据库的统计信息
    Verify(VerifyCommand),
}
