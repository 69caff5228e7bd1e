use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use log::{error, info};
use tokio::task::block_in_place;

use crate::cli::SubCommandExtend;
use crate::cluster::ClusterProcessor;
use crate::config::{Opts, RenderOptions, ScanOptions};
use crate::manifest::{Manifest, write_manifest};
use crate::utils::pb_style;

#[derive(Parser, Debug, Clone)]
pub struct RenderCommand {
    #[command(flatten)]
    pub render: RenderOptions,
    #[command(flatten)]
    pub scan: ScanOptions,
    /// 图标根目录，每个子目录为一个图标集
    pub root: PathBuf,
    /// JSON 清单输出目录
    #[arg(short, long, default_value = "base64_svg_icons")]
    pub output: PathBuf,
}

impl SubCommandExtend for RenderCommand {
    async fn run(&self, _opts: &Opts) -> Result<()> {
        let manifests = render_root(&self.root, self.render, &self.scan)?;
        let written = write_manifests(&self.output, &manifests);
        info!("已写入 {}/{} 个清单到 {}", written, manifests.len(), self.output.display());
        Ok(())
    }
}

/// 渲染根目录下的全部图标集，显示进度条
pub(super) fn render_root(
    root: &Path,
    render: RenderOptions,
    scan: &ScanOptions,
) -> Result<Vec<Manifest>> {
    let processor = ClusterProcessor::new(render, scan)?;
    let pb = ProgressBar::no_length().with_style(pb_style());
    let manifests = block_in_place(|| processor.process_root(root, &pb))?;
    pb.finish_with_message("渲染完成");
    Ok(manifests)
}

/// 逐个写入清单，单个清单写入失败不影响其它清单
pub(super) fn write_manifests(dir: &Path, manifests: &[Manifest]) -> usize {
    let mut written = 0;
    for manifest in manifests {
        match write_manifest(dir, manifest) {
            Ok(path) => {
                info!("✓ 写入 {}（{} 个图标）", path.display(), manifest.icons.len());
                written += 1;
            }
            Err(e) => error!("✗ 写入清单 {} 失败: {:#}", manifest.file_name(), e),
        }
    }
    written
}
