use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use super::render::{render_root, write_manifests};
use crate::cli::SubCommandExtend;
use crate::config::{Opts, RenderOptions, ScanOptions};
use crate::metadata::Metadata;
use crate::pipeline::build_store;

#[derive(Parser, Debug, Clone)]
pub struct BuildCommand {
    #[command(flatten)]
    pub render: RenderOptions,
    #[command(flatten)]
    pub scan: ScanOptions,
    /// 图标根目录，每个子目录为一个图标集
    pub root: PathBuf,
    /// 同时将 JSON 清单保存到该目录
    #[arg(long, value_name = "DIR")]
    pub manifest_dir: Option<PathBuf>,
}

impl SubCommandExtend for BuildCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        // 输入目录不存在时在打开数据库之前退出
        let manifests = render_root(&self.root, self.render, &self.scan)?;
        if let Some(dir) = &self.manifest_dir {
            write_manifests(dir, &manifests);
        }

        let metadata = Metadata::load(&opts.metadata);
        let summary = build_store(&opts.database, &manifests, &metadata).await?;
        info!(
            "构建完成: {} 个图标集，{} 个图标",
            manifests.len(),
            summary.overview.total_count
        );
        Ok(())
    }
}
