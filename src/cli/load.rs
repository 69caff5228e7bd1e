use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{error, info};

use crate::cli::SubCommandExtend;
use crate::config::Opts;
use crate::manifest::read_manifests;
use crate::metadata::Metadata;
use crate::pipeline::build_store;

#[derive(Parser, Debug, Clone)]
pub struct LoadCommand {
    /// JSON 清单所在目录
    #[arg(default_value = "base64_svg_icons")]
    pub dir: PathBuf,
    /// 导入成功后删除清单目录
    #[arg(long)]
    pub clean: bool,
}

impl SubCommandExtend for LoadCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let manifests = read_manifests(&self.dir)?;
        info!("读取到 {} 个清单", manifests.len());

        let metadata = Metadata::load(&opts.metadata);
        build_store(&opts.database, &manifests, &metadata).await?;

        if self.clean {
            match std::fs::remove_dir_all(&self.dir) {
                Ok(()) => info!("✓ 已删除 {}", self.dir.display()),
                Err(e) => error!("✗ 删除 {} 失败: {}", self.dir.display(), e),
            }
        }
        Ok(())
    }
}
