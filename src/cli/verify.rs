use anyhow::{Result, anyhow};
use clap::Parser;

use crate::cli::SubCommandExtend;
use crate::config::Opts;
use crate::db::open_db;
use crate::verify::verify;

#[derive(Parser, Debug, Clone)]
pub struct VerifyCommand {}

impl SubCommandExtend for VerifyCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        if !opts.database.is_file() {
            return Err(anyhow!("数据库不存在: {}", opts.database.display()));
        }
        let db = open_db(&opts.database).await?;
        let report = verify(&db).await?;
        report.log();
        db.close().await;
        Ok(())
    }
}
