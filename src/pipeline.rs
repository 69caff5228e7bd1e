use std::path::Path;

use log::{info, warn};

use crate::aggregate::aggregate;
use crate::db::{OverviewRecord, init_db};
use crate::loader::load_manifests;
use crate::manifest::Manifest;
use crate::metadata::Metadata;
use crate::verify::{Report, verify};

/// 一次导入的结果
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub inserted: u64,
    pub overview: OverviewRecord,
    /// 校验失败时为 `None`，校验不影响导入结果
    pub report: Option<Report>,
}

/// 重建数据库：导入清单、汇总、校验
pub async fn build_store(
    database: &Path,
    manifests: &[Manifest],
    metadata: &Metadata,
) -> anyhow::Result<BuildSummary> {
    let db = init_db(database).await?;

    let inserted = load_manifests(&db, manifests, metadata).await?;
    info!("已插入 {} 条记录到 {}", inserted, database.display());

    let overview = aggregate(&db, metadata).await?;

    let report = match verify(&db).await {
        Ok(report) => {
            report.log();
            Some(report)
        }
        Err(e) => {
            warn!("校验数据库失败: {}", e);
            None
        }
    };

    db.close().await;
    Ok(BuildSummary { inserted, overview, report })
}
