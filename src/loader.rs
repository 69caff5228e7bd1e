use log::info;

use crate::db::{Database, IconRecord, crud};
use crate::manifest::Manifest;
use crate::metadata::Metadata;

/// 导入一个清单，整个清单在一个事务中提交
///
/// 文件名或图片数据为空的条目会被忽略，(cluster, name) 已存在的条目会被跳过。
/// 返回实际插入的记录数。
pub async fn load_manifest(
    db: &Database,
    manifest: &Manifest,
    metadata: &Metadata,
) -> sqlx::Result<u64> {
    let mut tx = db.begin().await?;
    let mut inserted = 0;
    for entry in manifest.valid_entries() {
        let meta = metadata.icon(&manifest.cluster, &entry.filename);
        let record = IconRecord::new(&manifest.cluster, entry, meta);
        if crud::insert_icon(&mut *tx, &record).await? {
            inserted += 1;
        }
    }
    tx.commit().await?;
    Ok(inserted)
}

/// 依次导入所有清单，返回插入的记录总数
pub async fn load_manifests(
    db: &Database,
    manifests: &[Manifest],
    metadata: &Metadata,
) -> sqlx::Result<u64> {
    let mut total = 0;
    for manifest in manifests {
        let inserted = load_manifest(db, manifest, metadata).await?;
        let skipped = manifest.icons.len() as u64 - inserted;
        if skipped > 0 {
            info!("✓ {}: 插入 {} 条记录，跳过 {} 条", manifest.file_name(), inserted, skipped);
        } else {
            info!("✓ {}: 插入 {} 条记录", manifest.file_name(), inserted);
        }
        total += inserted;
    }
    info!("共从 {} 个清单插入 {} 条记录", manifests.len(), total);
    Ok(total)
}
