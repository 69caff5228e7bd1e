use log::info;

use crate::db::{ClusterRecord, Database, OverviewRecord, crud};
use crate::metadata::Metadata;

/// 根据 icon 表重新生成 cluster 与 overview 表
///
/// 结果只取决于 icon 表的内容，可重复执行
pub async fn aggregate(db: &Database, metadata: &Metadata) -> sqlx::Result<OverviewRecord> {
    let mut tx = db.begin().await?;

    crud::clear_clusters(&mut *tx).await?;
    let folders = crud::distinct_clusters(&mut *tx).await?;
    for folder in &folders {
        let count = crud::count_icons_in_cluster(&mut *tx, folder).await?;
        let record = ClusterRecord::new(folder, count, metadata.cluster(folder));
        crud::insert_cluster(&mut *tx, &record).await?;
    }

    let total_count = crud::count_icons(&mut *tx).await?;
    crud::clear_overview(&mut *tx).await?;
    crud::set_overview(&mut *tx, total_count).await?;

    tx.commit().await?;
    info!("✓ 汇总 {} 个图标集，共 {} 个图标", folders.len(), total_count);

    Ok(OverviewRecord { total_count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::loader::load_manifest;
    use crate::manifest::{IconEntry, Manifest};

    fn manifest(cluster: &str, names: &[&str]) -> Manifest {
        let icons = names
            .iter()
            .map(|name| IconEntry { filename: name.to_string(), base64: "UklGRg==".to_string() })
            .collect();
        Manifest::new(cluster, icons)
    }

    const METADATA: &str = r#"{"clusters": {
        "arrows": {"name": "Arrows", "path": "/arrows", "keywords": ["arrow"], "features": ["outline"], "title": "Arrow set", "description": "All arrows"},
        "arrows-extra": {"name": "Arrows", "source_folder": "extra"}
    }}"#;

    #[tokio::test]
    async fn counts_match_icon_table() {
        let dir = tempfile::tempdir().unwrap();
        let db = init_db(dir.path().join("icons.db")).await.unwrap();
        let metadata = Metadata::from_json(METADATA).unwrap();

        load_manifest(&db, &manifest("arrows", &["a.svg", "b.svg", "c.svg"]), &metadata).await.unwrap();
        load_manifest(&db, &manifest("shapes", &["a.svg"]), &metadata).await.unwrap();

        let overview = aggregate(&db, &metadata).await.unwrap();
        assert_eq!(overview.total_count, 4);
        assert_eq!(crud::get_overview(&db).await.unwrap(), Some(overview));

        let clusters = crud::all_clusters(&db).await.unwrap();
        assert_eq!(clusters.len(), 2);

        let (name, count, source_folder, path, keywords, features, title, description) =
            clusters[0].clone();
        assert_eq!((name.as_str(), count, source_folder.as_str()), ("Arrows", 3, "arrows"));
        assert_eq!((path.as_str(), keywords.as_str(), features.as_str()), ("/arrows", r#"["arrow"]"#, r#"["outline"]"#));
        assert_eq!((title.as_str(), description.as_str()), ("Arrow set", "All arrows"));

        // 没有元数据时使用目录名
        assert_eq!(clusters[1].0, "shapes");
        assert_eq!(clusters[1].1, 1);
        assert_eq!(clusters[1].2, "shapes");
        assert_eq!(clusters[1].4, "[]");
    }

    #[tokio::test]
    async fn aggregate_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db = init_db(dir.path().join("icons.db")).await.unwrap();
        let metadata = Metadata::default();

        load_manifest(&db, &manifest("b", &["1.svg", "2.svg"]), &metadata).await.unwrap();
        load_manifest(&db, &manifest("a", &["1.svg"]), &metadata).await.unwrap();

        aggregate(&db, &metadata).await.unwrap();
        let first = crud::all_clusters(&db).await.unwrap();
        aggregate(&db, &metadata).await.unwrap();
        let second = crud::all_clusters(&db).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(crud::get_overview(&db).await.unwrap().unwrap().total_count, 3);
        let overview_rows: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM overview").fetch_one(&db).await.unwrap();
        assert_eq!(overview_rows, 1);
    }

    #[tokio::test]
    async fn folders_sharing_a_display_name_are_summed() {
        let dir = tempfile::tempdir().unwrap();
        let db = init_db(dir.path().join("icons.db")).await.unwrap();
        let metadata = Metadata::from_json(METADATA).unwrap();

        load_manifest(&db, &manifest("arrows", &["a.svg"]), &metadata).await.unwrap();
        load_manifest(&db, &manifest("arrows-extra", &["a.svg", "b.svg"]), &metadata).await.unwrap();
        aggregate(&db, &metadata).await.unwrap();

        let clusters = crud::all_clusters(&db).await.unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].1, 3);
        assert_eq!(clusters[0].2, "arrows");
    }

    #[tokio::test]
    async fn empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let db = init_db(dir.path().join("icons.db")).await.unwrap();

        let overview = aggregate(&db, &Metadata::default()).await.unwrap();
        assert_eq!(overview.total_count, 0);
        assert!(crud::all_clusters(&db).await.unwrap().is_empty());
    }
}
