use log::info;

use crate::db::{ClusterCount, ClusterSummary, Database, IconSample, crud};

/// 数据库内容的只读检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub total: i64,
    /// 前 10 个图标集的图标数量
    pub cluster_counts: Vec<ClusterCount>,
    /// 前 5 个图标
    pub samples: Vec<IconSample>,
    /// cluster 表的前 10 行
    pub clusters: Vec<ClusterSummary>,
    pub overview_total: Option<i64>,
    /// 除自增 id 外全部内容的 blake3 哈希
    pub fingerprint: String,
}

impl Report {
    pub fn log(&self) {
        info!("图标总数: {}", self.total);
        for ClusterCount { cluster, count } in &self.cluster_counts {
            info!("  {}: {}", cluster, count);
        }

        info!("示例记录:");
        for IconSample { cluster, name, base64_len } in &self.samples {
            info!("  ({}, {}, {})", cluster, name, base64_len);
        }

        info!("cluster 表:");
        for ClusterSummary { name, count, source_folder } in &self.clusters {
            info!("  {}: {} 个图标，来源目录: {}", name, count, source_folder);
        }

        match self.overview_total {
            Some(total) => info!("overview 表: total_count = {}", total),
            None => info!("overview 表为空"),
        }
        info!("内容指纹: {}", self.fingerprint);
    }
}

/// 读取数据库统计信息，不做任何修改
pub async fn verify(db: &Database) -> sqlx::Result<Report> {
    Ok(Report {
        total: crud::count_icons(db).await?,
        cluster_counts: crud::cluster_counts(db, 10).await?,
        samples: crud::sample_icons(db, 5).await?,
        clusters: crud::list_clusters(db, 10).await?,
        overview_total: crud::get_overview(db).await?.map(|o| o.total_count),
        fingerprint: fingerprint(db).await?,
    })
}

/// 按主键顺序对三张表的内容做哈希，忽略 icon 表的自增 id
pub async fn fingerprint(db: &Database) -> sqlx::Result<String> {
    let mut hasher = blake3::Hasher::new();

    update(&mut hasher, "icon");
    for (cluster, name, base64, description, usecases, synonyms, tags, industry, cues, enhanced) in
        crud::all_icons(db).await?
    {
        for s in [cluster, name, base64, description, usecases, synonyms, tags, industry, cues] {
            update(&mut hasher, &s);
        }
        update(&mut hasher, &enhanced.to_string());
    }

    update(&mut hasher, "cluster");
    for (name, count, source_folder, path, keywords, features, title, description) in
        crud::all_clusters(db).await?
    {
        update(&mut hasher, &name);
        update(&mut hasher, &count.to_string());
        for s in [source_folder, path, keywords, features, title, description] {
            update(&mut hasher, &s);
        }
    }

    update(&mut hasher, "overview");
    if let Some(overview) = crud::get_overview(db).await? {
        update(&mut hasher, &overview.total_count.to_string());
    }

    Ok(hasher.finalize().to_hex().to_string())
}

/// 带长度前缀，避免相邻字段拼接产生歧义
fn update(hasher: &mut blake3::Hasher, s: &str) {
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}
