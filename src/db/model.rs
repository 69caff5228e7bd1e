use sqlx::FromRow;

use crate::manifest::IconEntry;
use crate::metadata::{ClusterMeta, IconMeta};

/// 图标记录，(cluster, name) 唯一
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRecord {
    /// 图标集目录名
    pub cluster: String,
    /// 文件名
    pub name: String,
    /// WebP 图片的 base64 编码
    pub image_data: String,
    pub description: String,
    pub usecases: String,
    pub synonyms: Vec<String>,
    pub tags: Vec<String>,
    pub industry: String,
    pub emotional_cues: String,
    pub enhanced: bool,
}

impl IconRecord {
    pub fn new(cluster: &str, entry: &IconEntry, meta: &IconMeta) -> Self {
        Self {
            cluster: cluster.to_owned(),
            name: entry.filename.clone(),
            image_data: entry.base64.clone(),
            description: meta.description.clone(),
            usecases: meta.usecases.clone(),
            synonyms: meta.synonyms.clone(),
            tags: meta.tags.clone(),
            industry: meta.industry.clone(),
            emotional_cues: meta.emotional_cues.clone(),
            enhanced: meta.enhanced,
        }
    }
}

/// 图标集汇总记录，由 icon 表推导
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterRecord {
    /// 展示名称
    pub name: String,
    pub count: i64,
    pub source_folder: String,
    pub path: String,
    pub keywords: Vec<String>,
    pub features: Vec<String>,
    pub title: String,
    pub description: String,
}

impl ClusterRecord {
    pub fn new(folder: &str, count: i64, meta: &ClusterMeta) -> Self {
        Self {
            name: meta.display_name(folder).to_owned(),
            count,
            source_folder: meta.source_folder(folder).to_owned(),
            path: meta.path.clone(),
            keywords: meta.keywords.clone(),
            features: meta.features.clone(),
            title: meta.title.clone(),
            description: meta.description.clone(),
        }
    }
}

/// 全局统计，只有一行
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct OverviewRecord {
    pub total_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ClusterCount {
    pub cluster: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct IconSample {
    pub cluster: String,
    pub name: String,
    pub base64_len: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ClusterSummary {
    pub name: String,
    pub count: i64,
    pub source_folder: String,
}
