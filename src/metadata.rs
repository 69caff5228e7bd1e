//! 图标集元数据（`cluster_svg.json`）
//!
//! ```json
//! { "clusters": { "<目录名>": { "name": "...", "fileNames": [ { "fileName": "a.svg", ... } ] } } }
//! ```
//!
//! 所有字段都是可选的，查询不存在的图标集或图标时返回全空的默认值。
//! 类型错误（包括 `null`）的字段按缺失处理，只丢弃该字段本身。

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 单个图标的描述信息
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IconMeta {
    #[serde(rename = "fileName", deserialize_with = "lenient")]
    pub file_name: String,
    #[serde(deserialize_with = "lenient")]
    pub description: String,
    #[serde(deserialize_with = "lenient")]
    pub usecases: String,
    #[serde(deserialize_with = "lenient")]
    pub synonyms: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub industry: String,
    #[serde(deserialize_with = "lenient")]
    pub emotional_cues: String,
    #[serde(deserialize_with = "lenient")]
    pub enhanced: bool,
}

/// 图标集的展示信息
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ClusterMeta {
    /// 展示名称，缺失时使用目录名
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    /// 来源目录，缺失时使用目录名
    #[serde(deserialize_with = "lenient")]
    pub source_folder: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub path: String,
    #[serde(deserialize_with = "lenient")]
    pub keywords: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub features: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient")]
    pub description: String,
    /// 格式错误的条目会被丢弃
    #[serde(rename = "fileNames", deserialize_with = "lenient_seq")]
    pub file_names: Vec<IconMeta>,
}

/// 类型不匹配时返回默认值
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// 逐个解析数组元素，跳过无法解析的元素；不是数组时返回空列表
fn lenient_seq<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(vec![]);
    };
    Ok(items.into_iter().filter_map(|item| serde_json::from_value(item).ok()).collect())
}

impl ClusterMeta {
    pub fn display_name<'a>(&'a self, folder: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(folder)
    }

    pub fn source_folder<'a>(&'a self, folder: &'a str) -> &'a str {
        self.source_folder.as_deref().unwrap_or(folder)
    }
}

static EMPTY_ICON: IconMeta = IconMeta {
    file_name: String::new(),
    description: String::new(),
    usecases: String::new(),
    synonyms: Vec::new(),
    tags: Vec::new(),
    industry: String::new(),
    emotional_cues: String::new(),
    enhanced: false,
};

static EMPTY_CLUSTER: ClusterMeta = ClusterMeta {
    name: None,
    source_folder: None,
    path: String::new(),
    keywords: Vec::new(),
    features: Vec::new(),
    title: String::new(),
    description: String::new(),
    file_names: Vec::new(),
};

#[derive(Deserialize, Default)]
struct MetadataFile {
    #[serde(default, deserialize_with = "lenient")]
    clusters: HashMap<String, Value>,
}

#[derive(Debug, Default)]
pub struct Metadata {
    clusters: HashMap<String, ClusterMeta>,
    /// (目录名, 文件名) => 在 `clusters[目录名].file_names` 中的下标
    icons: HashMap<(String, String), usize>,
}

impl Metadata {
    /// 加载元数据文件，文件不存在或无法解析时返回空元数据
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            warn!("元数据文件不存在: {}，使用空元数据", path.display());
            return Self::default();
        }
        match Self::read(path) {
            Ok(metadata) => {
                info!("加载元数据: {} 个图标集", metadata.clusters.len());
                metadata
            }
            Err(e) => {
                warn!("读取元数据失败: {:#}，使用空元数据", e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("读取文件失败: {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: MetadataFile = serde_json::from_str(content).context("元数据格式错误")?;

        let mut clusters = HashMap::new();
        for (folder, value) in file.clusters {
            match serde_json::from_value::<ClusterMeta>(value) {
                Ok(cluster) => {
                    clusters.insert(folder, cluster);
                }
                Err(e) => warn!("跳过图标集 {} 的元数据: {}", folder, e),
            }
        }
        Ok(Self::from_clusters(clusters))
    }

    pub fn from_clusters(clusters: HashMap<String, ClusterMeta>) -> Self {
        let mut icons = HashMap::new();
        for (folder, cluster) in &clusters {
            // 同名文件以最后一条为准
            for (i, icon) in cluster.file_names.iter().enumerate() {
                icons.insert((folder.clone(), icon.file_name.clone()), i);
            }
        }
        Self { clusters, icons }
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// 查询图标集信息，不存在时返回默认值
    pub fn cluster(&self, folder: &str) -> &ClusterMeta {
        self.clusters.get(folder).unwrap_or(&EMPTY_CLUSTER)
    }

    /// 查询图标信息，不存在时返回默认值
    pub fn icon(&self, folder: &str, file_name: &str) -> &IconMeta {
        self.icons
            .get(&(folder.to_owned(), file_name.to_owned()))
            .and_then(|&i| self.clusters.get(folder).map(|c| &c.file_names[i]))
            .unwrap_or(&EMPTY_ICON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "clusters": {
            "arrows": {
                "name": "Arrows & Directions",
                "path": "/icons/arrows",
                "keywords": ["arrow", "direction"],
                "title": "Arrow icons",
                "fileNames": [
                    {"fileName": "up.svg", "description": "old"},
                    {"fileName": "up.svg", "description": "Arrow up", "synonyms": ["north"], "tags": ["nav"], "enhanced": true},
                    {"fileName": "down.svg", "usecases": "scrolling", "emotional_cues": "calm"}
                ]
            },
            "misc": {}
        }
    }"#;

    #[test]
    fn icon_lookup() {
        let metadata = Metadata::from_json(SAMPLE).unwrap();

        let up = metadata.icon("arrows", "up.svg");
        assert_eq!(up.description, "Arrow up");
        assert_eq!(up.synonyms, vec!["north"]);
        assert!(up.enhanced);

        let down = metadata.icon("arrows", "down.svg");
        assert_eq!(down.usecases, "scrolling");
        assert_eq!(down.emotional_cues, "calm");
        assert!(down.tags.is_empty());

        assert_eq!(metadata.icon("arrows", "left.svg"), &IconMeta::default());
        assert_eq!(metadata.icon("unknown", "up.svg"), &IconMeta::default());
    }

    #[test]
    fn cluster_lookup_falls_back_to_folder() {
        let metadata = Metadata::from_json(SAMPLE).unwrap();

        let arrows = metadata.cluster("arrows");
        assert_eq!(arrows.display_name("arrows"), "Arrows & Directions");
        assert_eq!(arrows.source_folder("arrows"), "arrows");
        assert_eq!(arrows.keywords, vec!["arrow", "direction"]);

        let misc = metadata.cluster("misc");
        assert_eq!(misc.display_name("misc"), "misc");
        assert_eq!(metadata.cluster("unknown"), &ClusterMeta::default());
    }

    #[test]
    fn missing_or_broken_file_gives_empty_metadata() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Metadata::load(&dir.path().join("missing.json")).is_empty());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ clusters: ").unwrap();
        assert!(Metadata::load(&broken).is_empty());

        let no_clusters = dir.path().join("empty.json");
        fs::write(&no_clusters, "{}").unwrap();
        assert!(Metadata::load(&no_clusters).is_empty());
    }

    #[test]
    fn bad_field_only_loses_that_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cluster_svg.json");
        fs::write(
            &path,
            r#"{"clusters": {
                "misc": {"name": "Misc", "keywords": "not a list", "fileNames": [
                    {"fileName": "x.svg", "description": "An x", "synonyms": null, "enhanced": "yes"}
                ]},
                "arrows": {"name": "Arrows", "fileNames": [{"fileName": "up.svg", "description": "Arrow up"}]}
            }}"#,
        )
        .unwrap();

        let metadata = Metadata::load(&path);
        assert_eq!(metadata.cluster("arrows").display_name("arrows"), "Arrows");
        assert_eq!(metadata.icon("arrows", "up.svg").description, "Arrow up");

        let misc = metadata.cluster("misc");
        assert_eq!(misc.display_name("misc"), "Misc");
        assert!(misc.keywords.is_empty());
        let x = metadata.icon("misc", "x.svg");
        assert_eq!(x.description, "An x");
        assert!(x.synonyms.is_empty());
        assert!(!x.enhanced);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let metadata = Metadata::from_json(
            r#"{"clusters": {
                "broken": "not an object",
                "shapes": {"name": null, "fileNames": [42, {"fileName": "a.svg", "tags": ["round"]}]}
            }}"#,
        )
        .unwrap();

        assert_eq!(metadata.cluster("broken"), &ClusterMeta::default());
        let shapes = metadata.cluster("shapes");
        assert_eq!(shapes.display_name("shapes"), "shapes");
        assert_eq!(shapes.file_names.len(), 1);
        assert_eq!(metadata.icon("shapes", "a.svg").tags, vec!["round"]);
    }
}
