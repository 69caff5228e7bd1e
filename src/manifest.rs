//! 图标集清单：渲染阶段与导入阶段之间交换的数据
//!
//! 文件格式：`<cluster>.json` => `{ "icons": [ { "filename": ..., "base64": ... } ] }`

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

/// 单个渲染成功的图标
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IconEntry {
    pub filename: String,
    pub base64: String,
}

impl IconEntry {
    /// 文件名与图片数据均不为空
    pub fn is_valid(&self) -> bool {
        !self.filename.is_empty() && !self.base64.is_empty()
    }
}

/// 一个图标集的渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// 图标集目录名
    pub cluster: String,
    /// 按渲染完成顺序排列
    pub icons: Vec<IconEntry>,
}

impl Manifest {
    pub fn new(cluster: impl Into<String>, icons: Vec<IconEntry>) -> Self {
        Self { cluster: cluster.into(), icons }
    }

    pub fn valid_entries(&self) -> impl Iterator<Item = &IconEntry> {
        self.icons.iter().filter(|icon| icon.is_valid())
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.cluster)
    }
}

#[derive(Serialize)]
struct ManifestRef<'a> {
    icons: &'a [IconEntry],
}

#[derive(Deserialize)]
struct RawManifest {
    icons: Vec<RawEntry>,
}

/// 缺失或为 null 的字段视为空字符串
#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    base64: Option<String>,
}

/// 将清单写入 `<dir>/<cluster>.json`
pub fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("创建目录失败: {}", dir.display()))?;
    let path = dir.join(manifest.file_name());
    let file = File::create(&path).with_context(|| format!("创建文件失败: {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &ManifestRef { icons: &manifest.icons })?;
    writer.flush()?;

    Ok(path)
}

/// 读取单个清单，图标集名称取自文件名
pub fn read_manifest(path: &Path) -> Result<Manifest> {
    let cluster = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .with_context(|| format!("无效的清单路径: {}", path.display()))?;

    let file = File::open(path).with_context(|| format!("打开文件失败: {}", path.display()))?;
    let raw: RawManifest =
        serde_json::from_reader(BufReader::new(file)).context("清单格式错误，需要 icons 数组")?;

    let icons = raw
        .icons
        .into_iter()
        .map(|entry| IconEntry {
            filename: entry.filename.unwrap_or_default(),
            base64: entry.base64.unwrap_or_default(),
        })
        .collect();

    Ok(Manifest { cluster, icons })
}

/// 读取目录下的所有 `*.json` 清单（按文件名排序）
///
/// 无法读取或格式错误的清单会被跳过，目录不存在则返回错误
pub fn read_manifests(dir: &Path) -> Result<Vec<Manifest>> {
    if !dir.is_dir() {
        return Err(anyhow::anyhow!("清单目录不存在: {}", dir.display()));
    }

    let mut manifests = vec![];
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("跳过无法访问的清单: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        match read_manifest(path) {
            Ok(manifest) => manifests.push(manifest),
            Err(e) => warn!("跳过清单 {}: {:#}", path.display(), e),
        }
    }

    Ok(manifests)
}
