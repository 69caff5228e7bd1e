use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use crossbeam_channel::unbounded;
use indicatif::ProgressBar;
use log::{info, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};
use regex::Regex;
use walkdir::WalkDir;

use crate::config::{RenderOptions, ScanOptions};
use crate::manifest::{IconEntry, Manifest};
use crate::render::svg_to_base64;
use crate::utils::{suffix_regex, worker_count};

/// 输入根目录下的一个子目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterDir {
    pub name: String,
    pub path: PathBuf,
}

/// 列出根目录下的所有图标集目录（按名称排序），跟随符号链接
///
/// 无法访问的条目（如失效的链接）会被跳过
pub fn scan_clusters(root: &Path) -> Result<Vec<ClusterDir>> {
    if !root.is_dir() {
        return Err(anyhow!("输入目录不存在: {}", root.display()));
    }

    let mut clusters = vec![];
    for entry in WalkDir::new(root).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("跳过无法访问的条目: {}", e);
                continue;
            }
        };
        if entry.file_type().is_dir() {
            clusters.push(ClusterDir {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
            });
        }
    }
    Ok(clusters)
}

/// 列出目录下（不递归）后缀名匹配的文件，跟随符号链接
pub fn scan_icons(dir: &Path, re_suf: &Regex) -> Vec<PathBuf> {
    let mut icons = vec![];
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("跳过无法访问的条目: {}", e);
                continue;
            }
        };
        let matched = entry
            .path()
            .extension()
            .is_some_and(|ext| re_suf.is_match(&ext.to_string_lossy()));
        if entry.file_type().is_file() && matched {
            icons.push(entry.into_path());
        }
    }
    icons
}

/// 在固定大小的线程池上并行渲染每个图标集
pub struct ClusterProcessor {
    pool: ThreadPool,
    render: RenderOptions,
    re_suf: Regex,
}

impl ClusterProcessor {
    pub fn new(render: RenderOptions, scan: &ScanOptions) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_count(scan.jobs))
            .thread_name(|i| format!("render-{i}"))
            .build()?;
        let re_suf = suffix_regex(&scan.suffix)?;
        Ok(Self { pool, render, re_suf })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// 渲染一个图标集，返回按完成顺序排列的成功结果
    ///
    /// 没有任何图标渲染成功时返回 `None`
    pub fn process_cluster(&self, cluster: &ClusterDir, pb: &ProgressBar) -> Option<Manifest> {
        let files = scan_icons(&cluster.path, &self.re_suf);
        if files.is_empty() {
            pb.suspend(|| warn!("✗ 图标集 {} 中没有 SVG 文件，跳过", cluster.name));
            return None;
        }
        pb.inc_length(files.len() as u64);

        let (tx, rx) = unbounded();
        for path in files {
            let tx = tx.clone();
            let render = self.render;
            self.pool.spawn(move || {
                let result = catch_unwind(AssertUnwindSafe(|| svg_to_base64(&path, &render)))
                    .unwrap_or_else(|_| Err(anyhow!("渲染时发生 panic")));
                let _ = tx.send((path, result));
            });
        }
        drop(tx);

        let mut icons = vec![];
        for (path, result) in rx {
            let filename = path.file_name().map(|s| s.to_string_lossy().into_owned());
            match (filename, result) {
                (Some(filename), Ok(base64)) => {
                    pb.set_message(format!("✓ {}/{}", cluster.name, filename));
                    icons.push(IconEntry { filename, base64 });
                }
                (_, Err(e)) => pb.suspend(|| warn!("✗ {}: {:#}", path.display(), e)),
                (None, Ok(_)) => pb.suspend(|| warn!("✗ 无效的文件名: {}", path.display())),
            }
            pb.inc(1);
        }

        if icons.is_empty() {
            pb.suspend(|| warn!("✗ 图标集 {} 中没有渲染成功的图标，跳过", cluster.name));
            return None;
        }
        Some(Manifest::new(cluster.name.clone(), icons))
    }

    /// 渲染根目录下的所有图标集
    pub fn process_root(&self, root: &Path, pb: &ProgressBar) -> Result<Vec<Manifest>> {
        let clusters = scan_clusters(root)?;
        info!("发现 {} 个图标集，使用 {} 个渲染线程", clusters.len(), self.workers());

        let mut manifests = vec![];
        for (i, cluster) in clusters.iter().enumerate() {
            pb.set_message(format!("[{}/{}] {}", i + 1, clusters.len(), cluster.name));
            if let Some(manifest) = self.process_cluster(cluster, pb) {
                pb.suspend(|| {
                    info!("✓ 图标集 {}: {} 个图标", manifest.cluster, manifest.icons.len())
                });
                manifests.push(manifest);
            }
        }

        info!("成功处理 {}/{} 个图标集", manifests.len(), clusters.len());
        Ok(manifests)
    }
}
