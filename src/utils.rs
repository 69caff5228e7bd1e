use anyhow::Result;
use indicatif::ProgressStyle;
use regex::Regex;

use crate::config::MAX_WORKERS;

pub fn pb_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>6}/{len:6} {wide_msg}",
    )
    .expect("invalid progress template")
    .progress_chars("##-")
}

/// 将逗号分隔的后缀列表转为忽略大小写的正则表达式
///
/// 例：`svg,svgz` => `(?i)^(svg|svgz)$`
pub fn suffix_regex(suffix: &str) -> Result<Regex> {
    let alternatives = suffix
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(regex::escape)
        .collect::<Vec<_>>();
    if alternatives.is_empty() {
        return Err(anyhow::anyhow!("无效的后缀名: {:?}", suffix));
    }
    Ok(Regex::new(&format!("(?i)^({})$", alternatives.join("|")))?)
}

/// 渲染线程数量：`min(7, jobs 或 CPU 核心数)`，至少为 1
pub fn worker_count(jobs: Option<usize>) -> usize {
    jobs.unwrap_or_else(num_cpus::get).clamp(1, MAX_WORKERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_regex_is_anchored() {
        let re = suffix_regex("svg").unwrap();
        assert!(re.is_match("svg"));
        assert!(re.is_match("SVG"));
        assert!(!re.is_match("svgz"));
        assert!(!re.is_match("png"));

        let re = suffix_regex("svg, svgz").unwrap();
        assert!(re.is_match("svgz"));
        assert!(suffix_regex(",").is_err());
    }

    #[test]
    fn worker_count_is_capped() {
        assert_eq!(worker_count(Some(32)), MAX_WORKERS);
        assert_eq!(worker_count(Some(0)), 1);
        assert_eq!(worker_count(Some(3)), 3);
        assert!(worker_count(None) <= MAX_WORKERS);
    }
}
