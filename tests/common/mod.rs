#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const CIRCLE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><circle cx="12" cy="12" r="10" fill="#1e90ff"/></svg>"##;
pub const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32"><rect x="4" y="4" width="24" height="24" fill="#222"/></svg>"##;
pub const TRIANGLE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><path d="M5 1 L9 9 L1 9 Z" fill="orange" stroke="black"/></svg>"#;

/// 创建 `<root>/<cluster>/<name>` 文件
pub fn write_svg(root: &Path, cluster: &str, name: &str, content: &str) {
    let dir = root.join(cluster);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

/// 一个包含 3 个图标的图标集 `shapes` 和一个空图标集 `empty`
pub fn sample_root(root: &Path) {
    write_svg(root, "shapes", "circle.svg", CIRCLE);
    write_svg(root, "shapes", "square.svg", SQUARE);
    write_svg(root, "shapes", "triangle.svg", TRIANGLE);
    fs::create_dir_all(root.join("empty")).unwrap();
}

pub const METADATA: &str = r#"{
    "clusters": {
        "shapes": {
            "name": "Basic Shapes",
            "path": "/icons/shapes",
            "keywords": ["geometry"],
            "features": ["filled"],
            "title": "Shapes",
            "description": "Simple geometric shapes",
            "fileNames": [
                {"fileName": "circle.svg", "description": "A circle", "tags": ["round"], "enhanced": true}
            ]
        }
    }
}"#;
