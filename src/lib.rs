pub mod aggregate;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod db;
pub mod loader;
pub mod manifest;
pub mod metadata;
pub mod pipeline;
pub mod render;
pub mod utils;
pub mod verify;

pub use config::{Opts, RenderOptions, ScanOptions};
pub use manifest::Manifest;
pub use metadata::Metadata;
