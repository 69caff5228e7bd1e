use std::fs;
use std::path::Path;

use log::info;
use sqlx::sqlite::*;
use sqlx::{Result, SqlitePool};

pub mod crud;
pub mod model;

pub use model::*;

pub type Database = SqlitePool;

/// 删除旧的数据库文件并创建新的数据库
pub async fn init_db(filename: impl AsRef<Path>) -> Result<Database> {
    let filename = filename.as_ref();
    info!("重建数据库: {}", filename.display());

    for suffix in ["", "-journal", "-wal", "-shm"] {
        let mut path = filename.as_os_str().to_owned();
        path.push(suffix);
        match fs::remove_file(&path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }
    }
    if let Some(parent) = filename.parent() {
        fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .journal_mode(SqliteJournalMode::Delete)
        .synchronous(SqliteSynchronous::Normal)
        .filename(filename)
        .create_if_missing(true);
    let pool = connect(options).await?;

    sqlx::raw_sql(include_str!("schema.sql")).execute(&pool).await?;

    Ok(pool)
}

/// 以只读方式打开已有的数据库
pub async fn open_db(filename: impl AsRef<Path>) -> Result<Database> {
    let options = SqliteConnectOptions::new().filename(filename.as_ref()).read_only(true);
    connect(options).await
}

async fn connect(options: SqliteConnectOptions) -> Result<Database> {
    // 整个流程只有一个写入者
    SqlitePoolOptions::new().max_connections(1).connect_with(options).await
}
