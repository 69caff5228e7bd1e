use sqlx::types::Json;
use sqlx::{Executor, Result, Sqlite};

use super::{ClusterCount, ClusterRecord, ClusterSummary, IconRecord, IconSample, OverviewRecord};

/// 添加图标记录，(cluster, name) 已存在时忽略
///
/// 返回是否插入了新记录
pub async fn insert_icon<'c, E>(executor: E, icon: &IconRecord) -> Result<bool>
where
    E: Executor<'c, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO icon
            (cluster, name, base64, description, usecases, synonyms, tags, industry, emotional_cues, enhanced)
        VALUES (?, ?, ?, ?, ?, json(?), json(?), ?, ?, ?)
        "#,
    )
    .bind(&icon.cluster)
    .bind(&icon.name)
    .bind(&icon.image_data)
    .bind(&icon.description)
    .bind(&icon.usecases)
    .bind(Json(&icon.synonyms))
    .bind(Json(&icon.tags))
    .bind(&icon.industry)
    .bind(&icon.emotional_cues)
    .bind(icon.enhanced)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// 图标总数
pub async fn count_icons<'c, E>(executor: E) -> Result<i64>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM icon").fetch_one(executor).await
}

/// 某个图标集下的图标数量
pub async fn count_icons_in_cluster<'c, E>(executor: E, cluster: &str) -> Result<i64>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM icon WHERE cluster = ?")
        .bind(cluster)
        .fetch_one(executor)
        .await
}

/// icon 表中出现过的所有图标集目录名（升序）
pub async fn distinct_clusters<'c, E>(executor: E) -> Result<Vec<String>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT DISTINCT cluster FROM icon ORDER BY cluster")
        .fetch_all(executor)
        .await
}

pub async fn clear_clusters<'c, E>(executor: E) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query("DELETE FROM cluster").execute(executor).await?;
    Ok(())
}

/// 添加图标集记录
///
/// 多个目录映射到同一个展示名称时，数量累加
pub async fn insert_cluster<'c, E>(executor: E, cluster: &ClusterRecord) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO cluster (name, count, source_folder, path, keywords, features, title, description)
        VALUES (?, ?, ?, ?, json(?), json(?), ?, ?)
        ON CONFLICT(name) DO UPDATE SET count = count + excluded.count
        "#,
    )
    .bind(&cluster.name)
    .bind(cluster.count)
    .bind(&cluster.source_folder)
    .bind(&cluster.path)
    .bind(Json(&cluster.keywords))
    .bind(Json(&cluster.features))
    .bind(&cluster.title)
    .bind(&cluster.description)
    .execute(executor)
    .await?;

    Ok(())
}

/// 重写 overview 表中唯一的一行
pub async fn set_overview<'c, E>(executor: E, total_count: i64) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query("INSERT OR REPLACE INTO overview (id, total_count) VALUES (1, ?)")
        .bind(total_count)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn clear_overview<'c, E>(executor: E) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query("DELETE FROM overview").execute(executor).await?;
    Ok(())
}

pub async fn get_overview<'c, E>(executor: E) -> Result<Option<OverviewRecord>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as("SELECT total_count FROM overview WHERE id = 1")
        .fetch_optional(executor)
        .await
}

/// 按图标集分组统计数量（按名称升序）
pub async fn cluster_counts<'c, E>(executor: E, limit: i64) -> Result<Vec<ClusterCount>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        "SELECT cluster, COUNT(*) AS count FROM icon GROUP BY cluster ORDER BY cluster LIMIT ?",
    )
    .bind(limit)
    .fetch_all(executor)
    .await
}

pub async fn sample_icons<'c, E>(executor: E, limit: i64) -> Result<Vec<IconSample>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        "SELECT cluster, name, length(base64) AS base64_len FROM icon ORDER BY cluster, name LIMIT ?",
    )
    .bind(limit)
    .fetch_all(executor)
    .await
}

pub async fn list_clusters<'c, E>(executor: E, limit: i64) -> Result<Vec<ClusterSummary>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as("SELECT name, count, source_folder FROM cluster ORDER BY name LIMIT ?")
        .bind(limit)
        .fetch_all(executor)
        .await
}

/// 图标表除 id 以外的全部内容，按 (cluster, name) 排序
pub type IconRow = (String, String, String, String, String, String, String, String, String, i64);

pub async fn all_icons<'c, E>(executor: E) -> Result<Vec<IconRow>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        r#"
        SELECT cluster, name, base64, description, usecases, synonyms, tags, industry, emotional_cues, enhanced
        FROM icon ORDER BY cluster, name
        "#,
    )
    .fetch_all(executor)
    .await
}

pub type ClusterRow = (String, i64, String, String, String, String, String, String);

pub async fn all_clusters<'c, E>(executor: E) -> Result<Vec<ClusterRow>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        r#"
        SELECT name, count, source_folder, path, keywords, features, title, description
        FROM cluster ORDER BY name
        "#,
    )
    .fetch_all(executor)
    .await
}
