use std::path::Path;

use anyhow::{Context, Result};
use autoergen_migration::{Migrator, MigratorTrait};
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sea_orm::sqlx::Executor;
use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use tracing::debug;

use crate::config::Args;

/// 创建 SQLite 连接选项（WAL + 外键约束）
fn create_sqlite_options(path: &Path) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30))
        .foreign_keys(true)
}

/// 创建数据库连接池
///
/// 级联删除依赖 SQLite 的外键约束，而外键开关是连接级别的，
/// 因此 after_connect 中对每个新连接再次执行 PRAGMA，确保设置生效。
pub async fn connect(path: &Path) -> Result<DatabaseConnection> {
    let pool = SqlitePoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("PRAGMA foreign_keys = ON;").await?;
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect_with(create_sqlite_options(path))
        .await?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// 应用所有待执行的迁移
///
/// 为迁移创建单连接池，避免多连接导致的迁移顺序问题。
pub async fn migrate(path: &Path) -> Result<()> {
    if !path.exists() {
        debug!("数据库文件不存在，将创建新的数据库");
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(create_sqlite_options(path))
        .await?;
    let connection = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool.clone());

    Migrator::up(&connection, None).await?;

    // 显式关闭连接池，确保释放所有数据库锁
    pool.close().await;
    debug!("迁移完成，已关闭迁移连接池");

    Ok(())
}

/// 进行数据库迁移并获取数据库连接，供外部使用
pub async fn setup_database(args: &Args) -> Result<DatabaseConnection> {
    let path = args.database_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("创建数据目录 {} 失败", parent.display()))?;
    }

    migrate(&path).await.context("数据库迁移失败")?;
    connect(&path).await.context("获取数据库连接失败")
}
