pub mod log;
pub mod project;
pub mod saved_schema;
pub mod user;

use thiserror::Error;

/// 存储层错误，由 API 层映射为对应的状态码
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("邮箱已被注册")]
    EmailTaken,
    #[error("资源不存在")]
    NotFound,
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::DatabaseConnection;
    use tempfile::TempDir;

    /// 在临时目录中创建一个已应用全部迁移的数据库
    pub async fn test_db() -> (TempDir, DatabaseConnection) {
        let tmp_dir = TempDir::new().expect("创建临时目录失败");
        let db_path = tmp_dir.path().join("test.sqlite");
        crate::database::migrate(&db_path).await.expect("迁移测试数据库失败");
        let connection = crate::database::connect(&db_path).await.expect("连接测试数据库失败");
        (tmp_dir, connection)
    }
}
