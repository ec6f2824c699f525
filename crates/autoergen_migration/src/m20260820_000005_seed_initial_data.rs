use sea_orm::ConnectionTrait;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 种子管理员邮箱
const SEED_ADMIN_EMAIL: &str = "admin@example.com";
/// 种子管理员密码哈希（"admin123" 的 SHA-256 十六进制）
const SEED_ADMIN_PASSWORD_HASH: &str = "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9";
/// 种子项目名称与描述
const SEED_PROJECT_NAME: &str = "My First ERD Project";
const SEED_PROJECT_DESCRIPTION: &str = "Default workspace";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // 种子数据：一个管理员用户和一个引用它的默认项目。
        // 重复执行时保持幂等，不覆盖已有数据。
        let admin_id = match find_admin_id(db).await? {
            Some(id) => id,
            None => {
                insert_admin(db).await?;
                find_admin_id(db)
                    .await?
                    .ok_or_else(|| DbErr::Custom("种子用户插入后无法查询到".to_string()))?
            }
        };

        if count_projects_of(db, admin_id).await? == 0 {
            insert_seed_project(db, admin_id).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        use sea_orm::{DatabaseBackend, Statement};

        // 删除种子用户，项目及其下属数据由外键级联清理
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "DELETE FROM users WHERE email = ?",
            vec![SEED_ADMIN_EMAIL.into()],
        );
        manager.get_connection().execute(stmt).await?;
        Ok(())
    }
}

async fn find_admin_id<C: ConnectionTrait>(db: &C) -> Result<Option<i32>, DbErr> {
    use sea_orm::{DatabaseBackend, Statement};

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "SELECT id FROM users WHERE email = ? LIMIT 1",
        vec![SEED_ADMIN_EMAIL.into()],
    );
    let row = db.query_one(stmt).await?;
    let Some(row) = row else {
        return Ok(None);
    };
    let id: i32 = row.try_get("", "id")?;
    Ok(Some(id))
}

async fn insert_admin<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    use sea_orm::{DatabaseBackend, Statement};

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO users (email, password_hash) VALUES (?, ?)",
        vec![SEED_ADMIN_EMAIL.into(), SEED_ADMIN_PASSWORD_HASH.into()],
    );
    db.execute(stmt).await?;
    Ok(())
}

async fn count_projects_of<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<i64, DbErr> {
    use sea_orm::{DatabaseBackend, Statement};

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "SELECT COUNT(*) as count FROM projects WHERE user_id = ?",
        vec![user_id.into()],
    );
    let row = db.query_one(stmt).await?;
    let Some(row) = row else {
        return Ok(0);
    };
    let count: i64 = row.try_get("", "count")?;
    Ok(count)
}

async fn insert_seed_project<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<(), DbErr> {
    use sea_orm::{DatabaseBackend, Statement};

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO projects (user_id, name, description) VALUES (?, ?, ?)",
        vec![user_id.into(), SEED_PROJECT_NAME.into(), SEED_PROJECT_DESCRIPTION.into()],
    );
    db.execute(stmt).await?;
    Ok(())
}
