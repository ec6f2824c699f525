use autoergen_entity::prelude::User;
use autoergen_entity::{project, user};
use sea_orm::error::SqlErr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set, TransactionTrait,
};
use tracing::info;

use crate::auth;
use crate::store::{StoreError, StoreResult};

/// 注册时自动创建的默认项目
const DEFAULT_PROJECT_NAME: &str = "My First ERD Project";
const DEFAULT_PROJECT_DESCRIPTION: &str = "Default workspace";

/// 创建用户，并在同一事务中附带一个默认项目
///
/// 邮箱唯一性交给数据库约束，不做预检查，避免并发下的竞态窗口。
pub async fn create_user(conn: &DatabaseConnection, email: &str, password: &str) -> StoreResult<user::Model> {
    let txn = conn.begin().await?;

    let new_user = user::ActiveModel {
        id: NotSet,
        email: Set(email.to_string()),
        password_hash: Set(auth::hash_password(password)),
        created_at: NotSet,
    };
    let inserted = match new_user.insert(&txn).await {
        Ok(model) => model,
        Err(e) => {
            return Err(match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::EmailTaken,
                _ => StoreError::Db(e),
            });
        }
    };

    project::ActiveModel {
        id: NotSet,
        user_id: Set(inserted.id),
        name: Set(DEFAULT_PROJECT_NAME.to_string()),
        description: Set(Some(DEFAULT_PROJECT_DESCRIPTION.to_string())),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!("新用户注册成功: {}", inserted.email);
    Ok(inserted)
}

/// 校验邮箱与密码，成功时返回用户 id
pub async fn authenticate(conn: &DatabaseConnection, email: &str, password: &str) -> StoreResult<Option<i32>> {
    let Some(found) = User::find().filter(user::Column::Email.eq(email)).one(conn).await? else {
        return Ok(None);
    };
    if found.password_hash == auth::hash_password(password) {
        Ok(Some(found.id))
    } else {
        Ok(None)
    }
}

/// 按 id 查询用户
pub async fn get_user(conn: &DatabaseConnection, user_id: i32) -> StoreResult<user::Model> {
    User::find_by_id(user_id).one(conn).await?.ok_or(StoreError::NotFound)
}

/// 删除用户，其项目、日志与脚本存档由外键级联删除
pub async fn delete_user(conn: &DatabaseConnection, user_id: i32) -> StoreResult<()> {
    let result = User::delete_by_id(user_id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::NotFound);
    }
    info!("用户 {} 已删除，下属数据级联清理", user_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use autoergen_entity::prelude::{Log, Project, SavedSchema};
    use sea_orm::PaginatorTrait;

    use super::*;
    use crate::store::test_support::test_db;
    use crate::store::{log, project as project_store, saved_schema};

    #[tokio::test]
    async fn test_fresh_database_contains_only_seed_rows() {
        let (_tmp_dir, db) = test_db().await;

        let users = User::find().all(&db).await.expect("查询用户失败");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "admin@example.com");

        let projects = Project::find().all(&db).await.expect("查询项目失败");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].user_id, users[0].id);
        assert_eq!(projects[0].name, "My First ERD Project");
    }

    #[tokio::test]
    async fn test_create_user_also_creates_default_project() {
        let (_tmp_dir, db) = test_db().await;

        let user = create_user(&db, "alice@example.com", "secret").await.expect("注册失败");
        let projects = project_store::list_for_user(&db, user.id).await.expect("查询项目失败");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "My First ERD Project");
        assert_eq!(projects[0].description.as_deref(), Some("Default workspace"));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (_tmp_dir, db) = test_db().await;

        create_user(&db, "bob@example.com", "pw1").await.expect("首次注册失败");
        let err = create_user(&db, "bob@example.com", "pw2")
            .await
            .expect_err("重复邮箱应当失败");
        assert!(matches!(err, StoreError::EmailTaken));
    }

    #[tokio::test]
    async fn test_authenticate_checks_password() {
        let (_tmp_dir, db) = test_db().await;

        let user = create_user(&db, "carol@example.com", "right").await.expect("注册失败");
        let ok = authenticate(&db, "carol@example.com", "right").await.expect("认证查询失败");
        assert_eq!(ok, Some(user.id));

        let wrong = authenticate(&db, "carol@example.com", "wrong").await.expect("认证查询失败");
        assert_eq!(wrong, None);

        let missing = authenticate(&db, "nobody@example.com", "right").await.expect("认证查询失败");
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_delete_user_cascades_to_all_descendants() {
        let (_tmp_dir, db) = test_db().await;

        let user = create_user(&db, "dave@example.com", "pw").await.expect("注册失败");
        let projects = project_store::list_for_user(&db, user.id).await.expect("查询项目失败");
        let project_id = projects[0].id;

        log::append(&db, project_id, "prompt", "{}".to_string(), 0.5)
            .await
            .expect("写入日志失败");
        saved_schema::save_version(&db, project_id, "CREATE TABLE t (id INT);", None)
            .await
            .expect("保存脚本失败");

        delete_user(&db, user.id).await.expect("删除用户失败");

        assert!(get_user(&db, user.id).await.is_err());
        let remaining_projects = Project::find()
            .filter(autoergen_entity::project::Column::UserId.eq(user.id))
            .count(&db)
            .await
            .expect("统计项目失败");
        assert_eq!(remaining_projects, 0);
        let remaining_logs = Log::find()
            .filter(autoergen_entity::log::Column::ProjectId.eq(project_id))
            .count(&db)
            .await
            .expect("统计日志失败");
        assert_eq!(remaining_logs, 0);
        let remaining_schemas = SavedSchema::find()
            .filter(autoergen_entity::saved_schema::Column::ProjectId.eq(project_id))
            .count(&db)
            .await
            .expect("统计脚本失败");
        assert_eq!(remaining_schemas, 0);

        // 种子管理员不受影响
        let admins = User::find().all(&db).await.expect("查询用户失败");
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].email, "admin@example.com");
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let (_tmp_dir, db) = test_db().await;

        let err = delete_user(&db, 9999).await.expect_err("不存在的用户应当报错");
        assert!(matches!(err, StoreError::NotFound));
    }
}
