use autoergen_entity::prelude::Project;
use autoergen_entity::project;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::store::{StoreError, StoreResult};
use crate::utils::time_format::now_standard_string;

/// 列出用户的全部项目，按创建顺序排列
pub async fn list_for_user(conn: &DatabaseConnection, user_id: i32) -> StoreResult<Vec<project::Model>> {
    Ok(Project::find()
        .filter(project::Column::UserId.eq(user_id))
        .order_by_asc(project::Column::Id)
        .all(conn)
        .await?)
}

/// 创建项目
pub async fn create(
    conn: &DatabaseConnection,
    user_id: i32,
    name: &str,
    description: Option<String>,
) -> StoreResult<project::Model> {
    let model = project::ActiveModel {
        id: NotSet,
        user_id: Set(user_id),
        name: Set(name.to_string()),
        description: Set(description),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(conn)
    .await?;
    Ok(model)
}

/// 查询项目并校验归属，不属于该用户时按不存在处理
pub async fn get_owned(conn: &DatabaseConnection, user_id: i32, project_id: i32) -> StoreResult<project::Model> {
    Project::find_by_id(project_id)
        .filter(project::Column::UserId.eq(user_id))
        .one(conn)
        .await?
        .ok_or(StoreError::NotFound)
}

/// 更新项目名称与描述，并写入新的 updated_at
pub async fn update(
    conn: &DatabaseConnection,
    user_id: i32,
    project_id: i32,
    name: Option<String>,
    description: Option<String>,
) -> StoreResult<project::Model> {
    let existing = get_owned(conn, user_id, project_id).await?;

    let mut active: project::ActiveModel = existing.into();
    if let Some(name) = name {
        active.name = Set(name);
    }
    if let Some(description) = description {
        active.description = Set(Some(description));
    }
    active.updated_at = Set(now_standard_string());

    Ok(active.update(conn).await?)
}

/// 删除项目，日志与脚本存档由外键级联删除，所属用户与其它项目不受影响
pub async fn delete(conn: &DatabaseConnection, user_id: i32, project_id: i32) -> StoreResult<()> {
    let existing = get_owned(conn, user_id, project_id).await?;
    Project::delete_by_id(existing.id).exec(conn).await?;
    info!("项目 {} 已删除", project_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use autoergen_entity::prelude::{Log, SavedSchema, User};
    use sea_orm::error::SqlErr;
    use sea_orm::PaginatorTrait;

    use super::*;
    use crate::store::test_support::test_db;
    use crate::store::{log, saved_schema, user as user_store};

    #[tokio::test]
    async fn test_project_requires_existing_user() {
        let (_tmp_dir, db) = test_db().await;

        let err = project::ActiveModel {
            id: NotSet,
            user_id: Set(9999),
            name: Set("orphan".to_string()),
            description: Set(None),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(&db)
        .await
        .expect_err("引用不存在的用户应当失败");
        assert!(matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))));
    }

    #[tokio::test]
    async fn test_delete_project_keeps_owner_and_siblings() {
        let (_tmp_dir, db) = test_db().await;

        let user = user_store::create_user(&db, "erin@example.com", "pw").await.expect("注册失败");
        let default_project = &list_for_user(&db, user.id).await.expect("查询项目失败")[0];
        let doomed = create(&db, user.id, "doomed", Some("将被删除".to_string()))
            .await
            .expect("创建项目失败");

        log::append(&db, doomed.id, "prompt", "{}".to_string(), 1.0)
            .await
            .expect("写入日志失败");
        saved_schema::save_version(&db, doomed.id, "CREATE TABLE x (id INT);", None)
            .await
            .expect("保存脚本失败");

        delete(&db, user.id, doomed.id).await.expect("删除项目失败");

        // 归属用户与兄弟项目保持原样
        assert!(User::find_by_id(user.id).one(&db).await.expect("查询用户失败").is_some());
        let remaining = list_for_user(&db, user.id).await.expect("查询项目失败");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, default_project.id);

        // 该项目的日志与脚本已级联删除
        let logs = Log::find()
            .filter(autoergen_entity::log::Column::ProjectId.eq(doomed.id))
            .count(&db)
            .await
            .expect("统计日志失败");
        assert_eq!(logs, 0);
        let schemas = SavedSchema::find()
            .filter(autoergen_entity::saved_schema::Column::ProjectId.eq(doomed.id))
            .count(&db)
            .await
            .expect("统计脚本失败");
        assert_eq!(schemas, 0);
    }

    #[tokio::test]
    async fn test_get_owned_hides_foreign_projects() {
        let (_tmp_dir, db) = test_db().await;

        let owner = user_store::create_user(&db, "frank@example.com", "pw").await.expect("注册失败");
        let stranger = user_store::create_user(&db, "grace@example.com", "pw").await.expect("注册失败");
        let owned = &list_for_user(&db, owner.id).await.expect("查询项目失败")[0];

        let err = get_owned(&db, stranger.id, owned.id)
            .await
            .expect_err("他人项目应当不可见");
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_update_changes_fields() {
        let (_tmp_dir, db) = test_db().await;

        let user = user_store::create_user(&db, "heidi@example.com", "pw").await.expect("注册失败");
        let target = &list_for_user(&db, user.id).await.expect("查询项目失败")[0];

        let updated = update(&db, user.id, target.id, Some("renamed".to_string()), None)
            .await
            .expect("更新项目失败");
        assert_eq!(updated.name, "renamed");
        // 未提供的字段保持不变
        assert_eq!(updated.description.as_deref(), Some("Default workspace"));
    }
}
