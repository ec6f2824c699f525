use autoergen_entity::prelude::SavedSchema;
use autoergen_entity::saved_schema;
use sea_orm::error::SqlErr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::store::{StoreError, StoreResult};

/// 保存一份新的建表脚本存档，版本号在项目内单调递增
///
/// 取当前最大版本加一，与插入放在同一事务中，避免并发写入产生重复版本。
pub async fn save_version(
    conn: &DatabaseConnection,
    project_id: i32,
    sql_script: &str,
    diagram_description: Option<String>,
) -> StoreResult<saved_schema::Model> {
    let txn = conn.begin().await?;

    let latest = SavedSchema::find()
        .filter(saved_schema::Column::ProjectId.eq(project_id))
        .order_by_desc(saved_schema::Column::Version)
        .one(&txn)
        .await?;
    let next_version = latest.map(|model| model.version).unwrap_or(0) + 1;

    let result = saved_schema::ActiveModel {
        id: NotSet,
        project_id: Set(project_id),
        sql_script: Set(sql_script.to_string()),
        diagram_description: Set(diagram_description),
        version: Set(next_version),
        created_at: NotSet,
    }
    .insert(&txn)
    .await;

    let model = match result {
        Ok(model) => model,
        Err(e) => {
            return Err(match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => StoreError::NotFound,
                _ => StoreError::Db(e),
            });
        }
    };

    txn.commit().await?;
    Ok(model)
}

/// 列出项目的全部脚本存档，新版本在前
pub async fn list_for_project(conn: &DatabaseConnection, project_id: i32) -> StoreResult<Vec<saved_schema::Model>> {
    Ok(SavedSchema::find()
        .filter(saved_schema::Column::ProjectId.eq(project_id))
        .order_by_desc(saved_schema::Column::Version)
        .all(conn)
        .await?)
}

/// 按版本号取某一份存档
pub async fn get_version(
    conn: &DatabaseConnection,
    project_id: i32,
    version: i32,
) -> StoreResult<saved_schema::Model> {
    SavedSchema::find()
        .filter(saved_schema::Column::ProjectId.eq(project_id))
        .filter(saved_schema::Column::Version.eq(version))
        .one(conn)
        .await?
        .ok_or(StoreError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::test_db;
    use crate::store::{project as project_store, user as user_store};

    #[tokio::test]
    async fn test_version_defaults_to_one_on_raw_insert() {
        let (_tmp_dir, db) = test_db().await;

        let user = user_store::create_user(&db, "judy@example.com", "pw").await.expect("注册失败");
        let project = &project_store::list_for_user(&db, user.id).await.expect("查询项目失败")[0];

        // 不显式给出版本号，应当落到数据库默认值 1
        let inserted = saved_schema::ActiveModel {
            id: NotSet,
            project_id: Set(project.id),
            sql_script: Set("CREATE TABLE t (id INT);".to_string()),
            diagram_description: Set(None),
            version: NotSet,
            created_at: NotSet,
        }
        .insert(&db)
        .await
        .expect("插入脚本失败");
        assert_eq!(inserted.version, 1);
    }

    #[tokio::test]
    async fn test_save_version_is_monotonic_per_project() {
        let (_tmp_dir, db) = test_db().await;

        let user = user_store::create_user(&db, "ken@example.com", "pw").await.expect("注册失败");
        let first_project = &project_store::list_for_user(&db, user.id).await.expect("查询项目失败")[0];
        let second_project = project_store::create(&db, user.id, "second", None)
            .await
            .expect("创建项目失败");

        let v1 = save_version(&db, first_project.id, "v1", None).await.expect("保存失败");
        let v2 = save_version(&db, first_project.id, "v2", Some("digraph {}".to_string()))
            .await
            .expect("保存失败");
        let v3 = save_version(&db, first_project.id, "v3", None).await.expect("保存失败");
        assert_eq!((v1.version, v2.version, v3.version), (1, 2, 3));

        // 版本号按项目独立计数
        let other = save_version(&db, second_project.id, "other", None).await.expect("保存失败");
        assert_eq!(other.version, 1);

        let listed = list_for_project(&db, first_project.id).await.expect("查询失败");
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].version, 3);
    }

    #[tokio::test]
    async fn test_get_version_not_found() {
        let (_tmp_dir, db) = test_db().await;

        let user = user_store::create_user(&db, "leo@example.com", "pw").await.expect("注册失败");
        let project = &project_store::list_for_user(&db, user.id).await.expect("查询项目失败")[0];

        let err = get_version(&db, project.id, 42).await.expect_err("缺失版本应当报错");
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_save_version_requires_existing_project() {
        let (_tmp_dir, db) = test_db().await;

        let err = save_version(&db, 9999, "orphan", None)
            .await
            .expect_err("引用不存在的项目应当失败");
        assert!(matches!(err, StoreError::NotFound));
    }
}
