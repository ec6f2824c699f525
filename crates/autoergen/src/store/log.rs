use autoergen_entity::log;
use autoergen_entity::prelude::Log;
use sea_orm::error::SqlErr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use crate::store::{StoreError, StoreResult};

/// 追加一条生成日志
///
/// llm_response 需为已序列化的 JSON 文本，execution_time 单位为秒。
pub async fn append(
    conn: &DatabaseConnection,
    project_id: i32,
    user_prompt: &str,
    llm_response: String,
    execution_time: f64,
) -> StoreResult<log::Model> {
    let result = log::ActiveModel {
        id: NotSet,
        project_id: Set(project_id),
        user_prompt: Set(user_prompt.to_string()),
        llm_response: Set(llm_response),
        execution_time: Set(execution_time),
        created_at: NotSet,
    }
    .insert(conn)
    .await;

    match result {
        Ok(model) => Ok(model),
        Err(e) => Err(match e.sql_err() {
            // 项目不存在时按 NotFound 处理
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => StoreError::NotFound,
            _ => StoreError::Db(e),
        }),
    }
}

/// 列出项目的全部日志，新的在前
pub async fn list_for_project(conn: &DatabaseConnection, project_id: i32) -> StoreResult<Vec<log::Model>> {
    Ok(Log::find()
        .filter(log::Column::ProjectId.eq(project_id))
        .order_by_desc(log::Column::Id)
        .all(conn)
        .await?)
}
