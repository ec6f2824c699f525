use autoergen_entity::{log, project, saved_schema, user};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        // password_hash 不对外暴露
        Self {
            id: model.id,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i32,
}

#[derive(Serialize, ToSchema)]
pub struct ProjectInfo {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<project::Model> for ProjectInfo {
    fn from(model: project::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ProjectsResponse {
    pub projects: Vec<ProjectInfo>,
}

#[derive(Serialize, ToSchema)]
pub struct LogInfo {
    pub id: i32,
    pub project_id: i32,
    pub user_prompt: String,
    /// 入库时的 JSON 文本，解析失败时原样以字符串返回
    #[schema(value_type = Object)]
    pub llm_response: serde_json::Value,
    pub execution_time: f64,
    pub created_at: String,
}

impl From<log::Model> for LogInfo {
    fn from(model: log::Model) -> Self {
        let llm_response = serde_json::from_str(&model.llm_response)
            .unwrap_or(serde_json::Value::String(model.llm_response));
        Self {
            id: model.id,
            project_id: model.project_id,
            user_prompt: model.user_prompt,
            llm_response,
            execution_time: model.execution_time,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LogsResponse {
    pub logs: Vec<LogInfo>,
}

#[derive(Serialize, ToSchema)]
pub struct SchemaInfo {
    pub id: i32,
    pub project_id: i32,
    pub version: i32,
    pub sql_script: String,
    pub diagram_description: Option<String>,
    pub created_at: String,
}

impl From<saved_schema::Model> for SchemaInfo {
    fn from(model: saved_schema::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            version: model.version,
            sql_script: model.sql_script,
            diagram_description: model.diagram_description,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SchemasResponse {
    pub schemas: Vec<SchemaInfo>,
}

#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    pub deleted: bool,
}
