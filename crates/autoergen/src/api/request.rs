use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
}

/// 未提供的字段保持原值
#[derive(Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AppendLogRequest {
    pub user_prompt: String,
    /// 结构化的响应负载，原样以 JSON 文本入库
    #[schema(value_type = Object)]
    pub llm_response: serde_json::Value,
    /// 执行耗时（秒）
    pub execution_time: f64,
}

#[derive(Deserialize, ToSchema)]
pub struct SaveSchemaRequest {
    pub sql_script: String,
    pub diagram_description: Option<String>,
}
