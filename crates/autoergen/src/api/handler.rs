use axum::extract::{Extension, Json, Path};
use axum::routing::{delete, get, post};
use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::auth::AuthUser;
use crate::api::error::InnerApiError;
use crate::api::request::{
    AppendLogRequest, CreateProjectRequest, LoginRequest, RegisterRequest, SaveSchemaRequest, UpdateProjectRequest,
};
use crate::api::response::{
    DeleteResponse, HealthResponse, LogInfo, LoginResponse, LogsResponse, ProjectInfo, ProjectsResponse, SchemaInfo,
    SchemasResponse, UserResponse,
};
use crate::api::wrapper::{ApiError, ApiResponse};
use crate::{auth, store};

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        register,
        login,
        logout,
        delete_account,
        list_projects,
        create_project,
        get_project,
        update_project,
        delete_project,
        list_logs,
        append_log,
        list_schemas,
        save_schema,
        get_schema,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        CreateProjectRequest,
        UpdateProjectRequest,
        AppendLogRequest,
        SaveSchemaRequest,
        HealthResponse,
        UserResponse,
        LoginResponse,
        ProjectInfo,
        ProjectsResponse,
        LogInfo,
        LogsResponse,
        SchemaInfo,
        SchemasResponse,
        DeleteResponse,
    ))
)]
struct ApiDoc;

/// 构建 API 路由
pub fn router(connection: DatabaseConnection) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/account", delete(delete_account))
        .route("/api/projects", get(list_projects).post(create_project))
        .route(
            "/api/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/api/projects/{id}/logs", get(list_logs).post(append_log))
        .route("/api/projects/{id}/schemas", get(list_schemas).post(save_schema))
        .route("/api/projects/{id}/schemas/{version}", get(get_schema))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(Extension(connection))
        .layer(CorsLayer::permissive())
}

/// 健康检查
#[utoipa::path(get, path = "/api/health", responses((status = 200, body = HealthResponse)))]
async fn health() -> ApiResponse<HealthResponse> {
    ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
    })
}

/// 注册新账号，同时创建默认项目
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, body = UserResponse),
        (status = 409, description = "邮箱已被注册"),
    )
)]
async fn register(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<RegisterRequest>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return Err(InnerApiError::BadRequest("邮箱与密码不能为空".to_string()).into());
    }

    let user = store::user::create_user(&db, email, &payload.password).await?;
    Ok(ApiResponse::created(UserResponse::from(user)))
}

/// 登录并签发令牌
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, body = LoginResponse),
        (status = 401, description = "邮箱或密码错误"),
    )
)]
async fn login(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, ApiError> {
    let user_id = store::user::authenticate(&db, payload.email.trim(), &payload.password)
        .await?
        .ok_or(InnerApiError::InvalidCredentials)?;

    let token = auth::issue_token(user_id);
    info!("用户 {} 登录成功", user_id);
    Ok(ApiResponse::ok(LoginResponse { token, user_id }))
}

/// 登出，吊销当前令牌
#[utoipa::path(post, path = "/api/auth/logout", responses((status = 200, body = DeleteResponse)))]
async fn logout(auth_user: AuthUser) -> ApiResponse<DeleteResponse> {
    auth::revoke_token(&auth_user.token);
    ApiResponse::ok(DeleteResponse { deleted: true })
}

/// 注销账号，级联删除名下全部项目、日志与脚本存档
#[utoipa::path(delete, path = "/api/auth/account", responses((status = 200, body = DeleteResponse)))]
async fn delete_account(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
) -> Result<ApiResponse<DeleteResponse>, ApiError> {
    store::user::delete_user(&db, auth_user.user_id).await?;
    auth::revoke_user_tokens(auth_user.user_id);
    warn!("用户 {} 已注销账号", auth_user.user_id);
    Ok(ApiResponse::ok(DeleteResponse { deleted: true }))
}

/// 列出当前用户的全部项目
#[utoipa::path(get, path = "/api/projects", responses((status = 200, body = ProjectsResponse)))]
async fn list_projects(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
) -> Result<ApiResponse<ProjectsResponse>, ApiError> {
    let projects = store::project::list_for_user(&db, auth_user.user_id).await?;
    Ok(ApiResponse::ok(ProjectsResponse {
        projects: projects.into_iter().map(ProjectInfo::from).collect(),
    }))
}

/// 创建项目
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses((status = 201, body = ProjectInfo))
)]
async fn create_project(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<ApiResponse<ProjectInfo>, ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(InnerApiError::BadRequest("项目名称不能为空".to_string()).into());
    }

    let project = store::project::create(&db, auth_user.user_id, name, payload.description).await?;
    Ok(ApiResponse::created(ProjectInfo::from(project)))
}

/// 查询单个项目
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = i32, Path, description = "项目 id")),
    responses((status = 200, body = ProjectInfo), (status = 404))
)]
async fn get_project(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<ApiResponse<ProjectInfo>, ApiError> {
    let project = store::project::get_owned(&db, auth_user.user_id, id).await?;
    Ok(ApiResponse::ok(ProjectInfo::from(project)))
}

/// 更新项目名称或描述，updated_at 由应用写入
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(("id" = i32, Path, description = "项目 id")),
    request_body = UpdateProjectRequest,
    responses((status = 200, body = ProjectInfo), (status = 404))
)]
async fn update_project(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<ApiResponse<ProjectInfo>, ApiError> {
    let project = store::project::update(&db, auth_user.user_id, id, payload.name, payload.description).await?;
    Ok(ApiResponse::ok(ProjectInfo::from(project)))
}

/// 删除项目，日志与脚本存档级联删除
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = i32, Path, description = "项目 id")),
    responses((status = 200, body = DeleteResponse), (status = 404))
)]
async fn delete_project(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<ApiResponse<DeleteResponse>, ApiError> {
    store::project::delete(&db, auth_user.user_id, id).await?;
    Ok(ApiResponse::ok(DeleteResponse { deleted: true }))
}

/// 列出项目的生成日志，新的在前
#[utoipa::path(
    get,
    path = "/api/projects/{id}/logs",
    params(("id" = i32, Path, description = "项目 id")),
    responses((status = 200, body = LogsResponse), (status = 404))
)]
async fn list_logs(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<ApiResponse<LogsResponse>, ApiError> {
    store::project::get_owned(&db, auth_user.user_id, id).await?;
    let logs = store::log::list_for_project(&db, id).await?;
    Ok(ApiResponse::ok(LogsResponse {
        logs: logs.into_iter().map(LogInfo::from).collect(),
    }))
}

/// 记录一次提示词/响应交互
#[utoipa::path(
    post,
    path = "/api/projects/{id}/logs",
    params(("id" = i32, Path, description = "项目 id")),
    request_body = AppendLogRequest,
    responses((status = 201, body = LogInfo), (status = 404))
)]
async fn append_log(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<AppendLogRequest>,
) -> Result<ApiResponse<LogInfo>, ApiError> {
    store::project::get_owned(&db, auth_user.user_id, id).await?;

    let response_json = serde_json::to_string(&payload.llm_response)?;
    let model = store::log::append(&db, id, &payload.user_prompt, response_json, payload.execution_time).await?;
    Ok(ApiResponse::created(LogInfo::from(model)))
}

/// 列出项目的脚本存档，新版本在前
#[utoipa::path(
    get,
    path = "/api/projects/{id}/schemas",
    params(("id" = i32, Path, description = "项目 id")),
    responses((status = 200, body = SchemasResponse), (status = 404))
)]
async fn list_schemas(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<ApiResponse<SchemasResponse>, ApiError> {
    store::project::get_owned(&db, auth_user.user_id, id).await?;
    let schemas = store::saved_schema::list_for_project(&db, id).await?;
    Ok(ApiResponse::ok(SchemasResponse {
        schemas: schemas.into_iter().map(SchemaInfo::from).collect(),
    }))
}

/// 保存一份新的建表脚本版本（项目内单调递增）
#[utoipa::path(
    post,
    path = "/api/projects/{id}/schemas",
    params(("id" = i32, Path, description = "项目 id")),
    request_body = SaveSchemaRequest,
    responses((status = 201, body = SchemaInfo), (status = 404))
)]
async fn save_schema(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<SaveSchemaRequest>,
) -> Result<ApiResponse<SchemaInfo>, ApiError> {
    if payload.sql_script.trim().is_empty() {
        return Err(InnerApiError::BadRequest("建表脚本不能为空".to_string()).into());
    }

    store::project::get_owned(&db, auth_user.user_id, id).await?;
    let model = store::saved_schema::save_version(&db, id, &payload.sql_script, payload.diagram_description).await?;
    Ok(ApiResponse::created(SchemaInfo::from(model)))
}

/// 按版本号取某一份脚本存档
#[utoipa::path(
    get,
    path = "/api/projects/{id}/schemas/{version}",
    params(
        ("id" = i32, Path, description = "项目 id"),
        ("version" = i32, Path, description = "版本号"),
    ),
    responses((status = 200, body = SchemaInfo), (status = 404))
)]
async fn get_schema(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path((id, version)): Path<(i32, i32)>,
) -> Result<ApiResponse<SchemaInfo>, ApiError> {
    store::project::get_owned(&db, auth_user.user_id, id).await?;
    let model = store::saved_schema::get_version(&db, id, version).await?;
    Ok(ApiResponse::ok(SchemaInfo::from(model)))
}
