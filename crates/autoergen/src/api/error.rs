use axum::http::StatusCode;
use thiserror::Error;

/// API 层自身的错误（存储层错误之外）
#[derive(Error, Debug)]
pub enum InnerApiError {
    #[error("未授权访问")]
    Unauthorized,
    #[error("邮箱或密码错误")]
    InvalidCredentials,
    #[error("请求参数错误: {0}")]
    BadRequest(String),
}

impl InnerApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            InnerApiError::Unauthorized | InnerApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            InnerApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}
