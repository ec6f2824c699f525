use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::api::error::InnerApiError;
use crate::store::StoreError;

/// 统一的成功响应包装
pub struct ApiResponse<T: Serialize>(StatusCode, ApiBody<T>);

#[derive(Serialize)]
struct ApiBody<T> {
    status_code: u16,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, data)
    }

    pub fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, data)
    }

    fn with_status(status: StatusCode, data: T) -> Self {
        Self(
            status,
            ApiBody {
                status_code: status.as_u16(),
                data,
            },
        )
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

/// 统一的错误响应，保留原始错误上下文并映射状态码
pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(value: E) -> Self {
        Self(value.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if let Some(inner) = self.0.downcast_ref::<InnerApiError>() {
            inner.status_code()
        } else if let Some(store) = self.0.downcast_ref::<StoreError>() {
            match store {
                StoreError::EmailTaken => StatusCode::CONFLICT,
                StoreError::NotFound => StatusCode::NOT_FOUND,
                StoreError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("请求处理失败: {:#}", self.0);
        }

        let body = serde_json::json!({
            "status_code": status.as_u16(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_maps_to_status() {
        let conflict = ApiError::from(StoreError::EmailTaken).into_response();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let not_found = ApiError::from(StoreError::NotFound).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_inner_error_maps_to_status() {
        let unauthorized = ApiError::from(InnerApiError::Unauthorized).into_response();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let bad_request = ApiError::from(InnerApiError::BadRequest("x".to_string())).into_response();
        assert_eq!(bad_request.status(), StatusCode::BAD_REQUEST);
    }
}
