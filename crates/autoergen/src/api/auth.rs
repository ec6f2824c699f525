use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::api::error::InnerApiError;
use crate::api::wrapper::ApiError;

/// 已通过令牌认证的用户
///
/// 从 Authorization: Bearer <token> 头解析，令牌由登录接口签发。
pub struct AuthUser {
    pub user_id: i32,
    pub token: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(InnerApiError::Unauthorized)?
            .to_string();

        let user_id = crate::auth::resolve_token(&token).ok_or(InnerApiError::Unauthorized)?;
        Ok(Self { user_id, token })
    }
}
