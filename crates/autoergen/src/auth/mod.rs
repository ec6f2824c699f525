use dashmap::DashMap;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

/// 登录令牌表：token -> user_id，只保留在进程内存中，重启即失效
static TOKEN_STORE: Lazy<DashMap<String, i32>> = Lazy::new(DashMap::new);

/// 密码哈希（SHA-256 十六进制，与历史数据保持一致）
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// 为用户签发一个新的不透明令牌
pub fn issue_token(user_id: i32) -> String {
    let token = uuid::Uuid::new_v4().simple().to_string();
    TOKEN_STORE.insert(token.clone(), user_id);
    token
}

/// 解析令牌对应的用户
pub fn resolve_token(token: &str) -> Option<i32> {
    TOKEN_STORE.get(token).map(|entry| *entry.value())
}

/// 吊销单个令牌（登出）
pub fn revoke_token(token: &str) {
    TOKEN_STORE.remove(token);
}

/// 吊销某个用户的全部令牌（注销账号时使用）
pub fn revoke_user_tokens(user_id: i32) {
    TOKEN_STORE.retain(|_, uid| *uid != user_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_matches_known_vector() {
        // echo -n "admin123" | sha256sum
        assert_eq!(
            hash_password("admin123"),
            "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9"
        );
    }

    #[test]
    fn test_token_roundtrip() {
        let token = issue_token(42);
        assert_eq!(resolve_token(&token), Some(42));
        revoke_token(&token);
        assert_eq!(resolve_token(&token), None);
    }

    #[test]
    fn test_revoke_user_tokens() {
        let first = issue_token(7);
        let second = issue_token(7);
        let other = issue_token(8);
        revoke_user_tokens(7);
        assert_eq!(resolve_token(&first), None);
        assert_eq!(resolve_token(&second), None);
        assert_eq!(resolve_token(&other), Some(8));
    }
}
