//! アイデンティティ解決
//!
//! リクエストヘッダーの資格情報（Bearer JWT）から呼び出し元のアイデンティティIDを取り出す。
//! 検証手段はtraitの裏に隠し、コントローラーは結果（IDまたはUnauthorized）だけを扱う。

use crate::auth::jwt::verify_jwt;
use crate::common::error::ConsoleError;
use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use uuid::Uuid;

/// アイデンティティ解決のtrait
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// 資格情報からアイデンティティIDを解決する
    ///
    /// 資格情報が欠落・不正、またはsub claimがUUIDでない場合は
    /// `ConsoleError::Unauthorized` を返す。副作用はない。
    async fn resolve_identity(&self, headers: &HeaderMap) -> Result<Uuid, ConsoleError>;
}

/// JWT（HS256共有シークレット）でアイデンティティを解決する実装
#[derive(Clone)]
pub struct JwtIdentityResolver {
    secret: String,
}

impl JwtIdentityResolver {
    /// 新しいリゾルバーを作成
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

#[async_trait]
impl IdentityResolver for JwtIdentityResolver {
    async fn resolve_identity(&self, headers: &HeaderMap) -> Result<Uuid, ConsoleError> {
        let token = extract_bearer_token(headers)?;
        let claims = verify_jwt(token, &self.secret)?;
        Uuid::parse_str(&claims.sub).map_err(|e| {
            ConsoleError::Unauthorized(format!("Invalid 'sub' claim '{}': {}", claims.sub, e))
        })
    }
}

/// Authorizationヘッダーから Bearer トークンを取り出す
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ConsoleError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ConsoleError::Unauthorized("Missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| ConsoleError::Unauthorized("Malformed authorization header".to_string()))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| ConsoleError::Unauthorized("Malformed authorization header".to_string()))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(ConsoleError::Unauthorized(format!(
            "Unsupported authorization scheme: {}",
            scheme
        )));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(ConsoleError::Unauthorized("Empty bearer token".to_string()));
    }
    Ok(token)
}
