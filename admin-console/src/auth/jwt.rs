// JWT生成と検証（jsonwebtoken実装）

use crate::common::auth::Claims;
use crate::common::error::ConsoleError;
use jsonwebtoken::{decode, DecodingKey, Validation};

/// テスト用JWTの有効期限（24時間）
#[cfg(test)]
const JWT_EXPIRATION_HOURS: i64 = 24;

/// テスト用のJWTトークンを生成
///
/// 本番のトークンは認証サービスが発行するため、テストビルドでのみ提供する。
///
/// # Arguments
/// * `identity_id` - アイデンティティID（sub claim）
/// * `secret` - JWTシークレットキー
#[cfg(test)]
pub(crate) fn create_jwt(identity_id: &str, secret: &str) -> Result<String, ConsoleError> {
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = Utc::now();
    let expiration = now
        .checked_add_signed(chrono::Duration::hours(JWT_EXPIRATION_HOURS))
        .ok_or_else(|| ConsoleError::Internal("Failed to calculate expiration time".to_string()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: identity_id.to_string(),
        exp: expiration,
        iat: Some(now.timestamp() as usize),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ConsoleError::Internal(format!("Failed to create JWT: {}", e)))
}

/// JWTトークンを検証
///
/// # Returns
/// * `Ok(Claims)` - 検証済みクレーム
/// * `Err(ConsoleError::Unauthorized)` - 検証失敗（無効な署名、期限切れ、sub欠落など）
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, ConsoleError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| ConsoleError::Unauthorized(format!("Failed to verify JWT: {}", e)))
}
