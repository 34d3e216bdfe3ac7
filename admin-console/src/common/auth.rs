//! 認証関連のデータモデル

use serde::{Deserialize, Serialize};

/// JWTクレーム
///
/// 呼び出し元の識別には`sub`のみを使用する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// アイデンティティID（JWT sub claim、UUID文字列）
    pub sub: String,
    /// 有効期限（Unix timestamp、JWT exp claim）
    pub exp: usize,
    /// 発行日時（Unix timestamp、JWT iat claim）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
}
