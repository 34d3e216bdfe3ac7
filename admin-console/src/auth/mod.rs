// 認証モジュール

/// JWT生成・検証（jsonwebtoken）
pub mod jwt;

/// リクエスト資格情報からのアイデンティティ解決
pub mod identity;

/// 識別失敗時に呼び出し元へ返す固定メッセージ
pub const INVALID_SUB_CLAIM_MESSAGE: &str = "invalid authorization token (invalid 'sub' claim)";
