//! 共通型定義

/// 認証関連のデータモデル
pub mod auth;

/// エラー型定義
pub mod error;
