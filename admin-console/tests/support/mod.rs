//! テスト共通ユーティリティ

pub mod console;
pub mod http;
