//! 監査ログシステム
//!
//! テナント更新操作ごとに「誰が・何を・どのパラメータで」行ったかを記録する。
//! 記録は転送前に永続化され、以後変更・削除されない。

/// 監査ログの型定義
pub mod types;
