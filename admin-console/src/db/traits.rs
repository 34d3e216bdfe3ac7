//! Repository traitパターン定義
//!
//! DB操作を抽象化し、テスタビリティを向上させるためのtrait群。

use async_trait::async_trait;

use crate::audit::types::AuditLogEntry;
use crate::common::error::ConsoleError;

// ---------------------------------------------------------------------------
// AuditLogStore
// ---------------------------------------------------------------------------

/// 監査ログ書き込みのRepository trait
///
/// 書き込みはアトミック: 永続化されるか、部分的なレコードも残らないかのどちらか。
/// 失敗は再試行せずそのまま返す。
#[async_trait]
pub trait AuditLogStore: Send + Sync {
    /// 監査ログを1件作成
    async fn create(&self, entry: &AuditLogEntry) -> Result<(), ConsoleError>;
}
