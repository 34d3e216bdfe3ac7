//! 監査ログストレージ

use crate::audit::types::{AuditLogEntry, AuditLogFilter, EventParams, EventType};
use crate::common::error::{ConsoleError, ConsoleResult};
use crate::db::traits::AuditLogStore;
use crate::db::transactional;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

/// ページあたり件数のデフォルト値
pub const DEFAULT_PER_PAGE: i64 = 50;
/// ページあたり件数の上限
pub const MAX_PER_PAGE: i64 = 500;

/// 監査ログストレージ（SQLite）
#[derive(Clone)]
pub struct AuditLogStorage {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct AuditLogRow {
    id: String,
    event_type: String,
    identity_id: String,
    event_params: String,
    created_at: String,
}

impl TryFrom<AuditLogRow> for AuditLogEntry {
    type Error = ConsoleError;

    fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| ConsoleError::Database(format!("Invalid audit log id: {}", e)))?;
        let event_type = EventType::parse(&row.event_type).ok_or_else(|| {
            ConsoleError::Database(format!("Unknown event type: {}", row.event_type))
        })?;
        let identity_id = Uuid::parse_str(&row.identity_id)
            .map_err(|e| ConsoleError::Database(format!("Invalid identity id: {}", e)))?;
        let event_params: EventParams = serde_json::from_str(&row.event_params)
            .map_err(|e| ConsoleError::Database(format!("Invalid event params: {}", e)))?;
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| ConsoleError::Database(format!("Invalid created_at: {}", e)))?
            .with_timezone(&Utc);

        Ok(AuditLogEntry {
            id,
            event_type,
            identity_id,
            event_params,
            created_at,
        })
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// 監査ログを1件挿入する
///
/// 呼び出し元のトランザクション内で使用する。コミットは行わない。
pub async fn insert(conn: &mut SqliteConnection, entry: &AuditLogEntry) -> ConsoleResult<()> {
    let event_params = serde_json::to_string(&entry.event_params)
        .map_err(|e| ConsoleError::Internal(format!("Failed to encode event params: {}", e)))?;

    sqlx::query(
        r#"INSERT INTO audit_logs (
            id, event_type, identity_id, event_params, created_at
        ) VALUES (?, ?, ?, ?, ?)"#,
    )
    .bind(entry.id.to_string())
    .bind(entry.event_type.as_str())
    .bind(entry.identity_id.to_string())
    .bind(event_params)
    .bind(format_timestamp(&entry.created_at))
    .execute(&mut *conn)
    .await
    .map_err(|e| ConsoleError::Database(format!("Failed to insert audit log: {}", e)))?;

    Ok(())
}

impl AuditLogStorage {
    /// 新しいストレージを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// フィルタ条件に基づいて監査ログを検索（新しい順）
    pub async fn query(&self, filter: &AuditLogFilter) -> ConsoleResult<Vec<AuditLogEntry>> {
        let (where_clause, bind_values) = build_where_clause(filter);
        let (limit, offset) = pagination(filter)?;

        let sql = format!(
            "SELECT id, event_type, identity_id, event_params, created_at \
             FROM audit_logs {} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            where_clause
        );

        let mut query = sqlx::query_as::<_, AuditLogRow>(&sql);
        for value in &bind_values {
            query = query.bind(value.as_str());
        }
        let rows = query
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ConsoleError::Database(format!("Failed to query audit logs: {}", e)))?;

        rows.into_iter().map(AuditLogEntry::try_from).collect()
    }

    /// フィルタ条件に一致する件数を取得（ページングは無視）
    pub async fn count(&self, filter: &AuditLogFilter) -> ConsoleResult<i64> {
        let (where_clause, bind_values) = build_where_clause(filter);
        let sql = format!("SELECT COUNT(*) FROM audit_logs {}", where_clause);

        let mut query = sqlx::query_as::<_, (i64,)>(&sql);
        for value in &bind_values {
            query = query.bind(value.as_str());
        }
        let row = query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ConsoleError::Database(format!("Failed to count audit logs: {}", e)))?;

        Ok(row.0)
    }
}

#[async_trait]
impl AuditLogStore for AuditLogStorage {
    async fn create(&self, entry: &AuditLogEntry) -> ConsoleResult<()> {
        let entry = entry.clone();
        transactional(&self.pool, move |conn| {
            Box::pin(async move { insert(conn, &entry).await })
        })
        .await
    }
}

/// ページ番号・件数からLIMIT/OFFSETを計算
///
/// OFFSETが`i64`に収まらないページ番号は`ConsoleError::Validation`。
fn pagination(filter: &AuditLogFilter) -> ConsoleResult<(i64, i64)> {
    let page = filter.page.unwrap_or(1).max(1);
    let per_page = filter
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let offset = (page - 1)
        .checked_mul(per_page)
        .ok_or_else(|| ConsoleError::Validation(format!("page out of range: {}", page)))?;
    Ok((per_page, offset))
}

fn build_where_clause(filter: &AuditLogFilter) -> (String, Vec<String>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_values: Vec<String> = Vec::new();

    if let Some(identity_id) = filter.identity_id {
        conditions.push("identity_id = ?".to_string());
        bind_values.push(identity_id.to_string());
    }

    if let Some(event_type) = filter.event_type {
        conditions.push("event_type = ?".to_string());
        bind_values.push(event_type.as_str().to_string());
    }

    if let Some(ref time_from) = filter.time_from {
        conditions.push("created_at >= ?".to_string());
        bind_values.push(format_timestamp(time_from));
    }

    if let Some(ref time_to) = filter.time_to {
        conditions.push("created_at <= ?".to_string());
        bind_values.push(format_timestamp(time_to));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}
