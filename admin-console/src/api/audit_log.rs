//! 監査ログ参照API
//!
//! `GET /api/auditlogs` で記録済みのテナント更新操作を新しい順に返す。
//! 認証は必要だが、この参照自体は監査ログに記録しない。

use crate::audit::types::{AuditLogEntry, AuditLogFilter, EventType};
use crate::auth::INVALID_SUB_CLAIM_MESSAGE;
use crate::common::error::{ConsoleError, ConsoleResult};
use crate::db::audit_log::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use crate::AppState;
use axum::{
    extract::{RawQuery, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

/// 監査ログ一覧取得のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct AuditLogQueryParams {
    /// アイデンティティIDでフィルタ
    pub identity_id: Option<String>,
    /// イベント種別でフィルタ（例: `start_tenant_update`）
    pub event_type: Option<String>,
    /// 開始日時（RFC3339）
    pub time_from: Option<DateTime<Utc>>,
    /// 終了日時（RFC3339）
    pub time_to: Option<DateTime<Utc>>,
    /// ページ番号（1始まり、デフォルト: 1）
    pub page: Option<i64>,
    /// ページあたり件数（デフォルト: 50、最大: 500）
    pub per_page: Option<i64>,
}

impl TryFrom<AuditLogQueryParams> for AuditLogFilter {
    type Error = ConsoleError;

    fn try_from(params: AuditLogQueryParams) -> Result<Self, Self::Error> {
        let identity_id = params
            .identity_id
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| ConsoleError::Validation(format!("Invalid identity_id: {}", e)))?;

        let event_type = match params.event_type.as_deref() {
            Some(raw) => Some(EventType::parse(raw).ok_or_else(|| {
                ConsoleError::Validation(format!("Unknown event_type: '{}'", raw))
            })?),
            None => None,
        };

        Ok(Self {
            identity_id,
            event_type,
            time_from: params.time_from,
            time_to: params.time_to,
            page: Some(params.page.unwrap_or(1).max(1)),
            per_page: Some(
                params
                    .per_page
                    .unwrap_or(DEFAULT_PER_PAGE)
                    .clamp(1, MAX_PER_PAGE),
            ),
        })
    }
}

/// 監査ログ一覧レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditLogListResponse {
    /// 監査ログエントリ一覧
    pub items: Vec<AuditLogEntry>,
    /// 総件数
    pub total: i64,
    /// 現在のページ番号
    pub page: i64,
    /// ページあたり件数
    pub per_page: i64,
}

async fn list(
    state: &AppState,
    headers: &HeaderMap,
    query: Option<&str>,
) -> ConsoleResult<AuditLogListResponse> {
    if let Err(err) = state.identity_resolver.resolve_identity(headers).await {
        error!(error = %err, "unable to resolve identity");
        return Err(ConsoleError::Unauthorized(
            INVALID_SUB_CLAIM_MESSAGE.to_string(),
        ));
    }

    let params: AuditLogQueryParams = serde_urlencoded::from_str(query.unwrap_or(""))
        .map_err(|e| ConsoleError::Validation(format!("Invalid query string: {}", e)))?;
    let filter = AuditLogFilter::try_from(params)?;

    let storage = &state.audit_log_storage;
    let items = storage.query(&filter).await?;
    let total = storage.count(&filter).await?;

    Ok(AuditLogListResponse {
        items,
        total,
        page: filter.page.unwrap_or(1),
        per_page: filter.per_page.unwrap_or(DEFAULT_PER_PAGE),
    })
}

/// GET /api/auditlogs - 監査ログ一覧取得
pub async fn list_audit_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    match list(&state, &headers, query.as_deref()).await {
        Ok(body) => Json(body).into_response(),
        Err(err) => {
            if !matches!(err, ConsoleError::Unauthorized(_)) {
                warn!(error = %err, "failed to list audit logs");
            }
            state.error_responder.respond(&err)
        }
    }
}
