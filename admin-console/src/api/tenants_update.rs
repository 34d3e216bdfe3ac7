//! テナント更新API（監査ログ付きプロキシ）
//!
//! 各操作は同じ手順で処理する:
//! 1. 認証情報から呼び出し元を特定
//! 2. 監査ログエントリを組み立て
//! 3. トランザクション内で永続化
//! 4. 永続化に成功した場合のみテナントサービスへ転送し、レスポンスをそのまま返す

use crate::audit::types::{AuditLogEntry, EventParams, EventType};
use crate::auth::INVALID_SUB_CLAIM_MESSAGE;
use crate::common::error::{ConsoleError, ConsoleResult};
use crate::AppState;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
};
use tracing::{error, info, warn};

/// Startで記録するクエリパラメータ
const START_PARAM_KEYS: &[&str] = &["clusterURL", "envType"];

/// パラメータを持たない操作用（Show/Stop）
pub(crate) fn no_params(_request: &Request<Body>) -> ConsoleResult<EventParams> {
    Ok(EventParams::new())
}

/// Startのクエリから`clusterURL`/`envType`を取り出す
///
/// 指定されたキーのみ含める。空値（`clusterURL=`）も指定ありとして`""`を記録する。
/// 同じキーが複数回現れた場合は最初の値を使う。
pub(crate) fn start_params(request: &Request<Body>) -> ConsoleResult<EventParams> {
    let query = request.uri().query().unwrap_or("");
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
        .map_err(|e| ConsoleError::Validation(format!("Invalid query string: {}", e)))?;

    let mut params = EventParams::new();
    for (key, value) in pairs {
        if START_PARAM_KEYS.contains(&key.as_str()) {
            params.entry(key).or_insert(value);
        }
    }
    Ok(params)
}

/// 監査ログ付きプロキシの共通処理
pub(crate) async fn handle<E>(
    state: &AppState,
    event_type: EventType,
    extractor: E,
    request: Request<Body>,
) -> Response
where
    E: FnOnce(&Request<Body>) -> ConsoleResult<EventParams>,
{
    let identity_id = match state.identity_resolver.resolve_identity(request.headers()).await {
        Ok(id) => id,
        Err(err) => {
            error!(error = %err, event_type = %event_type, "unable to resolve identity");
            return state.error_responder.respond(&ConsoleError::Unauthorized(
                INVALID_SUB_CLAIM_MESSAGE.to_string(),
            ));
        }
    };

    let event_params = match extractor(&request) {
        Ok(params) => params,
        Err(err) => {
            warn!(error = %err, event_type = %event_type, "invalid request parameters");
            return state.error_responder.respond(&err);
        }
    };

    let entry = AuditLogEntry::new(event_type, identity_id, event_params);
    if let Err(err) = state.audit_log_store.create(&entry).await {
        error!(
            error = %err,
            event_type = %event_type,
            identity_id = %identity_id,
            "unable to create audit log"
        );
        return state.error_responder.respond(&err);
    }

    info!(
        audit_log_id = %entry.id,
        event_type = %event_type,
        identity_id = %identity_id,
        "audit log recorded"
    );

    match state
        .forwarder
        .forward(request, &state.config.tenant_service_url)
        .await
    {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, event_type = %event_type, "unable to proxy to tenant service");
            state.error_responder.respond(&err)
        }
    }
}

/// GET /api/tenants/update
pub async fn show(State(state): State<AppState>, request: Request<Body>) -> Response {
    handle(&state, EventType::ShowTenantUpdate, no_params, request).await
}

/// POST /api/tenants/update/start
pub async fn start(State(state): State<AppState>, request: Request<Body>) -> Response {
    handle(&state, EventType::StartTenantUpdate, start_params, request).await
}

/// POST /api/tenants/update/stop
pub async fn stop(State(state): State<AppState>, request: Request<Body>) -> Response {
    handle(&state, EventType::StopTenantUpdate, no_params, request).await
}
