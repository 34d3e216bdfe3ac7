//! REST APIハンドラー
//!
//! ルーティングとHTTPハンドラーの定義

/// 監査ログ参照API
pub mod audit_log;

/// エラーレスポンス生成
pub mod error;

/// テナントサービスへの転送
pub mod proxy;

/// テナント更新API（監査ログ付きプロキシ）
pub mod tenants_update;

use crate::AppState;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    // 転送先でも同じパスを使うため、ネストせずフルパスで登録する
    Router::new()
        .route("/api/tenants/update", get(tenants_update::show))
        .route("/api/tenants/update/start", post(tenants_update::start))
        .route("/api/tenants/update/stop", post(tenants_update::stop))
        .route("/api/auditlogs", get(audit_log::list_audit_logs))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// GET /health - 死活監視
async fn health() -> StatusCode {
    StatusCode::OK
}
