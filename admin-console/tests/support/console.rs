use admin_console::audit::types::{AuditLogEntry, AuditLogFilter};
use admin_console::common::auth::Claims;
use admin_console::config::ConsoleConfig;
use admin_console::db::audit_log::AuditLogStorage;
use admin_console::{api, AppState};
use axum::Router;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use uuid::Uuid;

/// テスト用のJWT秘密鍵
pub const TEST_JWT_SECRET: &str = "contract-test-secret";

/// テスト用の設定を作成する
pub fn test_config(tenant_service_url: &str) -> ConsoleConfig {
    ConsoleConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        tenant_service_url: tenant_service_url.to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
    }
}

/// テスト用のSQLiteデータベースプールを作成する
///
/// インメモリDBは接続ごとに独立するため接続数は1に固定する。
pub async fn create_test_db_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory SQLite pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// テスト用のAppStateを作成する（転送先は`tenant_service_url`）
#[allow(dead_code)]
pub async fn create_test_state(tenant_service_url: &str) -> (AppState, SqlitePool) {
    let db_pool = create_test_db_pool().await;
    let state = AppState::new(test_config(tenant_service_url), db_pool.clone());
    (state, db_pool)
}

/// テスト用の管理コンソールを作成する（.oneshot()スタイルのテスト用）
#[allow(dead_code)]
pub async fn create_test_console(tenant_service_url: &str) -> (Router, SqlitePool) {
    let (state, db_pool) = create_test_state(tenant_service_url).await;
    (api::create_app(state), db_pool)
}

/// 任意のsubと秘密鍵で1時間有効なJWTを発行する
pub fn token_for(sub: &str, secret: &str) -> String {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: sub.to_string(),
        exp: now + 3600,
        iat: Some(now),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("encode jwt")
}

/// 指定アイデンティティの有効なJWTを発行する
pub fn bearer_for(identity_id: Uuid) -> String {
    format!("Bearer {}", token_for(&identity_id.to_string(), TEST_JWT_SECRET))
}

/// 誰もlistenしていないポートのURLを返す
#[allow(dead_code)]
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

/// 記録済みの監査ログを新しい順に取得する
#[allow(dead_code)]
pub async fn audit_logs(db_pool: &SqlitePool) -> Vec<AuditLogEntry> {
    AuditLogStorage::new(db_pool.clone())
        .query(&AuditLogFilter::default())
        .await
        .expect("query audit logs")
}

/// 監査ログテーブルを削除して永続化を失敗させる
#[allow(dead_code)]
pub async fn break_audit_log_table(db_pool: &SqlitePool) {
    sqlx::query("DROP TABLE audit_logs")
        .execute(db_pool)
        .await
        .expect("drop audit_logs");
}
