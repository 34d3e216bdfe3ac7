//! Admin console server
//!
//! テナント更新操作を監査ログに記録してからテナントサービスへ転送する管理コンソール

#![warn(missing_docs)]

/// 共通型定義（エラー・JWTクレーム）
pub mod common;

/// REST APIハンドラー
pub mod api;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// 認証（JWT検証・アイデンティティ解決）
pub mod auth;

/// 監査ログシステム
pub mod audit;

/// CLIインターフェース
pub mod cli;

/// サーバー起動・シャットダウン
pub mod server;

use std::sync::Arc;

/// アプリケーション状態
///
/// ハンドラーが依存するコラボレーターはすべてtraitオブジェクトで保持し、
/// テストでは差し替えられるようにしている。
#[derive(Clone)]
pub struct AppState {
    /// 実行時設定
    pub config: Arc<config::ConsoleConfig>,
    /// 呼び出し元アイデンティティの解決
    pub identity_resolver: Arc<dyn auth::identity::IdentityResolver>,
    /// 監査ログ書き込み
    pub audit_log_store: Arc<dyn db::traits::AuditLogStore>,
    /// 監査ログ参照（一覧API用）
    pub audit_log_storage: Arc<db::audit_log::AuditLogStorage>,
    /// テナントサービスへの転送
    pub forwarder: Arc<dyn api::proxy::Forwarder>,
    /// エラーレスポンス生成
    pub error_responder: Arc<dyn api::error::ErrorResponder>,
}

impl AppState {
    /// 設定とDBプールからデフォルト構成の状態を組み立てる
    ///
    /// JWT検証・SQLite監査ログ・reqwest転送・JSON-APIエラーを使用する。
    pub fn new(config: config::ConsoleConfig, db_pool: sqlx::SqlitePool) -> Self {
        let storage = Arc::new(db::audit_log::AuditLogStorage::new(db_pool));
        let identity_resolver = auth::identity::JwtIdentityResolver::new(config.jwt_secret.clone());

        Self {
            config: Arc::new(config),
            identity_resolver: Arc::new(identity_resolver),
            audit_log_store: storage.clone(),
            audit_log_storage: storage,
            forwarder: Arc::new(api::proxy::HttpForwarder::new(reqwest::Client::new())),
            error_responder: Arc::new(api::error::JsonApiErrorResponder),
        }
    }
}
