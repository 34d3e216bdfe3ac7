//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

use crate::common::error::{ConsoleError, ConsoleResult};
use futures::future::BoxFuture;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{SqliteConnection, SqlitePool};
use std::str::FromStr;
use tracing::warn;

/// 監査ログストレージ
pub mod audit_log;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;

/// データベース接続プールを作成する
///
/// SQLiteファイルはディレクトリが存在しないと作成できないため、先に作成しておく。
pub async fn init_db_pool(database_url: &str) -> ConsoleResult<SqlitePool> {
    if let Some(path) = database_url.strip_prefix("sqlite:") {
        // `sqlite::memory:` のような特殊指定はスキップ
        if !path.starts_with(':') {
            let normalized = path.trim_start_matches("//");
            let path_without_params = normalized.split('?').next().unwrap_or(normalized);
            let db_path = std::path::Path::new(path_without_params);
            if let Some(parent) = db_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ConsoleError::Config(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| ConsoleError::Config(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true);

    SqlitePool::connect_with(connect_options)
        .await
        .map_err(|e| ConsoleError::Database(format!("Failed to connect to database: {}", e)))
}

/// 埋め込みマイグレーションを実行する
pub async fn run_migrations(pool: &SqlitePool) -> ConsoleResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| ConsoleError::Database(format!("Failed to run migrations: {}", e)))
}

/// トランザクション境界内で処理を実行する
///
/// `f` が `Ok` を返せばコミット、`Err` を返せばロールバックする。
/// どちらの場合も `f` のエラーはそのまま呼び出し元へ返す。
pub async fn transactional<T, F>(pool: &SqlitePool, f: F) -> ConsoleResult<T>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, ConsoleResult<T>> + Send,
{
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ConsoleError::Database(format!("Failed to begin transaction: {}", e)))?;

    match f(&mut *tx).await {
        Ok(value) => {
            tx.commit().await.map_err(|e| {
                ConsoleError::Database(format!("Failed to commit transaction: {}", e))
            })?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Failed to roll back transaction");
            }
            Err(err)
        }
    }
}
