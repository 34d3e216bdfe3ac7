//! ロギング初期化
//!
//! 標準出力へのログに加え、`ADMIN_CONSOLE_LOG_DIR`が設定されていれば
//! 日次ローテーションのログファイルにも出力する。

use crate::config::{get_env_with_fallback, get_env_with_fallback_or};
use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログファイル名のプレフィックス
pub const LOG_FILE_PREFIX: &str = "admin-console.log";

/// ログレベル指定（`ADMIN_CONSOLE_LOG_LEVEL`、旧: `RUST_LOG`、デフォルト: `info`）
pub fn log_filter_directive() -> String {
    get_env_with_fallback_or("ADMIN_CONSOLE_LOG_LEVEL", "RUST_LOG", "info")
}

/// グローバルサブスクライバーを初期化する
///
/// ファイル出力が有効な場合は`WorkerGuard`を返す。プロセス終了まで保持すること
/// （ドロップするとバッファ済みのログが書き出されなくなる）。
pub fn init() -> anyhow::Result<Option<WorkerGuard>> {
    let directive = log_filter_directive();
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter '{}'", directive))?;

    let log_dir = get_env_with_fallback("ADMIN_CONSOLE_LOG_DIR", "ADMIN_CONSOLE_LOG_DIR");
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir))?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::debug!(filter = %directive, "Logging initialized");
    Ok(guard)
}
