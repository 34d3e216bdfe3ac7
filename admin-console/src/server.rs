//! axumサーバー起動・シャットダウンハンドリング

use crate::common::error::{ConsoleError, ConsoleResult};
use crate::AppState;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

/// プロセス内からのシャットダウン要求
///
/// OSシグナルに加えて、テストや組み込み利用時にサーバーを停止するために使う。
#[derive(Clone, Debug)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }
}

impl ShutdownHandle {
    /// 停止を要求し、待機中のサーバーを起こす
    pub fn request_shutdown(&self) {
        self.tx.send_replace(true);
    }

    /// 停止が要求されるまで待機
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // 送信側は自身が保持しているためエラーにはならない
        let _ = rx.wait_for(|requested| *requested).await;
    }
}

/// 指定アドレスでサーバーを起動し、シャットダウンまで待機する
pub async fn run(state: AppState, bind_addr: &str, shutdown: ShutdownHandle) -> ConsoleResult<()> {
    let listener = TcpListener::bind(bind_addr).await.map_err(|e| {
        ConsoleError::Config(format!("Failed to bind to {}: {}", bind_addr, e))
    })?;
    serve(state, listener, shutdown).await
}

/// バインド済みのリスナーでサーバーを起動する
pub async fn serve(
    state: AppState,
    listener: TcpListener,
    shutdown: ShutdownHandle,
) -> ConsoleResult<()> {
    let local_addr = listener
        .local_addr()
        .map_err(|e| ConsoleError::Internal(format!("Failed to read local address: {}", e)))?;
    let tenant_service_url = state.config.tenant_service_url.clone();

    let app = crate::api::create_app(state);

    info!(
        addr = %local_addr,
        tenant_service = %tenant_service_url,
        "Admin console listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .map_err(|e| ConsoleError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal(shutdown: ShutdownHandle) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
        _ = shutdown.wait() => {
            info!("Shutdown requested, shutting down...");
        }
    }
}
