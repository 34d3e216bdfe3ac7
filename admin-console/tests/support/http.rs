use std::net::SocketAddr;

use admin_console::common::error::ConsoleResult;
use admin_console::server::{self, ShutdownHandle};
use admin_console::AppState;
use tokio::{net::TcpListener, task::JoinHandle};

/// 実ポートにバインドして起動したテスト用サーバー
#[allow(dead_code)]
pub struct TestServer {
    addr: SocketAddr,
    shutdown: ShutdownHandle,
    handle: JoinHandle<ConsoleResult<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// サーバーがバインドしているアドレスを返す
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://addr`形式のベースURL
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// サーバーを停止し、バックグラウンドタスクの終了を待つ
    pub async fn stop(self) -> ConsoleResult<()> {
        self.shutdown.request_shutdown();
        self.handle.await.expect("server task panicked")
    }
}

/// 管理コンソールを`127.0.0.1:0`で起動する
#[allow(dead_code)]
pub async fn spawn_console(state: AppState) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = ShutdownHandle::default();
    let handle = tokio::spawn(server::serve(state, listener, shutdown.clone()));

    TestServer {
        addr,
        shutdown,
        handle,
    }
}
