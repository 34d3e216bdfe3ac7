//! serve サブコマンド
//!
//! 管理コンソールサーバーを起動します。

use clap::Args;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value = "8080", env = "ADMIN_CONSOLE_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "ADMIN_CONSOLE_HOST")]
    pub host: String,
}
