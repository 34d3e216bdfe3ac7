//! CLI module for admin-console
//!
//! Provides the command-line interface for running the console server.

pub mod serve;

use clap::{Parser, Subcommand};

/// Admin console - audit-gated proxy for tenant update operations
#[derive(Parser, Debug)]
#[command(name = "admin-console")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    ADMIN_CONSOLE_HOST                Bind address (default: 0.0.0.0)
    ADMIN_CONSOLE_PORT                Listen port (default: 8080)
    ADMIN_CONSOLE_LOG_LEVEL           Log level (default: info)
    ADMIN_CONSOLE_LOG_DIR             Directory for daily rolling log files
    ADMIN_CONSOLE_DATABASE_URL        Database URL
    ADMIN_CONSOLE_TENANT_SERVICE_URL  Tenant service base URL (required)
    ADMIN_CONSOLE_JWT_SECRET          JWT verification secret (required)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the admin console server
    Serve(serve::ServeArgs),
}
