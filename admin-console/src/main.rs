//! Admin console server entry point

use admin_console::cli::{Cli, Commands};
use admin_console::config::ConsoleConfig;
use admin_console::server::{self, ShutdownHandle};
use admin_console::{db, logging, AppState};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to initialize logging: {:#}", e);
            std::process::exit(1);
        }
    };

    let bind_override = match cli.command {
        Some(Commands::Serve(args)) => Some((args.host, args.port)),
        // No subcommand - default to serve with env config
        None => None,
    };

    if let Err(e) = run_server(bind_override).await {
        tracing::error!(error = %e, "admin console terminated");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_server(
    bind_override: Option<(String, u16)>,
) -> admin_console::common::error::ConsoleResult<()> {
    info!("Admin console v{}", env!("CARGO_PKG_VERSION"));

    let mut config = ConsoleConfig::from_env()?;
    if let Some((host, port)) = bind_override {
        config = config.with_bind(host, port);
    }

    let db_pool = db::init_db_pool(&config.database_url).await?;
    db::run_migrations(&db_pool).await?;
    info!(database_url = %config.database_url, "Database initialized");

    let bind_addr = config.bind_addr();
    let state = AppState::new(config, db_pool);

    server::run(state, &bind_addr, ShutdownHandle::default()).await
}
