use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gatehouse_application::{PageController, SessionStore};
use gatehouse_application::controller::Page;
use gatehouse_core::storage::{InMemoryKeyValueStore, KeyValueStore};
use gatehouse_infrastructure::{ConfigService, FileKeyValueStore, GatehousePaths};

mod commands;
mod logging;
mod terminal_view;

use terminal_view::TerminalView;

#[derive(Parser)]
#[command(name = "gatehouse")]
#[command(about = "Gatehouse - demo login and session manager", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the durable session store and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in (prompts for missing credentials)
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the current session
    Status,
    /// Open the protected dashboard page
    Dashboard,
    /// Run the placeholder signup flow
    Signup,
    /// Interactive shell
    Shell,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let config = config_service
        .get_config()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;

    let paths = GatehousePaths::new(cli.data_dir.or_else(|| config.storage.data_dir.clone()));
    let logs_dir = paths.logs_dir().ok();
    let _log_guard = logging::init(&config.logging, logs_dir.as_deref(), cli.verbose);

    let storage: Arc<dyn KeyValueStore> = if cli.ephemeral {
        tracing::debug!("Using in-memory session storage");
        Arc::new(InMemoryKeyValueStore::new())
    } else {
        let store = FileKeyValueStore::new(&paths)?;
        tracing::debug!(path = %store.path().display(), "Using file session storage");
        Arc::new(store)
    };

    // Composition root: one store shared by every page.
    let store = Arc::new(SessionStore::from_config(&config, storage));
    let controller = PageController::new(
        store,
        Arc::new(TerminalView::new(Page::Index)),
        config.ui.clone(),
    );

    let code = match cli.command {
        Commands::Login { email, password } => {
            commands::login::run(&controller, email, password).await?
        }
        Commands::Logout => commands::session::logout(&controller).await?,
        Commands::Status => commands::session::status(&controller).await?,
        Commands::Dashboard => commands::session::dashboard(&controller).await?,
        Commands::Signup => commands::session::signup(&controller).await?,
        Commands::Shell => {
            commands::shell::run(&controller).await?;
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}
