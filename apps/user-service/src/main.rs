use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use users::config::UsersConfig;
use users::domain::repo::UserStore;
use users::domain::service::Service;
use users::infra::storage::{migrations::Migrator, InMemoryUserStore, SeaOrmUserStore};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Users service - manages user records over HTTP
#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "Users service - manages user records over HTTP")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use the in-memory store regardless of database configuration
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config);
    tracing::info!("Users service starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config).await,
    }
}

/// Pick the storage backend: SeaORM when a database is configured, the
/// in-memory map otherwise or when `--mock` forces it.
async fn build_store(config: &AppConfig, args: &CliArgs) -> Result<Arc<dyn UserStore>> {
    if args.mock {
        tracing::info!("Using the in-memory user store (--mock)");
        return Ok(Arc::new(InMemoryUserStore::new()));
    }

    match &config.database {
        Some(db_config) => {
            let url = db_config.url.trim();
            if url.is_empty() {
                return Err(anyhow!("Database URL not configured"));
            }

            let mut opts = ConnectOptions::new(url.to_owned());
            opts.max_connections(db_config.max_conns.unwrap_or(10))
                .acquire_timeout(Duration::from_secs(5));

            tracing::info!("Connecting to database: {}", url);
            let conn = Database::connect(opts)
                .await
                .with_context(|| format!("Failed to connect to database '{url}'"))?;
            Migrator::up(&conn, None)
                .await
                .context("Failed to run database migrations")?;

            Ok(Arc::new(SeaOrmUserStore::new(conn)))
        }
        None => {
            tracing::warn!("No database configuration found, using the in-memory store");
            Ok(Arc::new(InMemoryUserStore::new()))
        }
    }
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let store = build_store(&config, &args).await?;

    let users_config: UsersConfig = match config.modules.get("users") {
        Some(value) => serde_json::from_value(value.clone())
            .context("Invalid [modules.users] configuration")?,
        None => UsersConfig::default(),
    };
    let service = Arc::new(Service::new(store, users_config.into()));
    let router = users::api::rest::routes::router(service);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            anyhow!(
                "Invalid bind address '{}:{}': {}",
                config.server.host,
                config.server.port,
                e
            )
        })?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {}", addr);

    // Graceful shutdown on cancel
    let cancel = CancellationToken::new();
    let shutdown = {
        let cancel = cancel.clone();
        async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully");
        }
    };

    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
    });

    runtime::wait_for_shutdown().await?;
    cancel.cancel();

    // Bounded window for in-flight requests; abandon them when it elapses.
    let grace = Duration::from_secs(config.server.shutdown_timeout_sec);
    match tokio::time::timeout(grace, server).await {
        Ok(joined) => joined??,
        Err(_) => tracing::warn!(
            "Graceful shutdown window ({}s) elapsed, abandoning in-flight requests",
            config.server.shutdown_timeout_sec
        ),
    }

    tracing::info!("Users service stopped");
    Ok(())
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);

    Ok(())
}
