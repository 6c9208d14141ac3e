//! Register-file backend entry point.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use register_file_backend::api::{create_router, AppState};
use register_file_backend::config::{Config, LogFormat};
use register_file_backend::error::BackendError;
use register_file_backend::metrics;
use register_file_backend::utils::shutdown_signal;

/// Register-file backend HTTP service.
#[derive(Parser, Debug)]
#[command(name = "register-file-backend")]
#[command(about = "HTTP backend exposing hello and status endpoints")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Bind address (overrides HOST).
    #[arg(long, global = true)]
    host: Option<String>,

    /// Log format: pretty or json (overrides LOG_FORMAT).
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration, then apply CLI overrides
    let mut config = Config::load()
        .map_err(BackendError::from)
        .context("failed to load configuration from environment")?;

    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(format) = args.log_format {
        config.log_format = format;
    }

    init_logging(&config, args.verbose);

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

/// Install the global tracing subscriber.
fn init_logging(config: &Config, verbose: bool) {
    let filter = EnvFilter::try_new(config.log_directives(verbose))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("REGISTER FILE BACKEND - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(BackendError::InvalidConfig(e).into());
        }
    }

    print!("Resolving listen address... ");
    let addr = match config.socket_addr() {
        Ok(addr) => {
            println!("OK");
            addr
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(BackendError::InvalidConfig(e).into());
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}", addr);
    println!("  Log Level: {}", config.rust_log);
    println!("  Log Format: {}", config.log_format);
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    let origins = config.allowed_origins();
    if origins.is_empty() {
        println!("  CORS Origins: any");
    } else {
        println!("  CORS Origins: {}", origins.join(", "));
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(BackendError::InvalidConfig(e).into());
    }

    let addr = config.socket_addr().map_err(BackendError::InvalidConfig)?;

    // Create app state
    let mut app_state = AppState::new();
    if config.metrics_enabled {
        let handle = metrics::init_metrics().context("failed to install metrics recorder")?;
        app_state = app_state.with_metrics(handle);
        info!("Prometheus metrics exposed on /metrics");
    }

    let router = create_router(app_state, &config.allowed_origins());

    // Start HTTP server
    let listener = TcpListener::bind(addr)
        .await
        .map_err(BackendError::from)
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(BackendError::from)?;

    info!("HTTP server stopped");
    Ok(())
}
