//! Validation server
//!
//! Serves the supervisor validation REST API over a SeaORM database.

mod config;

use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use config::{AppConfig, LoggingConfig, ServerConfig};
use sea_orm::{ConnectOptions, Database};
use std::path::PathBuf;
use std::sync::Arc;
use supervisor_validation::{SupervisorValidationModule, TracingEventPublisher};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "validation-server", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    init_tracing(&config.logging);
    tracing::info!(
        bind_addr = %config.server.bind_addr,
        "starting validation server"
    );

    let mut options = ConnectOptions::new(config.database.url.clone());
    options
        .max_connections(config.database.max_connections)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("failed to connect to database")?;
    tracing::info!("connected to database");

    let module = SupervisorValidationModule::init(
        Arc::new(db),
        config.validation.clone(),
        Arc::new(TracingEventPublisher),
    )
    .await?;

    let app = build_app(&module, &config.server);
    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("validation server stopped");
    Ok(())
}

fn build_app(module: &SupervisorValidationModule, server: &ServerConfig) -> Router {
    module
        .register_routes(Router::new())
        .layer(TimeoutLayer::new(server.request_timeout))
        .layer(TraceLayer::new_for_http())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
