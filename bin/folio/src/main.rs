//! Folio - content aggregation gateway.
//!
//! # Usage
//!
//! ```bash
//! # Start with an empty catalog
//! folio
//!
//! # Start against a seed fixture with environment overrides
//! FIXTURE=fixtures/demo.json GRAPHQL_PORT=4000 folio
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

use folio_core::services::GatewayService;
use folio_graphql::{ServerConfig, build_schema, serve_with_shutdown};
use folio_upstream::{Fixture, FixtureCatalog};

/// Folio CLI - content aggregation gateway.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Folio - cursor-paginated article/tag aggregation gateway")]
#[command(version)]
struct Cli {
    /// Host to bind the GraphQL server on.
    #[arg(long, env = "GRAPHQL_HOST", default_value = "0.0.0.0")]
    host: String,

    /// GraphQL server port.
    #[arg(long, env = "GRAPHQL_PORT", default_value = "4000")]
    port: u16,

    /// JSON fixture to seed the catalog from.
    #[arg(long, env = "FIXTURE")]
    fixture: Option<PathBuf>,

    /// Disable the GraphiQL playground.
    #[arg(long)]
    no_playground: bool,

    /// Enable JSON log output.
    #[arg(long, env = "JSON_LOGS")]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    info!("🚀 Starting Folio gateway");

    // ─────────────────────────────────────────────────────────────────────────
    // 📚 CATALOG
    // ─────────────────────────────────────────────────────────────────────────
    let catalog = match &cli.fixture {
        Some(path) => {
            let fixture = Fixture::load(path)
                .with_context(|| format!("Failed to load fixture {}", path.display()))?;
            info!(
                articles = fixture.articles.len(),
                tags = fixture.tags.len(),
                "📚 Catalog seeded from {}",
                path.display()
            );
            FixtureCatalog::from_fixture(fixture).context("Invalid fixture")?
        }
        None => {
            debug!("No fixture given, starting with an empty catalog");
            FixtureCatalog::new()
        }
    };
    let catalog = Arc::new(catalog);

    let service = Arc::new(GatewayService::new(
        catalog.clone(),
        catalog.clone(),
        catalog,
    ));

    // ─────────────────────────────────────────────────────────────────────────
    // ⚡ SERVER
    // ─────────────────────────────────────────────────────────────────────────
    let schema = build_schema(service);
    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        enable_playground: !cli.no_playground,
    };

    info!("✅ Folio ready");
    info!("   ⚡ GraphQL:  http://localhost:{}/graphql", cli.port);
    info!("   Press Ctrl+C to stop");

    serve_with_shutdown(schema, config, shutdown_signal())
        .await
        .context("Server error")?;

    info!("🛑 Shutdown complete");
    Ok(())
}

/// Initialize tracing subscriber.
fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
