//! jokes-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `JOKES_*`
//! environment variables, prepares the SQLite schema, and serves the JSON API
//! over HTTP until Ctrl-C or SIGTERM.

mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use jokes_api::AppState;
use jokes_store_sqlite::SqliteProvider;
use jokes_upstream::{HttpJokeSource, UpstreamConfig};
use tokio::net::TcpListener;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Jokes API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let provider = SqliteProvider::new(server_cfg.resolved_database_path())
    .with_busy_timeout(server_cfg.busy_timeout());

  // A database that is down at startup is not fatal: the server still comes
  // up and /health reports 503 until the `jokes` table can be queried.
  info!(path = ?provider.path(), "preparing database");
  match jokes_core::store::prepare(&provider).await {
    Ok(()) => info!("database table 'jokes' is ready"),
    Err(e) => error!(error = %e, "could not prepare the database on startup"),
  }

  let source = HttpJokeSource::new(UpstreamConfig {
    url:     server_cfg.joke_api_url.clone(),
    timeout: server_cfg.upstream_timeout(),
  })
  .context("failed to build upstream HTTP client")?;
  info!(url = source.url(), "using upstream joke API");

  let app = jokes_api::api_router(AppState::new(provider, source));
  let address = server_cfg.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  info!("Listening on http://{address}");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  info!("server stopped");
  Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      error!(error = %e, "failed to install Ctrl-C handler");
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
        error!(error = %e, "failed to install SIGTERM handler");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => info!("received Ctrl-C, shutting down"),
    () = terminate => info!("received SIGTERM, shutting down"),
  }
}
