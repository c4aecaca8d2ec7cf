//! Game server binary for Galaxies.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `galaxies-config.yaml` plus environment
//! 3. Connect to `PostgreSQL` and run migrations
//! 4. Load the universe, generating and seeding it on first boot
//! 5. Start the autosave sweep
//! 6. Serve the HTTP and `WebSocket` API until `Ctrl-C`
//! 7. Save every online player and close the pool

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use galaxies_api::{AppState, start_server};
use galaxies_core::{BroadcastSink, GalaxiesConfig, GameEngine};
use galaxies_db::{PostgresPool, PostgresStore};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::StartupError;

/// Config file used when `GALAXIES_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "galaxies-config.yaml";

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("galaxies-server starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        seed = ?config.universe.seed,
        system_count = config.universe.system_count,
        "Configuration loaded"
    );

    // 3. Connect to PostgreSQL.
    let pool = PostgresPool::open(&config.database).await?;
    let store = Arc::new(PostgresStore::new(&pool));

    // 4. Load or generate the universe.
    let mut rng = match config.universe.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let engine = Arc::new(
        GameEngine::bootstrap(
            config.engine.clone(),
            &config.universe.bounds(),
            store,
            BroadcastSink::new(),
            &mut rng,
        )
        .await?,
    );

    // 5. Autosave.
    let autosave = tokio::spawn(Arc::clone(&engine).run_autosave());

    // 6. Serve until interrupted.
    let state = Arc::new(AppState::new(Arc::clone(&engine)));
    start_server(&config.server, state, shutdown_signal()).await?;

    // 7. Final flush.
    autosave.abort();
    let report = engine.save_all(config.engine.autosave_timeout()).await;
    info!(
        saved = report.saved,
        failed = report.failed,
        "Final save complete"
    );
    pool.close().await;

    info!("galaxies-server shutdown complete");
    Ok(())
}

/// Load configuration from `$GALAXIES_CONFIG` or [`DEFAULT_CONFIG_PATH`],
/// falling back to defaults when the file is absent. Environment
/// overrides apply either way.
fn load_config() -> Result<GalaxiesConfig, StartupError> {
    let path = std::env::var_os("GALAXIES_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    Ok(GalaxiesConfig::load_or_default(&path)?)
}

/// Resolve on `Ctrl-C`.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C, shutting down");
    }
    info!("Shutdown signal received");
}
