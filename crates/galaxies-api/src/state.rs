//! Shared application state for the API server.

use std::sync::Arc;

use galaxies_core::{BroadcastSink, GameEngine, PersistenceGateway};

/// The engine as the API sees it: any gateway, broadcast notifications.
pub type Engine<G> = GameEngine<G, BroadcastSink>;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug)]
pub struct AppState<G> {
    /// The transaction engine.
    pub engine: Arc<Engine<G>>,
}

impl<G: PersistenceGateway> AppState<G> {
    /// Wrap a running engine.
    pub const fn new(engine: Arc<Engine<G>>) -> Self {
        Self { engine }
    }
}
