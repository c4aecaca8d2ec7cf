//! Axum router construction.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS and request tracing.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use galaxies_core::PersistenceGateway;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete router. See [`handlers`] for the endpoint table;
/// `GET /ws/players/{id}` streams player updates.
pub fn build_router<G: PersistenceGateway>(state: Arc<AppState<G>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // WebSocket
        .route("/ws/players/{id}", get(ws::ws_player::<G>))
        // Sessions
        .route("/api/auth", post(handlers::authenticate::<G>))
        .route("/api/starter-ships", get(handlers::starter_ships::<G>))
        .route("/api/players/{id}", get(handlers::get_player::<G>))
        .route("/api/players/{id}/onboard", post(handlers::onboard::<G>))
        .route("/api/players/{id}/save", post(handlers::save::<G>))
        .route("/api/players/{id}/logout", post(handlers::logout::<G>))
        // Transactions
        .route("/api/players/{id}/buy", post(handlers::buy::<G>))
        .route("/api/players/{id}/sell", post(handlers::sell::<G>))
        .route("/api/players/{id}/warp", post(handlers::warp::<G>))
        .route("/api/players/{id}/refuel", post(handlers::refuel::<G>))
        // Charts and listings
        .route("/api/players/{id}/scan", get(handlers::scan::<G>))
        .route("/api/systems/{id}/market", get(handlers::market::<G>))
        .route("/api/systems/{id}/crew", get(handlers::crew::<G>))
        .route("/api/systems/{id}/passengers", get(handlers::passengers::<G>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
