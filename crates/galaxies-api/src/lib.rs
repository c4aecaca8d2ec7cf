//! HTTP and `WebSocket` API for the Galaxies trading game.
//!
//! This crate exposes the transaction engine over Axum:
//!
//! - **REST endpoints** for login, onboarding, trading, travel and
//!   local listings (see [`handlers`])
//! - **`WebSocket` endpoint** (`/ws/players/{id}`) pushing each player's
//!   state after every successful operation, fed by the engine's
//!   [`BroadcastSink`](galaxies_core::BroadcastSink)
//!
//! # Architecture
//!
//! Handlers hold no state of their own. Each request resolves to exactly
//! one engine call on the shared [`GameEngine`](galaxies_core::GameEngine);
//! engine errors become JSON error bodies through [`ApiError`].

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::{AppState, Engine};
