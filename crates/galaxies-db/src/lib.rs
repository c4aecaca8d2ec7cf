//! `PostgreSQL` persistence for the Galaxies trading game.
//!
//! # Architecture
//!
//! ```text
//! GameEngine
//!     |
//!     +-- PersistenceGateway --> PostgresStore --> PostgresPool (sqlx)
//!                                    |
//!                                    +-- systems  (stats, market as JSONB)
//!                                    +-- players
//!                                    +-- ships    (stats, cargo as JSONB)
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- connection pool, configuration and migrations
//! - [`store`] -- the gateway implementation
//! - [`rows`] -- row types and decoding
//! - [`error`] -- [`DbError`] and its mapping to the engine's store errors

pub mod error;
pub mod postgres;
pub mod rows;
pub mod store;

pub use error::DbError;
pub use postgres::{PostgresConfig, PostgresPool};
pub use store::PostgresStore;
