//! Live world state and the transaction engine for Galaxies.
//!
//! Many clients buy, sell, warp and refuel concurrently against shared
//! systems. This crate keeps every live entity behind its own lock, takes
//! those locks in one fixed order, and persists each mutation before
//! reporting success.
//!
//! # Architecture
//!
//! ```text
//!   client command
//!        |
//!        v
//!   GameEngine ----> registry (Universe, ActivePlayers)
//!        |               |
//!        |          TransactionGuard: system -> player -> ship
//!        v
//!   PersistenceGateway (synchronous, deadline-bounded)
//!        |
//!        v
//!   NotificationSink (fire-and-forget)
//! ```
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration with environment overrides.
//! - [`engine`] -- The engine object, bootstrap and read-only queries.
//! - [`error`] -- [`TradeError`], [`StoreError`] and their [`ErrorKind`].
//! - [`gateway`] -- Persistence and notification traits, broadcast sink.
//! - [`lock`] -- The system, player, ship lock-ordering guard.
//! - [`memory_store`] -- In-memory gateway with failure injection.
//! - [`pricing`] -- Buy, sell and refuel arithmetic.
//! - [`registry`] -- Live system and player registries.
//! - [`session`] -- Login, onboarding, views, saves and autosave.
//! - [`trade`] -- Buy, sell, warp and refuel.

pub mod config;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod lock;
pub mod memory_store;
pub mod pricing;
pub mod registry;
pub mod session;
pub mod trade;

// Re-export primary types at crate root.
pub use config::{ConfigError, EngineConfig, GalaxiesConfig};
pub use engine::GameEngine;
pub use error::{ErrorKind, StoreError, TradeError};
pub use gateway::{BroadcastSink, NotificationSink, NullSink, PersistenceGateway};
pub use lock::TransactionGuard;
pub use memory_store::MemoryStore;
pub use session::{Login, SaveReport};
pub use trade::RefuelReceipt;
