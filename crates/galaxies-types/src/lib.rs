//! Shared type definitions for the Galaxies trading simulation.
//!
//! This crate is the single source of truth for all types used across the
//! Galaxies workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the game client.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for players, ships and systems
//! - [`enums`] -- Archetype tags and other categorical types
//! - [`stats`] -- Derived stat blocks for systems and ships
//! - [`structs`] -- Entity structs (systems, ships, players, goods, people)

pub mod enums;
pub mod ids;
pub mod stats;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    Chassis, CrewKind, CrewRole, EconomicStatus, ItemCategory, Origin, PassengerKind,
    PoliticalStatus, Qualifier, SocialStatus,
};
pub use ids::{PlayerId, ShipId, SystemId};
pub use stats::{Facilities, PopulationCounts, ShipStats, SystemStats};
pub use structs::{
    CrewMember, ItemStack, Passenger, PlayerRecord, PlayerSnapshot, Ship, StarSystem,
    SystemSummary, distance,
};
