//! Procedural generation for the Galaxies trading simulation.
//!
//! Everything here is a pure function of its inputs and an injected random
//! source: the same seed always yields the same universe.
//!
//! # Architecture
//!
//! | Stage | Module | Randomness |
//! |-------|--------|------------|
//! | Declarative edits and their application | [`modifiers`] | none |
//! | Political, economic, social layers | [`system_layers`] | none |
//! | Origin and qualifier layers | [`ship_layers`] | none |
//! | Clamps, floors, cross-field fixes, pricing | [`finalize`] | none |
//! | System composition and assembly | [`system`] | name only |
//! | Chassis rolls and ship assembly | [`ship`] | baseline roll |
//! | Head counts from densities | [`population`] | yes |
//! | Item catalog and opening stock | [`market`] | quantity jitter |
//! | Rejection-sampled placement and scans | [`universe`] | yes |
//! | Crew for hire, passage contracts | [`crew`], [`passenger`] | yes |
//!
//! Layer order is fixed: political, economic, social for systems and
//! chassis, origin, qualifier for ships. Later layers act on values the
//! earlier ones already changed.

pub mod crew;
pub mod error;
pub mod finalize;
pub mod market;
pub mod modifiers;
pub mod names;
pub mod passenger;
pub mod population;
pub mod ship;
pub mod ship_layers;
pub mod system;
pub mod system_layers;
pub mod universe;

// Re-export primary types at crate root.
pub use crew::{crew_roster, generate_crew};
pub use error::GenError;
pub use finalize::{finalize_ship, finalize_system, ship_cost};
pub use market::{CATALOG, ItemTemplate, stock_market, template};
pub use modifiers::{Archetype, Edit, Op, StatBlock, apply_archetype, apply_layer};
pub use passenger::{generate_passenger, passenger_board};
pub use population::populate;
pub use ship::{ShipTags, generate_random_ship, generate_ship, starter_ships};
pub use system::{SystemTags, compose_system_stats, generate_system};
pub use universe::{UniverseBounds, generate_universe, systems_in_range};
