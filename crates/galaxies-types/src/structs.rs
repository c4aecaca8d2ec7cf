//! Core entity structs for the Galaxies simulation.
//!
//! These are plain data: the engine wraps each live [`StarSystem`],
//! [`PlayerRecord`] and [`Ship`] in its own lock, the database stores them
//! row by row, and the API serializes them to clients.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    Chassis, CrewKind, CrewRole, EconomicStatus, ItemCategory, Origin, PassengerKind,
    PoliticalStatus, Qualifier, SocialStatus,
};
use crate::ids::{PlayerId, ShipId, SystemId};
use crate::stats::{ShipStats, SystemStats};

// ---------------------------------------------------------------------------
// Goods
// ---------------------------------------------------------------------------

/// A stack of one trade good, either on a market or in a cargo hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemStack {
    /// Catalog name; the key used by buy and sell commands.
    pub name: String,
    /// Market category.
    pub category: ItemCategory,
    /// Reference price before system multipliers.
    pub base_value: i64,
    /// 1 (common) to 10 (artifact).
    pub rarity: u8,
    /// Contraband flag.
    pub is_illegal: bool,
    /// Units in this stack.
    pub quantity: u32,
    /// Quantity-weighted average acquisition cost. Zero for market stock.
    pub avg_cost: f64,
}

// ---------------------------------------------------------------------------
// Star systems
// ---------------------------------------------------------------------------

/// A star system: a node of the universe with its own market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StarSystem {
    /// Unique identifier.
    pub id: SystemId,
    /// Procedural catalog name.
    pub name: String,
    /// Horizontal coordinate in light years.
    pub x: i32,
    /// Vertical coordinate in light years.
    pub y: i32,
    /// Political archetype.
    pub political: PoliticalStatus,
    /// Economic archetype.
    pub economic: EconomicStatus,
    /// Social archetype.
    pub social: SocialStatus,
    /// Finalized stat block.
    pub stats: SystemStats,
    /// Goods currently for sale.
    pub market: Vec<ItemStack>,
}

impl StarSystem {
    /// Euclidean distance to another system.
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance((self.x, self.y), (other.x, other.y))
    }

    /// Find a market listing by item name.
    pub fn market_item(&self, name: &str) -> Option<&ItemStack> {
        self.market.iter().find(|stack| stack.name == name)
    }

    /// Summarize this system as seen from `distance` light years away.
    pub fn summary(&self, distance: f64) -> SystemSummary {
        SystemSummary {
            id: self.id,
            name: self.name.clone(),
            x: self.x,
            y: self.y,
            political: self.political,
            economic: self.economic,
            social: self.social,
            distance,
        }
    }
}

/// Euclidean distance between two integer coordinates.
pub fn distance(a: (i32, i32), b: (i32, i32)) -> f64 {
    let dx = f64::from(a.0) - f64::from(b.0);
    let dy = f64::from(a.1) - f64::from(b.1);
    dx.hypot(dy)
}

/// A system as listed by a navigation scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SystemSummary {
    /// Unique identifier.
    pub id: SystemId,
    /// Catalog name.
    pub name: String,
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// Political archetype.
    pub political: PoliticalStatus,
    /// Economic archetype.
    pub economic: EconomicStatus,
    /// Social archetype.
    pub social: SocialStatus,
    /// Distance from the scan origin.
    pub distance: f64,
}

// ---------------------------------------------------------------------------
// Ships and players
// ---------------------------------------------------------------------------

/// A ship owned by exactly one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Ship {
    /// Unique identifier.
    pub id: ShipId,
    /// Model name, e.g. "Rusty Outer Rim Hauler".
    pub name: String,
    /// Hull class.
    pub chassis: Chassis,
    /// Builder.
    pub origin: Origin,
    /// Condition.
    pub qualifier: Qualifier,
    /// Remaining hull points.
    pub current_hull: f64,
    /// Remaining shield points.
    pub current_shield: f64,
    /// Fuel in the tanks.
    pub current_fuel: f64,
    /// Finalized stat block.
    pub stats: ShipStats,
    /// Goods in the hold.
    pub cargo: Vec<ItemStack>,
}

impl Ship {
    /// Units currently stowed.
    pub fn cargo_used(&self) -> u32 {
        self.cargo
            .iter()
            .fold(0_u32, |acc, stack| acc.saturating_add(stack.quantity))
    }

    /// Units of free space in the hold.
    pub fn cargo_free(&self) -> u32 {
        self.stats.cargo_volume.saturating_sub(self.cargo_used())
    }

    /// Whether `quantity` more units fit in the hold.
    pub fn can_fit(&self, quantity: u32) -> bool {
        quantity <= self.cargo_free()
    }

    /// Find a cargo stack by item name.
    pub fn cargo_item(&self, name: &str) -> Option<&ItemStack> {
        self.cargo.iter().find(|stack| stack.name == name)
    }
}

/// The persisted fields of a player, without the ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerRecord {
    /// Unique identifier.
    pub id: PlayerId,
    /// Identity from the login provider.
    pub external_id: String,
    /// Callsign. Empty until onboarding completes.
    pub name: String,
    /// Credit balance; never negative.
    pub credits: i64,
    /// System the player is docked at.
    pub current_system_id: SystemId,
}

/// A consistent copy of a player and their ship.
///
/// Taken while both locks are held. This is the unit the engine persists
/// and pushes to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerSnapshot {
    /// Player fields.
    pub player: PlayerRecord,
    /// The owned ship, absent for draft players.
    pub ship: Option<Ship>,
}

// ---------------------------------------------------------------------------
// Crew and passengers
// ---------------------------------------------------------------------------

/// A spacer available for hire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CrewMember {
    /// Service identifier, e.g. `KP-850212-Z`.
    pub name: String,
    /// Role they are hired for.
    pub role: CrewRole,
    /// Background.
    pub kind: CrewKind,
    /// Skill from 1 to 10.
    pub skill: u8,
    /// Credits per cycle.
    pub salary: i64,
}

/// A passage contract offered at a system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Passenger {
    /// Ticket identifier, e.g. `TRVL-8592-XK`.
    pub name: String,
    /// Kind of contract.
    pub kind: PassengerKind,
    /// Where the passenger boards.
    pub source_system_id: SystemId,
    /// Where the passenger wants to go.
    pub target_system_id: SystemId,
    /// Credits paid on delivery.
    pub fare: i64,
    /// Added to inspection chance while aboard.
    pub inspection_risk: f64,
    /// Added to piracy chance while aboard.
    pub interdiction_risk: f64,
    /// Jumps allowed before the contract fails. Zero means no limit.
    pub time_limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(name: &str, quantity: u32) -> ItemStack {
        ItemStack {
            name: name.to_owned(),
            category: ItemCategory::Raw,
            base_value: 10,
            rarity: 1,
            is_illegal: false,
            quantity,
            avg_cost: 0.0,
        }
    }

    fn ship(cargo_volume: u32, cargo: Vec<ItemStack>) -> Ship {
        Ship {
            id: ShipId::new(),
            name: String::from("Tuned Void Courier"),
            chassis: Chassis::Courier,
            origin: Origin::Void,
            qualifier: Qualifier::Tuned,
            current_hull: 100.0,
            current_shield: 100.0,
            current_fuel: 100.0,
            stats: ShipStats {
                cargo_volume,
                ..ShipStats::default()
            },
            cargo,
        }
    }

    #[test]
    fn cargo_space_accounts_for_all_stacks() {
        let ship = ship(40, vec![stack("Iron Ore", 10), stack("Silk", 5)]);
        assert_eq!(ship.cargo_used(), 15);
        assert_eq!(ship.cargo_free(), 25);
        assert!(ship.can_fit(25));
        assert!(!ship.can_fit(26));
    }

    #[test]
    fn overfull_hold_reports_no_free_space() {
        let ship = ship(5, vec![stack("Iron Ore", 8)]);
        assert_eq!(ship.cargo_free(), 0);
    }

    #[test]
    fn distance_is_euclidean() {
        let d = distance((0, 0), (3, 4));
        assert!((d - 5.0).abs() < f64::EPSILON);
    }
}
