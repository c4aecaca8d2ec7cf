//! Stat blocks derived from archetype tags.
//!
//! A [`SystemStats`] or [`ShipStats`] starts life as a baseline and is then
//! reshaped by the modifier layers in `galaxies-gen`. After the finalize
//! pass the invariants documented on each field hold for every value that
//! leaves the generator.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Star systems
// ---------------------------------------------------------------------------

/// Services available when docked at a star system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[allow(clippy::struct_excessive_bools)]
pub struct Facilities {
    /// New hulls for sale.
    pub shipyard: bool,
    /// Modules and upgrades for sale.
    pub outfitter: bool,
    /// Fuel for sale; required by the refuel operation.
    pub refueling: bool,
    /// Contraband can be traded here.
    pub black_market: bool,
    /// Missions are posted here.
    pub mission_board: bool,
    /// Crew can be hired here.
    pub cantina: bool,
    /// Medical services.
    pub hospital: bool,
    /// Gates the prisoner population.
    pub prison: bool,
    /// Gates the android population.
    pub android_foundry: bool,
    /// Gates the VIP population.
    pub luxury_housing: bool,
    /// Gates the slum population.
    pub slums: bool,
}

impl Facilities {
    /// Facilities present in an unmodified system.
    pub const fn baseline() -> Self {
        Self {
            shipyard: false,
            outfitter: false,
            refueling: true,
            black_market: false,
            mission_board: true,
            cantina: true,
            hospital: false,
            prison: false,
            android_foundry: false,
            luxury_housing: false,
            slums: false,
        }
    }
}

/// Discrete head counts rolled from the densities in [`SystemStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PopulationCounts {
    /// Travellers looking for passage.
    pub passengers: u32,
    /// Spacers available for hire.
    pub crew_pool: u32,
    /// Zero unless the system has luxury housing.
    pub vips: u32,
    /// Zero unless the system has slums.
    pub slum_dwellers: u32,
    /// Zero unless the system has an android foundry.
    pub androids: u32,
    /// Zero unless the system has a prison.
    pub prisoners: u32,
}

/// The full derived stat block of a star system.
///
/// Probabilities are in `[0, 1]`, `market_buy_mult >= 0.1` and
/// `market_sell_mult >= 0.25` once finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SystemStats {
    // --- Prices and fees ---
    /// Multiplier on base value when a player buys.
    pub market_buy_mult: f64,
    /// Multiplier on base value when a player sells.
    pub market_sell_mult: f64,
    /// Multiplier on the fuel base price.
    pub fuel_cost_mult: f64,
    /// Multiplier on repair prices.
    pub repair_cost_mult: f64,
    /// Flat credits charged on docking.
    pub docking_fee: i64,
    /// Sales tax applied on purchases.
    pub tax_rate: f64,

    // --- Black market and risk ---
    /// Black market multiplier when the market buys from a player.
    pub black_market_buy_mult: f64,
    /// Black market multiplier when a player buys.
    pub black_market_sell_mult: f64,
    /// Chance of a pirate encounter on arrival.
    pub piracy_chance: f64,
    /// Chance of a customs inspection on arrival.
    pub inspection_chance: f64,
    /// Multiplier on bribe prices.
    pub bribe_cost_mult: f64,
    /// Multiplier on profit from contraband.
    pub contraband_profit: f64,

    // --- Opportunities ---
    /// Multiplier on mission payouts.
    pub mission_pay_mult: f64,
    /// Multiplier on the number of missions posted.
    pub mission_quantity_mult: f64,
    /// Multiplier on bounty payouts.
    pub bounty_pay_mult: f64,
    /// Multiplier on hull prices.
    pub ship_cost_mult: f64,
    /// Multiplier on module prices.
    pub mod_cost_mult: f64,

    // --- Population ---
    /// Density of travellers.
    pub passenger_density: f64,
    /// Multiplier on passenger fares.
    pub passenger_wealth: f64,
    /// Density of VIPs.
    pub vip_density: f64,
    /// Fare multiplier for VIPs.
    pub vip_wealth: f64,
    /// Density of slum dwellers.
    pub slums_density: f64,
    /// Density of hireable crew.
    pub crew_pool_density: f64,
    /// Density of androids.
    pub android_density: f64,
    /// Density of prisoners.
    pub prisoner_density: f64,
    /// Average crew skill on a 1 to 10 scale.
    pub crew_skill_avg: i64,
    /// Skill of foundry-built androids.
    pub android_skill: i64,
    /// Multiplier on crew salaries.
    pub crew_hiring_cost_mult: f64,
    /// Multiplier on android salaries.
    pub android_cost_mult: f64,
    /// Chance a passenger turns out to be wanted.
    pub wanted_pass_chance: f64,

    /// Available services.
    pub facilities: Facilities,
    /// Rolled head counts.
    pub population: PopulationCounts,
}

impl SystemStats {
    /// The unmodified stat block every system starts from.
    pub const fn baseline() -> Self {
        Self {
            market_buy_mult: 1.1,
            market_sell_mult: 0.9,
            fuel_cost_mult: 1.0,
            repair_cost_mult: 1.0,
            docking_fee: 100,
            tax_rate: 0.05,

            black_market_buy_mult: 1.5,
            black_market_sell_mult: 0.6,
            piracy_chance: 0.05,
            inspection_chance: 0.10,
            bribe_cost_mult: 1.0,
            contraband_profit: 1.0,

            mission_pay_mult: 1.0,
            mission_quantity_mult: 1.0,
            bounty_pay_mult: 1.0,
            ship_cost_mult: 1.0,
            mod_cost_mult: 1.0,

            passenger_density: 1.0,
            passenger_wealth: 1.0,
            vip_density: 0.0,
            vip_wealth: 5.0,
            slums_density: 0.0,
            crew_pool_density: 1.0,
            android_density: 0.0,
            prisoner_density: 0.0,
            crew_skill_avg: 5,
            android_skill: 7,
            crew_hiring_cost_mult: 1.0,
            android_cost_mult: 1.0,
            wanted_pass_chance: 0.0,

            facilities: Facilities::baseline(),
            population: PopulationCounts {
                passengers: 0,
                crew_pool: 0,
                vips: 0,
                slum_dwellers: 0,
                androids: 0,
                prisoners: 0,
            },
        }
    }
}

impl Default for SystemStats {
    fn default() -> Self {
        Self::baseline()
    }
}

// ---------------------------------------------------------------------------
// Ships
// ---------------------------------------------------------------------------

/// The full derived stat block of a ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ShipStats {
    /// Maximum hull points.
    pub max_hull: f64,
    /// Maximum shield points.
    pub max_shield: f64,
    /// Shield points regenerated per turn.
    pub shield_regen: f64,
    /// Chance to avoid detection, in `[0, 1]`.
    pub stealth_rating: f64,
    /// Cargo units the hold can carry.
    pub cargo_volume: u32,
    /// Fuel tank capacity.
    pub max_fuel: f64,
    /// Longest single warp, in light years.
    pub jump_range: f64,
    /// Fuel burned per light year.
    pub fuel_efficiency: f64,
    /// Weapon slots.
    pub high_slots: u32,
    /// Utility slots.
    pub mid_slots: u32,
    /// Engineering slots.
    pub low_slots: u32,
    /// Power available to modules.
    pub power_grid: u32,
    /// Bunks for hired crew.
    pub crew_bunks: u32,
    /// Cabins for paying passengers.
    pub passenger_cabins: u32,
    /// Weapon hit chance, in `[0, 1]`.
    pub base_accuracy: f64,
    /// Multiplier on weapon damage.
    pub damage_bonus: f64,
    /// Market value in credits.
    pub cost: i64,
}

impl Default for ShipStats {
    fn default() -> Self {
        Self {
            max_hull: 0.0,
            max_shield: 0.0,
            shield_regen: 0.0,
            stealth_rating: 0.0,
            cargo_volume: 0,
            max_fuel: 0.0,
            jump_range: 0.0,
            fuel_efficiency: 1.0,
            high_slots: 0,
            mid_slots: 0,
            low_slots: 0,
            power_grid: 0,
            crew_bunks: 0,
            passenger_cabins: 0,
            base_accuracy: 0.8,
            damage_bonus: 1.0,
            cost: 0,
        }
    }
}
