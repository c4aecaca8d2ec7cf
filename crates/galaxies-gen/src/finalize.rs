//! Finalize passes run after the last modifier layer.
//!
//! The bounds are themselves expressed as clamp edits and run through the
//! same engine as the archetype layers. Cross-field corrections that need
//! to read one field to decide another are applied in code afterwards.

use galaxies_types::{ShipStats, SystemStats};

use crate::error::GenError;
use crate::modifiers::{Edit, ShipField, SystemField, apply_layer, to_integer};

/// Lowest buy multiplier a finalized system may carry.
pub const MIN_BUY_MULT: f64 = 0.1;

/// Lowest sell multiplier a finalized system may carry.
pub const MIN_SELL_MULT: f64 = 0.25;

/// Lowest fuel efficiency a finalized ship may carry.
pub const MIN_FUEL_EFFICIENCY: f64 = 0.1;

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

fn system_bounds() -> Vec<Edit<SystemField>> {
    use SystemField as F;
    vec![
        Edit::clamp(F::TaxRate, 0.0, f64::INFINITY),
        Edit::clamp(F::PiracyChance, 0.0, 1.0),
        Edit::clamp(F::InspectionChance, 0.0, 1.0),
        Edit::clamp(F::WantedPassChance, 0.0, 1.0),
        Edit::clamp(F::MarketBuyMult, MIN_BUY_MULT, f64::INFINITY),
        Edit::clamp(F::MarketSellMult, MIN_SELL_MULT, f64::INFINITY),
        Edit::clamp(F::DockingFee, 0.0, f64::INFINITY),
        Edit::clamp(F::PassengerDensity, 0.0, f64::INFINITY),
        Edit::clamp(F::VipDensity, 0.0, f64::INFINITY),
        Edit::clamp(F::SlumsDensity, 0.0, f64::INFINITY),
        Edit::clamp(F::CrewPoolDensity, 0.0, f64::INFINITY),
        Edit::clamp(F::AndroidDensity, 0.0, f64::INFINITY),
        Edit::clamp(F::PrisonerDensity, 0.0, f64::INFINITY),
        Edit::clamp(F::CrewSkillAvg, 1.0, 10.0),
        Edit::clamp(F::AndroidSkill, 1.0, 10.0),
    ]
}

/// Bring a composed system stat block within its invariants.
pub fn finalize_system(stats: &mut SystemStats) -> Result<(), GenError> {
    apply_layer(stats, &system_bounds())?;

    // Nobody travelling means nobody rich, poor or wanted either.
    if stats.passenger_density <= 0.0 {
        stats.vip_density = 0.0;
        stats.slums_density = 0.0;
        stats.wanted_pass_chance = 0.0;
    }

    // Saturated customs: high risk, low payout.
    if stats.inspection_chance >= 1.0 {
        stats.black_market_buy_mult *= 0.5;
    }

    enforce_facility_gates(stats);
    Ok(())
}

/// Zero every population count whose facility is missing.
pub const fn enforce_facility_gates(stats: &mut SystemStats) {
    if !stats.facilities.luxury_housing {
        stats.population.vips = 0;
    }
    if !stats.facilities.slums {
        stats.population.slum_dwellers = 0;
    }
    if !stats.facilities.android_foundry {
        stats.population.androids = 0;
    }
    if !stats.facilities.prison {
        stats.population.prisoners = 0;
    }
}

// ---------------------------------------------------------------------------
// Ships
// ---------------------------------------------------------------------------

fn ship_bounds() -> Vec<Edit<ShipField>> {
    use ShipField as F;
    vec![
        Edit::clamp(F::StealthRating, 0.0, 1.0),
        Edit::clamp(F::BaseAccuracy, 0.0, 1.0),
        Edit::clamp(F::FuelEfficiency, MIN_FUEL_EFFICIENCY, f64::INFINITY),
        Edit::clamp(F::MaxHull, 1.0, f64::INFINITY),
        Edit::clamp(F::MaxShield, 0.0, f64::INFINITY),
        Edit::clamp(F::ShieldRegen, 0.0, f64::INFINITY),
        Edit::clamp(F::MaxFuel, 1.0, f64::INFINITY),
        Edit::clamp(F::JumpRange, 0.0, f64::INFINITY),
        Edit::clamp(F::DamageBonus, 0.0, f64::INFINITY),
    ]
}

/// Bring a composed ship stat block within its invariants and price it.
pub fn finalize_ship(stats: &mut ShipStats) -> Result<(), GenError> {
    apply_layer(stats, &ship_bounds())?;
    stats.cost = ship_cost(stats);
    Ok(())
}

/// Market value of a hull: a weighted sum over its capabilities.
pub fn ship_cost(stats: &ShipStats) -> i64 {
    let mut cost = 0.0;
    cost += stats.max_hull * 10.0;
    cost += stats.max_shield * 15.0;
    cost += stats.shield_regen * 500.0;
    cost += f64::from(stats.cargo_volume) * 50.0;
    cost += stats.max_fuel * 5.0;
    cost += stats.jump_range * 200.0;
    cost += f64::from(stats.power_grid) * 20.0;

    if stats.fuel_efficiency < 1.0 {
        cost += (1.0 - stats.fuel_efficiency) * 5000.0;
    }

    cost += f64::from(stats.high_slots) * 5000.0;
    cost += f64::from(stats.mid_slots) * 3000.0;
    cost += f64::from(stats.low_slots) * 2000.0;
    cost += f64::from(stats.passenger_cabins) * 1000.0;
    cost += f64::from(stats.crew_bunks) * 500.0;

    if stats.stealth_rating > 0.0 {
        cost += stats.stealth_rating * 15000.0;
    }

    cost += stats.base_accuracy * 1000.0;
    cost += stats.damage_bonus * 1000.0;

    to_integer(cost.trunc())
}
