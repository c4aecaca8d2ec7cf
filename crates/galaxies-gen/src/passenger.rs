//! Passage contracts offered at a system.
//!
//! Local conditions bias who is looking for a ride: prisons ship
//! prisoners, overflowing slums produce refugees and rich worlds produce
//! VIPs. Everyone else is drawn from a fixed spread of fugitives,
//! executives, workers and tourists.
//!
//! | Kind     | Fare mult | Inspection | Interdiction | Time limit   |
//! |----------|-----------|------------|--------------|--------------|
//! | Tourist  | 1.0       | 0          | 0            | none         |
//! | Worker   | 0.4       | 0          | 0            | none         |
//! | Business | 2.5       | 0          | 0            | dist/10 + 4  |
//! | VIP      | 10.0      | 0.05       | 0.15         | none         |
//! | Refugee  | 0.1       | 0          | 0            | none         |
//! | Prisoner | 4.0       | 0.2        | 0            | none         |
//! | Fugitive | 25.0      | 0.6        | 0            | dist/10 + 2  |

use galaxies_types::{Passenger, PassengerKind, StarSystem, SystemId, SystemStats, SystemSummary};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::modifiers::{to_count, to_integer};
use crate::names;

/// Credits per unit of distance before multipliers.
pub const BASE_FARE_RATE: f64 = 15.0;
/// Most contracts listed on one board.
pub const MAX_BOARD: u32 = 10;

/// Fare multiplier for a kind of passenger.
pub const fn fare_multiplier(kind: PassengerKind) -> f64 {
    match kind {
        PassengerKind::Tourist => 1.0,
        PassengerKind::Worker => 0.4,
        PassengerKind::Business => 2.5,
        PassengerKind::Vip => 10.0,
        PassengerKind::Refugee => 0.1,
        PassengerKind::Prisoner => 4.0,
        PassengerKind::Fugitive => 25.0,
    }
}

/// Pick a passenger kind from local conditions.
pub fn roll_kind(stats: &SystemStats, rng: &mut impl Rng) -> PassengerKind {
    let roll = rng.random::<f64>();
    if stats.facilities.prison && roll < 0.30 {
        return PassengerKind::Prisoner;
    }
    if stats.slums_density > 2.0 && roll < 0.40 {
        return PassengerKind::Refugee;
    }
    if stats.vip_density > 1.0 && roll < 0.25 {
        return PassengerKind::Vip;
    }

    let roll = rng.random::<f64>();
    if roll < 0.05 {
        PassengerKind::Fugitive
    } else if roll < 0.25 {
        PassengerKind::Business
    } else if roll < 0.60 {
        PassengerKind::Worker
    } else {
        PassengerKind::Tourist
    }
}

/// Generate one passenger travelling from `source` to `target`.
pub fn generate_passenger(
    source: SystemId,
    stats: &SystemStats,
    target: SystemId,
    distance: f64,
    rng: &mut impl Rng,
) -> Passenger {
    let kind = roll_kind(stats, rng);
    let fare = distance * BASE_FARE_RATE * stats.passenger_wealth * fare_multiplier(kind);

    let deadline = |slack: u32| to_count((distance / 10.0).trunc()).saturating_add(slack);
    let (inspection_risk, interdiction_risk, time_limit) = match kind {
        PassengerKind::Business => (0.0, 0.0, deadline(4)),
        PassengerKind::Vip => (0.05, 0.15, 0),
        PassengerKind::Prisoner => (0.2, 0.0, 0),
        PassengerKind::Fugitive => (0.6, 0.0, deadline(2)),
        PassengerKind::Tourist | PassengerKind::Worker | PassengerKind::Refugee => (0.0, 0.0, 0),
    };

    Passenger {
        name: names::passenger_ticket(rng),
        kind,
        source_system_id: source,
        target_system_id: target,
        fare: to_integer(fare.trunc()).max(0),
        inspection_risk,
        interdiction_risk,
        time_limit,
    }
}

/// Contracts on offer at `origin`, each bound for one of `destinations`.
///
/// Empty when nobody is travelling or there is nowhere to go.
pub fn passenger_board(
    origin: &StarSystem,
    destinations: &[SystemSummary],
    rng: &mut impl Rng,
) -> Vec<Passenger> {
    let count = (origin.stats.population.passengers / 20).min(MAX_BOARD);
    (0..count)
        .filter_map(|_| {
            let target = destinations.choose(rng)?;
            Some(generate_passenger(
                origin.id,
                &origin.stats,
                target.id,
                target.distance,
                rng,
            ))
        })
        .collect()
}
