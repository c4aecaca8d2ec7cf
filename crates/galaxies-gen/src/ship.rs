//! Ship generation.
//!
//! A ship is built in three steps:
//!
//! 1. **Chassis** rolls a baseline, each field drawn uniformly from the
//!    chassis range (the only randomness in the pipeline).
//! 2. **Origin** applies its modifier layer.
//! 3. **Qualifier** applies its modifier layer.
//!
//! The finalize pass then clamps ratings and prices the hull. A new ship
//! always leaves the yard with full hull, shields and tanks.

use galaxies_types::{Chassis, Origin, Qualifier, Ship, ShipId, ShipStats};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::GenError;
use crate::finalize::finalize_ship;
use crate::modifiers::apply_archetype;
use crate::system::decode;

/// The three archetype tags of a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipTags {
    /// Hull class.
    pub chassis: Chassis,
    /// Builder.
    pub origin: Origin,
    /// Condition.
    pub qualifier: Qualifier,
}

impl ShipTags {
    /// Draw each tag uniformly and independently.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            chassis: random_chassis(rng),
            origin: random_origin(rng),
            qualifier: random_qualifier(rng),
        }
    }

    /// Fix the chassis and draw the rest.
    pub fn with_chassis(chassis: Chassis, rng: &mut impl Rng) -> Self {
        Self {
            chassis,
            origin: random_origin(rng),
            qualifier: random_qualifier(rng),
        }
    }

    /// Decode stored ordinals.
    pub fn from_ordinals(chassis: i64, origin: i64, qualifier: i64) -> Result<Self, GenError> {
        Ok(Self {
            chassis: decode(chassis, Chassis::from_ordinal, Chassis::DIMENSION)?,
            origin: decode(origin, Origin::from_ordinal, Origin::DIMENSION)?,
            qualifier: decode(qualifier, Qualifier::from_ordinal, Qualifier::DIMENSION)?,
        })
    }

    /// Model name, e.g. "Rusty Outer Rim Hauler".
    pub fn model_name(&self) -> String {
        format!("{} {} {}", self.qualifier, self.origin, self.chassis)
    }
}

fn random_chassis(rng: &mut impl Rng) -> Chassis {
    Chassis::ALL.choose(rng).copied().unwrap_or(Chassis::Hauler)
}

fn random_origin(rng: &mut impl Rng) -> Origin {
    Origin::ALL.choose(rng).copied().unwrap_or(Origin::Industrial)
}

fn random_qualifier(rng: &mut impl Rng) -> Qualifier {
    Qualifier::ALL.choose(rng).copied().unwrap_or(Qualifier::Surplus)
}

// ---------------------------------------------------------------------------
// Chassis baselines
// ---------------------------------------------------------------------------

/// Roll ranges for one chassis. Ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChassisProfile {
    /// Hull points.
    pub hull: (f64, f64),
    /// Shield points.
    pub shield: (f64, f64),
    /// Shield regeneration.
    pub regen: (f64, f64),
    /// Stealth rating.
    pub stealth: (f64, f64),
    /// Cargo units.
    pub cargo: (u32, u32),
    /// Fuel capacity.
    pub fuel: (f64, f64),
    /// Jump range.
    pub jump: (f64, f64),
    /// Power grid.
    pub power: (u32, u32),
    /// High, mid and low slots.
    pub slots: (u32, u32, u32),
    /// Crew bunks.
    pub bunks: u32,
    /// Passenger cabins.
    pub cabins: u32,
}

impl ChassisProfile {
    /// Roll ranges for `chassis`.
    pub const fn of(chassis: Chassis) -> Self {
        match chassis {
            Chassis::Interceptor => Self {
                hull: (550.0, 650.0),
                shield: (350.0, 450.0),
                regen: (2.0, 3.0),
                stealth: (0.25, 0.35),
                cargo: (15, 25),
                fuel: (180.0, 220.0),
                jump: (14.0, 16.0),
                power: (140, 160),
                slots: (3, 1, 1),
                bunks: 1,
                cabins: 0,
            },
            Chassis::Hauler => Self {
                hull: (1400.0, 1600.0),
                shield: (750.0, 850.0),
                regen: (1.0, 1.5),
                stealth: (0.0, 0.0),
                cargo: (750, 850),
                fuel: (750.0, 850.0),
                jump: (22.0, 28.0),
                power: (280, 320),
                slots: (0, 2, 4),
                bunks: 3,
                cabins: 2,
            },
            Chassis::Yacht => Self {
                hull: (380.0, 420.0),
                shield: (550.0, 650.0),
                regen: (1.5, 2.5),
                stealth: (0.05, 0.15),
                cargo: (40, 60),
                fuel: (280.0, 320.0),
                jump: (28.0, 32.0),
                power: (190, 210),
                slots: (1, 3, 2),
                bunks: 2,
                cabins: 6,
            },
            Chassis::Corvette => Self {
                hull: (1100.0, 1300.0),
                shield: (900.0, 1100.0),
                regen: (3.0, 4.0),
                stealth: (0.05, 0.15),
                cargo: (90, 110),
                fuel: (380.0, 420.0),
                jump: (18.0, 22.0),
                power: (430, 470),
                slots: (3, 3, 2),
                bunks: 4,
                cabins: 0,
            },
            Chassis::Prospector => Self {
                hull: (950.0, 1050.0),
                shield: (450.0, 550.0),
                regen: (1.0, 1.5),
                stealth: (0.15, 0.25),
                cargo: (280, 320),
                fuel: (480.0, 520.0),
                jump: (18.0, 22.0),
                power: (330, 370),
                slots: (2, 2, 3),
                bunks: 2,
                cabins: 0,
            },
            Chassis::Courier => Self {
                hull: (180.0, 220.0),
                shield: (180.0, 220.0),
                regen: (4.0, 5.0),
                stealth: (0.45, 0.55),
                cargo: (35, 45),
                fuel: (140.0, 160.0),
                jump: (32.0, 38.0),
                power: (110, 130),
                slots: (1, 1, 3),
                bunks: 1,
                cabins: 1,
            },
            Chassis::Barge => Self {
                hull: (2800.0, 3200.0),
                shield: (450.0, 550.0),
                regen: (0.5, 0.8),
                stealth: (0.0, 0.0),
                cargo: (2400, 2600),
                fuel: (950.0, 1050.0),
                jump: (8.0, 12.0),
                power: (380, 420),
                slots: (1, 1, 5),
                bunks: 5,
                cabins: 0,
            },
            Chassis::Gunship => Self {
                hull: (1900.0, 2100.0),
                shield: (750.0, 850.0),
                regen: (2.0, 2.5),
                stealth: (0.0, 0.0),
                cargo: (70, 90),
                fuel: (280.0, 320.0),
                jump: (10.0, 14.0),
                power: (580, 620),
                slots: (5, 2, 2),
                bunks: 3,
                cabins: 0,
            },
        }
    }

    /// Roll a baseline stat block inside these ranges.
    pub fn roll(&self, rng: &mut impl Rng) -> ShipStats {
        ShipStats {
            max_hull: roll_real(rng, self.hull),
            max_shield: roll_real(rng, self.shield),
            shield_regen: roll_real(rng, self.regen),
            stealth_rating: roll_real(rng, self.stealth),
            cargo_volume: roll_count(rng, self.cargo),
            max_fuel: roll_real(rng, self.fuel),
            jump_range: roll_real(rng, self.jump),
            power_grid: roll_count(rng, self.power),
            high_slots: self.slots.0,
            mid_slots: self.slots.1,
            low_slots: self.slots.2,
            crew_bunks: self.bunks,
            passenger_cabins: self.cabins,
            ..ShipStats::default()
        }
    }
}

fn roll_real(rng: &mut impl Rng, (min, max): (f64, f64)) -> f64 {
    if min < max {
        rng.random_range(min..=max)
    } else {
        min
    }
}

fn roll_count(rng: &mut impl Rng, (min, max): (u32, u32)) -> u32 {
    if min < max {
        rng.random_range(min..=max)
    } else {
        min
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Compose and finalize a ship stat block from a rolled baseline.
pub fn compose_ship_stats(
    baseline: ShipStats,
    origin: Origin,
    qualifier: Qualifier,
) -> Result<ShipStats, GenError> {
    let mut stats = baseline;
    apply_archetype(&mut stats, origin)?;
    apply_archetype(&mut stats, qualifier)?;
    finalize_ship(&mut stats)?;
    Ok(stats)
}

/// Generate a ship with the given tags.
pub fn generate_ship(rng: &mut impl Rng, tags: ShipTags) -> Result<Ship, GenError> {
    let baseline = ChassisProfile::of(tags.chassis).roll(rng);
    let stats = compose_ship_stats(baseline, tags.origin, tags.qualifier)?;

    Ok(Ship {
        id: ShipId::new(),
        name: tags.model_name(),
        chassis: tags.chassis,
        origin: tags.origin,
        qualifier: tags.qualifier,
        current_hull: stats.max_hull,
        current_shield: stats.max_shield,
        current_fuel: stats.max_fuel,
        stats,
        cargo: Vec::new(),
    })
}

/// Generate a ship with every tag drawn at random.
pub fn generate_random_ship(rng: &mut impl Rng) -> Result<Ship, GenError> {
    let tags = ShipTags::random(rng);
    generate_ship(rng, tags)
}

/// Chassis offered to a new captain.
pub const STARTER_CHASSIS: [Chassis; 3] = [Chassis::Interceptor, Chassis::Courier, Chassis::Prospector];

/// One ship per starter chassis with a random origin and qualifier.
pub fn starter_ships(rng: &mut impl Rng) -> Result<Vec<Ship>, GenError> {
    STARTER_CHASSIS
        .iter()
        .map(|&chassis| {
            let tags = ShipTags::with_chassis(chassis, rng);
            generate_ship(rng, tags)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn new_ships_are_fully_stocked() {
        let mut rng = SmallRng::seed_from_u64(42);
        for &chassis in Chassis::ALL {
            for &origin in Origin::ALL {
                for &qualifier in Qualifier::ALL {
                    let tags = ShipTags {
                        chassis,
                        origin,
                        qualifier,
                    };
                    let Ok(ship) = generate_ship(&mut rng, tags) else {
                        panic!("generation failed for {}", tags.model_name());
                    };
                    assert!((ship.current_hull - ship.stats.max_hull).abs() < f64::EPSILON);
                    assert!((ship.current_shield - ship.stats.max_shield).abs() < f64::EPSILON);
                    assert!((ship.current_fuel - ship.stats.max_fuel).abs() < f64::EPSILON);
                    assert!((0.0..=1.0).contains(&ship.stats.stealth_rating));
                    assert!(ship.stats.cost > 0);
                    assert!(ship.cargo.is_empty());
                }
            }
        }
    }

    #[test]
    fn model_name_reads_qualifier_origin_chassis() {
        let tags = ShipTags {
            chassis: Chassis::Hauler,
            origin: Origin::OuterRim,
            qualifier: Qualifier::Rusty,
        };
        assert_eq!(tags.model_name(), "Rusty Outer Rim Hauler");
    }

    #[test]
    fn baseline_roll_stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(9);
        let profile = ChassisProfile::of(Chassis::Courier);
        for _ in 0..100 {
            let stats = profile.roll(&mut rng);
            assert!((180.0..=220.0).contains(&stats.max_hull));
            assert!((35..=45).contains(&stats.cargo_volume));
            assert_eq!(stats.low_slots, 3);
        }
    }

    #[test]
    fn layers_apply_origin_then_qualifier() {
        let baseline = ShipStats {
            max_hull: 1000.0,
            max_fuel: 100.0,
            ..ShipStats::default()
        };
        // Imperial 1.2, then Rusty 0.7.
        let stats = compose_ship_stats(baseline, Origin::Imperial, Qualifier::Rusty);
        let hull = stats.map(|s| s.max_hull).ok();
        assert_eq!(hull.map(|h| (h - 840.0).abs() < 1e-9), Some(true));
    }

    #[test]
    fn same_seed_same_ship_stats() {
        let tags = ShipTags {
            chassis: Chassis::Gunship,
            origin: Origin::Void,
            qualifier: Qualifier::Tuned,
        };
        let a = generate_ship(&mut SmallRng::seed_from_u64(5), tags).map(|s| s.stats);
        let b = generate_ship(&mut SmallRng::seed_from_u64(5), tags).map(|s| s.stats);
        assert_eq!(a.ok(), b.ok());
    }

    #[test]
    fn starter_ships_cover_the_starter_chassis() {
        let mut rng = SmallRng::seed_from_u64(11);
        let ships = starter_ships(&mut rng).unwrap_or_default();
        let chassis: Vec<Chassis> = ships.iter().map(|s| s.chassis).collect();
        assert_eq!(chassis, STARTER_CHASSIS.to_vec());
    }

    #[test]
    fn bad_ordinal_is_rejected() {
        assert!(matches!(
            ShipTags::from_ordinals(8, 0, 0),
            Err(GenError::Configuration {
                dimension: "chassis",
                value: 8
            })
        ));
    }
}
