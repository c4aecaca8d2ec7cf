//! Rolls discrete head counts from a finalized system's densities.
//!
//! Each count is `round(uniform(min..=max) * density)`, zero when the
//! density is not positive, and forced to zero when the facility that
//! houses that population is missing.

use galaxies_types::{PopulationCounts, SystemStats};
use rand::Rng;

use crate::finalize::enforce_facility_gates;
use crate::modifiers::to_count;

/// Base range for travellers.
pub const PASSENGER_RANGE: (u32, u32) = (50, 200);
/// Base range for hireable crew.
pub const CREW_RANGE: (u32, u32) = (3, 12);
/// Base range for VIPs.
pub const VIP_RANGE: (u32, u32) = (5, 20);
/// Base range for slum dwellers.
pub const SLUM_RANGE: (u32, u32) = (100, 500);
/// Base range for androids.
pub const ANDROID_RANGE: (u32, u32) = (5, 30);
/// Base range for prisoners.
pub const PRISONER_RANGE: (u32, u32) = (20, 100);

/// Roll every population count and store it on `stats`.
pub fn populate(stats: &mut SystemStats, rng: &mut impl Rng) {
    stats.population = PopulationCounts {
        passengers: roll_count(rng, PASSENGER_RANGE, stats.passenger_density),
        crew_pool: roll_count(rng, CREW_RANGE, stats.crew_pool_density),
        vips: roll_count(rng, VIP_RANGE, stats.vip_density),
        slum_dwellers: roll_count(rng, SLUM_RANGE, stats.slums_density),
        androids: roll_count(rng, ANDROID_RANGE, stats.android_density),
        prisoners: roll_count(rng, PRISONER_RANGE, stats.prisoner_density),
    };
    enforce_facility_gates(stats);
}

/// `round(uniform(min..=max) * density)`, or zero for a non-positive density.
pub fn roll_count(rng: &mut impl Rng, (min, max): (u32, u32), density: f64) -> u32 {
    if density <= 0.0 || min > max {
        return 0;
    }
    let base = rng.random_range(min..=max);
    to_count(f64::from(base) * density)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn zero_density_rolls_nothing() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(roll_count(&mut rng, PASSENGER_RANGE, 0.0), 0);
        assert_eq!(roll_count(&mut rng, PASSENGER_RANGE, -2.0), 0);
    }

    #[test]
    fn counts_scale_with_density() {
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..50 {
            let n = roll_count(&mut rng, CREW_RANGE, 2.0);
            assert!((6..=24).contains(&n));
        }
    }

    #[test]
    fn density_without_facility_stays_empty() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut stats = SystemStats {
            vip_density: 3.0,
            android_density: 2.0,
            ..SystemStats::baseline()
        };
        populate(&mut stats, &mut rng);
        assert_eq!(stats.population.vips, 0);
        assert_eq!(stats.population.androids, 0);
        assert!(stats.population.passengers >= 50);
    }

    #[test]
    fn facility_lets_population_through() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut stats = SystemStats {
            prisoner_density: 1.0,
            ..SystemStats::baseline()
        };
        stats.facilities.prison = true;
        populate(&mut stats, &mut rng);
        assert!((20..=100).contains(&stats.population.prisoners));
    }
}
