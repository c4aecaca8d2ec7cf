//! Star system generation.
//!
//! Stats are composed as baseline, then the political layer, then the
//! economic layer, then the social layer, then finalize. Population counts
//! and the opening market are rolled from the finalized stats.

use galaxies_types::{
    EconomicStatus, PoliticalStatus, SocialStatus, StarSystem, SystemId, SystemStats,
};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::GenError;
use crate::finalize::finalize_system;
use crate::modifiers::apply_archetype;
use crate::{market, names, population};

/// The three archetype tags of a star system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemTags {
    /// Political archetype.
    pub political: PoliticalStatus,
    /// Economic archetype.
    pub economic: EconomicStatus,
    /// Social archetype.
    pub social: SocialStatus,
}

impl SystemTags {
    /// Draw each tag uniformly and independently.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            political: PoliticalStatus::ALL
                .choose(rng)
                .copied()
                .unwrap_or(PoliticalStatus::ImperialCore),
            economic: EconomicStatus::ALL
                .choose(rng)
                .copied()
                .unwrap_or(EconomicStatus::PostScarcity),
            social: SocialStatus::ALL
                .choose(rng)
                .copied()
                .unwrap_or(SocialStatus::Cosmopolitan),
        }
    }

    /// Decode stored ordinals.
    pub fn from_ordinals(political: i64, economic: i64, social: i64) -> Result<Self, GenError> {
        Ok(Self {
            political: decode(political, PoliticalStatus::from_ordinal, PoliticalStatus::DIMENSION)?,
            economic: decode(economic, EconomicStatus::from_ordinal, EconomicStatus::DIMENSION)?,
            social: decode(social, SocialStatus::from_ordinal, SocialStatus::DIMENSION)?,
        })
    }

    /// Tags of an existing system.
    pub const fn of(system: &StarSystem) -> Self {
        Self {
            political: system.political,
            economic: system.economic,
            social: system.social,
        }
    }
}

/// Decode one ordinal, reporting the dimension on failure.
pub(crate) fn decode<T>(
    value: i64,
    from_ordinal: impl FnOnce(i64) -> Option<T>,
    dimension: &'static str,
) -> Result<T, GenError> {
    from_ordinal(value).ok_or(GenError::Configuration { dimension, value })
}

/// Compose and finalize the stat block for a tag combination.
///
/// Deterministic: no randomness is drawn. Population counts are left at
/// zero; see [`population::populate`].
pub fn compose_system_stats(tags: &SystemTags) -> Result<SystemStats, GenError> {
    let mut stats = SystemStats::baseline();
    apply_archetype(&mut stats, tags.political)?;
    apply_archetype(&mut stats, tags.economic)?;
    apply_archetype(&mut stats, tags.social)?;
    finalize_system(&mut stats)?;
    Ok(stats)
}

/// Generate a complete star system at a position.
pub fn generate_system(
    rng: &mut impl Rng,
    position: (i32, i32),
    tags: SystemTags,
) -> Result<StarSystem, GenError> {
    let mut stats = compose_system_stats(&tags)?;
    population::populate(&mut stats, rng);
    let market = market::stock_market(&tags, rng);

    Ok(StarSystem {
        id: SystemId::new(),
        name: names::system_name(rng),
        x: position.0,
        y: position.1,
        political: tags.political,
        economic: tags.economic,
        social: tags.social,
        stats,
        market,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finalize::{MIN_BUY_MULT, MIN_SELL_MULT};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn tags(political: PoliticalStatus, economic: EconomicStatus, social: SocialStatus) -> SystemTags {
        SystemTags {
            political,
            economic,
            social,
        }
    }

    #[test]
    fn every_combination_satisfies_invariants() {
        for &p in PoliticalStatus::ALL {
            for &e in EconomicStatus::ALL {
                for &s in SocialStatus::ALL {
                    let stats = compose_system_stats(&tags(p, e, s));
                    assert!(stats.is_ok(), "{p} / {e} / {s}");
                    let Ok(stats) = stats else { continue };
                    assert!((0.0..=1.0).contains(&stats.piracy_chance));
                    assert!((0.0..=1.0).contains(&stats.inspection_chance));
                    assert!(stats.market_buy_mult >= MIN_BUY_MULT);
                    assert!(stats.market_sell_mult >= MIN_SELL_MULT);
                    assert!(stats.tax_rate >= 0.0);
                }
            }
        }
    }

    #[test]
    fn layer_order_is_political_economic_social() {
        // (1.0 * 0.5 + 1.0) * 4.0: martial law, then depression, then
        // the refugee crisis.
        let stats = compose_system_stats(&tags(
            PoliticalStatus::MartialLaw,
            EconomicStatus::Depression,
            SocialStatus::RefugeeCrisis,
        ));
        let density = stats.map(|s| s.passenger_density).ok();
        assert_eq!(density.map(|d| (d - 6.0).abs() < 1e-9), Some(true));
    }

    #[test]
    fn ghost_town_market_floor() {
        let stats = compose_system_stats(&tags(
            PoliticalStatus::PuppetState,
            EconomicStatus::CommandEconomy,
            SocialStatus::GhostTown,
        ));
        let buy = stats.map(|s| s.market_buy_mult).ok();
        assert_eq!(buy.map(|b| (b - MIN_BUY_MULT).abs() < 1e-9), Some(true));
    }

    #[test]
    fn out_of_range_ordinal_is_configuration_error() {
        let result = SystemTags::from_ordinals(0, 25, 3);
        assert_eq!(
            result,
            Err(GenError::Configuration {
                dimension: "economic",
                value: 25
            })
        );
        assert!(SystemTags::from_ordinals(19, 19, 19).is_ok());
    }

    #[test]
    fn composition_is_deterministic() {
        let t = tags(
            PoliticalStatus::PirateHaven,
            EconomicStatus::GoldRush,
            SocialStatus::Slum,
        );
        assert_eq!(compose_system_stats(&t).ok(), compose_system_stats(&t).ok());
    }

    #[test]
    fn generated_system_keeps_position_and_tags() {
        let mut rng = SmallRng::seed_from_u64(42);
        let t = tags(
            PoliticalStatus::FederationOutpost,
            EconomicStatus::RefuelingDepot,
            SocialStatus::Cosmopolitan,
        );
        let system = generate_system(&mut rng, (12, -40), t);
        assert!(system.is_ok());
        let Ok(system) = system else { return };
        assert_eq!((system.x, system.y), (12, -40));
        assert_eq!(SystemTags::of(&system), t);
        assert!(system.stats.facilities.refueling);
        assert!(!system.market.is_empty());
    }
}
