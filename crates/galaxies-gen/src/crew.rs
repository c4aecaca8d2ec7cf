//! Crew for hire at a system's cantina.
//!
//! The local facilities decide who turns up: foundry worlds turn out
//! androids, prison worlds release convicts on work contracts. Skill
//! centres on the system's average and salary scales with skill, role and
//! the local hiring market.

use galaxies_types::{CrewKind, CrewMember, CrewRole, SystemStats};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::modifiers::to_integer;
use crate::names;

/// Chance that a foundry or prison supplies the recruit.
pub const SPECIAL_RECRUIT_CHANCE: f64 = 0.3;
/// Salary per skill point before multipliers.
pub const BASE_SALARY: f64 = 100.0;
/// Most recruits listed in one cantina.
pub const MAX_ROSTER: u32 = 8;

const SKILL_SPREAD: i64 = 2;

/// Salary multiplier for a role.
pub const fn role_multiplier(role: CrewRole) -> f64 {
    match role {
        CrewRole::FirstOfficer => 2.0,
        CrewRole::Engineer | CrewRole::Navigator => 1.5,
        CrewRole::WeaponsOfficer | CrewRole::Steward | CrewRole::Specialist => 1.0,
    }
}

fn roll_kind(stats: &SystemStats, rng: &mut impl Rng) -> CrewKind {
    if stats.facilities.android_foundry && rng.random::<f64>() < SPECIAL_RECRUIT_CHANCE {
        CrewKind::Android
    } else if stats.facilities.prison && rng.random::<f64>() < SPECIAL_RECRUIT_CHANCE {
        CrewKind::Convict
    } else {
        CrewKind::Standard
    }
}

/// Generate one recruit for `role` from the local pool.
pub fn generate_crew(role: CrewRole, stats: &SystemStats, rng: &mut impl Rng) -> CrewMember {
    let kind = roll_kind(stats, rng);

    let centre = match kind {
        CrewKind::Android => stats.android_skill,
        CrewKind::Standard | CrewKind::Convict => stats.crew_skill_avg,
    };
    let skill = centre
        .saturating_add(rng.random_range(-SKILL_SPREAD..=SKILL_SPREAD))
        .clamp(1, 10);
    let skill = u8::try_from(skill).unwrap_or(1);

    let mut salary = BASE_SALARY * f64::from(skill) * role_multiplier(role) * stats.crew_hiring_cost_mult;
    match kind {
        CrewKind::Android => salary *= 2.0 * stats.android_cost_mult,
        CrewKind::Convict => salary *= 0.2,
        CrewKind::Standard => {}
    }

    CrewMember {
        name: names::crew_name(rng),
        role,
        kind,
        skill,
        salary: to_integer(salary.trunc()).max(0),
    }
}

/// Everyone currently looking for work at a system.
///
/// Empty without a cantina. The listing is capped at [`MAX_ROSTER`] and
/// by the system's crew pool.
pub fn crew_roster(stats: &SystemStats, rng: &mut impl Rng) -> Vec<CrewMember> {
    if !stats.facilities.cantina {
        return Vec::new();
    }
    let count = stats.population.crew_pool.min(MAX_ROSTER);
    (0..count)
        .map(|_| {
            let role = CrewRole::ALL.choose(rng).copied().unwrap_or(CrewRole::Specialist);
            generate_crew(role, stats, rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn skill_stays_in_bounds() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut stats = SystemStats::baseline();
        for avg in [-5, 1, 5, 10, 40] {
            stats.crew_skill_avg = avg;
            for _ in 0..50 {
                let crew = generate_crew(CrewRole::Engineer, &stats, &mut rng);
                assert!((1..=10).contains(&crew.skill));
                assert!(crew.salary > 0);
            }
        }
    }

    #[test]
    fn baseline_system_hires_standard_crew() {
        let mut rng = SmallRng::seed_from_u64(2);
        let stats = SystemStats::baseline();
        for _ in 0..50 {
            let crew = generate_crew(CrewRole::Steward, &stats, &mut rng);
            assert_eq!(crew.kind, CrewKind::Standard);
            assert!((3..=7).contains(&crew.skill));
            assert_eq!(crew.salary, 100 * i64::from(crew.skill));
        }
    }

    #[test]
    fn first_officer_earns_double() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut stats = SystemStats::baseline();
        stats.crew_skill_avg = 5;
        let crew = generate_crew(CrewRole::FirstOfficer, &stats, &mut rng);
        assert_eq!(crew.salary, 200 * i64::from(crew.skill));
    }

    #[test]
    fn no_cantina_no_roster() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut stats = SystemStats::baseline();
        stats.population.crew_pool = 10;
        assert_eq!(crew_roster(&stats, &mut rng).len(), 8);
        stats.facilities.cantina = false;
        assert!(crew_roster(&stats, &mut rng).is_empty());
    }
}
