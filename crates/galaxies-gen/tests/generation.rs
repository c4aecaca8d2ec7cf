//! End-to-end generation properties.
//!
//! These run the full pipeline from a seed: placement, system composition,
//! population, markets and ships.

#![allow(clippy::unwrap_used)]

use galaxies_gen::finalize::{MIN_BUY_MULT, MIN_SELL_MULT};
use galaxies_gen::{
    ShipTags, UniverseBounds, crew_roster, generate_ship, generate_universe, passenger_board,
    systems_in_range,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bounds() -> UniverseBounds {
    UniverseBounds {
        min_x: -200,
        max_x: 200,
        min_y: -200,
        max_y: 200,
        system_count: 60,
        min_distance: 15.0,
    }
}

#[test]
fn universe_satisfies_stat_invariants() {
    let mut rng = StdRng::seed_from_u64(2024);
    let systems = generate_universe(&bounds(), &mut rng).unwrap();
    assert_eq!(systems.len(), 60);

    for system in &systems {
        let s = &system.stats;
        assert!((0.0..=1.0).contains(&s.piracy_chance), "{}", system.name);
        assert!((0.0..=1.0).contains(&s.inspection_chance), "{}", system.name);
        assert!(s.market_buy_mult >= MIN_BUY_MULT);
        assert!(s.market_sell_mult >= MIN_SELL_MULT);

        let f = &s.facilities;
        let p = &s.population;
        assert!(f.luxury_housing || p.vips == 0);
        assert!(f.slums || p.slum_dwellers == 0);
        assert!(f.android_foundry || p.androids == 0);
        assert!(f.prison || p.prisoners == 0);

        assert!(system.market.iter().all(|item| item.quantity >= 1));
    }
}

#[test]
fn universe_respects_min_distance() {
    let mut rng = StdRng::seed_from_u64(7);
    let systems = generate_universe(&bounds(), &mut rng).unwrap();
    for a in &systems {
        for b in systems.iter().filter(|b| b.id != a.id) {
            assert!(a.distance_to(b) >= 15.0);
        }
    }
}

#[test]
fn same_seed_same_universe_layout() {
    let a = generate_universe(&bounds(), &mut StdRng::seed_from_u64(99)).unwrap();
    let b = generate_universe(&bounds(), &mut StdRng::seed_from_u64(99)).unwrap();

    let layout = |systems: &[galaxies_types::StarSystem]| {
        systems
            .iter()
            .map(|s| (s.name.clone(), s.x, s.y, s.political, s.economic, s.social))
            .collect::<Vec<_>>()
    };
    assert_eq!(layout(&a), layout(&b));

    let markets = |systems: &[galaxies_types::StarSystem]| {
        systems
            .iter()
            .map(|s| s.market.iter().map(|i| i.quantity).collect::<Vec<_>>())
            .collect::<Vec<_>>()
    };
    assert_eq!(markets(&a), markets(&b));
}

#[test]
fn random_ships_leave_the_yard_full() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..200 {
        let tags = ShipTags::random(&mut rng);
        let ship = generate_ship(&mut rng, tags).unwrap();
        assert!((ship.current_hull - ship.stats.max_hull).abs() < f64::EPSILON);
        assert!((ship.current_shield - ship.stats.max_shield).abs() < f64::EPSILON);
        assert!((ship.current_fuel - ship.stats.max_fuel).abs() < f64::EPSILON);
        assert!(ship.stats.fuel_efficiency >= 0.1);
    }
}

#[test]
fn local_boards_draw_from_the_scan() {
    let mut rng = StdRng::seed_from_u64(12);
    let systems = generate_universe(&bounds(), &mut rng).unwrap();
    let origin = systems.first().unwrap();
    let nearby = systems_in_range((origin.x, origin.y), &systems, 120.0);

    let board = passenger_board(origin, &nearby, &mut rng);
    assert!(
        board
            .iter()
            .all(|p| nearby.iter().any(|s| s.id == p.target_system_id))
    );
    assert!(board.iter().all(|p| p.source_system_id == origin.id));

    let roster = crew_roster(&origin.stats, &mut rng);
    assert!(roster.len() <= 8);
}
