//! Universe placement.
//!
//! Systems are placed by rejection sampling: an integer coordinate is
//! drawn uniformly inside the bounding box and kept only if it lies at
//! least `min_distance` from every system already placed.
//!
//! The number of draws is capped at `system_count * 50`. Running out of
//! draws is a soft cap, not an error: the universe is simply smaller than
//! requested.

use galaxies_types::{StarSystem, SystemSummary, distance};
use rand::Rng;
use tracing::{info, warn};

use crate::error::GenError;
use crate::system::{SystemTags, generate_system};

/// Draws allowed per requested system.
pub const ATTEMPTS_PER_SYSTEM: usize = 50;

/// Bounding box and spacing for a universe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniverseBounds {
    /// Smallest x coordinate (inclusive).
    pub min_x: i32,
    /// Largest x coordinate (inclusive).
    pub max_x: i32,
    /// Smallest y coordinate (inclusive).
    pub min_y: i32,
    /// Largest y coordinate (inclusive).
    pub max_y: i32,
    /// Target number of systems.
    pub system_count: usize,
    /// Minimum distance between any two systems.
    pub min_distance: f64,
}

impl Default for UniverseBounds {
    fn default() -> Self {
        Self {
            min_x: -500,
            max_x: 500,
            min_y: -500,
            max_y: 500,
            system_count: 200,
            min_distance: 15.0,
        }
    }
}

impl UniverseBounds {
    /// Reject boxes that cannot hold a point.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.min_x > self.max_x || self.min_y > self.max_y {
            return Err(GenError::InvalidBounds {
                reason: format!(
                    "empty box x {}..={} y {}..={}",
                    self.min_x, self.max_x, self.min_y, self.max_y
                ),
            });
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(GenError::InvalidBounds {
                reason: format!("min_distance {} is not a non-negative number", self.min_distance),
            });
        }
        Ok(())
    }

    fn random_point(&self, rng: &mut impl Rng) -> (i32, i32) {
        (
            rng.random_range(self.min_x..=self.max_x),
            rng.random_range(self.min_y..=self.max_y),
        )
    }
}

/// Place and generate a universe of star systems.
///
/// # Errors
///
/// Returns [`GenError::InvalidBounds`] for an unusable box and propagates
/// any composition error from [`generate_system`].
pub fn generate_universe(
    bounds: &UniverseBounds,
    rng: &mut impl Rng,
) -> Result<Vec<StarSystem>, GenError> {
    bounds.validate()?;

    let max_attempts = bounds.system_count.saturating_mul(ATTEMPTS_PER_SYSTEM);
    let mut systems: Vec<StarSystem> = Vec::with_capacity(bounds.system_count);
    let mut attempts: usize = 0;

    while systems.len() < bounds.system_count && attempts < max_attempts {
        attempts = attempts.saturating_add(1);

        let point = bounds.random_point(rng);
        if is_crowded(point, &systems, bounds.min_distance) {
            continue;
        }

        let tags = SystemTags::random(rng);
        systems.push(generate_system(rng, point, tags)?);
    }

    if systems.len() < bounds.system_count {
        warn!(
            requested = bounds.system_count,
            placed = systems.len(),
            attempts,
            "universe placement hit the attempt cap"
        );
    }
    info!(systems = systems.len(), attempts, "universe generated");

    Ok(systems)
}

fn is_crowded(point: (i32, i32), placed: &[StarSystem], min_distance: f64) -> bool {
    placed
        .iter()
        .any(|s| distance(point, (s.x, s.y)) < min_distance)
}

/// Systems strictly farther than zero and at most `range` from `center`,
/// nearest first.
pub fn systems_in_range(center: (i32, i32), systems: &[StarSystem], range: f64) -> Vec<SystemSummary> {
    let mut visible: Vec<SystemSummary> = systems
        .iter()
        .filter_map(|s| {
            let d = distance(center, (s.x, s.y));
            (d > 0.0 && d <= range).then(|| s.summary(d))
        })
        .collect();
    visible.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    visible
}
