//! The entity state store: live systems and players.
//!
//! Two levels of locking:
//!
//! - Each registry map sits behind its own coarse [`RwLock`], taken only to
//!   look up, insert or remove a handle and released immediately.
//! - Each entity sits behind its own [`RwLock`] inside an [`Arc`] handle,
//!   taken for field access under the ordering rules in [`crate::lock`].
//!
//! The system registry is append-only after startup. Position and tags of
//! a system never change, so they are charted outside the entity lock and
//! range scans never touch a system lock.

use std::collections::HashMap;
use std::sync::Arc;

use galaxies_types::{
    PlayerId, PlayerRecord, PlayerSnapshot, Ship, StarSystem, SystemId, SystemSummary, distance,
};
use tokio::sync::{RwLock, RwLockWriteGuard};

/// Shared handle to a live system.
pub type SystemHandle = Arc<RwLock<StarSystem>>;
/// Shared handle to a live ship.
pub type ShipHandle = Arc<RwLock<Ship>>;
/// Shared handle to a live player.
pub type PlayerHandle = Arc<RwLock<LivePlayer>>;

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct ChartEntry {
    chart: SystemSummary,
    handle: SystemHandle,
}

#[derive(Debug, Default)]
struct Charts {
    entries: HashMap<SystemId, ChartEntry>,
    order: Vec<SystemId>,
}

/// Registry of every star system.
#[derive(Debug, Default)]
pub struct Universe {
    charts: RwLock<Charts>,
}

impl Universe {
    /// Build the registry from loaded or generated systems. The first
    /// system is where new players start.
    pub fn new(systems: Vec<StarSystem>) -> Self {
        let mut charts = Charts::default();
        for system in systems {
            insert_chart(&mut charts, system);
        }
        Self {
            charts: RwLock::new(charts),
        }
    }

    /// Add a system. Replaces any system with the same id.
    pub async fn insert(&self, system: StarSystem) {
        let mut charts = self.charts.write().await;
        insert_chart(&mut charts, system);
    }

    /// Handle to a system.
    pub async fn get(&self, id: SystemId) -> Option<SystemHandle> {
        let charts = self.charts.read().await;
        charts.entries.get(&id).map(|e| Arc::clone(&e.handle))
    }

    /// Immutable chart entry of a system (distance zero).
    pub async fn chart(&self, id: SystemId) -> Option<SystemSummary> {
        let charts = self.charts.read().await;
        charts.entries.get(&id).map(|e| e.chart.clone())
    }

    /// The starting system for new players.
    pub async fn first(&self) -> Option<SystemId> {
        self.charts.read().await.order.first().copied()
    }

    /// Number of systems.
    pub async fn len(&self) -> usize {
        self.charts.read().await.order.len()
    }

    /// Whether no system has been loaded.
    pub async fn is_empty(&self) -> bool {
        self.charts.read().await.order.is_empty()
    }

    /// Systems within `range` of `center`, excluding anything at distance
    /// zero, nearest first.
    pub async fn scan(&self, center: (i32, i32), range: f64) -> Vec<SystemSummary> {
        let charts = self.charts.read().await;
        let mut visible: Vec<SystemSummary> = charts
            .entries
            .values()
            .filter_map(|e| {
                let d = distance(center, (e.chart.x, e.chart.y));
                (d > 0.0 && d <= range).then(|| SystemSummary {
                    distance: d,
                    ..e.chart.clone()
                })
            })
            .collect();
        visible.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        visible
    }

    /// Handles to every system in load order.
    pub async fn handles(&self) -> Vec<SystemHandle> {
        let charts = self.charts.read().await;
        charts
            .order
            .iter()
            .filter_map(|id| charts.entries.get(id))
            .map(|e| Arc::clone(&e.handle))
            .collect()
    }
}

fn insert_chart(charts: &mut Charts, system: StarSystem) {
    let id = system.id;
    let chart = system.summary(0.0);
    let entry = ChartEntry {
        chart,
        handle: Arc::new(RwLock::new(system)),
    };
    if charts.entries.insert(id, entry).is_none() {
        charts.order.push(id);
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// A player held in memory while their session is active.
#[derive(Debug)]
pub struct LivePlayer {
    /// Persisted player fields.
    pub record: PlayerRecord,
    /// The owned ship, separately lockable.
    pub ship: Option<ShipHandle>,
    /// Set once logout has saved the player and dropped them from the
    /// roster. Holders of a stale handle must not mutate it.
    pub signed_out: bool,
}

impl LivePlayer {
    /// Wrap a stored snapshot.
    pub fn from_snapshot(snapshot: PlayerSnapshot) -> Self {
        Self {
            record: snapshot.player,
            ship: snapshot.ship.map(|s| Arc::new(RwLock::new(s))),
            signed_out: false,
        }
    }

    /// Copy the player and their ship. Takes the ship's read lock, so the
    /// caller must already hold this player's lock.
    pub async fn snapshot(&self) -> PlayerSnapshot {
        let ship = match &self.ship {
            Some(handle) => Some(handle.read().await.clone()),
            None => None,
        };
        PlayerSnapshot {
            player: self.record.clone(),
            ship,
        }
    }
}

/// Live players keyed by id, with an index by external id.
#[derive(Debug, Default)]
pub struct Roster {
    by_id: HashMap<PlayerId, PlayerHandle>,
    by_external: HashMap<String, PlayerId>,
}

impl Roster {
    /// Handle for a player id.
    pub fn get(&self, id: PlayerId) -> Option<PlayerHandle> {
        self.by_id.get(&id).map(Arc::clone)
    }

    /// Handle for an external id.
    pub fn get_external(&self, external_id: &str) -> Option<PlayerHandle> {
        self.by_external.get(external_id).and_then(|id| self.get(*id))
    }

    /// Register a player.
    pub fn insert(&mut self, record: &PlayerRecord, handle: PlayerHandle) {
        self.by_external.insert(record.external_id.clone(), record.id);
        self.by_id.insert(record.id, handle);
    }

    /// Unregister a player.
    pub fn remove(&mut self, id: PlayerId) -> Option<PlayerHandle> {
        let handle = self.by_id.remove(&id)?;
        self.by_external.retain(|_, v| *v != id);
        Some(handle)
    }

    /// Number of live players.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether nobody is online.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Registry of players with a live session.
#[derive(Debug, Default)]
pub struct ActivePlayers {
    roster: RwLock<Roster>,
}

impl ActivePlayers {
    /// Handle to a live player.
    pub async fn get(&self, id: PlayerId) -> Option<PlayerHandle> {
        self.roster.read().await.get(id)
    }

    /// Handle for an external id.
    pub async fn get_external(&self, external_id: &str) -> Option<PlayerHandle> {
        self.roster.read().await.get_external(external_id)
    }

    /// Exclusive access for login and logout. Never await a player lock
    /// or the store while holding it.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Roster> {
        self.roster.write().await
    }

    /// Handles to every live player.
    pub async fn handles(&self) -> Vec<PlayerHandle> {
        self.roster.read().await.by_id.values().map(Arc::clone).collect()
    }

    /// Number of live players.
    pub async fn len(&self) -> usize {
        self.roster.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxies_types::{EconomicStatus, PoliticalStatus, SocialStatus, SystemStats};

    fn system(x: i32, y: i32) -> StarSystem {
        StarSystem {
            id: SystemId::new(),
            name: format!("SYS-{x}-{y}"),
            x,
            y,
            political: PoliticalStatus::ImperialCore,
            economic: EconomicStatus::FreePort,
            social: SocialStatus::Cosmopolitan,
            stats: SystemStats::baseline(),
            market: Vec::new(),
        }
    }

    #[tokio::test]
    async fn first_system_is_load_order() {
        let a = system(0, 0);
        let first = a.id;
        let universe = Universe::new(vec![a, system(10, 0), system(0, 30)]);
        assert_eq!(universe.first().await, Some(first));
        assert_eq!(universe.len().await, 3);
    }

    #[tokio::test]
    async fn scan_excludes_center_and_sorts() {
        let universe = Universe::new(vec![system(0, 0), system(0, 30), system(10, 0), system(99, 0)]);
        let visible = universe.scan((0, 0), 30.0).await;
        let distances: Vec<f64> = visible.iter().map(|s| s.distance).collect();
        assert_eq!(distances, vec![10.0, 30.0]);
    }

    #[tokio::test]
    async fn roster_indexes_by_external_id() {
        let record = PlayerRecord {
            id: PlayerId::new(),
            external_id: String::from("gh-7"),
            name: String::new(),
            credits: 0,
            current_system_id: SystemId::new(),
        };
        let players = ActivePlayers::default();
        let handle = Arc::new(RwLock::new(LivePlayer::from_snapshot(PlayerSnapshot {
            player: record.clone(),
            ship: None,
        })));
        players.write().await.insert(&record, handle);

        assert!(players.get(record.id).await.is_some());
        assert!(players.write().await.get_external("gh-7").is_some());
        assert!(players.write().await.remove(record.id).is_some());
        assert!(players.write().await.get_external("gh-7").is_none());
        assert_eq!(players.len().await, 0);
    }
}
