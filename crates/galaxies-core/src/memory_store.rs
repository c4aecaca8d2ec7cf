//! In-memory [`PersistenceGateway`] for tests and database-less runs.
//!
//! Behaves like the `PostgreSQL` store (callsign uniqueness, ordered
//! universe) and can be told to fail or stall to exercise the engine's
//! partial-failure path.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use galaxies_types::{ItemStack, PlayerId, PlayerSnapshot, StarSystem, SystemId};

use crate::error::StoreError;
use crate::gateway::PersistenceGateway;

#[derive(Debug, Default)]
struct Tables {
    systems: Vec<StarSystem>,
    players: HashMap<PlayerId, PlayerSnapshot>,
}

/// Gateway backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_writes: AtomicBool,
    write_delay_ms: AtomicU64,
    player_saves: AtomicU64,
    market_updates: AtomicU64,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a universe.
    pub fn with_universe(systems: Vec<StarSystem>) -> Self {
        let store = Self::default();
        if let Ok(mut tables) = store.tables.lock() {
            tables.systems = systems;
        }
        store
    }

    /// Make every subsequent write fail with a backend error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Stall every subsequent write by `delay`.
    pub fn set_write_delay(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.write_delay_ms.store(millis, Ordering::SeqCst);
    }

    /// Number of successful player saves.
    pub fn player_saves(&self) -> u64 {
        self.player_saves.load(Ordering::SeqCst)
    }

    /// Number of successful market updates.
    pub fn market_updates(&self) -> u64 {
        self.market_updates.load(Ordering::SeqCst)
    }

    /// The stored copy of a player.
    pub fn stored_player(&self, id: PlayerId) -> Option<PlayerSnapshot> {
        self.with_tables(|t| Ok(t.players.get(&id).cloned())).ok().flatten()
    }

    async fn before_write(&self) -> Result<(), StoreError> {
        let delay = self.write_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(String::from("injected write failure")));
        }
        Ok(())
    }

    fn with_tables<T>(&self, f: impl FnOnce(&mut Tables) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|e| StoreError::Backend(format!("store lock poisoned: {e}")))?;
        f(&mut tables)
    }
}

impl PersistenceGateway for MemoryStore {
    async fn load_universe(&self) -> Result<Vec<StarSystem>, StoreError> {
        self.with_tables(|t| Ok(t.systems.clone()))
    }

    async fn save_universe(&self, systems: &[StarSystem]) -> Result<(), StoreError> {
        self.before_write().await?;
        self.with_tables(|t| {
            t.systems = systems.to_vec();
            Ok(())
        })
    }

    async fn save_player(&self, snapshot: &PlayerSnapshot) -> Result<(), StoreError> {
        self.before_write().await?;
        self.with_tables(|t| {
            let name = &snapshot.player.name;
            let taken = !name.is_empty()
                && t.players
                    .values()
                    .any(|p| p.player.id != snapshot.player.id && &p.player.name == name);
            if taken {
                return Err(StoreError::Conflict(format!("name {name} already taken")));
            }
            let external = &snapshot.player.external_id;
            if t.players
                .values()
                .any(|p| p.player.id != snapshot.player.id && &p.player.external_id == external)
            {
                return Err(StoreError::Conflict(format!("identity {external} already registered")));
            }
            t.players.insert(snapshot.player.id, snapshot.clone());
            Ok(())
        })?;
        self.player_saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get_player(&self, id: PlayerId) -> Result<Option<PlayerSnapshot>, StoreError> {
        self.with_tables(|t| Ok(t.players.get(&id).cloned()))
    }

    async fn get_player_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<PlayerSnapshot>, StoreError> {
        self.with_tables(|t| {
            Ok(t.players
                .values()
                .find(|p| p.player.external_id == external_id)
                .cloned())
        })
    }

    async fn get_system_market(&self, id: SystemId) -> Result<Vec<ItemStack>, StoreError> {
        self.with_tables(|t| {
            t.systems
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.market.clone())
                .ok_or(StoreError::NotFound)
        })
    }

    async fn update_market(&self, id: SystemId, items: &[ItemStack]) -> Result<(), StoreError> {
        self.before_write().await?;
        self.with_tables(|t| {
            let system = t
                .systems
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(StoreError::NotFound)?;
            system.market = items.to_vec();
            Ok(())
        })?;
        self.market_updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxies_types::PlayerRecord;

    fn draft(external_id: &str, name: &str) -> PlayerSnapshot {
        PlayerSnapshot {
            player: PlayerRecord {
                id: PlayerId::new(),
                external_id: external_id.to_owned(),
                name: name.to_owned(),
                credits: 0,
                current_system_id: SystemId::new(),
            },
            ship: None,
        }
    }

    #[tokio::test]
    async fn duplicate_names_conflict() {
        let store = MemoryStore::new();
        assert!(store.save_player(&draft("a", "Vega")).await.is_ok());
        assert!(matches!(
            store.save_player(&draft("b", "Vega")).await,
            Err(StoreError::Conflict(_))
        ));
        // Unnamed drafts never conflict.
        assert!(store.save_player(&draft("c", "")).await.is_ok());
        assert!(store.save_player(&draft("d", "")).await.is_ok());
        assert_eq!(store.player_saves(), 3);
    }

    #[tokio::test]
    async fn duplicate_identities_conflict() {
        let store = MemoryStore::new();
        assert!(store.save_player(&draft("gh-1", "")).await.is_ok());
        assert!(matches!(
            store.save_player(&draft("gh-1", "")).await,
            Err(StoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn lookup_by_external_id() {
        let store = MemoryStore::new();
        let snap = draft("gh-42", "");
        assert!(store.save_player(&snap).await.is_ok());
        let found = store.get_player_by_external_id("gh-42").await;
        assert_eq!(found.ok().flatten().map(|p| p.player.id), Some(snap.player.id));
        let missing = store.get_player_by_external_id("gh-0").await;
        assert!(matches!(missing, Ok(None)));
    }

    #[tokio::test]
    async fn injected_failures_block_writes() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(matches!(
            store.save_player(&draft("a", "")).await,
            Err(StoreError::Backend(_))
        ));
        assert_eq!(store.player_saves(), 0);
    }
}
