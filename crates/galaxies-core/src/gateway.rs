//! Collaborator seams of the transaction engine.
//!
//! The engine owns no I/O. It talks to the durable store through
//! [`PersistenceGateway`] and pushes player updates through
//! [`NotificationSink`]. Each gateway call is atomic on its own; the gateway
//! never composes calls into a transaction, so ordering is the engine's job.

use std::future::Future;

use galaxies_types::{ItemStack, PlayerId, PlayerSnapshot, StarSystem, SystemId};
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::StoreError;

/// Durable storage for the world and its players.
pub trait PersistenceGateway: Send + Sync + 'static {
    /// Every stored system, in a stable order.
    fn load_universe(&self) -> impl Future<Output = Result<Vec<StarSystem>, StoreError>> + Send;

    /// Seed a freshly generated universe.
    fn save_universe(
        &self,
        systems: &[StarSystem],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Upsert a player together with their ship.
    ///
    /// Returns [`StoreError::Conflict`] when the player's name is already
    /// used by another player.
    fn save_player(
        &self,
        snapshot: &PlayerSnapshot,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// A player by id.
    fn get_player(
        &self,
        id: PlayerId,
    ) -> impl Future<Output = Result<Option<PlayerSnapshot>, StoreError>> + Send;

    /// A player by the identity provider's id.
    fn get_player_by_external_id(
        &self,
        external_id: &str,
    ) -> impl Future<Output = Result<Option<PlayerSnapshot>, StoreError>> + Send;

    /// The stored market of a system.
    fn get_system_market(
        &self,
        id: SystemId,
    ) -> impl Future<Output = Result<Vec<ItemStack>, StoreError>> + Send;

    /// Replace the stored market of a system.
    fn update_market(
        &self,
        id: SystemId,
        items: &[ItemStack],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Receiver of player-state changes.
///
/// Delivery is fire-and-forget and at most once.
pub trait NotificationSink: Send + Sync + 'static {
    /// Called after a successful mutation with the player's new state.
    fn player_updated(&self, snapshot: &PlayerSnapshot);
}

/// Sink that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn player_updated(&self, _snapshot: &PlayerSnapshot) {}
}

/// Capacity of the player-update broadcast channel.
///
/// A subscriber that falls this far behind skips to the newest update.
pub const BROADCAST_CAPACITY: usize = 256;

/// Sink that fans updates out to every subscriber.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    tx: broadcast::Sender<PlayerSnapshot>,
}

impl BroadcastSink {
    /// Create a sink with an empty subscriber list.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }

    /// Receive every update sent after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerSnapshot> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for BroadcastSink {
    fn player_updated(&self, snapshot: &PlayerSnapshot) {
        // No receivers is not an error.
        if self.tx.send(snapshot.clone()).is_err() {
            debug!(player_id = %snapshot.player.id, "no subscribers for player update");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxies_types::{PlayerRecord, SystemId};

    fn snapshot() -> PlayerSnapshot {
        PlayerSnapshot {
            player: PlayerRecord {
                id: PlayerId::new(),
                external_id: String::from("gh-1"),
                name: String::from("Vega"),
                credits: 10,
                current_system_id: SystemId::new(),
            },
            ship: None,
        }
    }

    #[tokio::test]
    async fn broadcast_reaches_subscribers() {
        let sink = BroadcastSink::new();
        let mut rx = sink.subscribe();
        let snap = snapshot();
        sink.player_updated(&snap);
        let received = rx.recv().await;
        assert_eq!(received.ok().map(|s| s.player.id), Some(snap.player.id));
    }

    #[test]
    fn broadcast_without_subscribers_is_silent() {
        BroadcastSink::new().player_updated(&snapshot());
        NullSink.player_updated(&snapshot());
    }
}
