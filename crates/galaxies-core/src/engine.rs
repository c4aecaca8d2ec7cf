//! The game engine: one object holding all live world state.
//!
//! [`GameEngine`] is constructed once at startup and shared by reference
//! (usually in an [`Arc`]) with every connection. It owns the system and
//! player registries, the persistence gateway and the notification sink.
//! Randomness is passed in by the caller.
//!
//! Mutating operations live in [`crate::trade`] and [`crate::session`];
//! this module holds construction and read-only queries.

use std::future::Future;
use std::sync::Arc;

use galaxies_gen::{UniverseBounds, crew_roster, generate_universe, passenger_board};
use galaxies_types::{CrewMember, ItemStack, Passenger, PlayerSnapshot, SystemId, SystemSummary};
use rand::Rng;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{StoreError, TradeError};
use crate::gateway::{NotificationSink, PersistenceGateway};
use crate::registry::{ActivePlayers, Universe};

/// Distance within which passengers look for destinations.
pub const CONTRACT_RANGE: f64 = 60.0;

/// Live world state plus its collaborators.
#[derive(Debug)]
pub struct GameEngine<G, N> {
    pub(crate) config: EngineConfig,
    pub(crate) universe: Universe,
    pub(crate) players: ActivePlayers,
    pub(crate) gateway: Arc<G>,
    pub(crate) sink: N,
}

impl<G: PersistenceGateway, N: NotificationSink> GameEngine<G, N> {
    /// Build an engine over an already loaded universe.
    pub fn new(
        config: EngineConfig,
        systems: Vec<galaxies_types::StarSystem>,
        gateway: Arc<G>,
        sink: N,
    ) -> Self {
        Self {
            config,
            universe: Universe::new(systems),
            players: ActivePlayers::default(),
            gateway,
            sink,
        }
    }

    /// Load the stored universe, generating and seeding one if the store
    /// is empty.
    pub async fn bootstrap(
        config: EngineConfig,
        bounds: &UniverseBounds,
        gateway: Arc<G>,
        sink: N,
        rng: &mut (impl Rng + Send),
    ) -> Result<Self, TradeError> {
        let mut systems = gateway.load_universe().await?;

        if systems.is_empty() {
            info!(target_count = bounds.system_count, "store is empty, generating universe");
            systems = generate_universe(bounds, rng)?;
            gateway.save_universe(&systems).await?;
        }
        if systems.is_empty() {
            return Err(TradeError::EmptyUniverse);
        }

        info!(systems = systems.len(), "universe loaded");
        Ok(Self::new(config, systems, gateway, sink))
    }

    /// Engine tuning.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The system registry.
    pub const fn universe(&self) -> &Universe {
        &self.universe
    }

    /// The live player registry.
    pub const fn players(&self) -> &ActivePlayers {
        &self.players
    }

    /// The persistence gateway.
    pub const fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// The notification sink.
    pub const fn sink(&self) -> &N {
        &self.sink
    }

    // -----------------------------------------------------------------------
    // Collaborator plumbing
    // -----------------------------------------------------------------------

    /// Run a gateway call under the persist deadline.
    pub(crate) async fn persist<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.config.persist_timeout(), call).await {
            Ok(result) => result,
            Err(_elapsed) => Err(StoreError::Timeout { operation }),
        }
    }

    /// Fire-and-forget push of a player's new state.
    pub(crate) fn notify(&self, snapshot: &PlayerSnapshot) {
        self.sink.player_updated(snapshot);
    }

    // -----------------------------------------------------------------------
    // Read-only queries
    // -----------------------------------------------------------------------

    /// Systems within `range` of `center`, nearest first.
    pub async fn scan_systems(
        &self,
        center: SystemId,
        range: f64,
    ) -> Result<Vec<SystemSummary>, TradeError> {
        let chart = self
            .universe
            .chart(center)
            .await
            .ok_or(TradeError::SystemNotFound)?;
        Ok(self.universe.scan((chart.x, chart.y), range).await)
    }

    /// Current market of a system. Memory is authoritative; the store is
    /// consulted only for systems not loaded.
    pub async fn system_market(&self, id: SystemId) -> Result<Vec<ItemStack>, TradeError> {
        if let Some(handle) = self.universe.get(id).await {
            return Ok(handle.read().await.market.clone());
        }
        match self.gateway.get_system_market(id).await {
            Ok(items) => Ok(items),
            Err(StoreError::NotFound) => Err(TradeError::SystemNotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Crew looking for work at a system.
    pub async fn crew_for_hire(
        &self,
        id: SystemId,
        rng: &mut (impl Rng + Send),
    ) -> Result<Vec<CrewMember>, TradeError> {
        let handle = self.universe.get(id).await.ok_or(TradeError::SystemNotFound)?;
        let stats = handle.read().await.stats.clone();
        Ok(crew_roster(&stats, rng))
    }

    /// Passage contracts offered at a system, bound for systems within
    /// [`CONTRACT_RANGE`].
    pub async fn passenger_contracts(
        &self,
        id: SystemId,
        rng: &mut (impl Rng + Send),
    ) -> Result<Vec<Passenger>, TradeError> {
        let handle = self.universe.get(id).await.ok_or(TradeError::SystemNotFound)?;
        let origin = handle.read().await.clone();
        let destinations = self.universe.scan((origin.x, origin.y), CONTRACT_RANGE).await;
        if destinations.is_empty() {
            warn!(system_id = %id, "no destinations in contract range");
        }
        Ok(passenger_board(&origin, &destinations, rng))
    }
}
