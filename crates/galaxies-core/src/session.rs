//! Player sessions: login, onboarding, views and saves.

use std::sync::Arc;
use std::time::Duration;

use galaxies_gen::starter_ships;
use galaxies_types::{PlayerId, PlayerRecord, PlayerSnapshot, Ship, ShipId};
use rand::Rng;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::engine::GameEngine;
use crate::error::{StoreError, TradeError};
use crate::gateway::{NotificationSink, PersistenceGateway};
use crate::registry::{LivePlayer, PlayerHandle};

/// Shortest allowed callsign.
pub const CALLSIGN_MIN: usize = 3;
/// Longest allowed callsign.
pub const CALLSIGN_MAX: usize = 18;

/// Callsigns are 3 to 18 ASCII letters, digits or underscores.
pub fn is_valid_callsign(callsign: &str) -> bool {
    (CALLSIGN_MIN..=CALLSIGN_MAX).contains(&callsign.len())
        && callsign
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Result of a login.
#[derive(Debug, Clone, PartialEq)]
pub struct Login {
    /// The player's current state.
    pub snapshot: PlayerSnapshot,
    /// True until the player has picked a ship.
    pub needs_onboarding: bool,
}

/// Outcome of one autosave sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Players written.
    pub saved: usize,
    /// Players whose save failed or timed out.
    pub failed: usize,
}

impl<G: PersistenceGateway, N: NotificationSink> GameEngine<G, N> {
    /// Log a player in by their identity provider id.
    ///
    /// Returns the live player if already online, otherwise loads them
    /// from the store, otherwise creates a draft player (no ship, no
    /// credits, docked at the first system) and saves it before returning.
    /// The roster lock is only taken to look up or register a handle.
    pub async fn authenticate(
        &self,
        external_id: &str,
        display_name: &str,
    ) -> Result<Login, TradeError> {
        loop {
            if let Some(handle) = self.players.get_external(external_id).await {
                let player = handle.read().await;
                if !player.signed_out {
                    return Ok(login(player.snapshot().await));
                }
            }

            let found = self
                .persist("load_player", self.gateway.get_player_by_external_id(external_id))
                .await?;
            let snapshot = match found {
                Some(stored) => {
                    let stored = self.relocate_if_missing(stored).await?;
                    info!(player_id = %stored.player.id, "player loaded");
                    stored
                }
                None => self.create_draft(external_id, display_name).await?,
            };

            let handle = self.admit(snapshot).await;
            let player = handle.read().await;
            // Lost a race with a logout of the same player; its save has
            // landed, so load again.
            if player.signed_out {
                continue;
            }
            return Ok(login(player.snapshot().await));
        }
    }

    async fn create_draft(
        &self,
        external_id: &str,
        display_name: &str,
    ) -> Result<PlayerSnapshot, TradeError> {
        let start = self.universe.first().await.ok_or(TradeError::EmptyUniverse)?;
        let draft = PlayerSnapshot {
            player: PlayerRecord {
                id: PlayerId::new(),
                external_id: external_id.to_owned(),
                name: String::new(),
                credits: 0,
                current_system_id: start,
            },
            ship: None,
        };
        match self
            .persist("create_player", self.gateway.save_player(&draft))
            .await
        {
            Ok(()) => {
                info!(player_id = %draft.player.id, display_name, "draft player created");
                Ok(draft)
            }
            // A concurrent login for the same identity stored its draft first.
            Err(StoreError::Conflict(_)) => self
                .persist("load_player", self.gateway.get_player_by_external_id(external_id))
                .await?
                .ok_or(TradeError::PlayerNotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn relocate_if_missing(
        &self,
        mut stored: PlayerSnapshot,
    ) -> Result<PlayerSnapshot, TradeError> {
        if self.universe.get(stored.player.current_system_id).await.is_none() {
            let start = self.universe.first().await.ok_or(TradeError::EmptyUniverse)?;
            warn!(
                player_id = %stored.player.id,
                "stored system no longer exists, moving player to the start system"
            );
            stored.player.current_system_id = start;
        }
        Ok(stored)
    }

    /// Register a loaded player unless someone got there first, and return
    /// the handle that is live afterwards.
    async fn admit(&self, snapshot: PlayerSnapshot) -> PlayerHandle {
        let mut roster = self.players.write().await;
        if let Some(handle) = roster.get(snapshot.player.id) {
            return handle;
        }
        let handle = live(snapshot.clone());
        roster.insert(&snapshot.player, Arc::clone(&handle));
        handle
    }

    /// Three ships to choose from on onboarding.
    pub fn starter_options(&self, rng: &mut impl Rng) -> Result<Vec<Ship>, TradeError> {
        Ok(starter_ships(rng)?)
    }

    /// Name a draft player, grant starting credits, dock them at the start
    /// system and hand over their chosen ship.
    ///
    /// The change is staged and committed to memory only after the store
    /// accepts it, so a taken callsign leaves the draft untouched.
    pub async fn complete_onboarding(
        &self,
        player_id: PlayerId,
        callsign: &str,
        ship: Ship,
    ) -> Result<PlayerSnapshot, TradeError> {
        if !is_valid_callsign(callsign) {
            return Err(TradeError::InvalidCallsign);
        }
        let handle = self
            .players
            .get(player_id)
            .await
            .ok_or(TradeError::SessionMissing)?;
        let start = self.universe.first().await.ok_or(TradeError::EmptyUniverse)?;

        let mut player = handle.write().await;
        if player.signed_out {
            return Err(TradeError::SessionMissing);
        }
        if player.ship.is_some() {
            return Err(TradeError::AlreadyOnboarded);
        }

        let staged = PlayerSnapshot {
            player: PlayerRecord {
                name: callsign.to_owned(),
                credits: self.config.starting_credits,
                current_system_id: start,
                ..player.record.clone()
            },
            ship: Some(commission(ship)),
        };

        match self
            .persist("onboard", self.gateway.save_player(&staged))
            .await
        {
            Ok(()) => {}
            Err(StoreError::Conflict(_)) => return Err(TradeError::CallsignTaken),
            Err(e) => return Err(e.into()),
        }

        player.record = staged.player.clone();
        player.ship = staged.ship.clone().map(|s| Arc::new(RwLock::new(s)));
        drop(player);

        info!(player_id = %player_id, callsign, "onboarding completed");
        self.notify(&staged);
        Ok(staged)
    }

    /// Save and end a session.
    ///
    /// The player stays online until the store has their state. On failure
    /// the session is kept so a later save or logout can retry.
    pub async fn logout(&self, player_id: PlayerId) -> Result<(), TradeError> {
        let handle = self
            .players
            .get(player_id)
            .await
            .ok_or(TradeError::PlayerNotOnline)?;
        let mut player = handle.write().await;
        if player.signed_out {
            return Err(TradeError::PlayerNotOnline);
        }

        let snapshot = player.snapshot().await;
        self.persist("logout", self.gateway.save_player(&snapshot))
            .await
            .inspect_err(|e| {
                warn!(player_id = %player_id, error = %e, "logout save failed, session kept");
            })?;

        player.signed_out = true;
        self.players.write().await.remove(player_id);
        drop(player);
        info!(player_id = %player_id, "player logged out");
        Ok(())
    }

    /// Current state of a player. Players not online are loaded from the
    /// store and kept in memory.
    pub async fn player_view(&self, player_id: PlayerId) -> Result<PlayerSnapshot, TradeError> {
        if let Some(handle) = self.players.get(player_id).await {
            return Ok(handle.read().await.snapshot().await);
        }

        let stored = self
            .persist("load_player", self.gateway.get_player(player_id))
            .await?
            .ok_or(TradeError::PlayerNotFound)?;
        let handle = self.admit(stored).await;
        let snapshot = handle.read().await.snapshot().await;
        Ok(snapshot)
    }

    /// Write one live player to the store.
    pub async fn save_player(&self, player_id: PlayerId) -> Result<(), TradeError> {
        let handle = self
            .players
            .get(player_id)
            .await
            .ok_or(TradeError::PlayerNotOnline)?;
        let snapshot = handle.read().await.snapshot().await;
        self.persist("save_player", self.gateway.save_player(&snapshot))
            .await?;
        Ok(())
    }

    /// Write every live player to the store, giving up after `deadline`.
    ///
    /// Each player is read under their own lock; failures are counted and
    /// the sweep carries on.
    pub async fn save_all(&self, deadline: Duration) -> SaveReport {
        let handles = self.players.handles().await;
        let total = handles.len();
        let mut report = SaveReport::default();

        let sweep = async {
            for handle in &handles {
                let snapshot = handle.read().await.snapshot().await;
                match self.gateway.save_player(&snapshot).await {
                    Ok(()) => report.saved = report.saved.saturating_add(1),
                    Err(e) => {
                        warn!(player_id = %snapshot.player.id, error = %e, "autosave failed");
                        report.failed = report.failed.saturating_add(1);
                    }
                }
            }
        };
        if tokio::time::timeout(deadline, sweep).await.is_err() {
            error!(total, saved = report.saved, "save sweep timed out");
            report.failed = total.saturating_sub(report.saved);
        }
        report
    }

    /// Save every live player every `autosave_interval` until the task is
    /// aborted. The first sweep runs one interval after start.
    pub async fn run_autosave(self: Arc<Self>) {
        let period = self.config.autosave_interval();
        let deadline = self.config.autosave_timeout();
        if period.is_zero() {
            warn!("autosave interval is zero, autosave disabled");
            return;
        }
        let start = Instant::now().checked_add(period).unwrap_or_else(Instant::now);
        let mut ticker = tokio::time::interval_at(start, period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let report = self.save_all(deadline).await;
            info!(saved = report.saved, failed = report.failed, "autosave sweep");
        }
    }
}

fn live(snapshot: PlayerSnapshot) -> PlayerHandle {
    Arc::new(RwLock::new(LivePlayer::from_snapshot(snapshot)))
}

fn login(snapshot: PlayerSnapshot) -> Login {
    Login {
        needs_onboarding: snapshot.ship.is_none(),
        snapshot,
    }
}

/// Prepare a chosen ship for service: fresh id, full pools, empty hold.
fn commission(ship: Ship) -> Ship {
    Ship {
        id: ShipId::new(),
        current_hull: ship.stats.max_hull,
        current_shield: ship.stats.max_shield,
        current_fuel: ship.stats.max_fuel,
        cargo: Vec::new(),
        ..ship
    }
}
