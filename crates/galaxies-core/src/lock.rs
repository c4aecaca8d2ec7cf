//! Lock ordering for multi-entity mutations.
//!
//! Every operation that mutates more than one entity takes locks in one
//! global order:
//!
//! 1. the player's current **system**
//! 2. the **player**
//! 3. the player's **ship**
//!
//! [`TransactionGuard`] is the only way the engine takes all three. It
//! releases them in reverse order when dropped. Operations that touch only
//! a player and their ship take the player lock first, then the ship lock,
//! which is a suffix of the same order.

use std::sync::Arc;

use galaxies_types::{PlayerSnapshot, Ship, StarSystem, SystemId};
use tokio::sync::OwnedRwLockWriteGuard;
use tracing::debug;

use crate::error::TradeError;
use crate::registry::{LivePlayer, PlayerHandle, Universe};

/// Write locks on a system, a player docked there and the player's ship.
///
/// Fields drop in declaration order, so the ship is released first and
/// the system last.
#[derive(Debug)]
pub struct TransactionGuard {
    /// The player's ship.
    pub ship: OwnedRwLockWriteGuard<Ship>,
    /// The player.
    pub player: OwnedRwLockWriteGuard<LivePlayer>,
    /// The system the player is docked at.
    pub system: OwnedRwLockWriteGuard<StarSystem>,
}

impl TransactionGuard {
    /// Lock the player's current system, then the player, then the ship.
    ///
    /// The current system is read before any lock is held. If a concurrent
    /// warp moved the player in between, all locks are released and the
    /// acquisition starts over.
    pub async fn acquire(universe: &Universe, player: &PlayerHandle) -> Result<Self, TradeError> {
        loop {
            let system_id = player.read().await.record.current_system_id;
            let system_handle = universe
                .get(system_id)
                .await
                .ok_or(TradeError::SystemNotFound)?;

            let system = system_handle.write_owned().await;
            let player_guard = Arc::clone(player).write_owned().await;

            if player_guard.record.current_system_id != system_id {
                debug!(
                    player_id = %player_guard.record.id,
                    "player moved while locking, retrying"
                );
                drop(player_guard);
                drop(system);
                continue;
            }

            if player_guard.signed_out {
                return Err(TradeError::PlayerNotOnline);
            }

            let ship_handle = player_guard.ship.clone().ok_or(TradeError::NoShip)?;
            let ship = ship_handle.write_owned().await;

            return Ok(Self {
                ship,
                player: player_guard,
                system,
            });
        }
    }

    /// Id of the locked system.
    pub fn system_id(&self) -> SystemId {
        self.system.id
    }

    /// Copy of the locked player and ship.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            player: self.player.record.clone(),
            ship: Some(self.ship.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxies_types::{
        Chassis, EconomicStatus, Origin, PlayerId, PlayerRecord, PoliticalStatus, Qualifier,
        ShipId, ShipStats, SocialStatus, SystemStats,
    };
    use std::time::Duration;
    use tokio::sync::RwLock;

    fn system(x: i32) -> StarSystem {
        StarSystem {
            id: SystemId::new(),
            name: format!("SYS-{x}"),
            x,
            y: 0,
            political: PoliticalStatus::ImperialCore,
            economic: EconomicStatus::FreePort,
            social: SocialStatus::Cosmopolitan,
            stats: SystemStats::baseline(),
            market: Vec::new(),
        }
    }

    fn ship() -> Ship {
        Ship {
            id: ShipId::new(),
            name: String::from("Tuned Void Courier"),
            chassis: Chassis::Courier,
            origin: Origin::Void,
            qualifier: Qualifier::Tuned,
            current_hull: 10.0,
            current_shield: 10.0,
            current_fuel: 10.0,
            stats: ShipStats::default(),
            cargo: Vec::new(),
        }
    }

    fn player(at: SystemId, ship: Option<Ship>) -> PlayerHandle {
        Arc::new(RwLock::new(LivePlayer::from_snapshot(PlayerSnapshot {
            player: PlayerRecord {
                id: PlayerId::new(),
                external_id: String::from("ext"),
                name: String::from("Vega"),
                credits: 0,
                current_system_id: at,
            },
            ship,
        })))
    }

    #[tokio::test]
    async fn locks_the_current_system() {
        let home = system(0);
        let home_id = home.id;
        let universe = Universe::new(vec![home, system(20)]);
        let handle = player(home_id, Some(ship()));

        let guard = TransactionGuard::acquire(&universe, &handle).await;
        assert_eq!(guard.as_ref().ok().map(TransactionGuard::system_id), Some(home_id));
        drop(guard);

        // Everything is released on drop.
        assert!(handle.try_write().is_ok());
    }

    #[tokio::test]
    async fn shipless_player_is_rejected() {
        let home = system(0);
        let home_id = home.id;
        let universe = Universe::new(vec![home]);
        let handle = player(home_id, None);
        assert!(matches!(
            TransactionGuard::acquire(&universe, &handle).await,
            Err(TradeError::NoShip)
        ));
    }

    #[tokio::test]
    async fn signed_out_player_is_rejected() {
        let home = system(0);
        let home_id = home.id;
        let universe = Universe::new(vec![home]);
        let handle = player(home_id, Some(ship()));
        handle.write().await.signed_out = true;
        assert!(matches!(
            TransactionGuard::acquire(&universe, &handle).await,
            Err(TradeError::PlayerNotOnline)
        ));
    }

    #[tokio::test]
    async fn follows_a_player_that_moved() {
        let home = system(0);
        let away = system(20);
        let (home_id, away_id) = (home.id, away.id);
        let universe = Universe::new(vec![home, away]);
        let handle = player(home_id, Some(ship()));

        // Hold the home system so the acquirer blocks there, then move the
        // player before releasing it.
        let home_lock = universe.get(home_id).await;
        let Some(home_lock) = home_lock else {
            panic!("home system missing");
        };
        let held = home_lock.write_owned().await;

        let acquirer = {
            let handle = Arc::clone(&handle);
            let universe = Arc::new(universe);
            let u = Arc::clone(&universe);
            tokio::spawn(async move {
                TransactionGuard::acquire(&u, &handle)
                    .await
                    .map(|g| g.system_id())
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.write().await.record.current_system_id = away_id;
        drop(held);

        let locked = acquirer.await.ok().and_then(Result::ok);
        assert_eq!(locked, Some(away_id));
    }
}
