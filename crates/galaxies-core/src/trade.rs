//! Buy, sell, warp and refuel.
//!
//! Each operation follows the same protocol:
//!
//! 1. Resolve the player from the registry (short read lock).
//! 2. Take system, player and ship locks through [`TransactionGuard`].
//! 3. Validate against the locked state. A failure here changes nothing.
//! 4. Mutate memory.
//! 5. Persist synchronously, still holding the locks.
//! 6. Release the locks and notify the sink.
//!
//! A failure in step 5 is reported to the caller, but the in-memory change
//! from step 4 is kept and no notification is sent. The next successful
//! save of the same entities (or the autosave sweep) brings the store back
//! in line.

use galaxies_types::{ItemStack, PlayerId, PlayerSnapshot, Ship, SystemId, distance};
use tracing::{info, warn};

use crate::engine::GameEngine;
use crate::error::TradeError;
use crate::gateway::{NotificationSink, PersistenceGateway};
use crate::lock::TransactionGuard;
use crate::pricing::{blended_cost, buy_unit_price, refuel_cost, sell_unit_price};

/// Outcome of a refuel.
#[derive(Debug, Clone, PartialEq)]
pub struct RefuelReceipt {
    /// Credits charged.
    pub cost: i64,
    /// The player's state after refuelling.
    pub snapshot: PlayerSnapshot,
}

impl<G: PersistenceGateway, N: NotificationSink> GameEngine<G, N> {
    async fn transaction(&self, player_id: PlayerId) -> Result<TransactionGuard, TradeError> {
        let handle = self
            .players
            .get(player_id)
            .await
            .ok_or(TradeError::PlayerNotOnline)?;
        TransactionGuard::acquire(&self.universe, &handle).await
    }

    /// Persist the player and the locked system's market, in that order.
    async fn persist_trade(
        &self,
        operation: &'static str,
        guard: &TransactionGuard,
        snapshot: &PlayerSnapshot,
    ) -> Result<(), TradeError> {
        let result = self
            .persist(operation, async {
                self.gateway.save_player(snapshot).await?;
                self.gateway
                    .update_market(guard.system.id, &guard.system.market)
                    .await
            })
            .await;
        result.map_err(|e| {
            warn!(
                player_id = %snapshot.player.id,
                system_id = %guard.system.id,
                error = %e,
                "{operation} applied in memory but not persisted"
            );
            TradeError::Persistence(e)
        })
    }

    /// Persist only the player.
    async fn persist_player(
        &self,
        operation: &'static str,
        snapshot: &PlayerSnapshot,
    ) -> Result<(), TradeError> {
        let result = self
            .persist(operation, self.gateway.save_player(snapshot))
            .await;
        result.map_err(|e| {
            warn!(
                player_id = %snapshot.player.id,
                error = %e,
                "{operation} applied in memory but not persisted"
            );
            TradeError::Persistence(e)
        })
    }

    /// Buy `quantity` units of `item` from the market where the player is
    /// docked.
    ///
    /// Validation order: item listed, stock, credits, cargo space.
    pub async fn buy_item(
        &self,
        player_id: PlayerId,
        item: &str,
        quantity: u32,
    ) -> Result<PlayerSnapshot, TradeError> {
        if quantity == 0 {
            return Err(TradeError::InvalidQuantity);
        }
        let mut guard = self.transaction(player_id).await?;

        let total = {
            let system = &mut *guard.system;
            let player = &mut *guard.player;
            let ship = &mut *guard.ship;

            let listing = system
                .market
                .iter_mut()
                .find(|l| l.name == item)
                .ok_or_else(|| TradeError::ItemNotFound {
                    item: item.to_owned(),
                })?;
            if listing.quantity < quantity {
                return Err(TradeError::InsufficientStock {
                    requested: quantity,
                    available: listing.quantity,
                });
            }

            let unit_price = buy_unit_price(
                listing.base_value,
                system.stats.market_buy_mult,
                system.stats.tax_rate,
            );
            let total = unit_price.saturating_mul(i64::from(quantity));
            if player.record.credits < total {
                return Err(TradeError::InsufficientFunds {
                    required: total,
                    available: player.record.credits,
                });
            }
            if !ship.can_fit(quantity) {
                return Err(TradeError::CargoFull {
                    requested: quantity,
                    free: ship.cargo_free(),
                });
            }

            player.record.credits = player.record.credits.saturating_sub(total);
            listing.quantity = listing.quantity.saturating_sub(quantity);
            stow(ship, listing, quantity, unit_price);
            total
        };

        let snapshot = guard.snapshot();
        self.persist_trade("buy", &guard, &snapshot).await?;
        drop(guard);

        info!(player_id = %player_id, item, quantity, total, "purchase completed");
        self.notify(&snapshot);
        Ok(snapshot)
    }

    /// Sell `quantity` units of `item` from the hold to the local market.
    pub async fn sell_item(
        &self,
        player_id: PlayerId,
        item: &str,
        quantity: u32,
    ) -> Result<PlayerSnapshot, TradeError> {
        if quantity == 0 {
            return Err(TradeError::InvalidQuantity);
        }
        let mut guard = self.transaction(player_id).await?;

        let total = {
            let system = &mut *guard.system;
            let player = &mut *guard.player;
            let ship = &mut *guard.ship;

            let index = ship
                .cargo
                .iter()
                .position(|s| s.name == item)
                .ok_or_else(|| TradeError::ItemNotFound {
                    item: item.to_owned(),
                })?;
            let Some(stack) = ship.cargo.get_mut(index) else {
                return Err(TradeError::ItemNotFound {
                    item: item.to_owned(),
                });
            };
            if stack.quantity < quantity {
                return Err(TradeError::InsufficientCargo {
                    requested: quantity,
                    owned: stack.quantity,
                });
            }

            let unit_price = sell_unit_price(stack.base_value, system.stats.market_sell_mult);
            let total = unit_price.saturating_mul(i64::from(quantity));

            player.record.credits = player.record.credits.saturating_add(total);
            stack.quantity = stack.quantity.saturating_sub(quantity);
            let template = stack.clone();
            if stack.quantity == 0 {
                ship.cargo.swap_remove(index);
            }

            match system.market.iter_mut().find(|l| l.name == item) {
                Some(listing) => listing.quantity = listing.quantity.saturating_add(quantity),
                None => system.market.push(ItemStack {
                    quantity,
                    avg_cost: 0.0,
                    ..template
                }),
            }
            total
        };

        let snapshot = guard.snapshot();
        self.persist_trade("sell", &guard, &snapshot).await?;
        drop(guard);

        info!(player_id = %player_id, item, quantity, total, "sale completed");
        self.notify(&snapshot);
        Ok(snapshot)
    }

    /// Jump to `target`. Range is checked before fuel.
    pub async fn warp(
        &self,
        player_id: PlayerId,
        target: SystemId,
    ) -> Result<PlayerSnapshot, TradeError> {
        let handle = self
            .players
            .get(player_id)
            .await
            .ok_or(TradeError::PlayerNotOnline)?;
        let destination = self
            .universe
            .chart(target)
            .await
            .ok_or(TradeError::SystemNotFound)?;
        let mut guard = TransactionGuard::acquire(&self.universe, &handle).await?;

        let origin = (guard.system.x, guard.system.y);
        let jump = distance(origin, (destination.x, destination.y));
        {
            let player = &mut *guard.player;
            let ship = &mut *guard.ship;

            if jump > ship.stats.jump_range {
                return Err(TradeError::OutOfJumpRange {
                    distance: jump,
                    range: ship.stats.jump_range,
                });
            }
            let fuel = jump * ship.stats.fuel_efficiency;
            if fuel > ship.current_fuel {
                return Err(TradeError::InsufficientFuel {
                    required: fuel,
                    available: ship.current_fuel,
                });
            }

            ship.current_fuel = (ship.current_fuel - fuel).max(0.0);
            player.record.current_system_id = target;
        }

        let snapshot = guard.snapshot();
        self.persist_player("warp", &snapshot).await?;
        let from = guard.system_id();
        drop(guard);

        info!(player_id = %player_id, from = %from, to = %target, distance = jump, "warp completed");
        self.notify(&snapshot);
        Ok(snapshot)
    }

    /// Fill the tanks at the current system.
    pub async fn refuel(&self, player_id: PlayerId) -> Result<RefuelReceipt, TradeError> {
        let mut guard = self.transaction(player_id).await?;

        let cost = {
            let system = &*guard.system;
            let player = &mut *guard.player;
            let ship = &mut *guard.ship;

            if !system.stats.facilities.refueling {
                return Err(TradeError::NoRefuelingFacility);
            }
            let missing = ship.stats.max_fuel - ship.current_fuel;
            if missing <= 0.0 {
                return Err(TradeError::FuelTanksFull);
            }
            let cost = refuel_cost(missing, self.config.fuel_base_price, system.stats.fuel_cost_mult);
            if player.record.credits < cost {
                return Err(TradeError::InsufficientFunds {
                    required: cost,
                    available: player.record.credits,
                });
            }

            player.record.credits = player.record.credits.saturating_sub(cost);
            ship.current_fuel = ship.stats.max_fuel;
            cost
        };

        let snapshot = guard.snapshot();
        self.persist_player("refuel", &snapshot).await?;
        drop(guard);

        info!(player_id = %player_id, cost, "refuel completed");
        self.notify(&snapshot);
        Ok(RefuelReceipt { cost, snapshot })
    }
}

/// Add `quantity` units bought at `unit_price` to the hold, merging into an
/// existing stack of the same item.
fn stow(ship: &mut Ship, listing: &ItemStack, quantity: u32, unit_price: i64) {
    if let Some(stack) = ship.cargo.iter_mut().find(|s| s.name == listing.name) {
        stack.avg_cost = blended_cost(stack.quantity, stack.avg_cost, quantity, unit_price);
        stack.quantity = stack.quantity.saturating_add(quantity);
        return;
    }
    ship.cargo.push(ItemStack {
        quantity,
        avg_cost: blended_cost(0, 0.0, quantity, unit_price),
        ..listing.clone()
    });
}
