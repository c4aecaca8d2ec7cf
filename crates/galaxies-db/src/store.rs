//! [`PersistenceGateway`] over `PostgreSQL`.
//!
//! Each gateway call is one statement or one transaction:
//!
//! | Call | Statement |
//! |------|-----------|
//! | `load_universe` | `SELECT` all systems in insertion order |
//! | `save_universe` | one transaction of `INSERT .. ON CONFLICT DO NOTHING` |
//! | `save_player` | one transaction upserting the player, then the ship |
//! | `get_player*` | `players LEFT JOIN ships` |
//! | `get_system_market` / `update_market` | the `market` column |

use galaxies_core::{PersistenceGateway, StoreError};
use galaxies_types::{ItemStack, PlayerId, PlayerSnapshot, StarSystem, SystemId};
use sqlx::PgPool;

use crate::error::DbError;
use crate::postgres::PostgresPool;
use crate::rows::{PlayerRow, SystemRow};

const PLAYER_SELECT: &str = r"
    SELECT p.id, p.external_id, p.name, p.credits, p.current_system_id,
           s.id AS ship_id, s.name AS ship_name, s.chassis, s.origin, s.qualifier,
           s.current_hull, s.current_shield, s.current_fuel,
           s.stats AS ship_stats, s.cargo
    FROM players p
    LEFT JOIN ships s ON s.player_id = p.id";

/// The production persistence gateway.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap a connected pool.
    pub fn new(pool: &PostgresPool) -> Self {
        Self {
            pool: pool.pool().clone(),
        }
    }

    async fn fetch_universe(&self) -> Result<Vec<StarSystem>, DbError> {
        let rows = sqlx::query_as::<_, SystemRow>(
            r"SELECT id, name, x, y, political, economic, social, stats, market
              FROM systems
              ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(StarSystem::try_from).collect()
    }

    async fn insert_universe(&self, systems: &[StarSystem]) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        for system in systems {
            sqlx::query(
                r"INSERT INTO systems (id, name, x, y, political, economic, social, stats, market)
                  VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                  ON CONFLICT (id) DO NOTHING",
            )
            .bind(system.id.into_inner())
            .bind(&system.name)
            .bind(system.x)
            .bind(system.y)
            .bind(i16::from(system.political.ordinal()))
            .bind(i16::from(system.economic.ordinal()))
            .bind(i16::from(system.social.ordinal()))
            .bind(serde_json::to_value(&system.stats)?)
            .bind(serde_json::to_value(&system.market)?)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::info!(systems = systems.len(), "Seeded universe");
        Ok(())
    }

    async fn upsert_player(&self, snapshot: &PlayerSnapshot) -> Result<(), DbError> {
        let player = &snapshot.player;
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"INSERT INTO players (id, external_id, name, credits, current_system_id, last_login)
              VALUES ($1, $2, $3, $4, $5, NOW())
              ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                credits = EXCLUDED.credits,
                current_system_id = EXCLUDED.current_system_id,
                last_login = NOW()",
        )
        .bind(player.id.into_inner())
        .bind(&player.external_id)
        .bind(&player.name)
        .bind(player.credits)
        .bind(player.current_system_id.into_inner())
        .execute(&mut *tx)
        .await?;

        if let Some(ship) = &snapshot.ship {
            sqlx::query(
                r"INSERT INTO ships (
                    id, player_id, name, chassis, origin, qualifier,
                    current_hull, current_shield, current_fuel, stats, cargo
                  )
                  VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                  ON CONFLICT (player_id) DO UPDATE SET
                    id = EXCLUDED.id,
                    name = EXCLUDED.name,
                    chassis = EXCLUDED.chassis,
                    origin = EXCLUDED.origin,
                    qualifier = EXCLUDED.qualifier,
                    current_hull = EXCLUDED.current_hull,
                    current_shield = EXCLUDED.current_shield,
                    current_fuel = EXCLUDED.current_fuel,
                    stats = EXCLUDED.stats,
                    cargo = EXCLUDED.cargo",
            )
            .bind(ship.id.into_inner())
            .bind(player.id.into_inner())
            .bind(&ship.name)
            .bind(i16::from(ship.chassis.ordinal()))
            .bind(i16::from(ship.origin.ordinal()))
            .bind(i16::from(ship.qualifier.ordinal()))
            .bind(ship.current_hull)
            .bind(ship.current_shield)
            .bind(ship.current_fuel)
            .bind(serde_json::to_value(&ship.stats)?)
            .bind(serde_json::to_value(&ship.cargo)?)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(player_id = %player.id, credits = player.credits, "Saved player");
        Ok(())
    }

    async fn fetch_player(&self, filter: PlayerFilter<'_>) -> Result<Option<PlayerSnapshot>, DbError> {
        let query = match filter {
            PlayerFilter::Id(_) => format!("{PLAYER_SELECT} WHERE p.id = $1"),
            PlayerFilter::External(_) => format!("{PLAYER_SELECT} WHERE p.external_id = $1"),
        };
        let query = sqlx::query_as::<_, PlayerRow>(&query);
        let query = match filter {
            PlayerFilter::Id(id) => query.bind(id.into_inner()),
            PlayerFilter::External(external_id) => query.bind(external_id),
        };

        query
            .fetch_optional(&self.pool)
            .await?
            .map(PlayerSnapshot::try_from)
            .transpose()
    }

    async fn fetch_market(&self, id: SystemId) -> Result<Vec<ItemStack>, DbError> {
        let market: serde_json::Value =
            sqlx::query_scalar(r"SELECT market FROM systems WHERE id = $1")
                .bind(id.into_inner())
                .fetch_one(&self.pool)
                .await?;
        Ok(serde_json::from_value(market)?)
    }

    async fn store_market(&self, id: SystemId, items: &[ItemStack]) -> Result<(), DbError> {
        let result = sqlx::query(r"UPDATE systems SET market = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(serde_json::to_value(items)?)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::Postgres(sqlx::Error::RowNotFound));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum PlayerFilter<'a> {
    Id(PlayerId),
    External(&'a str),
}

impl PersistenceGateway for PostgresStore {
    async fn load_universe(&self) -> Result<Vec<StarSystem>, StoreError> {
        Ok(self.fetch_universe().await?)
    }

    async fn save_universe(&self, systems: &[StarSystem]) -> Result<(), StoreError> {
        Ok(self.insert_universe(systems).await?)
    }

    async fn save_player(&self, snapshot: &PlayerSnapshot) -> Result<(), StoreError> {
        Ok(self.upsert_player(snapshot).await?)
    }

    async fn get_player(&self, id: PlayerId) -> Result<Option<PlayerSnapshot>, StoreError> {
        Ok(self.fetch_player(PlayerFilter::Id(id)).await?)
    }

    async fn get_player_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<PlayerSnapshot>, StoreError> {
        Ok(self.fetch_player(PlayerFilter::External(external_id)).await?)
    }

    async fn get_system_market(&self, id: SystemId) -> Result<Vec<ItemStack>, StoreError> {
        Ok(self.fetch_market(id).await?)
    }

    async fn update_market(&self, id: SystemId, items: &[ItemStack]) -> Result<(), StoreError> {
        Ok(self.store_market(id, items).await?)
    }
}
