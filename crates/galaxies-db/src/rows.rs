//! Row types and their conversion to domain values.
//!
//! Archetype tags are stored as `SMALLINT` ordinals; stat blocks, markets
//! and cargo holds as `JSONB`.

use galaxies_types::{
    Chassis, EconomicStatus, ItemStack, Origin, PlayerId, PlayerRecord, PlayerSnapshot,
    PoliticalStatus, Qualifier, Ship, ShipId, SocialStatus, StarSystem, SystemId,
};
use uuid::Uuid;

use crate::error::DbError;

/// Decode a stored ordinal through an enum's `from_ordinal`.
fn decode<T>(
    field: &'static str,
    value: i16,
    from_ordinal: fn(i64) -> Option<T>,
) -> Result<T, DbError> {
    from_ordinal(i64::from(value)).ok_or(DbError::UnknownOrdinal { field, value })
}

/// A row from the `systems` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SystemRow {
    /// System id.
    pub id: Uuid,
    /// Catalogue name.
    pub name: String,
    /// Grid x.
    pub x: i32,
    /// Grid y.
    pub y: i32,
    /// Political ordinal.
    pub political: i16,
    /// Economic ordinal.
    pub economic: i16,
    /// Social ordinal.
    pub social: i16,
    /// Derived stats as JSON.
    pub stats: serde_json::Value,
    /// Market listing as JSON.
    pub market: serde_json::Value,
}

impl TryFrom<SystemRow> for StarSystem {
    type Error = DbError;

    fn try_from(row: SystemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SystemId(row.id),
            name: row.name,
            x: row.x,
            y: row.y,
            political: decode("political", row.political, PoliticalStatus::from_ordinal)?,
            economic: decode("economic", row.economic, EconomicStatus::from_ordinal)?,
            social: decode("social", row.social, SocialStatus::from_ordinal)?,
            stats: serde_json::from_value(row.stats)?,
            market: serde_json::from_value(row.market)?,
        })
    }
}

/// A player joined with their ship, if any.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlayerRow {
    /// Player id.
    pub id: Uuid,
    /// Identity provider id.
    pub external_id: String,
    /// Callsign, empty for drafts.
    pub name: String,
    /// Balance.
    pub credits: i64,
    /// Docked system.
    pub current_system_id: Uuid,
    /// Ship id.
    pub ship_id: Option<Uuid>,
    /// Ship model name.
    pub ship_name: Option<String>,
    /// Chassis ordinal.
    pub chassis: Option<i16>,
    /// Origin ordinal.
    pub origin: Option<i16>,
    /// Qualifier ordinal.
    pub qualifier: Option<i16>,
    /// Hull points.
    pub current_hull: Option<f64>,
    /// Shield points.
    pub current_shield: Option<f64>,
    /// Fuel in the tanks.
    pub current_fuel: Option<f64>,
    /// Ship stats as JSON.
    pub ship_stats: Option<serde_json::Value>,
    /// Cargo hold as JSON.
    pub cargo: Option<serde_json::Value>,
}

impl PlayerRow {
    fn ship(&self) -> Result<Option<Ship>, DbError> {
        let (
            Some(id),
            Some(name),
            Some(chassis),
            Some(origin),
            Some(qualifier),
            Some(stats),
        ) = (
            self.ship_id,
            self.ship_name.clone(),
            self.chassis,
            self.origin,
            self.qualifier,
            self.ship_stats.clone(),
        )
        else {
            return Ok(None);
        };

        let cargo: Vec<ItemStack> = match self.cargo.clone() {
            Some(value) => serde_json::from_value(value)?,
            None => Vec::new(),
        };

        Ok(Some(Ship {
            id: ShipId(id),
            name,
            chassis: decode("chassis", chassis, Chassis::from_ordinal)?,
            origin: decode("origin", origin, Origin::from_ordinal)?,
            qualifier: decode("qualifier", qualifier, Qualifier::from_ordinal)?,
            current_hull: self.current_hull.unwrap_or_default(),
            current_shield: self.current_shield.unwrap_or_default(),
            current_fuel: self.current_fuel.unwrap_or_default(),
            stats: serde_json::from_value(stats)?,
            cargo,
        }))
    }
}

impl TryFrom<PlayerRow> for PlayerSnapshot {
    type Error = DbError;

    fn try_from(row: PlayerRow) -> Result<Self, Self::Error> {
        let ship = row.ship()?;
        Ok(Self {
            player: PlayerRecord {
                id: PlayerId(row.id),
                external_id: row.external_id,
                name: row.name,
                credits: row.credits,
                current_system_id: SystemId(row.current_system_id),
            },
            ship,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use galaxies_types::SystemStats;

    use super::*;

    fn system_row() -> SystemRow {
        SystemRow {
            id: Uuid::new_v4(),
            name: String::from("AB-1234-C-5678"),
            x: 3,
            y: -4,
            political: 0,
            economic: 18,
            social: 12,
            stats: serde_json::to_value(SystemStats::baseline()).unwrap(),
            market: serde_json::json!([]),
        }
    }

    #[test]
    fn system_row_decodes() {
        let system = StarSystem::try_from(system_row()).unwrap();
        assert_eq!(system.political, PoliticalStatus::ImperialCore);
        assert_eq!(system.economic, EconomicStatus::FreePort);
        assert_eq!(system.stats, SystemStats::baseline());
        assert!(system.market.is_empty());
    }

    #[test]
    fn bad_ordinal_is_reported() {
        let mut row = system_row();
        row.social = 99;
        let err = StarSystem::try_from(row).unwrap_err();
        assert!(matches!(
            err,
            DbError::UnknownOrdinal {
                field: "social",
                value: 99
            }
        ));
    }

    #[test]
    fn draft_player_has_no_ship() {
        let row = PlayerRow {
            id: Uuid::new_v4(),
            external_id: String::from("auth0|abc"),
            name: String::new(),
            credits: 0,
            current_system_id: Uuid::new_v4(),
            ship_id: None,
            ship_name: None,
            chassis: None,
            origin: None,
            qualifier: None,
            current_hull: None,
            current_shield: None,
            current_fuel: None,
            ship_stats: None,
            cargo: None,
        };
        let snapshot = PlayerSnapshot::try_from(row).unwrap();
        assert!(snapshot.ship.is_none());
        assert!(snapshot.player.name.is_empty());
    }
}
