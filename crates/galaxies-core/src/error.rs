//! Error types for the transaction engine and its collaborators.
//!
//! Every engine operation returns a [`TradeError`]. Each variant falls into
//! one [`ErrorKind`], which tells the caller whether anything happened:
//!
//! | Kind | Detected | Side effects |
//! |------|----------|--------------|
//! | `Configuration` | before mutation | none |
//! | `Validation` | before mutation | none |
//! | `NotFound` | before mutation | none |
//! | `Persistence` | after mutation | in-memory change stands |

use galaxies_gen::GenError;

/// Broad category of a [`TradeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad generation input or an unusable world.
    Configuration,
    /// A precondition failed; nothing was changed.
    Validation,
    /// The durable store failed after memory was already updated.
    Persistence,
    /// An entity is absent from the registry or the store.
    NotFound,
}

/// Errors reported by a [`PersistenceGateway`](crate::gateway::PersistenceGateway).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backend rejected or failed the call.
    #[error("store backend error: {0}")]
    Backend(String),

    /// The call did not finish within its deadline.
    #[error("store call {operation} timed out")]
    Timeout {
        /// Which gateway call timed out.
        operation: &'static str,
    },

    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors surfaced by engine operations.
#[derive(Debug, thiserror::Error)]
pub enum TradeError {
    /// The player has no live session.
    #[error("player is not online")]
    PlayerNotOnline,

    /// The player exists neither in memory nor in the store.
    #[error("player not found")]
    PlayerNotFound,

    /// No system with that id.
    #[error("system not found")]
    SystemNotFound,

    /// The item is not listed where it was looked for.
    #[error("item not found: {item}")]
    ItemNotFound {
        /// Item name as requested.
        item: String,
    },

    /// Quantities must be positive.
    #[error("quantity must be positive")]
    InvalidQuantity,

    /// The market holds fewer units than requested.
    #[error("market out of stock (requested {requested}, available {available})")]
    InsufficientStock {
        /// Units requested.
        requested: u32,
        /// Units on the market.
        available: u32,
    },

    /// The hold holds fewer units than the player tried to sell.
    #[error("not enough cargo (requested {requested}, owned {owned})")]
    InsufficientCargo {
        /// Units requested.
        requested: u32,
        /// Units aboard.
        owned: u32,
    },

    /// The player cannot afford the transaction.
    #[error("insufficient credits (need {required}, have {available})")]
    InsufficientFunds {
        /// Credits the transaction costs.
        required: i64,
        /// Credits the player holds.
        available: i64,
    },

    /// The hold cannot take the cargo.
    #[error("cargo hold full (requested {requested}, free {free})")]
    CargoFull {
        /// Units requested.
        requested: u32,
        /// Free cargo units.
        free: u32,
    },

    /// Target is beyond the ship's jump drive.
    #[error("target too far ({distance:.1} LY > {range:.1} LY)")]
    OutOfJumpRange {
        /// Distance to the target.
        distance: f64,
        /// Ship jump range.
        range: f64,
    },

    /// Not enough fuel for the jump.
    #[error("insufficient fuel (need {required:.1}, have {available:.1})")]
    InsufficientFuel {
        /// Fuel the jump burns.
        required: f64,
        /// Fuel in the tanks.
        available: f64,
    },

    /// The current system sells no fuel.
    #[error("system has no refueling station")]
    NoRefuelingFacility,

    /// Nothing to refuel.
    #[error("fuel tanks already full")]
    FuelTanksFull,

    /// The player has not picked a ship yet.
    #[error("player has no ship")]
    NoShip,

    /// Onboarding was attempted without a live session.
    #[error("session expired")]
    SessionMissing,

    /// Callsign fails the naming rules.
    #[error("invalid callsign: must be 3-18 letters, digits or underscores")]
    InvalidCallsign,

    /// Another player already uses the callsign.
    #[error("callsign already taken")]
    CallsignTaken,

    /// The player already owns a ship.
    #[error("player is already onboarded")]
    AlreadyOnboarded,

    /// There is no system to start in.
    #[error("universe is empty")]
    EmptyUniverse,

    /// The durable store failed. Any in-memory change has been kept.
    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),

    /// Procedural generation failed.
    #[error("generation failed: {0}")]
    Generation(#[from] GenError),
}

impl TradeError {
    /// Category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Generation(_) | Self::EmptyUniverse => ErrorKind::Configuration,
            Self::Persistence(StoreError::NotFound) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Persistence,
            Self::PlayerNotOnline
            | Self::PlayerNotFound
            | Self::SystemNotFound
            | Self::ItemNotFound { .. }
            | Self::SessionMissing => ErrorKind::NotFound,
            Self::InvalidQuantity
            | Self::InsufficientStock { .. }
            | Self::InsufficientCargo { .. }
            | Self::InsufficientFunds { .. }
            | Self::CargoFull { .. }
            | Self::OutOfJumpRange { .. }
            | Self::InsufficientFuel { .. }
            | Self::NoRefuelingFacility
            | Self::FuelTanksFull
            | Self::NoShip
            | Self::InvalidCallsign
            | Self::CallsignTaken
            | Self::AlreadyOnboarded => ErrorKind::Validation,
        }
    }

    /// Whether the error was raised after memory had already changed.
    pub const fn is_post_commit(&self) -> bool {
        matches!(self.kind(), ErrorKind::Persistence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_the_taxonomy() {
        assert_eq!(TradeError::PlayerNotOnline.kind(), ErrorKind::NotFound);
        assert_eq!(TradeError::FuelTanksFull.kind(), ErrorKind::Validation);
        assert_eq!(
            TradeError::Persistence(StoreError::Timeout { operation: "save_player" }).kind(),
            ErrorKind::Persistence
        );
        assert_eq!(TradeError::EmptyUniverse.kind(), ErrorKind::Configuration);
        assert!(TradeError::Persistence(StoreError::Backend(String::from("down"))).is_post_commit());
        assert!(!TradeError::CargoFull { requested: 3, free: 1 }.is_post_commit());
    }

    #[test]
    fn messages_carry_the_numbers() {
        let err = TradeError::OutOfJumpRange {
            distance: 18.04,
            range: 15.0,
        };
        assert_eq!(err.to_string(), "target too far (18.0 LY > 15.0 LY)");

        let err = TradeError::InsufficientFunds {
            required: 348,
            available: 100,
        };
        assert_eq!(err.to_string(), "insufficient credits (need 348, have 100)");
    }
}
