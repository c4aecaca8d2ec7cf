//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Players, ships and star systems each get a strongly-typed ID so that a
//! ship id can never be passed where a system id is expected. All IDs use
//! UUID v7 (time-ordered) for efficient database indexing.
//!
//! Trade goods are identified by their catalog name rather than an id; see
//! [`crate::ItemStack`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a player (pilot) account.
    PlayerId
}

define_id! {
    /// Unique identifier for a ship.
    ShipId
}

define_id! {
    /// Unique identifier for a star system.
    SystemId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = PlayerId::new();
        let b = PlayerId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn ids_round_trip_through_uuid() {
        let id = SystemId::new();
        let raw: Uuid = id.into();
        assert_eq!(SystemId::from(raw), id);
    }

    #[test]
    fn ids_display_as_plain_uuid() {
        let raw = Uuid::nil();
        assert_eq!(ShipId::from(raw).to_string(), raw.to_string());
    }
}
