//! Error types for the `PostgreSQL` gateway.
//!
//! Internally every query returns [`DbError`]. At the gateway boundary it is
//! folded into the engine's [`StoreError`], with unique violations becoming
//! [`StoreError::Conflict`].

use galaxies_core::StoreError;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A JSONB column could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored archetype ordinal does not name a known variant.
    #[error("unknown {field} ordinal {value}")]
    UnknownOrdinal {
        /// Column holding the bad value.
        field: &'static str,
        /// The stored value.
        value: i16,
    },

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DbError {
    /// Whether the error is a unique-constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Postgres(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        if err.is_unique_violation() {
            return Self::Conflict(err.to_string());
        }
        match err {
            DbError::Postgres(sqlx::Error::RowNotFound) => Self::NotFound,
            other => Self::Backend(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rows_map_to_not_found() {
        let err: StoreError = DbError::Postgres(sqlx::Error::RowNotFound).into();
        assert_eq!(err, StoreError::NotFound);
    }

    #[test]
    fn other_failures_map_to_backend() {
        let err: StoreError = DbError::UnknownOrdinal {
            field: "chassis",
            value: 42,
        }
        .into();
        assert_eq!(
            err,
            StoreError::Backend(String::from("unknown chassis ordinal 42"))
        );
    }
}
