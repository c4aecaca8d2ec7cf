//! Error types for the server binary.

/// Top-level error for the server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: galaxies_core::ConfigError,
    },

    /// Database connection or migration failed.
    #[error("database error: {source}")]
    Database {
        /// The underlying database error.
        #[from]
        source: galaxies_db::DbError,
    },

    /// Loading or generating the universe failed.
    #[error("bootstrap error: {source}")]
    Bootstrap {
        /// The underlying engine error.
        #[from]
        source: galaxies_core::TradeError,
    },

    /// The API server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: galaxies_api::ServerError,
    },
}
