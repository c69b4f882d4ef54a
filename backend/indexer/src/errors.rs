//! Indexer error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    /// Reading or writing the SQLite event store failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The bundled schema migrations could not be applied at startup.
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Transport failure talking to the Soroban RPC.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A `getEvents` body did not match the expected response shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing `CONTRACT_ID` or an unparsable numeric setting.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The RPC rejected the request outright; retrying will not help.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The RPC answered without a result for a campaign event query.
    #[error("Event parse error: {0}")]
    EventParse(String),
}

pub type Result<T> = std::result::Result<T, IndexerError>;
