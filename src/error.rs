//! Error types for the clustered session data store.

use sea_orm::DbErr;
use tower_sessions::session_store;

use crate::key::SessionKey;

/// Errors raised by [`SessionDataStore`](crate::SessionDataStore) and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An invalid or forbidden setup value, or a setup change after the store started.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The session table could not be created or migrated during startup.
    #[error("Failed to prepare session table: {message}")]
    SchemaBootstrap {
        message: String,
        #[source]
        source: DbErr,
    },

    /// The stored attribute map of a session could not be decoded.
    #[error("Unreadable session data for {key}")]
    UnreadableSession {
        key: SessionKey,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Backend I/O failure during load, store, delete or exists.
    #[error(transparent)]
    Backend(#[from] DbErr),

    /// The attribute map could not be encoded.
    #[error("Failed to encode session attributes: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub(crate) fn bootstrap(message: impl Into<String>, source: DbErr) -> Self {
        Self::SchemaBootstrap {
            message: message.into(),
            source,
        }
    }

    /// Returns true for a session whose persisted data exists but cannot be read.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, Self::UnreadableSession { .. })
    }
}

impl From<Error> for session_store::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::UnreadableSession { .. } => session_store::Error::Decode(err.to_string()),
            Error::Encode(e) => session_store::Error::Encode(e.to_string()),
            other => session_store::Error::Backend(other.to_string()),
        }
    }
}

/// Result type for session data store operations.
pub type Result<T> = std::result::Result<T, Error>;
