//! Lookup provider abstraction

use std::time::Duration;

use async_trait::async_trait;

/// Why a single lookup produced nothing usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The request could not be sent or the connection failed
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("HTTP status {0}")]
    Status(u16),

    /// The response body was not the expected shape
    #[error("unreadable response: {0}")]
    Decode(String),

    /// No answer arrived within the time limit
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Remote source that maps a title to a candidate value.
///
/// `Ok(None)` means the service answered but had nothing for this title.
#[async_trait]
pub trait LookupProvider: Send + Sync {
    /// Short name used in notes and logs.
    fn name(&self) -> &str;

    async fn lookup(&self, title: &str) -> Result<Option<String>, LookupError>;
}
