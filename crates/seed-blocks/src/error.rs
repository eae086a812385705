//! Error types for seed-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Block not found: {block}")]
    BlockNotFound { block: String },

    #[error("Anchor block not found: {block}")]
    AnchorNotFound { block: String },

    #[error("Block is not terminated: {block}")]
    Unterminated { block: String },

    #[error("Malformed row at byte {offset}: {message}")]
    MalformedRow { offset: usize, message: String },

    #[error("Cannot render {block}: {reason}")]
    NotRenderable { block: String, reason: String },

    #[error("Invalid pattern for {block}: {reason}")]
    InvalidPattern { block: String, reason: String },

    #[error("Invalid block pattern: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    pub(crate) fn malformed(offset: usize, message: impl Into<String>) -> Self {
        Self::MalformedRow {
            offset,
            message: message.into(),
        }
    }
}
