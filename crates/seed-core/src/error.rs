//! Error types for seed-core

use seed_blocks::RowKey;

/// Result type for seed-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in seed-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required input is missing before any work starts
    #[error("{message}")]
    Precondition { message: String },

    /// No job with this name is built in or configured
    #[error("Unknown job: {name}")]
    UnknownJob { name: String },

    /// Configuration values or job definitions are invalid
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The label source block has no rows to take names from
    #[error("No rows found in label source {block}")]
    EmptyLabelSource { block: String },

    /// A target row has no matching name in the label source
    #[error("Key {key} exists in {target} but not in {block}")]
    LabelMissing {
        key: RowKey,
        target: String,
        block: String,
    },

    /// The run would produce no rows at all
    #[error("Job {job} has no canonical keys to synchronize")]
    EmptyRegistry { job: String },

    /// Strict mode saw at least one key fall back past the primary tier
    #[error("{} key(s) could not be resolved from a provider: {}", .failures.len(), .failures.join("; "))]
    StrictResolution { failures: Vec<String> },

    // Transparent wrappers for underlying crate errors
    /// Block location, parsing, rendering or splicing error
    #[error(transparent)]
    Blocks(#[from] seed_blocks::Error),

    /// Filesystem error from seed-fs
    #[error(transparent)]
    Fs(#[from] seed_fs::Error),
}

/// Coarse error taxonomy used to pick exit codes and log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing document, credential, job or valid configuration
    Precondition,
    /// A block, anchor or row is missing or malformed
    Structural,
    /// Strict mode rejected fallback values
    StrictResolution,
    /// Unexpected I/O failure
    Internal,
}

impl Error {
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Precondition { .. } | Self::UnknownJob { .. } | Self::InvalidConfig { .. } => {
                ErrorClass::Precondition
            }
            Self::EmptyLabelSource { .. } | Self::LabelMissing { .. } | Self::EmptyRegistry { .. } => {
                ErrorClass::Structural
            }
            Self::StrictResolution { .. } => ErrorClass::StrictResolution,
            Self::Blocks(seed_blocks::Error::InvalidPattern { .. }) => ErrorClass::Precondition,
            Self::Blocks(seed_blocks::Error::Regex(_)) => ErrorClass::Internal,
            Self::Blocks(_) => ErrorClass::Structural,
            Self::Fs(
                seed_fs::Error::NotFound { .. }
                | seed_fs::Error::ConfigParse { .. }
                | seed_fs::Error::UnsupportedFormat { .. },
            ) => ErrorClass::Precondition,
            Self::Fs(_) => ErrorClass::Internal,
        }
    }
}
