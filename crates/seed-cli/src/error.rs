//! Error types for seed-cli

use seed_core::ErrorClass;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from seed-core
    #[error(transparent)]
    Core(#[from] seed_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<seed_fs::Error> for CliError {
    fn from(error: seed_fs::Error) -> Self {
        Self::Core(error.into())
    }
}

impl From<seed_providers::Error> for CliError {
    fn from(error: seed_providers::Error) -> Self {
        Self::Core(error.into())
    }
}

impl CliError {
    /// Process exit code for this error. Usage errors (2) are left to clap.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(e) => match e.class() {
                ErrorClass::Precondition => 3,
                ErrorClass::Structural => 4,
                ErrorClass::StrictResolution => 5,
                ErrorClass::Internal => 1,
            },
            Self::Io(_) => 1,
        }
    }
}
