//! Error types for seed-providers

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A credential environment variable is unset or empty
    #[error("{provider} needs the {env} environment variable")]
    MissingCredential {
        provider: &'static str,
        env: &'static str,
    },

    /// The credential cannot be sent in a header
    #[error("{provider} credential contains invalid characters")]
    InvalidCredential { provider: &'static str },

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl From<Error> for seed_core::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::MissingCredential { .. }
            | Error::InvalidCredential { .. }
            | Error::InvalidBaseUrl { .. } => {
                seed_core::Error::precondition(error.to_string())
            }
            Error::Client(_) => seed_core::Error::invalid_config(error.to_string()),
        }
    }
}
