//! Lookup providers for seed-sync
//!
//! - [`WikipediaSummaryProvider`]: page image from the REST page summary
//! - [`UnsplashSearchProvider`]: first landscape photo of a search, cropped
//!
//! Both implement [`seed_core::LookupProvider`]. Their payload handling
//! ([`wikipedia::pick_image`], [`unsplash::first_raw_url`]) is kept pure so it
//! can be tested without a network.

pub mod error;
mod http;
pub mod unsplash;
pub mod wikipedia;

use std::sync::Arc;

use seed_core::{LookupProvider, ProviderKind, SyncSettings};

pub use error::{Error, Result};
pub use unsplash::UnsplashSearchProvider;
pub use wikipedia::WikipediaSummaryProvider;

/// Builds the provider for `kind` with the run's user agent and timeout.
///
/// # Errors
///
/// Returns [`Error::MissingCredential`] when the provider needs a credential
/// that is not set.
pub fn provider_for(kind: ProviderKind, settings: &SyncSettings) -> Result<Arc<dyn LookupProvider>> {
    let provider: Arc<dyn LookupProvider> = match kind {
        ProviderKind::Wikipedia => Arc::new(WikipediaSummaryProvider::new(
            &settings.user_agent,
            settings.request_timeout,
        )?),
        ProviderKind::Unsplash => Arc::new(UnsplashSearchProvider::from_env(
            &settings.user_agent,
            settings.request_timeout,
        )?),
    };
    tracing::debug!(provider = provider.name(), "Created lookup provider");
    Ok(provider)
}
