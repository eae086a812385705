//! Unsplash photo search lookups

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use seed_core::{LookupError, LookupProvider, ProviderKind};
use serde::Deserialize;

use crate::http;
use crate::{Error, Result};

pub const SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

/// Parameters appended to raw image URLs.
pub const CROP_PARAMS: &str = "auto=format&fit=crop&w=1200&q=80";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub results: Vec<Photo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Photo {
    #[serde(default)]
    pub urls: PhotoUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PhotoUrls {
    #[serde(default)]
    pub raw: Option<String>,
}

/// Raw URL of the first result, if it has one.
pub fn first_raw_url(payload: &SearchPayload) -> Option<&str> {
    payload
        .results
        .first()
        .and_then(|photo| photo.urls.raw.as_deref())
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
}

/// Appends the crop parameters to a raw image URL.
pub fn crop_url(raw: &str) -> String {
    let separator = if raw.contains('?') { '&' } else { '?' };
    format!("{raw}{separator}{CROP_PARAMS}")
}

/// Searches landscape photos and returns the first result, cropped.
#[derive(Debug, Clone)]
pub struct UnsplashSearchProvider {
    http: Client,
    search_url: Url,
    timeout: Duration,
}

impl UnsplashSearchProvider {
    pub fn new(access_key: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        Self::with_search_url(SEARCH_URL, access_key, user_agent, timeout)
    }

    /// Reads the access key from `UNSPLASH_ACCESS_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] when the variable is unset or blank.
    pub fn from_env(user_agent: &str, timeout: Duration) -> Result<Self> {
        let key = access_key_from_env()?;
        Self::new(&key, user_agent, timeout)
    }

    pub fn with_search_url(
        search_url: &str,
        access_key: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let mut headers = http::json_headers();
        let authorization = HeaderValue::from_str(&format!("Client-ID {}", access_key.trim()))
            .map_err(|_| Error::InvalidCredential {
                provider: ProviderKind::Unsplash.as_str(),
            })?;
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(
            HeaderName::from_static("accept-version"),
            HeaderValue::from_static("v1"),
        );

        Ok(Self {
            http: http::client(user_agent, timeout, headers)?,
            search_url: http::parse_base_url(search_url)?,
            timeout,
        })
    }

    pub fn search_url(&self, query: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("per_page", "1")
            .append_pair("page", "1")
            .append_pair("orientation", "landscape")
            .append_pair("content_filter", "high");
        url
    }
}

pub const ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

/// Access key from the environment, trimmed.
pub fn access_key_from_env() -> Result<String> {
    std::env::var(ACCESS_KEY_ENV)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(Error::MissingCredential {
            provider: ProviderKind::Unsplash.as_str(),
            env: ACCESS_KEY_ENV,
        })
}

#[async_trait]
impl LookupProvider for UnsplashSearchProvider {
    fn name(&self) -> &str {
        "unsplash"
    }

    async fn lookup(&self, title: &str) -> std::result::Result<Option<String>, LookupError> {
        let url = self.search_url(title);
        tracing::debug!(query = title, "Searching photos");

        let payload: SearchPayload = http::get_json(self.http.get(url), self.timeout).await?;
        Ok(first_raw_url(&payload).map(crop_url))
    }
}
