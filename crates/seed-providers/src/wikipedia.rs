//! Wikipedia REST page summary lookups

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderValue};
use reqwest::{Client, Url};
use seed_core::{LookupError, LookupProvider};
use serde::Deserialize;

use crate::Result;
use crate::http;

pub const SUMMARY_BASE_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary/";

/// Subset of the page summary payload that carries images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SummaryPayload {
    #[serde(default)]
    pub thumbnail: Option<ImageRef>,
    #[serde(default)]
    pub originalimage: Option<ImageRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub source: Option<String>,
}

/// Thumbnail first, then the original image; blank sources are skipped.
pub fn pick_image(payload: &SummaryPayload) -> Option<String> {
    [&payload.thumbnail, &payload.originalimage]
        .into_iter()
        .flatten()
        .filter_map(|image| image.source.as_deref())
        .map(str::trim)
        .find(|source| !source.is_empty())
        .map(str::to_string)
}

/// Looks titles up through the page summary endpoint.
#[derive(Debug, Clone)]
pub struct WikipediaSummaryProvider {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl WikipediaSummaryProvider {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        Self::with_base_url(SUMMARY_BASE_URL, user_agent, timeout)
    }

    /// Provider against another summary endpoint (a mirror or a test server).
    pub fn with_base_url(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let mut headers = http::json_headers();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        Ok(Self {
            http: http::client(user_agent, timeout, headers)?,
            base_url: http::parse_base_url(base_url)?,
            timeout,
        })
    }

    /// Summary URL for `title`, encoded as a single path segment.
    pub fn summary_url(&self, title: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(title);
        }
        url
    }
}

#[async_trait]
impl LookupProvider for WikipediaSummaryProvider {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn lookup(&self, title: &str) -> std::result::Result<Option<String>, LookupError> {
        let url = self.summary_url(title);
        tracing::debug!(%url, "Fetching page summary");

        let payload: SummaryPayload = http::get_json(self.http.get(url), self.timeout).await?;
        Ok(pick_image(&payload))
    }
}
