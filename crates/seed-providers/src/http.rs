//! Shared HTTP plumbing for the providers

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response, Url};
use seed_core::LookupError;
use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Client with the run's user agent, timeout and fixed headers.
pub(crate) fn client(user_agent: &str, timeout: Duration, headers: HeaderMap) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .timeout(timeout)
        .build()?)
}

pub(crate) fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static("application/json"),
    );
    headers
}

pub(crate) fn parse_base_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| Error::InvalidBaseUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if parsed.cannot_be_a_base() {
        return Err(Error::InvalidBaseUrl {
            url: url.to_string(),
            reason: "not a base URL".into(),
        });
    }
    Ok(parsed)
}

/// Sends the request and decodes a JSON body from a success response.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> std::result::Result<T, LookupError> {
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(e, timeout))?;
    let response = check_status(response)?;
    response
        .json::<T>()
        .await
        .map_err(|e| LookupError::Decode(e.to_string()))
}

fn check_status(response: Response) -> std::result::Result<Response, LookupError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(LookupError::Status(status.as_u16()))
    }
}

fn transport_error(error: reqwest::Error, timeout: Duration) -> LookupError {
    if error.is_timeout() {
        LookupError::Timeout(timeout)
    } else {
        LookupError::Transport(error.without_url().to_string())
    }
}
