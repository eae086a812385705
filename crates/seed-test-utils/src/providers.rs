//! Scripted lookup providers.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use seed_core::{LookupError, LookupProvider};

/// Answers from a fixed `title -> value` table; unknown titles get `None`.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    answers: BTreeMap<String, String>,
}

impl StaticProvider {
    pub fn new<I, K, V>(answers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            answers: answers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl LookupProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn lookup(&self, title: &str) -> Result<Option<String>, LookupError> {
        Ok(self.answers.get(title).cloned())
    }
}

/// Fails every lookup with the same error.
#[derive(Debug, Clone)]
pub struct FailingProvider {
    error: LookupError,
}

impl FailingProvider {
    pub fn new(error: LookupError) -> Self {
        Self { error }
    }

    /// Fails with HTTP 503.
    pub fn unavailable() -> Self {
        Self::new(LookupError::Status(503))
    }
}

#[async_trait]
impl LookupProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn lookup(&self, _title: &str) -> Result<Option<String>, LookupError> {
        Err(self.error.clone())
    }
}

/// Sleeps before answering with a fixed value.
#[derive(Debug, Clone)]
pub struct SlowProvider {
    delay: Duration,
    value: String,
}

impl SlowProvider {
    pub fn new(delay: Duration, value: impl Into<String>) -> Self {
        Self {
            delay,
            value: value.into(),
        }
    }
}

#[async_trait]
impl LookupProvider for SlowProvider {
    fn name(&self) -> &str {
        "slow"
    }

    async fn lookup(&self, _title: &str) -> Result<Option<String>, LookupError> {
        tokio::time::sleep(self.delay).await;
        Ok(Some(self.value.clone()))
    }
}

/// Wraps another provider and records every title it was asked for.
pub struct CountingProvider {
    inner: Arc<dyn LookupProvider>,
    calls: AtomicUsize,
    titles: std::sync::Mutex<Vec<String>>,
}

impl CountingProvider {
    pub fn new(inner: Arc<dyn LookupProvider>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            titles: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Titles in the order they were looked up.
    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }
}

#[async_trait]
impl LookupProvider for CountingProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn lookup(&self, title: &str) -> Result<Option<String>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.titles.lock().unwrap().push(title.to_string());
        self.inner.lookup(title).await
    }
}
