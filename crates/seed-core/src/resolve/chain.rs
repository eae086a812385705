//! Tiered value resolution

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use seed_blocks::RowKey;

use super::ExistingRowIndex;
use super::pacer::Pacer;
use super::provider::{LookupError, LookupProvider};
use crate::job::SyntheticFallback;
use crate::registry::{CanonicalEntry, CanonicalRegistry};

/// Which tier produced a value. Provenance only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Override,
    Primary,
    FallbackExisting,
    FallbackSynthetic,
}

impl Tier {
    pub const ALL: [Tier; 4] = [
        Tier::Override,
        Tier::Primary,
        Tier::FallbackExisting,
        Tier::FallbackSynthetic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Override => "override",
            Self::Primary => "primary",
            Self::FallbackExisting => "fallback-existing",
            Self::FallbackSynthetic => "fallback-synthetic",
        }
    }

    /// True when no provider supplied the value.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FallbackExisting | Self::FallbackSynthetic)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved value for one canonical key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    pub key: RowKey,
    pub value: String,
    pub tier: Tier,
    /// Why earlier tiers did not produce the value, in the order they failed.
    pub notes: Vec<String>,
}

/// Override, then each provider, then the existing value, then the synthetic
/// fallback.
pub struct ResolutionChain {
    providers: Vec<Arc<dyn LookupProvider>>,
    overrides: BTreeMap<RowKey, String>,
    fallback: SyntheticFallback,
    timeout: Duration,
    pacer: Pacer,
}

impl ResolutionChain {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(6);

    pub fn new(providers: Vec<Arc<dyn LookupProvider>>, fallback: SyntheticFallback) -> Self {
        Self {
            providers,
            overrides: BTreeMap::new(),
            fallback,
            timeout: Self::DEFAULT_TIMEOUT,
            pacer: Pacer::disabled(),
        }
    }

    pub fn with_overrides(mut self, overrides: BTreeMap<RowKey, String>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Upper bound for a single provider call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pause between one provider call returning and the next starting,
    /// across all keys.
    pub fn with_politeness_delay(mut self, delay: Duration) -> Self {
        self.pacer = Pacer::new(delay);
        self
    }

    /// Resolves one key. Never fails: the synthetic tier always yields a value.
    pub async fn resolve(
        &mut self,
        key: RowKey,
        entry: &CanonicalEntry,
        existing: &ExistingRowIndex,
    ) -> ResolutionOutcome {
        if let Some(value) = self.overrides.get(&key) {
            tracing::debug!(key, "Using override");
            return ResolutionOutcome {
                key,
                value: value.clone(),
                tier: Tier::Override,
                notes: Vec::new(),
            };
        }

        let mut notes = Vec::new();

        if self.providers.is_empty() {
            notes.push("no lookup provider configured".to_string());
        }

        for provider in &self.providers {
            self.pacer.wait().await;

            let result = match tokio::time::timeout(self.timeout, provider.lookup(&entry.title)).await
            {
                Ok(result) => result,
                Err(_) => Err(LookupError::Timeout(self.timeout)),
            };
            self.pacer.finished();

            match result {
                Ok(Some(value)) if !value.trim().is_empty() => {
                    tracing::debug!(key, provider = provider.name(), "Resolved from provider");
                    return ResolutionOutcome {
                        key,
                        value,
                        tier: Tier::Primary,
                        notes,
                    };
                }
                Ok(_) => notes.push(format!("{}: no result for {}", provider.name(), entry.title)),
                Err(e) => notes.push(format!("{}: {}", provider.name(), e)),
            }
        }

        if let Some(value) = existing.get(&key).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(key, "Keeping existing value");
            return ResolutionOutcome {
                key,
                value: value.clone(),
                tier: Tier::FallbackExisting,
                notes,
            };
        }

        tracing::debug!(key, "Using synthetic fallback");
        ResolutionOutcome {
            key,
            value: self.fallback.value_for(&entry.title),
            tier: Tier::FallbackSynthetic,
            notes,
        }
    }

    /// Resolves every registry key, ascending.
    pub async fn resolve_all(
        &mut self,
        registry: &CanonicalRegistry,
        existing: &ExistingRowIndex,
    ) -> Vec<ResolutionOutcome> {
        let mut outcomes = Vec::with_capacity(registry.len());
        for (key, entry) in registry.iter() {
            outcomes.push(self.resolve(key, entry, existing).await);
        }
        outcomes
    }
}

impl fmt::Debug for ResolutionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionChain")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("overrides", &self.overrides)
            .field("fallback", &self.fallback)
            .field("timeout", &self.timeout)
            .field("pacer", &self.pacer)
            .finish()
    }
}
