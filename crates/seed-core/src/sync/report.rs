//! Per-run summary of how every key was resolved

use std::collections::BTreeMap;

use seed_blocks::RowKey;

use crate::registry::CanonicalRegistry;
use crate::resolve::{ResolutionOutcome, Tier};

/// Outcomes and recovered failures of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// One outcome per canonical key, ascending.
    pub outcomes: Vec<ResolutionOutcome>,
    /// Keys that fell back past the primary tier, with their notes.
    pub failures: Vec<String>,
    /// Everything worth showing the user; a superset of `failures`.
    pub warnings: Vec<String>,
}

impl SyncReport {
    pub(crate) fn from_outcomes(outcomes: Vec<ResolutionOutcome>, registry: &CanonicalRegistry) -> Self {
        let mut failures = Vec::new();
        let mut warnings = Vec::new();

        for outcome in outcomes.iter().filter(|o| o.tier.is_fallback()) {
            let label = registry
                .get(outcome.key)
                .map(|entry| entry.label.as_str())
                .unwrap_or_default();
            let reason = if outcome.notes.is_empty() {
                "no provider result".to_string()
            } else {
                outcome.notes.join("; ")
            };
            let failure = format!(
                "key {} ({}): {} via {}",
                outcome.key, label, reason, outcome.tier
            );
            warnings.push(failure.clone());
            failures.push(failure);

            if outcome.tier == Tier::FallbackSynthetic {
                warnings.push(format!(
                    "key {} ({}): unreviewed fallback {}",
                    outcome.key, label, outcome.value
                ));
            }
        }

        Self {
            outcomes,
            failures,
            warnings,
        }
    }

    /// Number of keys resolved by `tier`.
    pub fn count(&self, tier: Tier) -> usize {
        self.outcomes.iter().filter(|o| o.tier == tier).count()
    }

    /// Counts for every tier, including empty ones.
    pub fn tier_counts(&self) -> BTreeMap<Tier, usize> {
        Tier::ALL.iter().map(|tier| (*tier, self.count(*tier))).collect()
    }

    pub fn outcome(&self, key: RowKey) -> Option<&ResolutionOutcome> {
        self.outcomes.iter().find(|o| o.key == key)
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
