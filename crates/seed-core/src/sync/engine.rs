//! SyncEngine implementation
//!
//! The engine runs one job against one document: every structural check
//! happens before the first lookup, so a broken document never costs a
//! network call.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use seed_blocks::{BlockPattern, Row, RowKey, locate, parse_rows, render, splice};

use super::report::SyncReport;
use crate::config::SyncSettings;
use crate::job::{RegistrySource, SyncJob};
use crate::registry::{CanonicalEntry, CanonicalRegistry};
use crate::resolve::{ExistingRowIndex, LookupProvider, ResolutionChain};
use crate::{Error, Result};

/// How the rendered block gets into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAction {
    /// The target block existed and its span is replaced.
    Replace,
    /// The target block was absent and is inserted after the anchor block.
    InsertAfterAnchor,
}

impl fmt::Display for BlockAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace => f.write_str("replace"),
            Self::InsertAfterAnchor => f.write_str("insert after anchor"),
        }
    }
}

/// Result of a successful run. Nothing has been written yet.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub job: String,
    /// Freshly rendered target block.
    pub block: String,
    /// Full document with the block spliced in.
    pub document: String,
    pub action: BlockAction,
    /// Whether `document` differs from the input document.
    pub changed: bool,
    pub report: SyncReport,
}

/// Runs jobs against documents with a fixed set of providers and settings.
pub struct SyncEngine {
    providers: Vec<Arc<dyn LookupProvider>>,
    settings: SyncSettings,
}

impl SyncEngine {
    /// Engine without providers: every key skips the primary tier.
    pub fn new(settings: SyncSettings) -> Self {
        Self {
            providers: Vec::new(),
            settings,
        }
    }

    /// Adds a provider; providers are asked in the order they were added.
    pub fn with_provider(mut self, provider: Arc<dyn LookupProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Computes the new document for `job`.
    ///
    /// # Errors
    ///
    /// Structural errors (missing target, anchor or label source, malformed
    /// rows, keys without a label) are returned before any provider call.
    /// In strict mode a run with any fallback value returns
    /// [`Error::StrictResolution`] after every key was attempted.
    pub async fn plan(&self, job: &SyncJob, document: &str) -> Result<SyncPlan> {
        job.validate()?;

        let target = locate(document, &job.target)?;
        let existing_rows = match &target {
            Some(block) => parse_rows(block.body, job.target.row_pattern())?,
            None => BTreeMap::new(),
        };

        let action = match (&target, &job.anchor) {
            (Some(_), _) => BlockAction::Replace,
            (None, Some(anchor)) => {
                if locate(document, anchor)?.is_none() {
                    return Err(seed_blocks::Error::AnchorNotFound {
                        block: anchor.to_string(),
                    }
                    .into());
                }
                BlockAction::InsertAfterAnchor
            }
            (None, None) => {
                return Err(seed_blocks::Error::BlockNotFound {
                    block: job.target.to_string(),
                }
                .into());
            }
        };

        let labels = match &job.label_source {
            Some(source) => Some(read_labels(document, source)?),
            None => None,
        };

        let registry = build_registry(job, &existing_rows, labels.as_ref())?;
        if registry.is_empty() {
            return Err(Error::EmptyRegistry {
                job: job.name.clone(),
            });
        }

        let existing: ExistingRowIndex = existing_rows
            .into_iter()
            .map(|(key, row)| (key, row.value))
            .collect();

        tracing::info!(
            job = %job.name,
            keys = registry.len(),
            existing = existing.len(),
            %action,
            "Resolving job"
        );

        let mut chain = ResolutionChain::new(self.providers.clone(), job.fallback.clone())
            .with_overrides(job.overrides.clone())
            .with_timeout(self.settings.request_timeout)
            .with_politeness_delay(self.settings.politeness_delay);
        let outcomes = chain.resolve_all(&registry, &existing).await;

        let report = SyncReport::from_outcomes(outcomes, &registry);
        for warning in &report.warnings {
            tracing::debug!(job = %job.name, "{warning}");
        }

        if self.settings.strict && !report.failures.is_empty() {
            return Err(Error::StrictResolution {
                failures: report.failures,
            });
        }

        let rows: Vec<Row> = report
            .outcomes
            .iter()
            .map(|outcome| {
                let label = registry
                    .get(outcome.key)
                    .map(|entry| entry.label.clone())
                    .unwrap_or_default();
                Row::new(outcome.key, outcome.value.clone(), label)
            })
            .collect();

        let block = render(&rows, &job.target)?;
        let new_document = splice(document, &job.target, &block, job.anchor.as_ref())?;
        let changed = new_document != document;

        tracing::info!(
            job = %job.name,
            rows = rows.len(),
            fallbacks = report.failures.len(),
            changed,
            "Planned block"
        );

        Ok(SyncPlan {
            job: job.name.clone(),
            block,
            document: new_document,
            action,
            changed,
            report,
        })
    }
}

impl fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncEngine")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("settings", &self.settings)
            .finish()
    }
}

/// Reads `key -> name` pairs from a label-source block.
fn read_labels(document: &str, source: &BlockPattern) -> Result<BTreeMap<RowKey, String>> {
    let block = locate(document, source)?.ok_or_else(|| seed_blocks::Error::BlockNotFound {
        block: source.to_string(),
    })?;

    let labels: BTreeMap<_, _> = parse_rows(block.body, source.row_pattern())?
        .into_iter()
        .map(|(key, row)| (key, row.value.trim().to_string()))
        .collect();

    if labels.is_empty() {
        return Err(Error::EmptyLabelSource {
            block: source.to_string(),
        });
    }

    tracing::debug!(block = %source, labels = labels.len(), "Read label source");
    Ok(labels)
}

fn build_registry(
    job: &SyncJob,
    existing: &BTreeMap<RowKey, Row>,
    labels: Option<&BTreeMap<RowKey, String>>,
) -> Result<CanonicalRegistry> {
    match &job.registry {
        RegistrySource::Static(registry) => {
            let mut registry = registry.clone();
            if let Some(labels) = labels {
                registry.relabel(labels);
            }
            Ok(registry)
        }
        RegistrySource::TargetKeys { title_template } => {
            let empty = BTreeMap::new();
            let labels = labels.unwrap_or(&empty);
            let source = job
                .label_source
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();

            let mut registry = CanonicalRegistry::new();
            for key in existing.keys() {
                let label = labels.get(key).ok_or_else(|| Error::LabelMissing {
                    key: *key,
                    target: job.target.to_string(),
                    block: source.clone(),
                })?;
                registry.insert(
                    *key,
                    CanonicalEntry {
                        title: title_template.replace("{label}", label),
                        label: label.clone(),
                    },
                );
            }
            Ok(registry)
        }
    }
}
