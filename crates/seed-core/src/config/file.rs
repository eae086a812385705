//! Optional configuration file: settings plus extra jobs

use std::collections::BTreeMap;
use std::path::Path;

use seed_blocks::{BlockPattern, RowKey};
use seed_fs::ConfigStore;
use serde::{Deserialize, Serialize};

use super::settings::SettingsLayer;
use crate::job::{ProviderKind, RegistrySource, SyncJob, SyntheticFallback};
use crate::registry::CanonicalRegistry;
use crate::{Error, Result};

/// Top-level shape of a `seedsync` configuration file.
///
/// ```toml
/// [settings]
/// sleep = 0.5
///
/// [[jobs]]
/// name = "museum-images"
/// provider = "wikipedia"
/// target = { kind = "insert", table = "museum_images", columns = ["museum_id", "image_url"] }
/// titles = { "1" = "Louvre", "2" = "British_Museum" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub settings: SettingsLayer,
    pub jobs: Vec<JobConfig>,
}

impl ConfigFile {
    /// Loads a TOML, JSON or YAML config file, chosen by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path.display(), jobs = config.jobs.len(), "Loaded config file");
        Ok(config)
    }

    /// Converts every declared job.
    pub fn sync_jobs(&self) -> Result<Vec<SyncJob>> {
        self.jobs.iter().map(JobConfig::to_sync_job).collect()
    }
}

/// One job declared in a config file.
///
/// Exactly one of `titles` and `title_template` must be set. Map keys are
/// row keys written as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub provider: ProviderKind,
    pub target: BlockPattern,
    #[serde(default)]
    pub anchor: Option<BlockPattern>,
    #[serde(default)]
    pub label_source: Option<BlockPattern>,
    #[serde(default)]
    pub titles: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub title_template: Option<String>,
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
    #[serde(default)]
    pub fallback: Option<String>,
}

impl JobConfig {
    /// Builds and validates the job.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a bad key, a missing or doubled
    /// title source, or an inconsistent job.
    pub fn to_sync_job(&self) -> Result<SyncJob> {
        let registry = match (&self.titles, &self.title_template) {
            (Some(titles), None) => {
                let titles = titles
                    .iter()
                    .map(|(key, title)| Ok((self.parse_key(key)?, title.clone())))
                    .collect::<Result<Vec<_>>>()?;
                RegistrySource::Static(CanonicalRegistry::from_titles(titles))
            }
            (None, Some(template)) => RegistrySource::TargetKeys {
                title_template: template.clone(),
            },
            _ => {
                return Err(Error::invalid_config(format!(
                    "job {}: set exactly one of `titles` and `title_template`",
                    self.name
                )));
            }
        };

        let overrides = self
            .overrides
            .iter()
            .map(|(key, value)| Ok((self.parse_key(key)?, value.clone())))
            .collect::<Result<BTreeMap<_, _>>>()?;

        let job = SyncJob {
            name: self.name.clone(),
            description: self.description.clone(),
            provider: self.provider,
            target: self.target.clone(),
            anchor: self.anchor.clone(),
            label_source: self.label_source.clone(),
            registry,
            overrides,
            fallback: self
                .fallback
                .as_deref()
                .map(SyntheticFallback::new)
                .unwrap_or_else(SyntheticFallback::wikipedia_page),
        };
        job.validate()?;
        Ok(job)
    }

    fn parse_key(&self, key: &str) -> Result<RowKey> {
        key.trim().parse().map_err(|_| {
            Error::invalid_config(format!("job {}: `{key}` is not a numeric row key", self.name))
        })
    }
}
