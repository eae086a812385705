//! Synchronization job definitions

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use seed_blocks::{BlockPattern, RowKey};
use serde::{Deserialize, Serialize};

use crate::registry::CanonicalRegistry;
use crate::{Error, Result};

/// Lookup service a job resolves its primary tier against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Wikipedia REST page summary
    Wikipedia,
    /// Unsplash photo search
    Unsplash,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wikipedia => "wikipedia",
            Self::Unsplash => "unsplash",
        }
    }

    /// Environment variable holding the credential this provider needs.
    pub fn credential_env(&self) -> Option<&'static str> {
        match self {
            Self::Wikipedia => None,
            Self::Unsplash => Some("UNSPLASH_ACCESS_KEY"),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "wikipedia" => Ok(Self::Wikipedia),
            "unsplash" => Ok(Self::Unsplash),
            _ => Err(Error::invalid_config(format!("unknown provider: {s}"))),
        }
    }
}

/// Deterministic last-resort value built from a title.
///
/// In the template, `{title}` is replaced by the title with spaces turned
/// into underscores (page style) and `{slug}` by its lowercase words joined
/// with hyphens (search-path style).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticFallback {
    template: String,
}

impl SyntheticFallback {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// `https://en.wikipedia.org/wiki/{title}`
    pub fn wikipedia_page() -> Self {
        Self::new("https://en.wikipedia.org/wiki/{title}")
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn value_for(&self, title: &str) -> String {
        self.template
            .replace("{title}", &title.trim().replace(' ', "_"))
            .replace("{slug}", &slug(title))
    }
}

/// `Hotel Le Meurice, Paris` -> `hotel-le-meurice-paris`
pub fn slug(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Where the canonical keys of a run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    /// A fixed registry compiled in or configured.
    Static(CanonicalRegistry),
    /// The keys already present in the target block. Each key's label comes
    /// from the job's label source and its title from `title_template`, whose
    /// `{label}` placeholder is replaced by that label.
    TargetKeys { title_template: String },
}

/// Everything needed to synchronize one block of a seed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncJob {
    pub name: String,
    pub description: String,
    pub provider: ProviderKind,
    /// Block that gets rewritten.
    pub target: BlockPattern,
    /// Block the target is inserted after when it does not exist yet.
    pub anchor: Option<BlockPattern>,
    /// Sibling block whose rows supply `key -> name` labels.
    pub label_source: Option<BlockPattern>,
    pub registry: RegistrySource,
    /// Forced values that skip every lookup.
    pub overrides: BTreeMap<RowKey, String>,
    pub fallback: SyntheticFallback,
}

impl SyncJob {
    /// Checks the job definition is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when the target cannot be rendered,
    /// a document-derived registry has no label source, or the fallback
    /// template is empty.
    pub fn validate(&self) -> Result<()> {
        if let BlockPattern::Insert { columns, .. } = &self.target
            && columns.as_ref().is_none_or(|c| c.len() != 2)
        {
            return Err(Error::invalid_config(format!(
                "job {}: insert target needs exactly two columns",
                self.name
            )));
        }

        if matches!(self.registry, RegistrySource::TargetKeys { .. }) && self.label_source.is_none() {
            return Err(Error::invalid_config(format!(
                "job {}: keys taken from the target block need a label source",
                self.name
            )));
        }

        if self.fallback.template().trim().is_empty() {
            return Err(Error::invalid_config(format!(
                "job {}: fallback template is empty",
                self.name
            )));
        }

        Ok(())
    }
}
