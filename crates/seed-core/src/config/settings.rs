//! Run settings and their layered overrides

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Settings shared by every job of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Minimum spacing between provider calls.
    pub politeness_delay: Duration,
    /// Upper bound for a single provider call.
    pub request_timeout: Duration,
    /// Abort the run when any key falls back past the primary tier.
    pub strict: bool,
    pub user_agent: String,
}

impl SyncSettings {
    pub const DEFAULT_POLITENESS_DELAY: Duration = Duration::from_millis(150);
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(6);
    pub const MIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

    /// Applies every value set in `layer` on top of these settings.
    ///
    /// Negative delays are clamped to zero; timeouts below one second are
    /// raised to one second.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for non-finite numbers.
    pub fn apply(&mut self, layer: &SettingsLayer) -> Result<()> {
        if let Some(secs) = layer.sleep {
            self.politeness_delay = seconds("sleep", secs)?;
        }
        if let Some(secs) = layer.request_timeout {
            self.request_timeout = seconds("request_timeout", secs)?.max(Self::MIN_REQUEST_TIMEOUT);
        }
        if let Some(strict) = layer.strict {
            self.strict = strict;
        }
        if let Some(agent) = &layer.user_agent {
            self.user_agent = agent.clone();
        }
        Ok(())
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            politeness_delay: Self::DEFAULT_POLITENESS_DELAY,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            strict: false,
            user_agent: concat!(
                "seedsync/",
                env!("CARGO_PKG_VERSION"),
                " (seed data image synchronizer)"
            )
            .to_string(),
        }
    }
}

/// Optional settings from one source (config file or command line).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsLayer {
    /// Seconds between provider calls.
    pub sleep: Option<f64>,
    /// Seconds allowed for one provider call.
    pub request_timeout: Option<f64>,
    pub strict: Option<bool>,
    pub user_agent: Option<String>,
}

fn seconds(field: &str, secs: f64) -> Result<Duration> {
    if !secs.is_finite() {
        return Err(Error::invalid_config(format!(
            "{field} must be a finite number of seconds, got {secs}"
        )));
    }
    Duration::try_from_secs_f64(secs.max(0.0))
        .map_err(|e| Error::invalid_config(format!("{field}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SyncSettings::default();
        assert_eq!(settings.politeness_delay, Duration::from_millis(150));
        assert_eq!(settings.request_timeout, Duration::from_secs(6));
        assert!(!settings.strict);
        assert!(settings.user_agent.starts_with("seedsync/"));
    }

    #[test]
    fn test_apply_clamps_values() {
        let mut settings = SyncSettings::default();
        settings
            .apply(&SettingsLayer {
                sleep: Some(-3.0),
                request_timeout: Some(0.2),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(settings.politeness_delay, Duration::ZERO);
        assert_eq!(settings.request_timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_apply_keeps_unset_values() {
        let mut settings = SyncSettings::default();
        settings
            .apply(&SettingsLayer {
                strict: Some(true),
                ..Default::default()
            })
            .unwrap();

        assert!(settings.strict);
        assert_eq!(settings.request_timeout, SyncSettings::DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_apply_rejects_nan() {
        let mut settings = SyncSettings::default();
        let err = settings
            .apply(&SettingsLayer {
                sleep: Some(f64::NAN),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
