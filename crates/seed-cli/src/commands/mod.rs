//! Command implementations

mod list;
mod sync;

use std::path::Path;

use seed_core::{ConfigFile, JobCatalog, SettingsLayer, SyncSettings};

pub use list::run_list;
pub use sync::run_sync;

use crate::error::Result;

/// Jobs and settings for a run: built-ins and defaults, then the config
/// file, then command-line flags.
fn load_context(config: Option<&Path>, flags: &SettingsLayer) -> Result<(JobCatalog, SyncSettings)> {
    let mut settings = SyncSettings::default();
    let mut catalog = JobCatalog::builtin();

    if let Some(path) = config {
        let file = ConfigFile::load(path)?;
        settings.apply(&file.settings)?;
        catalog = catalog.with_jobs(file.sync_jobs()?);
    }

    settings.apply(flags)?;
    Ok((catalog, settings))
}
