//! List command implementation

use std::path::Path;

use colored::Colorize;
use seed_core::SettingsLayer;

use super::load_context;
use crate::error::Result;

/// Print every job with its provider and target block.
pub fn run_list(config: Option<&Path>) -> Result<()> {
    let (catalog, _) = load_context(config, &SettingsLayer::default())?;

    for job in catalog.iter() {
        println!(
            "{} {} {}",
            job.name.green().bold(),
            format!("[{}]", job.provider).cyan(),
            job.target
        );
        if !job.description.is_empty() {
            println!("    {}", job.description.dimmed());
        }
    }

    Ok(())
}
