//! Sync command implementation
//!
//! Reads the seed file, runs the job through the engine and either prints
//! the result or writes it back.

use std::path::Path;

use colored::Colorize;
use seed_core::{SyncEngine, SyncPlan, Tier};
use similar::TextDiff;

use super::load_context;
use crate::cli::SyncArgs;
use crate::error::Result;

/// Run the sync command
pub fn run_sync(args: &SyncArgs) -> Result<()> {
    let (catalog, settings) = load_context(args.config.as_deref(), &args.settings_layer())?;
    let job = catalog.get(&args.job)?;
    let document = seed_fs::read_document(&args.sql)?;

    let mut engine = SyncEngine::new(settings);
    if args.offline {
        tracing::info!(job = %job.name, "Offline run, skipping provider lookups");
    } else {
        let provider = seed_providers::provider_for(job.provider, engine.settings())?;
        engine = engine.with_provider(provider);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let plan = runtime.block_on(engine.plan(job, &document))?;

    print_report(&plan);

    if args.write {
        if plan.changed {
            seed_fs::write_document(&args.sql, &plan.document)?;
            eprintln!(
                "{} Updated {} ({})",
                "OK".green().bold(),
                args.sql.display().to_string().yellow(),
                plan.action
            );
        } else {
            eprintln!(
                "{} {} is already up to date",
                "OK".green().bold(),
                args.sql.display().to_string().yellow()
            );
        }
    } else if args.diff {
        print_diff(&args.sql, &document, &plan.document);
    } else {
        println!("{}", plan.block);
    }

    Ok(())
}

fn print_report(plan: &SyncPlan) {
    let report = &plan.report;
    eprintln!(
        "{} {}: {} rows ({})",
        "Sync".blue().bold(),
        plan.job.cyan(),
        report.outcomes.len(),
        plan.action
    );

    let counts = report
        .tier_counts()
        .into_iter()
        .map(|(tier, count)| format!("{tier} {count}"))
        .collect::<Vec<_>>()
        .join(", ");
    eprintln!("  {counts}");

    for warning in &report.warnings {
        eprintln!("  {} {}", "warning:".yellow().bold(), warning);
    }

    let fallbacks = report.count(Tier::FallbackExisting) + report.count(Tier::FallbackSynthetic);
    if fallbacks > 0 {
        eprintln!(
            "  {} row(s) not resolved by a provider; rerun with --strict to fail instead",
            fallbacks
        );
    }
}

fn print_diff(path: &Path, old: &str, new: &str) {
    let name = path.display().to_string();
    let diff = TextDiff::from_lines(old, new);
    let unified = diff
        .unified_diff()
        .context_radius(3)
        .header(&name, &name)
        .to_string();

    if unified.is_empty() {
        eprintln!("{} No changes", "OK".green().bold());
        return;
    }

    for line in unified.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }
}
