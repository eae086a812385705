//! Block synchronization engine for seed-sync
//!
//! This crate reconciles the image rows of SQL seed documents against lookup
//! providers:
//!
//! - **Canonical registry**: the keys a run must produce rows for
//! - **Jobs**: which block to rewrite, where labels come from, how to fall back
//! - **Resolution chain**: override, provider lookup, existing value, synthetic value
//! - **SyncEngine**: locate, resolve, render and splice one job
//!
//! # Architecture
//!
//! ```text
//!            seed-cli
//!               |
//!    seed-core --- seed-providers
//!       |
//!   +---+--------+
//!   |            |
//! seed-fs   seed-blocks
//! ```
//!
//! # Example
//!
//! ```no_run
//! use seed_core::{JobCatalog, SyncEngine, SyncSettings};
//!
//! # async fn example(document: &str) -> seed_core::Result<()> {
//! let catalog = JobCatalog::builtin();
//! let job = catalog.get("attraction-images")?;
//! let plan = SyncEngine::new(SyncSettings::default()).plan(job, document).await?;
//! println!("{}", plan.block);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod job;
pub mod registry;
pub mod resolve;
pub mod sync;

pub use catalog::{JobCatalog, builtin_jobs};
pub use config::{ConfigFile, JobConfig, SettingsLayer, SyncSettings};
pub use error::{Error, ErrorClass, Result};
pub use job::{ProviderKind, RegistrySource, SyncJob, SyntheticFallback};
pub use registry::{CanonicalEntry, CanonicalRegistry, title_to_label};
pub use resolve::{
    ExistingRowIndex, LookupError, LookupProvider, Pacer, ResolutionChain, ResolutionOutcome, Tier,
};
pub use sync::{BlockAction, SyncEngine, SyncPlan, SyncReport};
