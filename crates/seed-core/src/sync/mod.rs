//! Block synchronization: locate, resolve, render and splice one job

mod engine;
mod report;

pub use engine::{BlockAction, SyncEngine, SyncPlan};
pub use report::SyncReport;
