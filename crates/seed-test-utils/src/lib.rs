//! Shared test utilities for the seed-sync workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`document`]: [`TestDocument`] temporary seed files and the sample seed
//! - [`providers`]: scripted [`LookupProvider`](seed_core::LookupProvider) stubs

pub mod document;
pub mod providers;

pub use document::{SAMPLE_SEED, TestDocument};
pub use providers::{CountingProvider, FailingProvider, SlowProvider, StaticProvider};
