//! Resolution chain, lookup providers and call pacing

mod chain;
mod pacer;
mod provider;

use std::collections::BTreeMap;

use seed_blocks::RowKey;

pub use chain::{ResolutionChain, ResolutionOutcome, Tier};
pub use pacer::Pacer;
pub use provider::{LookupError, LookupProvider};

/// Values currently stored in the target block, by key.
pub type ExistingRowIndex = BTreeMap<RowKey, String>;
