//! Filesystem layer for seed-sync
//!
//! Reads and atomically rewrites seed documents, and loads optional
//! configuration files in TOML, JSON or YAML.

pub mod config;
pub mod error;
pub mod io;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::{read_document, write_atomic, write_document};
