//! Run settings and the optional configuration file
//!
//! Settings are layered: built-in defaults, then the `[settings]` table of a
//! config file, then command-line flags. Later layers win.

mod file;
mod settings;

pub use file::{ConfigFile, JobConfig};
pub use settings::{SettingsLayer, SyncSettings};
