//! Persistent settings for the Dymaxion globe.
//!
//! Settings are stored as `config.ron`. Every section falls back to its
//! defaults when missing, and unknown fields are ignored, so files written by
//! older or newer versions still load.

mod config;
mod error;

pub use config::{CONFIG_FILE_NAME, Config, DebugConfig};
pub use error::ConfigError;
