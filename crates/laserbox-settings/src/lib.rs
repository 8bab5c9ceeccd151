//! LaserBox Settings Crate
//!
//! Box configuration as entered by the user, its validation, and JSON/TOML
//! persistence.

pub mod config;
pub mod error;

pub use config::BoxConfig;
pub use error::{SettingsError, SettingsResult};
