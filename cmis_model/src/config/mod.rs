//! Configuration module for the CMIS model
//!
//! `constants` holds the compile-time limits and sentinels; `runtime` holds
//! the user preferences that may be overridden from the environment or a
//! TOML file.

pub mod constants;
pub mod runtime;

pub use runtime::{LogLevel, LoggingPreferences, MappingPreferences, RangeSentinels};
