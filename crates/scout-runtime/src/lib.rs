//! # Edge-Scout Runtime
//!
//! Drives one scouting cycle from a work directory:
//!
//! - `config` - `config.json` load, validation and repair
//! - `ranges` - range list download and loading
//! - `runtime` - the cycle itself ([`ScoutRuntime`])
//! - `output` - `result.csv` and `trace.log`

pub mod config;
pub mod error;
pub mod output;
pub mod ranges;
pub mod runtime;

pub use config::{ConfigError, ScoutConfig};
pub use error::RuntimeError;
pub use ranges::Ipv6Mode;
pub use runtime::{RuntimeOptions, ScoutRuntime, WorkPaths};
