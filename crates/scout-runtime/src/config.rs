//! # Runtime Configuration
//!
//! `config.json` in the work directory. Keys are snake case; missing keys
//! take their defaults.
//!
//! - A missing file is created with defaults.
//! - An unreadable, unparsable or invalid file aborts the run, unless
//!   repair is requested, in which case defaults are written over it.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use scout_core::{BanditConfig, HttpThroughputConfig, ProbeConfig, SelectionPolicy};

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("config I/O error on {path}: {message}")]
    Io { path: String, message: String },
    /// The file is not valid JSON for this schema
    #[error("config parse error: {0}")]
    Parse(String),
    /// A value is out of range
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Contents of `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Stage 1 worker bound
    pub threads: usize,
    /// Stage 1 connect timeout in seconds
    pub timeout: f64,
    /// Number of IPv4 candidates to generate
    pub test_count: usize,
    /// Port probed in Stage 1
    pub port: u16,
    /// How many Stage 1 survivors get a speed test
    pub speed_test_range: usize,
    /// Throughput (MB/s) that qualifies a result on its own
    pub min_speed_target: f64,
    /// Probe IPv6 ranges as well when no `--ipv6` flag is given
    pub ipv6_enabled: bool,
    /// Per-run decay applied to the bandit model
    pub decay_rate: f64,
    /// Stage 2 worker bound
    pub speed_concurrency: usize,
    /// Benchmark host name
    pub speed_host: String,
    /// Requested download size in bytes
    pub speed_bytes: u64,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            threads: 500,
            timeout: 1.0,
            test_count: 10_000,
            port: 443,
            speed_test_range: 20,
            min_speed_target: 5.0,
            ipv6_enabled: false,
            decay_rate: 0.85,
            speed_concurrency: 1,
            speed_host: "speed.cloudflare.com".to_string(),
            speed_bytes: 20 * 1024 * 1024,
        }
    }
}

impl ScoutConfig {
    /// Load `path`, creating it with defaults when missing.
    ///
    /// With `fix` set, a broken file is replaced by defaults instead of
    /// returning an error.
    pub fn load_or_init(path: &Path, fix: bool) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("[config] No config at {}, writing defaults", path.display());
            let config = Self::default();
            if let Err(e) = config.save(path) {
                warn!("[config] {}", e);
            }
            return Ok(config);
        }

        match Self::read(path) {
            Ok(config) => Ok(config),
            Err(e) if fix => {
                warn!("[config] {}; rewriting {} with defaults", e, path.display());
                let config = Self::default();
                config.save(path)?;
                Ok(config)
            }
            Err(e) => Err(e),
        }
    }

    /// Read and validate `path`.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |e: std::io::Error| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        let text =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_error)?;
            }
        }
        fs::write(path, text).map_err(io_error)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::Invalid("threads must be at least 1".into()));
        }
        if !(self.timeout.is_finite() && self.timeout > 0.0) {
            return Err(ConfigError::Invalid("timeout must be positive".into()));
        }
        if self.test_count == 0 {
            return Err(ConfigError::Invalid("test_count must be at least 1".into()));
        }
        if self.speed_test_range == 0 {
            return Err(ConfigError::Invalid(
                "speed_test_range must be at least 1".into(),
            ));
        }
        if !(self.min_speed_target.is_finite() && self.min_speed_target >= 0.0) {
            return Err(ConfigError::Invalid(
                "min_speed_target must not be negative".into(),
            ));
        }
        if !(self.decay_rate > 0.0 && self.decay_rate < 1.0) {
            return Err(ConfigError::Invalid(
                "decay_rate must be between 0 and 1 (exclusive)".into(),
            ));
        }
        Ok(())
    }

    pub fn probe_config(&self) -> ProbeConfig {
        let defaults = ProbeConfig::default();
        ProbeConfig {
            threads: self.threads,
            connect_timeout: Duration::try_from_secs_f64(self.timeout)
                .unwrap_or(defaults.connect_timeout),
            port: self.port,
            speed_test_range: self.speed_test_range,
            speed_concurrency: self.speed_concurrency,
            selection: SelectionPolicy {
                min_speed_target: self.min_speed_target,
                ..SelectionPolicy::default()
            },
            ..defaults
        }
    }

    pub fn bandit_config(&self) -> BanditConfig {
        BanditConfig::with_decay_rate(self.decay_rate)
    }

    pub fn throughput_config(&self) -> HttpThroughputConfig {
        HttpThroughputConfig {
            host: self.speed_host.clone(),
            bytes: self.speed_bytes,
            ..HttpThroughputConfig::default()
        }
    }
}
