//! # Scout Runtime
//!
//! One full cycle: config, range lists, model load, candidate generation,
//! two-stage probing, model persist, outputs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use scout_core::{
    CandidateGenerator, ConnectProbe, HttpThroughputProbe, JsonModelStore, ProbeEngine,
    ProbeReport, ProbeResult, ScoutError, SharedModel, TcpConnectProbe, ThroughputProbe,
};

use crate::config::ScoutConfig;
use crate::error::RuntimeError;
use crate::output::{append_results, write_results};
use crate::ranges::{prepare_ranges, Ipv6Mode};

/// Files kept in the work directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPaths {
    pub config: PathBuf,
    pub model: PathBuf,
    pub trace: PathBuf,
    pub ipv4: PathBuf,
    pub ipv6: PathBuf,
    pub result: PathBuf,
}

impl WorkPaths {
    pub fn new(dir: &Path) -> Self {
        Self {
            config: dir.join("config.json"),
            model: dir.join("ucb_model.json"),
            trace: dir.join("trace.log"),
            ipv4: dir.join("ipv4.txt"),
            ipv6: dir.join("ipv6.txt"),
            result: dir.join("result.csv"),
        }
    }
}

/// Command-line choices
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    /// Directory holding every input and output file
    pub work_dir: PathBuf,
    /// Rewrite a broken config with defaults
    pub fix_conf: bool,
    /// Explicit IPv6 mode, overriding `ipv6_enabled`
    pub ipv6: Option<Ipv6Mode>,
    /// Generator seed; entropy when absent
    pub seed: Option<u64>,
}

/// Runs one scouting cycle.
pub struct ScoutRuntime {
    options: RuntimeOptions,
    paths: WorkPaths,
    connect: Option<Arc<dyn ConnectProbe>>,
    throughput: Option<Arc<dyn ThroughputProbe>>,
}

impl ScoutRuntime {
    pub fn new(options: RuntimeOptions) -> Self {
        let paths = WorkPaths::new(&options.work_dir);
        Self {
            options,
            paths,
            connect: None,
            throughput: None,
        }
    }

    /// Use these probes instead of the TCP and HTTP adapters.
    pub fn with_probes(
        mut self,
        connect: Arc<dyn ConnectProbe>,
        throughput: Arc<dyn ThroughputProbe>,
    ) -> Self {
        self.connect = Some(connect);
        self.throughput = Some(throughput);
        self
    }

    pub fn paths(&self) -> &WorkPaths {
        &self.paths
    }

    /// Run the cycle.
    ///
    /// # Errors
    ///
    /// - Config file broken (and no repair requested)
    /// - No ranges for the selected families
    /// - Generation produced nothing
    pub async fn run(&self) -> Result<ProbeReport, RuntimeError> {
        info!("===========================================");
        info!("  Edge-Scout v{}", env!("CARGO_PKG_VERSION"));
        info!("  Work dir: {}", self.options.work_dir.display());
        info!("===========================================");

        let config = ScoutConfig::load_or_init(&self.paths.config, self.options.fix_conf)?;

        let mode = Ipv6Mode::resolve(self.options.ipv6, config.ipv6_enabled);
        let ranges = prepare_ranges(&self.paths.ipv4, &self.paths.ipv6, mode).await;
        if ranges.is_empty() {
            return Err(ScoutError::NoRanges.into());
        }

        let store = Arc::new(JsonModelStore::new(&self.paths.model));
        let model = SharedModel::load(store, config.bandit_config());

        let mut rng = match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let generator = CandidateGenerator::default();
        let candidates = model.with_model(|m| {
            generator.generate(&ranges.v4, &ranges.v6, config.test_count, m, &mut rng)
        });

        let engine = ProbeEngine::new(
            config.probe_config(),
            self.connect
                .clone()
                .unwrap_or_else(|| Arc::new(TcpConnectProbe::new())),
            self.throughput.clone().unwrap_or_else(|| {
                Arc::new(HttpThroughputProbe::new(config.throughput_config()))
            }),
        );
        let report = engine.run(candidates, &model).await?;

        self.publish(&report, config.min_speed_target);
        Ok(report)
    }

    /// Log the short list and write the output files (best-effort).
    fn publish(&self, report: &ProbeReport, target: f64) {
        info!(
            "[runtime] Probed {}, reachable {}, speed tested {}, selected {}",
            report.probed,
            report.survivors.len(),
            report.tested.len(),
            report.selected.len()
        );
        info!("[runtime] {}", "-".repeat(50));
        for row in &report.selected {
            info!("[runtime] {}", render_row(row, target));
        }

        if let Err(e) = append_results(&self.paths.trace, &report.selected, Local::now()) {
            warn!("[runtime] Failed to update trace log: {}", e);
        }
        match write_results(&self.paths.result, &report.selected) {
            Ok(()) => info!("[runtime] Results saved: {}", self.paths.result.display()),
            Err(e) => warn!("[runtime] Failed to write results: {}", e),
        }
    }
}

fn render_row(row: &ProbeResult, target: f64) -> String {
    let mark = if row.throughput_mbps >= target { '*' } else { ' ' };
    format!(
        "{} {:<39} | {:>7.2} ms | {:>6.2} MB/s",
        mark,
        row.address.to_string(),
        row.latency_ms,
        row.throughput_mbps
    )
}
