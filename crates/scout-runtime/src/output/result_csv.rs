//! `result.csv` writer.

use std::path::Path;

use scout_core::ProbeResult;

use super::OutputError;

/// Header row
pub const HEADER: [&str; 3] = ["IP", "Latency", "Speed"];

/// Replace `path` with the given rows, latency and speed to two decimals.
pub fn write_results(path: &Path, rows: &[ProbeResult]) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record([
            row.address.to_string(),
            format!("{:.2}", row.latency_ms),
            format!("{:.2}", row.throughput_mbps),
        ])?;
    }
    writer.flush().map_err(|e| OutputError::io(path, e))
}
