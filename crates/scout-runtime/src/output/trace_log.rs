//! `trace.log`: timestamped blocks of past short lists.
//!
//! Before appending, a file over [`ROTATE_BYTES`] is cut down to its last
//! [`KEEP_LINES`] lines. A failed cut is logged and the block is appended
//! anyway.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};
use scout_core::ProbeResult;
use tracing::warn;

use super::OutputError;

pub const ROTATE_BYTES: u64 = 1024 * 1024;
pub const KEEP_LINES: usize = 50;

/// Render one block: a timestamp line, one line per row, a blank line.
pub fn format_block(rows: &[ProbeResult], at: DateTime<Local>) -> String {
    let mut block = format!("[{}] Top Results:\n", at.format("%Y-%m-%d %H:%M:%S"));
    for row in rows {
        block.push_str(&format!(
            "  - {:<15} | {:.1}ms | {:.2}MB/s\n",
            row.address.to_string(),
            row.latency_ms,
            row.throughput_mbps
        ));
    }
    block.push('\n');
    block
}

/// Append a block for `rows` to `path`, rotating first if needed.
pub fn append_results(
    path: &Path,
    rows: &[ProbeResult],
    at: DateTime<Local>,
) -> Result<(), OutputError> {
    if let Err(e) = rotate_if_large(path) {
        warn!("[output] trace.log rotation failed: {}", e);
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| OutputError::io(path, e))?;
    file.write_all(format_block(rows, at).as_bytes())
        .map_err(|e| OutputError::io(path, e))
}

fn rotate_if_large(path: &Path) -> Result<(), OutputError> {
    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(_) => return Ok(()),
    };
    if size <= ROTATE_BYTES {
        return Ok(());
    }
    let bytes = fs::read(path).map_err(|e| OutputError::io(path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(KEEP_LINES);
    let mut kept = lines[start..].join("\n");
    kept.push('\n');
    fs::write(path, kept).map_err(|e| OutputError::io(path, e))
}
