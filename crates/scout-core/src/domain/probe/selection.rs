//! Final short-list selection.

use super::result::ProbeResult;

/// Thresholds for the final short list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPolicy {
    /// Throughput (MB/s) that qualifies a result on its own
    pub min_speed_target: f64,
    /// Backfill with non-qualifiers until the list has this many rows
    pub min_results: usize,
    /// Results below this throughput (MB/s) are never selected
    pub min_usable_speed: f64,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            min_speed_target: 5.0,
            min_results: 5,
            min_usable_speed: 0.1,
        }
    }
}

/// Sort results into ranking order (reachable first, then fastest connect).
pub fn rank_by_latency(results: &mut [ProbeResult]) {
    results.sort_by(|a, b| a.rank_cmp(b));
}

/// Pick the final short list from speed-tested results.
///
/// Every usable result meeting `min_speed_target` is kept. If that leaves
/// fewer than `min_results`, the fastest remaining usable results fill the
/// gap. The list is ordered by throughput, fastest first.
pub fn select_final(tested: &[ProbeResult], policy: &SelectionPolicy) -> Vec<ProbeResult> {
    let mut usable: Vec<ProbeResult> = tested
        .iter()
        .filter(|r| !r.lost && r.throughput_mbps > policy.min_usable_speed)
        .copied()
        .collect();
    usable.sort_by(|a, b| b.throughput_mbps.total_cmp(&a.throughput_mbps));

    let qualified = usable
        .iter()
        .take_while(|r| r.throughput_mbps >= policy.min_speed_target)
        .count();
    let keep = qualified.max(policy.min_results.min(usable.len()));
    usable.truncate(keep);
    usable
}
