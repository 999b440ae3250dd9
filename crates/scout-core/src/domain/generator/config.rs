//! Candidate generator configuration.

/// Candidate generator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Elite tier: ranks below this percentage of all groups
    pub elite_percent: usize,
    /// Hosts drawn per elite group
    pub elite_quota: usize,
    /// Good tier: ranks below this percentage (and not elite)
    pub good_percent: usize,
    /// Hosts drawn per good group
    pub good_quota: usize,
    /// Normal tier: ranks below this percentage (and not good)
    pub normal_percent: usize,
    /// Hosts drawn per normal group
    pub normal_quota: usize,
    /// Chance that a bottom-tier group is revived for one probe
    pub revival_probability: f64,
    /// Hosts drawn per revived group
    pub revival_quota: usize,
    /// Random draws per slot before the slot is given up
    pub slot_attempts: usize,
    /// IPv6 addresses appended, as a fraction of the target
    pub ipv6_share: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            elite_percent: 5,
            elite_quota: 5,
            good_percent: 20,
            good_quota: 3,
            normal_percent: 50,
            normal_quota: 1,
            revival_probability: 0.01,
            revival_quota: 1,
            slot_attempts: 5,
            ipv6_share: 0.1,
        }
    }
}
