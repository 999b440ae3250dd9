//! Rank tiers of the warm-path budget.

use std::fmt;

use rand::Rng;

use super::config::GeneratorConfig;

/// Budget tier of a ranked group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Top of the ranking
    Elite,
    /// Upper ranks
    Good,
    /// Middle ranks
    Normal,
    /// Bottom half, revived by the random draw
    Explore,
    /// Bottom half, skipped this run
    Skip,
}

impl Tier {
    /// Classify `rank` (0 = best) out of `total` groups.
    ///
    /// Bottom-half groups consume one random draw each.
    pub fn for_rank<R: Rng + ?Sized>(
        rank: usize,
        total: usize,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Self {
        // rank < total * pct / 100, in integers
        let scaled = rank * 100;
        if scaled < total * config.elite_percent {
            Tier::Elite
        } else if scaled < total * config.good_percent {
            Tier::Good
        } else if scaled < total * config.normal_percent {
            Tier::Normal
        } else if rng.gen::<f64>() < config.revival_probability {
            Tier::Explore
        } else {
            Tier::Skip
        }
    }

    /// Hosts to draw for a group of this tier.
    pub fn quota(&self, config: &GeneratorConfig) -> usize {
        match self {
            Tier::Elite => config.elite_quota,
            Tier::Good => config.good_quota,
            Tier::Normal => config.normal_quota,
            Tier::Explore => config.revival_quota,
            Tier::Skip => 0,
        }
    }
}

/// Groups per tier in one budget plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierStats {
    /// Elite groups
    pub elite: usize,
    /// Good groups
    pub good: usize,
    /// Normal groups
    pub normal: usize,
    /// Revived bottom-half groups
    pub explore: usize,
}

impl TierStats {
    pub(super) fn count(&mut self, tier: Tier) {
        match tier {
            Tier::Elite => self.elite += 1,
            Tier::Good => self.good += 1,
            Tier::Normal => self.normal += 1,
            Tier::Explore => self.explore += 1,
            Tier::Skip => {}
        }
    }
}

impl fmt::Display for TierStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "elite[{}] good[{}] normal[{}] explore[{}]",
            self.elite, self.good, self.normal, self.explore
        )
    }
}
