//! Candidate generation.

use std::collections::HashSet;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use super::config::GeneratorConfig;
use super::tiers::{Tier, TierStats};
use crate::domain::{BanditModel, Ipv4Range, Ipv6Range};

/// Which policy produced a probe list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Coverage sweep, scores ignored
    ColdStart,
    /// Score-ranked tier budget
    Warm,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColdStart => write!(f, "cold-start census"),
            Self::Warm => write!(f, "UCB budget"),
        }
    }
}

/// Budget of one ranked group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    /// The group
    pub group: Ipv4Range,
    /// Its UCB score at ranking time
    pub score: f64,
    /// Tier from its rank
    pub tier: Tier,
    /// Hosts to draw
    pub quota: usize,
}

/// Warm-path budget: groups in rank order with their quotas
#[derive(Debug, Clone, Default)]
pub struct BudgetPlan {
    /// Allocations, best rank first
    pub allocations: Vec<Allocation>,
    /// Groups per tier
    pub stats: TierStats,
}

/// Builds probe lists from ranges and bandit scores.
#[derive(Debug, Clone, Default)]
pub struct CandidateGenerator {
    config: GeneratorConfig,
}

impl CandidateGenerator {
    /// Create a generator
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produce up to `target` unique IPv4 candidates (plus the IPv6 share).
    ///
    /// The result is shuffled; order carries no meaning. Empty ranges give
    /// an empty list.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        ranges_v4: &[Ipv4Range],
        ranges_v6: &[Ipv6Range],
        target: usize,
        model: &BanditModel,
        rng: &mut R,
    ) -> Vec<IpAddr> {
        let mut groups = expand_groups(ranges_v4);
        let mut seen = HashSet::new();
        let supply: u64 = groups.iter().map(Ipv4Range::host_count).sum();
        let mut out = Vec::with_capacity(target.min(supply as usize));

        let mode = if model.is_cold_start() {
            GenerationMode::ColdStart
        } else {
            GenerationMode::Warm
        };
        info!(
            "[generator] {} over {} groups (launch {}, {} known groups), target {}",
            mode,
            groups.len(),
            model.launch_count(),
            model.group_count(),
            target
        );

        match mode {
            GenerationMode::ColdStart => {
                self.census(&mut groups, target, &mut seen, &mut out, rng);
            }
            GenerationMode::Warm => {
                let plan = self.allocate(&groups, model, rng);
                info!("[generator] Budget: {}", plan.stats);
                self.draw_budget(&plan, target, &mut seen, &mut out, rng);
            }
        }

        if !ranges_v6.is_empty() {
            let added = self.draw_v6(ranges_v6, target, &mut seen, &mut out, rng);
            debug!("[generator] Added {} IPv6 candidates", added);
        }

        out.shuffle(rng);
        info!("[generator] Generated {} candidates", out.len());
        out
    }

    /// Rank groups by score (stable, best first) and assign tier quotas.
    pub fn allocate<R: Rng + ?Sized>(
        &self,
        groups: &[Ipv4Range],
        model: &BanditModel,
        rng: &mut R,
    ) -> BudgetPlan {
        let mut scored: Vec<(f64, Ipv4Range)> = groups
            .iter()
            .map(|g| (model.score(&g.group_id()), *g))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let total = scored.len();
        let mut plan = BudgetPlan {
            allocations: Vec::with_capacity(total),
            stats: TierStats::default(),
        };
        for (rank, (score, group)) in scored.into_iter().enumerate() {
            let tier = Tier::for_rank(rank, total, &self.config, rng);
            plan.stats.count(tier);
            plan.allocations.push(Allocation {
                group,
                score,
                tier,
                quota: tier.quota(&self.config),
            });
        }
        plan
    }

    /// Cold path: shuffled round-robin sweeps, one new host per group each.
    fn census<R: Rng + ?Sized>(
        &self,
        groups: &mut [Ipv4Range],
        target: usize,
        seen: &mut HashSet<IpAddr>,
        out: &mut Vec<IpAddr>,
        rng: &mut R,
    ) {
        groups.shuffle(rng);
        let mut drawn = vec![0u64; groups.len()];
        let mut active: Vec<usize> = (0..groups.len()).collect();

        while out.len() < target && !active.is_empty() {
            active.retain(|&i| {
                if out.len() >= target {
                    return true;
                }
                match self.fresh_host(&groups[i], seen, rng) {
                    Some(addr) => {
                        out.push(IpAddr::V4(addr));
                        drawn[i] += 1;
                        drawn[i] < groups[i].host_count()
                    }
                    None => false,
                }
            });
        }
        if out.len() < target {
            info!(
                "[generator] Ranges exhausted at {} of {} candidates",
                out.len(),
                target
            );
        }
    }

    /// Warm path: emit each group's quota in rank order until `target`.
    fn draw_budget<R: Rng + ?Sized>(
        &self,
        plan: &BudgetPlan,
        target: usize,
        seen: &mut HashSet<IpAddr>,
        out: &mut Vec<IpAddr>,
        rng: &mut R,
    ) {
        for alloc in plan.allocations.iter().filter(|a| a.quota > 0) {
            if out.len() >= target {
                break;
            }
            let slots = (alloc.quota as u64).min(alloc.group.host_count());
            for _ in 0..slots {
                if out.len() >= target {
                    break;
                }
                for _ in 0..self.config.slot_attempts {
                    let addr = IpAddr::V4(alloc.group.random_host(rng));
                    if seen.insert(addr) {
                        out.push(addr);
                        break;
                    }
                }
            }
        }
    }

    /// Append `ipv6_share * target` random IPv6 addresses.
    fn draw_v6<R: Rng + ?Sized>(
        &self,
        ranges: &[Ipv6Range],
        target: usize,
        seen: &mut HashSet<IpAddr>,
        out: &mut Vec<IpAddr>,
        rng: &mut R,
    ) -> usize {
        let limit = (target as f64 * self.config.ipv6_share) as usize;
        let mut added = 0;
        for _ in 0..limit {
            let Some(range) = ranges.choose(rng) else {
                break;
            };
            for _ in 0..self.config.slot_attempts {
                let addr = IpAddr::V6(range.random_host(rng));
                if seen.insert(addr) {
                    out.push(addr);
                    added += 1;
                    break;
                }
            }
        }
        added
    }

    /// A host of `group` not yet in `seen`.
    ///
    /// Tries random draws first, then scans forward from a random offset so
    /// a nearly full group still yields its remaining hosts.
    fn fresh_host<R: Rng + ?Sized>(
        &self,
        group: &Ipv4Range,
        seen: &mut HashSet<IpAddr>,
        rng: &mut R,
    ) -> Option<Ipv4Addr> {
        for _ in 0..self.config.slot_attempts {
            let addr = group.random_host(rng);
            if seen.insert(IpAddr::V4(addr)) {
                return Some(addr);
            }
        }

        let (first, last) = group.host_offsets();
        let span = last - first + 1;
        let start = rng.gen_range(0..span);
        (0..span)
            .map(|i| group.host(first + (start + i) % span))
            .find(|addr| seen.insert(IpAddr::V4(*addr)))
    }
}

/// Expand IPv4 ranges into de-duplicated /24 groups, in input order.
pub fn expand_groups(ranges: &[Ipv4Range]) -> Vec<Ipv4Range> {
    let mut seen = HashSet::new();
    ranges
        .iter()
        .flat_map(|r| r.groups())
        .filter(|g| seen.insert(*g))
        .collect()
}
