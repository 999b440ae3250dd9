//! Tests for the bandit model

use super::*;
use crate::domain::{GroupId, ProbeResult};
use std::net::IpAddr;

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn group(s: &str) -> GroupId {
    s.parse().unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn warm_model(groups: &[(&str, f64, f64)]) -> BanditModel {
    let snapshot = groups
        .iter()
        .fold(ModelSnapshot::default(), |s, (g, count, reward)| {
            s.with_group(g, *count, *reward)
        })
        .with_launch_count(10);
    BanditModel::from_snapshot(snapshot, BanditConfig::default())
}

// =============================================================================
// TEST GROUP 1: Reward shaping
// =============================================================================

#[test]
fn test_reward_fast_connect_only() {
    let reward = RewardConfig::default();
    assert!(approx(reward.reward(50.0, 0.0, false, true), 0.3));
    assert!(approx(reward.reward(10.0, 0.0, false, true), 0.3));
}

#[test]
fn test_reward_slow_connect_earns_nothing() {
    let reward = RewardConfig::default();
    assert!(approx(reward.reward(200.0, 0.0, false, true), 0.0));
    assert!(approx(reward.reward(900.0, 0.0, false, true), 0.0));
    assert!(approx(reward.reward(125.0, 0.0, false, true), 0.15));
}

#[test]
fn test_reward_full_marks_with_throughput() {
    let reward = RewardConfig::default();
    assert!(approx(reward.reward(50.0, 10.0, false, false), 1.0));
    assert!(approx(reward.reward(50.0, 40.0, false, false), 1.0));
    assert!(approx(reward.reward(50.0, 5.0, false, false), 0.65));
}

#[test]
fn test_reward_lost_is_zero_regardless() {
    let reward = RewardConfig::default();
    assert_eq!(reward.reward(10.0, 50.0, true, false), 0.0);
    assert_eq!(reward.reward(10.0, 50.0, true, true), 0.0);
}

// =============================================================================
// TEST GROUP 2: Scoring
// =============================================================================

#[test]
fn test_unknown_group_scores_sentinel() {
    let model = BanditModel::default();
    assert_eq!(model.score(&group("1.2.3.0")), 9999.0);
}

#[test]
fn test_nearly_unexplored_group_scores_sentinel() {
    let model = warm_model(&[("1.2.3.0", 0.09, 0.09), ("4.5.6.0", 0.1, 0.1)]);
    assert_eq!(model.score(&group("1.2.3.0")), 9999.0);
    assert!(model.score(&group("4.5.6.0")) < 9999.0);
}

#[test]
fn test_sentinel_beats_best_explored_group() {
    let model = warm_model(&[("1.2.3.0", 0.1, 0.1), ("9.9.9.0", 1000.0, 1000.0)]);
    let unexplored = model.score(&group("7.7.7.0"));
    assert!(unexplored > model.score(&group("1.2.3.0")));
    assert!(unexplored > model.score(&group("9.9.9.0")));
}

#[test]
fn test_ucb_score_formula() {
    let model = warm_model(&[("1.2.3.0", 4.0, 2.0), ("4.5.6.0", 16.0, 4.0)]);
    // N = 20
    let expected = 0.5 + (2.0 * 20f64.ln() / 4.0).sqrt();
    assert!(approx(model.score(&group("1.2.3.0")), expected));
}

#[test]
fn test_ucb_bonus_uses_at_least_one_sample() {
    let model = warm_model(&[("1.2.3.0", 0.5, 0.25)]);
    // ln(max(0.5, 1)) = 0, so only the average remains
    assert!(approx(model.score(&group("1.2.3.0")), 0.5));
}

// =============================================================================
// TEST GROUP 3: Recording outcomes
// =============================================================================

#[test]
fn test_record_creates_group_and_counts() {
    let mut model = BanditModel::default();
    let reward = model.record(ip("104.16.3.9"), 50.0, 0.0, false, true);
    assert_eq!(reward, Some(0.3));

    let record = model.record_of(&group("104.16.3.0")).unwrap();
    assert!(approx(record.count, 1.0));
    assert!(approx(record.total_reward, 0.3));
    assert!(approx(model.total_samples(), 1.0));
}

#[test]
fn test_record_ignores_ipv6() {
    let mut model = BanditModel::default();
    assert_eq!(model.record(ip("2606:4700::1"), 20.0, 0.0, false, true), None);
    assert_eq!(model.group_count(), 0);
    assert_eq!(model.total_samples(), 0.0);
}

#[test]
fn test_record_loss_counts_as_exploration() {
    let mut model = BanditModel::default();
    model.record_outcome(&ProbeResult::lost(ip("1.1.1.1")), true);
    let record = model.record_of(&group("1.1.1.0")).unwrap();
    assert!(approx(record.count, 1.0));
    assert_eq!(record.total_reward, 0.0);
}

#[test]
fn test_outlier_on_good_group_is_dampened() {
    let mut model = warm_model(&[("1.2.3.0", 50.0, 45.0)]);
    let before = *model.record_of(&group("1.2.3.0")).unwrap();
    let samples_before = model.total_samples();

    // reward 0.05: 0.3 * (1 - 125/150)
    let reward = model.record(ip("1.2.3.4"), 175.0, 0.0, false, true).unwrap();
    assert!(reward < 0.1);

    let after = *model.record_of(&group("1.2.3.0")).unwrap();
    assert!(approx(after.count - before.count, 0.2));
    assert!(approx(after.total_reward - before.total_reward, 0.2 * reward));
    assert!(approx(model.total_samples() - samples_before, 0.2));
}

#[test]
fn test_loss_on_good_group_is_dampened() {
    let mut model = warm_model(&[("1.2.3.0", 10.0, 9.0)]);
    model.record_outcome(&ProbeResult::lost(ip("1.2.3.4")), true);
    let after = model.record_of(&group("1.2.3.0")).unwrap();
    assert!(approx(after.count, 10.2));
    assert!(approx(after.total_reward, 9.0));
}

#[test]
fn test_no_dampening_for_mediocre_group_or_decent_reward() {
    let mut model = warm_model(&[("1.2.3.0", 10.0, 5.0), ("4.5.6.0", 10.0, 9.0)]);

    // Average 0.5 is not established
    model.record_outcome(&ProbeResult::lost(ip("1.2.3.4")), true);
    assert!(approx(model.record_of(&group("1.2.3.0")).unwrap().count, 11.0));

    // Reward 0.3 is not an outlier
    model.record(ip("4.5.6.7"), 50.0, 0.0, false, true);
    assert!(approx(model.record_of(&group("4.5.6.0")).unwrap().count, 11.0));
}

#[test]
fn test_dampening_applies_to_single_sample_history() {
    let mut model = warm_model(&[("1.2.3.0", 1.0, 0.9)]);
    model.record_outcome(&ProbeResult::lost(ip("1.2.3.4")), true);
    assert!(approx(model.record_of(&group("1.2.3.0")).unwrap().count, 1.2));
}

#[test]
fn test_fresh_group_is_never_dampened() {
    let mut model = BanditModel::default();
    model.record_outcome(&ProbeResult::lost(ip("7.7.7.7")), true);
    assert!(approx(model.record_of(&group("7.7.7.0")).unwrap().count, 1.0));
}

// =============================================================================
// TEST GROUP 4: Cold start
// =============================================================================

#[test]
fn test_cold_start_on_early_launches() {
    let groups: Vec<String> = (0..150).map(|i| format!("10.0.{}.0", i)).collect();
    let snapshot = groups
        .iter()
        .fold(ModelSnapshot::default(), |s, g| s.with_group(g, 1.0, 0.5))
        .with_launch_count(2);
    let mut model = BanditModel::from_snapshot(snapshot, BanditConfig::default());

    model.begin_launch();
    assert_eq!(model.launch_count(), 3);
    assert!(model.is_cold_start());

    model.begin_launch();
    assert!(!model.is_cold_start());
}

#[test]
fn test_cold_start_with_few_groups() {
    let model = warm_model(&[("1.2.3.0", 5.0, 4.0)]);
    assert_eq!(model.launch_count(), 10);
    assert!(model.is_cold_start());
}

// =============================================================================
// TEST GROUP 5: Decay and pruning
// =============================================================================

#[test]
fn test_decay_shrinks_every_record() {
    let mut model = warm_model(&[("1.2.3.0", 8.0, 6.0), ("4.5.6.0", 3.0, 2.4)]);
    let mut previous = model.record_of(&group("1.2.3.0")).unwrap().count;
    for _ in 0..5 {
        model.decay();
        let count = model.record_of(&group("1.2.3.0")).unwrap().count;
        assert!(count < previous);
        previous = count;
    }
    assert!(approx(previous, 8.0 * 0.85f64.powi(5)));
    assert!(approx(model.total_samples(), 11.0 * 0.85f64.powi(5)));
}

#[test]
fn test_decay_prunes_stale_low_value_groups() {
    let mut model = warm_model(&[
        ("1.1.1.0", 0.5, 0.05),  // -> 0.425, avg 0.1: pruned
        ("2.2.2.0", 0.5, 0.25),  // -> 0.425, avg 0.5: kept (good)
        ("3.3.3.0", 1.0, 0.1),   // -> 0.85, avg 0.1: kept (enough weight)
    ]);
    let pruned = model.decay();
    assert_eq!(pruned, 1);
    assert!(model.record_of(&group("1.1.1.0")).is_none());
    assert!(model.record_of(&group("2.2.2.0")).is_some());
    assert!(model.record_of(&group("3.3.3.0")).is_some());
}

#[test]
fn test_repeated_decay_eventually_prunes_bad_groups() {
    let mut model = warm_model(&[("1.1.1.0", 4.0, 0.4), ("2.2.2.0", 4.0, 3.6)]);
    for _ in 0..20 {
        model.decay();
    }
    assert!(model.record_of(&group("1.1.1.0")).is_none());
    // Average reward survives decay, so good groups fade but stay
    let good = model.record_of(&group("2.2.2.0")).unwrap();
    assert!(good.count < 0.5);
    assert!(approx(good.avg_reward(), 0.9));
}

// =============================================================================
// TEST GROUP 6: Snapshot boundary
// =============================================================================

#[test]
fn test_snapshot_drops_corrupt_records() {
    let mut snapshot = ModelSnapshot::default().with_group("1.2.3.0", 2.0, 1.0);
    snapshot
        .subnets
        .insert("not-a-net".to_string(), GroupRecord::new(1.0, 1.0));
    snapshot
        .subnets
        .insert("5.5.5.0".to_string(), GroupRecord::new(f64::NAN, 1.0));
    snapshot
        .subnets
        .insert("6.6.6.0".to_string(), GroupRecord::new(-1.0, 0.0));

    let model = BanditModel::from_snapshot(snapshot, BanditConfig::default());
    assert_eq!(model.group_count(), 1);
}

#[test]
fn test_snapshot_recomputes_broken_total() {
    let mut snapshot = ModelSnapshot::default()
        .with_group("1.2.3.0", 2.0, 1.0)
        .with_group("4.5.6.0", 3.0, 1.0);
    snapshot.total_runs = f64::INFINITY;

    let model = BanditModel::from_snapshot(snapshot, BanditConfig::default());
    assert!(approx(model.total_samples(), 5.0));
}

#[test]
fn test_snapshot_merges_keys_of_the_same_group() {
    let snapshot = ModelSnapshot::default()
        .with_group("1.2.3.0", 2.0, 1.5)
        .with_group("1.2.3.7", 3.0, 0.5);

    let model = BanditModel::from_snapshot(snapshot, BanditConfig::default());

    let id: GroupId = "1.2.3.0".parse().unwrap();
    let record = model.record_of(&id).unwrap();
    assert_eq!(model.group_count(), 1);
    assert!(approx(record.count, 5.0));
    assert!(approx(record.total_reward, 2.0));
    assert!(approx(model.total_samples(), 5.0));
}

#[test]
fn test_snapshot_keys_are_group_bases() {
    let mut model = BanditModel::default();
    model.record(ip("172.64.200.17"), 60.0, 0.0, false, true);
    let snapshot = model.snapshot();
    assert_eq!(snapshot.version, MODEL_VERSION);
    assert!(snapshot.subnets.contains_key("172.64.200.0"));
}
