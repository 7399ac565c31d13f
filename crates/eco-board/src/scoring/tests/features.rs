use std::collections::BTreeSet;

use super::common::EPSILON;
use crate::catalog::FeatureTag;
use crate::scoring::ESSENTIAL_FEATURES;
use crate::scoring::{score_cost, score_features};

fn set(features: &[FeatureTag]) -> BTreeSet<FeatureTag> {
    features.iter().copied().collect()
}

#[test]
fn empty_feature_set_scores_zero() {
    assert_eq!(score_features(&BTreeSet::new()), 0.0);
}

#[test]
fn all_essentials_score_seventy_percent() {
    let score = score_features(&set(&ESSENTIAL_FEATURES));
    assert!((score - 0.7).abs() < EPSILON);
}

#[test]
fn three_extras_on_top_of_essentials_reach_one() {
    let mut features = set(&ESSENTIAL_FEATURES);
    features.extend([FeatureTag::Pcie4, FeatureTag::Raid, FeatureTag::UsbTypeC]);
    assert!((score_features(&features) - 1.0).abs() < EPSILON);

    features.insert(FeatureTag::IntegratedNetworking);
    assert!((score_features(&features) - 1.0).abs() < EPSILON);
}

#[test]
fn extras_alone_only_earn_the_bonus_share() {
    let score = score_features(&set(&[FeatureTag::Raid, FeatureTag::Pcie4]));
    assert!((score - 0.2).abs() < EPSILON);
}

#[test]
fn cost_score_saturates_at_the_ceiling() {
    assert_eq!(score_cost(0.0), 1.0);
    assert_eq!(score_cost(300.0), 0.0);
    assert_eq!(score_cost(600.0), 0.0);
    assert!((score_cost(150.0) - 0.5).abs() < EPSILON);

    let mut cost = 0.0;
    while cost <= 900.0 {
        let score = score_cost(cost);
        assert!((0.0..=1.0).contains(&score), "cost {cost} scored {score}");
        cost += 12.5;
    }
}
