use std::collections::BTreeSet;

use crate::catalog::{FeatureTag, PowerProfile};

/// Idle draw at which the idle sub-score reaches zero.
pub const IDLE_CEILING_W: f64 = 20.0;
/// Load draw at which the load sub-score reaches zero.
pub const LOAD_CEILING_W: f64 = 100.0;
/// Price at which the cost score saturates at zero.
pub const COST_CEILING: f64 = 300.0;

/// Baseline capabilities every board is expected to offer.
pub const ESSENTIAL_FEATURES: [FeatureTag; 3] = [
    FeatureTag::UsbNative,
    FeatureTag::AdvancedPowerManagement,
    FeatureTag::Pcie3,
];

const ESSENTIAL_SHARE: f64 = 0.7;
const BONUS_SHARE: f64 = 0.3;
const BONUS_SATURATION: f64 = 3.0;

/// Mean of the idle, load, and efficiency sub-scores.
///
/// Sub-scores are not clamped: draws above the ceilings go negative and drag
/// the mean below zero.
pub fn score_power(profile: &PowerProfile) -> f64 {
    let idle = 1.0 - profile.idle_power_w / IDLE_CEILING_W;
    let load = 1.0 - profile.load_power_w / LOAD_CEILING_W;
    let efficiency = profile.regulator_efficiency_pct / 100.0;
    (idle + load + efficiency) / 3.0
}

pub fn score_features(features: &BTreeSet<FeatureTag>) -> f64 {
    let essential = ESSENTIAL_FEATURES
        .iter()
        .filter(|feature| features.contains(feature))
        .count();
    let coverage = essential as f64 / ESSENTIAL_FEATURES.len() as f64;
    let bonus_count = (features.len() - essential) as f64;
    let bonus = (bonus_count / BONUS_SATURATION).min(1.0);
    ESSENTIAL_SHARE * coverage + BONUS_SHARE * bonus
}

pub fn score_cost(cost: f64) -> f64 {
    1.0 - (cost / COST_CEILING).min(1.0)
}
