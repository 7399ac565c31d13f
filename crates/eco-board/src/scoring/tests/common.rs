use std::collections::BTreeSet;

use crate::catalog::{
    ComponentId, ComponentRecord, ExpansionSlots, FeatureTag, FormFactor, PowerProfile,
    SocketType,
};
use crate::scoring::ScoringEngine;

pub(super) const EPSILON: f64 = 1e-9;

pub(super) fn board(
    model: &str,
    (idle, load, efficiency): (f64, f64, f64),
    cost: f64,
    features: &[FeatureTag],
) -> ComponentRecord {
    ComponentRecord {
        id: ComponentId::new("EcoLabs", model),
        socket: SocketType::Am4,
        form_factor: FormFactor::MicroAtx,
        chipset: None,
        memory: None,
        power: PowerProfile {
            idle_power_w: idle,
            load_power_w: load,
            regulator_efficiency_pct: efficiency,
            max_supported_power_w: 105.0,
        },
        features: features.iter().copied().collect::<BTreeSet<_>>(),
        cost,
        expansion_slots: ExpansionSlots {
            pcie_x16: 1,
            pcie_x1: 1,
            m2: 2,
            dimm: 2,
        },
    }
}

/// Board A from the reference scenario: modest power, single essential feature.
pub(super) fn board_a() -> ComponentRecord {
    board(
        "A",
        (10.0, 50.0, 80.0),
        150.0,
        &[FeatureTag::AdvancedPowerManagement],
    )
}

/// Board B from the reference scenario: efficient, fully equipped, pricier.
pub(super) fn board_b() -> ComponentRecord {
    board(
        "B",
        (5.0, 30.0, 90.0),
        250.0,
        &[
            FeatureTag::AdvancedPowerManagement,
            FeatureTag::Pcie3,
            FeatureTag::UsbNative,
        ],
    )
}

pub(super) fn engine_with(records: Vec<ComponentRecord>) -> ScoringEngine {
    let mut engine = ScoringEngine::new();
    engine.load_catalog(records);
    engine
}

pub(super) fn models(ranked: &[crate::scoring::Recommendation<'_>]) -> Vec<String> {
    ranked
        .iter()
        .map(|entry| entry.record.id.model.clone())
        .collect()
}
