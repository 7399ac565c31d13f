use eco_board::catalog::{
    CatalogLoader, ComponentId, ComponentRecord, ExpansionSlots, FeatureTag, FormFactor,
    PowerProfile, SocketType,
};
use eco_board::config::EngineConfig;
use eco_board::error::AppError;
use eco_board::recommendation::RecommendationService;
use eco_board::scoring::ScoringEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the shared service from configuration, loading the catalog when one is configured.
pub(crate) fn build_service(config: &EngineConfig) -> Result<RecommendationService, AppError> {
    let service = RecommendationService::new(ScoringEngine::with_weights(config.weights));

    match &config.catalog_path {
        Some(path) => {
            let records = CatalogLoader::from_path(path)?;
            let loaded = service.load_catalog(records)?;
            info!(path = %path.display(), loaded, "startup catalog loaded");
        }
        None => info!("no startup catalog configured; awaiting upload"),
    }

    Ok(service)
}

fn sample_board(
    manufacturer: &str,
    model: &str,
    socket: SocketType,
    form_factor: FormFactor,
    (idle, load, efficiency, max): (f64, f64, f64, f64),
    cost: f64,
    features: &[FeatureTag],
) -> ComponentRecord {
    ComponentRecord {
        id: ComponentId::new(manufacturer, model),
        socket,
        form_factor,
        chipset: None,
        memory: None,
        power: PowerProfile {
            idle_power_w: idle,
            load_power_w: load,
            regulator_efficiency_pct: efficiency,
            max_supported_power_w: max,
        },
        features: features.iter().copied().collect(),
        cost,
        expansion_slots: ExpansionSlots {
            pcie_x16: 1,
            pcie_x1: if form_factor == FormFactor::MiniItx { 0 } else { 2 },
            m2: 2,
            dimm: if form_factor == FormFactor::MiniItx { 2 } else { 4 },
        },
    }
}

/// Small representative catalog for demos and smoke tests.
pub(crate) fn sample_catalog() -> Vec<ComponentRecord> {
    use FeatureTag::*;

    vec![
        sample_board(
            "Asus",
            "Prime B550M-A",
            SocketType::Am4,
            FormFactor::MicroAtx,
            (10.0, 50.0, 80.0, 105.0),
            150.0,
            &[AdvancedPowerManagement],
        ),
        sample_board(
            "Gigabyte",
            "B660M DS3H",
            SocketType::Lga1700,
            FormFactor::MicroAtx,
            (5.0, 30.0, 90.0, 125.0),
            250.0,
            &[AdvancedPowerManagement, Pcie3, UsbNative],
        ),
        sample_board(
            "ASRock",
            "A520M-ITX/ac",
            SocketType::Am4,
            FormFactor::MiniItx,
            (6.0, 38.0, 85.0, 88.0),
            99.0,
            &[Pcie3, UsbTypeC],
        ),
        sample_board(
            "MSI",
            "MAG X670E Tomahawk",
            SocketType::Am5,
            FormFactor::Atx,
            (18.0, 95.0, 93.0, 170.0),
            289.0,
            &[
                UsbNative,
                AdvancedPowerManagement,
                Pcie3,
                Pcie4,
                Raid,
                IntegratedNetworking,
            ],
        ),
        sample_board(
            "Supermicro",
            "X12STL-IF",
            SocketType::Lga1200,
            FormFactor::MicroAtx,
            (9.0, 42.0, 91.0, 95.0),
            265.0,
            &[UsbNative, AdvancedPowerManagement, Pcie4, IntegratedNetworking],
        ),
    ]
}
