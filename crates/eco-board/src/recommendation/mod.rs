//! Shared, lock-guarded access to a [`ScoringEngine`] for concurrent hosts.

mod router;

pub use router::{recommendation_router, RecommendationRequest, WeightsRequest};

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::catalog::{validate_records, CatalogLoadError, ComponentRecord};
use crate::scoring::{
    InvalidWeightError, Recommendation, RecommendationCriteria, ScoreBreakdown, ScoringEngine,
    WeightConfiguration,
};

/// Service wrapping one engine; catalog and weight updates are exclusive writers.
#[derive(Debug, Default)]
pub struct RecommendationService {
    engine: RwLock<ScoringEngine>,
}

impl RecommendationService {
    pub fn new(engine: ScoringEngine) -> Self {
        Self {
            engine: RwLock::new(engine),
        }
    }

    /// Validate and install a new catalog, returning the number of records loaded.
    pub fn load_catalog(&self, records: Vec<ComponentRecord>) -> Result<usize, CatalogLoadError> {
        validate_records(&records)?;
        let count = records.len();
        self.write().load_catalog(records);
        info!(count, "component catalog replaced");
        Ok(count)
    }

    pub fn set_weights(
        &self,
        power: f64,
        cost: f64,
        feature: f64,
    ) -> Result<WeightConfiguration, InvalidWeightError> {
        let weights = self.write().set_weights(power, cost, feature)?;
        info!(
            power = weights.power(),
            cost = weights.cost(),
            feature = weights.feature(),
            "scoring weights updated"
        );
        Ok(weights)
    }

    pub fn weights(&self) -> WeightConfiguration {
        self.read().weights()
    }

    pub fn catalog(&self) -> Vec<ComponentRecord> {
        self.read().catalog().to_vec()
    }

    /// Rank the catalog under `criteria`, keeping at most `limit` entries in the report.
    pub fn recommend(
        &self,
        criteria: &RecommendationCriteria,
        limit: Option<usize>,
    ) -> RecommendationReport {
        let engine = self.read();
        let ranked = engine.recommend(criteria);
        let total = ranked.len();
        let keep = limit.unwrap_or(total);

        let recommendations = ranked
            .iter()
            .take(keep)
            .enumerate()
            .map(|(index, entry)| RankedComponent::from_recommendation(index + 1, entry))
            .collect();

        RecommendationReport {
            generated_at: Utc::now(),
            weights: engine.weights(),
            total,
            recommendations,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ScoringEngine> {
        self.engine.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ScoringEngine> {
        self.engine.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owned snapshot of a ranking, detached from the engine lock.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub generated_at: DateTime<Utc>,
    pub weights: WeightConfiguration,
    pub total: usize,
    pub recommendations: Vec<RankedComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedComponent {
    pub rank: usize,
    pub component: ComponentRecord,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl RankedComponent {
    fn from_recommendation(rank: usize, entry: &Recommendation<'_>) -> Self {
        Self {
            rank,
            component: entry.record.clone(),
            score: entry.score,
            breakdown: entry.breakdown,
        }
    }
}
