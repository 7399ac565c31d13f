mod criteria;
mod rules;
mod weights;

#[cfg(test)]
mod tests;

pub use criteria::RecommendationCriteria;
pub use rules::{score_cost, score_features, score_power, ESSENTIAL_FEATURES};
pub use weights::{InvalidWeightError, WeightConfiguration};

use serde::Serialize;

use crate::catalog::ComponentRecord;

/// Weighted multi-criteria scorer over an in-memory catalog.
///
/// Holds no locks and performs no I/O; hosts that share an engine between
/// requests wrap it themselves.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    catalog: Vec<ComponentRecord>,
    weights: WeightConfiguration,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: WeightConfiguration) -> Self {
        Self {
            catalog: Vec::new(),
            weights,
        }
    }

    /// Replaces the catalog wholesale, keeping the given order for tie-breaks.
    pub fn load_catalog(&mut self, records: Vec<ComponentRecord>) {
        self.catalog = records;
    }

    /// Normalizes and stores new weights. On error the previous weights stay in place.
    pub fn set_weights(
        &mut self,
        power: f64,
        cost: f64,
        feature: f64,
    ) -> Result<WeightConfiguration, InvalidWeightError> {
        let weights = WeightConfiguration::normalized(power, cost, feature)?;
        self.weights = weights;
        Ok(weights)
    }

    pub fn catalog(&self) -> &[ComponentRecord] {
        &self.catalog
    }

    pub fn weights(&self) -> WeightConfiguration {
        self.weights
    }

    pub fn score_component(&self, record: &ComponentRecord) -> f64 {
        self.score_breakdown(record).composite
    }

    pub fn score_breakdown(&self, record: &ComponentRecord) -> ScoreBreakdown {
        let power = score_power(&record.power);
        let cost = score_cost(record.cost);
        let features = score_features(&record.features);
        let composite = self.weights.power() * power
            + self.weights.feature() * features
            + self.weights.cost() * cost;

        ScoreBreakdown {
            power,
            cost,
            features,
            composite,
        }
    }

    /// Filters the catalog and ranks the survivors by descending composite score.
    ///
    /// Equal scores keep catalog order. The full list is returned; truncation
    /// is left to the caller.
    pub fn recommend(&self, criteria: &RecommendationCriteria) -> Vec<Recommendation<'_>> {
        let candidates = criteria.apply(self.catalog.iter().collect());

        let mut ranked: Vec<Recommendation<'_>> = candidates
            .into_iter()
            .map(|record| {
                let breakdown = self.score_breakdown(record);
                Recommendation {
                    record,
                    score: breakdown.composite,
                    breakdown,
                }
            })
            .collect();

        ranked.sort_by(|left, right| right.score.total_cmp(&left.score));
        ranked
    }
}

/// Sub-scores behind a composite, kept for transparent audits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub power: f64,
    pub cost: f64,
    pub features: f64,
    pub composite: f64,
}

/// One ranked catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    pub record: &'a ComponentRecord,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}
