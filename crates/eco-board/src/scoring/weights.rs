use serde::Serialize;

/// Relative importance of the power, cost, and feature criteria.
///
/// Always normalized so the three weights sum to 1. Negative inputs are
/// accepted and invert the contribution of that criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightConfiguration {
    power: f64,
    cost: f64,
    feature: f64,
}

impl WeightConfiguration {
    pub fn normalized(power: f64, cost: f64, feature: f64) -> Result<Self, InvalidWeightError> {
        let sum = power + cost + feature;
        if sum == 0.0 || !sum.is_finite() {
            return Err(InvalidWeightError {
                power,
                cost,
                feature,
            });
        }

        Ok(Self {
            power: power / sum,
            cost: cost / sum,
            feature: feature / sum,
        })
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn feature(&self) -> f64 {
        self.feature
    }
}

impl Default for WeightConfiguration {
    fn default() -> Self {
        Self {
            power: 0.4,
            cost: 0.3,
            feature: 0.3,
        }
    }
}

/// Weights that cannot be normalized because they sum to zero (or overflow).
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("weights power={power}, cost={cost}, feature={feature} cannot be normalized")]
pub struct InvalidWeightError {
    pub power: f64,
    pub cost: f64,
    pub feature: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(weights: &WeightConfiguration) -> f64 {
        weights.power() + weights.cost() + weights.feature()
    }

    #[test]
    fn default_weights_sum_to_one() {
        let weights = WeightConfiguration::default();
        assert!((sum(&weights) - 1.0).abs() < 1e-12);
        assert_eq!(weights.power(), 0.4);
    }

    #[test]
    fn normalizes_arbitrary_non_negative_inputs() {
        for (p, c, f) in [(1.0, 1.0, 1.0), (5.0, 0.0, 0.0), (0.2, 7.5, 3.3), (1e-9, 0.0, 2e-9)] {
            let weights = WeightConfiguration::normalized(p, c, f).expect("normalizes");
            assert!((sum(&weights) - 1.0).abs() < 1e-9, "{p} {c} {f}");
        }

        let weights = WeightConfiguration::normalized(2.0, 1.0, 1.0).expect("normalizes");
        assert_eq!(weights.power(), 0.5);
        assert_eq!(weights.cost(), 0.25);
        assert_eq!(weights.feature(), 0.25);
    }

    #[test]
    fn zero_sum_is_rejected() {
        let err = WeightConfiguration::normalized(0.0, 0.0, 0.0).unwrap_err();
        assert_eq!(err.power, 0.0);
        assert!(WeightConfiguration::normalized(1.0, -1.0, 0.0).is_err());
    }

    #[test]
    fn non_finite_sum_is_rejected() {
        assert!(WeightConfiguration::normalized(f64::NAN, 1.0, 1.0).is_err());
        assert!(WeightConfiguration::normalized(f64::INFINITY, 1.0, 1.0).is_err());
    }

    #[test]
    fn negative_weight_is_kept_after_normalization() {
        let weights = WeightConfiguration::normalized(2.0, -1.0, 1.0).expect("normalizes");
        assert_eq!(weights.cost(), -0.5);
    }
}
