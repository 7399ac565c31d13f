use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{ComponentRecord, FeatureTag, FormFactor, SocketType};

/// Per-call filter constraints. Every field is optional; an empty value passes everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationCriteria {
    #[serde(default, alias = "maxPower")]
    pub max_power: Option<f64>,
    #[serde(default, alias = "maxCost")]
    pub max_cost: Option<f64>,
    #[serde(default, alias = "requiredFeatures")]
    pub required_features: BTreeSet<FeatureTag>,
    #[serde(default)]
    pub socket: Option<SocketType>,
    #[serde(default, alias = "formFactor")]
    pub form_factor: Option<FormFactor>,
}

impl RecommendationCriteria {
    pub fn with_max_power(mut self, watts: f64) -> Self {
        self.max_power = Some(watts);
        self
    }

    pub fn with_max_cost(mut self, cost: f64) -> Self {
        self.max_cost = Some(cost);
        self
    }

    pub fn requiring(mut self, feature: FeatureTag) -> Self {
        self.required_features.insert(feature);
        self
    }

    pub fn with_socket(mut self, socket: SocketType) -> Self {
        self.socket = Some(socket);
        self
    }

    pub fn with_form_factor(mut self, form_factor: FormFactor) -> Self {
        self.form_factor = Some(form_factor);
        self
    }

    /// Narrows `candidates` in the fixed order: load power, cost, required
    /// features, socket, form factor. Input order is preserved.
    pub(crate) fn apply<'a>(
        &self,
        mut candidates: Vec<&'a ComponentRecord>,
    ) -> Vec<&'a ComponentRecord> {
        if let Some(max_power) = self.max_power {
            candidates.retain(|record| record.power.load_power_w <= max_power);
        }
        if let Some(max_cost) = self.max_cost {
            candidates.retain(|record| record.cost <= max_cost);
        }
        if !self.required_features.is_empty() {
            candidates.retain(|record| record.has_features(&self.required_features));
        }
        if let Some(socket) = self.socket {
            candidates.retain(|record| record.socket == socket);
        }
        if let Some(form_factor) = self.form_factor {
            candidates.retain(|record| record.form_factor == form_factor);
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_keys_are_accepted() {
        let criteria: RecommendationCriteria = serde_json::from_str(
            r#"{"maxPower": 60, "maxCost": 100, "requiredFeatures": ["pcie-3"], "formFactor": "mini-itx"}"#,
        )
        .expect("criteria parse");

        assert_eq!(
            criteria,
            RecommendationCriteria::default()
                .with_max_power(60.0)
                .with_max_cost(100.0)
                .requiring(FeatureTag::Pcie3)
                .with_form_factor(FormFactor::MiniItx)
        );
    }
}
