use crate::infra::sample_catalog;
use clap::Args;
use eco_board::catalog::{CatalogLoader, FeatureTag, FormFactor, SocketType};
use eco_board::error::AppError;
use eco_board::recommendation::{RecommendationReport, RecommendationService};
use eco_board::scoring::{RecommendationCriteria, ScoringEngine, WeightConfiguration};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Catalog file to rank (.json or .csv)
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Keep boards whose load draw is at most this many watts
    #[arg(long)]
    pub(crate) max_power: Option<f64>,
    /// Keep boards costing at most this much
    #[arg(long)]
    pub(crate) max_cost: Option<f64>,
    /// Require a feature (repeatable), e.g. --require usb3 --require pcie-4
    #[arg(long = "require")]
    pub(crate) required_features: Vec<FeatureTag>,
    /// Restrict to a CPU socket
    #[arg(long)]
    pub(crate) socket: Option<SocketType>,
    /// Restrict to a form factor
    #[arg(long)]
    pub(crate) form_factor: Option<FormFactor>,
    /// Relative importance of power behavior
    #[arg(long)]
    pub(crate) power_weight: Option<f64>,
    /// Relative importance of price
    #[arg(long)]
    pub(crate) cost_weight: Option<f64>,
    /// Relative importance of the feature set
    #[arg(long)]
    pub(crate) feature_weight: Option<f64>,
    /// Show at most this many boards
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Emit the report as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

impl RecommendArgs {
    fn criteria(&self) -> RecommendationCriteria {
        RecommendationCriteria {
            max_power: self.max_power,
            max_cost: self.max_cost,
            required_features: self.required_features.iter().copied().collect(),
            socket: self.socket,
            form_factor: self.form_factor,
        }
    }

    fn weight_override(&self) -> Option<(f64, f64, f64)> {
        if self.power_weight.is_none() && self.cost_weight.is_none() && self.feature_weight.is_none()
        {
            return None;
        }

        let defaults = WeightConfiguration::default();
        Some((
            self.power_weight.unwrap_or(defaults.power()),
            self.cost_weight.unwrap_or(defaults.cost()),
            self.feature_weight.unwrap_or(defaults.feature()),
        ))
    }
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let service = RecommendationService::default();
    service.load_catalog(CatalogLoader::from_path(&args.catalog)?)?;

    if let Some((power, cost, feature)) = args.weight_override() {
        service.set_weights(power, cost, feature)?;
    }

    let report = service.recommend(&args.criteria(), args.limit);

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Report payload unavailable: {err}"),
        }
    } else {
        render_report(&report);
    }

    Ok(())
}

pub(crate) fn run_catalog_validate(path: PathBuf) -> Result<(), AppError> {
    let records = CatalogLoader::from_path(&path)?;
    println!(
        "{}: {} component record(s) valid",
        path.display(),
        records.len()
    );
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Motherboard recommendation demo");

    let service = RecommendationService::default();
    service.load_catalog(sample_catalog())?;

    println!("\nFull ranking under default weights");
    render_report(&service.recommend(&RecommendationCriteria::default(), None));

    let criteria = RecommendationCriteria::default()
        .with_max_power(60.0)
        .requiring(FeatureTag::AdvancedPowerManagement);
    println!("\nLoad draw <= 60 W with advanced power management");
    render_report(&service.recommend(&criteria, None));

    service.set_weights(0.2, 0.6, 0.2)?;
    println!("\nBudget-leaning weights");
    render_report(&service.recommend(&RecommendationCriteria::default(), Some(3)));

    println!("\nReference comparison");
    let engine = ScoringEngine::new();
    let catalog = sample_catalog();
    for record in catalog.iter().take(2) {
        let breakdown = engine.score_breakdown(record);
        println!(
            "- {}: composite {:.4} (power {:.4}, cost {:.4}, features {:.4})",
            record.id, breakdown.composite, breakdown.power, breakdown.cost, breakdown.features
        );
    }

    Ok(())
}

pub(crate) fn render_report(report: &RecommendationReport) {
    let weights = report.weights;
    println!(
        "Weights: power {:.2} | cost {:.2} | features {:.2}",
        weights.power(),
        weights.cost(),
        weights.feature()
    );

    if report.recommendations.is_empty() {
        println!("No boards match the requested criteria");
        return;
    }

    println!(
        "Showing {} of {} matching board(s)",
        report.recommendations.len(),
        report.total
    );
    for entry in &report.recommendations {
        let component = &entry.component;
        let features: Vec<&str> = component
            .features
            .iter()
            .map(|feature| feature.label())
            .collect();
        println!(
            "{:>2}. {} [{} / {}] score {:.3}",
            entry.rank, component.id, component.socket, component.form_factor, entry.score
        );
        println!(
            "    {:.0} W load, {:.0} W idle, {:.0}% VRM | cost {:.2} | {}",
            component.power.load_power_w,
            component.power.idle_power_w,
            component.power.regulator_efficiency_pct,
            component.cost,
            if features.is_empty() {
                "no listed features".to_string()
            } else {
                features.join(", ")
            }
        );
        println!(
            "    sub-scores: power {:.3}, cost {:.3}, features {:.3}",
            entry.breakdown.power, entry.breakdown.cost, entry.breakdown.features
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        args: RecommendArgs,
    }

    #[test]
    fn parses_repeatable_feature_filters() {
        let harness = Harness::try_parse_from([
            "eco-board",
            "--catalog",
            "boards.csv",
            "--require",
            "usb3",
            "--require",
            "pcie-4",
            "--socket",
            "am5",
        ])
        .expect("arguments parse");

        let criteria = harness.args.criteria();
        assert!(criteria.required_features.contains(&FeatureTag::UsbNative));
        assert!(criteria.required_features.contains(&FeatureTag::Pcie4));
        assert_eq!(criteria.socket, Some(SocketType::Am5));
        assert!(harness.args.weight_override().is_none());
    }

    #[test]
    fn unknown_feature_is_a_parse_error() {
        let result = Harness::try_parse_from([
            "eco-board",
            "--catalog",
            "boards.csv",
            "--require",
            "thunderbolt",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn partial_weight_override_fills_in_defaults() {
        let harness = Harness::try_parse_from([
            "eco-board",
            "--catalog",
            "boards.json",
            "--cost-weight",
            "0.9",
        ])
        .expect("arguments parse");

        assert_eq!(harness.args.weight_override(), Some((0.4, 0.9, 0.3)));
    }

    #[test]
    fn demo_runs_over_sample_catalog() {
        assert!(run_demo().is_ok());
    }
}
