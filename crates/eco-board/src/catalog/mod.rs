//! Catalog loading for the recommendation engine.
//!
//! Parsing and schema validation happen here so the scoring engine only ever
//! receives well-formed, fully typed [`ComponentRecord`] values.

pub mod domain;
mod parser;

pub use domain::{
    ComponentId, ComponentRecord, ExpansionSlots, FeatureTag, FormFactor, MemoryConfig,
    PowerProfile, SocketType, UnknownVocabulary,
};

use std::io::Read;
use std::path::Path;

use tracing::debug;

/// Error raised while turning a persisted catalog into component records.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog contains an {0}")]
    UnknownValue(#[from] UnknownVocabulary),
    #[error("unsupported catalog format for '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),
    #[error("catalog record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

/// Persisted representations the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Csv,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self, CatalogLoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(CatalogLoadError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

pub struct CatalogLoader;

impl CatalogLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ComponentRecord>, CatalogLoadError> {
        let path = path.as_ref();
        let format = CatalogFormat::from_path(path)?;
        let file = std::fs::File::open(path)?;
        let records = Self::from_reader(file, format)?;
        debug!(path = %path.display(), count = records.len(), "catalog loaded");
        Ok(records)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        format: CatalogFormat,
    ) -> Result<Vec<ComponentRecord>, CatalogLoadError> {
        let records = match format {
            CatalogFormat::Json => parser::parse_json(reader)?,
            CatalogFormat::Csv => parser::parse_csv(reader)?,
        };
        validate_records(&records)?;
        Ok(records)
    }
}

/// Checks the value ranges the scoring formulas assume.
///
/// `idle_power_w <= load_power_w` is deliberately not checked.
pub fn validate_records(records: &[ComponentRecord]) -> Result<(), CatalogLoadError> {
    for (index, record) in records.iter().enumerate() {
        if let Some(reason) = record_violation(record) {
            return Err(CatalogLoadError::InvalidRecord { index, reason });
        }
    }
    Ok(())
}

fn record_violation(record: &ComponentRecord) -> Option<String> {
    if record.id.manufacturer.trim().is_empty() || record.id.model.trim().is_empty() {
        return Some("manufacturer and model are required".to_string());
    }

    let power = &record.power;
    let non_negative = [
        ("idle_power_w", power.idle_power_w),
        ("load_power_w", power.load_power_w),
        ("max_supported_power_w", power.max_supported_power_w),
        ("cost", record.cost),
    ];
    for (field, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Some(format!("{field} must be a non-negative number (got {value})"));
        }
    }

    let efficiency = power.regulator_efficiency_pct;
    if !efficiency.is_finite() || !(0.0..=100.0).contains(&efficiency) {
        return Some(format!(
            "regulator_efficiency_pct must be within 0-100 (got {efficiency})"
        ));
    }

    None
}
