use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::domain::{
    ComponentId, ComponentRecord, ExpansionSlots, FeatureTag, FormFactor, MemoryConfig,
    PowerProfile, SocketType,
};
use super::CatalogLoadError;

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<ComponentRecord>, CatalogLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<CatalogRow>() {
        records.push(row?.into_record()?);
    }

    Ok(records)
}

/// Accepts a bare array, a `{"components": [...]}` document, or a
/// `{"motherboards": [...]}` board database with flat identity fields.
pub(crate) fn parse_json<R: Read>(reader: R) -> Result<Vec<ComponentRecord>, CatalogLoadError> {
    let document: Value = serde_json::from_reader(reader)?;
    match document {
        Value::Object(mut fields) => {
            if let Some(boards) = fields.remove("motherboards") {
                let boards: Vec<BoardEntry> = serde_json::from_value(boards)?;
                return Ok(boards.into_iter().map(BoardEntry::into_record).collect());
            }
            let components = fields
                .remove("components")
                .unwrap_or(Value::Object(fields));
            Ok(serde_json::from_value(components)?)
        }
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Entry of a `motherboards` database.
#[derive(Debug, Deserialize)]
struct BoardEntry {
    manufacturer: String,
    model: String,
    socket: SocketType,
    form_factor: FormFactor,
    #[serde(default)]
    chipset: Option<String>,
    #[serde(default)]
    memory: Option<MemoryConfig>,
    power: BoardPower,
    #[serde(default)]
    features: BTreeSet<FeatureTag>,
    cost: f64,
    #[serde(default)]
    pcie_slots: BTreeMap<String, u8>,
}

#[derive(Debug, Deserialize)]
struct BoardPower {
    idle_power: f64,
    load_power: f64,
    vrm_efficiency: f64,
    max_tdp_support: f64,
}

impl BoardEntry {
    fn into_record(self) -> ComponentRecord {
        let mut slots = ExpansionSlots {
            dimm: self.memory.map(|memory| memory.slots).unwrap_or_default(),
            ..ExpansionSlots::default()
        };
        for (kind, count) in &self.pcie_slots {
            match kind.to_ascii_lowercase().replace(['_', '.', ' '], "").as_str() {
                "x16" | "pciex16" => slots.pcie_x16 = *count,
                "x1" | "pciex1" => slots.pcie_x1 = *count,
                "m2" => slots.m2 = *count,
                _ => {}
            }
        }

        ComponentRecord {
            id: ComponentId::new(self.manufacturer, self.model),
            socket: self.socket,
            form_factor: self.form_factor,
            chipset: self.chipset,
            memory: self.memory,
            power: PowerProfile {
                idle_power_w: self.power.idle_power,
                load_power_w: self.power.load_power,
                regulator_efficiency_pct: self.power.vrm_efficiency,
                max_supported_power_w: self.power.max_tdp_support,
            },
            features: self.features,
            cost: self.cost,
            expansion_slots: slots,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    manufacturer: String,
    model: String,
    socket: String,
    form_factor: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    chipset: Option<String>,
    idle_power_w: f64,
    load_power_w: f64,
    regulator_efficiency_pct: f64,
    max_supported_power_w: f64,
    cost: f64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    features: Option<String>,
    #[serde(default, deserialize_with = "empty_slot_as_zero")]
    pcie_x16_slots: u8,
    #[serde(default, deserialize_with = "empty_slot_as_zero")]
    pcie_x1_slots: u8,
    #[serde(default, deserialize_with = "empty_slot_as_zero")]
    m2_slots: u8,
    #[serde(default, deserialize_with = "empty_slot_as_zero")]
    dimm_slots: u8,
}

impl CatalogRow {
    fn into_record(self) -> Result<ComponentRecord, CatalogLoadError> {
        let socket: SocketType = self.socket.parse()?;
        let form_factor: FormFactor = self.form_factor.parse()?;
        let features = self
            .features
            .as_deref()
            .map(parse_features)
            .transpose()?
            .unwrap_or_default();

        Ok(ComponentRecord {
            id: ComponentId::new(self.manufacturer, self.model),
            socket,
            form_factor,
            chipset: self.chipset,
            memory: None,
            power: PowerProfile {
                idle_power_w: self.idle_power_w,
                load_power_w: self.load_power_w,
                regulator_efficiency_pct: self.regulator_efficiency_pct,
                max_supported_power_w: self.max_supported_power_w,
            },
            features,
            cost: self.cost,
            expansion_slots: ExpansionSlots {
                pcie_x16: self.pcie_x16_slots,
                pcie_x1: self.pcie_x1_slots,
                m2: self.m2_slots,
                dimm: self.dimm_slots,
            },
        })
    }
}

fn parse_features(raw: &str) -> Result<BTreeSet<FeatureTag>, CatalogLoadError> {
    raw.split(';')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<FeatureTag>().map_err(CatalogLoadError::from))
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn empty_slot_as_zero<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    match empty_string_as_none(deserializer)? {
        Some(value) => value.trim().parse().map_err(serde::de::Error::custom),
        None => Ok(0),
    }
}
