use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Manufacturer/model pair identifying a catalog entry. Display and tie-break only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId {
    pub manufacturer: String,
    pub model: String,
}

impl ComponentId {
    pub fn new(manufacturer: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            model: model.into(),
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.manufacturer, self.model)
    }
}

/// Energy behavior of a board as published by the vendor or measured on the bench.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerProfile {
    pub idle_power_w: f64,
    pub load_power_w: f64,
    pub regulator_efficiency_pct: f64,
    pub max_supported_power_w: f64,
}

/// Expansion capacity retained for display; not scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionSlots {
    #[serde(default)]
    pub pcie_x16: u8,
    #[serde(default)]
    pub pcie_x1: u8,
    #[serde(default)]
    pub m2: u8,
    #[serde(default)]
    pub dimm: u8,
}

/// Memory subsystem details retained for display; not scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub slots: u8,
    #[serde(alias = "max_speed")]
    pub max_speed_mhz: u32,
    #[serde(alias = "max_capacity")]
    pub max_capacity_gb: u32,
    pub voltage: f64,
    #[serde(default)]
    pub ecc_support: bool,
}

/// One immutable catalog entry handed to the scoring engine by a loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: ComponentId,
    pub socket: SocketType,
    pub form_factor: FormFactor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chipset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryConfig>,
    pub power: PowerProfile,
    #[serde(default)]
    pub features: BTreeSet<FeatureTag>,
    pub cost: f64,
    #[serde(default)]
    pub expansion_slots: ExpansionSlots,
}

impl ComponentRecord {
    pub fn has_features<'a, I>(&self, required: I) -> bool
    where
        I: IntoIterator<Item = &'a FeatureTag>,
    {
        required
            .into_iter()
            .all(|feature| self.features.contains(feature))
    }
}

/// Raised when a vocabulary value is outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} '{value}'")]
pub struct UnknownVocabulary {
    pub field: &'static str,
    pub value: String,
}

fn normalize_token(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}

/// Supported board capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum FeatureTag {
    /// USB 3.0 driven directly by the chipset.
    #[serde(rename = "usb-native")]
    UsbNative,
    #[serde(rename = "advanced-power-management")]
    AdvancedPowerManagement,
    #[serde(rename = "pcie-3")]
    Pcie3,
    #[serde(rename = "pcie-4")]
    Pcie4,
    #[serde(rename = "raid")]
    Raid,
    #[serde(rename = "vpro")]
    Vpro,
    #[serde(rename = "integrated-networking")]
    IntegratedNetworking,
    #[serde(rename = "usb-type-c")]
    UsbTypeC,
}

impl FeatureTag {
    pub const ALL: [FeatureTag; 8] = [
        FeatureTag::UsbNative,
        FeatureTag::AdvancedPowerManagement,
        FeatureTag::Pcie3,
        FeatureTag::Pcie4,
        FeatureTag::Raid,
        FeatureTag::Vpro,
        FeatureTag::IntegratedNetworking,
        FeatureTag::UsbTypeC,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            FeatureTag::UsbNative => "usb-native",
            FeatureTag::AdvancedPowerManagement => "advanced-power-management",
            FeatureTag::Pcie3 => "pcie-3",
            FeatureTag::Pcie4 => "pcie-4",
            FeatureTag::Raid => "raid",
            FeatureTag::Vpro => "vpro",
            FeatureTag::IntegratedNetworking => "integrated-networking",
            FeatureTag::UsbTypeC => "usb-type-c",
        }
    }
}

impl fmt::Display for FeatureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FeatureTag {
    type Err = UnknownVocabulary;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_token(raw).as_str() {
            "usb-native" | "usb3" | "usb3-native" | "usb-3.0-native-support" => {
                Ok(FeatureTag::UsbNative)
            }
            "advanced-power-management" | "apm" => Ok(FeatureTag::AdvancedPowerManagement),
            "pcie-3" | "pcie3" | "pcie-3.0" | "pcie3.0" | "pcie-3.0-support" => {
                Ok(FeatureTag::Pcie3)
            }
            "pcie-4" | "pcie4" | "pcie-4.0" | "pcie4.0" | "pcie-4.0-support" => {
                Ok(FeatureTag::Pcie4)
            }
            "raid" | "raid-support" => Ok(FeatureTag::Raid),
            "vpro" | "intel-vpro" | "intel-vpro-technology" => Ok(FeatureTag::Vpro),
            "integrated-networking" | "lan" => Ok(FeatureTag::IntegratedNetworking),
            "usb-type-c" | "usb-c" => Ok(FeatureTag::UsbTypeC),
            _ => Err(UnknownVocabulary {
                field: "feature",
                value: raw.trim().to_string(),
            }),
        }
    }
}

impl TryFrom<String> for FeatureTag {
    type Error = UnknownVocabulary;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// CPU sockets carried by catalog boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SocketType {
    #[serde(rename = "am4")]
    Am4,
    #[serde(rename = "am5")]
    Am5,
    #[serde(rename = "lga1150")]
    Lga1150,
    #[serde(rename = "lga1151")]
    Lga1151,
    #[serde(rename = "lga1155")]
    Lga1155,
    #[serde(rename = "lga1200")]
    Lga1200,
    #[serde(rename = "lga1700")]
    Lga1700,
    #[serde(rename = "bga")]
    Bga,
}

impl SocketType {
    pub const fn label(self) -> &'static str {
        match self {
            SocketType::Am4 => "am4",
            SocketType::Am5 => "am5",
            SocketType::Lga1150 => "lga1150",
            SocketType::Lga1151 => "lga1151",
            SocketType::Lga1155 => "lga1155",
            SocketType::Lga1200 => "lga1200",
            SocketType::Lga1700 => "lga1700",
            SocketType::Bga => "bga",
        }
    }
}

impl fmt::Display for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SocketType {
    type Err = UnknownVocabulary;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_token(raw).replace('-', "").as_str() {
            "am4" => Ok(SocketType::Am4),
            "am5" => Ok(SocketType::Am5),
            "lga1150" => Ok(SocketType::Lga1150),
            "lga1151" => Ok(SocketType::Lga1151),
            "lga1155" => Ok(SocketType::Lga1155),
            "lga1200" => Ok(SocketType::Lga1200),
            "lga1700" => Ok(SocketType::Lga1700),
            "bga" | "soldered" => Ok(SocketType::Bga),
            _ => Err(UnknownVocabulary {
                field: "socket",
                value: raw.trim().to_string(),
            }),
        }
    }
}

impl TryFrom<String> for SocketType {
    type Error = UnknownVocabulary;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Board form factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum FormFactor {
    #[serde(rename = "atx")]
    Atx,
    #[serde(rename = "micro-atx")]
    MicroAtx,
    #[serde(rename = "mini-itx")]
    MiniItx,
    #[serde(rename = "nano-itx")]
    NanoItx,
    #[serde(rename = "embedded")]
    Embedded,
}

impl FormFactor {
    pub const fn label(self) -> &'static str {
        match self {
            FormFactor::Atx => "atx",
            FormFactor::MicroAtx => "micro-atx",
            FormFactor::MiniItx => "mini-itx",
            FormFactor::NanoItx => "nano-itx",
            FormFactor::Embedded => "embedded",
        }
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormFactor {
    type Err = UnknownVocabulary;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_token(raw).as_str() {
            "atx" => Ok(FormFactor::Atx),
            "micro-atx" | "matx" | "microatx" => Ok(FormFactor::MicroAtx),
            "mini-itx" | "miniitx" => Ok(FormFactor::MiniItx),
            "nano-itx" | "nanoitx" => Ok(FormFactor::NanoItx),
            "embedded" | "sbc" => Ok(FormFactor::Embedded),
            _ => Err(UnknownVocabulary {
                field: "form factor",
                value: raw.trim().to_string(),
            }),
        }
    }
}

impl TryFrom<String> for FormFactor {
    type Error = UnknownVocabulary;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_tags_accept_aliases_and_labels() {
        assert_eq!("USB3".parse::<FeatureTag>(), Ok(FeatureTag::UsbNative));
        assert_eq!("PCIe 3.0".parse::<FeatureTag>(), Ok(FeatureTag::Pcie3));
        assert_eq!("usb_c".parse::<FeatureTag>(), Ok(FeatureTag::UsbTypeC));
        for tag in FeatureTag::ALL {
            assert_eq!(tag.label().parse::<FeatureTag>(), Ok(tag));
        }
    }

    #[test]
    fn feature_tags_accept_legacy_display_labels() {
        let labels = [
            ("USB 3.0 Native Support", FeatureTag::UsbNative),
            ("Intel vPro Technology", FeatureTag::Vpro),
            ("Advanced Power Management", FeatureTag::AdvancedPowerManagement),
            ("RAID Support", FeatureTag::Raid),
            ("PCIe 3.0 Support", FeatureTag::Pcie3),
            ("PCIe 4.0 Support", FeatureTag::Pcie4),
        ];
        for (label, tag) in labels {
            assert_eq!(label.parse::<FeatureTag>(), Ok(tag), "{label}");
        }
    }

    #[test]
    fn older_intel_sockets_parse_with_spaces() {
        assert_eq!("LGA 1150".parse::<SocketType>(), Ok(SocketType::Lga1150));
        assert_eq!("LGA 1155".parse::<SocketType>(), Ok(SocketType::Lga1155));
        assert_eq!(SocketType::Lga1155.label(), "lga1155");
    }

    #[test]
    fn unknown_feature_is_rejected() {
        let err = "thunderbolt".parse::<FeatureTag>().unwrap_err();
        assert_eq!(err.field, "feature");
        assert_eq!(err.value, "thunderbolt");
    }

    #[test]
    fn json_rejects_unknown_socket() {
        let err = serde_json::from_str::<SocketType>("\"sp3\"").unwrap_err();
        assert!(err.to_string().contains("unknown socket 'sp3'"));
        let socket: SocketType = serde_json::from_str("\"LGA 1700\"").expect("alias parses");
        assert_eq!(socket, SocketType::Lga1700);
    }

    #[test]
    fn serializes_with_canonical_labels() {
        let json = serde_json::to_string(&FormFactor::MicroAtx).expect("serializes");
        assert_eq!(json, "\"micro-atx\"");
        let json = serde_json::to_string(&FeatureTag::AdvancedPowerManagement).expect("serializes");
        assert_eq!(json, "\"advanced-power-management\"");
    }
}
