//! Emission factor records and source version metadata.

use serde::{Deserialize, Serialize};

use crate::enums::{FactorSource, Scope};

/// A single emission factor from a database source.
///
/// Coefficients are kg of gas per one `activity_unit`. Factors either carry a
/// meaningful per-gas triple or a pre-aggregated `co2e_factor` (refrigerant
/// blends, materials, and spend-based factors use the latter exclusively).
/// Records are created once at load time and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    pub id: String,
    pub name: String,
    /// Stamped from the enclosing document header at load time.
    #[serde(default)]
    pub source: FactorSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,

    /// kg CO2 per activity unit.
    #[serde(default)]
    pub co2_factor: f64,
    /// kg CH4 per activity unit.
    #[serde(default)]
    pub ch4_factor: f64,
    /// kg N2O per activity unit.
    #[serde(default)]
    pub n2o_factor: f64,
    /// Pre-aggregated kg CO2e per activity unit, when gas-level decomposition
    /// is unavailable or inappropriate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2e_factor: Option<f64>,

    /// Unit the coefficients are expressed per (e.g. "gallon", "kWh").
    pub activity_unit: String,

    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl EmissionFactor {
    /// Lower-cased concatenation of the text fields the free-text search
    /// scores against.
    pub fn searchable_text(&self) -> String {
        let mut text = format!(
            "{} {} {} {} {}",
            self.name,
            self.description,
            self.category,
            self.subcategory,
            self.fuel_type.as_deref().unwrap_or(""),
        );
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        text.to_lowercase()
    }
}

/// Version metadata for one loaded factor document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorVersion {
    pub source: FactorSource,
    pub version: String,
    pub year: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub factor_count: usize,
}
