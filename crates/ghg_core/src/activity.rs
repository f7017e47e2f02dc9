//! Activity record — the universal input for all emission calculations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{
    DataQualityScore, FactorSource, FuelType, GasType, Scope, Scope1Category, Scope2Method,
    Scope3Category,
};
use crate::error::{CalcError, CalcResult};

/// One reported business activity that generates GHG emissions.
///
/// Which optional descriptors are required varies by scope and category; the
/// calculators enforce those rules. `validate` only checks the invariants
/// that hold for every record. Immutable once constructed; one instance is
/// consumed per calculation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub scope: Scope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope1_category: Option<Scope1Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope2_method: Option<Scope2Method>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope3_category: Option<Scope3Category>,

    /// Activity quantity (gallons, kWh, miles, ...). Strictly positive.
    pub quantity: f64,
    /// Unit of the quantity (e.g. "therm", "kWh", "gallon").
    pub unit: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fuel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_subregion: Option<String>,

    /// Custom emission factor override (kg CO2e per unit). Takes precedence
    /// over every registry resolution path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_factor_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_factor_gas: Option<GasType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor_source: Option<FactorSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_quality: Option<DataQualityScore>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spend_amount: Option<f64>,
    #[serde(default = "default_spend_currency")]
    pub spend_currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naics_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposal_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refrigerant_type: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

fn default_spend_currency() -> String {
    "USD".to_string()
}

impl ActivityRecord {
    /// Bare record for the given scope; optional descriptors start unset.
    pub fn new(scope: Scope, quantity: f64, unit: impl Into<String>) -> Self {
        ActivityRecord {
            id: None,
            name: None,
            description: None,
            scope,
            scope1_category: None,
            scope2_method: None,
            scope3_category: None,
            quantity,
            unit: unit.into(),
            fuel_type: None,
            custom_fuel: None,
            country: None,
            region: None,
            grid_subregion: None,
            custom_factor: None,
            custom_factor_unit: None,
            custom_factor_gas: None,
            factor_source: None,
            year: None,
            data_quality: None,
            spend_amount: None,
            spend_currency: default_spend_currency(),
            naics_code: None,
            distance: None,
            distance_unit: None,
            weight: None,
            weight_unit: None,
            vehicle_type: None,
            transport_mode: None,
            waste_type: None,
            disposal_method: None,
            refrigerant_type: None,
            tags: BTreeMap::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Check record-level invariants. Calculators call this before resolving.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(CalcError::validation(format!(
                "quantity must be a positive number, got {}",
                self.quantity
            )));
        }
        if self.unit.trim().is_empty() {
            return Err(CalcError::validation("unit must not be empty"));
        }
        if let Some(spend) = self.spend_amount {
            if !spend.is_finite() || spend <= 0.0 {
                return Err(CalcError::validation(format!(
                    "spend_amount must be a positive number, got {}",
                    spend
                )));
            }
        }
        if let Some(distance) = self.distance {
            if !distance.is_finite() || distance <= 0.0 {
                return Err(CalcError::validation(format!(
                    "distance must be a positive number, got {}",
                    distance
                )));
            }
        }
        if let Some(weight) = self.weight {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(CalcError::validation(format!(
                    "weight must be a positive number, got {}",
                    weight
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_non_positive_quantity() {
        let mut activity = ActivityRecord::new(Scope::Scope1, 0.0, "therm");
        assert!(activity.validate().is_err());
        activity.quantity = -5.0;
        assert!(activity.validate().is_err());
        activity.quantity = f64::NAN;
        assert!(activity.validate().is_err());
        activity.quantity = 100.0;
        assert!(activity.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_unit() {
        let activity = ActivityRecord::new(Scope::Scope2, 10.0, "  ");
        assert!(activity.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_optionals() {
        let mut activity = ActivityRecord::new(Scope::Scope3, 1.0, "USD");
        activity.spend_amount = Some(-1.0);
        assert!(activity.validate().is_err());
        activity.spend_amount = Some(100.0);
        activity.distance = Some(0.0);
        assert!(activity.validate().is_err());
        activity.distance = Some(10.0);
        activity.weight = Some(-2.0);
        assert!(activity.validate().is_err());
        activity.weight = Some(2.0);
        assert!(activity.validate().is_ok());
    }

    #[test]
    fn deserializes_with_defaults() {
        let activity: ActivityRecord = serde_json::from_str(
            r#"{"scope": "scope_1", "quantity": 1000, "unit": "therm", "fuel_type": "natural_gas"}"#,
        )
        .expect("deserialize");
        assert_eq!(activity.scope, Scope::Scope1);
        assert_eq!(activity.fuel_type, Some(FuelType::NaturalGas));
        assert_eq!(activity.spend_currency, "USD");
        assert!(activity.custom_factor.is_none());
    }
}
