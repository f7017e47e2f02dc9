//! Calculation results and running aggregates.

use serde::{Deserialize, Serialize};

use crate::enums::{
    DataQualityScore, FactorSource, GasType, GwpAssessment, Scope, Scope1Category, Scope2Method,
    Scope3Category,
};

/// Per-gas emission breakdown entry. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasBreakdown {
    pub gas: GasType,
    /// Mass in kg of the specific gas.
    pub mass_kg: f64,
    /// CO2-equivalent in kg using the GWP recorded alongside.
    pub co2e_kg: f64,
    pub gwp_used: f64,
    pub gwp_assessment: GwpAssessment,
}

/// Result of a single emission calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_name: Option<String>,

    pub scope: Scope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope1_category: Option<Scope1Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope2_method: Option<Scope2Method>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope3_category: Option<Scope3Category>,

    /// Total CO2-equivalent emissions in kg.
    pub total_co2e_kg: f64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gas_breakdown: Vec<GasBreakdown>,

    /// Registry factor used; absent when a custom factor was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor_source: Option<FactorSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_quality_score: Option<DataQualityScore>,

    pub gwp_assessment: GwpAssessment,

    /// Disclosure notes ("custom factor used", market-based proxy, ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl EmissionResult {
    pub fn total_co2e_tonnes(&self) -> f64 {
        self.total_co2e_kg / 1000.0
    }
}

/// Aggregated results for a single scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeResult {
    pub scope: Scope,
    pub total_co2e_kg: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<EmissionResult>,
}

impl ScopeResult {
    pub fn new(scope: Scope) -> Self {
        ScopeResult {
            scope,
            total_co2e_kg: 0.0,
            results: Vec::new(),
        }
    }

    pub fn total_co2e_tonnes(&self) -> f64 {
        self.total_co2e_kg / 1000.0
    }

    pub fn add_result(&mut self, result: EmissionResult) {
        self.total_co2e_kg += result.total_co2e_kg;
        self.results.push(result);
    }
}

/// Complete GHG inventory across all scopes. Scope 2 is held in two buckets
/// per the dual-reporting requirement; the headline total uses the
/// location-based bucket by convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    pub scope1: ScopeResult,
    pub scope2_location: ScopeResult,
    pub scope2_market: ScopeResult,
    pub scope3: ScopeResult,
}

impl InventoryResult {
    pub fn new(name: impl Into<String>, year: Option<i32>) -> Self {
        InventoryResult {
            name: name.into(),
            year,
            scope1: ScopeResult::new(Scope::Scope1),
            scope2_location: ScopeResult::new(Scope::Scope2),
            scope2_market: ScopeResult::new(Scope::Scope2),
            scope3: ScopeResult::new(Scope::Scope3),
        }
    }

    /// Headline total in kg (scope 1 + location-based scope 2 + scope 3).
    pub fn total_co2e_kg(&self) -> f64 {
        self.scope1.total_co2e_kg + self.scope2_location.total_co2e_kg + self.scope3.total_co2e_kg
    }

    pub fn total_co2e_tonnes(&self) -> f64 {
        self.total_co2e_kg() / 1000.0
    }

    pub fn all_results(&self) -> Vec<&EmissionResult> {
        self.scope1
            .results
            .iter()
            .chain(self.scope2_location.results.iter())
            .chain(self.scope2_market.results.iter())
            .chain(self.scope3.results.iter())
            .collect()
    }

    /// Route a result to its scope bucket. Scope 2 lands in the market bucket
    /// only when the method tag is explicitly market-based.
    pub fn add_result(&mut self, result: EmissionResult) {
        match result.scope {
            Scope::Scope1 => self.scope1.add_result(result),
            Scope::Scope2 => {
                if result.scope2_method == Some(Scope2Method::MarketBased) {
                    self.scope2_market.add_result(result);
                } else {
                    self.scope2_location.add_result(result);
                }
            }
            Scope::Scope3 => self.scope3.add_result(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(scope: Scope, method: Option<Scope2Method>, kg: f64) -> EmissionResult {
        EmissionResult {
            activity_id: None,
            activity_name: None,
            scope,
            scope1_category: None,
            scope2_method: method,
            scope3_category: None,
            total_co2e_kg: kg,
            gas_breakdown: Vec::new(),
            factor_id: None,
            factor_source: None,
            activity_quantity: None,
            activity_unit: None,
            data_quality_score: None,
            gwp_assessment: GwpAssessment::Ar5,
            notes: Vec::new(),
        }
    }

    #[test]
    fn routes_scope2_by_method_tag() {
        let mut inventory = InventoryResult::new("test", None);
        inventory.add_result(result(Scope::Scope2, Some(Scope2Method::LocationBased), 10.0));
        inventory.add_result(result(Scope::Scope2, Some(Scope2Method::MarketBased), 20.0));
        // No explicit method tag: location bucket by convention.
        inventory.add_result(result(Scope::Scope2, None, 5.0));

        assert_eq!(inventory.scope2_location.total_co2e_kg, 15.0);
        assert_eq!(inventory.scope2_market.total_co2e_kg, 20.0);
    }

    #[test]
    fn headline_total_excludes_market_bucket() {
        let mut inventory = InventoryResult::new("test", Some(2025));
        inventory.add_result(result(Scope::Scope1, None, 100.0));
        inventory.add_result(result(Scope::Scope2, Some(Scope2Method::LocationBased), 50.0));
        inventory.add_result(result(Scope::Scope2, Some(Scope2Method::MarketBased), 70.0));
        inventory.add_result(result(Scope::Scope3, None, 25.0));

        assert_eq!(inventory.total_co2e_kg(), 175.0);
        assert_eq!(inventory.all_results().len(), 4);
    }

    #[test]
    fn tonnes_is_kg_over_thousand() {
        let r = result(Scope::Scope1, None, 5307.45);
        assert!((r.total_co2e_tonnes() - 5.30745).abs() < 1e-9);
    }
}
