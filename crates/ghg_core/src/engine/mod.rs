//! Scope calculators and the calculation orchestrator.
//!
//! One calculator per emission category, all implementing [`ScopeCalculator`].
//! Every calculator resolves a factor through its own documented fallback
//! chain; a failed resolution is always a typed error, never an empty result
//! list or a silent zero.

mod electricity;
mod fugitive;
mod mobile;
mod process;
mod scope3;
mod stationary;

pub use electricity::ElectricityCalculator;
pub use fugitive::FugitiveEmissionsCalculator;
pub use mobile::MobileCombustionCalculator;
pub use process::ProcessEmissionsCalculator;
pub use scope3::Scope3Calculator;
pub use stationary::StationaryCombustionCalculator;

use crate::activity::ActivityRecord;
use crate::enums::{GasType, GwpAssessment, Scope, Scope1Category};
use crate::error::{CalcError, CalcResult};
use crate::gwp;
use crate::registry::FactorRegistry;
use crate::result::{EmissionResult, GasBreakdown, InventoryResult};

/// Common contract for all scope calculators: one activity in, a non-empty
/// result list out, or a descriptive error.
pub trait ScopeCalculator {
    fn calculate(&self, activity: &ActivityRecord) -> CalcResult<Vec<EmissionResult>>;
}

/// Shared read-only state and helpers the calculators build on.
#[derive(Clone, Copy)]
pub(crate) struct CalcContext<'r> {
    pub registry: &'r FactorRegistry,
    pub assessment: GwpAssessment,
}

impl<'r> CalcContext<'r> {
    /// Result skeleton echoing the activity; calculators fill in the rest.
    pub fn base_result(&self, activity: &ActivityRecord, scope: Scope) -> EmissionResult {
        EmissionResult {
            activity_id: activity.id.clone(),
            activity_name: activity.name.clone(),
            scope,
            scope1_category: None,
            scope2_method: None,
            scope3_category: None,
            total_co2e_kg: 0.0,
            gas_breakdown: Vec::new(),
            factor_id: None,
            factor_source: None,
            activity_quantity: Some(activity.quantity),
            activity_unit: Some(activity.unit.clone()),
            data_quality_score: activity.data_quality,
            gwp_assessment: self.assessment,
            notes: Vec::new(),
        }
    }

    /// Per-gas breakdown from the three combustion gas masses, omitting any
    /// gas with zero mass.
    pub fn gas_breakdown(
        &self,
        co2_kg: f64,
        ch4_kg: f64,
        n2o_kg: f64,
    ) -> CalcResult<Vec<GasBreakdown>> {
        let mut breakdown = Vec::new();
        for (gas, mass_kg) in [
            (GasType::Co2, co2_kg),
            (GasType::Ch4, ch4_kg),
            (GasType::N2o, n2o_kg),
        ] {
            if mass_kg > 0.0 {
                let gwp_used = gwp::get_gwp(gas.as_str(), self.assessment)?;
                breakdown.push(GasBreakdown {
                    gas,
                    mass_kg,
                    co2e_kg: mass_kg * gwp_used,
                    gwp_used,
                    gwp_assessment: self.assessment,
                });
            }
        }
        Ok(breakdown)
    }
}

/// Sum CO2e over a gas breakdown.
pub(crate) fn total_co2e(breakdown: &[GasBreakdown]) -> f64 {
    breakdown.iter().map(|entry| entry.co2e_kg).sum()
}

/// Orchestrator: routes each activity to its scope calculator and folds
/// results into inventory aggregates.
pub struct GhgCalculator {
    registry: FactorRegistry,
    assessment: GwpAssessment,
}

impl GhgCalculator {
    pub fn new(registry: FactorRegistry) -> Self {
        GhgCalculator {
            registry,
            assessment: GwpAssessment::default(),
        }
    }

    pub fn with_assessment(registry: FactorRegistry, assessment: GwpAssessment) -> Self {
        GhgCalculator {
            registry,
            assessment,
        }
    }

    /// Orchestrator over the built-in factor databases.
    pub fn load_builtin() -> Self {
        GhgCalculator::new(FactorRegistry::load_builtin())
    }

    pub fn registry(&self) -> &FactorRegistry {
        &self.registry
    }

    /// Calculate emissions for one activity. Returns a list because some
    /// activities produce multiple results (Scope 2 reports dual methods).
    pub fn calculate_single(&self, activity: &ActivityRecord) -> CalcResult<Vec<EmissionResult>> {
        activity.validate()?;
        match activity.scope {
            Scope::Scope1 => self.route_scope1(activity),
            Scope::Scope2 => {
                ElectricityCalculator::new(&self.registry, self.assessment).calculate(activity)
            }
            Scope::Scope3 => {
                Scope3Calculator::new(&self.registry, self.assessment).calculate(activity)
            }
        }
    }

    /// Fold every activity's results into one inventory. All-or-nothing: the
    /// first activity that fails aborts the whole computation.
    pub fn calculate_inventory(
        &self,
        activities: &[ActivityRecord],
        name: &str,
        year: Option<i32>,
    ) -> CalcResult<InventoryResult> {
        let mut inventory = InventoryResult::new(name, year);
        for (index, activity) in activities.iter().enumerate() {
            let results = self
                .calculate_single(activity)
                .map_err(|err| err.in_activity(index))?;
            for result in results {
                inventory.add_result(result);
            }
        }
        Ok(inventory)
    }

    fn route_scope1(&self, activity: &ActivityRecord) -> CalcResult<Vec<EmissionResult>> {
        let category = match activity.scope1_category {
            Some(category) => category,
            // Infer from the activity data when the discriminator is absent.
            None if activity.refrigerant_type.is_some() => Scope1Category::FugitiveEmissions,
            None if activity.fuel_type.is_some() || activity.custom_fuel.is_some() => {
                Scope1Category::StationaryCombustion
            }
            None => {
                return Err(CalcError::validation(
                    "cannot determine scope 1 category; set scope1_category to one of \
                     stationary_combustion, mobile_combustion, fugitive_emissions, \
                     process_emissions",
                ))
            }
        };
        match category {
            Scope1Category::StationaryCombustion => {
                StationaryCombustionCalculator::new(&self.registry, self.assessment)
                    .calculate(activity)
            }
            Scope1Category::MobileCombustion => {
                MobileCombustionCalculator::new(&self.registry, self.assessment)
                    .calculate(activity)
            }
            Scope1Category::FugitiveEmissions => {
                FugitiveEmissionsCalculator::new(&self.registry, self.assessment)
                    .calculate(activity)
            }
            Scope1Category::ProcessEmissions => {
                ProcessEmissionsCalculator::new(&self.registry, self.assessment)
                    .calculate(activity)
            }
        }
    }
}
