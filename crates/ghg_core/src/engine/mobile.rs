//! Scope 1 — mobile combustion (company-owned vehicles, vessels, aircraft).

use crate::activity::ActivityRecord;
use crate::engine::{total_co2e, CalcContext, ScopeCalculator};
use crate::enums::{GwpAssessment, Scope, Scope1Category};
use crate::error::{CalcError, CalcResult};
use crate::registry::FactorRegistry;
use crate::result::EmissionResult;
use crate::units;

pub struct MobileCombustionCalculator<'r> {
    ctx: CalcContext<'r>,
}

impl<'r> MobileCombustionCalculator<'r> {
    pub fn new(registry: &'r FactorRegistry, assessment: GwpAssessment) -> Self {
        MobileCombustionCalculator {
            ctx: CalcContext {
                registry,
                assessment,
            },
        }
    }
}

impl ScopeCalculator for MobileCombustionCalculator<'_> {
    fn calculate(&self, activity: &ActivityRecord) -> CalcResult<Vec<EmissionResult>> {
        let mut result = self.ctx.base_result(activity, Scope::Scope1);
        result.scope1_category = Some(Scope1Category::MobileCombustion);

        if let Some(custom) = activity.custom_factor {
            result.total_co2e_kg = activity.quantity * custom;
            result.notes.push("Custom emission factor used".to_string());
            return Ok(vec![result]);
        }

        // Resolution is keyed by fuel; vehicle_type is descriptive only and
        // is echoed in the error when nothing matches.
        let fuel = activity
            .fuel_type
            .map(|fuel| fuel.as_str().to_string())
            .or_else(|| activity.custom_fuel.clone());
        let factor = fuel.as_deref().and_then(|fuel| {
            self.ctx.registry.find_factor(
                "mobile_combustion",
                Some(fuel),
                None,
                Some(&activity.unit),
                activity.factor_source,
            )
        });
        let factor = factor.ok_or_else(|| {
            CalcError::no_matching_factor(format!(
                "mobile combustion: fuel={}, vehicle={}, unit={}",
                fuel.as_deref().unwrap_or("<none>"),
                activity.vehicle_type.as_deref().unwrap_or("<none>"),
                activity.unit
            ))
        })?;

        let quantity = units::convert(activity.quantity, &activity.unit, &factor.activity_unit)
            .map_err(|err| {
                CalcError::unit_conversion(format!("{} (factor {})", err, factor.id))
            })?;

        let breakdown = self.ctx.gas_breakdown(
            quantity * factor.co2_factor,
            quantity * factor.ch4_factor,
            quantity * factor.n2o_factor,
        )?;
        result.total_co2e_kg = total_co2e(&breakdown);
        result.gas_breakdown = breakdown;
        result.factor_id = Some(factor.id.clone());
        result.factor_source = Some(factor.source);
        Ok(vec![result])
    }
}
