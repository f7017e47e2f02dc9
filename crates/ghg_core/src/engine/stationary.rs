//! Scope 1 — stationary combustion (boilers, furnaces, heaters, generators).

use crate::activity::ActivityRecord;
use crate::engine::{total_co2e, CalcContext, ScopeCalculator};
use crate::enums::{GwpAssessment, Scope, Scope1Category};
use crate::error::{CalcError, CalcResult};
use crate::registry::FactorRegistry;
use crate::result::EmissionResult;
use crate::units;

pub struct StationaryCombustionCalculator<'r> {
    ctx: CalcContext<'r>,
}

impl<'r> StationaryCombustionCalculator<'r> {
    pub fn new(registry: &'r FactorRegistry, assessment: GwpAssessment) -> Self {
        StationaryCombustionCalculator {
            ctx: CalcContext {
                registry,
                assessment,
            },
        }
    }
}

impl ScopeCalculator for StationaryCombustionCalculator<'_> {
    fn calculate(&self, activity: &ActivityRecord) -> CalcResult<Vec<EmissionResult>> {
        let mut result = self.ctx.base_result(activity, Scope::Scope1);
        result.scope1_category = Some(Scope1Category::StationaryCombustion);

        if let Some(custom) = activity.custom_factor {
            result.total_co2e_kg = activity.quantity * custom;
            result.notes.push("Custom emission factor used".to_string());
            return Ok(vec![result]);
        }

        let fuel = activity
            .fuel_type
            .map(|fuel| fuel.as_str().to_string())
            .or_else(|| activity.custom_fuel.clone());
        let factor = fuel.as_deref().and_then(|fuel| {
            self.ctx.registry.find_factor(
                "stationary_combustion",
                Some(fuel),
                None,
                Some(&activity.unit),
                activity.factor_source,
            )
        });
        let factor = factor.ok_or_else(|| {
            CalcError::no_matching_factor(format!(
                "stationary combustion: fuel={}, unit={}",
                fuel.as_deref().unwrap_or("<none>"),
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
