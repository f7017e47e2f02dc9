//! Scope 1 — process emissions (cement, chemicals, other industrial
//! processes). Usually served by a custom factor; registry factors for this
//! category often carry a pre-aggregated co2e value which takes precedence
//! over the per-gas arithmetic.

use crate::activity::ActivityRecord;
use crate::engine::{total_co2e, CalcContext, ScopeCalculator};
use crate::enums::{GwpAssessment, Scope, Scope1Category};
use crate::error::{CalcError, CalcResult};
use crate::registry::FactorRegistry;
use crate::result::EmissionResult;
use crate::units;

pub struct ProcessEmissionsCalculator<'r> {
    ctx: CalcContext<'r>,
}

impl<'r> ProcessEmissionsCalculator<'r> {
    pub fn new(registry: &'r FactorRegistry, assessment: GwpAssessment) -> Self {
        ProcessEmissionsCalculator {
            ctx: CalcContext {
                registry,
                assessment,
            },
        }
    }
}

impl ScopeCalculator for ProcessEmissionsCalculator<'_> {
    fn calculate(&self, activity: &ActivityRecord) -> CalcResult<Vec<EmissionResult>> {
        let mut result = self.ctx.base_result(activity, Scope::Scope1);
        result.scope1_category = Some(Scope1Category::ProcessEmissions);

        if let Some(custom) = activity.custom_factor {
            result.total_co2e_kg = activity.quantity * custom;
            result
                .notes
                .push("Custom emission factor used for process emissions".to_string());
            return Ok(vec![result]);
        }

        let factor = self
            .ctx
            .registry
            .find_factor(
                "process_emissions",
                None,
                None,
                Some(&activity.unit),
                activity.factor_source,
            )
            .ok_or_else(|| {
                CalcError::no_matching_factor(format!(
                    "process emissions: no registry factor for unit={}; provide a \
                     custom_factor (kg CO2e per unit of activity)",
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
        // Pre-aggregated co2e wins; the breakdown stays for disclosure.
        if let Some(co2e_factor) = factor.co2e_factor {
            result.total_co2e_kg = quantity * co2e_factor;
        }
        result.gas_breakdown = breakdown;
        result.factor_id = Some(factor.id.clone());
        result.factor_source = Some(factor.source);
        Ok(vec![result])
    }
}
