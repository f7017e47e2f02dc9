//! Scope 1 — fugitive emissions (refrigerant leaks, SF6, other F-gases).
//!
//! Refrigerant quantities are normalized to kg, then CO2e = kg leaked × GWP.
//! The GWP table does not speciate F-gas masses, so the single breakdown
//! entry is tagged with the generic HFC identifier rather than the species.

use crate::activity::ActivityRecord;
use crate::engine::{CalcContext, ScopeCalculator};
use crate::enums::{GasType, GwpAssessment, Scope, Scope1Category};
use crate::error::{CalcError, CalcResult};
use crate::gwp;
use crate::registry::{FactorRegistry, SearchFilter};
use crate::result::{EmissionResult, GasBreakdown};
use crate::units;

pub struct FugitiveEmissionsCalculator<'r> {
    ctx: CalcContext<'r>,
}

impl<'r> FugitiveEmissionsCalculator<'r> {
    pub fn new(registry: &'r FactorRegistry, assessment: GwpAssessment) -> Self {
        FugitiveEmissionsCalculator {
            ctx: CalcContext {
                registry,
                assessment,
            },
        }
    }

    fn quantity_kg(&self, activity: &ActivityRecord) -> CalcResult<f64> {
        units::convert(activity.quantity, &activity.unit, "kg").map_err(|err| {
            CalcError::unit_conversion(format!("{} (fugitive emissions require kg)", err))
        })
    }

    /// GWP for a refrigerant identifier, falling back to a registry factor's
    /// co2e value when the GWP table does not know the species.
    fn refrigerant_gwp(&self, refrigerant: &str) -> CalcResult<f64> {
        match gwp::get_gwp(refrigerant, self.ctx.assessment) {
            Ok(value) => Ok(value),
            Err(CalcError::UnknownGas { .. }) => {
                let filter = SearchFilter {
                    query: Some(refrigerant.to_string()),
                    category: Some("fugitive_emissions".to_string()),
                    limit: Some(1),
                    ..SearchFilter::default()
                };
                let hit = self.ctx.registry.search(&filter).into_iter().next();
                match hit.and_then(|factor| factor.co2e_factor) {
                    Some(co2e_factor) => Ok(co2e_factor),
                    None => Err(CalcError::no_matching_factor(format!(
                        "fugitive emissions: unknown refrigerant '{}'; provide a \
                         custom_factor or use a known refrigerant type",
                        refrigerant
                    ))),
                }
            }
            Err(other) => Err(other),
        }
    }
}

impl ScopeCalculator for FugitiveEmissionsCalculator<'_> {
    fn calculate(&self, activity: &ActivityRecord) -> CalcResult<Vec<EmissionResult>> {
        let mut result = self.ctx.base_result(activity, Scope::Scope1);
        result.scope1_category = Some(Scope1Category::FugitiveEmissions);

        if let Some(custom) = activity.custom_factor {
            result.total_co2e_kg = activity.quantity * custom;
            result.notes.push("Custom emission factor used".to_string());
            return Ok(vec![result]);
        }

        let refrigerant = match activity.refrigerant_type.as_deref() {
            Some(refrigerant) => refrigerant,
            None => {
                // No refrigerant named: fall back to a registry factor with a
                // pre-aggregated co2e value for this category and unit.
                let factor = self.ctx.registry.find_factor(
                    "fugitive_emissions",
                    None,
                    None,
                    Some(&activity.unit),
                    activity.factor_source,
                );
                let (factor, co2e_factor) = match factor {
                    Some(factor) => match factor.co2e_factor {
                        Some(co2e_factor) => (factor, co2e_factor),
                        None => {
                            return Err(CalcError::no_matching_factor(
                                "fugitive emissions: no refrigerant_type specified and the \
                                 matching factor has no co2e value",
                            ))
                        }
                    },
                    None => {
                        return Err(CalcError::no_matching_factor(format!(
                            "fugitive emissions: no refrigerant_type specified and no \
                             registry factor for unit={}",
                            activity.unit
                        )))
                    }
                };
                let quantity_kg = self.quantity_kg(activity)?;
                result.total_co2e_kg = quantity_kg * co2e_factor;
                result.factor_id = Some(factor.id.clone());
                result.factor_source = Some(factor.source);
                return Ok(vec![result]);
            }
        };

        let quantity_kg = self.quantity_kg(activity)?;
        let gwp_used = self.refrigerant_gwp(&refrigerant.to_lowercase())?;
        let total = quantity_kg * gwp_used;

        result.total_co2e_kg = total;
        result.gas_breakdown = vec![GasBreakdown {
            gas: GasType::Hfc,
            mass_kg: quantity_kg,
            co2e_kg: total,
            gwp_used,
            gwp_assessment: self.ctx.assessment,
        }];
        result
            .notes
            .push(format!("Refrigerant: {}, GWP: {}", refrigerant, gwp_used));
        Ok(vec![result])
    }
}
