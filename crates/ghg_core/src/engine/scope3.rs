//! Scope 3 — value-chain emissions across all 15 GHG Protocol categories.
//!
//! Dispatch per activity, first matching branch wins: custom factor, then
//! spend-based (NAICS-keyed input-output factors), then distance-based for
//! the transport-shaped categories, then the waste path, then the generic
//! activity-based path.

use crate::activity::ActivityRecord;
use crate::engine::{total_co2e, CalcContext, ScopeCalculator};
use crate::enums::{FactorSource, GwpAssessment, Scope, Scope3Category};
use crate::error::{CalcError, CalcResult};
use crate::factor::EmissionFactor;
use crate::registry::{FactorRegistry, SearchFilter};
use crate::result::EmissionResult;
use crate::units;

pub struct Scope3Calculator<'r> {
    ctx: CalcContext<'r>,
}

impl<'r> Scope3Calculator<'r> {
    pub fn new(registry: &'r FactorRegistry, assessment: GwpAssessment) -> Self {
        Scope3Calculator {
            ctx: CalcContext {
                registry,
                assessment,
            },
        }
    }

    fn base(&self, activity: &ActivityRecord, category: Option<Scope3Category>) -> EmissionResult {
        let mut result = self.ctx.base_result(activity, Scope::Scope3);
        result.scope3_category = category;
        result
    }

    /// Economic input-output factors, kg CO2e per unit of spend. NAICS-code
    /// driven: USEEIO exact match, USEEIO free text, then EXIOBASE free text.
    fn spend_based(
        &self,
        activity: &ActivityRecord,
        category: Scope3Category,
    ) -> CalcResult<Vec<EmissionResult>> {
        let naics = activity.naics_code.as_deref().ok_or_else(|| {
            CalcError::no_matching_factor(
                "spend-based: no naics_code supplied; provide one or a custom_factor \
                 (kg CO2e per unit of spend)",
            )
        })?;

        let mut factor = self.ctx.registry.find_factor(
            "spend_based",
            Some(naics),
            None,
            None,
            Some(FactorSource::Useeio),
        );
        if factor.is_none() {
            factor = self.first_hit(SearchFilter {
                query: Some(naics.to_string()),
                source: Some(FactorSource::Useeio),
                limit: Some(1),
                ..SearchFilter::default()
            });
        }
        if factor.is_none() {
            factor = self.first_hit(SearchFilter {
                query: Some(naics.to_string()),
                source: Some(FactorSource::Exiobase),
                limit: Some(1),
                ..SearchFilter::default()
            });
        }
        let factor = factor.ok_or_else(|| {
            CalcError::no_matching_factor(format!(
                "spend-based: NAICS={}; provide a custom_factor (kg CO2e per unit of spend)",
                naics
            ))
        })?;

        let spend = activity.spend_amount.unwrap_or(activity.quantity);
        let co2e_factor = factor.co2e_factor.unwrap_or(factor.co2_factor);
        let mut result = self.base(activity, Some(category));
        result.total_co2e_kg = spend * co2e_factor;
        result.factor_id = Some(factor.id.clone());
        result.factor_source = Some(factor.source);
        result.activity_quantity = Some(spend);
        result.activity_unit = Some(activity.spend_currency.clone());
        result.notes.push(format!(
            "Spend-based: {:.4} kg CO2e/{}",
            co2e_factor, activity.spend_currency
        ));
        Ok(vec![result])
    }

    /// Transport, travel, and commuting emissions from distance, optionally
    /// composed with weight for tonne-distance factors.
    fn distance_based(
        &self,
        activity: &ActivityRecord,
        category: Scope3Category,
    ) -> CalcResult<Vec<EmissionResult>> {
        let mode = activity
            .transport_mode
            .as_deref()
            .or(activity.vehicle_type.as_deref())
            .unwrap_or("average");
        let registry_category = category.registry_category();
        let distance_unit = activity.distance_unit.as_deref().unwrap_or("km");

        let mut factor = self.ctx.registry.find_factor(
            registry_category,
            Some(mode),
            None,
            Some(distance_unit),
            None,
        );
        if factor.is_none() {
            factor = self.first_hit(SearchFilter {
                query: Some(format!("{} {}", registry_category, mode)),
                limit: Some(1),
                ..SearchFilter::default()
            });
        }
        let factor = factor.ok_or_else(|| {
            CalcError::no_matching_factor(format!(
                "distance-based: category={}, mode={}; provide a custom_factor",
                registry_category, mode
            ))
        })?;

        let mut result = self.base(activity, Some(category));

        let mut distance = activity.distance.unwrap_or(activity.quantity);
        if !distance_unit.eq_ignore_ascii_case(&factor.activity_unit) {
            match units::convert(distance, distance_unit, &factor.activity_unit) {
                Ok(converted) => distance = converted,
                // Compound factor units (passenger_km, tonne_km) have no
                // table entry; disclose that the raw distance was used.
                Err(_) => result.notes.push(format!(
                    "Distance unit '{}' used as-is against factor unit '{}'",
                    distance_unit, factor.activity_unit
                )),
            }
        }

        let quantity = match activity.weight {
            Some(weight) if factor.activity_unit.to_lowercase().contains("tonne_km") => {
                let mut weight_tonnes = weight;
                if let Some(weight_unit) = activity.weight_unit.as_deref() {
                    if !weight_unit.eq_ignore_ascii_case("tonne") {
                        match units::convert(weight, weight_unit, "metric_ton") {
                            Ok(converted) => weight_tonnes = converted,
                            Err(_) => result.notes.push(format!(
                                "Weight unit '{}' used as-is as tonnes",
                                weight_unit
                            )),
                        }
                    }
                }
                distance * weight_tonnes
            }
            _ => distance,
        };

        let co2e_factor = factor.co2e_factor.unwrap_or(factor.co2_factor);
        result.total_co2e_kg = quantity * co2e_factor;
        result.factor_id = Some(factor.id.clone());
        result.factor_source = Some(factor.source);
        result.activity_quantity = Some(quantity);
        result.activity_unit = Some(factor.activity_unit.clone());
        result.notes.push(format!("Distance-based: mode={}", mode));
        Ok(vec![result])
    }

    /// Waste disposal emissions keyed by waste type and disposal method.
    fn waste(&self, activity: &ActivityRecord) -> CalcResult<Vec<EmissionResult>> {
        let waste_type = activity.waste_type.as_deref().unwrap_or("mixed");
        let disposal = activity.disposal_method.as_deref().unwrap_or("landfill");
        let key = format!("{}_{}", waste_type, disposal);

        let mut factor = self
            .ctx
            .registry
            .find_factor("waste", Some(&key), None, None, None);
        if factor.is_none() {
            factor = self.first_hit(SearchFilter {
                query: Some(format!("waste {} {}", waste_type, disposal)),
                limit: Some(1),
                ..SearchFilter::default()
            });
        }
        let factor = factor.ok_or_else(|| {
            CalcError::no_matching_factor(format!(
                "waste: type={}, disposal={}; provide a custom_factor",
                waste_type, disposal
            ))
        })?;

        let co2e_factor = factor.co2e_factor.unwrap_or(factor.co2_factor);
        let mut result = self.base(activity, Some(Scope3Category::Waste));
        result.total_co2e_kg = activity.quantity * co2e_factor;
        result.factor_id = Some(factor.id.clone());
        result.factor_source = Some(factor.source);
        result
            .notes
            .push(format!("Waste: {}/{}", waste_type, disposal));
        Ok(vec![result])
    }

    /// Generic activity-based path for any remaining category.
    fn activity_based(
        &self,
        activity: &ActivityRecord,
        category: Scope3Category,
    ) -> CalcResult<Vec<EmissionResult>> {
        let registry_category = category.registry_category();

        let mut factor = self.ctx.registry.find_factor(
            registry_category,
            None,
            None,
            Some(&activity.unit),
            activity.factor_source,
        );
        if factor.is_none() {
            factor = self.first_hit(SearchFilter {
                query: Some(registry_category.to_string()),
                activity_unit: Some(activity.unit.clone()),
                limit: Some(1),
                ..SearchFilter::default()
            });
        }
        let factor = factor.ok_or_else(|| {
            CalcError::no_matching_factor(format!(
                "scope 3 category {} ({}): nothing matched for unit={}; provide a \
                 custom_factor (kg CO2e per {})",
                category.code(),
                registry_category,
                activity.unit,
                activity.unit
            ))
        })?;

        let breakdown = self.ctx.gas_breakdown(
            activity.quantity * factor.co2_factor,
            activity.quantity * factor.ch4_factor,
            activity.quantity * factor.n2o_factor,
        )?;
        let mut result = self.base(activity, Some(category));
        result.total_co2e_kg = total_co2e(&breakdown);
        if let Some(co2e_factor) = factor.co2e_factor {
            result.total_co2e_kg = activity.quantity * co2e_factor;
        }
        result.gas_breakdown = breakdown;
        result.factor_id = Some(factor.id.clone());
        result.factor_source = Some(factor.source);
        Ok(vec![result])
    }

    fn first_hit(&self, filter: SearchFilter) -> Option<&'r EmissionFactor> {
        self.ctx.registry.search(&filter).into_iter().next()
    }
}

impl ScopeCalculator for Scope3Calculator<'_> {
    fn calculate(&self, activity: &ActivityRecord) -> CalcResult<Vec<EmissionResult>> {
        if let Some(custom) = activity.custom_factor {
            let mut result = self.base(activity, activity.scope3_category);
            result.total_co2e_kg = activity.quantity * custom;
            result.notes.push("Custom emission factor used".to_string());
            return Ok(vec![result]);
        }

        let category = activity.scope3_category.ok_or_else(|| {
            CalcError::validation("scope3_category is required for scope 3 calculations")
        })?;

        if activity.spend_amount.is_some() {
            return self.spend_based(activity, category);
        }

        if activity.distance.is_some()
            && matches!(
                category,
                Scope3Category::UpstreamTransport
                    | Scope3Category::DownstreamTransport
                    | Scope3Category::BusinessTravel
                    | Scope3Category::EmployeeCommuting
            )
        {
            return self.distance_based(activity, category);
        }

        if category == Scope3Category::Waste {
            return self.waste(activity);
        }

        self.activity_based(activity, category)
    }
}
