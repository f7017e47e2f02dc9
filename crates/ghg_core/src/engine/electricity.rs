//! Scope 2 — purchased electricity.
//!
//! Always produces both a location-based and a market-based result from one
//! activity, per the GHG Protocol's dual-reporting requirement. The only
//! exception is a custom factor, which yields exactly one result.

use crate::activity::ActivityRecord;
use crate::engine::{total_co2e, CalcContext, ScopeCalculator};
use crate::enums::{FactorSource, GwpAssessment, Scope, Scope2Method};
use crate::error::{CalcError, CalcResult};
use crate::factor::EmissionFactor;
use crate::registry::FactorRegistry;
use crate::result::EmissionResult;
use crate::units;

pub struct ElectricityCalculator<'r> {
    ctx: CalcContext<'r>,
}

impl<'r> ElectricityCalculator<'r> {
    pub fn new(registry: &'r FactorRegistry, assessment: GwpAssessment) -> Self {
        ElectricityCalculator {
            ctx: CalcContext {
                registry,
                assessment,
            },
        }
    }

    /// Location-based factor: grid subregion, then country average, then the
    /// US national average unconditionally.
    fn find_location_factor(&self, activity: &ActivityRecord) -> Option<&'r EmissionFactor> {
        if let Some(subregion) = activity.grid_subregion.as_deref() {
            let factor = self.ctx.registry.find_factor(
                "electricity",
                None,
                Some(subregion),
                Some("kWh"),
                Some(FactorSource::Egrid),
            );
            if factor.is_some() {
                return factor;
            }
        }
        if let Some(country) = activity.country.as_deref() {
            let factor = self.ctx.registry.find_factor(
                "electricity",
                None,
                Some(country),
                Some("kWh"),
                Some(FactorSource::Ember),
            );
            if factor.is_some() {
                return factor;
            }
        }
        self.ctx
            .registry
            .find_factor("electricity", None, Some("US"), Some("kWh"), None)
    }

    /// Market-based factor. Supplier-specific data has no model here, so
    /// absent an explicit source preference this reuses the location factor;
    /// the bool reports whether that proxying happened.
    fn find_market_factor(
        &self,
        activity: &ActivityRecord,
        location_factor: &'r EmissionFactor,
    ) -> (&'r EmissionFactor, bool) {
        if let Some(source) = activity.factor_source {
            let region = activity
                .grid_subregion
                .as_deref()
                .or(activity.country.as_deref());
            if let Some(factor) =
                self.ctx
                    .registry
                    .find_factor("electricity", None, region, Some("kWh"), Some(source))
            {
                return (factor, false);
            }
        }
        (location_factor, true)
    }

    fn method_result(
        &self,
        activity: &ActivityRecord,
        factor: &EmissionFactor,
        quantity_kwh: f64,
        method: Scope2Method,
    ) -> CalcResult<EmissionResult> {
        let breakdown = self.ctx.gas_breakdown(
            quantity_kwh * factor.co2_factor,
            quantity_kwh * factor.ch4_factor,
            quantity_kwh * factor.n2o_factor,
        )?;
        let mut result = self.ctx.base_result(activity, Scope::Scope2);
        result.scope2_method = Some(method);
        result.total_co2e_kg = total_co2e(&breakdown);
        result.gas_breakdown = breakdown;
        result.factor_id = Some(factor.id.clone());
        result.factor_source = Some(factor.source);
        Ok(result)
    }
}

impl ScopeCalculator for ElectricityCalculator<'_> {
    fn calculate(&self, activity: &ActivityRecord) -> CalcResult<Vec<EmissionResult>> {
        if let Some(custom) = activity.custom_factor {
            let mut result = self.ctx.base_result(activity, Scope::Scope2);
            result.scope2_method =
                Some(activity.scope2_method.unwrap_or(Scope2Method::LocationBased));
            result.total_co2e_kg = activity.quantity * custom;
            result.notes.push("Custom emission factor used".to_string());
            return Ok(vec![result]);
        }

        let quantity_kwh = units::convert(activity.quantity, &activity.unit, "kWh")
            .map_err(|err| {
                CalcError::unit_conversion(format!("{} (electricity requires kWh)", err))
            })?;

        let location_factor = self.find_location_factor(activity).ok_or_else(|| {
            CalcError::no_matching_factor(format!(
                "electricity: region={}; tried grid subregion, country average, and the \
                 US national average; provide grid_subregion or country, or a custom_factor",
                activity
                    .grid_subregion
                    .as_deref()
                    .or(activity.region.as_deref())
                    .or(activity.country.as_deref())
                    .unwrap_or("<none>")
            ))
        })?;

        let location = self.method_result(
            activity,
            location_factor,
            quantity_kwh,
            Scope2Method::LocationBased,
        )?;

        let (market_factor, proxied) = self.find_market_factor(activity, location_factor);
        let mut market = self.method_result(
            activity,
            market_factor,
            quantity_kwh,
            Scope2Method::MarketBased,
        )?;
        if proxied {
            market.notes.push(
                "Market-based: using grid average as proxy (no supplier-specific data)"
                    .to_string(),
            );
        }

        Ok(vec![location, market])
    }
}
