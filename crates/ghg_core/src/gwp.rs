//! 100-year Global Warming Potential tables from IPCC AR5 and AR6.

use crate::enums::GwpAssessment;
use crate::error::{CalcError, CalcResult};

/// AR5 (2014) values, used by most current reporting frameworks.
const AR5_GWP: &[(&str, f64)] = &[
    // Core gases
    ("co2", 1.0),
    ("ch4", 28.0),
    ("n2o", 265.0),
    ("sf6", 23500.0),
    ("nf3", 16100.0),
    // Common HFCs
    ("hfc-23", 12400.0),
    ("hfc-32", 677.0),
    ("hfc-125", 3170.0),
    ("hfc-134a", 1300.0),
    ("hfc-143a", 4800.0),
    ("hfc-152a", 138.0),
    ("hfc-227ea", 3350.0),
    ("hfc-236fa", 8060.0),
    ("hfc-245fa", 858.0),
    ("hfc-365mfc", 804.0),
    ("hfc-43-10mee", 1650.0),
    // Common PFCs
    ("cf4", 6630.0),
    ("c2f6", 11100.0),
    ("c3f8", 8900.0),
    ("c4f10", 9200.0),
    ("c5f12", 8550.0),
    ("c6f14", 7910.0),
    // Refrigerant blends (weighted averages)
    ("r-404a", 3922.0),
    ("r-407a", 2107.0),
    ("r-407c", 1774.0),
    ("r-410a", 2088.0),
    ("r-507a", 3985.0),
    ("r-508b", 13396.0),
];

/// AR6 (2021) values.
const AR6_GWP: &[(&str, f64)] = &[
    // Core gases
    ("co2", 1.0),
    ("ch4", 27.9),
    ("n2o", 273.0),
    ("sf6", 25200.0),
    ("nf3", 17400.0),
    // Common HFCs
    ("hfc-23", 14600.0),
    ("hfc-32", 771.0),
    ("hfc-125", 3740.0),
    ("hfc-134a", 1530.0),
    ("hfc-143a", 5810.0),
    ("hfc-152a", 164.0),
    ("hfc-227ea", 3600.0),
    ("hfc-236fa", 8690.0),
    ("hfc-245fa", 962.0),
    ("hfc-365mfc", 914.0),
    ("hfc-43-10mee", 1600.0),
    // Common PFCs
    ("cf4", 7380.0),
    ("c2f6", 12400.0),
    ("c3f8", 9290.0),
    ("c4f10", 10000.0),
    ("c5f12", 9220.0),
    ("c6f14", 8620.0),
    // Refrigerant blends (recalculated with AR6 component values)
    ("r-404a", 4728.0),
    ("r-407a", 2446.0),
    ("r-407c", 2088.0),
    ("r-410a", 2256.0),
    ("r-507a", 4728.0),
    ("r-508b", 14760.0),
];

fn table(assessment: GwpAssessment) -> &'static [(&'static str, f64)] {
    match assessment {
        GwpAssessment::Ar5 => AR5_GWP,
        GwpAssessment::Ar6 => AR6_GWP,
    }
}

/// 100-year GWP for a gas identifier (case-insensitive).
///
/// The pseudo-gas "co2e" always resolves to 1.0 regardless of assessment;
/// it marks quantities that are already CO2-equivalent.
pub fn get_gwp(gas: &str, assessment: GwpAssessment) -> CalcResult<f64> {
    let key = gas.to_lowercase();
    if key == "co2e" {
        return Ok(1.0);
    }
    table(assessment)
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
        .ok_or(CalcError::UnknownGas {
            gas: key,
            assessment,
        })
}

/// Convert a mass of a specific gas to CO2-equivalent kg.
pub fn to_co2e(mass_kg: f64, gas: &str, assessment: GwpAssessment) -> CalcResult<f64> {
    Ok(mass_kg * get_gwp(gas, assessment)?)
}

/// All gas identifiers known to the given assessment, sorted.
pub fn list_gases(assessment: GwpAssessment) -> Vec<&'static str> {
    let mut gases: Vec<&'static str> = table(assessment).iter().map(|(name, _)| *name).collect();
    gases.sort_unstable();
    gases
}
