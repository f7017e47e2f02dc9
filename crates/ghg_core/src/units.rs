//! Dimensional unit conversion for GHG activity data.
//!
//! A deliberately small conversion service: four dimensions with fixed
//! factors to a per-dimension base unit, a case-insensitive alias table, and
//! identity pass-through for equal unit strings so category-specific compound
//! units (tonne_km, passenger_km, USD, night, ...) flow through untouched.

/// Result type for unit operations.
pub type UnitResult<T> = Result<T, UnitError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    Unknown { unit: String },
    Incompatible { from: String, to: String },
}

impl std::fmt::Display for UnitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitError::Unknown { unit } => write!(f, "unrecognized unit '{}'", unit),
            UnitError::Incompatible { from, to } => {
                write!(f, "incompatible dimensions: '{}' vs '{}'", from, to)
            }
        }
    }
}

impl std::error::Error for UnitError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    Energy,
    Mass,
    Volume,
    Distance,
}

// Factors to the per-dimension base: BTU, kg, liter, km.
// Alias spellings are matched lower-cased.
const UNITS: &[(&str, Dimension, f64)] = &[
    // Energy
    ("btu", Dimension::Energy, 1.0),
    ("therm", Dimension::Energy, 100_000.0),
    ("dekatherm", Dimension::Energy, 1_000_000.0),
    ("mmbtu", Dimension::Energy, 1_000_000.0),
    ("kwh", Dimension::Energy, 3412.14),
    ("mwh", Dimension::Energy, 3_412_140.0),
    ("kilowatt_hour", Dimension::Energy, 3412.14),
    ("mj", Dimension::Energy, 947.817),
    ("gj", Dimension::Energy, 947_817.0),
    // Mass
    ("kg", Dimension::Mass, 1.0),
    ("kilogram", Dimension::Mass, 1.0),
    ("g", Dimension::Mass, 0.001),
    ("gram", Dimension::Mass, 0.001),
    ("lb", Dimension::Mass, 0.453_592_37),
    ("pound", Dimension::Mass, 0.453_592_37),
    ("short_ton", Dimension::Mass, 907.184_74),
    ("long_ton", Dimension::Mass, 1016.046_9),
    ("metric_ton", Dimension::Mass, 1000.0),
    ("tonne", Dimension::Mass, 1000.0),
    // Volume
    ("liter", Dimension::Volume, 1.0),
    ("litre", Dimension::Volume, 1.0),
    ("l", Dimension::Volume, 1.0),
    ("gallon", Dimension::Volume, 3.785_411_784),
    ("gal", Dimension::Volume, 3.785_411_784),
    ("barrel", Dimension::Volume, 158.987_294_928),
    ("m3", Dimension::Volume, 1000.0),
    ("cubic_meter", Dimension::Volume, 1000.0),
    ("ft3", Dimension::Volume, 28.316_846_592),
    ("cubic_foot", Dimension::Volume, 28.316_846_592),
    ("scf", Dimension::Volume, 28.316_846_592),
    ("ccf", Dimension::Volume, 2831.684_659_2),
    ("mcf", Dimension::Volume, 28_316.846_592),
    // Distance
    ("km", Dimension::Distance, 1.0),
    ("kilometer", Dimension::Distance, 1.0),
    ("m", Dimension::Distance, 0.001),
    ("meter", Dimension::Distance, 0.001),
    ("mile", Dimension::Distance, 1.609_344),
    ("mi", Dimension::Distance, 1.609_344),
    ("nautical_mile", Dimension::Distance, 1.852),
];

fn lookup(unit: &str) -> Option<(Dimension, f64)> {
    let key = unit.to_lowercase();
    UNITS
        .iter()
        .find(|(name, _, _)| *name == key)
        .map(|(_, dimension, factor)| (*dimension, *factor))
}

/// Convert a value between units.
///
/// Identical unit strings (case-insensitive) pass through unchanged, which
/// covers compound units the table does not model. Otherwise both units must
/// be known and share a dimension.
pub fn convert(value: f64, from_unit: &str, to_unit: &str) -> UnitResult<f64> {
    if from_unit.eq_ignore_ascii_case(to_unit) {
        return Ok(value);
    }
    let (from_dimension, from_factor) = lookup(from_unit).ok_or_else(|| UnitError::Unknown {
        unit: from_unit.to_string(),
    })?;
    let (to_dimension, to_factor) = lookup(to_unit).ok_or_else(|| UnitError::Unknown {
        unit: to_unit.to_string(),
    })?;
    if from_dimension != to_dimension {
        return Err(UnitError::Incompatible {
            from: from_unit.to_string(),
            to: to_unit.to_string(),
        });
    }
    Ok(value * from_factor / to_factor)
}

/// Whether two units can be converted into one another.
pub fn is_compatible(unit1: &str, unit2: &str) -> bool {
    convert(1.0, unit1, unit2).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: f64, expected: f64) {
        let rel = (actual - expected).abs() / expected.abs().max(1e-12);
        assert!(rel < 1e-3, "expected {} ~ {}", actual, expected);
    }

    #[test]
    fn energy_conversions() {
        approx(convert(1.0, "therm", "BTU").expect("therm"), 100_000.0);
        approx(convert(1.0, "kWh", "BTU").expect("kwh"), 3412.14);
        approx(convert(10.0, "therm", "MMBtu").expect("mmbtu"), 1.0);
        approx(convert(1.0, "dekatherm", "therm").expect("dekatherm"), 10.0);
    }

    #[test]
    fn mass_conversions() {
        approx(convert(1.0, "short_ton", "lb").expect("short_ton"), 2000.0);
        approx(convert(1.0, "metric_ton", "kg").expect("metric_ton"), 1000.0);
        approx(convert(1.0, "tonne", "metric_ton").expect("tonne"), 1.0);
    }

    #[test]
    fn volume_conversions() {
        approx(convert(1.0, "gallon", "liter").expect("gallon"), 3.78541);
        approx(convert(1.0, "CCF", "ft3").expect("ccf"), 100.0);
        approx(convert(1.0, "MCF", "CCF").expect("mcf"), 10.0);
    }

    #[test]
    fn distance_conversions() {
        approx(convert(1.0, "mile", "km").expect("mile"), 1.609344);
    }

    #[test]
    fn identical_units_pass_through() {
        assert_eq!(convert(42.0, "tonne_km", "tonne_km").expect("identity"), 42.0);
        assert_eq!(convert(7.0, "kWh", "kwh").expect("case"), 7.0);
    }

    #[test]
    fn incompatible_dimensions_fail() {
        let err = convert(1.0, "kWh", "gallon").expect_err("incompatible");
        assert!(matches!(err, UnitError::Incompatible { .. }));
        assert!(!is_compatible("kWh", "gallon"));
        assert!(is_compatible("kWh", "BTU"));
        assert!(is_compatible("gallon", "litre"));
    }

    #[test]
    fn unknown_unit_fails() {
        let err = convert(1.0, "flobnarbs", "kg").expect_err("unknown");
        assert!(matches!(err, UnitError::Unknown { .. }));
    }
}
