//! Command implementations for the GHG calculator CLI.
//!
//! Each command is a plain function returning its rendered output so the
//! integration tests can drive them without spawning the binary; `main.rs`
//! only parses arguments and maps errors to exit codes.

use std::path::Path;

use ghg_core::{
    ActivityRecord, CalcError, FactorRegistry, GhgCalculator, GwpAssessment, Scope,
    Scope3Category, SearchFilter,
};

#[derive(Debug)]
pub enum CliError {
    Io(String),
    Json(String),
    Calc(CalcError),
    /// Validation summary when an activities file contains invalid records.
    Invalid(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(message) => write!(f, "io error: {}", message),
            CliError::Json(message) => write!(f, "json error: {}", message),
            CliError::Calc(err) => write!(f, "{}", err),
            CliError::Invalid(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl From<CalcError> for CliError {
    fn from(err: CalcError) -> Self {
        CliError::Calc(err)
    }
}

/// Per-error-kind remediation hint rendered under the error message.
pub fn guidance(err: &CliError) -> Option<&'static str> {
    match err {
        CliError::Calc(CalcError::NoMatchingFactor { .. }) => Some(
            "hint: search available factors with `ghg factors`, or supply --factor to override",
        ),
        CliError::Calc(CalcError::UnitConversion { .. }) => {
            Some("hint: check the unit spelling; probe compatibility with `ghg convert`")
        }
        CliError::Calc(CalcError::UnknownGas { .. }) => {
            Some("hint: list known gases with `ghg gwp`")
        }
        _ => None,
    }
}

/// Flag-level inputs for the `calculate` command.
#[derive(Debug, Default, Clone)]
pub struct ActivityArgs {
    pub scope: String,
    pub category: Option<String>,
    pub fuel: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub factor: Option<f64>,
    pub refrigerant: Option<String>,
    pub naics: Option<String>,
    pub spend: Option<f64>,
    pub distance: Option<f64>,
    pub distance_unit: Option<String>,
    pub mode: Option<String>,
    pub waste_type: Option<String>,
    pub disposal: Option<String>,
    pub source: Option<String>,
}

/// Assemble an activity record from command-line flags.
pub fn build_activity(args: &ActivityArgs) -> Result<ActivityRecord, CliError> {
    let scope = match args.scope.as_str() {
        "1" | "scope_1" => Scope::Scope1,
        "2" | "scope_2" => Scope::Scope2,
        "3" | "scope_3" => Scope::Scope3,
        other => {
            return Err(CliError::Calc(CalcError::validation(format!(
                "scope must be 1, 2, or 3, got '{}'",
                other
            ))))
        }
    };

    let mut activity = ActivityRecord::new(scope, args.quantity, args.unit.clone());

    if let Some(category) = args.category.as_deref() {
        match scope {
            Scope::Scope1 => {
                let parsed = category
                    .parse()
                    .map_err(|message: String| CliError::Calc(CalcError::validation(message)))?;
                activity.scope1_category = Some(parsed);
            }
            Scope::Scope3 => {
                let code: u8 = category.parse().map_err(|_| {
                    CliError::Calc(CalcError::validation(format!(
                        "scope 3 category must be a number 1-15, got '{}'",
                        category
                    )))
                })?;
                let parsed = Scope3Category::try_from(code)
                    .map_err(|message| CliError::Calc(CalcError::validation(message)))?;
                activity.scope3_category = Some(parsed);
            }
            Scope::Scope2 => {}
        }
    }

    if let Some(fuel) = args.fuel.as_deref() {
        match fuel.parse() {
            Ok(known) => activity.fuel_type = Some(known),
            Err(_) => activity.custom_fuel = Some(fuel.to_string()),
        }
    }
    if let Some(region) = args.region.clone() {
        match scope {
            Scope::Scope2 => activity.grid_subregion = Some(region),
            _ => activity.region = Some(region),
        }
    }
    activity.country = args.country.clone();
    activity.custom_factor = args.factor;
    activity.refrigerant_type = args.refrigerant.clone();
    activity.naics_code = args.naics.clone();
    activity.spend_amount = args.spend;
    activity.distance = args.distance;
    activity.distance_unit = args.distance_unit.clone();
    activity.transport_mode = args.mode.clone();
    activity.waste_type = args.waste_type.clone();
    activity.disposal_method = args.disposal.clone();
    if let Some(source) = args.source.as_deref() {
        let parsed = source
            .parse()
            .map_err(|message: String| CliError::Calc(CalcError::validation(message)))?;
        activity.factor_source = Some(parsed);
    }

    Ok(activity)
}

/// Calculate one activity and render its results.
pub fn run_calculate(
    calc: &GhgCalculator,
    activity: &ActivityRecord,
    json: bool,
) -> Result<String, CliError> {
    let results = calc.calculate_single(activity)?;
    if json {
        return serde_json::to_string_pretty(&results)
            .map_err(|err| CliError::Json(err.to_string()));
    }

    let mut lines = Vec::new();
    for result in &results {
        let mut line = format!(
            "scope={} total_kg={:.2} total_t={:.4}",
            result.scope,
            result.total_co2e_kg,
            result.total_co2e_tonnes()
        );
        if let Some(category) = result.scope1_category {
            line.push_str(&format!(" category={}", category.as_str()));
        }
        if let Some(method) = result.scope2_method {
            line.push_str(&format!(" method={}", method.as_str()));
        }
        if let Some(category) = result.scope3_category {
            line.push_str(&format!(" category={}", category.code()));
        }
        if let Some(factor_id) = result.factor_id.as_deref() {
            line.push_str(&format!(" factor={}", factor_id));
        }
        if let Some(source) = result.factor_source {
            line.push_str(&format!(" source={}", source));
        }
        lines.push(line);
        for entry in &result.gas_breakdown {
            lines.push(format!(
                "  gas={} mass_kg={:.6} co2e_kg={:.2} gwp={}",
                entry.gas.as_str(),
                entry.mass_kg,
                entry.co2e_kg,
                entry.gwp_used
            ));
        }
        for note in &result.notes {
            lines.push(format!("  note: {}", note));
        }
    }
    Ok(lines.join("\n"))
}

/// Read an activities JSON file and compute a full inventory.
pub fn run_inventory(
    calc: &GhgCalculator,
    path: &Path,
    name: &str,
    year: Option<i32>,
    json: bool,
) -> Result<String, CliError> {
    let activities = read_activities(path)?;
    let inventory = calc.calculate_inventory(&activities, name, year)?;
    if json {
        return serde_json::to_string_pretty(&inventory)
            .map_err(|err| CliError::Json(err.to_string()));
    }

    let mut lines = vec![format!("name={}", inventory.name)];
    if let Some(year) = inventory.year {
        lines.push(format!("year={}", year));
    }
    lines.push(format!("generated_at={}", chrono::Utc::now().to_rfc3339()));
    lines.push(format!("scope1_kg={:.2}", inventory.scope1.total_co2e_kg));
    lines.push(format!(
        "scope2_location_kg={:.2}",
        inventory.scope2_location.total_co2e_kg
    ));
    lines.push(format!(
        "scope2_market_kg={:.2}",
        inventory.scope2_market.total_co2e_kg
    ));
    lines.push(format!("scope3_kg={:.2}", inventory.scope3.total_co2e_kg));
    lines.push(format!("total_kg={:.2}", inventory.total_co2e_kg()));
    lines.push(format!("total_t={:.4}", inventory.total_co2e_tonnes()));
    lines.push(format!("results={}", inventory.all_results().len()));
    Ok(lines.join("\n"))
}

/// Search the factor registry.
#[allow(clippy::too_many_arguments)]
pub fn run_factors(
    registry: &FactorRegistry,
    query: Option<&str>,
    source: Option<&str>,
    category: Option<&str>,
    fuel: Option<&str>,
    region: Option<&str>,
    unit: Option<&str>,
    limit: usize,
    json: bool,
) -> Result<String, CliError> {
    let source = match source {
        Some(raw) => Some(
            raw.parse()
                .map_err(|message: String| CliError::Calc(CalcError::validation(message)))?,
        ),
        None => None,
    };
    let filter = SearchFilter {
        query: query.map(str::to_string),
        source,
        category: category.map(str::to_string),
        fuel_type: fuel.map(str::to_string),
        region: region.map(str::to_string),
        activity_unit: unit.map(str::to_string),
        limit: Some(limit),
        ..SearchFilter::default()
    };
    let results = registry.search(&filter);
    if json {
        return serde_json::to_string_pretty(&results)
            .map_err(|err| CliError::Json(err.to_string()));
    }
    if results.is_empty() {
        return Ok("No factors matched.".to_string());
    }

    let mut lines = Vec::new();
    for factor in results {
        let value = match factor.co2e_factor {
            Some(co2e) => format!("co2e={}", co2e),
            None => format!("co2={}", factor.co2_factor),
        };
        lines.push(format!(
            "id={} source={} category={} unit={} {} name={}",
            factor.id, factor.source, factor.category, factor.activity_unit, value, factor.name
        ));
    }
    Ok(lines.join("\n"))
}

/// Look up one gas's GWP, or list the whole table.
pub fn run_gwp(
    gas: Option<&str>,
    assessment: GwpAssessment,
    json: bool,
) -> Result<String, CliError> {
    match gas {
        Some(gas) => {
            let value = ghg_core::gwp::get_gwp(gas, assessment)?;
            if json {
                let payload = serde_json::json!({
                    "gas": gas.to_lowercase(),
                    "assessment": assessment.as_str(),
                    "gwp": value,
                });
                serde_json::to_string_pretty(&payload)
                    .map_err(|err| CliError::Json(err.to_string()))
            } else {
                Ok(format!(
                    "gas={} assessment={} gwp={}",
                    gas.to_lowercase(),
                    assessment.as_str(),
                    value
                ))
            }
        }
        None => {
            let mut table = Vec::new();
            for gas in ghg_core::gwp::list_gases(assessment) {
                let value = ghg_core::gwp::get_gwp(gas, assessment)?;
                table.push((gas, value));
            }
            if json {
                let map: serde_json::Map<String, serde_json::Value> = table
                    .into_iter()
                    .map(|(gas, value)| (gas.to_string(), serde_json::json!(value)))
                    .collect();
                return serde_json::to_string_pretty(&map)
                    .map_err(|err| CliError::Json(err.to_string()));
            }
            let lines: Vec<String> = table
                .into_iter()
                .map(|(gas, value)| format!("{}={}", gas, value))
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

/// Raw unit conversion probe.
pub fn run_convert(value: f64, from_unit: &str, to_unit: &str) -> Result<String, CliError> {
    let converted = ghg_core::units::convert(value, from_unit, to_unit)
        .map_err(|err| CliError::Calc(err.into()))?;
    Ok(format!("{} {} = {} {}", value, from_unit, converted, to_unit))
}

/// Structurally validate an activities JSON file.
pub fn run_validate(path: &Path) -> Result<String, CliError> {
    let activities = read_activities(path)?;
    let mut valid = 0usize;
    let mut failures = Vec::new();
    for (index, activity) in activities.iter().enumerate() {
        match activity.validate() {
            Ok(()) => valid += 1,
            Err(err) => failures.push(format!("record {}: {}", index, err)),
        }
    }
    if failures.is_empty() {
        Ok(format!("{} valid, 0 invalid", valid))
    } else {
        let mut message = format!("{} valid, {} invalid", valid, failures.len());
        for failure in failures {
            message.push('\n');
            message.push_str(&failure);
        }
        Err(CliError::Invalid(message))
    }
}

fn read_activities(path: &Path) -> Result<Vec<ActivityRecord>, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| CliError::Io(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&text).map_err(|err| CliError::Json(err.to_string()))
}
