//! End-to-end command tests driving the CLI's library functions.

use std::path::{Path, PathBuf};

use ghg_cli::{
    build_activity, run_calculate, run_convert, run_factors, run_gwp, run_inventory,
    run_validate, ActivityArgs, CliError,
};
use ghg_core::{GhgCalculator, GwpAssessment};
use serde_json::json;
use tempfile::TempDir;

fn calculator() -> GhgCalculator {
    GhgCalculator::load_builtin()
}

fn write_json(path: &Path, value: &serde_json::Value) {
    let text = serde_json::to_string_pretty(value).expect("serialize json");
    std::fs::write(path, text).expect("write json");
}

fn temp_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[test]
fn calculate_natural_gas_therms() {
    let calc = calculator();
    let activity = build_activity(&ActivityArgs {
        scope: "1".to_string(),
        category: Some("stationary_combustion".to_string()),
        fuel: Some("natural_gas".to_string()),
        quantity: 1000.0,
        unit: "therm".to_string(),
        ..ActivityArgs::default()
    })
    .expect("build activity");
    let output = run_calculate(&calc, &activity, false).expect("calculate");
    assert!(output.contains("5307"), "output: {}", output);
}

#[test]
fn calculate_json_output() {
    let calc = calculator();
    let activity = build_activity(&ActivityArgs {
        scope: "1".to_string(),
        category: Some("stationary_combustion".to_string()),
        fuel: Some("natural_gas".to_string()),
        quantity: 1000.0,
        unit: "therm".to_string(),
        ..ActivityArgs::default()
    })
    .expect("build activity");
    let output = run_calculate(&calc, &activity, true).expect("calculate");
    let data: serde_json::Value = serde_json::from_str(&output).expect("valid json");
    let results = data.as_array().expect("array");
    assert_eq!(results.len(), 1);
    assert!(results[0]["total_co2e_kg"].as_f64().expect("total") > 5000.0);
}

#[test]
fn calculate_scope2_prints_both_methods() {
    let calc = calculator();
    let activity = build_activity(&ActivityArgs {
        scope: "2".to_string(),
        quantity: 50000.0,
        unit: "kWh".to_string(),
        region: Some("CAMX".to_string()),
        ..ActivityArgs::default()
    })
    .expect("build activity");
    let output = run_calculate(&calc, &activity, false).expect("calculate");
    assert!(output.contains("location_based"), "output: {}", output);
    assert!(output.contains("market_based"), "output: {}", output);
}

#[test]
fn calculate_custom_factor() {
    let calc = calculator();
    let activity = build_activity(&ActivityArgs {
        scope: "1".to_string(),
        category: Some("stationary_combustion".to_string()),
        quantity: 100.0,
        unit: "gallon".to_string(),
        factor: Some(10.0),
        ..ActivityArgs::default()
    })
    .expect("build activity");
    let output = run_calculate(&calc, &activity, false).expect("calculate");
    assert!(output.contains("1000"), "output: {}", output);
}

#[test]
fn calculate_zero_quantity_fails() {
    let calc = calculator();
    let activity = build_activity(&ActivityArgs {
        scope: "1".to_string(),
        quantity: 0.0,
        unit: "therm".to_string(),
        fuel: Some("natural_gas".to_string()),
        ..ActivityArgs::default()
    })
    .expect("build activity");
    let err = run_calculate(&calc, &activity, false).expect_err("zero quantity");
    assert!(matches!(err, CliError::Calc(_)));
}

#[test]
fn factors_search_finds_diesel() {
    let calc = calculator();
    let output = run_factors(
        calc.registry(),
        Some("diesel"),
        None,
        None,
        None,
        None,
        None,
        50,
        false,
    )
    .expect("search");
    assert!(output.to_lowercase().contains("diesel"));
}

#[test]
fn factors_search_by_source() {
    let calc = calculator();
    let output = run_factors(
        calc.registry(),
        None,
        Some("egrid"),
        None,
        None,
        None,
        None,
        50,
        false,
    )
    .expect("search");
    assert!(output.contains("egrid"));
}

#[test]
fn factors_search_no_results() {
    let calc = calculator();
    let output = run_factors(
        calc.registry(),
        Some("zzz_nonexistent_zzz"),
        None,
        None,
        None,
        None,
        None,
        50,
        false,
    )
    .expect("search");
    assert!(output.contains("No factors"));
}

#[test]
fn gwp_specific_gas() {
    let output = run_gwp(Some("ch4"), GwpAssessment::Ar5, false).expect("gwp");
    assert!(output.contains("28"), "output: {}", output);
}

#[test]
fn gwp_lists_all_gases() {
    let output = run_gwp(None, GwpAssessment::Ar5, false).expect("gwp");
    assert!(output.contains("co2=1"));
    assert!(output.contains("ch4=28"));
}

#[test]
fn gwp_unknown_gas_fails() {
    let err = run_gwp(Some("unobtainium"), GwpAssessment::Ar5, false).expect_err("unknown gas");
    assert!(matches!(err, CliError::Calc(_)));
}

#[test]
fn convert_energy_units() {
    let output = run_convert(100.0, "therm", "MMBtu").expect("convert");
    assert!(output.contains("10"), "output: {}", output);
}

#[test]
fn convert_incompatible_units_fails() {
    assert!(run_convert(100.0, "kWh", "gallon").is_err());
}

#[test]
fn validate_accepts_good_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = temp_path(&dir, "activities.json");
    write_json(
        &path,
        &json!([
            {"scope": "scope_1", "scope1_category": "stationary_combustion",
             "fuel_type": "natural_gas", "quantity": 1000, "unit": "therm"}
        ]),
    );
    let output = run_validate(&path).expect("validate");
    assert!(output.contains("1 valid"));
}

#[test]
fn validate_flags_bad_records() {
    let dir = TempDir::new().expect("tempdir");
    let path = temp_path(&dir, "activities.json");
    write_json(
        &path,
        &json!([
            {"scope": "scope_1", "quantity": -5, "unit": "therm"}
        ]),
    );
    let err = run_validate(&path).expect_err("invalid record");
    assert!(err.to_string().contains("invalid"));
}

#[test]
fn validate_missing_file_fails() {
    let err = run_validate(Path::new("/tmp/nonexistent_ghg_activities.json"))
        .expect_err("missing file");
    assert!(matches!(err, CliError::Io(_)));
}

#[test]
fn inventory_from_file() {
    let calc = calculator();
    let dir = TempDir::new().expect("tempdir");
    let path = temp_path(&dir, "activities.json");
    write_json(
        &path,
        &json!([
            {"scope": "scope_1", "scope1_category": "stationary_combustion",
             "fuel_type": "natural_gas", "quantity": 1000, "unit": "therm"},
            {"scope": "scope_2", "quantity": 50000, "unit": "kWh",
             "grid_subregion": "CAMX"},
            {"scope": "scope_3", "scope3_category": 6, "quantity": 10000,
             "unit": "USD", "custom_factor": 0.3}
        ]),
    );
    let output = run_inventory(&calc, &path, "Test Corp", Some(2024), false).expect("inventory");
    assert!(output.contains("name=Test Corp"));
    assert!(output.contains("year=2024"));
    assert!(output.contains("scope3_kg=3000.00"));
    assert!(output.contains("results=4"));
}
