//! Registry behavior over the built-in factor databases.

use ghg_core::{FactorRegistry, FactorSource, SearchFilter};

fn registry() -> FactorRegistry {
    FactorRegistry::load_builtin()
}

#[test]
fn loads_all_six_sources() {
    let registry = registry();
    let sources = registry.sources();
    for source in [
        FactorSource::EpaHub,
        FactorSource::Egrid,
        FactorSource::Defra,
        FactorSource::Useeio,
        FactorSource::Ember,
        FactorSource::Exiobase,
    ] {
        assert!(sources.contains(&source), "missing {}", source);
    }
    assert!(registry.factor_count() >= 800);
    assert_eq!(registry.versions().len(), 6);
}

#[test]
fn get_by_id() {
    let registry = registry();
    let factor = registry
        .get("epa_stat_natural_gas_therm")
        .expect("natural gas factor");
    assert!((factor.co2_factor - 5.302).abs() < 1e-9);
    assert_eq!(factor.activity_unit, "therm");
    assert_eq!(factor.source, FactorSource::EpaHub);

    assert!(registry.get("nonexistent_factor_xyz").is_none());
}

#[test]
fn free_text_search_finds_natural_gas() {
    let registry = registry();
    let results = registry.search(&SearchFilter {
        query: Some("natural gas".to_string()),
        limit: Some(10),
        ..SearchFilter::default()
    });
    assert!(!results.is_empty());
    assert!(results.iter().any(|f| f.id.contains("natural_gas")));
}

#[test]
fn source_filter_returns_only_that_source() {
    let registry = registry();
    let results = registry.search(&SearchFilter {
        source: Some(FactorSource::Egrid),
        limit: Some(200),
        ..SearchFilter::default()
    });
    assert!(results.len() > 20);
    assert!(results.iter().all(|f| f.source == FactorSource::Egrid));
}

#[test]
fn electricity_by_subregion() {
    let registry = registry();
    let results = registry.search(&SearchFilter {
        category: Some("electricity".to_string()),
        region: Some("CAMX".to_string()),
        ..SearchFilter::default()
    });
    assert!(!results.is_empty());
}

#[test]
fn useeio_factors_are_spend_based_usd() {
    let registry = registry();
    let results = registry.search(&SearchFilter {
        source: Some(FactorSource::Useeio),
        limit: Some(300),
        ..SearchFilter::default()
    });
    assert!(results.len() >= 200);
    assert!(results.iter().all(|f| f.activity_unit == "USD"));
}

#[test]
fn ember_has_country_averages() {
    let registry = registry();
    let us = registry.search(&SearchFilter {
        source: Some(FactorSource::Ember),
        region: Some("US".to_string()),
        limit: Some(1),
        ..SearchFilter::default()
    });
    assert_eq!(us.len(), 1);
    assert!(us[0].co2_factor > 0.3);
}

#[test]
fn refrigerant_search_yields_co2e_factor() {
    let registry = registry();
    let results = registry.search(&SearchFilter {
        query: Some("HFC-134a".to_string()),
        ..SearchFilter::default()
    });
    assert!(!results.is_empty());
    assert_eq!(results[0].co2e_factor, Some(1300.0));
}

#[test]
fn find_factor_for_combustion() {
    let registry = registry();
    let factor = registry
        .find_factor(
            "stationary_combustion",
            Some("natural_gas"),
            None,
            Some("therm"),
            None,
        )
        .expect("natural gas therm factor");
    assert!(factor.co2_factor > 5.0);
}

#[test]
fn no_filter_search_honors_limit_and_order() {
    let registry = registry();
    let first_five = registry.search(&SearchFilter {
        limit: Some(5),
        ..SearchFilter::default()
    });
    assert_eq!(first_five.len(), 5);
    let first_fifty = registry.search(&SearchFilter::default());
    assert_eq!(first_fifty.len(), 50);
    // Stable: a prefix-limited search is a prefix of the wider one.
    for (narrow, wide) in first_five.iter().zip(first_fifty.iter()) {
        assert_eq!(narrow.id, wide.id);
    }
}

#[test]
fn tag_filter_is_subset_semantics() {
    let registry = registry();
    let tagged = registry.search(&SearchFilter {
        tags: vec!["fugitive".to_string(), "refrigerant".to_string()],
        limit: Some(500),
        ..SearchFilter::default()
    });
    assert!(!tagged.is_empty());
    for factor in &tagged {
        let tags: Vec<String> = factor.tags.iter().map(|t| t.to_lowercase()).collect();
        assert!(tags.contains(&"fugitive".to_string()));
        assert!(tags.contains(&"refrigerant".to_string()));
    }
}
