//! Factor registry — indexes and queries all loaded emission factors.
//!
//! Six source databases use incompatible unit systems, regional taxonomies,
//! and fuel naming. Rather than a normalized schema, the registry treats
//! every factor uniformly through exact-match filters plus best-effort
//! free-text scoring; domain-specific fallback chains live in the
//! calculators. Built once at load time, read-only afterwards.

use std::collections::BTreeMap;

use crate::enums::{FactorSource, Scope};
use crate::factor::{EmissionFactor, FactorVersion};
use crate::loader::{self, FactorDocument, LoadReport};

/// Default result cap for searches.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Filter set for [`FactorRegistry::search`]. All supplied filters are ANDed
/// as case-insensitive equality predicates; `tags` is a subset test; `query`
/// triggers the scored free-text pass.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub query: Option<String>,
    pub source: Option<FactorSource>,
    pub category: Option<String>,
    pub fuel_type: Option<String>,
    pub region: Option<String>,
    pub scope: Option<Scope>,
    pub activity_unit: Option<String>,
    pub tags: Vec<String>,
    /// Maximum results; `DEFAULT_SEARCH_LIMIT` when unset.
    pub limit: Option<usize>,
}

/// Central registry for querying emission factors across all sources.
#[derive(Debug, Default)]
pub struct FactorRegistry {
    versions: Vec<FactorVersion>,
    factors: Vec<EmissionFactor>,
    by_id: BTreeMap<String, usize>,
}

impl FactorRegistry {
    pub fn new() -> Self {
        FactorRegistry::default()
    }

    /// Registry populated with the six built-in source databases.
    pub fn load_builtin() -> Self {
        let mut registry = FactorRegistry::new();
        registry.add_report(loader::load_builtin());
        registry
    }

    /// Merge every document of a load report. Warnings are the caller's to
    /// surface; the registry only ingests what parsed.
    pub fn add_report(&mut self, report: LoadReport) {
        for document in report.documents {
            self.add_document(document);
        }
    }

    /// Add one source document. Factors with an already-known id overwrite
    /// the id index (last write wins) but both stay in the scan list; id
    /// uniqueness across sources is assumed, not enforced.
    pub fn add_document(&mut self, document: FactorDocument) {
        self.versions.push(FactorVersion {
            source: document.source,
            version: document.version,
            year: document.year,
            description: document.description,
            url: document.url,
            factor_count: document.factors.len(),
        });
        for factor in document.factors {
            self.by_id.insert(factor.id.clone(), self.factors.len());
            self.factors.push(factor);
        }
    }

    /// Exact-id lookup.
    pub fn get(&self, factor_id: &str) -> Option<&EmissionFactor> {
        self.by_id.get(factor_id).map(|&index| &self.factors[index])
    }

    /// Filtered, optionally scored search. Candidates keep collection order;
    /// when a free-text query is supplied they are re-ranked by descending
    /// score (stable, ties keep collection order) and zero scores drop out.
    pub fn search(&self, filter: &SearchFilter) -> Vec<&EmissionFactor> {
        let mut results: Vec<&EmissionFactor> = self
            .factors
            .iter()
            .filter(|factor| matches_filters(factor, filter))
            .collect();

        if let Some(query) = filter.query.as_deref() {
            if !query.is_empty() {
                let query_lower = query.to_lowercase();
                let mut scored: Vec<(i32, &EmissionFactor)> = results
                    .into_iter()
                    .filter_map(|factor| {
                        let score = score_factor(factor, &query_lower);
                        (score > 0).then_some((score, factor))
                    })
                    .collect();
                scored.sort_by(|a, b| b.0.cmp(&a.0));
                results = scored.into_iter().map(|(_, factor)| factor).collect();
            }
        }

        results.truncate(filter.limit.unwrap_or(DEFAULT_SEARCH_LIMIT));
        results
    }

    /// Best single match for a calculation: first hit of an exact-criteria
    /// search with no free text. No semantic fallback happens here; each
    /// calculator encodes its own resolution chain.
    pub fn find_factor(
        &self,
        category: &str,
        fuel_type: Option<&str>,
        region: Option<&str>,
        activity_unit: Option<&str>,
        source: Option<FactorSource>,
    ) -> Option<&EmissionFactor> {
        let filter = SearchFilter {
            category: Some(category.to_string()),
            fuel_type: fuel_type.map(str::to_string),
            region: region.map(str::to_string),
            activity_unit: activity_unit.map(str::to_string),
            source,
            limit: Some(1),
            ..SearchFilter::default()
        };
        self.search(&filter).into_iter().next()
    }

    pub fn factor_count(&self) -> usize {
        self.factors.len()
    }

    /// Distinct sources among the loaded versions, in first-seen order.
    pub fn sources(&self) -> Vec<FactorSource> {
        let mut seen = Vec::new();
        for version in &self.versions {
            if !seen.contains(&version.source) {
                seen.push(version.source);
            }
        }
        seen
    }

    pub fn versions(&self) -> &[FactorVersion] {
        &self.versions
    }
}

fn eq_ignore_case(value: &str, wanted: &str) -> bool {
    value.eq_ignore_ascii_case(wanted)
}

fn matches_filters(factor: &EmissionFactor, filter: &SearchFilter) -> bool {
    if let Some(source) = filter.source {
        if factor.source != source {
            return false;
        }
    }
    if let Some(category) = filter.category.as_deref() {
        if !eq_ignore_case(&factor.category, category) {
            return false;
        }
    }
    if let Some(fuel_type) = filter.fuel_type.as_deref() {
        match factor.fuel_type.as_deref() {
            Some(value) if eq_ignore_case(value, fuel_type) => {}
            _ => return false,
        }
    }
    if let Some(region) = filter.region.as_deref() {
        match factor.region.as_deref() {
            Some(value) if eq_ignore_case(value, region) => {}
            _ => return false,
        }
    }
    if let Some(scope) = filter.scope {
        if factor.scope != Some(scope) {
            return false;
        }
    }
    if let Some(activity_unit) = filter.activity_unit.as_deref() {
        if !eq_ignore_case(&factor.activity_unit, activity_unit) {
            return false;
        }
    }
    if !filter.tags.is_empty() {
        let factor_tags: Vec<String> = factor.tags.iter().map(|t| t.to_lowercase()).collect();
        for tag in &filter.tags {
            if !factor_tags.contains(&tag.to_lowercase()) {
                return false;
            }
        }
    }
    true
}

// Scoring weights: substring hit over all text +10, name hit +20, exact
// fuel-type match +15, +5 per individual query word found.
fn score_factor(factor: &EmissionFactor, query_lower: &str) -> i32 {
    let searchable = factor.searchable_text();
    let mut score = 0;
    if searchable.contains(query_lower) {
        score += 10;
    }
    if factor.name.to_lowercase().contains(query_lower) {
        score += 20;
    }
    if factor
        .fuel_type
        .as_deref()
        .is_some_and(|fuel| fuel.to_lowercase() == query_lower)
    {
        score += 15;
    }
    for word in query_lower.split_whitespace() {
        if searchable.contains(word) {
            score += 5;
        }
    }
    score
}
