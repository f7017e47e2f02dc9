//! Factor document parsing and loading.
//!
//! One document per source provenance and version. Documents that fail
//! structural validation are skipped and recorded as warnings; loading never
//! fails outright because one source file is bad.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enums::FactorSource;
use crate::factor::EmissionFactor;

/// One factor source file: provenance header plus the factor list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorDocument {
    pub source: FactorSource,
    pub version: String,
    pub year: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    pub factors: Vec<EmissionFactor>,
}

/// Non-fatal problem encountered while loading factor documents.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadWarning {
    pub path: String,
    pub message: String,
}

/// Outcome of a load pass: the documents that parsed plus skip warnings.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub documents: Vec<FactorDocument>,
    pub warnings: Vec<LoadWarning>,
}

/// Built-in factor documents, in load order.
const BUILTIN_DOCUMENTS: &[(&str, &str)] = &[
    ("defra_v2025.json", include_str!("../data/defra_v2025.json")),
    ("egrid_v2023.json", include_str!("../data/egrid_v2023.json")),
    ("ember_v2024.json", include_str!("../data/ember_v2024.json")),
    ("epa_hub_v2025.json", include_str!("../data/epa_hub_v2025.json")),
    (
        "exiobase_v3_8.json",
        include_str!("../data/exiobase_v3_8.json"),
    ),
    ("useeio_v1_3.json", include_str!("../data/useeio_v1_3.json")),
];

/// Parse one document and stamp its provenance onto every factor.
pub fn parse_document(text: &str) -> Result<FactorDocument, String> {
    let mut document: FactorDocument =
        serde_json::from_str(text).map_err(|err| err.to_string())?;
    for factor in &mut document.factors {
        factor.source = document.source;
    }
    Ok(document)
}

/// Load the six built-in source documents.
pub(crate) fn load_builtin() -> LoadReport {
    let mut report = LoadReport::default();
    for (name, text) in BUILTIN_DOCUMENTS {
        match parse_document(text) {
            Ok(document) => report.documents.push(document),
            Err(message) => report.warnings.push(LoadWarning {
                path: format!("builtin:{}", name),
                message,
            }),
        }
    }
    report
}

/// Load every `*.json` document in a directory, sorted by file name.
/// Unreadable or malformed files are skipped with a warning.
pub fn load_dir(dir: &Path) -> LoadReport {
    let mut report = LoadReport::default();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            report.warnings.push(LoadWarning {
                path: dir.display().to_string(),
                message: format!("cannot read directory: {}", err),
            });
            return report;
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    for path in paths {
        let display = path.display().to_string();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                report.warnings.push(LoadWarning {
                    path: display,
                    message: format!("cannot read file: {}", err),
                });
                continue;
            }
        };
        match parse_document(&text) {
            Ok(document) => report.documents.push(document),
            Err(message) => report.warnings.push(LoadWarning {
                path: display,
                message,
            }),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_document_and_stamps_source() {
        let text = json!({
            "source": "custom",
            "version": "1",
            "year": 2025,
            "factors": [
                {"id": "x1", "name": "Test", "co2_factor": 1.5, "activity_unit": "kg"}
            ]
        })
        .to_string();
        let document = parse_document(&text).expect("parse");
        assert_eq!(document.factors.len(), 1);
        assert_eq!(document.factors[0].source, FactorSource::Custom);
        assert_eq!(document.factors[0].co2_factor, 1.5);
        assert_eq!(document.factors[0].ch4_factor, 0.0);
    }

    #[test]
    fn builtin_documents_all_parse() {
        let report = load_builtin();
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(report.documents.len(), 6);
        let total: usize = report.documents.iter().map(|d| d.factors.len()).sum();
        assert!(total >= 800, "expected 800+ factors, got {}", total);
    }

    #[test]
    fn load_dir_skips_malformed_files() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let good = json!({
            "source": "custom",
            "version": "1",
            "year": 2025,
            "factors": [
                {"id": "ok1", "name": "Good", "co2e_factor": 2.0, "activity_unit": "kg"}
            ]
        })
        .to_string();
        std::fs::write(dir.path().join("good.json"), good).expect("write good");
        std::fs::write(dir.path().join("bad.json"), "{not json").expect("write bad");
        std::fs::write(dir.path().join("ignored.txt"), "not a document").expect("write txt");

        let report = load_dir(dir.path());
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].path.ends_with("bad.json"));
    }

    #[test]
    fn missing_directory_is_a_warning_not_an_error() {
        let report = load_dir(Path::new("/nonexistent/factors"));
        assert!(report.documents.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }
}
