//! GHG Protocol emissions calculation engine.
//!
//! Loads emission factors from versioned source documents into an immutable
//! registry, resolves activities against it, and produces CO2-equivalent
//! results aggregated per scope. The registry is built once at load time and
//! is safe to share across threads read-only.

mod activity;
mod enums;
mod error;
mod factor;
pub mod gwp;
mod loader;
mod registry;
mod result;
pub mod units;

pub mod engine;

pub use activity::ActivityRecord;
pub use enums::{
    DataQualityScore, FactorSource, FuelType, GasType, GwpAssessment, Scope, Scope1Category,
    Scope2Method, Scope3Category,
};
pub use error::{CalcError, CalcResult};
pub use factor::{EmissionFactor, FactorVersion};
pub use loader::{load_dir, parse_document, FactorDocument, LoadReport, LoadWarning};
pub use registry::{FactorRegistry, SearchFilter, DEFAULT_SEARCH_LIMIT};
pub use result::{EmissionResult, GasBreakdown, InventoryResult, ScopeResult};

pub use engine::GhgCalculator;
