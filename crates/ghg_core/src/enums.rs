//! Closed vocabularies shared across the calculation engine.

use serde::{Deserialize, Serialize};

/// GHG Protocol emission scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "scope_1")]
    Scope1,
    #[serde(rename = "scope_2")]
    Scope2,
    #[serde(rename = "scope_3")]
    Scope3,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Scope1 => "scope_1",
            Scope::Scope2 => "scope_2",
            Scope::Scope3 => "scope_3",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scope 1 emission categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope1Category {
    StationaryCombustion,
    MobileCombustion,
    FugitiveEmissions,
    ProcessEmissions,
}

impl Scope1Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope1Category::StationaryCombustion => "stationary_combustion",
            Scope1Category::MobileCombustion => "mobile_combustion",
            Scope1Category::FugitiveEmissions => "fugitive_emissions",
            Scope1Category::ProcessEmissions => "process_emissions",
        }
    }
}

impl std::str::FromStr for Scope1Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stationary_combustion" => Ok(Scope1Category::StationaryCombustion),
            "mobile_combustion" => Ok(Scope1Category::MobileCombustion),
            "fugitive_emissions" => Ok(Scope1Category::FugitiveEmissions),
            "process_emissions" => Ok(Scope1Category::ProcessEmissions),
            other => Err(format!("unknown scope 1 category '{}'", other)),
        }
    }
}

/// Scope 2 calculation methods (dual reporting per the GHG Protocol).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope2Method {
    LocationBased,
    MarketBased,
}

impl Scope2Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope2Method::LocationBased => "location_based",
            Scope2Method::MarketBased => "market_based",
        }
    }
}

/// Scope 3 categories 1-15 per the GHG Protocol, integer-coded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Scope3Category {
    PurchasedGoodsServices = 1,
    CapitalGoods = 2,
    FuelEnergyActivities = 3,
    UpstreamTransport = 4,
    Waste = 5,
    BusinessTravel = 6,
    EmployeeCommuting = 7,
    UpstreamLeasedAssets = 8,
    DownstreamTransport = 9,
    ProcessingSoldProducts = 10,
    UseOfSoldProducts = 11,
    EndOfLifeSoldProducts = 12,
    DownstreamLeasedAssets = 13,
    Franchises = 14,
    Investments = 15,
}

impl Scope3Category {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Registry category the scope 3 category typically resolves against.
    pub fn registry_category(&self) -> &'static str {
        match self {
            Scope3Category::PurchasedGoodsServices => "purchased_goods",
            Scope3Category::CapitalGoods => "capital_goods",
            Scope3Category::FuelEnergyActivities => "fuel_energy",
            Scope3Category::UpstreamTransport => "transport",
            Scope3Category::Waste => "waste",
            Scope3Category::BusinessTravel => "business_travel",
            Scope3Category::EmployeeCommuting => "commuting",
            Scope3Category::UpstreamLeasedAssets => "leased_assets",
            Scope3Category::DownstreamTransport => "transport",
            Scope3Category::ProcessingSoldProducts => "processing",
            Scope3Category::UseOfSoldProducts => "product_use",
            Scope3Category::EndOfLifeSoldProducts => "end_of_life",
            Scope3Category::DownstreamLeasedAssets => "leased_assets",
            Scope3Category::Franchises => "franchises",
            Scope3Category::Investments => "investments",
        }
    }
}

impl TryFrom<u8> for Scope3Category {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Scope3Category::PurchasedGoodsServices),
            2 => Ok(Scope3Category::CapitalGoods),
            3 => Ok(Scope3Category::FuelEnergyActivities),
            4 => Ok(Scope3Category::UpstreamTransport),
            5 => Ok(Scope3Category::Waste),
            6 => Ok(Scope3Category::BusinessTravel),
            7 => Ok(Scope3Category::EmployeeCommuting),
            8 => Ok(Scope3Category::UpstreamLeasedAssets),
            9 => Ok(Scope3Category::DownstreamTransport),
            10 => Ok(Scope3Category::ProcessingSoldProducts),
            11 => Ok(Scope3Category::UseOfSoldProducts),
            12 => Ok(Scope3Category::EndOfLifeSoldProducts),
            13 => Ok(Scope3Category::DownstreamLeasedAssets),
            14 => Ok(Scope3Category::Franchises),
            15 => Ok(Scope3Category::Investments),
            other => Err(format!("scope 3 category must be 1-15, got {}", other)),
        }
    }
}

impl From<Scope3Category> for u8 {
    fn from(category: Scope3Category) -> u8 {
        category as u8
    }
}

/// Greenhouse gas families tracked in result breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasType {
    Co2,
    Ch4,
    N2o,
    Hfc,
    Pfc,
    Sf6,
    Nf3,
    /// Pre-calculated CO2-equivalent; not a physical gas.
    Co2e,
}

impl GasType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GasType::Co2 => "co2",
            GasType::Ch4 => "ch4",
            GasType::N2o => "n2o",
            GasType::Hfc => "hfc",
            GasType::Pfc => "pfc",
            GasType::Sf6 => "sf6",
            GasType::Nf3 => "nf3",
            GasType::Co2e => "co2e",
        }
    }
}

/// IPCC Assessment Report generations carrying 100-year GWP values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GwpAssessment {
    #[default]
    Ar5,
    Ar6,
}

impl GwpAssessment {
    pub fn as_str(&self) -> &'static str {
        match self {
            GwpAssessment::Ar5 => "ar5",
            GwpAssessment::Ar6 => "ar6",
        }
    }
}

impl std::str::FromStr for GwpAssessment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ar5" => Ok(GwpAssessment::Ar5),
            "ar6" => Ok(GwpAssessment::Ar6),
            other => Err(format!("unknown assessment '{}' (expected ar5 or ar6)", other)),
        }
    }
}

/// Data quality indicator score (1 = best, 5 = worst) per GHG Protocol Ch.7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DataQualityScore {
    VeryGood = 1,
    Good = 2,
    Fair = 3,
    Poor = 4,
    VeryPoor = 5,
}

impl TryFrom<u8> for DataQualityScore {
    type Error = String;

    fn try_from(score: u8) -> Result<Self, Self::Error> {
        match score {
            1 => Ok(DataQualityScore::VeryGood),
            2 => Ok(DataQualityScore::Good),
            3 => Ok(DataQualityScore::Fair),
            4 => Ok(DataQualityScore::Poor),
            5 => Ok(DataQualityScore::VeryPoor),
            other => Err(format!("data quality score must be 1-5, got {}", other)),
        }
    }
}

impl From<DataQualityScore> for u8 {
    fn from(score: DataQualityScore) -> u8 {
        score as u8
    }
}

/// Emission factor database provenances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorSource {
    EpaHub,
    Egrid,
    Defra,
    Useeio,
    Ember,
    Exiobase,
    #[default]
    Custom,
}

impl FactorSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorSource::EpaHub => "epa_hub",
            FactorSource::Egrid => "egrid",
            FactorSource::Defra => "defra",
            FactorSource::Useeio => "useeio",
            FactorSource::Ember => "ember",
            FactorSource::Exiobase => "exiobase",
            FactorSource::Custom => "custom",
        }
    }
}

impl std::str::FromStr for FactorSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "epa_hub" => Ok(FactorSource::EpaHub),
            "egrid" => Ok(FactorSource::Egrid),
            "defra" => Ok(FactorSource::Defra),
            "useeio" => Ok(FactorSource::Useeio),
            "ember" => Ok(FactorSource::Ember),
            "exiobase" => Ok(FactorSource::Exiobase),
            "custom" => Ok(FactorSource::Custom),
            other => Err(format!("unknown factor source '{}'", other)),
        }
    }
}

impl std::fmt::Display for FactorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common fuel types for combustion calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    NaturalGas,
    Diesel,
    Gasoline,
    Propane,
    FuelOilNo2,
    FuelOilNo6,
    Kerosene,
    Lpg,
    CoalBituminous,
    CoalAnthracite,
    CoalSubbituminous,
    Wood,
    LandfillGas,
    JetFuel,
    AviationGasoline,
    ResidualFuelOil,
    E85,
    B20,
    Cng,
    Lng,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::NaturalGas => "natural_gas",
            FuelType::Diesel => "diesel",
            FuelType::Gasoline => "gasoline",
            FuelType::Propane => "propane",
            FuelType::FuelOilNo2 => "fuel_oil_no2",
            FuelType::FuelOilNo6 => "fuel_oil_no6",
            FuelType::Kerosene => "kerosene",
            FuelType::Lpg => "lpg",
            FuelType::CoalBituminous => "coal_bituminous",
            FuelType::CoalAnthracite => "coal_anthracite",
            FuelType::CoalSubbituminous => "coal_subbituminous",
            FuelType::Wood => "wood",
            FuelType::LandfillGas => "landfill_gas",
            FuelType::JetFuel => "jet_fuel",
            FuelType::AviationGasoline => "aviation_gasoline",
            FuelType::ResidualFuelOil => "residual_fuel_oil",
            FuelType::E85 => "e85",
            FuelType::B20 => "b20",
            FuelType::Cng => "cng",
            FuelType::Lng => "lng",
        }
    }
}

impl std::str::FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "natural_gas" => Ok(FuelType::NaturalGas),
            "diesel" => Ok(FuelType::Diesel),
            "gasoline" => Ok(FuelType::Gasoline),
            "propane" => Ok(FuelType::Propane),
            "fuel_oil_no2" => Ok(FuelType::FuelOilNo2),
            "fuel_oil_no6" => Ok(FuelType::FuelOilNo6),
            "kerosene" => Ok(FuelType::Kerosene),
            "lpg" => Ok(FuelType::Lpg),
            "coal_bituminous" => Ok(FuelType::CoalBituminous),
            "coal_anthracite" => Ok(FuelType::CoalAnthracite),
            "coal_subbituminous" => Ok(FuelType::CoalSubbituminous),
            "wood" => Ok(FuelType::Wood),
            "landfill_gas" => Ok(FuelType::LandfillGas),
            "jet_fuel" => Ok(FuelType::JetFuel),
            "aviation_gasoline" => Ok(FuelType::AviationGasoline),
            "residual_fuel_oil" => Ok(FuelType::ResidualFuelOil),
            "e85" => Ok(FuelType::E85),
            "b20" => Ok(FuelType::B20),
            "cng" => Ok(FuelType::Cng),
            "lng" => Ok(FuelType::Lng),
            other => Err(format!("unknown fuel type '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_serde_names() {
        let json = serde_json::to_string(&Scope::Scope1).expect("serialize");
        assert_eq!(json, "\"scope_1\"");
        let back: Scope = serde_json::from_str("\"scope_2\"").expect("deserialize");
        assert_eq!(back, Scope::Scope2);
    }

    #[test]
    fn scope3_category_roundtrips_codes() {
        for code in 1u8..=15 {
            let category = Scope3Category::try_from(code).expect("valid code");
            assert_eq!(category.code(), code);
            let json = serde_json::to_string(&category).expect("serialize");
            assert_eq!(json, code.to_string());
            let back: Scope3Category = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, category);
        }
    }

    #[test]
    fn scope3_category_rejects_out_of_range() {
        assert!(serde_json::from_str::<Scope3Category>("0").is_err());
        assert!(serde_json::from_str::<Scope3Category>("16").is_err());
    }

    #[test]
    fn factor_source_parse_matches_serde() {
        let source: FactorSource = "epa_hub".parse().expect("parse");
        assert_eq!(source, FactorSource::EpaHub);
        let json = serde_json::to_string(&source).expect("serialize");
        assert_eq!(json, "\"epa_hub\"");
        assert!("epa".parse::<FactorSource>().is_err());
    }

    #[test]
    fn fuel_type_snake_case() {
        let json = serde_json::to_string(&FuelType::FuelOilNo6).expect("serialize");
        assert_eq!(json, "\"fuel_oil_no6\"");
        assert_eq!(FuelType::FuelOilNo6.as_str(), "fuel_oil_no6");
    }
}
