use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use ghg_cli::{
    build_activity, guidance, run_calculate, run_convert, run_factors, run_gwp, run_inventory,
    run_validate, ActivityArgs, CliError,
};
use ghg_core::{load_dir, FactorRegistry, GhgCalculator, GwpAssessment};

#[derive(Parser)]
#[command(
    name = "ghg",
    about = "GHG Protocol emissions calculator",
    version,
    arg_required_else_help = true
)]
struct Cli {
    /// Directory of additional factor documents to load on top of the
    /// built-in databases
    #[arg(long, global = true, value_name = "DIR")]
    factors_dir: Option<PathBuf>,

    /// GWP assessment report to use (ar5 or ar6)
    #[arg(long, global = true, default_value = "ar5")]
    assessment: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Calculate(CalculateArgs),
    Inventory(InventoryArgs),
    Factors(FactorsArgs),
    Gwp(GwpArgs),
    Convert(ConvertArgs),
    Validate(ValidateArgs),
}

#[derive(Parser)]
struct CalculateArgs {
    /// Emission scope: 1, 2, or 3
    #[arg(long)]
    scope: String,

    /// Scope 1 category name, or scope 3 category number 1-15
    #[arg(long)]
    category: Option<String>,

    /// Fuel type (e.g. natural_gas, diesel); unknown names are treated as
    /// custom fuels
    #[arg(long)]
    fuel: Option<String>,

    /// Activity quantity (must be > 0)
    #[arg(long)]
    quantity: f64,

    /// Unit of the quantity (e.g. therm, kWh, gallon)
    #[arg(long)]
    unit: String,

    /// Grid subregion (scope 2) or regional code
    #[arg(long)]
    region: Option<String>,

    /// Country code for grid averages (e.g. US, FR)
    #[arg(long)]
    country: Option<String>,

    /// Custom emission factor override (kg CO2e per unit)
    #[arg(long)]
    factor: Option<f64>,

    /// Refrigerant type for fugitive emissions (e.g. r-410a)
    #[arg(long)]
    refrigerant: Option<String>,

    /// NAICS code for spend-based scope 3
    #[arg(long)]
    naics: Option<String>,

    /// Spend amount for spend-based scope 3
    #[arg(long)]
    spend: Option<f64>,

    /// Distance for transport categories
    #[arg(long)]
    distance: Option<f64>,

    /// Unit of the distance (default km)
    #[arg(long)]
    distance_unit: Option<String>,

    /// Transport mode (e.g. taxi, rail)
    #[arg(long)]
    mode: Option<String>,

    /// Waste type (scope 3 waste category)
    #[arg(long)]
    waste_type: Option<String>,

    /// Disposal method (landfill, incineration, recycling, ...)
    #[arg(long)]
    disposal: Option<String>,

    /// Preferred factor source (epa_hub, egrid, defra, useeio, ember,
    /// exiobase)
    #[arg(long)]
    source: Option<String>,

    /// Output JSON instead of key=value lines
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct InventoryArgs {
    /// Path to a JSON array of activity records
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Inventory name
    #[arg(long, default_value = "GHG Inventory")]
    name: String,

    /// Reporting year
    #[arg(long)]
    year: Option<i32>,

    /// Output JSON instead of key=value lines
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct FactorsArgs {
    /// Free-text query
    #[arg(value_name = "QUERY")]
    query: Option<String>,

    /// Filter by factor source
    #[arg(long)]
    source: Option<String>,

    /// Filter by category (e.g. stationary_combustion, electricity)
    #[arg(long)]
    category: Option<String>,

    /// Filter by fuel type
    #[arg(long)]
    fuel: Option<String>,

    /// Filter by region code
    #[arg(long)]
    region: Option<String>,

    /// Filter by activity unit
    #[arg(long)]
    unit: Option<String>,

    /// Maximum results
    #[arg(long, default_value_t = 50)]
    limit: usize,

    /// Output JSON instead of key=value lines
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct GwpArgs {
    /// Gas identifier (e.g. ch4, hfc-134a, r-410a); omit to list all
    #[arg(value_name = "GAS")]
    gas: Option<String>,

    /// Output JSON instead of key=value lines
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ConvertArgs {
    /// Value to convert
    #[arg(value_name = "VALUE")]
    value: f64,

    /// Source unit
    #[arg(value_name = "FROM")]
    from: String,

    /// Target unit
    #[arg(value_name = "TO")]
    to: String,
}

#[derive(Parser)]
struct ValidateArgs {
    /// Path to a JSON array of activity records
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn build_registry(factors_dir: Option<&PathBuf>) -> FactorRegistry {
    let mut registry = FactorRegistry::load_builtin();
    if let Some(dir) = factors_dir {
        let report = load_dir(dir);
        for warning in &report.warnings {
            eprintln!("Warning: skipped {}: {}", warning.path, warning.message);
        }
        registry.add_report(report);
    }
    registry
}

fn run(cli: Cli) -> Result<String, CliError> {
    let assessment: GwpAssessment = cli
        .assessment
        .parse()
        .map_err(|message: String| CliError::Calc(ghg_core::CalcError::validation(message)))?;

    match cli.command {
        Commands::Calculate(args) => {
            let registry = build_registry(cli.factors_dir.as_ref());
            let calc = GhgCalculator::with_assessment(registry, assessment);
            let activity = build_activity(&ActivityArgs {
                scope: args.scope,
                category: args.category,
                fuel: args.fuel,
                quantity: args.quantity,
                unit: args.unit,
                region: args.region,
                country: args.country,
                factor: args.factor,
                refrigerant: args.refrigerant,
                naics: args.naics,
                spend: args.spend,
                distance: args.distance,
                distance_unit: args.distance_unit,
                mode: args.mode,
                waste_type: args.waste_type,
                disposal: args.disposal,
                source: args.source,
            })?;
            run_calculate(&calc, &activity, args.json)
        }
        Commands::Inventory(args) => {
            let registry = build_registry(cli.factors_dir.as_ref());
            let calc = GhgCalculator::with_assessment(registry, assessment);
            run_inventory(&calc, &args.file, &args.name, args.year, args.json)
        }
        Commands::Factors(args) => {
            let registry = build_registry(cli.factors_dir.as_ref());
            run_factors(
                &registry,
                args.query.as_deref(),
                args.source.as_deref(),
                args.category.as_deref(),
                args.fuel.as_deref(),
                args.region.as_deref(),
                args.unit.as_deref(),
                args.limit,
                args.json,
            )
        }
        Commands::Gwp(args) => run_gwp(args.gas.as_deref(), assessment, args.json),
        Commands::Convert(args) => run_convert(args.value, &args.from, &args.to),
        Commands::Validate(args) => run_validate(&args.file),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            if let Some(hint) = guidance(&err) {
                eprintln!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}
