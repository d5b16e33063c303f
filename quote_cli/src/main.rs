//! # Quote CLI
//!
//! Terminal front end for the print-shop costing engine. Prices jobs against
//! a catalog file, checks impositions, and writes a starter catalog.
//!
//! ```text
//! quote_cli init-catalog pricelist.json
//! quote_cli estimate --catalog pricelist.json --request job.json --format text
//! quote_cli impose --sheet 700x1000 --item 100x100
//! ```

mod logging;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use quote_core::calculations::impose;
use quote_core::file_io::{load_catalog, save_catalog, CatalogFile};
use quote_core::quote::QuoteCalculation;
use quote_core::resources::{Finishing, LaborRate, Machine, Material, TenantId};
use quote_core::{run_calculation, CalcError, CalculationRequest, ErrorKind};
use tracing::{debug, error, info};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "quote_cli", version, about = "Price print jobs from a catalog file.")]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Price a job request against a catalog file.
    Estimate(EstimateArgs),
    /// Show how many products fit on a sheet.
    Impose(ImposeArgs),
    /// Write a starter catalog file.
    InitCatalog(InitCatalogArgs),
}

#[derive(Debug, Parser)]
struct EstimateArgs {
    /// Catalog file with the tenant's materials, machines and rates.
    #[arg(long, env = "QUOTE_CATALOG")]
    catalog: PathBuf,

    /// Request JSON file, or "-" for stdin.
    #[arg(long, default_value = "-")]
    request: PathBuf,

    /// Attach the result to this quote and print the quote calculation record.
    #[arg(long)]
    quote_id: Option<Uuid>,

    /// Override the waste allowance, in percent.
    #[arg(long)]
    waste_percent: Option<f64>,

    /// Override the rate used when no operator labor rate matches.
    #[arg(long)]
    default_operator_rate: Option<f64>,

    /// Labor role to use for machine operators.
    #[arg(long)]
    operator_role: Option<String>,

    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ImposeArgs {
    /// Sheet format in millimeters, e.g. 700x1000 (omit for roll stock).
    #[arg(long, value_parser = parse_format)]
    sheet: Option<(f64, f64)>,

    /// Product format in millimeters, e.g. 100x100.
    #[arg(long, value_parser = parse_format)]
    item: (f64, f64),

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct InitCatalogArgs {
    /// Where to write the catalog.
    path: PathBuf,

    /// Company name stored in the file.
    #[arg(long, default_value = "Example Print Shop")]
    company: String,

    /// Overwrite an existing file.
    #[arg(long, default_value_t = false)]
    force: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match real_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(calc) = e.downcast_ref::<CalcError>() {
                error!(code = calc.error_code(), "{}", calc);
                if let Ok(json) = serde_json::to_string_pretty(calc) {
                    eprintln!("{}", json);
                }
                return ExitCode::from(exit_code(calc.kind()));
            }
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Validation => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Conflict => 4,
        ErrorKind::Io | ErrorKind::Internal => 1,
    }
}

fn real_main(cli: Cli) -> anyhow::Result<()> {
    match cli.cmd {
        Command::Estimate(args) => cmd_estimate(args),
        Command::Impose(args) => cmd_impose(args),
        Command::InitCatalog(args) => cmd_init_catalog(args),
    }
}

fn cmd_estimate(args: EstimateArgs) -> anyhow::Result<()> {
    let mut file = load_catalog(&args.catalog)?;

    let settings = &mut file.records.settings;
    if let Some(pct) = args.waste_percent {
        settings.waste_percent = pct;
    }
    if let Some(rate) = args.default_operator_rate {
        settings.default_operator_rate = rate;
    }
    if let Some(role) = args.operator_role {
        settings.operator_role = Some(role);
    }
    debug!(?settings, "costing settings");

    let tenant = file.tenant_id;
    let body = read_request(&args.request)?;
    let request = CalculationRequest::from_json(&body)?;

    let catalog = file.into_catalog();
    let result = run_calculation(&catalog, tenant, &request)?;
    info!(%tenant, final_price = result.final_price, "estimate complete");

    match (args.quote_id, args.format) {
        (Some(quote_id), OutputFormat::Json) => {
            let record = QuoteCalculation::new(quote_id, tenant, result);
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        (Some(_), OutputFormat::Text) => bail!("--quote-id requires --format json"),
        (None, OutputFormat::Json) => println!("{}", serde_json::to_string_pretty(&result)?),
        (None, OutputFormat::Text) => print!("{}", report::EstimateReport(&result)),
    }
    Ok(())
}

fn cmd_impose(args: ImposeArgs) -> anyhow::Result<()> {
    let (sheet_w, sheet_h) = match args.sheet {
        Some((w, h)) => (Some(w), Some(h)),
        None => (None, None),
    };
    let imposition = impose(sheet_w, sheet_h, args.item.0, args.item.1)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&imposition)?),
        OutputFormat::Text => println!("{}", report::render_imposition(&imposition)),
    }
    Ok(())
}

fn cmd_init_catalog(args: InitCatalogArgs) -> anyhow::Result<()> {
    if args.path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", args.path.display());
    }
    let file = sample_catalog(&args.company);
    save_catalog(&file, &args.path)?;
    println!("Wrote starter catalog for tenant {} to {}", file.tenant_id, args.path.display());
    Ok(())
}

fn read_request(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin()).context("read request from stdin");
    }
    std::fs::read_to_string(path).with_context(|| format!("read request {}", path.display()))
}

/// Parse `"<width>x<height>"` in millimeters.
fn parse_format(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| format!("expected <width>x<height>, got '{}'", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && *n > 0.0)
            .ok_or_else(|| format!("'{}' is not a positive number", v.trim()))
    };
    Ok((parse(w)?, parse(h)?))
}

/// Starter records with fixed ids so requests can reference them.
fn sample_catalog(company: &str) -> CatalogFile {
    let mut file = CatalogFile::new(TenantId::new(Uuid::from_u128(0x1)), company);
    let records = &mut file.records;

    records.materials = vec![
        Material::sheet(Uuid::from_u128(0x101), "Silk 170g", 700.0, 1000.0, 0.50),
        Material::sheet(Uuid::from_u128(0x102), "Uncoated 90g", 450.0, 320.0, 0.08),
        Material::roll(Uuid::from_u128(0x103), "Banner vinyl", 3.20),
    ];
    records.machines = vec![
        Machine::new(Uuid::from_u128(0x201), "Offset B2", 30.0, 500.0, 80.0),
        Machine::new(Uuid::from_u128(0x202), "Digital SRA3", 5.0, 1200.0, 35.0),
    ];
    records.finishings = vec![
        Finishing::new(Uuid::from_u128(0x301), "Matt laminate", 10.0, 0.05),
        Finishing::new(Uuid::from_u128(0x302), "Fold", 8.0, 0.02),
    ];
    records.labor_rates = vec![
        LaborRate::new(Uuid::from_u128(0x401), "Operator", 45.0),
        LaborRate::new(Uuid::from_u128(0x402), "Designer", 60.0),
    ];
    file
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("700x1000"), Ok((700.0, 1000.0)));
        assert_eq!(parse_format(" 210 X 297 "), Ok((210.0, 297.0)));
        assert_eq!(parse_format("85.5×55"), Ok((85.5, 55.0)));
        assert!(parse_format("700").is_err());
        assert!(parse_format("0x10").is_err());
        assert!(parse_format("ax10").is_err());
    }

    #[test]
    fn test_sample_catalog_is_valid() {
        let file = sample_catalog("Test");
        assert!(file.records.validate().is_ok());
        assert_eq!(file.records.materials.len(), 3);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(ErrorKind::Validation), 2);
        assert_eq!(exit_code(ErrorKind::NotFound), 3);
        assert_eq!(exit_code(ErrorKind::Conflict), 4);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "quote_cli",
            "estimate",
            "--catalog",
            "pricelist.json",
            "--request",
            "job.json",
            "--waste-percent",
            "5",
        ])
        .unwrap();
        match cli.cmd {
            Command::Estimate(args) => {
                assert_eq!(args.waste_percent, Some(5.0));
                assert_eq!(args.request, PathBuf::from("job.json"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_estimate_prices_the_catalog_tenant_only() {
        let parsed = Cli::try_parse_from([
            "quote_cli",
            "estimate",
            "--catalog",
            "pricelist.json",
            "--tenant",
            "00000000-0000-0000-0000-000000000002",
        ]);
        assert!(parsed.is_err());
    }
}
