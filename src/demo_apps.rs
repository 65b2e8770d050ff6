//! Reusable demo runners shared by the `demos/` wrappers.
//!
//! These take the place of the real application shell: they read
//! already-fetched registry pages from disk, run the pipeline, and print a
//! short summary. Network access, credentials, and operator prompts are
//! deliberately absent.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{error::ErrorKind, Parser, ValueEnum};
use serde_json::Value;

use crate::config::RunConfig;
use crate::enrich::enrich;
use crate::export::{write_json, CompanyRow};
use crate::filter::CodeMatch;
use crate::source::contracts::ContractsPayloadSource;
use crate::source::sanctions::SanctionsPayloadSource;
use crate::source::RecordSource;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CodeMatchArg {
    Exact,
    Prefix,
}

impl From<CodeMatchArg> for CodeMatch {
    fn from(value: CodeMatchArg) -> Self {
        match value {
            CodeMatchArg::Exact => CodeMatch::Exact,
            CodeMatchArg::Prefix => CodeMatch::Prefix,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "enrich_demo",
    disable_help_subcommand = true,
    about = "Offline enrichment pass over fetched registry pages",
    long_about = "Reconcile a fetched sanctions-registry page file and a fetched \
contracts-registry page file into a deduplicated, filtered company dataset."
)]
struct EnrichDemoCli {
    #[arg(long, value_name = "PATH", help = "JSON file with sanctions search pages")]
    sanctions_pages: PathBuf,
    #[arg(long, value_name = "PATH", help = "JSON file with contracts result pages")]
    contracts_pages: PathBuf,
    #[arg(
        long = "product-code",
        value_name = "OKPD2",
        help = "OKPD2 code to keep, repeat as needed; none keeps every code"
    )]
    product_codes: Vec<String>,
    #[arg(
        long = "exclude-keyword",
        value_name = "WORD",
        help = "Description keyword that drops a contract item, repeat as needed"
    )]
    excluded_keywords: Vec<String>,
    #[arg(long, value_enum, help = "OKPD2 comparison policy, exact unless given")]
    code_match: Option<CodeMatchArg>,
    #[arg(long, value_name = "PATH", help = "Write enriched rows to this JSON file")]
    output: Option<PathBuf>,
}

/// Run the offline enrichment demo. Returns after printing a summary.
pub fn run_enrich_demo<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    init_tracing();
    let Some(cli) = parse_cli::<EnrichDemoCli, _>(
        std::iter::once("enrich_demo".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let config = RunConfig {
        product_codes: cli.product_codes,
        excluded_description_keywords: cli.excluded_keywords,
        code_match: cli.code_match.map(Into::into).unwrap_or_default(),
        ..RunConfig::default()
    };

    let sanctions =
        SanctionsPayloadSource::new(load_pages(&cli.sanctions_pages)?, config.sanctions_mapping());
    let contracts = ContractsPayloadSource::new(load_pages(&cli.contracts_pages)?);

    let result = enrich(
        sanctions.records()?,
        contracts.records()?,
        &config.filter_config(),
    )?;

    println!(
        "Resolved {} companies, {} still need a manual tax identifier.",
        result.records.len(),
        result.unresolved.len()
    );
    for record in &result.unresolved {
        println!("  needs INN: {}", record.name);
    }

    let rows: Vec<CompanyRow> = result.records.iter().map(CompanyRow::from_record).collect();
    for row in &rows {
        println!(
            "{} [{}]: {} contracts, {:.2} rub",
            row.name,
            row.inn.as_deref().unwrap_or("-"),
            row.contract_count,
            row.contract_total
        );
    }

    if let Some(output) = cli.output {
        write_json(&output, &rows)?;
        println!("Wrote {} rows to {}", rows.len(), output.display());
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "payload_mapping_demo",
    disable_help_subcommand = true,
    about = "Show how registry pages map onto company records"
)]
struct PayloadMappingCli {
    #[arg(long, value_name = "PATH", help = "JSON file with sanctions search pages")]
    sanctions_pages: PathBuf,
}

/// Run the payload-mapping demo: print each mapped record.
pub fn run_payload_mapping_demo<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    init_tracing();
    let Some(cli) = parse_cli::<PayloadMappingCli, _>(
        std::iter::once("payload_mapping_demo".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let config = RunConfig::default();
    let source =
        SanctionsPayloadSource::new(load_pages(&cli.sanctions_pages)?, config.sanctions_mapping());
    for record in source.records()? {
        let inn = record
            .inn
            .as_ref()
            .map(|inn| inn.as_str().to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{} [{}] aliases={}", record.name, inn, record.aliases.len());
    }
    Ok(())
}

/// Load one or many JSON pages from a file: either a single page object or
/// an array of pages.
fn load_pages(path: &PathBuf) -> Result<Vec<Value>, Box<dyn Error>> {
    let raw = fs::read_to_string(path)?;
    let parsed: Value = serde_json::from_str(&raw)?;
    Ok(match parsed {
        Value::Array(pages) => pages,
        page => vec![page],
    })
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
