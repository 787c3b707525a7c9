use anyhow::{bail, Context, Result};
use chime_params::{
    arguments::ARGUMENTS,
    catalog::{Catalog, Issue, ParameterGroup},
    config::{Config, OutputFormat, CONFIG_FILE},
};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use serde::Serialize;
use simple_logger::SimpleLogger;
use std::{fs, io, path::PathBuf};

/// Inspect the model parameter catalog.
#[derive(Parser, Debug)]
#[command(name = "chime-catalog", version)]
struct Cli {
    /// Configuration file.
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Catalog document to use instead of the configured one.
    #[arg(long, env = "CHIME_CATALOG")]
    catalog: Option<PathBuf>,

    /// Output format, overriding the configuration.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List parameter groups.
    Groups,
    /// List the parameters of one group.
    Show { group: String },
    /// Show one parameter by its stable key.
    Get { param_key: String },
    /// Check a catalog document and report every integrity issue.
    Check { file: Option<PathBuf> },
    /// Count parameters per data type and distribution.
    Summary,
    /// Write the catalog as a flat CSV table.
    Csv,
    /// Pretty-print the catalog document.
    Json,
    /// Coerce a raw value with the type of the given parameter.
    Parse { param_key: String, value: String },
    /// List the forecasting tool's command-line arguments.
    Args,
}

#[derive(Serialize)]
struct GroupRow<'a> {
    key: &'a str,
    label: &'a str,
    parameters: usize,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_group(key: &str, group: &ParameterGroup) {
    println!("{} ({})", group.label(), key);
    for (name, def) in group {
        println!(
            "  {:<20} {:<18} {:<6} {:<9} {}",
            name,
            def.param_key(),
            def.data_type(),
            def.distribution(),
            def.label()
        );
    }
}

fn check(path: Option<PathBuf>, cfg: &Config) -> Result<()> {
    let path = match path.or_else(|| cfg.catalog.clone()) {
        Some(path) => path,
        None => bail!("no catalog file given and none configured"),
    };
    let data = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let catalog = Catalog::parse_unchecked(&data).with_context(|| format!("parsing {}", path.display()))?;
    let issues = catalog.issues();
    print!("{}", issue_report(&issues, cfg.format)?);
    if !issues.is_empty() {
        bail!("{}: {} issue(s) found", path.display(), issues.len());
    }
    println!("{}: {} groups, {} parameters, ok", path.display(), catalog.group_count(), catalog.len());
    Ok(())
}

/// Issues rendered for stdout, one per line in text mode.
fn issue_report(issues: &[Issue], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(issues)?),
        OutputFormat::Text => issues.iter().map(|issue| format!("{}\n", issue)).collect(),
    })
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(path) = cli.catalog {
        cfg.catalog = Some(path);
    }
    match cli.format {
        Some(Format::Text) => cfg.format = OutputFormat::Text,
        Some(Format::Json) => cfg.format = OutputFormat::Json,
        None => {}
    }

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        cfg.level_filter().with_context(|| format!("in {}", cli.config.display()))?
    };
    SimpleLogger::new().with_level(level).init()?;
    info!("{:?}", cfg);

    // Checking reports every issue, so it must not go through validated loading.
    let catalog = match &cli.command {
        Commands::Check { file } => return check(file.clone(), &cfg),
        _ => cfg.catalog().context("loading parameter catalog")?,
    };
    let json = cfg.format == OutputFormat::Json;

    match cli.command {
        Commands::Groups => {
            let rows: Vec<_> = catalog
                .groups()
                .map(|(key, group)| GroupRow {
                    key,
                    label: group.label(),
                    parameters: group.len(),
                })
                .collect();
            if json {
                print_json(&rows)?;
            } else {
                for row in rows {
                    println!("{:<24} {:<28} {}", row.key, row.label, row.parameters);
                }
            }
        }
        Commands::Show { group } => {
            let params = match catalog.group(&group) {
                Some(params) => params,
                None => bail!("unknown group {:?}", group),
            };
            if json {
                print_json(params)?;
            } else {
                print_group(&group, params);
            }
        }
        Commands::Get { param_key } => {
            let entry = match catalog.by_param_key(&param_key) {
                Some(entry) => entry,
                None => bail!("no parameter with key {:?}", param_key),
            };
            if json {
                print_json(&entry)?;
            } else {
                let def = entry.definition;
                println!("{}", entry.path());
                println!("  label:        {}", def.label());
                println!("  param_key:    {}", def.param_key());
                println!("  dataType:     {}", def.data_type());
                println!("  distribution: {}", def.distribution());
                println!("  title:        {}", def.title());
            }
        }
        Commands::Summary => {
            let summary = catalog.summary();
            if json {
                print_json(&summary)?;
            } else {
                println!("groups:      {}", summary.groups);
                println!("parameters:  {}", summary.definitions);
                for (dt, n) in &summary.by_data_type {
                    println!("  {:<10} {}", dt, n);
                }
                for (d, n) in &summary.by_distribution {
                    println!("  {:<10} {}", d, n);
                }
            }
        }
        Commands::Csv => catalog.write_csv(io::stdout().lock())?,
        Commands::Json => println!("{}", catalog.to_json_pretty()?),
        Commands::Parse { param_key, value } => {
            let entry = match catalog.by_param_key(&param_key) {
                Some(entry) => entry,
                None => bail!("no parameter with key {:?}", param_key),
            };
            let parsed = entry
                .definition
                .parse_value(&value)
                .with_context(|| format!("{} expects {}", param_key, entry.definition.data_type()))?;
            if json {
                print_json(&parsed)?;
            } else {
                println!("{} = {} ({})", param_key, parsed, parsed.data_type());
            }
        }
        Commands::Args => {
            if json {
                print_json(ARGUMENTS)?;
            } else {
                for arg in ARGUMENTS {
                    let bounds = match (arg.min, arg.max) {
                        (Some(lo), Some(hi)) => format!("[{}, {}]", lo, hi),
                        (Some(lo), None) => format!(">= {}", lo),
                        (None, Some(hi)) => format!("<= {}", hi),
                        (None, None) => String::new(),
                    };
                    let req = if arg.required { "required" } else { "" };
                    println!("{:<28} {:<6} {:<16} {:<9} {}", arg.flag(), arg.kind, bounds, req, arg.help);
                }
            }
        }
        Commands::Check { .. } => {}
    }
    Ok(())
}
