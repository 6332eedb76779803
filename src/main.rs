use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use metric_overrides::services::VariableTemplateResolver;
use metric_overrides::settings::load_data_points;
use metric_overrides::{MetricDataPoint, OverrideListManager, Settings, Severity};

#[derive(Parser, Debug)]
#[command(name = "metric-overrides")]
#[command(about = "Apply per-metric display overrides to a batch of series")]
struct Args {
    /// Settings file with overrides and template variables (TOML, JSON or YAML)
    #[arg(short, long, default_value = "overrides.toml")]
    config: PathBuf,

    /// JSON array of data points to annotate
    #[arg(short, long, default_value = "metrics.json")]
    data: PathBuf,

    /// Write annotated data points here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Template variable as name=text (repeatable, takes precedence over the settings file)
    #[arg(long = "var", value_name = "NAME=TEXT", value_parser = parse_variable)]
    vars: Vec<(String, String)>,

    /// Print the metric names found in the data file and exit
    #[arg(long)]
    suggest: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_variable(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, text)) if !name.is_empty() => Ok((name.to_string(), text.to_string())),
        _ => Err(format!("expected NAME=TEXT, got {:?}", s)),
    }
}

fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing(args.verbose);

    let mut data = load_data_points(&args.data)
        .with_context(|| format!("Failed to load data points from {}", args.data.display()))?;
    if data.is_empty() {
        warn!(path = %args.data.display(), "No data points to annotate");
    }

    if args.suggest {
        let names: Vec<String> = data.iter().map(|p| p.name.clone()).collect();
        let manager = OverrideListManager::builder()
            .name_suggester(move || names.clone())
            .build(Vec::new());
        for name in manager.suggest_metric_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let settings = Settings::load(&args.config)
        .with_context(|| format!("Failed to load settings from {}", args.config.display()))?;

    let mut variables: BTreeMap<String, String> = settings.variables;
    variables.extend(args.vars);

    let manager = OverrideListManager::builder()
        .template_resolver(VariableTemplateResolver::from(variables))
        .build(settings.overrides);

    let matched = manager.apply_overrides(&mut data);
    log_summary(&data, matched);

    let json = serde_json::to_string_pretty(&data)?;
    match &args.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            file.write_all(json.as_bytes())?;
            info!(path = %path.display(), "Wrote annotated data points");
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn log_summary(data: &[MetricDataPoint], matched: usize) {
    let count = |level: Severity| {
        data.iter()
            .filter_map(|p| p.display.as_ref())
            .filter(|d| d.threshold_level == level)
            .count()
    };

    info!(
        total = data.len(),
        matched,
        ok = count(Severity::Ok),
        warning = count(Severity::Warning),
        critical = count(Severity::Critical),
        no_data = count(Severity::NoData),
        "Applied overrides"
    );
}
