//! Command implementations for the sweep-catalog CLI
//!
//! Each command runs one library query against the configured data root
//! and prints the result, either as a colored listing or as JSON shaped like
//! the web API payloads.

use crate::cli::args::{Args, Commands, OutputFormat};
use crate::config::Config;
use crate::index::{list_elements, list_files, list_types};
use crate::models::{DataFile, TimeSeries};
use crate::reader::read_timeseries;
use crate::report::{
    ChartData, ElementSummary, SeriesSummary, chart_data, search_summary, series_overview,
};
use anyhow::{Context, Result, bail};
use colored::*;
use serde_json::json;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info};

/// Main command runner
///
/// 1. Set up logging
/// 2. Load layered configuration (defaults -> DATA_ROOT -> --root)
/// 3. Run the query and print its result
pub fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    let Some(command) = args.command.clone() else {
        bail!("No command given");
    };

    let config = Config::load_layered(args.root.clone()).context("Invalid configuration")?;
    let root = config.data_root.as_path();
    info!("Using data root: {}", root.display());

    let output = match command {
        Commands::Types => {
            let types = sorted(list_types(root));
            match args.format {
                OutputFormat::Json => to_json(&json!({ "types": types }))?,
                OutputFormat::Human => {
                    render_names(&format!("Data types in {}", root.display()), &types)
                }
            }
        }
        Commands::Elements { data_type } => {
            let elements = sorted(list_elements(root, &data_type));
            match args.format {
                OutputFormat::Json => {
                    to_json(&json!({ "type": data_type, "elements": elements }))?
                }
                OutputFormat::Human => {
                    render_names(&format!("Elements under {data_type}"), &elements)
                }
            }
        }
        Commands::Files { data_type, element } => {
            let mut files = list_files(root, &data_type, &element);
            files.sort_by(|a, b| a.name.cmp(&b.name));
            match args.format {
                OutputFormat::Json => to_json(&files)?,
                OutputFormat::Human => render_files(&data_type, &element, &files),
            }
        }
        Commands::Series { data_type, element } => {
            let series = series_overview(root, &data_type, &element, &config.candidates);
            match args.format {
                OutputFormat::Json => to_json(&json!({
                    "type": data_type,
                    "element": element,
                    "series": series,
                }))?,
                OutputFormat::Human => render_series(&data_type, &element, &series),
            }
        }
        Commands::Chart {
            data_type,
            element,
            concentration,
        } => {
            let Some(chart) =
                chart_data(root, &data_type, &element, &concentration, &config.candidates)
            else {
                bail!("No data found for {element} at {concentration}% concentration");
            };
            match args.format {
                OutputFormat::Json => to_json(&chart)?,
                OutputFormat::Human => render_chart(&chart),
            }
        }
        Commands::Read { file } => {
            let series = read_timeseries(&file, &config.candidates)?;
            match args.format {
                OutputFormat::Json => to_json(&series)?,
                OutputFormat::Human => render_timeseries(&file, &series),
            }
        }
        Commands::Search { query } => {
            let hits = search_summary(root, &query);
            match args.format {
                OutputFormat::Json => to_json(&hits)?,
                OutputFormat::Human => render_search(&query, &hits),
            }
        }
        Commands::Init => {
            let created = config.ensure_layout()?;
            match args.format {
                OutputFormat::Json => to_json(&json!({
                    "root": config.data_root,
                    "types": created,
                }))?,
                OutputFormat::Human => {
                    let names: Vec<String> =
                        created.iter().map(|p| p.display().to_string()).collect();
                    render_names(&format!("Initialized {}", root.display()), &names)
                }
            }
        }
    };

    print!("{output}");
    Ok(())
}

/// Set up logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sweep_catalog={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort_by_key(|n| n.to_lowercase());
    names
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    out.push('\n');
    Ok(out)
}

// ---------------------------------------------------------------------------
// Human-readable rendering
// ---------------------------------------------------------------------------

fn heading(title: &str) -> String {
    format!("{}\n", title.bright_green().bold())
}

fn render_names(title: &str, names: &[String]) -> String {
    let mut out = heading(title);
    if names.is_empty() {
        let _ = writeln!(out, "  {}", "(none)".bright_black());
    }
    for name in names {
        let _ = writeln!(out, "  {}", name.bright_cyan());
    }
    out
}

fn render_files(data_type: &str, element: &str, files: &[DataFile]) -> String {
    let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
    render_names(&format!("Data files in {data_type}/{element}"), &names)
}

pub(crate) fn render_series(data_type: &str, element: &str, series: &[SeriesSummary]) -> String {
    let mut out = heading(&format!("Experiments for {element} ({data_type})"));
    if series.is_empty() {
        let _ = writeln!(out, "  {}", "(none)".bright_black());
    }

    for entry in series {
        let pairing = if entry.has_both {
            "pair".bright_green()
        } else {
            "single".yellow()
        };
        let _ = write!(
            out,
            "  {} [{}] heating: {}  cooling: {}",
            entry.concentration.bright_yellow().bold(),
            pairing,
            entry.heating_file.as_deref().unwrap_or("-"),
            entry.cooling_file.as_deref().unwrap_or("-"),
        );

        match (&entry.y_label, entry.sample_points, &entry.error) {
            (_, _, Some(error)) => {
                let _ = write!(out, "  {}", error.red());
            }
            (Some(label), Some(points), None) => {
                let detail = format!("({label}, {points} points)");
                let _ = write!(out, "  {}", detail.bright_black());
            }
            _ => {}
        }
        out.push('\n');
    }
    out
}

pub(crate) fn render_chart(chart: &ChartData) -> String {
    let mut out = heading(&format!(
        "{} {} at {} ({})",
        chart.element, chart.y_label, chart.concentration, chart.data_type
    ));
    if chart.curves.is_empty() {
        let _ = writeln!(out, "  {}", "no heating or cooling curves".bright_black());
    }

    for curve in &chart.curves {
        match (&curve.data, &curve.error) {
            (Some(points), _) => {
                let range = match (points.first(), points.last()) {
                    (Some(first), Some(last)) => {
                        format!("T {} .. {}", first.temperature, last.temperature)
                    }
                    _ => "empty".to_string(),
                };
                let _ = writeln!(
                    out,
                    "  {}: {} points, {}",
                    curve.label.bright_cyan(),
                    points.len(),
                    range
                );
            }
            (None, Some(error)) => {
                let _ = writeln!(out, "  {}: {}", curve.label.bright_cyan(), error.red());
            }
            (None, None) => {}
        }
    }
    out
}

fn render_timeseries(path: &Path, series: &TimeSeries) -> String {
    let mut out = heading(&format!(
        "{} ({} points)",
        path.display(),
        series.points.len()
    ));
    let _ = writeln!(out, "  {}\t{}", "temperature".bold(), series.value_label.bold());
    for point in &series.points {
        let _ = writeln!(out, "  {}\t{}", point.temperature, point.value);
    }
    out
}

pub(crate) fn render_search(query: &str, hits: &[ElementSummary]) -> String {
    let title = if query.trim().is_empty() {
        "All elements".to_string()
    } else {
        format!("Elements matching '{}'", query.trim())
    };
    let mut out = heading(&title);
    if hits.is_empty() {
        let _ = writeln!(out, "  {}", "(none)".bright_black());
    }

    for hit in hits {
        let types: Vec<String> = hit
            .types
            .iter()
            .map(|t| format!("{} ({})", t.data_type, t.file_count))
            .collect();
        let _ = writeln!(
            out,
            "  {}  {}",
            hit.element.bright_cyan().bold(),
            types.join(", ")
        );
    }
    out
}
