use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use exoplanet_catalog::query::{QueryFilter, SortedResults};
use exoplanet_catalog::{
    format_measurement, CatalogField, Column, ExoplanetRecord, ExoplanetService, LoadStatus,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "query-exoplanets")]
#[command(about = "Filter and sort an exoplanet catalog")]
#[command(version)]
struct Cli {
    /// Path to the catalog CSV file
    #[arg(long)]
    catalog: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print record and distinct-value counts
    Info,
    /// List the distinct values available for filtering
    Options {
        /// Only list this field (year, method, hostname, facility)
        #[arg(long)]
        field: Option<CatalogField>,
    },
    /// Search with one or more exact-match filters
    Search {
        /// Discovery year
        #[arg(long)]
        year: Option<i32>,
        /// Discovery method, e.g. "Transit"
        #[arg(long)]
        method: Option<String>,
        /// Host star name
        #[arg(long)]
        hostname: Option<String>,
        /// Discovery facility
        #[arg(long)]
        facility: Option<String>,
        /// Sort column; repeat to click the same column again
        /// (ascending, then descending, then original order)
        #[arg(long = "sort")]
        sort: Vec<Column>,
        /// Maximum number of rows to print
        #[arg(long)]
        limit: Option<usize>,
        /// Print query timing
        #[arg(long)]
        timing: bool,
        /// Add an archive overview link per row (table output)
        #[arg(long)]
        links: bool,
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let service = ExoplanetService::new();
    if let LoadStatus::Failed(reason) = service.load_path(&cli.catalog).await {
        bail!("Failed to load catalog {:?}: {}", cli.catalog, reason);
    }

    match cli.command {
        Commands::Info => {
            let catalog = service.catalog();
            let options = catalog.options();
            println!("Catalog: {}", cli.catalog.display());
            println!("Records: {}", catalog.len());
            println!("Discovery years: {}", options.years.len());
            println!("Discovery methods: {}", options.methods.len());
            println!("Host names: {}", options.hostnames.len());
            println!("Discovery facilities: {}", options.facilities.len());
        }
        Commands::Options { field } => {
            let options = service.query_options();
            let fields = match field {
                Some(field) => vec![field],
                None => CatalogField::ALL.to_vec(),
            };
            for field in fields {
                let values = options.values(field);
                println!("{} ({}):", field, values.len());
                for value in values {
                    println!("  {}", value);
                }
            }
        }
        Commands::Search {
            year,
            method,
            hostname,
            facility,
            sort,
            limit,
            timing,
            links,
            format,
        } => {
            let filter = QueryFilter {
                year,
                method,
                hostname,
                facility,
            };
            if filter.is_empty() {
                bail!("Please select at least one query parameter");
            }

            let start = if timing { Some(Instant::now()) } else { None };

            let mut view = SortedResults::new(service.search(&filter));
            for column in sort {
                view.toggle(column);
            }

            if let Some(start_time) = start {
                let elapsed = start_time.elapsed();
                eprintln!(
                    "Query completed in {:.2} ms",
                    elapsed.as_secs_f64() * 1000.0
                );
            }

            let rows = match limit {
                Some(limit) => &view.sorted()[..limit.min(view.len())],
                None => view.sorted(),
            };

            match format {
                OutputFormat::Table => print_table(rows, view.len(), links),
                OutputFormat::Json => print_json(rows)?,
                OutputFormat::Csv => print_csv(rows),
            }
        }
    }

    Ok(())
}

fn print_table(rows: &[ExoplanetRecord], total: usize, links: bool) {
    if rows.is_empty() {
        println!("No exoplanets found matching the search criteria.");
        return;
    }

    println!(
        "{:<24} {:<20} {:<30} {:>4} {:<36} {:>12} {:>8} {:>10} {:>10}{}",
        "Planet",
        "Host",
        "Method",
        "Year",
        "Facility",
        "Period (d)",
        "R (R⊕)",
        "M (M⊕)",
        "Dist (pc)",
        if links { "  Archive" } else { "" }
    );
    for r in rows {
        let link = if links {
            format!("  {}", r.archive_url())
        } else {
            String::new()
        };
        println!(
            "{:<24} {:<20} {:<30} {:>4} {:<36} {:>12} {:>8} {:>10} {:>10}{}",
            r.name,
            r.host_name,
            r.discovery_method,
            r.discovery_year,
            r.discovery_facility,
            format_measurement(r.orbital_period_days, 2),
            format_measurement(r.radius_earth, 2),
            format_measurement(r.mass_earth, 2),
            format_measurement(r.distance_parsecs, 2),
            link,
        );
    }

    println!("\nTotal results: {}", total);
}

fn print_json(rows: &[ExoplanetRecord]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(rows).context("Failed to serialize results")?;
    println!("{}", json);
    Ok(())
}

fn print_csv(rows: &[ExoplanetRecord]) {
    let header: Vec<&str> = Column::ALL.iter().map(|c| c.header_name()).collect();
    println!("{}", header.join(","));
    for r in rows {
        println!(
            "{},{},{},{},{},{},{},{},{}",
            csv_text(&r.name),
            csv_text(&r.host_name),
            csv_text(&r.discovery_method),
            r.discovery_year,
            csv_text(&r.discovery_facility),
            csv_number(r.orbital_period_days),
            csv_number(r.radius_earth),
            csv_number(r.mass_earth),
            csv_number(r.distance_parsecs),
        );
    }
}

fn csv_text(s: &str) -> String {
    if s.contains(',') {
        format!("\"{}\"", s)
    } else {
        s.to_string()
    }
}

fn csv_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
