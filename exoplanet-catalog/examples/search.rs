use exoplanet_catalog::query::{QueryFilter, SortedResults};
use exoplanet_catalog::{format_measurement, Column, ExoplanetService, LoadStatus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("Usage: search <exoplanets.csv>");

    let service = ExoplanetService::new();
    if let LoadStatus::Failed(reason) = service.load_path(&path).await {
        anyhow::bail!("Failed to load {}: {}", path, reason);
    }
    service.wait_ready().await;

    let options = service.query_options();
    println!(
        "{} records, {} years, {} methods, {} hosts, {} facilities",
        service.catalog().len(),
        options.years.len(),
        options.methods.len(),
        options.hostnames.len(),
        options.facilities.len(),
    );

    let filter = QueryFilter::new()
        .with_method("Transit")
        .with_facility("Kepler");
    let mut view = SortedResults::new(service.search(&filter));

    // Two clicks: longest orbital period first, unmeasured planets last.
    view.toggle(Column::OrbitalPeriod);
    view.toggle(Column::OrbitalPeriod);

    println!("\n{} Kepler transit planets:\n", view.len());
    for r in view.sorted().iter().take(20) {
        println!(
            "  {:>20}  {:<16}  {}  period {:>10} d",
            r.name,
            r.host_name,
            r.discovery_year,
            format_measurement(r.orbital_period_days, 3),
        );
    }

    Ok(())
}
