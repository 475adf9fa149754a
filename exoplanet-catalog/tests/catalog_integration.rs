use std::io::Write;

use exoplanet_catalog::query::{sort_records, CatalogIndex, Predicate, QueryFilter, SortState};
use exoplanet_catalog::{CatalogParser, Column, ExoplanetRecord, ExoplanetService, LoadStatus};
use tempfile::NamedTempFile;

const ARCHIVE_EXPORT: &str = r#"# This file was produced by the NASA Exoplanet Archive
# Tue Oct 14 12:00:00 2025
#
# COLUMN pl_name:        Planet Name
# COLUMN hostname:       Host Name
#
pl_name,hostname,discoverymethod,disc_year,disc_facility,pl_orbper,pl_rade,pl_bmasse,sy_dist,sy_snum
Kepler-22 b,Kepler-22,Transit,2011,Kepler,289.8623,2.1,,194.97,1
Kepler-186 f,Kepler-186,Transit,2014,Kepler,129.9441,1.17,,177.59,1
51 Peg b,51 Peg,Radial Velocity,1995,Haute-Provence Observatory,4.2308,,150,15.47,1
TOI-700 d,TOI-700,Transit,2020,Transiting Exoplanet Survey Satellite (TESS),37.426,1.19,,31.13,1
HR 8799 b,HR 8799,Imaging,2008,"W. M. Keck Observatory, Mauna Kea",,,,41.24,1
# a comment between rows
Kepler-22 c,Kepler-22,Transit,2011,Kepler,,,,194.97,1
orphan b,,Transit,2011,Kepler,1.0,1.0,1.0,1.0,1
short b,Short,Transit,2011,Kepler,1.0,1.0,1.0,1.0
Kepler-62 f,Kepler-62,Transit,2013,Kepler,267.291,1.41,,300.87,1
"#;

fn write_catalog(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn names<R: AsRef<ExoplanetRecord>>(records: &[R]) -> Vec<String> {
    records.iter().map(|r| r.as_ref().name.clone()).collect()
}

#[test]
fn test_parse_archive_export() {
    let parsed = CatalogParser::try_parse(ARCHIVE_EXPORT).unwrap();
    assert_eq!(parsed.records.len(), 7);
    assert_eq!(parsed.stats.data_lines, 9);
    assert_eq!(parsed.stats.short_rows, 1);
    assert_eq!(parsed.stats.incomplete_rows, 1);

    let keck = parsed
        .records
        .iter()
        .find(|r| r.name == "HR 8799 b")
        .expect("quoted facility row should parse");
    assert_eq!(keck.discovery_facility, "W. M. Keck Observatory, Mauna Kea");
    assert_eq!(keck.orbital_period_days, None);
    assert_eq!(keck.distance_parsecs, Some(41.24));
}

#[test]
fn test_index_completeness() {
    let index = CatalogIndex::from_text(ARCHIVE_EXPORT);
    for record in index.records() {
        assert!(index
            .bucket(&Predicate::Year(record.discovery_year))
            .contains(&record));
        assert!(index
            .bucket(&Predicate::Method(&record.discovery_method))
            .contains(&record));
        assert!(index
            .bucket(&Predicate::HostName(&record.host_name))
            .contains(&record));
        assert!(index
            .bucket(&Predicate::Facility(&record.discovery_facility))
            .contains(&record));
    }
}

#[test]
fn test_query_options_ordering() {
    let index = CatalogIndex::from_text(ARCHIVE_EXPORT);
    let options = index.options();
    assert_eq!(options.years, vec![2020, 2014, 2013, 2011, 2008, 1995]);
    assert_eq!(
        options.methods,
        vec!["Imaging", "Radial Velocity", "Transit"]
    );
    assert_eq!(options.hostnames.first().map(String::as_str), Some("51 Peg"));
    assert_eq!(options.hostnames.last().map(String::as_str), Some("TOI-700"));
}

#[test]
fn test_search_then_sort_round() {
    let index = CatalogIndex::from_text(ARCHIVE_EXPORT);
    let hits = index.search(&QueryFilter::new().with_facility("Kepler"));
    assert_eq!(
        names(&hits),
        vec!["Kepler-22 b", "Kepler-186 f", "Kepler-22 c", "Kepler-62 f"]
    );

    let (asc, state) = sort_records(&hits, Column::OrbitalPeriod, SortState::Unsorted);
    assert_eq!(
        names(&asc),
        vec!["Kepler-186 f", "Kepler-62 f", "Kepler-22 b", "Kepler-22 c"]
    );

    let (desc, state) = sort_records(&hits, Column::OrbitalPeriod, state);
    assert_eq!(
        names(&desc),
        vec!["Kepler-22 b", "Kepler-62 f", "Kepler-186 f", "Kepler-22 c"]
    );

    let (cleared, state) = sort_records(&hits, Column::OrbitalPeriod, state);
    assert_eq!(state, SortState::Unsorted);
    assert_eq!(cleared, hits);
}

#[tokio::test]
async fn test_service_loads_file() {
    let file = write_catalog(ARCHIVE_EXPORT);
    let service = ExoplanetService::new();
    let mut ready = service.subscribe();
    assert!(!*ready.borrow());

    let status = service.load_path(file.path()).await;
    assert_eq!(status.records(), 7);
    assert!(*ready.borrow_and_update());

    let hits = service.search(&QueryFilter::new().with_year(2011).with_method("Transit"));
    assert_eq!(names(&hits), vec!["Kepler-22 b", "Kepler-22 c"]);
    assert!(service.search(&QueryFilter::new()).is_empty());
}

#[tokio::test]
async fn test_service_scenario_catalog() {
    let file = write_catalog(
        "pl_name,hostname,discoverymethod,disc_year,disc_facility,pl_orbper,pl_rade,pl_bmasse,sy_dist\n\
         Kepler-1b,Kepler-1,Transit,2010,Kepler,10.5,1.2,,150\n",
    );
    let service = ExoplanetService::new();
    service.load_path(file.path()).await;
    service.wait_ready().await;

    let hits = service.search(&QueryFilter::new().with_year(2010));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Kepler-1b");
    assert_eq!(hits[0].mass_earth, None);
    assert!(service
        .search(&QueryFilter::new().with_year(2011))
        .is_empty());
}

#[tokio::test]
async fn test_service_header_only_file() {
    let file = write_catalog("# comments only\n# nothing else\n");
    let service = ExoplanetService::new();
    let status = service.load_path(file.path()).await;
    assert!(matches!(status, LoadStatus::Failed(_)));
    assert!(service.is_ready());
    assert!(service.query_options().years.is_empty());
}
