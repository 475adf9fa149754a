//! Per-field lookup index over a parsed catalog.
//!
//! [`CatalogIndex`] owns the records in load order (an arena) and four
//! value → bucket maps, one per filterable field. Buckets hold arena
//! positions in load order, so every record is stored once no matter how
//! many buckets reference it.
//!
//! The index also derives the distinct values per field ([`QueryOptions`])
//! used to populate selection lists. They are not used for querying.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::parser::CatalogParser;
use crate::collate::locale_cmp;
use crate::record::{CatalogField, ExoplanetRecord};

/// Distinct values per filterable field.
///
/// Years are newest first; the string lists are in dictionary order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    pub years: Vec<i32>,
    pub methods: Vec<String>,
    pub hostnames: Vec<String>,
    pub facilities: Vec<String>,
}

impl QueryOptions {
    /// Distinct values for `field`, rendered as strings.
    pub fn values(&self, field: CatalogField) -> Vec<String> {
        match field {
            CatalogField::Year => self.years.iter().map(i32::to_string).collect(),
            CatalogField::Method => self.methods.clone(),
            CatalogField::HostName => self.hostnames.clone(),
            CatalogField::Facility => self.facilities.clone(),
        }
    }
}

/// An exact-match condition on one indexed field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate<'a> {
    Year(i32),
    Method(&'a str),
    HostName(&'a str),
    Facility(&'a str),
}

impl Predicate<'_> {
    pub fn field(&self) -> CatalogField {
        match self {
            Predicate::Year(_) => CatalogField::Year,
            Predicate::Method(_) => CatalogField::Method,
            Predicate::HostName(_) => CatalogField::HostName,
            Predicate::Facility(_) => CatalogField::Facility,
        }
    }

    /// Case-sensitive equality for strings, numeric equality for the year.
    pub fn matches(&self, record: &ExoplanetRecord) -> bool {
        match *self {
            Predicate::Year(year) => record.discovery_year == year,
            Predicate::Method(method) => record.discovery_method == method,
            Predicate::HostName(host) => record.host_name == host,
            Predicate::Facility(facility) => record.discovery_facility == facility,
        }
    }
}

/// Records plus per-field buckets, built once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    records: Vec<ExoplanetRecord>,
    by_year: HashMap<i32, Vec<usize>>,
    by_method: HashMap<String, Vec<usize>>,
    by_host: HashMap<String, Vec<usize>>,
    by_facility: HashMap<String, Vec<usize>>,
    options: QueryOptions,
}

impl CatalogIndex {
    /// Indexes `records` in a single pass, preserving their order.
    ///
    /// Records with a zero year or an empty string field are left out of
    /// that field's bucket but stay in the arena.
    pub fn build(records: Vec<ExoplanetRecord>) -> Self {
        let mut by_year: HashMap<i32, Vec<usize>> = HashMap::new();
        let mut by_method: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_host: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_facility: HashMap<String, Vec<usize>> = HashMap::new();

        for (pos, record) in records.iter().enumerate() {
            if record.discovery_year != 0 {
                by_year.entry(record.discovery_year).or_default().push(pos);
            }
            push_text(&mut by_method, &record.discovery_method, pos);
            push_text(&mut by_host, &record.host_name, pos);
            push_text(&mut by_facility, &record.discovery_facility, pos);
        }

        let mut years: Vec<i32> = by_year.keys().copied().collect();
        years.sort_unstable_by(|a, b| b.cmp(a));

        let options = QueryOptions {
            years,
            methods: sorted_keys(&by_method),
            hostnames: sorted_keys(&by_host),
            facilities: sorted_keys(&by_facility),
        };

        debug!(
            records = records.len(),
            years = by_year.len(),
            methods = by_method.len(),
            hostnames = by_host.len(),
            facilities = by_facility.len(),
            "Built catalog indices"
        );

        Self {
            records,
            by_year,
            by_method,
            by_host,
            by_facility,
            options,
        }
    }

    /// Parses `text` and indexes the retained records.
    pub fn from_text(text: &str) -> Self {
        Self::build(CatalogParser::parse(text))
    }

    /// All records in load order.
    pub fn records(&self) -> &[ExoplanetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct values for every field.
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Distinct years, newest first.
    pub fn years(&self) -> &[i32] {
        &self.options.years
    }

    /// Distinct values of one string field in dictionary order. Empty for
    /// [`CatalogField::Year`]; use [`years`](Self::years).
    pub fn distinct_values(&self, field: CatalogField) -> &[String] {
        match field {
            CatalogField::Year => &[],
            CatalogField::Method => &self.options.methods,
            CatalogField::HostName => &self.options.hostnames,
            CatalogField::Facility => &self.options.facilities,
        }
    }

    /// Records whose field equals the predicate's value, in load order.
    ///
    /// Returns an empty vector for values that were never seen.
    pub fn bucket(&self, predicate: &Predicate<'_>) -> Vec<&ExoplanetRecord> {
        self.bucket_positions(predicate)
            .iter()
            .map(|&pos| &self.records[pos])
            .collect()
    }

    pub(crate) fn bucket_positions(&self, predicate: &Predicate<'_>) -> &[usize] {
        let bucket = match *predicate {
            Predicate::Year(year) => self.by_year.get(&year),
            Predicate::Method(method) => self.by_method.get(method),
            Predicate::HostName(host) => self.by_host.get(host),
            Predicate::Facility(facility) => self.by_facility.get(facility),
        };
        bucket.map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn record_at(&self, pos: usize) -> &ExoplanetRecord {
        &self.records[pos]
    }
}

fn push_text(map: &mut HashMap<String, Vec<usize>>, value: &str, pos: usize) {
    if value.is_empty() {
        return;
    }
    match map.get_mut(value) {
        Some(bucket) => bucket.push(pos),
        None => {
            map.insert(value.to_string(), vec![pos]);
        }
    }
}

fn sorted_keys(map: &HashMap<String, Vec<usize>>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort_by(|a, b| locale_cmp(a, b));
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(name: &str, host: &str, method: &str, year: i32, facility: &str) -> ExoplanetRecord {
        ExoplanetRecord {
            name: name.to_string(),
            host_name: host.to_string(),
            discovery_method: method.to_string(),
            discovery_year: year,
            discovery_facility: facility.to_string(),
            orbital_period_days: None,
            radius_earth: None,
            mass_earth: None,
            distance_parsecs: None,
        }
    }

    fn sample_index() -> CatalogIndex {
        CatalogIndex::build(vec![
            make_record("a", "Kepler-1", "Transit", 2010, "Kepler"),
            make_record("b", "HD 1", "Radial Velocity", 1999, "La Silla"),
            make_record("c", "Kepler-1", "Transit", 2012, "Kepler"),
            make_record("d", "kepler-9", "Transit", 2010, "Kepler"),
            make_record("e", "HD 1", "imaging", 2012, "Gemini"),
        ])
    }

    fn names(records: &[&ExoplanetRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_bucket_preserves_load_order() {
        let index = sample_index();
        assert_eq!(
            names(&index.bucket(&Predicate::Method("Transit"))),
            vec!["a", "c", "d"]
        );
        assert_eq!(names(&index.bucket(&Predicate::Year(2012))), vec!["c", "e"]);
    }

    #[test]
    fn test_bucket_unseen_value_is_empty() {
        let index = sample_index();
        assert!(index.bucket(&Predicate::Year(1800)).is_empty());
        assert!(index.bucket(&Predicate::HostName("kepler-1")).is_empty());
        assert!(index.bucket(&Predicate::Facility("")).is_empty());
    }

    #[test]
    fn test_every_record_in_its_buckets() {
        let index = sample_index();
        for record in index.records() {
            let predicates = [
                Predicate::Year(record.discovery_year),
                Predicate::Method(&record.discovery_method),
                Predicate::HostName(&record.host_name),
                Predicate::Facility(&record.discovery_facility),
            ];
            for predicate in predicates {
                assert!(
                    index.bucket(&predicate).contains(&record),
                    "{} missing from {:?}",
                    record.name,
                    predicate
                );
            }
        }
    }

    #[test]
    fn test_years_descending() {
        let index = sample_index();
        assert_eq!(index.years(), &[2012, 2010, 1999]);
    }

    #[test]
    fn test_string_options_dictionary_order() {
        let index = sample_index();
        assert_eq!(
            index.distinct_values(CatalogField::Method),
            &["imaging", "Radial Velocity", "Transit"]
        );
        assert_eq!(
            index.distinct_values(CatalogField::HostName),
            &["HD 1", "Kepler-1", "kepler-9"]
        );
        assert_eq!(
            index.distinct_values(CatalogField::Facility),
            &["Gemini", "Kepler", "La Silla"]
        );
        assert!(index.distinct_values(CatalogField::Year).is_empty());
    }

    #[test]
    fn test_options_values_as_strings() {
        let index = sample_index();
        assert_eq!(
            index.options().values(CatalogField::Year),
            vec!["2012", "2010", "1999"]
        );
    }

    #[test]
    fn test_empty_index() {
        let index = CatalogIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.options(), &QueryOptions::default());
        assert!(index.bucket(&Predicate::Year(2010)).is_empty());
    }

    #[test]
    fn test_zero_year_not_bucketed() {
        let index = CatalogIndex::build(vec![make_record("z", "H", "Transit", 0, "F")]);
        assert_eq!(index.len(), 1);
        assert!(index.years().is_empty());
        assert!(index.bucket(&Predicate::Year(0)).is_empty());
        assert_eq!(index.bucket(&Predicate::HostName("H")).len(), 1);
    }

    #[test]
    fn test_options_serialize() {
        let index = sample_index();
        let json = serde_json::to_value(index.options()).unwrap();
        assert_eq!(json["years"][0], 2012);
        assert_eq!(json["facilities"][1], "Kepler");
    }

    #[test]
    fn test_from_text() {
        let text = "pl_name,hostname,discoverymethod,disc_year,disc_facility,pl_orbper,pl_rade,pl_bmasse,sy_dist\n\
                    Kepler-1b,Kepler-1,Transit,2010,Kepler,10.5,1.2,,150\n";
        let index = CatalogIndex::from_text(text);
        assert_eq!(index.len(), 1);
        assert_eq!(index.years(), &[2010]);
    }
}
