//! Exoplanet record model and column naming.
//!
//! An [`ExoplanetRecord`] is one planet row from the catalog. Five fields are
//! required (a row missing any of them never becomes a record) and four
//! measurements are optional. Absent measurements are `None`, never `0.0` or
//! NaN, so the sorter can tell "not measured" apart from a real zero.
//!
//! Columns are named by their catalog header names (`pl_name`, `disc_year`,
//! ...) through [`Column`]; the four filterable fields are [`CatalogField`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collate::locale_cmp;
use crate::errors::CatalogError;

const ARCHIVE_OVERVIEW_URL: &str = "https://exoplanetarchive.ipac.caltech.edu/overview/";

/// A single planet entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExoplanetRecord {
    /// Planet name (`pl_name`). Used as the row label; may repeat.
    pub name: String,
    /// Host star name (`hostname`).
    pub host_name: String,
    /// Discovery method (`discoverymethod`), e.g. "Transit".
    pub discovery_method: String,
    /// Discovery year (`disc_year`).
    pub discovery_year: i32,
    /// Discovery facility (`disc_facility`).
    pub discovery_facility: String,
    /// Orbital period in days (`pl_orbper`).
    pub orbital_period_days: Option<f64>,
    /// Planet radius in Earth radii (`pl_rade`).
    pub radius_earth: Option<f64>,
    /// Planet mass in Earth masses (`pl_bmasse`).
    pub mass_earth: Option<f64>,
    /// Distance to the system in parsecs (`sy_dist`).
    pub distance_parsecs: Option<f64>,
}

impl ExoplanetRecord {
    /// Returns `true` if host name, method, facility are non-empty and the
    /// year is non-zero. The planet name is not required.
    pub fn has_required_fields(&self) -> bool {
        !self.host_name.is_empty()
            && self.discovery_year != 0
            && !self.discovery_method.is_empty()
            && !self.discovery_facility.is_empty()
    }

    /// The NASA Exoplanet Archive overview page for this planet's host.
    pub fn archive_url(&self) -> String {
        format!("{}{}", ARCHIVE_OVERVIEW_URL, encode_uri_component(&self.host_name))
    }

    /// Returns the value shown in `column`, or `None` if it is absent.
    pub fn value(&self, column: Column) -> Option<ColumnValue<'_>> {
        match column {
            Column::Name => Some(ColumnValue::Text(&self.name)),
            Column::HostName => Some(ColumnValue::Text(&self.host_name)),
            Column::DiscoveryMethod => Some(ColumnValue::Text(&self.discovery_method)),
            Column::DiscoveryYear => Some(ColumnValue::Number(self.discovery_year as f64)),
            Column::DiscoveryFacility => Some(ColumnValue::Text(&self.discovery_facility)),
            Column::OrbitalPeriod => self.orbital_period_days.map(ColumnValue::Number),
            Column::Radius => self.radius_earth.map(ColumnValue::Number),
            Column::Mass => self.mass_earth.map(ColumnValue::Number),
            Column::Distance => self.distance_parsecs.map(ColumnValue::Number),
        }
    }
}

impl AsRef<ExoplanetRecord> for ExoplanetRecord {
    fn as_ref(&self) -> &ExoplanetRecord {
        self
    }
}

/// A present column value, borrowed from its record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl ColumnValue<'_> {
    /// Text compares with [`locale_cmp`], numbers numerically. Values of
    /// different kinds never share a column; they compare equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => locale_cmp(a, b),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        }
    }
}

/// A displayed column, named by its catalog header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    HostName,
    DiscoveryMethod,
    DiscoveryYear,
    DiscoveryFacility,
    OrbitalPeriod,
    Radius,
    Mass,
    Distance,
}

impl Column {
    /// All columns in catalog header order.
    pub const ALL: [Column; 9] = [
        Column::Name,
        Column::HostName,
        Column::DiscoveryMethod,
        Column::DiscoveryYear,
        Column::DiscoveryFacility,
        Column::OrbitalPeriod,
        Column::Radius,
        Column::Mass,
        Column::Distance,
    ];

    /// Catalog header name for this column.
    pub fn header_name(self) -> &'static str {
        match self {
            Column::Name => "pl_name",
            Column::HostName => "hostname",
            Column::DiscoveryMethod => "discoverymethod",
            Column::DiscoveryYear => "disc_year",
            Column::DiscoveryFacility => "disc_facility",
            Column::OrbitalPeriod => "pl_orbper",
            Column::Radius => "pl_rade",
            Column::Mass => "pl_bmasse",
            Column::Distance => "sy_dist",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_name())
    }
}

impl FromStr for Column {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        // pl_masse is the mass column's name in the results table.
        if name == "pl_masse" {
            return Ok(Column::Mass);
        }
        Column::ALL
            .into_iter()
            .find(|c| c.header_name() == name)
            .ok_or_else(|| CatalogError::UnknownColumn(s.to_string()))
    }
}

/// One of the four indexed, filterable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogField {
    Year,
    Method,
    HostName,
    Facility,
}

impl CatalogField {
    /// Fields in seed precedence order.
    pub const ALL: [CatalogField; 4] = [
        CatalogField::Year,
        CatalogField::Method,
        CatalogField::HostName,
        CatalogField::Facility,
    ];

    pub fn column(self) -> Column {
        match self {
            CatalogField::Year => Column::DiscoveryYear,
            CatalogField::Method => Column::DiscoveryMethod,
            CatalogField::HostName => Column::HostName,
            CatalogField::Facility => Column::DiscoveryFacility,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CatalogField::Year => "year",
            CatalogField::Method => "method",
            CatalogField::HostName => "hostname",
            CatalogField::Facility => "facility",
        }
    }
}

impl fmt::Display for CatalogField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CatalogField {
    type Err = CatalogError;

    /// Accepts the short labels (`year`, `method`, ...) or the header names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        CatalogField::ALL
            .into_iter()
            .find(|f| f.label() == name || f.column().header_name() == name)
            .ok_or_else(|| CatalogError::UnknownColumn(s.to_string()))
    }
}

/// Percent-encodes everything except ASCII alphanumerics and `-_.!~*'()`.
fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'!' | b'~' | b'*'
            | b'\'' | b'(' | b')' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

/// Formats an optional measurement with fixed decimals, or `N/A` if absent.
pub fn format_measurement(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "N/A".to_string(),
    }
}
