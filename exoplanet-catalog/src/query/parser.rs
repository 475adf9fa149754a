//! Comma-separated exoplanet catalog parser.
//!
//! Handles the archive's CSV export: `#` metadata lines (anywhere, not only
//! at the top), a header row naming the columns, and data rows that may
//! contain double-quoted fields with embedded commas. Quotes only toggle
//! splitting and are dropped; there is no escaped-quote support. A leading
//! byte-order mark is ignored.
//!
//! Rows that are too short or lack a required field are dropped silently
//! and counted in [`ParseStats`].

use tracing::{debug, error, info};

use crate::errors::{CatalogError, CatalogResult};
use crate::record::{Column, ExoplanetRecord};

/// Rows with fewer fields than this are discarded before extraction.
///
/// Catalogs whose header is narrower than this require one field per
/// header column instead.
pub const MIN_ROW_FIELDS: usize = 10;

/// Counters collected while parsing one catalog text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Non-comment lines after the header.
    pub data_lines: usize,
    /// Rows dropped for having too few fields.
    pub short_rows: usize,
    /// Rows dropped for a missing host, method, facility or year.
    pub incomplete_rows: usize,
    /// Rows kept as records.
    pub retained: usize,
}

/// Records parsed from one catalog text, in file order.
#[derive(Debug, Clone, Default)]
pub struct ParsedCatalog {
    pub records: Vec<ExoplanetRecord>,
    pub stats: ParseStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ColumnIndices {
    name: Option<usize>,
    host_name: Option<usize>,
    discovery_method: Option<usize>,
    discovery_year: Option<usize>,
    discovery_facility: Option<usize>,
    orbital_period: Option<usize>,
    radius: Option<usize>,
    mass: Option<usize>,
    distance: Option<usize>,
}

impl ColumnIndices {
    fn from_headers(headers: &[&str]) -> Self {
        let find = |column: Column| headers.iter().position(|h| *h == column.header_name());
        Self {
            name: find(Column::Name),
            host_name: find(Column::HostName),
            discovery_method: find(Column::DiscoveryMethod),
            discovery_year: find(Column::DiscoveryYear),
            discovery_facility: find(Column::DiscoveryFacility),
            orbital_period: find(Column::OrbitalPeriod),
            radius: find(Column::Radius),
            mass: find(Column::Mass),
            distance: find(Column::Distance),
        }
    }
}

/// Parser bound to one header row.
///
/// Most callers want [`CatalogParser::parse`] or [`CatalogParser::try_parse`],
/// which locate the header themselves.
#[derive(Debug, Clone)]
pub struct CatalogParser {
    indices: ColumnIndices,
    min_fields: usize,
}

enum RowOutcome {
    Retained(ExoplanetRecord),
    Short,
    Incomplete,
}

impl CatalogParser {
    /// Builds a parser from a header line (`pl_name,hostname,...`).
    pub fn from_header(header_line: &str) -> Self {
        let headers: Vec<&str> = header_line.trim().split(',').map(str::trim).collect();
        Self {
            indices: ColumnIndices::from_headers(&headers),
            min_fields: MIN_ROW_FIELDS.min(headers.len()),
        }
    }

    /// Parses catalog text, returning only the retained records.
    ///
    /// A missing header is logged and yields an empty sequence.
    pub fn parse(text: &str) -> Vec<ExoplanetRecord> {
        match Self::try_parse(text) {
            Ok(parsed) => parsed.records,
            Err(e) => {
                error!(error = %e, "Catalog parse produced no records");
                Vec::new()
            }
        }
    }

    /// Parses catalog text, reporting a missing header as an error.
    ///
    /// # Errors
    /// Returns [`CatalogError::MissingHeader`] if every line is blank or a
    /// `#` comment.
    pub fn try_parse(text: &str) -> CatalogResult<ParsedCatalog> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = content_lines(text);
        let header = lines.next().ok_or(CatalogError::MissingHeader)?;
        let parser = Self::from_header(header);

        let mut parsed = ParsedCatalog::default();
        for line in lines {
            parsed.stats.data_lines += 1;
            match parser.parse_row(line) {
                RowOutcome::Retained(record) => parsed.records.push(record),
                RowOutcome::Short => parsed.stats.short_rows += 1,
                RowOutcome::Incomplete => parsed.stats.incomplete_rows += 1,
            }
        }
        parsed.stats.retained = parsed.records.len();

        debug!(
            short = parsed.stats.short_rows,
            incomplete = parsed.stats.incomplete_rows,
            "Dropped catalog rows"
        );
        info!(records = parsed.stats.retained, "Parsed exoplanet catalog");
        Ok(parsed)
    }

    /// Parses one data row. Returns `None` if the row is dropped.
    pub fn parse_line(&self, line: &str) -> Option<ExoplanetRecord> {
        match self.parse_row(line.trim()) {
            RowOutcome::Retained(record) => Some(record),
            _ => None,
        }
    }

    fn parse_row(&self, line: &str) -> RowOutcome {
        let fields = split_fields(line);
        if fields.len() < self.min_fields {
            return RowOutcome::Short;
        }
        let record = self.build_record(&fields);
        if record.has_required_fields() {
            RowOutcome::Retained(record)
        } else {
            RowOutcome::Incomplete
        }
    }

    fn build_record(&self, fields: &[String]) -> ExoplanetRecord {
        let text = |idx: Option<usize>| field(fields, idx).to_string();
        let idx = &self.indices;
        ExoplanetRecord {
            name: text(idx.name),
            host_name: text(idx.host_name),
            discovery_method: text(idx.discovery_method),
            discovery_year: parse_year(field(fields, idx.discovery_year)),
            discovery_facility: text(idx.discovery_facility),
            orbital_period_days: parse_measurement(field(fields, idx.orbital_period)),
            radius_earth: parse_measurement(field(fields, idx.radius)),
            mass_earth: parse_measurement(field(fields, idx.mass)),
            distance_parsecs: parse_measurement(field(fields, idx.distance)),
        }
    }
}

/// Trimmed lines that are neither blank nor `#` comments.
fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

fn field(fields: &[String], idx: Option<usize>) -> &str {
    idx.and_then(|i| fields.get(i)).map_or("", String::as_str)
}

/// Splits a data row on commas outside double quotes. Each field is trimmed.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;

    for c in line.chars() {
        match c {
            '"' => inside_quotes = !inside_quotes,
            ',' if !inside_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Leading signed integer, or 0 if there is none or it overflows.
fn parse_year(s: &str) -> i32 {
    let s = s.trim();
    let (sign_len, digits) = match s.strip_prefix(['+', '-']) {
        Some(rest) => (1, rest),
        None => (0, s),
    };
    let digit_len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if digit_len == 0 {
        return 0;
    }
    s[..sign_len + digit_len].parse().unwrap_or(0)
}

/// Finite float, or `None` for blank, unparsable or non-finite input.
fn parse_measurement(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
