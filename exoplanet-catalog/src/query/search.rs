//! Conjunctive filter queries over a [`CatalogIndex`].
//!
//! A [`QueryFilter`] holds up to four exact-match predicates. The search
//! seeds its working set from the bucket of the first active predicate in
//! the order year, method, hostname, facility, then narrows that set with
//! each remaining predicate. The seed choice only affects how many records
//! are scanned; the result is always the records matching every predicate,
//! in load order.
//!
//! An empty filter returns no records: at least one selection is required.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::index::{CatalogIndex, Predicate};
use crate::errors::{CatalogError, CatalogResult};
use crate::record::{CatalogField, ExoplanetRecord};

/// Up to four optional exact-match conditions. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility: Option<String>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        self.facility = Some(facility.into());
        self
    }

    /// Builds a filter from selection-list values, where an empty string
    /// means nothing was selected.
    pub fn from_selections(year: Option<i32>, method: &str, hostname: &str, facility: &str) -> Self {
        let selected = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            year,
            method: selected(method),
            hostname: selected(hostname),
            facility: selected(facility),
        }
    }

    /// Sets one field from its text form. Years must parse as integers.
    ///
    /// # Errors
    /// Returns [`CatalogError::InvalidField`] for a non-integer year.
    pub fn set(&mut self, field: CatalogField, value: &str) -> CatalogResult<()> {
        match field {
            CatalogField::Year => {
                let year = value
                    .trim()
                    .parse()
                    .map_err(|_| CatalogError::invalid_field("disc_year", value))?;
                self.year = Some(year);
            }
            CatalogField::Method => self.method = Some(value.to_string()),
            CatalogField::HostName => self.hostname = Some(value.to_string()),
            CatalogField::Facility => self.facility = Some(value.to_string()),
        }
        Ok(())
    }

    /// Active predicates in seed precedence order.
    pub fn predicates(&self) -> Vec<Predicate<'_>> {
        let mut predicates = Vec::with_capacity(4);
        if let Some(year) = self.year {
            predicates.push(Predicate::Year(year));
        }
        if let Some(method) = &self.method {
            predicates.push(Predicate::Method(method));
        }
        if let Some(hostname) = &self.hostname {
            predicates.push(Predicate::HostName(hostname));
        }
        if let Some(facility) = &self.facility {
            predicates.push(Predicate::Facility(facility));
        }
        predicates
    }

    pub fn active_count(&self) -> usize {
        self.year.is_some() as usize
            + self.method.is_some() as usize
            + self.hostname.is_some() as usize
            + self.facility.is_some() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Returns `true` if `record` satisfies every active predicate.
    pub fn matches(&self, record: &ExoplanetRecord) -> bool {
        self.predicates().iter().all(|p| p.matches(record))
    }
}

impl CatalogIndex {
    /// Records matching every predicate in `filter`, in load order.
    ///
    /// Returns an empty vector for an empty filter or when any predicate
    /// names a value absent from the catalog.
    pub fn search(&self, filter: &QueryFilter) -> Vec<&ExoplanetRecord> {
        let predicates = filter.predicates();
        let Some((seed, rest)) = predicates.split_first() else {
            debug!("No filters applied, returning no records");
            return Vec::new();
        };

        let mut working: Vec<usize> = self.bucket_positions(seed).to_vec();
        debug!(
            field = %seed.field(),
            seed = working.len(),
            "Seeded search from index bucket"
        );

        for predicate in rest {
            if working.is_empty() {
                break;
            }
            let before = working.len();
            working.retain(|&pos| predicate.matches(self.record_at(pos)));
            debug!(
                field = %predicate.field(),
                before,
                after = working.len(),
                "Narrowed search results"
            );
        }

        working.into_iter().map(|pos| self.record_at(pos)).collect()
    }
}
