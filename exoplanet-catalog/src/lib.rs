//! Indexed exoplanet catalog with filter queries and result sorting.
//!
//! Parses the exoplanet archive's CSV export into typed records, builds one
//! lookup index per filterable field (discovery year, discovery method, host
//! name, discovery facility) and answers conjunctive exact-match queries by
//! seeding from a single index bucket and narrowing. Results are presented
//! through a stable three-state column sort.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`query::parser`] | [`CatalogParser`](query::CatalogParser): comment-tolerant, quote-aware CSV parsing |
//! | [`query::index`] | [`CatalogIndex`](query::CatalogIndex): record arena, per-field buckets, [`QueryOptions`](query::QueryOptions) |
//! | [`query::search`] | [`QueryFilter`](query::QueryFilter) and [`CatalogIndex::search`](query::CatalogIndex::search) |
//! | [`query::sort`] | [`SortState`](query::SortState), [`sort_records`](query::sort_records), [`SortedResults`](query::SortedResults) |
//! | [`service`] | [`ExoplanetService`]: loading plus the one-shot ready signal |
//!
//! # Quick Start
//!
//! ```
//! use exoplanet_catalog::query::{sort_records, CatalogIndex, QueryFilter, SortState};
//! use exoplanet_catalog::Column;
//!
//! let text = "\
//! pl_name,hostname,discoverymethod,disc_year,disc_facility,pl_orbper,pl_rade,pl_bmasse,sy_dist
//! Kepler-1b,Kepler-1,Transit,2010,Kepler,10.5,1.2,,150
//! ";
//! let index = CatalogIndex::from_text(text);
//!
//! let hits = index.search(&QueryFilter::new().with_year(2010));
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].mass_earth, None);
//!
//! let (sorted, state) = sort_records(&hits, Column::OrbitalPeriod, SortState::Unsorted);
//! assert_eq!(sorted.len(), 1);
//! assert_eq!(state.column(), Some(Column::OrbitalPeriod));
//! ```
//!
//! # Features
//!
//! - **`cli`** — Enables the `query-exoplanets` binary for inspecting and
//!   searching a catalog file from the command line.

pub mod collate;
pub mod errors;
pub mod query;
pub mod record;
pub mod service;

pub use errors::{CatalogError, CatalogResult};
pub use query::{CatalogIndex, CatalogParser, QueryFilter, QueryOptions};
pub use record::{format_measurement, CatalogField, Column, ColumnValue, ExoplanetRecord};
pub use service::{ExoplanetService, LoadStatus};
