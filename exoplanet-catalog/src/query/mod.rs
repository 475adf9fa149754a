//! Query interface for exoplanet catalogs.
//!
//! Four submodules cover the load-to-display path:
//!
//! - [`parser`] — turn catalog text into [`ExoplanetRecord`](crate::ExoplanetRecord)s
//! - [`index`] — per-field buckets and distinct-value lists
//! - [`search`] — conjunctive filters seeded from the cheapest bucket
//! - [`sort`] — three-state column sorting for result lists

pub mod index;
pub mod parser;
pub mod search;
pub mod sort;

pub use index::{CatalogIndex, Predicate, QueryOptions};
pub use parser::{split_fields, CatalogParser, ParseStats, ParsedCatalog, MIN_ROW_FIELDS};
pub use search::QueryFilter;
pub use sort::{apply_sort, compare_records, sort_records, SortDirection, SortState, SortedResults};
