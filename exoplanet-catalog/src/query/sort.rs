//! Three-state column sorting for result lists.
//!
//! Clicking a column cycles it through ascending → descending → unsorted.
//! Clicking a different column starts that column at ascending. Unsorted
//! restores the order the results arrived in, not the reverse of descending.
//!
//! Sorting is stable and never mutates its input. Absent measurements always
//! sort after present ones, in both directions; the direction only flips the
//! order among present values.

use std::cmp::Ordering;

use crate::record::{Column, ExoplanetRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Which column, if any, the results are sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortState {
    #[default]
    Unsorted,
    Sorted {
        column: Column,
        direction: SortDirection,
    },
}

impl SortState {
    /// The state after one click on `column`.
    pub fn toggle(self, column: Column) -> SortState {
        match self {
            SortState::Sorted {
                column: active,
                direction: SortDirection::Ascending,
            } if active == column => SortState::Sorted {
                column,
                direction: SortDirection::Descending,
            },
            SortState::Sorted {
                column: active,
                direction: SortDirection::Descending,
            } if active == column => SortState::Unsorted,
            _ => SortState::Sorted {
                column,
                direction: SortDirection::Ascending,
            },
        }
    }

    pub fn column(&self) -> Option<Column> {
        match self {
            SortState::Unsorted => None,
            SortState::Sorted { column, .. } => Some(*column),
        }
    }

    /// Direction indicator for `column`: `None` unless it is the active one.
    pub fn direction_for(&self, column: Column) -> Option<SortDirection> {
        match self {
            SortState::Sorted {
                column: active,
                direction,
            } if *active == column => Some(*direction),
            _ => None,
        }
    }
}

/// Compares two records on one column. Absent values go last regardless of
/// `direction`.
pub fn compare_records(
    a: &ExoplanetRecord,
    b: &ExoplanetRecord,
    column: Column,
    direction: SortDirection,
) -> Ordering {
    match (a.value(column), b.value(column)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ordering = x.compare(&y);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

/// Returns `records` ordered for `state`. Unsorted is a plain copy.
pub fn apply_sort<R>(records: &[R], state: SortState) -> Vec<R>
where
    R: AsRef<ExoplanetRecord> + Clone,
{
    let mut sorted = records.to_vec();
    if let SortState::Sorted { column, direction } = state {
        sorted.sort_by(|a, b| compare_records(a.as_ref(), b.as_ref(), column, direction));
    }
    sorted
}

/// One click on `column`: returns the reordered records and the new state.
///
/// `records` must be the results in their original order; they are left
/// untouched.
pub fn sort_records<R>(records: &[R], column: Column, state: SortState) -> (Vec<R>, SortState)
where
    R: AsRef<ExoplanetRecord> + Clone,
{
    let next = state.toggle(column);
    (apply_sort(records, next), next)
}

/// A result list together with its current sort.
///
/// Keeps the original order so clearing the sort can restore it.
#[derive(Debug, Clone)]
pub struct SortedResults<R> {
    original: Vec<R>,
    sorted: Vec<R>,
    state: SortState,
}

impl<R> Default for SortedResults<R> {
    fn default() -> Self {
        Self {
            original: Vec::new(),
            sorted: Vec::new(),
            state: SortState::Unsorted,
        }
    }
}

impl<R> SortedResults<R>
where
    R: AsRef<ExoplanetRecord> + Clone,
{
    pub fn new(results: Vec<R>) -> Self {
        Self {
            sorted: results.clone(),
            original: results,
            state: SortState::Unsorted,
        }
    }

    /// Replaces the results and resets to unsorted.
    pub fn set_results(&mut self, results: Vec<R>) {
        *self = Self::new(results);
    }

    pub fn clear(&mut self) {
        self.set_results(Vec::new());
    }

    /// Applies one click on `column` and returns the new ordering.
    pub fn toggle(&mut self, column: Column) -> &[R] {
        let (sorted, state) = sort_records(&self.original, column, self.state);
        self.sorted = sorted;
        self.state = state;
        &self.sorted
    }

    pub fn sorted(&self) -> &[R] {
        &self.sorted
    }

    pub fn original(&self) -> &[R] {
        &self.original
    }

    pub fn state(&self) -> SortState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}
