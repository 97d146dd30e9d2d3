// ============================================================================
// src/executor/sort.rs - Row ordering for order_by
// ============================================================================
//
// - Multi-column sorting: first key decides, ties fall through to the next
// - Stable sort: rows equal on every key keep their table order
// - Text compares with locale-aware collation, scalars numerically
// - NaN and invalid dates are greatest: last ascending, first descending
//
// ============================================================================

use crate::core::{RowView, Value, collation};
use crate::storage::Table;
use std::cmp::Ordering;

/// Column used when no valid ordering is requested.
pub const DEFAULT_SORT_COLUMN: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `asc`/`desc`, trimmed and case-insensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// One column of an ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    /// Resolve requested orders against a table.
    ///
    /// Entries naming unknown columns or carrying an unknown direction are
    /// dropped, as are repeats of a column already listed. If nothing is
    /// left the ordering is `id` ascending.
    pub fn resolve<K, D>(orders: impl IntoIterator<Item = (K, D)>, table: &Table) -> Vec<SortKey>
    where
        K: AsRef<str>,
        D: AsRef<str>,
    {
        let mut keys: Vec<SortKey> = Vec::new();
        for (column, direction) in orders {
            let column = column.as_ref();
            let Some(direction) = SortDirection::parse(direction.as_ref()) else {
                continue;
            };
            if !table.has_column(column) || keys.iter().any(|k| k.column == column) {
                continue;
            }
            keys.push(SortKey::new(column, direction));
        }

        if keys.is_empty() {
            keys.push(SortKey::new(DEFAULT_SORT_COLUMN, SortDirection::Asc));
        }
        keys
    }
}

/// Compares row views key by key.
pub struct RowComparator<'a> {
    sort_keys: &'a [SortKey],
}

impl<'a> RowComparator<'a> {
    pub fn new(sort_keys: &'a [SortKey]) -> Self {
        Self { sort_keys }
    }

    pub fn compare(&self, a: &RowView, b: &RowView) -> Ordering {
        for key in self.sort_keys {
            let ordering = compare_values(
                a.get(&key.column).unwrap_or(&Value::Null),
                b.get(&key.column).unwrap_or(&Value::Null),
            );
            let ordering = match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Kinds of cell, in the order they sort against each other. A sanitized
/// column holds a single kind, so mixed comparisons only arise for views
/// built by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CellKind {
    /// null, booleans, numbers and dates, compared by numeric reading
    Scalar,
    Text,
    /// arrays and objects, compared by their text form
    Composite,
}

fn cell_kind(value: &Value) -> CellKind {
    match value {
        Value::Text(_) => CellKind::Text,
        Value::Array(_) | Value::Object(_) => CellKind::Composite,
        Value::Null | Value::Boolean(_) | Value::Number(_) | Value::Date(_) => CellKind::Scalar,
    }
}

/// NaN sorts after every other number, so ascending orders put it last
/// and descending orders put it first.
fn compare_numbers(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Natural ordering of two cells. Always a total order: text uses
/// locale-aware collation, scalars compare numerically with NaN and invalid
/// dates greatest, and cells of different kinds order by kind.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (cell_kind(a), cell_kind(b)) {
        (CellKind::Text, CellKind::Text) => collation::compare(&a.to_string(), &b.to_string()),
        (CellKind::Composite, CellKind::Composite) => a.to_string().cmp(&b.to_string()),
        (CellKind::Scalar, CellKind::Scalar) => compare_numbers(a.to_number(), b.to_number()),
        (x, y) => x.cmp(&y),
    }
}

/// Sorts row views in place.
pub struct SortExecutor;

impl SortExecutor {
    pub fn sort(rows: &mut [RowView], sort_keys: &[SortKey]) {
        if rows.len() < 2 || sort_keys.is_empty() {
            return;
        }
        let comparator = RowComparator::new(sort_keys);
        // sort_by is stable
        rows.sort_by(|a, b| comparator.compare(a, b));
    }
}
