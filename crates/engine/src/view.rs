//! Filter and Sort - Row View Layer
//!
//! This module derives the view the user sees from a grid snapshot:
//! - View space (what the user sees, affected by sort/filter)
//! - Storage space (canonical row order inside the Grid)
//!
//! Key invariants:
//! - UI code and navigation use view space
//! - Grid mutations use row ids (or storage indices)
//! - Conversion happens at the boundary only, via `View::id_at`/`storage_index`
//! - Projection never changes the grid and never reorders storage

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{Axis, GridError, Result};
use crate::grid::{Grid, Row};
use crate::row_id::RowId;
use crate::value::{is_blank, parse_date, parse_number};

// =============================================================================
// Filter predicates
// =============================================================================

/// Per-column filter predicate kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PredicateKind {
    #[default]
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    NotEmpty,
    Empty,
}

impl PredicateKind {
    pub const ALL: [PredicateKind; 8] = [
        PredicateKind::Contains,
        PredicateKind::Equals,
        PredicateKind::StartsWith,
        PredicateKind::EndsWith,
        PredicateKind::GreaterThan,
        PredicateKind::LessThan,
        PredicateKind::NotEmpty,
        PredicateKind::Empty,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PredicateKind::Contains => "contains",
            PredicateKind::Equals => "equals",
            PredicateKind::StartsWith => "startsWith",
            PredicateKind::EndsWith => "endsWith",
            PredicateKind::GreaterThan => "greaterThan",
            PredicateKind::LessThan => "lessThan",
            PredicateKind::NotEmpty => "notEmpty",
            PredicateKind::Empty => "empty",
        }
    }

    /// Lenient lookup: unknown names fall back to `Contains`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PredicateKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        PredicateKind::ALL
            .iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown filter kind: {}", s))
    }
}

/// Filter criteria for one column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub kind: PredicateKind,
    pub value: String,
}

impl ColumnFilter {
    pub fn new(kind: PredicateKind, value: impl Into<String>) -> Self {
        Self { kind, value: value.into() }
    }

    /// An empty value imposes no constraint, whatever the kind.
    pub fn is_active(&self) -> bool {
        !self.value.is_empty()
    }

    /// Check a cell against this filter.
    ///
    /// Text predicates are case-insensitive. Numeric predicates fail when
    /// either side does not parse as a number.
    pub fn matches(&self, cell: &str) -> bool {
        if !self.is_active() {
            return true;
        }

        let haystack = cell.to_lowercase();
        let needle = self.value.to_lowercase();

        match self.kind {
            PredicateKind::Contains => haystack.contains(&needle),
            PredicateKind::Equals => haystack == needle,
            PredicateKind::StartsWith => haystack.starts_with(&needle),
            PredicateKind::EndsWith => haystack.ends_with(&needle),
            PredicateKind::GreaterThan => match (parse_number(cell), parse_number(&self.value)) {
                (Some(a), Some(b)) => a > b,
                _ => false,
            },
            PredicateKind::LessThan => match (parse_number(cell), parse_number(&self.value)) {
                (Some(a), Some(b)) => a < b,
                _ => false,
            },
            PredicateKind::NotEmpty => !is_blank(cell),
            PredicateKind::Empty => is_blank(cell),
        }
    }
}

/// Filter configuration, keyed by column index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    columns: BTreeMap<usize, ColumnFilter>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `set`.
    pub fn with(mut self, col: usize, filter: ColumnFilter) -> Self {
        self.set(col, filter);
        self
    }

    pub fn set(&mut self, col: usize, filter: ColumnFilter) {
        self.columns.insert(col, filter);
    }

    pub fn get(&self, col: usize) -> Option<&ColumnFilter> {
        self.columns.get(&col)
    }

    pub fn clear(&mut self, col: usize) {
        self.columns.remove(&col);
    }

    pub fn clear_all(&mut self) {
        self.columns.clear();
    }

    /// Is any column actively filtered?
    pub fn is_active(&self) -> bool {
        self.columns.values().any(ColumnFilter::is_active)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ColumnFilter)> {
        self.columns.iter().map(|(&col, f)| (col, f))
    }

    /// Follow `count` columns inserted at `index`: filters at or right of it move right.
    pub fn shift_columns(&mut self, index: usize, count: usize) {
        self.columns = std::mem::take(&mut self.columns)
            .into_iter()
            .map(|(col, f)| if col >= index { (col + count, f) } else { (col, f) })
            .collect();
    }

    /// Follow the removal of column `index`: its filter goes, later ones move left.
    pub fn remove_column(&mut self, index: usize) {
        self.columns = std::mem::take(&mut self.columns)
            .into_iter()
            .filter(|(col, _)| *col != index)
            .map(|(col, f)| if col > index { (col - 1, f) } else { (col, f) })
            .collect();
    }

    /// Drop filters on columns at or past `cols`.
    pub fn retain_columns(&mut self, cols: usize) {
        self.columns.retain(|&col, _| col < cols);
    }

    /// A row passes if every column filter matches its cell.
    /// Columns past the end of the row read as empty.
    pub fn matches(&self, row: &Row) -> bool {
        self.columns
            .iter()
            .all(|(&col, filter)| filter.matches(row.cell(col).unwrap_or("")))
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// How cells are compared when sorting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    /// Parse as numbers; unparsable is 0
    Number,
    /// Parse as timestamps; unparsable is the epoch
    Date,
    /// Numeric if both sides parse, else case-insensitive text
    #[default]
    Text,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Number => "number",
            ValueKind::Date => "date",
            ValueKind::Text => "text",
        }
    }

    /// Compare two cells under this kind (ascending).
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            ValueKind::Number => {
                let a = OrderedFloat(parse_number(a).unwrap_or(0.0));
                let b = OrderedFloat(parse_number(b).unwrap_or(0.0));
                a.cmp(&b)
            }
            ValueKind::Date => parse_date(a).unwrap_or(0).cmp(&parse_date(b).unwrap_or(0)),
            ValueKind::Text => match (parse_number(a), parse_number(b)) {
                (Some(x), Some(y)) => OrderedFloat(x).cmp(&OrderedFloat(y)),
                _ => a.to_lowercase().cmp(&b.to_lowercase()),
            },
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "number" => Ok(ValueKind::Number),
            "date" => Ok(ValueKind::Date),
            "text" | "auto" => Ok(ValueKind::Text),
            other => Err(format!("unknown value kind: {}", other)),
        }
    }
}

/// Current sort state. `key == None` means storage order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: Option<usize>,
    pub direction: SortDirection,
    pub value_kind: ValueKind,
}

impl SortSpec {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn by(col: usize, direction: SortDirection, value_kind: ValueKind) -> Self {
        Self {
            key: Some(col),
            direction,
            value_kind,
        }
    }

    /// Header-click behavior: re-sorting an ascending column flips it to
    /// descending; anything else sorts `col` ascending.
    pub fn toggled(&self, col: usize, value_kind: ValueKind) -> Self {
        let direction = if self.key == Some(col) && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self::by(col, direction, value_kind)
    }

    /// Follow `count` columns inserted at `index`.
    pub fn shift_columns(&mut self, index: usize, count: usize) {
        if let Some(key) = self.key.as_mut() {
            if *key >= index {
                *key += count;
            }
        }
    }

    /// Follow the removal of column `index`. Sorting on it falls back to storage order.
    pub fn remove_column(&mut self, index: usize) {
        match self.key {
            Some(key) if key == index => *self = Self::none(),
            Some(key) if key > index => self.key = Some(key - 1),
            _ => {}
        }
    }

    /// Fall back to storage order if the key is at or past `cols`.
    pub fn retain_columns(&mut self, cols: usize) {
        if self.key.map_or(false, |key| key >= cols) {
            *self = Self::none();
        }
    }

    /// Compare two cells. Descending reverses the comparison itself so ties
    /// still keep their prior order under a stable sort.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let ord = self.value_kind.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }

    /// Header glyph for `col`.
    pub fn indicator(&self, col: usize) -> &'static str {
        match (self.key == Some(col), self.direction) {
            (false, _) => "⇅",
            (true, SortDirection::Ascending) => "↑",
            (true, SortDirection::Descending) => "↓",
        }
    }
}

// =============================================================================
// View: the projected row sequence
// =============================================================================

/// Filtered + sorted rows, borrowed from a grid snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    /// Maps view_row -> (storage index, row)
    entries: Vec<(usize, &'a Row)>,
}

/// Project a grid through a filter and a sort.
///
/// Filtering keeps rows whose every active column predicate matches. Sorting
/// is stable: rows that compare equal keep their storage order.
pub fn project<'a>(grid: &'a Grid, filter: &FilterSpec, sort: &SortSpec) -> View<'a> {
    View::build(grid.rows().iter().enumerate().collect(), filter, sort)
}

impl<'a> View<'a> {
    /// Identity view: every row, storage order.
    pub fn identity(grid: &'a Grid) -> Self {
        Self {
            entries: grid.rows().iter().enumerate().collect(),
        }
    }

    fn build(mut entries: Vec<(usize, &'a Row)>, filter: &FilterSpec, sort: &SortSpec) -> Self {
        entries.retain(|(_, row)| filter.matches(row));

        if let Some(key) = sort.key {
            entries.sort_by(|(_, a), (_, b)| {
                sort.compare(a.cell(key).unwrap_or(""), b.cell(key).unwrap_or(""))
            });
        }

        Self { entries }
    }

    /// Project this view again. Ties keep the current view order.
    pub fn refine(&self, filter: &FilterSpec, sort: &SortSpec) -> View<'a> {
        View::build(self.entries.clone(), filter, sort)
    }

    /// Number of visible rows
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a Row> + '_ {
        self.entries.iter().map(|(_, row)| *row)
    }

    pub fn row(&self, view_row: usize) -> Option<&'a Row> {
        self.entries.get(view_row).map(|(_, row)| *row)
    }

    pub fn cell(&self, view_row: usize, col: usize) -> Option<&'a str> {
        self.row(view_row).and_then(|r| r.cell(col))
    }

    /// Map view row to storage row index - O(1)
    pub fn storage_index(&self, view_row: usize) -> Option<usize> {
        self.entries.get(view_row).map(|(index, _)| *index)
    }

    /// Stable id of the row shown at `view_row`.
    pub fn id_at(&self, view_row: usize) -> Result<RowId> {
        self.row(view_row)
            .map(Row::id)
            .ok_or(GridError::InvalidIndex {
                axis: Axis::ViewRow,
                index: view_row,
                len: self.entries.len(),
            })
    }

    /// Where a row currently appears, or None if filtered out.
    pub fn view_index_of(&self, id: RowId) -> Option<usize> {
        self.entries.iter().position(|(_, row)| row.id() == id)
    }

    pub fn ids(&self) -> Vec<RowId> {
        self.rows().map(Row::id).collect()
    }

    /// Cell text of the visible rows, in view order.
    pub fn to_data(&self) -> Vec<Vec<String>> {
        self.rows().map(|r| r.cells().to_vec()).collect()
    }

    /// Distinct non-blank values of a column, sorted.
    pub fn unique_values(&self, col: usize) -> Vec<String> {
        let values: BTreeSet<&str> = self
            .rows()
            .filter_map(|r| r.cell(col))
            .filter(|v| !is_blank(v))
            .collect();
        values.into_iter().map(str::to_string).collect()
    }

    /// Guess how a column should sort: `Number` if more than 80% of its
    /// non-blank cells are numeric, else `Date` by the same rule, else `Text`.
    pub fn detect_value_kind(&self, col: usize) -> ValueKind {
        let values: Vec<&str> = self
            .rows()
            .filter_map(|r| r.cell(col))
            .filter(|v| !is_blank(v))
            .collect();

        if values.is_empty() {
            return ValueKind::Text;
        }

        let total = values.len() as f64;
        let numeric = values.iter().filter(|v| parse_number(v).is_some()).count() as f64;
        let dates = values.iter().filter(|v| parse_date(v).is_some()).count() as f64;

        if numeric / total > 0.8 {
            ValueKind::Number
        } else if dates / total > 0.8 {
            ValueKind::Date
        } else {
            ValueKind::Text
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
