//! Engine error taxonomy.
//!
//! Every variant here is a caller defect (bad coordinates or a stale row id).
//! Ordinary no-ops such as deleting the last row are not errors.

use std::fmt;

use thiserror::Error;

use crate::row_id::RowId;

/// Which index space an out-of-range index was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Storage row index.
    Row,
    /// Column index.
    Column,
    /// Row index in the current filtered/sorted view.
    ViewRow,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
            Axis::ViewRow => write!(f, "view row"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid {axis} index {index} (length {len})")]
    InvalidIndex { axis: Axis, index: usize, len: usize },

    #[error("no row with id {0}")]
    UnknownRow(RowId),
}

impl GridError {
    pub(crate) fn check(axis: Axis, index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(GridError::InvalidIndex { axis, index, len })
        }
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
