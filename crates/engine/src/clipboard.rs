//! Single-cell clipboard.
//!
//! Holds one scalar plus the operation that put it there. Reads go through the
//! view (what the user is looking at); writes come back as a `CellWrite`
//! addressed by row id, for the caller to apply and record.

use gridedit_core::FocusedCell;
use serde::{Deserialize, Serialize};

use crate::error::{Axis, GridError, Result};
use crate::grid::Grid;
use crate::row_id::RowId;
use crate::view::View;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardMode {
    #[default]
    None,
    Copy,
    Cut,
}

/// A pending single-cell write produced by cut/paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    pub row: RowId,
    pub col: usize,
    pub value: String,
}

impl CellWrite {
    pub fn apply(&self, grid: &Grid) -> Result<Grid> {
        grid.set_cell(self.row, self.col, self.value.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clipboard {
    value: String,
    mode: ClipboardMode,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn mode(&self) -> ClipboardMode {
        self.mode
    }

    /// Nothing copied or cut yet.
    pub fn is_empty(&self) -> bool {
        self.mode == ClipboardMode::None
    }

    /// Copy the focused cell.
    pub fn copy(view: &View<'_>, at: FocusedCell) -> Result<Clipboard> {
        Ok(Clipboard {
            value: read(view, at)?.to_string(),
            mode: ClipboardMode::Copy,
        })
    }

    /// Cut the focused cell: the clipboard takes its value and the returned
    /// write clears the source.
    pub fn cut(view: &View<'_>, at: FocusedCell) -> Result<(Clipboard, CellWrite)> {
        let value = read(view, at)?.to_string();
        let clear = CellWrite {
            row: view.id_at(at.row)?,
            col: at.col,
            value: String::new(),
        };
        Ok((Clipboard { value, mode: ClipboardMode::Cut }, clear))
    }

    /// Write the held value into the focused cell. None if nothing is held.
    pub fn paste(&self, view: &View<'_>, at: FocusedCell) -> Result<Option<CellWrite>> {
        if self.is_empty() {
            return Ok(None);
        }
        read(view, at)?;
        Ok(Some(CellWrite {
            row: view.id_at(at.row)?,
            col: at.col,
            value: self.value.clone(),
        }))
    }
}

fn read<'a>(view: &View<'a>, at: FocusedCell) -> Result<&'a str> {
    let row = view.row(at.row).ok_or(GridError::InvalidIndex {
        axis: Axis::ViewRow,
        index: at.row,
        len: view.len(),
    })?;
    row.cell(at.col).ok_or(GridError::InvalidIndex {
        axis: Axis::Column,
        index: at.col,
        len: row.cells().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{project, FilterSpec, SortDirection, SortSpec, ValueKind};

    fn grid() -> Grid {
        Grid::initialize(&[vec!["b", "2"], vec!["a", "1"]], 0, 0)
    }

    #[test]
    fn test_copy_reads_view_coordinates() {
        let grid = grid();
        let sort = SortSpec::by(0, SortDirection::Ascending, ValueKind::Text);
        let view = project(&grid, &FilterSpec::new(), &sort);

        // View row 0 is storage row 1 ("a")
        let clip = Clipboard::copy(&view, FocusedCell::new(0, 0)).unwrap();
        assert_eq!(clip.value(), "a");
        assert_eq!(clip.mode(), ClipboardMode::Copy);
    }

    #[test]
    fn test_cut_then_paste_moves_value() {
        let grid = grid();
        let view = View::identity(&grid);
        let (clip, clear) = Clipboard::cut(&view, FocusedCell::new(0, 1)).unwrap();
        assert_eq!(clip.mode(), ClipboardMode::Cut);
        let grid = clear.apply(&grid).unwrap();
        assert_eq!(grid.cell(0, 1), Some(""));

        let view = View::identity(&grid);
        let write = clip.paste(&view, FocusedCell::new(1, 0)).unwrap().unwrap();
        let grid = write.apply(&grid).unwrap();
        assert_eq!(grid.cell(1, 0), Some("2"));
        assert_eq!(grid.cell(0, 1), Some(""));
    }

    #[test]
    fn test_paste_empty_clipboard_is_noop() {
        let grid = grid();
        let view = View::identity(&grid);
        assert_eq!(Clipboard::new().paste(&view, FocusedCell::new(0, 0)), Ok(None));
    }

    #[test]
    fn test_copied_blank_cell_still_pastes() {
        let grid = Grid::initialize(&[vec!["", "x"]], 0, 0);
        let view = View::identity(&grid);
        let clip = Clipboard::copy(&view, FocusedCell::new(0, 0)).unwrap();
        let write = clip.paste(&view, FocusedCell::new(0, 1)).unwrap();
        assert_eq!(write.map(|w| w.value), Some(String::new()));
    }

    #[test]
    fn test_out_of_view_is_invalid_index() {
        let grid = grid();
        let view = View::identity(&grid);
        assert_eq!(
            Clipboard::copy(&view, FocusedCell::new(5, 0)),
            Err(GridError::InvalidIndex { axis: Axis::ViewRow, index: 5, len: 2 })
        );
        assert_eq!(
            Clipboard::copy(&view, FocusedCell::new(0, 2)),
            Err(GridError::InvalidIndex { axis: Axis::Column, index: 2, len: 2 })
        );
    }
}
