//! Focus movement in view space.
//!
//! All coordinates here are VIEW coordinates (rows as the user sees them after
//! filter and sort). Callers translate the resulting view row back to a stable
//! row id before touching storage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The focused cell, in view space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FocusedCell {
    pub row: usize,
    pub col: usize,
}

impl FocusedCell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for FocusedCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", crate::naming::col_to_letters(self.col), self.row + 1)
    }
}

/// A decoded movement key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavIntent {
    Up,
    Down,
    Left,
    Right,
    Tab,
    ShiftTab,
    Enter,
}

impl FromStr for NavIntent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(NavIntent::Up),
            "down" => Ok(NavIntent::Down),
            "left" => Ok(NavIntent::Left),
            "right" => Ok(NavIntent::Right),
            "tab" => Ok(NavIntent::Tab),
            "shift-tab" => Ok(NavIntent::ShiftTab),
            "enter" => Ok(NavIntent::Enter),
            other => Err(format!("unknown navigation intent: {}", other)),
        }
    }
}

/// Next focused cell for `intent`, wrapping at the view edges.
///
/// Tab and Shift+Tab wrap across rows (and the row wraps too at the ends).
/// An empty view (no rows or no columns) leaves focus where it is.
pub fn resolve(focus: FocusedCell, intent: NavIntent, view_rows: usize, cols: usize) -> FocusedCell {
    if view_rows == 0 || cols == 0 {
        return focus;
    }

    let row = focus.row.min(view_rows - 1);
    let col = focus.col.min(cols - 1);

    let next_row = |r: usize| if r + 1 < view_rows { r + 1 } else { 0 };
    let prev_row = |r: usize| if r > 0 { r - 1 } else { view_rows - 1 };

    let (row, col) = match intent {
        NavIntent::Up => (prev_row(row), col),
        NavIntent::Down | NavIntent::Enter => (next_row(row), col),
        NavIntent::Left => (row, if col > 0 { col - 1 } else { cols - 1 }),
        NavIntent::Right => (row, if col + 1 < cols { col + 1 } else { 0 }),
        NavIntent::Tab => {
            if col + 1 < cols {
                (row, col + 1)
            } else {
                (next_row(row), 0)
            }
        }
        NavIntent::ShiftTab => {
            if col > 0 {
                (row, col - 1)
            } else {
                (prev_row(row), cols - 1)
            }
        }
    };

    FocusedCell { row, col }
}

/// Clamp focus after a row deletion left `row_count` rows.
pub fn adjust_after_row_deletion(focus: FocusedCell, row_count: usize) -> FocusedCell {
    if row_count > 0 && focus.row >= row_count {
        FocusedCell { row: row_count - 1, ..focus }
    } else {
        focus
    }
}

/// Clamp focus after a column deletion left `col_count` columns.
pub fn adjust_after_column_deletion(focus: FocusedCell, col_count: usize) -> FocusedCell {
    if col_count > 0 && focus.col >= col_count {
        FocusedCell { col: col_count - 1, ..focus }
    } else {
        focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: usize, col: usize) -> FocusedCell {
        FocusedCell::new(row, col)
    }

    #[test]
    fn test_arrow_moves() {
        assert_eq!(resolve(at(1, 1), NavIntent::Up, 3, 3), at(0, 1));
        assert_eq!(resolve(at(1, 1), NavIntent::Down, 3, 3), at(2, 1));
        assert_eq!(resolve(at(1, 1), NavIntent::Left, 3, 3), at(1, 0));
        assert_eq!(resolve(at(1, 1), NavIntent::Right, 3, 3), at(1, 2));
        assert_eq!(resolve(at(1, 1), NavIntent::Enter, 3, 3), at(2, 1));
    }

    #[test]
    fn test_arrow_wraparound() {
        assert_eq!(resolve(at(0, 0), NavIntent::Up, 3, 4), at(2, 0));
        assert_eq!(resolve(at(2, 0), NavIntent::Down, 3, 4), at(0, 0));
        assert_eq!(resolve(at(0, 0), NavIntent::Left, 3, 4), at(0, 3));
        assert_eq!(resolve(at(0, 3), NavIntent::Right, 3, 4), at(0, 0));
        assert_eq!(resolve(at(2, 1), NavIntent::Enter, 3, 4), at(0, 1));
    }

    #[test]
    fn test_tab_wraps_to_next_row() {
        assert_eq!(resolve(at(0, 2), NavIntent::Tab, 3, 3), at(1, 0));
        // Last cell wraps to the first
        assert_eq!(resolve(at(2, 2), NavIntent::Tab, 3, 3), at(0, 0));
    }

    #[test]
    fn test_shift_tab_wraps_to_previous_row() {
        assert_eq!(resolve(at(1, 0), NavIntent::ShiftTab, 3, 3), at(0, 2));
        // First cell wraps to the last
        assert_eq!(resolve(at(0, 0), NavIntent::ShiftTab, 3, 3), at(2, 2));
        assert_eq!(resolve(at(1, 2), NavIntent::ShiftTab, 3, 3), at(1, 1));
    }

    #[test]
    fn test_single_cell_view() {
        for intent in [
            NavIntent::Up,
            NavIntent::Down,
            NavIntent::Left,
            NavIntent::Right,
            NavIntent::Tab,
            NavIntent::ShiftTab,
            NavIntent::Enter,
        ] {
            assert_eq!(resolve(at(0, 0), intent, 1, 1), at(0, 0));
        }
    }

    #[test]
    fn test_empty_view_keeps_focus() {
        assert_eq!(resolve(at(4, 2), NavIntent::Down, 0, 3), at(4, 2));
        assert_eq!(resolve(at(4, 2), NavIntent::Right, 5, 0), at(4, 2));
    }

    #[test]
    fn test_stale_focus_is_clamped_first() {
        // Filter shrank the view to 2 rows while focus was on row 5
        assert_eq!(resolve(at(5, 0), NavIntent::Up, 2, 1), at(0, 0));
    }

    #[test]
    fn test_adjust_after_deletion() {
        assert_eq!(adjust_after_row_deletion(at(3, 1), 3), at(2, 1));
        assert_eq!(adjust_after_row_deletion(at(1, 1), 3), at(1, 1));
        assert_eq!(adjust_after_column_deletion(at(0, 4), 2), at(0, 1));
        assert_eq!(adjust_after_column_deletion(at(0, 1), 2), at(0, 1));
    }

    #[test]
    fn test_intent_parse() {
        assert_eq!("shift-tab".parse::<NavIntent>(), Ok(NavIntent::ShiftTab));
        assert_eq!("UP".parse::<NavIntent>(), Ok(NavIntent::Up));
        assert!("diagonal".parse::<NavIntent>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(at(0, 0).to_string(), "A1");
        assert_eq!(at(9, 26).to_string(), "AA10");
    }
}
