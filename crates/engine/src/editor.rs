//! The command surface a front end drives.
//!
//! `Editor` owns the history (whose cursor entry is the live grid), the
//! filter and sort that shape the view, the clipboard, and the focused cell.
//! Every command takes VIEW coordinates and resolves them to a row id or
//! storage index before touching the grid. Each data-changing command records
//! exactly one history entry and emits exactly one `DataChanged` event.

use gridedit_core::navigation::{self, FocusedCell, NavIntent};
use log::{debug, info, warn};

use crate::clipboard::Clipboard;
use crate::error::{Axis, GridError, Result};
use crate::events::{Command, EventCallback, GridEvent};
use crate::grid::{ColumnSide, Grid, RowSide};
use crate::history::{History, DEFAULT_MAX_ENTRIES};
use crate::view::{project, ColumnFilter, FilterSpec, SortSpec, ValueKind, View};

/// Knobs that shape new grids and history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    pub min_rows: usize,
    pub min_cols: usize,
    pub history_limit: usize,
    /// Value kind used when a header toggles sorting.
    pub sort_value_kind: ValueKind,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            min_rows: 20,
            min_cols: 10,
            history_limit: DEFAULT_MAX_ENTRIES,
            sort_value_kind: ValueKind::Text,
        }
    }
}

pub struct Editor {
    history: History,
    filter: FilterSpec,
    sort: SortSpec,
    clipboard: Clipboard,
    focus: FocusedCell,
    options: EditorOptions,
    listeners: Vec<EventCallback>,
    revision: u64,
}

impl Editor {
    /// Build an editor from seed rows, padded to the configured minimums.
    pub fn new<R, S>(seed: &[R], options: EditorOptions) -> Self
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let grid = Grid::initialize(seed, options.min_rows, options.min_cols);
        Self::with_grid(grid, options)
    }

    /// Build an editor around an existing snapshot (history entry 0).
    pub fn with_grid(grid: Grid, options: EditorOptions) -> Self {
        Self {
            history: History::with_limit(grid, options.history_limit),
            filter: FilterSpec::new(),
            sort: SortSpec::none(),
            clipboard: Clipboard::new(),
            focus: FocusedCell::default(),
            options,
            listeners: Vec::new(),
            revision: 0,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The live snapshot.
    pub fn grid(&self) -> &Grid {
        self.history.current()
    }

    /// The live snapshot through the current filter and sort.
    pub fn view(&self) -> View<'_> {
        project(self.history.current(), &self.filter, &self.sort)
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn focus(&self) -> FocusedCell {
        self.focus
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of `DataChanged` notifications emitted so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a change observer.
    pub fn subscribe(&mut self, callback: EventCallback) {
        self.listeners.push(callback);
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Move focus to `at`, which must lie inside the current view.
    pub fn set_focus(&mut self, at: FocusedCell) -> Result<()> {
        let view = self.view();
        GridError::check(Axis::ViewRow, at.row, view.len())?;
        GridError::check(Axis::Column, at.col, self.grid().col_count())?;
        self.focus = at;
        Ok(())
    }

    /// Apply a movement key and return the new focus.
    pub fn navigate(&mut self, intent: NavIntent) -> FocusedCell {
        let rows = self.view().len();
        self.focus = navigation::resolve(self.focus, intent, rows, self.grid().col_count());
        self.focus
    }

    // =========================================================================
    // Cell content
    // =========================================================================

    pub fn set_cell(&mut self, at: FocusedCell, value: impl Into<String>) -> Result<()> {
        let next = {
            let view = self.view();
            let id = view.id_at(at.row);
            id.and_then(|id| self.grid().set_cell(id, at.col, value))
        };
        self.apply(Command::SetCell, next)
    }

    pub fn clear_cell(&mut self, at: FocusedCell) -> Result<()> {
        let next = {
            let view = self.view();
            view.id_at(at.row)
                .and_then(|id| self.grid().clear_cell_by_id(id, at.col))
        };
        self.apply(Command::ClearCell, next)
    }

    /// Blank every cell. Shape and row ids survive; filter and sort reset.
    pub fn clear_all(&mut self) {
        let next = self.grid().clear_all();
        self.filter.clear_all();
        self.sort = SortSpec::none();
        self.commit(Command::ClearAll, next);
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Insert an empty row above or below the row shown at `view_row`.
    pub fn insert_row(&mut self, view_row: usize, side: RowSide) -> Result<()> {
        let next = self
            .storage_index(view_row)
            .and_then(|at| self.grid().insert_row(at, side));
        self.apply(Command::InsertRow, next)
    }

    /// Insert an empty column. Filters and sort keep pointing at the same data.
    pub fn insert_column(&mut self, col: usize, side: ColumnSide) -> Result<()> {
        let next = self
            .grid()
            .insert_column(col, side)
            .map_err(|e| rejected(Command::InsertColumn, e))?;
        let index = match side {
            ColumnSide::Left => col,
            ColumnSide::Right => col + 1,
        };
        self.filter.shift_columns(index, 1);
        self.sort.shift_columns(index, 1);
        self.commit(Command::InsertColumn, next);
        Ok(())
    }

    /// Delete the row shown at `view_row`. Deleting the last remaining row
    /// changes nothing and records nothing.
    pub fn delete_row(&mut self, view_row: usize) -> Result<()> {
        let next = self
            .storage_index(view_row)
            .and_then(|at| self.grid().delete_row(at))
            .map_err(|e| rejected(Command::DeleteRow, e))?;
        if next.row_count() == self.grid().row_count() {
            debug!("{}: last row kept", Command::DeleteRow);
            return Ok(());
        }
        self.commit(Command::DeleteRow, next);
        Ok(())
    }

    /// Delete column `col`. Deleting the last remaining column changes
    /// nothing and records nothing. A filter or sort on `col` is dropped.
    pub fn delete_column(&mut self, col: usize) -> Result<()> {
        let next = self
            .grid()
            .delete_column(col)
            .map_err(|e| rejected(Command::DeleteColumn, e))?;
        if next.col_count() == self.grid().col_count() {
            debug!("{}: last column kept", Command::DeleteColumn);
            return Ok(());
        }
        self.filter.remove_column(col);
        self.sort.remove_column(col);
        self.commit(Command::DeleteColumn, next);
        Ok(())
    }

    pub fn add_row(&mut self) {
        let next = self.grid().add_row();
        self.commit(Command::AddRow, next);
    }

    pub fn add_column(&mut self) {
        let next = self.grid().add_column();
        self.commit(Command::AddColumn, next);
    }

    // =========================================================================
    // Clipboard
    // =========================================================================

    /// Copy the cell at `at`. Not a history step.
    pub fn copy(&mut self, at: FocusedCell) -> Result<()> {
        let clip = Clipboard::copy(&self.view(), at).map_err(|e| {
            warn!("copy rejected: {}", e);
            e
        })?;
        debug!("copy {}: {:?}", at, clip.value());
        self.clipboard = clip;
        Ok(())
    }

    /// Take the cell at `at` into the clipboard and clear it.
    pub fn cut(&mut self, at: FocusedCell) -> Result<()> {
        let (clip, next) = {
            let view = self.view();
            let (clip, write) = Clipboard::cut(&view, at).map_err(|e| rejected(Command::Cut, e))?;
            let next = write.apply(self.grid()).map_err(|e| rejected(Command::Cut, e))?;
            (clip, next)
        };
        self.clipboard = clip;
        self.commit(Command::Cut, next);
        Ok(())
    }

    /// Write the clipboard into `at`. Returns false (and records nothing) if
    /// the clipboard is empty.
    pub fn paste(&mut self, at: FocusedCell) -> Result<bool> {
        let next = {
            let view = self.view();
            match self.clipboard.paste(&view, at) {
                Ok(Some(write)) => write.apply(self.grid()),
                Ok(None) => return Ok(false),
                Err(e) => Err(e),
            }
        };
        self.apply(Command::Paste, next)?;
        Ok(true)
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Step back one entry. Returns false at the start of history.
    pub fn undo(&mut self) -> bool {
        if self.history.undo().is_none() {
            return false;
        }
        self.retain_view_columns();
        self.clamp_focus();
        self.notify(Command::Undo);
        true
    }

    /// Step forward one entry. Returns false at the top of history.
    pub fn redo(&mut self) -> bool {
        if self.history.redo().is_none() {
            return false;
        }
        self.retain_view_columns();
        self.clamp_focus();
        self.notify(Command::Redo);
        true
    }

    // =========================================================================
    // View state (not history steps)
    // =========================================================================

    pub fn set_filter(&mut self, col: usize, filter: ColumnFilter) -> Result<()> {
        GridError::check(Axis::Column, col, self.grid().col_count())?;
        debug!("filter column {}: {} {:?}", col, filter.kind, filter.value);
        self.filter.set(col, filter);
        self.view_changed();
        Ok(())
    }

    pub fn clear_filter(&mut self, col: usize) {
        self.filter.clear(col);
        self.view_changed();
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear_all();
        self.view_changed();
    }

    /// Header click: ascending on `col` flips to descending, anything else
    /// sorts `col` ascending with the configured value kind.
    pub fn set_sort(&mut self, col: usize) -> Result<()> {
        GridError::check(Axis::Column, col, self.grid().col_count())?;
        self.sort = self.sort.toggled(col, self.options.sort_value_kind);
        debug!("sort column {} {:?} as {}", col, self.sort.direction, self.sort.value_kind);
        self.view_changed();
        Ok(())
    }

    pub fn set_sort_spec(&mut self, sort: SortSpec) -> Result<()> {
        if let Some(col) = sort.key {
            GridError::check(Axis::Column, col, self.grid().col_count())?;
        }
        self.sort = sort;
        self.view_changed();
        Ok(())
    }

    pub fn clear_sort(&mut self) {
        self.sort = SortSpec::none();
        self.view_changed();
    }

    // =========================================================================
    // Wholesale replacement
    // =========================================================================

    /// Replace the grid with fresh seed data. Filter, sort and focus reset.
    pub fn refresh<R, S>(&mut self, seed: &[R])
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let next = Grid::initialize(seed, self.options.min_rows, self.options.min_cols);
        info!("refresh: {} rows x {} columns", next.row_count(), next.col_count());
        self.filter.clear_all();
        self.sort = SortSpec::none();
        self.focus = FocusedCell::default();
        self.commit(Command::Refresh, next);
    }

    /// Replace the grid with an imported snapshot. Filter and sort reset.
    pub fn import_grid(&mut self, grid: Grid) {
        info!("import: {} rows x {} columns", grid.row_count(), grid.col_count());
        self.filter.clear_all();
        self.sort = SortSpec::none();
        self.commit(Command::Import, grid);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn storage_index(&self, view_row: usize) -> Result<usize> {
        let view = self.view();
        view.storage_index(view_row).ok_or(GridError::InvalidIndex {
            axis: Axis::ViewRow,
            index: view_row,
            len: view.len(),
        })
    }

    /// Commit a fallible mutation, or log and return its error.
    fn apply(&mut self, command: Command, next: Result<Grid>) -> Result<()> {
        let next = next.map_err(|e| rejected(command, e))?;
        self.commit(command, next);
        Ok(())
    }

    fn commit(&mut self, command: Command, next: Grid) {
        debug!("{}: {} rows x {} columns", command, next.row_count(), next.col_count());
        self.history.record(next);
        self.clamp_focus();
        self.notify(command);
    }

    /// Drop filters and sort on columns the live grid no longer has.
    fn retain_view_columns(&mut self) {
        let cols = self.grid().col_count();
        self.filter.retain_columns(cols);
        self.sort.retain_columns(cols);
    }

    /// Keep focus inside the current view after the shape changed.
    fn clamp_focus(&mut self) {
        let rows = self.view().len();
        let cols = self.grid().col_count();
        let focus = navigation::adjust_after_row_deletion(self.focus, rows);
        self.focus = navigation::adjust_after_column_deletion(focus, cols);
    }

    fn notify(&mut self, command: Command) {
        self.revision += 1;
        let event = GridEvent::DataChanged {
            revision: self.revision,
            command,
        };
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    fn view_changed(&mut self) {
        self.clamp_focus();
        for listener in &mut self.listeners {
            listener(&GridEvent::ViewChanged);
        }
    }
}

fn rejected(command: Command, error: GridError) -> GridError {
    warn!("{} rejected: {}", command, error);
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventCollector;
    use crate::view::{PredicateKind, SortDirection};
    use std::sync::{Arc, Mutex};

    fn options() -> EditorOptions {
        EditorOptions {
            min_rows: 0,
            min_cols: 0,
            ..EditorOptions::default()
        }
    }

    fn people() -> Editor {
        Editor::new(&[vec!["Name", "Age"], vec!["Ann", "30"], vec!["Bo", "25"]], options())
    }

    fn at(row: usize, col: usize) -> FocusedCell {
        FocusedCell::new(row, col)
    }

    fn collect(editor: &mut Editor) -> Arc<Mutex<EventCollector>> {
        let collector = Arc::new(Mutex::new(EventCollector::new()));
        let sink = Arc::clone(&collector);
        editor.subscribe(Box::new(move |event| {
            sink.lock().unwrap().push(event.clone());
        }));
        collector
    }

    #[test]
    fn test_new_applies_minimums() {
        let editor = Editor::new(&[vec!["a"]], EditorOptions::default());
        assert_eq!(editor.grid().row_count(), 20);
        assert_eq!(editor.grid().col_count(), 10);
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_set_cell_targets_row_under_sort() {
        let mut editor = people();
        editor
            .set_sort_spec(SortSpec::by(1, SortDirection::Ascending, ValueKind::Number))
            .unwrap();

        // "Name" parses as 0 and sorts first, then Bo (25)
        assert_eq!(editor.view().cell(1, 0), Some("Bo"));
        editor.set_cell(at(1, 1), "26").unwrap();

        assert_eq!(editor.grid().cell(2, 1), Some("26"));
        assert_eq!(editor.grid().cell(1, 1), Some("30"));
    }

    #[test]
    fn test_set_cell_targets_row_under_filter() {
        let mut editor = people();
        editor
            .set_filter(0, ColumnFilter::new(PredicateKind::Equals, "bo"))
            .unwrap();
        assert_eq!(editor.view().len(), 1);

        editor.set_cell(at(0, 0), "Bob").unwrap();
        assert_eq!(editor.grid().cell(2, 0), Some("Bob"));
    }

    #[test]
    fn test_each_command_is_one_undo_step() {
        let mut editor = people();
        let original = editor.grid().clone();

        editor.set_cell(at(1, 0), "Anna").unwrap();
        editor.insert_row(0, RowSide::Below).unwrap();
        editor.delete_column(1).unwrap();
        assert_eq!(editor.history().len(), 4);

        assert!(editor.undo());
        assert!(editor.undo());
        assert!(editor.undo());
        assert_eq!(editor.grid(), &original);
        assert!(!editor.undo());
    }

    #[test]
    fn test_undo_then_edit_truncates_redo() {
        let mut editor = people();
        editor.set_cell(at(0, 0), "x").unwrap();
        editor.undo();
        editor.set_cell(at(0, 0), "y").unwrap();
        assert!(!editor.redo());
        assert_eq!(editor.grid().cell(0, 0), Some("y"));
    }

    #[test]
    fn test_invalid_index_leaves_state() {
        let mut editor = people();
        assert_eq!(
            editor.set_cell(at(9, 0), "x"),
            Err(GridError::InvalidIndex { axis: Axis::ViewRow, index: 9, len: 3 })
        );
        assert_eq!(
            editor.delete_column(2),
            Err(GridError::InvalidIndex { axis: Axis::Column, index: 2, len: 2 })
        );
        assert_eq!(editor.history().len(), 1);
        assert_eq!(editor.revision(), 0);
    }

    #[test]
    fn test_delete_row_resolves_through_view() {
        let mut editor = people();
        editor
            .set_sort_spec(SortSpec::by(0, SortDirection::Descending, ValueKind::Text))
            .unwrap();
        // Descending text: Name, Bo, Ann
        editor.delete_row(1).unwrap();
        assert_eq!(editor.grid().to_data(), vec![vec!["Name", "Age"], vec!["Ann", "30"]]);
    }

    #[test]
    fn test_delete_clamps_focus() {
        let mut editor = people();
        editor.set_focus(at(2, 1)).unwrap();
        editor.delete_row(2).unwrap();
        assert_eq!(editor.focus(), at(1, 1));
        editor.delete_column(1).unwrap();
        assert_eq!(editor.focus(), at(1, 0));
    }

    #[test]
    fn test_delete_last_row_is_noop_on_data() {
        let mut editor = Editor::new(&[vec!["only"]], options());
        let before = editor.grid().clone();
        editor.delete_row(0).unwrap();
        editor.delete_column(0).unwrap();
        assert_eq!(editor.grid(), &before);
        assert_eq!(editor.history().len(), 1);
        assert_eq!(editor.revision(), 0);
    }

    #[test]
    fn test_delete_last_row_keeps_redo() {
        let mut editor = Editor::new(&[vec!["a"]], options());
        let events = collect(&mut editor);
        editor.set_cell(at(0, 0), "b").unwrap();
        assert!(editor.undo());
        let revision = editor.revision();

        editor.delete_row(0).unwrap();
        editor.delete_column(0).unwrap();

        assert!(editor.can_redo());
        assert_eq!(editor.revision(), revision);
        assert_eq!(events.lock().unwrap().len(), 2);
        assert!(editor.redo());
        assert_eq!(editor.grid().cell(0, 0), Some("b"));
    }

    #[test]
    fn test_filter_and_sort_follow_inserted_column() {
        let mut editor = people();
        editor
            .set_filter(1, ColumnFilter::new(PredicateKind::LessThan, "28"))
            .unwrap();
        editor
            .set_sort_spec(SortSpec::by(1, SortDirection::Ascending, ValueKind::Number))
            .unwrap();

        editor.insert_column(0, ColumnSide::Left).unwrap();
        assert!(editor.filter().get(1).is_none());
        assert!(editor.filter().get(2).is_some());
        assert_eq!(editor.sort().key, Some(2));
        // Age column still does the filtering: only Bo (25) passes
        assert_eq!(editor.view().to_data(), vec![vec!["", "Bo", "25"]]);

        // Right of the key leaves it alone
        editor.insert_column(2, ColumnSide::Right).unwrap();
        assert_eq!(editor.sort().key, Some(2));
    }

    #[test]
    fn test_delete_column_drops_its_filter_and_sort() {
        let mut editor = people();
        editor
            .set_filter(0, ColumnFilter::new(PredicateKind::Equals, "ann"))
            .unwrap();
        editor
            .set_filter(1, ColumnFilter::new(PredicateKind::NotEmpty, "x"))
            .unwrap();
        editor.set_sort(0).unwrap();

        editor.delete_column(0).unwrap();
        assert_eq!(editor.sort(), &SortSpec::none());
        assert!(editor.filter().get(1).is_none());
        assert_eq!(
            editor.filter().get(0),
            Some(&ColumnFilter::new(PredicateKind::NotEmpty, "x"))
        );
        assert_eq!(editor.view().len(), 3);
    }

    #[test]
    fn test_undo_drops_filter_on_vanished_column() {
        let mut editor = people();
        editor.add_column();
        editor
            .set_filter(2, ColumnFilter::new(PredicateKind::Empty, "x"))
            .unwrap();
        editor.set_sort(2).unwrap();

        assert!(editor.undo());
        assert_eq!(editor.grid().col_count(), 2);
        assert!(!editor.filter().is_active());
        assert_eq!(editor.sort(), &SortSpec::none());
    }

    #[test]
    fn test_cut_paste_moves_value() {
        let mut editor = people();
        editor.cut(at(1, 0)).unwrap();
        editor.navigate(NavIntent::Down);
        editor.navigate(NavIntent::Right);
        assert!(editor.paste(at(2, 1)).unwrap());

        assert_eq!(editor.grid().cell(1, 0), Some(""));
        assert_eq!(editor.grid().cell(2, 1), Some("Ann"));
        // cut + paste are two steps
        assert_eq!(editor.history().len(), 3);
    }

    #[test]
    fn test_copy_is_not_a_history_step() {
        let mut editor = people();
        editor.copy(at(1, 0)).unwrap();
        assert_eq!(editor.clipboard().value(), "Ann");
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_paste_empty_clipboard_records_nothing() {
        let mut editor = people();
        assert_eq!(editor.paste(at(0, 0)), Ok(false));
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_set_sort_toggles() {
        let mut editor = people();
        editor.set_sort(1).unwrap();
        assert_eq!(editor.sort().direction, SortDirection::Ascending);
        editor.set_sort(1).unwrap();
        assert_eq!(editor.sort().direction, SortDirection::Descending);
        editor.set_sort(1).unwrap();
        assert_eq!(editor.sort().direction, SortDirection::Ascending);
        editor.set_sort(0).unwrap();
        assert_eq!(editor.sort().key, Some(0));
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_clear_all_resets_view_state() {
        let mut editor = people();
        editor.set_filter(0, ColumnFilter::new(PredicateKind::Contains, "a")).unwrap();
        editor.set_sort(0).unwrap();
        let ids = editor.grid().rows().iter().map(|r| r.id()).collect::<Vec<_>>();

        editor.clear_all();
        assert!(!editor.filter().is_active());
        assert_eq!(editor.sort().key, None);
        assert!(editor.grid().is_blank());
        let after = editor.grid().rows().iter().map(|r| r.id()).collect::<Vec<_>>();
        assert_eq!(ids, after);
    }

    #[test]
    fn test_refresh_resets_focus_and_is_undoable() {
        let mut editor = people();
        editor.set_focus(at(2, 1)).unwrap();
        editor.refresh(&[vec!["z"]]);
        assert_eq!(editor.focus(), at(0, 0));
        assert_eq!(editor.grid().to_data(), vec![vec!["z"]]);

        assert!(editor.undo());
        assert_eq!(editor.grid().cell(1, 0), Some("Ann"));
    }

    #[test]
    fn test_import_replaces_grid() {
        let mut editor = people();
        editor.set_focus(at(2, 1)).unwrap();
        editor.import_grid(Grid::initialize(&[vec!["q"]], 0, 0));
        assert_eq!(editor.grid().to_data(), vec![vec!["q"]]);
        assert_eq!(editor.focus(), at(0, 0));
    }

    #[test]
    fn test_events_one_per_step() {
        let mut editor = people();
        let events = collect(&mut editor);

        editor.set_cell(at(0, 0), "x").unwrap();
        editor.set_sort(0).unwrap();
        editor.undo();
        editor.redo();
        editor.redo();
        let _ = editor.set_cell(at(7, 0), "bad");

        let events = events.lock().unwrap();
        assert_eq!(events.commands(), vec![Command::SetCell, Command::Undo, Command::Redo]);
        assert_eq!(events.revisions(), vec![1, 2, 3]);
        assert!(events.events().contains(&GridEvent::ViewChanged));
    }

    #[test]
    fn test_history_limit_from_options() {
        let mut editor = Editor::new(
            &[vec!["a"]],
            EditorOptions { history_limit: 2, ..options() },
        );
        editor.set_cell(at(0, 0), "b").unwrap();
        editor.set_cell(at(0, 0), "c").unwrap();
        assert!(editor.undo());
        assert!(!editor.undo());
        assert_eq!(editor.grid().cell(0, 0), Some("b"));
    }

    #[test]
    fn test_navigate_wraps_in_view_space() {
        let mut editor = people();
        editor.set_filter(0, ColumnFilter::new(PredicateKind::NotEmpty, "x")).unwrap();
        assert_eq!(editor.navigate(NavIntent::Up), at(2, 0));
        assert_eq!(editor.navigate(NavIntent::Tab), at(2, 1));
        assert_eq!(editor.navigate(NavIntent::Tab), at(0, 0));
    }

    #[test]
    fn test_set_focus_rejects_outside_view() {
        let mut editor = people();
        assert!(editor.set_focus(at(3, 0)).is_err());
        assert!(editor.set_focus(at(0, 2)).is_err());
        assert_eq!(editor.focus(), at(0, 0));
    }
}
