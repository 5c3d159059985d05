// Editor-level save and import.

use std::path::{Path, PathBuf};

use log::{info, warn};

use gridedit_engine::editor::{Editor, EditorOptions};

use crate::error::{ExportError, ImportError};
use crate::json;

/// Save the editor's grid (storage order, not the view) as `<dir>/<file_name>.json`.
/// Not a history step.
pub fn save(editor: &Editor, dir: &Path, file_name: &str) -> Result<PathBuf, ExportError> {
    let path = json::export(editor.grid(), dir, file_name)?;
    info!("saved {}", path.display());
    Ok(path)
}

/// Replace the editor's grid with an imported document (one history step).
/// On failure the editor is unchanged.
pub fn import(editor: &mut Editor, bytes: &[u8]) -> Result<(), ImportError> {
    let options = *editor.options();
    match json::deserialize(bytes, options.min_rows, options.min_cols) {
        Ok(grid) => {
            editor.import_grid(grid);
            Ok(())
        }
        Err(e) => {
            warn!("import rejected: {}", e);
            Err(e)
        }
    }
}

/// Start a fresh editor whose initial snapshot is the document.
pub fn open(bytes: &[u8], options: EditorOptions) -> Result<Editor, ImportError> {
    let grid = json::deserialize(bytes, options.min_rows, options.min_cols)?;
    info!("opened document: {} rows x {} columns", grid.row_count(), grid.col_count());
    Ok(Editor::with_grid(grid, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridedit_core::FocusedCell;
    use gridedit_engine::view::{SortDirection, SortSpec, ValueKind};
    use tempfile::tempdir;

    fn options() -> EditorOptions {
        EditorOptions {
            min_rows: 2,
            min_cols: 2,
            ..EditorOptions::default()
        }
    }

    #[test]
    fn test_save_uses_storage_order() {
        let dir = tempdir().unwrap();
        let mut editor = Editor::new(&[vec!["b"], vec!["a"]], options());
        editor
            .set_sort_spec(SortSpec::by(0, SortDirection::Ascending, ValueKind::Text))
            .unwrap();

        let path = save(&editor, dir.path(), "sorted").unwrap();
        let doc = json::read_document(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(doc.data, vec![vec!["b", ""], vec!["a", ""]]);
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_import_is_one_undo_step() {
        let mut editor = Editor::new(&[vec!["old"]], options());
        import(&mut editor, br#"{"data": [["new"]]}"#).unwrap();
        assert_eq!(editor.grid().cell(0, 0), Some("new"));
        assert_eq!(editor.grid().row_count(), 2);

        assert!(editor.undo());
        assert_eq!(editor.grid().cell(0, 0), Some("old"));
    }

    #[test]
    fn test_failed_import_leaves_editor() {
        let mut editor = Editor::new(&[vec!["keep"]], options());
        editor.set_focus(FocusedCell::new(1, 1)).unwrap();
        let before = editor.grid().clone();

        assert!(import(&mut editor, b"nope").is_err());
        assert_eq!(editor.grid(), &before);
        assert_eq!(editor.focus(), FocusedCell::new(1, 1));
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_open_starts_fresh_history() {
        let editor = open(br#"{"data": [["x", "y"]]}"#, options()).unwrap();
        assert_eq!(editor.grid().to_data(), vec![vec!["x", "y"], vec!["", ""]]);
        assert!(!editor.can_undo());
    }
}
