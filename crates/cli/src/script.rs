// Editor commands as one-line text, for `gridedit apply`.
//
// Cell references ("B3") and row numbers are 1-based VIEW coordinates, so a
// `filter` or `sort` earlier in the same script changes what later addresses
// point at.

use std::str::FromStr;

use gridedit_core::{letters_to_col, FocusedCell, NavIntent};
use gridedit_engine::editor::Editor;
use gridedit_engine::error::GridError;
use gridedit_engine::grid::{ColumnSide, RowSide};
use gridedit_engine::view::{ColumnFilter, PredicateKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Set(FocusedCell, String),
    Clear(FocusedCell),
    InsertRow(usize, RowSide),
    InsertColumn(usize, ColumnSide),
    DeleteRow(usize),
    DeleteColumn(usize),
    AddRow,
    AddColumn,
    ClearAll,
    Copy(FocusedCell),
    Cut(FocusedCell),
    Paste(FocusedCell),
    Undo,
    Redo,
    Filter(usize, ColumnFilter),
    ClearFilter(usize),
    Sort(usize),
    ClearSort,
    Goto(FocusedCell),
    Move(NavIntent),
}

/// Parse "B3" into a 0-based view coordinate.
pub fn parse_cell_ref(s: &str) -> Option<FocusedCell> {
    let split = s.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = s.split_at(split);
    let col = letters_to_col(letters)?;
    let row = parse_row_number(digits)?;
    Some(FocusedCell::new(row, col))
}

/// Parse a 1-based row number into a 0-based index.
fn parse_row_number(s: &str) -> Option<usize> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<usize>().ok()?.checked_sub(1)
}

fn cell(arg: &str) -> Result<FocusedCell, String> {
    parse_cell_ref(arg).ok_or_else(|| format!("invalid cell reference: {:?}", arg))
}

fn column(arg: &str) -> Result<usize, String> {
    letters_to_col(arg).ok_or_else(|| format!("invalid column: {:?}", arg))
}

fn row(arg: &str) -> Result<usize, String> {
    parse_row_number(arg).ok_or_else(|| format!("invalid row number: {:?}", arg))
}

/// Split off the first word; the remainder keeps its inner spacing.
fn next_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    s.split_once(char::is_whitespace).unwrap_or((s, ""))
}

fn expect_end(verb: &str, rest: &str) -> Result<(), String> {
    if rest.trim().is_empty() {
        Ok(())
    } else {
        Err(format!("{}: unexpected argument {:?}", verb, rest.trim()))
    }
}

/// Parse one command line.
pub fn parse_command(line: &str) -> Result<ScriptCommand, String> {
    let (verb, rest) = next_word(line);
    let (arg, tail) = next_word(rest);

    let command = match verb.to_ascii_lowercase().as_str() {
        "set" => {
            // Everything after the cell reference and one separator is the value
            let value = rest.trim_start().split_once(char::is_whitespace).map_or("", |(_, v)| v);
            return Ok(ScriptCommand::Set(cell(arg)?, value.to_string()));
        }
        "clear" => ScriptCommand::Clear(cell(arg)?),
        "copy" => ScriptCommand::Copy(cell(arg)?),
        "cut" => ScriptCommand::Cut(cell(arg)?),
        "paste" => ScriptCommand::Paste(cell(arg)?),
        "goto" => ScriptCommand::Goto(cell(arg)?),
        "insert-row" => {
            let (side, tail) = next_word(tail);
            expect_end(verb, tail)?;
            return Ok(ScriptCommand::InsertRow(row(arg)?, RowSide::from_str(side)?));
        }
        "insert-column" => {
            let (side, tail) = next_word(tail);
            expect_end(verb, tail)?;
            return Ok(ScriptCommand::InsertColumn(column(arg)?, ColumnSide::from_str(side)?));
        }
        "delete-row" => ScriptCommand::DeleteRow(row(arg)?),
        "delete-column" => ScriptCommand::DeleteColumn(column(arg)?),
        "clear-filter" => ScriptCommand::ClearFilter(column(arg)?),
        "sort" => ScriptCommand::Sort(column(arg)?),
        "move" => ScriptCommand::Move(NavIntent::from_str(arg)?),
        "filter" => {
            let (kind, value) = next_word(tail);
            let kind = PredicateKind::from_str(kind)?;
            return Ok(ScriptCommand::Filter(column(arg)?, ColumnFilter::new(kind, value.trim())));
        }
        "add-row" | "add-column" | "clear-all" | "undo" | "redo" | "clear-sort" => {
            expect_end(verb, rest)?;
            return Ok(match verb.to_ascii_lowercase().as_str() {
                "add-row" => ScriptCommand::AddRow,
                "add-column" => ScriptCommand::AddColumn,
                "clear-all" => ScriptCommand::ClearAll,
                "undo" => ScriptCommand::Undo,
                "redo" => ScriptCommand::Redo,
                _ => ScriptCommand::ClearSort,
            });
        }
        "" => return Err("empty command".to_string()),
        other => return Err(format!("unknown command: {}", other)),
    };

    expect_end(verb, tail)?;
    Ok(command)
}

/// Apply one command to the editor.
pub fn run(editor: &mut Editor, command: &ScriptCommand) -> Result<(), GridError> {
    match command {
        ScriptCommand::Set(at, value) => editor.set_cell(*at, value.clone()),
        ScriptCommand::Clear(at) => editor.clear_cell(*at),
        ScriptCommand::InsertRow(row, side) => editor.insert_row(*row, *side),
        ScriptCommand::InsertColumn(col, side) => editor.insert_column(*col, *side),
        ScriptCommand::DeleteRow(row) => editor.delete_row(*row),
        ScriptCommand::DeleteColumn(col) => editor.delete_column(*col),
        ScriptCommand::AddRow => {
            editor.add_row();
            Ok(())
        }
        ScriptCommand::AddColumn => {
            editor.add_column();
            Ok(())
        }
        ScriptCommand::ClearAll => {
            editor.clear_all();
            Ok(())
        }
        ScriptCommand::Copy(at) => editor.copy(*at),
        ScriptCommand::Cut(at) => editor.cut(*at),
        ScriptCommand::Paste(at) => editor.paste(*at).map(|_| ()),
        ScriptCommand::Undo => {
            editor.undo();
            Ok(())
        }
        ScriptCommand::Redo => {
            editor.redo();
            Ok(())
        }
        ScriptCommand::Filter(col, filter) => editor.set_filter(*col, filter.clone()),
        ScriptCommand::ClearFilter(col) => {
            editor.clear_filter(*col);
            Ok(())
        }
        ScriptCommand::Sort(col) => editor.set_sort(*col),
        ScriptCommand::ClearSort => {
            editor.clear_sort();
            Ok(())
        }
        ScriptCommand::Goto(at) => editor.set_focus(*at),
        ScriptCommand::Move(intent) => {
            editor.navigate(*intent);
            Ok(())
        }
    }
}
