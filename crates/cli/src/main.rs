// gridedit CLI - headless editing of tabular JSON documents

mod exit_codes;
mod render;
mod script;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};

use exit_codes::{EXIT_ERROR, EXIT_EXPORT, EXIT_IMPORT, EXIT_SUCCESS, EXIT_USAGE};
use gridedit_config::Settings;
use gridedit_core::letters_to_col;
use gridedit_engine::editor::Editor;
use gridedit_engine::grid::Grid;
use gridedit_engine::view::{ColumnFilter, PredicateKind, SortDirection, SortSpec, ValueKind};
use gridedit_io::{document, json, ExportError, ImportError};

#[derive(Parser)]
#[command(name = "gridedit")]
#[command(about = "Tabular JSON documents: view, filter, sort and edit (headless)")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Log every editor command (debug level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Settings file (default: <config dir>/gridedit/settings.json)
    #[arg(long, global = true, env = "GRIDEDIT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an empty document
    #[command(after_help = "\
Examples:
  gridedit new budget
  gridedit new budget --rows 50 --cols 8 --dir ~/sheets")]
    New {
        /// File name without extension (default: file.defaultName setting)
        name: Option<String>,

        /// Row count (default: grid.minRows setting)
        #[arg(long)]
        rows: Option<usize>,

        /// Column count (default: grid.minColumns setting)
        #[arg(long)]
        cols: Option<usize>,

        /// Directory to write into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Print a document through optional filters and a sort
    #[command(after_help = "\
Filter KIND is one of: contains, equals, startsWith, endsWith,
greaterThan, lessThan, notEmpty, empty. Text matching is case-insensitive.

Examples:
  gridedit show people.json
  gridedit show people.json --filter A:startsWith:an
  gridedit show people.json --filter B:greaterThan:25 --sort B:desc:number
  gridedit show people.json --sort C:date --json")]
    Show {
        /// Document to read
        file: PathBuf,

        /// COL:KIND[:VALUE]. Repeatable; all filters must match.
        #[arg(long, value_name = "FILTER")]
        filter: Vec<String>,

        /// COL[:asc|desc][:number|date|text]
        #[arg(long, value_name = "SORT")]
        sort: Option<String>,

        /// Print the visible rows as a JSON array of arrays
        #[arg(long)]
        json: bool,
    },

    /// Run editor commands against a document and save the result
    #[command(after_help = "\
Each COMMAND is one quoted line. Cells and row numbers address the view,
so filter and sort commands change what later addresses point at.

Commands:
  set CELL TEXT             clear CELL
  insert-row ROW above|below    insert-column COL left|right
  delete-row ROW            delete-column COL
  add-row    add-column     clear-all
  copy CELL  cut CELL       paste CELL
  undo       redo
  filter COL KIND [VALUE]   clear-filter COL
  sort COL                  clear-sort
  goto CELL                 move up|down|left|right|tab|shift-tab|enter

Examples:
  gridedit apply people.json 'set A2 Anna' 'insert-row 2 below'
  gridedit apply people.json 'delete-column B' undo -o copy.json")]
    Apply {
        /// Document to read
        file: PathBuf,

        /// Commands to run, in order
        #[arg(required = true, value_name = "COMMAND")]
        commands: Vec<String>,

        /// Write here instead of overwriting the input (".json" is appended)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Suppress the summary line
        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    debug!("settings: {:?}", settings);

    let result = match cli.command {
        None => {
            // No subcommand = show usage
            eprintln!("Usage: gridedit <command> [options]");
            eprintln!("       gridedit --help for more information");
            Ok(())
        }
        Some(Commands::New { name, rows, cols, dir }) => cmd_new(&settings, name, rows, cols, dir),
        Some(Commands::Show { file, filter, sort, json }) => cmd_show(&settings, file, filter, sort, json),
        Some(Commands::Apply { file, commands, output, quiet }) => {
            cmd_apply(&settings, file, commands, output, quiet)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// `RUST_LOG` wins over the default level; `-v` forces debug.
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn command(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn import(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IMPORT, message: msg.into(), hint: None }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self { code: EXIT_EXPORT, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ImportError> for CliError {
    fn from(err: ImportError) -> Self {
        let hint = match &err {
            ImportError::Json(_) => Some("is this a gridedit JSON document?"),
            ImportError::MissingData | ImportError::DataNotArray => {
                Some("expected {\"data\": [[\"cell\", ...], ...]}")
            }
            _ => None,
        };
        let error = CliError::import(format!("invalid document: {}", err));
        match hint {
            Some(hint) => error.with_hint(hint),
            None => error,
        }
    }
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        CliError::export(err.to_string())
    }
}

// ============================================================================
// new
// ============================================================================

fn cmd_new(
    settings: &Settings,
    name: Option<String>,
    rows: Option<usize>,
    cols: Option<usize>,
    dir: PathBuf,
) -> Result<(), CliError> {
    let name = name.unwrap_or_else(|| settings.default_file_name.clone());
    let grid = Grid::blank(
        rows.unwrap_or(settings.min_rows),
        cols.unwrap_or(settings.min_columns),
    );

    let path = json::export(&grid, &dir, &name)?;
    println!("{}", path.display());
    Ok(())
}

// ============================================================================
// show
// ============================================================================

fn cmd_show(
    settings: &Settings,
    file: PathBuf,
    filters: Vec<String>,
    sort: Option<String>,
    as_json: bool,
) -> Result<(), CliError> {
    let mut editor = open(settings, &file)?;

    for arg in &filters {
        let (col, filter) = parse_filter_arg(arg).map_err(CliError::args)?;
        editor
            .set_filter(col, filter)
            .map_err(|e| CliError::args(format!("--filter {}: {}", arg, e)))?;
    }

    if let Some(arg) = &sort {
        let spec = parse_sort_arg(arg, settings.sort_value_kind).map_err(CliError::args)?;
        editor
            .set_sort_spec(spec)
            .map_err(|e| CliError::args(format!("--sort {}: {}", arg, e)))?;
    }

    let view = editor.view();
    if as_json {
        let out = render::json(&view).map_err(|e| CliError::command(e.to_string()))?;
        println!("{}", out);
    } else {
        print!("{}", render::table(&view, editor.sort(), editor.grid().col_count()));
    }
    Ok(())
}

/// Parse `COL:KIND[:VALUE]`. The value may itself contain colons.
fn parse_filter_arg(arg: &str) -> Result<(usize, ColumnFilter), String> {
    let mut parts = arg.splitn(3, ':');
    let col = parts.next().unwrap_or_default();
    let kind = parts
        .next()
        .ok_or_else(|| format!("--filter {}: expected COL:KIND[:VALUE]", arg))?;
    let value = parts.next().unwrap_or_default();

    let col = letters_to_col(col).ok_or_else(|| format!("--filter {}: invalid column {:?}", arg, col))?;
    let kind: PredicateKind = kind.parse().map_err(|e| format!("--filter {}: {}", arg, e))?;
    Ok((col, ColumnFilter::new(kind, value)))
}

/// Parse `COL[:asc|desc][:KIND]`, in any order after the column.
fn parse_sort_arg(arg: &str, default_kind: ValueKind) -> Result<SortSpec, String> {
    let mut parts = arg.split(':');
    let col = parts.next().unwrap_or_default();
    let col = letters_to_col(col).ok_or_else(|| format!("--sort {}: invalid column {:?}", arg, col))?;

    let mut direction = SortDirection::Ascending;
    let mut kind = default_kind;
    for part in parts {
        match part.to_ascii_lowercase().as_str() {
            "asc" => direction = SortDirection::Ascending,
            "desc" => direction = SortDirection::Descending,
            other => kind = other.parse().map_err(|e| format!("--sort {}: {}", arg, e))?,
        }
    }
    Ok(SortSpec::by(col, direction, kind))
}

// ============================================================================
// apply
// ============================================================================

fn cmd_apply(
    settings: &Settings,
    file: PathBuf,
    commands: Vec<String>,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    // Parse everything first so a typo never leaves a half-applied file
    let parsed = commands
        .iter()
        .map(|line| script::parse_command(line).map_err(|e| CliError::args(format!("{:?}: {}", line, e))))
        .collect::<Result<Vec<_>, _>>()?;

    let mut editor = open(settings, &file)?;
    for (i, (line, command)) in commands.iter().zip(&parsed).enumerate() {
        script::run(&mut editor, command).map_err(|e| {
            CliError::command(format!("command {} ({:?}): {}", i + 1, line, e))
                .with_hint("cells and rows address the current view; check earlier filter/sort commands")
        })?;
    }

    let target = output.unwrap_or(file);
    let (dir, name) = split_target(&target)?;
    let path = document::save(&editor, dir, name)?;

    if !quiet {
        println!(
            "{}: {} commands, {} rows x {} columns",
            path.display(),
            parsed.len(),
            editor.grid().row_count(),
            editor.grid().col_count()
        );
    }
    Ok(())
}

/// Directory and extension-less file name for `save`.
fn split_target(target: &Path) -> Result<(&Path, &str), CliError> {
    let name = target
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CliError::args(format!("invalid output path: {}", target.display())))?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((dir, name))
}

// ============================================================================
// helpers
// ============================================================================

fn open(settings: &Settings, file: &Path) -> Result<Editor, CliError> {
    let bytes = fs::read(file)
        .map_err(|e| CliError::import(format!("cannot read {}: {}", file.display(), e)))?;
    Ok(document::open(&bytes, settings.editor_options())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_arg() {
        let (col, filter) = parse_filter_arg("B:greaterThan:25").unwrap();
        assert_eq!(col, 1);
        assert_eq!(filter, ColumnFilter::new(PredicateKind::GreaterThan, "25"));

        let (_, filter) = parse_filter_arg("A:contains:10:30").unwrap();
        assert_eq!(filter.value, "10:30");

        let (_, filter) = parse_filter_arg("c:notEmpty").unwrap();
        assert_eq!(filter.kind, PredicateKind::NotEmpty);
        assert!(!filter.is_active());
    }

    #[test]
    fn test_parse_filter_arg_errors() {
        assert!(parse_filter_arg("B").is_err());
        assert!(parse_filter_arg("1:equals:x").is_err());
        assert!(parse_filter_arg("A:near:x").is_err());
    }

    #[test]
    fn test_parse_sort_arg() {
        assert_eq!(
            parse_sort_arg("B", ValueKind::Text).unwrap(),
            SortSpec::by(1, SortDirection::Ascending, ValueKind::Text)
        );
        assert_eq!(
            parse_sort_arg("B:desc:number", ValueKind::Text).unwrap(),
            SortSpec::by(1, SortDirection::Descending, ValueKind::Number)
        );
        assert_eq!(
            parse_sort_arg("A:date", ValueKind::Text).unwrap(),
            SortSpec::by(0, SortDirection::Ascending, ValueKind::Date)
        );
        assert!(parse_sort_arg("A:sideways", ValueKind::Text).is_err());
        assert!(parse_sort_arg(":desc", ValueKind::Text).is_err());
    }

    #[test]
    fn test_split_target() {
        let (dir, name) = split_target(Path::new("out/people.json")).unwrap();
        assert_eq!(dir, Path::new("out"));
        assert_eq!(name, "people");

        let (dir, name) = split_target(Path::new("people.json")).unwrap();
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "people");
    }
}
