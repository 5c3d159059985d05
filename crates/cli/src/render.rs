// Text rendering of a projected view for `gridedit show`.

use gridedit_core::col_to_letters;
use gridedit_engine::view::{SortSpec, View};

/// Tab-separated table: a header of column letters with sort glyphs, then
/// one line per view row prefixed with its 1-based view row number.
pub fn table(view: &View<'_>, sort: &SortSpec, cols: usize) -> String {
    let mut out = String::new();

    let header: Vec<String> = (0..cols)
        .map(|c| format!("{} {}", col_to_letters(c), sort.indicator(c)))
        .collect();
    out.push('\t');
    out.push_str(&header.join("\t"));
    out.push('\n');

    for (i, row) in view.rows().enumerate() {
        out.push_str(&(i + 1).to_string());
        for cell in row.cells() {
            out.push('\t');
            out.push_str(cell);
        }
        out.push('\n');
    }

    out
}

/// View rows as a JSON array of arrays.
pub fn json(view: &View<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&view.to_data())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridedit_engine::grid::Grid;
    use gridedit_engine::view::{project, FilterSpec, SortDirection, ValueKind};

    #[test]
    fn test_table_marks_sorted_column() {
        let grid = Grid::initialize(&[vec!["b", "2"], vec!["a", "1"]], 0, 0);
        let sort = SortSpec::by(1, SortDirection::Descending, ValueKind::Number);
        let view = project(&grid, &FilterSpec::new(), &sort);

        assert_eq!(table(&view, &sort, 2), "\tA ⇅\tB ↓\n1\tb\t2\n2\ta\t1\n");
    }

    #[test]
    fn test_json_rows() {
        let grid = Grid::initialize(&[vec!["x"]], 0, 0);
        let view = View::identity(&grid);
        let parsed: Vec<Vec<String>> = serde_json::from_str(&json(&view).unwrap()).unwrap();
        assert_eq!(parsed, vec![vec!["x"]]);
    }
}
