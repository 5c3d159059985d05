pub mod clipboard;
pub mod editor;
pub mod error;
pub mod events;
pub mod grid;
pub mod history;
pub mod row_id;
pub mod value;
pub mod view;

pub use editor::{Editor, EditorOptions};
pub use error::{Axis, GridError};
pub use grid::{ColumnSide, Grid, Row, RowSide};
pub use row_id::RowId;
