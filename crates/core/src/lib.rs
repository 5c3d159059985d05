// Core types shared by the engine and its callers

pub mod naming;
pub mod navigation;

pub use naming::{col_to_letters, column_headers, letters_to_col};
pub use navigation::{FocusedCell, NavIntent};
