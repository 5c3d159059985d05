// File I/O operations

pub mod document;
pub mod error;
pub mod json;

pub use error::{ExportError, ImportError};
