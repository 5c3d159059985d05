use thiserror::Error;

/// Why a document could not be imported. The editor is left untouched.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing \"data\" field")]
    MissingData,

    #[error("\"data\" is not an array")]
    DataNotArray,

    #[error("row {row} is not an array")]
    RowNotArray { row: usize },

    #[error("row {row}, column {col}: cell is not a scalar")]
    InvalidCell { row: usize, col: usize },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("file name is empty")]
    EmptyFileName,

    #[error("file name must not contain a path: {0:?}")]
    InvalidFileName(String),
}
