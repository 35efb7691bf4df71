//! FILENAME: persistence/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("source workbook not found: {0} (place the dashboard workbook at this path)")]
    SourceNotFound(PathBuf),

    #[error("sheet not found in workbook: {0}")]
    SheetNotFound(String),

    #[error("sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error("XLSX read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
