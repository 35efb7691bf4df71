//! FILENAME: persistence/src/lib.rs
//! Knitting Machine Dashboard Record Store
//!
//! Loads machine records from the backing XLSX workbook and normalizes them
//! into typed record collections. Read-only: the dashboard never writes
//! machine data back.

mod error;
mod xlsx_reader;

pub use error::PersistenceError;
pub use xlsx_reader::load_source;

use std::path::PathBuf;

use engine::{RecordCollection, Source};

// ============================================================================
// SOURCE LOADER
// ============================================================================

/// Supplies record collections to the report pipeline.
///
/// The production implementation re-reads the workbook on every call so each
/// render cycle sees a fresh snapshot. Tests inject fixed in-memory
/// snapshots through this seam to assert determinism.
pub trait SourceLoader {
    fn load(&self, source: Source) -> Result<RecordCollection, PersistenceError>;
}

/// Loads collections from an XLSX workbook on disk.
#[derive(Debug, Clone)]
pub struct XlsxLoader {
    path: PathBuf,
}

impl XlsxLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        XlsxLoader { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SourceLoader for XlsxLoader {
    fn load(&self, source: Source) -> Result<RecordCollection, PersistenceError> {
        load_source(&self.path, source)
    }
}
