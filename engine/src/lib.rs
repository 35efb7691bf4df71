//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the dashboard core engine.
//! CONTEXT: Re-exports the record model, filter engine and aggregation
//! engine for use by the persistence and report crates.

pub mod aggregate;
pub mod filter;
pub mod record;

// Re-export commonly used types at the crate root
pub use aggregate::{count_by, count_by_pair, count_by_type_ranked, CategoryCount, PairCount};
pub use filter::{FilterCriteria, Selection};
pub use record::{
    Attribute, FieldValue, MachineRecord, OrderedFloat, RecordCollection, Source,
};
