// src/export/mod.rs
// =============================================================================
// Turning raw GitHub JSON into CSV files.
//
// Submodules:
// - normalize: UserRecord / RepositoryRecord and the field mapping
// - writer: CSV output
// =============================================================================

mod normalize;
mod writer;

pub use normalize::{RepositoryRecord, UserRecord};
pub use writer::write_csv;
