//! LDtk project binding
//!
//! Serde models for the part of the LDtk JSON export the pipeline reads,
//! plus loading from disk. Everything else in the document is ignored.

mod load;
mod schema;

pub use load::*;
pub use schema::*;
