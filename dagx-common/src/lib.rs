//! DAG extractor - Common Types and Errors
//!
//! Identifier types and the error type shared by the IR, the extraction
//! core and the driver.

pub mod error;
pub mod types;

pub use error::DagError;
pub use types::*;
