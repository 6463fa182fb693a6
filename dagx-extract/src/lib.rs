//! DAG extractor - Extraction Core
//!
//! Extracts, from every basic block of a function, the acyclic dependency
//! graph formed by pure arithmetic/logic instructions, and records each one
//! as a small self-contained function in a shared, line-oriented corpus.
//!
//! The pipeline for one function is:
//! - `traversal` - classify values as internal or live-in, in dependency order
//! - `synth` - build a closed wrapper function from the extracted unit
//! - `preserve` - keep otherwise unused results observable
//! - `record` - render and escape the wrapper as one corpus line
//! - `sink` - append the function's records under an exclusive file lock

pub mod classify;
pub mod extractor;
pub mod options;
pub mod preserve;
pub mod record;
pub mod sink;
pub mod synth;
pub mod traversal;

pub use classify::is_supported;
pub use extractor::{extract_function, DagExtractor, ExtractStats, ExtractSummary};
pub use options::ExtractOptions;
pub use record::{read_records, Record};
pub use sink::{AppendSink, SinkOutcome};
pub use synth::SyntheticFunction;
pub use traversal::{extract_block, ExtractedUnit, LiveIn};

#[cfg(test)]
mod test_helpers;
