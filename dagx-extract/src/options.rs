//! Extraction configuration
//!
//! Both settings are resolved by the caller (the driver maps them from
//! `--dump-dags-to` and `--include-live-ins`) before any function is processed.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Corpus file records are appended to. `None` disables output.
    pub output_path: Option<PathBuf>,
    /// When false, instructions defined in other blocks are always live-ins
    pub include_live_ins: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            output_path: None,
            include_live_ins: true,
        }
    }
}

impl ExtractOptions {
    /// Options from raw flag values. An empty path disables output.
    pub fn from_flags(output_path: &str, include_live_ins: bool) -> Self {
        let output_path = if output_path.is_empty() {
            None
        } else {
            Some(PathBuf::from(output_path))
        };
        Self {
            output_path,
            include_live_ins,
        }
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.output_path = (!path.as_os_str().is_empty()).then_some(path);
        self
    }
}
