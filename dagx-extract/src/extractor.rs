//! Per-function extraction driver
//!
//! [`DagExtractor`] is created once per pipeline run and invoked once per
//! function. It never modifies the function it looks at, so every call
//! reports "unchanged"; only a fatal sink fault surfaces as an error.

use dagx_common::DagError;
use dagx_ir::{Function, Module};
use log::{debug, warn};

use crate::options::ExtractOptions;
use crate::preserve::preserve_dead_values;
use crate::record::write_record;
use crate::sink::{AppendSink, SinkOutcome};
use crate::synth::SyntheticFunction;
use crate::traversal::extract_block;

/// What one function contributed to the corpus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Records produced (one per qualifying block)
    pub records: usize,
    /// DAG instructions across those records
    pub instructions: usize,
    /// Observation calls inserted for unconsumed results
    pub preserved: usize,
}

/// Running totals over every function seen by one extractor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub functions: usize,
    pub records: usize,
    pub instructions: usize,
    pub records_written: usize,
    pub functions_skipped: usize,
    pub functions_dropped: usize,
}

/// Render the records of every qualifying block of `function` into `out`,
/// in block order.
pub fn extract_function(
    function: &Function,
    include_live_ins: bool,
    out: &mut String,
) -> Result<ExtractSummary, DagError> {
    let defs = function.definitions()?;
    let mut summary = ExtractSummary::default();

    for block in 0..function.blocks.len() {
        let Some(unit) = extract_block(function, &defs, block, include_live_ins)? else {
            continue;
        };
        let mut synth = SyntheticFunction::build(&unit)?;
        summary.preserved += preserve_dead_values(&mut synth, &unit.instructions)?;
        write_record(out, unit.len(), &synth.module)?;

        summary.records += 1;
        summary.instructions += unit.len();
    }

    Ok(summary)
}

pub struct DagExtractor {
    options: ExtractOptions,
    sink: AppendSink,
    buffer: String,
    stats: ExtractStats,
}

impl DagExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        let sink = AppendSink::new(options.output_path.clone());
        Self {
            options,
            sink,
            buffer: String::new(),
            stats: ExtractStats::default(),
        }
    }

    pub fn stats(&self) -> ExtractStats {
        self.stats
    }

    /// Extract `function` and append its records to the corpus.
    ///
    /// Always returns `Ok(false)`: the function is left untouched.
    pub fn run_on_function(&mut self, function: &Function) -> Result<bool, DagError> {
        self.run_on_function_with(function, |_| {})
    }

    /// Like [`DagExtractor::run_on_function`], handing the function's
    /// records to `observe` before they are written.
    pub fn run_on_function_with(
        &mut self,
        function: &Function,
        observe: impl FnOnce(&str),
    ) -> Result<bool, DagError> {
        self.stats.functions += 1;
        self.buffer.clear();

        let summary = match extract_function(function, self.options.include_live_ins, &mut self.buffer) {
            Ok(summary) => summary,
            Err(e) => {
                warn!("skipping function '{}': {e}", function.name);
                self.stats.functions_skipped += 1;
                self.buffer.clear();
                return Ok(false);
            }
        };
        debug!(
            "'{}': {} records, {} instructions, {} preserved",
            function.name, summary.records, summary.instructions, summary.preserved
        );
        self.stats.records += summary.records;
        self.stats.instructions += summary.instructions;

        observe(&self.buffer);

        let outcome = self.sink.append(&self.buffer);
        self.buffer.clear();
        match outcome? {
            SinkOutcome::Written { .. } => self.stats.records_written += summary.records,
            SinkOutcome::Dropped => self.stats.functions_dropped += 1,
            SinkOutcome::Disabled | SinkOutcome::Empty => {}
        }

        Ok(false)
    }

    /// Run over every defined function of `module`, in order
    pub fn run_on_module(&mut self, module: &Module) -> Result<bool, DagError> {
        for function in module.functions.iter().filter(|f| !f.is_external) {
            self.run_on_function(function)?;
        }
        Ok(false)
    }
}
