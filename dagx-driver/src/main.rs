//! DAG extractor driver
//!
//! Plays the host pipeline: loads modules (JSON), hands every function to
//! the extractor once, and appends the resulting records to a shared corpus.
//! Also inspects an existing corpus.

use clap::{ArgAction, Parser, Subcommand};
use dagx_common::DagError;
use dagx_extract::{read_records, DagExtractor, ExtractOptions, Record};
use dagx_ir::Module;
use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dagx")]
#[command(about = "Basic block DAG extractor")]
#[command(version = "0.1.0")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the DAGs of every function in the given modules
    Extract {
        /// Module files (JSON)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// File to dump the extracted DAGs to (empty: don't write)
        #[arg(long, default_value = "")]
        dump_dags_to: String,

        /// Include live-in instructions of a given basic block
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        include_live_ins: bool,

        /// Also print the records to stdout
        #[arg(long)]
        print: bool,
    },

    /// Summarize an existing corpus
    Stats {
        /// Corpus file
        corpus: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Commands::Extract { inputs, dump_dags_to, include_live_ins, print } => {
            let options = ExtractOptions::from_flags(&dump_dags_to, include_live_ins);
            if let Err(e) = extract_command(&inputs, options, print) {
                eprintln!("Error extracting DAGs: {e}");
                std::process::exit(1);
            }
        }
        Commands::Stats { corpus } => match corpus_stats(&corpus) {
            Ok(stats) => print!("{stats}"),
            Err(e) => {
                eprintln!("Error reading corpus: {e}");
                std::process::exit(1);
            }
        },
    }
}

fn load_module(path: &Path) -> Result<Module, DagError> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| DagError::from(format!("{}: {e}", path.display())))
}

/// Run the extractor over every function of every input.
///
/// A module that fails to load is reported and skipped. Only a fatal sink
/// fault (the lock file cannot be opened) stops the run.
fn extract_command(inputs: &[PathBuf], options: ExtractOptions, print: bool) -> Result<(), DagError> {
    let mut extractor = DagExtractor::new(options);

    for input in inputs {
        let module = match load_module(input) {
            Ok(module) => module,
            Err(e) => {
                eprintln!("Skipping {}: {e}", input.display());
                continue;
            }
        };
        info!("extracting {} ({} functions)", input.display(), module.functions.len());

        for function in module.functions.iter().filter(|f| !f.is_external) {
            extractor.run_on_function_with(function, |records| {
                if print {
                    print!("{records}");
                }
            })?;
        }
    }

    let stats = extractor.stats();
    info!(
        "{} functions, {} records ({} written), {} instructions, {} skipped, {} dropped",
        stats.functions,
        stats.records,
        stats.records_written,
        stats.instructions,
        stats.functions_skipped,
        stats.functions_dropped
    );
    Ok(())
}

/// Size distribution of a corpus
#[derive(Debug, Default, PartialEq, Eq)]
struct CorpusStats {
    records: usize,
    instructions: usize,
    /// DAG size -> number of records
    histogram: BTreeMap<usize, usize>,
    /// Records whose declared count disagrees with their body
    mismatched: usize,
}

impl CorpusStats {
    fn add(&mut self, record: &Record) {
        self.records += 1;
        self.instructions += record.count;
        *self.histogram.entry(record.count).or_default() += 1;
        if record.instruction_lines().count() != record.count {
            self.mismatched += 1;
        }
    }
}

impl std::fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "records:      {}", self.records)?;
        writeln!(f, "instructions: {}", self.instructions)?;
        if self.mismatched > 0 {
            writeln!(f, "mismatched:   {}", self.mismatched)?;
        }
        writeln!(f, "size histogram:")?;
        for (size, count) in &self.histogram {
            writeln!(f, "  {size:>4}: {count}")?;
        }
        Ok(())
    }
}

fn corpus_stats(path: &Path) -> Result<CorpusStats, DagError> {
    let mut stats = CorpusStats::default();
    for record in read_records(path)? {
        stats.add(&record);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dagx_ir::{IrBinaryOp, IrBuilder, IrType, Value};
    use pretty_assertions::assert_eq;

    fn write_module(dir: &Path) -> PathBuf {
        let mut b = IrBuilder::new();
        b.create_function("poly", IrType::Void);
        let x = b.add_parameter(IrType::I64).unwrap();
        b.create_block().unwrap();
        let sq = b.build_binary(IrBinaryOp::Mul, x.clone(), x, IrType::I64).unwrap();
        b.build_binary(IrBinaryOp::Add, sq, Value::Constant(1), IrType::I64).unwrap();
        b.build_return(None).unwrap();

        let mut module = Module::new("poly".to_string());
        module.add_function(b.finish_function().unwrap());

        let path = dir.join("poly.json");
        fs::write(&path, serde_json::to_string(&module).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "dagx", "extract", "--dump-dags-to", "out.txt", "--include-live-ins", "false", "m.json",
        ]);
        match cli.command {
            Commands::Extract { inputs, dump_dags_to, include_live_ins, print } => {
                assert_eq!(inputs, vec![PathBuf::from("m.json")]);
                assert_eq!(dump_dags_to, "out.txt");
                assert!(!include_live_ins);
                assert!(!print);
            }
            Commands::Stats { .. } => panic!("Expected extract command"),
        }

        let cli = Cli::parse_from(["dagx", "extract", "m.json"]);
        match cli.command {
            Commands::Extract { dump_dags_to, include_live_ins, .. } => {
                assert_eq!(dump_dags_to, "");
                assert!(include_live_ins);
            }
            Commands::Stats { .. } => panic!("Expected extract command"),
        }
    }

    #[test]
    fn test_extract_then_stats() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_module(dir.path());
        let corpus = dir.path().join("dags.txt");

        let options = ExtractOptions::from_flags(corpus.to_str().unwrap(), true);
        extract_command(&[input.clone(), dir.path().join("missing.json")], options.clone(), false).unwrap();
        extract_command(&[input], options, false).unwrap();

        let stats = corpus_stats(&corpus).unwrap();
        assert_eq!(stats.records, 2);
        assert_eq!(stats.instructions, 4);
        assert_eq!(stats.mismatched, 0);
        assert_eq!(stats.histogram, BTreeMap::from([(2, 2)]));
        assert!(stats.to_string().starts_with("records:      2\n"));
    }

    #[test]
    fn test_unopenable_lock_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_module(dir.path());
        let corpus = dir.path().join("no-such-dir").join("dags.txt");

        let options = ExtractOptions::from_flags(corpus.to_str().unwrap(), true);
        let err = extract_command(&[input], options, false).unwrap_err();
        assert!(err.is_fatal());
    }
}
