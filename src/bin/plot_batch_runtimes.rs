//! Renders the grouped box plot of runtime factors per experiment batch
//! and writes the per-batch descriptive statistics table.

use analyze_benchmark_stats::analysis::constants::INPUT_FILE;
use analyze_benchmark_stats::analysis::{
    generate_batch_runtime_analysis, generate_batch_runtime_plots,
};
use analyze_benchmark_stats::parsing::load_observations;
use analyze_benchmark_stats::AnalysisError;
use std::path::Path;

fn main() -> Result<(), AnalysisError> {
    // The spreadsheet is expected next to the invocation, no flags
    let input_file = Path::new(INPUT_FILE);
    if !input_file.exists() {
        eprintln!("Error: Input file does not exist: {}", input_file.display());
        std::process::exit(1);
    }

    let table = load_observations(input_file)?;

    let output_dir = Path::new(".");
    generate_batch_runtime_analysis(&table, output_dir)?;
    generate_batch_runtime_plots(&table, output_dir)?;

    Ok(())
}
