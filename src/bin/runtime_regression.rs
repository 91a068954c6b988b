//! Fits the draft and published runtime factor models and prints their
//! summaries to standard output, ready to be redirected to a log file.

use analyze_benchmark_stats::analysis::constants::INPUT_FILE;
use analyze_benchmark_stats::analysis::generate_regression_report;
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

    let report = generate_regression_report(&table)?;
    print!("{}", report);

    Ok(())
}
