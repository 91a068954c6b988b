//! Statistical analysis and visualization library for distributed database
//! benchmark results.
//!
//! The library is consumed by two small binaries that share the same input
//! file (`master_spreadsheet.csv`):
//!
//! - `plot-batch-runtimes` renders a grouped horizontal box-and-whisker chart
//!   of runtime factors per experiment batch and writes a per-batch
//!   descriptive statistics table.
//! - `runtime-regression` fits two ordinary least squares models of the
//!   runtime factor against deployment-design predictors and prints their
//!   summaries.

pub mod analysis;
pub mod common;
pub mod parsing;

use thiserror::Error;

/// Errors that can occur during analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Parsing error: {0}")]
    Parsing(#[from] parsing::ParsingError),

    #[error("Batch runtime analysis error: {0}")]
    BatchRuntime(#[from] analysis::batch_runtimes::BatchRuntimeError),

    #[error("Regression analysis error: {0}")]
    Regression(#[from] analysis::regression::RegressionError),
}
