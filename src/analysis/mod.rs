//! Domain-specific analysis modules
//!
//! This module contains domain-specific analysis logic for:
//! - Batch runtime distributions (box plot + descriptive statistics)
//! - Ordinary least squares model fitting
//! - The regression report over the two deployment-design models

pub mod batch_runtimes;
pub mod constants;
pub mod ols;
pub mod regression;

// Re-export analysis functions for convenience
pub use batch_runtimes::{generate_batch_runtime_analysis, generate_batch_runtime_plots};
pub use regression::generate_regression_report;
