//! Fixed names and settings shared by the analysis binaries
//!
//! Both binaries operate on a single hard-coded input file in the working
//! directory and write their artifacts next to it; there is no runtime
//! configuration surface.

/// Input spreadsheet expected in the working directory at invocation time
pub const INPUT_FILE: &str = "master_spreadsheet.csv";

/// Baseline system whose runs are discarded before regression
///
/// Runtime factors are expressed relative to this system, so its own runs
/// are identically the baseline and carry no explanatory signal.
pub const BASELINE_DATABASE: &str = "PostgreSQL";

/// PNG artifact produced by the batch runtime analysis
pub const BOXPLOT_FILE: &str = "batch_runtimes_boxplot.png";

/// Text artifact produced by the batch runtime analysis
pub const BATCH_RUNTIMES_REPORT_FILE: &str = "batch-runtimes.txt";

/// Axis label for the runtime factor value axis
pub const RUNTIME_FACTOR_LABEL: &str = "Runtime Factor";

/// Confidence level for coefficient confidence intervals
pub const CONFIDENCE_LEVEL: f64 = 0.95;
