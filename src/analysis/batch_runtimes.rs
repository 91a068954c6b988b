//! Batch runtime distribution analysis
//!
//! This module groups runtime factors by experiment batch and produces the
//! per-batch descriptive statistics table and the grouped box plot chart.

use crate::analysis::constants::{BATCH_RUNTIMES_REPORT_FILE, BOXPLOT_FILE, RUNTIME_FACTOR_LABEL};
use crate::common::plots::create_grouped_boxplot;
use crate::common::tables::format_table;
use crate::common::{ObservationTable, PlotError};
use std::path::Path;
use tabled::Tabled;

/// Errors that can occur during batch runtime analysis
#[derive(Debug)]
pub enum BatchRuntimeError {
    FileWrite(std::io::Error),
    PlotGeneration(PlotError),
}

impl std::fmt::Display for BatchRuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchRuntimeError::FileWrite(e) => write!(f, "Failed to write file: {}", e),
            BatchRuntimeError::PlotGeneration(e) => write!(f, "Failed to generate plot: {}", e),
        }
    }
}

impl std::error::Error for BatchRuntimeError {}

impl From<std::io::Error> for BatchRuntimeError {
    fn from(err: std::io::Error) -> Self {
        BatchRuntimeError::FileWrite(err)
    }
}

impl From<PlotError> for BatchRuntimeError {
    fn from(err: PlotError) -> Self {
        BatchRuntimeError::PlotGeneration(err)
    }
}

type Result<T> = core::result::Result<T, BatchRuntimeError>;

/// One row of the per-batch descriptive statistics table
#[derive(Debug, Clone, Tabled)]
pub struct BatchSummaryRow {
    #[tabled(rename = "Batch")]
    pub batch: String,
    #[tabled(rename = "Runs")]
    pub runs: usize,
    #[tabled(rename = "Min")]
    pub min: String,
    #[tabled(rename = "Q1")]
    pub q1: String,
    #[tabled(rename = "Median")]
    pub median: String,
    #[tabled(rename = "Q3")]
    pub q3: String,
    #[tabled(rename = "Max")]
    pub max: String,
}

/// Groups runtime factors by batch description in first-seen order
///
/// Every row contributes its `RuntimeFactor` to the group keyed by its
/// `BatchDescription`; groups appear in the order their key first occurs in
/// the file, so the chart and table stay stable across runs.
pub fn group_runtime_factors(table: &ObservationTable) -> Vec<(String, Vec<f64>)> {
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

    for row in table.rows() {
        match groups
            .iter_mut()
            .find(|(batch, _)| *batch == row.batch_description)
        {
            Some((_, values)) => values.push(row.runtime_factor),
            None => groups.push((row.batch_description.clone(), vec![row.runtime_factor])),
        }
    }

    groups
}

/// Generate the per-batch descriptive statistics analysis
///
/// Writes batch-runtimes.txt containing one table row per batch (run count,
/// min, quartiles, max of the runtime factor) followed by a summary section
/// with total observation and batch counts. Non-finite runtime factors are
/// excluded from the order statistics but still counted as runs.
///
/// # Arguments
/// * `table` - The loaded benchmark observations
/// * `output_dir` - Directory where the analysis file should be saved
///
/// # Returns
/// * `Ok(())` - If analysis generation was successful
/// * `Err(BatchRuntimeError)` - If file operations failed
pub fn generate_batch_runtime_analysis(table: &ObservationTable, output_dir: &Path) -> Result<()> {
    let groups = group_runtime_factors(table);
    if groups.is_empty() {
        return Ok(());
    }

    let rows: Vec<BatchSummaryRow> = groups
        .iter()
        .map(|(batch, values)| summarize_batch(batch, values))
        .collect();
    let table_text = format_table(&rows, Some("Runtime Factor per Batch"));

    let summary = format!(
        "Summary\n{}\nTotal observations: {}\nTotal batches: {}",
        "=".repeat(7),
        table.len(),
        groups.len()
    );

    let output_file = output_dir.join(BATCH_RUNTIMES_REPORT_FILE);
    let output = format!(
        "Batch Runtime Analysis\n{}\n\n{}\n\n{}",
        "=".repeat(22),
        table_text,
        summary
    );

    use std::fs;
    fs::write(&output_file, output)?;
    println!("Wrote {}", output_file.display());

    Ok(())
}

/// Generate the grouped box plot chart
///
/// Renders one horizontal box per batch on a shared runtime factor axis and
/// saves the chart as batch_runtimes_boxplot.png.
///
/// # Arguments
/// * `table` - The loaded benchmark observations
/// * `output_dir` - Directory where the PNG file should be saved
///
/// # Returns
/// * `Ok(())` - If the plot was successfully generated
/// * `Err(BatchRuntimeError)` - If plot generation failed
pub fn generate_batch_runtime_plots(table: &ObservationTable, output_dir: &Path) -> Result<()> {
    let groups = group_runtime_factors(table);
    if groups.is_empty() {
        return Ok(());
    }

    let output_path = output_dir.join(BOXPLOT_FILE);
    create_grouped_boxplot(&groups, RUNTIME_FACTOR_LABEL, &output_path)?;
    println!("Wrote {}", output_path.display());

    Ok(())
}

/// Builds the table row for one batch from its runtime factors
fn summarize_batch(batch: &str, values: &[f64]) -> BatchSummaryRow {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    finite.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let fmt = |value: Option<f64>| match value {
        Some(v) => format!("{:.3}", v),
        None => "-".to_string(),
    };

    BatchSummaryRow {
        batch: batch.to_string(),
        runs: values.len(),
        min: fmt(finite.first().copied()),
        q1: fmt(percentile(&finite, 25.0)),
        median: fmt(percentile(&finite, 50.0)),
        q3: fmt(percentile(&finite, 75.0)),
        max: fmt(finite.last().copied()),
    }
}

/// Calculate a percentile from sorted data by linear interpolation
fn percentile(sorted_data: &[f64], percentile: f64) -> Option<f64> {
    if sorted_data.is_empty() {
        return None;
    }
    if sorted_data.len() == 1 {
        return Some(sorted_data[0]);
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        Some(sorted_data[lower])
    } else {
        let weight = index - lower as f64;
        Some(sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Observation;
    use rstest::rstest;

    fn observation(database: &str, batch: &str, runtime_factor: f64) -> Observation {
        Observation {
            database: database.to_string(),
            batch_description: batch.to_string(),
            runtime_factor,
            workers: 1,
            is_multi_node: 0,
            is_multi_dc: 0,
            is_multi_continent: 0,
            multi_node_count: 0,
            total_network_distance: 0.0,
        }
    }

    #[test]
    fn test_group_runtime_factors_first_seen_order() {
        let table = ObservationTable::new(vec![
            observation("CockroachDB", "multi-dc", 2.1),
            observation("CockroachDB", "single-node", 1.1),
            observation("PostgreSQL", "multi-dc", 1.0),
            observation("CockroachDB", "single-node", 1.3),
        ]);

        let groups = group_runtime_factors(&table);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "multi-dc");
        assert_eq!(groups[0].1, vec![2.1, 1.0]);
        assert_eq!(groups[1].0, "single-node");
        assert_eq!(groups[1].1, vec![1.1, 1.3]);
    }

    #[test]
    fn test_group_count_matches_distinct_batches() {
        // Three distinct batch labels must yield exactly three box groups
        let table = ObservationTable::new(vec![
            observation("CockroachDB", "a", 1.0),
            observation("CockroachDB", "b", 2.0),
            observation("CockroachDB", "c", 3.0),
            observation("CockroachDB", "b", 2.5),
        ]);

        let groups = group_runtime_factors(&table);
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_group_runtime_factors_empty_table() {
        let table = ObservationTable::new(vec![]);
        assert!(group_runtime_factors(&table).is_empty());
    }

    #[rstest]
    #[case(25.0, 2.0)]
    #[case(50.0, 3.0)]
    #[case(75.0, 4.0)]
    #[case(0.0, 1.0)]
    #[case(100.0, 5.0)]
    fn test_percentile_odd_length(#[case] p: f64, #[case] expected: f64) {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&data, p), Some(expected));
    }

    #[test]
    fn test_percentile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&data, 50.0), Some(2.5));
        assert_eq!(percentile(&data, 25.0), Some(1.75));
    }

    #[test]
    fn test_percentile_degenerate() {
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(percentile(&[42.0], 50.0), Some(42.0));
    }

    #[test]
    fn test_summarize_batch_single_value() {
        let row = summarize_batch("tiny", &[1.5]);
        assert_eq!(row.runs, 1);
        assert_eq!(row.min, "1.500");
        assert_eq!(row.median, "1.500");
        assert_eq!(row.max, "1.500");
    }

    #[test]
    fn test_summarize_batch_skips_non_finite_for_order_statistics() {
        let row = summarize_batch("noisy", &[1.0, f64::NAN, 3.0]);
        assert_eq!(row.runs, 3);
        assert_eq!(row.min, "1.000");
        assert_eq!(row.median, "2.000");
        assert_eq!(row.max, "3.000");
    }

    #[test]
    fn test_summarize_batch_all_non_finite() {
        let row = summarize_batch("broken", &[f64::NAN]);
        assert_eq!(row.runs, 1);
        assert_eq!(row.min, "-");
        assert_eq!(row.median, "-");
    }

    #[test]
    fn test_generate_batch_runtime_analysis_writes_report() {
        let temp_dir = tempfile::tempdir().unwrap();
        let table = ObservationTable::new(vec![
            observation("CockroachDB", "single-node", 1.1),
            observation("CockroachDB", "single-node", 1.3),
            observation("CockroachDB", "multi-dc", 2.4),
        ]);

        generate_batch_runtime_analysis(&table, temp_dir.path()).unwrap();

        let report =
            std::fs::read_to_string(temp_dir.path().join(BATCH_RUNTIMES_REPORT_FILE)).unwrap();
        assert!(report.contains("Runtime Factor per Batch"));
        assert!(report.contains("single-node"));
        assert!(report.contains("multi-dc"));
        assert!(report.contains("Total observations: 3"));
        assert!(report.contains("Total batches: 2"));
    }

    #[test]
    fn test_generate_batch_runtime_analysis_empty_table() {
        let temp_dir = tempfile::tempdir().unwrap();
        let table = ObservationTable::new(vec![]);

        generate_batch_runtime_analysis(&table, temp_dir.path()).unwrap();
        assert!(!temp_dir.path().join(BATCH_RUNTIMES_REPORT_FILE).exists());
    }
}
