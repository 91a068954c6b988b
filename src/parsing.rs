//! File parsing functionality for benchmark result data
//!
//! This module handles loading and parsing the master_spreadsheet.csv file.

use crate::common::{Observation, ObservationTable};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during file parsing
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),
}

type Result<T> = core::result::Result<T, ParsingError>;

/// Parse the benchmark results file and load the data for analysis
///
/// This function:
/// - Opens the comma-delimited file
/// - Reads the header row to map columns by name
/// - Deserializes each data line into one [`Observation`]
///
/// Rows correspond 1:1 to data lines; extra columns not named by
/// [`Observation`] are ignored, while a missing required column or an
/// unparseable field surfaces as a [`ParsingError::CsvParse`].
///
/// # Arguments
/// * `file_path` - Path to the master_spreadsheet.csv file
///
/// # Returns
/// * `Ok(ObservationTable)` - Successfully parsed benchmark observations
/// * `Err(ParsingError)` - If file reading or CSV parsing failed
pub fn load_observations(file_path: &Path) -> Result<ObservationTable> {
    // Open the file first so access errors stay distinct from decode errors
    let file = File::open(file_path)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let observation: Observation = record?;
        rows.push(observation);
    }

    Ok(ObservationTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Database,BatchDescription,RuntimeFactor,Workers,IsMultiNode,IsMultiDC,IsMultiContinent,MultiNodeCount,TotalNetworkDistance";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_load_observations_row_count_matches_data_lines() {
        let file = write_csv(&[
            "PostgreSQL,single-node,1.0,1,0,0,0,0,0.0",
            "CockroachDB,single-node,1.2,1,0,0,0,0,0.0",
            "CockroachDB,multi-dc,2.4,4,1,1,0,3,50.5",
        ]);

        let table = load_observations(file.path()).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_load_observations_typed_fields() {
        let file = write_csv(&["CockroachDB,multi-dc,2.4,4,1,1,0,3,50.5"]);

        let table = load_observations(file.path()).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.database, "CockroachDB");
        assert_eq!(row.batch_description, "multi-dc");
        assert_eq!(row.runtime_factor, 2.4);
        assert_eq!(row.workers, 4);
        assert_eq!(row.is_multi_node, 1);
        assert_eq!(row.is_multi_dc, 1);
        assert_eq!(row.is_multi_continent, 0);
        assert_eq!(row.multi_node_count, 3);
        assert_eq!(row.total_network_distance, 50.5);
    }

    #[test]
    fn test_load_observations_missing_file() {
        let result = load_observations(Path::new("does-not-exist.csv"));
        assert!(matches!(result, Err(ParsingError::FileRead(_))));
    }

    #[test]
    fn test_load_observations_missing_column() {
        // No RuntimeFactor column
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Database,BatchDescription,Workers").unwrap();
        writeln!(file, "PostgreSQL,single-node,1").unwrap();

        let result = load_observations(file.path());
        assert!(matches!(result, Err(ParsingError::CsvParse(_))));
    }

    #[test]
    fn test_load_observations_malformed_field() {
        let file = write_csv(&["PostgreSQL,single-node,not-a-number,1,0,0,0,0,0.0"]);

        let result = load_observations(file.path());
        assert!(matches!(result, Err(ParsingError::CsvParse(_))));
    }

    #[test]
    fn test_load_observations_ignores_extra_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{},Comment", HEADER).unwrap();
        writeln!(file, "CockroachDB,single-node,1.1,2,0,0,0,0,0.0,retried run").unwrap();

        let table = load_observations(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].workers, 2);
    }

    #[test]
    fn test_load_observations_empty_data() {
        let file = write_csv(&[]);

        let table = load_observations(file.path()).unwrap();
        assert!(table.is_empty());
    }
}
