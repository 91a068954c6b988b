use serde::{Deserialize, Serialize};

/// A single benchmark run loaded from the master spreadsheet
///
/// Boolean deployment flags are stored as 0/1 dummies, matching the input
/// file and their use as regression predictors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// System under test (e.g. "PostgreSQL", "CockroachDB")
    #[serde(rename = "Database")]
    pub database: String,
    /// Experiment batch label, used as the grouping key
    #[serde(rename = "BatchDescription")]
    pub batch_description: String,
    /// Dependent variable: runtime relative to the baseline system
    #[serde(rename = "RuntimeFactor")]
    pub runtime_factor: f64,
    /// Number of concurrent benchmark workers
    #[serde(rename = "Workers")]
    pub workers: u32,
    /// Whether the deployment spans multiple nodes (0/1)
    #[serde(rename = "IsMultiNode")]
    pub is_multi_node: u8,
    /// Whether the deployment spans multiple data centers (0/1)
    #[serde(rename = "IsMultiDC")]
    pub is_multi_dc: u8,
    /// Whether the deployment spans multiple continents (0/1)
    #[serde(rename = "IsMultiContinent")]
    pub is_multi_continent: u8,
    /// Count of additional nodes in the deployment
    #[serde(rename = "MultiNodeCount")]
    pub multi_node_count: u32,
    /// Aggregate network distance metric for the deployment
    #[serde(rename = "TotalNetworkDistance")]
    pub total_network_distance: f64,
}

impl Observation {
    /// Numeric columns addressable by name when building regression models
    pub const NUMERIC_COLUMNS: [&'static str; 7] = [
        "RuntimeFactor",
        "Workers",
        "IsMultiNode",
        "IsMultiDC",
        "IsMultiContinent",
        "MultiNodeCount",
        "TotalNetworkDistance",
    ];

    /// Resolves a numeric column by its spreadsheet name
    ///
    /// Returns `None` for unknown or non-numeric columns, letting callers
    /// fail fast before any numeric work starts.
    pub fn numeric_value(&self, column: &str) -> Option<f64> {
        match column {
            "RuntimeFactor" => Some(self.runtime_factor),
            "Workers" => Some(f64::from(self.workers)),
            "IsMultiNode" => Some(f64::from(self.is_multi_node)),
            "IsMultiDC" => Some(f64::from(self.is_multi_dc)),
            "IsMultiContinent" => Some(f64::from(self.is_multi_continent)),
            "MultiNodeCount" => Some(f64::from(self.multi_node_count)),
            "TotalNetworkDistance" => Some(self.total_network_distance),
            _ => None,
        }
    }
}

/// The complete set of benchmark observations loaded for one analysis run
///
/// The table is loaded once per invocation and never mutated in place;
/// filtering produces a new table.
#[derive(Debug, Clone, Default)]
pub struct ObservationTable {
    rows: Vec<Observation>,
}

impl ObservationTable {
    /// Creates a table from parsed rows
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    /// All observations, in file order
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Number of observations in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table contains no observations
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns a new table without any runs of the named database
    ///
    /// Runtime factors are measured relative to a baseline system, so that
    /// system's own runs carry no explanatory signal and are discarded
    /// before model fitting. Filtering an already-filtered table is a no-op.
    pub fn exclude_database(&self, database: &str) -> ObservationTable {
        let rows = self
            .rows
            .iter()
            .filter(|row| row.database != database)
            .cloned()
            .collect();
        ObservationTable::new(rows)
    }
}
