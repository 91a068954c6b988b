//! Plotting infrastructure for grouped box-and-whisker charts
//!
//! This module renders the per-batch runtime factor distribution as a
//! horizontal box plot chart using the [`plotters`] crate. Charts are saved
//! as PNG files with fixed 1200x800 resolution.

use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Creates a horizontal box-and-whisker chart and saves it as a PNG file
///
/// Each group contributes one horizontal box on a shared value axis. The
/// vertical axis is segmented, one segment per group, labeled with the group
/// key in the order given. Gridlines are enabled and label fonts are kept
/// small so that dense batch labels stay readable. The chart carries no
/// title.
///
/// Non-finite values are dropped before quartile computation; a group left
/// without any finite value is skipped entirely. A group with a single value
/// renders as a collapsed box.
///
/// # Arguments
/// * `groups` - `(label, values)` pairs, one per box, in display order
/// * `value_label` - Label for the shared value axis
/// * `output_path` - Path where the PNG file should be saved
///
/// # Returns
/// * `Ok(())` - If the chart was successfully created and saved
/// * `Err(PlotError)` - If an error occurred during chart generation
///
/// # Chart Properties
/// * Resolution: 1200x800 pixels
/// * Format: PNG
/// * X-axis: value axis, linear, padded beyond the data range
/// * Y-axis: one segment per group, labeled with the group key
/// * Grid: Enabled for better readability
///
/// # Headless Compatibility
/// Uses plotters' bitmap backend so rendering works in headless environments
/// (Docker/CI) without a display server.
pub fn create_grouped_boxplot(
    groups: &[(String, Vec<f64>)],
    value_label: &str,
    output_path: &Path,
) -> Result<()> {
    if groups.is_empty() {
        return Err(PlotError::InvalidData("No groups to plot".to_string()));
    }

    let finite_groups = drop_non_finite(groups);
    if finite_groups.is_empty() {
        return Err(PlotError::InvalidData(
            "No finite values in any group".to_string(),
        ));
    }

    let all_values: Vec<f64> = finite_groups
        .iter()
        .flat_map(|(_, values)| values.iter().copied())
        .collect();
    let (x_min, x_max) = padded_value_range(&all_values);

    let labels: Vec<&str> = finite_groups
        .iter()
        .map(|(label, _)| label.as_str())
        .collect();

    // Create the drawing area (1200x800 PNG)
    let root = BitMapBackend::new(output_path, (1200, 800));
    let drawing_area = root.into_drawing_area();

    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    // No caption: the chart title is intentionally left blank. The box
    // elements draw in f32 value coordinates, so the axis does too.
    let mut chart_context = ChartBuilder::on(&drawing_area)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(220)
        .build_cartesian_2d(
            x_min as f32..x_max as f32,
            (0..finite_groups.len()).into_segmented(),
        )
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    // Small label font keeps dense batch labels readable
    chart_context
        .configure_mesh()
        .x_desc(value_label)
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 15))
        .y_labels(finite_groups.len())
        .y_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(index) => {
                labels.get(*index).map(|s| s.to_string()).unwrap_or_default()
            }
            _ => String::new(),
        })
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    // One horizontal box per group, quartiles computed by plotters
    chart_context
        .draw_series(finite_groups.iter().enumerate().map(|(index, (_, values))| {
            let quartiles = Quartiles::new(values);
            Boxplot::new_horizontal(SegmentValue::CenterOf(index), &quartiles)
                .width(25)
                .whisker_width(0.5)
                .style(BLUE)
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    // Ensure everything is properly rendered and saved
    drawing_area
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Removes non-finite values from each group and drops groups left empty
fn drop_non_finite(groups: &[(String, Vec<f64>)]) -> Vec<(String, Vec<f64>)> {
    groups
        .iter()
        .map(|(label, values)| {
            let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
            (label.clone(), finite)
        })
        .filter(|(_, values)| !values.is_empty())
        .collect()
}

/// Computes a padded `(min, max)` range for the value axis
///
/// Pads by 5% of the span on both sides so boxes and whiskers do not touch
/// the plot border. A zero span (all values equal) expands to a unit range
/// around the value.
fn padded_value_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let span = max - min;
    if span <= 0.0 {
        return (min - 0.5, max + 0.5);
    }

    let padding = span * 0.05;
    (min - padding, max + padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn group(label: &str, values: &[f64]) -> (String, Vec<f64>) {
        (label.to_string(), values.to_vec())
    }

    #[test]
    fn test_drop_non_finite_removes_values_and_empty_groups() {
        let groups = vec![
            group("a", &[1.0, f64::NAN, 2.0]),
            group("b", &[f64::NAN, f64::INFINITY]),
            group("c", &[3.0]),
        ];

        let cleaned = drop_non_finite(&groups);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].0, "a");
        assert_eq!(cleaned[0].1, vec![1.0, 2.0]);
        assert_eq!(cleaned[1].0, "c");
    }

    #[test]
    fn test_drop_non_finite_keeps_group_order() {
        let groups = vec![group("z", &[1.0]), group("a", &[2.0]), group("m", &[3.0])];

        let cleaned = drop_non_finite(&groups);
        let labels: Vec<&str> = cleaned.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_padded_value_range() {
        let (min, max) = padded_value_range(&[1.0, 2.0, 3.0]);
        assert!((min - 0.9).abs() < 1e-12);
        assert!((max - 3.1).abs() < 1e-12);
    }

    #[test]
    fn test_padded_value_range_zero_span() {
        let (min, max) = padded_value_range(&[2.0, 2.0]);
        assert_eq!(min, 1.5);
        assert_eq!(max, 2.5);
    }

    #[test]
    fn test_create_grouped_boxplot_validation() {
        let temp_dir = std::env::temp_dir();
        let output_path = temp_dir.join("test_boxplot.png");

        // Test empty group list
        let result = create_grouped_boxplot(&[], "Runtime Factor", &output_path);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));

        // Test groups with no finite values at all
        let groups = vec![group("a", &[f64::NAN]), group("b", &[])];
        let result = create_grouped_boxplot(&groups, "Runtime Factor", &output_path);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_create_grouped_boxplot_success() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("boxplot.png");

        let groups = vec![
            group("single-node", &[1.0, 1.1, 1.05, 1.2]),
            group("multi-dc", &[2.0, 2.4, 2.2]),
            group("multi-continent", &[3.5]),
        ];

        let result = create_grouped_boxplot(&groups, "Runtime Factor", &output_path);
        assert!(result.is_ok());
        assert!(output_path.exists());
        assert!(fs::metadata(&output_path).unwrap().len() > 0);
    }
}
