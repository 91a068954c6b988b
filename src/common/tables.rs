//! Common ASCII table formatting for text reports
//!
//! This module provides shared functionality for the text artifacts emitted
//! by the analysis modules, using the [`tabled`] crate. The row types
//! themselves are defined next to the analyses that produce them.

use tabled::{Table, Tabled};

/// Formats report rows as an ASCII table using the [`tabled`] crate
///
/// # Arguments
/// * `rows` - The rows to format; any `Tabled` row type
/// * `title` - Optional title for the table
///
/// # Returns
/// A formatted ASCII table as a [`String`]
pub fn format_table<T: Tabled>(rows: &[T], title: Option<&str>) -> String {
    if rows.is_empty() {
        return "No data available".to_string();
    }

    let table = Table::new(rows).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}
