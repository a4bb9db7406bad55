use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::reconciler::normalize;
use crate::schema::Schema;

/// Tuning knobs for locating the header row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Number of leading rows scanned
    pub window: usize,
    /// Minimum canonical names a row must contain to be accepted as a partial match
    pub min_matches: usize,
    /// Compare normalized cells against every accepted variant instead of
    /// looking for the canonical names verbatim
    pub normalized_match: bool,
    /// Rows included in the diagnostic preview when detection fails
    pub preview_rows: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        DetectionConfig {
            window: 10,
            min_matches: 2,
            normalized_match: false,
            preview_rows: 5,
        }
    }
}

/// Find the 0-based index of the header row among the first `window` rows.
///
/// The first row holding every canonical name wins. Failing that, the first
/// row holding at least `min_matches` of them. Otherwise the error carries a
/// preview of the first rows for manual inspection.
pub fn detect_header_row(
    rows: &[Vec<String>],
    schema: &Schema,
    config: &DetectionConfig,
) -> Result<usize, LoadError> {
    let scanned = &rows[..rows.len().min(config.window)];
    let expected = schema.columns().len();
    let counts: Vec<usize> = scanned
        .iter()
        .map(|row| count_expected_names(row, schema, config.normalized_match))
        .collect();

    if let Some(index) = counts.iter().position(|&count| count == expected) {
        tracing::debug!(row = index, "header row found with every expected column");
        return Ok(index);
    }

    let threshold = config.min_matches.max(1);
    if let Some(index) = counts.iter().position(|&count| count >= threshold) {
        tracing::warn!(
            row = index,
            matched = counts[index],
            expected,
            "header row accepted on a partial match"
        );
        return Ok(index);
    }

    Err(LoadError::HeaderDetection {
        window: config.window,
        preview: preview_rows(rows, config.preview_rows),
    })
}

/// How many canonical columns appear among the row's cells
fn count_expected_names(row: &[String], schema: &Schema, normalized_match: bool) -> usize {
    if normalized_match {
        let cells: HashSet<String> = row.iter().map(|cell| normalize(cell)).collect();
        schema
            .columns()
            .iter()
            .filter(|column| column.accepted_keys().iter().any(|key| cells.contains(key)))
            .count()
    } else {
        let cells: HashSet<&str> = row.iter().map(|cell| cell.trim()).collect();
        schema
            .columns()
            .iter()
            .filter(|column| cells.contains(column.name.as_str()))
            .count()
    }
}

/// Render the first rows as text, one line per row, cells separated by " | "
pub fn preview_rows(rows: &[Vec<String>], limit: usize) -> String {
    if rows.is_empty() {
        return "(sheet is empty)".to_string();
    }

    rows.iter()
        .take(limit)
        .enumerate()
        .map(|(index, row)| {
            let cells: Vec<&str> = row.iter().map(|cell| cell.trim()).collect();
            format!("{:>3}: {}", index, cells.join(" | "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
