use std::collections::HashMap;

use serde::Serialize;

use crate::reconciler::ColumnMapping;
use crate::schema::{ColumnRole, Schema};

/// One data row of the spreadsheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// 1-based row number in the sheet, as shown by spreadsheet software
    pub row_number: usize,
    /// Cell text keyed by canonical column name; empty cells are absent
    pub values: HashMap<String, String>,
    /// Numeric severity, missing when the cell is empty or not a number
    pub severity: Option<f64>,
}

impl Record {
    pub fn get(&self, canonical: &str) -> Option<&str> {
        self.values.get(canonical).map(String::as_str)
    }
}

/// Everything produced by one load. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub sheet_name: String,
    /// 0-based row index of the header row
    pub header_row: usize,
    pub schema: Schema,
    pub mapping: ColumnMapping,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record counts per distinct value of the column with the given role,
    /// in order of first appearance. Records without a value are skipped.
    pub fn value_counts(&self, role: ColumnRole) -> Vec<(String, usize)> {
        let Some(column) = self.schema.column_for_role(role) else {
            return Vec::new();
        };

        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            let Some(value) = record.get(&column.name) else {
                continue;
            };
            match positions.get(value) {
                Some(&position) => counts[position].1 += 1,
                None => {
                    positions.insert(value, counts.len());
                    counts.push((value.to_string(), 1));
                }
            }
        }
        counts
    }

    /// The `n` most frequent values, by count descending then value ascending
    pub fn top_values(&self, role: ColumnRole, n: usize) -> Vec<(String, usize)> {
        let mut counts = self.value_counts(role);
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts.truncate(n);
        counts
    }

    /// Severities that parsed as numbers
    pub fn numeric_severities(&self) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.severity).collect()
    }

    /// True when at least one severity parsed as a number
    pub fn severity_is_numeric(&self) -> bool {
        self.records.iter().any(|r| r.severity.is_some())
    }

    /// The last `n` records in sheet order
    pub fn recent(&self, n: usize) -> &[Record] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }
}
