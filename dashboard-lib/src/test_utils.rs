// Test utilities available to both unit and integration tests
// Only compiled when testing

use std::collections::HashMap;

use calamine::Data;

use crate::dataset::Record;

/// Build an in-memory sheet from text; empty strings become empty cells
#[allow(dead_code)]
pub fn text_grid(rows: &[&[&str]]) -> Vec<Vec<Data>> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    if cell.is_empty() {
                        Data::Empty
                    } else {
                        Data::String(cell.to_string())
                    }
                })
                .collect()
        })
        .collect()
}

/// Build a record from (canonical column, value) pairs
#[allow(dead_code)]
pub fn record(row_number: usize, values: &[(&str, &str)], severity: Option<f64>) -> Record {
    let values: HashMap<String, String> = values
        .iter()
        .map(|(column, value)| (column.to_string(), value.to_string()))
        .collect();
    Record {
        row_number,
        values,
        severity,
    }
}
