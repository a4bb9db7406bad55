use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

// Re-export shared test utilities from src/test_utils.rs
#[allow(unused_imports)]
pub use dashboard_lib::test_utils::{record, text_grid};

/// A cell written into a fixture workbook
#[allow(dead_code)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

/// Fixture sheet: name and rows of cells, starting at A1
#[allow(dead_code)]
pub struct FixtureSheet<'a> {
    pub name: &'a str,
    pub rows: Vec<Vec<Cell<'a>>>,
}

/// Write a workbook into a fresh temporary directory.
/// The directory is returned so it outlives the test body.
#[allow(dead_code)]
pub fn write_workbook(file_name: &str, sheets: &[FixtureSheet]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(file_name);
    save_workbook(&path, sheets);
    (dir, path)
}

#[allow(dead_code)]
pub fn save_workbook(path: &Path, sheets: &[FixtureSheet]) {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name).unwrap();

        for (row_index, row) in sheet.rows.iter().enumerate() {
            for (col_index, cell) in row.iter().enumerate() {
                let (row_num, col_num) = (row_index as u32, col_index as u16);
                match cell {
                    Cell::Text(text) => {
                        worksheet.write_string(row_num, col_num, *text).unwrap();
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(row_num, col_num, *value).unwrap();
                    }
                    Cell::Blank => {}
                }
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Text cells from string slices; "" becomes a blank cell
#[allow(dead_code)]
pub fn text_row<'a>(values: &[&'a str]) -> Vec<Cell<'a>> {
    values
        .iter()
        .map(|&value| {
            if value.is_empty() {
                Cell::Blank
            } else {
                Cell::Text(value)
            }
        })
        .collect()
}

#[allow(dead_code)]
pub fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
