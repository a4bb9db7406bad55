use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, Record};
use crate::detection::{DetectionConfig, detect_header_row};
use crate::error::LoadError;
use crate::reconciler::{ColumnMapping, HeaderReconciler, validate};
use crate::schema::{ColumnRole, Schema};
use crate::severity::coerce_severity;
use crate::utils::format_excel_serial;

/// What to do when the data does not meet a quality rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataPolicy {
    /// Drop the offending column or row silently
    #[default]
    Ignore,
    /// Drop it and log a warning
    Warn,
    /// Abort the load
    Fail,
}

impl fmt::Display for DataPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataPolicy::Ignore => write!(f, "ignore"),
            DataPolicy::Warn => write!(f, "warn"),
            DataPolicy::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for DataPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ignore" | "drop" => Ok(DataPolicy::Ignore),
            "warn" => Ok(DataPolicy::Warn),
            "fail" => Ok(DataPolicy::Fail),
            other => Err(format!(
                "unknown policy '{other}', expected 'ignore', 'warn' or 'fail'"
            )),
        }
    }
}

/// Where the header row is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SheetLayout {
    /// Search the leading rows for the canonical column names
    Detect(DetectionConfig),
    /// Header on a known 0-based row, optionally keeping only the first `max_columns` columns
    Fixed {
        header_row: usize,
        max_columns: Option<usize>,
    },
}

impl Default for SheetLayout {
    fn default() -> Self {
        SheetLayout::Detect(DetectionConfig::default())
    }
}

/// Everything [`load`] needs to turn a spreadsheet into a [`Dataset`]
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub path: PathBuf,
    /// Sheet to read; the first sheet when `None`
    pub sheet: Option<String>,
    pub schema: Schema,
    pub layout: SheetLayout,
    pub on_duplicate: DataPolicy,
    pub on_missing_key: DataPolicy,
}

impl LoadOptions {
    pub fn new(path: impl Into<PathBuf>, schema: Schema) -> Self {
        LoadOptions {
            path: path.into(),
            sheet: None,
            schema,
            layout: SheetLayout::default(),
            on_duplicate: DataPolicy::default(),
            on_missing_key: DataPolicy::default(),
        }
    }

    pub fn with_sheet(mut self, sheet: &str) -> Self {
        self.sheet = Some(sheet.to_string());
        self
    }

    pub fn with_layout(mut self, layout: SheetLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DataPolicy) -> Self {
        self.on_duplicate = policy;
        self
    }

    pub fn with_missing_key_policy(mut self, policy: DataPolicy) -> Self {
        self.on_missing_key = policy;
        self
    }
}

/// Read the spreadsheet and build the dataset in one pass.
///
/// Any fatal condition aborts before a dataset exists; there is no partial result.
pub fn load(options: &LoadOptions) -> Result<Dataset, LoadError> {
    let (sheet_name, grid) = read_sheet(&options.path, options.sheet.as_deref())?;
    tracing::info!(
        path = %options.path.display(),
        sheet = %sheet_name,
        rows = grid.len(),
        "read spreadsheet"
    );
    load_from_grid(&sheet_name, &grid, options)
}

/// Run the load pipeline on cells already in memory.
/// Row and column indices of `grid` are absolute sheet positions.
pub fn load_from_grid(
    sheet_name: &str,
    grid: &[Vec<Data>],
    options: &LoadOptions,
) -> Result<Dataset, LoadError> {
    if grid.is_empty() {
        return Err(LoadError::EmptySheet {
            sheet: sheet_name.to_string(),
        });
    }

    let text_rows: Vec<Vec<String>> = grid
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let (header_row, max_columns) = match &options.layout {
        SheetLayout::Detect(config) => (detect_header_row(&text_rows, &options.schema, config)?, None),
        SheetLayout::Fixed {
            header_row,
            max_columns,
        } => {
            if *header_row >= grid.len() {
                return Err(LoadError::HeaderRowOutOfRange {
                    row: *header_row,
                    rows: grid.len(),
                });
            }
            (*header_row, *max_columns)
        }
    };

    let headers: Vec<String> = text_rows[header_row]
        .iter()
        .take(max_columns.unwrap_or(usize::MAX))
        .cloned()
        .collect();
    tracing::debug!(header_row, ?headers, "header row selected");

    let mapping = HeaderReconciler::new(&options.schema).reconcile(&headers);
    apply_duplicate_policy(&mapping, options.on_duplicate)?;
    validate(&mapping, &options.schema.required_names())?;

    let records = build_records(grid, header_row, max_columns, &mapping, options)?;

    tracing::info!(
        sheet = %sheet_name,
        header_row,
        columns = mapping.len(),
        records = records.len(),
        "dataset loaded"
    );

    Ok(Dataset {
        sheet_name: sheet_name.to_string(),
        header_row,
        schema: options.schema.clone(),
        mapping,
        records,
    })
}

fn read_sheet(path: &Path, sheet: Option<&str>) -> Result<(String, Vec<Vec<Data>>), LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let available = workbook.sheet_names();

    let sheet_name = match sheet {
        Some(name) if available.iter().any(|s| s == name) => name.to_string(),
        Some(name) => {
            return Err(LoadError::SheetNotFound {
                sheet: name.to_string(),
                available,
            });
        }
        None => match available.first() {
            Some(first) => first.clone(),
            None => {
                return Err(LoadError::EmptySheet {
                    sheet: String::new(),
                });
            }
        },
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    Ok((sheet_name, absolute_grid(&range)))
}

/// Materialize a range from A1, so leading blank rows and columns keep their indices
fn absolute_grid(range: &Range<Data>) -> Vec<Vec<Data>> {
    let Some((end_row, end_col)) = range.end() else {
        return Vec::new();
    };

    (0..=end_row)
        .map(|row| {
            (0..=end_col)
                .map(|col| range.get_value((row, col)).cloned().unwrap_or(Data::Empty))
                .collect()
        })
        .collect()
}

/// Cell rendered as text, the way the header and table see it
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format_excel_serial(dt.as_f64()).unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

fn is_empty_row(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        Data::Error(_) => true,
        _ => false,
    })
}

fn apply_duplicate_policy(mapping: &ColumnMapping, policy: DataPolicy) -> Result<(), LoadError> {
    if mapping.shadowed().is_empty() {
        return Ok(());
    }

    let duplicates: Vec<String> = mapping
        .shadowed()
        .iter()
        .map(|shadowed| {
            let kept = mapping
                .index_of(&shadowed.canonical)
                .map(|index| format!("column {}", index + 1))
                .unwrap_or_else(|| "another column".to_string());
            format!(
                "Header '{}' (column {}) also matches '{}', already taken by {}",
                shadowed.raw,
                shadowed.index + 1,
                shadowed.canonical,
                kept
            )
        })
        .collect();

    match policy {
        DataPolicy::Ignore => {
            tracing::debug!(?duplicates, "ignoring duplicate column matches");
            Ok(())
        }
        DataPolicy::Warn => {
            for duplicate in &duplicates {
                tracing::warn!("{duplicate}");
            }
            Ok(())
        }
        DataPolicy::Fail => Err(LoadError::DuplicateColumns { duplicates }),
    }
}

fn build_records(
    grid: &[Vec<Data>],
    header_row: usize,
    max_columns: Option<usize>,
    mapping: &ColumnMapping,
    options: &LoadOptions,
) -> Result<Vec<Record>, LoadError> {
    let required = options.schema.required_names();
    let severity_index = options
        .schema
        .column_for_role(ColumnRole::Severity)
        .and_then(|column| mapping.index_of(&column.name));

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (offset, row) in grid.iter().enumerate().skip(header_row + 1) {
        let row_number = offset + 1;

        let width = row.len().min(max_columns.unwrap_or(usize::MAX));
        if is_empty_row(&row[..width]) {
            continue;
        }

        let values: std::collections::HashMap<String, String> = mapping
            .matches()
            .iter()
            .filter_map(|matched| {
                let text = row.get(matched.index).map(cell_text)?;
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| (matched.canonical.clone(), trimmed.to_string()))
            })
            .collect();

        if let Some(column) = required.iter().find(|name| !values.contains_key(*name)) {
            match options.on_missing_key {
                DataPolicy::Ignore => {
                    tracing::debug!(row = row_number, column = %column, "dropping row without key field");
                }
                DataPolicy::Warn => {
                    tracing::warn!(row = row_number, column = %column, "dropping row without key field");
                }
                DataPolicy::Fail => {
                    return Err(LoadError::MissingKeyField {
                        row: row_number,
                        column: column.clone(),
                    });
                }
            }
            dropped += 1;
            continue;
        }

        let severity = severity_index
            .and_then(|index| row.get(index))
            .and_then(coerce_severity);

        records.push(Record {
            row_number,
            values,
            severity,
        });
    }

    if dropped > 0 {
        tracing::info!(dropped, "rows dropped for missing key fields");
    }

    Ok(records)
}
