use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that abort a load before any dashboard is built.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("Sheet '{sheet}' not found. Available sheets: {available:?}")]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("Sheet '{sheet}' contains no data")]
    EmptySheet { sheet: String },

    #[error(
        "Could not detect the header row within the first {window} rows.\nFirst rows of the sheet:\n{preview}\nMove the headers into the scanned rows, select a sheet, or use a fixed header row."
    )]
    HeaderDetection { window: usize, preview: String },

    #[error("Header row {row} is outside the sheet, which has {rows} rows")]
    HeaderRowOutOfRange { row: usize, rows: usize },

    #[error("Missing columns: {missing:?}. Detected columns: {detected:?}")]
    MissingColumns {
        missing: Vec<String>,
        detected: Vec<String>,
    },

    #[error("Columns matched more than once: {}", duplicates.join("; "))]
    DuplicateColumns { duplicates: Vec<String> },

    #[error("Row {row} has no value for required column '{column}'")]
    MissingKeyField { row: usize, column: String },
}

impl LoadError {
    /// Heading used for the entry in the errors log
    pub fn category(&self) -> &'static str {
        match self {
            LoadError::FileNotFound { .. } => "Input File Error",
            LoadError::Workbook(_) | LoadError::SheetNotFound { .. } | LoadError::EmptySheet { .. } => {
                "Workbook Read Error"
            }
            LoadError::HeaderDetection { .. } | LoadError::HeaderRowOutOfRange { .. } => {
                "Header Detection Error"
            }
            LoadError::MissingColumns { .. } => "Missing Columns Error",
            LoadError::DuplicateColumns { .. } => "Duplicate Columns Error",
            LoadError::MissingKeyField { .. } => "Missing Key Field Error",
        }
    }
}

/// Problems reading a schema or configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Schema has no columns")]
    EmptySchema,

    #[error("Schema declares column '{0}' more than once")]
    DuplicateCanonicalName(String),

    #[error("Option '{option}' does not apply to a {layout} sheet layout")]
    LayoutConflict {
        option: &'static str,
        layout: &'static str,
    },
}
