#![allow(clippy::needless_return)]

mod dashboard;
mod dataset;
mod detection;
mod error;
mod html;
mod loader;
mod reconciler;
mod schema;
mod severity;
pub mod utils;

// Test utilities - only compiled when testing or with test feature
// #[cfg(test)] alone doesn't work for integration tests (they're external crates)
// The feature flag makes it available to integration tests via dev-dependencies
#[cfg(any(test, feature = "test"))]
pub mod test_utils;

pub use dashboard::{Chart, Dashboard, DashboardConfig, RecordTable, TablePage};
pub use dataset::{Dataset, Record};
pub use detection::{DetectionConfig, detect_header_row, preview_rows};
pub use error::{ConfigError, LoadError};
pub use html::render_page;
pub use loader::{DataPolicy, LoadOptions, SheetLayout, cell_text, load, load_from_grid};
pub use reconciler::{ColumnMapping, HeaderReconciler, MatchedColumn, normalize, reconcile, validate};
pub use schema::{CanonicalColumn, ColumnRole, Schema, SchemaPreset};
pub use severity::{coerce_severity, parse_locale_number};

pub use calamine::Data;

pub const ERRORS_LOG_FILE: &str = "errors.log";
