use std::path::{Path, PathBuf};

use dashboard_lib::{
    ConfigError, DashboardConfig, DataPolicy, DetectionConfig, LoadOptions, Schema, SchemaPreset,
    SheetLayout, utils::resolve_input_path,
};
use serde::{Deserialize, Serialize};

use crate::cli::Args;

pub const DEFAULT_INPUT_FILE: &str = "dashboard.xlsx";

/// Settings from the optional TOML config file, with CLI flags applied on top
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input: PathBuf,
    pub sheet: Option<String>,
    pub host: String,
    pub port: u16,
    pub schema: SchemaPreset,
    /// TOML schema file; replaces the preset when set
    pub schema_file: Option<PathBuf>,
    pub layout: SheetLayout,
    pub on_duplicate: DataPolicy,
    pub on_missing_key: DataPolicy,
    pub dashboard: DashboardConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            sheet: None,
            host: "127.0.0.1".to_string(),
            port: 8050,
            schema: SchemaPreset::default(),
            schema_file: None,
            layout: SheetLayout::default(),
            on_duplicate: DataPolicy::default(),
            on_missing_key: DataPolicy::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Config file (when given) overridden by command line flags
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_args(args)?;
        Ok(config)
    }

    /// Flags that only make sense for the other sheet layout are rejected
    pub fn apply_args(&mut self, args: &Args) -> Result<(), ConfigError> {
        if let Some(input) = &args.input {
            self.input = input.clone();
        }
        if let Some(sheet) = &args.sheet {
            self.sheet = Some(sheet.clone());
        }
        if let Some(host) = &args.host {
            self.host = host.clone();
        }
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(schema) = args.schema {
            self.schema = schema;
            self.schema_file = None;
        }
        if let Some(schema_file) = &args.schema_file {
            self.schema_file = Some(schema_file.clone());
        }
        if let Some(policy) = args.on_duplicate {
            self.on_duplicate = policy;
        }
        if let Some(policy) = args.on_missing_key {
            self.on_missing_key = policy;
        }
        if let Some(title) = &args.title {
            self.dashboard.title = title.clone();
        }

        if let Some(header_row) = args.header_row {
            let max_columns = match &self.layout {
                SheetLayout::Fixed { max_columns, .. } => *max_columns,
                SheetLayout::Detect(_) => None,
            };
            self.layout = SheetLayout::Fixed {
                header_row,
                max_columns,
            };
        }

        match &mut self.layout {
            SheetLayout::Fixed { max_columns, .. } => {
                if let Some(option) = detection_flag(args) {
                    return Err(ConfigError::LayoutConflict {
                        option,
                        layout: "fixed",
                    });
                }
                if args.max_columns.is_some() {
                    *max_columns = args.max_columns;
                }
            }
            SheetLayout::Detect(detection) => {
                if args.max_columns.is_some() {
                    return Err(ConfigError::LayoutConflict {
                        option: "--max-columns",
                        layout: "detect",
                    });
                }
                apply_detection_args(detection, args);
            }
        }
        Ok(())
    }

    pub fn schema(&self) -> Result<Schema, ConfigError> {
        match &self.schema_file {
            Some(path) => Schema::from_file(path),
            None => Ok(self.schema.schema()),
        }
    }

    pub fn load_options(&self) -> Result<LoadOptions, ConfigError> {
        let mut options = LoadOptions::new(resolve_input_path(&self.input), self.schema()?)
            .with_layout(self.layout.clone())
            .with_duplicate_policy(self.on_duplicate)
            .with_missing_key_policy(self.on_missing_key);
        if let Some(sheet) = &self.sheet {
            options = options.with_sheet(sheet);
        }
        Ok(options)
    }
}

/// First header detection flag given on the command line
fn detection_flag(args: &Args) -> Option<&'static str> {
    if args.detect_window.is_some() {
        Some("--detect-window")
    } else if args.min_header_matches.is_some() {
        Some("--min-header-matches")
    } else if args.normalized_headers {
        Some("--normalized-headers")
    } else {
        None
    }
}

fn apply_detection_args(detection: &mut DetectionConfig, args: &Args) {
    if let Some(window) = args.detect_window {
        detection.window = window;
    }
    if let Some(min_matches) = args.min_header_matches {
        detection.min_matches = min_matches;
    }
    if args.normalized_headers {
        detection.normalized_match = true;
    }
}
