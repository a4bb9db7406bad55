use std::path::PathBuf;

use clap::Parser;
use dashboard_lib::{DataPolicy, SchemaPreset};

#[derive(Parser, Debug)]
#[command(name = "nc-dashboard")]
#[command(about = "Serve a non-conformity dashboard built from an Excel workbook")]
#[command(version)]
pub struct Args {
    /// Path to the Excel file (defaults to dashboard.xlsx next to the executable)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Sheet to read (if not specified, the first sheet is used)
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// Built-in column layout: 'status' or 'complaints'
    #[arg(long)]
    pub schema: Option<SchemaPreset>,

    /// TOML file describing the canonical columns and their accepted spellings
    #[arg(long, conflicts_with = "schema")]
    pub schema_file: Option<PathBuf>,

    /// TOML configuration file; command line flags take precedence over it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(short, long)]
    pub port: Option<u16>,

    /// Page title
    #[arg(long)]
    pub title: Option<String>,

    /// 0-based row holding the headers; disables header detection
    #[arg(long)]
    pub header_row: Option<usize>,

    /// Only keep the first N columns of a fixed header row
    #[arg(long)]
    pub max_columns: Option<usize>,

    /// Number of leading rows searched for the header row
    #[arg(long, conflicts_with = "header_row")]
    pub detect_window: Option<usize>,

    /// Canonical names a row must contain to be accepted as a partial header
    #[arg(long, conflicts_with = "header_row")]
    pub min_header_matches: Option<usize>,

    /// Compare candidate header cells after normalization instead of verbatim
    #[arg(long, conflicts_with = "header_row")]
    pub normalized_headers: bool,

    /// Headers matching a column that is already taken: ignore, warn or fail
    #[arg(long)]
    pub on_duplicate: Option<DataPolicy>,

    /// Rows with an empty required column: ignore (drop), warn (drop and log) or fail
    #[arg(long)]
    pub on_missing_key: Option<DataPolicy>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
