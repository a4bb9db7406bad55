mod datetime;
mod filesystem;
mod string;

pub use datetime::{excel_serial_to_datetime, format_excel_serial, get_utc_iso_datetime};
pub use filesystem::{resolve_input_path, write_error_to_log, write_error_to_log_file};
pub use string::{collapse_whitespace, escape_html, strip_diacritics};
