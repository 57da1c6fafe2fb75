//! Formatting of walk steps and query results
//!
//! - `config` - Output configuration types
//! - `text` - Console output with colors
//! - `json` - JSON output, pretty or one record per line

mod config;
mod json;
mod text;

pub use config::OutputConfig;
pub use json::{print_json, write_json_line};
pub use text::{LevelFormatter, write_groups, write_paths};
