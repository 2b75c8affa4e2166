//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod backtest;
pub mod check;
pub mod price;

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::str::FromStr;

use crate::CliError;

/// Output format shared by the commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Box-drawn table for terminals
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV with a header row
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(CliError::invalid_argument(format!(
                "Unknown format: {}. Supported: json, csv, table",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

/// Opens the output destination: a file when given, stdout otherwise.
pub(crate) fn open_output(path: Option<&str>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(io::BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Formats an optional number for table cells.
pub(crate) fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "n/a".to_string(),
    }
}

/// Formats a MAPE value, which is `NaN` when undefined.
pub(crate) fn fmt_mape(mape: f64) -> String {
    if mape.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}%", mape)
    }
}
