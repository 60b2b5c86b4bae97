use clap::ValueEnum;
use serde_json::Value;

pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

/// Output format selected with the global `--output` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Pretty-printed JSON with the full computation envelope
    Json,
    /// Human-readable tables
    Table,
    /// CSV rows for spreadsheet import
    Csv,
    /// Only the headline number, for shell pipelines
    Minimal,
}

pub fn print(value: &Value, format: Format) {
    match format {
        Format::Json => json::print_json(value),
        Format::Table => table::print_table(value),
        Format::Csv => csv_out::print_csv(value),
        Format::Minimal => minimal::print_minimal(value),
    }
}
