pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;
use std::io::{self, Write};

/// Dispatch output to the appropriate formatter, writing to stdout.
pub fn format_output(format: &OutputFormat, value: &Value) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_output(&mut out, format, value)?;
    out.flush()
}

pub fn write_output<W: Write>(out: &mut W, format: &OutputFormat, value: &Value) -> io::Result<()> {
    match format {
        OutputFormat::Json => json::write_json(out, value),
        OutputFormat::Table => table::write_table(out, value),
        OutputFormat::Csv => csv_out::write_csv(out, value),
        OutputFormat::Minimal => minimal::write_minimal(out, value),
    }
}

/// Render a scalar JSON value without quotes.
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
