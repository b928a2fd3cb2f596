use serde_json::{Map, Value};
use std::io::{self, Write};
use tabled::{builder::Builder, Table};

use super::format_value;

/// Format output as a Field/Value table, followed by warnings and methodology.
pub fn write_table<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => write_envelope(out, result, map),
            _ => write_fields(out, map),
        },
        _ => writeln!(out, "{}", value),
    }
}

fn write_envelope<W: Write>(
    out: &mut W,
    result: &Map<String, Value>,
    envelope: &Map<String, Value>,
) -> io::Result<()> {
    write_fields(out, result)?;

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            writeln!(out, "\nWarnings:")?;
            for w in warnings.iter().filter_map(Value::as_str) {
                writeln!(out, "  - {}", w)?;
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        writeln!(out, "\nMethodology: {}", meth)?;
    }
    Ok(())
}

fn write_fields<W: Write>(out: &mut W, map: &Map<String, Value>) -> io::Result<()> {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), format_value(val)]);
    }
    writeln!(out, "{}", Table::from(builder))
}
