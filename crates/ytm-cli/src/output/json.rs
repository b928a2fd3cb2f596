use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print JSON.
pub fn write_json<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(out, "{}", text)
}
