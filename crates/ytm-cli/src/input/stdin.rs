use serde_json::Value;
use std::io::{self, Read};

/// Attempt to read a JSON (or YAML) document from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_document(&buffer)
}

/// JSON first; YAML is a superset, so only its error is reported.
pub fn parse_document(text: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(Some(value));
    }
    let value: Value = serde_yaml::from_str(trimmed)
        .map_err(|e| format!("Failed to parse stdin as JSON or YAML: {}", e))?;
    Ok(Some(value))
}
