use serde_json::Value;
use std::io::{self, Write};

use super::format_value;

/// Result fields worth printing on their own, most important first.
const PRIORITY_KEYS: [&str; 2] = ["ytm", "current_yield"];

/// Print just the key answer value from the output.
pub fn write_minimal<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    return writeln!(out, "{}", format_value(val));
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return writeln!(out, "{}: {}", key, format_value(val));
        }
    }

    writeln!(out, "{}", format_value(result_obj))
}

#[cfg(test)]
mod tests {
    use crate::output::fixtures::{envelope, render};
    use crate::OutputFormat;
    use serde_json::json;

    #[test]
    fn test_minimal_prints_ytm_only() {
        assert_eq!(render(OutputFormat::Minimal, &envelope(&[])), "0.1125\n");
    }

    #[test]
    fn test_minimal_falls_back_to_first_field() {
        let value = json!({"result": {"average_price": "960"}});
        assert_eq!(render(OutputFormat::Minimal, &value), "average_price: 960\n");
    }
}
