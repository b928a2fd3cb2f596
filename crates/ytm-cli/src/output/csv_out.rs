use serde_json::Value;
use std::io::{self, Write};

use super::format_value;

/// Write the result object as two-column `field,value` CSV.
pub fn write_csv<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    let fields = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => Some(result),
            _ => Some(map),
        },
        _ => None,
    };

    match fields {
        Some(map) => {
            wtr.write_record(["field", "value"])?;
            for (key, val) in map {
                wtr.write_record([key.as_str(), &format_value(val)])?;
            }
        }
        None => wtr.write_record([&format_value(value)])?,
    }

    wtr.flush()
}

#[cfg(test)]
mod tests {
    use crate::output::fixtures::{envelope, render};
    use crate::OutputFormat;

    #[test]
    fn test_csv_lists_result_fields() {
        let text = render(OutputFormat::Csv, &envelope(&["ignored"]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "field,value");
        assert!(lines.contains(&"ytm,0.1125"));
        assert!(lines.contains(&"price_position,discount"));
        assert!(!text.contains("ignored"));
    }
}
