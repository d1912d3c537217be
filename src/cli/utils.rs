use std::io::Read;

use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });
            if let Some(data_value) = data {
                response["data"] = data_value;
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a record or a list of records in the appropriate format
pub fn output_records(output_format: &OutputFormat, value: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => match value {
            Value::Array(rows) if rows.is_empty() => println!("(no records)"),
            Value::Array(rows) => {
                for row in rows {
                    println!("{}", text_line(row));
                }
            }
            other => println!("{}", text_line(other)),
        },
    }
    Ok(())
}

/// One record as `key=value` pairs, `id` first.
pub fn text_line(record: &Value) -> String {
    let Some(fields) = record.as_object() else {
        return record.to_string();
    };

    let mut parts = Vec::with_capacity(fields.len());
    if let Some(id) = fields.get("id") {
        parts.push(format!("id={}", id));
    }
    for (key, value) in fields.iter().filter(|(k, _)| k.as_str() != "id") {
        let rendered = match value {
            Value::String(s) => s.clone(),
            Value::Null => "-".to_string(),
            other => other.to_string(),
        };
        parts.push(format!("{}={}", key, rendered));
    }
    parts.join("  ")
}

/// JSON body from the argument, or from stdin when the argument is absent.
pub fn read_body(arg: Option<String>) -> anyhow::Result<Value> {
    let raw = match arg {
        Some(raw) => raw,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    serde_json::from_str(raw.trim())
        .map_err(|e| anyhow::anyhow!("request body is not valid JSON: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_line_puts_id_first_and_renders_nulls() {
        let line = text_line(&json!({"name": "Core", "id": 3, "teamName": null}));
        assert!(line.starts_with("id=3"));
        assert!(line.contains("name=Core"));
        assert!(line.contains("teamName=-"));
    }

    #[test]
    fn read_body_parses_argument() {
        let body = read_body(Some(r#"{"name":"Core"}"#.to_string())).unwrap();
        assert_eq!(body["name"], "Core");
        assert!(read_body(Some("{not json".to_string())).is_err());
    }
}
