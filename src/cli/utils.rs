use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Serialize `value` for the structured formats; `None` for text.
pub fn render<T: Serialize + ?Sized>(
    output_format: OutputFormat,
    value: &T,
) -> anyhow::Result<Option<String>> {
    match output_format {
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
        OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(value)?)),
        OutputFormat::Text => Ok(None),
    }
}

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    let mut response = json!({ "success": true, "message": message });
    if let Some(data) = data {
        response["data"] = data;
    }

    match render(output_format, &response)? {
        Some(out) => println!("{}", out.trim_end()),
        None => println!("✓ {}", message),
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: OutputFormat, message: &str) -> anyhow::Result<()> {
    let response = json!({ "success": false, "error": message });
    match render(output_format, &response)? {
        Some(out) => println!("{}", out.trim_end()),
        None => eprintln!("Error: {}", message),
    }
    Ok(())
}

/// Output a single value; `text` renders it for the text format.
pub fn output_value<T, F>(output_format: OutputFormat, value: &T, text: F) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T),
{
    match render(output_format, value)? {
        Some(out) => println!("{}", out.trim_end()),
        None => text(value),
    }
    Ok(())
}

/// Output a collection, one `row` per record in text format
pub fn output_records<T, F>(
    output_format: OutputFormat,
    records: &[T],
    empty_message: &str,
    row: F,
) -> anyhow::Result<()>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    output_value(output_format, records, |records| {
        if records.is_empty() {
            println!("{}", empty_message);
        }
        for record in records {
            println!("{}", row(record));
        }
    })
}

pub fn money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

pub fn percent(value: Decimal) -> String {
    format!("{:.1}%", value)
}

pub fn day(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}
