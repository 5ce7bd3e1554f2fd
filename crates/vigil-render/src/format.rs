//! Human-readable formatting of field values.

use vigil_types::{FieldValue, Record, Scalar};

/// Longest text value shown inline before truncation.
const MAX_TEXT_CHARS: usize = 50;

/// Formats a field value for display in an audit line.
///
/// Text is quoted and truncated, lists are bracketed item-by-item, and
/// nested records are summarised by field count.
pub fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => "null".to_string(),
        FieldValue::Scalar(Scalar::Text(s)) => {
            if s.chars().count() > MAX_TEXT_CHARS {
                let head: String = s.chars().take(MAX_TEXT_CHARS - 3).collect();
                format!("\"{head}...\"")
            } else {
                format!("\"{s}\"")
            }
        }
        FieldValue::Scalar(scalar) => scalar.to_string(),
        FieldValue::List(items) => format_items(items),
        FieldValue::Record(record) => format!("{{{} fields}}", record.len()),
    }
}

/// Formats a list of values as `[a, b, c]`.
pub fn format_items(items: &[FieldValue]) -> String {
    let inner: Vec<String> = items.iter().map(format_value).collect();
    format!("[{}]", inner.join(", "))
}

/// Serialises a whole record as one line per leaf field, using dotted paths
/// for nested records. Used when an event has no diff to show.
pub fn serialize_record(record: &Record) -> String {
    let mut lines = Vec::new();
    serialize_into(record, "", &mut lines);
    lines.join("\n")
}

fn serialize_into(record: &Record, prefix: &str, lines: &mut Vec<String>) {
    for (name, value) in record.fields() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };
        match value {
            FieldValue::Record(nested) if !nested.is_empty() => {
                serialize_into(nested, &path, lines);
            }
            other => lines.push(format!("{path}: {}", format_value(other))),
        }
    }
}
