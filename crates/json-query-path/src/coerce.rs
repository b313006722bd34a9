//! Raw string to typed value conversion for writes.

use serde_json::{Number, Value};

/// Convert a raw command-line string into a typed JSON value.
///
/// Rules are applied in order, first match wins:
///
/// 1. `true` / `false` become booleans
/// 2. `-?[0-9]+` becomes an integer
/// 3. `-?[0-9]+\.[0-9]+` becomes a float
/// 4. a string wrapped in double quotes has the quotes stripped (no escapes)
/// 5. anything else stays a string
///
/// # Example
///
/// ```
/// use json_query_path::coerce_value;
/// use serde_json::json;
///
/// assert_eq!(coerce_value("true"), json!(true));
/// assert_eq!(coerce_value("42"), json!(42));
/// assert_eq!(coerce_value("-3.14"), json!(-3.14));
/// assert_eq!(coerce_value("\"5\""), json!("5"));
/// assert_eq!(coerce_value("hello"), json!("hello"));
/// ```
pub fn coerce_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if is_signed_integer(raw) {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::from(n);
        }
        if let Ok(n) = raw.parse::<u64>() {
            return Value::from(n);
        }
        if let Some(n) = parse_finite(raw) {
            return Value::Number(n);
        }
    } else if is_signed_decimal(raw) {
        if let Some(n) = parse_finite(raw) {
            return Value::Number(n);
        }
    }

    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return Value::String(raw[1..raw.len() - 1].to_string());
    }

    Value::String(raw.to_string())
}

fn parse_finite(raw: &str) -> Option<Number> {
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

fn unsigned(raw: &str) -> &str {
    raw.strip_prefix('-').unwrap_or(raw)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_signed_integer(raw: &str) -> bool {
    all_digits(unsigned(raw))
}

fn is_signed_decimal(raw: &str) -> bool {
    match unsigned(raw).split_once('.') {
        Some((int, frac)) => all_digits(int) && all_digits(frac),
        None => false,
    }
}
