//! Lenient JSON field extraction.
//!
//! Every helper returns `None` instead of failing when the value has the wrong
//! shape, so decoding an upstream document is total.

use serde_json::Value;

/// Look up `key` on `value` if it is an object.
pub fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_object().and_then(|obj| obj.get(key))
}

/// Coerce a value to a float.
///
/// Accepts JSON numbers and strings holding a finite number.
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Coerce a value to an integer.
///
/// Accepts integers, finite floats (truncated toward zero) and strings holding
/// an integer.
pub fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Coerce a scalar value to text.
///
/// Strings are returned as-is; numbers and booleans are rendered as their JSON
/// text. `null`, arrays and objects have no text form.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Shorthand for `field` followed by `text`.
pub fn text_field(value: &Value, key: &str) -> Option<String> {
    field(value, key).and_then(text)
}
