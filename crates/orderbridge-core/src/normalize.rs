//! Error envelope normalization.
//!
//! Folds the legacy `{error, message}` envelope and the modern
//! `{errors: [{code, message, field}]}` envelope into [`ErrorEnvelope`].
//! Rules, first match wins:
//!
//! 1. A body with both `error` and `message` keys passes through unchanged.
//! 2. A body whose `errors` list starts with an object maps that first entry.
//!    Later entries and the `field` attribute are dropped; legacy consumers
//!    show exactly one error. The first entry wins regardless of severity.
//! 3. Anything else becomes `UNKNOWN_ERROR` with the serialized body as message.

use serde_json::Value;
use tracing::debug;

use orderbridge_proto::coerce;
use orderbridge_proto::vocab::{legacy, modern, UNKNOWN_ERROR};
use orderbridge_proto::ErrorEnvelope;

/// Normalize an error body into the canonical single-error envelope.
///
/// `status` is only used for diagnostics; the envelope is derived from the
/// body alone.
pub fn normalize(status: u16, body: &Value) -> ErrorEnvelope {
    if let Some(envelope) = passthrough(body) {
        return envelope;
    }

    if let Some(envelope) = first_modern_error(body) {
        return envelope;
    }

    debug!(status, "unrecognized error envelope, using fallback");
    ErrorEnvelope::new(UNKNOWN_ERROR, serialize_best_effort(body))
}

fn passthrough(body: &Value) -> Option<ErrorEnvelope> {
    let error = coerce::field(body, legacy::ERROR)?;
    let message = coerce::field(body, legacy::MESSAGE)?;
    Some(ErrorEnvelope::new(render(error), render(message)))
}

fn first_modern_error(body: &Value) -> Option<ErrorEnvelope> {
    let first = coerce::field(body, modern::ERRORS)
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .filter(|first| first.is_object())?;

    Some(ErrorEnvelope::new(
        coerce::text_field(first, modern::ERROR_CODE).unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        coerce::text_field(first, modern::ERROR_MESSAGE).unwrap_or_default(),
    ))
}

/// Render a passthrough value. Strings are kept verbatim; `null` is empty.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn serialize_best_effort(body: &Value) -> String {
    serde_json::to_string(body).unwrap_or_else(|_| String::from("null"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_first_modern_error_wins() {
        let body = json!({
            "errors": [
                {"code": "INVALID_USER_ID", "message": "User ID must be numeric", "field": "userId"},
                {"code": "RATE_LIMIT", "message": "Too many requests", "field": null}
            ]
        });

        assert_eq!(
            normalize(400, &body),
            ErrorEnvelope::new("INVALID_USER_ID", "User ID must be numeric")
        );
    }

    #[test]
    fn test_field_attribute_is_discarded() {
        let mut entry = serde_json::Map::new();
        entry.insert(modern::ERROR_CODE.to_string(), json!("INVALID_USER_ID"));
        entry.insert(modern::ERROR_MESSAGE.to_string(), json!("User ID must be numeric"));
        entry.insert(modern::ERROR_FIELD.to_string(), json!("userId"));
        let mut body = serde_json::Map::new();
        body.insert(modern::ERRORS.to_string(), json!([entry]));
        let body = Value::Object(body);

        let doc = normalize(400, &body).to_document();
        assert!(doc.get(modern::ERROR_FIELD).is_none());
        assert_eq!(
            doc,
            json!({"error": "INVALID_USER_ID", "message": "User ID must be numeric"})
        );
    }

    #[test]
    fn test_legacy_envelope_passes_through() {
        let body = json!({
            "error": "API_VERSION_DEPRECATED",
            "message": "Please migrate to /api/v2/orders"
        });

        assert_eq!(
            normalize(410, &body),
            ErrorEnvelope::new("API_VERSION_DEPRECATED", "Please migrate to /api/v2/orders")
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let body = json!({"errors": [{"code": "X", "message": "y"}]});
        let once = normalize(400, &body);
        let twice = normalize(400, &once.to_document());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_legacy_keys_take_precedence_over_errors() {
        let body = json!({
            "error": "LEGACY",
            "message": "old",
            "errors": [{"code": "MODERN", "message": "new"}]
        });
        assert_eq!(normalize(400, &body), ErrorEnvelope::new("LEGACY", "old"));
    }

    #[test]
    fn test_modern_entry_defaults() {
        assert_eq!(
            normalize(400, &json!({"errors": [{"field": "userId"}]})),
            ErrorEnvelope::new("UNKNOWN_ERROR", "")
        );
        assert_eq!(
            normalize(400, &json!({"errors": [{"code": null, "message": "m"}]})),
            ErrorEnvelope::new("UNKNOWN_ERROR", "m")
        );
    }

    #[test]
    fn test_error_without_message_is_not_legacy() {
        let body = json!({"error": "ONLY_CODE"});
        assert_eq!(
            normalize(500, &body),
            ErrorEnvelope::new("UNKNOWN_ERROR", r#"{"error":"ONLY_CODE"}"#)
        );
    }

    #[test]
    fn test_fallback_serializes_body() {
        assert_eq!(
            normalize(500, &json!({})),
            ErrorEnvelope::new("UNKNOWN_ERROR", "{}")
        );
        assert_eq!(
            normalize(400, &json!({"errors": []})),
            ErrorEnvelope::new("UNKNOWN_ERROR", r#"{"errors":[]}"#)
        );
        assert_eq!(
            normalize(400, &json!({"errors": ["bad"]})),
            ErrorEnvelope::new("UNKNOWN_ERROR", r#"{"errors":["bad"]}"#)
        );
        assert_eq!(
            normalize(502, &json!("upstream down")),
            ErrorEnvelope::new("UNKNOWN_ERROR", r#""upstream down""#)
        );
    }

    #[test]
    fn test_passthrough_renders_non_string_values() {
        assert_eq!(
            normalize(400, &json!({"error": 42, "message": null})),
            ErrorEnvelope::new("42", "")
        );
    }
}
