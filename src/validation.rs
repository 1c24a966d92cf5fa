//! Shared payload validation. Every write endpoint runs the same fixed
//! precedence: extra fields, then missing, then blank, then semantic
//! checks in the handler. The first failing check decides the response.

use serde_json::Value;

use crate::error::ApiError;

/// Rejects payloads carrying keys beyond the allowed schema.
pub fn reject_extra_fields(body: &Value, allowed: &[&str]) -> Result<(), ApiError> {
    if let Value::Object(map) = body {
        if map.keys().any(|k| !allowed.contains(&k.as_str())) {
            return Err(ApiError::bad_request("extra field"));
        }
    }
    Ok(())
}

fn get<'a>(body: &'a Value, field: &str) -> Option<&'a Value> {
    body.as_object().and_then(|map| map.get(field))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Missing check with a per-field message ("missing name").
pub fn require<'a>(body: &'a Value, field: &str) -> Result<&'a Value, ApiError> {
    get(body, field).ok_or_else(|| ApiError::bad_request(format!("missing {field}")))
}

/// Missing check over a whole schema with the generic "missing field"
/// message used by the user endpoints.
pub fn require_all(body: &Value, fields: &[&str]) -> Result<(), ApiError> {
    if fields.iter().any(|f| get(body, f).is_none()) {
        return Err(ApiError::bad_request("missing field"));
    }
    Ok(())
}

/// Blank check with a per-field message ("blank name"). Blank means JSON
/// null or a string that trims to empty.
pub fn reject_blank(body: &Value, field: &str) -> Result<(), ApiError> {
    match get(body, field) {
        Some(v) if is_blank(v) => Err(ApiError::bad_request(format!("blank {field}"))),
        _ => Ok(()),
    }
}

/// Blank check over a whole schema with the generic "blank field" message.
pub fn reject_blank_all(body: &Value, fields: &[&str]) -> Result<(), ApiError> {
    if fields.iter().filter_map(|f| get(body, f)).any(is_blank) {
        return Err(ApiError::bad_request("blank field"));
    }
    Ok(())
}

/// Finite numeric coercion: JSON numbers pass through, strings are trimmed
/// and parsed. Anything else is not a number.
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// String coercion for fields that survived the blank check.
pub fn string_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Path identifiers must be positive integers; everything else is a 404.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::NotFound),
    }
}

/// Query-string integer with silent fallback for absent or invalid values.
pub fn int_or(raw: Option<&str>, fallback: i64) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n >= 0)
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(err: ApiError) -> String {
        match err {
            ApiError::BadRequest(m) => m,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn extra_field_is_rejected() {
        let body = json!({ "amount": 10, "note": "sniping" });
        let err = reject_extra_fields(&body, &["amount"]).unwrap_err();
        assert_eq!(message(err), "extra field");
    }

    #[test]
    fn allowed_subset_passes() {
        let body = json!({ "amount": 10 });
        assert!(reject_extra_fields(&body, &["amount"]).is_ok());
        assert!(reject_extra_fields(&Value::Null, &["amount"]).is_ok());
    }

    #[test]
    fn missing_beats_blank() {
        let body = json!({});
        let err = require(&body, "amount").unwrap_err();
        assert_eq!(message(err), "missing amount");
        // a present-but-blank field is a different failure
        let body = json!({ "amount": "  " });
        assert!(require(&body, "amount").is_ok());
        let err = reject_blank(&body, "amount").unwrap_err();
        assert_eq!(message(err), "blank amount");
    }

    #[test]
    fn null_counts_as_blank() {
        let body = json!({ "starting_bid": null });
        let err = reject_blank(&body, "starting_bid").unwrap_err();
        assert_eq!(message(err), "blank starting_bid");
    }

    #[test]
    fn generic_messages_for_user_endpoints() {
        let body = json!({ "email": "a@b.c" });
        let err = require_all(&body, &["email", "password"]).unwrap_err();
        assert_eq!(message(err), "missing field");

        let body = json!({ "email": "a@b.c", "password": "" });
        assert!(require_all(&body, &["email", "password"]).is_ok());
        let err = reject_blank_all(&body, &["email", "password"]).unwrap_err();
        assert_eq!(message(err), "blank field");
    }

    #[test]
    fn numeric_accepts_numbers_and_numeric_strings() {
        assert_eq!(numeric(&json!(15)), Some(15.0));
        assert_eq!(numeric(&json!(10.5)), Some(10.5));
        assert_eq!(numeric(&json!("15")), Some(15.0));
        assert_eq!(numeric(&json!(" 7.25 ")), Some(7.25));
    }

    #[test]
    fn numeric_rejects_everything_else() {
        assert_eq!(numeric(&json!("ten")), None);
        assert_eq!(numeric(&json!(true)), None);
        assert_eq!(numeric(&json!([1])), None);
        assert_eq!(numeric(&json!(null)), None);
        assert_eq!(numeric(&json!("inf")), None);
    }

    #[test]
    fn parse_id_requires_positive_integers() {
        assert!(parse_id("17").is_ok());
        for raw in ["0", "-3", "abc", "1.5", ""] {
            assert!(
                matches!(parse_id(raw), Err(ApiError::NotFound)),
                "{raw:?} should be NotFound"
            );
        }
    }

    #[test]
    fn int_or_falls_back_silently() {
        assert_eq!(int_or(Some("25"), 10), 25);
        assert_eq!(int_or(Some("0"), 10), 0);
        assert_eq!(int_or(Some("-5"), 10), 10);
        assert_eq!(int_or(Some("lots"), 10), 10);
        assert_eq!(int_or(None, 10), 10);
    }
}
