//! Backend response parsing
//!
//! The backend answers with loosely shaped JSON. These helpers pull out
//! the fields the flows depend on and apply the documented fallbacks.

use crate::error::{Error, Result};
use crate::notice;
use crate::types::{Landmark, RecognizeResponse};
use serde_json::Value;

/// Extract the reply text from a `/chat/place` payload.
///
/// Looks for `ai_response.text`; a missing, non-string or empty value
/// yields the literal `"No response."` instead of an error.
///
/// # Examples
/// ```
/// use geogenie_common::chat_reply_text;
/// use serde_json::json;
///
/// let reply = chat_reply_text(&json!({"ai_response": {"text": "<p>Built in 1591.</p>"}}));
/// assert_eq!(reply, "<p>Built in 1591.</p>");
/// assert_eq!(chat_reply_text(&json!({})), "No response.");
/// ```
pub fn chat_reply_text(payload: &Value) -> String {
    payload
        .get("ai_response")
        .and_then(|r| r.get("text"))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| notice::NO_RESPONSE.to_string())
}

/// Extract the server-assigned image id from a `/feedback/upload` payload.
///
/// Strings and non-zero numbers are accepted. Empty strings, zero, null
/// and any other type count as absent.
pub fn image_id(payload: &Value) -> Option<String> {
    match payload.get("image_id")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Extract landmark names for autocomplete.
///
/// Accepts `{"landmarks": [..]}` or a bare array. Non-string entries are
/// skipped; a missing list is an empty list.
pub fn landmark_names(payload: &Value) -> Vec<String> {
    let list = match payload {
        Value::Array(items) => Some(items),
        other => other.get("landmarks").and_then(Value::as_array),
    };

    list.map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Parse full landmark records from `GET /landmarks`.
///
/// Accepts a bare array or `{"landmarks": [..]}`. Plain string entries
/// become records with only a name.
pub fn landmarks(payload: &Value) -> Result<Vec<Landmark>> {
    let items = match payload {
        Value::Array(items) => items,
        other => other
            .get("landmarks")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::Parse("landmark list not found in response".into()))?,
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(name) => Ok(Landmark {
                id: name.clone(),
                name: name.clone(),
                ..Default::default()
            }),
            other => serde_json::from_value::<Landmark>(other.clone()).map_err(Error::from),
        })
        .collect()
}

/// Parse a `/recognize` payload. Missing fields fall back to defaults.
pub fn recognize_response(payload: &Value) -> Result<RecognizeResponse> {
    if !payload.is_object() {
        return Err(Error::Parse(format!("unexpected recognize payload: {}", payload)));
    }

    let text = |key: &str| {
        payload
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    // Some deployments send the confidence as a string.
    let confidence = match payload.get("confidence") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(raw)) => raw.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };

    Ok(RecognizeResponse {
        place_name: text("place_name"),
        confidence,
        source: text("source"),
    })
}

/// Bearer token from a login payload, if the backend issued one.
pub fn access_token(payload: &Value) -> Option<String> {
    ["access_token", "token"]
        .iter()
        .filter_map(|key| payload.get(*key).and_then(Value::as_str))
        .find(|token| !token.is_empty())
        .map(str::to_string)
}
