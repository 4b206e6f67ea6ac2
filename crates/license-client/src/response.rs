//! Response Normalization
//!
//! A response fails when the HTTP status is >= 400 or when the body itself
//! reports `statusCode >= 400` (gateways that answer 200 with an embedded
//! error). The message comes from `message`, then `error`, then the caller's
//! default.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::transport::RawResponse;

/// `statusCode` from the body, accepting numbers and numeric strings
pub fn body_status(body: &Value) -> Option<u16> {
    match body.get("statusCode")? {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text_field(body: &Value, field: &str) -> Option<String> {
    match body.get(field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        // validation pipes report a list of messages
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

/// Human-readable message carried by a body
pub fn body_message(body: &Value) -> Option<String> {
    text_field(body, "message").or_else(|| text_field(body, "error"))
}

/// Check a raw response; on success return the body
pub fn normalize(response: RawResponse, default_message: &str) -> Result<Value> {
    let message = || body_message(&response.body).unwrap_or_else(|| default_message.to_string());

    if response.status >= 400 {
        return Err(ClientError::Http {
            status: response.status,
            message: message(),
        });
    }

    if let Some(status_code) = body_status(&response.body).filter(|code| *code >= 400) {
        return Err(ClientError::Application {
            status_code,
            message: message(),
        });
    }

    Ok(response.body)
}

/// The payload of a successful body: `data` when the body is an envelope,
/// otherwise the body itself
pub fn payload(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Decode the payload of a successful body
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T> {
    Ok(serde_json::from_value(payload(body))?)
}
