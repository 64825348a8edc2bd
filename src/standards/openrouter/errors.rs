use crate::error::LlmError;
use serde_json::Value;

/// Classify an OpenRouter HTTP error response.
///
/// OpenRouter returns the OpenAI-style envelope
/// `{ "error": { "message": "...", "code": 402, "metadata": {...} } }`, with
/// the HTTP status usually mirrored in `code`. Bodies that don't match fall
/// back to a status-based classification.
pub fn classify_http_error(provider: &str, status: u16, body_text: &str) -> LlmError {
    classify_envelope(provider, status, body_text)
        .unwrap_or_else(|| classify_status(provider, status, body_text))
}

fn classify_envelope(provider: &str, status: u16, body_text: &str) -> Option<LlmError> {
    let json: Value = serde_json::from_str(body_text).ok()?;
    let error_obj = json.get("error")?;

    let message = error_obj
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("Unknown error");
    let error_type = error_obj.get("type").and_then(|v| v.as_str());

    let mapped = match error_type.unwrap_or("") {
        "authentication_error" => LlmError::AuthenticationError(message.to_string()),
        "rate_limit_error" => LlmError::RateLimitError(message.to_string()),
        "insufficient_quota" => LlmError::QuotaExceededError(message.to_string()),
        "invalid_request_error" => LlmError::InvalidInput(message.to_string()),
        "not_found_error" => LlmError::NotFound(message.to_string()),
        _ => map_by_status(provider, status, message, json.clone()),
    };

    Some(mapped)
}

fn map_by_status(provider: &str, status: u16, message: &str, details: Value) -> LlmError {
    let lower = message.to_lowercase();

    match status {
        401 => LlmError::AuthenticationError(message.to_string()),
        // Out of credits.
        402 => LlmError::QuotaExceededError(message.to_string()),
        404 => LlmError::NotFound(message.to_string()),
        429 => LlmError::RateLimitError(message.to_string()),
        400 => LlmError::InvalidInput(message.to_string()),
        _ if lower.contains("api key") || lower.contains("unauthorized") => {
            LlmError::AuthenticationError(message.to_string())
        }
        _ if lower.contains("rate limit") => LlmError::RateLimitError(message.to_string()),
        _ => LlmError::ApiError {
            code: status,
            message: format!("{provider} API error: {message}"),
            details: Some(details),
        },
    }
}

fn classify_status(provider: &str, status: u16, body_text: &str) -> LlmError {
    let message = if body_text.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        body_text.trim().to_string()
    };
    map_by_status(provider, status, &message, Value::String(body_text.to_string()))
}

/// Convert an in-band error object (HTTP 200 with `error`) into an API error.
pub fn api_error_from_body(provider: &str, error: &Value) -> LlmError {
    let message = error
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("Unknown error");
    let code = match error.get("code") {
        Some(Value::Number(n)) => n.as_u64().and_then(|c| u16::try_from(c).ok()),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    };
    LlmError::ApiError {
        code: code.unwrap_or(500),
        message: format!("{provider} API error: {message}"),
        details: Some(error.clone()),
    }
}
