use reqwest::StatusCode;

use super::envelope::BackendErrorEnvelope;

/// Turn a failed backend response into the one message shown to the user.
///
/// `errorMessage` and the joined `validation` values are combined with
/// `" - "`; when both are empty the message falls back to
/// `"<operation> failed: <status text>"`. A body that is not a JSON error
/// envelope is treated as an empty envelope.
pub fn normalize_error(status: StatusCode, body: &[u8], operation: &str) -> String {
    let envelope = parse_envelope(status, body, operation);
    let message = compose_message(&envelope);

    if message.is_empty() {
        format!(
            "{} failed: {}",
            operation,
            status.canonical_reason().unwrap_or("Unknown Status")
        )
    } else {
        message
    }
}

fn parse_envelope(status: StatusCode, body: &[u8], operation: &str) -> BackendErrorEnvelope {
    if body.iter().all(u8::is_ascii_whitespace) {
        return BackendErrorEnvelope::default();
    }

    match serde_json::from_slice::<BackendErrorEnvelope>(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(
                "{}: unparsable error body from backend (status {}): {}",
                operation,
                status.as_u16(),
                e
            );
            BackendErrorEnvelope::default()
        }
    }
}

/// `"<errorMessage> - <v1>, <v2>"`, dropping whichever side is empty
pub fn compose_message(envelope: &BackendErrorEnvelope) -> String {
    let validation_message = envelope
        .validation
        .as_ref()
        .map(|fields| {
            fields
                .values()
                .map(|value| match value {
                    serde_json::Value::String(s) => s.trim().to_string(),
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                })
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    let error_message = envelope
        .error_message
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    [error_message, validation_message.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
}
