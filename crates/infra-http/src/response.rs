// Response decoding and reqwest::Error -> TransportError conversion
// (orphan rule: TransportError lives in core, so no From impl here)

use edison_core::port::TransportError;
use reqwest::Response;
use serde_json::Value;

const SNIPPET_CHARS: usize = 200;

pub(crate) fn network_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Network(format!("Request timed out: {}", err))
    } else {
        TransportError::Network(format!("Request failed: {}", err))
    }
}

/// Decode a JSON body, turning non-2xx statuses into `TransportError::Http`
pub(crate) async fn read_json(response: Response) -> Result<Value, TransportError> {
    let status = response.status();
    let url = response.url().to_string();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TransportError::Http {
            status: status.as_u16(),
            url,
            message: error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string()),
            body_snippet: snippet(&body),
        });
    }

    let body = response.text().await.map_err(network_error)?;
    serde_json::from_str(&body).map_err(|e| {
        TransportError::Decode(format!("Invalid JSON from {}: {}", url, e))
    })
}

/// `detail` / `message` / `error` field of a JSON error body
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["detail", "message", "error"]
        .iter()
        .find_map(|key| match value.get(*key)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
}

pub(crate) fn snippet(body: &str) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    Some(body.chars().take(SNIPPET_CHARS).collect())
}
