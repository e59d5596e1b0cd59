use reqwest::StatusCode;

const SNIPPET_LIMIT: usize = 160;

/// The only failure kind the backend calls produce: a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub(crate) fn transport(default: &str, err: reqwest::Error) -> Self {
        Self::new(format!("{default}: {err}"))
    }

    pub(crate) fn decode(default: &str, err: impl std::fmt::Display) -> Self {
        Self::new(format!("{default}: invalid response body: {err}"))
    }

    /// Build the error for a non-2xx response. Consumes the body.
    pub(crate) async fn from_response(default: &str, resp: reqwest::Response) -> Self {
        let status = resp.status();
        let body = resp.text().await.ok();
        Self::new(describe_failure(default, status, body.as_deref()))
    }
}

/// Message for a failed response, from the most to the least specific source:
/// a `detail`/`message`/`error` field in a JSON body, a snippet of the raw body,
/// then the bare status line.
pub fn describe_failure(default: &str, status: StatusCode, body: Option<&str>) -> String {
    if let Some(reason) = body.and_then(json_reason) {
        return format!("{default}: {reason}");
    }

    let status_line = format!(
        "HTTP {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    );
    let status_line = status_line.trim_end();

    match body.map(snippet).filter(|s| !s.is_empty()) {
        Some(snippet) => format!("{default}: {status_line} — {snippet}"),
        None => format!("{default}: {status_line}"),
    }
}

fn json_reason(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let obj = value.as_object()?;
    ["detail", "message", "error"]
        .iter()
        .filter_map(|key| obj.get(*key))
        .find(|v| match v {
            serde_json::Value::Null => false,
            serde_json::Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
        .map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

fn snippet(body: &str) -> String {
    body.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(SNIPPET_LIMIT)
        .collect()
}
