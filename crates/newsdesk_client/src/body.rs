use serde_json::Value;

/// Marker text the backend embeds in permission failures.
pub const PERMISSION_DENIED_MARKER: &str = "Permission denied";

const MAX_TEXT_MESSAGE: usize = 200;

/// A decoded response body. JSON when it parses, raw text otherwise.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResponseBody {
    #[default]
    Empty,
    Text(String),
    Json(Value),
}

impl ResponseBody {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return ResponseBody::Empty;
        }
        match serde_json::from_slice(bytes) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            ResponseBody::Empty => Value::Null,
            ResponseBody::Text(text) => Value::String(text),
            ResponseBody::Json(value) => value,
        }
    }

    /// The human-readable message the backend put in an error body, if any.
    ///
    /// Looks at `message`, then `error` (string or `{message}`), then short
    /// plain-text bodies.
    pub fn backend_message(&self) -> Option<String> {
        match self {
            ResponseBody::Empty => None,
            ResponseBody::Text(text) => {
                let text = text.trim();
                (!text.is_empty() && text.len() <= MAX_TEXT_MESSAGE).then(|| text.to_string())
            }
            ResponseBody::Json(Value::String(text)) => Some(text.clone()),
            ResponseBody::Json(Value::Object(map)) => {
                let from_message = map.get("message").and_then(Value::as_str);
                let from_error = map.get("error").and_then(|error| match error {
                    Value::String(text) => Some(text.as_str()),
                    Value::Object(inner) => inner.get("message").and_then(Value::as_str),
                    _ => None,
                });
                from_message
                    .or(from_error)
                    .filter(|text| !text.is_empty())
                    .map(ToOwned::to_owned)
            }
            ResponseBody::Json(_) => None,
        }
    }
}

/// Content-based permission check applied to every response body.
///
/// True when the body is exactly the marker text, or when the marker
/// appears anywhere in a serialized JSON body. This knowingly matches any
/// payload that quotes the phrase, such as an article body.
pub fn is_permission_denied(body: &ResponseBody) -> bool {
    match body {
        ResponseBody::Empty => false,
        ResponseBody::Text(text) => text.trim() == PERMISSION_DENIED_MARKER,
        ResponseBody::Json(Value::String(text)) => text.trim() == PERMISSION_DENIED_MARKER,
        ResponseBody::Json(value) => value.to_string().contains(PERMISSION_DENIED_MARKER),
    }
}
