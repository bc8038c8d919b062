use std::fmt;

use crate::ResponseBody;

/// A failed call through the client pipeline.
///
/// `message` is what resource stores surface to the UI: the backend's own
/// message when the response carried one, otherwise the transport message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiFailure,
    pub status: Option<u16>,
    pub message: String,
    pub body: ResponseBody,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            body: ResponseBody::Empty,
        }
    }

    pub(crate) fn http(status: reqwest::StatusCode, body: ResponseBody) -> Self {
        let message = body
            .backend_message()
            .unwrap_or_else(|| status.to_string());
        Self {
            kind: ApiFailure::HttpStatus(status.as_u16()),
            status: Some(status.as_u16()),
            message,
            body,
        }
    }

    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiFailure::Decode, message)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFailure {
    InvalidUrl,
    /// No response reached the client.
    Network,
    Timeout,
    HttpStatus(u16),
    /// The response arrived but did not have the expected envelope shape.
    Decode,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::InvalidUrl => write!(f, "invalid url"),
            ApiFailure::Network => write!(f, "network error"),
            ApiFailure::Timeout => write!(f, "timeout"),
            ApiFailure::HttpStatus(code) => write!(f, "http status {code}"),
            ApiFailure::Decode => write!(f, "unexpected response shape"),
        }
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailure::Timeout, err.to_string());
    }
    ApiError::new(ApiFailure::Network, err.to_string())
}
