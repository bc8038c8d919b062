use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use desk_logging::{desk_debug, desk_trace};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::map_reqwest_error;
use crate::{ApiError, ApiFailure, ClientSettings, Payload, ResponseBody};

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// One call against the backend, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub payload: Option<Payload>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            payload: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, payload: Payload) -> Self {
        Self::new(Method::POST, path).payload(payload)
    }

    pub fn put(path: impl Into<String>, payload: Payload) -> Self {
        Self::new(Method::PUT, path).payload(payload)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Something that executes [`ApiRequest`]s. Resource stores depend on this,
/// not on HTTP directly.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// Lifecycle of a single outgoing request, as it appears in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Created,
    Sent,
    Succeeded,
    Failed,
}

/// What response interceptors get to see. `status` is `None` when no
/// response reached the client.
#[derive(Debug)]
pub struct Exchange<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub status: Option<StatusCode>,
    pub body: &'a ResponseBody,
}

/// A stage of the request/response pipeline.
///
/// Response hooks run for every outcome, success or failure, and cannot
/// change the result handed back to the caller.
pub trait Interceptor: Send + Sync {
    fn on_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
    }

    fn on_response(&self, _exchange: &Exchange<'_>) {}
}

/// reqwest-backed HTTP client with an interceptor chain.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&settings.base_url)?;
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))?;
        Ok(Self {
            http,
            base_url,
            interceptors: Vec::new(),
        })
    }

    /// Appends an interceptor; request hooks run in insertion order.
    pub fn with_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str, query: &[(String, String)]) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::new(ApiFailure::InvalidUrl, err.to_string()))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let request_id = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        let ApiRequest {
            method,
            path,
            query,
            payload,
        } = request;
        desk_trace!("request#{} {:?} {} {}", request_id, RequestPhase::Created, method, path);

        let url = self.url_for(&path, &query)?;
        let mut builder = self.http.request(method.clone(), url);
        builder = match payload {
            None => builder,
            Some(Payload::Json(value)) => builder.json(&value),
            Some(Payload::Multipart(form)) => builder.multipart(form.into_form()?),
        };
        for interceptor in &self.interceptors {
            builder = interceptor.on_request(builder);
        }

        desk_trace!("request#{} {:?}", request_id, RequestPhase::Sent);
        let outcome = async {
            let response = builder.send().await?;
            let status = response.status();
            let bytes = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, ResponseBody::from_bytes(&bytes)))
        }
        .await;

        let empty = ResponseBody::Empty;
        let exchange = Exchange {
            method: &method,
            path: &path,
            status: outcome.as_ref().ok().map(|(status, _)| *status),
            body: outcome.as_ref().map(|(_, body)| body).unwrap_or(&empty),
        };
        for interceptor in &self.interceptors {
            interceptor.on_response(&exchange);
        }

        let result = match outcome {
            Ok((status, body)) if status.is_success() => Ok(body.into_value()),
            Ok((status, body)) => Err(ApiError::http(status, body)),
            Err(err) => Err(map_reqwest_error(err)),
        };
        match &result {
            Ok(_) => desk_debug!(
                "request#{} {:?} {} {}",
                request_id,
                RequestPhase::Succeeded,
                method,
                path
            ),
            Err(err) => desk_debug!(
                "request#{} {:?} {} {}: {} ({})",
                request_id,
                RequestPhase::Failed,
                method,
                path,
                err.kind,
                err.message
            ),
        }
        result
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut url =
        Url::parse(raw).map_err(|err| ApiError::new(ApiFailure::InvalidUrl, err.to_string()))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
