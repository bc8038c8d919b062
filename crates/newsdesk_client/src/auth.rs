use std::sync::Arc;

use desk_logging::desk_info;
use newsdesk_core::{Credentials, UserRecord};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{ApiError, ApiRequest, Backend, CredentialStore, Payload};

pub const LOGIN_PATH: &str = "auth/login";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user: Option<UserRecord>,
}

/// Sign-in and sign-out on top of the credential store.
#[derive(Clone)]
pub struct AuthSession {
    backend: Arc<dyn Backend>,
    credentials: CredentialStore,
}

impl AuthSession {
    pub fn new(backend: Arc<dyn Backend>, credentials: CredentialStore) -> Self {
        Self {
            backend,
            credentials,
        }
    }

    /// Exchanges email and password for tokens and stores them.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<UserRecord>, ApiError> {
        let payload = Payload::Json(json!({ "email": email, "password": password }));
        let body = self
            .backend
            .send(ApiRequest::post(LOGIN_PATH, payload))
            .await?;
        let response = decode_login(body)?;

        let mut credentials = Credentials::new(response.access_token);
        credentials.refresh_token = response.refresh_token;
        credentials.user = response.user.clone();
        self.credentials.set(&credentials);
        desk_info!("Signed in as {}", email);
        Ok(response.user)
    }

    pub fn logout(&self) {
        self.credentials.clear();
        desk_info!("Signed out");
    }

    pub fn is_signed_in(&self) -> bool {
        self.credentials.get().is_signed_in()
    }

    pub fn current_user(&self) -> Option<UserRecord> {
        self.credentials.get().user
    }
}

fn decode_login(body: Value) -> Result<LoginResponse, ApiError> {
    let body = match body {
        Value::Object(mut map) if !map.contains_key("accessToken") && map.contains_key("data") => {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(body)
        .map_err(|err| ApiError::decode(format!("invalid login response: {err}")))
}
