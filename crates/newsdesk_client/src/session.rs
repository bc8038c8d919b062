//! Auth header injection and session/permission side effects.

use std::sync::{Arc, Mutex, MutexGuard};

use desk_logging::{desk_debug, desk_info, desk_warn};
use newsdesk_core::NotificationKind;
use reqwest::{RequestBuilder, StatusCode};

use crate::body::is_permission_denied;
use crate::notify::{Notifier, SingleFlight};
use crate::settings::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};
use crate::{ApiClient, ApiError, ClientSettings, CredentialStore, Exchange, Interceptor};

pub const PERMISSION_DENIED_MESSAGE: &str =
    "Permission denied. You do not have access to perform this action.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

/// Moves the application to its sign-in entry point.
pub trait Navigator: Send + Sync {
    fn to_sign_in(&self);
}

/// Attaches the stored tokens to every outgoing request.
///
/// With no access token stored the request goes out unauthenticated.
pub struct AuthHeaders {
    credentials: CredentialStore,
}

impl AuthHeaders {
    pub fn new(credentials: CredentialStore) -> Self {
        Self { credentials }
    }
}

impl Interceptor for AuthHeaders {
    fn on_request(&self, request: RequestBuilder) -> RequestBuilder {
        let credentials = self.credentials.get();
        let Some(access_token) = credentials.access_token() else {
            return request;
        };
        let mut request = request
            .bearer_auth(access_token)
            .header(ACCESS_TOKEN_HEADER, access_token);
        if let Some(refresh_token) = credentials.refresh_token() {
            request = request.header(REFRESH_TOKEN_HEADER, refresh_token);
        }
        request
    }
}

/// Reacts to permission-denied bodies and 401 responses.
///
/// Both paths share one [`SingleFlight`] latch: while a notification raised
/// here is on screen, further notifications are dropped. A 401 always wipes
/// the stored credentials, and its message wins when both conditions hold.
///
/// The sign-in redirect runs once the notification holding the latch
/// closes, whatever it was shown for, so a 401 that lands behind a
/// permission notice still ends on the sign-in screen. Any close counts,
/// including [`DismissReason::Hidden`](crate::DismissReason::Hidden) when
/// the notice is hidden or replaced by another `show`.
pub struct SessionGuard {
    credentials: CredentialStore,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    latch: Arc<SingleFlight>,
    /// Set by any 401; taken by the latch holder when it lets go.
    sign_in_pending: Arc<Mutex<bool>>,
}

impl SessionGuard {
    pub fn new(
        credentials: CredentialStore,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        latch: Arc<SingleFlight>,
    ) -> Self {
        Self {
            credentials,
            notifier,
            navigator,
            latch,
            sign_in_pending: Arc::new(Mutex::new(false)),
        }
    }
}

fn lock(flag: &Mutex<bool>) -> MutexGuard<'_, bool> {
    flag.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Interceptor for SessionGuard {
    fn on_response(&self, exchange: &Exchange<'_>) {
        let permission_denied = is_permission_denied(exchange.body);
        let session_expired = exchange.status == Some(StatusCode::UNAUTHORIZED);

        if session_expired {
            desk_warn!(
                "{} {} returned 401; clearing credentials",
                exchange.method,
                exchange.path
            );
            self.credentials.clear();
        }
        if permission_denied {
            desk_warn!("{} {} was denied by the backend", exchange.method, exchange.path);
        }
        if !session_expired && !permission_denied {
            return;
        }

        // Recording the redirect and contending for the latch happen under
        // one lock, so a holder releasing concurrently cannot miss it.
        let guard = {
            let mut pending = lock(&self.sign_in_pending);
            if session_expired {
                *pending = true;
            }
            self.latch.try_acquire()
        };
        let Some(guard) = guard else {
            if session_expired {
                desk_debug!("Notification already active; sign-in deferred until it closes");
            } else {
                desk_debug!("Notification already active; suppressing duplicate");
            }
            return;
        };
        let message = if session_expired {
            SESSION_EXPIRED_MESSAGE
        } else {
            PERMISSION_DENIED_MESSAGE
        };
        let dismissal = self.notifier.show(message, NotificationKind::Error);
        let navigator = Arc::clone(&self.navigator);
        let sign_in_pending = Arc::clone(&self.sign_in_pending);
        tokio::spawn(async move {
            let reason = dismissal.await;
            desk_debug!("Session notification closed: {:?}", reason);
            let redirect = {
                let mut pending = lock(&sign_in_pending);
                drop(guard);
                std::mem::take(&mut *pending)
            };
            if redirect {
                desk_info!("Redirecting to sign-in");
                navigator.to_sign_in();
            }
        });
    }
}

impl ApiClient {
    /// The standard dashboard pipeline: auth headers, then the session guard.
    pub fn with_session(
        settings: &ClientSettings,
        credentials: CredentialStore,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        latch: Arc<SingleFlight>,
    ) -> Result<Self, ApiError> {
        Ok(Self::new(settings)?
            .with_interceptor(AuthHeaders::new(credentials.clone()))
            .with_interceptor(SessionGuard::new(credentials, notifier, navigator, latch)))
    }
}
