//! Newsdesk client: HTTP pipeline, credentials, notifications and the
//! generic resource store.
mod auth;
mod body;
mod client;
mod credentials;
mod entities;
mod envelope;
mod error;
mod notify;
mod payload;
mod session;
mod settings;
mod storage;
mod store;

pub use auth::{AuthSession, LOGIN_PATH};
pub use body::{is_permission_denied, ResponseBody, PERMISSION_DENIED_MARKER};
pub use client::{ApiClient, ApiRequest, Backend, Exchange, Interceptor, RequestPhase};
pub use credentials::{CredentialStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
pub use entities::{
    Advertisement, Article, Category, City, EPaper, Location, ShortVideo, State, User,
};
pub use error::{ApiError, ApiFailure};
pub use notify::{
    DismissHandle, DismissReason, Dismissal, NotificationController, NotificationPresenter,
    Notifier, SingleFlight, SingleFlightGuard, DEFAULT_EXIT_DELAY,
};
pub use payload::{FilePart, MultipartForm, Payload};
pub use session::{
    AuthHeaders, Navigator, SessionGuard, PERMISSION_DENIED_MESSAGE, SESSION_EXPIRED_MESSAGE,
};
pub use settings::{
    ClientSettings, ACCESS_TOKEN_HEADER, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT,
    REFRESH_TOKEN_HEADER,
};
pub use storage::{
    ensure_dir, FileStorage, KeyValueStorage, MemoryStorage, StorageError,
    DEFAULT_STORAGE_FILENAME,
};
pub use store::{Endpoint, Resource, ResourceStore};
