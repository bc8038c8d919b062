use std::sync::Arc;

use desk_logging::{desk_debug, desk_warn};
use newsdesk_core::{Credentials, UserRecord};

use crate::storage::{KeyValueStorage, MemoryStorage};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// Sole owner of the persisted [`Credentials`].
///
/// Storage failures are logged and otherwise ignored: a failed read yields
/// absent values, which callers treat as signed out.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn get(&self) -> Credentials {
        let user = self.read(USER_KEY).and_then(|raw| {
            serde_json::from_str::<UserRecord>(&raw)
                .map_err(|err| desk_warn!("Ignoring unreadable stored user record: {}", err))
                .ok()
        });
        Credentials {
            access_token: self.read(ACCESS_TOKEN_KEY),
            refresh_token: self.read(REFRESH_TOKEN_KEY),
            user,
        }
    }

    pub fn set(&self, credentials: &Credentials) {
        self.write(ACCESS_TOKEN_KEY, credentials.access_token.as_deref());
        self.write(REFRESH_TOKEN_KEY, credentials.refresh_token.as_deref());
        let user = credentials.user.as_ref().and_then(|user| {
            serde_json::to_string(user)
                .map_err(|err| desk_warn!("Failed to serialize user record: {}", err))
                .ok()
        });
        self.write(USER_KEY, user.as_deref());
        desk_debug!("Stored credentials (signed_in={})", credentials.is_signed_in());
    }

    pub fn clear(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            self.write(key, None);
        }
        desk_debug!("Cleared stored credentials");
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(err) => {
                desk_warn!("Failed to read {} from storage: {}", key, err);
                None
            }
        }
    }

    fn write(&self, key: &str, value: Option<&str>) {
        let result = match value {
            Some(value) => self.storage.set(key, value),
            None => self.storage.remove(key),
        };
        if let Err(err) = result {
            desk_warn!("Failed to update {} in storage: {}", key, err);
        }
    }
}
