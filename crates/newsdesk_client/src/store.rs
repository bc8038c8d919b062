use std::sync::{Arc, Mutex, MutexGuard};

use desk_logging::{desk_debug, desk_warn};
use newsdesk_core::{update, Entity, InsertPosition, ResourceMsg, ResourceState};
use serde::de::DeserializeOwned;

use crate::envelope::{decode_entity, decode_list};
use crate::{ApiError, ApiRequest, Backend, Payload};

/// Where a resource lives on the backend and how its list is wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub list_key: String,
    pub insert_position: InsertPosition,
}

impl Endpoint {
    /// Path doubles as the list envelope key until overridden.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            list_key: path.clone(),
            path,
            insert_position: InsertPosition::Append,
        }
    }

    pub fn list_key(mut self, list_key: impl Into<String>) -> Self {
        self.list_key = list_key.into();
        self
    }

    pub fn prepend(mut self) -> Self {
        self.insert_position = InsertPosition::Prepend;
        self
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path.trim_end_matches('/'), id)
    }
}

/// An entity type with a fixed backend endpoint.
pub trait Resource: Entity + DeserializeOwned + Send + Sync + 'static {
    fn endpoint() -> Endpoint;
}

/// Generic list/create/update/delete store for one entity type.
///
/// Operations never return errors: failures land in the state's `error`.
/// Concurrent operations are allowed and applied in completion order.
pub struct ResourceStore<T> {
    backend: Arc<dyn Backend>,
    endpoint: Endpoint,
    state: Arc<Mutex<ResourceState<T>>>,
}

impl<T> Clone for ResourceStore<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            endpoint: self.endpoint.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Resource> ResourceStore<T> {
    pub fn for_resource(backend: Arc<dyn Backend>) -> Self {
        Self::new(backend, T::endpoint())
    }
}

impl<T> ResourceStore<T>
where
    T: Entity + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(backend: Arc<dyn Backend>, endpoint: Endpoint) -> Self {
        let state = ResourceState::new(endpoint.insert_position);
        Self {
            backend,
            endpoint,
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn snapshot(&self) -> ResourceState<T> {
        self.lock().clone()
    }

    pub async fn list(&self, page: u32, limit: u32) {
        self.dispatch(ResourceMsg::Started);
        let request = ApiRequest::get(&self.endpoint.path)
            .query("page", page)
            .query("limit", limit);
        let result = self
            .backend
            .send(request)
            .await
            .and_then(|body| decode_list(body, &self.endpoint.list_key));
        let msg = match result {
            Ok((items, pagination)) => {
                desk_debug!(
                    "Listed {} {} (page {})",
                    items.len(),
                    self.endpoint.path,
                    page
                );
                ResourceMsg::Listed { items, pagination }
            }
            Err(err) => self.failed("list", err),
        };
        self.dispatch(msg);
    }

    pub async fn fetch(&self, id: &str) {
        self.dispatch(ResourceMsg::Started);
        let result = self
            .backend
            .send(ApiRequest::get(self.endpoint.item_path(id)))
            .await
            .and_then(decode_entity);
        let msg = match result {
            Ok(item) => ResourceMsg::Fetched(item),
            Err(err) => self.failed("fetch", err),
        };
        self.dispatch(msg);
    }

    pub async fn create(&self, payload: Payload) {
        self.dispatch(ResourceMsg::Started);
        let result = self
            .backend
            .send(ApiRequest::post(&self.endpoint.path, payload))
            .await
            .and_then(decode_entity);
        let msg = match result {
            Ok(item) => ResourceMsg::Created(item),
            Err(err) => self.failed("create", err),
        };
        self.dispatch(msg);
    }

    pub async fn update(&self, id: &str, payload: Payload) {
        self.dispatch(ResourceMsg::Started);
        let result = self
            .backend
            .send(ApiRequest::put(self.endpoint.item_path(id), payload))
            .await
            .and_then(decode_entity);
        let msg = match result {
            Ok(item) => ResourceMsg::Updated(item),
            Err(err) => self.failed("update", err),
        };
        self.dispatch(msg);
    }

    pub async fn delete(&self, id: &str) {
        self.dispatch(ResourceMsg::Started);
        let result = self
            .backend
            .send(ApiRequest::delete(self.endpoint.item_path(id)))
            .await;
        let msg = match result {
            Ok(_) => ResourceMsg::Deleted { id: id.to_string() },
            Err(err) => self.failed("delete", err),
        };
        self.dispatch(msg);
    }

    fn failed(&self, operation: &str, err: ApiError) -> ResourceMsg<T> {
        desk_warn!(
            "{} {} failed: {} ({})",
            operation,
            self.endpoint.path,
            err.message,
            err.kind
        );
        ResourceMsg::Failed {
            message: err.message,
        }
    }

    /// Applies one message under the lock, so a completion is never interleaved.
    fn dispatch(&self, msg: ResourceMsg<T>) {
        let mut guard = self.lock();
        let state = std::mem::take(&mut *guard);
        *guard = update(state, msg);
    }

    fn lock(&self) -> MutexGuard<'_, ResourceState<T>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
