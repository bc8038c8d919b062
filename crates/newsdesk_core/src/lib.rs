//! Newsdesk core: pure resource state, reducer and shared data model.
mod credentials;
mod entity;
mod msg;
mod notification;
mod state;
mod update;

pub use credentials::{Credentials, UserRecord};
pub use entity::{deserialize_entity_id, serialize_entity_id, Entity};
pub use msg::ResourceMsg;
pub use notification::{NotificationKind, NotificationState};
pub use state::{InsertPosition, Pagination, ResourceState};
pub use update::update;
