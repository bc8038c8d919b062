//! Dashboard entities and their backend endpoints.
//!
//! Fields the dashboard does not edit are kept in `extra` so an update can
//! send back what it received.

use newsdesk_core::{deserialize_entity_id, serialize_entity_id, Entity};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::store::{Endpoint, Resource};

macro_rules! resource {
    ($ty:ty, $path:literal, $list_key:literal) => {
        impl Entity for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        }

        impl Resource for $ty {
            fn endpoint() -> Endpoint {
                Endpoint::new($path).list_key($list_key)
            }
        }
    };
    ($ty:ty, $path:literal, $list_key:literal, prepend) => {
        impl Entity for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        }

        impl Resource for $ty {
            fn endpoint() -> Endpoint {
                Endpoint::new($path).list_key($list_key).prepend()
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(
        flatten,
        deserialize_with = "deserialize_entity_id",
        serialize_with = "serialize_entity_id"
    )]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource!(Article, "articles", "articles", prepend);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    #[serde(
        flatten,
        deserialize_with = "deserialize_entity_id",
        serialize_with = "serialize_entity_id"
    )]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub placement: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub starts_at: Option<String>,
    #[serde(default)]
    pub ends_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource!(Advertisement, "advertisements", "advertisements", prepend);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(
        flatten,
        deserialize_with = "deserialize_entity_id",
        serialize_with = "serialize_entity_id"
    )]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource!(Category, "categories", "categories");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(
        flatten,
        deserialize_with = "deserialize_entity_id",
        serialize_with = "serialize_entity_id"
    )]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: Option<Value>,
    #[serde(default)]
    pub city: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource!(Location, "locations", "locations");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortVideo {
    #[serde(
        flatten,
        deserialize_with = "deserialize_entity_id",
        serialize_with = "serialize_entity_id"
    )]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource!(ShortVideo, "videos", "videos", prepend);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EPaper {
    #[serde(
        flatten,
        deserialize_with = "deserialize_entity_id",
        serialize_with = "serialize_entity_id"
    )]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub edition_date: Option<String>,
    #[serde(default)]
    pub pdf: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource!(EPaper, "epapers", "epapers", prepend);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(
        flatten,
        deserialize_with = "deserialize_entity_id",
        serialize_with = "serialize_entity_id"
    )]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource!(State, "states", "states");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(
        flatten,
        deserialize_with = "deserialize_entity_id",
        serialize_with = "serialize_entity_id"
    )]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource!(City, "cities", "cities");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(
        flatten,
        deserialize_with = "deserialize_entity_id",
        serialize_with = "serialize_entity_id"
    )]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource!(User, "users", "users");
