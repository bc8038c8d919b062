use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serializer};

/// A record managed by a resource store. Identity is the backend id,
/// normalized to a string.
pub trait Entity: Clone + std::fmt::Debug {
    fn id(&self) -> &str;
}

/// Either a JSON string or a JSON integer; the backend is not consistent
/// about id types across collections.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

/// Reads the id of a flattened `id` field from `id` or `_id`.
///
/// Documents with virtual ids carry both keys; `id` wins then. The field
/// must be declared before any flattened catch-all map so the id keys are
/// consumed first. Pair with [`serialize_entity_id`].
pub fn deserialize_entity_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct IdKeys {
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        id: Option<String>,
        #[serde(rename = "_id", default, deserialize_with = "deserialize_optional_id")]
        document_id: Option<String>,
    }

    let keys = IdKeys::deserialize(deserializer)?;
    keys.id
        .or(keys.document_id)
        .ok_or_else(|| D::Error::missing_field("id"))
}

/// Writes a flattened id back out as a plain `id` key.
pub fn serialize_entity_id<S>(id: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry("id", id)?;
    map.end()
}
