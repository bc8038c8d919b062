use newsdesk_core::Pagination;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ApiError;

/// `{ <list_key>: [...], pagination: {...} }`, falling back to `data` or a
/// bare array.
pub(crate) fn decode_list<T: DeserializeOwned>(
    body: Value,
    list_key: &str,
) -> Result<(Vec<T>, Option<Pagination>), ApiError> {
    let (items, pagination) = match body {
        Value::Array(items) => (Value::Array(items), None),
        Value::Object(mut map) => {
            let items = map
                .remove(list_key)
                .or_else(|| map.remove("data"))
                .ok_or_else(|| ApiError::decode(format!("response has no `{list_key}` list")))?;
            (items, map.remove("pagination"))
        }
        other => {
            return Err(ApiError::decode(format!(
                "expected a list envelope, got {}",
                kind_of(&other)
            )))
        }
    };

    let items = serde_json::from_value(items)
        .map_err(|err| ApiError::decode(format!("invalid `{list_key}` items: {err}")))?;
    let pagination = match pagination {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            serde_json::from_value(value)
                .map_err(|err| ApiError::decode(format!("invalid pagination: {err}")))?,
        ),
    };
    Ok((items, pagination))
}

/// The entity under `data`, or the body itself when there is no envelope.
pub(crate) fn decode_entity<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    let entity = match body {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or_default(),
        other => other,
    };
    serde_json::from_value(entity).map_err(|err| ApiError::decode(format!("invalid entity: {err}")))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
