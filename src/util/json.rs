//! Conversion from stored BSON to the JSON the API returns.
//!
//! Store identifiers are rendered as 24-char hex strings and date values as
//! RFC 3339 strings, so clients never see extended-JSON wrappers.

use bson::Bson;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::util::error::ServiceError;

/// Serialize an entity to BSON, then flatten it into plain API JSON.
pub fn to_api_value<T: Serialize>(value: &T) -> Result<Value, ServiceError> {
    let bson = bson::to_bson(value)
        .map_err(|e| ServiceError::InternalError(format!("Failed to serialize document: {}", e)))?;
    Ok(bson_to_json(bson))
}

pub fn to_api_list<T: Serialize>(values: &[T]) -> Result<Value, ServiceError> {
    values
        .iter()
        .map(to_api_value)
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::Number(i.into()),
        Bson::Int64(i) => Value::Number(i.into()),
        Bson::Double(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        Bson::String(s) => Value::String(s),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Value::Number(dt.timestamp_millis().into())),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => {
            let mut map = Map::with_capacity(doc.len());
            for (key, value) in doc {
                map.insert(key, bson_to_json(value));
            }
            Value::Object(map)
        }
        other => other.into_relaxed_extjson(),
    }
}

/// Reads a BSON numeric value of any width as i64.
pub fn bson_as_i64(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(i) => Some(i64::from(*i)),
        Bson::Int64(i) => Some(*i),
        Bson::Double(f) if f.fract() == 0.0 => Some(*f as i64),
        _ => None,
    }
}
