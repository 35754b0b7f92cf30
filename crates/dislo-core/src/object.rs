//! Decode and encode boundary for working objects.
//!
//! Every raw payload enters the typed world through [`decode`]. A missing required key
//! or a value of the wrong shape becomes a [`DisloError::Deserialization`] naming the
//! object that failed; absent optional keys decode to `None` or an empty collection.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{DisloError, Result};

/// Key the server uses to tag the type of an encoded working object.
pub const TYPE_KEY: &str = "_type";

/// Decode a raw payload into `T`, naming `object` in the error on failure.
///
/// # Errors
///
/// Returns [`DisloError::Deserialization`] when the payload does not match `T`.
pub fn decode<T: DeserializeOwned>(object: &'static str, raw: &Value) -> Result<T> {
    T::deserialize(raw).map_err(|e| {
        tracing::warn!(object, error = %e, "Failed to decode Dislo payload");
        DisloError::deserialization(object, &e)
    })
}

/// A typed value mirroring a Dislo server entity.
///
/// Working objects are immutable once decoded. For every implementor,
/// `T::from_response(&x.to_value())` reproduces `x`.
pub trait WorkingObject: Serialize + DeserializeOwned {
    /// Type tag written under [`TYPE_KEY`] when encoding.
    const TYPE_NAME: &'static str;

    /// Decode from a raw response map.
    ///
    /// # Errors
    ///
    /// Returns [`DisloError::Deserialization`] when a required key is missing or mistyped.
    fn from_response(raw: &Value) -> Result<Self> {
        decode(Self::TYPE_NAME, raw)
    }

    /// Encode to a raw map in wire shape.
    ///
    /// # Errors
    ///
    /// Returns [`DisloError::Serialization`] if serde cannot encode the value, e.g.
    /// a map with non-string keys.
    fn try_to_value(&self) -> Result<Value> {
        let mut value = serde_json::to_value(self).map_err(|e| DisloError::Serialization {
            object: Self::TYPE_NAME,
            message: e.to_string(),
        })?;
        if let Value::Object(map) = &mut value {
            map.insert(TYPE_KEY.to_string(), Value::String(Self::TYPE_NAME.to_string()));
        }
        Ok(value)
    }

    /// Encode to a raw map in wire shape.
    ///
    /// The working objects in this crate only hold string-keyed maps and plain values,
    /// so encoding them cannot fail. For an implementor where it can, the failure is
    /// logged at `error` and `null` is returned; use [`WorkingObject::try_to_value`]
    /// to handle it.
    #[must_use]
    fn to_value(&self) -> Value {
        self.try_to_value().unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to encode working object");
            Value::Null
        })
    }
}

/// Decode a list of working objects, failing on the first bad element.
///
/// # Errors
///
/// Returns [`DisloError::Deserialization`] for the first element that fails to decode,
/// or when `raw` is not an array.
pub fn decode_list<T: WorkingObject>(raw: &Value) -> Result<Vec<T>> {
    match raw {
        Value::Array(items) => items.iter().map(T::from_response).collect(),
        other => Err(DisloError::Deserialization {
            object: T::TYPE_NAME,
            message: format!("expected a list, found {}", kind(other)),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        #[serde(default)]
        count: Option<u32>,
    }

    impl WorkingObject for Sample {
        const TYPE_NAME: &'static str = "Sample";
    }

    #[test]
    fn missing_required_key_names_object() {
        let err = Sample::from_response(&json!({"count": 1})).unwrap_err();
        match err {
            DisloError::Deserialization { object, message } => {
                assert_eq!(object, "Sample");
                assert!(message.contains("name"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn absent_optional_key_is_none() {
        let sample = Sample::from_response(&json!({"name": "a"})).unwrap();
        assert_eq!(sample.count, None);
    }

    #[test]
    fn to_value_tags_type() {
        let value = Sample { name: "a".into(), count: None }.to_value();
        assert_eq!(value[TYPE_KEY], "Sample");
        assert_eq!(Sample::from_response(&value).unwrap().name, "a");
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct TupleKeyed {
        #[serde(default)]
        by_pair: std::collections::BTreeMap<(u8, u8), u8>,
    }

    impl WorkingObject for TupleKeyed {
        const TYPE_NAME: &'static str = "TupleKeyed";
    }

    #[test]
    fn encode_failure_is_reported() {
        let value = TupleKeyed {
            by_pair: [((1, 2), 3)].into_iter().collect(),
        };
        match value.try_to_value().unwrap_err() {
            DisloError::Serialization { object, .. } => assert_eq!(object, "TupleKeyed"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(value.to_value(), Value::Null);
    }

    #[test]
    fn decode_list_rejects_non_list() {
        let err = decode_list::<Sample>(&json!({"name": "a"})).unwrap_err();
        assert!(err.to_string().contains("expected a list, found a map"));
    }
}
