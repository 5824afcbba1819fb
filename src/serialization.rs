//! Serde support (feature `serde`, on by default).
//!
//! # Wire Shape
//!
//! | Value                    | Serialized as                                   |
//! |--------------------------|-------------------------------------------------|
//! | `ErrorCode`              | its dotted string                               |
//! | `ErrorCode::NONE`        | `null`                                          |
//! | `Metadata`               | a map, entries in insertion order               |
//! | `Error`                  | `{code, message, metadata?, inner?}`            |
//! | default `Error`          | `null`                                          |
//!
//! Reading is lenient where it can be and strict where it must be:
//!
//! - `null`, a missing value, or a blank string reads as [`ErrorCode::NONE`];
//!   any non-string token for a code is rejected.
//! - `Error` field names match case-insensitively, unknown fields are
//!   skipped, and `null` reads back as [`Error::default`].
//! - Unsigned integers above `i64::MAX` read as [`MetadataValue::Float`].
//!
//! ```rust
//! # use coded_errors::{Error, ErrorCode};
//! let err = Error::new(ErrorCode::from_static("NotFound.User"), "missing").with("id", 7);
//! let json = serde_json::to_string(&err).unwrap();
//! assert_eq!(json, r#"{"code":"NotFound.User","message":"missing","metadata":{"id":7}}"#);
//!
//! let back: Error = serde_json::from_str(r#"{"CODE":"NotFound.User","Message":"missing","x":1}"#).unwrap();
//! assert_eq!(back, err);
//! ```
//!
//! Chains are encoded as nested objects, so a format's own recursion limit
//! (128 levels for `serde_json`) bounds how deep a chain can be read back.

use crate::codes::ErrorCode;
use crate::error::Error;
use crate::metadata::{Metadata, MetadataValue};
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ============================================================================
// ErrorCode
// ============================================================================

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_none() {
            serializer.serialize_none()
        } else {
            serializer.serialize_str(self.as_str())
        }
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !crate::codes::is_blank(&raw) => {
                ErrorCode::new(raw).map_err(de::Error::custom)
            }
            _ => Ok(ErrorCode::NONE),
        }
    }
}

// ============================================================================
// Metadata
// ============================================================================

impl Serialize for MetadataValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MetadataValue::Null => serializer.serialize_unit(),
            MetadataValue::Bool(b) => serializer.serialize_bool(*b),
            MetadataValue::Integer(i) => serializer.serialize_i64(*i),
            MetadataValue::Float(x) => serializer.serialize_f64(*x),
            MetadataValue::String(s) => serializer.serialize_str(s),
            MetadataValue::Sequence(items) => serializer.collect_seq(items),
            MetadataValue::Map(map) => map.serialize(serializer),
        }
    }
}

struct MetadataValueVisitor;

impl<'de> Visitor<'de> for MetadataValueVisitor {
    type Value = MetadataValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a metadata value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(MetadataValue::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(MetadataValue::Integer(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(match i64::try_from(v) {
            Ok(i) => MetadataValue::Integer(i),
            Err(_) => MetadataValue::Float(v as f64),
        })
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(MetadataValue::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(MetadataValue::from(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(MetadataValue::from(v))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(MetadataValue::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(MetadataValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        MetadataValue::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(64));
        while let Some(item) = seq.next_element::<MetadataValue>()? {
            items.push(item);
        }
        Ok(MetadataValue::Sequence(items))
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        MetadataVisitor.visit_map(map).map(MetadataValue::from)
    }
}

impl<'de> Deserialize<'de> for MetadataValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MetadataValueVisitor)
    }
}

impl Serialize for Metadata {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct MetadataVisitor;

impl<'de> Visitor<'de> for MetadataVisitor {
    type Value = Metadata;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a metadata map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Metadata::new();
        while let Some((key, value)) = access.next_entry::<String, MetadataValue>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MetadataVisitor)
    }
}

// ============================================================================
// Error
// ============================================================================

const FIELD_CODE: &str = "code";
const FIELD_MESSAGE: &str = "message";
const FIELD_METADATA: &str = "metadata";
const FIELD_INNER: &str = "inner";

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_default() {
            return serializer.serialize_none();
        }

        let len = 2 + usize::from(self.metadata().is_some()) + usize::from(self.inner().is_some());
        let mut record = serializer.serialize_struct("Error", len)?;
        record.serialize_field(FIELD_CODE, self.code())?;
        record.serialize_field(FIELD_MESSAGE, self.message())?;
        if let Some(metadata) = self.metadata() {
            record.serialize_field(FIELD_METADATA, metadata)?;
        }
        if let Some(inner) = self.inner() {
            record.serialize_field(FIELD_INNER, inner)?;
        }
        record.end()
    }
}

struct ErrorVisitor;

impl<'de> Visitor<'de> for ErrorVisitor {
    type Value = Error;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an error record or null")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Error::default())
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Error::default())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut code = ErrorCode::NONE;
        let mut message: Option<String> = None;
        let mut metadata: Option<Metadata> = None;
        let mut inner: Option<Error> = None;

        // Later duplicates win.
        while let Some(key) = access.next_key::<String>()? {
            if key.eq_ignore_ascii_case(FIELD_CODE) {
                code = access.next_value()?;
            } else if key.eq_ignore_ascii_case(FIELD_MESSAGE) {
                message = access.next_value()?;
            } else if key.eq_ignore_ascii_case(FIELD_METADATA) {
                metadata = access.next_value()?;
            } else if key.eq_ignore_ascii_case(FIELD_INNER) {
                let nested: Error = access.next_value()?;
                inner = (!nested.is_default()).then_some(nested);
            } else {
                access.next_value::<IgnoredAny>()?;
            }
        }

        Ok(Error::from_parts(
            code,
            message.unwrap_or_default(),
            metadata,
            inner,
        ))
    }
}

impl<'de> Deserialize<'de> for Error {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(ErrorVisitor)
    }
}
