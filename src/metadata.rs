//! Supplemental key/value context attached to an [`Error`](crate::Error).
//!
//! Metadata is never part of an error's identity: two errors with the same
//! code and message are equal whatever their metadata says.
//!
//! # Ordering
//!
//! [`Metadata`] keeps keys in the order they were first introduced.
//! Overwriting a key replaces its value in place without moving it, so a
//! chain of `with` calls renders in a stable, predictable order.
//!
//! # Values
//!
//! [`MetadataValue`] is a small tagged union (null, bool, integer, float,
//! string, sequence, nested map). Keeping it closed is what makes equality
//! and serialization well defined.
//!
//! # Capacity Choice
//!
//! Entries live in a `SmallVec<[_; 4]>`. Most errors carry a handful of
//! entries, so lookup is a linear scan over inline storage and typical maps
//! never touch the heap for the entry table itself.

use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// Metadata Value
// ============================================================================

/// A single metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Floating point.
    Float(f64),
    /// Text.
    String(Cow<'static, str>),
    /// Ordered sequence of values.
    Sequence(Vec<MetadataValue>),
    /// Nested mapping. Boxed since [`Metadata`] stores entries inline.
    Map(Box<Metadata>),
}

impl MetadataValue {
    /// `true` for [`MetadataValue::Null`].
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the text of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(&**s),
            _ => None,
        }
    }

    /// The value of an integer.
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// The value of a float or integer, widened to `f64`.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// The value of a boolean.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Borrow the items of a sequence.
    pub fn as_sequence(&self) -> Option<&[MetadataValue]> {
        match self {
            Self::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Borrow a nested map.
    pub fn as_map(&self) -> Option<&Metadata> {
        match self {
            Self::Map(map) => Some(&**map),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::String(s) => f.write_str(s),
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Self::Map(map) => write!(f, "{}", map),
        }
    }
}

impl From<&'static str> for MetadataValue {
    fn from(value: &'static str) -> Self {
        Self::String(Cow::Borrowed(value))
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::String(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for MetadataValue {
    fn from(value: Cow<'static, str>) -> Self {
        Self::String(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! integer_from {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for MetadataValue {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )+
    };
}

integer_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for MetadataValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<MetadataValue>> From<Vec<T>> for MetadataValue {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<Metadata> for MetadataValue {
    fn from(map: Metadata) -> Self {
        Self::Map(Box::new(map))
    }
}

impl<T: Into<MetadataValue>> From<Option<T>> for MetadataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// ============================================================================
// Metadata Map
// ============================================================================

#[derive(Debug, Clone)]
struct MetadataEntry {
    key: Cow<'static, str>,
    value: MetadataValue,
}

/// Insertion-ordered string-keyed map of [`MetadataValue`]s.
///
/// Errors hold metadata immutably. Build one here, hand it to
/// [`Error::from_parts`](crate::Error::from_parts), and use
/// [`Error::with`](crate::Error::with) for further additions; each addition
/// produces an independent copy.
///
/// Equality ignores ordering: two maps are equal when they hold the same keys
/// with equal values.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    entries: SmallVec<[MetadataEntry; 4]>,
}

impl Metadata {
    /// Create an empty map.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.value)
    }

    /// `true` if `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set `key` to `value`, returning the previous value.
    ///
    /// A new key is appended; an existing key keeps its position.
    pub fn insert(
        &mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<MetadataValue>,
    ) -> Option<MetadataValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => Some(std::mem::replace(&mut entry.value, value)),
            None => {
                self.entries.push(MetadataEntry { key, value });
                None
            }
        }
    }

    /// Copy of this map with `key` set to `value`. `self` is untouched.
    #[must_use]
    pub fn with(
        &self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<MetadataValue>,
    ) -> Self {
        let mut copy = self.clone();
        copy.insert(key, value);
        copy
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_ref())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.iter().map(|e| (e.key.as_ref(), &e.value))
    }
}

impl PartialEq for Metadata {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("}")
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<Cow<'static, str>>,
    V: Into<MetadataValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for Metadata
where
    K: Into<Cow<'static, str>>,
    V: Into<MetadataValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_operations() {
        let mut meta = Metadata::new();
        assert!(meta.is_empty());

        assert_eq!(meta.insert("field", "email"), None);
        assert_eq!(meta.insert("max", 100), None);

        assert_eq!(meta.len(), 2);
        assert_eq!(meta.get("field").and_then(MetadataValue::as_str), Some("email"));
        assert_eq!(meta.get("max").and_then(MetadataValue::as_i64), Some(100));
        assert!(!meta.contains_key("min"));
    }

    #[test]
    fn overwrite_keeps_first_position() {
        let mut meta = Metadata::new();
        meta.insert("a", 1);
        meta.insert("b", 2);
        let previous = meta.insert("a", 3);

        assert_eq!(previous, Some(MetadataValue::Integer(1)));
        assert_eq!(meta.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(meta.get("a"), Some(&MetadataValue::Integer(3)));
    }

    #[test]
    fn with_leaves_original_untouched() {
        let original: Metadata = [("a", 1)].into_iter().collect();
        let extended = original.with("b", true);

        assert_eq!(original.len(), 1);
        assert!(!original.contains_key("b"));
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.get("b"), Some(&MetadataValue::Bool(true)));
    }

    #[test]
    fn equality_ignores_order() {
        let left: Metadata = [("a", 1), ("b", 2)].into_iter().collect();
        let right: Metadata = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(left, right);

        let different: Metadata = [("a", 1), ("b", 3)].into_iter().collect();
        assert_ne!(left, different);
    }

    #[test]
    fn value_conversions() {
        assert_eq!(MetadataValue::from(7u32), MetadataValue::Integer(7));
        assert_eq!(MetadataValue::from(1.5f64).as_f64(), Some(1.5));
        assert_eq!(MetadataValue::from(2i64).as_f64(), Some(2.0));
        assert_eq!(MetadataValue::from(None::<i32>), MetadataValue::Null);
        assert_eq!(
            MetadataValue::from(vec!["a", "b"]).as_sequence().map(<[_]>::len),
            Some(2)
        );
        assert_eq!(
            MetadataValue::from(format!("user-{}", 42)).as_str(),
            Some("user-42")
        );
    }

    #[test]
    fn nested_display() {
        let inner: Metadata = [("x", 1)].into_iter().collect();
        let mut meta = Metadata::new();
        meta.insert("tags", vec!["a", "b"]);
        meta.insert("pos", inner);
        meta.insert("none", MetadataValue::Null);

        assert_eq!(meta.to_string(), "{tags: [a, b], pos: {x: 1}, none: null}");
    }
}
