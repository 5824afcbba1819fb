//! Hierarchical error codes.
//!
//! An [`ErrorCode`] is a dot-separated path such as `Validation.Required.Email`.
//! Components report errors under the most specific code they know about, and
//! consumers match by category ("any `Validation` error") without sharing an
//! enumeration:
//!
//! ```rust
//! use coded_errors::ErrorCode;
//!
//! let validation = ErrorCode::new("Validation")?;
//! let required = (&validation / "Required")?;
//!
//! assert_eq!(required.as_str(), "Validation.Required");
//! assert_eq!(required.depth(), 2);
//! assert_eq!(required.leaf(), "Required");
//! assert_eq!(required.parent(), Some(validation.clone()));
//! assert!(required.is_child_of(&validation));
//! # Ok::<(), coded_errors::ArgumentError>(())
//! ```
//!
//! # Matching Boundaries
//!
//! Ancestor matching is segment-aligned. `ValidationError` shares a string
//! prefix with `Validation` but is NOT its child; only `Validation` itself and
//! codes starting with `Validation.` are.
//!
//! # The Empty Code
//!
//! [`ErrorCode::NONE`] (also `ErrorCode::default()`) is the "no code" zero
//! value. It has depth 0, an empty leaf, no parent, and matches nothing, not
//! even itself. It cannot be produced by [`ErrorCode::new`]; an empty string
//! is rejected there.
//!
//! # Allocation
//!
//! Codes built with [`ErrorCode::from_static`] borrow their text and never
//! allocate, and neither do their parents. Codes built at runtime own theirs.

use crate::argument::{ArgumentError, InvalidReason};
use std::borrow::Cow;
use std::fmt;
use std::ops::Div;
use std::str::FromStr;

/// Segment separator.
pub const SEPARATOR: char = '.';

const SEPARATOR_BYTE: u8 = b'.';

#[inline]
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

const fn is_ascii_blank(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_whitespace() {
            return false;
        }
        i += 1;
    }
    true
}

/// Const check used by `define_error_codes!`: non-blank and separator-free.
#[doc(hidden)]
pub const fn __is_valid_segment(segment: &str) -> bool {
    if is_ascii_blank(segment) {
        return false;
    }
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == SEPARATOR_BYTE {
            return false;
        }
        i += 1;
    }
    true
}

// ============================================================================
// Error Code
// ============================================================================

/// Immutable dot-separated error code.
///
/// Equality, hashing and ordering all operate on the textual value; ordering
/// is ordinal (byte-wise), meant for sorting and grouping, not hierarchy.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode {
    value: Cow<'static, str>,
}

impl ErrorCode {
    /// The empty "no code" value.
    pub const NONE: ErrorCode = ErrorCode {
        value: Cow::Borrowed(""),
    };

    /// Create a code from a string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidReason::Blank`] if `value` is empty or whitespace.
    /// Segments are not validated individually; see [`ErrorCode::compose`].
    pub fn new(value: impl Into<String>) -> Result<Self, ArgumentError> {
        let value = value.into();
        if is_blank(&value) {
            return Err(ArgumentError::invalid("value", InvalidReason::Blank));
        }
        Ok(Self {
            value: Cow::Owned(value),
        })
    }

    /// Create a code from a string literal in const context.
    ///
    /// # Panics
    ///
    /// Panics if `value` is empty or ASCII whitespace. In const context this
    /// is a compile error.
    ///
    /// ```rust
    /// use coded_errors::ErrorCode;
    ///
    /// const TIMEOUT: ErrorCode = ErrorCode::from_static("IO.Timeout");
    /// assert_eq!(TIMEOUT.depth(), 2);
    /// ```
    #[inline]
    pub const fn from_static(value: &'static str) -> Self {
        assert!(!is_ascii_blank(value), "error code must not be blank");
        Self {
            value: Cow::Borrowed(value),
        }
    }

    /// Append one segment, producing a child code.
    ///
    /// Composing onto [`ErrorCode::NONE`] yields a root code equal to `child`.
    ///
    /// # Errors
    ///
    /// - [`InvalidReason::Blank`] if `child` is empty or whitespace
    /// - [`InvalidReason::ContainsSeparator`] if `child` contains `.`; only a
    ///   single segment may be appended at a time
    pub fn compose(&self, child: &str) -> Result<Self, ArgumentError> {
        if is_blank(child) {
            return Err(ArgumentError::invalid("child", InvalidReason::Blank));
        }
        if child.contains(SEPARATOR) {
            return Err(ArgumentError::invalid(
                "child",
                InvalidReason::ContainsSeparator,
            ));
        }
        if self.is_none() {
            return Self::new(child);
        }

        let mut value = String::with_capacity(self.value.len() + 1 + child.len());
        value.push_str(&self.value);
        value.push(SEPARATOR);
        value.push_str(child);
        Ok(Self {
            value: Cow::Owned(value),
        })
    }

    /// [`ErrorCode::compose`] for a child that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] for `None`, otherwise as `compose`.
    pub fn compose_optional(&self, child: Option<&str>) -> Result<Self, ArgumentError> {
        match child {
            Some(child) => self.compose(child),
            None => Err(ArgumentError::missing("child")),
        }
    }

    /// The textual value; empty for [`ErrorCode::NONE`].
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// `true` for the empty "no code" value.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.value.is_empty()
    }

    /// Number of segments; 0 for [`ErrorCode::NONE`].
    pub fn depth(&self) -> usize {
        if self.is_none() {
            return 0;
        }
        self.value.matches(SEPARATOR).count() + 1
    }

    /// Last segment; empty for [`ErrorCode::NONE`].
    pub fn leaf(&self) -> &str {
        match self.value.rfind(SEPARATOR) {
            Some(idx) => &self.value[idx + 1..],
            None => &self.value,
        }
    }

    /// The code with its last segment removed.
    ///
    /// `None` for single-segment codes and for [`ErrorCode::NONE`]. Also
    /// `None` when the remaining prefix would be blank (a value such as
    /// `".Orphan"`), since that prefix is not a constructible code.
    pub fn parent(&self) -> Option<ErrorCode> {
        let idx = self.value.rfind(SEPARATOR)?;
        let value = match self.value {
            Cow::Borrowed(s) => Cow::Borrowed(&s[..idx]),
            Cow::Owned(ref s) => Cow::Owned(s[..idx].to_owned()),
        };
        if is_blank(&value) {
            return None;
        }
        Some(Self { value })
    }

    /// Iterate this code and then each successive parent, most specific first.
    ///
    /// Yields nothing for [`ErrorCode::NONE`].
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: (!self.is_none()).then(|| self.clone()),
        }
    }

    /// Iterate the dot-separated segments; empty for [`ErrorCode::NONE`].
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        (!self.is_none())
            .then(|| self.value.split(SEPARATOR))
            .into_iter()
            .flatten()
    }

    /// `true` if this code equals `ancestor` or lies beneath it.
    ///
    /// The relation is reflexive. Prefixes only count on a segment boundary,
    /// and either side being [`ErrorCode::NONE`] always yields `false`.
    pub fn is_child_of(&self, ancestor: &ErrorCode) -> bool {
        if self.is_none() || ancestor.is_none() {
            return false;
        }
        let value = self.value.as_bytes();
        let prefix = ancestor.value.as_bytes();
        if value == prefix {
            return true;
        }
        value.len() > prefix.len()
            && value.starts_with(prefix)
            && value[prefix.len()] == SEPARATOR_BYTE
    }

    /// Mirror of [`ErrorCode::is_child_of`].
    #[inline]
    pub fn is_ancestor_of(&self, descendant: &ErrorCode) -> bool {
        descendant.is_child_of(self)
    }
}

impl Default for ErrorCode {
    #[inline]
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Debug for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErrorCode").field(&self.as_str()).finish()
    }
}

impl fmt::Display for ErrorCode {
    /// Writes the bare value, no decoration.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for ErrorCode {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        code.value.into_owned()
    }
}

impl FromStr for ErrorCode {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ErrorCode {
    type Error = ArgumentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ErrorCode {
    type Error = ArgumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<Option<&str>> for ErrorCode {
    type Error = ArgumentError;

    /// Like [`ErrorCode::new`], but reports `None` as a missing value.
    fn try_from(value: Option<&str>) -> Result<Self, Self::Error> {
        match value {
            Some(value) => Self::new(value),
            None => Err(ArgumentError::missing("value")),
        }
    }
}

impl Div<&str> for &ErrorCode {
    type Output = Result<ErrorCode, ArgumentError>;

    /// Operator form of [`ErrorCode::compose`].
    #[inline]
    fn div(self, child: &str) -> Self::Output {
        self.compose(child)
    }
}

impl Div<&str> for ErrorCode {
    type Output = Result<ErrorCode, ArgumentError>;

    #[inline]
    fn div(self, child: &str) -> Self::Output {
        self.compose(child)
    }
}

/// Iterator returned by [`ErrorCode::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors {
    next: Option<ErrorCode>,
}

impl Iterator for Ancestors {
    type Item = ErrorCode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: &str) -> ErrorCode {
        ErrorCode::new(value).unwrap()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    #[test]
    fn new_rejects_blank_values() {
        for value in ["", "   ", "\t\n"] {
            let err = ErrorCode::new(value).unwrap_err();
            assert_eq!(
                err,
                ArgumentError::invalid("value", InvalidReason::Blank),
                "value {:?}",
                value
            );
        }
    }

    #[test]
    fn absent_value_is_reported_as_missing() {
        let err = ErrorCode::try_from(None::<&str>).unwrap_err();
        assert!(err.is_missing());
        assert_eq!(err.param(), "value");
    }

    #[test]
    fn new_does_not_validate_segments() {
        let odd = code("A..B");
        assert_eq!(odd.depth(), 3);
        assert_eq!(odd.leaf(), "B");
    }

    #[test]
    fn const_construction_borrows() {
        const CODE: ErrorCode = ErrorCode::from_static("Validation.Required");
        assert_eq!(CODE.as_str(), "Validation.Required");
        assert!(matches!(CODE.value, Cow::Borrowed(_)));
        assert!(matches!(CODE.parent().unwrap().value, Cow::Borrowed(_)));
    }

    #[test]
    fn segment_check_for_macros() {
        assert!(__is_valid_segment("Required"));
        assert!(!__is_valid_segment("Required.Email"));
        assert!(!__is_valid_segment(" "));
        assert!(!__is_valid_segment(""));
    }

    #[test]
    #[should_panic(expected = "error code must not be blank")]
    fn from_static_panics_on_blank() {
        let _ = ErrorCode::from_static("  ");
    }

    // ========================================================================
    // Derived Properties
    // ========================================================================

    #[test]
    fn single_segment_properties() {
        let root = code("NotFound");
        assert_eq!(root.depth(), 1);
        assert_eq!(root.leaf(), "NotFound");
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn sentinel_properties() {
        let none = ErrorCode::default();
        assert_eq!(none, ErrorCode::NONE);
        assert!(none.is_none());
        assert_eq!(none.as_str(), "");
        assert_eq!(none.depth(), 0);
        assert_eq!(none.leaf(), "");
        assert_eq!(none.parent(), None);
        assert_eq!(none.segments().count(), 0);
        assert_eq!(none.ancestors().count(), 0);
    }

    #[test]
    fn parent_of_blank_prefix_is_absent() {
        assert_eq!(code(".Orphan").parent(), None);
    }

    #[test]
    fn segments_and_ancestors() {
        let email = code("Validation.Required.Email");
        assert_eq!(
            email.segments().collect::<Vec<_>>(),
            ["Validation", "Required", "Email"]
        );
        let chain: Vec<String> = email.ancestors().map(String::from).collect();
        assert_eq!(
            chain,
            ["Validation.Required.Email", "Validation.Required", "Validation"]
        );
    }

    // ========================================================================
    // Composition
    // ========================================================================

    #[test]
    fn compose_appends_one_segment() {
        let required = (&code("Validation") / "Required").unwrap();
        assert_eq!(required.as_str(), "Validation.Required");
        assert_eq!(required.depth(), 2);
        assert_eq!(required.leaf(), "Required");
        assert_eq!(required.parent().unwrap().as_str(), "Validation");
    }

    #[test]
    fn compose_onto_sentinel_yields_root() {
        let root = ErrorCode::NONE.compose("Internal").unwrap();
        assert_eq!(root, code("Internal"));
        assert_eq!(root.depth(), 1);
    }

    #[test]
    fn compose_rejects_separator() {
        let err = (code("Validation") / "Required.Email").unwrap_err();
        assert_eq!(
            err.reason(),
            Some(InvalidReason::ContainsSeparator)
        );
    }

    #[test]
    fn compose_rejects_blank_and_missing() {
        let parent = code("Validation");
        assert_eq!(
            parent.compose("").unwrap_err().reason(),
            Some(InvalidReason::Blank)
        );
        assert_eq!(
            parent.compose("  ").unwrap_err().reason(),
            Some(InvalidReason::Blank)
        );
        assert!(parent.compose_optional(None).unwrap_err().is_missing());
        assert!(parent.compose_optional(Some("Ok")).is_ok());
    }

    // ========================================================================
    // Matching
    // ========================================================================

    #[test]
    fn child_of_ancestor() {
        let required = code("Validation.Required");
        assert!(required.is_child_of(&code("Validation")));
        assert!(!required.is_child_of(&code("NotFound")));
        assert!(code("Validation").is_ancestor_of(&required));
    }

    #[test]
    fn child_of_is_reflexive() {
        let c = code("IO.Network");
        assert!(c.is_child_of(&c));
    }

    #[test]
    fn child_of_respects_segment_boundary() {
        assert!(!code("ValidationError").is_child_of(&code("Validation")));
        assert!(!code("Validation").is_child_of(&code("Validation.Required")));
    }

    #[test]
    fn child_of_false_for_sentinel() {
        let c = code("Validation");
        assert!(!ErrorCode::NONE.is_child_of(&c));
        assert!(!c.is_child_of(&ErrorCode::NONE));
        assert!(!ErrorCode::NONE.is_child_of(&ErrorCode::NONE));
    }

    // ========================================================================
    // Equality, Ordering, Conversion
    // ========================================================================

    #[test]
    fn static_and_owned_codes_compare_equal() {
        const STATIC: ErrorCode = ErrorCode::from_static("IO.Network");
        assert_eq!(STATIC, code("IO.Network"));
    }

    #[test]
    fn ordering_is_ordinal() {
        let mut codes = vec![code("b"), code("B"), code("a.b"), code("a")];
        codes.sort();
        let values: Vec<&str> = codes.iter().map(ErrorCode::as_str).collect();
        assert_eq!(values, ["B", "a", "a.b", "b"]);
    }

    #[test]
    fn string_round_trip() {
        let original = code("Conflict.Version");
        let text: String = original.clone().into();
        assert_eq!(text.parse::<ErrorCode>().unwrap(), original);
        assert_eq!(original.to_string(), "Conflict.Version");
        assert_eq!(format!("{:?}", original), "ErrorCode(\"Conflict.Version\")");
    }

    #[test]
    fn sentinel_does_not_round_trip_through_new() {
        let text: String = ErrorCode::NONE.into();
        assert!(ErrorCode::new(text).is_err());
    }
}
