//! Fluent construction of [`Error`] values.
//!
//! [`Error::new`] and [`Error::from_parts`] cover the common cases. The
//! builder exists for call sites that assemble an error piecemeal, for example
//! when the message or the inner cause is only known conditionally:
//!
//! ```rust
//! use coded_errors::{Error, ErrorCode};
//!
//! let cause = Error::new(ErrorCode::from_static("IO.Timeout"), "No reply in 30s.");
//! let err = Error::builder()
//!     .code(ErrorCode::from_static("Unavailable.Upstream"))
//!     .message("Billing service unavailable.")
//!     .entry("service", "billing")
//!     .entry("attempts", 3)
//!     .inner(cause)
//!     .build()?;
//!
//! assert_eq!(err.metadata().map(|m| m.len()), Some(2));
//! assert_eq!(err.inner().map(|e| e.code().as_str()), Some("IO.Timeout"));
//! # Ok::<(), coded_errors::ArgumentError>(())
//! ```
//!
//! # State Tracking
//!
//! Setting the message twice is almost always a logic bug in the calling
//! code, so debug builds panic on it. Release builds keep the last value.

use crate::argument::ArgumentError;
use crate::codes::ErrorCode;
use crate::error::Error;
use crate::metadata::{Metadata, MetadataValue};
use std::borrow::Cow;

/// Fluent builder for [`Error`].
///
/// Code, metadata and inner default to absent. The message has no default:
/// [`ErrorBuilder::build`] fails when it was never supplied. Pass `""`
/// explicitly for an intentionally empty message.
#[derive(Debug, Default)]
#[must_use = "builders do nothing until built"]
pub struct ErrorBuilder {
    code: ErrorCode,
    message: Option<Cow<'static, str>>,
    metadata: Option<Metadata>,
    inner: Option<Error>,
}

impl ErrorBuilder {
    /// Create an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error code.
    #[inline]
    pub fn code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }

    /// Set the message.
    ///
    /// # Panics (Debug Mode)
    ///
    /// Panics if a message was already set.
    #[inline]
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        debug_assert!(
            self.message.is_none(),
            "ErrorBuilder: message already set (attempted overwrite)"
        );
        self.message = Some(message.into());
        self
    }

    /// Set a message that may be absent; `None` leaves the builder without one.
    #[inline]
    pub fn message_opt(self, message: Option<impl Into<Cow<'static, str>>>) -> Self {
        match message {
            Some(message) => self.message(message),
            None => self,
        }
    }

    /// Replace the whole metadata map.
    #[inline]
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Add or overwrite one metadata entry.
    #[inline]
    pub fn entry(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<MetadataValue>,
    ) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key, value);
        self
    }

    /// Set the inner cause.
    #[inline]
    pub fn inner(mut self, inner: Error) -> Self {
        self.inner = Some(inner);
        self
    }

    /// Build the error.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] for `message` if none was set.
    pub fn build(self) -> Result<Error, ArgumentError> {
        let message = self.message.ok_or(ArgumentError::missing("message"))?;
        Ok(Error::from_parts(
            self.code,
            message,
            self.metadata,
            self.inner,
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_message() {
        let err = ErrorBuilder::new()
            .code(ErrorCode::from_static("Validation"))
            .build()
            .unwrap_err();
        assert_eq!(err, ArgumentError::Missing { param: "message" });

        let err = ErrorBuilder::new().message_opt(None::<&'static str>).build();
        assert!(err.unwrap_err().is_missing());
    }

    #[test]
    fn empty_message_is_allowed() {
        let err = ErrorBuilder::new().message("").build().unwrap();
        assert_eq!(err.message(), "");
        assert!(err.is_default());
    }

    #[test]
    fn entries_accumulate_in_order() {
        let err = ErrorBuilder::new()
            .code(ErrorCode::from_static("Validation.Range"))
            .message("Out of range.")
            .entry("min", 1)
            .entry("max", 10)
            .entry("min", 0)
            .build()
            .unwrap();

        let meta = err.metadata().unwrap();
        assert_eq!(meta.keys().collect::<Vec<_>>(), ["min", "max"]);
        assert_eq!(meta.get("min"), Some(&MetadataValue::Integer(0)));
    }

    #[test]
    fn no_entries_means_no_metadata() {
        let err = ErrorBuilder::new().message("m").build().unwrap();
        assert!(err.metadata().is_none());
        assert!(err.code().is_none());
    }

    #[test]
    fn inner_is_linked() {
        let cause = Error::new(ErrorCode::from_static("IO"), "disk");
        let err = ErrorBuilder::new()
            .code(ErrorCode::from_static("Internal"))
            .message("failed")
            .inner(cause.clone())
            .build()
            .unwrap();
        assert_eq!(err.inner(), Some(&cause));
        assert_eq!(err.chain_len(), 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "message already set")]
    fn double_message_panics_in_debug() {
        let _ = ErrorBuilder::new().message("a").message("b");
    }
}
