//! Immutable error values with chained causes.
//!
//! An [`Error`] pairs an [`ErrorCode`] with a human message, optional
//! [`Metadata`], and an optional inner cause. Every transform returns a new
//! value; nothing is ever modified in place, so errors can be shared, cloned
//! and compared freely across threads.
//!
//! # Identity
//!
//! Equality and hashing use **only** the code and the message. Metadata and
//! the inner chain are supplemental context: two errors that differ only
//! there are equal. Callers who need a stricter comparison must write it
//! themselves.
//!
//! # Chains
//!
//! [`Error::wrap`] builds a new outer error owning the receiver as its inner
//! cause. Each link owns exactly one boxed successor, so a chain is always a
//! finite list from the most recent context down to the root cause:
//!
//! ```rust
//! use coded_errors::{Error, ErrorCode};
//!
//! let network = Error::new(ErrorCode::new("IO.Network")?, "Connection failed.");
//! let outer = network.wrap(ErrorCode::new("Internal.Unexpected")?, "Operation failed.");
//!
//! assert_eq!(
//!     outer.to_string(),
//!     "[Internal.Unexpected] Operation failed. ---> [IO.Network] Connection failed."
//! );
//! assert_eq!(outer.root_cause().code().as_str(), "IO.Network");
//! # Ok::<(), coded_errors::ArgumentError>(())
//! ```

use crate::argument::ArgumentError;
use crate::builder::ErrorBuilder;
use crate::codes::ErrorCode;
use crate::logging::ErrorLog;
use crate::metadata::{Metadata, MetadataValue};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Separator between links in the rendered chain.
pub const CHAIN_SEPARATOR: &str = " ---> ";

/// Immutable error record: code, message, optional metadata, optional cause.
///
/// The default value has [`ErrorCode::NONE`], an empty message, no metadata
/// and no inner error.
#[derive(Default)]
pub struct Error {
    code: ErrorCode,
    message: Cow<'static, str>,
    metadata: Option<Metadata>,
    inner: Option<Box<Error>>,
}

impl Error {
    /// Create an error with no metadata and no inner cause.
    #[inline]
    pub fn new(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
            metadata: None,
            inner: None,
        }
    }

    /// Create an error from every component.
    ///
    /// `metadata: None` is distinct from an empty map; the former reports
    /// [`Error::metadata`] as `None`.
    pub fn from_parts(
        code: ErrorCode,
        message: impl Into<Cow<'static, str>>,
        metadata: Option<Metadata>,
        inner: Option<Error>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            metadata,
            inner: inner.map(Box::new),
        }
    }

    /// Start a fluent builder. See [`ErrorBuilder`].
    #[inline]
    pub fn builder() -> ErrorBuilder {
        ErrorBuilder::new()
    }

    /// The error code.
    #[inline]
    pub fn code(&self) -> &ErrorCode {
        &self.code
    }

    /// The human-readable message; empty for the default error.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attached metadata, if any was ever attached.
    #[inline]
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// The wrapped cause, if any.
    #[inline]
    pub fn inner(&self) -> Option<&Error> {
        self.inner.as_deref()
    }

    /// `true` for a wholly default error: no code, empty message, no
    /// metadata, no inner.
    pub fn is_default(&self) -> bool {
        self.code.is_none()
            && self.message.is_empty()
            && self.metadata.is_none()
            && self.inner.is_none()
    }

    /// `true` if this error's code equals `ancestor` or lies beneath it.
    ///
    /// Only this link's code is tested; see [`Error::find`] for the chain.
    #[inline]
    pub fn is(&self, ancestor: &ErrorCode) -> bool {
        self.code.is_child_of(ancestor)
    }

    /// First link in the chain, outermost first, whose code matches `ancestor`.
    pub fn find(&self, ancestor: &ErrorCode) -> Option<&Error> {
        self.chain().find(|link| link.is(ancestor))
    }

    /// New outer error with `self` (copied) as its inner cause.
    ///
    /// The outer error carries no metadata.
    #[must_use]
    pub fn wrap(&self, code: ErrorCode, message: impl Into<Cow<'static, str>>) -> Error {
        self.clone().into_wrapped(code, message)
    }

    /// Ownership-taking form of [`Error::wrap`]; avoids copying the chain.
    #[must_use]
    pub fn into_wrapped(self, code: ErrorCode, message: impl Into<Cow<'static, str>>) -> Error {
        Error {
            code,
            message: message.into(),
            metadata: None,
            inner: Some(Box::new(self)),
        }
    }

    /// New error with `key` set to `value` in a fresh copy of the metadata.
    ///
    /// Code, message and inner are carried over. The receiver and its
    /// metadata are untouched. Overwriting an existing key keeps its position.
    #[must_use]
    pub fn with(
        &self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<MetadataValue>,
    ) -> Error {
        let metadata = match &self.metadata {
            Some(existing) => existing.with(key, value),
            None => Metadata::new().with(key, value),
        };
        Error {
            code: self.code.clone(),
            message: self.message.clone(),
            metadata: Some(metadata),
            inner: self.inner.clone(),
        }
    }

    /// [`Error::with`] for a key that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when `key` is `None`.
    pub fn try_with(
        &self,
        key: Option<&str>,
        value: impl Into<MetadataValue>,
    ) -> Result<Error, ArgumentError> {
        let key = key.ok_or(ArgumentError::missing("key"))?;
        Ok(self.with(key.to_owned(), value))
    }

    /// Iterate the chain from this error down to the root cause.
    #[inline]
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Number of links in the chain, including `self`.
    #[inline]
    pub fn chain_len(&self) -> usize {
        self.chain().count()
    }

    /// The innermost link; `self` when there is no inner cause.
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Some(inner) = current.inner() {
            current = inner;
        }
        current
    }

    /// Render the whole chain on one line:
    /// `[code] message ---> [inner code] inner message ...`.
    #[inline]
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// Structured log view that borrows from this error.
    ///
    /// The view cannot outlive the error; consume it immediately.
    ///
    /// ```rust
    /// # use coded_errors::{Error, ErrorCode};
    /// let err = Error::new(ErrorCode::from_static("Validation"), "bad").with("field", "email");
    /// let mut line = String::new();
    /// err.log_entry().write_to(&mut line).unwrap();
    /// assert_eq!(line, "code='Validation' message='bad' field='email'");
    /// ```
    #[inline]
    pub fn log_entry(&self) -> ErrorLog<'_> {
        ErrorLog::new(self)
    }

    /// Callback form of [`Error::log_entry`].
    #[inline]
    pub fn with_log<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ErrorLog<'_>) -> R,
    {
        let log = self.log_entry();
        f(&log)
    }
}

// Copies the chain from the root outward so very deep chains cannot overflow
// the stack.
impl Clone for Error {
    fn clone(&self) -> Self {
        let causes: Vec<&Error> = self.chain().skip(1).collect();

        let mut inner: Option<Box<Error>> = None;
        for link in causes.into_iter().rev() {
            inner = Some(Box::new(Error {
                code: link.code.clone(),
                message: link.message.clone(),
                metadata: link.metadata.clone(),
                inner,
            }));
        }

        Error {
            code: self.code.clone(),
            message: self.message.clone(),
            metadata: self.metadata.clone(),
            inner,
        }
    }
}

// Lists the links flat, outermost first.
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.chain().map(LinkDebug)).finish()
    }
}

struct LinkDebug<'a>(&'a Error);

impl fmt::Debug for LinkDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("code", &self.0.code)
            .field("message", &self.0.message)
            .field("metadata", &self.0.metadata)
            .finish()
    }
}

// Unlinks the chain iteratively so very deep chains cannot overflow the stack.
impl Drop for Error {
    fn drop(&mut self) {
        let mut next = self.inner.take();
        while let Some(mut link) = next {
            next = link.inner.take();
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.message == other.message
    }
}

impl Eq for Error {}

impl Hash for Error {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
        self.message.hash(state);
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.chain().enumerate() {
            if i > 0 {
                f.write_str(CHAIN_SEPARATOR)?;
            }
            write!(f, "[{}] {}", link.code, link.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Iterator returned by [`Error::chain`].
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.inner();
        Some(current)
    }
}

// ============================================================================
// Tests
// ============================================================================
