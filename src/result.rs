//! Extension traits for `Result<T, Error>` and futures resolving to one.
//!
//! These mirror [`Error::is`] and [`Error::wrap`] at the `Result` level so
//! call sites can stay in `?`-style pipelines:
//!
//! ```rust
//! use coded_errors::result::ResultExt;
//! use coded_errors::{definitions::{internal, not_found}, Error};
//!
//! fn load(id: u32) -> Result<String, Error> {
//!     Err(Error::new(not_found::ENTITY, "no such order").with("id", id))
//! }
//!
//! let res = load(7).wrap_err(internal::UNEXPECTED, "checkout failed");
//! assert!(res.is_err_of(&internal::ROOT));
//! assert!(res.as_ref().unwrap_err().find(&not_found::ROOT).is_some());
//! ```
//!
//! The async variants in [`FutureResultExt`] are lazy: the returned future
//! does nothing until awaited, and then applies the same logic to whatever
//! the wrapped computation produced.

use crate::codes::ErrorCode;
use crate::error::Error;
use crate::metadata::MetadataValue;
use std::borrow::Cow;
use std::future::Future;

/// Error-code helpers on `Result<T, Error>`.
pub trait ResultExt<T>: Sized {
    /// `true` if this is an `Err` whose code equals or lies beneath `code`.
    ///
    /// `Ok` never matches.
    fn is_err_of(&self, code: &ErrorCode) -> bool;

    /// Wrap an `Err` in a new outer error. `Ok` passes through unchanged.
    fn wrap_err(self, code: ErrorCode, message: impl Into<Cow<'static, str>>)
    -> Result<T, Error>;

    /// Like [`ResultExt::wrap_err`], computing code and message only on `Err`.
    fn wrap_err_with<F, M>(self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> (ErrorCode, M),
        M: Into<Cow<'static, str>>;

    /// Attach one metadata entry to an `Err`. `Ok` passes through unchanged.
    fn with_err_meta(
        self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<MetadataValue>,
    ) -> Result<T, Error>;
}

impl<T> ResultExt<T> for Result<T, Error> {
    #[inline]
    fn is_err_of(&self, code: &ErrorCode) -> bool {
        matches!(self, Err(err) if err.is(code))
    }

    fn wrap_err(
        self,
        code: ErrorCode,
        message: impl Into<Cow<'static, str>>,
    ) -> Result<T, Error> {
        self.map_err(|err| err.into_wrapped(code, message))
    }

    fn wrap_err_with<F, M>(self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> (ErrorCode, M),
        M: Into<Cow<'static, str>>,
    {
        self.map_err(|err| {
            let (code, message) = f();
            err.into_wrapped(code, message)
        })
    }

    fn with_err_meta(
        self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<MetadataValue>,
    ) -> Result<T, Error> {
        self.map_err(|err| err.with(key, value))
    }
}

/// Deferred error-code helpers on futures resolving to `Result<T, Error>`.
///
/// Runtime-agnostic: nothing here spawns or sleeps.
pub trait FutureResultExt<T>: Future<Output = Result<T, Error>> + Sized {
    /// Resolves to `true` if the wrapped future fails with a matching code.
    fn is_err_of(self, code: ErrorCode) -> impl Future<Output = bool>;

    /// Resolves to the wrapped result with any `Err` wrapped in a new outer error.
    fn wrap_err(
        self,
        code: ErrorCode,
        message: impl Into<Cow<'static, str>>,
    ) -> impl Future<Output = Result<T, Error>>;
}

impl<T, F> FutureResultExt<T> for F
where
    F: Future<Output = Result<T, Error>>,
{
    fn is_err_of(self, code: ErrorCode) -> impl Future<Output = bool> {
        async move { self.await.is_err_of(&code) }
    }

    fn wrap_err(
        self,
        code: ErrorCode,
        message: impl Into<Cow<'static, str>>,
    ) -> impl Future<Output = Result<T, Error>> {
        async move { ResultExt::wrap_err(self.await, code, message) }
    }
}

// ============================================================================
// Tests
// ============================================================================
