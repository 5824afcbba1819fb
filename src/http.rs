//! HTTP status mapping for error codes.
//!
//! Maps an [`ErrorCode`] to an HTTP status by walking from the exact code up
//! through its parents until a mapping is found:
//!
//! ```text
//! Validation.Required.Email  -> custom?  built-in?
//! Validation.Required        -> custom?  built-in?
//! Validation                 -> custom?  built-in?  => 400
//! (exhausted)                -> default status (500)
//! ```
//!
//! At every level a custom registration wins over the built-in table, so an
//! application can refine or override any category without touching this
//! crate.
//!
//! # Concurrency
//!
//! Custom mappings sit behind an `RwLock`: lookups from request handlers run
//! concurrently, while registrations (typically at start-up, possibly from
//! several threads) take the write lock. A poisoned lock is recovered rather
//! than propagated, since the map holds plain data that cannot be left
//! half-updated.
//!
//! # Process-Wide Registry
//!
//! [`HttpStatusMapper`] instances are independent. For applications that want
//! one shared table, the free functions ([`init_global`], [`register_status`],
//! [`clear_custom_statuses`], [`status_for`], [`status_for_error`]) operate on
//! a lazily created global mapper.
//!
//! ```rust
//! use coded_errors::http::HttpStatusMapper;
//! use coded_errors::{definitions::validation, ErrorCode};
//!
//! let mapper = HttpStatusMapper::new();
//! assert_eq!(mapper.status_for(&validation::REQUIRED), 400);
//!
//! mapper.register(validation::REQUIRED, 422)?;
//! assert_eq!(mapper.status_for(&validation::REQUIRED), 422);
//! assert_eq!(mapper.status_for(&validation::TOO_LONG), 400);
//!
//! let unknown = ErrorCode::new("Billing.CardDeclined")?;
//! assert_eq!(mapper.status_for(&unknown), 500);
//! # Ok::<(), coded_errors::ArgumentError>(())
//! ```

use crate::argument::{ArgumentError, InvalidReason};
use crate::codes::ErrorCode;
use crate::definitions::{
    conflict, forbidden, internal, io, not_found, rate_limit, timeout, unauthorized,
    unavailable, unsupported, validation,
};
use crate::error::Error;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Status used when no level of a code's hierarchy is mapped.
pub const DEFAULT_STATUS: u16 = 500;

/// Built-in mappings, consulted after custom ones at each level.
const BUILTIN_STATUSES: &[(ErrorCode, u16)] = &[
    (validation::ROOT, 400),
    (unauthorized::ROOT, 401),
    (forbidden::ROOT, 403),
    (not_found::ROOT, 404),
    (timeout::ROOT, 408),
    (conflict::ROOT, 409),
    (unsupported::ROOT, 415),
    (rate_limit::ROOT, 429),
    (internal::ROOT, 500),
    (internal::NOT_IMPLEMENTED, 501),
    (unavailable::UPSTREAM, 502),
    (unavailable::ROOT, 503),
    (timeout::UPSTREAM, 504),
    (io::ROOT, 500),
];

fn builtin_status(code: &ErrorCode) -> Option<u16> {
    BUILTIN_STATUSES
        .iter()
        .find(|(mapped, _)| mapped == code)
        .map(|(_, status)| *status)
}

fn validate_status(status: u16) -> Result<u16, ArgumentError> {
    if (100..=599).contains(&status) {
        Ok(status)
    } else {
        Err(ArgumentError::invalid(
            "status",
            InvalidReason::StatusOutOfRange { status },
        ))
    }
}

// ============================================================================
// Mapper
// ============================================================================

/// Thread-safe error-code to HTTP-status mapper.
#[derive(Debug)]
pub struct HttpStatusMapper {
    custom: RwLock<HashMap<ErrorCode, u16>>,
    default_status: AtomicU16,
}

impl HttpStatusMapper {
    /// Mapper with no custom entries and [`DEFAULT_STATUS`] as fallback.
    pub fn new() -> Self {
        Self {
            custom: RwLock::new(HashMap::new()),
            default_status: AtomicU16::new(DEFAULT_STATUS),
        }
    }

    /// Mapper with a different fallback status.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidReason::StatusOutOfRange`] outside `100..=599`.
    pub fn with_default_status(status: u16) -> Result<Self, ArgumentError> {
        let mapper = Self::new();
        mapper.set_default_status(status)?;
        Ok(mapper)
    }

    #[inline]
    fn read_custom(&self) -> RwLockReadGuard<'_, HashMap<ErrorCode, u16>> {
        match self.custom.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[inline]
    fn write_custom(&self) -> RwLockWriteGuard<'_, HashMap<ErrorCode, u16>> {
        match self.custom.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Current fallback status.
    #[inline]
    pub fn default_status(&self) -> u16 {
        self.default_status.load(Ordering::Relaxed)
    }

    /// Change the fallback status.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidReason::StatusOutOfRange`] outside `100..=599`.
    pub fn set_default_status(&self, status: u16) -> Result<(), ArgumentError> {
        let status = validate_status(status)?;
        self.default_status.store(status, Ordering::Relaxed);
        Ok(())
    }

    /// Register a custom mapping, returning the one it replaced.
    ///
    /// # Errors
    ///
    /// - [`InvalidReason::SentinelCode`] for [`ErrorCode::NONE`]
    /// - [`InvalidReason::StatusOutOfRange`] outside `100..=599`
    pub fn register(&self, code: ErrorCode, status: u16) -> Result<Option<u16>, ArgumentError> {
        if code.is_none() {
            return Err(ArgumentError::invalid("code", InvalidReason::SentinelCode));
        }
        let status = validate_status(status)?;
        Ok(self.write_custom().insert(code, status))
    }

    /// Remove a custom mapping.
    pub fn unregister(&self, code: &ErrorCode) -> Option<u16> {
        self.write_custom().remove(code)
    }

    /// Remove every custom mapping. Built-in mappings are unaffected.
    pub fn clear(&self) {
        self.write_custom().clear();
    }

    /// Number of custom mappings.
    pub fn custom_len(&self) -> usize {
        self.read_custom().len()
    }

    /// Resolve the status for `code`.
    ///
    /// [`ErrorCode::NONE`] has no levels to walk and gets the fallback.
    pub fn status_for(&self, code: &ErrorCode) -> u16 {
        let custom = self.read_custom();
        for level in code.ancestors() {
            if let Some(status) = custom.get(&level) {
                return *status;
            }
            if let Some(status) = builtin_status(&level) {
                return status;
            }
        }
        self.default_status()
    }

    /// Resolve the status for an error's outermost code.
    #[inline]
    pub fn status_for_error(&self, error: &Error) -> u16 {
        self.status_for(error.code())
    }
}

impl Default for HttpStatusMapper {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Process-Wide Registry
// ============================================================================

static GLOBAL: OnceLock<HttpStatusMapper> = OnceLock::new();

/// The process-wide mapper, created on first use.
pub fn global() -> &'static HttpStatusMapper {
    GLOBAL.get_or_init(HttpStatusMapper::new)
}

/// Reset the process-wide mapper: set its fallback and drop all custom entries.
///
/// Call once at start-up before registering application mappings.
///
/// # Errors
///
/// Returns [`InvalidReason::StatusOutOfRange`] outside `100..=599`; the
/// registry is left untouched in that case.
pub fn init_global(default_status: u16) -> Result<(), ArgumentError> {
    let mapper = global();
    mapper.set_default_status(default_status)?;
    mapper.clear();
    Ok(())
}

/// Register a custom mapping in the process-wide mapper.
///
/// # Errors
///
/// As [`HttpStatusMapper::register`].
pub fn register_status(code: ErrorCode, status: u16) -> Result<Option<u16>, ArgumentError> {
    global().register(code, status)
}

/// Drop every custom mapping from the process-wide mapper.
pub fn clear_custom_statuses() {
    global().clear();
}

/// Resolve a status with the process-wide mapper.
pub fn status_for(code: &ErrorCode) -> u16 {
    global().status_for(code)
}

/// Resolve an error's status with the process-wide mapper.
pub fn status_for_error(error: &Error) -> u16 {
    global().status_for_error(error)
}

// ============================================================================
// Tests
// ============================================================================
