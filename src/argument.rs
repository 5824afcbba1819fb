//! Argument failures raised by the crate's own operations.
//!
//! These are not to be confused with [`crate::Error`], the value type this
//! crate exists to provide. An `ArgumentError` means a caller handed a
//! constructor or transform something it cannot accept:
//!
//! - **Missing**: a required value was absent (`None`)
//! - **Invalid**: a value was present but failed content validation
//!
//! Both are returned immediately at the offending call. Nothing in this crate
//! retries, logs, or swallows them.

use std::fmt;

/// Why a present value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    /// Empty or whitespace-only string.
    Blank,
    /// A single segment contained the `.` separator.
    ContainsSeparator,
    /// The empty "no code" value was used where a real code is required.
    SentinelCode,
    /// HTTP status outside `100..=599`.
    StatusOutOfRange {
        /// The offending status.
        status: u16,
    },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => f.write_str("value is empty or whitespace"),
            Self::ContainsSeparator => {
                write!(f, "value contains the '{}' separator", crate::SEPARATOR)
            }
            Self::SentinelCode => f.write_str("value is the empty error code"),
            Self::StatusOutOfRange { status } => {
                write!(f, "status {} is outside 100-599", status)
            }
        }
    }
}

/// Failure raised by a constructor or transform in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// A required parameter was absent.
    Missing {
        /// Parameter name.
        param: &'static str,
    },
    /// A parameter was present but its content was rejected.
    Invalid {
        /// Parameter name.
        param: &'static str,
        /// What was wrong with it.
        reason: InvalidReason,
    },
}

impl ArgumentError {
    #[inline]
    pub(crate) const fn missing(param: &'static str) -> Self {
        Self::Missing { param }
    }

    #[inline]
    pub(crate) const fn invalid(param: &'static str, reason: InvalidReason) -> Self {
        Self::Invalid { param, reason }
    }

    /// Name of the parameter that was rejected.
    #[inline]
    pub const fn param(&self) -> &'static str {
        match self {
            Self::Missing { param } | Self::Invalid { param, .. } => *param,
        }
    }

    /// `true` for the absent-value kind.
    #[inline]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    /// The content-validation reason, if this is the invalid-value kind.
    #[inline]
    pub const fn reason(&self) -> Option<InvalidReason> {
        match self {
            Self::Missing { .. } => None,
            Self::Invalid { reason, .. } => Some(*reason),
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { param } => write!(f, "required argument '{}' is missing", param),
            Self::Invalid { param, reason } => {
                write!(f, "argument '{}' is invalid: {}", param, reason)
            }
        }
    }
}

impl std::error::Error for ArgumentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_display_names_parameter() {
        let err = ArgumentError::missing("message");
        assert_eq!(err.to_string(), "required argument 'message' is missing");
        assert!(err.is_missing());
        assert_eq!(err.reason(), None);
    }

    #[test]
    fn invalid_display_includes_reason() {
        let err = ArgumentError::invalid("child", InvalidReason::ContainsSeparator);
        assert_eq!(
            err.to_string(),
            "argument 'child' is invalid: value contains the '.' separator"
        );
        assert_eq!(err.param(), "child");
        assert_eq!(err.reason(), Some(InvalidReason::ContainsSeparator));
    }

    #[test]
    fn status_reason_reports_value() {
        let reason = InvalidReason::StatusOutOfRange { status: 42 };
        assert_eq!(reason.to_string(), "status 42 is outside 100-599");
    }
}
