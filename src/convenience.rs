//! Convenience macros for declaring codes and building errors.
//!
//! # Declaring Codes
//!
//! Catalog codes are `const` items, checked at compile time. A root and its
//! children are declared together so the children's values are derived from
//! the root's text and cannot drift:
//!
//! ```rust
//! use coded_errors::define_error_codes;
//!
//! define_error_codes! {
//!     BILLING = "Billing" => {
//!         CARD_DECLINED = "CardDeclined",
//!         INSUFFICIENT_FUNDS = "InsufficientFunds",
//!     }
//! }
//!
//! assert_eq!(CARD_DECLINED.as_str(), "Billing.CardDeclined");
//! assert!(INSUFFICIENT_FUNDS.is_child_of(&BILLING));
//! ```
//!
//! A leaf containing the `.` separator, or a blank leaf, fails the build:
//!
//! ```rust,compile_fail
//! use coded_errors::define_error_codes;
//!
//! define_error_codes! {
//!     BILLING = "Billing" => {
//!         BAD = "Card.Declined",
//!     }
//! }
//! ```
//!
//! # Building Errors
//!
//! ```rust
//! use coded_errors::{definitions::validation, err, metadata};
//!
//! let field = "email";
//! let e = err!(validation::REQUIRED, "Field '{}' is required.", field)
//!     .with("field", field);
//! assert_eq!(e.message(), "Field 'email' is required.");
//!
//! let meta = metadata! { "min" => 1, "max" => 10 };
//! assert_eq!(meta.len(), 2);
//! ```

/// Const [`ErrorCode`](crate::ErrorCode) from a string literal.
///
/// ```rust
/// use coded_errors::{error_code, ErrorCode};
///
/// const RETRY_EXHAUSTED: ErrorCode = error_code!("Internal.RetryExhausted");
/// assert_eq!(RETRY_EXHAUSTED.leaf(), "RetryExhausted");
/// ```
#[macro_export]
macro_rules! error_code {
    ($value:literal) => {
        $crate::ErrorCode::from_static($value)
    };
}

/// Declare a single public error code constant.
///
/// ```rust
/// use coded_errors::define_error_code;
///
/// define_error_code!(
///     /// Tenant quota exhausted.
///     QUOTA_EXHAUSTED = "Quota.Exhausted"
/// );
/// assert_eq!(QUOTA_EXHAUSTED.depth(), 2);
/// ```
#[macro_export]
macro_rules! define_error_code {
    ($(#[$meta:meta])* $name:ident = $value:literal) => {
        $(#[$meta])*
        pub const $name: $crate::ErrorCode = $crate::ErrorCode::from_static($value);
    };
}

/// Declare a root code and its direct children.
///
/// Every leaf is validated at compile time: non-blank, no `.` separator.
#[macro_export]
macro_rules! define_error_codes {
    (
        $(#[$root_meta:meta])* $root:ident = $root_value:literal => {
            $( $(#[$meta:meta])* $name:ident = $leaf:literal ),+ $(,)?
        }
    ) => {
        $crate::define_error_code!($(#[$root_meta])* $root = $root_value);
        $(
            const _: () = assert!(
                $crate::codes::__is_valid_segment($leaf),
                concat!("invalid error code segment: ", $leaf)
            );
            $(#[$meta])*
            pub const $name: $crate::ErrorCode =
                $crate::ErrorCode::from_static(concat!($root_value, ".", $leaf));
        )+
    };
}

/// Build an [`Error`](crate::Error) with a literal or formatted message.
///
/// A bare literal is stored verbatim, without allocating and without
/// format-string interpolation.
#[macro_export]
macro_rules! err {
    ($code:expr, $message:literal $(,)?) => {
        $crate::Error::new($code, $message)
    };
    ($code:expr, $fmt:literal, $($arg:tt)+) => {
        $crate::Error::new($code, ::std::format!($fmt, $($arg)+))
    };
}

/// Build a [`Metadata`](crate::Metadata) map in insertion order.
#[macro_export]
macro_rules! metadata {
    () => {
        $crate::Metadata::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Metadata::new();
        $(
            map.insert($key, $value);
        )+
        map
    }};
}

// ============================================================================
// Tests
// ============================================================================
