//! # Coded Errors
//!
//! Hierarchical error codes and immutable, chainable error values.
//!
//! ## Design Philosophy
//!
//! 1. **Codes are paths, not enums.** `Validation.Required.Email` is a child
//!    of `Validation.Required`, which is a child of `Validation`. Independent
//!    components can refine a category without coordinating on a shared type.
//! 2. **Matching is by ancestry.** A handler for `NotFound` catches every
//!    `NotFound.*` error, however deep, and nothing that merely shares a
//!    string prefix.
//! 3. **Errors are values.** An [`Error`] is never modified after
//!    construction. Adding metadata or context produces a new error, so errors
//!    can be cloned, compared and shared across threads without coordination.
//! 4. **Context is layered.** [`Error::wrap`] records a new outer error and
//!    keeps the original as its inner cause, preserving the full story from
//!    the top-level failure down to the root cause.
//!
//! ## Quick Start
//!
//! ```rust
//! use coded_errors::{definitions::{internal, not_found}, err, Error, ErrorCode};
//!
//! fn find_user(id: u32) -> std::result::Result<String, Error> {
//!     Err(err!(not_found::ENTITY, "User {} does not exist.", id).with("user_id", id))
//! }
//!
//! let failure = find_user(7)
//!     .map_err(|e| e.into_wrapped(internal::UNEXPECTED, "Profile page failed."))
//!     .unwrap_err();
//!
//! // The outer error is an internal failure...
//! assert!(failure.is(&internal::ROOT));
//! // ...caused by a not-found error somewhere down the chain.
//! assert!(failure.find(&not_found::ROOT).is_some());
//!
//! assert_eq!(
//!     failure.to_string(),
//!     "[Internal.Unexpected] Profile page failed. ---> [NotFound.Entity] User 7 does not exist."
//! );
//! ```
//!
//! ## Defining Codes
//!
//! ```rust
//! use coded_errors::{define_error_codes, Error};
//!
//! define_error_codes! {
//!     /// Payment failures.
//!     PAYMENT = "Payment" => {
//!         /// Card was declined by the issuer.
//!         DECLINED = "Declined",
//!         /// Account balance too low.
//!         INSUFFICIENT_FUNDS = "InsufficientFunds",
//!     }
//! }
//!
//! let e = Error::new(DECLINED, "Card declined.");
//! assert!(e.is(&PAYMENT));
//! ```
//!
//! ## Logging
//!
//! The crate performs no I/O. [`Error::log_entry`] returns a borrowed
//! [`ErrorLog`] that renders one bounded, structured line for whatever
//! logging backend the application uses.
//!
//! ## Features
//!
//! - `serde` (default): `Serialize`/`Deserialize` for codes, errors and metadata
//! - `trusted_debug`: untruncated log rendering (debug builds only)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod argument;
pub mod builder;
pub mod codes;
pub mod convenience;
pub mod definitions;
pub mod error;
pub mod http;
pub mod logging;
pub mod metadata;
pub mod result;
#[cfg(feature = "serde")]
pub mod serialization;

pub use argument::*;
pub use builder::*;
pub use codes::*;
pub use error::*;
pub use http::HttpStatusMapper;
pub use logging::*;
pub use metadata::*;
pub use result::{FutureResultExt, ResultExt};

/// Result of a fallible constructor in this crate.
pub type Result<T> = std::result::Result<T, ArgumentError>;
