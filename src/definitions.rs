//! Well-known error codes.
//!
//! # Taxonomy
//!
//! Each category is a module with a `ROOT` code and a set of direct children.
//! Consumers match on `ROOT` to catch a whole category regardless of which
//! component or library produced the error:
//!
//! ```rust
//! use coded_errors::{definitions::not_found, Error};
//!
//! let err = Error::new(not_found::ENTITY, "Order 42 does not exist.");
//! assert!(err.is(&not_found::ROOT));
//! ```
//!
//! Components are free to extend any category with deeper codes, e.g.
//! `(&not_found::ENTITY / "Order")?`, and every such code still matches its
//! category root.
//!
//! # Governance
//!
//! Every code here is a depth-2 child of its root, and all values are unique.
//! Both properties are checked by the `tests` module at the bottom of this
//! file. The HTTP adapter's built-in table in `http.rs` maps the roots.

use crate::define_error_codes;

// -----------------------------------------------------------------------------
// Validation - caller supplied bad input
// -----------------------------------------------------------------------------
/// Input validation codes.
pub mod validation {
    use super::define_error_codes;

    define_error_codes! {
        /// Any input validation failure.
        ROOT = "Validation" => {
            /// A required value was missing.
            REQUIRED = "Required",
            /// A value did not match the expected format.
            INVALID_FORMAT = "InvalidFormat",
            /// A value was syntactically fine but not acceptable.
            INVALID_VALUE = "InvalidValue",
            /// A numeric value fell outside its permitted range.
            OUT_OF_RANGE = "OutOfRange",
            /// A value exceeded its maximum length.
            TOO_LONG = "TooLong",
            /// A value was shorter than its minimum length.
            TOO_SHORT = "TooShort",
        }
    }
}

// -----------------------------------------------------------------------------
// NotFound - the addressed thing does not exist
// -----------------------------------------------------------------------------
/// Missing-entity codes.
pub mod not_found {
    use super::define_error_codes;

    define_error_codes! {
        /// Any not-found failure.
        ROOT = "NotFound" => {
            /// A domain entity does not exist.
            ENTITY = "Entity",
            /// A file, blob or other resource does not exist.
            RESOURCE = "Resource",
            /// No handler exists for the requested route or operation.
            ROUTE = "Route",
        }
    }
}

// -----------------------------------------------------------------------------
// Conflict - the request clashes with current state
// -----------------------------------------------------------------------------
/// State conflict codes.
pub mod conflict {
    use super::define_error_codes;

    define_error_codes! {
        /// Any state conflict.
        ROOT = "Conflict" => {
            /// The thing being created already exists.
            ALREADY_EXISTS = "AlreadyExists",
            /// Optimistic concurrency check failed.
            CONCURRENCY = "Concurrency",
            /// The supplied version is stale.
            VERSION = "Version",
        }
    }
}

// -----------------------------------------------------------------------------
// Unauthorized - caller identity could not be established
// -----------------------------------------------------------------------------
/// Authentication codes.
pub mod unauthorized {
    use super::define_error_codes;

    define_error_codes! {
        /// Any authentication failure.
        ROOT = "Unauthorized" => {
            /// No credentials supplied.
            MISSING_CREDENTIALS = "MissingCredentials",
            /// Credentials were malformed or wrong.
            INVALID_CREDENTIALS = "InvalidCredentials",
            /// Token was valid once but has expired.
            EXPIRED_TOKEN = "ExpiredToken",
        }
    }
}

// -----------------------------------------------------------------------------
// Forbidden - identity known, permission denied
// -----------------------------------------------------------------------------
/// Authorization codes.
pub mod forbidden {
    use super::define_error_codes;

    define_error_codes! {
        /// Any authorization failure.
        ROOT = "Forbidden" => {
            /// Caller lacks a required permission.
            INSUFFICIENT_PERMISSIONS = "InsufficientPermissions",
            /// A policy rule rejected the request.
            POLICY = "Policy",
        }
    }
}

// -----------------------------------------------------------------------------
// Timeout - an operation did not finish in time
// -----------------------------------------------------------------------------
/// Deadline codes.
pub mod timeout {
    use super::define_error_codes;

    define_error_codes! {
        /// Any timeout.
        ROOT = "Timeout" => {
            /// A local operation exceeded its deadline.
            OPERATION = "Operation",
            /// A downstream dependency did not answer in time.
            UPSTREAM = "Upstream",
        }
    }
}

// -----------------------------------------------------------------------------
// RateLimit - caller is sending too much
// -----------------------------------------------------------------------------
/// Throttling codes.
pub mod rate_limit {
    use super::define_error_codes;

    define_error_codes! {
        /// Any throttling failure.
        ROOT = "RateLimit" => {
            /// Request rate exceeded.
            EXCEEDED = "Exceeded",
            /// Quota for the period is used up.
            QUOTA = "Quota",
        }
    }
}

// -----------------------------------------------------------------------------
// Unavailable - temporarily unable to serve
// -----------------------------------------------------------------------------
/// Availability codes.
pub mod unavailable {
    use super::define_error_codes;

    define_error_codes! {
        /// Any availability failure.
        ROOT = "Unavailable" => {
            /// Planned maintenance.
            MAINTENANCE = "Maintenance",
            /// A dependency is down.
            UPSTREAM = "Upstream",
            /// Local capacity exhausted.
            OVERLOADED = "Overloaded",
        }
    }
}

// -----------------------------------------------------------------------------
// Unsupported - request shape not handled
// -----------------------------------------------------------------------------
/// Unsupported-request codes.
pub mod unsupported {
    use super::define_error_codes;

    define_error_codes! {
        /// Anything this system does not support.
        ROOT = "Unsupported" => {
            /// Content type not accepted.
            MEDIA_TYPE = "MediaType",
            /// Operation not implemented for this target.
            OPERATION = "Operation",
        }
    }
}

// -----------------------------------------------------------------------------
// IO - filesystem, network and encoding
// -----------------------------------------------------------------------------
/// I/O codes.
pub mod io {
    use super::define_error_codes;

    define_error_codes! {
        /// Any I/O failure.
        ROOT = "IO" => {
            /// Network connect/read/write failure.
            NETWORK = "Network",
            /// Filesystem failure.
            FILE_SYSTEM = "FileSystem",
            /// Encoding or decoding failure.
            SERIALIZATION = "Serialization",
        }
    }
}

// -----------------------------------------------------------------------------
// Internal - bugs and unexpected states
// -----------------------------------------------------------------------------
/// Internal failure codes.
pub mod internal {
    use super::define_error_codes;

    define_error_codes! {
        /// Any internal failure.
        ROOT = "Internal" => {
            /// Unclassified failure.
            UNEXPECTED = "Unexpected",
            /// An internal invariant was violated.
            INVARIANT = "Invariant",
            /// Code path not implemented yet.
            NOT_IMPLEMENTED = "NotImplemented",
        }
    }
}

/// Every category root in this catalog.
pub const ROOTS: &[crate::ErrorCode] = &[
    validation::ROOT,
    not_found::ROOT,
    conflict::ROOT,
    unauthorized::ROOT,
    forbidden::ROOT,
    timeout::ROOT,
    rate_limit::ROOT,
    unavailable::ROOT,
    unsupported::ROOT,
    io::ROOT,
    internal::ROOT,
];

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use std::collections::HashSet;

    fn children() -> Vec<(ErrorCode, ErrorCode)> {
        vec![
            (validation::ROOT, validation::REQUIRED),
            (validation::ROOT, validation::INVALID_FORMAT),
            (validation::ROOT, validation::INVALID_VALUE),
            (validation::ROOT, validation::OUT_OF_RANGE),
            (validation::ROOT, validation::TOO_LONG),
            (validation::ROOT, validation::TOO_SHORT),
            (not_found::ROOT, not_found::ENTITY),
            (not_found::ROOT, not_found::RESOURCE),
            (not_found::ROOT, not_found::ROUTE),
            (conflict::ROOT, conflict::ALREADY_EXISTS),
            (conflict::ROOT, conflict::CONCURRENCY),
            (conflict::ROOT, conflict::VERSION),
            (unauthorized::ROOT, unauthorized::MISSING_CREDENTIALS),
            (unauthorized::ROOT, unauthorized::INVALID_CREDENTIALS),
            (unauthorized::ROOT, unauthorized::EXPIRED_TOKEN),
            (forbidden::ROOT, forbidden::INSUFFICIENT_PERMISSIONS),
            (forbidden::ROOT, forbidden::POLICY),
            (timeout::ROOT, timeout::OPERATION),
            (timeout::ROOT, timeout::UPSTREAM),
            (rate_limit::ROOT, rate_limit::EXCEEDED),
            (rate_limit::ROOT, rate_limit::QUOTA),
            (unavailable::ROOT, unavailable::MAINTENANCE),
            (unavailable::ROOT, unavailable::UPSTREAM),
            (unavailable::ROOT, unavailable::OVERLOADED),
            (unsupported::ROOT, unsupported::MEDIA_TYPE),
            (unsupported::ROOT, unsupported::OPERATION),
            (io::ROOT, io::NETWORK),
            (io::ROOT, io::FILE_SYSTEM),
            (io::ROOT, io::SERIALIZATION),
            (internal::ROOT, internal::UNEXPECTED),
            (internal::ROOT, internal::INVARIANT),
            (internal::ROOT, internal::NOT_IMPLEMENTED),
        ]
    }

    #[test]
    fn roots_are_single_segment() {
        for root in ROOTS {
            assert_eq!(root.depth(), 1, "{}", root);
        }
    }

    #[test]
    fn children_sit_directly_under_their_root() {
        for (root, child) in children() {
            assert_eq!(child.depth(), 2, "{}", child);
            assert_eq!(child.parent().as_ref(), Some(&root), "{}", child);
            assert!(child.is_child_of(&root));
        }
    }

    #[test]
    fn no_cross_category_matches() {
        for (root, child) in children() {
            for other in ROOTS.iter().filter(|r| **r != root) {
                assert!(!child.is_child_of(other), "{} under {}", child, other);
            }
        }
    }

    #[test]
    fn values_are_unique() {
        let mut seen = HashSet::new();
        for code in ROOTS.iter().cloned().chain(children().into_iter().map(|(_, c)| c)) {
            assert!(seen.insert(code.clone()), "duplicate {}", code);
        }
    }
}
