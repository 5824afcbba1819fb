//! Structured log view of an error chain.
//!
//! The crate links no logging backend. Instead, [`Error::log_entry`] hands
//! out an [`ErrorLog`] that borrows from the error and renders it as one
//! structured line, leaving transport and sinks to the caller:
//!
//! ```text
//! code='Internal' message='failed' attempt='2' cause[1] code='IO.Network' message='refused' host='db'
//! ```
//!
//! # Bounded Output
//!
//! Every field is capped at [`MAX_FIELD_OUTPUT_LEN`] bytes and cut on a UTF-8
//! boundary with a visible indicator, so a single oversized message or
//! metadata value cannot blow up a log line.
//!
//! [`Error::log_entry`]: crate::Error::log_entry

use crate::codes::ErrorCode;
use crate::error::Error;
use crate::metadata::Metadata;
use std::borrow::Cow;
use std::fmt;

/// Maximum length for any individual field in formatted output.
pub const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Marker closing a field that was cut short.
const TRUNCATION_MARKER: &str = "...[TRUNCATED]";

/// Borrowed structured view of an [`Error`] and its causes.
///
/// Lives no longer than the error it was taken from.
#[derive(Debug, Clone, Copy)]
pub struct ErrorLog<'a> {
    error: &'a Error,
}

impl<'a> ErrorLog<'a> {
    #[inline]
    pub(crate) const fn new(error: &'a Error) -> Self {
        Self { error }
    }

    /// Code of the logged error.
    #[inline]
    pub fn code(&self) -> &'a ErrorCode {
        self.error.code()
    }

    /// Message of the logged error, untruncated.
    #[inline]
    pub fn message(&self) -> &'a str {
        self.error.message()
    }

    /// Metadata of the logged error only; causes carry their own.
    #[inline]
    pub fn metadata(&self) -> Option<&'a Metadata> {
        self.error.metadata()
    }

    /// Inner causes, nearest first. Excludes the logged error itself.
    pub fn causes(&self) -> impl Iterator<Item = &'a Error> + use<'a> {
        self.error.chain().skip(1)
    }

    /// Number of links, including the logged error.
    #[inline]
    pub fn depth(&self) -> usize {
        self.error.chain_len()
    }

    /// Write the structured line without allocating for short fields.
    ///
    /// Fields longer than [`MAX_FIELD_OUTPUT_LEN`] are truncated.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        for (i, link) in self.error.chain().enumerate() {
            if i > 0 {
                write!(f, " cause[{}] ", i)?;
            }
            write_link(f, link, bound_field)?;
        }
        Ok(())
    }

    /// Format the full chain without truncation.
    ///
    /// WARNING: Only available with BOTH the `trusted_debug` feature AND debug
    /// assertions. Untruncated output is unbounded in size.
    #[cfg(all(feature = "trusted_debug", debug_assertions))]
    pub fn format_for_trusted_debug(&self) -> String {
        let mut output = String::new();
        for (i, link) in self.error.chain().enumerate() {
            if i > 0 {
                output.push_str(&format!(" cause[{}] ", i));
            }
            // Writing into a String cannot fail.
            let _ = write_link(&mut output, link, Cow::Borrowed);
        }
        output
    }
}

fn write_link(
    f: &mut impl fmt::Write,
    link: &Error,
    bound: impl Fn(&str) -> Cow<'_, str>,
) -> fmt::Result {
    write!(
        f,
        "code='{}' message='{}'",
        bound(link.code().as_str()),
        bound(link.message())
    )?;

    if let Some(metadata) = link.metadata() {
        for (key, value) in metadata.iter() {
            let rendered = value.to_string();
            write!(f, " {}='{}'", bound(key), bound(&rendered))?;
        }
    }

    Ok(())
}

/// Cap a field at [`MAX_FIELD_OUTPUT_LEN`] bytes, marker included.
///
/// The cut lands on the nearest char boundary at or below the budget.
fn bound_field(field: &str) -> Cow<'_, str> {
    if field.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(field);
    }

    let budget = MAX_FIELD_OUTPUT_LEN - TRUNCATION_MARKER.len();
    let cut = (0..=budget)
        .rev()
        .find(|&i| field.is_char_boundary(i))
        .unwrap_or(0);

    let mut bounded = String::with_capacity(cut + TRUNCATION_MARKER.len());
    bounded.push_str(&field[..cut]);
    bounded.push_str(TRUNCATION_MARKER);
    Cow::Owned(bounded)
}
