//! Property-based tests for coded_errors
//!
//! These tests use proptest to generate random codes and errors and verify
//! the hierarchy and immutability invariants hold.

use coded_errors::{ArgumentError, Error, ErrorCode, InvalidReason, MetadataValue};
use proptest::prelude::*;

/// A single non-blank segment without the separator.
fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,15}"
}

/// A valid multi-segment code.
fn code() -> impl Strategy<Value = ErrorCode> {
    prop::collection::vec(segment(), 1..6)
        .prop_map(|segments| ErrorCode::new(segments.join(".")).unwrap())
}

// ============================================================================
// CONSTRUCTION PROPERTIES
// ============================================================================

proptest! {
    /// A single segment is a root: depth 1, itself as leaf, no parent
    #[test]
    fn single_segment_is_root(s in segment()) {
        let c = ErrorCode::new(s.clone()).unwrap();
        prop_assert_eq!(c.leaf(), s.as_str());
        prop_assert_eq!(c.depth(), 1);
        prop_assert!(c.parent().is_none());
    }

    /// Rebuilding from the textual value yields an equal code
    #[test]
    fn value_round_trip(c in code()) {
        prop_assert_eq!(ErrorCode::new(c.as_str()).unwrap(), c.clone());
        prop_assert_eq!(c.as_str().parse::<ErrorCode>().unwrap(), c);
    }

    /// Blank input never constructs a code
    #[test]
    fn blank_is_rejected(s in "[ \\t\\r\\n]{0,20}") {
        let err = ErrorCode::new(s).unwrap_err();
        prop_assert_eq!(err.reason(), Some(InvalidReason::Blank));
    }

    /// Arbitrary input never panics
    #[test]
    fn new_never_panics(s in "\\PC{0,200}") {
        let _ = ErrorCode::new(s);
    }
}

// ============================================================================
// COMPOSITION PROPERTIES
// ============================================================================

proptest! {
    /// Composing appends exactly one segment under the receiver
    #[test]
    fn compose_adds_one_level(parent in code(), child in segment()) {
        let composed = (&parent / child.as_str()).unwrap();
        prop_assert_eq!(composed.depth(), parent.depth() + 1);
        prop_assert_eq!(composed.parent(), Some(parent.clone()));
        prop_assert_eq!(composed.leaf(), child.as_str());
        prop_assert!(composed.is_child_of(&parent));
        prop_assert!(parent.is_ancestor_of(&composed));
    }

    /// Composing onto the sentinel yields a root
    #[test]
    fn compose_onto_sentinel(child in segment()) {
        let composed = ErrorCode::NONE.compose(&child).unwrap();
        prop_assert_eq!(composed, ErrorCode::new(child).unwrap());
    }

    /// A child containing the separator is always rejected
    #[test]
    fn compose_rejects_separator(parent in code(), a in segment(), b in segment()) {
        let err = parent.compose(&format!("{}.{}", a, b)).unwrap_err();
        prop_assert_eq!(err.reason(), Some(InvalidReason::ContainsSeparator));
    }

    /// An absent child is reported as missing, a blank one as invalid
    #[test]
    fn compose_rejects_absent_and_blank(parent in code(), blank in "[ \\t]{0,5}") {
        prop_assert!(parent.compose_optional(None).unwrap_err().is_missing());
        let err = parent.compose(&blank).unwrap_err();
        let invalid_child = matches!(err, ArgumentError::Invalid { param: "child", .. });
        prop_assert!(invalid_child);
        prop_assert_eq!(err.param(), "child");
        prop_assert!(!err.is_missing());
    }

    /// Walking parents from any code reaches a root in depth - 1 steps
    #[test]
    fn ancestors_match_depth(c in code()) {
        let ancestors: Vec<ErrorCode> = c.ancestors().collect();
        prop_assert_eq!(ancestors.len(), c.depth());
        prop_assert_eq!(ancestors.first(), Some(&c));
        prop_assert_eq!(ancestors.last().map(ErrorCode::depth), Some(1));
        for a in &ancestors {
            prop_assert!(c.is_child_of(a));
        }
    }
}

// ============================================================================
// MATCHING PROPERTIES
// ============================================================================

proptest! {
    /// Every real code is a child of itself
    #[test]
    fn is_child_of_reflexive(c in code()) {
        prop_assert!(c.is_child_of(&c));
    }

    /// The sentinel matches nothing and nothing matches it
    #[test]
    fn sentinel_never_matches(c in code()) {
        prop_assert!(!c.is_child_of(&ErrorCode::NONE));
        prop_assert!(!ErrorCode::NONE.is_child_of(&c));
        prop_assert!(!ErrorCode::NONE.is_child_of(&ErrorCode::NONE));
    }

    /// A shared string prefix without a segment boundary is not ancestry
    #[test]
    fn is_child_of_respects_boundary(c in code(), suffix in "[A-Za-z0-9]{1,8}") {
        let lookalike = ErrorCode::new(format!("{}{}", c.as_str(), suffix)).unwrap();
        prop_assert!(!lookalike.is_child_of(&c));
    }
}

// ============================================================================
// ERROR VALUE PROPERTIES
// ============================================================================

proptest! {
    /// Metadata never participates in equality
    #[test]
    fn equality_ignores_metadata(
        c in code(),
        message in "\\PC{0,100}",
        key in "[a-z]{1,10}",
        value in any::<i64>(),
    ) {
        let plain = Error::new(c, message);
        prop_assert_eq!(plain.with(key, value), plain);
    }

    /// Wrapping N times yields N + 1 links, each preserving its own code and message
    #[test]
    fn wrap_chain_depth(codes in prop::collection::vec(code(), 1..20)) {
        let mut err = Error::new(codes[0].clone(), "0");
        for (i, c) in codes.iter().enumerate().skip(1) {
            err = err.wrap(c.clone(), i.to_string());
        }

        prop_assert_eq!(err.chain_len(), codes.len());
        for (link, (i, c)) in err.chain().zip(codes.iter().enumerate().rev()) {
            prop_assert_eq!(link.code(), c);
            prop_assert_eq!(link.message(), i.to_string());
        }
        prop_assert_eq!(err.root_cause().code(), &codes[0]);
    }

    /// with never modifies the receiver
    #[test]
    fn with_is_non_destructive(
        c in code(),
        keys in prop::collection::vec("[a-z]{1,6}", 1..10),
    ) {
        let base = Error::new(c, "base").with("seed", true);
        let mut derived = base.clone();
        for (i, key) in keys.iter().enumerate() {
            derived = derived.with(key.clone(), i as i64);
        }
        prop_assert!(derived.metadata().is_some_and(|m| m.contains_key("seed")));

        prop_assert_eq!(base.metadata().map(|m| m.len()), Some(1));
        prop_assert_eq!(
            base.metadata().and_then(|m| m.get("seed")),
            Some(&MetadataValue::Bool(true))
        );
    }

    /// Log output stays valid UTF-8 and bounded however long the fields are
    #[test]
    fn log_line_is_bounded(message in "\\PC{0,5000}", value in "\\PC{0,5000}") {
        let err = Error::new(ErrorCode::from_static("IO"), message.clone())
            .with("detail", value)
            .wrap(ErrorCode::from_static("Internal"), message);

        let mut line = String::new();
        err.log_entry().write_to(&mut line).unwrap();

        prop_assert!(std::str::from_utf8(line.as_bytes()).is_ok());
        // Two links, at most three bounded fields each, plus labels.
        prop_assert!(line.len() < 7 * 1024);
    }
}

// ============================================================================
// CONCRETE SCENARIOS
// ============================================================================

#[test]
fn scenario_compose_validation_required() {
    let required = (ErrorCode::new("Validation").unwrap() / "Required").unwrap();
    assert_eq!(required.as_str(), "Validation.Required");
    assert_eq!(required.depth(), 2);
    assert_eq!(required.leaf(), "Required");
    assert_eq!(required.parent().unwrap().as_str(), "Validation");
}

#[test]
fn scenario_child_of() {
    let required = ErrorCode::new("Validation.Required").unwrap();
    assert!(required.is_child_of(&ErrorCode::new("Validation").unwrap()));
    assert!(!required.is_child_of(&ErrorCode::new("NotFound").unwrap()));
    assert!(
        !ErrorCode::new("ValidationError")
            .unwrap()
            .is_child_of(&ErrorCode::new("Validation").unwrap())
    );
}

#[test]
fn scenario_wrap_display() {
    let outer = Error::new(ErrorCode::new("IO.Network").unwrap(), "Connection failed.")
        .wrap(ErrorCode::new("Internal.Unexpected").unwrap(), "Operation failed.");
    assert_eq!(outer.code().as_str(), "Internal.Unexpected");
    assert_eq!(outer.inner().unwrap().code().as_str(), "IO.Network");
    assert_eq!(
        outer.to_string(),
        "[Internal.Unexpected] Operation failed. ---> [IO.Network] Connection failed."
    );
}

#[test]
fn scenario_with_metadata() {
    let original = Error::new(ErrorCode::new("Validation").unwrap(), "x");
    let enriched = original.with("field", "email").with("max", 100);

    let meta = enriched.metadata().unwrap();
    assert_eq!(meta.get("field").and_then(MetadataValue::as_str), Some("email"));
    assert_eq!(meta.get("max").and_then(MetadataValue::as_i64), Some(100));
    assert!(original.metadata().is_none());
}

#[test]
fn scenario_blank_and_absent() {
    assert_eq!(
        ErrorCode::new("").unwrap_err().reason(),
        Some(InvalidReason::Blank)
    );
    assert_eq!(
        ErrorCode::new("   ").unwrap_err().reason(),
        Some(InvalidReason::Blank)
    );
    assert!(ErrorCode::try_from(None::<&str>).unwrap_err().is_missing());
}

#[test]
fn scenario_compose_rejects_multi_segment() {
    let err = (ErrorCode::new("Validation").unwrap() / "Required.Email").unwrap_err();
    assert_eq!(err.reason(), Some(InvalidReason::ContainsSeparator));
}
