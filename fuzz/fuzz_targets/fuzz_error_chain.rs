#![no_main]

use arbitrary::Arbitrary;
use coded_errors::{CHAIN_SEPARATOR, Error, ErrorCode, MAX_FIELD_OUTPUT_LEN};
use libfuzzer_sys::fuzz_target;

/// One step applied to the error under construction.
#[derive(Debug, Arbitrary)]
enum ChainOp {
    /// Wrap the current error with a new outer link.
    Wrap { code: String, message: String },
    /// Attach a metadata entry to the outermost link.
    Meta { key: String, value: String },
    /// Attach an integer metadata entry.
    Count { key: String, value: i64 },
}

#[derive(Debug, Arbitrary)]
struct ChainCase {
    root_code: String,
    root_message: String,
    ops: Vec<ChainOp>,
}

fuzz_target!(|case: ChainCase| {
    let root_code = ErrorCode::new(case.root_code).unwrap_or_default();
    let mut err = Error::new(root_code.clone(), case.root_message);
    let mut links = 1usize;

    for op in case.ops.into_iter().take(256) {
        err = match op {
            ChainOp::Wrap { code, message } => {
                links += 1;
                err.into_wrapped(ErrorCode::new(code).unwrap_or_default(), message)
            }
            ChainOp::Meta { key, value } => err.with(key, value),
            ChainOp::Count { key, value } => err.with(key, value),
        };
    }

    assert_eq!(err.chain_len(), links);
    assert_eq!(err.root_cause().code(), &root_code);

    let display = err.to_string();
    assert!(display.matches(CHAIN_SEPARATOR).count() >= links - 1);

    let mut line = String::new();
    err.log_entry().write_to(&mut line).unwrap();
    assert!(std::str::from_utf8(line.as_bytes()).is_ok());

    // Every field is capped, so the line is bounded by the field count.
    let bound: usize = err
        .chain()
        .map(|link| {
            let fields = 2 + 2 * link.metadata().map_or(0, |m| m.len());
            fields * (MAX_FIELD_OUTPUT_LEN + 16) + 32
        })
        .sum();
    assert!(line.len() <= bound);
});
