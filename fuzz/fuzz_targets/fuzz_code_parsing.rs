#![no_main]

use coded_errors::{ErrorCode, InvalidReason};
use libfuzzer_sys::fuzz_target;

// Arbitrary text through construction, composition and the hierarchy walkers.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mid = text.len() / 2;
    let (head, tail) = if text.is_char_boundary(mid) {
        text.split_at(mid)
    } else {
        (text, "")
    };

    match ErrorCode::new(head) {
        Ok(code) => {
            assert_eq!(code.as_str(), head);
            assert!(code.is_child_of(&code));
            assert_eq!(code.segments().count(), code.depth());
            assert!(code.ancestors().count() <= code.depth());

            if let Some(parent) = code.parent() {
                assert!(code.is_child_of(&parent));
                assert!(parent.depth() < code.depth());
            }

            match code.compose(tail) {
                Ok(child) => {
                    assert_eq!(child.parent().as_ref(), Some(&code));
                    assert_eq!(child.depth(), code.depth() + 1);
                }
                Err(err) => assert!(matches!(
                    err.reason(),
                    Some(InvalidReason::Blank | InvalidReason::ContainsSeparator)
                )),
            }
        }
        Err(err) => assert_eq!(err.reason(), Some(InvalidReason::Blank)),
    }
});
