#![no_main]

use coded_errors::Error;
use libfuzzer_sys::fuzz_target;

// Untrusted JSON must either be rejected or decode to an error that survives
// a second trip through the encoder unchanged.
fuzz_target!(|data: &[u8]| {
    let Ok(decoded) = serde_json::from_slice::<Error>(data) else {
        return;
    };

    let encoded = serde_json::to_vec(&decoded).unwrap();
    let again: Error = serde_json::from_slice(&encoded).unwrap();

    assert_eq!(again.to_string(), decoded.to_string());
    assert_eq!(again.chain_len(), decoded.chain_len());
    assert_eq!(again.is_default(), decoded.is_default());
});
