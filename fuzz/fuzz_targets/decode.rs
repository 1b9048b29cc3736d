#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary frames must be rejected cleanly, and anything accepted must
    // re-encode to a frame that decodes to the same bytes.
    if let Ok(decoded) = canonhuff::decode(data) {
        let blob = canonhuff::encode(&decoded).unwrap();
        assert_eq!(canonhuff::decode(&blob).unwrap(), decoded);
    }
});
