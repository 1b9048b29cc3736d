#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let blob = canonhuff::encode(data).unwrap();
    let decoded = canonhuff::decode(&blob).unwrap();
    assert_eq!(data, decoded.as_slice());
});
