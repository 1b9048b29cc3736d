use canonhuff::{decode, encode, CanonicalCode, FrequencyTable};
use proptest::prelude::*;

fn code_for(data: &[u8]) -> CanonicalCode {
    CanonicalCode::from_frequencies(&FrequencyTable::from_bytes(data)).unwrap()
}

/// Code read as a left-aligned 256-bit integer, most significant word first.
fn left_aligned(code: &[u8]) -> [u64; 4] {
    let mut words = [0u64; 4];
    for (i, &bit) in code.iter().enumerate() {
        if bit == 1 {
            words[i / 64] |= 1 << (63 - i % 64);
        }
    }
    words
}

proptest! {
    #[test]
    fn prop_roundtrip(input in prop::collection::vec(any::<u8>(), 0..2048)) {
        let blob = encode(&input).unwrap();
        prop_assert_eq!(decode(&blob).unwrap(), input);
    }

    #[test]
    fn prop_roundtrip_small_alphabet(
        input in prop::collection::vec(0u8..4, 0..512),
    ) {
        let blob = encode(&input).unwrap();
        prop_assert_eq!(decode(&blob).unwrap(), input);
    }

    #[test]
    fn prop_deterministic(input in prop::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(encode(&input).unwrap(), encode(&input).unwrap());
    }

    #[test]
    fn prop_prefix_free(input in prop::collection::vec(any::<u8>(), 1..1024)) {
        let code = code_for(&input);
        let codes: Vec<&[u8]> = code.code_table().iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    prop_assert!(!b.starts_with(a));
                }
            }
        }
    }

    #[test]
    fn prop_canonical_order(input in prop::collection::vec(any::<u8>(), 1..1024)) {
        let code = code_for(&input);
        let entries: Vec<(u8, &[u8])> = code.code_table().iter().collect();
        for &(sa, ca) in &entries {
            for &(sb, cb) in &entries {
                if ca.len() < cb.len() {
                    prop_assert!(left_aligned(ca) < left_aligned(cb));
                }
                if ca.len() == cb.len() && sa < sb {
                    prop_assert!(ca < cb);
                }
            }
        }
    }

    #[test]
    fn prop_header_accounts_for_payload(
        input in prop::collection::vec(any::<u8>(), 0..1024),
    ) {
        let blob = encode(&input).unwrap();
        let (header, payload) = canonhuff::Header::parse(&blob).unwrap();
        let code = code_for(&input);
        prop_assert_eq!(header.symbols().len(), code.len());
        let bits = code.payload_bits(&FrequencyTable::from_bytes(&input));
        prop_assert_eq!(payload.len() as u64, bits.div_ceil(8));
        prop_assert_eq!(header.padding() as u64, (8 - bits % 8) % 8);
    }

    #[test]
    fn prop_decode_never_panics(blob in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&blob);
    }
}
