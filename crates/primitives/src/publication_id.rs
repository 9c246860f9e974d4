//! Canonical identifiers for DA publications.
//!
//! A DA publication id has the shape `<profileId>-<pubId>-DA-<short>`, where both
//! numbers are rendered as `0x` lowercase hex padded to an even number of digits
//! and `<short>` is the first `-` separated segment of the data availability id.
//! The format is shared with other verifiers, so it must stay bit-exact.

use alloy_primitives::U256;

/// Separator between the on-chain part of the id and the bundle suffix.
const DA_MARKER: &str = "DA";

/// Renders an id as `0x` lowercase hex with an even number of digits.
pub fn format_hex_id(value: U256) -> String {
    let digits = format!("{value:x}");
    if digits.len() % 2 == 1 {
        format!("0x0{digits}")
    } else {
        format!("0x{digits}")
    }
}

/// Returns the short form of a data availability id used inside publication ids.
pub fn short_data_availability_id(data_availability_id: &str) -> &str {
    data_availability_id
        .split('-')
        .next()
        .unwrap_or(data_availability_id)
}

/// Derives the canonical publication id.
pub fn derive_publication_id(profile_id: U256, pub_id: U256, data_availability_id: &str) -> String {
    format!(
        "{}-{}-{DA_MARKER}-{}",
        format_hex_id(profile_id),
        format_hex_id(pub_id),
        short_data_availability_id(data_availability_id)
    )
}

/// Returns `true` if `claimed` is exactly the id derived from the other inputs.
pub fn publication_id_matches(
    claimed: &str,
    profile_id: U256,
    pub_id: U256,
    data_availability_id: &str,
) -> bool {
    derive_publication_id(profile_id, pub_id, data_availability_id) == claimed
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_hex_ids_are_even_length() {
        assert_eq!(format_hex_id(U256::ZERO), "0x00");
        assert_eq!(format_hex_id(U256::from(1)), "0x01");
        assert_eq!(format_hex_id(U256::from(0x18)), "0x18");
        assert_eq!(format_hex_id(U256::from(0x123)), "0x0123");
    }

    #[test]
    fn test_derive_uses_first_uuid_segment() {
        let id = derive_publication_id(
            U256::from(0x01),
            U256::from(0x2c),
            "3b2c8f9e-5a1d-4e6f-9a7b-0c1d2e3f4a5b",
        );
        assert_eq!(id, "0x01-0x2c-DA-3b2c8f9e");
    }

    #[test]
    fn test_derive_without_separator_uses_whole_id() {
        let id = derive_publication_id(U256::from(5), U256::from(6), "abcdef");
        assert_eq!(id, "0x05-0x06-DA-abcdef");
    }

    #[test]
    fn test_matches_is_exact() {
        let da = "deadbeef-0000";
        let id = derive_publication_id(U256::from(7), U256::from(8), da);
        assert!(publication_id_matches(&id, U256::from(7), U256::from(8), da));
        assert!(!publication_id_matches("0x7-0x08-DA-deadbeef", U256::from(7), U256::from(8), da));
        assert!(!publication_id_matches(&id, U256::from(7), U256::from(9), da));
    }

    proptest! {
        #[test]
        fn proptest_derive_is_deterministic(profile in any::<u64>(), pub_id in any::<u64>(), short in "[a-f0-9]{8}") {
            let a = derive_publication_id(U256::from(profile), U256::from(pub_id), &short);
            let b = derive_publication_id(U256::from(profile), U256::from(pub_id), &short);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn proptest_derive_is_injective(
            p1 in any::<u64>(), q1 in any::<u64>(), s1 in "[a-f0-9]{8}",
            p2 in any::<u64>(), q2 in any::<u64>(), s2 in "[a-f0-9]{8}",
        ) {
            let a = derive_publication_id(U256::from(p1), U256::from(q1), &s1);
            let b = derive_publication_id(U256::from(p2), U256::from(q2), &s2);
            prop_assert_eq!(a == b, (p1, q1, &s1) == (p2, q2, &s2));
        }

        #[test]
        fn proptest_matches_agrees_with_derive(profile in any::<u64>(), pub_id in any::<u64>(), da in "[a-f0-9]{8}-[a-f0-9]{4}") {
            let id = derive_publication_id(U256::from(profile), U256::from(pub_id), &da);
            prop_assert!(publication_id_matches(&id, U256::from(profile), U256::from(pub_id), &da));
        }
    }
}
