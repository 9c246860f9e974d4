//! Serde helpers for numeric fields that arrive in several textual forms.
//!
//! Off-chain payloads carry big integers as JSON numbers, decimal strings or
//! `0x` hex strings. All of them are normalized into [`U256`] so comparisons are
//! made on values, never on formatting.

use std::{fmt, str::FromStr};

use alloy_primitives::U256;
use serde::{
    de::{self, SeqAccess, Visitor},
    Deserializer, Serializer,
};

struct U256Visitor;

impl<'de> Visitor<'de> for U256Visitor {
    type Value = U256;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an unsigned integer, a decimal string or a 0x-prefixed hex string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
        Ok(U256::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<U256, E> {
        u64::try_from(v)
            .map(U256::from)
            .map_err(|_| E::custom(format!("negative integer {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
        parse_u256(v).map_err(E::custom)
    }
}

/// Parses a decimal or `0x` hex string into a [`U256`].
pub fn parse_u256(s: &str) -> Result<U256, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("empty integer string".to_owned());
    }
    U256::from_str(trimmed).map_err(|e| format!("invalid integer {trimmed:?}: {e}"))
}

/// Serialize [`U256`] as a `0x` hex string, deserialize leniently.
pub mod u256_lenient {
    use super::*;

    pub fn serialize<S: Serializer>(v: &U256, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("0x{v:x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<U256, D::Error> {
        d.deserialize_any(U256Visitor)
    }
}

/// Same as [`u256_lenient`] for sequences.
pub mod u256_vec_lenient {
    use serde::ser::SerializeSeq;

    use super::*;

    pub fn serialize<S: Serializer>(v: &[U256], s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(v.len()))?;
        for item in v {
            seq.serialize_element(&format!("0x{item:x}"))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<U256>, D::Error> {
        struct SeqVisitor;

        impl<'de> Visitor<'de> for SeqVisitor {
            type Value = Vec<U256>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sequence of integers")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<U256>, A::Error> {
                let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(v) = seq.next_element::<LenientU256>()? {
                    out.push(v.0);
                }
                Ok(out)
            }
        }

        d.deserialize_seq(SeqVisitor)
    }

    struct LenientU256(U256);

    impl<'de> serde::Deserialize<'de> for LenientU256 {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            d.deserialize_any(U256Visitor).map(LenientU256)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Wrapper {
        #[serde(with = "u256_lenient")]
        value: U256,
        #[serde(with = "u256_vec_lenient")]
        values: Vec<U256>,
    }

    #[test]
    fn test_number_decimal_and_hex_normalize_to_same_value() {
        for raw in [
            r#"{"value": 26, "values": [1]}"#,
            r#"{"value": "26", "values": ["1"]}"#,
            r#"{"value": "0x1a", "values": ["0x01"]}"#,
            r#"{"value": "0x001a", "values": ["0x0001"]}"#,
        ] {
            let w: Wrapper = serde_json::from_str(raw).unwrap();
            assert_eq!(w.value, U256::from(26));
            assert_eq!(w.values, vec![U256::from(1)]);
        }
    }

    #[test]
    fn test_serializes_as_hex() {
        let w = Wrapper {
            value: U256::from(255),
            values: vec![U256::from(16)],
        };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"value":"0xff","values":["0x10"]}"#);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"value": "abc", "values": []}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"value": -1, "values": []}"#).is_err());
        assert!(parse_u256("").is_err());
    }
}
