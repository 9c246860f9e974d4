//! The `value` object of the signed EIP-712 payload, per primary type.
//!
//! Field names follow the hub's EIP-712 struct definitions. Every numeric field
//! is normalized into a [`U256`] when decoded.

use alloy_primitives::{Address, Bytes, U256};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::ProofError;

/// Decodes a typed data value, mapping any shape error to
/// [`ProofError::InvalidFormattedTypedData`].
pub fn decode_value<T: DeserializeOwned>(raw: &serde_json::Value) -> Result<T, ProofError> {
    T::deserialize(raw).map_err(|_| ProofError::InvalidFormattedTypedData)
}

/// Values of V1 `*WithSig` typed data.
pub mod v1 {
    use super::*;
    use crate::serde_helpers::u256_lenient;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PostWithSigValue {
        #[serde(with = "u256_lenient")]
        pub profile_id: U256,
        #[serde(rename = "contentURI")]
        pub content_uri: String,
        pub collect_module: Address,
        pub collect_module_init_data: Bytes,
        pub reference_module: Address,
        pub reference_module_init_data: Bytes,
        #[serde(with = "u256_lenient")]
        pub nonce: U256,
        #[serde(with = "u256_lenient")]
        pub deadline: U256,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CommentWithSigValue {
        #[serde(with = "u256_lenient")]
        pub profile_id: U256,
        #[serde(rename = "contentURI")]
        pub content_uri: String,
        #[serde(with = "u256_lenient")]
        pub profile_id_pointed: U256,
        #[serde(with = "u256_lenient")]
        pub pub_id_pointed: U256,
        pub reference_module_data: Bytes,
        pub collect_module: Address,
        pub collect_module_init_data: Bytes,
        pub reference_module: Address,
        pub reference_module_init_data: Bytes,
        #[serde(with = "u256_lenient")]
        pub nonce: U256,
        #[serde(with = "u256_lenient")]
        pub deadline: U256,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MirrorWithSigValue {
        #[serde(with = "u256_lenient")]
        pub profile_id: U256,
        #[serde(with = "u256_lenient")]
        pub profile_id_pointed: U256,
        #[serde(with = "u256_lenient")]
        pub pub_id_pointed: U256,
        pub reference_module_data: Bytes,
        pub reference_module: Address,
        pub reference_module_init_data: Bytes,
        #[serde(with = "u256_lenient")]
        pub nonce: U256,
        #[serde(with = "u256_lenient")]
        pub deadline: U256,
    }
}

/// Values of V2 typed data.
pub mod v2 {
    use super::*;
    use crate::serde_helpers::{u256_lenient, u256_vec_lenient};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PostValue {
        #[serde(with = "u256_lenient")]
        pub profile_id: U256,
        #[serde(rename = "contentURI")]
        pub content_uri: String,
        pub action_modules: Vec<Address>,
        pub action_modules_init_datas: Vec<Bytes>,
        pub reference_module: Address,
        pub reference_module_init_data: Bytes,
        #[serde(with = "u256_lenient")]
        pub nonce: U256,
        #[serde(with = "u256_lenient")]
        pub deadline: U256,
    }

    /// Value of both `Comment` and `Quote` typed data; the two share a layout.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReferencePubValue {
        #[serde(with = "u256_lenient")]
        pub profile_id: U256,
        #[serde(rename = "contentURI")]
        pub content_uri: String,
        #[serde(with = "u256_lenient")]
        pub pointed_profile_id: U256,
        #[serde(with = "u256_lenient")]
        pub pointed_pub_id: U256,
        #[serde(with = "u256_vec_lenient")]
        pub referrer_profile_ids: Vec<U256>,
        #[serde(with = "u256_vec_lenient")]
        pub referrer_pub_ids: Vec<U256>,
        pub reference_module_data: Bytes,
        pub action_modules: Vec<Address>,
        pub action_modules_init_datas: Vec<Bytes>,
        pub reference_module: Address,
        pub reference_module_init_data: Bytes,
        #[serde(with = "u256_lenient")]
        pub nonce: U256,
        #[serde(with = "u256_lenient")]
        pub deadline: U256,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MirrorValue {
        #[serde(with = "u256_lenient")]
        pub profile_id: U256,
        #[serde(rename = "metadataURI")]
        pub metadata_uri: String,
        #[serde(with = "u256_lenient")]
        pub pointed_profile_id: U256,
        #[serde(with = "u256_lenient")]
        pub pointed_pub_id: U256,
        #[serde(with = "u256_vec_lenient")]
        pub referrer_profile_ids: Vec<U256>,
        #[serde(with = "u256_vec_lenient")]
        pub referrer_pub_ids: Vec<U256>,
        pub reference_module_data: Bytes,
        #[serde(with = "u256_lenient")]
        pub nonce: U256,
        #[serde(with = "u256_lenient")]
        pub deadline: U256,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_post_v2_value() {
        let raw = json!({
            "profileId": "0x2a",
            "contentURI": "ar://content",
            "actionModules": [],
            "actionModulesInitDatas": [],
            "referenceModule": "0x0000000000000000000000000000000000000000",
            "referenceModuleInitData": "0x",
            "nonce": 3,
            "deadline": "1700000600"
        });
        let value: v2::PostValue = decode_value(&raw).unwrap();
        assert_eq!(value.profile_id, U256::from(42));
        assert_eq!(value.nonce, U256::from(3));
        assert_eq!(value.deadline, U256::from(1_700_000_600u64));
    }

    #[test]
    fn test_missing_field_is_invalid_typed_data() {
        let raw = json!({ "profileId": "0x2a" });
        let err = decode_value::<v1::PostWithSigValue>(&raw).unwrap_err();
        assert_eq!(err, ProofError::InvalidFormattedTypedData);
    }
}
