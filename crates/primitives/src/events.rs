//! Event payloads emitted by the hub, one shape per publication type and version.

use alloy_primitives::{Address, Bytes, U256};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{LensVersion, ProofError, PublicationKind};

/// V1 hub events.
pub mod v1 {
    use super::*;
    use crate::serde_helpers::u256_lenient;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PostCreatedEvent {
        #[serde(with = "u256_lenient")]
        pub profile_id: U256,
        #[serde(with = "u256_lenient")]
        pub pub_id: U256,
        #[serde(rename = "contentURI")]
        pub content_uri: String,
        pub collect_module: Address,
        pub collect_module_return_data: Bytes,
        pub reference_module: Address,
        pub reference_module_return_data: Bytes,
        pub timestamp: u64,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CommentCreatedEvent {
        #[serde(with = "u256_lenient")]
        pub profile_id: U256,
        #[serde(with = "u256_lenient")]
        pub pub_id: U256,
        #[serde(rename = "contentURI")]
        pub content_uri: String,
        #[serde(with = "u256_lenient")]
        pub profile_id_pointed: U256,
        #[serde(with = "u256_lenient")]
        pub pub_id_pointed: U256,
        pub reference_module_data: Bytes,
        pub collect_module: Address,
        pub collect_module_return_data: Bytes,
        pub reference_module: Address,
        pub reference_module_return_data: Bytes,
        pub timestamp: u64,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MirrorCreatedEvent {
        #[serde(with = "u256_lenient")]
        pub profile_id: U256,
        #[serde(with = "u256_lenient")]
        pub pub_id: U256,
        #[serde(with = "u256_lenient")]
        pub profile_id_pointed: U256,
        #[serde(with = "u256_lenient")]
        pub pub_id_pointed: U256,
        pub reference_module_data: Bytes,
        pub reference_module: Address,
        pub reference_module_return_data: Bytes,
        pub timestamp: u64,
    }
}

/// V2 hub events.
pub mod v2 {
    use super::*;
    use crate::serde_helpers::{u256_lenient, u256_vec_lenient};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PostParams {
        #[serde(with = "u256_lenient")]
        pub profile_id: U256,
        #[serde(rename = "contentURI")]
        pub content_uri: String,
        pub action_modules: Vec<Address>,
        pub action_modules_init_datas: Vec<Bytes>,
        pub reference_module: Address,
        pub reference_module_init_data: Bytes,
    }

    /// Parameters shared by comments and quotes.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReferencePubParams {
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
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MirrorParams {
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
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PostCreatedEvent {
        pub post_params: PostParams,
        #[serde(with = "u256_lenient")]
        pub pub_id_assigned: U256,
        pub action_modules_init_return_datas: Vec<Bytes>,
        pub reference_module_init_return_data: Bytes,
        pub transaction_executor: Address,
        pub timestamp: u64,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CommentCreatedEvent {
        pub comment_params: ReferencePubParams,
        #[serde(with = "u256_lenient")]
        pub pub_id_assigned: U256,
        pub reference_module_return_data: Bytes,
        pub action_modules_init_return_datas: Vec<Bytes>,
        pub reference_module_init_return_data: Bytes,
        pub transaction_executor: Address,
        pub timestamp: u64,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MirrorCreatedEvent {
        pub mirror_params: MirrorParams,
        #[serde(with = "u256_lenient")]
        pub pub_id_assigned: U256,
        pub reference_module_return_data: Bytes,
        pub transaction_executor: Address,
        pub timestamp: u64,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QuoteCreatedEvent {
        pub quote_params: ReferencePubParams,
        #[serde(with = "u256_lenient")]
        pub pub_id_assigned: U256,
        pub reference_module_return_data: Bytes,
        pub action_modules_init_return_datas: Vec<Bytes>,
        pub reference_module_init_return_data: Bytes,
        pub transaction_executor: Address,
        pub timestamp: u64,
    }
}

/// A decoded event, tagged by publication type and protocol version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicationEvent {
    PostV1(v1::PostCreatedEvent),
    CommentV1(v1::CommentCreatedEvent),
    MirrorV1(v1::MirrorCreatedEvent),
    PostV2(v2::PostCreatedEvent),
    CommentV2(v2::CommentCreatedEvent),
    MirrorV2(v2::MirrorCreatedEvent),
    QuoteV2(v2::QuoteCreatedEvent),
}

fn decode_as<T: DeserializeOwned>(raw: &serde_json::Value) -> Result<T, ProofError> {
    T::deserialize(raw).map_err(|_| ProofError::EventMismatch)
}

impl PublicationEvent {
    /// Decodes the raw event for the claimed type and version.
    ///
    /// A payload that does not have the shape of the claimed event cannot match
    /// any signed typed data, so it is reported as [`ProofError::EventMismatch`].
    /// The same goes for combinations the hub never emits (quotes on V1).
    pub fn decode(
        kind: PublicationKind,
        version: LensVersion,
        raw: &serde_json::Value,
    ) -> Result<Self, ProofError> {
        use LensVersion::*;
        use PublicationKind::*;

        Ok(match (kind, version) {
            (Post, V1) => Self::PostV1(decode_as(raw)?),
            (Comment, V1) => Self::CommentV1(decode_as(raw)?),
            (Mirror, V1) => Self::MirrorV1(decode_as(raw)?),
            (Quote, V1) => return Err(ProofError::EventMismatch),
            (Post, V2) => Self::PostV2(decode_as(raw)?),
            (Comment, V2) => Self::CommentV2(decode_as(raw)?),
            (Mirror, V2) => Self::MirrorV2(decode_as(raw)?),
            (Quote, V2) => Self::QuoteV2(decode_as(raw)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn mirror_v1_json() -> serde_json::Value {
        json!({
            "profileId": "0x01",
            "pubId": 3,
            "profileIdPointed": "2",
            "pubIdPointed": "0x05",
            "referenceModuleData": "0x",
            "referenceModule": "0x0000000000000000000000000000000000000000",
            "referenceModuleReturnData": "0x",
            "timestamp": 1700000000
        })
    }

    #[test]
    fn test_decode_mirror_v1() {
        let ev = PublicationEvent::decode(
            PublicationKind::Mirror,
            LensVersion::V1,
            &mirror_v1_json(),
        )
        .unwrap();
        let PublicationEvent::MirrorV1(ref mirror) = ev else {
            panic!("decoded as {ev:?}");
        };
        assert_eq!(mirror.profile_id, U256::from(1));
        assert_eq!(mirror.profile_id_pointed, U256::from(2));
        assert_eq!(mirror.pub_id_pointed, U256::from(5));
        assert_eq!(mirror.pub_id, U256::from(3));
        assert_eq!(mirror.timestamp, 1_700_000_000);
    }

    #[test]
    fn test_wrong_shape_is_event_mismatch() {
        let err = PublicationEvent::decode(
            PublicationKind::Post,
            LensVersion::V2,
            &mirror_v1_json(),
        )
        .unwrap_err();
        assert_eq!(err, ProofError::EventMismatch);
    }

    #[test]
    fn test_quote_v1_does_not_exist() {
        let err = PublicationEvent::decode(PublicationKind::Quote, LensVersion::V1, &json!({}))
            .unwrap_err();
        assert_eq!(err, ProofError::EventMismatch);
    }
}
