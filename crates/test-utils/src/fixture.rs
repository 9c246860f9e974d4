use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::SolStruct;
use momoka_chain::BlockInfo;
use momoka_crypto::{
    submitter_message, timestamp_message, typed_data::v1 as sol_v1, typed_data::v2 as sol_v2,
    typed_data_signing_hash,
};
use momoka_primitives::{
    derive_publication_id,
    events::{v1 as ev1, v2 as ev2},
    typed_values::{v1 as tv1, v2 as tv2},
    ChainProofs, LensVersion, PointerKind, PointerProof, PublicationChainProof, PublicationKind,
    PublicationRecord, TimestampProof, TypedDataDomain, TypedDataEnvelope, HUB_DOMAIN_NAME,
};
use serde_json::Value;

use crate::{authority_key, delegate_key, hubs, owner_key, schema_for, submitter_key, CHAIN_ID};

pub const DEFAULT_BLOCK_NUMBER: u64 = 100;
pub const DEFAULT_BLOCK_TIMESTAMP: u64 = 1_700_000_000;
pub const DEFAULT_NONCE: u64 = 3;
pub const DEFAULT_PUB_ID: u64 = 6;

/// Seconds between a fixture block and the block after it.
pub const NEXT_BLOCK_GAP: u64 = 12;

const CONTENT_URI: &str = "ar://momoka-fixture-content";

/// Builder for a fully signed publication record.
#[derive(Debug, Clone)]
pub struct PublicationFixture {
    kind: PublicationKind,
    version: LensVersion,
    data_availability_id: String,
    profile_id: U256,
    pub_id: U256,
    nonce: U256,
    pointed: (U256, U256),
    pointer: Option<String>,
    block_number: u64,
    block_timestamp: u64,
    attested_delay_secs: u64,
    deadline: Option<U256>,
    signer: PrivateKeySigner,
    signed_by_delegate: bool,
}

/// A built fixture plus the facts a test usually asserts against.
#[derive(Debug, Clone)]
pub struct BuiltPublication {
    pub record: PublicationRecord,
    /// Address that signed the typed data.
    pub signer: Address,
    pub owner: Address,
    pub submitter: Address,
    /// Publication counter of the profile at the proof block.
    pub counter: U256,
    pub nonce: U256,
    pub profile_id: U256,
    pub pub_id: U256,
    pub block: BlockInfo,
    pub next_block: BlockInfo,
}

impl PublicationFixture {
    fn new(kind: PublicationKind, version: LensVersion) -> Self {
        // Distinct default ids per variant so several fixtures can share a store.
        let seed = match (kind, version) {
            (PublicationKind::Post, LensVersion::V1) => 1,
            (PublicationKind::Comment, LensVersion::V1) => 2,
            (PublicationKind::Mirror, LensVersion::V1) => 3,
            (PublicationKind::Quote, LensVersion::V1) => 4,
            (PublicationKind::Post, LensVersion::V2) => 5,
            (PublicationKind::Comment, LensVersion::V2) => 6,
            (PublicationKind::Mirror, LensVersion::V2) => 7,
            (PublicationKind::Quote, LensVersion::V2) => 8,
        };
        Self {
            kind,
            version,
            data_availability_id: format!("{seed:08x}-5a1d-4e6f-9a7b-0c1d2e3f4a5b"),
            profile_id: U256::from(1),
            pub_id: U256::from(DEFAULT_PUB_ID),
            nonce: U256::from(DEFAULT_NONCE),
            pointed: (U256::from(2), U256::from(5)),
            pointer: None,
            block_number: DEFAULT_BLOCK_NUMBER,
            block_timestamp: DEFAULT_BLOCK_TIMESTAMP,
            attested_delay_secs: 5,
            deadline: None,
            signer: owner_key(),
            signed_by_delegate: false,
        }
    }

    pub fn post_v1() -> Self {
        Self::new(PublicationKind::Post, LensVersion::V1)
    }

    pub fn comment_v1() -> Self {
        Self::new(PublicationKind::Comment, LensVersion::V1)
    }

    pub fn mirror_v1() -> Self {
        Self::new(PublicationKind::Mirror, LensVersion::V1)
    }

    pub fn post_v2() -> Self {
        Self::new(PublicationKind::Post, LensVersion::V2)
    }

    pub fn comment_v2() -> Self {
        Self::new(PublicationKind::Comment, LensVersion::V2)
    }

    pub fn mirror_v2() -> Self {
        Self::new(PublicationKind::Mirror, LensVersion::V2)
    }

    pub fn quote_v2() -> Self {
        Self::new(PublicationKind::Quote, LensVersion::V2)
    }

    /// One fixture of every supported type and version.
    pub fn all() -> Vec<Self> {
        vec![
            Self::post_v1(),
            Self::comment_v1(),
            Self::mirror_v1(),
            Self::post_v2(),
            Self::comment_v2(),
            Self::mirror_v2(),
            Self::quote_v2(),
        ]
    }

    pub fn data_availability_id(mut self, id: impl Into<String>) -> Self {
        self.data_availability_id = id.into();
        self
    }

    pub fn profile_id(mut self, profile_id: u64) -> Self {
        self.profile_id = U256::from(profile_id);
        self
    }

    /// Publication id the event claims; the profile counter is one less.
    pub fn pub_id(mut self, pub_id: u64) -> Self {
        self.pub_id = U256::from(pub_id);
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = U256::from(nonce);
        self
    }

    /// Publication being commented, mirrored or quoted. Ignored for posts.
    pub fn pointed(mut self, profile_id: u64, pub_id: u64) -> Self {
        self.pointed = (U256::from(profile_id), U256::from(pub_id));
        self
    }

    /// Attaches a pointer proof to the bundle at `location`.
    pub fn pointer(mut self, location: impl Into<String>) -> Self {
        self.pointer = Some(location.into());
        self
    }

    pub fn block(mut self, number: u64, timestamp: u64) -> Self {
        self.block_number = number;
        self.block_timestamp = timestamp;
        self
    }

    /// Seconds between the block and the attested upload time.
    pub fn attested_delay(mut self, secs: u64) -> Self {
        self.attested_delay_secs = secs;
        self
    }

    pub fn deadline(mut self, deadline: u64) -> Self {
        self.deadline = Some(U256::from(deadline));
        self
    }

    pub fn signer(mut self, key: PrivateKeySigner) -> Self {
        self.signer = key;
        self
    }

    /// Signs with the profile's approved executor.
    pub fn signed_by_delegate(mut self) -> Self {
        self.signer = delegate_key();
        self.signed_by_delegate = true;
        self
    }

    fn domain(&self) -> TypedDataDomain {
        TypedDataDomain {
            name: HUB_DOMAIN_NAME.to_owned(),
            version: self.version.domain_version().to_owned(),
            chain_id: U256::from(CHAIN_ID),
            verifying_contract: hubs().for_version(self.version),
        }
    }

    fn sign_typed<T: SolStruct>(
        &self,
        value: Value,
        sol: &T,
    ) -> (TypedDataEnvelope, Bytes) {
        let envelope = TypedDataEnvelope {
            domain: self.domain(),
            types: schema_for::<T>(),
            value,
        };
        let hash = typed_data_signing_hash(&envelope, sol).expect("fixture schema matches");
        let signature = self.signer.sign_hash_sync(&hash).expect("sign typed data");
        (envelope, Bytes::from(signature.as_bytes().to_vec()))
    }

    /// Typed data, its signature, and the matching event.
    fn payloads(&self) -> (TypedDataEnvelope, Bytes, Value) {
        let deadline = self.deadline.unwrap_or(U256::from(self.block_timestamp + 3600));
        let signer = self.signer.address();
        let (pointed_profile_id, pointed_pub_id) = self.pointed;
        let timestamp = self.block_timestamp;

        match (self.kind, self.version) {
            (PublicationKind::Post, LensVersion::V1) => {
                let value = tv1::PostWithSigValue {
                    profile_id: self.profile_id,
                    content_uri: CONTENT_URI.to_owned(),
                    collect_module: Address::ZERO,
                    collect_module_init_data: Bytes::new(),
                    reference_module: Address::ZERO,
                    reference_module_init_data: Bytes::new(),
                    nonce: self.nonce,
                    deadline,
                };
                let event = ev1::PostCreatedEvent {
                    profile_id: value.profile_id,
                    pub_id: self.pub_id,
                    content_uri: value.content_uri.clone(),
                    collect_module: value.collect_module,
                    collect_module_return_data: Bytes::new(),
                    reference_module: value.reference_module,
                    reference_module_return_data: Bytes::new(),
                    timestamp,
                };
                let (envelope, sig) =
                    self.sign_typed(to_json(&value), &sol_v1::PostWithSig::from(&value));
                (envelope, sig, to_json(&event))
            }
            (PublicationKind::Comment, LensVersion::V1) => {
                let value = tv1::CommentWithSigValue {
                    profile_id: self.profile_id,
                    content_uri: CONTENT_URI.to_owned(),
                    profile_id_pointed: pointed_profile_id,
                    pub_id_pointed: pointed_pub_id,
                    reference_module_data: Bytes::new(),
                    collect_module: Address::ZERO,
                    collect_module_init_data: Bytes::new(),
                    reference_module: Address::ZERO,
                    reference_module_init_data: Bytes::new(),
                    nonce: self.nonce,
                    deadline,
                };
                let event = ev1::CommentCreatedEvent {
                    profile_id: value.profile_id,
                    pub_id: self.pub_id,
                    content_uri: value.content_uri.clone(),
                    profile_id_pointed: pointed_profile_id,
                    pub_id_pointed: pointed_pub_id,
                    reference_module_data: Bytes::new(),
                    collect_module: value.collect_module,
                    collect_module_return_data: Bytes::new(),
                    reference_module: value.reference_module,
                    reference_module_return_data: Bytes::new(),
                    timestamp,
                };
                let (envelope, sig) =
                    self.sign_typed(to_json(&value), &sol_v1::CommentWithSig::from(&value));
                (envelope, sig, to_json(&event))
            }
            (PublicationKind::Mirror, LensVersion::V1) => {
                let value = tv1::MirrorWithSigValue {
                    profile_id: self.profile_id,
                    profile_id_pointed: pointed_profile_id,
                    pub_id_pointed: pointed_pub_id,
                    reference_module_data: Bytes::new(),
                    reference_module: Address::ZERO,
                    reference_module_init_data: Bytes::new(),
                    nonce: self.nonce,
                    deadline,
                };
                let event = ev1::MirrorCreatedEvent {
                    profile_id: value.profile_id,
                    pub_id: self.pub_id,
                    profile_id_pointed: pointed_profile_id,
                    pub_id_pointed: pointed_pub_id,
                    reference_module_data: Bytes::new(),
                    reference_module: value.reference_module,
                    reference_module_return_data: Bytes::new(),
                    timestamp,
                };
                let (envelope, sig) =
                    self.sign_typed(to_json(&value), &sol_v1::MirrorWithSig::from(&value));
                (envelope, sig, to_json(&event))
            }
            (PublicationKind::Quote, LensVersion::V1) => {
                panic!("quotes do not exist on V1")
            }
            (PublicationKind::Post, LensVersion::V2) => {
                let value = tv2::PostValue {
                    profile_id: self.profile_id,
                    content_uri: CONTENT_URI.to_owned(),
                    action_modules: Vec::new(),
                    action_modules_init_datas: Vec::new(),
                    reference_module: Address::ZERO,
                    reference_module_init_data: Bytes::new(),
                    nonce: self.nonce,
                    deadline,
                };
                let event = ev2::PostCreatedEvent {
                    post_params: ev2::PostParams {
                        profile_id: value.profile_id,
                        content_uri: value.content_uri.clone(),
                        action_modules: Vec::new(),
                        action_modules_init_datas: Vec::new(),
                        reference_module: value.reference_module,
                        reference_module_init_data: Bytes::new(),
                    },
                    pub_id_assigned: self.pub_id,
                    action_modules_init_return_datas: Vec::new(),
                    reference_module_init_return_data: Bytes::new(),
                    transaction_executor: signer,
                    timestamp,
                };
                let (envelope, sig) =
                    self.sign_typed(to_json(&value), &sol_v2::Post::from(&value));
                (envelope, sig, to_json(&event))
            }
            (PublicationKind::Comment | PublicationKind::Quote, LensVersion::V2) => {
                let value = tv2::ReferencePubValue {
                    profile_id: self.profile_id,
                    content_uri: CONTENT_URI.to_owned(),
                    pointed_profile_id,
                    pointed_pub_id,
                    referrer_profile_ids: Vec::new(),
                    referrer_pub_ids: Vec::new(),
                    reference_module_data: Bytes::new(),
                    action_modules: Vec::new(),
                    action_modules_init_datas: Vec::new(),
                    reference_module: Address::ZERO,
                    reference_module_init_data: Bytes::new(),
                    nonce: self.nonce,
                    deadline,
                };
                let params = ev2::ReferencePubParams {
                    profile_id: value.profile_id,
                    content_uri: value.content_uri.clone(),
                    pointed_profile_id,
                    pointed_pub_id,
                    referrer_profile_ids: Vec::new(),
                    referrer_pub_ids: Vec::new(),
                    reference_module_data: Bytes::new(),
                    action_modules: Vec::new(),
                    action_modules_init_datas: Vec::new(),
                    reference_module: value.reference_module,
                    reference_module_init_data: Bytes::new(),
                };
                if self.kind == PublicationKind::Quote {
                    let event = ev2::QuoteCreatedEvent {
                        quote_params: params,
                        pub_id_assigned: self.pub_id,
                        reference_module_return_data: Bytes::new(),
                        action_modules_init_return_datas: Vec::new(),
                        reference_module_init_return_data: Bytes::new(),
                        transaction_executor: signer,
                        timestamp,
                    };
                    let (envelope, sig) =
                        self.sign_typed(to_json(&value), &sol_v2::Quote::from(&value));
                    (envelope, sig, to_json(&event))
                } else {
                    let event = ev2::CommentCreatedEvent {
                        comment_params: params,
                        pub_id_assigned: self.pub_id,
                        reference_module_return_data: Bytes::new(),
                        action_modules_init_return_datas: Vec::new(),
                        reference_module_init_return_data: Bytes::new(),
                        transaction_executor: signer,
                        timestamp,
                    };
                    let (envelope, sig) =
                        self.sign_typed(to_json(&value), &sol_v2::Comment::from(&value));
                    (envelope, sig, to_json(&event))
                }
            }
            (PublicationKind::Mirror, LensVersion::V2) => {
                let value = tv2::MirrorValue {
                    profile_id: self.profile_id,
                    metadata_uri: CONTENT_URI.to_owned(),
                    pointed_profile_id,
                    pointed_pub_id,
                    referrer_profile_ids: Vec::new(),
                    referrer_pub_ids: Vec::new(),
                    reference_module_data: Bytes::new(),
                    nonce: self.nonce,
                    deadline,
                };
                let event = ev2::MirrorCreatedEvent {
                    mirror_params: ev2::MirrorParams {
                        profile_id: value.profile_id,
                        metadata_uri: value.metadata_uri.clone(),
                        pointed_profile_id,
                        pointed_pub_id,
                        referrer_profile_ids: Vec::new(),
                        referrer_pub_ids: Vec::new(),
                        reference_module_data: Bytes::new(),
                    },
                    pub_id_assigned: self.pub_id,
                    reference_module_return_data: Bytes::new(),
                    transaction_executor: signer,
                    timestamp,
                };
                let (envelope, sig) =
                    self.sign_typed(to_json(&value), &sol_v2::Mirror::from(&value));
                (envelope, sig, to_json(&event))
            }
        }
    }

    /// Signs everything and assembles the record.
    pub fn build(&self) -> BuiltPublication {
        let (typed_data, signature, event) = self.payloads();
        let submitter = submitter_key();

        let mut record = PublicationRecord {
            data_availability_id: self.data_availability_id.clone(),
            kind: self.kind,
            version: self.version,
            publication_id: derive_publication_id(
                self.profile_id,
                self.pub_id,
                &self.data_availability_id,
            ),
            signature: None,
            event,
            chain_proofs: ChainProofs {
                this_publication: PublicationChainProof {
                    typed_data,
                    signature,
                    signed_by_delegate: self.signed_by_delegate,
                    block_number: self.block_number,
                    block_hash: Some(B256::repeat_byte(0xbb)),
                },
                pointer: self.pointer.clone().map(|location| PointerProof {
                    location,
                    kind: PointerKind::OnDa,
                }),
            },
            timestamp_proofs: TimestampProof {
                kind: self.kind,
                version: self.version,
                data_availability_id: self.data_availability_id.clone(),
                submitter: submitter.address(),
                timestamp: (self.block_timestamp + self.attested_delay_secs) * 1000,
                signature: Bytes::new(),
            },
        };
        sign_timestamp_proof(&mut record.timestamp_proofs, &authority_key());
        sign_submitter(&mut record, &submitter);

        BuiltPublication {
            record,
            signer: self.signer.address(),
            owner: owner_key().address(),
            submitter: submitter.address(),
            counter: self.pub_id.saturating_sub(U256::from(1)),
            nonce: self.nonce,
            profile_id: self.profile_id,
            pub_id: self.pub_id,
            block: BlockInfo {
                number: self.block_number,
                timestamp: self.block_timestamp,
            },
            next_block: BlockInfo {
                number: self.block_number + 1,
                timestamp: self.block_timestamp + NEXT_BLOCK_GAP,
            },
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).expect("fixture serializes")
}

/// Re-signs the bundle attestation, e.g. after a test edited the record.
pub fn sign_submitter(record: &mut PublicationRecord, key: &PrivateKeySigner) {
    let signature = key
        .sign_message_sync(&submitter_message(record))
        .expect("sign submitter message");
    record.signature = Some(Bytes::from(signature.as_bytes().to_vec()));
}

/// Re-signs a timestamp proof, e.g. after a test edited it.
pub fn sign_timestamp_proof(proof: &mut TimestampProof, key: &PrivateKeySigner) {
    let signature = key
        .sign_message_sync(&timestamp_message(proof))
        .expect("sign timestamp message");
    proof.signature = Bytes::from(signature.as_bytes().to_vec());
}

#[cfg(test)]
mod tests {
    use momoka_crypto::{recover_submitter, recover_timestamp_authority};
    use momoka_primitives::PublicationEvent;

    use super::*;

    #[test]
    fn test_every_fixture_is_self_consistent() {
        for fixture in PublicationFixture::all() {
            let built = fixture.build();
            let record = &built.record;

            let event =
                PublicationEvent::decode(record.kind, record.version, &record.event).unwrap();
            let (pub_id, timestamp) = match event {
                PublicationEvent::PostV1(e) => (e.pub_id, e.timestamp),
                PublicationEvent::CommentV1(e) => (e.pub_id, e.timestamp),
                PublicationEvent::MirrorV1(e) => (e.pub_id, e.timestamp),
                PublicationEvent::PostV2(e) => (e.pub_id_assigned, e.timestamp),
                PublicationEvent::CommentV2(e) => (e.pub_id_assigned, e.timestamp),
                PublicationEvent::MirrorV2(e) => (e.pub_id_assigned, e.timestamp),
                PublicationEvent::QuoteV2(e) => (e.pub_id_assigned, e.timestamp),
            };
            assert_eq!(pub_id, built.pub_id);
            assert_eq!(timestamp, built.block.timestamp);
            assert_eq!(recover_submitter(record).unwrap(), built.submitter);
            assert_eq!(
                recover_timestamp_authority(&record.timestamp_proofs).unwrap(),
                authority_key().address()
            );
        }
    }

    #[test]
    fn test_delegate_fixture_flags_and_signer() {
        let built = PublicationFixture::post_v2().signed_by_delegate().build();
        assert!(built.record.chain_proofs.this_publication.signed_by_delegate);
        assert_eq!(built.signer, delegate_key().address());
        assert_eq!(built.owner, owner_key().address());
    }
}
