use alloy_primitives::{Address, Bytes, Signature, U256};
use momoka_chain::hub;
use momoka_crypto::typed_data::{v1 as sol_v1, v2 as sol_v2};
use momoka_primitives::{
    events::{v1 as events_v1, v2 as events_v2},
    typed_values::{v1 as values_v1, v2 as values_v2},
    LensVersion, ProofError, PublicationChainProof, PublicationKind,
};

use super::*;

#[derive(Debug, Clone)]
pub struct PostV1 {
    event: events_v1::PostCreatedEvent,
    value: values_v1::PostWithSigValue,
}

impl PostV1 {
    pub fn new(event: events_v1::PostCreatedEvent, value: values_v1::PostWithSigValue) -> Self {
        Self { event, value }
    }
}

impl PublicationVerifier for PostV1 {
    fn kind(&self) -> PublicationKind {
        PublicationKind::Post
    }

    fn version(&self) -> LensVersion {
        LensVersion::V1
    }

    fn signed_profile_id(&self) -> U256 {
        self.value.profile_id
    }

    fn nonce(&self) -> U256 {
        self.value.nonce
    }

    fn deadline(&self) -> U256 {
        self.value.deadline
    }

    fn signed_pointer(&self) -> Option<(U256, U256)> {
        None
    }

    fn event_ids(&self) -> (U256, U256) {
        (self.event.profile_id, self.event.pub_id)
    }

    fn event_timestamp(&self) -> u64 {
        self.event.timestamp
    }

    fn verify_signer(&self, proof: &PublicationChainProof) -> Result<Address, ProofError> {
        recover_signer(proof, &sol_v1::PostWithSig::from(&self.value))
    }

    fn verify_event_with_typed_data(
        &self,
        _signer: Address,
        counter: U256,
    ) -> Result<(), ProofError> {
        let (e, v) = (&self.event, &self.value);
        ensure_field("profileId", &v.profile_id, &e.profile_id)?;
        ensure_next_pub_id(e.pub_id, counter)?;
        ensure_field("contentURI", &v.content_uri, &e.content_uri)?;
        ensure_field("collectModule", &v.collect_module, &e.collect_module)?;
        ensure_no_return_data("collectModuleReturnData", &e.collect_module_return_data)?;
        ensure_field("referenceModule", &v.reference_module, &e.reference_module)?;
        ensure_no_return_data("referenceModuleReturnData", &e.reference_module_return_data)
    }

    fn hub_calldata(&self, _signer: Address, signature: &Signature) -> Bytes {
        hub::v1::post_with_sig(&self.value, signature)
    }
}

#[derive(Debug, Clone)]
pub struct PostV2 {
    event: events_v2::PostCreatedEvent,
    value: values_v2::PostValue,
}

impl PostV2 {
    pub fn new(event: events_v2::PostCreatedEvent, value: values_v2::PostValue) -> Self {
        Self { event, value }
    }
}

impl PublicationVerifier for PostV2 {
    fn kind(&self) -> PublicationKind {
        PublicationKind::Post
    }

    fn version(&self) -> LensVersion {
        LensVersion::V2
    }

    fn signed_profile_id(&self) -> U256 {
        self.value.profile_id
    }

    fn nonce(&self) -> U256 {
        self.value.nonce
    }

    fn deadline(&self) -> U256 {
        self.value.deadline
    }

    fn signed_pointer(&self) -> Option<(U256, U256)> {
        None
    }

    fn event_ids(&self) -> (U256, U256) {
        (self.event.post_params.profile_id, self.event.pub_id_assigned)
    }

    fn event_timestamp(&self) -> u64 {
        self.event.timestamp
    }

    fn verify_signer(&self, proof: &PublicationChainProof) -> Result<Address, ProofError> {
        recover_signer(proof, &sol_v2::Post::from(&self.value))
    }

    fn verify_event_with_typed_data(
        &self,
        signer: Address,
        counter: U256,
    ) -> Result<(), ProofError> {
        let (e, v) = (&self.event, &self.value);
        let p = &e.post_params;
        ensure_field("profileId", &v.profile_id, &p.profile_id)?;
        ensure_next_pub_id(e.pub_id_assigned, counter)?;
        ensure_field("contentURI", &v.content_uri, &p.content_uri)?;
        ensure_field("actionModules", &v.action_modules, &p.action_modules)?;
        ensure_field(
            "actionModulesInitDatas",
            &v.action_modules_init_datas,
            &p.action_modules_init_datas,
        )?;
        ensure_field("referenceModule", &v.reference_module, &p.reference_module)?;
        ensure_field(
            "referenceModuleInitData",
            &v.reference_module_init_data,
            &p.reference_module_init_data,
        )?;
        ensure_no_return_datas(
            "actionModulesInitReturnDatas",
            &e.action_modules_init_return_datas,
        )?;
        ensure_no_return_data(
            "referenceModuleInitReturnData",
            &e.reference_module_init_return_data,
        )?;
        ensure_field("transactionExecutor", &signer, &e.transaction_executor)
    }

    fn hub_calldata(&self, signer: Address, signature: &Signature) -> Bytes {
        hub::v2::post_with_sig(&self.value, signer, signature)
    }
}
