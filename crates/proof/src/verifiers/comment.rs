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
pub struct CommentV1 {
    event: events_v1::CommentCreatedEvent,
    value: values_v1::CommentWithSigValue,
}

impl CommentV1 {
    pub fn new(
        event: events_v1::CommentCreatedEvent,
        value: values_v1::CommentWithSigValue,
    ) -> Self {
        Self { event, value }
    }
}

impl PublicationVerifier for CommentV1 {
    fn kind(&self) -> PublicationKind {
        PublicationKind::Comment
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
        Some((self.value.profile_id_pointed, self.value.pub_id_pointed))
    }

    fn event_ids(&self) -> (U256, U256) {
        (self.event.profile_id, self.event.pub_id)
    }

    fn event_timestamp(&self) -> u64 {
        self.event.timestamp
    }

    fn verify_signer(&self, proof: &PublicationChainProof) -> Result<Address, ProofError> {
        recover_signer(proof, &sol_v1::CommentWithSig::from(&self.value))
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
        ensure_field("profileIdPointed", &v.profile_id_pointed, &e.profile_id_pointed)?;
        ensure_field("pubIdPointed", &v.pub_id_pointed, &e.pub_id_pointed)?;
        ensure_field(
            "referenceModuleData",
            &v.reference_module_data,
            &e.reference_module_data,
        )?;
        ensure_field("collectModule", &v.collect_module, &e.collect_module)?;
        ensure_no_return_data("collectModuleReturnData", &e.collect_module_return_data)?;
        ensure_field("referenceModule", &v.reference_module, &e.reference_module)?;
        ensure_no_return_data("referenceModuleReturnData", &e.reference_module_return_data)
    }

    fn hub_calldata(&self, _signer: Address, signature: &Signature) -> Bytes {
        hub::v1::comment_with_sig(&self.value, signature)
    }
}

#[derive(Debug, Clone)]
pub struct CommentV2 {
    event: events_v2::CommentCreatedEvent,
    value: values_v2::ReferencePubValue,
}

impl CommentV2 {
    pub fn new(event: events_v2::CommentCreatedEvent, value: values_v2::ReferencePubValue) -> Self {
        Self { event, value }
    }
}

/// Field table shared by comments and quotes, which sign the same layout.
pub(super) fn check_reference_params(
    v: &values_v2::ReferencePubValue,
    p: &events_v2::ReferencePubParams,
) -> Result<(), ProofError> {
    ensure_field("profileId", &v.profile_id, &p.profile_id)?;
    ensure_field("contentURI", &v.content_uri, &p.content_uri)?;
    ensure_field("pointedProfileId", &v.pointed_profile_id, &p.pointed_profile_id)?;
    ensure_field("pointedPubId", &v.pointed_pub_id, &p.pointed_pub_id)?;
    ensure_field(
        "referrerProfileIds",
        &v.referrer_profile_ids,
        &p.referrer_profile_ids,
    )?;
    ensure_field("referrerPubIds", &v.referrer_pub_ids, &p.referrer_pub_ids)?;
    ensure_field(
        "referenceModuleData",
        &v.reference_module_data,
        &p.reference_module_data,
    )?;
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
    )
}

impl PublicationVerifier for CommentV2 {
    fn kind(&self) -> PublicationKind {
        PublicationKind::Comment
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
        Some((self.value.pointed_profile_id, self.value.pointed_pub_id))
    }

    fn event_ids(&self) -> (U256, U256) {
        (self.event.comment_params.profile_id, self.event.pub_id_assigned)
    }

    fn event_timestamp(&self) -> u64 {
        self.event.timestamp
    }

    fn verify_signer(&self, proof: &PublicationChainProof) -> Result<Address, ProofError> {
        recover_signer(proof, &sol_v2::Comment::from(&self.value))
    }

    fn verify_event_with_typed_data(
        &self,
        signer: Address,
        counter: U256,
    ) -> Result<(), ProofError> {
        let e = &self.event;
        check_reference_params(&self.value, &e.comment_params)?;
        ensure_next_pub_id(e.pub_id_assigned, counter)?;
        ensure_no_return_data("referenceModuleReturnData", &e.reference_module_return_data)?;
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
        hub::v2::comment_with_sig(&self.value, signer, signature)
    }
}

#[cfg(test)]
mod tests {
    use momoka_test_utils::PublicationFixture;
    use serde_json::json;

    use super::*;
    use crate::DaPublication;

    #[test]
    fn test_comment_v1_pointer_fields_are_checked() {
        let built = PublicationFixture::comment_v1().build();
        for field in ["profileIdPointed", "pubIdPointed"] {
            let mut record = built.record.clone();
            record.event[field] = json!("0x63");
            let res = DaPublication::load(&record)
                .unwrap()
                .verifier()
                .verify_event_with_typed_data(built.signer, built.counter);
            assert_eq!(res, Err(ProofError::EventMismatch), "field {field}");
        }
    }

    #[test]
    fn test_comment_v2_referrers_compared_element_wise() {
        let built = PublicationFixture::comment_v2().build();
        let mut record = built.record.clone();
        record.event["commentParams"]["referrerProfileIds"] = json!(["0x01"]);

        let publication = DaPublication::load(&record).unwrap();
        assert_eq!(
            publication
                .verifier()
                .verify_event_with_typed_data(built.signer, built.counter),
            Err(ProofError::EventMismatch)
        );
    }

    #[test]
    fn test_comment_v2_rejects_module_return_data() {
        let built = PublicationFixture::comment_v2().build();
        let mut record = built.record.clone();
        record.event["referenceModuleInitReturnData"] = json!("0xdead");

        let publication = DaPublication::load(&record).unwrap();
        assert_eq!(
            publication
                .verifier()
                .verify_event_with_typed_data(built.signer, built.counter),
            Err(ProofError::EventMismatch)
        );
    }
}
