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
pub struct MirrorV1 {
    event: events_v1::MirrorCreatedEvent,
    value: values_v1::MirrorWithSigValue,
}

impl MirrorV1 {
    pub fn new(event: events_v1::MirrorCreatedEvent, value: values_v1::MirrorWithSigValue) -> Self {
        Self { event, value }
    }
}

impl PublicationVerifier for MirrorV1 {
    fn kind(&self) -> PublicationKind {
        PublicationKind::Mirror
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
        recover_signer(proof, &sol_v1::MirrorWithSig::from(&self.value))
    }

    fn verify_event_with_typed_data(
        &self,
        _signer: Address,
        counter: U256,
    ) -> Result<(), ProofError> {
        let (e, v) = (&self.event, &self.value);
        ensure_field("profileId", &v.profile_id, &e.profile_id)?;
        ensure_next_pub_id(e.pub_id, counter)?;
        ensure_field("profileIdPointed", &v.profile_id_pointed, &e.profile_id_pointed)?;
        ensure_field("pubIdPointed", &v.pub_id_pointed, &e.pub_id_pointed)?;
        ensure_field(
            "referenceModuleData",
            &v.reference_module_data,
            &e.reference_module_data,
        )?;
        ensure_field("referenceModule", &v.reference_module, &e.reference_module)?;
        ensure_no_return_data("referenceModuleReturnData", &e.reference_module_return_data)
    }

    fn hub_calldata(&self, _signer: Address, signature: &Signature) -> Bytes {
        hub::v1::mirror_with_sig(&self.value, signature)
    }
}

#[derive(Debug, Clone)]
pub struct MirrorV2 {
    event: events_v2::MirrorCreatedEvent,
    value: values_v2::MirrorValue,
}

impl MirrorV2 {
    pub fn new(event: events_v2::MirrorCreatedEvent, value: values_v2::MirrorValue) -> Self {
        Self { event, value }
    }
}

impl PublicationVerifier for MirrorV2 {
    fn kind(&self) -> PublicationKind {
        PublicationKind::Mirror
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
        (self.event.mirror_params.profile_id, self.event.pub_id_assigned)
    }

    fn event_timestamp(&self) -> u64 {
        self.event.timestamp
    }

    fn verify_signer(&self, proof: &PublicationChainProof) -> Result<Address, ProofError> {
        recover_signer(proof, &sol_v2::Mirror::from(&self.value))
    }

    fn verify_event_with_typed_data(
        &self,
        signer: Address,
        counter: U256,
    ) -> Result<(), ProofError> {
        let (e, v) = (&self.event, &self.value);
        let p = &e.mirror_params;
        ensure_field("profileId", &v.profile_id, &p.profile_id)?;
        ensure_next_pub_id(e.pub_id_assigned, counter)?;
        ensure_field("metadataURI", &v.metadata_uri, &p.metadata_uri)?;
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
        ensure_no_return_data("referenceModuleReturnData", &e.reference_module_return_data)?;
        ensure_field("transactionExecutor", &signer, &e.transaction_executor)
    }

    fn hub_calldata(&self, signer: Address, signature: &Signature) -> Bytes {
        hub::v2::mirror_with_sig(&self.value, signer, signature)
    }
}

#[cfg(test)]
mod tests {
    use momoka_test_utils::PublicationFixture;
    use serde_json::json;

    use super::*;
    use crate::DaPublication;

    #[test]
    fn test_mirror_v1_matches_fixture() {
        let built = PublicationFixture::mirror_v1().build();
        let publication = DaPublication::load(&built.record).unwrap();
        assert_eq!(
            publication
                .verifier()
                .verify_event_with_typed_data(built.signer, built.counter),
            Ok(())
        );
    }

    #[test]
    fn test_mirror_v2_metadata_uri_is_checked() {
        let built = PublicationFixture::mirror_v2().build();
        let mut record = built.record.clone();
        record.event["mirrorParams"]["metadataURI"] = json!("ar://other");

        let publication = DaPublication::load(&record).unwrap();
        assert_eq!(
            publication
                .verifier()
                .verify_event_with_typed_data(built.signer, built.counter),
            Err(ProofError::EventMismatch)
        );
    }

    #[test]
    fn test_stale_counter_is_event_mismatch() {
        let built = PublicationFixture::mirror_v2().build();
        let publication = DaPublication::load(&built.record).unwrap();
        let stale = built.counter.saturating_add(U256::from(1));
        assert_eq!(
            publication
                .verifier()
                .verify_event_with_typed_data(built.signer, stale),
            Err(ProofError::EventMismatch)
        );
    }
}
