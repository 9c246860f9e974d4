use alloy_primitives::{Address, Bytes, Signature, U256};
use momoka_chain::hub;
use momoka_crypto::typed_data::v2 as sol_v2;
use momoka_primitives::{
    events::v2 as events_v2, typed_values::v2 as values_v2, LensVersion, ProofError,
    PublicationChainProof, PublicationKind,
};

use super::{comment::check_reference_params, *};

/// Quotes only exist from V2 on.
#[derive(Debug, Clone)]
pub struct QuoteV2 {
    event: events_v2::QuoteCreatedEvent,
    value: values_v2::ReferencePubValue,
}

impl QuoteV2 {
    pub fn new(event: events_v2::QuoteCreatedEvent, value: values_v2::ReferencePubValue) -> Self {
        Self { event, value }
    }
}

impl PublicationVerifier for QuoteV2 {
    fn kind(&self) -> PublicationKind {
        PublicationKind::Quote
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
        (self.event.quote_params.profile_id, self.event.pub_id_assigned)
    }

    fn event_timestamp(&self) -> u64 {
        self.event.timestamp
    }

    fn verify_signer(&self, proof: &PublicationChainProof) -> Result<Address, ProofError> {
        recover_signer(proof, &sol_v2::Quote::from(&self.value))
    }

    fn verify_event_with_typed_data(
        &self,
        signer: Address,
        counter: U256,
    ) -> Result<(), ProofError> {
        let e = &self.event;
        check_reference_params(&self.value, &e.quote_params)?;
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
        hub::v2::quote_with_sig(&self.value, signer, signature)
    }
}
