//! Personal-message attestations attached to a bundle.
//!
//! Both messages are the Solidity `abi.encode` of a fixed tuple and are signed
//! with the EIP-191 `personal_sign` prefix.

use alloy_primitives::{Address, Bytes, Signature};
use alloy_sol_types::SolValue;
use momoka_primitives::{PublicationRecord, TimestampProof};

use crate::AttestationError;

/// Message the submitter signs when uploading the bundle.
///
/// Layout: `(string daId, string publicationId, bytes chainSignature, uint64 blockNumber, string pointerLocation)`.
/// A missing pointer is encoded as the empty string.
pub fn submitter_message(record: &PublicationRecord) -> Vec<u8> {
    let this = &record.chain_proofs.this_publication;
    (
        record.data_availability_id.clone(),
        record.publication_id.clone(),
        this.signature.clone(),
        this.block_number,
        record.pointer_location().unwrap_or_default().to_owned(),
    )
        .abi_encode_params()
}

/// Message a timestamp authority signs for an upload.
///
/// Layout: `(string daId, string type, string version, address submitter, uint64 timestamp)`.
pub fn timestamp_message(proof: &TimestampProof) -> Vec<u8> {
    (
        proof.data_availability_id.clone(),
        proof.kind.as_str().to_owned(),
        proof.version.as_str().to_owned(),
        proof.submitter,
        proof.timestamp,
    )
        .abi_encode_params()
}

fn recover_personal(message: &[u8], signature: &Bytes) -> Result<Address, AttestationError> {
    if signature.is_empty() {
        return Err(AttestationError::Missing);
    }
    let signature = Signature::from_raw(signature)?;
    Ok(signature.recover_address_from_msg(message)?)
}

/// Recovers the address that signed the bundle attestation.
pub fn recover_submitter(record: &PublicationRecord) -> Result<Address, AttestationError> {
    let signature = record.signature.as_ref().ok_or(AttestationError::Missing)?;
    recover_personal(&submitter_message(record), signature)
}

/// Recovers the authority that signed the timestamp proof.
pub fn recover_timestamp_authority(proof: &TimestampProof) -> Result<Address, AttestationError> {
    recover_personal(&timestamp_message(proof), &proof.signature)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use alloy_primitives::U256;
    use alloy_signer::SignerSync;
    use alloy_signer_local::PrivateKeySigner;
    use momoka_primitives::{
        ChainProofs, LensVersion, PointerKind, PointerProof, PublicationChainProof,
        PublicationKind, TypedDataDomain, TypedDataEnvelope,
    };

    use super::*;

    fn record(pointer: Option<&str>) -> PublicationRecord {
        PublicationRecord {
            data_availability_id: "3b2c8f9e-5a1d".to_owned(),
            kind: PublicationKind::Comment,
            version: LensVersion::V2,
            publication_id: "0x01-0x02-DA-3b2c8f9e".to_owned(),
            signature: None,
            event: serde_json::Value::Null,
            chain_proofs: ChainProofs {
                this_publication: PublicationChainProof {
                    typed_data: TypedDataEnvelope {
                        domain: TypedDataDomain {
                            name: "Lens Protocol Profiles".to_owned(),
                            version: "2".to_owned(),
                            chain_id: U256::from(137),
                            verifying_contract: Address::ZERO,
                        },
                        types: BTreeMap::new(),
                        value: serde_json::Value::Null,
                    },
                    signature: Bytes::from(vec![7u8; 65]),
                    signed_by_delegate: false,
                    block_number: 42,
                    block_hash: None,
                },
                pointer: pointer.map(|location| PointerProof {
                    location: location.to_owned(),
                    kind: PointerKind::OnDa,
                }),
            },
            timestamp_proofs: TimestampProof {
                kind: PublicationKind::Comment,
                version: LensVersion::V2,
                data_availability_id: "3b2c8f9e-5a1d".to_owned(),
                submitter: Address::ZERO,
                timestamp: 1_700_000_000_123,
                signature: Bytes::new(),
            },
        }
    }

    #[test]
    fn test_submitter_round_trip() {
        let submitter = PrivateKeySigner::random();
        let mut rec = record(Some("aaaa-bbbb"));
        let sig = submitter
            .sign_message_sync(&submitter_message(&rec))
            .unwrap();
        rec.signature = Some(Bytes::from(sig.as_bytes().to_vec()));

        assert_eq!(recover_submitter(&rec).unwrap(), submitter.address());
    }

    #[test]
    fn test_pointer_is_bound_by_submitter_signature() {
        let submitter = PrivateKeySigner::random();
        let mut rec = record(Some("aaaa-bbbb"));
        let sig = submitter
            .sign_message_sync(&submitter_message(&rec))
            .unwrap();
        rec.signature = Some(Bytes::from(sig.as_bytes().to_vec()));
        rec.chain_proofs.pointer = None;

        assert_ne!(recover_submitter(&rec).unwrap(), submitter.address());
    }

    #[test]
    fn test_missing_submitter_signature() {
        let rec = record(None);
        assert!(matches!(
            recover_submitter(&rec),
            Err(AttestationError::Missing)
        ));
    }

    #[test]
    fn test_timestamp_authority_round_trip() {
        let authority = PrivateKeySigner::random();
        let mut proof = record(None).timestamp_proofs;
        let sig = authority
            .sign_message_sync(&timestamp_message(&proof))
            .unwrap();
        proof.signature = Bytes::from(sig.as_bytes().to_vec());

        assert_eq!(
            recover_timestamp_authority(&proof).unwrap(),
            authority.address()
        );

        proof.timestamp += 1;
        assert_ne!(
            recover_timestamp_authority(&proof).unwrap(),
            authority.address()
        );
    }

    #[test]
    fn test_garbage_timestamp_signature() {
        let mut proof = record(None).timestamp_proofs;
        proof.signature = Bytes::from(vec![1u8, 2, 3]);
        assert!(matches!(
            recover_timestamp_authority(&proof),
            Err(AttestationError::InvalidSignature(_))
        ));
    }
}
