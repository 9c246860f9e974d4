//! Hub entry points used to replay a publication as a transaction.
//!
//! A DA publication never hits the chain, but it must be a call the hub would
//! have accepted at the proof block. The payload carries both the exact
//! calldata of the `*WithSig` entry point and a decoded [`SimulationRequest`]
//! so backends that do not execute EVM code can still evaluate it.

use alloy_primitives::{Address, Bytes, Signature, B256, U256};
use alloy_sol_types::{sol, SolCall};
use momoka_primitives::{
    typed_values::{v1 as values_v1, v2 as values_v2},
    LensVersion, PublicationKind,
};
use serde::{Deserialize, Serialize};

sol! {
    interface ILensHubV1 {
        struct EIP712Signature {
            uint8 v;
            bytes32 r;
            bytes32 s;
            uint256 deadline;
        }

        struct PostWithSigData {
            uint256 profileId;
            string contentURI;
            address collectModule;
            bytes collectModuleInitData;
            address referenceModule;
            bytes referenceModuleInitData;
            EIP712Signature sig;
        }

        struct CommentWithSigData {
            uint256 profileId;
            string contentURI;
            uint256 profileIdPointed;
            uint256 pubIdPointed;
            bytes referenceModuleData;
            address collectModule;
            bytes collectModuleInitData;
            address referenceModule;
            bytes referenceModuleInitData;
            EIP712Signature sig;
        }

        struct MirrorWithSigData {
            uint256 profileId;
            uint256 profileIdPointed;
            uint256 pubIdPointed;
            bytes referenceModuleData;
            address referenceModule;
            bytes referenceModuleInitData;
            EIP712Signature sig;
        }

        function postWithSig(PostWithSigData calldata vars) external returns (uint256);
        function commentWithSig(CommentWithSigData calldata vars) external returns (uint256);
        function mirrorWithSig(MirrorWithSigData calldata vars) external returns (uint256);
    }
}

sol! {
    interface ILensHubV2 {
        struct EIP712Signature {
            address signer;
            uint8 v;
            bytes32 r;
            bytes32 s;
            uint256 deadline;
        }

        struct PostParams {
            uint256 profileId;
            string contentURI;
            address[] actionModules;
            bytes[] actionModulesInitDatas;
            address referenceModule;
            bytes referenceModuleInitData;
        }

        struct CommentParams {
            uint256 profileId;
            string contentURI;
            uint256 pointedProfileId;
            uint256 pointedPubId;
            uint256[] referrerProfileIds;
            uint256[] referrerPubIds;
            bytes referenceModuleData;
            address[] actionModules;
            bytes[] actionModulesInitDatas;
            address referenceModule;
            bytes referenceModuleInitData;
        }

        struct MirrorParams {
            uint256 profileId;
            string metadataURI;
            uint256 pointedProfileId;
            uint256 pointedPubId;
            uint256[] referrerProfileIds;
            uint256[] referrerPubIds;
            bytes referenceModuleData;
        }

        struct QuoteParams {
            uint256 profileId;
            string contentURI;
            uint256 pointedProfileId;
            uint256 pointedPubId;
            uint256[] referrerProfileIds;
            uint256[] referrerPubIds;
            bytes referenceModuleData;
            address[] actionModules;
            bytes[] actionModulesInitDatas;
            address referenceModule;
            bytes referenceModuleInitData;
        }

        function postWithSig(PostParams calldata postParams, EIP712Signature calldata signature) external returns (uint256);
        function commentWithSig(CommentParams calldata commentParams, EIP712Signature calldata signature) external returns (uint256);
        function mirrorWithSig(MirrorParams calldata mirrorParams, EIP712Signature calldata signature) external returns (uint256);
        function quoteWithSig(QuoteParams calldata quoteParams, EIP712Signature calldata signature) external returns (uint256);
    }
}

/// Hub deployments per protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubAddresses {
    pub v1: Address,
    pub v2: Address,
}

impl HubAddresses {
    pub fn for_version(&self, version: LensVersion) -> Address {
        match version {
            LensVersion::V1 => self.v1,
            LensVersion::V2 => self.v2,
        }
    }
}

/// Decoded view of the call a [`TxPayload`] performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRequest {
    pub kind: PublicationKind,
    pub version: LensVersion,
    pub profile_id: U256,
    /// Address recovered from the typed data signature.
    pub signer: Address,
    pub nonce: U256,
    pub deadline: U256,
}

/// A transaction ready to be simulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxPayload {
    pub to: Address,
    pub from: Address,
    pub data: Bytes,
    pub request: SimulationRequest,
}

/// Selector of the hub entry point for a publication shape, `None` for
/// combinations the hub does not have.
pub fn selector(kind: PublicationKind, version: LensVersion) -> Option<[u8; 4]> {
    use LensVersion::*;
    use PublicationKind::*;

    match (kind, version) {
        (Post, V1) => Some(ILensHubV1::postWithSigCall::SELECTOR),
        (Comment, V1) => Some(ILensHubV1::commentWithSigCall::SELECTOR),
        (Mirror, V1) => Some(ILensHubV1::mirrorWithSigCall::SELECTOR),
        (Quote, V1) => None,
        (Post, V2) => Some(ILensHubV2::postWithSigCall::SELECTOR),
        (Comment, V2) => Some(ILensHubV2::commentWithSigCall::SELECTOR),
        (Mirror, V2) => Some(ILensHubV2::mirrorWithSigCall::SELECTOR),
        (Quote, V2) => Some(ILensHubV2::quoteWithSigCall::SELECTOR),
    }
}

fn split(sig: &Signature) -> (u8, B256, B256) {
    (
        27 + u8::from(sig.v()),
        B256::from(sig.r().to_be_bytes::<32>()),
        B256::from(sig.s().to_be_bytes::<32>()),
    )
}

fn v1_sig(sig: &Signature, deadline: U256) -> ILensHubV1::EIP712Signature {
    let (v, r, s) = split(sig);
    ILensHubV1::EIP712Signature { v, r, s, deadline }
}

fn v2_sig(signer: Address, sig: &Signature, deadline: U256) -> ILensHubV2::EIP712Signature {
    let (v, r, s) = split(sig);
    ILensHubV2::EIP712Signature {
        signer,
        v,
        r,
        s,
        deadline,
    }
}

/// Calldata builders for V1 hub calls.
pub mod v1 {
    use super::*;

    pub fn post_with_sig(value: &values_v1::PostWithSigValue, sig: &Signature) -> Bytes {
        ILensHubV1::postWithSigCall {
            vars: ILensHubV1::PostWithSigData {
                profileId: value.profile_id,
                contentURI: value.content_uri.clone(),
                collectModule: value.collect_module,
                collectModuleInitData: value.collect_module_init_data.clone(),
                referenceModule: value.reference_module,
                referenceModuleInitData: value.reference_module_init_data.clone(),
                sig: v1_sig(sig, value.deadline),
            },
        }
        .abi_encode()
        .into()
    }

    pub fn comment_with_sig(value: &values_v1::CommentWithSigValue, sig: &Signature) -> Bytes {
        ILensHubV1::commentWithSigCall {
            vars: ILensHubV1::CommentWithSigData {
                profileId: value.profile_id,
                contentURI: value.content_uri.clone(),
                profileIdPointed: value.profile_id_pointed,
                pubIdPointed: value.pub_id_pointed,
                referenceModuleData: value.reference_module_data.clone(),
                collectModule: value.collect_module,
                collectModuleInitData: value.collect_module_init_data.clone(),
                referenceModule: value.reference_module,
                referenceModuleInitData: value.reference_module_init_data.clone(),
                sig: v1_sig(sig, value.deadline),
            },
        }
        .abi_encode()
        .into()
    }

    pub fn mirror_with_sig(value: &values_v1::MirrorWithSigValue, sig: &Signature) -> Bytes {
        ILensHubV1::mirrorWithSigCall {
            vars: ILensHubV1::MirrorWithSigData {
                profileId: value.profile_id,
                profileIdPointed: value.profile_id_pointed,
                pubIdPointed: value.pub_id_pointed,
                referenceModuleData: value.reference_module_data.clone(),
                referenceModule: value.reference_module,
                referenceModuleInitData: value.reference_module_init_data.clone(),
                sig: v1_sig(sig, value.deadline),
            },
        }
        .abi_encode()
        .into()
    }
}

/// Calldata builders for V2 hub calls.
pub mod v2 {
    use super::*;

    pub fn post_with_sig(value: &values_v2::PostValue, signer: Address, sig: &Signature) -> Bytes {
        ILensHubV2::postWithSigCall {
            postParams: ILensHubV2::PostParams {
                profileId: value.profile_id,
                contentURI: value.content_uri.clone(),
                actionModules: value.action_modules.clone(),
                actionModulesInitDatas: value.action_modules_init_datas.clone(),
                referenceModule: value.reference_module,
                referenceModuleInitData: value.reference_module_init_data.clone(),
            },
            signature: v2_sig(signer, sig, value.deadline),
        }
        .abi_encode()
        .into()
    }

    pub fn comment_with_sig(
        value: &values_v2::ReferencePubValue,
        signer: Address,
        sig: &Signature,
    ) -> Bytes {
        ILensHubV2::commentWithSigCall {
            commentParams: ILensHubV2::CommentParams {
                profileId: value.profile_id,
                contentURI: value.content_uri.clone(),
                pointedProfileId: value.pointed_profile_id,
                pointedPubId: value.pointed_pub_id,
                referrerProfileIds: value.referrer_profile_ids.clone(),
                referrerPubIds: value.referrer_pub_ids.clone(),
                referenceModuleData: value.reference_module_data.clone(),
                actionModules: value.action_modules.clone(),
                actionModulesInitDatas: value.action_modules_init_datas.clone(),
                referenceModule: value.reference_module,
                referenceModuleInitData: value.reference_module_init_data.clone(),
            },
            signature: v2_sig(signer, sig, value.deadline),
        }
        .abi_encode()
        .into()
    }

    pub fn quote_with_sig(
        value: &values_v2::ReferencePubValue,
        signer: Address,
        sig: &Signature,
    ) -> Bytes {
        ILensHubV2::quoteWithSigCall {
            quoteParams: ILensHubV2::QuoteParams {
                profileId: value.profile_id,
                contentURI: value.content_uri.clone(),
                pointedProfileId: value.pointed_profile_id,
                pointedPubId: value.pointed_pub_id,
                referrerProfileIds: value.referrer_profile_ids.clone(),
                referrerPubIds: value.referrer_pub_ids.clone(),
                referenceModuleData: value.reference_module_data.clone(),
                actionModules: value.action_modules.clone(),
                actionModulesInitDatas: value.action_modules_init_datas.clone(),
                referenceModule: value.reference_module,
                referenceModuleInitData: value.reference_module_init_data.clone(),
            },
            signature: v2_sig(signer, sig, value.deadline),
        }
        .abi_encode()
        .into()
    }

    pub fn mirror_with_sig(
        value: &values_v2::MirrorValue,
        signer: Address,
        sig: &Signature,
    ) -> Bytes {
        ILensHubV2::mirrorWithSigCall {
            mirrorParams: ILensHubV2::MirrorParams {
                profileId: value.profile_id,
                metadataURI: value.metadata_uri.clone(),
                pointedProfileId: value.pointed_profile_id,
                pointedPubId: value.pointed_pub_id,
                referrerProfileIds: value.referrer_profile_ids.clone(),
                referrerPubIds: value.referrer_pub_ids.clone(),
                referenceModuleData: value.reference_module_data.clone(),
            },
            signature: v2_sig(signer, sig, value.deadline),
        }
        .abi_encode()
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_value() -> values_v2::PostValue {
        values_v2::PostValue {
            profile_id: U256::from(1),
            content_uri: "ar://post".to_owned(),
            action_modules: vec![],
            action_modules_init_datas: vec![],
            reference_module: Address::ZERO,
            reference_module_init_data: Bytes::new(),
            nonce: U256::ZERO,
            deadline: U256::from(100),
        }
    }

    #[test]
    fn test_calldata_starts_with_selector() {
        let sig = Signature::new(U256::from(1), U256::from(2), true);
        let data = v2::post_with_sig(&post_value(), Address::repeat_byte(9), &sig);
        let expected = selector(PublicationKind::Post, LensVersion::V2).unwrap();
        assert_eq!(&data[..4], &expected);
    }

    #[test]
    fn test_calldata_decodes_back() {
        let sig = Signature::new(U256::from(1), U256::from(2), false);
        let signer = Address::repeat_byte(9);
        let data = v2::post_with_sig(&post_value(), signer, &sig);

        let call = ILensHubV2::postWithSigCall::abi_decode(&data).unwrap();
        assert_eq!(call.postParams.profileId, U256::from(1));
        assert_eq!(call.signature.signer, signer);
        assert_eq!(call.signature.v, 27);
        assert_eq!(call.signature.deadline, U256::from(100));
    }

    #[test]
    fn test_quote_has_no_v1_entry_point() {
        assert!(selector(PublicationKind::Quote, LensVersion::V1).is_none());
        assert_ne!(
            selector(PublicationKind::Comment, LensVersion::V2),
            selector(PublicationKind::Quote, LensVersion::V2)
        );
    }
}
