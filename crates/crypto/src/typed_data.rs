//! EIP-712 signer recovery for hub typed data.
//!
//! The signed struct layouts are fixed by the hub contracts and declared here
//! with [`sol!`](alloy_sol_types::sol). The schema that accompanies a
//! publication must encode to exactly the same type string, otherwise the
//! payload is treated as malformed.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet},
};

use alloy_primitives::{Address, Signature, B256};
use alloy_sol_types::{Eip712Domain, SolStruct};
use momoka_primitives::{TypedDataDomain, TypedDataEnvelope, TypedDataField};

use crate::TypedDataError;

/// Domain type entry that wallets include in the schema; never part of a struct encoding.
const EIP712_DOMAIN_TYPE: &str = "EIP712Domain";

/// V1 `*WithSig` structs.
pub mod v1 {
    use momoka_primitives::typed_values::v1 as values;

    alloy_sol_types::sol! {
        #[derive(Debug, PartialEq, Eq)]
        struct PostWithSig {
            uint256 profileId;
            string contentURI;
            address collectModule;
            bytes collectModuleInitData;
            address referenceModule;
            bytes referenceModuleInitData;
            uint256 nonce;
            uint256 deadline;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct CommentWithSig {
            uint256 profileId;
            string contentURI;
            uint256 profileIdPointed;
            uint256 pubIdPointed;
            bytes referenceModuleData;
            address collectModule;
            bytes collectModuleInitData;
            address referenceModule;
            bytes referenceModuleInitData;
            uint256 nonce;
            uint256 deadline;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct MirrorWithSig {
            uint256 profileId;
            uint256 profileIdPointed;
            uint256 pubIdPointed;
            bytes referenceModuleData;
            address referenceModule;
            bytes referenceModuleInitData;
            uint256 nonce;
            uint256 deadline;
        }
    }

    impl From<&values::PostWithSigValue> for PostWithSig {
        fn from(v: &values::PostWithSigValue) -> Self {
            Self {
                profileId: v.profile_id,
                contentURI: v.content_uri.clone(),
                collectModule: v.collect_module,
                collectModuleInitData: v.collect_module_init_data.clone(),
                referenceModule: v.reference_module,
                referenceModuleInitData: v.reference_module_init_data.clone(),
                nonce: v.nonce,
                deadline: v.deadline,
            }
        }
    }

    impl From<&values::CommentWithSigValue> for CommentWithSig {
        fn from(v: &values::CommentWithSigValue) -> Self {
            Self {
                profileId: v.profile_id,
                contentURI: v.content_uri.clone(),
                profileIdPointed: v.profile_id_pointed,
                pubIdPointed: v.pub_id_pointed,
                referenceModuleData: v.reference_module_data.clone(),
                collectModule: v.collect_module,
                collectModuleInitData: v.collect_module_init_data.clone(),
                referenceModule: v.reference_module,
                referenceModuleInitData: v.reference_module_init_data.clone(),
                nonce: v.nonce,
                deadline: v.deadline,
            }
        }
    }

    impl From<&values::MirrorWithSigValue> for MirrorWithSig {
        fn from(v: &values::MirrorWithSigValue) -> Self {
            Self {
                profileId: v.profile_id,
                profileIdPointed: v.profile_id_pointed,
                pubIdPointed: v.pub_id_pointed,
                referenceModuleData: v.reference_module_data.clone(),
                referenceModule: v.reference_module,
                referenceModuleInitData: v.reference_module_init_data.clone(),
                nonce: v.nonce,
                deadline: v.deadline,
            }
        }
    }
}

/// V2 structs.
pub mod v2 {
    use momoka_primitives::typed_values::v2 as values;

    alloy_sol_types::sol! {
        #[derive(Debug, PartialEq, Eq)]
        struct Post {
            uint256 profileId;
            string contentURI;
            address[] actionModules;
            bytes[] actionModulesInitDatas;
            address referenceModule;
            bytes referenceModuleInitData;
            uint256 nonce;
            uint256 deadline;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct Comment {
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
            uint256 nonce;
            uint256 deadline;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct Mirror {
            uint256 profileId;
            string metadataURI;
            uint256 pointedProfileId;
            uint256 pointedPubId;
            uint256[] referrerProfileIds;
            uint256[] referrerPubIds;
            bytes referenceModuleData;
            uint256 nonce;
            uint256 deadline;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct Quote {
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
            uint256 nonce;
            uint256 deadline;
        }
    }

    impl From<&values::PostValue> for Post {
        fn from(v: &values::PostValue) -> Self {
            Self {
                profileId: v.profile_id,
                contentURI: v.content_uri.clone(),
                actionModules: v.action_modules.clone(),
                actionModulesInitDatas: v.action_modules_init_datas.clone(),
                referenceModule: v.reference_module,
                referenceModuleInitData: v.reference_module_init_data.clone(),
                nonce: v.nonce,
                deadline: v.deadline,
            }
        }
    }

    impl From<&values::ReferencePubValue> for Comment {
        fn from(v: &values::ReferencePubValue) -> Self {
            Self {
                profileId: v.profile_id,
                contentURI: v.content_uri.clone(),
                pointedProfileId: v.pointed_profile_id,
                pointedPubId: v.pointed_pub_id,
                referrerProfileIds: v.referrer_profile_ids.clone(),
                referrerPubIds: v.referrer_pub_ids.clone(),
                referenceModuleData: v.reference_module_data.clone(),
                actionModules: v.action_modules.clone(),
                actionModulesInitDatas: v.action_modules_init_datas.clone(),
                referenceModule: v.reference_module,
                referenceModuleInitData: v.reference_module_init_data.clone(),
                nonce: v.nonce,
                deadline: v.deadline,
            }
        }
    }

    impl From<&values::ReferencePubValue> for Quote {
        fn from(v: &values::ReferencePubValue) -> Self {
            Self {
                profileId: v.profile_id,
                contentURI: v.content_uri.clone(),
                pointedProfileId: v.pointed_profile_id,
                pointedPubId: v.pointed_pub_id,
                referrerProfileIds: v.referrer_profile_ids.clone(),
                referrerPubIds: v.referrer_pub_ids.clone(),
                referenceModuleData: v.reference_module_data.clone(),
                actionModules: v.action_modules.clone(),
                actionModulesInitDatas: v.action_modules_init_datas.clone(),
                referenceModule: v.reference_module,
                referenceModuleInitData: v.reference_module_init_data.clone(),
                nonce: v.nonce,
                deadline: v.deadline,
            }
        }
    }

    impl From<&values::MirrorValue> for Mirror {
        fn from(v: &values::MirrorValue) -> Self {
            Self {
                profileId: v.profile_id,
                metadataURI: v.metadata_uri.clone(),
                pointedProfileId: v.pointed_profile_id,
                pointedPubId: v.pointed_pub_id,
                referrerProfileIds: v.referrer_profile_ids.clone(),
                referrerPubIds: v.referrer_pub_ids.clone(),
                referenceModuleData: v.reference_module_data.clone(),
                nonce: v.nonce,
                deadline: v.deadline,
            }
        }
    }
}

/// Builds the EIP-712 domain separator input from the signed domain.
pub fn eip712_domain(domain: &TypedDataDomain) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Owned(domain.name.clone())),
        Some(Cow::Owned(domain.version.clone())),
        Some(domain.chain_id),
        Some(domain.verifying_contract),
        None,
    )
}

/// Computes the EIP-712 `encodeType` string for `primary` from a JSON schema.
///
/// Referenced struct types are appended in alphabetical order, as the standard
/// requires. Array suffixes are stripped when resolving references.
pub fn encode_type_from_schema(
    types: &BTreeMap<String, Vec<TypedDataField>>,
    primary: &str,
) -> Result<String, TypedDataError> {
    if !types.contains_key(primary) {
        return Err(TypedDataError::MissingPrimaryType(primary.to_owned()));
    }

    let mut deps = BTreeSet::new();
    collect_struct_deps(types, primary, &mut deps)?;
    deps.remove(primary);

    let mut out = encode_struct(primary, &types[primary]);
    for dep in deps {
        out.push_str(&encode_struct(dep, &types[dep]));
    }
    Ok(out)
}

fn encode_struct(name: &str, fields: &[TypedDataField]) -> String {
    let members = fields
        .iter()
        .map(|f| format!("{} {}", f.ty, f.name))
        .collect::<Vec<_>>()
        .join(",");
    format!("{name}({members})")
}

fn collect_struct_deps<'a>(
    types: &'a BTreeMap<String, Vec<TypedDataField>>,
    name: &str,
    deps: &mut BTreeSet<&'a str>,
) -> Result<(), TypedDataError> {
    let (key, fields) = types
        .get_key_value(name)
        .ok_or_else(|| TypedDataError::UndefinedType(name.to_owned()))?;
    if !deps.insert(key.as_str()) {
        return Ok(());
    }

    for field in fields {
        let base = field.ty.split('[').next().unwrap_or(&field.ty);
        if types.contains_key(base) && base != EIP712_DOMAIN_TYPE {
            collect_struct_deps(types, base, deps)?;
        } else if starts_uppercase(base) {
            // Elementary solidity types are all lowercase.
            return Err(TypedDataError::UndefinedType(base.to_owned()));
        }
    }
    Ok(())
}

fn starts_uppercase(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Checks the schema against `T` and returns the EIP-712 signing hash of `value`.
pub fn typed_data_signing_hash<T: SolStruct>(
    envelope: &TypedDataEnvelope,
    value: &T,
) -> Result<B256, TypedDataError> {
    let expected = T::eip712_encode_type();
    let found = encode_type_from_schema(&envelope.types, T::NAME)?;
    if found != expected {
        return Err(TypedDataError::SchemaMismatch {
            expected: expected.into_owned(),
            found,
        });
    }

    Ok(value.eip712_signing_hash(&eip712_domain(&envelope.domain)))
}

/// Recovers the address that signed `value` under the envelope's domain.
///
/// Pure and deterministic: identical inputs always give the identical result.
pub fn recover_typed_data_signer<T: SolStruct>(
    envelope: &TypedDataEnvelope,
    value: &T,
    signature: &[u8],
) -> Result<Address, TypedDataError> {
    let hash = typed_data_signing_hash(envelope, value)?;
    let signature = Signature::from_raw(signature)?;
    Ok(signature.recover_address_from_prehash(&hash)?)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, Bytes, U256};
    use alloy_signer::SignerSync;
    use alloy_signer_local::PrivateKeySigner;
    use momoka_primitives::typed_values::v2::PostValue;

    use super::*;

    fn post_fields() -> Vec<TypedDataField> {
        [
            ("profileId", "uint256"),
            ("contentURI", "string"),
            ("actionModules", "address[]"),
            ("actionModulesInitDatas", "bytes[]"),
            ("referenceModule", "address"),
            ("referenceModuleInitData", "bytes"),
            ("nonce", "uint256"),
            ("deadline", "uint256"),
        ]
        .into_iter()
        .map(|(n, t)| TypedDataField::new(n, t))
        .collect()
    }

    fn envelope(value: &PostValue) -> TypedDataEnvelope {
        TypedDataEnvelope {
            domain: TypedDataDomain {
                name: "Lens Protocol Profiles".to_owned(),
                version: "2".to_owned(),
                chain_id: U256::from(137),
                verifying_contract: address!("db46d1dc155634fbc732f92e853b10b288ad5a1d"),
            },
            types: BTreeMap::from([("Post".to_owned(), post_fields())]),
            value: serde_json::to_value(value).unwrap(),
        }
    }

    fn post_value() -> PostValue {
        PostValue {
            profile_id: U256::from(1),
            content_uri: "ar://abc".to_owned(),
            action_modules: vec![],
            action_modules_init_datas: vec![],
            reference_module: Address::ZERO,
            reference_module_init_data: Bytes::new(),
            nonce: U256::from(3),
            deadline: U256::from(1_800_000_000u64),
        }
    }

    #[test]
    fn test_schema_encodes_like_sol_struct() {
        let value = post_value();
        let env = envelope(&value);
        let encoded = encode_type_from_schema(&env.types, "Post").unwrap();
        assert_eq!(encoded, v2::Post::eip712_encode_type());
    }

    #[test]
    fn test_domain_entry_is_ignored() {
        let value = post_value();
        let mut env = envelope(&value);
        env.types.insert(
            EIP712_DOMAIN_TYPE.to_owned(),
            vec![TypedDataField::new("name", "string")],
        );
        let encoded = encode_type_from_schema(&env.types, "Post").unwrap();
        assert_eq!(encoded, v2::Post::eip712_encode_type());
    }

    #[test]
    fn test_recover_round_trip_is_deterministic() {
        let signer = PrivateKeySigner::random();
        let value = post_value();
        let env = envelope(&value);
        let sol_value = v2::Post::from(&value);

        let hash = typed_data_signing_hash(&env, &sol_value).unwrap();
        let sig = signer.sign_hash_sync(&hash).unwrap();
        let sig_bytes = sig.as_bytes();

        for _ in 0..3 {
            let recovered = recover_typed_data_signer(&env, &sol_value, &sig_bytes).unwrap();
            assert_eq!(recovered, signer.address());
        }
    }

    #[test]
    fn test_wrong_field_type_is_schema_mismatch() {
        let value = post_value();
        let mut env = envelope(&value);
        env.types.get_mut("Post").unwrap()[0].ty = "uint64".to_owned();
        let err = recover_typed_data_signer(&env, &v2::Post::from(&value), &[0u8; 65]).unwrap_err();
        assert!(matches!(err, TypedDataError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_missing_primary_type() {
        let value = post_value();
        let mut env = envelope(&value);
        env.types.clear();
        let err = recover_typed_data_signer(&env, &v2::Post::from(&value), &[0u8; 65]).unwrap_err();
        assert!(matches!(err, TypedDataError::MissingPrimaryType(_)));
    }

    #[test]
    fn test_undefined_struct_reference() {
        let value = post_value();
        let mut env = envelope(&value);
        env.types
            .get_mut("Post")
            .unwrap()
            .push(TypedDataField::new("extra", "Extra"));
        let err = encode_type_from_schema(&env.types, "Post").unwrap_err();
        assert!(matches!(err, TypedDataError::UndefinedType(_)));
    }

    #[test]
    fn test_short_signature_is_rejected() {
        let value = post_value();
        let env = envelope(&value);
        let err = recover_typed_data_signer(&env, &v2::Post::from(&value), &[1u8; 10]).unwrap_err();
        assert!(matches!(err, TypedDataError::InvalidSignature(_)));
    }
}
