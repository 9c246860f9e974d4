use std::collections::BTreeMap;

use alloy_sol_types::SolStruct;
use momoka_primitives::TypedDataField;

/// Builds the JSON `types` schema of `T` the way a wallet would send it.
pub fn schema_for<T: SolStruct>() -> BTreeMap<String, Vec<TypedDataField>> {
    let encoded = T::eip712_encode_type();
    let mut types = BTreeMap::new();

    for def in encoded.split_inclusive(')') {
        let Some((name, rest)) = def.split_once('(') else {
            continue;
        };
        let fields = rest
            .trim_end_matches(')')
            .split(',')
            .filter(|f| !f.is_empty())
            .filter_map(|f| f.split_once(' '))
            .map(|(ty, name)| TypedDataField::new(name, ty))
            .collect();
        types.insert(name.to_owned(), fields);
    }

    types.insert(
        "EIP712Domain".to_owned(),
        vec![
            TypedDataField::new("name", "string"),
            TypedDataField::new("version", "string"),
            TypedDataField::new("chainId", "uint256"),
            TypedDataField::new("verifyingContract", "address"),
        ],
    );
    types
}
