use alloy_primitives::{address, B256};
use alloy_signer_local::PrivateKeySigner;
use momoka_chain::HubAddresses;

pub const CHAIN_ID: u64 = 137;

pub fn hubs() -> HubAddresses {
    HubAddresses {
        v1: address!("db46d1dc155634fbc732f92e853b10b288ad5a1d"),
        v2: address!("c0ffee254729296a45a3885639ac7e10f9d54979"),
    }
}

fn key(byte: u8) -> PrivateKeySigner {
    PrivateKeySigner::from_bytes(&B256::repeat_byte(byte)).expect("valid test key")
}

/// Owner of every fixture profile.
pub fn owner_key() -> PrivateKeySigner {
    key(0x11)
}

/// Approved executor of every fixture profile.
pub fn delegate_key() -> PrivateKeySigner {
    key(0x22)
}

/// Neither owner nor delegate of anything.
pub fn stranger_key() -> PrivateKeySigner {
    key(0x33)
}

/// Whitelisted bundle submitter.
pub fn submitter_key() -> PrivateKeySigner {
    key(0x44)
}

/// Trusted timestamp authority.
pub fn authority_key() -> PrivateKeySigner {
    key(0x55)
}
