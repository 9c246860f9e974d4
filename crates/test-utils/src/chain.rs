use std::collections::BTreeMap;

use alloy_primitives::U256;
use momoka_chain::{BlockRecord, ProfileState, PublicationEntry, StaticChain};

use crate::{delegate_key, BuiltPublication};

/// Assembles a [`StaticChain`] under which built fixtures verify.
#[derive(Debug, Default)]
pub struct ChainBuilder {
    blocks: BTreeMap<u64, u64>,
    profiles: Vec<ProfileState>,
    publications: Vec<PublicationEntry>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the proof block, the block after it, and the signing profile's
    /// state as of the proof block.
    pub fn with_publication(mut self, built: &BuiltPublication) -> Self {
        for block in [built.block, built.next_block] {
            self.blocks.insert(block.number, block.timestamp);
        }
        self.profiles.push(ProfileState {
            profile_id: built.profile_id,
            from_block: built.block.number,
            owner: built.owner,
            nonce: built.nonce,
            pub_count: built.counter,
            delegates: vec![delegate_key().address()],
        });
        self
    }

    pub fn with_block(mut self, number: u64, timestamp: u64) -> Self {
        self.blocks.insert(number, timestamp);
        self
    }

    pub fn with_profile(mut self, profile: ProfileState) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Records a native on-chain publication.
    pub fn with_on_chain_publication(mut self, profile_id: u64, pub_id: u64, block: u64) -> Self {
        self.publications.push(PublicationEntry {
            profile_id: U256::from(profile_id),
            pub_id: U256::from(pub_id),
            block_number: block,
        });
        self
    }

    pub fn build(self) -> StaticChain {
        let blocks = self
            .blocks
            .into_iter()
            .map(|(number, timestamp)| BlockRecord { number, timestamp })
            .collect();
        StaticChain::new(blocks, self.profiles, self.publications).expect("blocks are unique")
    }
}
