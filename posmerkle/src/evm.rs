//! Keccak-256 primitives for trees verified by EVM contracts.
//!
//! Leaves are hashed with Keccak-256 and siblings are merged by unsigned
//! big-endian addition before hashing again, so the fold order does not
//! matter to a verifier.

use tiny_keccak::{Hasher, Keccak};

use crate::{
    MerkleTree, Result, TreeOptions,
    primitives::{Primitives, big_endian_sum},
};

/// Keccak-256 digest of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    let mut hasher = Keccak::v256();
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

/// Keccak-256 digests combined by big-endian addition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keccak256Additive;

impl Primitives for Keccak256Additive {
    type Value = Vec<u8>;

    fn hash(&self, value: &Vec<u8>) -> Vec<u8> {
        keccak256(value).to_vec()
    }

    fn combine(&self, left: &Vec<u8>, right: &Vec<u8>) -> Vec<u8> {
        big_endian_sum(left, right)
    }
}

/// Build a tree over encoded records with Keccak-256 leaf hashing.
pub fn evm_compatible_tree<I>(leaf_values: I) -> Result<MerkleTree<Keccak256Additive>>
where
    I: IntoIterator<Item = Vec<u8>>,
{
    MerkleTree::with_options(
        leaf_values,
        Keccak256Additive,
        TreeOptions::default().with_hash_leaves(true),
    )
}
