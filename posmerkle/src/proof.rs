//! Inclusion proofs.
//!
//! A proof lists the siblings met on the way from a leaf to the root,
//! sorted by their creation position instead of by path order. A verifier
//! recovers the concatenation order for `combine` from positions alone:
//! starting with the leaf's position as the running position, each element
//! is combined as `(current, element)` when `current <= element.position`
//! and as `(element, current)` otherwise, the result is hashed, and
//! `element.position` becomes the running position.

use bincode::{Decode, Encode};

use crate::Error;

/// Largest proof accepted by [`InclusionProof::decode_from_slice`].
const MAX_DECODE_BYTES: usize = 16 * 1024 * 1024;

/// One sibling on the path to the root.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct ProofElement<T> {
    /// The sibling's hash.
    pub hash: T,
    /// The sibling's creation position.
    pub position: u64,
}

/// Proof that a leaf is committed to by a tree's root hash.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct InclusionProof<T> {
    /// Position of the proven leaf, the verifier's starting position.
    pub leaf_position: u64,
    /// Siblings in ascending position order.
    pub elements: Vec<ProofElement<T>>,
}

impl<T> InclusionProof<T> {
    /// Number of siblings.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True for a single-leaf tree, where the leaf is the root.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over the siblings in proof order.
    pub fn iter(&self) -> core::slice::Iter<'_, ProofElement<T>> {
        self.elements.iter()
    }

    /// Sibling positions in proof order.
    pub fn positions(&self) -> Vec<u64> {
        self.elements.iter().map(|element| element.position).collect()
    }
}

impl<T: Encode> InclusionProof<T> {
    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, Error> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| Error::InvalidProof(format!("encode error: {}", e)))
    }
}

impl<T: Decode<()>> InclusionProof<T> {
    /// Decode from bytes using bincode.
    ///
    /// Rejects element lists that are not sorted by position, which no tree
    /// produces.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<MAX_DECODE_BYTES>();
        let (proof, _): (Self, _) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| Error::InvalidProof(format!("decode error: {}", e)))?;
        if !proof.elements.is_sorted_by_key(|element| element.position) {
            return Err(Error::InvalidProof(
                "proof elements are not ordered by position".into(),
            ));
        }
        Ok(proof)
    }
}

impl<'a, T> IntoIterator for &'a InclusionProof<T> {
    type Item = &'a ProofElement<T>;
    type IntoIter = core::slice::Iter<'a, ProofElement<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
