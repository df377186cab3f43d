//! Build-once binary Merkle commitments with position-ordered inclusion
//! proofs.
//!
//! A [`MerkleTree`] is built from a fixed set of leaf values and a pair of
//! injected [`Primitives`] (`hash: T -> T`, `combine: (T, T) -> T`). Leaf
//! values are opaque: the tree only compares them for equality.
//!
//! Proofs carry each sibling's creation position instead of a left/right
//! flag. Positions grow with every node created, level by level, so a
//! verifier folds a proof in order and picks the concatenation order by
//! comparing its running position with the element's:
//!
//! ```text
//! candidate = hash_leaves ? hash(leaf) : leaf
//! running   = proof.leaf_position
//! for element in proof:
//!     value     = running <= element.position
//!                   ? combine(candidate, element.hash)
//!                   : combine(element.hash, candidate)
//!     candidate = hash(value)
//!     running   = element.position
//! candidate == root.hash
//! ```
//!
//! # Example
//!
//! ```
//! use posmerkle::{FnPrimitives, MerkleTree};
//!
//! let primitives = FnPrimitives::new(|x: &u64| x % 256, |a: &u64, b: &u64| a + b);
//! let tree = MerkleTree::new(1..=7u64, primitives)?;
//! assert_eq!(tree.depth(), 4);
//! assert_eq!(*tree.root_hash(), 35);
//!
//! let proof = tree.inclusion_proof(&5)?;
//! assert_eq!(proof.positions(), vec![5, 10, 11]);
//! # Ok::<(), posmerkle::Error>(())
//! ```
//!
//! # Crate features
//!
//! - `evm`: Keccak-256 primitives and [`evm::evm_compatible_tree`].

#![warn(missing_docs)]

mod error;
#[cfg(feature = "evm")]
pub mod evm;
mod node;
mod options;
pub mod primitives;
mod proof;
mod render;
mod tree;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use node::{NodeId, NodeRef};
pub use options::TreeOptions;
pub use posmerkle_costs::{CostResult, CostsExt, OperationCost};
pub use posmerkle_visualize::{Visualize, visualize_to_string};
pub use primitives::{Blake3Additive, FnPrimitives, Primitives, big_endian_sum};
pub use proof::{InclusionProof, ProofElement};
pub use tree::MerkleTree;
