use thiserror::Error;

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors from tree construction and proof derivation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The node graph could not be built consistently. Construction is
    /// aborted and no tree is returned.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    /// A proof was requested for a value that is not a leaf of the tree.
    #[error("value not found among the tree leaves")]
    LeafNotFound,
    /// The sibling or parent of the root was requested.
    #[error("node at position {position} has no parent, is it the root?")]
    NoParent {
        /// Position of the parentless node.
        position: u64,
    },
    /// The requested proof length does not fit the tree's shape.
    #[error("proof length {requested} is outside of the valid range {min}..={max}")]
    ProofLengthOutOfBounds {
        /// Length asked for by the caller.
        requested: usize,
        /// `depth - 1`.
        min: usize,
        /// Number of leaves, padding included.
        max: usize,
    },
    /// Proof bytes could not be decoded.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}

impl Error {
    /// Whether the caller can reasonably handle this error and carry on.
    ///
    /// Invariant violations and structural misuse indicate a bug in the
    /// caller or in the primitives and are not recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::LeafNotFound | Error::ProofLengthOutOfBounds { .. } | Error::InvalidProof(_)
        )
    }
}
