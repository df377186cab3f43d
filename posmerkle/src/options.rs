//! Per-tree construction options.

/// Options fixed when a tree is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    /// Hash leaf values before they enter the tree. When disabled, a leaf's
    /// hash is its value, which suits leaves that are already digests.
    pub hash_leaves: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        TreeOptions { hash_leaves: true }
    }
}

impl TreeOptions {
    /// Options with leaf hashing switched on or off.
    pub fn with_hash_leaves(mut self, hash_leaves: bool) -> Self {
        self.hash_leaves = hash_leaves;
        self
    }
}
