#![deny(missing_docs)]
//! Cost accounting for Merkle tree construction and proof derivation.
//!
//! Operations report how much work they did next to their result, so
//! callers can budget the injected hash and combine primitives without
//! instrumenting them.

use std::ops::{Add, AddAssign};

pub mod context;

pub use context::{CostContext, CostResult, CostsExt};

/// Work performed by a tree operation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many times the `Hash` primitive was invoked.
    pub hash_calls: u32,
    /// How many times the `Combine` primitive was invoked.
    pub combine_calls: u32,
    /// How many nodes were allocated in the tree arena. Padding aliases are
    /// not counted since they reuse an existing node.
    pub nodes_created: u32,
    /// How many nodes were inspected while searching or walking the tree.
    pub node_visits: u32,
}

impl OperationCost {
    /// Cost with only `hash_calls` set.
    pub fn with_hash_calls(hash_calls: u32) -> Self {
        OperationCost {
            hash_calls,
            ..Default::default()
        }
    }

    /// Cost with only `combine_calls` set.
    pub fn with_combine_calls(combine_calls: u32) -> Self {
        OperationCost {
            combine_calls,
            ..Default::default()
        }
    }

    /// Cost with only `node_visits` set.
    pub fn with_node_visits(node_visits: u32) -> Self {
        OperationCost {
            node_visits,
            ..Default::default()
        }
    }

    /// True if the operation did no measurable work.
    pub fn is_nothing(&self) -> bool {
        *self == Self::default()
    }

    /// Total number of primitive invocations, hash and combine alike.
    pub fn primitive_calls(&self) -> u32 {
        self.hash_calls + self.combine_calls
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        OperationCost {
            hash_calls: self.hash_calls + rhs.hash_calls,
            combine_calls: self.combine_calls + rhs.combine_calls,
            nodes_created: self.nodes_created + rhs.nodes_created,
            node_visits: self.node_visits + rhs.node_visits,
        }
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.hash_calls += rhs.hash_calls;
        self.combine_calls += rhs.combine_calls;
        self.nodes_created += rhs.nodes_created;
        self.node_visits += rhs.node_visits;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_costs() {
        let left = OperationCost {
            hash_calls: 3,
            combine_calls: 1,
            nodes_created: 2,
            node_visits: 0,
        };
        let right = OperationCost::with_node_visits(5) + OperationCost::with_hash_calls(1);

        let mut acc = left;
        acc += right;
        assert_eq!(acc, left + right);
        assert_eq!(
            acc,
            OperationCost {
                hash_calls: 4,
                combine_calls: 1,
                nodes_created: 2,
                node_visits: 5,
            }
        );
        assert_eq!(acc.primitive_calls(), 5);
    }

    #[test]
    fn test_is_nothing() {
        assert!(OperationCost::default().is_nothing());
        assert!(!OperationCost::with_combine_calls(1).is_nothing());
    }
}
