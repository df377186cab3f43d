//! Build-once binary Merkle tree.

use core::fmt;

use indexmap::IndexSet;
use posmerkle_costs::{CostResult, CostsExt, OperationCost, cost_return_on_error_no_add};
use tracing::{debug, trace};

use crate::{
    Error, Result, TreeOptions,
    node::{Node, NodeId, NodeRef},
    primitives::Primitives,
    proof::{InclusionProof, ProofElement},
};

/// A binary Merkle tree built once from a fixed set of leaves.
///
/// Leaves are deduplicated in first-occurrence order and numbered
/// `0..n`. Levels are then paired bottom-up; an odd level is padded by
/// repeating its last node (an alias sharing the node's identity and
/// position), and every parent takes the next global position. Level `0`
/// holds the leaves and the last level holds the root alone.
///
/// The tree owns all nodes in one arena and is immutable once built, so
/// shared references can derive proofs from several threads at once.
pub struct MerkleTree<P: Primitives> {
    primitives: P,
    options: TreeOptions,
    nodes: Vec<Node<P::Value>>,
    levels: Vec<Vec<NodeId>>,
    root: NodeId,
    unique_leaves: usize,
    build_cost: OperationCost,
}

impl<P: Primitives> MerkleTree<P> {
    /// Build a tree with default [`TreeOptions`] (leaf hashing on).
    pub fn new<I>(leaf_values: I, primitives: P) -> Result<Self>
    where
        I: IntoIterator<Item = P::Value>,
    {
        Self::build(leaf_values, primitives, TreeOptions::default()).unwrap()
    }

    /// Build a tree with explicit options.
    pub fn with_options<I>(leaf_values: I, primitives: P, options: TreeOptions) -> Result<Self>
    where
        I: IntoIterator<Item = P::Value>,
    {
        Self::build(leaf_values, primitives, options).unwrap()
    }

    /// Build a tree and report how many primitive calls it took.
    ///
    /// Fails with [`Error::InvariantViolation`] on an empty leaf set or if
    /// the resulting graph is inconsistent; no partial tree is returned.
    pub fn build<I>(leaf_values: I, primitives: P, options: TreeOptions) -> CostResult<Self, Error>
    where
        I: IntoIterator<Item = P::Value>,
    {
        let mut cost = OperationCost::default();

        let unique: IndexSet<P::Value> = leaf_values.into_iter().collect();
        let unique_leaves = unique.len();
        if unique_leaves == 0 {
            return Err(Error::InvariantViolation(
                "a tree needs at least one leaf".into(),
            ))
            .wrap_with_cost(cost);
        }

        let mut nodes: Vec<Node<P::Value>> = Vec::with_capacity(2 * unique_leaves);
        let mut level = Vec::with_capacity(unique_leaves + 1);
        for (position, value) in unique.into_iter().enumerate() {
            let hash = if options.hash_leaves {
                cost.hash_calls += 1;
                primitives.hash(&value)
            } else {
                value.clone()
            };
            level.push(NodeId(nodes.len()));
            nodes.push(Node::leaf(value, hash, position as u64));
            cost.nodes_created += 1;
        }

        let mut levels = Vec::new();
        let mut next_position = unique_leaves as u64;
        while level.len() > 1 {
            if level.len() % 2 != 0 {
                let last = level[level.len() - 1];
                trace!(
                    level = levels.len(),
                    width = level.len(),
                    "padding odd level with an alias of its last node"
                );
                level.push(last);
            }

            let mut parents = Vec::with_capacity(level.len() / 2);
            for pair in level.chunks_exact(2) {
                let (left, right) = (pair[0], pair[1]);
                let value = primitives.combine(nodes[left.0].hash(), nodes[right.0].hash());
                let hash = primitives.hash(&value);
                cost.combine_calls += 1;
                cost.hash_calls += 1;

                let parent = NodeId(nodes.len());
                nodes.push(Node::internal(value, hash, next_position, left, right));
                cost.nodes_created += 1;
                next_position += 1;

                cost_return_on_error_no_add!(&cost, nodes[left.0].set_parent(parent));
                if right != left {
                    cost_return_on_error_no_add!(&cost, nodes[right.0].set_parent(parent));
                }
                parents.push(parent);
            }
            levels.push(std::mem::replace(&mut level, parents));
        }
        levels.push(level);

        let root = match levels.last().map(Vec::as_slice) {
            Some(&[root]) => root,
            other => {
                return Err(Error::InvariantViolation(format!(
                    "last level must hold exactly one node, found {}",
                    other.map_or(0, <[NodeId]>::len)
                )))
                .wrap_with_cost(cost);
            }
        };

        let tree = MerkleTree {
            primitives,
            options,
            nodes,
            levels,
            root,
            unique_leaves,
            build_cost: cost,
        };
        cost_return_on_error_no_add!(&cost, tree.check_links());

        debug!(
            leaves = unique_leaves,
            depth = tree.depth(),
            hash_calls = cost.hash_calls,
            combine_calls = cost.combine_calls,
            "built merkle tree"
        );
        Ok(tree).wrap_with_cost(cost)
    }

    /// Every level but the last is even, every child points back to its
    /// parent and only the root is parentless.
    fn check_links(&self) -> Result<()> {
        let last = self.levels.len() - 1;
        if let Some(odd) = self.levels[..last].iter().position(|level| level.len() % 2 != 0) {
            return Err(Error::InvariantViolation(format!(
                "level {} has odd width {}",
                odd,
                self.levels[odd].len()
            )));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            let id = NodeId(index);
            if id != self.root && node.parent().is_none() {
                return Err(Error::InvariantViolation(format!(
                    "node {:?} is not the root but has no parent",
                    id
                )));
            }
            if let Some((left, right)) = node.children() {
                for child in [left, right] {
                    if self.nodes[child.0].parent() != Some(id) {
                        return Err(Error::InvariantViolation(format!(
                            "child {:?} of node {:?} points to another parent",
                            child, id
                        )));
                    }
                }
            }
        }

        if self.nodes[self.root.0].parent().is_some() {
            return Err(Error::InvariantViolation("the root has a parent".into()));
        }
        Ok(())
    }

    /// The root node. Its hash is the tree's commitment.
    pub fn root(&self) -> NodeRef<'_, P::Value> {
        NodeRef::new(&self.nodes, self.root)
    }

    /// Shorthand for `root().hash()`.
    pub fn root_hash(&self) -> &P::Value {
        self.nodes[self.root.0].hash()
    }

    /// Number of levels, leaves and root included.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Number of entries in the leaf level, padding alias included.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of distinct leaf values.
    pub fn unique_leaf_count(&self) -> usize {
        self.unique_leaves
    }

    /// Number of distinct nodes. Aliases are not counted twice.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node ids per level, in creation order, padding aliases included.
    pub fn levels(&self) -> &[Vec<NodeId>] {
        &self.levels
    }

    /// Nodes of one level; empty past the root level.
    pub fn level(&self, index: usize) -> impl Iterator<Item = NodeRef<'_, P::Value>> + '_ {
        self.levels
            .get(index)
            .into_iter()
            .flatten()
            .map(move |&id| NodeRef::new(&self.nodes, id))
    }

    /// The leaf level.
    pub fn leaves(&self) -> impl Iterator<Item = NodeRef<'_, P::Value>> + '_ {
        self.level(0)
    }

    /// Look a node up by id.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, P::Value>> {
        (id.0 < self.nodes.len()).then(|| NodeRef::new(&self.nodes, id))
    }

    /// Whether `value` is one of the leaves.
    pub fn contains(&self, value: &P::Value) -> bool {
        self.leaves().any(|leaf| leaf.value() == value)
    }

    /// Inclusion proof for `value` with the default proof length,
    /// [`depth`](Self::depth).
    pub fn inclusion_proof(&self, value: &P::Value) -> Result<InclusionProof<P::Value>> {
        self.inclusion_proof_with_length(value, self.depth())
    }

    /// Inclusion proof for `value`, checking `proof_length` against the
    /// tree's shape first.
    pub fn inclusion_proof_with_length(
        &self,
        value: &P::Value,
        proof_length: usize,
    ) -> Result<InclusionProof<P::Value>> {
        self.inclusion_proof_with_cost(value, proof_length).unwrap()
    }

    /// Derive an inclusion proof and count the nodes visited.
    ///
    /// `proof_length` must lie in `depth() - 1..=leaf_count()`. The first
    /// leaf equal to `value` is walked up until a node with the root's hash
    /// is reached; the siblings met on the way are returned sorted by
    /// position.
    pub fn inclusion_proof_with_cost(
        &self,
        value: &P::Value,
        proof_length: usize,
    ) -> CostResult<InclusionProof<P::Value>, Error> {
        let mut cost = OperationCost::default();

        let (min, max) = (self.depth() - 1, self.leaf_count());
        if proof_length < min || proof_length > max {
            return Err(Error::ProofLengthOutOfBounds {
                requested: proof_length,
                min,
                max,
            })
            .wrap_with_cost(cost);
        }

        let mut found = None;
        for leaf in self.leaves() {
            cost.node_visits += 1;
            if leaf.value() == value {
                found = Some(leaf);
                break;
            }
        }
        let Some(leaf) = found else {
            debug!(leaves = self.leaf_count(), "proof requested for an unknown leaf");
            return Err(Error::LeafNotFound).wrap_with_cost(cost);
        };

        let root_hash = self.root_hash();
        let mut siblings = Vec::with_capacity(min);
        let mut current = leaf;
        while current.hash() != root_hash {
            cost.node_visits += 1;
            siblings.push(cost_return_on_error_no_add!(&cost, current.other_node()));
            current = cost_return_on_error_no_add!(
                &cost,
                current.parent().ok_or(Error::NoParent {
                    position: current.position(),
                })
            );
        }
        siblings.sort_by_key(|node| node.position());

        let proof = InclusionProof {
            leaf_position: leaf.position(),
            elements: siblings
                .into_iter()
                .map(|node| ProofElement {
                    hash: node.hash().clone(),
                    position: node.position(),
                })
                .collect(),
        };
        trace!(
            leaf_position = proof.leaf_position,
            siblings = proof.len(),
            "derived inclusion proof"
        );
        Ok(proof).wrap_with_cost(cost)
    }

    /// Primitive calls spent building the tree.
    pub fn build_cost(&self) -> OperationCost {
        self.build_cost
    }

    /// Options the tree was built with.
    pub fn options(&self) -> TreeOptions {
        self.options
    }

    /// The primitives the tree was built with, for replaying its hashing.
    pub fn primitives(&self) -> &P {
        &self.primitives
    }
}

impl<P> fmt::Debug for MerkleTree<P>
where
    P: Primitives,
    P::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerkleTree")
            .field("depth", &self.depth())
            .field("leaf_count", &self.leaf_count())
            .field("root_hash", self.root_hash())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
