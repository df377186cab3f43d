//! Tree vertices.
//!
//! Every node lives in the arena owned by its [`MerkleTree`]. Children and
//! parent links are [`NodeId`]s into that arena, so the tree remains the
//! single owner of the whole graph and the parent link never owns anything.
//!
//! [`MerkleTree`]: crate::MerkleTree

use core::fmt;

use crate::{Error, Result};

/// Index of a node in its tree's arena.
///
/// Two occurrences of the same `NodeId` in a level are the same node: this
/// is how a padding alias is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    value: T,
    hash: T,
    position: u64,
    children: Option<(NodeId, NodeId)>,
    parent: Option<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn leaf(value: T, hash: T, position: u64) -> Self {
        Node {
            value,
            hash,
            position,
            children: None,
            parent: None,
        }
    }

    pub(crate) fn internal(value: T, hash: T, position: u64, left: NodeId, right: NodeId) -> Self {
        Node {
            value,
            hash,
            position,
            children: Some((left, right)),
            parent: None,
        }
    }

    pub(crate) fn hash(&self) -> &T {
        &self.hash
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub(crate) fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    pub(crate) fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Link this node to the parent created on top of it.
    ///
    /// A node has exactly one parent. Setting the same parent twice happens
    /// for a padding alias, which fills both slots of its parent.
    pub(crate) fn set_parent(&mut self, parent: NodeId) -> Result<()> {
        match self.parent {
            Some(existing) if existing != parent => Err(Error::InvariantViolation(format!(
                "node at position {} already has parent {:?}, refusing {:?}",
                self.position, existing, parent
            ))),
            _ => {
                self.parent = Some(parent);
                Ok(())
            }
        }
    }
}

/// A borrowed view of one node and the arena around it.
pub struct NodeRef<'a, T> {
    nodes: &'a [Node<T>],
    id: NodeId,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    /// `id` must index into `nodes`.
    pub(crate) fn new(nodes: &'a [Node<T>], id: NodeId) -> Self {
        debug_assert!(id.0 < nodes.len());
        NodeRef { nodes, id }
    }

    fn node(&self) -> &'a Node<T> {
        &self.nodes[self.id.0]
    }

    fn at(&self, id: NodeId) -> NodeRef<'a, T> {
        NodeRef::new(self.nodes, id)
    }

    /// Arena id of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The caller-supplied value for a leaf, `combine(left.hash,
    /// right.hash)` for an internal node.
    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    /// `hash(value)`, or the value itself for an unhashed leaf.
    pub fn hash(&self) -> &'a T {
        &self.node().hash
    }

    /// Creation order position, shared by a node and its padding alias.
    pub fn position(&self) -> u64 {
        self.node().position
    }

    /// True iff the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.node().parent().map(|id| self.at(id))
    }

    /// Left and right child of an internal node. Both are the same node
    /// when the right slot holds a padding alias.
    pub fn children(&self) -> Option<(NodeRef<'a, T>, NodeRef<'a, T>)> {
        self.node()
            .children()
            .map(|(left, right)| (self.at(left), self.at(right)))
    }

    /// The other child of this node's parent.
    ///
    /// The slot is found by node identity, never by comparing hashes, so
    /// siblings with equal hashes are told apart correctly. An alias pair
    /// yields the node itself.
    pub fn other_node(&self) -> Result<NodeRef<'a, T>> {
        let parent = self.parent().ok_or(Error::NoParent {
            position: self.position(),
        })?;
        match parent.node().children() {
            Some((left, right)) if left == self.id => Ok(self.at(right)),
            Some((left, right)) if right == self.id => Ok(self.at(left)),
            _ => Err(Error::InvariantViolation(format!(
                "node at position {} is not a child of its parent at position {}",
                self.position(),
                parent.position()
            ))),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("position", &self.position())
            .field("hash", self.hash())
            .field("is_leaf", &self.is_leaf())
            .finish()
    }
}
