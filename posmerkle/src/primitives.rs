//! Hash and combine primitives injected into a tree.
//!
//! A tree never reaches for global hashing state: every [`MerkleTree`]
//! owns the [`Primitives`] value it was built with.
//!
//! [`MerkleTree`]: crate::MerkleTree

use core::{fmt, hash::Hash, marker::PhantomData};

/// The pair of functions a tree is built with.
///
/// * `hash: T -> T` digests a node value.
/// * `combine: (T, T) -> T` merges two child hashes into a parent value.
///
/// Proof orientation is recovered from positions rather than stored
/// explicitly, so external verifiers only reproduce the tree's root for
/// every leaf when `combine` is commutative.
pub trait Primitives {
    /// Leaf values, node values and hashes all share this type.
    type Value: Clone + Eq + Hash;

    /// Digest a value.
    fn hash(&self, value: &Self::Value) -> Self::Value;

    /// Merge a left and right child hash into the parent value.
    fn combine(&self, left: &Self::Value, right: &Self::Value) -> Self::Value;
}

/// [`Primitives`] backed by two closures.
pub struct FnPrimitives<T, H, C> {
    hash: H,
    combine: C,
    _value: PhantomData<fn(&T) -> T>,
}

impl<T, H, C> FnPrimitives<T, H, C>
where
    H: Fn(&T) -> T,
    C: Fn(&T, &T) -> T,
{
    /// Wrap a hash and a combine function.
    pub fn new(hash: H, combine: C) -> Self {
        FnPrimitives {
            hash,
            combine,
            _value: PhantomData,
        }
    }
}

impl<T, H, C> Primitives for FnPrimitives<T, H, C>
where
    T: Clone + Eq + Hash,
    H: Fn(&T) -> T,
    C: Fn(&T, &T) -> T,
{
    type Value = T;

    fn hash(&self, value: &T) -> T {
        (self.hash)(value)
    }

    fn combine(&self, left: &T, right: &T) -> T {
        (self.combine)(left, right)
    }
}

impl<T, H, C> fmt::Debug for FnPrimitives<T, H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPrimitives").finish_non_exhaustive()
    }
}

/// Blake3 digests combined by big-endian addition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3Additive;

impl Primitives for Blake3Additive {
    type Value = Vec<u8>;

    fn hash(&self, value: &Vec<u8>) -> Vec<u8> {
        blake3::hash(value).as_bytes().to_vec()
    }

    fn combine(&self, left: &Vec<u8>, right: &Vec<u8>) -> Vec<u8> {
        big_endian_sum(left, right)
    }
}

/// Add two unsigned big-endian integers of any width.
///
/// The result is minimal: leading zero bytes are dropped and zero encodes
/// as `[0x00]`. Sums grow by a byte instead of wrapping, so combining two
/// 32-byte digests may yield 33 bytes.
pub fn big_endian_sum(left: &[u8], right: &[u8]) -> Vec<u8> {
    let width = left.len().max(right.len());
    let mut lhs = left.iter().rev().copied();
    let mut rhs = right.iter().rev().copied();

    // little-endian while accumulating
    let mut sum = Vec::with_capacity(width + 1);
    let mut carry = 0u16;
    for _ in 0..width {
        let digit = lhs.next().unwrap_or(0) as u16 + rhs.next().unwrap_or(0) as u16 + carry;
        sum.push(digit as u8);
        carry = digit >> 8;
    }
    if carry > 0 {
        sum.push(carry as u8);
    }
    while sum.len() > 1 && sum.last() == Some(&0) {
        sum.pop();
    }
    if sum.is_empty() {
        sum.push(0);
    }
    sum.reverse();
    sum
}
