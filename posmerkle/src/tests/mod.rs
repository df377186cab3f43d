mod test_proof;

use crate::{FnPrimitives, InclusionProof, Primitives};

/// `hash(x) = x mod 256`, `combine(a, b) = a + b`.
pub(crate) fn modular_sum() -> impl Primitives<Value = u64> {
    FnPrimitives::new(|x: &u64| x % 256, |a: &u64, b: &u64| a + b)
}

/// Replays a proof the way an external verifier does.
pub(crate) fn fold_proof<P: Primitives>(
    primitives: &P,
    hash_leaves: bool,
    leaf: &P::Value,
    proof: &InclusionProof<P::Value>,
) -> P::Value {
    let mut candidate = if hash_leaves {
        primitives.hash(leaf)
    } else {
        leaf.clone()
    };
    let mut running = proof.leaf_position;
    for element in proof {
        let value = if running <= element.position {
            primitives.combine(&candidate, &element.hash)
        } else {
            primitives.combine(&element.hash, &candidate)
        };
        candidate = primitives.hash(&value);
        running = element.position;
    }
    candidate
}
