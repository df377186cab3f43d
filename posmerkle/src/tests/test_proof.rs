use assert_matches::assert_matches;

use super::{fold_proof, modular_sum};
use crate::{
    Blake3Additive, Error, FnPrimitives, InclusionProof, MerkleTree, OperationCost, ProofElement,
    TreeOptions,
};

#[test]
fn test_seven_leaves_proof() {
    let tree = MerkleTree::new(1..=7u64, modular_sum()).expect("build");
    let proof = tree.inclusion_proof(&5).expect("proof for 5");

    assert_eq!(proof.leaf_position, 4);
    assert_eq!(
        proof.elements,
        vec![
            ProofElement {
                hash: 6,
                position: 5
            },
            ProofElement {
                hash: 14,
                position: 10
            },
            ProofElement {
                hash: 10,
                position: 11
            },
        ]
    );
    assert_eq!(fold_proof(tree.primitives(), true, &5, &proof), 35);
}

#[test]
fn test_every_leaf_folds_to_root() {
    let tree = MerkleTree::new(1..=7u64, modular_sum()).expect("build");
    for leaf in 1..=7u64 {
        let proof = tree.inclusion_proof(&leaf).expect("proof");
        assert_eq!(proof.len(), tree.depth() - 1);
        assert_eq!(
            &fold_proof(tree.primitives(), true, &leaf, &proof),
            tree.root_hash(),
            "leaf {}",
            leaf
        );
    }
}

#[test]
fn test_blake3_round_trip_for_many_sizes() {
    for size in 1u32..=20 {
        let leaves: Vec<Vec<u8>> = (0..size).map(|i| format!("record-{}", i).into_bytes()).collect();
        let tree = MerkleTree::new(leaves.clone(), Blake3Additive).expect("build");
        for leaf in &leaves {
            let proof = tree.inclusion_proof(leaf).expect("proof");
            assert_eq!(
                &fold_proof(&Blake3Additive, true, leaf, &proof),
                tree.root_hash(),
                "size {} leaf {}",
                size,
                hex::encode(leaf)
            );
        }
    }
}

#[test]
fn test_round_trip_without_leaf_hashing() {
    let leaves: Vec<Vec<u8>> = (0u8..9).map(|i| blake3::hash(&[i]).as_bytes().to_vec()).collect();
    let options = TreeOptions::default().with_hash_leaves(false);
    let tree = MerkleTree::with_options(leaves.clone(), Blake3Additive, options).expect("build");
    for leaf in &leaves {
        let proof = tree.inclusion_proof(leaf).expect("proof");
        assert_eq!(&fold_proof(&Blake3Additive, false, leaf, &proof), tree.root_hash());
    }
}

#[test]
fn test_proof_elements_sorted_by_position() {
    let tree = MerkleTree::new(1..=13u64, modular_sum()).expect("build");
    for leaf in 1..=13u64 {
        let positions = tree.inclusion_proof(&leaf).expect("proof").positions();
        assert!(positions.is_sorted(), "{:?}", positions);
    }
}

#[test]
fn test_proof_length_bounds() {
    let tree = MerkleTree::new(1..=7u64, modular_sum()).expect("build");
    assert_eq!((tree.depth(), tree.leaf_count()), (4, 8));

    let too_short = tree.inclusion_proof_with_length(&5, 2);
    assert_eq!(
        too_short,
        Err(Error::ProofLengthOutOfBounds {
            requested: 2,
            min: 3,
            max: 8
        })
    );
    assert!(too_short.unwrap_err().is_recoverable());

    assert_matches!(
        tree.inclusion_proof_with_length(&5, 9),
        Err(Error::ProofLengthOutOfBounds { requested: 9, .. })
    );
    assert!(tree.inclusion_proof_with_length(&5, 3).is_ok());
    assert!(tree.inclusion_proof_with_length(&5, 8).is_ok());
}

#[test]
fn test_bounds_checked_before_lookup() {
    let tree = MerkleTree::new(1..=7u64, modular_sum()).expect("build");
    assert_matches!(
        tree.inclusion_proof_with_length(&99, 0),
        Err(Error::ProofLengthOutOfBounds { .. })
    );
}

#[test]
fn test_missing_leaf() {
    let tree = MerkleTree::new(1..=7u64, modular_sum()).expect("build");
    let missing = tree.inclusion_proof(&35);
    assert_eq!(missing, Err(Error::LeafNotFound));
    assert!(missing.unwrap_err().is_recoverable());
}

#[test]
fn test_proof_cost() {
    let tree = MerkleTree::new(1..=7u64, modular_sum()).expect("build");
    let ctx = tree.inclusion_proof_with_cost(&5, tree.depth());
    assert!(ctx.value.is_ok());
    // five leaves scanned, three steps up to the root
    assert_eq!(ctx.cost, OperationCost::with_node_visits(8));

    let missing = tree.inclusion_proof_with_cost(&100, tree.depth());
    assert_eq!(missing.cost.node_visits, 8);
    assert_eq!(missing.value, Err(Error::LeafNotFound));
}

#[test]
fn test_single_leaf_proof_is_empty() {
    let tree = MerkleTree::new(vec![9u64], modular_sum()).expect("build");
    let proof = tree.inclusion_proof(&9).expect("proof");
    assert!(proof.is_empty());
    assert_eq!(fold_proof(tree.primitives(), true, &9, &proof), 9);
}

#[test]
fn test_equal_hash_siblings() {
    // both leaves hash to 1
    let primitives = FnPrimitives::new(|x: &u64| x % 2, |a: &u64, b: &u64| a + b);
    let tree = MerkleTree::new(vec![1u64, 3], primitives).expect("build");

    let proof = tree.inclusion_proof(&3).expect("proof for 3");
    assert_eq!(proof.positions(), vec![0]);
    let proof = tree.inclusion_proof(&1).expect("proof for 1");
    assert_eq!(proof.positions(), vec![1]);
    assert_eq!(&fold_proof(tree.primitives(), true, &1, &proof), tree.root_hash());
}

#[test]
fn test_alias_sibling_is_itself() {
    let tree = MerkleTree::new(1..=5u64, modular_sum()).expect("build");
    let proof = tree.inclusion_proof(&5).expect("proof");
    assert_eq!(proof.leaf_position, 4);
    // own alias, own alias one level up, then the left half
    assert_eq!(proof.positions(), vec![4, 7, 8]);
    assert_eq!(fold_proof(tree.primitives(), true, &5, &proof), 30);
}

#[test]
fn test_position_order_for_non_commutative_combine() {
    let primitives = FnPrimitives::new(
        |x: &u64| x.wrapping_mul(0x9e37_79b9_7f4a_7c15),
        |a: &u64, b: &u64| a.wrapping_mul(31).wrapping_add(*b),
    );
    let tree = MerkleTree::new(1..=8u64, primitives).expect("build");
    // the first two leaves are left of every sibling above the leaf level
    for leaf in [1u64, 2] {
        let proof = tree.inclusion_proof(&leaf).expect("proof");
        assert_eq!(
            &fold_proof(tree.primitives(), true, &leaf, &proof),
            tree.root_hash()
        );
    }
}

#[test]
fn test_proof_bytes_round_trip() {
    let leaves: Vec<Vec<u8>> = (0u8..11).map(|i| vec![i; 40]).collect();
    let tree = MerkleTree::new(leaves.clone(), Blake3Additive).expect("build");
    let proof = tree.inclusion_proof(&leaves[6]).expect("proof");

    let bytes = proof.encode_to_vec().expect("encode");
    let decoded = InclusionProof::<Vec<u8>>::decode_from_slice(&bytes).expect("decode");
    assert_eq!(decoded, proof);
    assert_eq!(
        &fold_proof(&Blake3Additive, true, &leaves[6], &decoded),
        tree.root_hash()
    );
}

#[test]
fn test_concurrent_proofs() {
    let leaves: Vec<Vec<u8>> = (0u32..64).map(|i| i.to_le_bytes().to_vec()).collect();
    let tree = MerkleTree::new(leaves.clone(), Blake3Additive).expect("build");
    std::thread::scope(|scope| {
        for chunk in leaves.chunks(16) {
            let tree = &tree;
            scope.spawn(move || {
                for leaf in chunk {
                    let proof = tree.inclusion_proof(leaf).expect("proof");
                    assert_eq!(
                        &fold_proof(tree.primitives(), true, leaf, &proof),
                        tree.root_hash()
                    );
                }
            });
        }
    });
}
