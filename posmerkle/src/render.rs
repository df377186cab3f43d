//! [`Visualize`] implementations for trees and proofs.

use std::io::{Result, Write};

use posmerkle_visualize::{Drawer, Visualize};

use crate::{InclusionProof, MerkleTree, primitives::Primitives};

impl<P> Visualize for MerkleTree<P>
where
    P: Primitives,
    P::Value: Visualize,
{
    /// Draws levels root first, one `[position] hash` line per node.
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(
            format!(
                "merkle_tree depth: {} leaves: {}",
                self.depth(),
                self.leaf_count()
            )
            .as_bytes(),
        )?;
        drawer.down();
        for index in (0..self.depth()).rev() {
            drawer.newline()?;
            drawer.write(format!("level {}:", index).as_bytes())?;
            drawer.down();
            let mut previous = None;
            for node in self.level(index) {
                drawer.newline()?;
                drawer.write(format!("[{}] ", node.position()).as_bytes())?;
                drawer = node.hash().visualize(drawer)?;
                if previous == Some(node.id()) {
                    drawer.write(b" (alias)")?;
                }
                previous = Some(node.id());
            }
            drawer.up();
        }
        drawer.up();
        Ok(drawer)
    }
}

impl<T: Visualize> Visualize for InclusionProof<T> {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(format!("proof for leaf [{}]:", self.leaf_position).as_bytes())?;
        drawer.down();
        for element in self {
            drawer.newline()?;
            drawer.write(format!("[{}] ", element.position).as_bytes())?;
            drawer = element.hash.visualize(drawer)?;
        }
        drawer.up();
        Ok(drawer)
    }
}

#[cfg(test)]
mod tests {
    use posmerkle_visualize::{visualize_stderr, visualize_to_string};

    use crate::{MerkleTree, tests::modular_sum};

    #[test]
    fn test_visualize_tree() {
        let tree = MerkleTree::new(1..=7u64, modular_sum()).expect("build");
        let dump = visualize_to_string(&tree);
        assert!(dump.starts_with("merkle_tree depth: 4 leaves: 8"));
        assert!(dump.contains("level 3:\n        [13] 35"));
        assert!(dump.contains("[6] 7\n        [6] 7 (alias)"));
    }

    #[test]
    fn test_visualize_proof() {
        let tree = MerkleTree::new(1..=7u64, modular_sum()).expect("build");
        let proof = tree.inclusion_proof(&5).expect("proof");
        assert_eq!(
            visualize_to_string(&proof),
            "proof for leaf [4]:\n    [5] 6\n    [10] 14\n    [11] 10"
        );
    }

    #[test]
    fn test_visualize_single_leaf_to_stderr() {
        let tree = MerkleTree::new([9u64], modular_sum()).expect("build");
        assert!(visualize_to_string(&tree).starts_with("merkle_tree depth: 1 leaves: 1"));
        visualize_stderr(&tree).expect("draw");
    }
}
