//! Prefix code assignment by tree traversal

use crate::bits::{Bit, BitSequence};
use crate::frequency::{FrequencyTable, Symbol};
use crate::tree::{HuffmanNode, HuffmanTree};

/// Assigns prefix codes to the leaves of a built tree
///
/// The root's code is empty; a left child extends its parent's code with `0`
/// and a right child with `1`. The walk uses an explicit stack, so skewed
/// trees over large alphabets do not grow the call stack.
///
/// A tree consisting of a single leaf would otherwise get an empty code, which
/// makes the encoded length zero regardless of input length. That leaf is given
/// a one-digit code instead (`0` unless configured otherwise).
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeAssigner {
    single_symbol_bit: Bit,
}

impl CodeAssigner {
    /// Create an assigner using `0` for single-symbol alphabets
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an assigner using `bit` as the single-symbol code
    pub fn with_single_symbol_bit(bit: Bit) -> Self {
        CodeAssigner {
            single_symbol_bit: bit,
        }
    }

    /// Store a code on every leaf of `tree`, returning the number of leaves
    pub fn assign<S>(&self, tree: &mut HuffmanTree<S>) -> usize {
        let Some(root) = tree.root_mut() else {
            return 0;
        };

        if let HuffmanNode::Leaf(element) = root {
            element.set_code(BitSequence::from_iter([self.single_symbol_bit]));
            return 1;
        }

        let mut leaves = 0;
        let mut stack = vec![(root, BitSequence::new())];

        while let Some((node, code)) = stack.pop() {
            match node {
                HuffmanNode::Leaf(element) => {
                    element.set_code(code);
                    leaves += 1;
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_code = code.clone();
                    right_code.push(Bit::One);
                    let mut left_code = code;
                    left_code.push(Bit::Zero);

                    stack.push((right.as_mut(), right_code));
                    stack.push((left.as_mut(), left_code));
                }
            }
        }

        leaves
    }

    /// Assign codes on `tree` and copy them onto the matching `table` entries
    pub fn assign_into<S: Symbol>(
        &self,
        tree: &mut HuffmanTree<S>,
        table: &mut FrequencyTable<S>,
    ) -> usize {
        let leaves = self.assign(tree);
        for element in tree.leaves() {
            if !table.set_code(element.symbol(), element.code().clone()) {
                log::warn!(
                    "Tree leaf {:?} has no frequency table entry",
                    element.symbol()
                );
            }
        }
        leaves
    }
}
