//! Huffman tree model and greedy construction

use crate::frequency::{Element, FrequencyTable, Symbol};
use crate::queue::{PriorityQueue, Weighted};
use crate::{Error, Result};

/// A node of a Huffman tree
///
/// Leaves carry a symbol element. Internal nodes are merge sentinels: they
/// carry no symbol, only the combined weight of their two children. A node
/// with a single child cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode<S> {
    /// A symbol-carrying leaf
    Leaf(Element<S>),
    /// A merge of two subtrees
    Internal {
        /// Sum of both children's weights, fixed at construction
        weight: u64,
        /// Subtree reached with bit `0`
        left: Box<HuffmanNode<S>>,
        /// Subtree reached with bit `1`
        right: Box<HuffmanNode<S>>,
    },
}

impl<S> HuffmanNode<S> {
    /// Create a leaf node
    pub fn leaf(element: Element<S>) -> Self {
        HuffmanNode::Leaf(element)
    }

    /// Create an internal node over two subtrees
    ///
    /// Fails if the combined weight does not fit in a `u64`.
    pub fn merge(left: Self, right: Self) -> Result<Self> {
        let weight = left.weight().checked_add(right.weight()).ok_or_else(|| {
            Error::format(format!(
                "combined weight of {} and {} overflows u64",
                left.weight(),
                right.weight()
            ))
        })?;

        Ok(HuffmanNode::Internal {
            weight,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Whether this node has no children
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf(_))
    }

    /// The leaf element, if this is a leaf
    pub fn element(&self) -> Option<&Element<S>> {
        match self {
            HuffmanNode::Leaf(element) => Some(element),
            HuffmanNode::Internal { .. } => None,
        }
    }

    /// The `(left, right)` children, if this is an internal node
    pub fn children(&self) -> Option<(&HuffmanNode<S>, &HuffmanNode<S>)> {
        match self {
            HuffmanNode::Leaf(_) => None,
            HuffmanNode::Internal { left, right, .. } => Some((left.as_ref(), right.as_ref())),
        }
    }
}

impl<S> Weighted for HuffmanNode<S> {
    fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf(element) => element.frequency(),
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }
}

/// A Huffman tree, possibly empty
///
/// The empty tree results from building over zero distinct symbols; it has no
/// root and cannot decode anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    root: Option<HuffmanNode<S>>,
}

impl<S> HuffmanTree<S> {
    /// A tree with no root
    pub fn empty() -> Self {
        HuffmanTree { root: None }
    }

    /// A single-leaf tree built from a frequency table element
    pub fn leaf(element: Element<S>) -> Self {
        HuffmanTree {
            root: Some(HuffmanNode::leaf(element)),
        }
    }

    /// A tree rooted at `root`
    pub fn from_root(root: HuffmanNode<S>) -> Self {
        HuffmanTree { root: Some(root) }
    }

    /// Merge two trees under a fresh internal root
    ///
    /// Merging with an empty tree yields the other tree unchanged. Fails if
    /// the combined weight does not fit in a `u64`.
    pub fn merge(left: Self, right: Self) -> Result<Self> {
        match (left.root, right.root) {
            (Some(l), Some(r)) => Ok(Self::from_root(HuffmanNode::merge(l, r)?)),
            (Some(node), None) | (None, Some(node)) => Ok(Self::from_root(node)),
            (None, None) => Ok(Self::empty()),
        }
    }

    /// The root node, if any
    pub fn root(&self) -> Option<&HuffmanNode<S>> {
        self.root.as_ref()
    }

    pub(crate) fn root_mut(&mut self) -> Option<&mut HuffmanNode<S>> {
        self.root.as_mut()
    }

    /// Whether the tree has no root
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Iterate over leaf elements, left to right
    pub fn leaves(&self) -> Leaves<'_, S> {
        Leaves {
            stack: self.root.iter().collect(),
        }
    }

    /// Number of leaves (distinct symbols)
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Length of the longest root-to-leaf path
    ///
    /// A single-leaf tree has depth 0; an empty tree has depth 0.
    pub fn depth(&self) -> usize {
        self.leaf_depths().map(|(_, depth)| depth).max().unwrap_or(0)
    }

    /// Total encoded length in bits: Σ frequency × code length
    ///
    /// A lone leaf counts as a one-bit code. Saturates at `u64::MAX`.
    pub fn weighted_path_length(&self) -> u64 {
        self.leaf_depths()
            .map(|(element, depth)| element.frequency().saturating_mul(depth.max(1) as u64))
            .fold(0, u64::saturating_add)
    }

    fn leaf_depths(&self) -> impl Iterator<Item = (&Element<S>, usize)> {
        let mut stack: Vec<(&HuffmanNode<S>, usize)> =
            self.root.iter().map(|root| (root, 0)).collect();

        std::iter::from_fn(move || {
            while let Some((node, depth)) = stack.pop() {
                match node {
                    HuffmanNode::Leaf(element) => return Some((element, depth)),
                    HuffmanNode::Internal { left, right, .. } => {
                        stack.push((right.as_ref(), depth + 1));
                        stack.push((left.as_ref(), depth + 1));
                    }
                }
            }
            None
        })
    }
}

impl<S: Symbol> HuffmanTree<S> {
    /// Build the optimal prefix-code tree for a frequency table
    ///
    /// Seeds a min-heap with one leaf-tree per distinct symbol, then repeatedly
    /// merges the two lightest trees until one remains. Codes are not assigned
    /// here; see [`CodeAssigner`](crate::codes::CodeAssigner).
    ///
    /// Fails only if the total weight of the table overflows a `u64`.
    pub fn build(table: &FrequencyTable<S>) -> Result<Self> {
        let mut queue = PriorityQueue::with_capacity(table.len());
        for symbol in table.symbols() {
            if let Some(element) = table.lookup(symbol) {
                queue.insert(HuffmanTree::leaf(element.clone()));
            }
        }

        log::trace!("Seeded queue with {} leaf trees", queue.len());

        loop {
            let Some(left) = queue.extract_min() else {
                return Ok(Self::empty());
            };
            let Some(right) = queue.extract_min() else {
                return Ok(left);
            };

            log::trace!(
                "Merging trees of weight {} and {}",
                left.weight(),
                right.weight()
            );
            queue.insert(Self::merge(left, right)?);
        }
    }
}

impl<S> Weighted for HuffmanTree<S> {
    fn weight(&self) -> u64 {
        self.root.as_ref().map_or(0, Weighted::weight)
    }
}

impl<S> Default for HuffmanTree<S> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Iterator over the leaf elements of a [`HuffmanTree`]
#[derive(Debug)]
pub struct Leaves<'a, S> {
    stack: Vec<&'a HuffmanNode<S>>,
}

impl<'a, S> Iterator for Leaves<'a, S> {
    type Item = &'a Element<S>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                HuffmanNode::Leaf(element) => return Some(element),
                HuffmanNode::Internal { left, right, .. } => {
                    self.stack.push(right.as_ref());
                    self.stack.push(left.as_ref());
                }
            }
        }
        None
    }
}
