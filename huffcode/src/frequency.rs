//! Symbol frequency counting
//!
//! The [`FrequencyTable`] is built once per compression pass by scanning the
//! input. Each distinct symbol maps to an [`Element`] holding its occurrence
//! count and, once codes are assigned, its prefix code.

use crate::bits::BitSequence;
use crate::queue::Weighted;
use crate::tree::HuffmanTree;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// Types usable as Huffman symbols
///
/// Implemented for every type that can key a hash map and be cloned into the
/// tree's leaves.
pub trait Symbol: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Symbol for T {}

/// A symbol together with its occurrence count and assigned code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<S> {
    symbol: S,
    frequency: u64,
    code: BitSequence,
}

impl<S> Element<S> {
    /// Create an element with an empty code
    pub fn new(symbol: S, frequency: u64) -> Self {
        Element {
            symbol,
            frequency,
            code: BitSequence::new(),
        }
    }

    /// The symbol this element counts
    pub fn symbol(&self) -> &S {
        &self.symbol
    }

    /// Number of occurrences recorded
    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    /// Assigned prefix code (empty until codes are assigned)
    pub fn code(&self) -> &BitSequence {
        &self.code
    }

    pub(crate) fn set_code(&mut self, code: BitSequence) {
        self.code = code;
    }
}

impl<S> Weighted for Element<S> {
    fn weight(&self) -> u64 {
        self.frequency
    }
}

/// Mapping from symbol to its [`Element`]
#[derive(Debug, Clone)]
pub struct FrequencyTable<S: Symbol> {
    elements: HashMap<S, Element<S>>,
}

impl<S: Symbol> FrequencyTable<S> {
    /// Create an empty table
    pub fn new() -> Self {
        FrequencyTable {
            elements: HashMap::new(),
        }
    }

    /// Count every symbol of `symbols`
    pub fn from_symbols<I: IntoIterator<Item = S>>(symbols: I) -> Self {
        let mut table = Self::new();
        for symbol in symbols {
            table.record_occurrence(symbol);
        }
        table
    }

    /// Rebuild a table from the leaves of a tree, carrying over their codes
    pub fn from_tree(tree: &HuffmanTree<S>) -> Self {
        let elements = tree
            .leaves()
            .map(|element| (element.symbol().clone(), element.clone()))
            .collect();
        FrequencyTable { elements }
    }

    /// Record one occurrence of `symbol`
    ///
    /// Counts saturate at `u64::MAX`.
    pub fn record_occurrence(&mut self, symbol: S) {
        match self.elements.entry(symbol) {
            Entry::Occupied(mut entry) => {
                let element = entry.get_mut();
                element.frequency = element.frequency.saturating_add(1);
            }
            Entry::Vacant(entry) => {
                let symbol = entry.key().clone();
                entry.insert(Element::new(symbol, 1));
            }
        }
    }

    /// Look up the element for `symbol`
    pub fn lookup(&self, symbol: &S) -> Option<&Element<S>> {
        self.elements.get(symbol)
    }

    /// The distinct symbols recorded
    pub fn symbols(&self) -> HashSet<&S> {
        self.elements.keys().collect()
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no symbol has been recorded
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Sum of all occurrence counts, saturating at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.elements
            .values()
            .map(|e| e.frequency)
            .fold(0, u64::saturating_add)
    }

    /// Iterate over all elements in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &Element<S>> {
        self.elements.values()
    }

    /// Store `code` on the element for `symbol`; returns false if absent
    pub(crate) fn set_code(&mut self, symbol: &S, code: BitSequence) -> bool {
        match self.elements.get_mut(symbol) {
            Some(element) => {
                element.set_code(code);
                true
            }
            None => false,
        }
    }
}

impl<S: Symbol> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> FromIterator<S> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_symbols(iter)
    }
}
