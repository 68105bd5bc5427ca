//! Shared helpers for integration tests

#![allow(dead_code)]

use huffcode::{BitSequence, HuffmanCodec, HuffmanTree, Symbol};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Install a test logger once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Compress and decompress `input`, asserting the output matches
pub fn test_round_trip<S: Symbol>(input: &[S]) -> BitSequence {
    let mut codec = HuffmanCodec::new();
    let bits = codec.compress(input).expect("Compression failed");
    let output = codec.decompress(&bits).expect("Decompression failed");
    assert_eq!(output, input);
    bits
}

/// Assert that no leaf code is a prefix of another
pub fn assert_prefix_free<S: Symbol>(tree: &HuffmanTree<S>) {
    let codes: Vec<&BitSequence> = tree.leaves().map(|e| e.code()).collect();
    for (i, a) in codes.iter().enumerate() {
        assert!(!a.is_empty(), "leaf {} has an empty code", i);
        for (j, b) in codes.iter().enumerate() {
            if i != j {
                assert!(!a.is_prefix_of(b), "code {} is a prefix of {}", a, b);
            }
        }
    }
}

/// Minimum total code length for `frequencies`, computed independently
///
/// The optimal cost equals the sum of all merge weights, regardless of how
/// ties are broken.
pub fn optimal_cost(frequencies: &[u64]) -> u64 {
    if frequencies.len() == 1 {
        return frequencies[0];
    }

    let mut heap: BinaryHeap<Reverse<u64>> = frequencies.iter().copied().map(Reverse).collect();
    let mut cost = 0;
    while heap.len() > 1 {
        let Reverse(a) = heap.pop().expect("heap has two items");
        let Reverse(b) = heap.pop().expect("heap has two items");
        cost += a + b;
        heap.push(Reverse(a + b));
    }
    cost
}

/// Total encoded length implied by the codes on the tree's leaves
pub fn code_cost<S: Symbol>(tree: &HuffmanTree<S>) -> u64 {
    tree.leaves()
        .map(|e| e.frequency() * e.code().len() as u64)
        .sum()
}
