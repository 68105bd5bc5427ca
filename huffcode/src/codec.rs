//! Encoding and decoding against a Huffman tree

use crate::bits::{Bit, BitSequence};
use crate::codes::CodeAssigner;
use crate::config::{CodecConfig, UnknownSymbolPolicy};
use crate::frequency::{FrequencyTable, Symbol};
use crate::tree::{HuffmanNode, HuffmanTree};
use crate::{Error, Result};

/// Maps symbols to bits using the codes stored in a frequency table
#[derive(Debug, Clone)]
pub struct Encoder<'a, S: Symbol> {
    table: &'a FrequencyTable<S>,
    policy: UnknownSymbolPolicy,
}

impl<'a, S: Symbol> Encoder<'a, S> {
    /// Create an encoder that fails on unknown symbols
    pub fn new(table: &'a FrequencyTable<S>) -> Self {
        Self::with_policy(table, UnknownSymbolPolicy::Fail)
    }

    /// Create an encoder with an explicit unknown symbol policy
    pub fn with_policy(table: &'a FrequencyTable<S>, policy: UnknownSymbolPolicy) -> Self {
        Encoder { table, policy }
    }

    /// Concatenate the codes of `symbols`, in order
    pub fn encode(&self, symbols: &[S]) -> Result<BitSequence> {
        let mut bits = BitSequence::new();
        let mut skipped = 0usize;

        for (position, symbol) in symbols.iter().enumerate() {
            let Some(element) = self.table.lookup(symbol) else {
                match self.policy {
                    UnknownSymbolPolicy::Fail => {
                        return Err(Error::encoding(format!(
                            "symbol {:?} at position {} is not in the frequency table",
                            symbol, position
                        )));
                    }
                    UnknownSymbolPolicy::Skip => {
                        skipped += 1;
                        continue;
                    }
                }
            };

            if element.code().is_empty() {
                return Err(Error::state(format!(
                    "no code assigned to symbol {:?}",
                    symbol
                )));
            }

            bits.extend_from_bits(element.code());
        }

        if skipped > 0 {
            log::warn!(
                "Skipped {} symbols missing from the frequency table",
                skipped
            );
        }

        Ok(bits)
    }
}

/// Walks a Huffman tree bit by bit to reconstruct symbols
#[derive(Debug, Clone)]
pub struct Decoder<'a, S> {
    tree: &'a HuffmanTree<S>,
}

impl<'a, S: Symbol> Decoder<'a, S> {
    /// Create a decoder over `tree`
    pub fn new(tree: &'a HuffmanTree<S>) -> Self {
        Decoder { tree }
    }

    /// Decode `bits` until they are exhausted
    ///
    /// Fails if the bits end part-way through a code or, for a single-leaf
    /// tree, if a bit differs from the leaf's one-digit code. Partial output is
    /// discarded on failure.
    pub fn decode(&self, bits: &BitSequence) -> Result<Vec<S>> {
        let Some(root) = self.tree.root() else {
            if bits.is_empty() {
                return Ok(Vec::new());
            }
            return Err(Error::state(
                "nothing to decode against: tree was built from no symbols",
            ));
        };

        match root {
            HuffmanNode::Leaf(element) => {
                let Some(expected) = element.code().get(0) else {
                    return Err(Error::state(format!(
                        "no code assigned to symbol {:?}",
                        element.symbol()
                    )));
                };
                Self::decode_single(element.symbol(), expected, bits)
            }
            HuffmanNode::Internal { left, right, .. } => {
                Self::decode_walk((left.as_ref(), right.as_ref()), bits)
            }
        }
    }

    fn decode_single(symbol: &S, expected: Bit, bits: &BitSequence) -> Result<Vec<S>> {
        if let Some(position) = bits.iter().position(|bit| bit != expected) {
            return Err(Error::format(format!(
                "bit {} at position {} does not match single-symbol code {}",
                expected.flipped(),
                position,
                expected
            )));
        }
        Ok(vec![symbol.clone(); bits.len()])
    }

    fn decode_walk<'t>(
        root: (&'t HuffmanNode<S>, &'t HuffmanNode<S>),
        bits: &BitSequence,
    ) -> Result<Vec<S>> {
        let mut output = Vec::new();
        let mut children = root;
        let mut path_len = 0usize;

        for bit in bits.iter() {
            let next = match bit {
                Bit::Zero => children.0,
                Bit::One => children.1,
            };
            path_len += 1;

            match next {
                HuffmanNode::Leaf(element) => {
                    output.push(element.symbol().clone());
                    children = root;
                    path_len = 0;
                }
                HuffmanNode::Internal { left, right, .. } => {
                    children = (left.as_ref(), right.as_ref());
                }
            }
        }

        if path_len != 0 {
            return Err(Error::format(format!(
                "bit sequence ends {} bits into an incomplete code",
                path_len
            )));
        }

        Ok(output)
    }
}

/// Compresses symbol sequences and decompresses them against the retained tree
///
/// Every call to [`compress`](HuffmanCodec::compress) builds a fresh frequency
/// table and tree from its input, replacing whatever the codec held before.
/// [`decompress`](HuffmanCodec::decompress) decodes against the most recent
/// tree, so bits from an earlier compress call will not decode correctly after
/// the codec has been reused on different input.
#[derive(Debug, Clone)]
pub struct HuffmanCodec<S: Symbol> {
    config: CodecConfig,
    table: FrequencyTable<S>,
    tree: Option<HuffmanTree<S>>,
}

impl<S: Symbol> HuffmanCodec<S> {
    /// Create a codec with default configuration and no tree
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    /// Create a codec with the given configuration and no tree
    pub fn with_config(config: CodecConfig) -> Self {
        HuffmanCodec {
            config,
            table: FrequencyTable::new(),
            tree: None,
        }
    }

    /// Create a codec around an externally supplied tree
    ///
    /// Codes are (re)assigned on the tree and the frequency table is rebuilt
    /// from its leaves, so both [`encode`](Self::encode) and
    /// [`decompress`](Self::decompress) work immediately. A lone leaf that
    /// already carries a code keeps it; `config.single_symbol_bit` only
    /// applies to a lone leaf without one.
    pub fn from_tree(mut tree: HuffmanTree<S>, config: CodecConfig) -> Self {
        let single_symbol_bit = match tree.root() {
            Some(HuffmanNode::Leaf(element)) => {
                element.code().get(0).unwrap_or(config.single_symbol_bit)
            }
            _ => config.single_symbol_bit,
        };
        CodeAssigner::with_single_symbol_bit(single_symbol_bit).assign(&mut tree);
        let table = FrequencyTable::from_tree(&tree);

        HuffmanCodec {
            config,
            table,
            tree: Some(tree),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// The tree from the last compress call, if any
    pub fn tree(&self) -> Option<&HuffmanTree<S>> {
        self.tree.as_ref()
    }

    /// The frequency table from the last compress call
    pub fn frequency_table(&self) -> &FrequencyTable<S> {
        &self.table
    }

    /// Drop the retained table and tree
    pub fn reset(&mut self) {
        self.table = FrequencyTable::new();
        self.tree = None;
    }

    /// Build a table and tree from `symbols` and encode them
    pub fn compress(&mut self, symbols: &[S]) -> Result<BitSequence> {
        let mut table = FrequencyTable::from_symbols(symbols.iter().cloned());
        let mut tree = HuffmanTree::build(&table)?;
        CodeAssigner::with_single_symbol_bit(self.config.single_symbol_bit)
            .assign_into(&mut tree, &mut table);

        log::debug!(
            "Built tree over {} distinct symbols (depth {}) from {} input symbols",
            table.len(),
            tree.depth(),
            symbols.len()
        );

        self.table = table;
        self.tree = Some(tree);

        let bits = self.encode(symbols)?;
        log::debug!(
            "Compressed {} symbols into {} bits",
            symbols.len(),
            bits.len()
        );

        Ok(bits)
    }

    /// Encode `symbols` with the current codes, without rebuilding the tree
    pub fn encode(&self, symbols: &[S]) -> Result<BitSequence> {
        Encoder::with_policy(&self.table, self.config.unknown_symbols).encode(symbols)
    }

    /// Decode `bits` against the retained tree
    pub fn decompress(&self, bits: &BitSequence) -> Result<Vec<S>> {
        let tree = self.tree.as_ref().ok_or_else(|| {
            Error::state("no tree built: compress must run before decompress")
        })?;

        let symbols = Decoder::new(tree).decode(bits)?;
        log::debug!(
            "Decompressed {} bits into {} symbols",
            bits.len(),
            symbols.len()
        );

        Ok(symbols)
    }
}

impl HuffmanCodec<char> {
    /// Compress the characters of `text`
    pub fn compress_str(&mut self, text: &str) -> Result<BitSequence> {
        let symbols: Vec<char> = text.chars().collect();
        self.compress(&symbols)
    }

    /// Decompress `bits` into a string
    pub fn decompress_to_string(&self, bits: &BitSequence) -> Result<String> {
        Ok(self.decompress(bits)?.into_iter().collect())
    }
}

impl<S: Symbol> Default for HuffmanCodec<S> {
    fn default() -> Self {
        Self::new()
    }
}
