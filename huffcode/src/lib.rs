//! # huffcode - Huffman prefix coding
//!
//! Builds optimal binary prefix codes for arbitrary symbol types and uses them
//! to compress a symbol stream into a bit-sequence and back.
//!
//! ## Pipeline
//!
//! 1. [`FrequencyTable`] counts each distinct symbol of the input.
//! 2. [`HuffmanTree::build`] seeds a [`PriorityQueue`] with one leaf per symbol
//!    and greedily merges the two lightest trees until one remains.
//! 3. [`CodeAssigner`] walks the tree, giving each leaf the path from the root
//!    (`0` = left, `1` = right) as its code.
//! 4. [`Encoder`] concatenates codes; [`Decoder`] walks the tree bit by bit.
//!
//! [`HuffmanCodec`] wraps the whole pipeline and keeps the tree needed to
//! decode.
//!
//! ## Example
//!
//! ```
//! use huffcode::HuffmanCodec;
//!
//! # fn main() -> Result<(), huffcode::Error> {
//! let mut codec = HuffmanCodec::<char>::new();
//! let bits = codec.compress_str("abracadabra")?;
//!
//! // 'a' occurs five times and gets the shortest code
//! assert_eq!(bits.len(), 23);
//! assert_eq!(codec.decompress_to_string(&bits)?, "abracadabra");
//! # Ok(())
//! # }
//! ```
//!
//! ## Termination
//!
//! The encoded stream carries no end-of-stream marker. Decoding stops when the
//! bits run out; a stream that ends part-way through a code is rejected with
//! [`Error::Format`].
//!
//! ## Sharing trees
//!
//! Bits only decode against the tree that produced them. To decode in another
//! process, ship the tree with [`HuffmanTree::to_bytes`] and rebuild a codec
//! with [`HuffmanCodec::from_tree`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod bits;
pub mod codec;
pub mod codes;
pub mod config;
pub mod error;
pub mod frequency;
pub mod queue;
pub mod serialize;
pub mod tree;

// Re-export commonly used types
pub use bits::{Bit, BitSequence};
pub use codec::{Decoder, Encoder, HuffmanCodec};
pub use codes::CodeAssigner;
pub use config::{CodecConfig, UnknownSymbolPolicy};
pub use error::{Error, Result};
pub use frequency::{Element, FrequencyTable, Symbol};
pub use queue::{PriorityQueue, Weighted};
pub use serialize::WireSymbol;
pub use tree::{HuffmanNode, HuffmanTree};
