//! Tree shape serialization
//!
//! Bits are only meaningful next to the tree that produced them. This module
//! writes a tree's exact shape so a decoder in another process rebuilds the
//! same codes, independent of heap tie-breaking. The shape fixes every code
//! except that of a lone leaf, whose digit is recorded in the header flags.
//!
//! Layout (little-endian):
//!
//! ```text
//! u32            leaf count
//! u8             flags
//!   bit 0        lone leaf carries a code
//!   bit 1        that code is `1` (clear: `0`)
//! node*          pre-order walk
//!   u8 = 0       internal node, followed by left then right subtree
//!   u8 = 1       leaf, followed by the symbol and a u64 frequency
//! ```

use crate::bits::{Bit, BitSequence};
use crate::frequency::{Element, Symbol};
use crate::tree::{HuffmanNode, HuffmanTree};
use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::collections::HashSet;
use std::io::{Cursor, Read, Write};

/// Tag byte preceding an internal node
const INTERNAL_TAG: u8 = 0;

/// Tag byte preceding a leaf
const LEAF_TAG: u8 = 1;

/// Header flag: the lone leaf of a single-symbol tree carries a code
const FLAG_LONE_CODE: u8 = 0x01;

/// Header flag: the lone leaf's code is `1`
const FLAG_LONE_CODE_ONE: u8 = 0x02;

/// Deepest tree accepted when reading
///
/// Huffman trees over `u64` weights cannot exceed this depth, so anything
/// deeper is corrupt or hostile.
pub const MAX_TREE_DEPTH: usize = 128;

/// Symbols with a fixed binary representation
pub trait WireSymbol: Symbol + Sized {
    /// Write the symbol
    fn write_symbol<W: Write>(&self, writer: &mut W) -> Result<()>;

    /// Read a symbol
    fn read_symbol<R: Read>(reader: &mut R) -> Result<Self>;
}

impl WireSymbol for u8 {
    fn write_symbol<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(*self)?;
        Ok(())
    }

    fn read_symbol<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(reader.read_u8()?)
    }
}

impl WireSymbol for u16 {
    fn write_symbol<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u16::<LittleEndian>(*self)?;
        Ok(())
    }

    fn read_symbol<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(reader.read_u16::<LittleEndian>()?)
    }
}

impl WireSymbol for u32 {
    fn write_symbol<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(*self)?;
        Ok(())
    }

    fn read_symbol<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(reader.read_u32::<LittleEndian>()?)
    }
}

impl WireSymbol for char {
    fn write_symbol<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(*self as u32)?;
        Ok(())
    }

    fn read_symbol<R: Read>(reader: &mut R) -> Result<Self> {
        let value = reader.read_u32::<LittleEndian>()?;
        char::from_u32(value)
            .ok_or_else(|| Error::format(format!("invalid char scalar value 0x{:08X}", value)))
    }
}

impl<S: WireSymbol> HuffmanTree<S> {
    /// Write the tree shape and leaf frequencies to `writer`
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let leaf_count = u32::try_from(self.leaf_count())
            .map_err(|_| Error::format("tree has more than u32::MAX leaves"))?;
        writer.write_u32::<LittleEndian>(leaf_count)?;
        writer.write_u8(self.header_flags())?;

        let mut stack: Vec<&HuffmanNode<S>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            match node {
                HuffmanNode::Leaf(element) => {
                    writer.write_u8(LEAF_TAG)?;
                    element.symbol().write_symbol(writer)?;
                    writer.write_u64::<LittleEndian>(element.frequency())?;
                }
                HuffmanNode::Internal { left, right, .. } => {
                    writer.write_u8(INTERNAL_TAG)?;
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
            }
        }

        Ok(())
    }

    /// Read a tree written by [`write_to`](Self::write_to)
    ///
    /// Only a lone leaf's code is restored. Run a
    /// [`CodeAssigner`](crate::codes::CodeAssigner) (or
    /// [`HuffmanCodec::from_tree`](crate::HuffmanCodec::from_tree)) before
    /// encoding or decoding.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let leaf_count = reader.read_u32::<LittleEndian>()?;
        let flags = reader.read_u8()?;

        if flags & !(FLAG_LONE_CODE | FLAG_LONE_CODE_ONE) != 0 {
            return Err(Error::format(format!("unknown tree flags 0x{:02X}", flags)));
        }
        if flags == FLAG_LONE_CODE_ONE {
            return Err(Error::format("lone-leaf code digit set without a code"));
        }
        if flags != 0 && leaf_count != 1 {
            return Err(Error::format(format!(
                "lone-leaf code flags on a tree with {} leaves",
                leaf_count
            )));
        }

        if leaf_count == 0 {
            return Ok(Self::empty());
        }

        let mut reader = NodeReader {
            reader,
            leaves_left: leaf_count,
            seen: HashSet::new(),
        };
        let root = reader.read_node(0)?;

        if reader.leaves_left != 0 {
            return Err(Error::format(format!(
                "tree header announces {} leaves, found {}",
                leaf_count,
                leaf_count - reader.leaves_left
            )));
        }

        let mut tree = Self::from_root(root);
        if flags & FLAG_LONE_CODE != 0 {
            if let Some(HuffmanNode::Leaf(element)) = tree.root_mut() {
                let bit = Bit::from(flags & FLAG_LONE_CODE_ONE != 0);
                element.set_code(BitSequence::from_iter([bit]));
            }
        }

        Ok(tree)
    }

    fn header_flags(&self) -> u8 {
        let Some(HuffmanNode::Leaf(element)) = self.root() else {
            return 0;
        };

        match element.code().get(0) {
            Some(Bit::Zero) => FLAG_LONE_CODE,
            Some(Bit::One) => FLAG_LONE_CODE | FLAG_LONE_CODE_ONE,
            None => 0,
        }
    }

    /// Serialize into a byte vector
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Deserialize from a byte slice, rejecting trailing data
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let tree = Self::read_from(&mut cursor)?;

        let consumed = cursor.position() as usize;
        if consumed != data.len() {
            return Err(Error::format(format!(
                "{} trailing bytes after tree data",
                data.len() - consumed
            )));
        }

        Ok(tree)
    }
}

struct NodeReader<'r, R, S> {
    reader: &'r mut R,
    leaves_left: u32,
    seen: HashSet<S>,
}

impl<R: Read, S: WireSymbol> NodeReader<'_, R, S> {
    fn read_node(&mut self, depth: usize) -> Result<HuffmanNode<S>> {
        if depth > MAX_TREE_DEPTH {
            return Err(Error::format(format!(
                "tree deeper than {} levels",
                MAX_TREE_DEPTH
            )));
        }

        match self.reader.read_u8()? {
            LEAF_TAG => {
                if self.leaves_left == 0 {
                    return Err(Error::format("more leaves than the header announces"));
                }
                self.leaves_left -= 1;

                let symbol = S::read_symbol(self.reader)?;
                if !self.seen.insert(symbol.clone()) {
                    return Err(Error::format(format!("duplicate leaf symbol {:?}", symbol)));
                }
                let frequency = self.reader.read_u64::<LittleEndian>()?;

                Ok(HuffmanNode::leaf(Element::new(symbol, frequency)))
            }
            INTERNAL_TAG => {
                let left = self.read_node(depth + 1)?;
                let right = self.read_node(depth + 1)?;
                HuffmanNode::merge(left, right)
            }
            tag => Err(Error::format(format!("unknown node tag 0x{:02X}", tag))),
        }
    }
}
