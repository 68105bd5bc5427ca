//! Logical bit-sequences with packed storage
//!
//! A [`BitSequence`] is an ordered sequence of binary digits. Storage is a
//! `BitVec<u8, Msb0>`: eight digits per byte, most significant bit first, with
//! the logical length tracked by the vector so trailing padding is never
//! observable.

use crate::{Error, Result};
use bitvec::order::Msb0;
use bitvec::vec::BitVec;
use std::fmt;
use std::str::FromStr;

/// A single binary digit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum Bit {
    /// Binary `0` (walk to the left child)
    #[default]
    Zero,
    /// Binary `1` (walk to the right child)
    One,
}

impl Bit {
    /// Parse a textual digit (`'0'` or `'1'`)
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            other => Err(Error::format(format!("invalid bit digit {:?}", other))),
        }
    }

    /// Textual digit for this bit
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    /// The opposite digit
    pub fn flipped(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit == Bit::One
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        match bit {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }
}

impl TryFrom<u8> for Bit {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(Error::format(format!(
                "bit value {} outside of {{0, 1}}",
                other
            ))),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Ordered sequence of bits packed eight per byte
///
/// Bits beyond `len` in the final byte are always zero, so the packed form of
/// two equal sequences is identical regardless of how they were built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitSequence {
    bits: BitVec<u8, Msb0>,
}

impl BitSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sequence with room for `bits` digits
    pub fn with_capacity(bits: usize) -> Self {
        BitSequence {
            bits: BitVec::with_capacity(bits),
        }
    }

    /// Rebuild a sequence from packed bytes and its logical bit length
    ///
    /// `bytes` must hold exactly `len.div_ceil(8)` bytes. Padding bits in the
    /// last byte are cleared.
    pub fn from_packed(bytes: &[u8], len: usize) -> Result<Self> {
        let expected = len.div_ceil(8);
        if bytes.len() != expected {
            return Err(Error::format(format!(
                "packed length mismatch: {} bits need {} bytes, got {}",
                len,
                expected,
                bytes.len()
            )));
        }

        let mut bits = BitVec::<u8, Msb0>::from_slice(bytes);
        bits.truncate(len);
        bits.set_uninitialized(false);

        Ok(BitSequence { bits })
    }

    /// Number of logical bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the sequence holds no bits
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Packed storage, most significant bit first
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// Append one bit
    pub fn push(&mut self, bit: Bit) {
        self.bits.push(bool::from(bit));
    }

    /// Append every bit of `other`
    pub fn extend_from_bits(&mut self, other: &BitSequence) {
        self.bits.extend_from_bitslice(other.bits.as_bitslice());
    }

    /// Bit at `index`, if in range
    pub fn get(&self, index: usize) -> Option<Bit> {
        self.bits.get(index).map(|bit| Bit::from(*bit))
    }

    /// Iterate over the bits in order
    pub fn iter(&self) -> Bits<'_> {
        Bits {
            seq: self,
            front: 0,
            back: self.len(),
        }
    }

    /// Whether `self` is a (non-strict) prefix of `other`
    pub fn is_prefix_of(&self, other: &BitSequence) -> bool {
        other.bits.starts_with(self.bits.as_bitslice())
    }
}

/// Iterator over the bits of a [`BitSequence`]
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    seq: &'a BitSequence,
    front: usize,
    back: usize,
}

impl Iterator for Bits<'_> {
    type Item = Bit;

    fn next(&mut self) -> Option<Bit> {
        if self.front >= self.back {
            return None;
        }
        let bit = self.seq.get(self.front);
        self.front += 1;
        bit
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Bits<'_> {
    fn next_back(&mut self) -> Option<Bit> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.seq.get(self.back)
    }
}

impl ExactSizeIterator for Bits<'_> {}

impl<'a> IntoIterator for &'a BitSequence {
    type Item = Bit;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Bit> for BitSequence {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        let mut seq = BitSequence::new();
        seq.extend(iter);
        seq
    }
}

impl Extend<Bit> for BitSequence {
    fn extend<I: IntoIterator<Item = Bit>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}

impl TryFrom<&[u8]> for BitSequence {
    type Error = Error;

    /// Build from unpacked digit values, one `0` or `1` per byte
    fn try_from(digits: &[u8]) -> Result<Self> {
        let mut seq = BitSequence::with_capacity(digits.len());
        for (position, &value) in digits.iter().enumerate() {
            let bit = Bit::try_from(value).map_err(|_| {
                Error::format(format!(
                    "bit value {} at position {} outside of {{0, 1}}",
                    value, position
                ))
            })?;
            seq.push(bit);
        }
        Ok(seq)
    }
}

impl FromStr for BitSequence {
    type Err = Error;

    /// Parse a string of `'0'` and `'1'` characters
    fn from_str(s: &str) -> Result<Self> {
        let mut seq = BitSequence::with_capacity(s.len());
        for (position, c) in s.chars().enumerate() {
            let bit = Bit::from_char(c).map_err(|_| {
                Error::format(format!(
                    "invalid bit digit {:?} at position {}",
                    c, position
                ))
            })?;
            seq.push(bit);
        }
        Ok(seq)
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            write!(f, "{}", bit.as_char())?;
        }
        Ok(())
    }
}
