//! Bit-level packing, most-significant bit first within each byte.

use bitvec::prelude::*;

#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn write_bits(&mut self, bits: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(bits);
    }

    /// Bits written so far, excluding padding.
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Pads the last partial byte with zeros and returns the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        let padded = self.bits.len().div_ceil(8) * 8;
        self.bits.resize(padded, false);
        self.bits.into_vec()
    }
}

/// Reads bits back out of a byte slice. Never looks past the end of the
/// slice: once every bit has been consumed `read_bit` keeps returning `None`.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bits: bytes.view_bits::<Msb0>(),
            pos: 0,
        }
    }

    pub fn read_bit(&mut self) -> Option<bool> {
        let bit = *self.bits.get(self.pos)?;
        self.pos += 1;
        Some(bit)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }
}
