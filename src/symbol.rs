//! The fixed symbol alphabet and format constants.

use crate::error::{CompressError, Result};
use std::fmt;

/// Width of one literal input unit.
pub const BITS_PER_WORD: u32 = 8;
/// Width of the magic number at the start of a compressed stream.
pub const BITS_PER_INT: u32 = 32;
/// Width of a leaf's symbol value in the tree header; holds 0..=256.
pub const BITS_PER_SYMBOL: u32 = BITS_PER_WORD + 1;
/// Number of literal byte values.
pub const ALPH_SIZE: usize = 1 << BITS_PER_WORD;
/// Literals plus the end-of-stream sentinel.
pub const SYMBOL_COUNT: usize = ALPH_SIZE + 1;

pub const HUFF_NUMBER: u32 = 0xface_8200;
/// Magic number of the tree-headed format.
pub const HUFF_TREE: u32 = HUFF_NUMBER | 1;

/// A member of the alphabet: a literal byte or the end-of-stream sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u16);

impl Symbol {
    /// The synthetic end-of-stream marker. Never read from input.
    pub const PSEUDO_EOF: Symbol = Symbol(ALPH_SIZE as u16);

    pub fn from_byte(byte: u8) -> Self {
        Symbol(byte as u16)
    }

    pub fn is_eof(self) -> bool {
        self == Self::PSEUDO_EOF
    }

    /// The literal byte, or `None` for the sentinel.
    pub fn as_byte(self) -> Option<u8> {
        u8::try_from(self.0).ok()
    }

    pub fn value(self) -> u32 {
        self.0 as u32
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Every symbol in ascending order, sentinel last.
    pub fn all() -> impl Iterator<Item = Symbol> {
        (0..SYMBOL_COUNT as u16).map(Symbol)
    }
}

impl TryFrom<u32> for Symbol {
    type Error = CompressError;

    fn try_from(value: u32) -> Result<Self> {
        if value as usize >= SYMBOL_COUNT {
            return Err(CompressError::InvalidSymbol(value));
        }
        Ok(Symbol(value as u16))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_byte() {
            Some(b) if b.is_ascii_graphic() => write!(f, "'{}'", b as char),
            Some(b) => write!(f, "0x{:02x}", b),
            None => f.write_str("EOF"),
        }
    }
}
