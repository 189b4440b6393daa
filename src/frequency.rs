//! Symbol frequency analysis.

use crate::bitio::BitSource;
use crate::error::{CompressError, Result};
use crate::symbol::{Symbol, BITS_PER_WORD, SYMBOL_COUNT};

/// Occurrence count for every symbol of the alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// Count every 8-bit unit until end of stream. The source is left at its
    /// end; callers must reset before reading it again.
    pub fn count<S: BitSource>(input: &mut S, max_input_size: u64) -> Result<Self> {
        let mut counts = [0u64; SYMBOL_COUNT];
        let mut read = 0u64;
        while let Some(value) = input.read_bits(BITS_PER_WORD)? {
            read += 1;
            if read > max_input_size {
                return Err(CompressError::InputTooLarge {
                    limit: max_input_size,
                });
            }
            counts[value as usize] += 1;
        }
        Ok(Self::from_counts(counts))
    }

    /// Build a table from raw byte data.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; SYMBOL_COUNT];
        for &b in data {
            counts[b as usize] += 1;
        }
        Self::from_counts(counts)
    }

    /// The sentinel count is forced to 1 whatever `counts` holds for it.
    pub fn from_counts(mut counts: [u64; SYMBOL_COUNT]) -> Self {
        counts[Symbol::PSEUDO_EOF.index()] = 1;
        Self { counts }
    }

    pub fn get(&self, symbol: Symbol) -> u64 {
        self.counts[symbol.index()]
    }

    /// Symbols with a non-zero count, ascending. Always includes the sentinel.
    pub fn present(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        Symbol::all()
            .map(move |s| (s, self.get(s)))
            .filter(|&(_, c)| c > 0)
    }

    /// Number of literal bytes counted.
    pub fn total(&self) -> u64 {
        self.present()
            .filter(|(s, _)| !s.is_eof())
            .map(|(_, c)| c)
            .sum()
    }

    /// Number of distinct symbols, sentinel included.
    pub fn distinct(&self) -> usize {
        self.present().count()
    }

    /// Shannon entropy of the literal distribution in bits per byte.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let len = total as f64;
        let mut entropy = 0.0;
        for (symbol, count) in self.present() {
            if symbol.is_eof() {
                continue;
            }
            let p = count as f64 / len;
            entropy -= p * p.log2();
        }
        entropy
    }
}
