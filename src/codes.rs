//! Prefix code extraction from a Huffman tree.

use crate::bitio::BitSink;
use crate::symbol::Symbol;
use crate::tree::HuffNode;
use std::collections::BTreeMap;
use std::fmt;
use std::io;

/// A single prefix code, root to leaf. `false` is a left step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }

    pub fn write_to<W: BitSink>(&self, out: &mut W) -> io::Result<()> {
        for &bit in &self.0 {
            out.write_bit(bit)?;
        }
        Ok(())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping for every leaf of one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Code>,
}

impl CodeTable {
    /// Walk `root` and record the path to each leaf. A root that is itself a
    /// leaf gets the one-bit code `0`.
    pub fn from_tree(root: &HuffNode) -> Self {
        let mut codes = BTreeMap::new();
        match root {
            HuffNode::Leaf { symbol, .. } => {
                codes.insert(*symbol, Code(vec![false]));
            }
            HuffNode::Internal { .. } => build_codes(root, &mut Vec::new(), &mut codes),
        }
        for (symbol, code) in &codes {
            tracing::trace!(%symbol, %code, "assigned code");
        }
        Self { codes }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> {
        self.codes.iter().map(|(s, c)| (*s, c))
    }
}

fn build_codes(node: &HuffNode, prefix: &mut Vec<bool>, codes: &mut BTreeMap<Symbol, Code>) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, Code(prefix.clone()));
        }
        HuffNode::Internal { left, right, .. } => {
            prefix.push(false);
            build_codes(left, prefix, codes);
            prefix.pop();
            prefix.push(true);
            build_codes(right, prefix, codes);
            prefix.pop();
        }
    }
}
