//! Tree header codec.
//!
//! The tree is stored in preorder: `0` for an internal node followed by its
//! left then right subtree, `1` for a leaf followed by the 9-bit symbol value.
//! Both directions use an explicit stack so a skewed tree cannot exhaust the
//! call stack.

use crate::bitio::{BitSink, BitSource};
use crate::error::{CompressError, Result};
use crate::symbol::{Symbol, BITS_PER_SYMBOL, SYMBOL_COUNT};
use crate::tree::HuffNode;
use std::io;

/// A full tree over the alphabet has at most this many internal nodes.
pub const MAX_INTERNAL_NODES: usize = SYMBOL_COUNT - 1;

/// Write `root` in preorder. Returns the number of bits written.
pub fn write_tree<W: BitSink>(root: &HuffNode, out: &mut W) -> io::Result<u64> {
    let mut bits = 0u64;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node {
            HuffNode::Internal { left, right, .. } => {
                out.write_bit(false)?;
                bits += 1;
                stack.push(right);
                stack.push(left);
            }
            HuffNode::Leaf { symbol, .. } => {
                out.write_bit(true)?;
                out.write_bits(BITS_PER_SYMBOL, symbol.value())?;
                bits += 1 + BITS_PER_SYMBOL as u64;
            }
        }
    }
    Ok(bits)
}

/// An internal node whose children are still being read.
enum Frame {
    AwaitingLeft,
    AwaitingRight(HuffNode),
}

/// Rebuild a tree written by [`write_tree`]. Returns the tree and the number of
/// bits consumed. Rebuilt nodes carry weight 0.
pub fn read_tree<R: BitSource>(input: &mut R) -> Result<(HuffNode, u64)> {
    let mut bits = 0u64;
    let mut stack: Vec<Frame> = Vec::new();
    let mut internal = 0usize;

    loop {
        let is_leaf = input
            .read_bit()?
            .ok_or(CompressError::TruncatedHeader)?;
        bits += 1;

        if !is_leaf {
            internal += 1;
            if internal > MAX_INTERNAL_NODES {
                return Err(CompressError::MalformedHeader {
                    max_internal: MAX_INTERNAL_NODES,
                });
            }
            stack.push(Frame::AwaitingLeft);
            continue;
        }

        let value = input
            .read_bits(BITS_PER_SYMBOL)?
            .ok_or(CompressError::TruncatedHeader)?;
        bits += BITS_PER_SYMBOL as u64;
        let mut node = HuffNode::leaf(Symbol::try_from(value)?, 0);

        // Attach the finished subtree to its parent, completing parents as
        // their right child arrives.
        loop {
            match stack.pop() {
                None => {
                    tracing::debug!(header_bits = bits, internal, "read tree header");
                    return Ok((node, bits));
                }
                Some(Frame::AwaitingLeft) => {
                    stack.push(Frame::AwaitingRight(node));
                    break;
                }
                Some(Frame::AwaitingRight(left)) => {
                    node = HuffNode::merge(left, node);
                }
            }
        }
    }
}
