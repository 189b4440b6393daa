//! Huffman tree construction.

use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A node of a full binary Huffman tree. Children are owned by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: Symbol, weight: u64) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    pub fn merge(left: HuffNode, right: HuffNode) -> Self {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } | HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Build the tree for `freq`. Every symbol with a non-zero count becomes a
    /// leaf, so the result always contains the sentinel.
    ///
    /// Equal weights are broken by insertion order: leaves enter in ascending
    /// symbol order, merged nodes after them as they are created.
    pub fn build(freq: &FrequencyTable) -> HuffNode {
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;
        for (symbol, count) in freq.present() {
            heap.push(Pending::new(HuffNode::leaf(symbol, count), seq));
            seq += 1;
        }

        loop {
            let first = match heap.pop() {
                Some(p) => p.node,
                // present() always yields the sentinel
                None => return HuffNode::leaf(Symbol::PSEUDO_EOF, 1),
            };
            let second = match heap.pop() {
                Some(p) => p.node,
                None => {
                    tracing::debug!(
                        weight = first.weight(),
                        leaves = first.leaf_count(),
                        "built huffman tree"
                    );
                    return first;
                }
            };
            heap.push(Pending::new(HuffNode::merge(first, second), seq));
            seq += 1;
        }
    }
}

/// Heap entry ordered so that `BinaryHeap` pops the lowest weight first and,
/// among equal weights, the earliest inserted.
#[derive(Debug)]
struct Pending {
    weight: u64,
    seq: u64,
    node: HuffNode,
}

impl Pending {
    fn new(node: HuffNode, seq: u64) -> Self {
        Self {
            weight: node.weight(),
            seq,
            node,
        }
    }
}

impl Eq for Pending {}
impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
