//! Huffman tree construction and code assignment.
//!
//! The tree is built by repeatedly merging the two lightest nodes. Ties are
//! broken deterministically so that every build over the same frequencies
//! yields the same code lengths:
//!
//! - among equal weights, leaves are extracted before internal nodes, leaves
//!   with the larger symbol value first;
//! - internal nodes of equal weight are extracted in creation order;
//! - the first node extracted becomes the right child, the second the left.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::freq::FrequencyTable;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol of the alphabet.
    Leaf {
        /// Byte value.
        symbol: u8,
        /// Occurrence count.
        weight: u64,
    },
    /// A merge of two subtrees.
    Internal {
        /// Subtree reached with a `0` bit.
        left: Box<Node>,
        /// Subtree reached with a `1` bit.
        right: Box<Node>,
        /// Sum of both children's weights.
        weight: u64,
    },
}

impl Node {
    /// Weight of the subtree rooted here.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }
}

/// Working-set entry. `rank` orders equal weights: leaves take
/// `255 - symbol`, internal nodes `256 + creation index`.
#[derive(Debug)]
struct Entry {
    weight: u64,
    rank: u32,
    node: Node,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.rank == other.rank
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-priority queue
        (other.weight, other.rank).cmp(&(self.weight, self.rank))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A binary prefix tree over the alphabet of a [`FrequencyTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for `freq`.
    ///
    /// Returns `None` for an empty alphabet. A single-symbol alphabet yields a
    /// lone leaf without any merge.
    pub fn build(freq: &FrequencyTable) -> Option<Self> {
        let mut pq: BinaryHeap<Entry> = freq
            .iter()
            .map(|(symbol, weight)| Entry {
                weight,
                rank: 255 - symbol as u32,
                node: Node::Leaf { symbol, weight },
            })
            .collect();

        let mut next_rank = 256;
        while pq.len() > 1 {
            let (Some(right), Some(left)) = (pq.pop(), pq.pop()) else {
                unreachable!("heap holds at least two entries");
            };
            let weight = left.weight + right.weight;
            pq.push(Entry {
                weight,
                rank: next_rank,
                node: Node::Internal {
                    left: Box::new(left.node),
                    right: Box::new(right.node),
                    weight,
                },
            });
            next_rank += 1;
        }

        pq.pop().map(|entry| Self { root: entry.node })
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Assign a bit string to every leaf: `0` for a left edge, `1` for a
    /// right edge. A lone leaf gets the code `0`.
    pub fn code_table(&self) -> CodeTable {
        let mut codes = vec![Vec::new(); 256];
        Self::build_codes(&self.root, Vec::new(), &mut codes);
        CodeTable { codes }
    }

    fn build_codes(node: &Node, prefix: Vec<u8>, codes: &mut [Vec<u8>]) {
        match node {
            Node::Leaf { symbol, .. } => {
                codes[*symbol as usize] = if prefix.is_empty() { vec![0] } else { prefix };
            }
            Node::Internal { left, right, .. } => {
                let mut left_prefix = prefix.clone();
                left_prefix.push(0);
                Self::build_codes(left, left_prefix, codes);

                let mut right_prefix = prefix;
                right_prefix.push(1);
                Self::build_codes(right, right_prefix, codes);
            }
        }
    }
}

/// Symbol to code mapping. Codes are sequences of `0`/`1` bytes, most
/// significant bit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Vec<u8>>, // symbol -> bit sequence
}

impl CodeTable {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            codes: vec![Vec::new(); 256],
        }
    }

    /// Code for `symbol`, if it belongs to the alphabet.
    pub fn get(&self, symbol: u8) -> Option<&[u8]> {
        let code = &self.codes[symbol as usize];
        (!code.is_empty()).then_some(code.as_slice())
    }

    /// `(symbol, code)` for every coded symbol, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[u8])> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(|(s, c)| (s as u8, c.as_slice()))
    }

    /// Number of coded symbols.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| !c.is_empty()).count()
    }

    /// True when no symbol is coded.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|c| c.is_empty())
    }

    pub(crate) fn set(&mut self, symbol: u8, code: Vec<u8>) {
        self.codes[symbol as usize] = code;
    }
}
