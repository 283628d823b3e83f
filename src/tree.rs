use bitvec::prelude::*;
use derivative::Derivative;
use log::trace;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::bits::BitReader;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// A node of a Huffman tree. Children are owned by their parent, so dropping
/// the root releases the whole tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn leaf(symbol: u8, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    fn from_children(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Heap entry. Ordered by weight first, then by rank: a leaf ranks by its
/// symbol value and the k-th merged node ranks 256 + k, so equal weights
/// always resolve the same way.
#[derive(Debug, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
struct Ranked {
    weight: u64,
    rank: usize,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    node: Node,
}

const FIRST_INTERNAL_RANK: usize = 256;

/// Per-symbol root-to-leaf paths. `false` is a step to the left child,
/// `true` a step to the right child.
#[derive(Debug, Clone)]
pub struct CodeBook {
    codes: Vec<Option<BitBox<u8, Msb0>>>,
}

impl CodeBook {
    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes[symbol as usize].as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let mut pq: BinaryHeap<_> = table
            .iter()
            .map(|(symbol, count)| {
                Reverse(Ranked {
                    weight: count,
                    rank: symbol as usize,
                    node: Node::leaf(symbol, count),
                })
            })
            .collect();

        let mut next_rank = FIRST_INTERNAL_RANK;
        loop {
            let Reverse(left) = pq.pop().ok_or(Error::EmptyTable)?;
            let Some(Reverse(right)) = pq.pop() else {
                trace!(
                    "built tree over {} symbols, root weight {}",
                    table.len(),
                    left.weight
                );
                return Ok(Self { root: left.node });
            };

            let node = Node::from_children(left.node, right.node);
            pq.push(Reverse(Ranked {
                weight: node.weight(),
                rank: next_rank,
                node,
            }));
            next_rank += 1;
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    pub fn internal_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Internal { left, right, .. } => 1 + count(left) + count(right),
            }
        }
        count(&self.root)
    }

    /// Number of bits written for `symbol`, or `None` if it is not in the tree.
    ///
    /// A tree made of a single leaf still spends one bit per symbol.
    pub fn code_len(&self, symbol: u8) -> Option<usize> {
        fn depth(node: &Node, symbol: u8, d: usize) -> Option<usize> {
            match node {
                Node::Leaf { symbol: s, .. } => (*s == symbol).then_some(d),
                Node::Internal { left, right, .. } => {
                    depth(left, symbol, d + 1).or_else(|| depth(right, symbol, d + 1))
                }
            }
        }

        depth(&self.root, symbol, 0).map(|d| d.max(1))
    }

    pub fn code_book(&self) -> CodeBook {
        fn traverse(
            node: &Node,
            path: &mut BitVec<u8, Msb0>,
            codes: &mut [Option<BitBox<u8, Msb0>>],
        ) {
            match node {
                Node::Leaf { symbol, .. } => {
                    codes[*symbol as usize] = Some(path.clone().into_boxed_bitslice());
                }
                Node::Internal { left, right, .. } => {
                    path.push(false);
                    traverse(left, path, codes);
                    path.pop();

                    path.push(true);
                    traverse(right, path, codes);
                    path.pop();
                }
            }
        }

        let mut codes: Vec<Option<BitBox<u8, Msb0>>> = vec![None; 256];
        let mut path = BitVec::<u8, Msb0>::new();
        // lone symbol: the root is a leaf, give it the code `0`
        if self.root.is_leaf() {
            path.push(false);
        }
        traverse(&self.root, &mut path, &mut codes);

        CodeBook { codes }
    }

    /// Walks from the root following bits from `reader` until a leaf is
    /// reached. Returns `None` if the reader runs dry first.
    pub fn read_symbol(&self, reader: &mut BitReader<'_>) -> Option<u8> {
        if let Node::Leaf { symbol, .. } = &self.root {
            return reader.read_bit().map(|_| *symbol);
        }

        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { symbol, .. } => return Some(*symbol),
                Node::Internal { left, right, .. } => {
                    node = if reader.read_bit()? { right } else { left };
                }
            }
        }
    }
}
