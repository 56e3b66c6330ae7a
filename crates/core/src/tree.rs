//! Huffman tree construction and its self-delimiting serialization.
//!
//! # Construction
//!
//! One leaf per symbol of the frequency table goes into a min-priority queue
//! keyed by weight. The two lightest nodes are popped, joined under a new
//! internal node (first popped on the left) and pushed back until a single
//! root remains.
//!
//! Ties are broken by insertion order: leaves are inserted in ascending
//! symbol order, and every merged node is inserted after everything before
//! it. The same table therefore always yields the same tree shape.
//!
//! # Serialized Form
//!
//! Pre-order, one tag bit per node:
//!
//! ```text
//! leaf:     0 sssssssss        (9-bit symbol)
//! internal: 1 <left> <right>
//! ```
//!
//! No count or length is stored; the tags alone say where the tree ends.
//!
//! # Single-Symbol Trees
//!
//! A table with one symbol produces a tree whose root is that leaf. Its code
//! is the single bit `0` (the empty right slot is never reachable), so even
//! the EOF of an empty input costs one bit. The serialized form is just the
//! leaf, which cannot be confused with any larger tree: their first tag is `1`.
//!
//! All traversals use explicit stacks, so tree depth (at most 256 for 257
//! distinct symbols) never turns into call-stack depth.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::bitio::{BitReader, BitWriter};
use crate::error::{ArchiveSection, HuffmanError, Result};
use crate::symbol::{FrequencyTable, Symbol};

/// A node of a Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Holds exactly one symbol
    Leaf(Symbol),
    /// Holds exactly two children; bit 0 selects `left`, bit 1 selects `right`
    Internal { left: Box<Node>, right: Box<Node> },
}

impl Node {
    fn join(left: Node, right: Node) -> Node {
        Node::Internal {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }
}

/// A node waiting in the construction queue.
struct Weighted {
    weight: u64,
    /// Insertion sequence number, the tie-breaker
    seq: u64,
    node: Node,
}

impl PartialEq for Weighted {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl Eq for Weighted {}

impl PartialOrd for Weighted {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Weighted {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lighter, then older = higher priority)
        (other.weight, other.seq).cmp(&(self.weight, self.seq))
    }
}

/// An immutable Huffman tree.
///
/// Equality is structural: same symbols at the same positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// # Errors
    /// `HuffmanError::EmptyFrequencyTable` if no symbol has a non-zero count.
    pub fn from_frequencies(table: &FrequencyTable) -> Result<Self> {
        let mut queue = BinaryHeap::with_capacity(Symbol::COUNT);
        let mut seq = 0u64;
        for (symbol, weight) in table.iter() {
            queue.push(Weighted {
                weight,
                seq,
                node: Node::Leaf(symbol),
            });
            seq += 1;
        }

        loop {
            match (queue.pop(), queue.pop()) {
                (None, _) => return Err(HuffmanError::EmptyFrequencyTable.into()),
                (Some(root), None) => {
                    let tree = Self { root: root.node };
                    tracing::trace!(
                        "built huffman tree: {} leaves, depth {}",
                        tree.leaf_count(),
                        tree.depth()
                    );
                    return Ok(tree);
                }
                (Some(left), Some(right)) => {
                    queue.push(Weighted {
                        // counts come from u64 tables; saturate rather than wrap
                        weight: left.weight.saturating_add(right.weight),
                        seq,
                        node: Node::join(left.node, right.node),
                    });
                    seq += 1;
                }
            }
        }
    }

    /// Count `data` (plus one EOF) and build its tree.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    /// Read a serialized tree, leaving `reader` on the first bit after it.
    ///
    /// # Errors
    /// - `HuffmanError::TruncatedArchive` if the bits run out mid-tree
    /// - `HuffmanError::InvalidSymbol` for a leaf value above 256
    /// - `HuffmanError::DuplicateSymbol` if a symbol has two leaves
    pub fn deserialize(reader: &mut BitReader<'_>) -> Result<Self> {
        // Internal nodes still being filled: `None` while the left subtree is
        // being read, `Some(left)` while the right one is.
        let mut open: Vec<Option<Node>> = Vec::new();
        let mut seen = [false; Symbol::COUNT];

        loop {
            let position = reader.position();
            let internal = reader
                .read_bit()
                .map_err(|e| e.truncated_in(ArchiveSection::Tree, position))?;
            if internal {
                open.push(None);
                continue;
            }

            let position = reader.position();
            let value = reader
                .read_bits(Symbol::BITS)
                .map_err(|e| e.truncated_in(ArchiveSection::Tree, position))?;
            let symbol = Symbol::new(value as u16)?;
            if std::mem::replace(&mut seen[symbol.index()], true) {
                return Err(HuffmanError::DuplicateSymbol(symbol.value()).into());
            }

            // Hang the finished subtree on its parent, closing every parent
            // whose right child it completes.
            let mut done = Node::Leaf(symbol);
            loop {
                match open.pop() {
                    None => return Ok(Self { root: done }),
                    Some(None) => {
                        open.push(Some(done));
                        break;
                    }
                    Some(Some(left)) => done = Node::join(left, done),
                }
            }
        }
    }

    /// Write the pre-order serialized form of the tree.
    pub fn serialize(&self, writer: &mut BitWriter) -> Result<()> {
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf(symbol) => {
                    writer.write_bit(false)?;
                    writer.write_bits(symbol.value() as u64, Symbol::BITS)?;
                }
                Node::Internal { left, right } => {
                    writer.write_bit(true)?;
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
            }
        }
        Ok(())
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The symbol of a single-symbol tree, whose root is its only leaf.
    ///
    /// That leaf sits on the left of an implicit root, so its code is `0`.
    pub fn lone_symbol(&self) -> Option<Symbol> {
        match self.root {
            Node::Leaf(symbol) => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Visit every leaf left to right with the path that reaches it.
    ///
    /// `step` extends a path by one edge (`true` = right).
    pub(crate) fn for_each_leaf<P: Copy>(
        &self,
        root: P,
        step: impl Fn(P, bool) -> P,
        mut visit: impl FnMut(Symbol, P),
    ) {
        if let Some(symbol) = self.lone_symbol() {
            visit(symbol, step(root, false));
            return;
        }

        let mut stack = vec![(&self.root, root)];
        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf(symbol) => visit(*symbol, path),
                Node::Internal { left, right } => {
                    stack.push((right.as_ref(), step(path, true)));
                    stack.push((left.as_ref(), step(path, false)));
                }
            }
        }
    }

    /// Every leaf with its code length, left to right.
    pub fn leaves(&self) -> Vec<(Symbol, usize)> {
        let mut leaves = Vec::new();
        self.for_each_leaf(0usize, |depth, _| depth + 1, |symbol, depth| {
            leaves.push((symbol, depth))
        });
        leaves
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        self.leaves().iter().map(|&(_, d)| d).max().unwrap_or(1)
    }

    /// Number of bits `serialize` writes.
    pub fn serialized_bits(&self) -> usize {
        let leaves = self.leaf_count();
        // n leaves: n * (1 + 9) bits, plus one tag per internal node (n - 1)
        leaves * (1 + Symbol::BITS) + (leaves - 1)
    }
}
