use slab::Slab;

/// Contiguous range of bytes within a page.
/// Covers offsets from `offset` inclusive up to `end` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub(crate) offset: u32,
    pub(crate) size: u32,
}

impl Block {
    /// Returns offset in bytes from start of the page to start of this block.
    #[inline(always)]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Returns size of this block.
    #[inline(always)]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns offset in bytes from start of the page to end of this block.
    #[inline(always)]
    pub fn end(&self) -> u32 {
        self.offset + self.size
    }
}

/// Arena record for one block.
/// Linked into either free or used list of the owning page.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    pub block: Block,
    pub next: Option<usize>,
}

/// Walks list of nodes starting from `head`.
/// Yields index of previous node (if any), index of node and the node itself.
#[derive(Clone)]
pub(crate) struct Links<'a> {
    nodes: &'a Slab<Node>,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<'a> Links<'a> {
    pub fn new(nodes: &'a Slab<Node>, head: Option<usize>) -> Self {
        Links {
            nodes,
            prev: None,
            next: head,
        }
    }
}

impl<'a> Iterator for Links<'a> {
    type Item = (Option<usize>, usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let node = &self.nodes[index];
        let prev = core::mem::replace(&mut self.prev, Some(index));
        self.next = node.next;
        Some((prev, index, node))
    }
}
