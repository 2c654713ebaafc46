use {
    crate::{
        block::{Block, Links, Node},
        config::Config,
        error::{AllocationError, FreeError},
        Strategy,
    },
    core::{fmt, mem::replace},
    slab::Slab,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum List {
    Free,
    Used,
}

/// Sub-allocator for one page of fixed size.
///
/// Every byte of the page belongs to exactly one block,
/// either free or used.
/// Free blocks are never adjacent to each other,
/// freeing a block merges it with free neighbors.
///
/// Blocks are stored in an arena and chained into free and used lists by index.
/// Released records are recycled by the arena.
///
/// `Page` is not synchronized, wrap it in a mutex to share between threads.
pub struct Page {
    size: u32,
    strategy: Strategy,
    used: u32,
    nodes: Slab<Node>,
    free_head: Option<usize>,
    used_head: Option<usize>,
}

impl Page {
    /// Offset value that never designates an allocated block.
    /// Useful for callers that keep offsets in plain integers.
    pub const INVALID_OFFSET: u32 = u32::MAX;

    /// Creates new page of `size` bytes.
    /// Whole page starts as single free block.
    ///
    /// Page of zero size is valid but can't serve any allocation.
    #[cfg_attr(feature = "tracing", tracing::instrument)]
    pub fn new(size: u32, strategy: Strategy) -> Self {
        let mut page = Page {
            size,
            strategy,
            used: 0,
            nodes: Slab::new(),
            free_head: None,
            used_head: None,
        };
        page.init();
        page
    }

    /// Creates new page as specified by `config`.
    pub fn with_config(config: Config) -> Self {
        Page::new(config.size, config.strategy)
    }

    /// Returns size of this page in bytes.
    #[inline(always)]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns strategy this page picks free blocks with.
    #[inline(always)]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns total size of allocated blocks.
    #[inline(always)]
    pub fn used_size(&self) -> u32 {
        self.used
    }

    /// Returns total size of free blocks.
    /// Note that due to fragmentation allocation of that size may still fail.
    #[inline(always)]
    pub fn free_size(&self) -> u32 {
        self.size - self.used
    }

    /// Returns `true` if no block is currently allocated from this page.
    pub fn is_unused(&self) -> bool {
        self.used_head.is_none()
    }

    /// Iterates over free blocks in the order allocation scans them.
    pub fn free_blocks(&self) -> impl Iterator<Item = Block> + Clone + '_ {
        Links::new(&self.nodes, self.free_head).map(|(_, _, node)| node.block)
    }

    /// Iterates over allocated blocks, most recent allocation first.
    pub fn used_blocks(&self) -> impl Iterator<Item = Block> + Clone + '_ {
        Links::new(&self.nodes, self.used_head).map(|(_, _, node)| node.block)
    }

    /// Allocates block of exactly `size` bytes.
    /// Returns offset of the block from the start of the page.
    ///
    /// Page is left untouched on failure.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn allocate(&mut self, size: u32) -> Result<u32, AllocationError> {
        if size == 0 {
            return Err(AllocationError::EmptyRequest);
        }

        let found = match self.strategy {
            Strategy::FirstFit => self.first_fit(size),
            Strategy::BestFit => self.best_fit(size),
        };

        let (prev, index) = match found {
            Some(found) => found,
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    "No free block fits {} bytes. {} of {} bytes are free",
                    size,
                    self.free_size(),
                    self.size
                );
                return Err(AllocationError::OutOfPageMemory);
            }
        };

        let candidate = &mut self.nodes[index].block;
        let offset = candidate.offset;

        if candidate.size == size {
            self.unlink(List::Free, prev, index);
            self.link(List::Used, index);
        } else {
            candidate.offset += size;
            candidate.size -= size;

            let index = self.nodes.insert(Node {
                block: Block { offset, size },
                next: None,
            });
            self.link(List::Used, index);
        }

        self.used += size;
        Ok(offset)
    }

    /// Frees block that starts at `offset`.
    /// Freed block is merged with adjacent free blocks.
    ///
    /// Fails if no allocated block starts at `offset`.
    /// Page is left untouched in that case.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn free(&mut self, offset: u32) -> Result<(), FreeError> {
        let found = Links::new(&self.nodes, self.used_head)
            .find(|(_, _, node)| node.block.offset == offset)
            .map(|(prev, index, _)| (prev, index));

        let (prev, index) = match found {
            Some(found) => found,
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    "Attempt to free offset {} that is not allocated from this page",
                    offset
                );
                return Err(FreeError::UnknownOffset);
            }
        };

        self.unlink(List::Used, prev, index);
        let freed = self.nodes[index].block;
        self.used -= freed.size;

        let mut left = None;
        let mut right = None;

        for (prev, index, node) in Links::new(&self.nodes, self.free_head) {
            if node.block.end() == freed.offset {
                left = Some(index);
            } else if node.block.offset == freed.end() {
                right = Some((prev, index));
            }

            if left.is_some() && right.is_some() {
                break;
            }
        }

        match (left, right) {
            (Some(left), Some((prev, right))) => {
                self.unlink(List::Free, prev, right);
                let right = self.nodes.remove(right).block;
                self.nodes.remove(index);
                self.nodes[left].block.size += freed.size + right.size;
            }
            (Some(left), None) => {
                self.nodes.remove(index);
                self.nodes[left].block.size += freed.size;
            }
            (None, Some((_, right))) => {
                self.nodes.remove(index);
                let right = &mut self.nodes[right].block;
                right.offset = freed.offset;
                right.size += freed.size;
            }
            (None, None) => self.link(List::Free, index),
        }

        Ok(())
    }

    /// Returns page into state right after creation.
    /// All allocated blocks are released at once.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn reset(&mut self) {
        #[cfg(feature = "tracing")]
        if self.used_head.is_some() {
            tracing::debug!("Releasing {} bytes still in use", self.used);
        }

        self.init();
    }

    fn init(&mut self) {
        self.nodes.clear();
        self.used = 0;
        self.used_head = None;
        self.free_head = None;

        if self.size > 0 {
            let index = self.nodes.insert(Node {
                block: Block {
                    offset: 0,
                    size: self.size,
                },
                next: None,
            });
            self.free_head = Some(index);
        }
    }

    fn first_fit(&self, size: u32) -> Option<(Option<usize>, usize)> {
        Links::new(&self.nodes, self.free_head)
            .find(|(_, _, node)| node.block.size >= size)
            .map(|(prev, index, _)| (prev, index))
    }

    fn best_fit(&self, size: u32) -> Option<(Option<usize>, usize)> {
        let mut best: Option<(Option<usize>, usize, u32)> = None;

        for (prev, index, node) in Links::new(&self.nodes, self.free_head) {
            if node.block.size < size {
                continue;
            }

            let spare = node.block.size - size;
            if best.map_or(true, |(_, _, best_spare)| spare < best_spare) {
                best = Some((prev, index, spare));

                // Exact fit can't be beaten.
                if spare == 0 {
                    break;
                }
            }
        }

        best.map(|(prev, index, _)| (prev, index))
    }

    fn head_mut(&mut self, list: List) -> &mut Option<usize> {
        match list {
            List::Free => &mut self.free_head,
            List::Used => &mut self.used_head,
        }
    }

    /// Pushes node to the front of the list.
    fn link(&mut self, list: List, index: usize) {
        let head = replace(self.head_mut(list), Some(index));
        self.nodes[index].next = head;
    }

    /// Removes node from the list.
    /// `prev` must be the node preceding it in that list.
    fn unlink(&mut self, list: List, prev: Option<usize>, index: usize) {
        let next = self.nodes[index].next.take();
        match prev {
            Some(prev) => {
                debug_assert_eq!(self.nodes[prev].next, Some(index));
                self.nodes[prev].next = next;
            }
            None => {
                let head = self.head_mut(list);
                debug_assert_eq!(*head, Some(index));
                *head = next;
            }
        }
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Page")
            .field("size", &self.size)
            .field("strategy", &self.strategy)
            .field("used", &self.used)
            .field("used_blocks", &BlockList(self.used_blocks()))
            .field("free_blocks", &BlockList(self.free_blocks()))
            .finish()
    }
}

struct BlockList<I>(I);

impl<I> fmt::Debug for BlockList<I>
where
    I: Iterator<Item = Block> + Clone,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.0.clone()).finish()
    }
}
