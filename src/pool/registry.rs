/*!
 * Block Registry
 * Ordered sequence of live block descriptors
 */

use super::types::{BlockDescriptor, Handle};
use crate::core::types::Size;

/// Live descriptors in insertion order.
///
/// Lookup is a linear scan. Order only changes by removal; compaction
/// rewrites offsets in place and keeps the sequence as is.
#[derive(Debug, Default)]
pub(super) struct BlockRegistry {
    blocks: Vec<BlockDescriptor>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Index of the descriptor for `handle`
    #[inline]
    pub fn position(&self, handle: Handle) -> Option<usize> {
        self.blocks.iter().position(|block| block.handle == handle)
    }

    pub fn get(&self, handle: Handle) -> Option<&BlockDescriptor> {
        self.blocks.iter().find(|block| block.handle == handle)
    }

    #[inline]
    pub fn at_mut(&mut self, index: usize) -> &mut BlockDescriptor {
        &mut self.blocks[index]
    }

    pub fn push(&mut self, block: BlockDescriptor) {
        self.blocks.push(block);
    }

    /// Excise the descriptor at `index`, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> BlockDescriptor {
        self.blocks.remove(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BlockDescriptor> {
        self.blocks.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, BlockDescriptor> {
        self.blocks.iter_mut()
    }

    /// Sum of live block sizes
    pub fn live_bytes(&self) -> Size {
        self.blocks.iter().map(|block| block.size).sum()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}
