/*!
 * Buffer Arena
 * Two equal fixed-capacity byte regions, one of which is current
 */

use crate::core::types::{Offset, Size};
use std::ops::Range;

/// Which of the two regions is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ArenaSide {
    Primary,
    Secondary,
}

impl ArenaSide {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            ArenaSide::Primary => ArenaSide::Secondary,
            ArenaSide::Secondary => ArenaSide::Primary,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            ArenaSide::Primary => 0,
            ArenaSide::Secondary => 1,
        }
    }
}

/// Double-buffered byte storage.
///
/// Both regions are allocated up front and never grow. Relocation copies
/// from the current region into the other one; `swap` then flips which
/// region callers see.
pub(super) struct BufferArena {
    regions: [Box<[u8]>; 2],
    current: ArenaSide,
}

impl BufferArena {
    pub fn new(capacity: Size) -> Self {
        Self {
            regions: [
                vec![0u8; capacity].into_boxed_slice(),
                vec![0u8; capacity].into_boxed_slice(),
            ],
            current: ArenaSide::Primary,
        }
    }

    #[inline]
    pub fn capacity(&self) -> Size {
        self.regions[0].len()
    }

    #[inline]
    pub fn current_side(&self) -> ArenaSide {
        self.current
    }

    /// Bytes of the current region in `range`
    #[inline]
    pub fn slice(&self, range: Range<Offset>) -> &[u8] {
        &self.regions[self.current.index()][range]
    }

    #[inline]
    pub fn slice_mut(&mut self, range: Range<Offset>) -> &mut [u8] {
        &mut self.regions[self.current.index()][range]
    }

    /// Zero-fill `range` of the current region
    pub fn zero(&mut self, range: Range<Offset>) {
        self.slice_mut(range).fill(0);
    }

    /// Copy `src` of the current region to `dst_offset` of the other region
    pub fn copy_to_other(&mut self, src: Range<Offset>, dst_offset: Offset) {
        let len = src.end - src.start;
        let [primary, secondary] = &mut self.regions;
        let (from, to) = match self.current {
            ArenaSide::Primary => (primary, secondary),
            ArenaSide::Secondary => (secondary, primary),
        };
        to[dst_offset..dst_offset + len].copy_from_slice(&from[src]);
    }

    /// Make the other region current
    #[inline]
    pub fn swap(&mut self) {
        self.current = self.current.other();
    }

    /// Make the primary region current again
    #[inline]
    pub fn reset(&mut self) {
        self.current = ArenaSide::Primary;
    }
}

impl std::fmt::Debug for BufferArena {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("BufferArena")
            .field("capacity", &self.capacity())
            .field("current", &self.current)
            .finish()
    }
}
