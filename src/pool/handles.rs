/*!
 * Reference Allocator
 * Issues monotonically increasing handles that are never reused
 */

use super::types::{Handle, PoolError, PoolResult};
use crate::core::limits::FIRST_HANDLE;
use crate::core::types::RawHandle;
use std::num::NonZeroU64;

#[derive(Debug)]
pub(super) struct HandleAllocator {
    next: NonZeroU64,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self {
            next: NonZeroU64::MIN,
        }
    }

    /// Raw value the next `issue` will return
    #[inline]
    pub fn peek(&self) -> RawHandle {
        self.next.get()
    }

    /// Number of handles issued since the last reset
    #[inline]
    pub fn issued(&self) -> u64 {
        self.next.get() - FIRST_HANDLE
    }

    /// Hand out the next handle; `u64::MAX` itself is never issued, so
    /// `peek` always names an unissued value
    pub fn issue(&mut self) -> PoolResult<Handle> {
        let Some(following) = self.next.checked_add(1) else {
            log::error!("Contract violation: handle space exhausted at {}", self.next);
            return Err(PoolError::HandlesExhausted {
                last: self.next.get() - 1,
            });
        };
        let handle = Handle::from_non_zero(self.next);
        self.next = following;
        Ok(handle)
    }

    /// Reject handles this allocator has not handed out yet
    pub fn check_issued(&self, handle: Handle) -> PoolResult<()> {
        if handle.raw() >= self.peek() {
            log::error!(
                "Contract violation: handle {} used before being issued (next handle is {})",
                handle,
                self.next
            );
            return Err(PoolError::UnissuedHandle {
                handle: handle.raw(),
                next: self.peek(),
            });
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.next = NonZeroU64::MIN;
    }
}
