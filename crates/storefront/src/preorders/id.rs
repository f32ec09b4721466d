//! Order id allocation.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use trailhead_core::OrderId;

/// Hands out timestamp-derived order ids that never repeat.
///
/// Each id is the current Unix time in milliseconds, bumped past the
/// previously issued id when two submissions land in the same millisecond
/// (or the clock steps backwards). Allocation fails once `i64::MAX` has been
/// issued.
#[derive(Debug, Default)]
pub struct OrderIdAllocator {
    last: AtomicI64,
}

impl OrderIdAllocator {
    /// Create an allocator whose next id is greater than `last`.
    #[must_use]
    pub const fn starting_after(last: i64) -> Self {
        Self {
            last: AtomicI64::new(last),
        }
    }

    /// Allocate the next id, or `None` if the id space is exhausted.
    #[must_use]
    pub fn next_id(&self) -> Option<OrderId> {
        self.next_at(Utc::now().timestamp_millis())
    }

    fn next_at(&self, now_millis: i64) -> Option<OrderId> {
        let mut current = self.last.load(Ordering::Acquire);
        loop {
            let candidate = now_millis.max(current.checked_add(1)?);
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Some(OrderId::new(candidate)),
                Err(actual) => current = actual,
            }
        }
    }
}
