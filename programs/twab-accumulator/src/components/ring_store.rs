use crate::error::{TwabError, TwabResult};

/// Anything stored in a ring whose logical order is also time order.
pub trait Timestamped: Copy {
    fn timestamp(&self) -> u64;
}

/// Fixed-capacity circular store addressed by logical index (0 = oldest).
///
/// Implementors only expose their backing slots and the `(next_index,
/// cardinality)` cursor; every logical-to-physical translation goes through
/// [`RingBuffer::physical_index`], so the search below never sees wraparound.
///
/// # Cursor invariants
///
/// - `next_index < capacity` is the slot the next push writes.
/// - `cardinality <= capacity`; pushes saturate it instead of failing.
/// - Once full, `next_index` points at the oldest entry.
/// - The eviction marker is set by the first push that overwrites an entry
///   and never cleared.
pub trait RingBuffer {
    type Item: Timestamped;

    fn slots(&self) -> &[Self::Item];
    fn slots_mut(&mut self) -> &mut [Self::Item];
    fn next_index(&self) -> u16;
    fn cardinality(&self) -> u16;
    fn set_cursor(&mut self, next_index: u16, cardinality: u16);
    fn has_evicted(&self) -> bool;
    fn mark_evicted(&mut self);

    #[inline(always)]
    fn capacity(&self) -> usize {
        self.slots().len()
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.cardinality() as usize
    }

    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    #[inline(always)]
    fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Physical slot holding logical entry `logical`. While the ring is not
    /// yet full `next_index == cardinality`, so this reduces to `logical`.
    #[inline(always)]
    fn physical_index(&self, logical: usize) -> usize {
        let capacity = self.capacity();
        (self.next_index() as usize + capacity - self.len() + logical) % capacity
    }

    #[inline]
    fn get(&self, logical: usize) -> Option<Self::Item> {
        if logical >= self.len() {
            return None;
        }
        Some(self.slots()[self.physical_index(logical)])
    }

    /// Writes `item` at the cursor. Never fails; the oldest entry is evicted
    /// once the ring is saturated.
    fn push(&mut self, item: Self::Item) {
        if self.is_full() {
            self.mark_evicted();
        }
        let capacity = self.capacity();
        let slot = self.next_index() as usize;
        self.slots_mut()[slot] = item;

        let next_index = ((slot + 1) % capacity) as u16;
        let cardinality = core::cmp::min(self.len() + 1, capacity) as u16;
        self.set_cursor(next_index, cardinality);
    }

    /// Overwrites the newest entry without moving the cursor.
    fn replace_newest(&mut self, item: Self::Item) -> TwabResult<()> {
        if self.is_empty() {
            return Err(TwabError::EmptyHistory);
        }
        let slot = self.physical_index(self.len() - 1);
        self.slots_mut()[slot] = item;
        Ok(())
    }

    #[inline]
    fn oldest(&self) -> TwabResult<(usize, Self::Item)> {
        self.get(0).map(|item| (0, item)).ok_or(TwabError::EmptyHistory)
    }

    #[inline]
    fn newest(&self) -> TwabResult<(usize, Self::Item)> {
        let last = self.len().checked_sub(1).ok_or(TwabError::EmptyHistory)?;
        self.get(last)
            .map(|item| (last, item))
            .ok_or(TwabError::EmptyHistory)
    }

    /// Binary search for the newest entry with `timestamp <= target`.
    ///
    /// An exact timestamp match selects that entry: it is the state in effect
    /// at and after its own instant. Returns `None` when the ring is empty or
    /// `target` precedes the oldest entry.
    fn search_at_or_before(&self, target: u64) -> Option<(usize, Self::Item)> {
        let (_, oldest) = self.oldest().ok()?;
        if oldest.timestamp() > target {
            return None;
        }

        // First logical index whose timestamp is strictly after `target`.
        let mut low = 0usize;
        let mut high = self.len();
        while low < high {
            let mid = low + (high - low) / 2;
            let item = self.slots()[self.physical_index(mid)];
            if item.timestamp() <= target {
                low = mid + 1;
            } else {
                high = mid;
            }
        }

        let before = low - 1;
        self.get(before).map(|item| (before, item))
    }

    fn iter(&self) -> RingIter<'_, Self>
    where
        Self: Sized,
    {
        RingIter {
            ring: self,
            front: 0,
            back: self.len(),
        }
    }
}

/// Oldest-to-newest walk over a [`RingBuffer`].
pub struct RingIter<'a, R: RingBuffer> {
    ring: &'a R,
    front: usize,
    back: usize,
}

impl<'a, R: RingBuffer> Iterator for RingIter<'a, R> {
    type Item = R::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.ring.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, R: RingBuffer> DoubleEndedIterator for RingIter<'a, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.ring.get(self.back)
    }
}

impl<'a, R: RingBuffer> ExactSizeIterator for RingIter<'a, R> {}
