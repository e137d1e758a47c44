use std::mem::MaybeUninit;

/// Fixed-capacity storage for `block_size` elements of `T`.
///
/// Slots start uninitialized; a slot is initialized once a push has
/// written through it. Since the deque only stores `Copy` elements,
/// blocks carry no drop glue.
pub(crate) type Block<T> = Box<[MaybeUninit<T>]>;

/// A growable array of block ownership slots forming a circular
/// absolute address space of `block_capacity * block_size` element
/// slots.
///
/// The map owns block lifetime: blocks are allocated on demand by
/// [`ensure_allocated`] and only released when the map itself is
/// dropped. Growth doubles the number of ownership slots and moves
/// ownership handles, never individual elements, except for the one
/// split-block case described at [`grow`].
///
/// [`ensure_allocated`]: BlockMap::ensure_allocated
/// [`grow`]: BlockMap::grow
pub(crate) struct BlockMap<T> {
    slots: Box<[Option<Block<T>>]>,
    block_size: usize,
}

impl<T> BlockMap<T> {
    pub(crate) fn new(block_capacity: usize, block_size: usize) -> Self {
        assert!(block_size > 0, "block size must be nonzero");

        BlockMap {
            slots: empty_slots(block_capacity),
            block_size,
        }
    }

    pub(crate) fn block_size(&self) -> usize {
        self.block_size
    }

    pub(crate) fn block_capacity(&self) -> usize {
        self.slots.len()
    }

    /// Size of the circular absolute address space, in element slots.
    pub(crate) fn total_slots(&self) -> usize {
        self.slots.len() * self.block_size
    }

    /// Index of the block owning the absolute slot `abs`.
    pub(crate) fn block_index(&self, abs: usize) -> usize {
        debug_assert!(abs < self.total_slots());
        abs / self.block_size
    }

    #[cfg(test)]
    pub(crate) fn is_allocated(&self, block: usize) -> bool {
        self.slots[block].is_some()
    }

    /// Allocates the block owning `abs` if it is still empty.
    ///
    /// Returns the block index and whether an allocation happened.
    pub(crate) fn ensure_allocated(&mut self, abs: usize) -> (usize, bool) {
        let block = self.block_index(abs);
        match self.slots[block] {
            Some(_) => (block, false),
            None => {
                self.slots[block] = Some(new_block(self.block_size));
                (block, true)
            }
        }
    }

    /// Writes `value` into the absolute slot `abs`.
    ///
    /// The owning block must already be allocated.
    pub(crate) fn write(&mut self, abs: usize, value: T) {
        let block = self.block_index(abs);
        let offset = abs % self.block_size;
        let block = self.slots[block]
            .as_deref_mut()
            .expect("write into unallocated block");
        block[offset] = MaybeUninit::new(value);
    }

    /// Returns the absolute slot `abs`, or `None` if its owning block
    /// is not allocated. Whether the slot is initialized is the
    /// caller's invariant.
    pub(crate) fn slot(&self, abs: usize) -> Option<&MaybeUninit<T>> {
        let block = self.block_index(abs);
        let offset = abs % self.block_size;
        self.slots[block].as_deref().map(|block| &block[offset])
    }

    pub(crate) fn slot_mut(&mut self, abs: usize) -> Option<&mut MaybeUninit<T>> {
        let block = self.block_index(abs);
        let offset = abs % self.block_size;
        self.slots[block]
            .as_deref_mut()
            .map(|block| &mut block[offset])
    }
}

impl<T: Copy> BlockMap<T> {
    /// Doubles the number of block slots, leaving equal headroom of
    /// empty slots on each side of the relocated run.
    ///
    /// Blocks are relocated in logical order starting from the block
    /// owning `start`, so an occupied window that wraps the old
    /// circular space stays contiguous in the enlarged one. When
    /// `start` is not block-aligned, the front block carries the
    /// window's tail in its leading slots as well; those spill by copy
    /// into one freshly allocated block placed right after the
    /// relocated run. Every other block moves by ownership only, so
    /// growth costs O(block_capacity + block_size) regardless of how
    /// many elements are stored.
    ///
    /// Returns the new absolute position of `start`.
    pub(crate) fn grow(&mut self, start: usize) -> usize {
        let old_capacity = self.block_capacity();
        let new_capacity = old_capacity * 2;
        let headroom = (new_capacity - old_capacity) / 2;
        let front_block = self.block_index(start);
        let split = start % self.block_size;

        let mut slots = empty_slots(new_capacity);
        for i in 0..old_capacity {
            slots[headroom + i] = self.slots[(front_block + i) % old_capacity].take();
        }
        if split > 0 {
            let mut spill = new_block(self.block_size);
            if let Some(front) = slots[headroom].as_deref() {
                spill[..split].copy_from_slice(&front[..split]);
            }
            slots[headroom + old_capacity] = Some(spill);
        }
        self.slots = slots;

        headroom * self.block_size + split
    }
}

fn empty_slots<T>(block_capacity: usize) -> Box<[Option<Block<T>>]> {
    (0..block_capacity).map(|_| None).collect()
}

fn new_block<T>(block_size: usize) -> Block<T> {
    (0..block_size).map(|_| MaybeUninit::uninit()).collect()
}
