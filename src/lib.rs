#![warn(missing_docs)]
#![doc(test(attr(deny(warnings))))]

//! A double-ended queue backed by a growable map of fixed-size storage
//! blocks.
//!
//! # [`BlockDeque`] vs [`VecDeque`]
//!
//! ## Growth
//!
//! The standard [`VecDeque`] keeps all elements in one contiguous ring
//! buffer. When the buffer fills up, a larger one is allocated and
//! every element is copied into it, so a single push can cost O(len).
//!
//! [`BlockDeque`] keeps elements in fixed-size blocks referenced by a
//! growable block map. When the map is saturated, only the map itself
//! doubles; block *ownership* moves to the new map while element data
//! stays in the blocks where it was written. Growth cost is
//! proportional to the number of blocks, not the number of elements.
//!
//! ## Addressing
//!
//! The deque content is never contiguous, so the whole deque cannot be
//! coerced into a slice. Elements live in one circular absolute
//! address space instead: logical position `k` maps to absolute slot
//! `(start + k) % capacity`, which splits into a block index and an
//! offset inside that block. [`front`], [`back`], indexing and both
//! push paths all go through this single formula, so the read and
//! write paths cannot disagree on where an element lives.
//!
//! # Example
//!
//! ```
//! use block_deque::BlockDeque;
//!
//! let mut deque = BlockDeque::new();
//! deque.push_back(1);
//! deque.push_back(2);
//! deque.push_front(0);
//! deque.push_front(-1);
//!
//! assert_eq!(deque, [-1, 0, 1, 2]);
//! assert_eq!(deque.front(), Ok(&-1));
//! assert_eq!(deque.back(), Ok(&2));
//!
//! assert_eq!(deque.pop_front(), Ok(-1));
//! assert_eq!(deque.pop_back(), Ok(2));
//! assert_eq!(deque, [0, 1]);
//! ```
//!
//! [`VecDeque`]: std::collections::VecDeque
//! [`front`]: BlockDeque::front
//! [`back`]: BlockDeque::back

use std::fmt;
use std::ops::{Index, IndexMut};

use block_map::BlockMap;

mod block_map;
mod error;

pub use error::DequeError;

/// Number of block slots a fresh deque starts with.
const INITIAL_BLOCK_CAPACITY: usize = 4;

/// Block size used by [`BlockDeque::new`].
const DEFAULT_BLOCK_SIZE: usize = 4;

/// A double-ended queue implemented with a growable map of fixed-size
/// storage blocks.
///
/// Pushing and popping at either end is amortized O(1) and indexed
/// access is O(1). Blocks are allocated lazily by the first push that
/// lands in them and are only released when the deque is dropped;
/// popping never clears slots or frees blocks.
///
/// Elements must be [`Copy`]: pops hand out plain copies and vacated
/// slots keep their bits until overwritten by a later push.
///
/// A `BlockDeque` with a known list of items can be initialized from
/// an array:
///
/// ```
/// use block_deque::BlockDeque;
///
/// # #[allow(unused)]
/// let deque = BlockDeque::from([-1, 0, 1]);
/// ```
pub struct BlockDeque<T> {
    map: BlockMap<T>,
    start: usize,
    len: usize,
    trace: Option<Box<dyn FnMut(TraceEvent)>>,
}

impl<T: Copy> BlockDeque<T> {
    /// Creates an empty deque with the default block size of 4.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::BlockDeque;
    /// # #[allow(unused)]
    /// let deque: BlockDeque<u32> = BlockDeque::new();
    /// ```
    pub fn new() -> Self {
        Self::with_block_size(DEFAULT_BLOCK_SIZE)
    }

    /// Creates an empty deque whose blocks hold `block_size` elements
    /// each.
    ///
    /// The deque starts with 4 empty block slots, so the initial
    /// capacity is `4 * block_size`.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::BlockDeque;
    ///
    /// let deque: BlockDeque<u32> = BlockDeque::with_block_size(8);
    ///
    /// assert_eq!(deque.block_size(), 8);
    /// assert_eq!(deque.capacity(), 32);
    /// ```
    pub fn with_block_size(block_size: usize) -> Self {
        BlockDeque {
            map: BlockMap::new(INITIAL_BLOCK_CAPACITY, block_size),
            start: 0,
            len: 0,
            trace: None,
        }
    }

    /// Returns the number of elements in the deque.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::BlockDeque;
    ///
    /// let deque = BlockDeque::from([1, 2, 3]);
    /// assert_eq!(deque.len(), 3);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque contains no elements.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::BlockDeque;
    ///
    /// let mut deque = BlockDeque::new();
    /// assert!(deque.is_empty());
    ///
    /// deque.push_back(1);
    /// assert!(!deque.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements each block holds.
    pub fn block_size(&self) -> usize {
        self.map.block_size()
    }

    /// Returns the number of elements the deque can hold before the
    /// next push doubles the block map.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::BlockDeque;
    ///
    /// let mut deque: BlockDeque<u32> = BlockDeque::with_block_size(2);
    /// assert_eq!(deque.capacity(), 8);
    ///
    /// for i in 0..9 {
    ///     deque.push_back(i);
    /// }
    /// assert_eq!(deque.capacity(), 16);
    /// ```
    pub fn capacity(&self) -> usize {
        self.map.total_slots()
    }

    /// Provides a reference to the front element, or
    /// [`DequeError::Empty`] if the deque is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::{BlockDeque, DequeError};
    ///
    /// let mut deque = BlockDeque::new();
    /// assert_eq!(deque.front(), Err(DequeError::Empty));
    ///
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// assert_eq!(deque.front(), Ok(&1));
    /// ```
    pub fn front(&self) -> Result<&T, DequeError> {
        if self.len == 0 {
            return Err(DequeError::Empty);
        }
        self.element(self.start)
    }

    /// Provides a mutable reference to the front element, or
    /// [`DequeError::Empty`] if the deque is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::BlockDeque;
    ///
    /// let mut deque = BlockDeque::from([1, 2]);
    /// if let Ok(front) = deque.front_mut() {
    ///     *front = 9;
    /// }
    /// assert_eq!(deque.front(), Ok(&9));
    /// ```
    pub fn front_mut(&mut self) -> Result<&mut T, DequeError> {
        if self.len == 0 {
            return Err(DequeError::Empty);
        }
        self.element_mut(self.start)
    }

    /// Provides a reference to the back element, or
    /// [`DequeError::Empty`] if the deque is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::{BlockDeque, DequeError};
    ///
    /// let mut deque = BlockDeque::new();
    /// assert_eq!(deque.back(), Err(DequeError::Empty));
    ///
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// assert_eq!(deque.back(), Ok(&2));
    /// ```
    pub fn back(&self) -> Result<&T, DequeError> {
        if self.len == 0 {
            return Err(DequeError::Empty);
        }
        self.element(self.abs(self.len - 1))
    }

    /// Provides a mutable reference to the back element, or
    /// [`DequeError::Empty`] if the deque is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::BlockDeque;
    ///
    /// let mut deque = BlockDeque::from([1, 2]);
    /// if let Ok(back) = deque.back_mut() {
    ///     *back = 9;
    /// }
    /// assert_eq!(deque.back(), Ok(&9));
    /// ```
    pub fn back_mut(&mut self) -> Result<&mut T, DequeError> {
        if self.len == 0 {
            return Err(DequeError::Empty);
        }
        self.element_mut(self.abs(self.len - 1))
    }

    /// Provides a reference to the element at logical position
    /// `index`, counting from the front.
    ///
    /// Fails with [`DequeError::IndexOutOfRange`] when
    /// `index >= self.len()`. [`DequeError::UnallocatedBlock`] signals
    /// a broken internal invariant and is never expected in correct
    /// operation.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::BlockDeque;
    ///
    /// let deque = BlockDeque::from([1, 2, 3]);
    /// assert_eq!(deque.get(0), Ok(&1));
    /// assert_eq!(deque.get(2), Ok(&3));
    /// assert!(deque.get(5).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, DequeError> {
        if index >= self.len {
            return Err(DequeError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.element(self.abs(index))
    }

    /// Provides a mutable reference to the element at logical position
    /// `index`, counting from the front.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::BlockDeque;
    ///
    /// let mut deque = BlockDeque::from([1, 2, 3]);
    /// if let Ok(elem) = deque.get_mut(1) {
    ///     *elem = 9;
    /// }
    /// assert_eq!(deque, [1, 9, 3]);
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, DequeError> {
        if index >= self.len {
            return Err(DequeError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.element_mut(self.abs(index))
    }

    /// Prepends an element to the deque.
    ///
    /// Grows the block map when it is saturated and allocates the
    /// target block when the write lands in an empty one, so the call
    /// is amortized O(1).
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::BlockDeque;
    ///
    /// let mut deque = BlockDeque::new();
    /// deque.push_front(1);
    /// deque.push_front(2);
    /// assert_eq!(deque.front(), Ok(&2));
    /// ```
    pub fn push_front(&mut self, value: T) {
        self.reserve_slot();
        let capacity = self.map.total_slots();
        let abs = (self.start + capacity - 1) % capacity;
        self.write(abs, value);
        self.start = abs;
        self.len += 1;
    }

    /// Appends an element to the back of the deque.
    ///
    /// Grows the block map when it is saturated and allocates the
    /// target block when the write lands in an empty one, so the call
    /// is amortized O(1).
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::BlockDeque;
    ///
    /// let mut deque = BlockDeque::new();
    /// deque.push_back(1);
    /// deque.push_back(3);
    /// assert_eq!(deque.back(), Ok(&3));
    /// ```
    pub fn push_back(&mut self, value: T) {
        self.reserve_slot();
        let abs = self.abs(self.len);
        self.write(abs, value);
        self.len += 1;
    }

    /// Removes the front element and returns it, or
    /// [`DequeError::Empty`] if the deque is empty.
    ///
    /// The removal is logical: the vacated slot keeps its bits and its
    /// block stays allocated. A failed call leaves the deque exactly
    /// as it was.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::{BlockDeque, DequeError};
    ///
    /// let mut deque = BlockDeque::from([1, 2]);
    ///
    /// assert_eq!(deque.pop_front(), Ok(1));
    /// assert_eq!(deque.pop_front(), Ok(2));
    /// assert_eq!(deque.pop_front(), Err(DequeError::Empty));
    /// ```
    pub fn pop_front(&mut self) -> Result<T, DequeError> {
        let value = *self.front()?;
        self.start = self.abs(1);
        self.len -= 1;
        Ok(value)
    }

    /// Removes the back element and returns it, or
    /// [`DequeError::Empty`] if the deque is empty.
    ///
    /// The removal is logical: the vacated slot keeps its bits and its
    /// block stays allocated. A failed call leaves the deque exactly
    /// as it was.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::{BlockDeque, DequeError};
    ///
    /// let mut deque = BlockDeque::from([1, 2]);
    ///
    /// assert_eq!(deque.pop_back(), Ok(2));
    /// assert_eq!(deque.pop_back(), Ok(1));
    /// assert_eq!(deque.pop_back(), Err(DequeError::Empty));
    /// ```
    pub fn pop_back(&mut self) -> Result<T, DequeError> {
        let value = *self.back()?;
        self.len -= 1;
        Ok(value)
    }

    /// Absolute slot of the logical position `index`.
    fn abs(&self, index: usize) -> usize {
        (self.start + index) % self.map.total_slots()
    }

    /// Doubles the block map if every slot is occupied, so the caller
    /// can claim one more slot at either end.
    fn reserve_slot(&mut self) {
        if self.len == self.map.total_slots() {
            let old_blocks = self.map.block_capacity();
            self.start = self.map.grow(self.start);
            self.emit(TraceEvent::Grew {
                old_blocks,
                new_blocks: self.map.block_capacity(),
            });
        }
    }

    /// Writes `value` at the absolute slot `abs`, allocating the
    /// owning block first if needed.
    fn write(&mut self, abs: usize, value: T) {
        let (block, allocated) = self.map.ensure_allocated(abs);
        if allocated {
            self.emit(TraceEvent::BlockAllocated { block });
        }
        self.map.write(abs, value);
    }

    fn element(&self, abs: usize) -> Result<&T, DequeError> {
        match self.map.slot(abs) {
            // Callers only pass occupied positions, and every occupied
            // position has been written by a push.
            Some(slot) => Ok(unsafe { slot.assume_init_ref() }),
            None => Err(DequeError::UnallocatedBlock {
                block: self.map.block_index(abs),
            }),
        }
    }

    fn element_mut(&mut self, abs: usize) -> Result<&mut T, DequeError> {
        let block = self.map.block_index(abs);
        match self.map.slot_mut(abs) {
            Some(slot) => Ok(unsafe { slot.assume_init_mut() }),
            None => Err(DequeError::UnallocatedBlock { block }),
        }
    }
}

impl<T> BlockDeque<T> {
    /// Attaches a hook that observes structural transitions: block map
    /// growth and lazy block allocation. At most one hook is attached
    /// at a time; a new hook replaces the previous one.
    ///
    /// Without a hook the deque produces no observable side effects.
    /// Ordinary pushes and pops are not reported, only the transitions
    /// that change the block map.
    ///
    /// # Example
    ///
    /// ```
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// use block_deque::{BlockDeque, TraceEvent};
    ///
    /// let events = Rc::new(RefCell::new(Vec::new()));
    /// let sink = Rc::clone(&events);
    ///
    /// let mut deque = BlockDeque::with_block_size(2);
    /// deque.set_trace_hook(move |event| sink.borrow_mut().push(event));
    /// deque.push_back(1);
    ///
    /// assert_eq!(*events.borrow(), [TraceEvent::BlockAllocated { block: 0 }]);
    /// ```
    pub fn set_trace_hook<F>(&mut self, hook: F)
    where
        F: FnMut(TraceEvent) + 'static,
    {
        self.trace = Some(Box::new(hook));
    }

    /// Detaches the trace hook, if any.
    pub fn clear_trace_hook(&mut self) {
        self.trace = None;
    }

    fn emit(&mut self, event: TraceEvent) {
        if let Some(hook) = self.trace.as_mut() {
            hook(event);
        }
    }
}

/// A structural transition reported to the hook attached with
/// [`BlockDeque::set_trace_hook`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TraceEvent {
    /// The block map doubled its capacity.
    Grew {
        /// Number of block slots before growing.
        old_blocks: usize,
        /// Number of block slots after growing.
        new_blocks: usize,
    },

    /// A push landed in an empty block and allocated it.
    BlockAllocated {
        /// Index of the allocated block in the block map.
        block: usize,
    },
}

impl<T: Copy> Default for BlockDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for BlockDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.len).filter_map(|index| self.get(index).ok()))
            .finish()
    }
}

impl<T: Copy> Index<usize> for BlockDeque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Copy> IndexMut<usize> for BlockDeque<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

macro_rules! impl_partial_eq {
    ([$($n:tt)*] $rhs:ty) => {
        impl<T, U, $($n)*> PartialEq<$rhs> for BlockDeque<T>
        where
            T: Copy + PartialEq<U>,
        {
            fn eq(&self, other: & $rhs) -> bool {
                self.len == other.len()
                    && other.iter().enumerate().all(|(index, elem)| {
                        self.get(index).is_ok_and(|value| value == elem)
                    })
            }
        }
    };
}

impl_partial_eq!([const N: usize] [U; N]);
impl_partial_eq!([const N: usize] &[U; N]);
impl_partial_eq!([const N: usize] &mut [U; N]);
impl_partial_eq!([] & [U]);
impl_partial_eq!([] &mut [U]);
impl_partial_eq!([] Vec<U>);

impl<T, U> PartialEq<BlockDeque<U>> for BlockDeque<T>
where
    T: Copy + PartialEq<U>,
    U: Copy,
{
    fn eq(&self, other: &BlockDeque<U>) -> bool {
        self.len == other.len
            && (0..self.len).all(|index| match (self.get(index), other.get(index)) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            })
    }
}

impl<T: Copy + Eq> Eq for BlockDeque<T> {}

impl<T: Copy, const N: usize> From<[T; N]> for BlockDeque<T> {
    /// Converts a `[T; N]` into a `BlockDeque<T>`.
    ///
    /// ```
    /// use block_deque::BlockDeque;
    ///
    /// let deque = BlockDeque::from([1, 2, 3, 4]);
    /// assert_eq!(deque, [1, 2, 3, 4]);
    /// ```
    fn from(value: [T; N]) -> Self {
        Self::from_iter(value)
    }
}

impl<T: Copy> From<Vec<T>> for BlockDeque<T> {
    /// Turns a [`Vec<T>`] into a [`BlockDeque<T>`].
    fn from(value: Vec<T>) -> Self {
        Self::from_iter(value)
    }
}

impl<T: Copy> FromIterator<T> for BlockDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T: Copy> Extend<T> for BlockDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.push_back(elem);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::{BlockDeque, DequeError, TraceEvent};

    fn contents<T: Copy>(deque: &BlockDeque<T>) -> Vec<T> {
        (0..deque.len())
            .map(|index| *deque.get(index).unwrap())
            .collect()
    }

    fn recording_deque<T: Copy>(
        block_size: usize,
    ) -> (BlockDeque<T>, Rc<RefCell<Vec<TraceEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut deque = BlockDeque::with_block_size(block_size);
        deque.set_trace_hook(move |event| sink.borrow_mut().push(event));
        (deque, events)
    }

    #[test]
    fn new_defaults() {
        let deque: BlockDeque<u32> = BlockDeque::new();

        assert!(deque.is_empty());
        assert_eq!(deque.len(), 0);
        assert_eq!(deque.block_size(), 4);
        assert_eq!(deque.capacity(), 16);
    }

    #[test]
    fn with_block_size() {
        let deque: BlockDeque<u32> = BlockDeque::with_block_size(3);

        assert_eq!(deque.block_size(), 3);
        assert_eq!(deque.capacity(), 12);
    }

    #[test]
    #[should_panic(expected = "block size must be nonzero")]
    fn with_zero_block_size() {
        let _: BlockDeque<u32> = BlockDeque::with_block_size(0);
    }

    #[test]
    fn push_both_ends() {
        let mut deque = BlockDeque::new();

        deque.push_back(1);
        deque.push_back(2);
        deque.push_front(0);
        deque.push_front(-1);

        assert_eq!(deque, [-1, 0, 1, 2]);
        assert_eq!(deque.front(), Ok(&-1));
        assert_eq!(deque.back(), Ok(&2));

        assert_eq!(deque.pop_front(), Ok(-1));
        assert_eq!(deque.pop_back(), Ok(2));

        assert_eq!(deque, [0, 1]);
        assert_eq!(deque.front(), Ok(&0));
        assert_eq!(deque.back(), Ok(&1));
    }

    #[test]
    fn empty_deque_errors() {
        let mut deque: BlockDeque<i32> = BlockDeque::new();

        assert_eq!(deque.pop_front(), Err(DequeError::Empty));
        assert_eq!(deque.pop_back(), Err(DequeError::Empty));
        assert_eq!(deque.front(), Err(DequeError::Empty));
        assert_eq!(deque.back(), Err(DequeError::Empty));
        assert_eq!(deque.front_mut(), Err(DequeError::Empty));
        assert_eq!(deque.back_mut(), Err(DequeError::Empty));
        assert_eq!(deque.len(), 0);
    }

    #[test]
    fn failed_calls_leave_state_untouched() {
        let mut deque = BlockDeque::from([1, 2, 3]);
        let start = deque.start;

        assert_eq!(
            deque.get(5),
            Err(DequeError::IndexOutOfRange { index: 5, len: 3 })
        );
        assert_eq!(
            deque.get_mut(3),
            Err(DequeError::IndexOutOfRange { index: 3, len: 3 })
        );

        assert_eq!(deque.start, start);
        assert_eq!(deque, [1, 2, 3]);
    }

    #[test]
    fn index_out_of_range() {
        let mut deque = BlockDeque::new();
        deque.push_back(1);
        deque.push_back(2);
        deque.push_back(3);

        assert_eq!(deque.get(2), Ok(&3));
        assert_eq!(
            deque.get(5),
            Err(DequeError::IndexOutOfRange { index: 5, len: 3 })
        );
    }

    #[test]
    #[should_panic(expected = "index 5 out of range for deque of length 2")]
    fn index_panics() {
        let deque = BlockDeque::from([1, 2]);

        let _ = deque[5];
    }

    #[test]
    fn index_and_index_mut() {
        let mut deque = BlockDeque::from([1, 2, 3]);

        assert_eq!(deque[0], 1);
        assert_eq!(deque[2], 3);

        deque[1] = 9;

        assert_eq!(deque, [1, 9, 3]);
    }

    #[test]
    fn front_and_back_mut() {
        let mut deque = BlockDeque::from([1, 2, 3]);

        *deque.front_mut().unwrap() = -1;
        *deque.back_mut().unwrap() = 9;

        assert_eq!(deque, [-1, 2, 9]);
    }

    #[test]
    fn push_front_pop_front_is_a_no_op_pair() {
        let mut deque = BlockDeque::with_block_size(2);
        deque.extend([1, 2, 3]);
        let start = deque.start;
        let before = contents(&deque);

        deque.push_front(9);
        assert_eq!(deque.pop_front(), Ok(9));

        assert_eq!(deque.start, start);
        assert_eq!(deque.len(), 3);
        assert_eq!(contents(&deque), before);
    }

    #[test]
    fn lifo_round_trip_at_the_back() {
        let mut deque = BlockDeque::with_block_size(2);
        for i in 0..20 {
            deque.push_back(i);
        }

        for i in (0..20).rev() {
            assert_eq!(deque.pop_back(), Ok(i));
        }
        assert!(deque.is_empty());
    }

    #[test]
    fn front_push_is_visible_at_position_zero() {
        let mut deque = BlockDeque::new();

        for i in 0..10 {
            deque.push_front(i);
            assert_eq!(deque.front(), Ok(&i));
            assert_eq!(deque.get(0), Ok(&i));
        }
    }

    #[test]
    fn growth_is_triggered_at_saturation_only() {
        let (mut deque, events) = recording_deque(4);
        assert_eq!(deque.capacity(), 16);

        for i in 0..16 {
            deque.push_back(i);
        }
        assert_eq!(deque.capacity(), 16);
        assert!(events
            .borrow()
            .iter()
            .all(|event| matches!(event, TraceEvent::BlockAllocated { .. })));

        deque.push_back(16);

        assert_eq!(deque.capacity(), 32);
        assert!(events.borrow().contains(&TraceEvent::Grew {
            old_blocks: 4,
            new_blocks: 8,
        }));
    }

    #[test]
    fn growth_keeps_back_pushed_elements() {
        let mut deque = BlockDeque::with_block_size(2);

        for i in 0..100 {
            deque.push_back(i);
        }

        assert!(deque.capacity() >= 100);
        assert_eq!(contents(&deque), Vec::from_iter(0..100));
    }

    #[test]
    fn growth_keeps_front_pushed_elements() {
        let mut deque = BlockDeque::with_block_size(2);

        for i in 0..100 {
            deque.push_front(i);
        }

        assert_eq!(contents(&deque), Vec::from_iter((0..100).rev()));
    }

    #[test]
    fn growth_with_wrapped_misaligned_window() {
        let mut deque = BlockDeque::with_block_size(2);
        deque.extend([10, 20, 30, 40, 50, 60]);
        for _ in 0..3 {
            deque.pop_front().unwrap();
        }
        // start sits mid-block and the window wraps once refilled.
        assert_eq!(deque.start, 3);
        deque.extend([70, 80, 90, 100, 110]);
        assert_eq!(deque.len(), deque.capacity());

        deque.push_back(120);

        assert_eq!(deque.capacity(), 16);
        assert_eq!(
            contents(&deque),
            vec![40, 50, 60, 70, 80, 90, 100, 110, 120]
        );
        assert_eq!(deque.front(), Ok(&40));
        assert_eq!(deque.back(), Ok(&120));
    }

    #[test]
    fn growth_with_wrapped_window_on_front_push() {
        let mut deque = BlockDeque::with_block_size(2);
        deque.extend(0..8);
        for _ in 0..5 {
            deque.pop_front().unwrap();
        }
        deque.extend(8..13);
        assert_eq!(deque.len(), deque.capacity());

        deque.push_front(-1);

        assert_eq!(contents(&deque), vec![-1, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(deque.front(), Ok(&-1));
        assert_eq!(deque.back(), Ok(&12));
    }

    #[test]
    fn interleaved_stress() {
        let mut deque = BlockDeque::new();

        for i in 0..1000i32 {
            deque.push_back(i);
            deque.push_front(-i);
        }
        assert_eq!(deque.len(), 2000);
        assert_eq!(deque.front(), Ok(&-999));
        assert_eq!(deque.back(), Ok(&999));

        for _ in 0..500 {
            deque.pop_back().unwrap();
            deque.pop_front().unwrap();
        }
        assert_eq!(deque.len(), 1000);

        for index in 0..deque.len() {
            let expected = if index < 500 {
                index as i32 - 499
            } else {
                index as i32 - 500
            };
            assert_eq!(deque.get(index), Ok(&expected), "position {index}");
        }
        assert_eq!(deque.front(), Ok(&-499));
        assert_eq!(deque.back(), Ok(&499));
    }

    #[test]
    fn trace_hook_reports_allocations_and_growth() {
        let (mut deque, events) = recording_deque(2);

        for i in 0..9 {
            deque.push_back(i);
        }

        assert_eq!(
            *events.borrow(),
            [
                TraceEvent::BlockAllocated { block: 0 },
                TraceEvent::BlockAllocated { block: 1 },
                TraceEvent::BlockAllocated { block: 2 },
                TraceEvent::BlockAllocated { block: 3 },
                TraceEvent::Grew {
                    old_blocks: 4,
                    new_blocks: 8,
                },
                TraceEvent::BlockAllocated { block: 6 },
            ]
        );
    }

    #[test]
    fn cleared_trace_hook_stays_silent() {
        let (mut deque, events) = recording_deque(2);

        deque.push_back(1);
        deque.clear_trace_hook();
        for i in 2..20 {
            deque.push_back(i);
        }

        assert_eq!(*events.borrow(), [TraceEvent::BlockAllocated { block: 0 }]);
    }

    #[test]
    fn eq() {
        let mut array = [1, 2];
        let mut array_x = [2, 1];

        let deque = BlockDeque::from(array);

        {
            let slice: &[_] = &array;
            let slice_x: &[_] = &array_x;

            assert!(deque == slice);
            assert!(deque != slice_x);
        }

        assert!(deque == &array);
        assert!(deque != &array_x);

        {
            let slice_mut: &mut [_] = &mut array;
            let slice_mut_x: &mut [_] = &mut array_x;

            assert!(deque == slice_mut);
            assert!(deque != slice_mut_x);
        }

        assert!(deque == array);
        assert!(deque != array_x);

        assert!(deque == Vec::from(array));
        assert!(deque != Vec::from(array_x));

        // Same content, different block geometry.
        let mut other = BlockDeque::with_block_size(1);
        other.extend(array);
        assert!(deque == other);

        other.push_back(3);
        assert!(deque != other);
    }

    #[test]
    fn debug_format() {
        let deque = BlockDeque::from([1, 2, 3]);

        assert_eq!(format!("{deque:?}"), "[1, 2, 3]");
    }

    #[test]
    fn from_iter() {
        let deque = BlockDeque::from_iter('A'..='D');

        assert_eq!(deque, ['A', 'B', 'C', 'D']);
    }

    #[test]
    fn from_vec() {
        let deque = BlockDeque::from(vec![1, 2, 3]);

        assert_eq!(deque, [1, 2, 3]);
    }

    #[test]
    fn default_is_empty() {
        let deque: BlockDeque<u8> = BlockDeque::default();

        assert!(deque.is_empty());
        assert_eq!(deque.block_size(), 4);
    }

    #[test]
    fn single_slot_blocks() {
        let mut deque = BlockDeque::with_block_size(1);
        assert_eq!(deque.capacity(), 4);

        for i in 0..40 {
            if i % 2 == 0 {
                deque.push_back(i);
            } else {
                deque.push_front(i);
            }
        }

        assert_eq!(deque.len(), 40);
        let odds: Vec<_> = (0..40).filter(|i| i % 2 == 1).rev().collect();
        let evens: Vec<_> = (0..40).filter(|i| i % 2 == 0).collect();
        assert_eq!(contents(&deque), [odds, evens].concat());
    }
}
