use thiserror::Error;

/// The error type for fallible [`BlockDeque`] operations.
///
/// [`BlockDeque`]: crate::BlockDeque
///
/// # Example
///
/// ```
/// use block_deque::{BlockDeque, DequeError};
///
/// let mut deque: BlockDeque<i32> = BlockDeque::new();
/// assert_eq!(deque.pop_front(), Err(DequeError::Empty));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DequeError {
    /// A pop or end-access was attempted on a deque with no elements.
    ///
    /// Recoverable: the deque is left untouched and the call may be
    /// retried after elements are pushed.
    #[error("deque is empty")]
    Empty,

    /// An indexed access was outside `0..len`.
    #[error("index {index} out of range for deque of length {len}")]
    IndexOutOfRange {
        /// The requested logical position.
        index: usize,
        /// The deque length at the time of the call.
        len: usize,
    },

    /// The block owning an addressed slot was not allocated.
    ///
    /// Every occupied logical position is backed by an allocated block,
    /// so this error signals a broken internal invariant rather than a
    /// condition a caller can provoke or recover from.
    #[error("block {block} owning an occupied slot is not allocated")]
    UnallocatedBlock {
        /// Index of the missing block in the block map.
        block: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::DequeError;

    #[test]
    fn display() {
        assert_eq!(DequeError::Empty.to_string(), "deque is empty");
        assert_eq!(
            DequeError::IndexOutOfRange { index: 5, len: 3 }.to_string(),
            "index 5 out of range for deque of length 3"
        );
        assert_eq!(
            DequeError::UnallocatedBlock { block: 2 }.to_string(),
            "block 2 owning an occupied slot is not allocated"
        );
    }
}
