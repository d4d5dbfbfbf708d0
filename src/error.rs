use thiserror::Error;

/// Error type for every fallible ring operation.
///
/// `WouldBlock` is not an error in the semantic sense; it is the non-fatal
/// full/empty signal. It lives in the same enum so that the copy shims can
/// report it through the one result channel, distinct from argument errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    /// Contract violation by the caller: bad capacity or slot size, payload
    /// larger than a slot, or an operation on a destroyed ring.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The allocator refused the slot-array allocation; the ring was not
    /// constructed.
    #[error("allocation failed")]
    OutOfMemory,

    /// The operation cannot proceed right now (buffer full for push, empty
    /// for pop) but may succeed later. The caller decides whether to retry,
    /// back off, or abandon.
    #[error("operation would block")]
    WouldBlock,
}
