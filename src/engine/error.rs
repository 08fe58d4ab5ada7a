use thiserror::Error;

/// Errors of the checked entry points. The raw [`compute`](crate::compute) has no error
/// path: its preconditions are the caller's to uphold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    #[error("buffer in slot {slot} holds {len} elements, {required} required")]
    BufferTooShort {
        slot: usize,
        len: usize,
        required: usize,
    },
}

pub type Result<T> = std::result::Result<T, ComputeError>;
