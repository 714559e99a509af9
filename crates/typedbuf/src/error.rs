// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use thiserror::Error;

/// Any error that may arise from operating on a [`Buffer`][crate::Buffer].
///
/// All variants describe caller errors rather than transient conditions, so retrying the same
/// operation on the same buffer state will fail in the same way. A failed operation never
/// modifies the buffer: no cursor movement and no partial writes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A position, limit or capacity value violates the cursor invariants.
    #[error("illegal argument: {0}")]
    IllegalArgument(&'static str),

    /// An absolute index or an array range lies outside the permitted bounds.
    ///
    /// `index` is the first offending index (for ranges, the exclusive end of the range) and
    /// `len` is the exclusive bound it was checked against.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The exclusive upper bound.
        len: usize,
    },

    /// A relative read requested more elements than remain between position and limit.
    #[error("buffer underflow: requested {requested} elements, {remaining} remaining")]
    BufferUnderflow {
        /// Number of elements the operation needed.
        requested: usize,
        /// Number of elements that were available.
        remaining: usize,
    },

    /// A relative write requested more room than remains between position and limit.
    #[error("buffer overflow: requested {requested} elements, {remaining} remaining")]
    BufferOverflow {
        /// Number of elements the operation needed.
        requested: usize,
        /// Number of elements that were available.
        remaining: usize,
    },

    /// A mutating operation was invoked on a read-only view.
    #[error("buffer is read-only")]
    ReadOnlyBuffer,

    /// `reset()` was invoked while no mark was defined.
    #[error("no mark is defined")]
    InvalidMark,

    /// An array-backed-only operation was invoked on a buffer that has no accessible array.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

/// A specialized `Result` for buffer operations.
pub type Result<T> = std::result::Result<T, Error>;
