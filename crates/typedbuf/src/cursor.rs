// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{Error, Result};

/// The position/limit/mark state of a buffer, independent of element type and storage.
///
/// The cursor always satisfies `mark <= position <= limit <= capacity`, where the mark may be
/// undefined. Every mutating operation either succeeds completely or fails without changing any
/// field.
///
/// Each view of a storage region owns its own cursor; derived views copy the cursor value rather
/// than sharing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    capacity: usize,
    limit: usize,
    position: usize,
    mark: Option<usize>,
}

impl Cursor {
    /// Creates a cursor over `capacity` elements, positioned at the start with the limit at the end.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            limit: capacity,
            position: 0,
            mark: None,
        }
    }

    /// Creates a cursor with an explicit window. The caller has validated that
    /// `position <= limit <= capacity`.
    pub(crate) fn with_window(capacity: usize, position: usize, limit: usize) -> Self {
        debug_assert!(position <= limit && limit <= capacity);

        Self {
            capacity,
            limit,
            position,
            mark: None,
        }
    }

    /// The number of elements the buffer can hold. Never changes.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The index of the next element to be read or written by a relative operation.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The index of the first element that must not be read or written.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// The marked position, if a mark is currently defined.
    #[must_use]
    pub const fn marked(&self) -> Option<usize> {
        self.mark
    }

    /// The number of elements between the position and the limit.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Whether there is at least one element between the position and the limit.
    #[must_use]
    pub const fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    /// Moves the position. A mark beyond the new position is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if `position` is greater than the limit.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.limit {
            return Err(Error::IllegalArgument("position must not exceed limit"));
        }

        self.position = position;

        if self.mark.is_some_and(|mark| mark > position) {
            self.mark = None;
        }

        Ok(())
    }

    /// Moves the limit. The position is pulled back to the new limit if it lies beyond it, and a
    /// mark beyond the new limit is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if `limit` is greater than the capacity.
    pub fn set_limit(&mut self, limit: usize) -> Result<()> {
        if limit > self.capacity {
            return Err(Error::IllegalArgument("limit must not exceed capacity"));
        }

        self.limit = limit;

        if self.position > limit {
            self.position = limit;
        }

        if self.mark.is_some_and(|mark| mark > limit) {
            self.mark = None;
        }

        Ok(())
    }

    /// Records the current position as the mark.
    pub fn mark(&mut self) {
        self.mark = Some(self.position);
    }

    /// Returns the position to the mark. The mark stays defined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMark`] if no mark is defined.
    pub fn reset(&mut self) -> Result<()> {
        let mark = self.mark.ok_or(Error::InvalidMark)?;
        self.position = mark;
        Ok(())
    }

    /// Prepares for filling the whole buffer: position 0, limit at capacity, no mark.
    pub fn clear(&mut self) {
        self.position = 0;
        self.limit = self.capacity;
        self.mark = None;
    }

    /// Prepares for draining what was written: limit at the old position, position 0, no mark.
    pub fn flip(&mut self) {
        self.limit = self.position;
        self.position = 0;
        self.mark = None;
    }

    /// Prepares for re-reading: position 0, no mark.
    pub fn rewind(&mut self) {
        self.position = 0;
        self.mark = None;
    }

    pub(crate) fn discard_mark(&mut self) {
        self.mark = None;
    }

    /// Claims `count` elements for a relative read, returning the index of the first one.
    pub(crate) fn take_read(&mut self, count: usize) -> Result<usize> {
        let remaining = self.remaining();

        if count > remaining {
            return Err(Error::BufferUnderflow {
                requested: count,
                remaining,
            });
        }

        let start = self.position;
        self.position += count;
        Ok(start)
    }

    /// Claims `count` elements for a relative write, returning the index of the first one.
    pub(crate) fn take_write(&mut self, count: usize) -> Result<usize> {
        let remaining = self.remaining();

        if count > remaining {
            return Err(Error::BufferOverflow {
                requested: count,
                remaining,
            });
        }

        let start = self.position;
        self.position += count;
        Ok(start)
    }

    /// Validates that `count` consecutive elements starting at `index` all lie below the limit.
    pub(crate) fn check_span(&self, index: usize, count: usize) -> Result<()> {
        match index.checked_add(count) {
            Some(end) if end <= self.limit => Ok(()),
            _ => Err(Error::IndexOutOfBounds { index, len: self.limit }),
        }
    }
}

/// Validates an `(offset, length)` range against an array of `len` elements and returns the
/// exclusive end of the range.
pub(crate) fn check_array_range(len: usize, offset: usize, length: usize) -> Result<usize> {
    match offset.checked_add(length) {
        Some(end) if end <= len => Ok(end),
        Some(end) => Err(Error::IndexOutOfBounds { index: end, len }),
        None => Err(Error::IndexOutOfBounds { index: usize::MAX, len }),
    }
}
