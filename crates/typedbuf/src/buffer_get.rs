// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! We separate out all the read methods for ease of maintenance.

use crate::cursor::check_array_range;
use crate::{Buffer, Element, Result};

impl<T: Element> Buffer<T> {
    /// Reads the element at the position and advances the position by one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferUnderflow`][crate::Error::BufferUnderflow] if no elements remain.
    pub fn get(&mut self) -> Result<T> {
        let index = self.cursor.take_read(1)?;
        Ok(self.load(index))
    }

    /// Reads the element at `index` without moving the position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`][crate::Error::IndexOutOfBounds] unless `index` is
    /// below the limit.
    pub fn get_at(&self, index: usize) -> Result<T> {
        self.cursor.check_span(index, 1)?;
        Ok(self.load(index))
    }

    /// Reads `length` elements into `dst[offset..offset + length]`, advancing the position by
    /// `length`.
    ///
    /// A zero-length request with `offset == dst.len()` is valid and does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`][crate::Error::IndexOutOfBounds] if the range does not
    /// lie within `dst`, then [`Error::BufferUnderflow`][crate::Error::BufferUnderflow] if fewer
    /// than `length` elements remain. Nothing is copied on failure.
    pub fn get_into(&mut self, dst: &mut [T], offset: usize, length: usize) -> Result<&mut Self> {
        let end = check_array_range(dst.len(), offset, length)?;
        let start = self.cursor.take_read(length)?;

        for (i, slot) in dst[offset..end].iter_mut().enumerate() {
            *slot = self.load(start + i);
        }

        Ok(self)
    }

    /// Fills `dst` from the position, advancing the position by `dst.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferUnderflow`][crate::Error::BufferUnderflow] if fewer than
    /// `dst.len()` elements remain.
    pub fn get_slice(&mut self, dst: &mut [T]) -> Result<&mut Self> {
        let length = dst.len();
        self.get_into(dst, 0, length)
    }
}
