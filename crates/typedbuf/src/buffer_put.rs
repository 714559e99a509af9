// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! We separate out all the write methods for ease of maintenance.

use crate::cursor::check_array_range;
use crate::{Buffer, Element, Error, Result};

impl<T: Element> Buffer<T> {
    /// Writes `value` at the position and advances the position by one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOnlyBuffer`] for read-only views, then
    /// [`Error::BufferOverflow`] if no room remains.
    pub fn put(&mut self, value: T) -> Result<&mut Self> {
        self.ensure_writable()?;

        let index = self.cursor.take_write(1)?;
        self.store(index, value);
        Ok(self)
    }

    /// Writes `value` at `index` without moving the position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOnlyBuffer`] for read-only views, then
    /// [`Error::IndexOutOfBounds`] unless `index` is below the limit.
    pub fn put_at(&mut self, index: usize, value: T) -> Result<&mut Self> {
        self.ensure_writable()?;
        self.cursor.check_span(index, 1)?;

        self.store(index, value);
        Ok(self)
    }

    /// Writes `src[offset..offset + length]` at the position, advancing the position by `length`.
    ///
    /// A zero-length request with `offset == src.len()` is valid and does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOnlyBuffer`] for read-only views, then [`Error::IndexOutOfBounds`]
    /// if the range does not lie within `src`, then [`Error::BufferOverflow`] if fewer than
    /// `length` elements of room remain. Nothing is written on failure.
    pub fn put_from(&mut self, src: &[T], offset: usize, length: usize) -> Result<&mut Self> {
        self.ensure_writable()?;

        let end = check_array_range(src.len(), offset, length)?;
        let start = self.cursor.take_write(length)?;

        for (i, value) in src[offset..end].iter().enumerate() {
            self.store(start + i, *value);
        }

        Ok(self)
    }

    /// Writes all of `src` at the position, advancing the position by `src.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOnlyBuffer`] for read-only views, then [`Error::BufferOverflow`] if
    /// fewer than `src.len()` elements of room remain.
    pub fn put_slice(&mut self, src: &[T]) -> Result<&mut Self> {
        self.put_from(src, 0, src.len())
    }

    /// Transfers all remaining elements of `src` into this buffer, advancing both positions by the
    /// number of elements transferred.
    ///
    /// `src` may be a view sharing storage with this buffer, even with an overlapping window; the
    /// elements are read in full before any is written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOnlyBuffer`] for read-only views, then [`Error::BufferOverflow`] if
    /// `src` has more remaining elements than this buffer has room for. Neither buffer changes on
    /// failure.
    pub fn put_buffer(&mut self, src: &mut Self) -> Result<&mut Self> {
        self.ensure_writable()?;

        let count = src.remaining();
        let remaining = self.remaining();

        if count > remaining {
            return Err(Error::BufferOverflow {
                requested: count,
                remaining,
            });
        }

        let elements = src.to_vec();
        src.cursor.take_read(count)?;

        let start = self.cursor.take_write(count)?;
        for (i, value) in elements.into_iter().enumerate() {
            self.store(start + i, value);
        }

        Ok(self)
    }

    /// Moves the remaining elements to the start of the buffer and prepares it for more writes.
    ///
    /// Elements `[position, limit)` are copied to `[0, remaining)`; the position becomes the
    /// number of elements moved and the limit becomes the capacity. The mark is always discarded,
    /// even when no elements were moved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOnlyBuffer`] for read-only views.
    pub fn compact(&mut self) -> Result<&mut Self> {
        self.ensure_writable()?;

        let position = self.position();
        let count = self.remaining();

        // Ascending copy is safe: the destination never lies ahead of the source.
        for i in 0..count {
            self.store(i, self.load(position + i));
        }

        self.cursor.clear();
        self.cursor.set_position(count)?;
        self.cursor.discard_mark();

        Ok(self)
    }
}
