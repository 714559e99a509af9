// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::cell::Cell;

use crate::storage::Backing;
use crate::{Buffer, Element, Error, HeapStorage, Result};

impl<T: Element> Buffer<T> {
    /// Creates a read-only view with the same storage and cursor as this buffer.
    ///
    /// The view observes writes made through any writable view of the storage. Every write
    /// operation on it fails with [`Error::ReadOnlyBuffer`], and no view derived from it can
    /// write either.
    #[must_use]
    pub fn as_read_only(&self) -> Self {
        tracing::trace!(
            capacity = self.capacity(),
            element = T::NAME,
            direct = self.is_direct(),
            read_only = true,
            "creating read-only view"
        );

        let mut view = self.duplicate();
        view.read_only = true;
        view
    }

    /// Whether write operations on this buffer are rejected.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Whether [`array()`][Self::array] and [`array_offset()`][Self::array_offset] succeed.
    ///
    /// True only for writable buffers that store one element per array slot; false for read-only
    /// views, direct buffers and typed views over byte buffers.
    #[must_use]
    pub fn has_array(&self) -> bool {
        !self.read_only && matches!(self.backing, Backing::Elements(_))
    }

    /// The backing element array, shared with every view of it.
    ///
    /// Buffer index `i` corresponds to array slot `array_offset() + i`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperation`] if the buffer is not backed by an element array
    /// and [`Error::ReadOnlyBuffer`] if it is a read-only view.
    pub fn array(&self) -> Result<&[Cell<T>]> {
        let storage = self.accessible_array()?;
        Ok(storage.as_cells())
    }

    /// The index of the backing array slot that holds buffer index 0.
    ///
    /// # Errors
    ///
    /// Same as [`array()`][Self::array].
    pub fn array_offset(&self) -> Result<usize> {
        self.accessible_array()?;
        Ok(self.offset)
    }

    fn accessible_array(&self) -> Result<&HeapStorage<T>> {
        match &self.backing {
            Backing::Bytes(_) => Err(Error::UnsupportedOperation("buffer is not backed by an accessible array")),
            Backing::Elements(_) if self.read_only => Err(Error::ReadOnlyBuffer),
            Backing::Elements(storage) => Ok(storage),
        }
    }

    pub(crate) fn ensure_writable(&self) -> Result<()> {
        if self.read_only {
            return Err(Error::ReadOnlyBuffer);
        }

        Ok(())
    }
}
