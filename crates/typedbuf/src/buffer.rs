// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use crate::cursor::check_array_range;
use crate::element::{decode, encode};
use crate::storage::{Backing, ByteRegion};
use crate::{ByteOrder, Cursor, Element, HeapStorage, Result};

/// A typed, position-tracking view over a fixed-capacity region of elements.
///
/// A buffer combines a [`Cursor`] (position, limit, mark, capacity) with shared storage. Relative
/// operations such as [`get()`][Self::get] and [`put()`][Self::put] work at the position and
/// advance it; absolute operations such as [`get_at()`][Self::get_at] take an index below the limit
/// and leave the cursor alone.
///
/// # Storage and views
///
/// A root buffer is created by [`allocate()`][Self::allocate], by wrapping existing
/// [`HeapStorage`] via [`wrap()`][Self::wrap], or, for byte buffers, over direct memory via
/// [`ByteBuffer::allocate_direct()`][crate::ByteBuffer]. Views created from a buffer via
/// [`slice()`][Self::slice], [`duplicate()`][Self::duplicate], [`as_read_only()`][Self::as_read_only]
/// or the typed reinterpretations of byte buffers share the storage with their source, so writes
/// through one are visible through all. Each view owns its cursor.
///
/// # Errors
///
/// Operations that can fail return [`Result`]. A failed operation leaves the buffer unchanged.
///
/// # Thread safety
///
/// This type is single-threaded: it is neither `Send` nor `Sync`.
#[derive(Clone)]
pub struct Buffer<T: Element> {
    pub(crate) cursor: Cursor,
    pub(crate) backing: Backing<T>,

    /// Element index (array backing) or byte index (byte backing) of buffer index 0.
    pub(crate) offset: usize,

    pub(crate) order: ByteOrder,
    pub(crate) read_only: bool,
}

impl<T: Element> Buffer<T> {
    /// Creates a buffer over newly allocated, zeroed heap storage of `capacity` elements.
    ///
    /// Byte buffers start out big-endian; buffers of wider elements report native byte order.
    #[must_use]
    pub fn allocate(capacity: usize) -> Self {
        tracing::trace!(capacity, element = T::NAME, "allocating heap buffer");

        Self::over_array(HeapStorage::new(capacity), Cursor::new(capacity))
    }

    /// Creates a buffer over existing heap storage, spanning all of it.
    ///
    /// The storage is shared, not copied: keep a clone of the [`HeapStorage`] to observe writes
    /// made through the buffer and vice versa.
    #[must_use]
    pub fn wrap(storage: impl Into<HeapStorage<T>>) -> Self {
        let storage = storage.into();
        let capacity = storage.len();

        tracing::trace!(capacity, element = T::NAME, "wrapping heap storage");

        Self::over_array(storage, Cursor::new(capacity))
    }

    /// Creates a buffer over existing heap storage with the window `[offset, offset + length)`.
    ///
    /// The capacity is the full storage length and the array offset is zero; only the position
    /// and limit reflect the requested range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`][crate::Error::IndexOutOfBounds] if the range does not
    /// lie within the storage.
    pub fn wrap_range(storage: impl Into<HeapStorage<T>>, offset: usize, length: usize) -> Result<Self> {
        let storage = storage.into();
        let capacity = storage.len();
        let end = check_array_range(capacity, offset, length)?;

        tracing::trace!(capacity, offset, length, element = T::NAME, "wrapping heap storage range");

        Ok(Self::over_array(storage, Cursor::with_window(capacity, offset, end)))
    }

    fn over_array(storage: HeapStorage<T>, cursor: Cursor) -> Self {
        Self {
            cursor,
            backing: Backing::Elements(storage),
            offset: 0,
            order: Self::default_order(),
            read_only: false,
        }
    }

    pub(crate) fn over_bytes(region: ByteRegion, offset: usize, capacity: usize, order: ByteOrder, read_only: bool) -> Self {
        Self {
            cursor: Cursor::new(capacity),
            backing: Backing::Bytes(region),
            offset,
            order,
            read_only,
        }
    }

    fn default_order() -> ByteOrder {
        if T::WIDTH == 1 {
            ByteOrder::BigEndian
        } else {
            ByteOrder::native()
        }
    }

    /// The cursor of this buffer.
    #[must_use]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The number of elements the buffer can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cursor.capacity()
    }

    /// The index of the next element for relative operations.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Moves the position, discarding a mark that lies beyond it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`][crate::Error::IllegalArgument] if `position` exceeds
    /// the limit.
    pub fn set_position(&mut self, position: usize) -> Result<&mut Self> {
        self.cursor.set_position(position)?;
        Ok(self)
    }

    /// The index of the first element that is not accessible.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.cursor.limit()
    }

    /// Moves the limit, pulling the position back and discarding the mark if they lie beyond it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`][crate::Error::IllegalArgument] if `limit` exceeds the
    /// capacity.
    pub fn set_limit(&mut self, limit: usize) -> Result<&mut Self> {
        self.cursor.set_limit(limit)?;
        Ok(self)
    }

    /// Records the position as the mark.
    pub fn mark(&mut self) -> &mut Self {
        self.cursor.mark();
        self
    }

    /// Returns the position to the mark.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMark`][crate::Error::InvalidMark] if no mark is defined.
    pub fn reset(&mut self) -> Result<&mut Self> {
        self.cursor.reset()?;
        Ok(self)
    }

    /// Sets the position to zero and the limit to the capacity, discarding the mark.
    ///
    /// The contents are not touched.
    pub fn clear(&mut self) -> &mut Self {
        self.cursor.clear();
        self
    }

    /// Sets the limit to the position and the position to zero, discarding the mark.
    pub fn flip(&mut self) -> &mut Self {
        self.cursor.flip();
        self
    }

    /// Sets the position to zero, discarding the mark.
    pub fn rewind(&mut self) -> &mut Self {
        self.cursor.rewind();
        self
    }

    /// The number of elements between the position and the limit.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    /// Whether any elements remain between the position and the limit.
    #[must_use]
    pub fn has_remaining(&self) -> bool {
        self.cursor.has_remaining()
    }

    /// The byte order used for multi-byte elements held in byte-addressed memory.
    #[must_use]
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Whether the buffer is backed by direct memory.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.backing.is_direct()
    }

    /// The width of one element in bytes.
    #[must_use]
    pub const fn element_width(&self) -> usize {
        T::WIDTH
    }

    /// Copies the remaining elements (from the position up to the limit) into a new vector.
    ///
    /// The cursor does not move.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        (self.position()..self.limit()).map(|i| self.load(i)).collect()
    }

    /// Reads the element at buffer index `index`. The caller has checked the index.
    pub(crate) fn load(&self, index: usize) -> T {
        match &self.backing {
            Backing::Elements(storage) => storage.get(self.offset + index),
            Backing::Bytes(region) => {
                let base = self.offset + index * T::WIDTH;
                decode(self.order, |i| region.get(base + i))
            }
        }
    }

    /// Writes the element at buffer index `index`. The caller has checked the index and that the
    /// buffer is writable.
    pub(crate) fn store(&self, index: usize, value: T) {
        match &self.backing {
            Backing::Elements(storage) => storage.set(self.offset + index, value),
            Backing::Bytes(region) => {
                let base = self.offset + index * T::WIDTH;
                encode(value, self.order, |i, byte| region.set(base + i, byte));
            }
        }
    }
}

impl<T: Element> From<Vec<T>> for Buffer<T> {
    fn from(value: Vec<T>) -> Self {
        Self::wrap(value)
    }
}

impl<T: Element> fmt::Display for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} buffer[position={} limit={} capacity={}]",
            T::NAME,
            self.position(),
            self.limit(),
            self.capacity()
        )
    }
}

impl<T: Element> fmt::Debug for Buffer<T> {
    #[cfg_attr(test, mutants::skip)] // Cosmetic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("element", &T::NAME)
            .field("position", &self.position())
            .field("limit", &self.limit())
            .field("capacity", &self.capacity())
            .field("mark", &self.cursor.marked())
            .field("order", &self.order)
            .field("read_only", &self.read_only)
            .field("direct", &self.is_direct())
            .finish()
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use static_assertions::assert_not_impl_any;

    use super::*;
    use crate::{Error, FloatBuffer, IntBuffer};

    assert_not_impl_any!(Buffer<u8>: Send, Sync);
    assert_not_impl_any!(Buffer<f64>: Send, Sync);

    #[test]
    fn allocate() {
        let buf = FloatBuffer::allocate(20);

        assert_eq!(buf.position(), 0);
        assert_eq!(buf.limit(), 20);
        assert_eq!(buf.capacity(), 20);
        assert!(!buf.is_direct());
        assert_eq!(buf.element_width(), 4);
        assert_eq!(buf.to_vec(), vec![0.0; 20]);

        let empty = FloatBuffer::allocate(0);
        assert_eq!(empty.capacity(), 0);
        assert_eq!(empty.limit(), 0);
        assert!(!empty.has_remaining());
    }

    #[test]
    fn default_orders() {
        assert_eq!(Buffer::<u8>::allocate(1).order(), ByteOrder::BigEndian);
        assert_eq!(Buffer::<i8>::allocate(1).order(), ByteOrder::BigEndian);
        assert_eq!(IntBuffer::allocate(1).order(), ByteOrder::native());
        assert_eq!(IntBuffer::wrap(vec![1, 2]).order(), ByteOrder::native());
    }

    #[test]
    fn wrap_shares_storage_with_caller() {
        let storage = HeapStorage::from(vec![1_i32, 2, 3, 4]);
        let mut buf = IntBuffer::wrap(storage.clone());

        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.limit(), 4);
        assert_eq!(buf.position(), 0);

        storage.set(0, 100);
        assert_eq!(buf.get_at(0).unwrap(), 100);

        buf.put_at(3, 400).unwrap();
        assert_eq!(storage.get(3), 400);
    }

    #[test]
    fn wrap_range() {
        let storage = HeapStorage::from(vec![0.0_f32; 20]);
        let buf = FloatBuffer::wrap_range(storage.clone(), 5, 15).unwrap();

        assert_eq!(buf.capacity(), 20);
        assert_eq!(buf.position(), 5);
        assert_eq!(buf.limit(), 20);
        assert_eq!(buf.array_offset().unwrap(), 0);

        assert_eq!(
            FloatBuffer::wrap_range(storage.clone(), 7, 15).unwrap_err(),
            Error::IndexOutOfBounds { index: 22, len: 20 }
        );
        assert!(FloatBuffer::wrap_range(storage, usize::MAX, 2).is_err());
    }

    #[test]
    fn cursor_delegation_chains() {
        let mut buf = IntBuffer::allocate(10);

        buf.set_limit(8).unwrap().set_position(3).unwrap().mark();
        assert_eq!(buf.cursor().marked(), Some(3));

        buf.set_position(6).unwrap();
        buf.reset().unwrap();
        assert_eq!(buf.position(), 3);
        assert_eq!(buf.remaining(), 5);

        buf.flip();
        assert_eq!(buf.limit(), 3);
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.reset().unwrap_err(), Error::InvalidMark);

        buf.set_position(2).unwrap();
        buf.rewind();
        assert_eq!(buf.position(), 0);

        buf.clear();
        assert_eq!(buf.limit(), 10);
    }

    #[test]
    fn to_vec_copies_window() {
        let mut buf = IntBuffer::wrap(vec![1, 2, 3, 4, 5]);
        buf.set_position(1).unwrap().set_limit(4).unwrap();

        assert_eq!(buf.to_vec(), vec![2, 3, 4]);
        assert_eq!(buf.position(), 1);
    }

    #[test]
    fn display_mentions_cursor() {
        let mut buf = FloatBuffer::allocate(20);
        buf.set_position(3).unwrap();

        assert_eq!(buf.to_string(), "f32 buffer[position=3 limit=20 capacity=20]");
    }

    #[test]
    fn from_vec() {
        let buf = Buffer::from(vec![1_u16, 2, 3]);

        assert_eq!(buf.capacity(), 3);
        assert_eq!(buf.to_vec(), vec![1, 2, 3]);
    }
}
