// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Operations that only byte buffers have: direct storage, byte order control, multi-byte
//! element access and typed views.

use crate::cursor::check_array_range;
use crate::element::{decode, encode};
use crate::storage::{Backing, ByteRegion};
use crate::{Buffer, ByteBuffer, ByteOrder, CharBuffer, DirectStorage, DoubleBuffer, Element, FloatBuffer, IntBuffer, LongBuffer, Result, ShortBuffer};

impl ByteBuffer {
    /// Creates a big-endian byte buffer over newly allocated, zeroed direct memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`][crate::Error::IllegalArgument] if `capacity` exceeds
    /// the largest possible allocation.
    pub fn allocate_direct(capacity: usize) -> Result<Self> {
        let storage = DirectStorage::allocate(capacity)?;
        Ok(Self::wrap_direct(storage))
    }

    /// Creates a big-endian byte buffer spanning all of an existing direct storage block.
    #[must_use]
    pub fn wrap_direct(storage: DirectStorage) -> Self {
        let capacity = storage.len();

        tracing::trace!(capacity, direct = true, "wrapping direct storage");

        Self::over_bytes(ByteRegion::Direct(storage), 0, capacity, ByteOrder::BigEndian, false)
    }

    /// Creates a big-endian byte buffer over bytes `[offset, offset + length)` of an existing
    /// direct storage block.
    ///
    /// Unlike [`wrap_range()`][Buffer::wrap_range], the buffer covers only the requested bytes:
    /// its capacity is `length` and its index 0 is byte `offset` of the block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`][crate::Error::IndexOutOfBounds] if the range does not
    /// lie within the block.
    pub fn wrap_direct_range(storage: DirectStorage, offset: usize, length: usize) -> Result<Self> {
        check_array_range(storage.len(), offset, length)?;

        tracing::trace!(capacity = length, offset, direct = true, "wrapping direct storage range");

        Ok(Self::over_bytes(ByteRegion::Direct(storage), offset, length, ByteOrder::BigEndian, false))
    }

    /// Changes the byte order used by multi-byte access and by typed views created afterwards.
    ///
    /// Typed views that already exist keep the order they were created with.
    pub fn set_order(&mut self, order: ByteOrder) -> &mut Self {
        self.order = order;
        self
    }

    /// Reads a `T` from the next `T::WIDTH` bytes and advances the position past them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferUnderflow`][crate::Error::BufferUnderflow] if fewer than
    /// `T::WIDTH` bytes remain.
    ///
    /// # Examples
    ///
    /// ```
    /// use typedbuf::{ByteBuffer, ByteOrder};
    ///
    /// let mut buf = ByteBuffer::wrap(vec![1, 2, 3, 4]);
    /// assert_eq!(buf.get_num::<i32>()?, 0x0102_0304);
    ///
    /// buf.rewind().set_order(ByteOrder::LittleEndian);
    /// assert_eq!(buf.get_num::<i32>()?, 0x0403_0201);
    /// # Ok::<(), typedbuf::Error>(())
    /// ```
    pub fn get_num<T: Element>(&mut self) -> Result<T> {
        let start = self.cursor.take_read(T::WIDTH)?;
        Ok(self.decode_at(start))
    }

    /// Reads a `T` from bytes `[index, index + T::WIDTH)` without moving the position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`][crate::Error::IndexOutOfBounds] unless all of those
    /// bytes lie below the limit.
    pub fn get_num_at<T: Element>(&self, index: usize) -> Result<T> {
        self.cursor.check_span(index, T::WIDTH)?;
        Ok(self.decode_at(index))
    }

    /// Writes `value` into the next `T::WIDTH` bytes and advances the position past them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOnlyBuffer`][crate::Error::ReadOnlyBuffer] for read-only views, then
    /// [`Error::BufferOverflow`][crate::Error::BufferOverflow] if fewer than `T::WIDTH` bytes of
    /// room remain.
    pub fn put_num<T: Element>(&mut self, value: T) -> Result<&mut Self> {
        self.ensure_writable()?;

        let start = self.cursor.take_write(T::WIDTH)?;
        self.encode_at(start, value);
        Ok(self)
    }

    /// Writes `value` into bytes `[index, index + T::WIDTH)` without moving the position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOnlyBuffer`][crate::Error::ReadOnlyBuffer] for read-only views, then
    /// [`Error::IndexOutOfBounds`][crate::Error::IndexOutOfBounds] unless all of those bytes lie
    /// below the limit.
    pub fn put_num_at<T: Element>(&mut self, index: usize, value: T) -> Result<&mut Self> {
        self.ensure_writable()?;
        self.cursor.check_span(index, T::WIDTH)?;

        self.encode_at(index, value);
        Ok(self)
    }

    fn decode_at<T: Element>(&self, start: usize) -> T {
        decode(self.order, |i| self.load(start + i))
    }

    fn encode_at<T: Element>(&self, start: usize, value: T) {
        encode(value, self.order, |i, byte| self.store(start + i, byte));
    }

    /// Creates a view that reads the remaining bytes as elements of type `T`.
    ///
    /// The view's index 0 is this buffer's position. Its capacity is the number of whole elements
    /// that fit in the remaining bytes; trailing bytes that do not fill an element are not part
    /// of the view. The view uses this buffer's current byte order for its whole life, inherits
    /// read-only status and storage kind, and never exposes an array. This buffer's cursor is not
    /// changed.
    #[must_use]
    pub fn as_buffer_of<T: Element>(&self) -> Buffer<T> {
        let region = match &self.backing {
            Backing::Elements(storage) => ByteRegion::Heap(storage.clone()),
            Backing::Bytes(region) => region.clone(),
        };

        let capacity = self.remaining() / T::WIDTH;

        tracing::trace!(
            capacity,
            element = T::NAME,
            direct = self.is_direct(),
            read_only = self.read_only,
            "creating typed view over bytes"
        );

        Buffer::over_bytes(region, self.offset + self.position(), capacity, self.order, self.read_only)
    }

    /// Views the remaining bytes as `i16` elements. See [`as_buffer_of()`][Self::as_buffer_of].
    #[must_use]
    pub fn as_short_buffer(&self) -> ShortBuffer {
        self.as_buffer_of()
    }

    /// Views the remaining bytes as `u16` code units. See [`as_buffer_of()`][Self::as_buffer_of].
    #[must_use]
    pub fn as_char_buffer(&self) -> CharBuffer {
        self.as_buffer_of()
    }

    /// Views the remaining bytes as `i32` elements. See [`as_buffer_of()`][Self::as_buffer_of].
    #[must_use]
    pub fn as_int_buffer(&self) -> IntBuffer {
        self.as_buffer_of()
    }

    /// Views the remaining bytes as `i64` elements. See [`as_buffer_of()`][Self::as_buffer_of].
    #[must_use]
    pub fn as_long_buffer(&self) -> LongBuffer {
        self.as_buffer_of()
    }

    /// Views the remaining bytes as `f32` elements. See [`as_buffer_of()`][Self::as_buffer_of].
    #[must_use]
    pub fn as_float_buffer(&self) -> FloatBuffer {
        self.as_buffer_of()
    }

    /// Views the remaining bytes as `f64` elements. See [`as_buffer_of()`][Self::as_buffer_of].
    #[must_use]
    pub fn as_double_buffer(&self) -> DoubleBuffer {
        self.as_buffer_of()
    }
}
