// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::storage::Backing;
use crate::{Buffer, Cursor, Element};

impl<T: Element> Buffer<T> {
    /// Creates a view over the remaining elements of this buffer.
    ///
    /// The view's index 0 is this buffer's position and its capacity and limit are this buffer's
    /// remaining count; its position is zero and it has no mark. The view shares storage with
    /// this buffer and inherits its byte order and read-only status. This buffer's cursor is not
    /// changed.
    #[must_use]
    pub fn slice(&self) -> Self {
        let capacity = self.remaining();
        let offset = match &self.backing {
            Backing::Elements(_) => self.offset + self.position(),
            Backing::Bytes(_) => self.offset + self.position() * T::WIDTH,
        };

        tracing::trace!(capacity, offset, element = T::NAME, "slicing buffer");

        Self {
            cursor: Cursor::new(capacity),
            backing: self.backing.clone(),
            offset,
            order: self.order,
            read_only: self.read_only,
        }
    }

    /// Creates a view over the same storage with an independent copy of this buffer's cursor.
    ///
    /// Capacity, position, limit and mark start out equal to this buffer's; changing either
    /// cursor afterwards does not affect the other. Byte order and read-only status are
    /// inherited.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        self.clone()
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use crate::{ByteBuffer, ByteOrder, Error, IntBuffer};

    fn loaded(capacity: usize) -> IntBuffer {
        let mut buf = IntBuffer::allocate(capacity);
        for i in 0..capacity {
            buf.put_at(i, i32::try_from(i).unwrap()).unwrap();
        }
        buf
    }

    #[test]
    fn slice_aliases_source() {
        let mut buf = loaded(20);
        buf.set_position(1).unwrap().set_limit(19).unwrap();

        let mut slice = buf.slice();

        assert_eq!(slice.position(), 0);
        assert_eq!(slice.capacity(), 18);
        assert_eq!(slice.limit(), 18);
        assert_eq!(slice.cursor().marked(), None);
        assert_eq!(slice.get_at(0).unwrap(), 1);
        assert_eq!(buf.position(), 1);
        assert_eq!(buf.limit(), 19);

        buf.put_at(2, 500).unwrap();
        assert_eq!(slice.get_at(1).unwrap(), 500);

        slice.put_at(17, 900).unwrap();
        assert_eq!(buf.get_at(18).unwrap(), 900);

        assert_eq!(slice.get_at(18).unwrap_err(), Error::IndexOutOfBounds { index: 18, len: 18 });
        assert_eq!(slice.array_offset().unwrap(), 1);
    }

    #[test]
    fn slice_of_slice_accumulates_offset() {
        let mut buf = loaded(10);
        buf.set_position(2).unwrap();

        let mut first = buf.slice();
        first.set_position(3).unwrap();
        let second = first.slice();

        assert_eq!(second.capacity(), 5);
        assert_eq!(second.get_at(0).unwrap(), 5);
        assert_eq!(second.array_offset().unwrap(), 5);
    }

    #[test]
    fn slice_of_empty_window() {
        let mut buf = loaded(4);
        buf.set_position(4).unwrap();

        let slice = buf.slice();

        assert_eq!(slice.capacity(), 0);
        assert!(!slice.has_remaining());
    }

    #[test]
    fn slice_inherits_order_and_read_only() {
        let mut bytes = ByteBuffer::allocate(8);
        bytes.set_order(ByteOrder::LittleEndian);
        let mut shorts = bytes.as_short_buffer();
        shorts.set_position(1).unwrap();

        let slice = shorts.slice();
        assert_eq!(slice.order(), ByteOrder::LittleEndian);

        bytes.put_num_at(2, 0x0102_i16).unwrap();
        assert_eq!(slice.get_at(0).unwrap(), 0x0102);

        let read_only = shorts.as_read_only().slice();
        assert!(read_only.is_read_only());
    }

    #[test]
    fn slice_of_byte_view_advances_by_width() {
        let bytes = ByteBuffer::wrap(vec![0, 1, 0, 2, 0, 3, 0, 4]);
        let mut shorts = bytes.as_short_buffer();
        assert_eq!(shorts.order(), ByteOrder::BigEndian);
        shorts.set_position(2).unwrap();

        let slice = shorts.slice();

        assert_eq!(slice.capacity(), 2);
        assert_eq!(slice.to_vec(), vec![3, 4]);
    }

    #[test]
    fn duplicate_has_independent_cursor() {
        let mut buf = loaded(20);
        buf.set_position(3).unwrap().mark();
        buf.set_position(5).unwrap().set_limit(15).unwrap();

        let mut dup = buf.duplicate();

        assert_eq!(dup.position(), 5);
        assert_eq!(dup.limit(), 15);
        assert_eq!(dup.capacity(), 20);
        assert_eq!(dup.cursor().marked(), Some(3));
        assert_eq!(dup.order(), buf.order());
        assert_eq!(dup.is_read_only(), buf.is_read_only());

        dup.reset().unwrap();
        assert_eq!(dup.position(), 3);
        assert_eq!(buf.position(), 5);

        dup.clear();
        assert_eq!(buf.limit(), 15);

        dup.put_at(0, -1).unwrap();
        assert_eq!(buf.get_at(0).unwrap(), -1);
    }
}
