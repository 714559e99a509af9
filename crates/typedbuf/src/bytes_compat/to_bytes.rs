// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use bytes::Bytes;

use crate::ByteBuffer;

impl ByteBuffer {
    /// Returns a `bytes::Bytes` that contains the remaining bytes of this buffer.
    ///
    /// The cursor does not move.
    ///
    /// # Example
    ///
    /// ```
    /// use bytes::Buf;
    /// use typedbuf::ByteBuffer;
    ///
    /// let mut buf = ByteBuffer::allocate(4);
    /// buf.put_num(0x1234_u16)?.put_num(0x5678_u16)?;
    /// buf.flip();
    ///
    /// let mut bytes = buf.to_bytes();
    ///
    /// // Consume the data using the bytes crate's Buf trait.
    /// assert_eq!(bytes.get_u16(), 0x1234);
    /// assert_eq!(bytes.get_u16(), 0x5678);
    /// assert!(!bytes.has_remaining());
    /// # Ok::<(), typedbuf::Error>(())
    /// ```
    ///
    /// # Performance
    ///
    /// The storage of a buffer is shared and mutable, so this always copies the bytes into new
    /// memory from the Rust global allocator.
    ///
    /// # Why is this not `.into()`?
    ///
    /// The conversion always copies data. The `.to_bytes()` function must always be explicitly
    /// called to make the copy more obvious and easier to catch in reviews.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        if !self.has_remaining() {
            return Bytes::new();
        }

        Bytes::from(self.to_vec())
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_bytes_copies_window() {
        let mut buf = ByteBuffer::wrap(vec![1, 2, 3, 4, 5]);
        buf.set_position(1).unwrap().set_limit(4).unwrap();

        let bytes = buf.to_bytes();

        assert_eq!(bytes.as_ref(), &[2, 3, 4]);
        assert_eq!(buf.position(), 1);

        buf.put_at(2, 99).unwrap();
        assert_eq!(bytes.as_ref(), &[2, 3, 4]);
    }

    #[test]
    fn to_bytes_from_direct() {
        let mut buf = ByteBuffer::allocate_direct(4).unwrap();
        buf.put_num(0xCAFE_u16).unwrap();
        buf.flip();

        assert_eq!(buf.to_bytes().as_ref(), &[0xCA, 0xFE]);
    }

    #[test]
    fn to_bytes_empty() {
        let mut buf = ByteBuffer::allocate(3);
        buf.set_position(3).unwrap();

        assert!(buf.to_bytes().is_empty());
    }
}
