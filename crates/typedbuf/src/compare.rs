// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Content comparison of buffers.
//!
//! Two buffers compare by their remaining elements only. Capacity, byte order, storage kind,
//! read-only status and the elements outside the window do not participate.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::{Buffer, Element};

const HASH_MULTIPLIER: u64 = 31;

impl<T: Element> Buffer<T> {
    /// Lexicographically compares the remaining elements of two buffers.
    ///
    /// Elements are compared pairwise over the shared prefix; if the prefix is equal, the buffer
    /// with fewer remaining elements orders first. Floating point elements use a total order in
    /// which NaN equals NaN and is greater than every other value.
    #[must_use]
    pub fn compare_to(&self, other: &Self) -> Ordering {
        let shared = self.remaining().min(other.remaining());
        let (left, right) = (self.position(), other.position());

        for i in 0..shared {
            match self.load(left + i).compare(&other.load(right + i)) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }

        self.remaining().cmp(&other.remaining())
    }

    /// A hash of the remaining elements that is stable across runs and platforms.
    ///
    /// Computed left to right as `h = 31 * h + bits(element)` with wrapping arithmetic, starting
    /// from zero, where `bits` is the element's bit pattern with every NaN collapsed to one
    /// pattern and `-0.0` collapsed to `0.0`. Buffers that compare equal have equal hash codes.
    #[must_use]
    pub fn hash_code(&self) -> u64 {
        (self.position()..self.limit()).fold(0, |hash: u64, i| {
            hash.wrapping_mul(HASH_MULTIPLIER)
                .wrapping_add(self.load(i).canonical_bits())
        })
    }
}

impl<T: Element> PartialEq for Buffer<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.remaining() != other.remaining() {
            return false;
        }

        let (left, right) = (self.position(), other.position());
        (0..self.remaining()).all(|i| self.load(left + i).equals(&other.load(right + i)))
    }
}

impl<T: Element> Eq for Buffer<T> {}

impl<T: Element> PartialOrd for Buffer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Element> Ord for Buffer<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl<T: Element> Hash for Buffer<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    #![allow(clippy::mutable_key_type, reason = "buffers are not mutated while in the set")]

    use std::collections::HashSet;

    use super::*;
    use crate::{ByteBuffer, DoubleBuffer, FloatBuffer, IntBuffer};

    fn loaded(capacity: usize) -> FloatBuffer {
        let mut buf = FloatBuffer::allocate(capacity);
        for i in 0..capacity {
            buf.put_at(i, i as f32).unwrap();
        }
        buf
    }

    #[test]
    fn equality_follows_window() {
        let buf = loaded(20);
        let read_only = buf.as_read_only();

        assert_eq!(buf, buf.clone());
        assert_eq!(buf, read_only);

        let mut dup = buf.duplicate();
        dup.set_limit(dup.capacity() - 1).unwrap();
        assert_ne!(buf, dup);

        let mut shifted = buf.duplicate();
        shifted.set_position(1).unwrap();
        assert_ne!(buf, shifted);

        let copy = FloatBuffer::wrap(buf.to_vec());
        assert_eq!(buf, copy);
    }

    #[test]
    fn equality_ignores_order_and_storage_kind() {
        let mut direct = ByteBuffer::allocate_direct(16).unwrap();
        let mut heap = ByteBuffer::allocate(16);

        direct.put_num(7_i32).unwrap();
        heap.put_num(7_i32).unwrap();

        let mut little = heap.duplicate();
        little.set_order(crate::ByteOrder::LittleEndian);

        assert_eq!(direct, heap);
        assert_eq!(heap, little);
    }

    #[test]
    fn nan_compares_greater_and_equal_to_itself() {
        let mut a = FloatBuffer::allocate(1);
        let mut b = FloatBuffer::allocate(1);

        a.put_at(0, 42.0).unwrap();
        b.put_at(0, f32::NAN).unwrap();

        assert_eq!(a.compare_to(&b), Ordering::Less);
        assert_eq!(b.compare_to(&a), Ordering::Greater);
        assert!(a < b);

        a.put_at(0, f32::NAN).unwrap();
        assert_eq!(a.compare_to(&b), Ordering::Equal);
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn signed_zeros_are_equal() {
        let a = DoubleBuffer::wrap(vec![0.0, 1.0]);
        let b = DoubleBuffer::wrap(vec![-0.0, 1.0]);

        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn compare_to_orders_lexicographically() {
        let buf = loaded(20);

        assert_eq!(buf.compare_to(&buf), Ordering::Equal);
        assert_eq!(buf.compare_to(&buf.as_read_only()), Ordering::Equal);

        let mut zeros = FloatBuffer::allocate(20);
        zeros.set_position(5).unwrap();
        assert_eq!(buf.compare_to(&zeros), Ordering::Greater);
        assert_eq!(zeros.compare_to(&buf), Ordering::Less);

        let mut bigger = loaded(20);
        bigger.put_at(10, 1000.0).unwrap();
        assert_eq!(buf.compare_to(&bigger), Ordering::Less);
        assert!(bigger > buf);

        let mut prefix = loaded(20);
        prefix.set_limit(10).unwrap();
        assert_eq!(prefix.compare_to(&buf), Ordering::Less);
        assert_eq!(buf.compare_to(&prefix), Ordering::Greater);
    }

    #[test]
    fn empty_windows_are_equal() {
        let mut a = IntBuffer::wrap(vec![1, 2, 3]);
        let mut b = IntBuffer::wrap(vec![9]);
        a.set_position(3).unwrap();
        b.set_position(1).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.hash_code(), 0);
        assert_eq!(b.hash_code(), 0);
    }

    #[test]
    fn hash_code_follows_window() {
        let buf = loaded(20);
        let read_only = buf.as_read_only();
        let mut dup = buf.duplicate();

        assert_eq!(buf.hash_code(), read_only.hash_code());

        dup.set_position(dup.capacity() / 2).unwrap();
        assert_ne!(buf.hash_code(), dup.hash_code());
    }

    #[test]
    fn hash_code_is_rolling() {
        let buf = IntBuffer::wrap(vec![1, 2, 3]);

        assert_eq!(buf.hash_code(), (31 + 2) * 31 + 3);
    }

    #[test]
    fn equal_buffers_collapse_in_hash_set() {
        let mut set = HashSet::new();

        set.insert(IntBuffer::wrap(vec![4, 5, 6]));
        set.insert(IntBuffer::wrap(vec![4, 5, 6]));
        set.insert(IntBuffer::wrap(vec![6, 5, 4]));

        assert_eq!(set.len(), 2);
    }
}
