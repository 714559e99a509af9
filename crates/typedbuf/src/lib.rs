// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Typed, position-tracking buffers over shared heap or direct memory.
//!
//! A [`Buffer<T>`] is a fixed-capacity sequence of elements of one primitive type plus a cursor:
//! a position, a limit and an optional mark. Relative operations read or write at the position
//! and advance it, absolute operations address an index below the limit directly, and bulk
//! operations move whole slices or the contents of another buffer.
//!
//! Buffers exist for `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`, `i64`, `f32` and `f64`
//! elements. The common ones have aliases: [`ByteBuffer`], [`CharBuffer`], [`ShortBuffer`],
//! [`IntBuffer`], [`LongBuffer`], [`FloatBuffer`] and [`DoubleBuffer`].
//!
//! # Filling and draining
//!
//! The usual cycle is to fill a buffer with relative writes, [`flip()`][Buffer::flip] it so the
//! limit marks the end of what was written, then drain it with relative reads.
//!
//! ```
//! use typedbuf::IntBuffer;
//!
//! let mut buf = IntBuffer::allocate(8);
//! buf.put(1)?.put(2)?.put(3)?;
//! buf.flip();
//!
//! let mut sum = 0;
//! while buf.has_remaining() {
//!     sum += buf.get()?;
//! }
//!
//! assert_eq!(sum, 6);
//! # Ok::<(), typedbuf::Error>(())
//! ```
//!
//! Every operation that can fail returns [`Result`] and leaves the buffer untouched when it fails.
//!
//! # Views
//!
//! Buffers derived from another buffer share its storage, so a write through one is visible
//! through all of them. Each view owns its cursor.
//!
//! * [`slice()`][Buffer::slice] covers the remaining elements of its source.
//! * [`duplicate()`][Buffer::duplicate] covers the same elements with a copy of the cursor.
//! * [`as_read_only()`][Buffer::as_read_only] rejects every write.
//! * [`ByteBuffer::as_buffer_of()`] and its shorthands such as
//!   [`as_int_buffer()`][ByteBuffer::as_int_buffer] read the remaining bytes of a byte buffer as
//!   wider elements.
//!
//! ```
//! use typedbuf::{ByteBuffer, ByteOrder};
//!
//! let mut bytes = ByteBuffer::allocate(8);
//! bytes.set_order(ByteOrder::LittleEndian);
//!
//! let mut ints = bytes.as_int_buffer();
//! ints.put(0x0403_0201)?;
//!
//! assert_eq!(bytes.get_num::<u8>()?, 0x01);
//! assert_eq!(bytes.get_num::<u8>()?, 0x02);
//! # Ok::<(), typedbuf::Error>(())
//! ```
//!
//! # Storage
//!
//! Heap buffers keep one element per slot of a [`HeapStorage`] array, which a caller can wrap
//! and keep observing. Byte buffers can instead live in [`DirectStorage`]: a raw block of
//! memory, either allocated by this crate or provided by the caller, that is only ever accessed
//! byte by byte. Multi-byte values are laid out according to the buffer's [`ByteOrder`].
//!
//! # Thread safety
//!
//! Buffers and storage are single-threaded types. They are neither `Send` nor `Sync`.

mod buffer;
mod buffer_get;
mod buffer_put;
mod byte_buffer;
#[cfg(feature = "bytes-compat")]
mod bytes_compat;
mod compare;
mod cursor;
mod element;
mod error;
mod order;
mod read_only;
mod storage;
mod views;

pub use buffer::Buffer;
pub use cursor::Cursor;
pub use element::Element;
pub use error::{Error, Result};
pub use order::ByteOrder;
pub use storage::{DirectStorage, HeapStorage};

/// A buffer of bytes. The only buffer type that supports direct storage and typed views.
pub type ByteBuffer = Buffer<u8>;

/// A buffer of UTF-16 code units.
pub type CharBuffer = Buffer<u16>;

/// A buffer of 16-bit signed integers.
pub type ShortBuffer = Buffer<i16>;

/// A buffer of 32-bit signed integers.
pub type IntBuffer = Buffer<i32>;

/// A buffer of 64-bit signed integers.
pub type LongBuffer = Buffer<i64>;

/// A buffer of 32-bit floating point numbers.
pub type FloatBuffer = Buffer<f32>;

/// A buffer of 64-bit floating point numbers.
pub type DoubleBuffer = Buffer<f64>;
