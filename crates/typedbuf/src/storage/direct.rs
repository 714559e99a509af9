// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::alloc::{Layout, alloc_zeroed, dealloc, handle_alloc_error};
use std::fmt;
use std::ptr::NonNull;
use std::rc::Rc;

use crate::{Error, Result};

/// An opaque block of raw memory that backs direct buffers.
///
/// The block is addressed only byte by byte; multi-byte values are assembled by the buffers
/// that use it. The base address is exposed via [`as_ptr()`][Self::as_ptr] so the memory can be
/// handed to external consumers.
///
/// Cloning a `DirectStorage` is cheap and yields another handle to the same block. Memory that
/// was allocated by [`allocate()`][Self::allocate] is released when the last handle is dropped;
/// memory described by [`from_raw_parts()`][Self::from_raw_parts] is never released by this type.
#[derive(Clone)]
pub struct DirectStorage {
    block: Rc<RawBlock>,
}

struct RawBlock {
    ptr: NonNull<u8>,
    len: usize,
    allocated: Option<Layout>,
}

impl DirectStorage {
    /// Allocates a zeroed block of `len` bytes from the Rust global allocator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if `len` exceeds the largest possible allocation.
    pub fn allocate(len: usize) -> Result<Self> {
        if len == 0 {
            return Ok(Self::from_block(RawBlock {
                ptr: NonNull::dangling(),
                len: 0,
                allocated: None,
            }));
        }

        let layout = Layout::array::<u8>(len).map_err(|_layout_error| Error::IllegalArgument("direct capacity is too large"))?;

        // SAFETY: The layout has a nonzero size, as we returned early above for zero.
        let ptr = unsafe { alloc_zeroed(layout) };

        let Some(ptr) = NonNull::new(ptr) else {
            handle_alloc_error(layout);
        };

        tracing::debug!(len, "allocated direct storage");

        Ok(Self::from_block(RawBlock {
            ptr,
            len,
            allocated: Some(layout),
        }))
    }

    /// Describes an existing block of caller-owned memory.
    ///
    /// The memory is borrowed: it is not released when the last handle is dropped.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `ptr` is valid for reads and writes of `len` bytes for as
    /// long as any handle to this storage (including any buffer created over it) exists, and that
    /// the memory is not accessed through Rust references during that time.
    #[must_use]
    pub unsafe fn from_raw_parts(ptr: NonNull<u8>, len: usize) -> Self {
        Self::from_block(RawBlock {
            ptr,
            len,
            allocated: None,
        })
    }

    fn from_block(block: RawBlock) -> Self {
        Self { block: Rc::new(block) }
    }

    /// The number of bytes in the block.
    #[must_use]
    pub fn len(&self) -> usize {
        self.block.len
    }

    /// Whether the block has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.block.len == 0
    }

    /// The base address of the block.
    ///
    /// Accessing memory through this pointer is subject to the same single-threaded usage rules
    /// as the buffers that share the block.
    #[must_use]
    pub fn as_ptr(&self) -> *mut u8 {
        self.block.ptr.as_ptr()
    }

    /// Reads the byte at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the block.
    #[must_use]
    pub fn get(&self, index: usize) -> u8 {
        assert!(index < self.block.len, "byte index {index} outside direct block of {} bytes", self.block.len);

        // SAFETY: The index is in bounds of the block, as asserted above.
        let byte = unsafe { self.block.ptr.add(index) };

        // SAFETY: The block is valid for reads of all its bytes.
        unsafe { byte.read() }
    }

    /// Writes the byte at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the block.
    pub fn set(&self, index: usize, value: u8) {
        assert!(index < self.block.len, "byte index {index} outside direct block of {} bytes", self.block.len);

        // SAFETY: The index is in bounds of the block, as asserted above.
        let byte = unsafe { self.block.ptr.add(index) };

        // SAFETY: The block is valid for writes of all its bytes. We never hand out references
        // into the block, so writing through a shared handle cannot invalidate a live reference.
        unsafe { byte.write(value) };
    }

    /// Copies the bytes into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }

    /// Whether both handles refer to the same block.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.block, &other.block)
    }
}

impl Drop for RawBlock {
    #[cfg_attr(test, mutants::skip)] // Mutations can violate memory safety and cause UB.
    fn drop(&mut self) {
        if let Some(layout) = self.allocated {
            // SAFETY: Layout matches between allocation and deallocation, and this is the
            // last reference to the block.
            unsafe { dealloc(self.ptr.as_ptr(), layout) };
        }
    }
}

impl fmt::Debug for DirectStorage {
    #[cfg_attr(test, mutants::skip)] // Cosmetic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectStorage")
            .field("ptr", &self.block.ptr)
            .field("len", &self.block.len)
            .field("owned", &self.block.allocated.is_some())
            .finish()
    }
}
