// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Storage strategies behind buffers.
//!
//! Storage has no cursor semantics; it is a fixed-length region with element or byte access.
//! All buffers derived from one root share the root's storage.

mod direct;
mod heap;

pub use direct::DirectStorage;
pub use heap::HeapStorage;

use crate::Element;

/// A byte-addressed region, which typed views over byte buffers decode their elements from.
#[derive(Clone, Debug)]
pub(crate) enum ByteRegion {
    Heap(HeapStorage<u8>),
    Direct(DirectStorage),
}

impl ByteRegion {
    pub(crate) fn get(&self, index: usize) -> u8 {
        match self {
            Self::Heap(storage) => storage.get(index),
            Self::Direct(storage) => storage.get(index),
        }
    }

    pub(crate) fn set(&self, index: usize, value: u8) {
        match self {
            Self::Heap(storage) => storage.set(index, value),
            Self::Direct(storage) => storage.set(index, value),
        }
    }

    pub(crate) fn is_direct(&self) -> bool {
        matches!(self, Self::Direct(_))
    }
}

/// What a buffer reads its elements from.
pub(crate) enum Backing<T> {
    /// One array slot per element.
    Elements(HeapStorage<T>),

    /// `T::WIDTH` bytes per element, decoded with the buffer's byte order.
    Bytes(ByteRegion),
}

impl<T: Element> Backing<T> {
    pub(crate) fn is_direct(&self) -> bool {
        match self {
            Self::Elements(_) => false,
            Self::Bytes(region) => region.is_direct(),
        }
    }
}

impl<T> Clone for Backing<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Elements(storage) => Self::Elements(storage.clone()),
            Self::Bytes(region) => Self::Bytes(region.clone()),
        }
    }
}
