// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::Element;

/// A shared, fixed-length array of elements that backs heap buffers.
///
/// Cloning a `HeapStorage` is cheap and yields another handle to the same elements: a write
/// through any handle (or through any buffer wrapping it) is visible through all of them. This is
/// how a caller that wraps an array in a [`Buffer`][crate::Buffer] keeps observing the contents.
///
/// Element access performs no cursor logic; indexing outside the array panics.
pub struct HeapStorage<T> {
    cells: Rc<[Cell<T>]>,
}

impl<T: Element> HeapStorage<T> {
    /// Creates storage of `len` elements, each initialized to zero.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            cells: (0..len).map(|_| Cell::new(T::default())).collect(),
        }
    }

    /// The number of elements in the array.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reads the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the array.
    #[must_use]
    pub fn get(&self, index: usize) -> T {
        self.cells[index].get()
    }

    /// Writes the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the array.
    pub fn set(&self, index: usize, value: T) {
        self.cells[index].set(value);
    }

    /// The elements as a slice of cells, for direct in-place access.
    #[must_use]
    pub fn as_cells(&self) -> &[Cell<T>] {
        &self.cells
    }

    /// Copies the elements into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.cells.iter().map(Cell::get).collect()
    }

    /// Whether both handles refer to the same array.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cells, &other.cells)
    }
}

impl<T> Clone for HeapStorage<T> {
    fn clone(&self) -> Self {
        Self {
            cells: Rc::clone(&self.cells),
        }
    }
}

impl<T: Element> From<Vec<T>> for HeapStorage<T> {
    fn from(value: Vec<T>) -> Self {
        Self {
            cells: value.into_iter().map(Cell::new).collect(),
        }
    }
}

impl<T: Element> From<&[T]> for HeapStorage<T> {
    fn from(value: &[T]) -> Self {
        Self {
            cells: value.iter().copied().map(Cell::new).collect(),
        }
    }
}

impl<T: Element, const N: usize> From<[T; N]> for HeapStorage<T> {
    fn from(value: [T; N]) -> Self {
        Self {
            cells: value.into_iter().map(Cell::new).collect(),
        }
    }
}

impl<T: Element> fmt::Debug for HeapStorage<T> {
    #[cfg_attr(test, mutants::skip)] // Cosmetic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapStorage")
            .field("element", &T::NAME)
            .field("len", &self.len())
            .finish()
    }
}
