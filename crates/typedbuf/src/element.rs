// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The element codec: what a buffer stores and how one element maps onto bytes.

use std::cmp::Ordering;
use std::fmt::Debug;

use num_traits::{FromBytes, ToBytes};

use crate::ByteOrder;

mod private {
    #[expect(unnameable_types, reason = "intentional, sealed trait pattern")]
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for i8 {}
    impl Sealed for u16 {}
    impl Sealed for i16 {}
    impl Sealed for u32 {}
    impl Sealed for i32 {}
    impl Sealed for u64 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A value type that can be stored in a [`Buffer`][crate::Buffer].
///
/// Each element has a fixed width in bytes and an integer bit pattern of that width. When an
/// element is stored in byte-addressed memory, the bit pattern is laid out according to a
/// [`ByteOrder`]; floating point elements are always decoded by decoding the integer of the same
/// width and reinterpreting it as IEEE-754 bits.
///
/// This trait is sealed. It is implemented for `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`,
/// `i64`, `f32` and `f64`.
pub trait Element: private::Sealed + Copy + Default + Debug + 'static {
    /// Human-readable element name, used when formatting buffers.
    const NAME: &'static str;

    /// Width of one element in bytes.
    const WIDTH: usize;

    /// The fixed-size byte array that holds one encoded element.
    type Raw: Default + AsRef<[u8]> + AsMut<[u8]>;

    /// The integer bit pattern of the element.
    type Bits: Copy + FromBytes<Bytes = Self::Raw> + ToBytes<Bytes = Self::Raw>;

    /// Returns the bit pattern of the element.
    fn to_bits(self) -> Self::Bits;

    /// Reinterprets a bit pattern as an element.
    fn from_bits(bits: Self::Bits) -> Self;

    /// Total order used by buffer comparison.
    ///
    /// Integers use their natural order. For floating point values, NaN is equal to NaN and
    /// greater than every other value, including positive infinity; `-0.0` equals `0.0`.
    fn compare(&self, other: &Self) -> Ordering;

    /// Equality consistent with [`compare()`][Self::compare].
    fn equals(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Bit pattern widened to 64 bits, identical for all values that are
    /// [`equals()`][Self::equals].
    fn canonical_bits(self) -> u64;
}

macro_rules! integer_element {
    ($($t:ty => $name:literal, $width:literal;)*) => {
        $(
            impl Element for $t {
                const NAME: &'static str = $name;
                const WIDTH: usize = $width;

                type Raw = [u8; $width];
                type Bits = $t;

                #[inline]
                fn to_bits(self) -> Self::Bits {
                    self
                }

                #[inline]
                fn from_bits(bits: Self::Bits) -> Self {
                    bits
                }

                #[inline]
                fn compare(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }

                #[inline]
                fn canonical_bits(self) -> u64 {
                    let mut wide = [0_u8; 8];
                    wide[..$width].copy_from_slice(&self.to_le_bytes());
                    u64::from_le_bytes(wide)
                }
            }
        )*
    };
}

macro_rules! float_element {
    ($($t:ty => $name:literal, $bits:ty, $width:literal;)*) => {
        $(
            impl Element for $t {
                const NAME: &'static str = $name;
                const WIDTH: usize = $width;

                type Raw = [u8; $width];
                type Bits = $bits;

                #[inline]
                fn to_bits(self) -> Self::Bits {
                    <$t>::to_bits(self)
                }

                #[inline]
                fn from_bits(bits: Self::Bits) -> Self {
                    <$t>::from_bits(bits)
                }

                fn compare(&self, other: &Self) -> Ordering {
                    match (self.is_nan(), other.is_nan()) {
                        (true, true) => Ordering::Equal,
                        (true, false) => Ordering::Greater,
                        (false, true) => Ordering::Less,
                        // Neither is NaN, so the partial order is total here.
                        (false, false) => self.partial_cmp(other).unwrap_or(Ordering::Equal),
                    }
                }

                fn canonical_bits(self) -> u64 {
                    if self.is_nan() {
                        u64::from(<$t>::NAN.to_bits())
                    } else if self == 0.0 {
                        0
                    } else {
                        u64::from(<$t>::to_bits(self))
                    }
                }
            }
        )*
    };
}

integer_element! {
    u8 => "u8", 1;
    i8 => "i8", 1;
    u16 => "u16", 2;
    i16 => "i16", 2;
    u32 => "u32", 4;
    i32 => "i32", 4;
    u64 => "u64", 8;
    i64 => "i64", 8;
}

float_element! {
    f32 => "f32", u32, 4;
    f64 => "f64", u64, 8;
}

/// Assembles an element from `T::WIDTH` bytes, fetching byte `i` of the element via `byte_at(i)`.
///
/// Byte 0 is the lowest address of the element.
pub(crate) fn decode<T: Element>(order: ByteOrder, mut byte_at: impl FnMut(usize) -> u8) -> T {
    let mut raw = T::Raw::default();

    for (i, byte) in raw.as_mut().iter_mut().enumerate() {
        *byte = byte_at(i);
    }

    let bits = match order {
        ByteOrder::BigEndian => T::Bits::from_be_bytes(&raw),
        ByteOrder::LittleEndian => T::Bits::from_le_bytes(&raw),
    };

    T::from_bits(bits)
}

/// Disassembles an element into `T::WIDTH` bytes, storing byte `i` of the element via `set(i, byte)`.
///
/// Byte 0 is the lowest address of the element.
pub(crate) fn encode<T: Element>(value: T, order: ByteOrder, mut set: impl FnMut(usize, u8)) {
    let bits = value.to_bits();

    let raw = match order {
        ByteOrder::BigEndian => bits.to_be_bytes(),
        ByteOrder::LittleEndian => bits.to_le_bytes(),
    };

    for (i, byte) in raw.as_ref().iter().enumerate() {
        set(i, *byte);
    }
}
