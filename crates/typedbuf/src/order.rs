// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

/// The order in which the bytes of a multi-byte element are laid out in memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// The most significant byte is stored at the lowest address.
    #[default]
    BigEndian,

    /// The least significant byte is stored at the lowest address.
    LittleEndian,
}

impl ByteOrder {
    /// The byte order of the platform this code was compiled for.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }
}

impl fmt::Display for ByteOrder {
    #[cfg_attr(test, mutants::skip)] // Cosmetic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BigEndian => f.write_str("BIG_ENDIAN"),
            Self::LittleEndian => f.write_str("LITTLE_ENDIAN"),
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_matches_target() {
        let probe = 1_u16.to_ne_bytes();
        let expected = if probe[0] == 1 {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        };

        assert_eq!(ByteOrder::native(), expected);
    }

    #[test]
    fn default_is_big_endian() {
        assert_eq!(ByteOrder::default(), ByteOrder::BigEndian);
        assert_eq!(ByteOrder::BigEndian.to_string(), "BIG_ENDIAN");
        assert_eq!(ByteOrder::LittleEndian.to_string(), "LITTLE_ENDIAN");
    }
}
