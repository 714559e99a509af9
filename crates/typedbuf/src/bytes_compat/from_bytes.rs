// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use bytes::Bytes;

use crate::{ByteBuffer, HeapStorage};

impl From<Bytes> for ByteBuffer {
    /// Copies the bytes into a new big-endian heap byte buffer spanning all of them.
    ///
    /// `Bytes` is immutable and buffer storage is not, so the data is always copied.
    fn from(value: Bytes) -> Self {
        Self::wrap(HeapStorage::from(value.as_ref()))
    }
}
