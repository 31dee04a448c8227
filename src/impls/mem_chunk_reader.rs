/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::convert::Infallible;

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::traits::*;

/// An implementation of [`ChunkRead`] for a slice.
///
/// Running off the end of the slice is the end of the stream, so this reader
/// cannot fail.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct MemChunkReader<C: Chunk, B: AsRef<[C]>> {
    data: B,
    chunk_index: usize,
    _marker: core::marker::PhantomData<C>,
}

impl<C: Chunk, B: AsRef<[C]>> MemChunkReader<C, B> {
    /// Create a new [`MemChunkReader`] from a slice of data.
    #[must_use]
    pub fn new(data: B) -> Self {
        Self {
            data,
            chunk_index: 0,
            _marker: core::marker::PhantomData,
        }
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<C: Chunk, B: AsRef<[C]>> ChunkRead for MemChunkReader<C, B> {
    type Error = Infallible;
    type Chunk = C;

    #[inline(always)]
    fn read_chunk(&mut self) -> Result<Option<C>, Infallible> {
        match self.data.as_ref().get(self.chunk_index) {
            Some(chunk) => {
                self.chunk_index += 1;
                Ok(Some(*chunk))
            }
            None => Ok(None),
        }
    }
}

#[test]
fn test_end_of_slice() {
    let mut reader = MemChunkReader::new(vec![1u16, 2]);
    assert_eq!(reader.read_chunk(), Ok(Some(1)));
    assert_eq!(reader.read_chunk(), Ok(Some(2)));
    assert_eq!(reader.read_chunk(), Ok(None));
    assert_eq!(reader.read_chunk(), Ok(None));
}
