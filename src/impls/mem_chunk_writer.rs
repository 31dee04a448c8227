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

/// An implementation of [`ChunkWrite`] for a vector.
///
/// The vector is extended as new chunks are written.
///
/// # Example
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use golomb::prelude::*;
///
/// let mut writer = MemChunkWriterVec::new(Vec::<u32>::new());
/// writer.write_chunk(0x80400000)?;
/// writer.write_chunk(0x00000001)?;
/// assert_eq!(writer.into_inner(), vec![0x80400000, 0x00000001]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct MemChunkWriterVec<C: Chunk, B: AsMut<Vec<C>>> {
    data: B,
    _marker: core::marker::PhantomData<C>,
}

impl<C: Chunk, B: AsMut<Vec<C>> + AsRef<Vec<C>>> MemChunkWriterVec<C, B> {
    /// Create a new [`MemChunkWriterVec`] appending to `data`.
    #[must_use]
    pub fn new(data: B) -> Self {
        Self {
            data,
            _marker: core::marker::PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.data.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<C: Chunk, B: AsMut<Vec<C>>> ChunkWrite for MemChunkWriterVec<C, B> {
    type Error = Infallible;
    type Chunk = C;

    #[inline(always)]
    fn write_chunk(&mut self, chunk: C) -> Result<(), Infallible> {
        self.data.as_mut().push(chunk);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}
