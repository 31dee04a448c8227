/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::error::Error;

use common_traits::*;

/// This is a trait alias for all the properties that we need from the chunks
/// read and written by a [`ChunkRead`] or [`ChunkWrite`], respectively.
pub trait Chunk: UnsignedInt + ToBytes + FromBytes + FiniteRangeNumber {}
impl<C: UnsignedInt + ToBytes + FromBytes + FiniteRangeNumber> Chunk for C {}

/// Sequential, streaming chunk-by-chunk reads.
///
/// Since the compressed stream carries no framing, running out of input is a
/// normal event rather than a failure: [`read_chunk`](ChunkRead::read_chunk)
/// returns `Ok(None)` at the end of the stream, and errors are reserved for
/// the backend proper.
pub trait ChunkRead {
    type Error: Error + Send + Sync + 'static;

    /// The chunk type (the type of the result of [`ChunkRead::read_chunk`]).
    type Chunk: Chunk;

    /// Read a chunk and advance the current position, or return `None` at the
    /// end of the stream.
    fn read_chunk(&mut self) -> Result<Option<Self::Chunk>, Self::Error>;
}

/// Sequential, streaming chunk-by-chunk writes.
pub trait ChunkWrite {
    type Error: Error + Send + Sync + 'static;

    /// The chunk type (the type of the argument of [`ChunkWrite::write_chunk`]).
    type Chunk: Chunk;

    /// Write a chunk and advance the current position.
    fn write_chunk(&mut self, chunk: Self::Chunk) -> Result<(), Self::Error>;

    /// Flush the stream.
    fn flush(&mut self) -> Result<(), Self::Error>;
}
