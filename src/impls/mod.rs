/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Implementations of chunk streams.

If you have a standard [`Read`](std::io::Read) or [`Write`](std::io::Write)
byte stream you can wrap it into a [`ChunkAdapter`] to turn it into a chunk
stream; chunks wider than a byte are read and written in the host byte order.

If instead the compressed stream lives in memory, [`MemChunkReader`] reads
chunks from a slice and [`MemChunkWriterVec`] appends them to a vector; both
are infallible.

In all cases you must specify a chunk type, which for the memory backends
must match the element type of the slice or vector and will usually be filled
in by type inference.

*/

mod mem_chunk_reader;
pub use mem_chunk_reader::*;

mod mem_chunk_writer;
pub use mem_chunk_writer::*;

mod chunk_adapter;
pub use chunk_adapter::*;
