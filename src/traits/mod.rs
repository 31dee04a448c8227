/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Traits for the streams the codec reads and writes.

The compressed side of the codec is a sequence of fixed-width unsigned
*chunks*, produced and consumed one at a time through [`ChunkWrite`] and
[`ChunkRead`]. Reading and writing by chunks rather than by single bytes makes
it possible to select the granularity that best matches the surrounding
system: a byte stream for files and sockets, or wider words when the stream
lives in memory. The implementations we provide are in the
[`impls`](crate::impls) module.

The value side is described by [`Value`], which ties each supported integer
type to its unsigned representation and to the ZigZag bijection used for
signed types.

All traits have an internal error type `Error`, which propagates the error of
the underlying backend. For memory backends the error type is
[`Infallible`](core::convert::Infallible), in which case the compiler is able
to perform several further optimizations.

*/

mod chunk_stream;
pub use chunk_stream::*;

mod value;
pub use value::*;
