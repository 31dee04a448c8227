/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::io::{self, Read, Write};

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::traits::*;

/// An adapter from [`Read`] and [`Write`] to [`ChunkRead`] and
/// [`ChunkWrite`], respectively.
///
/// Instances of this struct can be created using [`ChunkAdapter::new`]. They
/// turn every standard source or destination of bytes (such as
/// [`std::fs::File`], [`std::io::BufReader`], sockets, etc.) into a source or
/// destination of chunks.
///
/// Chunks wider than a byte are read and written in the host byte order; the
/// bit order within a chunk is fixed by the codec and does not depend on it.
///
/// A source whose length is not a multiple of the chunk size yields an
/// [`UnexpectedEof`](io::ErrorKind::UnexpectedEof) error when the partial
/// trailing chunk is reached; a source ending on a chunk boundary ends the
/// stream cleanly.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct ChunkAdapter<C: Chunk, B> {
    backend: B,
    _marker: core::marker::PhantomData<C>,
}

impl<C: Chunk, B> ChunkAdapter<C, B> {
    /// Create a new [`ChunkAdapter`].
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            _marker: core::marker::PhantomData,
        }
    }

    pub fn into_inner(self) -> B {
        self.backend
    }
}

impl<C: Chunk, B: Read> ChunkRead for ChunkAdapter<C, B> {
    type Error = io::Error;
    type Chunk = C;

    fn read_chunk(&mut self) -> Result<Option<C>, io::Error> {
        let mut bytes: C::Bytes = Default::default();
        let buf = bytes.as_mut();
        let mut filled = 0;
        while filled < buf.len() {
            match self.backend.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        if filled == 0 {
            return Ok(None);
        }
        if filled < buf.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "the stream length is not a multiple of the chunk size ({} bytes)",
                    C::BYTES
                ),
            ));
        }
        Ok(Some(C::from_ne_bytes(bytes)))
    }
}

impl<C: Chunk, B: Write> ChunkWrite for ChunkAdapter<C, B> {
    type Error = io::Error;
    type Chunk = C;

    #[inline(always)]
    fn write_chunk(&mut self, chunk: C) -> Result<(), io::Error> {
        self.backend.write_all(chunk.to_ne_bytes().as_ref())
    }

    fn flush(&mut self) -> Result<(), io::Error> {
        self.backend.flush()
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn test_chunk_adapter() {
        let data: Vec<u32> = vec![
            0xa6032421, 0xc9d01b28, 0x168b4ecd, 0xc5ccbed9, 0xfd007100, 0x08469d41, 0x989fd8c2,
            0x954d351a,
        ];
        let path = std::env::temp_dir().join("test_chunk_adapter");
        {
            let mut writer = <ChunkAdapter<u32, _>>::new(std::fs::File::create(&path).unwrap());
            for chunk in &data {
                writer.write_chunk(*chunk).unwrap();
            }
            writer.flush().unwrap();
        }
        {
            let mut reader = <ChunkAdapter<u32, _>>::new(std::fs::File::open(&path).unwrap());
            for chunk in &data {
                assert_eq!(reader.read_chunk().unwrap(), Some(*chunk));
            }
            assert_eq!(reader.read_chunk().unwrap(), None);
        }
    }

    #[test]
    fn test_partial_trailing_chunk() {
        let bytes = [0x01u8, 0x02, 0x03];
        let mut reader = <ChunkAdapter<u16, _>>::new(&bytes[..]);
        assert!(reader.read_chunk().unwrap().is_some());
        assert_eq!(
            reader.read_chunk().unwrap_err().kind(),
            std::io::ErrorKind::UnexpectedEof
        );
    }
}
