/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use common_traits::{AsBytes, CastableFrom, CastableInto, FiniteRangeNumber, Integer, Number, UpcastableInto};

use crate::traits::*;

/// The result of [`Decoder::pull`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull<V> {
    /// A complete codeword was decoded.
    Value(V),
    /// The unary prefix is longer than any codeword of the requested type
    /// allows; the payload is the number of zeros scanned, saturated to the
    /// maximum of the *unsigned representation* and then delivered through
    /// the same mapping as regular values. For signed types this means the
    /// count arrives ZigZag-inverted: sixteen zeros scanned for an `i8`
    /// surface as `8`, and a saturated count of 255 as `i8::MIN`, not
    /// `i8::MAX`.
    ///
    /// The whole prefix and its terminating one have been consumed, but no
    /// mantissa: the caller may resynchronize from there or abort. Zeros
    /// running into the end of the stream are not an overflow but a clean
    /// [`Done`](Pull::Done), which is what the padding of the final chunk
    /// produces.
    ZeroOverflow(V),
    /// The input is exhausted. This is a clean end of stream when it happens
    /// between codewords; callers that need strict framing can treat a
    /// `Done` right after a refused chunk boundary as truncation.
    Done,
}

/// A streaming exponential Golomb decoder over a [`ChunkRead`].
///
/// [`pull`](Decoder::pull) scans the unary prefix, counting zeros a whole
/// chunk at a time with `leading_zeros`, then reads the mantissa and rebuilds
/// the value with a wrapping subtraction of 2*ᵏ*, which handles the
/// maximal-prefix codewords of top-of-range values with no separate path.
/// Chunks are fetched lazily, one at a time, with no lookahead.
///
/// ### Example
/// ```
/// use golomb::prelude::*;
/// let mut decoder = Decoder::new(MemChunkReader::new(vec![0b10100000u8]));
/// assert_eq!(decoder.pull::<u8>(0).unwrap(), Pull::Value(0));
/// assert_eq!(decoder.pull::<i8>(0).unwrap(), Pull::Value(-1));
/// assert_eq!(decoder.pull::<u8>(0).unwrap(), Pull::Done);
/// ```
#[derive(Debug)]
pub struct Decoder<CR: ChunkRead> {
    /// The [`ChunkRead`] from which chunks are fetched.
    backend: CR,
    /// Bits not yet consumed, left-aligned: the next bit to read is the most
    /// significant one. The bits below the valid ones are zero.
    buffer: CR::Chunk,
    /// Number of valid bits left in the buffer.
    valid_bits: usize,
    /// Whether the backend has reported the end of the stream.
    exhausted: bool,
}

impl<CR: ChunkRead> Decoder<CR>
where
    CR::Chunk: UpcastableInto<u64>,
{
    /// Create a new [`Decoder`] around a [`ChunkRead`].
    pub fn new(backend: CR) -> Self {
        Self {
            backend,
            buffer: CR::Chunk::ZERO,
            valid_bits: 0,
            exhausted: false,
        }
    }

    /// Whether buffered bits or unread chunks might remain.
    ///
    /// Trailing zero padding still counts as data; a subsequent
    /// [`pull`](Decoder::pull) consumes it and returns [`Pull::Done`].
    pub fn has_data(&self) -> bool {
        self.valid_bits > 0 || !self.exhausted
    }

    pub fn into_inner(self) -> CR {
        self.backend
    }

    /// Fetch the next chunk into the empty buffer; `false` at end of stream.
    #[inline(always)]
    fn refill(&mut self) -> Result<bool, CR::Error> {
        debug_assert_eq!(self.valid_bits, 0);
        match self.backend.read_chunk()? {
            Some(chunk) => {
                self.buffer = chunk;
                self.valid_bits = CR::Chunk::BITS;
                Ok(true)
            }
            None => {
                self.exhausted = true;
                Ok(false)
            }
        }
    }

    /// Read `n_bits` (at most 64), MSB-first, in the lowest bits of the
    /// result; `None` if the input ends first.
    fn read_bits(&mut self, mut n_bits: usize) -> Result<Option<u64>, CR::Error> {
        debug_assert!(n_bits <= 64);
        let mut result = 0_u64;
        while n_bits > 0 {
            if self.valid_bits == 0 && !self.refill()? {
                return Ok(None);
            }
            let taken = Ord::min(n_bits, self.valid_bits);
            let bits: u64 = (self.buffer >> (CR::Chunk::BITS - taken)).upcast();
            // taken might be 64, so the shift is split
            result = result << (taken - 1) << 1 | bits;
            self.buffer = self.buffer << (taken - 1) << 1;
            self.valid_bits -= taken;
            n_bits -= taken;
        }
        Ok(Some(result))
    }

    /// Decode the next codeword with order `k`.
    ///
    /// `k` must be smaller than the number of bits of the value type. For
    /// signed types the inverse ZigZag mapping is applied at delivery.
    pub fn pull<V: Value>(&mut self, k: usize) -> Result<Pull<V>, CR::Error> {
        let width = V::Nat::BITS;
        debug_assert!(k < width);
        let max_zeros = width - k;

        // Scan the unary prefix up to its terminating one. Running out of
        // input here is a clean end of stream: the zero padding of the final
        // chunk takes this path.
        let mut zeros = 0_usize;
        loop {
            if self.valid_bits == 0 && !self.refill()? {
                return Ok(Pull::Done);
            }
            let run = Ord::min(self.buffer.leading_zeros() as usize, self.valid_bits);
            zeros = zeros.saturating_add(run);
            if run < self.valid_bits {
                // Hit the terminating one; consume it along with the zeros.
                self.buffer = self.buffer << run << 1;
                self.valid_bits -= run + 1;
                break;
            }
            self.valid_bits = 0;
            self.buffer = CR::Chunk::ZERO;
        }
        if zeros > max_zeros {
            return Ok(zero_overflow(zeros));
        }

        // Read the mantissa and rebuild the offset value. The wrapping
        // subtraction folds the maximal-prefix codewords into the regular
        // reconstruction: their marker bit falls off the top of the width.
        let mantissa = match self.read_bits(zeros + k)? {
            Some(mantissa) => mantissa,
            None => return Ok(Pull::Done),
        };
        let v = if zeros + k < 64 {
            1_u64 << (zeros + k) | mantissa
        } else {
            mantissa
        };
        let mask = u64::MAX >> (64 - width);
        let nat = v.wrapping_sub(1_u64 << k) & mask;
        Ok(Pull::Value(V::from_nat(V::Nat::cast_from(nat))))
    }
}

fn zero_overflow<V: Value>(zeros: usize) -> Pull<V> {
    let max: u64 = V::Nat::MAX.cast();
    Pull::ZeroOverflow(V::from_nat(V::Nat::cast_from(Ord::min(zeros as u64, max))))
}
