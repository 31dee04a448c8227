/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Streaming exponential Golomb coding of order *k*.

The codeword of a natural number *n* with parameter *k* is built from
*v* = *n* + 2*ᵏ*: writing *B* for the number of bits of *v*, the codeword is
*B* − *k* − 1 zeros followed by the *B*-bit binary representation of *v*,
most-significant bit first (its leading one doubles as the unary
terminator), for a total of 2*B* − *k* − 1 bits. The first few codewords are:

| Arg |   k = 0 |  k = 1 | k = 2 |
|-----|--------:|-------:|------:|
| 0   |       1 |     10 |   100 |
| 1   |     010 |     11 |   101 |
| 2   |     011 |   0100 |   110 |
| 3   |   00100 |   0101 |   111 |
| 4   |   00101 |   0110 | 01000 |
| 5   |   00110 |   0111 | 01001 |

The code for *k* = 0 is exactly the [Elias γ
code](https://en.wikipedia.org/wiki/Elias_gamma_coding) of *n* + 1;
exponential Golomb codes are used, among others, in
[H.264](https://en.wikipedia.org/wiki/Advanced_Video_Coding) and
[H.265](https://en.wikipedia.org/wiki/High_Efficiency_Video_Coding).

Because the values coded here have a fixed width *W*, the offset
*n* + 2*ᵏ* can wrap for the topmost 2*ᵏ* values of the range. Those values
are carried by a reserved codeword made of the maximal unary prefix for the
width — *W* − *k* zeros and a one — followed by the *W*-bit value
(*n* + 2*ᵏ*) mod 2*ᵂ*, for a total of 2*W* − *k* + 1 bits. The
[decoder](Decoder) needs no special case: it rebuilds every value with a
single wrapping subtraction of 2*ᵏ*.

[`Encoder`] and [`Decoder`] code one value at a time against a
[`ChunkWrite`]/[`ChunkRead`] backend; [`encode`] and [`decode`] drive whole
sequences. [`AdaptiveOrder`] implements the moving-average re-estimation of
*k* used by the command-line utility's adaptive mode.

*/

use common_traits::{AsBytes, CastableInto, UpcastableInto};

use crate::traits::*;

mod encoder;
pub use encoder::*;

mod decoder;
pub use decoder::*;

mod adaptive;
pub use adaptive::*;

/// Return the length in bits of the codeword for `value` with order `k`.
#[must_use]
#[inline]
pub fn len_exp_golomb<V: Value>(value: V, k: usize) -> usize {
    let width = V::Nat::BITS;
    debug_assert!(k < width);
    let mask = u64::MAX >> (64 - width);
    let nat: u64 = value.to_nat().cast();
    let base = 1u64 << k;
    if nat > mask - base {
        2 * width - k + 1
    } else {
        let bits = 64 - (nat + base).leading_zeros() as usize;
        2 * bits - k - 1
    }
}

/// Encode `values` into `sink` with order `k` and return the sink.
///
/// The partially filled final chunk, if any, is flushed with its low bits
/// zero-padded, so the output is always a whole number of chunks.
pub fn encode<V: Value, I: IntoIterator<Item = V>, CW: ChunkWrite>(
    values: I,
    sink: CW,
    k: usize,
) -> Result<CW, CW::Error>
where
    u64: CastableInto<CW::Chunk>,
{
    let mut encoder = Encoder::new(sink);
    for value in values {
        encoder.push(value, k)?;
    }
    encoder.flush()?;
    Ok(encoder.into_inner())
}

/// Decode every codeword in `source` with order `k`, delivering the values
/// to `sink`.
///
/// Decoding stops at the end of the input; trailing padding bits are
/// ignored. [`ZeroOverflow`](Pull::ZeroOverflow) results are delivered like
/// regular values, so a stream decoded with a mismatched order or width can
/// be recognized by its values; decoding then continues at the next
/// codeword boundary the scanner finds.
///
/// Signed outputs are produced by the unsigned decoder followed by the
/// inverse ZigZag mapping at delivery.
pub fn decode<V: Value, CR: ChunkRead, F: FnMut(V)>(
    source: CR,
    mut sink: F,
    k: usize,
) -> Result<(), CR::Error>
where
    CR::Chunk: UpcastableInto<u64>,
{
    let mut decoder = Decoder::new(source);
    while decoder.has_data() {
        match decoder.pull::<V>(k)? {
            Pull::Value(value) | Pull::ZeroOverflow(value) => sink(value),
            Pull::Done => break,
        }
    }
    Ok(())
}
