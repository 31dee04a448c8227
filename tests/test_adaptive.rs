/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use golomb::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// Adaptive coding keeps no side channel: the decoder reproduces the encoder's
// order sequence by applying the same update to the same magnitudes. These
// tests run the two filters in lock-step the way the command-line utility
// wires them.

macro_rules! test_adaptive_roundtrip {
    ($name:ident, $value:ty, $chunk:ty) => {
        #[test]
        fn $name() {
            let width = std::mem::size_of::<$value>() * 8;
            let mut rng = SmallRng::seed_from_u64(0);

            for smoothing in 0..width.min(8) {
                for initial_order in [0, width / 2, width - 1] {
                    let mut values: Vec<$value> = (0..300)
                        .map(|_| {
                            let shift = rng.gen_range(0..width as u32);
                            rng.gen::<$value>() >> shift
                        })
                        .collect();
                    // Full-width magnitudes push the filter against its clamp.
                    values.extend_from_slice(&[<$value>::MIN, <$value>::MAX, <$value>::MAX, 0, 1]);

                    let mut encoder =
                        Encoder::new(MemChunkWriterVec::new(Vec::<$chunk>::new()));
                    let mut filter = AdaptiveOrder::new(initial_order, smoothing, width - 1);
                    for &value in &values {
                        let nat = value.to_nat();
                        encoder.push(nat, filter.order()).unwrap();
                        filter.update(nat);
                    }
                    encoder.flush().unwrap();
                    let data = encoder.into_inner().into_inner();

                    let mut decoder = Decoder::new(MemChunkReader::new(data));
                    let mut filter = AdaptiveOrder::new(initial_order, smoothing, width - 1);
                    let mut decoded = Vec::<$value>::new();
                    while decoder.has_data() {
                        match decoder
                            .pull::<<$value as Value>::Nat>(filter.order())
                            .unwrap()
                        {
                            Pull::Value(nat) => {
                                filter.update(nat);
                                decoded.push(<$value as Value>::from_nat(nat));
                            }
                            Pull::ZeroOverflow(_) => {
                                panic!("overflowing prefix in a matched stream")
                            }
                            Pull::Done => break,
                        }
                    }
                    assert_eq!(decoded, values);
                }
            }
        }
    };
}

test_adaptive_roundtrip!(test_adaptive_roundtrip_u8_u8, u8, u8);
test_adaptive_roundtrip!(test_adaptive_roundtrip_i8_u8, i8, u8);
test_adaptive_roundtrip!(test_adaptive_roundtrip_u16_u8, u16, u8);
test_adaptive_roundtrip!(test_adaptive_roundtrip_i16_u32, i16, u32);
test_adaptive_roundtrip!(test_adaptive_roundtrip_u32_u8, u32, u8);
test_adaptive_roundtrip!(test_adaptive_roundtrip_i64_u8, i64, u8);
test_adaptive_roundtrip!(test_adaptive_roundtrip_u64_u64, u64, u64);

#[test]
fn test_clamped_order_stays_in_lock_step() {
    // With no smoothing, a full-width magnitude sets the estimate to the bit
    // width itself, which both sides clamp back into the valid range.
    let values = [u8::MAX, u8::MAX, u8::MAX, 0, u8::MAX];

    let mut encoder = Encoder::new(MemChunkWriterVec::new(Vec::<u8>::new()));
    let mut filter = AdaptiveOrder::new(0, 0, 7);
    for &value in &values {
        encoder.push(value, filter.order()).unwrap();
        filter.update(value);
    }
    assert_eq!(filter.order(), 7);
    encoder.flush().unwrap();
    let data = encoder.into_inner().into_inner();

    let mut decoder = Decoder::new(MemChunkReader::new(data));
    let mut filter = AdaptiveOrder::new(0, 0, 7);
    let mut decoded = Vec::new();
    while decoder.has_data() {
        match decoder.pull::<u8>(filter.order()).unwrap() {
            Pull::Value(nat) => {
                filter.update(nat);
                decoded.push(nat);
            }
            Pull::ZeroOverflow(_) => panic!("overflowing prefix in a matched stream"),
            Pull::Done => break,
        }
    }
    assert_eq!(decoded, values);
}
