/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

use anyhow::{bail, Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use common_traits::AsBytes;
use golomb::prelude::*;

/// Compress or expand binary data using exponential Golomb coding.
///
/// Data is processed in a single pass with constant memory and no framing,
/// so it must be decoded with the same format, order, and adaptive settings
/// it was encoded with; the byte order of the values is the system's native
/// one.
#[derive(Parser, Debug)]
#[command(name = "golomb", version)]
struct Args {
    /// Encode; FORMAT is the format of the input values [default: u8]
    #[arg(
        short = 'e',
        value_name = "FORMAT",
        num_args = 0..=1,
        default_missing_value = "u8",
        conflicts_with = "decode"
    )]
    encode: Option<Format>,

    /// Decode; FORMAT is the format of the output values [default: u8]
    #[arg(
        short = 'd',
        value_name = "FORMAT",
        num_args = 0..=1,
        default_missing_value = "u8"
    )]
    decode: Option<Format>,

    /// Code order; must be smaller than the number of bits of FORMAT
    #[arg(short = 'k', value_name = "N", default_value_t = 0)]
    order: usize,

    /// Enable adaptive mode with smoothing factor 1/2^N; the order
    /// initializes the filter
    #[arg(short = 'a', value_name = "N")]
    adaptive: Option<usize>,

    /// Input file, or `-` for standard input
    input: String,

    /// Output file, or `-` for standard output
    output: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
}

impl Format {
    fn bits(self) -> usize {
        match self {
            Format::I8 | Format::U8 => 8,
            Format::I16 | Format::U16 => 16,
            Format::I32 | Format::U32 => 32,
            Format::I64 | Format::U64 => 64,
        }
    }
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e)
            if e.kind() == ErrorKind::DisplayHelp || e.kind() == ErrorKind::DisplayVersion =>
        {
            let _ = e.print();
            return;
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("golomb: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let format = args.encode.or(args.decode).unwrap_or(Format::U8);

    if args.order >= format.bits() {
        bail!(
            "invalid order {}: the order must be smaller than the {} bits of the format",
            args.order,
            format.bits()
        );
    }
    if let Some(smoothing) = args.adaptive {
        if smoothing >= format.bits() {
            bail!(
                "invalid smoothing exponent {}: it must be smaller than the {} bits of the format",
                smoothing,
                format.bits()
            );
        }
    }

    let input: Box<dyn Read> = if args.input == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(
            File::open(&args.input)
                .with_context(|| format!("cannot open input file '{}'", args.input))?,
        )
    };
    let output: Box<dyn Write> = if args.output == "-" {
        Box::new(io::stdout().lock())
    } else {
        Box::new(
            File::create(&args.output)
                .with_context(|| format!("cannot create output file '{}'", args.output))?,
        )
    };

    macro_rules! dispatch {
        ($run:ident) => {
            match format {
                Format::I8 => $run::<i8>(input, output, args.order, args.adaptive),
                Format::U8 => $run::<u8>(input, output, args.order, args.adaptive),
                Format::I16 => $run::<i16>(input, output, args.order, args.adaptive),
                Format::U16 => $run::<u16>(input, output, args.order, args.adaptive),
                Format::I32 => $run::<i32>(input, output, args.order, args.adaptive),
                Format::U32 => $run::<u32>(input, output, args.order, args.adaptive),
                Format::I64 => $run::<i64>(input, output, args.order, args.adaptive),
                Format::U64 => $run::<u64>(input, output, args.order, args.adaptive),
            }
        };
    }

    if args.decode.is_some() {
        dispatch!(run_decode)
    } else {
        dispatch!(run_encode)
    }
}

fn run_encode<V: Value>(
    input: Box<dyn Read>,
    output: Box<dyn Write>,
    k: usize,
    adaptive: Option<usize>,
) -> Result<()> {
    let mut source = ChunkAdapter::<V::Nat, _>::new(BufReader::new(input));
    let mut encoder = Encoder::new(ChunkAdapter::<u8, _>::new(BufWriter::new(output)));
    let mut filter = adaptive.map(|n| AdaptiveOrder::new(k, n, V::Nat::BITS - 1));

    while let Some(raw) = source.read_chunk().context("input")? {
        let nat = V::from_bits(raw).to_nat();
        let order = filter.as_ref().map_or(k, AdaptiveOrder::order);
        encoder.push(nat, order).context("output")?;
        if let Some(filter) = &mut filter {
            filter.update(nat);
        }
    }
    encoder.flush().context("output")
}

fn run_decode<V: Value>(
    input: Box<dyn Read>,
    output: Box<dyn Write>,
    k: usize,
    adaptive: Option<usize>,
) -> Result<()> {
    let mut decoder = Decoder::new(ChunkAdapter::<u8, _>::new(BufReader::new(input)));
    let mut sink = ChunkAdapter::<V::Nat, _>::new(BufWriter::new(output));
    let mut filter = adaptive.map(|n| AdaptiveOrder::new(k, n, V::Nat::BITS - 1));

    while decoder.has_data() {
        let order = filter.as_ref().map_or(k, AdaptiveOrder::order);
        let nat = match decoder.pull::<V::Nat>(order).context("input")? {
            Pull::Value(nat) | Pull::ZeroOverflow(nat) => nat,
            Pull::Done => break,
        };
        if let Some(filter) = &mut filter {
            filter.update(nat);
        }
        sink.write_chunk(V::from_nat(nat).to_bits()).context("output")?;
    }
    sink.flush().context("output")
}
