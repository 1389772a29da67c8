//! Encode driver: picks raw fallback, single-symbol RLE, or full canonical
//! Huffman, whichever the input actually calls for.

use crate::bitio::BitWriter;
use crate::header::{length_prefix_size, table_size, write_length_prefix, write_table};
use crate::tree::{self, ALPHABET};

/// Compresses `input` into `out`, returning the number of bytes the
/// encoded stream occupies.
///
/// `out` may be shorter than the return value; the caller retries with a
/// buffer of at least that size. `out` may be empty to size the output
/// without writing anything. Returns `0` for empty input; this is the only
/// failure case (raw fallback always succeeds otherwise).
pub fn encode(out: &mut [u8], input: &[u8]) -> u32 {
    if input.is_empty() {
        return 0;
    }
    let encoded = encode_inner(input);
    let produced = encoded.len();
    let copy_len = produced.min(out.len());
    out[..copy_len].copy_from_slice(&encoded[..copy_len]);
    produced as u32
}

fn encode_inner(input: &[u8]) -> Vec<u8> {
    let n = input.len() as u32;
    let freq = tree::count_frequencies(input);
    let distinct = freq.iter().filter(|&&c| c > 0).count();

    if distinct == 1 {
        let symbol = freq.iter().position(|&c| c > 0).unwrap() as u8;
        let mut buf = Vec::with_capacity(length_prefix_size(n) + 2);
        write_length_prefix(&mut buf, n);
        buf.push(1);
        buf.push(symbol);
        return buf;
    }

    // Cheap upfront rejection before paying for tree construction: a
    // uniform-ish distribution can't possibly beat raw.
    let quick_projected = length_prefix_size(n) + 2 + distinct + (n as usize) / 8;
    if quick_projected as u64 >= n as u64 {
        return raw_fallback(input, n);
    }

    let tree = tree::build(&freq).expect("distinct >= 2 always yields a tree");
    let lengths = tree::assign_lengths(&tree);

    let min_len = lengths.iter().copied().filter(|&l| l > 0).min().unwrap();
    if min_len >= 8 {
        return raw_fallback(input, n);
    }
    let max_len = lengths.iter().copied().max().unwrap();
    // X = 0 and X = 1 are reserved for the raw and single-symbol layouts;
    // a two-symbol alphabet yields max_len == 1, which would collide with
    // the single-symbol tag, so it takes the raw layout instead.
    if max_len < 2 {
        return raw_fallback(input, n);
    }
    let codes = tree::canonical_codes(&lengths);

    let total_bits: u64 = (0..ALPHABET)
        .map(|s| freq[s] as u64 * lengths[s] as u64)
        .sum();
    let body_bytes = total_bits.div_ceil(8) as usize;
    let exact_size = length_prefix_size(n) + 1 + table_size(&lengths, max_len) + body_bytes;
    if exact_size as u64 >= n as u64 {
        return raw_fallback(input, n);
    }

    let mut buf = Vec::with_capacity(exact_size);
    write_length_prefix(&mut buf, n);
    buf.push(max_len);
    write_table(&mut buf, &lengths, max_len);

    let mut writer = BitWriter::new();
    for &b in input {
        writer.write_bits(codes[b as usize], lengths[b as usize]);
    }
    buf.extend(writer.finish());
    debug_assert_eq!(buf.len(), exact_size);
    buf
}

fn raw_fallback(input: &[u8], n: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(length_prefix_size(n) + 1 + input.len());
    write_length_prefix(&mut buf, n);
    buf.push(0);
    buf.extend_from_slice(input);
    buf
}
