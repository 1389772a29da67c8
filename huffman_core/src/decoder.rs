//! Decode driver: parses the self-describing header and streams out the
//! original symbols for whichever of the three layouts was chosen.

use crate::bitio::BitReader;
use crate::header::{self, TableEntry};

/// Decompresses `input` into `out`, returning the number of bytes the
/// decoded stream occupies.
///
/// Returns `0` if the header (length prefix, mode byte, or full-Huffman
/// table) is truncated or malformed. A truncated body instead returns the
/// count of symbols successfully decoded before the input ran out.
pub fn decode(out: &mut [u8], input: &[u8]) -> u32 {
    let decoded = decode_inner(input);
    let produced = decoded.len();
    let copy_len = produced.min(out.len());
    out[..copy_len].copy_from_slice(&decoded[..copy_len]);
    produced as u32
}

fn decode_inner(input: &[u8]) -> Vec<u8> {
    let Ok((n, pos)) = header::read_length_prefix(input) else {
        return Vec::new();
    };
    let Some(&mode) = input.get(pos) else {
        return Vec::new();
    };
    let pos = pos + 1;
    match mode {
        0 => decode_raw(input, pos, n),
        1 => decode_single(input, pos, n),
        max_len => decode_huffman(input, pos, n, max_len),
    }
}

fn decode_raw(input: &[u8], pos: usize, n: u32) -> Vec<u8> {
    let want = n as usize;
    let available = input.len().saturating_sub(pos).min(want);
    input[pos..pos + available].to_vec()
}

fn decode_single(input: &[u8], pos: usize, n: u32) -> Vec<u8> {
    match input.get(pos) {
        Some(&symbol) => vec![symbol; n as usize],
        None => Vec::new(),
    }
}

fn decode_huffman(input: &[u8], pos: usize, n: u32, max_len: u8) -> Vec<u8> {
    let Ok((parsed, table_len)) = header::read_table(&input[pos..], max_len) else {
        return Vec::new();
    };
    if parsed.entries.is_empty() {
        return Vec::new();
    }
    decode_body_huffman(&input[pos + table_len..], &parsed.symbols, &parsed.entries, n)
}

/// Window width in bits, matching [`crate::bitio`]'s `BitReader`.
const WINDOW_BITS: u32 = 32;

/// Finds which length bucket the next code belongs to.
///
/// Entries are sorted ascending by `bits`. Because canonical codes
/// right-padded to `WINDOW_BITS` are strictly increasing across length
/// buckets, `entries[i + 1].first_code` left-shifted up to the window
/// width is exactly the boundary between bucket `i` and bucket `i + 1`;
/// the last bucket has no upper boundary.
fn locate_entry(window: u32, entries: &[TableEntry]) -> Option<usize> {
    for i in 0..entries.len() {
        if i + 1 == entries.len() {
            return Some(i);
        }
        let next = &entries[i + 1];
        let boundary = next.first_code << (WINDOW_BITS - next.bits as u32);
        if window < boundary {
            return Some(i);
        }
    }
    None
}

fn decode_body_huffman(
    input: &[u8],
    symbols: &[u8],
    entries: &[TableEntry],
    n: u32,
) -> Vec<u8> {
    let mut reader = BitReader::new(input);
    let mut out = Vec::with_capacity(n as usize);

    for _ in 0..n {
        reader.refill();
        let Some(entry_idx) = locate_entry(reader.peek(WINDOW_BITS), entries) else {
            break;
        };
        let entry = &entries[entry_idx];
        let bits = entry.bits as u32;
        if reader.valid_bits() < bits {
            break;
        }
        let code = reader.peek(bits);
        let idx = code.wrapping_sub(entry.offset) as usize;
        let Some(&symbol) = symbols.get(idx) else {
            break;
        };
        out.push(symbol);
        reader.consume(bits);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;

    fn decode_to_vec(input: &[u8]) -> Vec<u8> {
        let len = decode(&mut [], input) as usize;
        let mut buf = vec![0u8; len];
        let produced = decode(&mut buf, input) as usize;
        assert_eq!(produced, len);
        buf
    }

    fn round_trip(input: &[u8]) {
        let dry = encode(&mut [], input);
        let mut encoded = vec![0u8; dry as usize];
        let produced = encode(&mut encoded, input);
        assert_eq!(produced, dry);
        assert_eq!(decode_to_vec(&encoded), input);
    }

    #[test]
    fn empty_stream_is_an_error() {
        assert_eq!(decode(&mut [], &[]), 0);
    }

    #[test]
    fn truncated_header_returns_zero() {
        // k = 2 claims two length bytes, only one present.
        assert_eq!(decode(&mut [], &[0x02, 0x00]), 0);
    }

    #[test]
    fn truncated_huffman_table_returns_zero() {
        // max_len = 2, first count byte claims 3 symbols but none follow.
        assert_eq!(decode(&mut [], &[0x01, 0x05, 0x02, 0x03]), 0);
    }

    #[test]
    fn truncated_body_returns_partial_count() {
        let input = b"abracadabra";
        let dry = encode(&mut [], input);
        let mut encoded = vec![0u8; dry as usize];
        encode(&mut encoded, input);
        encoded.truncate(encoded.len() - 1);

        let produced = decode(&mut [], &encoded);
        assert!(produced < input.len() as u32);
    }

    #[test]
    fn round_trips_single_byte() {
        round_trip(b"A");
    }

    #[test]
    fn round_trips_repeated_byte() {
        round_trip(b"AAAAAAAA");
    }

    #[test]
    fn round_trips_all_256_distinct_bytes() {
        let input: Vec<u8> = (0..=255u8).collect();
        round_trip(&input);
    }

    #[test]
    fn round_trips_two_distinct_symbols() {
        // Regression: two symbols both get a length-1 code, and max_len ==
        // 1 must not be emitted as a mode byte (it collides with the
        // single-symbol-RLE tag), so this exercises the raw fallback.
        let input: Vec<u8> = (0..2000u32).map(|i| (i % 2) as u8).collect();
        round_trip(&input);
    }

    #[test]
    fn round_trips_uniform_small_alphabet() {
        let input: Vec<u8> = (0..1000u32).map(|i| (i % 4) as u8).collect();
        round_trip(&input);
    }

    #[test]
    fn round_trips_abracadabra() {
        round_trip(b"abracadabra");
    }

    #[test]
    fn dry_run_sizing_matches_actual_decode_size() {
        let input = b"abracadabra";
        let dry = encode(&mut [], input);
        let mut encoded = vec![0u8; dry as usize];
        encode(&mut encoded, input);

        let dry_decode = decode(&mut [], &encoded);
        assert_eq!(dry_decode, input.len() as u32);
    }
}
