//! Text decoding and delimiter detection for CSV input.

use std::borrow::Cow;

use encoding_rs::{Encoding, WINDOWS_1252};

/// Delimiters considered by [`sniff_delimiter`], in tie-break order.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Decodes raw file bytes to text.
///
/// A byte-order mark selects UTF-8 or UTF-16 and is stripped. Without one,
/// valid UTF-8 is used as-is and anything else is read as Windows-1252.
pub fn decode_bytes(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text;
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            tracing::debug!("input is not valid UTF-8, decoding as Windows-1252");
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text
        }
    }
}

/// Picks the delimiter used in the first non-blank line.
///
/// Counts each candidate outside double quotes; the most frequent wins, with
/// ties resolved by [`CANDIDATE_DELIMITERS`] order. Falls back to a comma.
pub fn sniff_delimiter(text: &str) -> u8 {
    let Some(line) = text.lines().find(|line| !line.trim().is_empty()) else {
        return b',';
    };
    let mut counts = [0usize; CANDIDATE_DELIMITERS.len()];
    let mut in_quotes = false;
    for byte in line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(idx) = CANDIDATE_DELIMITERS.iter().position(|&d| d == byte) {
            counts[idx] += 1;
        }
    }
    let mut best = 0;
    for idx in 1..counts.len() {
        if counts[idx] > counts[best] {
            best = idx;
        }
    }
    if counts[best] == 0 {
        b','
    } else {
        CANDIDATE_DELIMITERS[best]
    }
}
