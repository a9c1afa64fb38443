//! Bracketed IPv6 hosts: parsing into eight 16-bit pieces and the
//! compressed lowercase serialization used by canonical URLs.

use crate::compat::Vec;
use crate::error::{Error, Result};

/// Hex value of an ASCII byte
fn hex_value(b: u8) -> Option<u16> {
    char::from(b).to_digit(16).map(|d| d as u16)
}

/// Parse an IPv6 address, with or without brackets (`[::1]` or `::1`).
///
/// Follows the WHATWG IPv6 parser: at most one `::`, pieces of one to four
/// hex digits, and an optional trailing dotted quad in the last two pieces.
/// Zone identifiers are rejected.
pub fn parse_ipv6(input: &[u8]) -> Result<[u16; 8]> {
    let input = input
        .strip_prefix(b"[")
        .and_then(|s| s.strip_suffix(b"]"))
        .unwrap_or(input);

    let mut pieces = [0u16; 8];
    let mut piece_index = 0;
    let mut compress = None;
    let mut pos = 0;

    if input.first() == Some(&b':') {
        if input.get(1) != Some(&b':') {
            return Err(Error::InvalidIpv6);
        }
        pos = 2;
        piece_index = 1;
        compress = Some(1);
    }

    while pos < input.len() {
        if piece_index == 8 {
            return Err(Error::InvalidIpv6);
        }
        if input[pos] == b':' {
            if compress.is_some() {
                return Err(Error::InvalidIpv6);
            }
            pos += 1;
            piece_index += 1;
            compress = Some(piece_index);
            continue;
        }

        let start = pos;
        let mut value = 0u16;
        while pos - start < 4 {
            let Some(digit) = input.get(pos).copied().and_then(hex_value) else {
                break;
            };
            value = value * 16 + digit;
            pos += 1;
        }

        match input.get(pos) {
            Some(b'.') => {
                if pos == start || piece_index > 6 {
                    return Err(Error::InvalidIpv6);
                }
                let [a, b, c, d] = parse_embedded_ipv4(&input[start..])?;
                pieces[piece_index] = u16::from_be_bytes([a, b]);
                pieces[piece_index + 1] = u16::from_be_bytes([c, d]);
                piece_index += 2;
                break;
            }
            Some(b':') => {
                pos += 1;
                if pos == input.len() {
                    return Err(Error::InvalidIpv6);
                }
            }
            Some(_) => return Err(Error::InvalidIpv6),
            None => {}
        }
        pieces[piece_index] = value;
        piece_index += 1;
    }

    match compress {
        Some(compress) => {
            // Move the pieces after `::` to the end
            let tail = piece_index - compress;
            pieces.copy_within(compress..piece_index, 8 - tail);
            pieces[compress..8 - tail].fill(0);
        }
        None if piece_index != 8 => return Err(Error::InvalidIpv6),
        None => {}
    }
    Ok(pieces)
}

/// Strict dotted quad: four decimal parts, no leading zeros, each <= 255
fn parse_embedded_ipv4(input: &[u8]) -> Result<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut parts = input.split(|&b| b == b'.');
    for octet in &mut octets {
        let part = parts.next().ok_or(Error::InvalidIpv6)?;
        let valid = !part.is_empty()
            && part.len() <= 3
            && part.iter().all(u8::is_ascii_digit)
            && (part.len() == 1 || part[0] != b'0');
        if !valid {
            return Err(Error::InvalidIpv6);
        }
        let value = part
            .iter()
            .fold(0u16, |acc, &b| acc * 10 + u16::from(b - b'0'));
        *octet = u8::try_from(value).map_err(|_| Error::InvalidIpv6)?;
    }
    if parts.next().is_some() {
        return Err(Error::InvalidIpv6);
    }
    Ok(octets)
}

/// First longest run of two or more zero pieces, as (start, len)
fn longest_zero_run(pieces: &[u16; 8]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut run_start = 0;
    for i in 0..=8 {
        if i < 8 && pieces[i] == 0 {
            continue;
        }
        let len = i - run_start;
        if len >= 2 && best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((run_start, len));
        }
        run_start = i + 1;
    }
    best
}

fn push_hex(out: &mut Vec<u8>, piece: u16) {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut started = false;
    for shift in [12, 8, 4, 0] {
        let nibble = usize::from((piece >> shift) & 0xf);
        if nibble != 0 || started || shift == 0 {
            out.push(DIGITS[nibble]);
            started = true;
        }
    }
}

/// Serialize IPv6 pieces in brackets, lowercase, with the first longest
/// run of two or more zero pieces written as `::`.
pub fn serialize_ipv6(pieces: &[u16; 8]) -> Vec<u8> {
    let zero_run = longest_zero_run(pieces);
    let mut out = Vec::with_capacity(41);
    out.push(b'[');

    let mut i = 0;
    while i < 8 {
        if let Some((start, len)) = zero_run.filter(|&(start, _)| start == i) {
            out.extend_from_slice(if start == 0 { b"::" } else { b":" });
            i += len;
            continue;
        }
        push_hex(&mut out, pieces[i]);
        if i < 7 {
            out.push(b':');
        }
        i += 1;
    }

    out.push(b']');
    out
}
