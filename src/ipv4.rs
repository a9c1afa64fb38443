/// IPv4 host parser supporting decimal, octal, hexadecimal and partial forms
/// Follows the permissive grammar browsers accept (WHATWG IPv4 parser)
use crate::compat::Vec;
use crate::error::{Error, Result};

/// Whether `host` is meant to be an IPv4 address.
///
/// True when its last label, ignoring one trailing dot, is all decimal
/// digits or is a number [`parse_ipv4`] accepts in any radix. Such a host
/// is parsed as IPv4 and is never a domain name.
pub fn ends_in_number(host: &[u8]) -> bool {
    let host = host.strip_suffix(b".").unwrap_or(host);
    match host.rsplit(|&b| b == b'.').next() {
        Some(last) if !last.is_empty() => {
            last.iter().all(u8::is_ascii_digit) || parse_ipv4_number(last).is_ok()
        }
        _ => false,
    }
}

/// Parse an IPv4 host into a u32.
/// Supports:
/// - Decimal: 192.168.1.1
/// - Hex: 0xC0A80101
/// - Octal: 0300.0250.01.01
/// - Mixed and partial: 192.0x00A80001, 0x7f.1
/// - A single 32-bit integer: 2130706433
pub fn parse_ipv4(input: &[u8]) -> Result<u32> {
    if input.is_empty() {
        return Err(Error::InvalidIpv4);
    }

    // A single trailing dot is allowed and ignored
    let input = input.strip_suffix(b".").unwrap_or(input);

    let parts: Vec<&[u8]> = input.split(|&b| b == b'.').collect();
    let part_count = parts.len();

    if part_count > 4 {
        return Err(Error::InvalidIpv4);
    }

    let numbers = parts
        .iter()
        .map(|part| parse_ipv4_number(part))
        .collect::<Result<Vec<_>>>()?;

    // Last number fills the remaining bytes: must be < 256^(5-n)
    let last = numbers[part_count - 1];
    if last >= 256u64.pow((5 - part_count) as u32) {
        return Err(Error::InvalidIpv4);
    }

    // All but the last number are single bytes
    if numbers.iter().take(part_count - 1).any(|&num| num >= 256) {
        return Err(Error::InvalidIpv4);
    }

    let mut ipv4 = last as u32;
    for (i, &number) in numbers.iter().enumerate().take(part_count - 1) {
        ipv4 |= (number as u32) << ((3 - i) * 8);
    }

    Ok(ipv4)
}

/// Parse a single IPv4 number component.
///
/// `0x`/`0X` prefix selects hex (bare `0x` is zero), any other leading zero
/// selects octal, otherwise decimal. Values that overflow u64 are rejected.
fn parse_ipv4_number(input: &[u8]) -> Result<u64> {
    if input.is_empty() {
        return Err(Error::InvalidIpv4);
    }

    let (digits, radix) = if let Some(hex) = input
        .strip_prefix(b"0x")
        .or_else(|| input.strip_prefix(b"0X"))
    {
        (hex, 16)
    } else if input.len() >= 2 && input[0] == b'0' {
        (&input[1..], 8)
    } else {
        (input, 10)
    };

    digits.iter().try_fold(0u64, |acc, &b| {
        let digit = u64::from(char::from(b).to_digit(radix).ok_or(Error::InvalidIpv4)?);
        acc.checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(digit))
            .ok_or(Error::InvalidIpv4)
    })
}

/// Serialize an IPv4 address to dotted decimal notation
pub fn dotted_decimal(ipv4: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(15);
    for (i, octet) in ipv4.to_be_bytes().into_iter().enumerate() {
        if i > 0 {
            out.push(b'.');
        }
        if octet >= 100 {
            out.push(b'0' + octet / 100);
        }
        if octet >= 10 {
            out.push(b'0' + octet / 10 % 10);
        }
        out.push(b'0' + octet % 10);
    }
    out
}
