//! Host normalization and the reversed-label forms used by SURT keys.

use crate::compat::{Cow, Vec};
use crate::ipv4::{dotted_decimal, ends_in_number, parse_ipv4};
use crate::ipv6::{parse_ipv6, serialize_ipv6};
use crate::types::IpAddress;
use crate::unicode::idna::idna_label;
use crate::unicode::percent_encode::{HOST_LABEL_SET, percent_encode_with_set, unescape_repeatedly};
use tracing::debug;

/// Bytes that end a host inside an authority or URL
fn is_host_terminator(b: u8) -> bool {
    matches!(b, b':' | b'/' | b'\\' | b'?' | b'#')
}

/// Parse a numeric host from the front of `host`.
///
/// Returns the parsed address and the bytes left after it. A bracketed
/// IPv6 literal ends at `]`; an IPv4 host ends at the first `:`, `/`, `\`,
/// `?` or `#`, and may use any form browsers accept (`0x7f.1`,
/// `017700000001`, `2130706433`). When the front is not a numeric host the
/// result is `(None, host)`.
///
/// ```
/// use urlcanon::{IpAddress, parse_ipv4or6};
///
/// assert_eq!(parse_ipv4or6(b"0x7f.1:8080"), (Some(IpAddress::V4(0x7f00_0001)), &b":8080"[..]));
/// assert_eq!(parse_ipv4or6(b"example.com"), (None, &b"example.com"[..]));
/// ```
pub fn parse_ipv4or6(host: &[u8]) -> (Option<IpAddress>, &[u8]) {
    if host.first() == Some(&b'[') {
        let parsed = memchr::memchr(b']', host).and_then(|close| {
            let segments = parse_ipv6(&host[..=close]).ok()?;
            Some((IpAddress::V6(segments), &host[close + 1..]))
        });
        return match parsed {
            Some((ip, rest)) => (Some(ip), rest),
            None => (None, host),
        };
    }

    let end = host
        .iter()
        .position(|&b| is_host_terminator(b))
        .unwrap_or(host.len());
    let candidate = &host[..end];
    if ends_in_number(candidate) {
        if let Ok(ip) = parse_ipv4(candidate) {
            return (Some(IpAddress::V4(ip)), &host[end..]);
        }
    }
    (None, host)
}

/// Normalize a host to the form used in canonical URLs.
///
/// 1. percent-decode repeatedly, leaving malformed escapes in place
/// 2. ASCII-lowercase and drop trailing dots
/// 3. numeric hosts: IPv4 in any accepted form becomes dotted decimal,
///    bracketed IPv6 becomes compressed lowercase hex
/// 4. every other label: non-ASCII labels are IDNA-encoded, ASCII labels
///    (including `xn--` ones) are kept, and labels IDNA rejects are
///    percent-encoded; controls, space and URL delimiters are always escaped
///
/// ```
/// use urlcanon::normalize_host;
///
/// assert_eq!(normalize_host("EXAMPLE.Com"), b"example.com");
/// assert_eq!(normalize_host("☃.net"), b"xn--n3h.net");
/// assert_eq!(normalize_host("%e2%98%83.n%45t"), b"xn--n3h.net");
/// ```
pub fn normalize_host(host: impl AsRef<[u8]>) -> Vec<u8> {
    let mut host = unescape_repeatedly(host.as_ref()).into_owned();
    host.make_ascii_lowercase();
    while host.last() == Some(&b'.') {
        host.pop();
    }

    match parse_ipv4or6(&host) {
        (Some(IpAddress::V4(ip)), rest) if rest.is_empty() => return dotted_decimal(ip),
        (Some(IpAddress::V6(segments)), rest) if rest.is_empty() => {
            return serialize_ipv6(&segments);
        }
        _ => {}
    }

    if host.first() == Some(&b'[') {
        return host;
    }

    let mut normalized = Vec::with_capacity(host.len() + 8);
    for (i, label) in host.split(|&b| b == b'.').enumerate() {
        if i > 0 {
            normalized.push(b'.');
        }
        if label.is_ascii() {
            normalized.extend_from_slice(&percent_encode_with_set(label, HOST_LABEL_SET));
            continue;
        }
        match idna_label(label) {
            Ok(ascii) => normalized.extend_from_slice(&ascii),
            Err(err) => {
                debug!(
                    label = %crate::compat::String::from_utf8_lossy(label),
                    error = %err,
                    "host label not IDNA-encodable, percent-encoding instead"
                );
                normalized.extend_from_slice(&percent_encode_with_set(label, HOST_LABEL_SET));
            }
        }
    }

    // Mapped labels can spell a number (fullwidth digits)
    match parse_ipv4or6(&normalized) {
        (Some(IpAddress::V4(ip)), rest) if rest.is_empty() => dotted_decimal(ip),
        _ => normalized,
    }
}

/// Reverse the dot-separated labels of a host and join them with commas.
///
/// `www.example.com` becomes `com,example,www`.
pub fn reverse_host(host: impl AsRef<[u8]>) -> Vec<u8> {
    let host = host.as_ref();
    let mut reversed = Vec::with_capacity(host.len());
    for (i, label) in host.rsplit(|&b| b == b'.').enumerate() {
        if i > 0 {
            reversed.push(b',');
        }
        reversed.extend_from_slice(label);
    }
    reversed
}

/// Host key used by SSURT: a domain is reversed and terminated with a
/// comma (`com,example,www,`); IP literals and the empty host are kept as-is.
pub fn ssurt_host(host: impl AsRef<[u8]>) -> Vec<u8> {
    let host = host.as_ref();
    if host.is_empty() || is_ip_literal(host) {
        return host.to_vec();
    }
    let mut key = reverse_host(host);
    key.push(b',');
    key
}

/// Whether the whole host is an IPv6 literal or a numeric IPv4 host
pub(crate) fn is_ip_literal(host: &[u8]) -> bool {
    if host.first() == Some(&b'[') {
        return true;
    }
    matches!(parse_ipv4or6(host), (Some(IpAddress::V4(_)), rest) if rest.is_empty())
}

/// Drop leading and trailing dots of a domain and collapse runs of dots.
pub fn fix_host_dots(domain: &[u8]) -> Cow<'_, [u8]> {
    let trimmed = domain
        .iter()
        .position(|&b| b != b'.')
        .map_or(&domain[..0], |start| {
            let end = domain.iter().rposition(|&b| b != b'.').map_or(start, |e| e + 1);
            &domain[start..end]
        });
    if !trimmed.windows(2).any(|pair| pair == b"..") {
        return Cow::Borrowed(trimmed);
    }
    let mut fixed = Vec::with_capacity(trimmed.len());
    for &b in trimmed {
        if b == b'.' && fixed.last() == Some(&b'.') {
            continue;
        }
        fixed.push(b);
    }
    Cow::Owned(fixed)
}

/// `www` optionally followed by digits
fn is_www_label(label: &[u8]) -> bool {
    label
        .strip_prefix(b"www")
        .is_some_and(|digits| digits.iter().all(u8::is_ascii_digit))
}

/// Strip leading `www.`/`wwwN.` labels while at least two labels remain
/// and what remains is not a numeric host.
pub fn strip_www(domain: &[u8]) -> &[u8] {
    let mut rest = domain;
    while let Some(dot) = memchr::memchr(b'.', rest) {
        let remainder = &rest[dot + 1..];
        if !is_www_label(&rest[..dot])
            || memchr::memchr(b'.', remainder).is_none()
            || is_ip_literal(remainder)
        {
            break;
        }
        rest = remainder;
    }
    rest
}
