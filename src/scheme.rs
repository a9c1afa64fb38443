use crate::character_sets::is_ascii_tab_or_newline;
use crate::types::SchemeType;

/// Longest special scheme ("https")
const MAX_SPECIAL_LEN: usize = 5;

/// Get the scheme type from raw scheme bytes.
///
/// Matching ignores ASCII case and embedded tabs/newlines, since both are
/// dropped by canonicalization before the scheme is ever compared.
pub fn get_scheme_type(scheme: &[u8]) -> SchemeType {
    let mut buf = [0u8; MAX_SPECIAL_LEN];
    let mut len = 0;
    for &b in scheme {
        if is_ascii_tab_or_newline(b) {
            continue;
        }
        if len == MAX_SPECIAL_LEN {
            return SchemeType::NotSpecial;
        }
        buf[len] = b.to_ascii_lowercase();
        len += 1;
    }
    let bytes = &buf[..len];

    // Perfect hash: filter by length first, then first byte, then full comparison
    match (bytes.len(), bytes.first()) {
        (2, Some(b'w')) if bytes == b"ws" => SchemeType::Ws,
        (3, Some(b'w')) if bytes == b"wss" => SchemeType::Wss,
        (3, Some(b'f')) if bytes == b"ftp" => SchemeType::Ftp,
        (4, Some(b'h')) if bytes == b"http" => SchemeType::Http,
        (4, Some(b'f')) if bytes == b"file" => SchemeType::File,
        (5, Some(b'h')) if bytes == b"https" => SchemeType::Https,
        _ => SchemeType::NotSpecial,
    }
}

/// Parse port bytes to u16.
///
/// None when empty, when anything but ASCII digits appears, or when the
/// value overflows. Leading zeros are accepted (`0080` is port 80).
pub fn parse_port(port: &[u8]) -> Option<u16> {
    if port.is_empty() {
        return None;
    }
    port.iter().try_fold(0u16, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u16::from(b - b'0'))
    })
}
