use crate::character_sets::{is_ascii_tab_or_newline, is_c0_control_or_space};
use crate::compat::Vec;

/// Fast check if bytes contain tabs or newlines
pub fn has_tabs_or_newline(input: &[u8]) -> bool {
    memchr::memchr3(b'\t', b'\n', b'\r', input).is_some()
}

/// Remove every tab, line feed and carriage return in place.
/// Leaves the buffer untouched (no scan beyond memchr) when there are none.
pub fn remove_tabs_and_newlines(field: &mut Vec<u8>) {
    if has_tabs_or_newline(field) {
        field.retain(|&b| !is_ascii_tab_or_newline(b));
    }
}

/// Split input into (leading junk, body, trailing junk), where junk is any
/// run of C0 controls and spaces at either end.
pub fn split_junk(input: &[u8]) -> (&[u8], &[u8], &[u8]) {
    let start = input
        .iter()
        .position(|&b| !is_c0_control_or_space(b))
        .unwrap_or(input.len());
    let end = input
        .iter()
        .rposition(|&b| !is_c0_control_or_space(b))
        .map_or(start, |pos| pos + 1);
    (&input[..start], &input[start..end], &input[end..])
}

/// Check if 3 bytes at the front spell `%2e`, case-insensitively
pub fn starts_with_pct_2e(bytes: &[u8]) -> bool {
    bytes.len() >= 3 && bytes[0] == b'%' && bytes[1] == b'2' && matches!(bytes[2], b'e' | b'E')
}

/// Replace every `%2e`/`%2E` with a literal `.`.
/// Returns None when there is nothing to replace.
pub fn decode_pct_2e(input: &[u8]) -> Option<Vec<u8>> {
    let first = memchr::memchr_iter(b'%', input).find(|&pos| starts_with_pct_2e(&input[pos..]))?;

    let mut out = Vec::with_capacity(input.len());
    out.extend_from_slice(&input[..first]);
    let mut pos = first;
    while pos < input.len() {
        if starts_with_pct_2e(&input[pos..]) {
            out.push(b'.');
            pos += 3;
        } else {
            out.push(input[pos]);
            pos += 1;
        }
    }
    Some(out)
}

/// ASCII-lowercase in place, reporting whether anything changed
pub fn make_ascii_lowercase(field: &mut [u8]) -> bool {
    let changed = field.iter().any(u8::is_ascii_uppercase);
    if changed {
        field.make_ascii_lowercase();
    }
    changed
}
