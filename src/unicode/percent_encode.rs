use crate::character_sets::is_unreserved;
use crate::compat::{Cow, Vec};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode, percent_encode};

// Encode sets. Bytes >= 0x80 are always encoded by `percent_encode`.

/// WHATWG default encode set: C0 controls, space, DEL, non-ASCII and
/// ", #, <, >, ?, \`, {, }
pub const PATH_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Safe Browsing set: every byte <= 0x20 or >= 0x7f, plus # and %
pub const GOOGLE_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'#').add(b'%');

/// Host labels that cannot be IDNA-encoded: controls, space and the
/// forbidden host code points. `%` stays literal so encoding never feeds
/// into another round of decoding.
pub const HOST_LABEL_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'#')
    .add(b'/')
    .add(b':')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'|');

/// Percent-encode bytes with the given set; borrows when nothing changes.
pub fn percent_encode_with_set<'a>(input: &'a [u8], encode_set: &'static AsciiSet) -> Cow<'a, [u8]> {
    // A single escaped byte comes back borrowed as a static `%XX`
    match Cow::from(percent_encode(input, encode_set)) {
        Cow::Borrowed(s) if s.len() == input.len() => Cow::Borrowed(input),
        Cow::Borrowed(s) => Cow::Owned(s.as_bytes().to_vec()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

/// Percent-encode a field in place using the given set
pub fn percent_encode_field(field: &mut Vec<u8>, encode_set: &'static AsciiSet) {
    if let Cow::Owned(encoded) = percent_encode_with_set(field, encode_set) {
        *field = encoded;
    }
}

/// Decode one round of percent escapes.
/// Malformed escapes (`%`, `%4`, `%zz`) are left as-is.
pub fn percent_decode_once(input: &[u8]) -> Cow<'_, [u8]> {
    percent_decode(input).into()
}

/// Decode percent escapes until none is left that can be decoded.
///
/// `%25%34%31` decodes to `%41` and then to `A`.
pub fn unescape_repeatedly(input: &[u8]) -> Cow<'_, [u8]> {
    let mut current = match percent_decode_once(input) {
        Cow::Borrowed(_) => return Cow::Borrowed(input),
        Cow::Owned(decoded) => decoded,
    };
    while let Cow::Owned(decoded) = percent_decode_once(&current) {
        current = decoded;
    }
    Cow::Owned(current)
}

/// Decode escapes of unreserved bytes and uppercase the hex digits of every
/// other well-formed escape. A `%` that starts no escape becomes `%25`, so
/// the output never contains an escape the input did not have.
pub fn recode_unreserved(input: &[u8]) -> Option<Vec<u8>> {
    let first = memchr::memchr(b'%', input)?;
    let mut out = Vec::with_capacity(input.len());
    out.extend_from_slice(&input[..first]);

    let mut pos = first;
    while pos < input.len() {
        let b = input[pos];
        if let Some(decoded) = hex_escape(&input[pos..]) {
            if is_unreserved(decoded) {
                out.push(decoded);
            } else {
                out.push(b'%');
                out.push(input[pos + 1].to_ascii_uppercase());
                out.push(input[pos + 2].to_ascii_uppercase());
            }
            pos += 3;
        } else if b == b'%' {
            out.extend_from_slice(b"%25");
            pos += 1;
        } else {
            out.push(b);
            pos += 1;
        }
    }

    (out != input).then_some(out)
}

/// Value of a `%XX` escape at the front of `bytes`, if well-formed
fn hex_escape(bytes: &[u8]) -> Option<u8> {
    match bytes {
        [b'%', hi, lo, ..] => {
            let hi = char::from(*hi).to_digit(16)?;
            let lo = char::from(*lo).to_digit(16)?;
            Some((hi * 16 + lo) as u8)
        }
        _ => None,
    }
}
