use crate::compat::{String, ToString, Vec};
use crate::error::{Error, Result};
use crate::unicode::percent_encode::{HOST_LABEL_SET, percent_encode_with_set};

/// Longest label DNS allows
const MAX_LABEL_LEN: usize = 63;

/// Encode one non-ASCII host label to its ASCII-compatible (punycode) form.
///
/// The label is run through UTS #46 `ToASCII`. A label whose mapping would
/// introduce a label separator (e.g. fullwidth full stop) is rejected. So is
/// one whose encoded form keeps a control, space, `%` or host delimiter
/// (`xn--@x-esx`), or does not fit in a DNS label.
///
/// # Errors
///
/// [`Error::InvalidUtf8Label`] if the bytes are not UTF-8,
/// [`Error::Encoding`] if IDNA processing rejects the label, and
/// [`Error::LabelTooLong`] if the result exceeds 63 bytes.
pub fn idna_label(label: &[u8]) -> Result<Vec<u8>> {
    let text = core::str::from_utf8(label).map_err(|_| Error::InvalidUtf8Label)?;
    let encoding_error = || Error::Encoding {
        label: text.to_string(),
    };

    let ascii: String = idna::domain_to_ascii(text).map_err(|_| encoding_error())?;
    if ascii.is_empty() || ascii.contains('.') {
        return Err(encoding_error());
    }
    // Mapping can carry through bytes that delimit or escape a host
    if ascii.contains('%')
        || percent_encode_with_set(ascii.as_bytes(), HOST_LABEL_SET).as_ref() != ascii.as_bytes()
    {
        return Err(encoding_error());
    }
    if ascii.len() > MAX_LABEL_LEN {
        return Err(Error::LabelTooLong {
            length: ascii.len(),
        });
    }

    Ok(ascii.into_bytes())
}
