use crate::compat::String;
use thiserror::Error;

/// Errors raised by the few fallible operations of the crate.
///
/// Parsing and canonicalization never fail; these surface only from the
/// building blocks (label encoding, numeric host parsing, profile lookup).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// IDNA processing rejected a host label
    #[error("cannot IDNA-encode host label {label:?}")]
    Encoding {
        /// The offending label, lossily decoded.
        label: String,
    },

    /// The ASCII form of a label exceeds the DNS limit of 63 bytes
    #[error("label too long: {length} bytes exceeds maximum of 63")]
    LabelTooLong {
        /// Length of the encoded label.
        length: usize,
    },

    /// Host label bytes are not valid UTF-8 after percent-decoding
    #[error("host label is not valid UTF-8")]
    InvalidUtf8Label,

    /// Host is not a numeric IPv4 address
    #[error("invalid IPv4 address")]
    InvalidIpv4,

    /// Host is not a valid bracketed IPv6 address
    #[error("invalid IPv6 address")]
    InvalidIpv6,

    /// No canonicalization profile has this name
    #[error("unknown canonicalization profile: {0}")]
    UnknownProfile(String),
}

/// Result type for fallible urlcanon operations
pub type Result<T> = core::result::Result<T, Error>;
