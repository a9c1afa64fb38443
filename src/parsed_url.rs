use crate::canonicalizer::Profile;
use crate::compat::{String, Vec};
use crate::scheme::get_scheme_type;
use crate::types::{Host, SchemeType};
use core::fmt;

/// A URL split into byte-exact fields.
///
/// Concatenating the fields in declaration order reproduces the input the
/// record was parsed from, down to stray whitespace, backslashes and extra
/// slashes. Canonicalization steps rewrite the fields in place.
///
/// ```
/// use urlcanon::parse_url;
///
/// let url = parse_url(" HTTP://user@Example.com:80/a/../b?q#f ");
/// assert_eq!(url.scheme, b"HTTP");
/// assert_eq!(url.domain(), b"Example.com");
/// assert_eq!(url.port, b"80");
/// assert_eq!(url.to_bytes(), b" HTTP://user@Example.com:80/a/../b?q#f ");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    pub leading_junk: Vec<u8>,
    pub scheme: Vec<u8>,
    pub colon_after_scheme: Vec<u8>,
    pub slashes: Vec<u8>,
    pub username: Vec<u8>,
    pub colon_before_password: Vec<u8>,
    pub password: Vec<u8>,
    pub at_sign: Vec<u8>,
    /// Serialized between `at_sign` and `colon_before_port`
    pub host: Host,
    pub colon_before_port: Vec<u8>,
    pub port: Vec<u8>,
    pub path: Vec<u8>,
    pub question_mark: Vec<u8>,
    pub query: Vec<u8>,
    pub hash_sign: Vec<u8>,
    pub fragment: Vec<u8>,
    pub trailing_junk: Vec<u8>,
}

impl ParsedUrl {
    /// Host bytes if the host is a bracketed IPv6 literal, else empty
    pub fn ip6(&self) -> &[u8] {
        match &self.host {
            Host::Ipv6(bytes) => bytes,
            _ => &[],
        }
    }

    /// Host bytes if the host is a numeric IPv4 host, else empty
    pub fn ip4(&self) -> &[u8] {
        match &self.host {
            Host::Ipv4(bytes) => bytes,
            _ => &[],
        }
    }

    /// Host bytes if the host is a domain name, else empty
    pub fn domain(&self) -> &[u8] {
        match &self.host {
            Host::Domain(bytes) => bytes,
            _ => &[],
        }
    }

    pub fn host_bytes(&self) -> &[u8] {
        self.host.as_bytes()
    }

    /// host + colon_before_port + port
    pub fn host_port(&self) -> Vec<u8> {
        let parts: [&[u8]; 3] = [self.host.as_bytes(), &self.colon_before_port, &self.port];
        parts.concat()
    }

    /// username + colon_before_password + password + at_sign + host +
    /// colon_before_port + port
    pub fn authority(&self) -> Vec<u8> {
        let parts: [&[u8]; 7] = [
            &self.username,
            &self.colon_before_password,
            &self.password,
            &self.at_sign,
            self.host.as_bytes(),
            &self.colon_before_port,
            &self.port,
        ];
        parts.concat()
    }

    pub(crate) fn has_authority(&self) -> bool {
        !(self.username.is_empty()
            && self.colon_before_password.is_empty()
            && self.password.is_empty()
            && self.at_sign.is_empty()
            && self.host.is_empty()
            && self.colon_before_port.is_empty()
            && self.port.is_empty())
    }

    pub fn scheme_type(&self) -> SchemeType {
        get_scheme_type(&self.scheme)
    }

    pub fn is_special(&self) -> bool {
        self.scheme_type().is_special()
    }

    /// The fields in serialization order
    fn fields(&self) -> [&[u8]; 17] {
        [
            &self.leading_junk,
            &self.scheme,
            &self.colon_after_scheme,
            &self.slashes,
            &self.username,
            &self.colon_before_password,
            &self.password,
            &self.at_sign,
            self.host.as_bytes(),
            &self.colon_before_port,
            &self.port,
            &self.path,
            &self.question_mark,
            &self.query,
            &self.hash_sign,
            &self.fragment,
            &self.trailing_junk,
        ]
    }

    /// Mutable access to every field, host included
    pub(crate) fn fields_mut(&mut self) -> [&mut Vec<u8>; 17] {
        [
            &mut self.leading_junk,
            &mut self.scheme,
            &mut self.colon_after_scheme,
            &mut self.slashes,
            &mut self.username,
            &mut self.colon_before_password,
            &mut self.password,
            &mut self.at_sign,
            self.host.bytes_mut(),
            &mut self.colon_before_port,
            &mut self.port,
            &mut self.path,
            &mut self.question_mark,
            &mut self.query,
            &mut self.hash_sign,
            &mut self.fragment,
            &mut self.trailing_junk,
        ]
    }

    /// Serialized length in bytes
    pub fn len(&self) -> usize {
        self.fields().iter().map(|field| field.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append the serialized URL to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.reserve(self.len());
        for field in self.fields() {
            out.extend_from_slice(field);
        }
    }

    /// Concatenate all fields back into a URL.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        self.write_to(&mut out);
        out
    }

    /// Apply a canonicalization profile in place.
    pub fn canonicalize(&mut self, profile: Profile) -> &mut Self {
        profile.apply(self);
        self
    }
}

impl fmt::Display for ParsedUrl {
    /// Lossy UTF-8 rendering of [`ParsedUrl::to_bytes`]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}

impl From<&[u8]> for ParsedUrl {
    fn from(input: &[u8]) -> Self {
        crate::parser::parse_url(input)
    }
}

impl From<&str> for ParsedUrl {
    fn from(input: &str) -> Self {
        crate::parser::parse_url(input)
    }
}
