use crate::compat::Vec;

/// URL scheme types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeType {
    Http,
    Https,
    Ws,
    Wss,
    Ftp,
    File,
    #[default]
    NotSpecial,
}

impl SchemeType {
    /// Check if this is a special scheme
    pub fn is_special(self) -> bool {
        self != Self::NotSpecial
    }

    /// Get the default port for this scheme
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Http | Self::Ws => Some(80),
            Self::Https | Self::Wss => Some(443),
            Self::Ftp => Some(21),
            Self::File | Self::NotSpecial => None,
        }
    }
}

/// The host of a parsed URL, tagged by how the parser recognized it.
///
/// Each variant holds the raw host bytes exactly as they appear in the
/// serialized URL, brackets included for IPv6. A URL without an authority
/// has an empty `Domain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    /// Bracketed IPv6 literal, e.g. `[::1]`
    Ipv6(Vec<u8>),
    /// Numeric IPv4 host in any form the WHATWG grammar accepts, e.g. `0x7f.1`
    Ipv4(Vec<u8>),
    /// Anything else, including the empty host
    Domain(Vec<u8>),
}

impl Default for Host {
    fn default() -> Self {
        Self::Domain(Vec::new())
    }
}

impl Host {
    /// Raw bytes of whichever variant is present
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Ipv6(b) | Self::Ipv4(b) | Self::Domain(b) => b,
        }
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut Vec<u8> {
        match self {
            Self::Ipv6(b) | Self::Ipv4(b) | Self::Domain(b) => b,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }
}

/// A numeric host value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpAddress {
    V4(u32),
    V6([u16; 8]),
}
