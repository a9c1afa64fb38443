use crate::compat::Vec;
use crate::host::parse_ipv4or6;
use crate::parsed_url::ParsedUrl;
use crate::types::{Host, IpAddress};

/// Split `authority` into userinfo, host and port fields of `url`.
///
/// Userinfo ends at the last `@`, the username at the first `:` inside it.
/// A `[...]` host is an IPv6 literal when the `]` is followed by the end or a
/// port colon, whether or not its content parses. Otherwise the host ends
/// at the first `:`. Numeric hosts are only recognized for special schemes.
pub(super) fn parse_authority(url: &mut ParsedUrl, authority: &[u8], special: bool) {
    let host_and_port = match memchr::memrchr(b'@', authority) {
        Some(at) => {
            let userinfo = &authority[..at];
            match memchr::memchr(b':', userinfo) {
                Some(colon) => {
                    url.username = userinfo[..colon].to_vec();
                    url.colon_before_password = b":".to_vec();
                    url.password = userinfo[colon + 1..].to_vec();
                }
                None => url.username = userinfo.to_vec(),
            }
            url.at_sign = b"@".to_vec();
            &authority[at + 1..]
        }
        None => authority,
    };

    let (host, port) = split_host_port(host_and_port);
    url.host = classify_host(host, special);
    if let Some(port) = port {
        url.colon_before_port = b":".to_vec();
        url.port = port.to_vec();
    }
}

/// Host bytes and, if a port colon is present, the bytes after it
fn split_host_port(host_and_port: &[u8]) -> (&[u8], Option<&[u8]>) {
    if host_and_port.first() == Some(&b'[') {
        if let Some(close) = memchr::memchr(b']', host_and_port) {
            let rest = &host_and_port[close + 1..];
            match rest.first() {
                None => return (host_and_port, None),
                Some(b':') => return (&host_and_port[..=close], Some(&rest[1..])),
                Some(_) => {}
            }
        }
    }
    match memchr::memchr(b':', host_and_port) {
        Some(colon) => (&host_and_port[..colon], Some(&host_and_port[colon + 1..])),
        None => (host_and_port, None),
    }
}

/// Tag host bytes as IPv6 literal, numeric IPv4 host or domain
pub(crate) fn classify_host(host: &[u8], special: bool) -> Host {
    let bytes = Vec::from(host);
    if is_bracketed(host) {
        return Host::Ipv6(bytes);
    }
    if special && matches!(parse_ipv4or6(host), (Some(IpAddress::V4(_)), rest) if rest.is_empty()) {
        return Host::Ipv4(bytes);
    }
    Host::Domain(bytes)
}

fn is_bracketed(host: &[u8]) -> bool {
    host.len() >= 2 && host[0] == b'[' && host[host.len() - 1] == b']'
}
