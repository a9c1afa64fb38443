//! Canonicalization steps.
//!
//! Each step rewrites some fields of a [`ParsedUrl`] in place, never fails,
//! and is idempotent on its own. Profiles chain them in a fixed order.

use crate::character_sets::is_path_separator;
use crate::compat::{Cow, Vec};
use crate::helpers::{self, decode_pct_2e, make_ascii_lowercase};
use crate::host;
use crate::ipv6::{parse_ipv6, serialize_ipv6};
use crate::parsed_url::ParsedUrl;
use crate::parser::classify_host;
use crate::scheme::parse_port;
use crate::path::{self, resolve_path_dots};
use crate::query;
use crate::types::Host;
use crate::unicode::percent_encode::{
    GOOGLE_SET, PATH_SET, percent_encode_field, recode_unreserved, unescape_repeatedly as unescape,
};

/// Replace `field` with the result of `rewrite` when it reports a change
fn rewrite_field(field: &mut Vec<u8>, rewrite: impl FnOnce(&[u8]) -> Option<Vec<u8>>) {
    if let Some(rewritten) = rewrite(&field[..]) {
        *field = rewritten;
    }
}

fn unescape_field(field: &mut Vec<u8>) {
    if let Cow::Owned(decoded) = unescape(field) {
        *field = decoded;
    }
}

pub fn remove_leading_trailing_junk(url: &mut ParsedUrl) {
    url.leading_junk.clear();
    url.trailing_junk.clear();
}

/// Strip tab, LF and CR from every field.
pub fn remove_tabs_and_newlines(url: &mut ParsedUrl) {
    for field in url.fields_mut() {
        helpers::remove_tabs_and_newlines(field);
    }
}

pub fn lowercase_scheme(url: &mut ParsedUrl) {
    make_ascii_lowercase(&mut url.scheme);
}

/// Every slashes byte becomes `/`; in the path `\` becomes `/` when the
/// path starts with a separator.
pub fn fix_backslashes(url: &mut ParsedUrl) {
    url.slashes.fill(b'/');
    if url.path.first().is_some_and(|&b| is_path_separator(b)) {
        for b in &mut url.path {
            if *b == b'\\' {
                *b = b'/';
            }
        }
    }
}

pub fn normalize_path_dots(url: &mut ParsedUrl) {
    let special = url.is_special();
    if let Cow::Owned(resolved) = resolve_path_dots(&url.path, special) {
        url.path = resolved;
    }
}

/// `%2e` and `%2E` in the path become `.`
pub fn decode_path_2e(url: &mut ParsedUrl) {
    rewrite_field(&mut url.path, decode_pct_2e);
}

pub fn pct_encode_path(url: &mut ParsedUrl) {
    percent_encode_field(&mut url.path, PATH_SET);
}

/// A URL with an authority gets `/` as its path when the path is empty.
pub fn empty_path_to_slash(url: &mut ParsedUrl) {
    if url.path.is_empty() && url.has_authority() {
        url.path.push(b'/');
    }
}

pub fn remove_fragment(url: &mut ParsedUrl) {
    url.hash_sign.clear();
    url.fragment.clear();
}

/// Special schemes get exactly `//` after the scheme, unless there were no
/// slashes at all.
pub fn two_slashes(url: &mut ParsedUrl) {
    if url.is_special() && !url.slashes.is_empty() && url.slashes != b"//" {
        url.slashes = b"//".to_vec();
    }
}

/// Drop a port equal to the scheme's default (`:80`, `:0443`, ...) and the
/// colon of an empty port.
pub fn elide_default_port(url: &mut ParsedUrl) {
    let scheme_type = url.scheme_type();
    if !scheme_type.is_special() || url.colon_before_port.is_empty() {
        return;
    }
    let is_default = url.port.is_empty()
        || parse_port(&url.port).is_some_and(|port| scheme_type.default_port() == Some(port));
    if is_default {
        url.colon_before_port.clear();
        url.port.clear();
    }
}

/// Drop userinfo punctuation that carries no credentials.
pub fn clean_up_userinfo(url: &mut ParsedUrl) {
    if url.password.is_empty() {
        url.colon_before_password.clear();
        if url.username.is_empty() {
            url.at_sign.clear();
        }
    }
}

/// Normalize the host and retag it from its normalized form.
pub fn normalize_host(url: &mut ParsedUrl) {
    let normalized = match &url.host {
        Host::Ipv6(literal) => match parse_ipv6(literal) {
            Ok(segments) => serialize_ipv6(&segments),
            Err(_) => literal.to_ascii_lowercase(),
        },
        Host::Ipv4(bytes) | Host::Domain(bytes) => host::normalize_host(bytes),
    };
    url.host = classify_host(&normalized, url.is_special());
}

pub fn fix_host_dots(url: &mut ParsedUrl) {
    if let Host::Domain(domain) = &mut url.host {
        let fixed = host::fix_host_dots(domain);
        if fixed.len() != domain.len() {
            *domain = fixed.into_owned();
        }
    }
}

/// Percent-decode host, path and query until nothing decodable is left.
pub fn unescape_repeatedly(url: &mut ParsedUrl) {
    unescape_field(url.host.bytes_mut());
    unescape_field(&mut url.path);
    unescape_field(&mut url.query);
}

pub fn collapse_consecutive_slashes(url: &mut ParsedUrl) {
    rewrite_field(&mut url.path, path::collapse_consecutive_slashes);
}

/// Escape bytes <= 0x20, >= 0x7f, `#` and `%` in path and query.
pub fn google_pct_encode(url: &mut ParsedUrl) {
    percent_encode_field(&mut url.path, GOOGLE_SET);
    percent_encode_field(&mut url.query, GOOGLE_SET);
}

/// Decode escaped unreserved bytes and uppercase the remaining escapes in
/// path, query and fragment.
pub fn less_dumb_pct_recode(url: &mut ParsedUrl) {
    rewrite_field(&mut url.path, recode_unreserved);
    rewrite_field(&mut url.query, recode_unreserved);
    rewrite_field(&mut url.fragment, recode_unreserved);
}

pub fn remove_userinfo(url: &mut ParsedUrl) {
    url.username.clear();
    url.colon_before_password.clear();
    url.password.clear();
    url.at_sign.clear();
}

pub fn https_to_http(url: &mut ParsedUrl) {
    if url.scheme == b"https" {
        url.scheme.truncate(4);
    }
}

pub fn strip_www(url: &mut ParsedUrl) {
    if let Host::Domain(domain) = &mut url.host {
        let stripped = host::strip_www(domain).len();
        let prefix = domain.len() - stripped;
        if prefix > 0 {
            domain.drain(..prefix);
        }
    }
}

pub fn lowercase_path(url: &mut ParsedUrl) {
    make_ascii_lowercase(&mut url.path);
}

pub fn lowercase_query(url: &mut ParsedUrl) {
    make_ascii_lowercase(&mut url.query);
}

pub fn strip_session_ids_from_query(url: &mut ParsedUrl) {
    rewrite_field(&mut url.query, query::strip_session_ids);
}

pub fn strip_session_ids_from_path(url: &mut ParsedUrl) {
    rewrite_field(&mut url.path, path::strip_session_ids);
}

pub fn remove_redundant_ampersands_from_query(url: &mut ParsedUrl) {
    rewrite_field(&mut url.query, query::remove_redundant_ampersands);
}

pub fn omit_question_mark_if_query_empty(url: &mut ParsedUrl) {
    if url.query.is_empty() {
        url.question_mark.clear();
    }
}

pub fn alpha_reorder_query(url: &mut ParsedUrl) {
    rewrite_field(&mut url.query, query::alpha_reorder);
}

/// Drop trailing slashes, keeping a lone `/`.
pub fn strip_trailing_slash_unless_empty(url: &mut ParsedUrl) {
    while url.path.len() > 1 && url.path.last() == Some(&b'/') {
        url.path.pop();
    }
}
