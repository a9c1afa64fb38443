use crate::compat::Vec;

/// Raw `&`-separated query parameters, borrowed from the query bytes.
///
/// Parameters are kept byte-exact (no decoding) so that rewriting a query
/// only ever drops or reorders what was already there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams<'a> {
    params: Vec<&'a [u8]>,
}

impl<'a> QueryParams<'a> {
    /// Split a query (without the leading `?`) on `&`, keeping empty params.
    pub fn parse(query: &'a [u8]) -> Self {
        if query.is_empty() {
            return Self::default();
        }
        Self {
            params: query.split(|&b| b == b'&').collect(),
        }
    }

    /// Drop empty parameters produced by runs of `&`.
    pub fn remove_empty(&mut self) {
        self.params.retain(|param| !param.is_empty());
    }

    /// Sort parameters bytewise, keeping the order of equal ones.
    pub fn sort(&mut self) {
        self.params.sort();
    }

    pub fn retain(&mut self, keep: impl FnMut(&&'a [u8]) -> bool) {
        self.params.retain(keep);
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.params.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Join the parameters back together with `&`.
    pub fn serialize(&self) -> Vec<u8> {
        self.params.join(&b'&')
    }
}

/// Key and value of a parameter; the value is empty when there is no `=`.
fn split_param(param: &[u8]) -> (&[u8], &[u8]) {
    match memchr::memchr(b'=', param) {
        Some(eq) => (&param[..eq], &param[eq + 1..]),
        None => (param, &param[param.len()..]),
    }
}

/// Rewrite `query` with `rewrite`, returning the new bytes only if they differ.
fn rewrite_params<'q>(query: &'q [u8], rewrite: impl FnOnce(&mut QueryParams<'q>)) -> Option<Vec<u8>> {
    let mut params = QueryParams::parse(query);
    rewrite(&mut params);
    let rewritten = params.serialize();
    (rewritten != query).then_some(rewritten)
}

/// Collapse runs of `&` and trim them from both ends.
pub fn remove_redundant_ampersands(query: &[u8]) -> Option<Vec<u8>> {
    if memchr::memchr(b'&', query).is_none() {
        return None;
    }
    rewrite_params(query, |params| params.remove_empty())
}

/// Sort the `&`-separated parameters of a query bytewise.
pub fn alpha_reorder(query: &[u8]) -> Option<Vec<u8>> {
    if memchr::memchr(b'&', query).is_none() {
        return None;
    }
    rewrite_params(query, |params| params.sort())
}

fn is_alnum_run(value: &[u8], len: usize) -> bool {
    value.len() == len && value.iter().all(u8::is_ascii_alphanumeric)
}

fn is_alpha_run(value: &[u8], len: usize) -> bool {
    value.len() == len && value.iter().all(u8::is_ascii_alphabetic)
}

/// Session parameters that can be recognized from the parameter alone
fn is_session_param(param: &[u8]) -> bool {
    let (key, value) = split_param(param);
    if key.eq_ignore_ascii_case(b"jsessionid")
        || key.eq_ignore_ascii_case(b"phpsessid")
        || key.eq_ignore_ascii_case(b"sid")
    {
        return is_alnum_run(value, 32);
    }
    if key.len() == 20 && key[..12].eq_ignore_ascii_case(b"aspsessionid") {
        return is_alpha_run(&key[12..], 8) && is_alpha_run(value, 24);
    }
    false
}

fn is_cold_fusion_param(param: &[u8]) -> bool {
    let (key, _) = split_param(param);
    key.eq_ignore_ascii_case(b"cfid") || key.eq_ignore_ascii_case(b"cftoken")
}

/// Remove session-id parameters from a query.
///
/// Recognized: `jsessionid`, `phpsessid` and `sid` with a 32-character
/// alphanumeric value, `aspsessionidXXXXXXXX` with a 24-letter value, and the
/// ColdFusion `cfid`/`cftoken` pair (only when both are present).
pub fn strip_session_ids(query: &[u8]) -> Option<Vec<u8>> {
    let mut params = QueryParams::parse(query);
    if params.is_empty() {
        return None;
    }
    let has_cfid = params
        .iter()
        .any(|param| split_param(param).0.eq_ignore_ascii_case(b"cfid"));
    let has_cftoken = params
        .iter()
        .any(|param| split_param(param).0.eq_ignore_ascii_case(b"cftoken"));
    let strip_cold_fusion = has_cfid && has_cftoken;

    let before = params.len();
    params.retain(|param| {
        !(is_session_param(param) || (strip_cold_fusion && is_cold_fusion_param(param)))
    });
    if params.len() == before {
        return None;
    }
    Some(params.serialize())
}
