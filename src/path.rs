//! Path rewriting: dot-segment resolution, slash collapsing and removal of
//! ASP.NET cookieless session segments.

use crate::character_sets::is_path_separator;
use crate::compat::{Cow, Vec};
use crate::helpers::starts_with_pct_2e;

/// A path segment that means "stay" or "go up one level"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DotSegment {
    Single,
    Double,
}

/// Length of a leading `.` (1) or `%2e` (3) token
fn dot_token_len(bytes: &[u8]) -> Option<usize> {
    if bytes.first() == Some(&b'.') {
        Some(1)
    } else if starts_with_pct_2e(bytes) {
        Some(3)
    } else {
        None
    }
}

fn classify_segment(segment: &[u8]) -> Option<DotSegment> {
    let first = dot_token_len(segment)?;
    let rest = &segment[first..];
    if rest.is_empty() {
        return Some(DotSegment::Single);
    }
    (dot_token_len(rest)? == rest.len()).then_some(DotSegment::Double)
}

/// Resolve `.` and `..` segments (literal or `%2e`-encoded, any case).
///
/// The path is read as alternating one-byte separators (`/` or `\`) and
/// segments, starting with a separator. A dot segment is dropped together
/// with the separator that follows it; a double-dot segment additionally
/// removes the previous separator and segment, but never the leading root
/// separator. Paths that do not start with a separator are returned as-is.
///
/// `_special` is accepted for callers that track the scheme class; it does
/// not change the result.
///
/// ```
/// use urlcanon::resolve_path_dots;
///
/// assert_eq!(&*resolve_path_dots(b"/foo/./bar/../baz", true), b"/foo/baz");
/// assert_eq!(&*resolve_path_dots(b"/..//", true), b"//");
/// assert_eq!(&*resolve_path_dots(b"/.../", true), b"/.../");
/// ```
pub fn resolve_path_dots(path: &[u8], _special: bool) -> Cow<'_, [u8]> {
    if !path.first().is_some_and(|&b| is_path_separator(b)) {
        return Cow::Borrowed(path);
    }

    let mut output: Vec<&[u8]> = Vec::new();
    // Set after a dot segment: its following separator is dropped
    let mut skip_separator = false;
    let mut pos = 0;

    while pos < path.len() {
        // Separator token
        let separator = &path[pos..=pos];
        pos += 1;
        if !skip_separator {
            output.push(separator);
        }

        // Segment token: run of non-separator bytes, possibly empty
        let end = path[pos..]
            .iter()
            .position(|&b| is_path_separator(b))
            .map_or(path.len(), |offset| pos + offset);
        let segment = &path[pos..end];
        pos = end;

        match classify_segment(segment) {
            Some(dots) => {
                if dots == DotSegment::Double {
                    // Pop the preceding separator, then the preceding segment
                    for _ in 0..2 {
                        if output.len() > 1 {
                            output.pop();
                        }
                    }
                }
                skip_separator = true;
            }
            None => {
                output.push(segment);
                skip_separator = false;
            }
        }
    }

    let resolved_len: usize = output.iter().map(|token| token.len()).sum();
    if resolved_len == path.len() {
        return Cow::Borrowed(path);
    }
    Cow::Owned(output.concat())
}

/// Collapse runs of `/` into a single `/`, for paths starting with `/`.
/// Returns None when nothing changes.
pub fn collapse_consecutive_slashes(path: &[u8]) -> Option<Vec<u8>> {
    if path.first() != Some(&b'/') || !path.windows(2).any(|pair| pair == b"//") {
        return None;
    }
    let mut out = Vec::with_capacity(path.len());
    for &b in path {
        if b == b'/' && out.last() == Some(&b'/') {
            continue;
        }
        out.push(b);
    }
    Some(out)
}

/// `(` 24 alphanumerics `)`
fn is_bare_session(segment: &[u8]) -> bool {
    segment.len() == 26
        && segment[0] == b'('
        && segment[25] == b')'
        && segment[1..25].iter().all(u8::is_ascii_alphanumeric)
}

/// `(` followed by one or more `X(` 24 alphanumerics `)`, then `)`
fn is_keyed_session(segment: &[u8]) -> bool {
    let Some(inner) = segment
        .strip_prefix(b"(")
        .and_then(|s| s.strip_suffix(b")"))
    else {
        return false;
    };
    !inner.is_empty()
        && inner.len() % 27 == 0
        && inner
            .chunks(27)
            .all(|chunk| chunk[0].is_ascii_alphabetic() && is_bare_session(&chunk[1..]))
}

fn contains_aspx(bytes: &[u8]) -> bool {
    bytes
        .windows(5)
        .any(|window| window.eq_ignore_ascii_case(b".aspx"))
}

/// Remove ASP.NET cookieless session segments such as `/(S(24 chars))/`
/// or `/(24 chars)/` when an `.aspx` resource follows them.
/// Returns None when nothing changes.
pub fn strip_session_ids(path: &[u8]) -> Option<Vec<u8>> {
    if memchr::memchr(b'(', path).is_none() {
        return None;
    }

    let mut out = Vec::with_capacity(path.len());
    let mut changed = false;
    let mut pos = 0;
    while pos < path.len() {
        let end = memchr::memchr(b'/', &path[pos..]).map_or(path.len(), |offset| pos + offset);
        let segment = &path[pos..end];
        let followed_by_aspx = end < path.len() && contains_aspx(&path[end + 1..]);
        let after_slash = pos > 0 && path[pos - 1] == b'/';

        let is_session = is_bare_session(segment) || is_keyed_session(segment);
        if after_slash && followed_by_aspx && is_session {
            // Drop the segment and its trailing slash
            changed = true;
            pos = end + 1;
            continue;
        }

        out.extend_from_slice(segment);
        if end < path.len() {
            out.push(b'/');
        }
        pos = end + 1;
    }

    changed.then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_dots_literal_cases() {
        let cases: &[(&[u8], &[u8])] = &[
            (b"/./", b"/"),
            (b"/.", b"/"),
            (b"/..", b"/"),
            (b"/../", b"/"),
            (b"/..//", b"//"),
            (b"//..//", b"//"),
            (b"/foo/./", b"/foo/"),
            (b"/foo/.", b"/foo/"),
            (b"/foo/", b"/foo/"),
            (b"/foo/..", b"/"),
            (b"/.../", b"/.../"),
            (b"//.../", b"//.../"),
            (b"/././", b"/"),
            (b"/././.", b"/"),
            (b"/.././../.", b"/"),
        ];
        for &(input, expected) in cases {
            assert_eq!(&*resolve_path_dots(input, true), expected, "{input:?}");
            assert_eq!(&*resolve_path_dots(input, false), expected, "{input:?}");
        }
    }

    #[test]
    fn test_resolve_path_dots_encoded() {
        assert_eq!(&*resolve_path_dots(b"/a/%2e/b", true), b"/a/b");
        assert_eq!(&*resolve_path_dots(b"/a/b/%2E%2e/c", true), b"/a/c");
        assert_eq!(&*resolve_path_dots(b"/a/.%2E/c", true), b"/c");
        assert_eq!(&*resolve_path_dots(b"/a/%2e./c", true), b"/c");
        assert_eq!(&*resolve_path_dots(b"/a/%2e%2/c", true), b"/a/%2e%2/c");
    }

    #[test]
    fn test_resolve_path_dots_backslashes() {
        assert_eq!(&*resolve_path_dots(b"\\a\\..\\b", true), b"\\b");
        assert_eq!(&*resolve_path_dots(b"/a\\.\\b", true), b"/a\\b");
    }

    #[test]
    fn test_resolve_path_dots_untouched() {
        assert!(matches!(resolve_path_dots(b"a/../b", true), Cow::Borrowed(_)));
        assert!(matches!(resolve_path_dots(b"", true), Cow::Borrowed(_)));
        assert!(matches!(resolve_path_dots(b"/a/b", true), Cow::Borrowed(_)));
    }

    #[test]
    fn test_collapse_consecutive_slashes() {
        assert_eq!(collapse_consecutive_slashes(b"//a///b//"), Some(b"/a/b/".to_vec()));
        assert_eq!(collapse_consecutive_slashes(b"/a/b"), None);
        assert_eq!(collapse_consecutive_slashes(b"a//b"), None);
    }

    #[test]
    fn test_strip_session_ids() {
        assert_eq!(
            strip_session_ids(b"/app/(S(ek3mbn45jdc4q4rxv5m5zvi0))/default.aspx"),
            Some(b"/app/default.aspx".to_vec())
        );
        assert_eq!(
            strip_session_ids(b"/app/(a1b2c3d4e5f6g7h8i9j0k1l2)/page.ASPX?x"),
            Some(b"/app/page.ASPX?x".to_vec())
        );
        assert_eq!(
            strip_session_ids(b"/app/(S(ek3mbn45jdc4q4rxv5m5zvi0))/default.html"),
            None
        );
        assert_eq!(strip_session_ids(b"/app/(short)/x.aspx"), None);
    }
}
