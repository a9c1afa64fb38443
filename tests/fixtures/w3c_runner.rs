/// Runs W3C urltestdata-style cases through the whatwg profile
///
/// Only absolute URLs with canonical hosts are listed: the whatwg profile
/// leaves hosts and ports alone, and relative resolution is not supported.
use super::fixture_loader::{FixtureFailure, FixtureResult, TestCase};
use urlcanon::{Profile, parse_url};

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// `prefix + value` when `value` is present, as `search` and `hash` report it
fn prefixed(marker: &[u8], value: &[u8]) -> String {
    if marker.is_empty() || value.is_empty() {
        String::new()
    } else {
        lossy(&[marker, value].concat())
    }
}

pub fn run_w3c_tests(tests: Vec<TestCase>) -> FixtureResult {
    let mut result = FixtureResult::default();
    let mut test_num = 0;

    for test in tests {
        let TestCase::UrlTest {
            input,
            base,
            href,
            protocol,
            username,
            password,
            host,
            hostname,
            port,
            pathname,
            search,
            hash,
        } = test
        else {
            continue;
        };
        test_num += 1;
        assert!(
            base.as_deref().is_none_or(|base| base == "about:blank"),
            "relative case in W3C fixtures: {input:?}"
        );

        let mut url = parse_url(&input);
        Profile::Whatwg.apply(&mut url);

        let checks = [
            ("href", href, lossy(&url.to_bytes())),
            ("protocol", protocol, lossy(&[url.scheme.as_slice(), url.colon_after_scheme.as_slice()].concat())),
            ("username", username, lossy(&url.username)),
            ("password", password, lossy(&url.password)),
            ("host", host, lossy(&url.host_port())),
            ("hostname", hostname, lossy(url.host_bytes())),
            ("port", port, lossy(&url.port)),
            ("pathname", pathname, lossy(&url.path)),
            ("search", search, prefixed(&url.question_mark, &url.query)),
            ("hash", hash, prefixed(&url.hash_sign, &url.fragment)),
        ];
        let failures = checks
            .into_iter()
            .filter_map(|(field, expected, actual)| {
                let expected = expected?;
                (expected != actual).then(|| FixtureFailure {
                    test_num,
                    input: input.clone(),
                    field: field.to_string(),
                    expected,
                    actual,
                })
            })
            .collect();
        result.record(failures);
    }

    result
}
