/// Fixture loading and result bookkeeping
///
/// Strings in the fixtures stand for raw bytes one char per byte (latin-1),
/// so inputs that are not valid UTF-8 can be written down. The W3C-layout
/// file is the exception: it is UTF-8, like the upstream test data.
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use urlcanon::ParsedUrl;

/// input -> expected output
pub type Cases = BTreeMap<String, String>;

pub fn load<T: DeserializeOwned>(json: &str) -> T {
    serde_json::from_str(json).expect("fixture is valid JSON")
}

pub fn latin1(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| u8::try_from(u32::from(c)).expect("fixture strings stay within latin-1"))
        .collect()
}

pub fn latin1_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// A W3C urltestdata entry. Only absolute inputs are used, so `base` is
/// either absent or `about:blank`.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum TestCase {
    UrlTest {
        input: String,
        #[serde(default)]
        base: Option<String>,
        #[serde(default)]
        href: Option<String>,
        #[serde(default)]
        protocol: Option<String>,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        password: Option<String>,
        #[serde(default)]
        host: Option<String>,
        #[serde(default)]
        hostname: Option<String>,
        #[serde(default)]
        port: Option<String>,
        #[serde(default)]
        pathname: Option<String>,
        #[serde(default)]
        search: Option<String>,
        #[serde(default)]
        hash: Option<String>,
    },
    Comment(#[allow(dead_code)] String),
}

/// Expected parse of one input; fields left out are expected empty
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct ExpectedFields {
    pub input: String,
    pub leading_junk: String,
    pub scheme: String,
    pub colon_after_scheme: String,
    pub slashes: String,
    pub username: String,
    pub colon_before_password: String,
    pub password: String,
    pub at_sign: String,
    pub ip6: String,
    pub ip4: String,
    pub domain: String,
    pub colon_before_port: String,
    pub port: String,
    pub path: String,
    pub question_mark: String,
    pub query: String,
    pub hash_sign: String,
    pub fragment: String,
    pub trailing_junk: String,
    pub surt_ancestry: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum ParsingCase {
    Fields(ExpectedFields),
    Comment(#[allow(dead_code)] String),
}

impl ExpectedFields {
    /// Names of the fields where `url` differs from the expectation
    pub fn mismatches(&self, url: &ParsedUrl) -> Vec<FixtureFailure> {
        let checks: [(&str, &str, &[u8]); 19] = [
            ("leading_junk", &self.leading_junk, &url.leading_junk),
            ("scheme", &self.scheme, &url.scheme),
            ("colon_after_scheme", &self.colon_after_scheme, &url.colon_after_scheme),
            ("slashes", &self.slashes, &url.slashes),
            ("username", &self.username, &url.username),
            ("colon_before_password", &self.colon_before_password, &url.colon_before_password),
            ("password", &self.password, &url.password),
            ("at_sign", &self.at_sign, &url.at_sign),
            ("ip6", &self.ip6, url.ip6()),
            ("ip4", &self.ip4, url.ip4()),
            ("domain", &self.domain, url.domain()),
            ("colon_before_port", &self.colon_before_port, &url.colon_before_port),
            ("port", &self.port, &url.port),
            ("path", &self.path, &url.path),
            ("question_mark", &self.question_mark, &url.question_mark),
            ("query", &self.query, &url.query),
            ("hash_sign", &self.hash_sign, &url.hash_sign),
            ("fragment", &self.fragment, &url.fragment),
            ("trailing_junk", &self.trailing_junk, &url.trailing_junk),
        ];
        let mut failures: Vec<_> = checks
            .into_iter()
            .filter(|&(_, expected, actual)| latin1(expected) != actual)
            .map(|(field, expected, actual)| FixtureFailure {
                test_num: 0,
                input: self.input.clone(),
                field: field.to_string(),
                expected: expected.to_string(),
                actual: latin1_string(actual),
            })
            .collect();

        let ancestry: Vec<String> = url
            .surt_ancestry()
            .iter()
            .map(|prefix| latin1_string(prefix))
            .collect();
        if ancestry != self.surt_ancestry {
            failures.push(FixtureFailure {
                test_num: 0,
                input: self.input.clone(),
                field: "surt_ancestry".to_string(),
                expected: format!("{:?}", self.surt_ancestry),
                actual: format!("{ancestry:?}"),
            });
        }
        failures
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixtureResult {
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<FixtureFailure>,
}

#[derive(Debug, Clone)]
pub struct FixtureFailure {
    pub test_num: usize,
    pub input: String,
    pub field: String,
    pub expected: String,
    pub actual: String,
}

impl FixtureResult {
    pub fn record(&mut self, failures: Vec<FixtureFailure>) {
        if failures.is_empty() {
            self.passed += 1;
        } else {
            self.failed += 1;
            self.failures.extend(failures);
        }
    }

    pub fn pass_rate(&self) -> f64 {
        let total = self.passed + self.failed;
        if total == 0 {
            0.0
        } else {
            (self.passed as f64 / total as f64) * 100.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Passed: {}, Failed: {}, Pass Rate: {:.2}%",
            self.passed,
            self.failed,
            self.pass_rate()
        )
    }

    /// Print the first failures and fail the test if there are any
    pub fn assert_all_passed(&self, suite: &str) {
        println!("\n{suite}: {}", self.summary());
        for (i, failure) in self.failures.iter().take(20).enumerate() {
            println!("\n{}. Test #{}: {}", i + 1, failure.test_num, failure.field);
            println!("   Input: {:?}", failure.input);
            println!("   Expected: {:?}", failure.expected);
            println!("   Actual: {:?}", failure.actual);
        }
        if self.failures.len() > 20 {
            println!("\n... and {} more failures", self.failures.len() - 20);
        }
        assert_eq!(self.failed, 0, "{suite} fixtures failed: {}", self.summary());
        assert!(self.passed > 0, "{suite} fixtures are empty");
    }
}

#[test]
fn test_latin1_bytes() {
    assert_eq!(latin1("a\u{0}\u{ff}"), b"a\x00\xff");
    assert_eq!(latin1_string(b"a\x00\xff"), "a\u{0}\u{ff}");
}

#[test]
fn test_fixture_result() {
    let mut result = FixtureResult::default();
    result.record(Vec::new());
    result.record(vec![FixtureFailure {
        test_num: 2,
        input: "x".to_string(),
        field: "path".to_string(),
        expected: "a".to_string(),
        actual: "b".to_string(),
    }]);
    assert_eq!(result.passed, 1);
    assert_eq!(result.failed, 1);
    assert!((result.pass_rate() - 50.0).abs() < f64::EPSILON);
}
