/// Tests driven by the JSON fixtures
use super::fixture_loader::{Cases, FixtureFailure, FixtureResult, ParsingCase, latin1, latin1_string, load};
use super::w3c_runner::run_w3c_tests;
use std::collections::BTreeMap;
use urlcanon::{Profile, normalize_host, parse_url, resolve_path_dots, reverse_host, ssurt_host};

fn failure(test_num: usize, input: &str, field: &str, expected: &str, actual: &[u8]) -> FixtureFailure {
    FixtureFailure {
        test_num,
        input: input.to_string(),
        field: field.to_string(),
        expected: expected.to_string(),
        actual: latin1_string(actual),
    }
}

/// Compare `transform(input)` with the expected bytes for every case
fn run_cases(cases: &Cases, field: &str, transform: impl Fn(&[u8]) -> Vec<u8>) -> FixtureResult {
    let mut result = FixtureResult::default();
    for (test_num, (input, expected)) in cases.iter().enumerate() {
        let actual = transform(&latin1(input));
        if actual == latin1(expected) {
            result.record(Vec::new());
        } else {
            result.record(vec![failure(test_num + 1, input, field, expected, &actual)]);
        }
    }
    result
}

fn canonicalize(profile: Profile) -> impl Fn(&[u8]) -> Vec<u8> {
    move |input: &[u8]| {
        let mut url = parse_url(input);
        profile.apply(&mut url);
        url.to_bytes()
    }
}

/// Every input any fixture feeds to the parser
fn all_inputs() -> Vec<Vec<u8>> {
    let mut inputs: Vec<Vec<u8>> = load::<Vec<String>>(include_str!("./idempotence.json"))
        .iter()
        .map(|input| latin1(input))
        .collect();
    for cases in load::<BTreeMap<String, Cases>>(include_str!("./profiles.json")).values() {
        inputs.extend(cases.keys().map(|input| latin1(input)));
    }
    let supplemental: Cases = load(include_str!("./supplemental_whatwg.json"));
    inputs.extend(supplemental.keys().map(|input| latin1(input)));
    inputs
}

#[test]
fn test_parsing_fixtures() {
    let cases: Vec<ParsingCase> = load(include_str!("./parsing.json"));
    let mut result = FixtureResult::default();
    for (test_num, case) in cases.iter().enumerate() {
        let ParsingCase::Fields(expected) = case else {
            continue;
        };
        let url = parse_url(latin1(&expected.input));
        let mut failures = expected.mismatches(&url);
        for failure in &mut failures {
            failure.test_num = test_num;
        }
        result.record(failures);
    }
    result.assert_all_passed("parsing");
}

#[test]
fn test_round_trip_fixtures() {
    for input in all_inputs() {
        assert_eq!(parse_url(&input).to_bytes(), input, "{:?}", latin1_string(&input));
    }
}

#[test]
fn test_idempotence_fixtures() {
    for input in all_inputs() {
        for profile in Profile::ALL {
            let mut url = parse_url(&input);
            profile.apply(&mut url);
            let once = url.to_bytes();
            profile.apply(&mut url);
            assert_eq!(
                latin1_string(&url.to_bytes()),
                latin1_string(&once),
                "{profile} is not idempotent on {:?}",
                latin1_string(&input)
            );
        }
    }
}

#[test]
fn test_path_dots_fixtures() {
    let fixtures: BTreeMap<String, Cases> = load(include_str!("./path_dots.json"));
    for (kind, cases) in &fixtures {
        let special = kind == "special";
        run_cases(cases, "path", |path| resolve_path_dots(path, special).into_owned())
            .assert_all_passed(&format!("path_dots {kind}"));
    }
}

#[test]
fn test_funky_ipv4_fixtures() {
    let cases: Cases = load(include_str!("./funky_ipv4.json"));
    run_cases(&cases, "host", |host| normalize_host(host)).assert_all_passed("funky_ipv4");

    for (input, expected) in &cases {
        let mut url = parse_url(format!("http://{input}/"));
        assert!(!url.ip4().is_empty(), "{input} should parse as an IPv4 host");
        Profile::Google.apply(&mut url);
        assert_eq!(url.ip4(), expected.as_bytes(), "{input}");
    }
}

#[test]
fn test_funky_ipv4_matches_url_crate() {
    let cases: Cases = load(include_str!("./funky_ipv4.json"));
    for (input, expected) in &cases {
        let parsed = url::Url::parse(&format!("http://{input}/")).unwrap();
        assert_eq!(parsed.host_str(), Some(expected.as_str()), "url crate on {input}");
        assert_eq!(normalize_host(input), expected.as_bytes(), "{input}");
    }
}

#[test]
fn test_w3c_fixtures() {
    let tests = load(include_str!("./w3c.json"));
    run_w3c_tests(tests).assert_all_passed("w3c");
}

#[test]
fn test_supplemental_whatwg_fixtures() {
    let cases: Cases = load(include_str!("./supplemental_whatwg.json"));
    run_cases(&cases, "url", canonicalize(Profile::Whatwg)).assert_all_passed("supplemental_whatwg");
}

#[test]
fn test_profile_fixtures() {
    let fixtures: BTreeMap<String, Cases> = load(include_str!("./profiles.json"));
    assert_eq!(fixtures.len(), 3);
    for (name, cases) in &fixtures {
        let profile: Profile = name.parse().unwrap();
        run_cases(cases, "url", canonicalize(profile)).assert_all_passed(name);
    }
}

#[test]
fn test_ssurt_fixtures() {
    let fixtures: BTreeMap<String, Cases> = load(include_str!("./ssurt.json"));
    let section = |name: &str| fixtures.get(name).unwrap_or_else(|| panic!("missing section {name}"));

    run_cases(section("reverseHost"), "host", |host| reverse_host(host)).assert_all_passed("reverseHost");
    run_cases(section("ssurtHost"), "host", |host| ssurt_host(host)).assert_all_passed("ssurtHost");
    run_cases(section("ssurt"), "ssurt", |input| parse_url(input).ssurt()).assert_all_passed("ssurt");
    run_cases(section("surt"), "surt", |input| parse_url(input).surt(true, true))
        .assert_all_passed("surt");
    run_cases(section("surtWithoutScheme"), "surt", |input| parse_url(input).surt(false, true))
        .assert_all_passed("surtWithoutScheme");
    run_cases(section("surtWithoutTrailingComma"), "surt", |input| {
        parse_url(input).surt(true, false)
    })
    .assert_all_passed("surtWithoutTrailingComma");
}
