use crate::compat::{Cow, ToString, Vec};
use crate::error::{Error, Result};
use crate::parsed_url::ParsedUrl;
use crate::steps;
use core::fmt;
use core::str::FromStr;
use tracing::trace;

/// Signature shared by all canonicalization steps
pub type StepFn = fn(&mut ParsedUrl);

/// A named canonicalization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    RemoveLeadingTrailingJunk,
    RemoveTabsAndNewlines,
    LowercaseScheme,
    FixBackslashes,
    NormalizePathDots,
    DecodePath2e,
    PctEncodePath,
    EmptyPathToSlash,
    RemoveFragment,
    TwoSlashes,
    ElideDefaultPort,
    CleanUpUserinfo,
    NormalizeHost,
    FixHostDots,
    UnescapeRepeatedly,
    CollapseConsecutiveSlashes,
    GooglePctEncode,
    LessDumbPctRecode,
    RemoveUserinfo,
    HttpsToHttp,
    StripWww,
    LowercasePath,
    LowercaseQuery,
    StripSessionIdsFromQuery,
    StripSessionIdsFromPath,
    RemoveRedundantAmpersandsFromQuery,
    OmitQuestionMarkIfQueryEmpty,
    AlphaReorderQuery,
    StripTrailingSlashUnlessEmpty,
}

impl Step {
    pub fn name(self) -> &'static str {
        match self {
            Self::RemoveLeadingTrailingJunk => "remove_leading_trailing_junk",
            Self::RemoveTabsAndNewlines => "remove_tabs_and_newlines",
            Self::LowercaseScheme => "lowercase_scheme",
            Self::FixBackslashes => "fix_backslashes",
            Self::NormalizePathDots => "normalize_path_dots",
            Self::DecodePath2e => "decode_path_2e",
            Self::PctEncodePath => "pct_encode_path",
            Self::EmptyPathToSlash => "empty_path_to_slash",
            Self::RemoveFragment => "remove_fragment",
            Self::TwoSlashes => "two_slashes",
            Self::ElideDefaultPort => "elide_default_port",
            Self::CleanUpUserinfo => "clean_up_userinfo",
            Self::NormalizeHost => "normalize_host",
            Self::FixHostDots => "fix_host_dots",
            Self::UnescapeRepeatedly => "unescape_repeatedly",
            Self::CollapseConsecutiveSlashes => "collapse_consecutive_slashes",
            Self::GooglePctEncode => "google_pct_encode",
            Self::LessDumbPctRecode => "less_dumb_pct_recode",
            Self::RemoveUserinfo => "remove_userinfo",
            Self::HttpsToHttp => "https_to_http",
            Self::StripWww => "strip_www",
            Self::LowercasePath => "lowercase_path",
            Self::LowercaseQuery => "lowercase_query",
            Self::StripSessionIdsFromQuery => "strip_session_ids_from_query",
            Self::StripSessionIdsFromPath => "strip_session_ids_from_path",
            Self::RemoveRedundantAmpersandsFromQuery => "remove_redundant_ampersands_from_query",
            Self::OmitQuestionMarkIfQueryEmpty => "omit_question_mark_if_query_empty",
            Self::AlphaReorderQuery => "alpha_reorder_query",
            Self::StripTrailingSlashUnlessEmpty => "strip_trailing_slash_unless_empty",
        }
    }

    /// The function implementing this step
    pub fn func(self) -> StepFn {
        match self {
            Self::RemoveLeadingTrailingJunk => steps::remove_leading_trailing_junk,
            Self::RemoveTabsAndNewlines => steps::remove_tabs_and_newlines,
            Self::LowercaseScheme => steps::lowercase_scheme,
            Self::FixBackslashes => steps::fix_backslashes,
            Self::NormalizePathDots => steps::normalize_path_dots,
            Self::DecodePath2e => steps::decode_path_2e,
            Self::PctEncodePath => steps::pct_encode_path,
            Self::EmptyPathToSlash => steps::empty_path_to_slash,
            Self::RemoveFragment => steps::remove_fragment,
            Self::TwoSlashes => steps::two_slashes,
            Self::ElideDefaultPort => steps::elide_default_port,
            Self::CleanUpUserinfo => steps::clean_up_userinfo,
            Self::NormalizeHost => steps::normalize_host,
            Self::FixHostDots => steps::fix_host_dots,
            Self::UnescapeRepeatedly => steps::unescape_repeatedly,
            Self::CollapseConsecutiveSlashes => steps::collapse_consecutive_slashes,
            Self::GooglePctEncode => steps::google_pct_encode,
            Self::LessDumbPctRecode => steps::less_dumb_pct_recode,
            Self::RemoveUserinfo => steps::remove_userinfo,
            Self::HttpsToHttp => steps::https_to_http,
            Self::StripWww => steps::strip_www,
            Self::LowercasePath => steps::lowercase_path,
            Self::LowercaseQuery => steps::lowercase_query,
            Self::StripSessionIdsFromQuery => steps::strip_session_ids_from_query,
            Self::StripSessionIdsFromPath => steps::strip_session_ids_from_path,
            Self::RemoveRedundantAmpersandsFromQuery => {
                steps::remove_redundant_ampersands_from_query
            }
            Self::OmitQuestionMarkIfQueryEmpty => steps::omit_question_mark_if_query_empty,
            Self::AlphaReorderQuery => steps::alpha_reorder_query,
            Self::StripTrailingSlashUnlessEmpty => steps::strip_trailing_slash_unless_empty,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const WHATWG_STEPS: &[Step] = &[
    Step::RemoveLeadingTrailingJunk,
    Step::RemoveTabsAndNewlines,
    Step::LowercaseScheme,
    Step::FixBackslashes,
    Step::NormalizePathDots,
    Step::DecodePath2e,
    Step::PctEncodePath,
    Step::EmptyPathToSlash,
];

const GOOGLE_STEPS: &[Step] = &[
    Step::RemoveLeadingTrailingJunk,
    Step::RemoveTabsAndNewlines,
    Step::LowercaseScheme,
    Step::RemoveFragment,
    Step::UnescapeRepeatedly,
    Step::FixBackslashes,
    Step::TwoSlashes,
    Step::FixHostDots,
    Step::NormalizeHost,
    Step::ElideDefaultPort,
    Step::NormalizePathDots,
    Step::CollapseConsecutiveSlashes,
    Step::GooglePctEncode,
    Step::EmptyPathToSlash,
];

// Google with https folded into http before the port is looked at
const AGGRESSIVE_STEPS: &[Step] = &[
    Step::RemoveLeadingTrailingJunk,
    Step::RemoveTabsAndNewlines,
    Step::LowercaseScheme,
    Step::HttpsToHttp,
    Step::RemoveFragment,
    Step::UnescapeRepeatedly,
    Step::FixBackslashes,
    Step::TwoSlashes,
    Step::FixHostDots,
    Step::NormalizeHost,
    Step::ElideDefaultPort,
    Step::NormalizePathDots,
    Step::CollapseConsecutiveSlashes,
    Step::GooglePctEncode,
    Step::EmptyPathToSlash,
    Step::RemoveUserinfo,
    Step::StripWww,
    Step::LowercasePath,
    Step::LowercaseQuery,
    Step::StripSessionIdsFromQuery,
    Step::StripSessionIdsFromPath,
    Step::RemoveRedundantAmpersandsFromQuery,
    Step::OmitQuestionMarkIfQueryEmpty,
    Step::AlphaReorderQuery,
    Step::StripTrailingSlashUnlessEmpty,
];

const SEMANTIC_PRECISE_STEPS: &[Step] = &[
    Step::RemoveLeadingTrailingJunk,
    Step::RemoveTabsAndNewlines,
    Step::LowercaseScheme,
    Step::FixBackslashes,
    Step::NormalizePathDots,
    Step::DecodePath2e,
    Step::PctEncodePath,
    Step::EmptyPathToSlash,
    Step::TwoSlashes,
    Step::NormalizeHost,
    Step::ElideDefaultPort,
    Step::CleanUpUserinfo,
    Step::LessDumbPctRecode,
];

/// The built-in canonicalization profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Browser-compatible cleanup: whitespace, backslashes, dot segments
    /// and path escaping
    Whatwg,
    /// Safe Browsing style: fully unescaped, fragment dropped, host normalized
    Google,
    /// Google plus lossy rewrites (scheme, `www`, case, session ids, query order)
    Aggressive,
    /// WHATWG plus normalizations that never change what the URL refers to
    SemanticPrecise,
}

impl Profile {
    pub const ALL: [Self; 4] = [Self::Whatwg, Self::Google, Self::Aggressive, Self::SemanticPrecise];

    pub fn name(self) -> &'static str {
        match self {
            Self::Whatwg => "whatwg",
            Self::Google => "google",
            Self::Aggressive => "aggressive",
            Self::SemanticPrecise => "semantic_precise",
        }
    }

    /// Steps in the order they run
    pub fn steps(self) -> &'static [Step] {
        match self {
            Self::Whatwg => WHATWG_STEPS,
            Self::Google => GOOGLE_STEPS,
            Self::Aggressive => AGGRESSIVE_STEPS,
            Self::SemanticPrecise => SEMANTIC_PRECISE_STEPS,
        }
    }

    pub fn canonicalizer(self) -> Canonicalizer {
        Canonicalizer::from(self)
    }

    /// Run every step of the profile on `url`.
    pub fn apply(self, url: &mut ParsedUrl) {
        trace!(profile = self.name(), steps = self.steps().len(), "canonicalizing");
        for step in self.steps() {
            (step.func())(url);
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = Error;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|profile| {
                let name = profile.name().as_bytes();
                name.len() == s.len()
                    && name.iter().zip(s.bytes()).all(|(&expected, actual)| {
                        let actual = if actual == b'-' { b'_' } else { actual };
                        expected == actual.to_ascii_lowercase()
                    })
            })
            .ok_or_else(|| Error::UnknownProfile(s.to_string()))
    }
}

/// An ordered pipeline of canonicalization steps.
///
/// Built from a [`Profile`] or from an explicit list of steps, and extended
/// with further steps to form custom pipelines. Immutable once built, so a
/// single canonicalizer can be shared across threads.
///
/// ```
/// use urlcanon::{Canonicalizer, Profile, Step, parse_url};
///
/// let canon = Canonicalizer::from(Profile::Whatwg).then(Step::RemoveFragment);
/// let mut url = parse_url("HTTP://example.com/a/../b#frag");
/// canon.canonicalize(&mut url);
/// assert_eq!(url.to_string(), "http://example.com/b");
/// ```
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    name: Cow<'static, str>,
    steps: Vec<(Step, StepFn)>,
}

impl Canonicalizer {
    pub fn new(name: impl Into<Cow<'static, str>>, steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            name: name.into(),
            steps: steps.into_iter().map(|step| (step, step.func())).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.steps.iter().map(|&(step, _)| step)
    }

    /// Append one step.
    #[must_use]
    pub fn then(mut self, step: Step) -> Self {
        self.steps.push((step, step.func()));
        self
    }

    /// Append several steps.
    #[must_use]
    pub fn extend(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps
            .extend(steps.into_iter().map(|step| (step, step.func())));
        self
    }

    /// Rename the pipeline, e.g. after extending a profile.
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Run every step, in order, on `url`.
    pub fn canonicalize(&self, url: &mut ParsedUrl) {
        trace!(profile = %self.name, steps = self.steps.len(), "canonicalizing");
        for (_, func) in &self.steps {
            func(url);
        }
    }
}

impl From<Profile> for Canonicalizer {
    fn from(profile: Profile) -> Self {
        Self::new(profile.name(), profile.steps().iter().copied())
    }
}

/// Names of the steps, for logging and diagnostics
impl fmt::Display for Canonicalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.steps().map(Step::name).collect();
        write!(f, "{} [{}]", self.name, names.join(", "))
    }
}

/// WHATWG profile
pub fn whatwg(url: &mut ParsedUrl) {
    Profile::Whatwg.apply(url);
}

/// Google Safe Browsing profile
pub fn google(url: &mut ParsedUrl) {
    Profile::Google.apply(url);
}

/// Aggressive profile
pub fn aggressive(url: &mut ParsedUrl) {
    Profile::Aggressive.apply(url);
}

/// Semantic-precise profile
pub fn semantic_precise(url: &mut ParsedUrl) {
    Profile::SemanticPrecise.apply(url);
}
