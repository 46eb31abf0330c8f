//! Version extraction from a mirror's HTML directory listing
//!
//! Mirrors such as `releases.hashicorp.com` render one link per release:
//!
//! ```text
//! <a href="/terraform/1.6.0/">terraform_1.6.0</a>
//! <a href="/terraform/1.6.0-beta2/">terraform_1.6.0-beta2</a>
//! ```
//!
//! Versions are recognised by their position inside the `href` attribute: an
//! optional leading `/`, the version, an optional trailing `/` and the closing
//! quote. Requiring the quote keeps `/1.6.0-beta2/"` from yielding `1.6.0` in
//! stable mode.

use std::sync::LazyLock;

use regex::Regex;

/// `/X.Y.Z/"` or `X.Y.Z"`
const STABLE_PATTERN: &str = r#"/?(\d+\.\d+\.\d+)/?""#;

/// `/X.Y.Z-tagN/"`, with the pre-release suffix optional
const PRE_RELEASE_PATTERN: &str = r#"/?(\d+\.\d+\.\d+)(-[a-zA-Z]+\d*)?/?""#;

static STABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(STABLE_PATTERN).expect("stable pattern is valid"));

static PRE_RELEASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PRE_RELEASE_PATTERN).expect("pre-release pattern is valid"));

/// Which versions an extractor accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Only `X.Y.Z`
    Stable,
    /// `X.Y.Z` and `X.Y.Z-tagN`
    WithPreRelease,
}

impl ExtractionMode {
    pub fn from_pre_release(include_pre_release: bool) -> Self {
        if include_pre_release {
            ExtractionMode::WithPreRelease
        } else {
            ExtractionMode::Stable
        }
    }
}

/// Strategy for pulling version strings out of a fetched index page
pub trait VersionExtractor: Send + Sync {
    /// Returns every version in `text`, in document order
    fn extract(&self, text: &str) -> Vec<String>;

    /// Returns the first version found scanning `text` line by line, top to bottom
    fn find_first(&self, text: &str) -> Option<String> {
        text.lines()
            .find_map(|line| self.extract(line).into_iter().next())
    }
}

/// Regex-based extractor for HTML directory listings
#[derive(Debug, Clone)]
pub struct DirectoryListingExtractor {
    pattern: Regex,
}

impl DirectoryListingExtractor {
    pub fn new(mode: ExtractionMode) -> Self {
        let pattern = match mode {
            ExtractionMode::Stable => STABLE_RE.clone(),
            ExtractionMode::WithPreRelease => PRE_RELEASE_RE.clone(),
        };
        Self { pattern }
    }

    /// Extractor for pre-releases under a single minor line, e.g. `0.13` matches
    /// `0.13.0-beta1` but neither `0.13.0`, `0.14.0-rc1` nor `10.13.0-rc1`
    ///
    /// The minor must start at the beginning of the text or right after a `/` or `"`.
    pub fn pre_release_for_minor(minor_version: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r#"(?:^|[/"])({}\.\d+-[a-zA-Z]+\d*)/?""#,
            regex::escape(minor_version)
        ))?;
        Ok(Self { pattern })
    }
}

impl VersionExtractor for DirectoryListingExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|m| strip_delimiters(m.as_str()).to_string())
            .collect()
    }

    fn find_first(&self, text: &str) -> Option<String> {
        text.lines().find_map(|line| {
            self.pattern
                .find(line)
                .map(|m| strip_delimiters(m.as_str()).to_string())
        })
    }
}

/// Removes the `/` and `"` surrounding a matched `/X.Y.Z/"` token
fn strip_delimiters(token: &str) -> &str {
    token.trim_matches(|c| c == '/' || c == '"')
}
