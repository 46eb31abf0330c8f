//! Shape checks for user-supplied version strings

use std::sync::LazyLock;

use regex::Regex;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+\.\d+\.\d+)(-[a-zA-Z]+\d*)?$").expect("version pattern is valid")
});

static MINOR_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+)$").expect("minor version pattern is valid"));

/// Returns true for `X.Y.Z` and `X.Y.Z-tagN` (e.g. `0.1.2`, `0.1.2-beta1`)
pub fn is_valid_version(version: &str) -> bool {
    VERSION_RE.is_match(version)
}

/// Returns true for `X.Y` (e.g. `0.13`)
pub fn is_valid_minor_version(version: &str) -> bool {
    MINOR_VERSION_RE.is_match(version)
}

/// Check if `version` is one of `versions`
pub fn version_exists(version: &str, versions: &[String]) -> bool {
    versions.iter().any(|v| v == version)
}
