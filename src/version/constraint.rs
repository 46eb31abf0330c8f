//! Constraint resolution over a list of candidate versions
//!
//! Supports the operator syntax used by HashiCorp-style version constraints:
//! - `~> 1.2.0` - pessimistic: >=1.2.0 <1.3.0
//! - `~> 1.2` - pessimistic: >=1.2.0 <2.0.0
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `=1.2.3` or `1.2.3` - exact, `!=1.2.3` - exclusion
//! - `>= 1.2, < 1.5` - comma-separated requirements must all hold

#[cfg(test)]
use mockall::automock;
use semver::Version;

use crate::version::error::RegistryError;

/// Selects the best version from a candidate list for a constraint expression
#[cfg_attr(test, automock)]
pub trait ConstraintResolver: Send + Sync {
    /// Returns the highest candidate satisfying `constraint`, or None if none does
    fn resolve(
        &self,
        constraint: &str,
        candidates: &[String],
    ) -> Result<Option<String>, RegistryError>;
}

/// Builds the constraint selecting the highest patch of a minor line, e.g. `~> 0.13.0`
pub fn latest_patch_constraint(minor_version: &str) -> String {
    format!("~> {}.0", minor_version)
}

/// ConstraintResolver backed by the `semver` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct SemverConstraintResolver;

impl ConstraintResolver for SemverConstraintResolver {
    fn resolve(
        &self,
        constraint: &str,
        candidates: &[String],
    ) -> Result<Option<String>, RegistryError> {
        let spec = ConstraintSpec::parse(constraint).ok_or_else(|| {
            RegistryError::InvalidConstraint {
                constraint: constraint.to_string(),
                reason: "expected e.g. \"~> 1.2.0\" or \">= 1.2, < 1.5\"".to_string(),
            }
        })?;

        let best = candidates
            .iter()
            .filter_map(|c| Version::parse(c.trim()).ok().map(|parsed| (c, parsed)))
            .filter(|(_, parsed)| spec.allows_pre_release || parsed.pre.is_empty())
            .filter(|(_, parsed)| spec.satisfies(parsed))
            .max_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(original, _)| original.clone());

        Ok(best)
    }
}

/// A single operator requirement
#[derive(Debug)]
enum Requirement {
    /// `~>`: the last given segment may grow, the ones before it are fixed
    Pessimistic { base: Version, segments: usize },
    Exact(Version),
    NotEqual(Version),
    Gte(Version),
    Gt(Version),
    Lte(Version),
    Lt(Version),
}

impl Requirement {
    fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();

        if let Some(rest) = spec.strip_prefix("~>") {
            let (base, segments) = parse_partial_version(rest.trim())?;
            Some(Requirement::Pessimistic { base, segments })
        } else if let Some(rest) = spec.strip_prefix(">=") {
            parse_partial_version(rest.trim()).map(|(v, _)| Requirement::Gte(v))
        } else if let Some(rest) = spec.strip_prefix("<=") {
            parse_partial_version(rest.trim()).map(|(v, _)| Requirement::Lte(v))
        } else if let Some(rest) = spec.strip_prefix("!=") {
            parse_partial_version(rest.trim()).map(|(v, _)| Requirement::NotEqual(v))
        } else if let Some(rest) = spec.strip_prefix('>') {
            parse_partial_version(rest.trim()).map(|(v, _)| Requirement::Gt(v))
        } else if let Some(rest) = spec.strip_prefix('<') {
            parse_partial_version(rest.trim()).map(|(v, _)| Requirement::Lt(v))
        } else if let Some(rest) = spec.strip_prefix('=') {
            parse_partial_version(rest.trim()).map(|(v, _)| Requirement::Exact(v))
        } else {
            parse_partial_version(spec).map(|(v, _)| Requirement::Exact(v))
        }
    }

    fn satisfies(&self, version: &Version) -> bool {
        match self {
            Requirement::Pessimistic { base, segments } => {
                if version < base {
                    return false;
                }
                match segments {
                    // ~> 1 and ~> 1.2 both stay below the next major
                    1 | 2 => version.major == base.major,
                    _ => version.major == base.major && version.minor == base.minor,
                }
            }
            Requirement::Exact(v) => version == v,
            Requirement::NotEqual(v) => version != v,
            Requirement::Gte(v) => version >= v,
            Requirement::Gt(v) => version > v,
            Requirement::Lte(v) => version <= v,
            Requirement::Lt(v) => version < v,
        }
    }

    fn has_pre_release(&self) -> bool {
        match self {
            Requirement::Pessimistic { base: v, .. }
            | Requirement::Exact(v)
            | Requirement::NotEqual(v)
            | Requirement::Gte(v)
            | Requirement::Gt(v)
            | Requirement::Lte(v)
            | Requirement::Lt(v) => !v.pre.is_empty(),
        }
    }
}

/// All requirements must hold (AND)
#[derive(Debug)]
struct ConstraintSpec {
    requirements: Vec<Requirement>,
    /// Pre-release candidates are only considered when the constraint names one
    allows_pre_release: bool,
}

impl ConstraintSpec {
    fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return None;
        }

        let requirements: Vec<Requirement> = spec
            .split(',')
            .map(Requirement::parse)
            .collect::<Option<_>>()?;
        let allows_pre_release = requirements.iter().any(Requirement::has_pre_release);

        Some(ConstraintSpec {
            requirements,
            allows_pre_release,
        })
    }

    fn satisfies(&self, version: &Version) -> bool {
        self.requirements.iter().all(|req| req.satisfies(version))
    }
}

/// Parses `1`, `1.2`, `1.2.3` or `1.2.3-beta1`, padding missing segments with zeros
///
/// Returns the version and the number of segments that were given.
fn parse_partial_version(version: &str) -> Option<(Version, usize)> {
    let (core, pre) = match version.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (version, None),
    };
    let segments = core.split('.').count();
    let normalized = match segments {
        1 => format!("{}.0.0", core),
        2 => format!("{}.0", core),
        3 => core.to_string(),
        _ => return None,
    };
    let normalized = match pre {
        Some(pre) => format!("{}-{}", normalized, pre),
        None => normalized,
    };
    Version::parse(&normalized).ok().map(|v| (v, segments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case("~> 0.1.0", &["0.1.0", "0.1.5", "0.2.0"], Some("0.1.5"))]
    #[case("~> 0.1", &["0.1.0", "0.1.5", "0.2.0", "1.0.0"], Some("0.2.0"))]
    #[case("~> 1", &["0.9.0", "1.4.0", "2.0.0"], Some("1.4.0"))]
    #[case("~> 1.2.3", &["1.2.2", "1.2.9", "1.3.0"], Some("1.2.9"))]
    #[case("~> 1.2.3", &["1.2.2", "1.3.0"], None)]
    #[case(">= 1.2, < 1.5", &["1.1.0", "1.4.9", "1.5.0"], Some("1.4.9"))]
    #[case(">1.2.0", &["1.2.0"], None)]
    #[case("<=1.2.0", &["1.2.0", "1.3.0"], Some("1.2.0"))]
    #[case("=1.2.0", &["1.2.0", "1.3.0"], Some("1.2.0"))]
    #[case("1.3.0", &["1.2.0", "1.3.0"], Some("1.3.0"))]
    #[case("!=1.3.0", &["1.2.0", "1.3.0"], Some("1.2.0"))]
    #[case("~> 0.1.0", &[], None)]
    fn resolve_returns_highest_satisfying_version(
        #[case] constraint: &str,
        #[case] candidates: &[&str],
        #[case] expected: Option<&str>,
    ) {
        let result = SemverConstraintResolver
            .resolve(constraint, &strings(candidates))
            .unwrap();
        assert_eq!(result, expected.map(|s| s.to_string()));
    }

    #[test]
    fn resolve_picks_semantic_max_regardless_of_order() {
        let candidates = strings(&["0.13.2", "0.13.10", "0.13.7"]);

        assert_eq!(
            SemverConstraintResolver
                .resolve("~> 0.13.0", &candidates)
                .unwrap(),
            Some("0.13.10".to_string())
        );
    }

    #[test]
    fn resolve_skips_pre_releases_unless_constraint_names_one() {
        let candidates = strings(&["1.2.0", "1.2.1-beta1"]);

        assert_eq!(
            SemverConstraintResolver
                .resolve("~> 1.2.0", &candidates)
                .unwrap(),
            Some("1.2.0".to_string())
        );
        assert_eq!(
            SemverConstraintResolver
                .resolve(">= 1.2.1-alpha", &candidates)
                .unwrap(),
            Some("1.2.1-beta1".to_string())
        );
    }

    #[test]
    fn resolve_ignores_unparseable_candidates() {
        let candidates = strings(&["latest", "1.2.0", "1.2"]);

        assert_eq!(
            SemverConstraintResolver
                .resolve("~> 1.2.0", &candidates)
                .unwrap(),
            Some("1.2.0".to_string())
        );
    }

    #[rstest]
    #[case("")]
    #[case("~>")]
    #[case("~> a.b")]
    #[case(">= 1.2.3.4")]
    #[case(">= 1.2,")]
    fn resolve_rejects_invalid_constraints(#[case] constraint: &str) {
        let result = SemverConstraintResolver.resolve(constraint, &strings(&["1.2.3"]));

        assert!(matches!(
            result,
            Err(RegistryError::InvalidConstraint { .. })
        ));
    }

    #[test]
    fn latest_patch_constraint_pins_minor_line() {
        assert_eq!(latest_patch_constraint("0.13"), "~> 0.13.0");
    }
}
