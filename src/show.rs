//! Top-level operations behind the command line
//!
//! Each operation writes the resolved version (or list) to `out`. Whether an
//! error ends the process is left to the caller.

use std::io::Write;
use std::sync::Arc;

use tracing::warn;

use crate::version::constraint::ConstraintResolver;
use crate::version::dedup::dedupe;
use crate::version::error::ResolveError;
use crate::version::fetcher::PageFetcher;
use crate::version::latest::{LatestResolver, LatestStrategy};
use crate::version::lister::VersionLister;
use crate::version::validate::{is_valid_minor_version, is_valid_version, version_exists};

/// Groups the lister, latest resolver and constraint resolver for one mirror source
pub struct VersionSwitcher {
    lister: VersionLister,
    latest: LatestResolver,
    constraint_resolver: Arc<dyn ConstraintResolver>,
}

impl VersionSwitcher {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        constraint_resolver: Arc<dyn ConstraintResolver>,
        strategy: LatestStrategy,
    ) -> Self {
        Self {
            lister: VersionLister::new(fetcher.clone()),
            latest: LatestResolver::new(fetcher, constraint_resolver.clone())
                .with_strategy(strategy),
            constraint_resolver,
        }
    }

    /// Prints the latest version, or an empty line if it cannot be determined
    ///
    /// Resolution failures are logged, not returned; only write errors are.
    pub async fn show_latest_version<W: Write>(
        &self,
        out: &mut W,
        mirror_url: &str,
        include_pre_release: bool,
    ) -> Result<(), ResolveError> {
        let version = match self.latest.latest(mirror_url, include_pre_release).await {
            Ok(version) => version.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to resolve latest version from {}: {}", mirror_url, e);
                String::new()
            }
        };
        writeln!(out, "{}", version)?;
        Ok(())
    }

    /// Prints the latest version of the `requested` minor line (e.g. `0.13`)
    ///
    /// Malformed input is rejected before the mirror is contacted.
    pub async fn show_latest_implicit_version<W: Write>(
        &self,
        out: &mut W,
        requested: &str,
        mirror_url: &str,
        include_pre_release: bool,
    ) -> Result<(), ResolveError> {
        if !is_valid_minor_version(requested) {
            return Err(ResolveError::InvalidMinorVersion(requested.to_string()));
        }

        let version = self
            .latest
            .latest_implicit(mirror_url, include_pre_release, requested)
            .await?
            .ok_or_else(|| ResolveError::VersionNotFound(requested.to_string()))?;
        writeln!(out, "{}", version)?;
        Ok(())
    }

    /// Prints `requested` if the mirror publishes exactly that version
    pub async fn show_exact_version<W: Write>(
        &self,
        out: &mut W,
        requested: &str,
        mirror_url: &str,
    ) -> Result<(), ResolveError> {
        if !is_valid_version(requested) {
            return Err(ResolveError::InvalidVersion(requested.to_string()));
        }

        let versions = self.lister.list(mirror_url, true).await?;
        if !version_exists(requested, &versions) {
            return Err(ResolveError::VersionNotFound(requested.to_string()));
        }
        writeln!(out, "{}", requested)?;
        Ok(())
    }

    /// Prints the highest version satisfying `constraint` (e.g. `>= 1.2, < 1.5`)
    pub async fn show_constraint_version<W: Write>(
        &self,
        out: &mut W,
        constraint: &str,
        mirror_url: &str,
        include_pre_release: bool,
    ) -> Result<(), ResolveError> {
        let versions = self.lister.list(mirror_url, include_pre_release).await?;
        let version = self
            .constraint_resolver
            .resolve(constraint, &versions)?
            .ok_or_else(|| ResolveError::VersionNotFound(constraint.to_string()))?;
        writeln!(out, "{}", version)?;
        Ok(())
    }

    /// Prints every version on the mirror, one per line, without duplicates
    pub async fn show_version_list<W: Write>(
        &self,
        out: &mut W,
        mirror_url: &str,
        include_pre_release: bool,
    ) -> Result<(), ResolveError> {
        let versions = dedupe(self.lister.list(mirror_url, include_pre_release).await?);
        for version in versions {
            writeln!(out, "{}", version)?;
        }
        Ok(())
    }
}
