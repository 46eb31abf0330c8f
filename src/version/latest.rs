//! Latest version resolution for a mirror
//!
//! Mirrors list their newest release first, so by default "latest" is the
//! topmost version in the page rather than the numerically highest one.
//! [`LatestStrategy::Semantic`] switches to numeric ordering for mirrors that
//! sort differently.

use std::sync::Arc;

use semver::Version;
use tracing::debug;

use crate::version::constraint::{ConstraintResolver, latest_patch_constraint};
use crate::version::error::RegistryError;
use crate::version::extractor::{DirectoryListingExtractor, ExtractionMode, VersionExtractor};
use crate::version::fetcher::PageFetcher;
use crate::version::lister::VersionLister;

/// How the latest version is picked from a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LatestStrategy {
    /// First match scanning the page top to bottom
    #[default]
    DocumentOrder,
    /// Semantically highest version on the page
    Semantic,
}

/// Resolves "latest" and "latest under a minor line" requests against a mirror
pub struct LatestResolver {
    fetcher: Arc<dyn PageFetcher>,
    lister: VersionLister,
    constraint_resolver: Arc<dyn ConstraintResolver>,
    strategy: LatestStrategy,
}

impl LatestResolver {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        constraint_resolver: Arc<dyn ConstraintResolver>,
    ) -> Self {
        Self {
            lister: VersionLister::new(fetcher.clone()),
            fetcher,
            constraint_resolver,
            strategy: LatestStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: LatestStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the latest stable version, or None if the page has none
    pub async fn latest_stable(&self, mirror_url: &str) -> Result<Option<String>, RegistryError> {
        self.latest(mirror_url, false).await
    }

    /// Returns the latest version, counting pre-releases when `include_pre_release` is set
    pub async fn latest(
        &self,
        mirror_url: &str,
        include_pre_release: bool,
    ) -> Result<Option<String>, RegistryError> {
        let extractor =
            DirectoryListingExtractor::new(ExtractionMode::from_pre_release(include_pre_release));
        self.pick(&extractor, mirror_url).await
    }

    /// Returns the latest version under `minor_version` (e.g. `0.13` -> `0.13.7`)
    ///
    /// `minor_version` must already be a valid `X.Y` string. With
    /// `include_pre_release`, only pre-releases of that minor line are
    /// considered; otherwise the highest stable patch is selected through the
    /// constraint resolver.
    pub async fn latest_implicit(
        &self,
        mirror_url: &str,
        include_pre_release: bool,
        minor_version: &str,
    ) -> Result<Option<String>, RegistryError> {
        if include_pre_release {
            let extractor = DirectoryListingExtractor::pre_release_for_minor(minor_version)?;
            return self.pick(&extractor, mirror_url).await;
        }

        // Components too large for a semver number can never match a listed version
        if minor_version.split('.').any(|part| part.parse::<u64>().is_err()) {
            debug!("Minor version {:?} is out of range", minor_version);
            return Ok(None);
        }

        let versions = self.lister.list(mirror_url, false).await?;
        let constraint = latest_patch_constraint(minor_version);
        debug!(
            "Resolving {:?} against {} versions",
            constraint,
            versions.len()
        );
        self.constraint_resolver.resolve(&constraint, &versions)
    }

    async fn pick(
        &self,
        extractor: &dyn VersionExtractor,
        mirror_url: &str,
    ) -> Result<Option<String>, RegistryError> {
        let latest = match self.strategy {
            LatestStrategy::DocumentOrder => {
                let body = self.fetcher.fetch(mirror_url).await?;
                extractor.find_first(&body)
            }
            LatestStrategy::Semantic => {
                let versions = self.lister.list_with(extractor, mirror_url).await?;
                find_semantic_max(&versions)
            }
        };
        debug!("Latest version on {}: {:?}", mirror_url, latest);
        Ok(latest)
    }
}

/// Find the semantically maximum version from a list
///
/// Invalid versions are skipped.
pub fn find_semantic_max(versions: &[String]) -> Option<String> {
    versions
        .iter()
        .filter_map(|v| Version::parse(v).ok().map(|parsed| (v, parsed)))
        .max_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(original, _)| original.clone())
}
