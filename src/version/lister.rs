//! Listing of every version published on a mirror

use std::sync::Arc;

use tracing::{debug, warn};

use crate::version::error::RegistryError;
use crate::version::extractor::{DirectoryListingExtractor, ExtractionMode, VersionExtractor};
use crate::version::fetcher::PageFetcher;

/// Fetches a mirror page and extracts the versions it links to
pub struct VersionLister {
    fetcher: Arc<dyn PageFetcher>,
}

impl VersionLister {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Lists the versions on `mirror_url` in document order
    ///
    /// An empty list means the page had no recognisable versions; it is not an error.
    pub async fn list(
        &self,
        mirror_url: &str,
        include_pre_release: bool,
    ) -> Result<Vec<String>, RegistryError> {
        let extractor =
            DirectoryListingExtractor::new(ExtractionMode::from_pre_release(include_pre_release));
        self.list_with(&extractor, mirror_url).await
    }

    /// Lists versions using a custom extraction strategy
    pub async fn list_with(
        &self,
        extractor: &dyn VersionExtractor,
        mirror_url: &str,
    ) -> Result<Vec<String>, RegistryError> {
        debug!("Getting list of versions from {}", mirror_url);
        let body = self.fetcher.fetch(mirror_url).await?;

        let versions = extractor.extract(&body);
        if versions.is_empty() {
            warn!("Cannot get version list from mirror: {}", mirror_url);
        }
        Ok(versions)
    }
}
