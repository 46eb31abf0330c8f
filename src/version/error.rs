use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Error retrieving contents from url {url}: status {status}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid version pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid version constraint {constraint:?}: {reason}")]
    InvalidConstraint { constraint: String, reason: String },
}

/// Errors surfaced by the show operations, where a missing version becomes fatal
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid minor version format: {0:?} (expected MAJOR.MINOR, e.g. 0.13)")]
    InvalidMinorVersion(String),

    #[error("Invalid version format: {0:?} (expected MAJOR.MINOR.PATCH[-PRERELEASE], e.g. 0.13.4)")]
    InvalidVersion(String),

    #[error(
        "Requested version does not exist: {0:?}.\n\tTry `mirror-version list` to see all available versions"
    )]
    VersionNotFound(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
