//! Version resolution against a release mirror
//!
//! This module fetches a mirror's directory listing, extracts the versions it
//! links to and resolves a request (exact, minor-only or "latest") to a single
//! concrete version.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ PageFetcher │────▶│  Extractor  │────▶│   Lister    │
//! │   (fetch)   │     │ (regex scan)│     │ (all vers.) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │ Constraint  │◀────│   Latest    │
//!                     │  (~> X.Y.0) │     │  (resolve)  │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`fetcher`]: HTTP retrieval of the mirror page
//! - [`extractor`]: Version extraction strategies for directory listings
//! - [`lister`]: Full list of versions on a mirror
//! - [`latest`]: Latest and latest-patch-of-minor resolution
//! - [`constraint`]: Operator-based constraint resolution (`~>`, `>=`, ...)
//! - [`validate`]: Shape checks for version input
//! - [`dedup`]: Order-preserving duplicate removal
//! - [`error`]: Error types for fetching and resolution

pub mod constraint;
pub mod dedup;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod latest;
pub mod lister;
pub mod validate;
