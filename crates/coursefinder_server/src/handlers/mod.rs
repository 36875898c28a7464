//! HTTP request handlers.

/// Catalog and facet endpoints.
pub mod courses;
