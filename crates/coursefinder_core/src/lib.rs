//! Core library for CourseFinder (catalog, filtering, pagination, URL sync).

/// Course catalog loading and lookup.
pub mod catalog;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants (ports, page size, query keys).
pub mod constants;
/// Explore view state machine and URL synchronization.
pub mod controller;
/// Trailing-edge debounce driven by caller-supplied time.
pub mod debounce;
/// Application error types.
pub mod error;
/// Course matching rules.
pub mod filter;
/// Data models for courses and filter state.
pub mod models;
/// Host navigation seam and in-memory history.
pub mod navigation;
/// Page slicing.
pub mod pagination;
/// Query-string encoding of the filter state.
pub mod url_codec;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::Catalog;
pub use config::Config;
pub use controller::{
    ExploreController, ExploreOptions, ExploreResults, PageChange, SyncPhase, Transition,
};
pub use error::AppError;
pub use navigation::{MemoryHistory, NavigationMode, Navigator};
pub use pagination::PageView;
