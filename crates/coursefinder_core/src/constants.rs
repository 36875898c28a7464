//! Shared constants used across CourseFinder crates.

use std::time::Duration;

/// Default port for the catalog service.
pub const DEFAULT_PORT: u16 = 38480;

/// Default number of courses rendered per explore page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Quiet period before free-text search input is committed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Label of the category sentinel that matches every course.
pub const ALL_TOPICS: &str = "All Topics";

/// Query-string key for the free-text search term.
pub const QUERY_KEY_SEARCH: &str = "q";
/// Query-string key for the single-select category.
pub const QUERY_KEY_CATEGORY: &str = "category";
/// Query-string key for the level facet.
pub const QUERY_KEY_LEVELS: &str = "levels";
/// Query-string key for the course type facet.
pub const QUERY_KEY_TYPES: &str = "types";
/// Query-string key for the price facet.
pub const QUERY_KEY_PRICES: &str = "prices";
/// Query-string key for the current page.
pub const QUERY_KEY_PAGE: &str = "page";

/// Canonical key order used when encoding a filter state.
pub const QUERY_KEYS: [&str; 6] = [
    QUERY_KEY_SEARCH,
    QUERY_KEY_CATEGORY,
    QUERY_KEY_LEVELS,
    QUERY_KEY_TYPES,
    QUERY_KEY_PRICES,
    QUERY_KEY_PAGE,
];
