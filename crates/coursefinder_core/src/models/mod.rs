//! Data models for the catalog and the explore filter.

/// Course records and their classification enumerations.
pub mod course;
/// Filter state, facet sets and facet selections.
pub mod filter_state;

pub use course::{Category, Course, CourseType, FacetToken, Level, PriceType};
pub use filter_state::{CategoryFilter, FacetKind, FacetSet, FacetValue, FilterState};
