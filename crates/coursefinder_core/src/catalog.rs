//! Immutable in-memory course catalog.

use crate::error::AppError;
use crate::models::Course;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Ordered, validated course catalog.
///
/// Loaded once at startup and never mutated afterwards; catalog order is the
/// order every filtered result preserves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Validate and wrap an ordered list of courses.
    ///
    /// # Errors
    /// Returns [`AppError::InvalidCatalog`] when a slug is blank or repeated.
    pub fn from_courses(courses: Vec<Course>) -> Result<Self, AppError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(courses.len());
        for (index, course) in courses.iter().enumerate() {
            let slug = course.slug.trim();
            if slug.is_empty() {
                return Err(AppError::InvalidCatalog(format!(
                    "course at index {} has an empty slug",
                    index
                )));
            }
            if !seen.insert(slug) {
                return Err(AppError::InvalidCatalog(format!(
                    "duplicate slug '{}'",
                    slug
                )));
            }
            if course.title.trim().is_empty() {
                warn!(slug, "catalog course has an empty title");
            }
        }
        Ok(Self { courses })
    }

    /// Parse a JSON array of courses.
    ///
    /// # Errors
    /// Returns [`AppError::Parse`] for malformed JSON or unknown enumeration
    /// values, and [`AppError::InvalidCatalog`] for slug violations.
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let courses: Vec<Course> = serde_json::from_str(json)?;
        Self::from_courses(courses)
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    /// Returns [`AppError::Io`] when the file cannot be read, otherwise the
    /// errors of [`Catalog::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&raw)?;
        debug!(
            path = %path.display(),
            courses = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Look up a course by slug.
    pub fn get(&self, slug: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.slug == slug)
    }
}
