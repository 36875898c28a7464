//! Catalog HTTP handlers.
//!
//! The service only hands out catalog data; matching, paging and URL state
//! all live with the client-side explore controller.

use crate::{error::HttpError, AppError, AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use coursefinder_core::constants::{ALL_TOPICS, QUERY_KEYS};
use coursefinder_core::models::{Category, Course, CourseType, FacetToken, Level, PriceType};
use serde::Serialize;

/// Facet vocabulary for rendering filter controls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetsResponse {
    /// Category labels, "All Topics" first.
    pub categories: Vec<&'static str>,
    pub levels: Vec<&'static str>,
    pub types: Vec<&'static str>,
    pub prices: Vec<&'static str>,
    /// Query keys in canonical order.
    pub query_keys: Vec<&'static str>,
    pub page_size: usize,
}

fn tokens<T: FacetToken>() -> Vec<&'static str> {
    T::ALL.iter().map(|value| value.as_str()).collect()
}

/// List the full catalog in catalog order.
///
/// # Returns
/// Every course as JSON.
pub async fn list_courses(State(state): State<AppState>) -> Json<Vec<Course>> {
    tracing::debug!(courses = state.catalog.len(), "serving catalog");
    Json(state.catalog.courses().to_vec())
}

/// Fetch a single course by slug.
///
/// # Returns
/// The course as JSON.
///
/// # Errors
/// Returns an error if the slug is blank or unknown.
pub async fn get_course(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Course>, HttpError> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(AppError::BadRequest(String::from("Course slug must not be empty")).into());
    }
    state
        .catalog
        .get(slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| HttpError(AppError::NotFound))
}

/// Describe the closed filter vocabularies and query keys.
pub async fn list_facets(State(state): State<AppState>) -> Json<FacetsResponse> {
    let mut categories = vec![ALL_TOPICS];
    categories.extend(tokens::<Category>());
    Json(FacetsResponse {
        categories,
        levels: tokens::<Level>(),
        types: tokens::<CourseType>(),
        prices: tokens::<PriceType>(),
        query_keys: QUERY_KEYS.to_vec(),
        page_size: state.config.page_size,
    })
}
