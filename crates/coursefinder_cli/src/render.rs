//! Text and JSON rendering of explore views.

use coursefinder_core::models::{Course, FacetKind, FilterState};
use coursefinder_core::url_codec::location;
use coursefinder_core::{ExploreController, ExploreResults, Navigator, PageView};
use serde::Serialize;

/// Route the explore view lives under.
pub(crate) const EXPLORE_PATH: &str = "/explore";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExploreReport<'a> {
    location: String,
    filters: &'a FilterState,
    loading: bool,
    page: Option<PageView<&'a Course>>,
}

fn encoding_error(err: serde_json::Error) -> String {
    format!("response encoding error: {}", err)
}

/// Summarize active filters on one line.
pub(crate) fn describe_filters(state: &FilterState) -> String {
    if state.is_unrestricted() {
        return String::from("none");
    }
    let mut parts = Vec::new();
    if !state.search_term.is_empty() {
        parts.push(format!("search \"{}\"", state.search_term));
    }
    if !state.category.is_all() {
        parts.push(format!("category {}", state.category_label()));
    }
    for kind in FacetKind::ALL {
        let joined = state.facet_joined(kind);
        if !joined.is_empty() {
            parts.push(format!("{} {}", kind, joined.replace(',', ", ")));
        }
    }
    parts.join("; ")
}

pub(crate) fn format_course_row(course: &Course) -> String {
    format!(
        "{:<28} {:<36} {} | {} | {} | {}",
        course.slug,
        course.title,
        course.category,
        course.level,
        course.course_type,
        course.price_type
    )
}

fn format_pager(view: &PageView<&Course>) -> String {
    (1..=view.display_pages())
        .map(|page| {
            if page == view.current_page {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_page(view: &PageView<&Course>) -> Vec<String> {
    let Some((first, last)) = view.item_range() else {
        return vec![String::from("No courses match the current filters.")];
    };
    let mut lines = Vec::with_capacity(view.items.len() + 2);
    lines.push(format!(
        "Showing {}-{} of {} courses (page {} of {})",
        first,
        last,
        view.total_items,
        view.current_page,
        view.display_pages()
    ));
    lines.extend(view.items.iter().map(|course| format!("  {}", format_course_row(course))));
    lines.push(format!("Pages: {}", format_pager(view)));
    lines
}

/// Render the controller's current view.
///
/// # Returns
/// Pretty JSON when `json` is set, otherwise a human-readable listing.
///
/// # Errors
/// Returns a message when JSON encoding fails.
pub(crate) fn render_view<N: Navigator>(
    controller: &ExploreController<N>,
    json: bool,
) -> Result<String, String> {
    let location = location(EXPLORE_PATH, &controller.canonical_query());
    let results = controller.results();

    if json {
        let (loading, page) = match results {
            ExploreResults::Loading => (true, None),
            ExploreResults::Ready(view) => (false, Some(view)),
        };
        let report = ExploreReport {
            location,
            filters: controller.filter_state(),
            loading,
            page,
        };
        return serde_json::to_string_pretty(&report).map_err(encoding_error);
    }

    let mut lines = vec![
        format!("Location: {}", location),
        format!("Filters: {}", describe_filters(controller.filter_state())),
    ];
    match results {
        ExploreResults::Loading => lines.push(String::from("Loading courses...")),
        ExploreResults::Ready(view) => lines.extend(format_page(&view)),
    }
    Ok(lines.join("\n"))
}

/// Render a single course for the `show` command.
pub(crate) fn format_course_detail(course: &Course, json: bool) -> Result<String, String> {
    if json {
        return serde_json::to_string_pretty(course).map_err(encoding_error);
    }

    let mut lines = vec![
        course.title.clone(),
        format!("  slug:     {}", course.slug),
        format!("  category: {}", course.category),
        format!("  level:    {}", course.level),
        format!("  type:     {}", course.course_type),
        format!("  price:    {}", course.price_type),
    ];
    if !course.tags.is_empty() {
        lines.push(format!("  tags:     {}", course.tags.join(", ")));
    }
    if !course.description.is_empty() {
        lines.push(String::new());
        lines.push(course.description.clone());
    }
    Ok(lines.join("\n"))
}
