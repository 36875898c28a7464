//! Filter predicate engine.

use crate::models::{Course, FilterState};

/// Lowercased search needle, computed once per filter pass.
struct SearchNeedle(Option<String>);

impl SearchNeedle {
    fn new(term: &str) -> Self {
        if term.is_empty() {
            Self(None)
        } else {
            Self(Some(term.to_lowercase()))
        }
    }

    fn matches(&self, course: &Course) -> bool {
        let Some(needle) = self.0.as_deref() else {
            return true;
        };
        contains_ci(&course.title, needle)
            || contains_ci(&course.description, needle)
            || course.tags.iter().any(|tag| contains_ci(tag, needle))
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn matches_facets(course: &Course, state: &FilterState) -> bool {
    state.category.admits(course.category)
        && state.levels.admits(course.level)
        && state.types.admits(course.course_type)
        && state.prices.admits(course.price_type)
}

/// Whether a single course satisfies every clause of `state`.
pub fn course_matches(course: &Course, state: &FilterState) -> bool {
    matches_facets(course, state) && SearchNeedle::new(&state.search_term).matches(course)
}

/// Ordered subsequence of `catalog` matching `state`.
///
/// Catalog order is preserved; `page` does not participate in matching.
pub fn filter_courses<'a>(catalog: &'a [Course], state: &FilterState) -> Vec<&'a Course> {
    let needle = SearchNeedle::new(&state.search_term);
    catalog
        .iter()
        .filter(|course| matches_facets(course, state) && needle.matches(course))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Category, CategoryFilter, CourseType, FacetSet, FacetToken, FacetValue, Level, PriceType,
    };
    use crate::test_support::{sample_courses, slugs};
    use proptest::prelude::*;

    #[test]
    fn unrestricted_state_returns_whole_catalog_in_order() {
        let courses = sample_courses();
        let result = filter_courses(&courses, &FilterState::default());
        assert_eq!(result.len(), courses.len());
        assert_eq!(slugs(result), slugs(&courses));
    }

    #[test]
    fn search_is_case_insensitive_over_title_description_and_tags() {
        let courses = sample_courses();
        let mut state = FilterState {
            search_term: "REACT".to_string(),
            ..FilterState::default()
        };
        assert_eq!(
            slugs(filter_courses(&courses, &state)),
            vec!["course-01", "course-02"]
        );

        state.search_term = "figma".to_string();
        assert_eq!(slugs(filter_courses(&courses, &state)), vec!["course-19"]);

        state.search_term = "hands-on lessons covering startup".to_string();
        assert_eq!(slugs(filter_courses(&courses, &state)), vec!["course-20"]);
    }

    #[test]
    fn clauses_are_anded() {
        let courses = sample_courses();
        let mut state = FilterState {
            category: CategoryFilter::Only(Category::WebDevelopment),
            ..FilterState::default()
        };
        state.toggle_facet(FacetValue::Level(Level::Beginner));
        state.toggle_facet(FacetValue::Price(PriceType::Free));
        assert_eq!(
            slugs(filter_courses(&courses, &state)),
            vec!["course-01", "course-03", "course-09"]
        );

        state.toggle_facet(FacetValue::Type(CourseType::Live));
        assert_eq!(slugs(filter_courses(&courses, &state)), vec!["course-09"]);
    }

    #[test]
    fn multi_value_facet_is_a_union_within_the_dimension() {
        let courses = sample_courses();
        let mut state = FilterState::default();
        state.toggle_facet(FacetValue::Type(CourseType::CareerPath));
        assert_eq!(
            slugs(filter_courses(&courses, &state)),
            vec!["course-05", "course-20"]
        );
        state.toggle_facet(FacetValue::Level(Level::Advanced));
        assert!(filter_courses(&courses, &state).is_empty());
    }

    #[test]
    fn unknown_category_or_facet_tokens_match_nothing() {
        let courses = sample_courses();
        let state = FilterState {
            category: CategoryFilter::parse("Cooking"),
            ..FilterState::default()
        };
        assert!(filter_courses(&courses, &state).is_empty());

        let state = FilterState {
            levels: FacetSet::from_tokens(["Expert"]),
            ..FilterState::default()
        };
        assert!(filter_courses(&courses, &state).is_empty());

        // Known tokens alongside an unknown one still match as a union.
        let mut state = FilterState {
            types: FacetSet::from_tokens(["Workshop"]),
            ..FilterState::default()
        };
        state.toggle_facet(FacetValue::Type(CourseType::CareerPath));
        assert_eq!(
            slugs(filter_courses(&courses, &state)),
            vec!["course-05", "course-20"]
        );
    }

    #[test]
    fn course_matches_agrees_with_filter() {
        let courses = sample_courses();
        let state = FilterState {
            search_term: "certificate".to_string(),
            ..FilterState::default()
        };
        let matched = filter_courses(&courses, &state);
        assert_eq!(matched.len(), 15);
        for course in &courses {
            assert_eq!(
                course_matches(course, &state),
                matched.iter().any(|candidate| candidate.slug == course.slug)
            );
        }
    }

    #[test]
    fn page_does_not_affect_matching() {
        let courses = sample_courses();
        let state = FilterState {
            page: 40,
            ..FilterState::default()
        };
        assert_eq!(filter_courses(&courses, &state).len(), 20);
    }

    fn facet_value() -> impl Strategy<Value = FacetValue> {
        prop_oneof![
            prop::sample::select(Level::ALL).prop_map(FacetValue::Level),
            prop::sample::select(CourseType::ALL).prop_map(FacetValue::Type),
            prop::sample::select(PriceType::ALL).prop_map(FacetValue::Price),
        ]
    }

    proptest! {
        #[test]
        fn adding_to_non_empty_facet_never_shrinks_and_clearing_never_shrinks(
            toggles in prop::collection::vec(facet_value(), 1..6),
            extra in facet_value(),
        ) {
            let courses = sample_courses();
            let mut state = FilterState::default();
            for toggle in toggles {
                state.toggle_facet(toggle);
            }
            let before = filter_courses(&courses, &state).len();

            // Adding a value to an already non-empty dimension widens that clause.
            let dimension_non_empty = match extra {
                FacetValue::Level(_) => !state.levels.is_empty(),
                FacetValue::Type(_) => !state.types.is_empty(),
                FacetValue::Price(_) => !state.prices.is_empty(),
            };
            if dimension_non_empty && !state.facet_selected(extra) {
                let mut widened = state.clone();
                widened.toggle_facet(extra);
                prop_assert!(filter_courses(&courses, &widened).len() >= before);
            }
            // Restricting an unrestricted dimension can only narrow.
            if !dimension_non_empty {
                let mut narrowed = state.clone();
                narrowed.toggle_facet(extra);
                prop_assert!(filter_courses(&courses, &narrowed).len() <= before);
            }

            let mut cleared = state.clone();
            cleared.clear_facet(extra.kind());
            prop_assert!(filter_courses(&courses, &cleared).len() >= before);
        }
    }
}
