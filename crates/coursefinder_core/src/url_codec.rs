//! Bidirectional mapping between [`FilterState`] and URL query strings.
//!
//! Encoding omits every parameter that equals its default, so equivalent
//! states always produce the same minimal query. Decoding is total: each
//! parameter falls back to its default in isolation when it is missing or
//! malformed. Category names and facet tokens outside their enumerations are
//! carried through verbatim and match no course.

use crate::constants::{
    QUERY_KEY_CATEGORY, QUERY_KEY_LEVELS, QUERY_KEY_PAGE, QUERY_KEY_PRICES, QUERY_KEY_SEARCH,
    QUERY_KEY_TYPES,
};
use crate::models::{CategoryFilter, FacetSet, FacetToken, FilterState};
use std::borrow::Cow;
use url::form_urlencoded;

/// Encode a filter state as a canonical query string (no leading `?`).
///
/// # Returns
/// An empty string for the unrestricted first-page state.
pub fn encode(state: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if !state.search_term.is_empty() {
        serializer.append_pair(QUERY_KEY_SEARCH, &state.search_term);
    }
    if let Some(category) = state.category.query_value() {
        serializer.append_pair(QUERY_KEY_CATEGORY, category);
    }
    append_facet(&mut serializer, QUERY_KEY_LEVELS, &state.levels);
    append_facet(&mut serializer, QUERY_KEY_TYPES, &state.types);
    append_facet(&mut serializer, QUERY_KEY_PRICES, &state.prices);
    if state.page > 1 {
        serializer.append_pair(QUERY_KEY_PAGE, &state.page.to_string());
    }
    serializer.finish()
}

fn append_facet<T: FacetToken>(
    serializer: &mut form_urlencoded::Serializer<'_, String>,
    key: &str,
    set: &FacetSet<T>,
) {
    if !set.is_empty() {
        serializer.append_pair(key, &set.joined());
    }
}

/// Decode a query string (with or without a leading `?`) into a filter state.
///
/// Only the first occurrence of each key is considered; unknown keys are
/// ignored.
pub fn decode(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut search: Option<Cow<'_, str>> = None;
    let mut category: Option<Cow<'_, str>> = None;
    let mut levels: Option<Cow<'_, str>> = None;
    let mut types: Option<Cow<'_, str>> = None;
    let mut prices: Option<Cow<'_, str>> = None;
    let mut page: Option<Cow<'_, str>> = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match key.as_ref() {
            QUERY_KEY_SEARCH => &mut search,
            QUERY_KEY_CATEGORY => &mut category,
            QUERY_KEY_LEVELS => &mut levels,
            QUERY_KEY_TYPES => &mut types,
            QUERY_KEY_PRICES => &mut prices,
            QUERY_KEY_PAGE => &mut page,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    FilterState {
        search_term: search
            .map(|value| normalize_search_term(&value))
            .unwrap_or_default(),
        category: category
            .as_deref()
            .map(CategoryFilter::parse)
            .unwrap_or_default(),
        levels: decode_facet(levels.as_deref()),
        types: decode_facet(types.as_deref()),
        prices: decode_facet(prices.as_deref()),
        page: page.as_deref().map_or(1, decode_page),
    }
}

/// Normalize free-text input the same way on commit and on decode.
pub fn normalize_search_term(raw: &str) -> String {
    raw.trim().to_string()
}

fn decode_facet<T: FacetToken>(raw: Option<&str>) -> FacetSet<T> {
    raw.map_or_else(FacetSet::default, |raw| FacetSet::from_tokens(raw.split(',')))
}

/// Non-numeric, zero, negative or overflowing values decode to page 1.
pub fn decode_page(raw: &str) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Join a route path and an encoded query into a navigable location.
pub fn location(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CourseType, FacetValue, Level, PriceType};
    use proptest::prelude::*;

    fn state_with(f: impl FnOnce(&mut FilterState)) -> FilterState {
        let mut state = FilterState::default();
        f(&mut state);
        state
    }

    #[test]
    fn default_state_encodes_to_empty_query() {
        assert_eq!(encode(&FilterState::default()), "");
        assert_eq!(decode(""), FilterState::default());
        assert_eq!(decode("?"), FilterState::default());
    }

    #[test]
    fn encode_uses_canonical_key_order_and_omits_defaults() {
        let state = state_with(|state| {
            state.page = 3;
            state.prices.insert(PriceType::Free);
            state.search_term = "data science".to_string();
            state.levels.insert(Level::Beginner);
            state.levels.insert(Level::Advanced);
        });
        assert_eq!(
            encode(&state),
            "q=data+science&levels=Beginner%2CAdvanced&prices=Free&page=3"
        );
    }

    #[test]
    fn encode_escapes_reserved_characters_in_tokens() {
        let state = state_with(|state| {
            state.category = CategoryFilter::Only(Category::CloudDevOps);
            state.types.insert(CourseType::CareerPath);
        });
        let query = encode(&state);
        assert_eq!(query, "category=Cloud+%26+DevOps&types=Career+Path");
        assert_eq!(decode(&query), state);
    }

    #[test]
    fn decode_accepts_literal_commas_and_drops_empty_tokens() {
        let state = decode("levels=Beginner,,Advanced,Beginner&types=Live,&prices=");
        assert_eq!(state.levels.joined(), "Beginner,Advanced");
        assert_eq!(state.types.joined(), "Live");
        assert!(state.prices.is_empty());
        assert_eq!(encode(&state), "levels=Beginner%2CAdvanced&types=Live");
    }

    #[test]
    fn decode_carries_unknown_tokens_through_to_encode() {
        let state = decode("category=Cooking&levels=Expert,Beginner&prices=Gratis");
        assert_eq!(
            state.category,
            CategoryFilter::Unrecognized(String::from("Cooking"))
        );
        assert_eq!(state.levels.joined(), "Beginner,Expert");
        assert_eq!(state.levels.unrecognized(), ["Expert"]);
        assert_eq!(state.prices.unrecognized(), ["Gratis"]);

        let canonical = encode(&state);
        assert_eq!(
            canonical,
            "category=Cooking&levels=Beginner%2CExpert&prices=Gratis"
        );
        assert_eq!(decode(&canonical), state);
    }

    #[test]
    fn decode_falls_back_per_field() {
        for raw_page in ["abc", "0", "-4", "2.5", "", "99999999999"] {
            let state = decode(&format!("q=rust&page={}&category=Business&prices=Free", raw_page));
            assert_eq!(state.page, 1, "page value: {:?}", raw_page);
            assert_eq!(state.search_term, "rust");
            assert_eq!(state.category, CategoryFilter::Only(Category::Business));
            assert!(state.prices.contains(PriceType::Free));
        }
    }

    #[test]
    fn decode_treats_all_topics_sentinel_as_unrestricted() {
        let state = decode("category=All+Topics");
        assert_eq!(state.category, CategoryFilter::All);
        assert_eq!(encode(&state), "");
    }

    #[test]
    fn decode_uses_first_occurrence_and_ignores_unknown_keys() {
        let state = decode("?page=2&page=5&utm_source=mail&q=go&q=rust");
        assert_eq!(state.page, 2);
        assert_eq!(state.search_term, "go");
    }

    #[test]
    fn decode_trims_search_term() {
        let state = decode("q=++react++");
        assert_eq!(state.search_term, "react");
        assert_eq!(encode(&state), "q=react");
    }

    #[test]
    fn location_omits_question_mark_for_empty_query() {
        assert_eq!(location("/courses", ""), "/courses");
        assert_eq!(location("/courses", "page=2"), "/courses?page=2");
    }

    fn facet_values() -> impl Strategy<Value = Vec<FacetValue>> {
        let value = prop_oneof![
            prop::sample::select(Level::ALL).prop_map(FacetValue::Level),
            prop::sample::select(CourseType::ALL).prop_map(FacetValue::Type),
            prop::sample::select(PriceType::ALL).prop_map(FacetValue::Price),
        ];
        prop::collection::vec(value, 0..8)
    }

    fn reachable_state() -> impl Strategy<Value = FilterState> {
        (
            "[a-zA-Z0-9 &,=+%?]{0,12}",
            prop::option::of(prop::sample::select(Category::ALL))
                .prop_map(CategoryFilter::from),
            facet_values(),
            1u32..500,
        )
            .prop_map(|(search, category, toggles, page)| {
                let mut state = FilterState {
                    search_term: normalize_search_term(&search),
                    category,
                    page,
                    ..FilterState::default()
                };
                for toggle in toggles {
                    state.toggle_facet(toggle);
                }
                state
            })
    }

    proptest! {
        #[test]
        fn decode_reproduces_encoded_state(state in reachable_state()) {
            prop_assert_eq!(decode(&encode(&state)), state);
        }

        #[test]
        fn encode_is_idempotent_through_decode(state in reachable_state()) {
            let once = encode(&state);
            prop_assert_eq!(encode(&decode(&once)), once);
        }

        #[test]
        fn decode_never_panics_on_arbitrary_queries(query in ".{0,64}") {
            let state = decode(&query);
            prop_assert!(state.page >= 1);
            let canonical = encode(&state);
            prop_assert_eq!(encode(&decode(&canonical)), canonical);
        }
    }
}
