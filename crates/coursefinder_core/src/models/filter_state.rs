//! Faceted-search state owned by the explore controller.

use super::course::{Category, CourseType, FacetToken, Level, PriceType};
use crate::constants::{ALL_TOPICS, QUERY_KEY_LEVELS, QUERY_KEY_PRICES, QUERY_KEY_TYPES};
use serde::{Serialize, Serializer};
use std::fmt;

/// Insertion-ordered set of facet tokens.
///
/// Membership is what matters for matching; the order only exists so that
/// encoded URLs are deterministic. Tokens outside the enumeration (from
/// hand-edited or stale links) are kept apart from the typed values: they
/// count as a selection but match no course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetSet<T> {
    values: Vec<T>,
    unrecognized: Vec<String>,
}

impl<T> Default for FacetSet<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            unrecognized: Vec::new(),
        }
    }
}

impl<T: FacetToken> FacetSet<T> {
    /// Build a set from tokens, keeping the first occurrence of duplicates.
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut set = Self::default();
        for value in values {
            set.insert(value);
        }
        set
    }

    /// Build a set from raw string tokens. Blank tokens are skipped and
    /// unknown ones are retained verbatim.
    pub fn from_tokens<'a, I: IntoIterator<Item = &'a str>>(tokens: I) -> Self {
        let mut set = Self::default();
        for token in tokens.into_iter().map(str::trim) {
            if token.is_empty() {
                continue;
            }
            match T::parse_token(token) {
                Some(value) => {
                    set.insert(value);
                }
                None if !set.unrecognized.iter().any(|existing| existing == token) => {
                    set.unrecognized.push(token.to_string());
                }
                None => {}
            }
        }
        set
    }

    /// Add `value` at the end; returns `false` when already present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.contains(value) {
            return false;
        }
        self.values.push(value);
        true
    }

    /// Remove `value` if present, keeping the order of the rest.
    pub fn remove(&mut self, value: T) -> bool {
        let before = self.values.len();
        self.values.retain(|existing| *existing != value);
        self.values.len() != before
    }

    /// Remove when present, otherwise append. Returns `true` if now selected.
    pub fn toggle(&mut self, value: T) -> bool {
        if self.remove(value) {
            false
        } else {
            self.values.push(value);
            true
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.values.contains(&value)
    }

    /// An empty set places no restriction on its facet.
    pub fn admits(&self, value: T) -> bool {
        self.is_empty() || self.contains(value)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.unrecognized.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len() + self.unrecognized.len()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.unrecognized.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values.iter().copied()
    }

    /// Tokens that did not parse, in arrival order.
    pub fn unrecognized(&self) -> &[String] {
        &self.unrecognized
    }

    fn tokens(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .map(|value| value.as_str())
            .chain(self.unrecognized.iter().map(String::as_str))
    }

    /// Comma-joined tokens: typed values in insertion order, then unrecognized ones.
    pub fn joined(&self) -> String {
        self.tokens().collect::<Vec<_>>().join(",")
    }
}

impl<T: FacetToken> Serialize for FacetSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.tokens())
    }
}

/// Category restriction. `All` is the "All Topics" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
    /// A category name outside the enumeration; matches no course.
    Unrecognized(String),
}

impl CategoryFilter {
    /// Blank input and the sentinel (any case) mean no restriction.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_TOPICS) {
            return Self::All;
        }
        match Category::parse_token(trimmed) {
            Some(category) => Self::Only(category),
            None => Self::Unrecognized(trimmed.to_string()),
        }
    }

    pub fn admits(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => *selected == category,
            Self::Unrecognized(_) => false,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The selected category when it is one of the known ones.
    pub fn selected(&self) -> Option<Category> {
        match self {
            Self::Only(category) => Some(*category),
            Self::All | Self::Unrecognized(_) => None,
        }
    }

    /// Value carried in the query string; `None` for the sentinel.
    pub fn query_value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(category.as_str()),
            Self::Unrecognized(raw) => Some(raw.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        self.query_value().unwrap_or(ALL_TOPICS)
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(category: Option<Category>) -> Self {
        category.map_or(Self::All, Self::Only)
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Multi-select facet dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetKind {
    Level,
    Type,
    Price,
}

impl FacetKind {
    pub const ALL: [FacetKind; 3] = [FacetKind::Level, FacetKind::Type, FacetKind::Price];

    /// Query-string key that carries this facet.
    pub fn query_key(self) -> &'static str {
        match self {
            Self::Level => QUERY_KEY_LEVELS,
            Self::Type => QUERY_KEY_TYPES,
            Self::Price => QUERY_KEY_PRICES,
        }
    }

    /// Resolve a facet from its query key or a singular alias (`level`, `type`, `price`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "levels" | "level" => Some(Self::Level),
            "types" | "type" => Some(Self::Type),
            "prices" | "price" => Some(Self::Price),
            _ => None,
        }
    }

    /// Canonical tokens this facet accepts.
    pub fn tokens(self) -> Vec<&'static str> {
        match self {
            Self::Level => Level::ALL.iter().map(|value| value.as_str()).collect(),
            Self::Type => CourseType::ALL.iter().map(|value| value.as_str()).collect(),
            Self::Price => PriceType::ALL.iter().map(|value| value.as_str()).collect(),
        }
    }

    /// Parse a token belonging to this facet.
    pub fn value(self, token: &str) -> Option<FacetValue> {
        match self {
            Self::Level => Level::parse_token(token).map(FacetValue::Level),
            Self::Type => CourseType::parse_token(token).map(FacetValue::Type),
            Self::Price => PriceType::parse_token(token).map(FacetValue::Price),
        }
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_key())
    }
}

/// A single facet selection, as produced by a checkbox toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetValue {
    Level(Level),
    Type(CourseType),
    Price(PriceType),
}

impl FacetValue {
    pub fn kind(self) -> FacetKind {
        match self {
            Self::Level(_) => FacetKind::Level,
            Self::Type(_) => FacetKind::Type,
            Self::Price(_) => FacetKind::Price,
        }
    }
}

/// The authoritative explore filter.
///
/// `page` is 1-based and is
/// never clamped against the result count here; clamping happens when a page
/// is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub search_term: String,
    pub category: CategoryFilter,
    pub levels: FacetSet<Level>,
    pub types: FacetSet<CourseType>,
    pub prices: FacetSet<PriceType>,
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: CategoryFilter::All,
            levels: FacetSet::default(),
            types: FacetSet::default(),
            prices: FacetSet::default(),
            page: 1,
        }
    }
}

impl FilterState {
    /// Display label for the active category, including the sentinel.
    pub fn category_label(&self) -> &str {
        self.category.label()
    }

    /// `true` when no clause restricts the result set.
    pub fn is_unrestricted(&self) -> bool {
        self.search_term.is_empty()
            && self.category.is_all()
            && self.levels.is_empty()
            && self.types.is_empty()
            && self.prices.is_empty()
    }

    /// Flip a facet selection. Returns `true` if the value is now selected.
    pub fn toggle_facet(&mut self, value: FacetValue) -> bool {
        match value {
            FacetValue::Level(level) => self.levels.toggle(level),
            FacetValue::Type(course_type) => self.types.toggle(course_type),
            FacetValue::Price(price) => self.prices.toggle(price),
        }
    }

    /// Whether the facet value is currently selected.
    pub fn facet_selected(&self, value: FacetValue) -> bool {
        match value {
            FacetValue::Level(level) => self.levels.contains(level),
            FacetValue::Type(course_type) => self.types.contains(course_type),
            FacetValue::Price(price) => self.prices.contains(price),
        }
    }

    /// Empty a whole facet dimension.
    pub fn clear_facet(&mut self, kind: FacetKind) {
        match kind {
            FacetKind::Level => self.levels.clear(),
            FacetKind::Type => self.types.clear(),
            FacetKind::Price => self.prices.clear(),
        }
    }

    /// Canonical comma-joined tokens for a facet dimension.
    pub fn facet_joined(&self, kind: FacetKind) -> String {
        match kind {
            FacetKind::Level => self.levels.joined(),
            FacetKind::Type => self.types.joined(),
            FacetKind::Price => self.prices.joined(),
        }
    }
}
