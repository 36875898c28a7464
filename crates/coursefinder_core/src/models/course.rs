//! Course records and the closed enumerations they are classified by.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of string tokens used in query strings and catalog data.
///
/// Every variant has exactly one canonical spelling; parsing also accepts
/// case-insensitive matches so hand-typed links still resolve.
pub trait FacetToken: Copy + Eq + fmt::Debug + 'static {
    /// Every variant in declaration order.
    const ALL: &'static [Self];

    /// Canonical spelling used in URLs and JSON.
    fn as_str(self) -> &'static str;

    /// Parse a token, returning `None` for values outside the enumeration.
    fn parse_token(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|value| value.as_str().eq_ignore_ascii_case(trimmed))
    }
}

/// Course subject area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "Cloud & DevOps")]
    CloudDevOps,
    #[serde(rename = "Cybersecurity")]
    Cybersecurity,
    #[serde(rename = "AI & Machine Learning")]
    MachineLearning,
    #[serde(rename = "UI/UX Design")]
    Design,
    #[serde(rename = "Business")]
    Business,
}

impl FacetToken for Category {
    const ALL: &'static [Self] = &[
        Self::WebDevelopment,
        Self::DataScience,
        Self::MobileDevelopment,
        Self::CloudDevOps,
        Self::Cybersecurity,
        Self::MachineLearning,
        Self::Design,
        Self::Business,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::WebDevelopment => "Web Development",
            Self::DataScience => "Data Science",
            Self::MobileDevelopment => "Mobile Development",
            Self::CloudDevOps => "Cloud & DevOps",
            Self::Cybersecurity => "Cybersecurity",
            Self::MachineLearning => "AI & Machine Learning",
            Self::Design => "UI/UX Design",
            Self::Business => "Business",
        }
    }
}

/// Course difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl FacetToken for Level {
    const ALL: &'static [Self] = &[Self::Beginner, Self::Intermediate, Self::Advanced];

    fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

/// Delivery format of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseType {
    Live,
    Recorded,
    #[serde(rename = "Career Path")]
    CareerPath,
}

impl FacetToken for CourseType {
    const ALL: &'static [Self] = &[Self::Live, Self::Recorded, Self::CareerPath];

    fn as_str(self) -> &'static str {
        match self {
            Self::Live => "Live",
            Self::Recorded => "Recorded",
            Self::CareerPath => "Career Path",
        }
    }
}

/// Whether enrollment costs money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceType {
    Paid,
    Free,
}

impl FacetToken for PriceType {
    const ALL: &'static [Self] = &[Self::Paid, Self::Free];

    fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Free => "Free",
        }
    }
}

macro_rules! display_as_token {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

display_as_token!(Category, Level, CourseType, PriceType);

/// Catalog entry as supplied by the external data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Category,
    pub level: Level,
    #[serde(rename = "type")]
    pub course_type: CourseType,
    pub price_type: PriceType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_token_accepts_canonical_and_case_insensitive_spellings() {
        assert_eq!(Level::parse_token("Beginner"), Some(Level::Beginner));
        assert_eq!(Level::parse_token(" advanced "), Some(Level::Advanced));
        assert_eq!(
            CourseType::parse_token("career path"),
            Some(CourseType::CareerPath)
        );
        assert_eq!(
            Category::parse_token("Cloud & DevOps"),
            Some(Category::CloudDevOps)
        );
        assert_eq!(PriceType::parse_token("Expensive"), None);
        assert_eq!(Level::parse_token(""), None);
    }

    #[test]
    fn serde_spelling_matches_canonical_tokens() {
        for category in Category::ALL {
            let json = serde_json::to_string(category).expect("serialize");
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
        for course_type in CourseType::ALL {
            let json = serde_json::to_string(course_type).expect("serialize");
            assert_eq!(json, format!("\"{}\"", course_type.as_str()));
        }
    }

    #[test]
    fn course_deserializes_from_catalog_field_names() {
        let course: Course = serde_json::from_str(
            r#"{
                "slug": "react-basics",
                "title": "React Basics",
                "description": "Components and hooks",
                "tags": ["react", "frontend"],
                "category": "Web Development",
                "level": "Beginner",
                "type": "Career Path",
                "priceType": "Free"
            }"#,
        )
        .expect("course json");
        assert_eq!(course.slug, "react-basics");
        assert_eq!(course.category, Category::WebDevelopment);
        assert_eq!(course.course_type, CourseType::CareerPath);
        assert_eq!(course.price_type, PriceType::Free);
        assert_eq!(course.tags, vec!["react", "frontend"]);
    }
}
