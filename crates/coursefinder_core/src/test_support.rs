//! Shared test-only helpers for coursefinder_core.

use crate::models::{Category, Course, CourseType, Level, PriceType};
use crate::Catalog;

/// Builds a beginner, recorded, free course with no tags.
pub(crate) fn course(slug: &str, title: &str, category: Category) -> Course {
    Course {
        slug: slug.to_string(),
        title: title.to_string(),
        description: String::new(),
        tags: Vec::new(),
        category,
        level: Level::Beginner,
        course_type: CourseType::Recorded,
        price_type: PriceType::Free,
    }
}

type Row = (
    &'static str,
    Category,
    Level,
    CourseType,
    PriceType,
    &'static [&'static str],
);

const ROWS: [Row; 20] = [
    ("React Fundamentals", Category::WebDevelopment, Level::Beginner, CourseType::Recorded, PriceType::Free, &["frontend", "certificate"]),
    ("Advanced React Patterns", Category::WebDevelopment, Level::Advanced, CourseType::Live, PriceType::Paid, &["frontend", "certificate"]),
    ("HTML & CSS from Scratch", Category::WebDevelopment, Level::Beginner, CourseType::Recorded, PriceType::Free, &["frontend", "certificate"]),
    ("Node.js APIs", Category::WebDevelopment, Level::Intermediate, CourseType::Recorded, PriceType::Paid, &["backend", "certificate"]),
    ("Full-Stack Web Career Track", Category::WebDevelopment, Level::Beginner, CourseType::CareerPath, PriceType::Paid, &["fullstack", "certificate"]),
    ("TypeScript in Practice", Category::WebDevelopment, Level::Intermediate, CourseType::Live, PriceType::Paid, &["typescript", "certificate"]),
    ("Web Performance Tuning", Category::WebDevelopment, Level::Advanced, CourseType::Recorded, PriceType::Paid, &["performance", "certificate"]),
    ("Accessible Web Forms", Category::WebDevelopment, Level::Intermediate, CourseType::Recorded, PriceType::Free, &["frontend", "certificate"]),
    ("Vue.js Essentials", Category::WebDevelopment, Level::Beginner, CourseType::Live, PriceType::Free, &["frontend", "certificate"]),
    ("Python for Data Analysis", Category::DataScience, Level::Beginner, CourseType::Recorded, PriceType::Free, &["python", "certificate"]),
    ("Statistics for Data Science", Category::DataScience, Level::Intermediate, CourseType::Live, PriceType::Paid, &["statistics", "certificate"]),
    ("Machine Learning Foundations", Category::MachineLearning, Level::Intermediate, CourseType::Recorded, PriceType::Paid, &["ml", "certificate"]),
    ("Deep Learning with PyTorch", Category::MachineLearning, Level::Advanced, CourseType::Live, PriceType::Paid, &["ml", "certificate"]),
    ("Swift for iOS", Category::MobileDevelopment, Level::Beginner, CourseType::Recorded, PriceType::Paid, &["ios", "certificate"]),
    ("Kotlin Android Apps", Category::MobileDevelopment, Level::Intermediate, CourseType::Recorded, PriceType::Paid, &["android", "certificate"]),
    ("Kubernetes Operations", Category::CloudDevOps, Level::Advanced, CourseType::Live, PriceType::Paid, &["containers"]),
    ("AWS Cloud Practitioner", Category::CloudDevOps, Level::Beginner, CourseType::Recorded, PriceType::Free, &["aws"]),
    ("Ethical Hacking Basics", Category::Cybersecurity, Level::Beginner, CourseType::Recorded, PriceType::Paid, &["security"]),
    ("Product Design Sprint", Category::Design, Level::Intermediate, CourseType::Live, PriceType::Free, &["figma"]),
    ("Startup Finance", Category::Business, Level::Beginner, CourseType::CareerPath, PriceType::Paid, &["finance"]),
];

/// Twenty-course fixture catalog.
///
/// Courses 1-9 are `Web Development`, exactly two titles contain "react",
/// and courses 1-15 carry the `certificate` tag.
pub(crate) fn sample_courses() -> Vec<Course> {
    ROWS.iter()
        .enumerate()
        .map(
            |(index, (title, category, level, course_type, price_type, tags))| Course {
                slug: format!("course-{:02}", index + 1),
                title: title.to_string(),
                description: format!("Hands-on lessons covering {}.", title.to_lowercase()),
                tags: tags.iter().map(|tag| tag.to_string()).collect(),
                category: *category,
                level: *level,
                course_type: *course_type,
                price_type: *price_type,
            },
        )
        .collect()
}

/// [`sample_courses`] wrapped in a validated [`Catalog`].
///
/// # Panics
/// Panics if the fixture violates catalog validation.
pub(crate) fn sample_catalog() -> Catalog {
    Catalog::from_courses(sample_courses()).expect("sample catalog")
}

/// Slugs of the given courses, for compact assertions.
pub(crate) fn slugs<'a, I>(courses: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Course>,
{
    courses.into_iter().map(|course| course.slug.as_str()).collect()
}
