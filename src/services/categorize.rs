//! Keyword categorizer.

use crate::config::CategoryKeywords;
use crate::models::Category;
use crate::utils::{lowercase_all, matches_any};

/// Maps text to the first category whose keyword set matches.
///
/// Categories are checked in declaration order; `Other` when none match.
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<(Category, Vec<String>)>,
}

impl Categorizer {
    pub fn new(keywords: &CategoryKeywords) -> Self {
        let rules = vec![
            (Category::Employment, lowercase_all(&keywords.employment)),
            (Category::Training, lowercase_all(&keywords.training)),
            (Category::Scholarships, lowercase_all(&keywords.scholarships)),
            (Category::Courses, lowercase_all(&keywords.courses)),
            (Category::Support, lowercase_all(&keywords.support)),
        ];
        Self { rules }
    }

    pub fn categorize(&self, text: &str) -> Category {
        self.rules
            .iter()
            .find(|(_, words)| matches_any(text, words))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Other)
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(&CategoryKeywords::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_category_wins() {
        let categorizer = Categorizer::default();
        // "job" (Employment) outranks "training" (Training).
        assert_eq!(
            categorizer.categorize("Job training for newcomers"),
            Category::Employment
        );
        assert_eq!(
            categorizer.categorize("Vocational TRAINING"),
            Category::Training
        );
        assert_eq!(
            categorizer.categorize("Tuition waivers"),
            Category::Scholarships
        );
        assert_eq!(categorizer.categorize("Free English class"), Category::Courses);
        assert_eq!(categorizer.categorize("Legal aid clinic"), Category::Support);
    }

    #[test]
    fn unmatched_text_is_other() {
        let categorizer = Categorizer::default();
        assert_eq!(categorizer.categorize("About Us"), Category::Other);
        assert_eq!(categorizer.categorize(""), Category::Other);
    }

    #[test]
    fn categorize_is_deterministic() {
        let categorizer = Categorizer::default();
        let text = "Refugee Job Fair https://example.org/jobs/fair";
        let first = categorizer.categorize(text);
        for _ in 0..10 {
            assert_eq!(categorizer.categorize(text), first);
        }
        assert_eq!(first, Category::Employment);
    }

    #[test]
    fn custom_keywords_are_respected() {
        let keywords = CategoryKeywords {
            employment: vec![],
            training: vec![],
            scholarships: vec!["Bursary".to_string()],
            courses: vec![],
            support: vec![],
        };
        let categorizer = Categorizer::new(&keywords);
        assert_eq!(categorizer.categorize("bursary open"), Category::Scholarships);
        assert_eq!(categorizer.categorize("job"), Category::Other);
    }
}
