//! Search query construction.

/// Default pattern for preference queries.
pub const DEFAULT_QUERY_TEMPLATE: &str = "refugee {term} {year}";

/// Builds a query string from a template with `{term}` and `{year}` placeholders.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    template: String,
    term: String,
    year: Option<i32>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_TEMPLATE)
    }
}

impl QueryBuilder {
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
            term: String::new(),
            year: None,
        }
    }

    /// Set the preference term.
    pub fn term(mut self, term: &str) -> Self {
        self.term = term.trim().to_string();
        self
    }

    /// Set the year stamp.
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Build the final query string with runs of whitespace collapsed.
    pub fn build(&self) -> String {
        let year = self.year.map(|y| y.to_string()).unwrap_or_default();
        self.template
            .replace("{term}", &self.term)
            .replace("{year}", &year)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
