//! Opportunity categories.

use serde::{Deserialize, Serialize};

/// Category assigned to a candidate by the categorizer.
///
/// Declaration order is the categorizer's priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Employment,
    Training,
    Scholarships,
    Courses,
    Support,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employment => "Employment",
            Self::Training => "Training",
            Self::Scholarships => "Scholarships",
            Self::Courses => "Courses",
            Self::Support => "Support",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_bucket_names() {
        assert_eq!(Category::Employment.to_string(), "Employment");
        assert_eq!(Category::Other.to_string(), Category::Other.as_str());
    }
}
