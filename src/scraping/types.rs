// src/scraping/types.rs
use serde::{Deserialize, Serialize};

pub const NO_DESCRIPTION: &str = "No description found";

/// Structured result of scraping one job-listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    /// Never empty: falls back to [`NO_DESCRIPTION`].
    pub description: String,
    pub requirements: Option<String>,
}

impl JobPosting {
    /// Build a posting from cleaned field text, mapping empty strings to `None`.
    pub fn from_fields(
        title: String,
        company: String,
        location: String,
        description: String,
        requirements: String,
    ) -> Self {
        fn non_empty(value: String) -> Option<String> {
            (!value.is_empty()).then_some(value)
        }

        Self {
            title: non_empty(title),
            company: non_empty(company),
            location: non_empty(location),
            description: non_empty(description).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            requirements: non_empty(requirements),
        }
    }

    pub fn has_description(&self) -> bool {
        self.description != NO_DESCRIPTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_become_none() {
        let posting = JobPosting::from_fields(
            "Rust Engineer".into(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        );
        assert_eq!(posting.title.as_deref(), Some("Rust Engineer"));
        assert!(posting.company.is_none());
        assert!(posting.location.is_none());
        assert!(posting.requirements.is_none());
        assert_eq!(posting.description, NO_DESCRIPTION);
        assert!(!posting.has_description());
    }

    #[test]
    fn test_serializes_missing_fields_as_null() {
        let posting = JobPosting::from_fields(
            String::new(),
            "Acme".into(),
            String::new(),
            "Build tools".into(),
            String::new(),
        );
        let json = serde_json::to_value(&posting).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": null,
                "company": "Acme",
                "location": null,
                "description": "Build tools",
                "requirements": null
            })
        );
    }
}
