// src/scraping/cleanup.rs
//! Text cleanup applied to every extracted field

use anyhow::{Context, Result};
use regex::Regex;

/// Site chrome and widget text that leaks into scraped fields.
pub const DEFAULT_BOILERPLATE: &[&str] = &[
    "Show more Show less",
    "Skip to content",
    "Menu",
    "Sign in",
    "Register",
    "Employer site",
    "Job search",
    "Profile",
    "Career advice",
    "Explore companies",
    "Community",
    "New",
    "Salary match",
    "Number of applicants",
    "Skills match",
    "Company profile",
    "COMPANY OVERVIEW",
    "Your application will include the following questions:",
];

pub const DESCRIPTION_LIMIT: usize = 2000;
pub const REQUIREMENTS_LIMIT: usize = 1000;

#[derive(Debug, Clone)]
pub struct TextCleaner {
    boilerplate: Regex,
    inline_css: Regex,
}

impl TextCleaner {
    /// Build a cleaner from the default phrases plus `extra_phrases`.
    pub fn new(extra_phrases: &[String]) -> Result<Self> {
        let mut phrases: Vec<&str> = DEFAULT_BOILERPLATE.to_vec();
        phrases.extend(
            extra_phrases
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty()),
        );
        // Longest first so "Company profile" wins over "Profile"
        phrases.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));
        phrases.dedup();

        let alternation = phrases
            .iter()
            .map(|p| phrase_pattern(p))
            .collect::<Vec<_>>()
            .join("|");

        let boilerplate = Regex::new(&format!("(?i)(?:{})", alternation))
            .context("Failed to compile boilerplate pattern")?;
        let inline_css =
            Regex::new(r"(?i)html,body\{.*?\}").context("Failed to compile CSS pattern")?;

        Ok(Self {
            boilerplate,
            inline_css,
        })
    }

    pub fn clean(&self, text: &str) -> String {
        let collapsed = collapse_whitespace(text);
        let without_phrases = self.boilerplate.replace_all(&collapsed, "");
        let without_css = self.inline_css.replace_all(&without_phrases, "");
        collapse_whitespace(&without_css)
    }
}

/// Whitespace-tolerant pattern for one phrase. Matches inside longer words
/// too: "Menus" loses its "Menu".
fn phrase_pattern(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// Collapse every whitespace run (newlines included) to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `limit` characters.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Remove `prefix` once from the start of `text`, then trim. Empty prefixes
/// and non-matching text are left alone.
pub fn strip_leading_once(text: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return text.to_string();
    }
    match text.strip_prefix(prefix) {
        Some(rest) => rest.trim().to_string(),
        None => text.to_string(),
    }
}
