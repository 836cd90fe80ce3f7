// src/scraping/extractor.rs
//! Heuristic job-posting extraction from an arbitrary listing page

use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

use super::cleanup::{
    strip_leading_once, truncate_chars, TextCleaner, DESCRIPTION_LIMIT, REQUIREMENTS_LIMIT,
};
use super::types::JobPosting;

const TITLE_FALLBACK_SELECTOR: &str = "[class*='job-title'], [class*='topcard__title']";
const COMPANY_SELECTOR: &str =
    "[class*='company'], [class*='topcard__flavor'], [data-automation='jobCompany']";
const LOCATION_SELECTOR: &str =
    "[class*='location'], [class*='topcard__flavor--bullet'], [data-automation='jobLocation']";
const DESCRIPTION_SELECTOR: &str = "[class*='description__text'], \
     [class*='show-more-less-html__markup'], [data-automation='jobAdDetails']";
const REQUIREMENT_CLASS_SELECTOR: &str = "[class*='requirement'], [class*='qualification']";

const REQUIREMENT_MARKERS: &[&str] = &["Requirements", "Qualifications"];
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

const MIN_DESCRIPTION_CHARS: usize = 100;
const MIN_REQUIREMENTS_CHARS: usize = 30;

struct Selectors {
    heading: Selector,
    title_fallback: Selector,
    company: Selector,
    location: Selector,
    description: Selector,
    main: Selector,
    article: Selector,
    blocks: Selector,
    requirement_classes: Selector,
    list_item: Selector,
    list: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            heading: parse_selector("h1")?,
            title_fallback: parse_selector(TITLE_FALLBACK_SELECTOR)?,
            company: parse_selector(COMPANY_SELECTOR)?,
            location: parse_selector(LOCATION_SELECTOR)?,
            description: parse_selector(DESCRIPTION_SELECTOR)?,
            main: parse_selector("main")?,
            article: parse_selector("article")?,
            blocks: parse_selector("section, div")?,
            requirement_classes: parse_selector(REQUIREMENT_CLASS_SELECTOR)?,
            list_item: parse_selector("li")?,
            list: parse_selector("ul, ol")?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| anyhow::anyhow!("Invalid selector '{}': {:?}", selector, e))
}

/// Stateless extractor: holds only compiled selectors and the text cleaner,
/// so one instance is shared by every request.
pub struct JobPostingExtractor {
    selectors: Selectors,
    cleaner: TextCleaner,
}

impl JobPostingExtractor {
    pub fn new(cleaner: TextCleaner) -> Result<Self> {
        Ok(Self {
            selectors: Selectors::new()?,
            cleaner,
        })
    }

    pub fn extract(&self, html: &str) -> JobPosting {
        let document = Html::parse_document(html);

        let title = self.extract_title(&document);
        let company = first_text(&document, &self.selectors.company);
        let location = first_text(&document, &self.selectors.location);
        let requirements = self.extract_requirements(&document);
        let description = self.extract_description(&document);

        let title = self.cleaner.clean(&title);
        let company = self.cleaner.clean(&company);
        let location = self.cleaner.clean(&location);
        let description = truncate_chars(&self.cleaner.clean(&description), DESCRIPTION_LIMIT);
        let requirements =
            truncate_chars(&self.cleaner.clean(&requirements), REQUIREMENTS_LIMIT);

        let description = strip_leading_once(&description, &title);
        let description = strip_leading_once(&description, &company);

        JobPosting::from_fields(title, company, location, description, requirements)
    }

    fn extract_title(&self, document: &Html) -> String {
        let heading = first_text(document, &self.selectors.heading);
        if !heading.is_empty() {
            return heading;
        }
        first_text(document, &self.selectors.title_fallback)
    }

    fn extract_description(&self, document: &Html) -> String {
        let description = all_text(document, &self.selectors.description);
        if visible_len(&description) >= MIN_DESCRIPTION_CHARS {
            return description;
        }

        let mut fallback = all_text(document, &self.selectors.main);
        if visible_len(&fallback) == 0 {
            fallback = all_text(document, &self.selectors.article);
        }
        if visible_len(&fallback) >= MIN_DESCRIPTION_CHARS {
            return fallback;
        }

        self.largest_block(document)
    }

    /// Text of the `section`/`div` with the most visible characters. Ties keep
    /// the first block in document order.
    fn largest_block(&self, document: &Html) -> String {
        let mut largest = String::new();
        let mut largest_len = 0;

        for block in document.select(&self.selectors.blocks) {
            let text = element_text(block);
            let len = visible_len(&text);
            if len > largest_len {
                largest = text;
                largest_len = len;
            }
        }

        largest
    }

    fn extract_requirements(&self, document: &Html) -> String {
        let sections = self.marked_requirement_sections(document);
        let requirements = self.list_text(&sections);
        if visible_len(&requirements) >= MIN_REQUIREMENTS_CHARS {
            return requirements;
        }

        let classed: Vec<ElementRef<'_>> =
            document.select(&self.selectors.requirement_classes).collect();
        self.list_text(&classed)
    }

    /// Innermost `section`/`div` elements that mention a requirement marker and
    /// hold at least one list or list item.
    fn marked_requirement_sections<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        let candidates: Vec<ElementRef<'a>> = document
            .select(&self.selectors.blocks)
            .filter(|block| {
                block.select(&self.selectors.list).next().is_some()
                    || block.select(&self.selectors.list_item).next().is_some()
            })
            .filter(|block| {
                let text = element_text(*block);
                REQUIREMENT_MARKERS.iter().any(|marker| text.contains(marker))
            })
            .collect();

        candidates
            .iter()
            .filter(|block| {
                !candidates.iter().any(|other| {
                    other.id() != block.id() && other.ancestors().any(|a| a.id() == block.id())
                })
            })
            .copied()
            .collect()
    }

    /// List-item text inside `containers`, each item once, in document order.
    /// Containers without `li` contribute their `ul`/`ol` text instead.
    fn list_text(&self, containers: &[ElementRef<'_>]) -> String {
        let mut seen = HashSet::new();
        let mut parts = Vec::new();

        for container in containers {
            let mut items = container.select(&self.selectors.list_item).peekable();
            if items.peek().is_none() {
                for list in container.select(&self.selectors.list) {
                    if seen.insert(list.id()) {
                        parts.push(element_text(list));
                    }
                }
                continue;
            }
            for item in items {
                if seen.insert(item.id()) {
                    parts.push(element_text(item));
                }
            }
        }

        parts.join(" ")
    }
}

/// Visible text of an element: descendant text nodes joined by spaces,
/// skipping script and style content.
///
/// Nodes are always space-separated, unlike a plain concatenation:
/// `<li>Rust</li><li>Go</li>` reads "Rust Go", and `Hel<b>lo</b>` reads
/// "Hel lo". Whitespace is collapsed later by the cleaner.
fn element_text(element: ElementRef<'_>) -> String {
    let root = element.id();

    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .take_while(|ancestor| ancestor.id() != root)
                .any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|el| HIDDEN_TAGS.contains(&el.name()))
                });
            (!hidden).then_some(&**text)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(|el| element_text(el).trim().to_string())
        .unwrap_or_default()
}

fn all_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .map(element_text)
        .collect::<Vec<_>>()
        .join(" ")
}

fn visible_len(text: &str) -> usize {
    text.split_whitespace().map(|w| w.chars().count() + 1).sum::<usize>().saturating_sub(1)
}
