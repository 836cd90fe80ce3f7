// src/scraping/mod.rs
pub mod cleanup;
pub mod extractor;
pub mod job_scraper;
pub mod types;

pub use cleanup::TextCleaner;
pub use extractor::JobPostingExtractor;
pub use job_scraper::{HttpPageFetcher, JobScraper, PageFetcher, ScrapeError};
pub use types::{JobPosting, NO_DESCRIPTION};
