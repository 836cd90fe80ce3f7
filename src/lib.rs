// src/lib.rs
//! Cover letter studio: job-posting scraper service plus a terminal front-end
//! that drives the form wizard and letter viewer.

pub mod cli;
pub mod core;
pub mod letter;
pub mod logging;
pub mod scraping;
pub mod web;
pub mod wizard;

pub use scraping::{JobPosting, JobPostingExtractor};
pub use web::{build_rocket, start_web_server, AppState};

/// Crate-wide logging macro, a thin wrapper over the `tracing` level macros.
///
/// `app_log!(info, "Fetched {}", url)`
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}
