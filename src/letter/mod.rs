// src/letter/mod.rs
pub mod clipboard;
pub mod export;
pub mod viewer;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use export::{export_pdf, PageLayout, DEFAULT_FILENAME};
pub use viewer::{GenerationOutcome, LetterViewer, ViewerError};
