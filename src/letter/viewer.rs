// src/letter/viewer.rs
//! Client-side letter state: view, edit, copy, export

use anyhow::Result;
use std::time::{Duration, Instant};

use super::clipboard::Clipboard;
use crate::core::ServiceRejection;
use super::export::{export_pdf, PageLayout};

pub const COPIED_INDICATOR: Duration = Duration::from_millis(1500);
pub const NO_OUTPUT: &str = "No output received";
pub const GENERATION_FAILED: &str = "Error generating letter.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewerError {
    #[error("No letter to {0}")]
    NoLetter(&'static str),
    #[error("Already editing")]
    AlreadyEditing,
    #[error("Not editing")]
    NotEditing,
}

/// Outcome of a generation call, as the viewer presents it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Letter(String),
    /// A failure message; the previous letter is kept.
    Notice(String),
}

#[derive(Debug, Default)]
pub struct LetterViewer {
    letter: Option<String>,
    edit_buffer: Option<String>,
    copied_at: Option<Instant>,
}

impl LetterViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn letter(&self) -> Option<&str> {
        self.letter.as_deref()
    }

    pub fn heading(&self) -> &'static str {
        if self.letter.is_some() {
            "Application Letter Generated"
        } else {
            "Waiting for Inspiration"
        }
    }

    /// Apply a generation result: `Ok(Some(text))` replaces the letter; an
    /// empty answer or a failure leaves it untouched. A message sent back by
    /// the service is shown as-is.
    pub fn apply_generation(&mut self, result: Result<Option<String>>) -> GenerationOutcome {
        match result {
            Ok(Some(text)) if !text.trim().is_empty() => {
                self.letter = Some(text.clone());
                self.edit_buffer = None;
                GenerationOutcome::Letter(text)
            }
            Ok(_) => GenerationOutcome::Notice(NO_OUTPUT.to_string()),
            Err(e) => GenerationOutcome::Notice(
                e.downcast_ref::<ServiceRejection>()
                    .map(|rejection| rejection.message.clone())
                    .unwrap_or_else(|| GENERATION_FAILED.to_string()),
            ),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit_buffer.is_some()
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        self.edit_buffer.as_deref()
    }

    pub fn begin_edit(&mut self) -> Result<(), ViewerError> {
        let letter = self.letter.as_ref().ok_or(ViewerError::NoLetter("edit"))?;
        if self.edit_buffer.is_some() {
            return Err(ViewerError::AlreadyEditing);
        }
        self.edit_buffer = Some(letter.clone());
        Ok(())
    }

    pub fn update_edit(&mut self, text: impl Into<String>) -> Result<(), ViewerError> {
        let buffer = self.edit_buffer.as_mut().ok_or(ViewerError::NotEditing)?;
        *buffer = text.into();
        Ok(())
    }

    pub fn save_edit(&mut self) -> Result<(), ViewerError> {
        let edited = self.edit_buffer.take().ok_or(ViewerError::NotEditing)?;
        self.letter = Some(edited);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer = None;
    }

    pub fn copy(&mut self, clipboard: &mut dyn Clipboard, now: Instant) -> Result<()> {
        let letter = self.letter.as_deref().ok_or(ViewerError::NoLetter("copy"))?;
        clipboard.write_text(letter)?;
        self.copied_at = Some(now);
        Ok(())
    }

    /// The "Copied!" indicator, visible for [`COPIED_INDICATOR`] after a copy.
    pub fn is_copied(&self, now: Instant) -> bool {
        self.letter.is_some()
            && self
                .copied_at
                .is_some_and(|at| now.saturating_duration_since(at) < COPIED_INDICATOR)
    }

    pub fn export(&self, layout: &PageLayout) -> Result<Vec<u8>> {
        let letter = self.letter.as_deref().ok_or(ViewerError::NoLetter("download"))?;
        export_pdf(letter, layout)
    }
}
