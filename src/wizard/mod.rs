// src/wizard/mod.rs
//! Multi-step detail form: configuration, state machine and prompt composition

pub mod prompt;
pub mod state;
pub mod steps;

pub use prompt::build_detail_prompt;
pub use state::{Back, FormWizard, StepStatus, WizardError};
pub use steps::{default_steps, load_steps, FieldKind, FormField, FormStep};

use anyhow::Result;
use std::path::Path;

/// Steps from `steps_file` when configured, otherwise the built-in form.
pub fn configured_steps(steps_file: Option<&Path>) -> Result<Vec<FormStep>> {
    match steps_file {
        Some(path) => load_steps(path),
        None => Ok(default_steps()),
    }
}
