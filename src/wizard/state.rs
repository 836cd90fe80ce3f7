// src/wizard/state.rs
//! In-memory state machine behind the multi-step form

use std::collections::{BTreeMap, HashMap, HashSet};

use super::steps::{validate_steps, FormField, FormStep};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Required fields are empty: {}", missing.join(", "))]
    StepIncomplete { missing: Vec<String> },
    #[error("Already on the last step")]
    LastStep,
    #[error("Submit is only available on the last step")]
    NotLastStep,
    #[error("No field {0} in the current step")]
    UnknownField(usize),
}

/// Result of `previous()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Back {
    Moved,
    /// Step 0: the wizard should close.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Current,
    Upcoming,
}

pub struct FormWizard {
    steps: Vec<FormStep>,
    current: usize,
    answers: HashMap<String, String>,
    touched: HashSet<String>,
}

fn field_key(step: usize, field: usize) -> String {
    format!("{}-{}", step, field)
}

fn is_blank(value: Option<&String>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

impl FormWizard {
    pub fn new(steps: Vec<FormStep>) -> anyhow::Result<Self> {
        validate_steps(&steps)?;

        let answers = steps
            .iter()
            .enumerate()
            .flat_map(|(s, step)| (0..step.fields.len()).map(move |f| (field_key(s, f), String::new())))
            .collect();

        Ok(Self {
            steps,
            current: 0,
            answers,
            touched: HashSet::new(),
        })
    }

    pub fn steps(&self) -> &[FormStep] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &FormStep {
        &self.steps[self.current]
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    pub fn value(&self, field_idx: usize) -> &str {
        self.answers
            .get(&field_key(self.current, field_idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    fn field(&self, field_idx: usize) -> Result<&FormField, WizardError> {
        self.current_step()
            .fields
            .get(field_idx)
            .ok_or(WizardError::UnknownField(field_idx))
    }

    /// Store a value for a field of the current step and mark it touched.
    pub fn set_field(&mut self, field_idx: usize, value: impl Into<String>) -> Result<(), WizardError> {
        self.field(field_idx)?;
        let key = field_key(self.current, field_idx);
        self.answers.insert(key.clone(), value.into());
        self.touched.insert(key);
        Ok(())
    }

    /// Mark a field touched without changing it (blur).
    pub fn touch(&mut self, field_idx: usize) -> Result<(), WizardError> {
        self.field(field_idx)?;
        self.touched.insert(field_key(self.current, field_idx));
        Ok(())
    }

    /// Required, touched and blank.
    pub fn show_error(&self, field_idx: usize) -> bool {
        let Ok(field) = self.field(field_idx) else {
            return false;
        };
        let key = field_key(self.current, field_idx);
        field.required && self.touched.contains(&key) && is_blank(self.answers.get(&key))
    }

    /// Labels of required fields in the current step that are still blank.
    pub fn missing_fields(&self) -> Vec<String> {
        self.current_step()
            .fields
            .iter()
            .enumerate()
            .filter(|(idx, field)| {
                field.required && is_blank(self.answers.get(&field_key(self.current, *idx)))
            })
            .map(|(_, field)| field.label.clone())
            .collect()
    }

    pub fn is_step_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    fn check_step(&self) -> Result<(), WizardError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(WizardError::StepIncomplete { missing })
        }
    }

    pub fn next(&mut self) -> Result<(), WizardError> {
        if self.is_last_step() {
            return Err(WizardError::LastStep);
        }
        self.check_step()?;
        self.current += 1;
        Ok(())
    }

    pub fn previous(&mut self) -> Back {
        if self.current == 0 {
            Back::Closed
        } else {
            self.current -= 1;
            Back::Moved
        }
    }

    /// All answers keyed by field label, available once the last step is valid.
    pub fn submit(&self) -> Result<BTreeMap<String, String>, WizardError> {
        if !self.is_last_step() {
            return Err(WizardError::NotLastStep);
        }
        self.check_step()?;

        Ok(self
            .steps
            .iter()
            .enumerate()
            .flat_map(|(s, step)| {
                step.fields.iter().enumerate().map(move |(f, field)| {
                    (
                        field.label.clone(),
                        self.answers.get(&field_key(s, f)).cloned().unwrap_or_default(),
                    )
                })
            })
            .collect())
    }

    pub fn step_status(&self, idx: usize) -> StepStatus {
        match idx.cmp(&self.current) {
            std::cmp::Ordering::Less => StepStatus::Done,
            std::cmp::Ordering::Equal => StepStatus::Current,
            std::cmp::Ordering::Greater => StepStatus::Upcoming,
        }
    }

    pub fn progress_label(&self) -> String {
        format!(
            "Step {} of {}: {}",
            self.current + 1,
            self.steps.len(),
            self.current_step().title
        )
    }
}
