// src/wizard/steps.rs
//! Static form configuration: steps and their fields

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Textarea,
    Select,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormStep {
    pub step: u32,
    pub title: String,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Deserialize)]
struct StepsFile {
    steps: Vec<FormStep>,
}

impl FormField {
    fn new(label: &str, kind: FieldKind, required: bool, placeholder: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            kind,
            required,
            placeholder: placeholder.map(str::to_string),
            options: Vec::new(),
        }
    }

    fn select(label: &str, options: &[&str], required: bool) -> Self {
        Self {
            label: label.to_string(),
            kind: FieldKind::Select,
            required,
            placeholder: None,
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// Load steps from a TOML file (`[[steps]]` with `[[steps.fields]]`).
pub fn load_steps(path: &Path) -> Result<Vec<FormStep>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read steps file: {}", path.display()))?;
    parse_steps(&content).with_context(|| format!("Invalid steps file: {}", path.display()))
}

pub fn parse_steps(content: &str) -> Result<Vec<FormStep>> {
    let file: StepsFile = toml::from_str(content).context("Failed to parse TOML")?;
    validate_steps(&file.steps)?;
    Ok(file.steps)
}

pub fn validate_steps(steps: &[FormStep]) -> Result<()> {
    if steps.is_empty() {
        anyhow::bail!("At least one step is required");
    }
    for step in steps {
        if step.fields.is_empty() {
            anyhow::bail!("Step '{}' has no fields", step.title);
        }
        for field in &step.fields {
            if field.kind == FieldKind::Select && field.options.is_empty() {
                anyhow::bail!(
                    "Select field '{}' in step '{}' has no options",
                    field.label,
                    step.title
                );
            }
        }
    }
    Ok(())
}

/// The four-step "detailed input" form.
pub fn default_steps() -> Vec<FormStep> {
    use FieldKind::*;

    vec![
        FormStep {
            step: 1,
            title: "Personal Information".to_string(),
            fields: vec![
                FormField::new("Full Name", Text, true, Some("e.g., John Doe")),
                FormField::new("Email Address", Email, true, Some("e.g., johndoe@email.com")),
                FormField::new("Phone Number", Tel, false, Some("e.g., +1 234 567 8900")),
                FormField::new("Location", Text, false, Some("e.g., New York, USA")),
            ],
        },
        FormStep {
            step: 2,
            title: "Job Application Details".to_string(),
            fields: vec![
                FormField::new("Job Title Applying For", Text, true, Some("e.g., Software Engineer")),
                FormField::new("Company Name", Text, true, Some("e.g., OpenAI")),
                FormField::new(
                    "Why Do You Want This Role?",
                    Textarea,
                    true,
                    Some("Brief motivation (2-3 sentences)"),
                ),
            ],
        },
        FormStep {
            step: 3,
            title: "Professional Background".to_string(),
            fields: vec![
                FormField::new(
                    "Current Job Title / Status",
                    Text,
                    false,
                    Some("e.g., Junior Developer / Fresh Graduate"),
                ),
                FormField::new("Years of Experience", Number, false, Some("e.g., 3")),
                FormField::new("Education / Degree", Text, false, Some("e.g., B.S. in Computer Science")),
                FormField::new("Key Skills", Text, true, Some("e.g., JavaScript, React, SQL")),
            ],
        },
        FormStep {
            step: 4,
            title: "Extra Details".to_string(),
            fields: vec![
                FormField::new(
                    "Notable Achievements",
                    Textarea,
                    false,
                    Some("e.g., Increased sales by 30% in one year"),
                ),
                FormField::new("Referral / Connection", Text, false, Some("e.g., Referred by Jane Doe")),
                FormField::new(
                    "Availability / Start Date",
                    Text,
                    false,
                    Some("e.g., Immediately / 2 weeks notice"),
                ),
                FormField::select(
                    "Preferred Tone",
                    &["Formal", "Professional", "Enthusiastic", "Casual"],
                    true,
                ),
                FormField::new(
                    "Custom Closing Line",
                    Textarea,
                    false,
                    Some("e.g., I'd love the chance to discuss how my skills align with your goals."),
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_steps_are_valid() {
        let steps = default_steps();
        assert!(validate_steps(&steps).is_ok());
        assert_eq!(steps.len(), 4);
        assert_eq!(
            steps.iter().map(|s| s.fields.len()).collect::<Vec<_>>(),
            vec![4, 3, 4, 5]
        );
        let required: Vec<&str> = steps
            .iter()
            .flat_map(|s| s.fields.iter())
            .filter(|f| f.required)
            .map(|f| f.label.as_str())
            .collect();
        assert_eq!(
            required,
            vec![
                "Full Name",
                "Email Address",
                "Job Title Applying For",
                "Company Name",
                "Why Do You Want This Role?",
                "Key Skills",
                "Preferred Tone"
            ]
        );
    }

    #[test]
    fn test_parse_steps_from_toml() {
        let steps = parse_steps(
            r#"
[[steps]]
step = 1
title = "About you"

[[steps.fields]]
label = "Name"
type = "text"
required = true

[[steps.fields]]
label = "Tone"
type = "select"
options = ["Formal", "Casual"]
"#,
        )
        .unwrap();

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].fields[0].kind, FieldKind::Text);
        assert!(steps[0].fields[0].required);
        assert!(!steps[0].fields[1].required);
        assert_eq!(steps[0].fields[1].options, vec!["Formal", "Casual"]);
    }

    #[test]
    fn test_rejects_invalid_configurations() {
        assert!(parse_steps("steps = []").is_err());
        assert!(parse_steps(
            r#"
[[steps]]
step = 1
title = "Empty"
fields = []
"#
        )
        .is_err());
        assert!(parse_steps(
            r#"
[[steps]]
step = 1
title = "Tone"

[[steps.fields]]
label = "Tone"
type = "select"
"#
        )
        .is_err());
    }

    #[test]
    fn test_field_serializes_kind_as_type() {
        let json = serde_json::to_value(&default_steps()[0].fields[1]).unwrap();
        assert_eq!(json["type"], "email");
        assert_eq!(json["required"], true);
        assert!(json.get("options").is_none());
    }
}
