// src/wizard/prompt.rs
use std::collections::BTreeMap;

/// Compose the generation prompt from submitted wizard answers (keyed by label).
pub fn build_detail_prompt(answers: &BTreeMap<String, String>) -> String {
    let get = |label: &str| answers.get(label).map(String::as_str).unwrap_or("");

    format!(
        "Generate a cover letter for the position of {} at {}.\n\
         Applicant: {}, Email: {}, Phone: {}, Location: {}.\n\
         Motivation: {}\n\
         Current Job: {}, Experience: {}, Education: {}, Skills: {}.\n\
         Achievements: {}, Referral: {}, Availability: {}, Tone: {}, Closing: {}",
        get("Job Title Applying For"),
        get("Company Name"),
        get("Full Name"),
        get("Email Address"),
        get("Phone Number"),
        get("Location"),
        get("Why Do You Want This Role?"),
        get("Current Job Title / Status"),
        get("Years of Experience"),
        get("Education / Degree"),
        get("Key Skills"),
        get("Notable Achievements"),
        get("Referral / Connection"),
        get("Availability / Start Date"),
        get("Preferred Tone"),
        get("Custom Closing Line"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_answers_and_blanks_missing() {
        let answers: BTreeMap<String, String> = [
            ("Job Title Applying For", "Backend Engineer"),
            ("Company Name", "Initech"),
            ("Full Name", "Ada Lovelace"),
            ("Preferred Tone", "Formal"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let prompt = build_detail_prompt(&answers);
        let lines: Vec<&str> = prompt.lines().collect();
        assert_eq!(
            lines[0],
            "Generate a cover letter for the position of Backend Engineer at Initech."
        );
        assert_eq!(
            lines[1],
            "Applicant: Ada Lovelace, Email: , Phone: , Location: ."
        );
        assert!(lines[4].contains("Tone: Formal, Closing: "));
        assert_eq!(lines.len(), 5);
    }
}
