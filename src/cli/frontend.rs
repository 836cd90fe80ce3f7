// src/cli/frontend.rs
//! Terminal front-end: drives the wizard and letter viewer over any reader/writer

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_log;
use crate::core::{ScrapeReply, ServiceClient};
use crate::letter::{Clipboard, GenerationOutcome, LetterViewer, PageLayout, DEFAULT_FILENAME};
use crate::scraping::JobPosting;
use crate::wizard::{Back, FieldKind, FormField, FormWizard, StepStatus, WizardError};

const EDIT_TERMINATOR: &str = ".";

pub struct Frontend<R, W> {
    input: R,
    output: W,
}

/// What the viewer loop should do after one command.
#[derive(Debug, PartialEq, Eq)]
enum ViewerCommand {
    Show,
    Edit,
    Copy,
    Download,
    Quit,
    Unknown,
}

impl ViewerCommand {
    fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "s" | "show" | "" => Self::Show,
            "e" | "edit" => Self::Edit,
            "c" | "copy" => Self::Copy,
            "d" | "download" => Self::Download,
            "q" | "quit" | "back" => Self::Quit,
            _ => Self::Unknown,
        }
    }
}

impl<R: BufRead, W: Write> Frontend<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// One trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    fn render_progress(&mut self, wizard: &FormWizard) -> Result<()> {
        let markers: Vec<String> = (0..wizard.steps().len())
            .map(|idx| match wizard.step_status(idx) {
                StepStatus::Done => "[✓]".to_string(),
                StepStatus::Current => format!("[{}]", idx + 1),
                StepStatus::Upcoming => format!(" {} ", idx + 1),
            })
            .collect();
        writeln!(self.output, "\n{}", markers.join("─"))?;
        writeln!(self.output, "{}", wizard.progress_label())?;
        Ok(())
    }

    /// Ask for one field. `None` means the input ended.
    fn ask_field(&mut self, field: &FormField, current: &str) -> Result<Option<String>> {
        let mut label = field.label.clone();
        if field.required {
            label.push('*');
        }

        if field.kind == FieldKind::Select {
            for (idx, option) in field.options.iter().enumerate() {
                writeln!(self.output, "  {}) {}", idx + 1, option)?;
            }
        }

        loop {
            let hint = match (current.is_empty(), &field.placeholder) {
                (false, _) => format!(" [{}]", current),
                (true, Some(placeholder)) => format!(" ({})", placeholder),
                (true, None) => String::new(),
            };
            let Some(answer) = self.prompt(&format!("{}{}: ", label, hint))? else {
                return Ok(None);
            };
            let answer = answer.trim();

            if answer.is_empty() {
                return Ok(Some(current.to_string()));
            }
            if field.kind != FieldKind::Select {
                return Ok(Some(answer.to_string()));
            }
            if let Some(option) = select_option(field, answer) {
                return Ok(Some(option));
            }
            writeln!(self.output, "Select an option between 1 and {}.", field.options.len())?;
        }
    }

    /// Walk the wizard. `Ok(None)` when the user backs out or input ends.
    pub fn run_wizard(&mut self, wizard: &mut FormWizard) -> Result<Option<BTreeMap<String, String>>> {
        loop {
            self.render_progress(wizard)?;

            let fields = wizard.current_step().fields.clone();
            for (idx, field) in fields.iter().enumerate() {
                let current = wizard.value(idx).to_string();
                let Some(value) = self.ask_field(field, &current)? else {
                    return Ok(None);
                };
                wizard.set_field(idx, value)?;
                if wizard.show_error(idx) {
                    writeln!(self.output, "  This field is required.")?;
                }
            }

            let actions = if wizard.is_last_step() {
                "[s]ubmit"
            } else {
                "[n]ext"
            };
            let back = if wizard.current_index() == 0 {
                "[b]ack"
            } else {
                "[p]revious"
            };
            let Some(action) = self.prompt(&format!("{} / {}: ", actions, back))? else {
                return Ok(None);
            };

            match action.trim().to_lowercase().as_str() {
                "b" | "back" | "p" | "previous" => {
                    if wizard.previous() == Back::Closed {
                        return Ok(None);
                    }
                }
                "s" | "submit" if wizard.is_last_step() => match wizard.submit() {
                    Ok(answers) => return Ok(Some(answers)),
                    Err(e) => writeln!(self.output, "{}", e)?,
                },
                "n" | "next" | "" if !wizard.is_last_step() => {
                    if let Err(e @ WizardError::StepIncomplete { .. }) = wizard.next() {
                        writeln!(self.output, "{}", e)?;
                    }
                }
                _ => writeln!(self.output, "Unknown action, staying on this step.")?,
            }
        }
    }

    pub fn show_generation(&mut self, viewer: &LetterViewer, outcome: &GenerationOutcome) -> Result<()> {
        writeln!(self.output, "\n== {} ==", viewer.heading())?;
        match outcome {
            GenerationOutcome::Letter(text) => writeln!(self.output, "{}", text)?,
            GenerationOutcome::Notice(message) => writeln!(self.output, "{}", message)?,
        }
        Ok(())
    }

    pub fn show_posting(&mut self, reply: Option<ScrapeReply>) -> Result<()> {
        match reply {
            Some(ScrapeReply::Posting(posting)) => self.render_posting(&posting),
            Some(ScrapeReply::Message(message)) => {
                writeln!(self.output, "{}", message)?;
                Ok(())
            }
            None => {
                writeln!(self.output, "No information found.")?;
                Ok(())
            }
        }
    }

    fn render_posting(&mut self, posting: &JobPosting) -> Result<()> {
        let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        writeln!(self.output, "Title:        {}", field(&posting.title))?;
        writeln!(self.output, "Company:      {}", field(&posting.company))?;
        writeln!(self.output, "Location:     {}", field(&posting.location))?;
        let description = if posting.has_description() {
            posting.description.as_str()
        } else {
            "-"
        };
        writeln!(self.output, "Description:  {}", description)?;
        writeln!(self.output, "Requirements: {}", field(&posting.requirements))?;
        Ok(())
    }

    /// Read lines until a lone `.`; `None` when input ends first.
    fn read_edit(&mut self) -> Result<Option<String>> {
        writeln!(
            self.output,
            "Enter the new letter. Finish with a line containing only '{}'.",
            EDIT_TERMINATOR
        )?;
        let mut lines = Vec::new();
        loop {
            match self.read_line()? {
                Some(line) if line.trim() == EDIT_TERMINATOR => return Ok(Some(lines.join("\n"))),
                Some(line) => lines.push(line),
                None => return Ok(None),
            }
        }
    }

    /// Interactive view/edit/copy/download loop over the current letter.
    pub fn run_viewer(
        &mut self,
        viewer: &mut LetterViewer,
        clipboard: &mut dyn Clipboard,
        layout: &PageLayout,
        output_dir: &Path,
    ) -> Result<()> {
        loop {
            let Some(line) = self.prompt("\n[s]how / [e]dit / [c]opy / [d]ownload / [q]uit: ")? else {
                return Ok(());
            };

            match ViewerCommand::parse(&line) {
                ViewerCommand::Show => match viewer.letter() {
                    Some(letter) => writeln!(self.output, "{}", letter)?,
                    None => writeln!(self.output, "No letter generated yet!")?,
                },
                ViewerCommand::Edit => {
                    if let Err(e) = viewer.begin_edit() {
                        writeln!(self.output, "{}", e)?;
                        continue;
                    }
                    match self.read_edit()? {
                        Some(text) => {
                            viewer.update_edit(text)?;
                            viewer.save_edit()?;
                            writeln!(self.output, "Saved.")?;
                        }
                        None => {
                            viewer.cancel_edit();
                            return Ok(());
                        }
                    }
                }
                ViewerCommand::Copy => match viewer.copy(clipboard, Instant::now()) {
                    Ok(()) if viewer.is_copied(Instant::now()) => writeln!(self.output, "Copied!")?,
                    Ok(()) => {}
                    Err(e) => {
                        app_log!(warn, "Copy failed: {:#}", e);
                        writeln!(self.output, "{}", e)?;
                    }
                },
                ViewerCommand::Download => match download(viewer, layout, output_dir) {
                    Ok(path) => writeln!(self.output, "Saved {}", path.display())?,
                    Err(e) => {
                        app_log!(warn, "Download failed: {:#}", e);
                        writeln!(self.output, "{}", e)?;
                    }
                },
                ViewerCommand::Quit => return Ok(()),
                ViewerCommand::Unknown => writeln!(self.output, "Unknown command.")?,
            }
        }
    }
}

/// Match a select answer by 1-based number or by option text (case-insensitive).
fn select_option(field: &FormField, answer: &str) -> Option<String> {
    if let Ok(number) = answer.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|idx| field.options.get(idx))
            .cloned();
    }
    field
        .options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(answer))
        .cloned()
}

fn download(viewer: &LetterViewer, layout: &PageLayout, output_dir: &Path) -> Result<PathBuf> {
    let bytes = viewer.export(layout)?;
    let path = output_dir.join(DEFAULT_FILENAME);
    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    app_log!(info, "Letter exported to {}", path.display());
    Ok(path)
}

/// Generate through the API and report the outcome.
pub async fn generate_letter(
    client: &ServiceClient,
    viewer: &mut LetterViewer,
    prompt: &str,
) -> GenerationOutcome {
    let result = client.generate(prompt).await;
    if let Err(e) = &result {
        app_log!(error, "Generation request failed: {:#}", e);
    }
    viewer.apply_generation(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letter::MemoryClipboard;
    use crate::scraping::NO_DESCRIPTION;
    use crate::wizard::default_steps;
    use std::io::Cursor;

    fn frontend(script: &str) -> Frontend<Cursor<Vec<u8>>, Vec<u8>> {
        Frontend::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn output_of(frontend: Frontend<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(frontend.into_output()).unwrap()
    }

    #[test]
    fn test_wizard_walkthrough_submits_answers() {
        let script = [
            // Step 1: name, email, phone, location; first attempt misses email
            "Ada Lovelace", "", "", "", "n",
            "", "ada@example.com", "", "London", "n",
            // Step 2
            "Backend Engineer", "Initech", "I enjoy building reliable systems.", "n",
            // Step 3
            "", "5", "", "Rust, SQL", "n",
            // Step 4: tone chosen by number
            "", "", "", "2", "", "s",
        ]
        .join("\n");

        let mut wizard = FormWizard::new(default_steps()).unwrap();
        let mut ui = frontend(&script);
        let answers = ui.run_wizard(&mut wizard).unwrap().unwrap();

        assert_eq!(answers["Full Name"], "Ada Lovelace");
        assert_eq!(answers["Email Address"], "ada@example.com");
        assert_eq!(answers["Location"], "London");
        assert_eq!(answers["Company Name"], "Initech");
        assert_eq!(answers["Years of Experience"], "5");
        assert_eq!(answers["Preferred Tone"], "Professional");

        let output = output_of(ui);
        assert!(output.contains("Required fields are empty: Email Address"));
        assert!(output.contains("Step 4 of 4: Extra Details"));
    }

    #[test]
    fn test_wizard_back_on_first_step_closes() {
        let script = ["", "", "", "", "b"].join("\n");
        let mut wizard = FormWizard::new(default_steps()).unwrap();
        let mut ui = frontend(&script);
        assert_eq!(ui.run_wizard(&mut wizard).unwrap(), None);
    }

    #[test]
    fn test_wizard_end_of_input_cancels() {
        let mut wizard = FormWizard::new(default_steps()).unwrap();
        let mut ui = frontend("Ada");
        assert_eq!(ui.run_wizard(&mut wizard).unwrap(), None);
    }

    #[test]
    fn test_select_option_matching() {
        let field = &default_steps()[3].fields[3];
        assert_eq!(select_option(field, "1").as_deref(), Some("Formal"));
        assert_eq!(select_option(field, "casual").as_deref(), Some("Casual"));
        assert_eq!(select_option(field, "0"), None);
        assert_eq!(select_option(field, "9"), None);
        assert_eq!(select_option(field, "Sarcastic"), None);
    }

    #[test]
    fn test_viewer_edit_copy_and_download() {
        let dir = std::env::temp_dir().join(format!("coverly-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut viewer = LetterViewer::new();
        viewer.apply_generation(Ok(Some("First draft".into())));
        let mut clipboard = MemoryClipboard::default();

        let script = ["e", "Dear team,", "", "Regards", ".", "c", "d", "q"].join("\n");
        let mut ui = frontend(&script);
        ui.run_viewer(&mut viewer, &mut clipboard, &PageLayout::default(), &dir)
            .unwrap();

        assert_eq!(viewer.letter(), Some("Dear team,\n\nRegards"));
        assert_eq!(clipboard.contents.as_deref(), Some("Dear team,\n\nRegards"));
        let pdf = std::fs::read(dir.join(DEFAULT_FILENAME)).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let output = output_of(ui);
        assert!(output.contains("Copied!"));
        assert!(output.contains("Saved."));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_viewer_without_letter_reports_errors() {
        let mut viewer = LetterViewer::new();
        let mut clipboard = MemoryClipboard::default();
        let mut ui = frontend("s\ne\nc\nq");
        ui.run_viewer(
            &mut viewer,
            &mut clipboard,
            &PageLayout::default(),
            &std::env::temp_dir(),
        )
        .unwrap();

        let output = output_of(ui);
        assert!(output.contains("No letter generated yet!"));
        assert!(output.contains("No letter to edit"));
        assert!(output.contains("No letter to copy"));
    }

    #[test]
    fn test_show_posting_variants() {
        let mut ui = frontend("");
        ui.show_posting(Some(ScrapeReply::Posting(JobPosting::from_fields(
            "Engineer".into(),
            String::new(),
            "Remote".into(),
            "Build things".into(),
            String::new(),
        ))))
        .unwrap();
        ui.show_posting(Some(ScrapeReply::Message("Invalid URL".into())))
            .unwrap();
        ui.show_posting(None).unwrap();
        ui.show_posting(Some(ScrapeReply::Posting(JobPosting::from_fields(
            "Designer".into(),
            "Globex".into(),
            String::new(),
            String::new(),
            String::new(),
        ))))
        .unwrap();

        let output = output_of(ui);
        assert!(output.contains("Title:        Engineer"));
        assert!(output.contains("Company:      -"));
        assert!(output.contains("Invalid URL"));
        assert!(output.contains("No information found."));
        assert!(output.contains("Description:  Build things"));
        assert!(output.contains("Description:  -"));
        assert!(!output.contains(NO_DESCRIPTION));
    }
}
