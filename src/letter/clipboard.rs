// src/letter/clipboard.rs
use anyhow::{Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Platform clipboard tools, tried in order.
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("clip", &[]),
];

/// System clipboard reached through the first available platform tool.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start {}", program))?;

        // Stdin is dropped before waiting so the tool sees EOF.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin
                .write_all(text.as_bytes())
                .with_context(|| format!("Failed to write to {}", program)),
            None => Err(anyhow::anyhow!("Clipboard process has no stdin")),
        };
        if written.is_err() {
            let _ = child.kill();
        }

        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for {}", program))?;
        written?;
        if !status.success() {
            anyhow::bail!("{} exited with {}", program, status);
        }
        Ok(())
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut last_error = None;
        for (program, args) in CLIPBOARD_COMMANDS {
            match Self::pipe_to(program, args, text) {
                Ok(()) => return Ok(()),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error
            .unwrap_or_else(|| anyhow::anyhow!("No clipboard tool available"))
            .context("Failed to copy to clipboard"))
    }
}

/// In-memory clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
