//! Line-editing prompts built on Reedline.

use std::borrow::Cow;
use std::io::{self, Write};

use nu_ansi_term::{Color, Style};
use reedline::{Prompt, PromptEditMode, PromptHistorySearch, Reedline, Signal};

use super::{choice_number, confirm_suffix, parse_yes_no, Prompter};
use crate::error::{Error, Result};

/// Coloured prompts with line editing. Ctrl-C / Ctrl-D count as cancelling.
pub struct RichPrompter {
    line_editor: Reedline,
}

impl RichPrompter {
    pub fn new() -> Self {
        Self {
            line_editor: Reedline::create(),
        }
    }

    /// Read one trimmed line; `None` when the user cancels.
    fn ask(&mut self, label: String) -> Result<Option<String>> {
        let prompt = LinePrompt { label };
        match self.line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => Ok(Some(line.trim().to_string())),
            Ok(_) => Ok(None),
            Err(e) => Err(Error::Cancelled(format!("prompt failed: {e}"))),
        }
    }

    fn say(&self, line: impl std::fmt::Display) {
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{line}");
    }
}

impl Default for RichPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for RichPrompter {
    fn select(&mut self, message: &str, choices: &[String]) -> Result<String> {
        if choices.is_empty() {
            return Err(Error::resolution("No options to select from"));
        }

        self.say(Style::new().bold().paint(message));
        for (idx, choice) in choices.iter().enumerate() {
            self.say(format!(
                "  {} {}",
                Color::Cyan.bold().paint(format!("{:>2})", idx + 1)),
                choice
            ));
        }

        loop {
            let Some(answer) = self.ask("choice".to_string())? else {
                return Err(Error::Cancelled("Selection cancelled".into()));
            };

            if let Some(n) = choice_number(&answer) {
                if (1..=choices.len()).contains(&n) {
                    return Ok(choices[n - 1].clone());
                }
            }
            if let Some(hit) = choices.iter().find(|c| **c == answer) {
                return Ok(hit.clone());
            }
            self.say(Color::Yellow.paint("Invalid selection, try again."));
        }
    }

    fn text(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        let default = default.unwrap_or("");
        let label = if default.is_empty() {
            message.to_string()
        } else {
            format!("{message} {}", Color::DarkGray.paint(format!("[{default}]")))
        };

        match self.ask(label)? {
            Some(answer) if !answer.is_empty() => Ok(answer),
            _ => Ok(default.to_string()),
        }
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let label = format!(
            "{message} {}",
            Color::DarkGray.paint(format!("({})", confirm_suffix(default)))
        );
        loop {
            let Some(answer) = self.ask(label.clone())? else {
                return Ok(default);
            };
            if answer.is_empty() {
                return Ok(default);
            }
            match parse_yes_no(&answer) {
                Some(v) => return Ok(v),
                None => self.say(Color::Yellow.paint("Please answer y or n.")),
            }
        }
    }
}

struct LinePrompt {
    label: String,
}

impl Prompt for LinePrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.label)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Owned(format!("{} ", Color::Green.bold().paint(":")))
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(": ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Owned(format!("(search: {}) ", history_search.term))
    }
}
