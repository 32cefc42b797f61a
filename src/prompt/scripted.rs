use std::collections::VecDeque;

use super::{parse_yes_no, Prompter};
use crate::error::{Error, Result};

/// Prompter that answers from a queue instead of a terminal.
///
/// Every question asked is recorded in [`ScriptedPrompter::asked`], so tests
/// can check both the answers flowing in and the prompts going out. Running
/// out of answers behaves like the user cancelling.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Messages of every prompt shown so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, message: &str) -> Option<String> {
        self.asked.push(message.to_string());
        self.answers.pop_front()
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, message: &str, choices: &[String]) -> Result<String> {
        if choices.is_empty() {
            return Err(Error::resolution("No options to select from"));
        }
        let Some(answer) = self.next(message) else {
            return Err(Error::Cancelled("Selection cancelled".into()));
        };
        if choices.contains(&answer) {
            Ok(answer)
        } else {
            Err(Error::Cancelled(format!(
                "scripted answer '{answer}' is not one of {choices:?}"
            )))
        }
    }

    fn text(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        let default = default.unwrap_or("");
        match self.next(message) {
            Some(answer) if !answer.trim().is_empty() => Ok(answer.trim().to_string()),
            _ => Ok(default.to_string()),
        }
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        Ok(self
            .next(message)
            .and_then(|a| parse_yes_no(&a))
            .unwrap_or(default))
    }
}
