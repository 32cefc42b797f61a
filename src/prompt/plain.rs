use std::io::{self, BufRead, Write};

use super::{choice_number, confirm_suffix, parse_yes_no, Prompter};
use crate::error::{Error, Result};

/// Line-based prompts over any reader/writer pair.
///
/// Prompts go to the writer (stderr for [`PlainPrompter::stdio`]) so stdout
/// stays clean for `--dry-run` output.
pub struct PlainPrompter<R, W> {
    input: R,
    output: W,
}

impl PlainPrompter<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> PlainPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}").map_err(prompt_io)?;
        self.output.flush().map_err(prompt_io)?;

        let mut line = String::new();
        let n = self.input.read_line(&mut line).map_err(prompt_io)?;
        if n == 0 {
            // Keep the terminal tidy when input ends mid-prompt.
            writeln!(self.output).map_err(prompt_io)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}").map_err(prompt_io)
    }
}

impl<R: BufRead, W: Write> Prompter for PlainPrompter<R, W> {
    fn select(&mut self, message: &str, choices: &[String]) -> Result<String> {
        if choices.is_empty() {
            return Err(Error::resolution("No options to select from"));
        }

        self.say(message)?;
        for (idx, choice) in choices.iter().enumerate() {
            self.say(&format!("{}. {}", idx + 1, choice))?;
        }

        loop {
            let Some(answer) = self.ask("Enter choice number: ")? else {
                return Err(Error::Cancelled("Selection cancelled".into()));
            };
            match choice_number(&answer) {
                Some(n) if (1..=choices.len()).contains(&n) => return Ok(choices[n - 1].clone()),
                _ => self.say("Invalid selection, try again.")?,
            }
        }
    }

    fn text(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        let default = default.unwrap_or("");
        let prompt = if default.is_empty() {
            format!("{message}: ")
        } else {
            format!("{message} [{default}]: ")
        };

        match self.ask(&prompt)? {
            Some(answer) if !answer.is_empty() => Ok(answer),
            _ => Ok(default.to_string()),
        }
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let prompt = format!("{message} ({}): ", confirm_suffix(default));
        loop {
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(default);
            };
            if answer.is_empty() {
                return Ok(default);
            }
            match parse_yes_no(&answer) {
                Some(v) => return Ok(v),
                None => self.say("Please answer y or n.")?,
            }
        }
    }
}

fn prompt_io(e: io::Error) -> Error {
    Error::Cancelled(format!("prompt failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> PlainPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        PlainPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn choices(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn select_reprompts_until_valid_number() {
        let mut p = prompter("0\nabc\n9\n2\n");
        let picked = p.select("Select environment", &choices(&["SIT", "UAT"])).unwrap();
        assert_eq!(picked, "UAT");

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.starts_with("Select environment\n1. SIT\n2. UAT\n"));
        assert_eq!(out.matches("Invalid selection, try again.").count(), 3);
    }

    #[test]
    fn select_rejects_signed_numbers() {
        let mut p = prompter("+2\n1\n");
        let picked = p.select("Select environment", &choices(&["SIT", "UAT"])).unwrap();
        assert_eq!(picked, "SIT");

        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out.matches("Invalid selection, try again.").count(), 1);
    }

    #[test]
    fn select_at_end_of_input_is_cancelled() {
        let mut p = prompter("");
        let err = p.select("Pick", &choices(&["a"])).unwrap_err();
        assert!(matches!(err, Error::Cancelled(_)));
    }

    #[test]
    fn select_without_choices_fails() {
        let mut p = prompter("1\n");
        assert!(p.select("Pick", &[]).is_err());
    }

    #[test]
    fn text_falls_back_to_default() {
        let mut p = prompter("\n  value  \n");
        assert_eq!(p.text("Port", Some("22")).unwrap(), "22");
        assert_eq!(p.text("Port", Some("22")).unwrap(), "value");
        assert_eq!(p.text("User", None).unwrap(), "");

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Port [22]: "));
        assert!(out.contains("User: "));
    }

    #[test]
    fn confirm_handles_defaults_and_retries() {
        let mut p = prompter("\nmaybe\nNO\n");
        assert!(p.confirm("Save?", true).unwrap());
        assert!(!p.confirm("Save?", true).unwrap());
        // End of input keeps the default.
        assert!(!p.confirm("Again?", false).unwrap());

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Save? (Y/n): "));
        assert!(out.contains("Please answer y or n."));
        assert!(out.contains("Again? (y/N): "));
    }
}
