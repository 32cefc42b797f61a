//! Interactive prompts.
//!
//! Everything that asks the user a question goes through the [`Prompter`]
//! trait, so resolution and the wizard can be driven by a terminal, plain
//! stdin, or a scripted queue of answers in tests. Which variant runs is
//! decided once, in [`for_terminal`].

mod plain;
#[cfg(feature = "rich")]
mod rich;
mod scripted;

pub use plain::PlainPrompter;
#[cfg(feature = "rich")]
pub use rich::RichPrompter;
pub use scripted::ScriptedPrompter;

use crate::error::Result;

pub trait Prompter {
    /// Ask the user to pick one of `choices`.
    ///
    /// Returns the chosen string. Fails with `Error::Cancelled` if the user
    /// aborts.
    fn select(&mut self, message: &str, choices: &[String]) -> Result<String>;

    /// Free-form text. Empty input or cancellation yields `default`
    /// (or the empty string).
    fn text(&mut self, message: &str, default: Option<&str>) -> Result<String>;

    /// Yes/no question. Empty input or cancellation yields `default`.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;
}

/// The prompter for an interactive session.
///
/// `plain` forces stdin prompts even when line editing is compiled in.
/// Piped stdin always gets plain prompts.
pub fn for_terminal(plain: bool) -> Box<dyn Prompter> {
    #[cfg(feature = "rich")]
    {
        use std::io::IsTerminal;

        if !plain && std::io::stdin().is_terminal() {
            return Box::new(RichPrompter::new());
        }
    }
    #[cfg(not(feature = "rich"))]
    let _ = plain;

    Box::new(PlainPrompter::stdio())
}

/// Parse a yes/no answer; `None` for anything unrecognised.
pub(crate) fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// A 1-based choice typed as plain ASCII digits; signs and spaces are rejected.
pub(crate) fn choice_number(answer: &str) -> Option<usize> {
    if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    answer.parse().ok()
}

pub(crate) fn confirm_suffix(default: bool) -> &'static str {
    if default {
        "Y/n"
    } else {
        "y/N"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_no_is_case_insensitive() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no(" yes "), Some(true));
        assert_eq!(parse_yes_no("NO"), Some(false));
        assert_eq!(parse_yes_no("n"), Some(false));
        assert_eq!(parse_yes_no("yep"), None);
        assert_eq!(parse_yes_no(""), None);
    }

    #[test]
    fn choice_number_accepts_only_digits() {
        assert_eq!(choice_number("2"), Some(2));
        assert_eq!(choice_number("+2"), None);
        assert_eq!(choice_number("-1"), None);
        assert_eq!(choice_number(" 2"), None);
        assert_eq!(choice_number(""), None);
    }
}
