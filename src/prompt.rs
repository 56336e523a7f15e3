//! User input and interaction handling.
//! Every question the application asks goes through the [`Prompter`] trait so
//! the interactive terminal can be swapped out.

use crate::error::Result;
use dialoguer::{Confirm, Input, Select};

/// Trait for asking the user questions.
pub trait Prompter {
    /// Asks for free text, returning `default` when the user just presses enter.
    fn input(&self, prompt: &str, default: &str) -> Result<String>;

    /// Asks the user to pick one of `items`, returning the chosen index.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;

    /// Asks a yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Prompter backed by `dialoguer` on the current terminal.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        Ok(Select::new().with_prompt(prompt).default(default).items(items).interact()?)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new().with_prompt(prompt).default(default).interact()?)
    }
}
