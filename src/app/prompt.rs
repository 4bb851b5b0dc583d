//! User prompts for the publish flow.
//!
//! The flow needs exactly two questions: which local preset to publish, and
//! (on a name collision) what to call it.  [`TerminalPrompter`] asks them with
//! `dialoguer`; tests replay canned answers instead.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};

pub trait Prompter {
    /// Pick one entry from `items`.  `None` means the user cancelled.
    fn select_preset(&mut self, message: &str, items: &[String], default: usize)
        -> Result<Option<usize>>;

    /// Ask for a name, pre-filled with `initial`.  `None` or an empty answer
    /// means "keep the initial name".
    fn read_name(&mut self, message: &str, initial: &str) -> Result<Option<String>>;
}

/// Keyboard-driven prompts on the controlling terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn select_preset(
        &mut self,
        message: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>> {
        // Esc / q cancels.
        let choice = Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(default)
            .interact_opt()?;
        Ok(choice)
    }

    fn read_name(&mut self, message: &str, initial: &str) -> Result<Option<String>> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(message)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(answer).filter(|a| !a.trim().is_empty()))
    }
}

/// Replays pre-recorded answers and records the questions asked.
#[cfg(test)]
#[derive(Default)]
pub struct ScriptedPrompter {
    pub selections: std::collections::VecDeque<Option<usize>>,
    pub names: std::collections::VecDeque<Option<String>>,
    pub asked: Vec<String>,
    /// Default index offered by each selection prompt.
    pub defaults: Vec<usize>,
    /// Pre-filled text of each name prompt.
    pub initials: Vec<String>,
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn select_preset(
        &mut self,
        message: &str,
        _items: &[String],
        default: usize,
    ) -> Result<Option<usize>> {
        self.asked.push(message.to_string());
        self.defaults.push(default);
        Ok(self.selections.pop_front().flatten())
    }

    fn read_name(&mut self, message: &str, initial: &str) -> Result<Option<String>> {
        self.asked.push(message.to_string());
        self.initials.push(initial.to_string());
        Ok(self.names.pop_front().flatten())
    }
}
