// Path prompt overlay
//
// The terminal's stand-in for the native file chooser: a one-line input for
// a filesystem path. Self-contained - it handles its own input and returns
// an action for the caller to execute. Esc (or Enter on an empty line) is
// the picker's cancel.

use crossterm::event::KeyCode;
use std::path::PathBuf;

/// Actions returned by prompt input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    /// Input consumed, keep the prompt open
    None,
    /// User cancelled the picker
    Cancel,
    /// User chose a path
    Choose(PathBuf),
}

/// One-line path input
#[derive(Debug, Default)]
pub struct PathPrompt {
    input: String,
}

impl PathPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input text (rendered by the UI)
    pub fn value(&self) -> &str {
        &self.input
    }

    /// Insert pasted text at the end of the input.
    pub fn insert_str(&mut self, s: &str) {
        self.input.push_str(s);
    }

    /// Handle a key press, returning the action for the caller.
    pub fn handle_input(&mut self, key: KeyCode) -> PromptAction {
        match key {
            KeyCode::Esc => PromptAction::Cancel,
            KeyCode::Enter => {
                let trimmed = self.input.trim();
                if trimmed.is_empty() {
                    PromptAction::Cancel
                } else {
                    PromptAction::Choose(PathBuf::from(trimmed))
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                PromptAction::None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                PromptAction::None
            }
            _ => PromptAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(prompt: &mut PathPrompt, s: &str) {
        for c in s.chars() {
            assert_eq!(prompt.handle_input(KeyCode::Char(c)), PromptAction::None);
        }
    }

    #[test]
    fn test_escape_cancels() {
        let mut prompt = PathPrompt::new();
        type_str(&mut prompt, "/tmp/a.pdf");
        assert_eq!(prompt.handle_input(KeyCode::Esc), PromptAction::Cancel);
    }

    #[test]
    fn test_enter_on_empty_input_cancels() {
        let mut prompt = PathPrompt::new();
        assert_eq!(prompt.handle_input(KeyCode::Enter), PromptAction::Cancel);
    }

    #[test]
    fn test_enter_chooses_trimmed_path() {
        let mut prompt = PathPrompt::new();
        type_str(&mut prompt, "  /tmp/report.pdf ");
        assert_eq!(
            prompt.handle_input(KeyCode::Enter),
            PromptAction::Choose(PathBuf::from("/tmp/report.pdf"))
        );
    }

    #[test]
    fn test_paste_appends() {
        let mut prompt = PathPrompt::new();
        type_str(&mut prompt, "/tmp/");
        prompt.insert_str("report.pdf");
        assert_eq!(prompt.value(), "/tmp/report.pdf");
    }

    #[test]
    fn test_backspace_edits() {
        let mut prompt = PathPrompt::new();
        type_str(&mut prompt, "/tmp/x");
        prompt.handle_input(KeyCode::Backspace);
        assert_eq!(prompt.value(), "/tmp/");
    }
}
