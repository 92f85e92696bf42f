//! Keyboard mapping and the local copy of the input text
//!
//! Keystrokes are turned into full-text edits against a local buffer so fast typing
//! never builds on a state snapshot the controller has not published yet. The
//! controller reports every change of its text back through the value listener; the
//! buffer treats reports it did not send as commits and adopts them.

use std::collections::VecDeque;

use autosuggest_core::Key;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a keystroke asks the host to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the input text
    Edit(String),
    /// Forward a navigation key to the component
    Key(Key),
    Quit,
}

/// Map a key press against the current input text
pub fn map_key(key: KeyEvent, text: &str) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if ctrl => Some(Command::Quit),
        KeyCode::Char('u') if ctrl => Some(Command::Edit(String::new())),
        KeyCode::Char(c) if !ctrl => {
            let mut next = text.to_string();
            next.push(c);
            Some(Command::Edit(next))
        }
        KeyCode::Backspace => {
            let mut next = text.to_string();
            next.pop()?;
            Some(Command::Edit(next))
        }
        KeyCode::Down => Some(Command::Key(Key::ArrowDown)),
        KeyCode::Up => Some(Command::Key(Key::ArrowUp)),
        KeyCode::Enter => Some(Command::Key(Key::Enter)),
        _ => None,
    }
}

/// Input text as the user sees it
#[derive(Debug, Default)]
pub struct InputBuffer {
    text: String,
    unacknowledged: VecDeque<String>,
}

impl InputBuffer {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            text: initial.into(),
            unacknowledged: VecDeque::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Apply a local edit; returns the text to send when it changed anything
    pub fn edit(&mut self, next: String) -> Option<String> {
        if next == self.text {
            return None;
        }
        self.text = next.clone();
        self.unacknowledged.push_back(next.clone());
        Some(next)
    }

    /// Process a value reported by the component
    pub fn observe(&mut self, value: String) {
        if self.unacknowledged.front() == Some(&value) {
            self.unacknowledged.pop_front();
            return;
        }
        // A selection replaced the text; edits still in flight build on older text.
        self.unacknowledged.clear();
        self.text = value;
    }

    pub fn is_settled(&self) -> bool {
        self.unacknowledged.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_appends() {
        assert_eq!(
            map_key(press(KeyCode::Char('p')), "a"),
            Some(Command::Edit("ap".to_string()))
        );
    }

    #[test]
    fn test_backspace() {
        assert_eq!(
            map_key(press(KeyCode::Backspace), "ap"),
            Some(Command::Edit("a".to_string()))
        );
        assert_eq!(map_key(press(KeyCode::Backspace), ""), None);
    }

    #[test]
    fn test_navigation_and_quit() {
        assert_eq!(map_key(press(KeyCode::Down), ""), Some(Command::Key(Key::ArrowDown)));
        assert_eq!(map_key(press(KeyCode::Up), ""), Some(Command::Key(Key::ArrowUp)));
        assert_eq!(map_key(press(KeyCode::Enter), ""), Some(Command::Key(Key::Enter)));
        assert_eq!(map_key(press(KeyCode::Esc), "x"), Some(Command::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), "x"),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_ctrl_u_clears() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), "apple"),
            Some(Command::Edit(String::new()))
        );
    }

    #[test]
    fn test_echoes_do_not_rewind_fast_typing() {
        let mut buffer = InputBuffer::default();
        buffer.edit("a".to_string());
        buffer.edit("ap".to_string());

        buffer.observe("a".to_string());
        assert_eq!(buffer.text(), "ap");
        buffer.observe("ap".to_string());
        assert_eq!(buffer.text(), "ap");
        assert!(buffer.is_settled());
    }

    #[test]
    fn test_commit_replaces_text() {
        let mut buffer = InputBuffer::new("ap");
        buffer.observe("Apricot".to_string());
        assert_eq!(buffer.text(), "Apricot");
    }

    #[test]
    fn test_commit_discards_stale_edits() {
        let mut buffer = InputBuffer::new("ap");
        buffer.edit("apx".to_string());

        buffer.observe("Apple".to_string());
        assert_eq!(buffer.text(), "Apple");
        assert!(buffer.is_settled());
    }

    #[test]
    fn test_unchanged_edit_is_not_sent() {
        let mut buffer = InputBuffer::new("kiwi");
        assert_eq!(buffer.edit("kiwi".to_string()), None);
        assert_eq!(buffer.edit("kiw".to_string()), Some("kiw".to_string()));
    }
}
