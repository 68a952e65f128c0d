//! Input handling abstractions.
//!
//! Single-line text fields used by the activity entry and the email dialog.
//! Kept separate from `App` so editing rules can be tested
//! without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of feeding a key to a text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAction {
    /// The buffer changed.
    Edited,
    /// Enter was pressed.
    Submit,
    /// Esc was pressed.
    Cancel,
    /// The key is not a text editing key; the caller may handle it.
    Ignored,
}

/// A single-line, append-only text buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
}

impl TextField {
    /// Create an empty field.
    pub const fn new() -> Self {
        Self { value: String::new() }
    }

    /// Handle a key event.
    pub fn handle(&mut self, key: KeyEvent) -> FieldAction {
        match key.code {
            KeyCode::Enter => FieldAction::Submit,
            KeyCode::Esc => FieldAction::Cancel,
            KeyCode::Backspace => {
                if key.modifiers.contains(KeyModifiers::ALT) {
                    self.delete_word();
                } else {
                    self.value.pop();
                }
                FieldAction::Edited
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.clear();
                FieldAction::Edited
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.push(c);
                FieldAction::Edited
            }
            _ => FieldAction::Ignored,
        }
    }

    /// Append pasted text, dropping line breaks.
    pub fn paste(&mut self, text: &str) {
        self.value.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
    }

    fn delete_word(&mut self) {
        let trimmed = self.value.trim_end_matches(' ').len();
        self.value.truncate(trimmed);
        let cut = self.value.rfind(' ').map_or(0, |i| i + 1);
        self.value.truncate(cut);
    }

    /// Current contents.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Empty the field.
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Check if the field is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Text to draw, with tabs shown as spaces.
    pub fn display(&self) -> String {
        self.value.replace('\t', " ")
    }

    /// Width of the drawn text in terminal cells, for cursor placement.
    pub fn display_width(&self) -> usize {
        use unicode_width::UnicodeWidthStr;
        self.display().width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_str(field: &mut TextField, s: &str) {
        for c in s.chars() {
            field.handle(make_key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::new();
        type_str(&mut field, "Lunchx");
        assert_eq!(field.handle(make_key(KeyCode::Backspace)), FieldAction::Edited);
        assert_eq!(field.value(), "Lunch");
    }

    #[test]
    fn test_enter_and_esc_are_reported() {
        let mut field = TextField::new();
        assert_eq!(field.handle(make_key(KeyCode::Enter)), FieldAction::Submit);
        assert_eq!(field.handle(make_key(KeyCode::Esc)), FieldAction::Cancel);
        assert_eq!(field.handle(make_key(KeyCode::Up)), FieldAction::Ignored);
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut field = TextField::new();
        type_str(&mut field, "abc");
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(field.handle(ctrl_u), FieldAction::Edited);
        assert!(field.is_empty());
        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(field.handle(ctrl_x), FieldAction::Ignored);
        assert!(field.is_empty());
    }

    #[test]
    fn test_alt_backspace_deletes_word() {
        let mut field = TextField::new();
        type_str(&mut field, "Dinner at Luigi's ");
        field.handle(KeyEvent::new(KeyCode::Backspace, KeyModifiers::ALT));
        assert_eq!(field.value(), "Dinner at ");
    }

    #[test]
    fn test_paste_drops_line_breaks() {
        let mut field = TextField::new();
        field.paste("Din\r\nner\tout");
        assert_eq!(field.value(), "Dinner\tout");
        assert_eq!(field.display(), "Dinner out");
        assert_eq!(field.display_width(), 10);
        field.clear();
        assert!(field.is_empty());
    }
}
