//! Single-line text fields shared by the create and edit screens.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::theme::Theme;

/// A single-line input with a byte-offset cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    fn clamp_cursor(&mut self) {
        if self.cursor > self.value.len() {
            self.cursor = self.value.len();
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, c: char) {
        // Single-line field: newlines from a paste become spaces.
        let c = if c == '\n' || c == '\r' { ' ' } else { c };
        self.clamp_cursor();
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert_char(c);
        }
    }

    /// Delete the character before the cursor.
    pub fn delete_char(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let prev = self.value[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the word before the cursor (Ctrl+W).
    pub fn delete_word(&mut self) {
        self.clamp_cursor();
        let bytes = self.value.as_bytes();
        let mut end = self.cursor;
        while end > 0 && bytes[end - 1] == b' ' {
            end -= 1;
        }
        let mut start = end;
        while start > 0 && bytes[start - 1] != b' ' {
            start -= 1;
        }
        self.value.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Apply a text-editing action. Returns false if the action is not an edit.
    pub fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::CharInput(c) => self.insert_char(*c),
            Action::BackspaceInput => self.delete_char(),
            Action::DeleteWord => self.delete_word(),
            Action::PasteBulk(text) => self.insert_str(text),
            _ => return false,
        }
        true
    }
}

/// A labelled set of fields with one focused at a time.
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<(&'static str, TextInput)>,
    pub focused: usize,
}

impl Form {
    pub fn new(fields: Vec<(&'static str, TextInput)>) -> Self {
        Self { fields, focused: 0 }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|(_, input)| input.as_str())
            .unwrap_or("")
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Route navigation and text input to the focused field.
    /// Returns true if the action was consumed.
    pub fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::SwitchInputField | Action::ScrollDown | Action::Confirm => {
                self.focus_next();
                true
            }
            Action::ScrollUp => {
                self.focus_prev();
                true
            }
            _ => match self.fields.get_mut(self.focused) {
                Some((_, input)) => input.apply(action),
                None => false,
            },
        }
    }

    /// Render each field as a bordered one-line box stacked from the top of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, active: bool) {
        let mut y = area.y;
        for (i, (label, input)) in self.fields.iter().enumerate() {
            if y + 3 > area.y + area.height {
                break;
            }
            let focused = active && i == self.focused;
            let border = if focused { Theme::selected() } else { Theme::dim() };
            let block = Block::default()
                .title(format!(" {} ", label))
                .borders(Borders::ALL)
                .border_style(border);
            let mut spans = vec![Span::styled(input.as_str().to_string(), Theme::normal())];
            if focused {
                spans.push(Span::styled("\u{2588}", Theme::key_hint()));
            }
            let field_area = Rect::new(area.x, y, area.width, 3);
            frame.render_widget(Paragraph::new(Line::from(spans)).block(block), field_area);
            y += 3;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace() {
        let mut input = TextInput::default();
        for c in "Algebrx".chars() {
            input.insert_char(c);
        }
        input.delete_char();
        input.insert_char('a');
        assert_eq!(input.as_str(), "Algebra");
    }

    #[test]
    fn backspace_handles_multibyte_chars() {
        let mut input = TextInput::new("Größe");
        input.delete_char();
        input.delete_char();
        assert_eq!(input.as_str(), "Grö");
    }

    #[test]
    fn delete_word_removes_last_word_and_trailing_spaces() {
        let mut input = TextInput::new("Linear Algebra  ");
        input.delete_word();
        assert_eq!(input.as_str(), "Linear ");
    }

    #[test]
    fn pasted_newlines_become_spaces() {
        let mut input = TextInput::default();
        assert!(input.apply(&Action::PasteBulk("a\nb".into())));
        assert_eq!(input.as_str(), "a b");
    }

    #[test]
    fn focus_wraps_around() {
        let mut form = Form::new(vec![("A", TextInput::default()), ("B", TextInput::default())]);
        form.handle(&Action::SwitchInputField);
        assert_eq!(form.focused, 1);
        form.handle(&Action::SwitchInputField);
        assert_eq!(form.focused, 0);
        form.handle(&Action::ScrollUp);
        assert_eq!(form.focused, 1);
        form.handle(&Action::CharInput('x'));
        assert_eq!(form.value(1), "x");
        assert_eq!(form.value(0), "");
    }
}
