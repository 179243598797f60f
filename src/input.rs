//! Text inputs - editable value with a caret, used by the four request fields

/// One editable text field.
///
/// `cursor` is a byte offset into `value` and always sits on a char boundary.
/// Editing only takes effect while the input is focused.
#[derive(Clone, Debug, PartialEq)]
pub struct TextInput {
    value: String,
    cursor: usize,
    focused: bool,
    multiline: bool,
    char_limit: Option<usize>,
    placeholder: &'static str,
}

impl TextInput {
    pub fn single_line(placeholder: &'static str) -> Self {
        TextInput {
            value: String::new(),
            cursor: 0,
            focused: false,
            multiline: false,
            char_limit: None,
            placeholder,
        }
    }

    pub fn multi_line(placeholder: &'static str) -> Self {
        TextInput {
            multiline: true,
            ..Self::single_line(placeholder)
        }
    }

    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = Some(limit);
        self
    }

    /// Replace the value and move the caret to the end
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        let mut value = value.into();
        if !self.multiline {
            value.retain(|c| c != '\n');
        }
        if let Some(limit) = self.char_limit {
            if let Some((idx, _)) = value.char_indices().nth(limit) {
                value.truncate(idx);
            }
        }
        self.cursor = value.len();
        self.value = value;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Caret as (line, column) in chars, for placing the terminal cursor
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.value[..self.cursor];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        (line, before[line_start..].chars().count())
    }

    // ========================
    // Editing
    // ========================

    pub fn insert_char(&mut self, c: char) {
        if !self.focused || c == '\n' {
            return;
        }
        self.insert(c);
    }

    /// Multi-line inputs only
    pub fn insert_newline(&mut self) {
        if self.focused && self.multiline {
            self.insert('\n');
        }
    }

    fn insert(&mut self, c: char) {
        if let Some(limit) = self.char_limit {
            if self.value.chars().count() >= limit {
                return;
            }
        }
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if !self.focused || self.cursor == 0 {
            return;
        }
        let prev = self.prev_boundary();
        self.value.remove(prev);
        self.cursor = prev;
    }

    pub fn delete(&mut self) {
        if self.focused && self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if self.focused && self.cursor > 0 {
            self.cursor = self.prev_boundary();
        }
    }

    pub fn move_right(&mut self) {
        if self.focused && self.cursor < self.value.len() {
            self.cursor = self.next_boundary();
        }
    }

    pub fn move_home(&mut self) {
        if self.focused {
            self.cursor = self.line_start(self.cursor);
        }
    }

    pub fn move_end(&mut self) {
        if self.focused {
            self.cursor = self.line_end(self.cursor);
        }
    }

    pub fn move_up(&mut self) {
        if !self.focused || !self.multiline {
            return;
        }
        let start = self.line_start(self.cursor);
        if start == 0 {
            return;
        }
        let column = self.value[start..self.cursor].chars().count();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_in_line(prev_start, column);
    }

    pub fn move_down(&mut self) {
        if !self.focused || !self.multiline {
            return;
        }
        let end = self.line_end(self.cursor);
        if end == self.value.len() {
            return;
        }
        let column = self.value[self.line_start(self.cursor)..self.cursor]
            .chars()
            .count();
        self.cursor = self.offset_in_line(end + 1, column);
    }

    // ========================
    // Boundaries
    // ========================

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.value[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.value.len())
    }

    fn line_start(&self, pos: usize) -> usize {
        self.value[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.value[pos..]
            .find('\n')
            .map(|i| pos + i)
            .unwrap_or(self.value.len())
    }

    /// Byte offset of `column` chars into the line starting at `start`, clamped to the line end
    fn offset_in_line(&self, start: usize, column: usize) -> usize {
        let end = self.line_end(start);
        self.value[start..end]
            .char_indices()
            .nth(column)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focused(input: TextInput) -> TextInput {
        let mut input = input;
        input.focus();
        input
    }

    #[test]
    fn test_blurred_input_ignores_keystrokes() {
        let mut input = TextInput::single_line("").with_value("abc");
        input.insert_char('x');
        input.backspace();
        input.move_left();
        assert_eq!(input.value(), "abc");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_insert_and_backspace_at_cursor() {
        let mut input = focused(TextInput::single_line("").with_value("hllo"));
        input.move_home();
        input.move_right();
        input.insert_char('e');
        assert_eq!(input.value(), "hello");
        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "hell");
    }

    #[test]
    fn test_multibyte_cursor_movement() {
        let mut input = focused(TextInput::single_line("").with_value("añb"));
        input.move_left();
        input.move_left();
        assert_eq!(input.cursor(), 1);
        input.delete();
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn test_char_limit() {
        let mut input = focused(TextInput::single_line("").with_char_limit(3).with_value("GETX"));
        assert_eq!(input.value(), "GET");
        input.insert_char('S');
        assert_eq!(input.value(), "GET");
    }

    #[test]
    fn test_newline_only_in_multiline() {
        let mut single = focused(TextInput::single_line(""));
        single.insert_newline();
        single.insert_char('\n');
        assert_eq!(single.value(), "");

        let mut multi = focused(TextInput::multi_line(""));
        multi.insert_char('a');
        multi.insert_newline();
        multi.insert_char('b');
        assert_eq!(multi.value(), "a\nb");
        assert_eq!(multi.cursor_line_col(), (1, 1));
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut input = focused(TextInput::multi_line("").with_value("Accept: */*\nX: 1"));
        input.move_up();
        assert_eq!(input.cursor_line_col(), (0, 4));
        input.move_end();
        input.move_down();
        assert_eq!(input.cursor_line_col(), (1, 4));
        assert_eq!(input.cursor(), input.value().len());
    }
}
