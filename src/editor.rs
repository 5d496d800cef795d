//! Code Editor Module
//!
//! A small multi-line text buffer used for the code field of the form. The
//! controller only treats it as a text source and sink through
//! [`CodeEditor::get_value`] and [`CodeEditor::set_value`]; the rest is
//! cursor handling for the key handlers and state for the renderer.

use crate::config::EditorConfig;

/// Construction time options, taken from the `[editor]` config section
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    /// Mode used when no language is known
    pub mode: String,
    pub line_numbers: bool,
    pub theme: String,
    pub tab_width: usize,
}

impl From<&EditorConfig> for EditorOptions {
    fn from(config: &EditorConfig) -> Self {
        Self {
            mode: config.mode.clone(),
            line_numbers: config.line_numbers,
            theme: config.theme.clone(),
            tab_width: config.tab_width.max(1),
        }
    }
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct CodeEditor {
    // Never empty: an empty buffer is one empty line.
    lines: Vec<String>,
    row: usize,
    col: usize,
    scroll: usize,
    mode: String,
    options: EditorOptions,
}

impl CodeEditor {
    pub fn new(options: EditorOptions) -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            scroll: 0,
            mode: options.mode.clone(),
            options,
        }
    }

    pub fn get_value(&self) -> String {
        self.lines.join("\n")
    }

    /// Replaces the whole buffer and moves the cursor to the start.
    pub fn set_value(&mut self, text: &str) {
        self.lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        self.row = 0;
        self.col = 0;
        self.scroll = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Switches highlighting to `language`, or back to the configured mode when blank.
    pub fn set_mode(&mut self, language: &str) {
        let language = language.trim();
        self.mode = if language.is_empty() {
            self.options.mode.clone()
        } else {
            language.to_lowercase()
        };
    }

    /// Cursor as (line, char column)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Adjusts the first visible line so the cursor stays inside `height` lines.
    pub fn ensure_cursor_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.row < self.scroll {
            self.scroll = self.row;
        } else if self.row >= self.scroll + height {
            self.scroll = self.row + 1 - height;
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        let line = &mut self.lines[self.row];
        let at = byte_index(line, self.col);
        line.insert(at, c);
        self.col += 1;
    }

    pub fn insert_tab(&mut self) {
        for _ in 0..self.options.tab_width {
            self.insert_char(' ');
        }
    }

    /// Splits the line at the cursor, carrying over its leading indentation.
    pub fn insert_newline(&mut self) {
        let line = &mut self.lines[self.row];
        let at = byte_index(line, self.col);
        let rest = line.split_off(at);

        let indent: String = line.chars().take_while(|c| *c == ' ' || *c == '\t').collect();
        let indent_len = indent.chars().count();

        self.lines.insert(self.row + 1, indent + &rest);
        self.row += 1;
        self.col = indent_len;
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let at = byte_index(line, self.col - 1);
            line.remove(at);
            self.col -= 1;
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = char_len(&self.lines[self.row]);
            self.lines[self.row].push_str(&current);
        }
    }

    pub fn delete(&mut self) {
        let len = char_len(&self.lines[self.row]);
        if self.col < len {
            let line = &mut self.lines[self.row];
            let at = byte_index(line, self.col);
            line.remove(at);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = char_len(&self.lines[self.row]);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < char_len(&self.lines[self.row]) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(char_len(&self.lines[self.row]));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(char_len(&self.lines[self.row]));
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = char_len(&self.lines[self.row]);
    }
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Byte offset of char column `col`, clamped to the end of the line.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(index, _)| index)
        .unwrap_or(line.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(text: &str) -> CodeEditor {
        let mut editor = CodeEditor::new(EditorOptions::default());
        editor.set_value(text);
        editor
    }

    fn type_str(editor: &mut CodeEditor, text: &str) {
        for c in text.chars() {
            editor.insert_char(c);
        }
    }

    #[test]
    fn set_value_round_trips_and_resets_cursor() {
        let mut editor = editor_with("fn main() {\n}\n");
        editor.move_down();
        assert_eq!(editor.get_value(), "fn main() {\n}\n");

        editor.set_value("x");
        assert_eq!(editor.cursor(), (0, 0));
        assert_eq!(editor.get_value(), "x");
    }

    #[test]
    fn default_options_enable_line_numbers_in_javascript_mode() {
        let editor = CodeEditor::new(EditorOptions::default());
        assert!(editor.options().line_numbers);
        assert_eq!(editor.mode(), "javascript");
        assert!(editor.is_empty());
    }

    #[test]
    fn typing_with_newline_keeps_indentation() {
        let mut editor = CodeEditor::new(EditorOptions::default());
        type_str(&mut editor, "if x:\n");
        editor.insert_tab();
        type_str(&mut editor, "pass\nend");

        assert_eq!(editor.get_value(), "if x:\n    pass\n    end");
        assert_eq!(editor.cursor(), (2, 7));
    }

    #[test]
    fn backspace_joins_lines() {
        let mut editor = editor_with("ab\ncd");
        editor.move_down();
        editor.backspace();

        assert_eq!(editor.get_value(), "abcd");
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn delete_at_line_end_joins_next_line() {
        let mut editor = editor_with("ab\ncd");
        editor.move_end();
        editor.delete();
        assert_eq!(editor.get_value(), "abcd");
    }

    #[test]
    fn edits_respect_multibyte_characters() {
        let mut editor = editor_with("héllo");
        editor.move_right();
        editor.move_right();
        editor.backspace();
        editor.insert_char('e');
        assert_eq!(editor.get_value(), "hello");
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut editor = editor_with("long line\nab");
        editor.move_end();
        editor.move_down();
        assert_eq!(editor.cursor(), (1, 2));
        editor.move_left();
        editor.move_left();
        editor.move_left();
        assert_eq!(editor.cursor(), (0, 9));
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut editor = editor_with("1\n2\n3\n4\n5");
        for _ in 0..4 {
            editor.move_down();
        }
        editor.ensure_cursor_visible(2);
        assert_eq!(editor.scroll(), 3);

        editor.set_value("1\n2");
        editor.ensure_cursor_visible(2);
        assert_eq!(editor.scroll(), 0);
    }

    #[test]
    fn blank_mode_falls_back_to_configured_mode() {
        let mut editor = CodeEditor::new(EditorOptions::default());
        editor.set_mode(" Python ");
        assert_eq!(editor.mode(), "python");
        editor.set_mode("  ");
        assert_eq!(editor.mode(), "javascript");
    }
}
