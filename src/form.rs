use crate::editor::{CodeEditor, EditorOptions};
use crate::models::{Snippet, parse_tags};

/// Single-line text field with a char-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the text and puts the cursor at the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Text before the cursor, used to place the terminal cursor
    pub fn before_cursor(&self) -> &str {
        &self.value[..self.byte_index(self.cursor)]
    }

    fn byte_index(&self, col: usize) -> usize {
        self.value
            .char_indices()
            .nth(col)
            .map(|(index, _)| index)
            .unwrap_or(self.value.len())
    }
}

/// The edit form: three text inputs and the code editor
#[derive(Debug, Clone)]
pub struct SnippetForm {
    pub title: TextInput,
    pub language: TextInput,
    pub tags: TextInput,
    pub code: CodeEditor,
}

impl SnippetForm {
    pub fn new(options: EditorOptions) -> Self {
        Self {
            title: TextInput::default(),
            language: TextInput::default(),
            tags: TextInput::default(),
            code: CodeEditor::new(options),
        }
    }

    /// Builds the snippet a save would store from the current field values.
    pub fn candidate(&self) -> Snippet {
        Snippet::new(
            self.title.value().trim(),
            self.language.value().trim(),
            parse_tags(self.tags.value()),
            self.code.get_value().trim(),
        )
    }

    pub fn populate(&mut self, snippet: &Snippet) {
        self.title.set_value(&snippet.title);
        self.language.set_value(&snippet.language);
        self.tags.set_value(&snippet.tags_text());
        self.code.set_value(&snippet.code);
        self.sync_mode();
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.language.clear();
        self.tags.clear();
        self.code.set_value("");
        self.sync_mode();
    }

    /// Points the editor's highlighting at the language field.
    pub fn sync_mode(&mut self) {
        let language = self.language.value().to_string();
        self.code.set_mode(&language);
    }

    pub fn is_empty(&self) -> bool {
        self.title.value().is_empty()
            && self.language.value().is_empty()
            && self.tags.value().is_empty()
            && self.code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_trims_fields_and_splits_tags() {
        let mut form = SnippetForm::new(EditorOptions::default());
        form.title.set_value("  Sum ");
        form.language.set_value("python ");
        form.tags.set_value("math, util,");
        form.code.set_value("\n  def s(a,b): return a+b\n\n");

        let snippet = form.candidate();
        assert_eq!(snippet.title, "Sum");
        assert_eq!(snippet.language, "python");
        assert_eq!(snippet.tags, vec!["math", "util", ""]);
        assert_eq!(snippet.code, "def s(a,b): return a+b");
    }

    #[test]
    fn populate_then_clear() {
        let mut form = SnippetForm::new(EditorOptions::default());
        let snippet = Snippet::new("Hello", "go", vec!["a".into(), "b".into()], "fmt.Println()");

        form.populate(&snippet);
        assert_eq!(form.title.value(), "Hello");
        assert_eq!(form.tags.value(), "a, b");
        assert_eq!(form.code.get_value(), "fmt.Println()");
        assert_eq!(form.code.mode(), "go");

        form.clear();
        assert!(form.is_empty());
        assert_eq!(form.code.mode(), "javascript");
    }

    #[test]
    fn text_input_edits_at_cursor() {
        let mut input = TextInput::default();
        input.set_value("pyton");
        input.move_left();
        input.move_left();
        input.insert_char('h');
        assert_eq!(input.value(), "python");
        assert_eq!(input.before_cursor(), "pyth");

        input.move_home();
        input.delete();
        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "ytho");
    }
}
