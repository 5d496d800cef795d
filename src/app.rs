use crate::config::Config;
use crate::editor::EditorOptions;
use crate::error::SnippetError;
use crate::form::SnippetForm;
use crate::models::{FileStore, MemoryStore, SnippetRepository, SnippetSet};
use crate::ui;
use ratatui::Frame;

pub const SAVED_MESSAGE: &str = "Snippet saved successfully!";
pub const DELETED_MESSAGE: &str = "Snippet deleted successfully!";
pub const VALIDATION_MESSAGE: &str =
    "Please fill in all fields: Snippet Title, Language, and Code.";

/// Which pane receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Languages,
    Snippets,
    Title,
    Language,
    Tags,
    Code,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Languages,
        Focus::Snippets,
        Focus::Title,
        Focus::Language,
        Focus::Tags,
        Focus::Code,
    ];

    pub fn next(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// User actions handled by the controller.
///
/// Row arguments index the rendered snippet list, not the stored set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Save,
    Clear,
    Select(usize),
    Delete(usize),
    Filter(String),
    ShowAll,
}

/// Popup state: the snippet set, the derived views and the edit form.
///
/// Constructed once at startup and dropped on exit. Every mutation goes
/// through [`App::dispatch`].
#[derive(Debug)]
pub struct App {
    pub repository: SnippetRepository,
    pub snippets: SnippetSet,
    pub languages: Vec<String>,
    /// Positions in `snippets` of the rendered rows, in display order
    pub visible: Vec<usize>,
    pub active_filter: Option<String>,
    /// Set while the stored set cannot be read; saves and deletes are refused
    pub storage_unreadable: bool,
    pub form: SnippetForm,
    pub focus: Focus,
    pub selected_language: usize,
    pub selected_snippet: usize,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub show_help: bool,
    pub needs_redraw: bool,
}

impl App {
    pub fn new(repository: SnippetRepository, editor_options: EditorOptions) -> Self {
        let mut app = Self {
            repository,
            snippets: SnippetSet::new(),
            languages: Vec::new(),
            visible: Vec::new(),
            active_filter: None,
            storage_unreadable: false,
            form: SnippetForm::new(editor_options),
            focus: Focus::Title,
            selected_language: 0,
            selected_snippet: 0,
            error_message: None,
            success_message: None,
            show_help: false,
            needs_redraw: true,
        };

        app.reload();
        app
    }

    /// Opens the configured storage file. If it cannot be opened the popup
    /// still starts, backed by a session-only store, and says so.
    pub fn open(config: &Config) -> Self {
        let editor_options = EditorOptions::from(&config.editor);

        let store = config
            .storage_file()
            .map_err(|e| format!("{e:#}"))
            .and_then(|path| FileStore::open(path, config.quota()).map_err(|e| e.to_string()));

        match store {
            Ok(store) => {
                tracing::info!(path = %store.path().display(), "opened snippet storage");
                Self::new(SnippetRepository::new(Box::new(store)), editor_options)
            }
            Err(e) => {
                tracing::error!(error = %e, "storage unavailable, using in-memory store");
                let mut app = Self::new(
                    SnippetRepository::new(Box::new(MemoryStore::new())),
                    editor_options,
                );
                app.set_error_message(format!(
                    "Storage unavailable ({e}); snippets will not be kept after exit."
                ));
                app
            }
        }
    }

    /// Runs a command and reports its outcome through the notice fields.
    pub fn dispatch(&mut self, command: Command) {
        tracing::debug!(?command, "dispatch");

        match command {
            Command::Save => match self.save_snippet() {
                Ok(()) => self.report_success(SAVED_MESSAGE),
                Err(SnippetError::Validation { missing }) => {
                    tracing::debug!(?missing, "save rejected");
                    self.set_error_message(VALIDATION_MESSAGE.to_string());
                }
                Err(e) => {
                    tracing::error!(error = %e, "save failed");
                    self.set_error_message(format!("Snippet was not saved: {e}"));
                }
            },
            Command::Delete(row) => match self.delete_snippet(row) {
                Ok(()) => self.report_success(DELETED_MESSAGE),
                Err(SnippetError::IndexOutOfBounds { index, len }) => {
                    tracing::warn!(row, index, len, "delete ignored, row is not rendered");
                }
                Err(e) => {
                    tracing::error!(error = %e, "delete failed");
                    self.set_error_message(format!("Snippet was not deleted: {e}"));
                }
            },
            Command::Select(row) => self.select_snippet(row),
            Command::Filter(language) => self.apply_filter(Some(language)),
            Command::ShowAll => self.apply_filter(None),
            Command::Clear => {
                self.form.clear();
                self.clear_messages();
            }
        }

        self.needs_redraw = true;
    }

    /// A write followed by a failed reload keeps the reload's error notice.
    fn report_success(&mut self, message: &str) {
        if !self.storage_unreadable {
            self.set_success_message(message.to_string());
        }
    }

    fn ensure_writable(&self) -> Result<(), SnippetError> {
        if self.storage_unreadable {
            return Err(SnippetError::Unreadable);
        }
        Ok(())
    }

    fn save_snippet(&mut self) -> Result<(), SnippetError> {
        self.ensure_writable()?;
        let candidate = self.form.candidate();
        let updated = self.snippets.upsert(candidate)?;
        self.repository.save(&updated)?;

        self.form.clear();
        self.active_filter = None;
        self.reload();
        Ok(())
    }

    fn delete_snippet(&mut self, row: usize) -> Result<(), SnippetError> {
        let index = self.backing_index(row)?;
        self.ensure_writable()?;
        let updated = self.snippets.delete_at(index)?;
        self.repository.save(&updated)?;

        self.reload();
        Ok(())
    }

    fn select_snippet(&mut self, row: usize) {
        let snippet = self
            .backing_index(row)
            .ok()
            .and_then(|index| self.snippets.get(index).cloned());

        match snippet {
            Some(snippet) => {
                self.form.populate(&snippet);
                self.selected_snippet = row;
                self.clear_messages();
            }
            None => tracing::warn!(row, rows = self.visible.len(), "select ignored"),
        }
    }

    /// Maps a rendered row to its position in the stored set.
    fn backing_index(&self, row: usize) -> Result<usize, SnippetError> {
        self.visible
            .get(row)
            .copied()
            .ok_or(SnippetError::IndexOutOfBounds {
                index: row,
                len: self.visible.len(),
            })
    }

    /// Reloads the set from storage and rebuilds the derived views.
    /// A failed read is logged and shown, the set is treated as empty and
    /// writes are refused until a later reload succeeds.
    pub fn reload(&mut self) {
        self.storage_unreadable = false;
        self.snippets = match self.repository.load() {
            Ok(snippets) => snippets,
            Err(e) => {
                tracing::error!(error = %e, "failed to load snippets");
                self.storage_unreadable = true;
                self.set_error_message(format!("Could not load snippets: {e}"));
                SnippetSet::new()
            }
        };

        self.languages = self
            .snippets
            .languages()
            .into_iter()
            .map(String::from)
            .collect();
        self.selected_language = self
            .selected_language
            .min(self.languages.len().saturating_sub(1));

        // A filter on a language that no longer exists shows everything.
        let filter = self
            .active_filter
            .take()
            .filter(|language| self.languages.contains(language));
        self.apply_filter(filter);
    }

    fn apply_filter(&mut self, filter: Option<String>) {
        self.visible = match &filter {
            Some(language) => self.snippets.positions_for_language(language),
            None => (0..self.snippets.len()).collect(),
        };
        self.active_filter = filter;
        self.selected_snippet = self
            .selected_snippet
            .min(self.visible.len().saturating_sub(1));
    }

    /// Rendered rows in display order
    pub fn visible_snippets(&self) -> impl Iterator<Item = &crate::models::Snippet> {
        self.visible
            .iter()
            .filter_map(|index| self.snippets.get(*index))
    }

    pub fn next_snippet(&mut self) {
        if !self.visible.is_empty() {
            self.selected_snippet = (self.selected_snippet + 1) % self.visible.len();
            self.needs_redraw = true;
        }
    }

    pub fn previous_snippet(&mut self) {
        if !self.visible.is_empty() {
            self.selected_snippet = if self.selected_snippet > 0 {
                self.selected_snippet - 1
            } else {
                self.visible.len() - 1
            };
            self.needs_redraw = true;
        }
    }

    pub fn next_language(&mut self) {
        if !self.languages.is_empty() {
            self.selected_language = (self.selected_language + 1) % self.languages.len();
            self.needs_redraw = true;
        }
    }

    pub fn previous_language(&mut self) {
        if !self.languages.is_empty() {
            self.selected_language = if self.selected_language > 0 {
                self.selected_language - 1
            } else {
                self.languages.len() - 1
            };
            self.needs_redraw = true;
        }
    }

    pub fn highlighted_language(&self) -> Option<&str> {
        self.languages
            .get(self.selected_language)
            .map(String::as_str)
    }

    pub fn set_error_message(&mut self, message: String) {
        self.error_message = Some(message);
        self.success_message = None;
    }

    pub fn set_success_message(&mut self, message: String) {
        self.success_message = Some(message);
        self.error_message = None;
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
    }

    pub fn has_message(&self) -> bool {
        self.error_message.is_some() || self.success_message.is_some()
    }

    pub fn render(&mut self, frame: &mut Frame) {
        ui::popup::render(frame, self);
    }
}
