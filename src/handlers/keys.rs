//! Keyboard Input Handling Module
//!
//! Translates terminal key events into focus changes, field edits and
//! controller [`Command`]s.

use crate::app::{App, Command, Focus};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Main keyboard event handler and dispatcher.
/// Returns true when the application should quit.
pub fn handle_key_events(key: KeyEvent, app: &mut App) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return true;
    }

    // A visible notice swallows the next key
    if app.has_message() {
        app.clear_messages();
        app.needs_redraw = true;
        return false;
    }

    if app.show_help {
        app.show_help = false;
        app.needs_redraw = true;
        return false;
    }

    if ctrl {
        match key.code {
            KeyCode::Char('s') => app.dispatch(Command::Save),
            KeyCode::Char('n') => app.dispatch(Command::Clear),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Tab => {
            if app.focus == Focus::Code {
                app.form.code.insert_tab();
            } else {
                app.focus = app.focus.next();
            }
            app.needs_redraw = true;
            return false;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.previous();
            app.needs_redraw = true;
            return false;
        }
        KeyCode::Esc => {
            app.focus = Focus::Snippets;
            app.needs_redraw = true;
            return false;
        }
        _ => {}
    }

    match app.focus {
        Focus::Languages => handle_language_keys(key, app),
        Focus::Snippets => handle_snippet_keys(key, app),
        Focus::Title | Focus::Language | Focus::Tags => {
            handle_input_keys(key, app);
            false
        }
        Focus::Code => {
            handle_editor_keys(key, app);
            false
        }
    }
}

/// Shared by both lists. Returns Some(quit) when the key was handled.
fn handle_list_common_keys(key: KeyEvent, app: &mut App) -> Option<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(true),
        KeyCode::Char('?') => {
            app.show_help = true;
            app.needs_redraw = true;
            Some(false)
        }
        KeyCode::Char('r') => {
            app.reload();
            app.needs_redraw = true;
            Some(false)
        }
        KeyCode::Char('a') => {
            app.dispatch(Command::ShowAll);
            Some(false)
        }
        KeyCode::Char('n') => {
            app.dispatch(Command::Clear);
            app.focus = Focus::Title;
            Some(false)
        }
        _ => None,
    }
}

fn handle_language_keys(key: KeyEvent, app: &mut App) -> bool {
    if let Some(quit) = handle_list_common_keys(key, app) {
        return quit;
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.next_language(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_language(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(language) = app.highlighted_language() {
                let language = language.to_string();
                app.dispatch(Command::Filter(language));
                app.focus = Focus::Snippets;
            }
        }
        _ => {}
    }
    false
}

fn handle_snippet_keys(key: KeyEvent, app: &mut App) -> bool {
    if let Some(quit) = handle_list_common_keys(key, app) {
        return quit;
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.next_snippet(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_snippet(),
        KeyCode::Enter | KeyCode::Char('e') => {
            app.dispatch(Command::Select(app.selected_snippet));
            if !app.form.is_empty() {
                app.focus = Focus::Code;
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            app.dispatch(Command::Delete(app.selected_snippet));
        }
        _ => {}
    }
    false
}

fn handle_input_keys(key: KeyEvent, app: &mut App) {
    let focus = app.focus;
    let input = match focus {
        Focus::Title => &mut app.form.title,
        Focus::Language => &mut app.form.language,
        _ => &mut app.form.tags,
    };

    match key.code {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Enter | KeyCode::Down => app.focus = focus.next(),
        KeyCode::Up => app.focus = focus.previous(),
        _ => return,
    }

    if focus == Focus::Language {
        app.form.sync_mode();
    }
    app.needs_redraw = true;
}

fn handle_editor_keys(key: KeyEvent, app: &mut App) {
    let editor = &mut app.form.code;

    match key.code {
        KeyCode::Char(c) => editor.insert_char(c),
        KeyCode::Enter => editor.insert_newline(),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Up => editor.move_up(),
        KeyCode::Down => editor.move_down(),
        KeyCode::Home => editor.move_home(),
        KeyCode::End => editor.move_end(),
        _ => return,
    }
    app.needs_redraw = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SAVED_MESSAGE;
    use crate::editor::EditorOptions;
    use crate::models::{MemoryStore, Snippet, SnippetRepository};

    fn app() -> App {
        App::new(
            SnippetRepository::new(Box::new(MemoryStore::new())),
            EditorOptions::default(),
        )
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), app)
    }

    fn ctrl(app: &mut App, c: char) -> bool {
        handle_key_events(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL), app)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_the_form_and_saving() {
        let mut app = app();
        assert_eq!(app.focus, Focus::Title);

        type_text(&mut app, "Sum");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "python");
        assert_eq!(app.form.code.mode(), "python");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "math");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::Code);
        type_text(&mut app, "def s(a,b):");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "return a+b");

        ctrl(&mut app, 's');

        assert_eq!(app.success_message.as_deref(), Some(SAVED_MESSAGE));
        assert_eq!(app.snippets.len(), 1);
        assert_eq!(app.snippets.get(0).unwrap().code, "def s(a,b):\nreturn a+b");
    }

    #[test]
    fn notice_swallows_next_key() {
        let mut app = app();
        ctrl(&mut app, 's');
        assert!(app.error_message.is_some());

        press(&mut app, KeyCode::Char('x'));
        assert!(!app.has_message());
        assert!(app.form.title.value().is_empty());
    }

    #[test]
    fn q_quits_from_lists_but_types_in_fields() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.form.title.value(), "q");

        press(&mut app, KeyCode::Esc);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = app();
        assert!(ctrl(&mut app, 'c'));
    }

    #[test]
    fn tab_indents_inside_code_editor() {
        let mut app = app();
        app.focus = Focus::Code;
        press(&mut app, KeyCode::Tab);

        assert_eq!(app.focus, Focus::Code);
        assert_eq!(app.form.code.get_value(), "    ");
    }

    #[test]
    fn r_reloads_from_storage() {
        let mut app = app();
        app.focus = Focus::Snippets;
        app.repository
            .save(&vec![Snippet::new("Sum", "python", vec![], "x")].into())
            .unwrap();
        assert!(app.snippets.is_empty());

        press(&mut app, KeyCode::Char('r'));

        assert_eq!(app.snippets.len(), 1);
        assert_eq!(app.languages, vec!["python"]);
    }

    #[test]
    fn tab_cycles_focus() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Language);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Snippets);
    }
}
