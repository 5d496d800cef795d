use crate::app::{App, Focus};
use crate::ui::colors::RosePine;
use crate::ui::{components, editor};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Draws the whole popup: languages, snippet list, edit form, bottom bar and overlays.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let rows = Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).split(area);
    let columns = Layout::horizontal([
        Constraint::Length(22),
        Constraint::Percentage(32),
        Constraint::Fill(1),
    ])
    .split(rows[0]);

    render_language_list(frame, columns[0], app);
    render_snippet_list(frame, columns[1], app);
    render_form(frame, columns[2], app);
    components::render_bottom_bar(frame, rows[1], app);

    if app.show_help {
        components::render_help_overlay(frame, area);
    }
    components::render_message_overlay(frame, area, app);
}

fn render_language_list(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Languages;
    let block = Block::bordered()
        .title(" Languages ")
        .border_type(BorderType::Rounded)
        .style(RosePine::border(focused));

    if app.languages.is_empty() {
        Paragraph::new("No languages yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(RosePine::MUTED))
            .block(block)
            .render(area, frame.buffer_mut());
        return;
    }

    let items: Vec<ListItem> = app
        .languages
        .iter()
        .map(|language| {
            let active = app.active_filter.as_deref() == Some(language.as_str());
            let marker = if active { "● " } else { "  " };
            let style = if active {
                Style::default().fg(RosePine::GOLD).bold()
            } else {
                Style::default().fg(RosePine::TEXT)
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(RosePine::GOLD)),
                Span::styled(language.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style(focused));

    let mut state = ListState::default().with_selected(Some(app.selected_language));
    StatefulWidget::render(list, area, frame.buffer_mut(), &mut state);
}

fn render_snippet_list(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Snippets;
    let title = match &app.active_filter {
        Some(language) => format!(" Snippets · {} ", language),
        None => String::from(" Snippets "),
    };
    let block = Block::bordered()
        .title(title)
        .border_type(BorderType::Rounded)
        .style(RosePine::border(focused));

    if app.visible.is_empty() {
        Paragraph::new(vec![
            Line::from(""),
            Line::from("No snippets saved yet."),
            Line::from(Span::styled(
                "Fill in the form and press Ctrl-S",
                Style::default().fg(RosePine::MUTED),
            )),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(RosePine::SUBTLE))
        .block(block)
        .render(area, frame.buffer_mut());
        return;
    }

    let width = block.inner(area).width as usize;
    let items: Vec<ListItem> = app
        .visible_snippets()
        .map(|snippet| {
            let language = format!(" ({})", snippet.language);
            let room = width.saturating_sub(language.width() + 2);
            ListItem::new(Line::from(vec![
                Span::styled(
                    truncate(&snippet.title, room),
                    Style::default().fg(RosePine::TEXT).bold(),
                ),
                Span::styled(language, Style::default().fg(RosePine::SUBTLE)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style(focused))
        .highlight_symbol("› ");

    let mut state = ListState::default().with_selected(Some(app.selected_snippet));
    StatefulWidget::render(list, area, frame.buffer_mut(), &mut state);
}

fn render_form(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .split(area);

    let focus = app.focus;
    components::render_input(frame, chunks[0], "Title", &app.form.title, focus == Focus::Title);
    components::render_input(
        frame,
        chunks[1],
        "Language",
        &app.form.language,
        focus == Focus::Language,
    );
    components::render_input(
        frame,
        chunks[2],
        "Tags (comma separated)",
        &app.form.tags,
        focus == Focus::Tags,
    );
    editor::render(frame, chunks[3], &mut app.form.code, focus == Focus::Code);
}

fn highlight_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(RosePine::BASE).bg(RosePine::IRIS)
    } else {
        Style::default().bg(RosePine::HIGHLIGHT_HIGH)
    }
}

/// Cuts `text` to at most `max_width` columns, marking the cut with an ellipsis.
fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut result = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        result.push(c);
        used += w;
    }
    result.push('…');
    result
}
