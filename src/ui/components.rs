//! UI Components Module
//!
//! Pieces shared by the popup screen: the shortcut bar, text inputs and the
//! notice and help overlays.

use crate::app::{App, Focus};
use crate::form::TextInput;
use crate::ui::colors::RosePine;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Renders the bottom bar: where the user is on the left, shortcuts on the right.
pub fn render_bottom_bar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let location = match &app.active_filter {
        Some(language) => format!(" {} snippets · {} ", app.visible.len(), language),
        None => format!(" {} snippets ", app.snippets.len()),
    };

    let left_content = Paragraph::new(Line::from(Span::styled(
        location,
        Style::default().fg(RosePine::BASE).bg(RosePine::IRIS),
    )))
    .alignment(Alignment::Left)
    .block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
    );

    let right_content = Paragraph::new(context_shortcuts(app.focus))
        .alignment(Alignment::Right)
        .style(Style::default().fg(RosePine::MUTED))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        );

    left_content.render(chunks[0], frame.buffer_mut());
    right_content.render(chunks[1], frame.buffer_mut());
}

fn context_shortcuts(focus: Focus) -> &'static str {
    match focus {
        Focus::Languages => {
            " [↑↓] Navigate │ [⏎] Filter │ [a] All │ [Tab] Next │ [?] Help │ [q] Quit "
        }
        Focus::Snippets => {
            " [↑↓] Navigate │ [⏎] Edit │ [d] Delete │ [a] All │ [Tab] Next │ [?] Help │ [q] Quit "
        }
        Focus::Title | Focus::Language | Focus::Tags => {
            " [⏎] Next field │ [^S] Save │ [^N] Clear │ [Esc] Lists "
        }
        Focus::Code => " [Tab] Indent │ [S-Tab] Tags │ [^S] Save │ [^N] Clear │ [Esc] Lists ",
    }
}

/// Renders a bordered single-line input and places the cursor when focused.
pub fn render_input(frame: &mut Frame, area: Rect, title: &str, input: &TextInput, focused: bool) {
    let block = Block::bordered()
        .title(format!(" {} ", title))
        .border_type(BorderType::Rounded)
        .style(RosePine::border(focused));
    let inner = block.inner(area);

    let paragraph = Paragraph::new(input.value())
        .style(Style::default().fg(RosePine::TEXT))
        .block(block);
    paragraph.render(area, frame.buffer_mut());

    if focused && inner.width > 0 {
        let offset = input.before_cursor().width() as u16;
        frame.set_cursor_position(Position::new(
            inner.x + offset.min(inner.width - 1),
            inner.y,
        ));
    }
}

/// Renders the success or error notice, if any.
pub fn render_message_overlay(frame: &mut Frame, area: Rect, app: &App) {
    let (message, is_error) = match (&app.error_message, &app.success_message) {
        (Some(message), _) => (message.as_str(), true),
        (None, Some(message)) => (message.as_str(), false),
        (None, None) => return,
    };

    let popup_area = spotlight_bar(70, area);
    Clear.render(popup_area, frame.buffer_mut());

    let (icon, color) = if is_error {
        ("✗", RosePine::LOVE)
    } else {
        ("✓", RosePine::FOAM)
    };

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::SUBTLE).bg(RosePine::SURFACE));
    let inner_area = block.inner(popup_area);
    block.render(popup_area, frame.buffer_mut());

    let chunks = Layout::horizontal([
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(24),
    ])
    .split(inner_area);

    Paragraph::new(icon)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).bold())
        .render(chunks[0], frame.buffer_mut());

    Paragraph::new(message)
        .alignment(Alignment::Left)
        .style(Style::default().fg(RosePine::TEXT))
        .render(chunks[1], frame.buffer_mut());

    Paragraph::new("Press any key to dismiss")
        .alignment(Alignment::Right)
        .style(Style::default().fg(RosePine::MUTED))
        .render(chunks[2], frame.buffer_mut());
}

fn shortcut_line(keys: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<8}", keys), Style::default().fg(RosePine::GOLD)),
        Span::raw(description),
    ])
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(RosePine::LOVE).bold(),
    ))
}

pub fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 60.min(area.width);
    let height = 22.min(area.height);
    let popup_area = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    Clear.render(popup_area, frame.buffer_mut());

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::IRIS).bg(RosePine::SURFACE));

    let lines = vec![
        heading("Anywhere"),
        shortcut_line("Tab", "Next pane (indents in the code editor)"),
        shortcut_line("S-Tab", "Previous pane"),
        shortcut_line("Ctrl-S", "Save the form"),
        shortcut_line("Ctrl-N", "Clear the form"),
        shortcut_line("Esc", "Back to the snippet list"),
        shortcut_line("Ctrl-C", "Quit"),
        Line::from(""),
        heading("Languages"),
        shortcut_line("⏎", "Show only this language"),
        shortcut_line("a", "Show all snippets"),
        shortcut_line("r", "Reload from storage"),
        Line::from(""),
        heading("Snippets"),
        shortcut_line("⏎ / e", "Load into the form"),
        shortcut_line("d / Del", "Delete"),
        shortcut_line("n", "New snippet"),
        shortcut_line("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Saving a title + language that already exists replaces it.",
            Style::default().fg(RosePine::MUTED).italic(),
        )),
    ];

    Paragraph::new(lines)
        .style(Style::default().fg(RosePine::TEXT))
        .block(block)
        .render(popup_area, frame.buffer_mut());
}

pub fn spotlight_bar(width_percent: u16, r: Rect) -> Rect {
    let layout = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .split(layout[1])[1]
}
