use crate::editor::CodeEditor;
use crate::ui::colors::RosePine;
use once_cell::sync::Lazy;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use syntect::{
    easy::HighlightLines,
    highlighting::{Theme, ThemeSet},
    parsing::{SyntaxReference, SyntaxSet},
};
use unicode_width::UnicodeWidthStr;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

const FALLBACK_THEME: &str = "base16-mocha.dark";

/// Common language labels that are not syntect tokens.
fn mode_token(mode: &str) -> &str {
    match mode {
        "shell" | "sh" | "zsh" => "bash",
        "c++" => "cpp",
        "c#" | "csharp" => "cs",
        "golang" => "go",
        "node" | "typescript" | "ts" | "jsx" | "tsx" => "js",
        "python3" => "py",
        "yml" => "yaml",
        other => other,
    }
}

pub fn find_syntax(mode: &str) -> &'static SyntaxReference {
    SYNTAX_SET
        .find_syntax_by_token(mode_token(mode))
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}

fn find_theme(name: &str) -> Option<&'static Theme> {
    THEME_SET
        .themes
        .get(name)
        .or_else(|| THEME_SET.themes.get(FALLBACK_THEME))
}

fn highlight_line<'a>(highlighter: Option<&mut HighlightLines>, line: &'a str) -> Vec<Span<'a>> {
    let Some(highlighter) = highlighter else {
        return vec![Span::styled(line, Style::default().fg(RosePine::TEXT))];
    };

    // Newline-terminated input keeps multi-line constructs in sync
    let with_newline = format!("{}\n", line);
    match highlighter.highlight_line(&with_newline, &SYNTAX_SET) {
        Ok(ranges) => ranges
            .into_iter()
            .map(|(style, text)| {
                let fg = style.foreground;
                Span::styled(
                    text.trim_end_matches('\n').to_string(),
                    Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                )
            })
            .collect(),
        Err(_) => vec![Span::styled(line, Style::default().fg(RosePine::TEXT))],
    }
}

/// Renders the code editor: line-number gutter, highlighted text and cursor.
pub fn render(frame: &mut Frame, area: Rect, editor: &mut CodeEditor, focused: bool) {
    let syntax = find_syntax(editor.mode());

    let block = Block::bordered()
        .title(format!(" Code · {} ", syntax.name))
        .border_type(BorderType::Rounded)
        .style(RosePine::border(focused));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let height = inner.height as usize;
    editor.ensure_cursor_visible(height);
    let scroll = editor.scroll();

    let lines = editor.lines();
    let gutter_width = if editor.options().line_numbers {
        lines.len().to_string().len() as u16 + 2
    } else {
        0
    };

    // Highlighting is stateful, so every line above the viewport is fed through too.
    let mut highlighter = find_theme(&editor.options().theme).map(|theme| HighlightLines::new(syntax, theme));
    let mut rendered: Vec<Line> = Vec::with_capacity(height);

    for (index, line) in lines.iter().enumerate().take(scroll + height) {
        let spans = highlight_line(highlighter.as_mut(), line);
        if index < scroll {
            continue;
        }

        let mut row = Vec::with_capacity(spans.len() + 1);
        if gutter_width > 0 {
            row.push(Span::styled(
                format!("{:>width$} ", index + 1, width = gutter_width as usize - 1),
                Style::default().fg(RosePine::MUTED),
            ));
        }
        row.extend(spans);
        rendered.push(Line::from(row));
    }

    Paragraph::new(rendered)
        .style(Style::default().bg(RosePine::SURFACE))
        .render(inner, frame.buffer_mut());

    if focused {
        let (row, col) = editor.cursor();
        let line = &editor.lines()[row];
        let before: String = line.chars().take(col).collect();
        frame.set_cursor_position(cursor_position(
            inner,
            gutter_width,
            before.width(),
            row - scroll,
        ));
    }
}

/// Terminal cell for the cursor, clamped to the text area.
fn cursor_position(inner: Rect, gutter_width: u16, text_width: usize, row: usize) -> Position {
    let text_width = u16::try_from(text_width).unwrap_or(u16::MAX);
    let row = u16::try_from(row).unwrap_or(u16::MAX);
    let right = inner.right().saturating_sub(1).max(inner.x);
    let bottom = inner.bottom().saturating_sub(1).max(inner.y);

    Position::new(
        inner
            .x
            .saturating_add(gutter_width)
            .saturating_add(text_width)
            .min(right),
        inner.y.saturating_add(row).min(bottom),
    )
}
