use crate::models::{Snippet, SnippetSet};
use colored::Colorize;
use std::io::{self, Write};

fn margin() -> colored::ColoredString {
    "┃".bright_magenta()
}

/// Lists snippets in stored order, optionally only one language.
pub fn list_snippets(
    out: &mut impl Write,
    snippets: &SnippetSet,
    language: Option<&str>,
) -> io::Result<()> {
    let rows: Vec<(usize, &Snippet)> = snippets
        .iter()
        .enumerate()
        .filter(|(_, s)| language.is_none_or(|l| s.language == l))
        .collect();

    if rows.is_empty() {
        match language {
            Some(language) => writeln!(out, "{}  No {} snippets found.", margin(), language)?,
            None => writeln!(out, "{}  No snippets saved yet.", margin())?,
        }
        return Ok(());
    }

    for (index, snippet) in rows {
        let tags: Vec<&str> = snippet
            .tags
            .iter()
            .map(String::as_str)
            .filter(|t| !t.is_empty())
            .collect();
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" #{}", tags.join(" #"))
        };

        writeln!(
            out,
            "{}  {}. {} ({}){}",
            margin(),
            (index + 1).to_string().bright_yellow(),
            snippet.title.bright_white().bold(),
            snippet.language.bright_green(),
            tags.bright_black()
        )?;
    }
    Ok(())
}

/// Lists distinct languages with their snippet counts, first-seen order.
pub fn list_languages(out: &mut impl Write, snippets: &SnippetSet) -> io::Result<()> {
    let languages = snippets.languages();
    if languages.is_empty() {
        writeln!(out, "{}  No languages yet.", margin())?;
        return Ok(());
    }

    for language in languages {
        let count = snippets.filter_by_language(language).len();
        writeln!(
            out,
            "{}  {} {}",
            margin(),
            language.bright_white().bold(),
            format!("({})", count).bright_black()
        )?;
    }
    Ok(())
}

/// Prints one snippet found by title, optionally narrowed to a language.
pub fn show_snippet(
    out: &mut impl Write,
    snippets: &SnippetSet,
    title: &str,
    language: Option<&str>,
) -> io::Result<()> {
    let Some(snippet) = snippets.find_by_title(title, language) else {
        writeln!(out, "{}  No snippet found with title: {}", margin(), title)?;
        if !snippets.is_empty() {
            writeln!(out, "{}  Available snippets:", margin())?;
            list_snippets(out, snippets, None)?;
        }
        return Ok(());
    };

    writeln!(
        out,
        "{}  {} {}",
        margin(),
        "SNIPPET".bright_green().bold(),
        snippet.title.bold()
    )?;
    writeln!(out, "{}", "─".repeat(60).bright_magenta())?;
    writeln!(
        out,
        "{}  {}: {}",
        margin(),
        "Language".bright_yellow(),
        snippet.language
    )?;
    writeln!(
        out,
        "{}  {}: {}",
        margin(),
        "Tags".bright_cyan(),
        snippet.tags_text()
    )?;
    writeln!(
        out,
        "{}  {}: {}",
        margin(),
        "Lines".bright_black(),
        snippet.line_count()
    )?;
    writeln!(out, "{}", "─".repeat(60).bright_magenta())?;

    for line in snippet.code.lines() {
        writeln!(out, "{}  {}", margin(), line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SnippetSet {
        SnippetSet::from(vec![
            Snippet::new("Sum", "python", vec!["math".into()], "def s(a,b):\n    return a+b"),
            Snippet::new("Hello", "go", vec![String::new()], "fmt.Println()"),
            Snippet::new("Mul", "python", vec![], "def m(a,b): return a*b"),
        ])
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn list_filters_by_language() {
        let text = output(|out| list_snippets(out, &sample(), Some("python")));
        assert!(text.contains("Sum"));
        assert!(text.contains("Mul"));
        assert!(!text.contains("Hello"));
        assert!(text.contains("#math"));
    }

    #[test]
    fn list_reports_empty_language() {
        let text = output(|out| list_snippets(out, &sample(), Some("rust")));
        assert!(text.contains("No rust snippets found."));
    }

    #[test]
    fn languages_are_counted_in_first_seen_order() {
        let text = output(|out| list_languages(out, &sample()));
        let python = text.find("python").unwrap();
        let go = text.find("go").unwrap();
        assert!(python < go);
        assert!(text.contains("(2)"));
    }

    #[test]
    fn show_prints_code_lines() {
        let text = output(|out| show_snippet(out, &sample(), "sum", None));
        assert!(text.contains("def s(a,b):"));
        assert!(text.contains("    return a+b"));
        assert!(text.contains("math"));
    }

    #[test]
    fn show_missing_lists_available() {
        let text = output(|out| show_snippet(out, &sample(), "nope", None));
        assert!(text.contains("No snippet found with title: nope"));
        assert!(text.contains("Hello"));
    }
}
