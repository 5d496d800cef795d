use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A stored code sample.
///
/// The serialized shape is exactly `{title, language, tags, code}`. Reading is
/// lenient so entries written by older or hand-edited stores still load: a
/// missing or null field is empty, and tags that are not a list read as none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub language: String,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
}

fn text_of(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => String::new(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(text_of)
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(text_of).collect(),
        _ => Vec::new(),
    })
}

impl Snippet {
    pub fn new(
        title: impl Into<String>,
        language: impl Into<String>,
        tags: Vec<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            language: language.into(),
            tags,
            code: code.into(),
        }
    }

    /// Two snippets share an identity when both title and language match exactly.
    pub fn same_identity(&self, other: &Snippet) -> bool {
        self.title == other.title && self.language == other.language
    }

    /// Tags as the comma separated text shown in the form
    pub fn tags_text(&self) -> String {
        self.tags.join(", ")
    }

    pub fn line_count(&self) -> usize {
        self.code.lines().count()
    }

    /// Names of the required fields that are empty, in form order.
    /// Code counts as empty when it is only whitespace.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_empty() {
            missing.push("title");
        }
        if self.language.is_empty() {
            missing.push("language");
        }
        if self.code.trim().is_empty() {
            missing.push("code");
        }
        missing
    }
}

/// Splits comma separated tag text into trimmed tokens.
/// Blank entries are kept, so an empty input yields a single empty tag.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',').map(|tag| tag.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_trims_and_keeps_blank_entries() {
        assert_eq!(parse_tags(" math , util"), vec!["math", "util"]);
        assert_eq!(parse_tags("a,,b"), vec!["a", "", "b"]);
        assert_eq!(parse_tags(""), vec![""]);
    }

    #[test]
    fn tags_text_joins_with_comma_space() {
        let snippet = Snippet::new("t", "rust", vec!["a".into(), "b".into()], "fn x() {}");
        assert_eq!(snippet.tags_text(), "a, b");
    }

    #[test]
    fn identity_is_title_and_language() {
        let a = Snippet::new("Sum", "python", vec![], "x");
        let b = Snippet::new("Sum", "python", vec!["other".into()], "y");
        let c = Snippet::new("Sum", "go", vec![], "x");
        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&c));
    }

    #[test]
    fn missing_fields_treats_whitespace_code_as_empty() {
        let snippet = Snippet::new("", "rust", vec![], "  \n\t ");
        assert_eq!(snippet.missing_fields(), vec!["title", "code"]);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let snippet: Snippet = serde_json::from_str(r#"{"title":"only"}"#).unwrap();
        assert_eq!(snippet.title, "only");
        assert!(snippet.language.is_empty());
        assert!(snippet.tags.is_empty());
        assert!(snippet.code.is_empty());
    }

    #[test]
    fn deserializes_null_fields_and_non_list_tags_as_empty() {
        let snippets: Vec<Snippet> = serde_json::from_str(
            r#"[
                {"title": null, "language": "go", "tags": "legacy,string", "code": "x"},
                {"title": "Keep", "language": "rust", "tags": null, "code": null},
                {"title": 7, "language": "c", "tags": ["a", null, 2], "code": "y"}
            ]"#,
        )
        .unwrap();

        assert_eq!(snippets[0].title, "");
        assert!(snippets[0].tags.is_empty());
        assert_eq!(snippets[1].title, "Keep");
        assert!(snippets[1].tags.is_empty());
        assert_eq!(snippets[1].code, "");
        assert_eq!(snippets[2].title, "7");
        assert_eq!(snippets[2].tags, vec!["a", "", "2"]);
    }
}
