use crate::error::SnippetError;
use crate::models::Snippet;
use serde::{Deserialize, Serialize};

/// The full ordered collection of snippets, persisted as one unit.
///
/// Mutating operations are pure: they return a new set and leave `self`
/// untouched, so the caller can keep the current set until the new one has
/// been persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetSet {
    snippets: Vec<Snippet>,
}

impl SnippetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Snippet> {
        self.snippets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snippet> {
        self.snippets.iter()
    }

    /// Inserts or replaces a snippet keyed by its (title, language) pair.
    ///
    /// The first entry with a matching pair is replaced in place; otherwise the
    /// candidate is appended. Title, language and trimmed code must be non-empty.
    pub fn upsert(&self, candidate: Snippet) -> Result<SnippetSet, SnippetError> {
        let missing = candidate.missing_fields();
        if !missing.is_empty() {
            return Err(SnippetError::Validation { missing });
        }

        let mut snippets = self.snippets.clone();
        match snippets.iter().position(|s| s.same_identity(&candidate)) {
            Some(index) => snippets[index] = candidate,
            None => snippets.push(candidate),
        }

        Ok(SnippetSet { snippets })
    }

    /// Removes the snippet at `index`, keeping the order of the others.
    pub fn delete_at(&self, index: usize) -> Result<SnippetSet, SnippetError> {
        if index >= self.snippets.len() {
            return Err(SnippetError::IndexOutOfBounds {
                index,
                len: self.snippets.len(),
            });
        }

        let mut snippets = self.snippets.clone();
        snippets.remove(index);
        Ok(SnippetSet { snippets })
    }

    /// Distinct languages in first-seen order
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = Vec::new();
        for snippet in &self.snippets {
            if !languages.contains(&snippet.language.as_str()) {
                languages.push(&snippet.language);
            }
        }
        languages
    }

    pub fn filter_by_language(&self, language: &str) -> Vec<&Snippet> {
        self.snippets
            .iter()
            .filter(|s| s.language == language)
            .collect()
    }

    /// Positions in this set of the snippets whose language is `language`.
    pub fn positions_for_language(&self, language: &str) -> Vec<usize> {
        self.snippets
            .iter()
            .enumerate()
            .filter(|(_, s)| s.language == language)
            .map(|(index, _)| index)
            .collect()
    }

    /// Finds a snippet by title, optionally narrowed to one language.
    /// Exact (case-insensitive) title matches win over partial ones.
    pub fn find_by_title(&self, title: &str, language: Option<&str>) -> Option<&Snippet> {
        let needle = title.to_lowercase();
        let in_language = |s: &&Snippet| language.is_none_or(|l| s.language == l);

        self.snippets
            .iter()
            .filter(in_language)
            .find(|s| s.title.to_lowercase() == needle)
            .or_else(|| {
                self.snippets
                    .iter()
                    .filter(in_language)
                    .find(|s| s.title.to_lowercase().contains(&needle))
            })
    }
}

impl From<Vec<Snippet>> for SnippetSet {
    fn from(snippets: Vec<Snippet>) -> Self {
        Self { snippets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(title: &str, language: &str, code: &str) -> Snippet {
        Snippet::new(title, language, vec![], code)
    }

    fn sample_set() -> SnippetSet {
        SnippetSet::from(vec![
            snippet("a", "rust", "1"),
            snippet("b", "python", "2"),
            snippet("c", "rust", "3"),
            snippet("d", "go", "4"),
            snippet("e", "python", "5"),
        ])
    }

    #[test]
    fn upsert_appends_new_pair() {
        let set = sample_set();
        let updated = set.upsert(snippet("f", "rust", "6")).unwrap();

        assert_eq!(updated.len(), set.len() + 1);
        assert_eq!(updated.get(5).unwrap().title, "f");
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn upsert_replaces_matching_pair_in_place() {
        let set = sample_set();
        let replacement = Snippet::new("c", "rust", vec!["new".into()], "replaced");
        let updated = set.upsert(replacement.clone()).unwrap();

        assert_eq!(updated.len(), set.len());
        assert_eq!(updated.get(2), Some(&replacement));
        assert_eq!(updated.get(3), set.get(3));
    }

    #[test]
    fn upsert_rejects_missing_fields_without_mutation() {
        let set = sample_set();

        for candidate in [
            snippet("", "rust", "code"),
            snippet("title", "", "code"),
            snippet("title", "rust", "   \n "),
        ] {
            let err = set.upsert(candidate).unwrap_err();
            assert!(matches!(err, SnippetError::Validation { .. }));
        }
        assert_eq!(set, sample_set());
    }

    #[test]
    fn upsert_does_not_validate_tags() {
        let set = SnippetSet::new();
        let candidate = Snippet::new("t", "rust", vec![String::new()], "x");
        let updated = set.upsert(candidate).unwrap();
        assert_eq!(updated.get(0).unwrap().tags, vec![String::new()]);
    }

    #[test]
    fn delete_at_removes_and_keeps_order() {
        let set = sample_set();
        let updated = set.delete_at(1).unwrap();

        let titles: Vec<_> = updated.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c", "d", "e"]);
    }

    #[test]
    fn delete_at_out_of_bounds_fails() {
        let set = sample_set();
        let err = set.delete_at(5).unwrap_err();
        assert!(matches!(
            err,
            SnippetError::IndexOutOfBounds { index: 5, len: 5 }
        ));
    }

    #[test]
    fn languages_are_distinct_in_first_seen_order() {
        assert_eq!(sample_set().languages(), vec!["rust", "python", "go"]);
        assert!(SnippetSet::new().languages().is_empty());
    }

    #[test]
    fn filter_keeps_relative_order() {
        let set = sample_set();
        let titles: Vec<_> = set
            .filter_by_language("python")
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["b", "e"]);
        assert_eq!(set.positions_for_language("rust"), vec![0, 2]);
        assert!(set.filter_by_language("haskell").is_empty());
    }

    #[test]
    fn find_by_title_prefers_exact_match() {
        let set = SnippetSet::from(vec![
            snippet("Sum all", "python", "1"),
            snippet("sum", "python", "2"),
            snippet("Sum", "go", "3"),
        ]);

        assert_eq!(set.find_by_title("SUM", None).unwrap().code, "2");
        assert_eq!(set.find_by_title("sum", Some("go")).unwrap().code, "3");
        assert_eq!(set.find_by_title("all", None).unwrap().code, "1");
        assert!(set.find_by_title("missing", None).is_none());
    }

    #[test]
    fn end_to_end_sum_example() {
        let set = SnippetSet::new();

        let set = set
            .upsert(Snippet::new(
                "Sum",
                "python",
                vec!["math".into()],
                "def s(a,b): return a+b",
            ))
            .unwrap();
        assert_eq!(set.len(), 1);

        let set = set
            .upsert(Snippet::new("Sum", "python", vec!["util".into()], "..."))
            .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).unwrap().tags, vec!["util"]);

        let set = set
            .upsert(Snippet::new("Sum", "go", vec![], "..."))
            .unwrap();
        assert_eq!(set.len(), 2);

        let set = set.delete_at(0).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).unwrap().language, "go");
    }
}
