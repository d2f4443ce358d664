//! Query filtering over emoji records.
//!
//! A record matches when its description or its first alias contains the
//! query, compared case-insensitively. An empty query matches everything.
//! Results always keep dataset order; there is no ranking.
//!
//! ```
//! use emojipick::dataset::Dataset;
//! use emojipick::search::filter;
//!
//! let data = Dataset::builtin();
//! let hits = filter("grin", data.records());
//! assert!(hits.iter().any(|r| r.emoji == "😀"));
//! assert!(filter("xyz", data.records()).iter().all(|r| r.emoji != "😀"));
//! ```

use crate::dataset::EmojiRecord;

/// Normalize a string for matching.
fn fold(s: &str) -> String {
    s.to_uppercase()
}

fn matches_folded(record: &EmojiRecord, needle: &str) -> bool {
    fold(&record.description).contains(needle) || fold(record.primary_alias()).contains(needle)
}

/// Whether one record matches `query`.
#[must_use]
pub fn matches(record: &EmojiRecord, query: &str) -> bool {
    query.is_empty() || matches_folded(record, &fold(query))
}

/// Indices of the records matching `query`, ascending.
#[must_use]
pub fn filter_indices(query: &str, records: &[EmojiRecord]) -> Vec<usize> {
    if query.is_empty() {
        return (0..records.len()).collect();
    }
    let needle = fold(query);
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_folded(record, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// Records matching `query`, in dataset order.
#[must_use]
pub fn filter<'a>(query: &str, records: &'a [EmojiRecord]) -> Vec<&'a EmojiRecord> {
    filter_indices(query, records)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// The current query and the records it selects.
///
/// Rebuilt in full whenever the query changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilteredView {
    query: String,
    indices: Vec<usize>,
}

impl FilteredView {
    /// View with an empty query, selecting every record.
    #[must_use]
    pub fn new(records: &[EmojiRecord]) -> Self {
        Self {
            query: String::new(),
            indices: (0..records.len()).collect(),
        }
    }

    /// Replace the query. Returns `false` if it did not change.
    pub fn set_query(&mut self, query: &str, records: &[EmojiRecord]) -> bool {
        if query == self.query {
            return false;
        }
        self.query = query.to_string();
        self.indices = filter_indices(query, records);
        tracing::debug!(query, results = self.indices.len(), "search query changed");
        true
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// Dataset indices of the selected records, ascending.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Category, Dataset};

    fn record(emoji: &str, description: &str, alias: &str) -> EmojiRecord {
        EmojiRecord {
            emoji: emoji.to_string(),
            description: description.to_string(),
            category: Category::People,
            aliases: vec![alias.to_string(), "other".to_string()],
            tags: vec!["tagonly".to_string()],
        }
    }

    fn sample() -> Vec<EmojiRecord> {
        vec![
            record("😀", "grinning face", "grinning"),
            record("😂", "face with tears of joy", "joy"),
            record("🐱", "cat face", "cat"),
            record("😺", "smiling cat face with open mouth", "smiley_cat"),
        ]
    }

    #[test]
    fn test_empty_query_is_identity() {
        let records = sample();
        assert_eq!(filter_indices("", &records), vec![0, 1, 2, 3]);
        assert_eq!(filter("", &records).len(), records.len());
    }

    #[test]
    fn test_description_and_alias_match() {
        let records = sample();
        assert_eq!(filter_indices("cat", &records), vec![2, 3]);
        assert_eq!(filter_indices("joy", &records), vec![1]);
        assert_eq!(filter_indices("smiley_", &records), vec![3]);
    }

    #[test]
    fn test_case_insensitive() {
        let records = sample();
        assert_eq!(filter_indices("GRIN", &records), filter_indices("grin", &records));
        assert_eq!(filter_indices("Cat Face", &records), vec![2, 3]);
    }

    #[test]
    fn test_only_first_alias_and_no_tags() {
        let records = sample();
        assert!(filter_indices("other", &records).is_empty());
        assert!(filter_indices("tagonly", &records).is_empty());
    }

    #[test]
    fn test_whitespace_is_significant() {
        let records = sample();
        assert_eq!(filter_indices(" face", &records), vec![0, 2, 3]);
        assert_eq!(filter_indices("face ", &records), vec![1, 3]);
    }

    #[test]
    fn test_matches_single_record() {
        let r = record("😀", "grinning face", "grinning");
        assert!(matches(&r, ""));
        assert!(matches(&r, "FACE"));
        assert!(!matches(&r, "xyz"));
    }

    #[test]
    fn test_filtered_view() {
        let records = sample();
        let mut view = FilteredView::new(&records);
        assert!(!view.is_searching());
        assert_eq!(view.len(), 4);

        assert!(view.set_query("cat", &records));
        assert!(view.is_searching());
        assert_eq!(view.indices(), &[2, 3]);
        assert!(!view.set_query("cat", &records));

        assert!(view.set_query("zzz", &records));
        assert!(view.is_empty());

        view.set_query("", &records);
        assert_eq!(view.len(), 4);
    }

    #[test]
    fn test_builtin_grinning_example() {
        let data = Dataset::builtin();
        let grin = filter("grin", data.records());
        assert!(
            grin.iter()
                .any(|r| r.emoji == "😀" && r.description == "grinning face")
        );
    }
}
