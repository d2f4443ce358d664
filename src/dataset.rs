//! Emoji records and the dataset they are loaded from.
//!
//! A dataset is a JSON array of records:
//!
//! ```json
//! [{ "emoji": "😀", "description": "grinning face", "category": "People",
//!    "aliases": ["grinning"], "tags": ["smile"] }]
//! ```
//!
//! Records are validated on load and never change afterwards.
//!
//! ```
//! use emojipick::dataset::{Category, Dataset};
//!
//! let data = Dataset::from_json(
//!     r#"[{"emoji":"🐶","description":"dog face","category":"Nature","aliases":["dog"]}]"#,
//! )
//! .unwrap();
//! assert_eq!(data.len(), 1);
//! assert_eq!(data.records()[0].category, Category::Nature);
//! assert!(data.records()[0].tags.is_empty());
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

/// Fixed emoji categories, in tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    People,
    Nature,
    Foods,
    Activity,
    Places,
    Objects,
    Symbols,
    Flags,
}

impl Category {
    /// Every category in tab order.
    pub const ALL: [Self; 8] = [
        Self::People,
        Self::Nature,
        Self::Foods,
        Self::Activity,
        Self::Places,
        Self::Objects,
        Self::Symbols,
        Self::Flags,
    ];

    /// Position in [`Category::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::People => "People",
            Self::Nature => "Nature",
            Self::Foods => "Foods",
            Self::Activity => "Activity",
            Self::Places => "Places",
            Self::Objects => "Objects",
            Self::Symbols => "Symbols",
            Self::Flags => "Flags",
        }
    }

    /// Glyph shown on the category's tab. Always a single wide `char`.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::People => "😀",
            Self::Nature => "🐶",
            Self::Foods => "🍔",
            Self::Activity => "⚽",
            Self::Places => "🚗",
            Self::Objects => "💡",
            Self::Symbols => "🔣",
            Self::Flags => "🏁",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One emoji and its metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRecord {
    /// The glyph as displayed; may be several code points.
    pub emoji: String,
    pub description: String,
    pub category: Category,
    /// Alternate names; the first one is also a search key.
    pub aliases: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl EmojiRecord {
    /// The alias used for search and shown as `:alias:`.
    #[must_use]
    pub fn primary_alias(&self) -> &str {
        self.aliases.first().map_or("", String::as_str)
    }

    fn validate(&self, index: usize) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidRecord {
            index,
            reason: reason.to_string(),
        };
        if self.emoji.trim().is_empty() {
            return Err(invalid("emoji glyph is empty"));
        }
        match self.aliases.first() {
            None => Err(invalid("alias list is empty")),
            Some(alias) if alias.trim().is_empty() => Err(invalid("first alias is blank")),
            Some(_) => Ok(()),
        }
    }
}

/// Immutable, validated list of emoji records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<EmojiRecord>,
}

static BUILTIN_JSON: &str = include_str!("../data/emoji.json");
static BUILTIN: OnceLock<Dataset> = OnceLock::new();

impl Dataset {
    /// Validate already-parsed records.
    pub fn from_records(records: Vec<EmojiRecord>) -> Result<Self> {
        for (index, record) in records.iter().enumerate() {
            record.validate(index)?;
        }
        Ok(Self { records })
    }

    /// Parse and validate a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<EmojiRecord> = serde_json::from_str(json)?;
        let dataset = Self::from_records(records)?;
        tracing::info!(records = dataset.len(), "emoji dataset loaded");
        Ok(dataset)
    }

    /// Read and parse a dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// The dataset compiled into the crate.
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| {
            Self::from_json(BUILTIN_JSON).unwrap_or_else(|err| {
                tracing::error!(%err, "builtin emoji dataset failed to load");
                Self::default()
            })
        })
    }

    #[must_use]
    pub fn records(&self) -> &[EmojiRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&EmojiRecord> {
        self.records.get(index)
    }

    /// Records of one category, in dataset order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &EmojiRecord> {
        self.records.iter().filter(move |r| r.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO: &str = r#"[
        {"emoji": "😀", "description": "grinning face", "category": "People",
         "aliases": ["grinning"], "tags": ["smile", "happy"]},
        {"emoji": "🇫🇷", "description": "flag: France", "category": "Flags",
         "aliases": ["fr"]}
    ]"#;

    // ============================================
    // Loading
    // ============================================

    #[test]
    fn test_from_json() {
        let data = Dataset::from_json(TWO).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get(0).unwrap().tags, vec!["smile", "happy"]);
        assert_eq!(data.get(1).unwrap().primary_alias(), "fr");
        assert!(data.get(2).is_none());
    }

    #[test]
    fn test_in_category() {
        let data = Dataset::from_json(TWO).unwrap();
        let flags: Vec<_> = data.in_category(Category::Flags).collect();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].emoji, "🇫🇷");
        assert_eq!(data.in_category(Category::Foods).count(), 0);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, TWO.as_bytes()).unwrap();
        let data = Dataset::from_path(file.path()).unwrap();
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Dataset::from_path("/nonexistent/emoji.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    // ============================================
    // Validation
    // ============================================

    #[test]
    fn test_unknown_category_rejected() {
        let json = r#"[{"emoji":"x","description":"x","category":"Food","aliases":["x"]}]"#;
        assert!(matches!(Dataset::from_json(json), Err(Error::Dataset(_))));
    }

    #[test]
    fn test_empty_alias_list_rejected() {
        let json = r#"[
            {"emoji":"😀","description":"a","category":"People","aliases":["a"]},
            {"emoji":"😁","description":"b","category":"People","aliases":[]}
        ]"#;
        match Dataset::from_json(json) {
            Err(Error::InvalidRecord { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("alias"));
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_glyph_rejected() {
        let json = r#"[{"emoji":"  ","description":"a","category":"People","aliases":["a"]}]"#;
        assert!(matches!(
            Dataset::from_json(json),
            Err(Error::InvalidRecord { index: 0, .. })
        ));
    }

    #[test]
    fn test_blank_first_alias_rejected() {
        let json = r#"[{"emoji":"😀","description":"a","category":"People","aliases":[" ","b"]}]"#;
        assert!(matches!(
            Dataset::from_json(json),
            Err(Error::InvalidRecord { index: 0, .. })
        ));
    }

    // ============================================
    // Category
    // ============================================

    #[test]
    fn test_category_order_and_index() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
            assert_eq!(Category::from_index(i), Some(*category));
        }
        assert_eq!(Category::from_index(8), None);
        assert_eq!(Category::Foods.to_string(), "Foods");
    }

    #[test]
    fn test_category_icons_are_single_wide_chars() {
        for category in Category::ALL {
            let icon = category.icon();
            assert_eq!(icon.chars().count(), 1, "{category}");
            assert_eq!(crate::unicode::grapheme_width(icon), 2, "{category}");
        }
    }
}
