//! Partitioning records into the sections shown in the grid.

use crate::dataset::{Category, EmojiRecord};
use crate::search::FilteredView;

/// Title of the single section shown while searching.
pub const SEARCH_RESULTS_TITLE: &str = "Search Results";

/// A titled run of records in the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// `None` for the search results section.
    pub category: Option<Category>,
    pub title: String,
    /// Dataset indices, in dataset order.
    pub items: Vec<usize>,
}

impl Section {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Split the selected records into one section per category.
///
/// Always returns [`Category::ALL`].len() sections in tab order, some of
/// which may be empty. Indices outside `records` are ignored.
#[must_use]
pub fn group_by_category(records: &[EmojiRecord], selection: &[usize]) -> Vec<Section> {
    let mut sections: Vec<Section> = Category::ALL
        .iter()
        .map(|&category| Section {
            category: Some(category),
            title: category.label().to_string(),
            items: Vec::new(),
        })
        .collect();

    for &index in selection {
        if let Some(record) = records.get(index) {
            sections[record.category.index()].items.push(index);
        }
    }
    sections
}

/// The flat section used while a query is active.
#[must_use]
pub fn search_results(selection: &[usize]) -> Section {
    Section {
        category: None,
        title: SEARCH_RESULTS_TITLE.to_string(),
        items: selection.to_vec(),
    }
}

/// Sections for the current view: grouped when browsing, flat when searching.
#[must_use]
pub fn sections_for(view: &FilteredView, records: &[EmojiRecord]) -> Vec<Section> {
    if view.is_searching() {
        vec![search_results(view.indices())]
    } else {
        group_by_category(records, view.indices())
    }
}
