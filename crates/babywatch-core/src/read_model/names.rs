//! Names board - suggestions with vote totals, filtered and sorted
//!
//! Recomputed from scratch on every snapshot of `names` or `likes`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use super::locale_compare;
use crate::entities::{NameSuggestion, Vote};
use crate::reconcile::RowSlot;
use crate::value_objects::{Category, NameKey};

/// Sort mode for the names board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest first
    #[default]
    Recent,
    /// Display name ascending
    Alpha,
    /// Most votes first, then display name ascending
    Likes,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Alpha => "alpha",
            Self::Likes => "likes",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "recent" => Some(Self::Recent),
            "alpha" => Some(Self::Alpha),
            "likes" => Some(Self::Likes),
            _ => None,
        }
    }
}

/// Active sort mode plus the reverse toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortOrder {
    pub key: SortKey,
    #[serde(default)]
    pub reverse: bool,
}

impl SortOrder {
    pub fn new(key: SortKey, reverse: bool) -> Self {
        Self { key, reverse }
    }

    /// Compare two rows under this order
    pub fn compare(&self, a: &NameWithVoteCount, b: &NameWithVoteCount) -> Ordering {
        // reverse swaps operands
        let (a, b) = if self.reverse { (b, a) } else { (a, b) };
        match self.key {
            SortKey::Recent => b.created_at.cmp(&a.created_at),
            SortKey::Alpha => locale_compare(&a.display_name, &b.display_name),
            SortKey::Likes => b
                .likes
                .cmp(&a.likes)
                .then_with(|| locale_compare(&a.display_name, &b.display_name)),
        }
    }
}

/// Which categories are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub show_girls: bool,
    pub show_boys: bool,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            show_girls: true,
            show_boys: true,
        }
    }
}

impl CategoryFilter {
    pub fn new(show_girls: bool, show_boys: bool) -> Self {
        Self {
            show_girls,
            show_boys,
        }
    }

    /// A name combining both categories passes either toggle
    #[inline]
    pub fn admits(&self, category: Category) -> bool {
        (category.is_girl() && self.show_girls) || (category.is_boy() && self.show_boys)
    }
}

/// Client-chosen presentation of the names board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NameView {
    pub sort: SortOrder,
    pub filter: CategoryFilter,
}

/// A suggestion joined with its vote total and visibility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameWithVoteCount {
    pub key: NameKey,
    pub display_name: String,
    pub is_boy: bool,
    pub is_girl: bool,
    pub submitter_email: String,
    pub created_at: i64,
    pub likes: u64,
    pub visible: bool,
}

impl NameWithVoteCount {
    #[inline]
    pub fn category(&self) -> Category {
        Category::from_flags(self.is_boy, self.is_girl)
    }
}

/// Vote totals per key
pub fn count_votes(votes: &[Vote]) -> HashMap<&NameKey, u64> {
    let mut counts: HashMap<&NameKey, u64> = HashMap::new();
    for vote in votes {
        *counts.entry(&vote.name_key).or_default() += 1;
    }
    counts
}

/// The derived names list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameBoard {
    pub view: NameView,
    /// Every suggestion in display order, hidden ones included
    pub rows: Vec<NameWithVoteCount>,
}

impl NameBoard {
    /// Join, filter, and sort.
    ///
    /// Votes whose key matches no suggestion are dropped.
    pub fn compute(names: &[NameSuggestion], votes: &[Vote], view: NameView) -> Self {
        let counts = count_votes(votes);

        let mut rows: Vec<NameWithVoteCount> = names
            .iter()
            .map(|name| {
                let key = name.key();
                let likes = counts.get(&key).copied().unwrap_or(0);
                NameWithVoteCount {
                    visible: view.filter.admits(name.category()),
                    likes,
                    key,
                    display_name: name.display_name.clone(),
                    is_boy: name.is_boy,
                    is_girl: name.is_girl,
                    submitter_email: name.submitter_email.clone(),
                    created_at: name.created_at,
                }
            })
            .collect();

        rows.sort_by(|a, b| view.sort.compare(a, b));

        Self { view, rows }
    }

    /// Rows that pass the category filter, in display order
    pub fn visible_rows(&self) -> impl Iterator<Item = &NameWithVoteCount> {
        self.rows.iter().filter(|row| row.visible)
    }

    pub fn find(&self, key: &NameKey) -> Option<&NameWithVoteCount> {
        self.rows.iter().find(|row| &row.key == key)
    }

    /// Keyed slots for list reconciliation
    pub fn row_slots(&self) -> Vec<RowSlot> {
        self.rows
            .iter()
            .map(|row| RowSlot::new(row.key.as_str(), row.visible))
            .collect()
    }
}
