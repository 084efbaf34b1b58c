//! Read models - derived, non-persisted views over live collections
//!
//! Every function here is pure: the same snapshots always produce the same
//! view, whatever delivered them.

mod names;
mod predictions;

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub use names::{
    count_votes, CategoryFilter, NameBoard, NameView, NameWithVoteCount, SortKey, SortOrder,
};
pub use predictions::{my_prediction, sort_predictions, PredictionBoard};

/// Collation order for display names and emails
///
/// Compares in three levels, each only consulted when the previous one ties:
/// base letters (accents and case folded away), then accents, then case with
/// lowercase first. A final code point comparison keeps the order total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let (ka, kb) = (CollationKey::new(a), CollationKey::new(b));
    ka.primary
        .cmp(&kb.primary)
        .then_with(|| ka.secondary.cmp(&kb.secondary))
        .then_with(|| ka.tertiary.cmp(&kb.tertiary))
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Default)]
struct CollationKey {
    primary: Vec<char>,
    secondary: Vec<Vec<char>>,
    tertiary: Vec<bool>,
}

impl CollationKey {
    fn new(s: &str) -> Self {
        let mut key = Self::default();
        for c in s.nfd() {
            if is_combining_mark(c) {
                if let Some(marks) = key.secondary.last_mut() {
                    marks.push(c);
                }
                continue;
            }
            key.primary.extend(c.to_lowercase());
            key.secondary.push(Vec::new());
            key.tertiary.push(c.is_uppercase());
        }
        key
    }
}
