//! List reconciliation for animated re-renders
//!
//! Given the keyed rows of two consecutive renders, work out which rows
//! moved, which appeared and which disappeared. A row's position is its
//! index among the visible rows only; hidden rows take up no space.
//!
//! The result is purely advisory. It is handed to a [`ReorderAnimator`] and
//! shipped to clients, but no data depends on it.

use serde::Serialize;
use std::collections::HashMap;

use crate::traits::ReorderAnimator;

/// A keyed row in render order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSlot {
    pub key: String,
    pub visible: bool,
}

impl RowSlot {
    pub fn new(key: impl Into<String>, visible: bool) -> Self {
        Self {
            key: key.into(),
            visible,
        }
    }
}

/// How a single row changed between renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowTransition {
    /// Visible in both renders at different positions
    Moved { key: String, from: usize, to: usize },
    /// Visible now, hidden or absent before
    Entered { key: String, at: usize },
    /// Visible before, hidden or absent now
    Exited { key: String, from: usize },
}

impl RowTransition {
    pub fn key(&self) -> &str {
        match self {
            Self::Moved { key, .. } | Self::Entered { key, .. } | Self::Exited { key, .. } => key,
        }
    }
}

fn visible_positions(rows: &[RowSlot]) -> HashMap<&str, usize> {
    rows.iter()
        .filter(|row| row.visible)
        .enumerate()
        .map(|(position, row)| (row.key.as_str(), position))
        .collect()
}

/// Diff two renders.
///
/// Moves and entries come first in the new render's order, then exits in
/// the previous render's order.
pub fn reconcile(previous: &[RowSlot], next: &[RowSlot]) -> Vec<RowTransition> {
    let before = visible_positions(previous);
    let after = visible_positions(next);

    let mut transitions = Vec::new();

    for row in next.iter().filter(|row| row.visible) {
        let key = row.key.as_str();
        let to = after[key];
        match before.get(key) {
            Some(&from) if from != to => transitions.push(RowTransition::Moved {
                key: key.to_string(),
                from,
                to,
            }),
            Some(_) => {}
            None => transitions.push(RowTransition::Entered {
                key: key.to_string(),
                at: to,
            }),
        }
    }

    for row in previous.iter().filter(|row| row.visible) {
        let key = row.key.as_str();
        if !after.contains_key(key) {
            transitions.push(RowTransition::Exited {
                key: key.to_string(),
                from: before[key],
            });
        }
    }

    transitions
}

/// Reconcile and hand the result to an animator
pub fn reconcile_with(
    previous: &[RowSlot],
    next: &[RowSlot],
    animator: &mut dyn ReorderAnimator,
) -> Vec<RowTransition> {
    let transitions = reconcile(previous, next);
    if !transitions.is_empty() {
        animator.animate(&transitions);
    }
    transitions
}

/// Animator that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnimator;

impl ReorderAnimator for NoopAnimator {
    fn animate(&mut self, _transitions: &[RowTransition]) {}
}

/// Animator that remembers what it was asked to do
#[derive(Debug, Clone, Default)]
pub struct RecordingAnimator {
    pub batches: Vec<Vec<RowTransition>>,
}

impl ReorderAnimator for RecordingAnimator {
    fn animate(&mut self, transitions: &[RowTransition]) {
        self.batches.push(transitions.to_vec());
    }
}
