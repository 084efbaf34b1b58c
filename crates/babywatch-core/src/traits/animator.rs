//! Reorder animation capability
//!
//! Presentation adapters implement this to animate keyed rows between two
//! renders. Nothing in the domain depends on an animator doing anything.

use crate::reconcile::RowTransition;

pub trait ReorderAnimator: Send {
    /// Animate the given transitions. Must not fail.
    fn animate(&mut self, transitions: &[RowTransition]);
}
