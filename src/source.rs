//! The list controller: owner of the currently applied snapshot.

use crate::diff::{diff, EditScript};
use crate::snapshot::Snapshot;
use crate::types::{Diffable, ItemPosition};
use parking_lot::Mutex;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

type EditPolicy<I> = Box<dyn Fn(ItemPosition, &I) -> bool + Send + Sync>;

/// Holds the "currently applied" snapshot and turns candidate snapshots
/// into edit scripts for a rendering collaborator.
///
/// The applied snapshot is an explicit owned field guarded by a mutex: a
/// candidate becomes current atomically with the production of its edit
/// script, so a second mutation can never diff against a stale in-flight
/// snapshot even when mutations originate from multiple threads.
///
/// Row editability is an injected capability rather than a subclass hook:
/// supply a policy with [`ListSource::with_edit_policy`]; without one,
/// every present row is editable.
pub struct ListSource<S, I: Diffable> {
    current: Mutex<Snapshot<S, I>>,
    edit_policy: Option<EditPolicy<I>>,
}

impl<S, I> ListSource<S, I>
where
    S: Clone + Eq + Hash + fmt::Debug,
    I: Diffable + Clone + PartialEq,
{
    /// A source starting from the empty snapshot.
    pub fn new() -> Self {
        Self {
            current: Mutex::new(Snapshot::new()),
            edit_policy: None,
        }
    }

    /// Install a row-editability policy.
    pub fn with_edit_policy(
        mut self,
        policy: impl Fn(ItemPosition, &I) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.edit_policy = Some(Box::new(policy));
        self
    }

    /// A copy of the currently applied snapshot, the starting point for
    /// the caller's next round of builder mutations.
    pub fn snapshot(&self) -> Snapshot<S, I> {
        self.current.lock().clone()
    }

    /// Diff the current snapshot against `candidate`, adopt the candidate,
    /// and return the script for the rendering collaborator.
    ///
    /// Pending reload marks on the candidate are drained on adoption, so a
    /// forced reload fires exactly once.
    pub fn apply(&self, mut candidate: Snapshot<S, I>) -> EditScript<S, I::Key> {
        let mut current = self.current.lock();
        let script = diff(&current, &candidate);
        candidate.clear_reload_marks();
        debug!(
            ops = script.len(),
            sections = candidate.section_count(),
            items = candidate.item_count(),
            "snapshot applied"
        );
        *current = candidate;
        script
    }

    /// Resolve a rendered position to its item, so gesture handlers never
    /// keep their own index-to-item table.
    pub fn item_identifier(&self, position: ItemPosition) -> Option<I> {
        self.current.lock().item_at(position).cloned()
    }

    /// Whether the row at `position` accepts edit gestures. Positions that
    /// resolve to no item are not editable.
    pub fn can_edit(&self, position: ItemPosition) -> bool {
        let current = self.current.lock();
        match (current.item_at(position), &self.edit_policy) {
            (Some(item), Some(policy)) => policy(position, item),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

impl<S, I> Default for ListSource<S, I>
where
    S: Clone + Eq + Hash + fmt::Debug,
    I: Diffable + Clone + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}
