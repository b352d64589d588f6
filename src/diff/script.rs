//! Edit script types: the outbound boundary between the engine and a
//! rendering collaborator.

use crate::types::ItemPosition;
use serde::{Deserialize, Serialize};

/// One step of an edit script.
///
/// Item deletes carry old-snapshot coordinates; section inserts, item
/// inserts, move targets, and reloads carry new-snapshot coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp<S, K> {
    /// A section present only in the new snapshot, at its new index.
    InsertSection { section: S, index: usize },

    /// A section present only in the old snapshot, at its old index. Its
    /// items are removed with it and get no per-item delete ops.
    DeleteSection { section: S, index: usize },

    /// An item present only in the new snapshot.
    InsertItem { key: K, at: ItemPosition },

    /// An item present only in the old snapshot, in a surviving section.
    DeleteItem { key: K, at: ItemPosition },

    /// An item present in both snapshots whose position changed, within a
    /// section or across sections. `reload` folds a payload change into
    /// the same operation so the row keeps its identity while moving.
    MoveItem {
        key: K,
        from: ItemPosition,
        to: ItemPosition,
        reload: bool,
    },

    /// An item whose position is stable but whose payload changed, or
    /// which was explicitly marked for reload.
    ReloadItem { key: K, at: ItemPosition },
}

/// Ordered sequence of edit operations transforming a rendering of one
/// snapshot into a rendering of another.
///
/// Operations are emitted in a deterministic order: item deletes
/// (descending old position), section deletes (descending old index),
/// section inserts (ascending new index), item inserts and moves merged
/// (ascending target position), then reloads (ascending position).
///
/// A renderer applies the script in two passes, batch-update style:
/// first the removal side (item deletes, section deletes, and detaching
/// every [`EditOp::MoveItem`] row from its old position, all
/// key-addressed), then the insertion side in script order (section
/// inserts, then insert/move targets index-addressed in new-snapshot
/// coordinates, then reloads). Rows that never appear in the script keep
/// their relative order on both sides, which is what makes the ascending
/// index insertion land correctly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditScript<S, K> {
    ops: Vec<EditOp<S, K>>,
}

impl<S, K> EditScript<S, K> {
    pub(crate) fn from_ops(ops: Vec<EditOp<S, K>>) -> Self {
        Self { ops }
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when the two snapshots rendered identically.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The operations, in application order.
    pub fn ops(&self) -> &[EditOp<S, K>] {
        &self.ops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOp<S, K>> {
        self.ops.iter()
    }
}

impl<S, K> Default for EditScript<S, K> {
    fn default() -> Self {
        Self { ops: Vec::new() }
    }
}

impl<S, K> IntoIterator for EditScript<S, K> {
    type Item = EditOp<S, K>;
    type IntoIter = std::vec::IntoIter<EditOp<S, K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a, S, K> IntoIterator for &'a EditScript<S, K> {
    type Item = &'a EditOp<S, K>;
    type IntoIter = std::slice::Iter<'a, EditOp<S, K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
