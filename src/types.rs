//! Core types for the list engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Contract every list item must satisfy to participate in diffing.
///
/// `key` derives the item's identity from its immutable fields: two items
/// with the same key are the *same logical row* even when other fields
/// differ. The key must be stable for the logical lifetime of the item —
/// changing the fields it is derived from is a delete+insert, not an
/// update.
///
/// Payload equality (unchanged vs needs-reload) is ordinary [`PartialEq`]
/// on the item type and is only ever consulted for items whose keys match.
pub trait Diffable {
    /// The stable identity key.
    type Key: Clone + Eq + Hash + fmt::Debug;

    /// Derive the identity key. Pure and total.
    fn key(&self) -> Self::Key;
}

/// Position of an item within a snapshot: section index, then row index
/// inside that section. The index-path analog.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemPosition {
    pub section: usize,
    pub index: usize,
}

impl ItemPosition {
    pub fn new(section: usize, index: usize) -> Self {
        Self { section, index }
    }
}

impl fmt::Debug for ItemPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.index)
    }
}
