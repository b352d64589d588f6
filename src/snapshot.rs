//! The snapshot value type and its builder operations.

use crate::error::{Result, SnapshotError};
use crate::types::{Diffable, ItemPosition};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One section: an identifier plus its ordered item keys.
#[derive(Clone, Debug)]
pub(crate) struct SectionEntry<S, K> {
    pub(crate) id: S,
    pub(crate) keys: Vec<K>,
}

/// One complete state of a sectioned list.
///
/// A snapshot is a value: builder operations never mutate their receiver,
/// they return a new snapshot (copy-on-write), so two snapshots can always
/// be diffed safely even while a caller still holds the older one.
///
/// Invariant: item keys are globally unique across all sections. A key may
/// not appear twice, even in different sections; the builders enforce this
/// at construction time.
#[derive(Clone, Debug)]
pub struct Snapshot<S, I: Diffable> {
    /// Ordered sections, each holding an ordered key sequence.
    pub(crate) sections: Vec<SectionEntry<S, I::Key>>,

    /// Key to full item value, for O(1) payload lookup.
    pub(crate) items: HashMap<I::Key, I>,

    /// Keys marked for a forced reload by [`Snapshot::reload_items`].
    /// Consumed by the next diff regardless of payload equality.
    pub(crate) reloaded: HashSet<I::Key>,
}

impl<S, I: Diffable> Snapshot<S, I> {
    /// An empty snapshot: zero sections, zero items.
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            items: HashMap::new(),
            reloaded: HashSet::new(),
        }
    }
}

impl<S, I: Diffable> Default for Snapshot<S, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, I> Snapshot<S, I>
where
    S: Clone + Eq + fmt::Debug,
    I: Diffable + Clone,
{
    /// Append section identifiers, in the given order, after the existing
    /// sections.
    ///
    /// Fails with [`SnapshotError::DuplicateSection`] if any identifier is
    /// already present (including duplicates within `sections` itself), in
    /// which case `self` is unaffected.
    pub fn append_sections(&self, sections: Vec<S>) -> Result<Self> {
        let mut next = self.clone();
        for section in sections {
            if next.sections.iter().any(|entry| entry.id == section) {
                return Err(SnapshotError::DuplicateSection(format!("{:?}", section)));
            }
            next.sections.push(SectionEntry {
                id: section,
                keys: Vec::new(),
            });
        }
        Ok(next)
    }

    /// Append items to the end of the named section's item order and
    /// register their keys in the global identity map.
    ///
    /// Fails with [`SnapshotError::UnknownSection`] if the section is
    /// absent, or [`SnapshotError::DuplicateIdentity`] if any item's key
    /// already exists anywhere in the snapshot.
    pub fn append_items(&self, items: Vec<I>, section: &S) -> Result<Self> {
        let mut next = self.clone();
        let index = next
            .sections
            .iter()
            .position(|entry| &entry.id == section)
            .ok_or_else(|| SnapshotError::UnknownSection(format!("{:?}", section)))?;

        for item in items {
            let key = item.key();
            if next.items.contains_key(&key) {
                return Err(SnapshotError::DuplicateIdentity(format!("{:?}", key)));
            }
            next.sections[index].keys.push(key.clone());
            next.items.insert(key, item);
        }
        Ok(next)
    }

    /// Remove the given items, matched by key, from whichever section holds
    /// them. Keys not present are ignored (idempotent, best-effort delete).
    pub fn delete_items(&self, items: &[I]) -> Self {
        let mut next = self.clone();
        for item in items {
            let key = item.key();
            if next.items.remove(&key).is_some() {
                for entry in &mut next.sections {
                    entry.keys.retain(|k| *k != key);
                }
            }
            next.reloaded.remove(&key);
        }
        next
    }

    /// Remove the given sections along with all of their items. Unknown
    /// section identifiers are ignored.
    pub fn delete_sections(&self, sections: &[S]) -> Self {
        let mut next = self.clone();
        let entries = std::mem::take(&mut next.sections);
        for entry in entries {
            if sections.contains(&entry.id) {
                for key in &entry.keys {
                    next.items.remove(key);
                    next.reloaded.remove(key);
                }
            } else {
                next.sections.push(entry);
            }
        }
        next
    }

    /// Replace the stored payload for each matching key, without changing
    /// position or section, and mark the key for a forced reload: the next
    /// diff emits a reload for it even if the payload compares equal.
    /// Keys not present are ignored.
    pub fn reload_items(&self, items: Vec<I>) -> Self {
        let mut next = self.clone();
        for item in items {
            let key = item.key();
            if let Some(slot) = next.items.get_mut(&key) {
                *slot = item;
                next.reloaded.insert(key);
            }
        }
        next
    }

    /// Resolve a position to its item, if the position is occupied.
    pub fn item_at(&self, position: ItemPosition) -> Option<&I> {
        let key = self.sections.get(position.section)?.keys.get(position.index)?;
        self.items.get(key)
    }

    /// Look up the full item value for a key.
    pub fn item_for_key(&self, key: &I::Key) -> Option<&I> {
        self.items.get(key)
    }

    /// Position of the given item (matched by key), if present.
    pub fn position_of(&self, item: &I) -> Option<ItemPosition> {
        let key = item.key();
        for (section, entry) in self.sections.iter().enumerate() {
            if let Some(index) = entry.keys.iter().position(|k| *k == key) {
                return Some(ItemPosition::new(section, index));
            }
        }
        None
    }

    /// Section holding the given item (matched by key), if present.
    pub fn section_of(&self, item: &I) -> Option<&S> {
        let position = self.position_of(item)?;
        Some(&self.sections[position.section].id)
    }

    /// Whether an item with the same key is present.
    pub fn contains(&self, item: &I) -> bool {
        self.items.contains_key(&item.key())
    }

    /// Section identifiers in order.
    pub fn section_identifiers(&self) -> Vec<S> {
        self.sections.iter().map(|entry| entry.id.clone()).collect()
    }

    /// Item keys of the named section, in order. `None` if the section is
    /// absent.
    pub fn keys_in(&self, section: &S) -> Option<&[I::Key]> {
        self.sections
            .iter()
            .find(|entry| &entry.id == section)
            .map(|entry| entry.keys.as_slice())
    }

    /// Items of the named section, in order. `None` if the section is
    /// absent.
    pub fn items_in(&self, section: &S) -> Option<Vec<&I>> {
        let entry = self.sections.iter().find(|entry| &entry.id == section)?;
        Some(entry.keys.iter().filter_map(|k| self.items.get(k)).collect())
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Keys currently marked for a forced reload, in snapshot order.
    pub fn reloaded_keys(&self) -> Vec<I::Key> {
        self.sections
            .iter()
            .flat_map(|entry| entry.keys.iter())
            .filter(|k| self.reloaded.contains(*k))
            .cloned()
            .collect()
    }

    /// Drop pending reload marks. Called when a snapshot is adopted as the
    /// applied state so a forced reload fires exactly once.
    pub(crate) fn clear_reload_marks(&mut self) {
        self.reloaded.clear();
    }
}
