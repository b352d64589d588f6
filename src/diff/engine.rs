//! The reconciliation algorithm: two snapshots in, one edit script out.

use crate::diff::script::{EditOp, EditScript};
use crate::snapshot::Snapshot;
use crate::types::{Diffable, ItemPosition};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// Compute the edit script transforming a rendering of `old` into a
/// rendering of `new`.
///
/// Sections are matched by identifier; sections common to both snapshots
/// are assumed to keep their relative order and are never moved, only
/// their item sequences are reconciled. Items are matched by key: an item
/// that changed section, or whose position inside its section left the
/// longest common subsequence of the two key orders, becomes a move. A
/// move whose payload also changed (or whose key carries a forced reload
/// mark) is emitted as a single move+reload rather than delete+insert, so
/// the row keeps its identity. Position-stable items get a reload when
/// their payload changed or they are force-marked.
///
/// Total over well-formed snapshots; `diff(s, s)` is empty for any
/// snapshot without pending reload marks.
pub fn diff<S, I>(old: &Snapshot<S, I>, new: &Snapshot<S, I>) -> EditScript<S, I::Key>
where
    S: Clone + Eq + Hash + fmt::Debug,
    I: Diffable + Clone + PartialEq,
{
    let old_ids: HashSet<&S> = old.sections.iter().map(|entry| &entry.id).collect();
    let new_ids: HashSet<&S> = new.sections.iter().map(|entry| &entry.id).collect();

    let old_section = section_index(old);
    let new_section = section_index(new);
    let old_pos = position_index(old);

    // An item stays when both snapshots assign it to the same section.
    let stays = |key: &I::Key| old_section.get(key) == new_section.get(key);

    // Forced marks on the new snapshot win over payload equality.
    let needs_reload =
        |key: &I::Key| new.reloaded.contains(key) || old.items.get(key) != new.items.get(key);

    let mut ops: Vec<EditOp<S, I::Key>> = Vec::new();

    // Item deletes, descending old position. Items inside a section that is
    // itself deleted ride along with the section delete.
    for (section, entry) in old.sections.iter().enumerate().rev() {
        if !new_ids.contains(&entry.id) {
            continue;
        }
        for (index, key) in entry.keys.iter().enumerate().rev() {
            if !new.items.contains_key(key) {
                ops.push(EditOp::DeleteItem {
                    key: key.clone(),
                    at: ItemPosition::new(section, index),
                });
            }
        }
    }

    // Section deletes, descending old index.
    for (index, entry) in old.sections.iter().enumerate().rev() {
        if !new_ids.contains(&entry.id) {
            ops.push(EditOp::DeleteSection {
                section: entry.id.clone(),
                index,
            });
        }
    }

    // Section inserts, ascending new index.
    for (index, entry) in new.sections.iter().enumerate() {
        if !old_ids.contains(&entry.id) {
            ops.push(EditOp::InsertSection {
                section: entry.id.clone(),
                index,
            });
        }
    }

    // Position-stable items per section: the longest common subsequence of
    // the old and new key orders, restricted to keys that stay in that
    // section on both sides. Everything shared outside it moves.
    let mut stable: HashSet<&I::Key> = HashSet::new();
    for entry in &new.sections {
        let Some(old_entry) = old.sections.iter().find(|e| e.id == entry.id) else {
            continue;
        };
        let old_seq: Vec<&I::Key> = old_entry.keys.iter().filter(|&k| stays(k)).collect();
        let new_seq: Vec<&I::Key> = entry.keys.iter().filter(|&k| stays(k)).collect();
        stable.extend(lcs(&old_seq, &new_seq));
    }

    // Item inserts and moves, merged ascending by target position.
    for (section, entry) in new.sections.iter().enumerate() {
        for (index, key) in entry.keys.iter().enumerate() {
            let to = ItemPosition::new(section, index);
            match old_pos.get(key) {
                None => ops.push(EditOp::InsertItem {
                    key: key.clone(),
                    at: to,
                }),
                Some(&from) => {
                    if !stable.contains(key) {
                        ops.push(EditOp::MoveItem {
                            key: key.clone(),
                            from,
                            to,
                            reload: needs_reload(key),
                        });
                    }
                }
            }
        }
    }

    // Reloads for position-stable items, ascending position.
    for (section, entry) in new.sections.iter().enumerate() {
        for (index, key) in entry.keys.iter().enumerate() {
            if stable.contains(key) && needs_reload(key) {
                ops.push(EditOp::ReloadItem {
                    key: key.clone(),
                    at: ItemPosition::new(section, index),
                });
            }
        }
    }

    EditScript::from_ops(ops)
}

/// Key to position, over the whole snapshot.
fn position_index<S, I: Diffable>(snapshot: &Snapshot<S, I>) -> HashMap<I::Key, ItemPosition> {
    let mut map = HashMap::with_capacity(snapshot.items.len());
    for (section, entry) in snapshot.sections.iter().enumerate() {
        for (index, key) in entry.keys.iter().enumerate() {
            map.insert(key.clone(), ItemPosition::new(section, index));
        }
    }
    map
}

/// Key to owning section, over the whole snapshot.
fn section_index<S, I: Diffable>(snapshot: &Snapshot<S, I>) -> HashMap<&I::Key, &S> {
    let mut map = HashMap::with_capacity(snapshot.items.len());
    for entry in &snapshot.sections {
        for key in &entry.keys {
            map.insert(key, &entry.id);
        }
    }
    map
}

/// Elements of the longest common subsequence of `a` and `b`.
///
/// Keys are unique within a snapshot, so a set is enough to mark
/// membership. Classic O(n*m) dynamic program over suffixes.
fn lcs<'a, K: Eq + Hash>(a: &[&'a K], b: &[&'a K]) -> HashSet<&'a K> {
    let (n, m) = (a.len(), b.len());
    let mut table = vec![0u32; (n + 1) * (m + 1)];
    let at = |i: usize, j: usize| i * (m + 1) + j;

    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[at(i, j)] = if a[i] == b[j] {
                table[at(i + 1, j + 1)] + 1
            } else {
                table[at(i + 1, j)].max(table[at(i, j + 1)])
            };
        }
    }

    let mut kept = HashSet::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            kept.insert(a[i]);
            i += 1;
            j += 1;
        } else if table[at(i + 1, j)] >= table[at(i, j + 1)] {
            i += 1;
        } else {
            j += 1;
        }
    }
    kept
}
