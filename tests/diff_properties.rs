//! Property tests: applying an edit script to a model rendering of `old`
//! must reproduce `new` exactly, for arbitrary snapshot pairs and for
//! arbitrary builder-derived mutations.

use proptest::prelude::*;
use sectioned::contacts::{Contact, ContactKey, ContactSection};
use sectioned::{diff, EditOp, EditScript, Snapshot};
use std::collections::HashMap;

type ContactSnapshot = Snapshot<ContactSection, Contact>;
type ContactScript = EditScript<ContactSection, ContactKey>;

// --- Model Renderer ---

/// What a rendering collaborator observably shows: section order, row
/// order, and row payloads. No identity map, no reload marks.
#[derive(Clone, Debug, PartialEq)]
struct Rendering {
    sections: Vec<(ContactSection, Vec<ContactKey>)>,
    payloads: HashMap<ContactKey, Contact>,
}

fn render(snapshot: &ContactSnapshot) -> Rendering {
    let mut payloads = HashMap::new();
    let sections = snapshot
        .section_identifiers()
        .into_iter()
        .map(|section| {
            let keys = snapshot.keys_in(&section).unwrap().to_vec();
            for key in &keys {
                payloads.insert(key.clone(), snapshot.item_for_key(key).unwrap().clone());
            }
            (section, keys)
        })
        .collect();
    Rendering { sections, payloads }
}

fn detach(rendering: &mut Rendering, key: &ContactKey) {
    for (_, keys) in &mut rendering.sections {
        keys.retain(|k| k != key);
    }
}

/// Apply a script batch-update style: removal pass (key-addressed), then
/// insertion pass in script order (index-addressed, new coordinates).
fn apply_script(rendering: &mut Rendering, script: &ContactScript, new: &ContactSnapshot) {
    for op in script {
        match op {
            EditOp::DeleteItem { key, .. } => {
                detach(rendering, key);
                rendering.payloads.remove(key);
            }
            EditOp::DeleteSection { section, .. } => {
                if let Some(i) = rendering.sections.iter().position(|(s, _)| s == section) {
                    let (_, keys) = rendering.sections.remove(i);
                    for key in keys {
                        rendering.payloads.remove(&key);
                    }
                }
            }
            EditOp::MoveItem { key, .. } => detach(rendering, key),
            _ => {}
        }
    }

    for op in script {
        match op {
            EditOp::InsertSection { section, index } => {
                rendering.sections.insert(*index, (*section, Vec::new()));
            }
            EditOp::InsertItem { key, at } => {
                rendering.sections[at.section].1.insert(at.index, key.clone());
                rendering
                    .payloads
                    .insert(key.clone(), new.item_for_key(key).unwrap().clone());
            }
            EditOp::MoveItem { key, to, reload, .. } => {
                rendering.sections[to.section].1.insert(to.index, key.clone());
                // A moved row is re-rendered when its payload changed or
                // its old cell went away with a deleted section.
                if *reload || !rendering.payloads.contains_key(key) {
                    rendering
                        .payloads
                        .insert(key.clone(), new.item_for_key(key).unwrap().clone());
                }
            }
            EditOp::ReloadItem { key, .. } => {
                rendering
                    .payloads
                    .insert(key.clone(), new.item_for_key(key).unwrap().clone());
            }
            _ => {}
        }
    }
}

// --- Generators ---

/// Unique names (small alphabet, so independently drawn snapshots share
/// identities and exercise moves and payload changes), each assigned a
/// section slot and a favorite flag.
fn entry_list() -> impl Strategy<Value = Vec<(usize, String, bool)>> {
    prop::collection::hash_set("[a-f]{1,3}", 0..12)
        .prop_flat_map(|names| {
            let names: Vec<String> = names.into_iter().collect();
            let len = names.len();
            (
                Just(names),
                prop::collection::vec((0..4usize, any::<bool>()), len),
            )
        })
        .prop_map(|(names, meta)| {
            names
                .into_iter()
                .zip(meta)
                .map(|(name, (section, favorite))| (section, name, favorite))
                .collect()
        })
}

fn build((mask, entries): (u8, Vec<(usize, String, bool)>)) -> ContactSnapshot {
    let sections: Vec<ContactSection> = ContactSection::ALL
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, section)| *section)
        .collect();

    let mut snapshot = Snapshot::new().append_sections(sections.clone()).unwrap();
    if sections.is_empty() {
        return snapshot;
    }
    for (slot, name, favorite) in entries {
        let mut contact = Contact::new(name);
        contact.is_favorite = favorite;
        snapshot = snapshot
            .append_items(vec![contact], &sections[slot % sections.len()])
            .unwrap();
    }
    snapshot
}

fn snapshots() -> impl Strategy<Value = ContactSnapshot> {
    (0u8..16, entry_list()).prop_map(build)
}

/// One builder mutation, as a user action would issue it.
#[derive(Clone, Debug)]
enum Command {
    Delete(String),
    Reload(String, bool),
    Append(String, usize),
}

fn commands() -> impl Strategy<Value = Vec<Command>> {
    prop::collection::vec(
        prop_oneof![
            "[a-f]{1,3}".prop_map(Command::Delete),
            ("[a-f]{1,3}", any::<bool>()).prop_map(|(name, favorite)| Command::Reload(name, favorite)),
            ("[a-f]{1,3}", 0..4usize).prop_map(|(name, section)| Command::Append(name, section)),
        ],
        0..8,
    )
}

fn run(snapshot: ContactSnapshot, commands: Vec<Command>) -> ContactSnapshot {
    commands
        .into_iter()
        .fold(snapshot, |snapshot, command| match command {
            Command::Delete(name) => snapshot.delete_items(&[Contact::new(name)]),
            Command::Reload(name, favorite) => {
                let mut contact = Contact::new(name);
                contact.is_favorite = favorite;
                snapshot.reload_items(vec![contact])
            }
            Command::Append(name, slot) => {
                let section = ContactSection::ALL[slot];
                // Duplicate identities and absent sections are caller
                // errors; the command stream just skips them.
                snapshot
                    .append_items(vec![Contact::new(name)], &section)
                    .unwrap_or(snapshot)
            }
        })
}

// --- Properties ---

proptest! {
    /// For any two snapshots, applying the script to a rendering of `old`
    /// yields a rendering equal to `new`.
    #[test]
    fn prop_apply_script_reproduces_new(old in snapshots(), new in snapshots()) {
        let script = diff(&old, &new);
        let mut rendering = render(&old);
        apply_script(&mut rendering, &script, &new);
        prop_assert_eq!(rendering, render(&new));
    }

    /// Same property when `new` is derived from `old` through builder
    /// mutations, including forced reload marks.
    #[test]
    fn prop_apply_script_after_mutations(old in snapshots(), cmds in commands()) {
        let new = run(old.clone(), cmds);
        let script = diff(&old, &new);
        let mut rendering = render(&old);
        apply_script(&mut rendering, &script, &new);
        prop_assert_eq!(rendering, render(&new));
    }

    /// Minimality: diffing a mark-free snapshot against itself is empty.
    #[test]
    fn prop_diff_self_is_empty(snapshot in snapshots()) {
        prop_assert!(diff(&snapshot, &snapshot).is_empty());
    }

    /// Deleting the same items twice equals deleting them once.
    #[test]
    fn prop_delete_is_idempotent(snapshot in snapshots(), names in prop::collection::vec("[a-f]{1,3}", 0..6)) {
        let targets: Vec<Contact> = names.into_iter().map(Contact::new).collect();
        let once = snapshot.delete_items(&targets);
        let twice = once.delete_items(&targets);
        prop_assert_eq!(render(&once), render(&twice));
    }

    /// Identity uniqueness: no key ever appears in two sections or twice
    /// in one section, no matter the builder sequence.
    #[test]
    fn prop_identity_unique(snapshot in snapshots(), cmds in commands()) {
        let snapshot = run(snapshot, cmds);
        let rendering = render(&snapshot);
        let all_keys: Vec<&ContactKey> = rendering
            .sections
            .iter()
            .flat_map(|(_, keys)| keys.iter())
            .collect();
        let distinct: std::collections::HashSet<&&ContactKey> = all_keys.iter().collect();
        prop_assert_eq!(all_keys.len(), distinct.len());
        prop_assert_eq!(all_keys.len(), snapshot.item_count());
    }

    /// A script never expresses a shared identity as delete+insert; moves
    /// keep row identity (the move+reload tie-break).
    #[test]
    fn prop_shared_identities_never_delete_insert(old in snapshots(), new in snapshots()) {
        let script = diff(&old, &new);
        for op in &script {
            match op {
                EditOp::DeleteItem { key, .. } => {
                    prop_assert!(new.item_for_key(key).is_none());
                }
                EditOp::InsertItem { key, .. } => {
                    prop_assert!(old.item_for_key(key).is_none());
                }
                _ => {}
            }
        }
    }
}
