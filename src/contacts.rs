//! The concrete contacts domain: section tags and the contact item type.
//!
//! Rendering, navigation, and form handling live with collaborators; this
//! module only supplies the data the engine works over, plus the section
//! display titles a header view looks up.

use crate::types::Diffable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of contact list sections, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactSection {
    Yourself,
    Family,
    CloseFriends,
    Friends,
}

impl ContactSection {
    /// All sections in display order.
    pub const ALL: [ContactSection; 4] = [
        ContactSection::Yourself,
        ContactSection::Family,
        ContactSection::CloseFriends,
        ContactSection::Friends,
    ];

    /// Header label for the section.
    pub fn title(&self) -> &'static str {
        match self {
            ContactSection::Yourself => "You",
            ContactSection::Family => "Family",
            ContactSection::CloseFriends => "Close Friends",
            ContactSection::Friends => "Friends",
        }
    }
}

/// Stable identity key for a contact.
///
/// Currently derived from the display name, so renaming a contact is a
/// delete+insert rather than an update. The engine only ever sees the key
/// type, so swapping in a generated stable id later touches nothing here
/// but [`Diffable::key`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactKey(pub String);

impl fmt::Debug for ContactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContactKey({})", self.0)
    }
}

/// A contact row. A plain value: toggling the favorite flag on one copy
/// never bleeds into a snapshot that was captured earlier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub is_favorite: bool,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_favorite: false,
        }
    }

    /// Builder-style favorite marker.
    pub fn favorite(mut self) -> Self {
        self.is_favorite = true;
        self
    }

    pub fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }
}

impl Diffable for Contact {
    type Key = ContactKey;

    fn key(&self) -> ContactKey {
        ContactKey(self.name.clone())
    }
}
