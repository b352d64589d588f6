//! # Sectioned
//!
//! A sectioned, diffable list core: an ordered collection of sections and
//! identity-keyed items, with builder operations that produce new snapshot
//! values and a reconciliation engine that turns two snapshots into a
//! minimal edit script for a rendering collaborator.
//!
//! ## Core Concepts
//!
//! - **Snapshot**: one complete list state; a value, never mutated in place
//! - **Identity**: the stable key distinguishing logical rows across snapshots
//! - **Edit script**: ordered insert/delete/move/reload operations
//! - **Source**: the controller owning the currently applied snapshot
//!
//! ## Example
//!
//! ```ignore
//! use sectioned::contacts::{Contact, ContactSection};
//! use sectioned::ListSource;
//!
//! let source = ListSource::new();
//!
//! let snapshot = source
//!     .snapshot()
//!     .append_sections(vec![ContactSection::Yourself, ContactSection::Family])?
//!     .append_items(vec![Contact::new("George")], &ContactSection::Yourself)?
//!     .append_items(vec![Contact::new("Mom")], &ContactSection::Family)?;
//!
//! // The renderer consumes the script; the source adopts the snapshot.
//! let script = source.apply(snapshot);
//! ```

pub mod contacts;
pub mod diff;
pub mod error;
pub mod snapshot;
pub mod source;
pub mod types;

// Re-exports
pub use diff::{diff, EditOp, EditScript};
pub use error::{Result, SnapshotError};
pub use snapshot::Snapshot;
pub use source::ListSource;
pub use types::{Diffable, ItemPosition};
