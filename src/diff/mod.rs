//! Snapshot reconciliation: edit scripts and the diff engine.

mod engine;
mod script;

pub use engine::diff;
pub use script::{EditOp, EditScript};
