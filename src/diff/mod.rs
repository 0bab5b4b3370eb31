pub mod classify;
pub mod engine;
pub mod entry;

pub use classify::{
    group_by_endpoint, ChangeClassifier, ChangeSet, EntryMap, IncompatibilitySet, Summary,
};
pub use engine::DiffEngine;
pub use entry::ChangeEntry;
