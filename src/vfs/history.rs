//! Linear single-step undo log of whole-tree snapshots.

use crate::vfs::Directory;

/// Snapshots of the tree taken right before each committed mutation, most recent last.
///
/// A snapshot is an owned deep copy: later changes to the live tree never reach it,
/// and popping it hands ownership back without sharing anything with the tree it replaces.
#[derive(Debug, Default, Clone)]
pub struct History {
    snapshots: Vec<Directory>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `snapshot`, a copy taken before a mutation.
    pub fn push(&mut self, snapshot: Directory) {
        self.snapshots.push(snapshot);
    }

    /// Takes the most recent snapshot out of the log.
    pub fn pop(&mut self) -> Option<Directory> {
        self.snapshots.pop()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
