//! Error types of the in-memory file system.

use thiserror::Error;

/// Reason a file system operation was rejected.
///
/// A rejected operation never changes anything: the tree, the undo history and
/// the current path stay exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// The path or name does not resolve.
    #[error("no such file or directory: {path}")]
    NotFound { path: String },

    /// A create operation targets a name that is already taken.
    #[error("{path} already exists")]
    AlreadyExists { path: String },

    /// A directory was expected.
    #[error("{path} not a directory")]
    NotADirectory { path: String },

    /// A file was expected.
    #[error("{path} is a directory")]
    IsADirectory { path: String },

    #[error("invalid name: empty")]
    InvalidName,

    #[error("nothing to undo")]
    NothingToUndo,
}
