//! An in-memory, single-user simulation of a hierarchical file system for learning
//! file management, with snapshot-based undo.
//!
//! ### Overview
//!
//! `fs-escape` keeps one tree of files and directories rooted at the home directory `~`,
//! a current working directory and an undo log. On top of that core it offers a
//! line-oriented command widget (`ls`, `cd`, `mkdir`, `touch`, `rm`, `cat`, ...) and a
//! scripted tutorial whose tasks are checked against the state of the tree.
//!
//! **Key ideas**:
//! - **Tagged nodes**: a node is either a `File` or a `Directory`; every operation handles both.
//! - **Quiet failures**: an operation that cannot apply changes nothing and says why in its `Err`.
//! - **Snapshot undo**: every committed mutation first records a detached copy of the tree.
//! - **One writer**: a `TreeFS` owns its tree; consumers go through the `FsBackend` trait.

mod core;
pub mod error;
pub mod layout;
pub mod quest;
pub mod shell;
mod vfs;

pub use crate::core::{FsBackend, Result, utils};
pub use error::FsError;
pub use vfs::resolve::{resolve, resolve_dir};
pub use vfs::{Directory, Entry, EntryType, File, History, Node, TreeFS, Walked};
