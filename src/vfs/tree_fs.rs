//! This module provides the in-memory tree file system with snapshot-based undo.

use tracing::debug;

use crate::core::{FsBackend, Result, utils};
use crate::error::FsError;
use crate::layout;
use crate::vfs::resolve::{resolve, resolve_dir, resolve_dir_mut};
use crate::vfs::{Directory, Entry, File, History, Node};

/// A virtual file system (VFS) that keeps a single tree of files and directories in memory,
/// rooted at the home directory `~`.
///
/// `TreeFS` offers navigation, listing, creation, removal and file reading relative to a
/// current working directory, and single-step undo of every committed mutation.
///
/// ### Internal state
///
/// * `tree` — The root `~` directory. All nodes are owned by their parent's children map:
///   no parent pointers, no shared nodes.
///
/// * `cwd` — Current Working Directory, an absolute normalized path (`~` or `~/a/b`).
///   - Determines where `mkdir()`, `mkfile()`, `rm()`, `read()` and `cd()` operate.
///   - Default value: `~`.
///
/// * `history` — Deep copies of the tree taken right before each committed mutation.
///
/// * `initial` — The tree restored by `reset()`.
///
/// ### Invariants
///
/// 1. **Root kind**: `tree` is a [`Directory`] named `~`.
/// 2. **Valid cwd**: after every operation `cwd` resolves to a directory of `tree`.
/// 3. **Atomic commit**: a mutation either pushes one snapshot and changes the tree, or
///    changes nothing at all (tree, history and cwd).
/// 4. **Detached snapshots**: snapshots never share structure with the live tree.
///
/// ### Thread Safety
///
/// One `TreeFS` is the single writer of its tree. It is not synchronized; serialize
/// access at the application level if it ever has to cross threads.
///
/// ### Example
///
/// ```
/// use fs_escape::{FsBackend, TreeFS};
///
/// let mut fs = TreeFS::new();
/// fs.cd("documents").unwrap();
/// fs.mkdir("vault").unwrap();
/// assert!(fs.exists("~/documents/vault"));
///
/// fs.undo().unwrap();
/// assert!(!fs.exists("~/documents/vault"));
/// ```
#[derive(Debug, Clone)]
pub struct TreeFS {
    tree: Directory,
    cwd: String,
    history: History,
    initial: Directory,
}

impl TreeFS {
    /// Creates a new TreeFS over the standard initial layout.
    pub fn new() -> Self {
        Self::with_tree(layout::initial_tree())
    }

    /// Creates a new TreeFS over `initial`, which becomes the root `~` whatever its name.
    pub fn with_tree(mut initial: Directory) -> Self {
        initial.name = utils::ROOT.to_string();
        Self {
            tree: initial.clone(),
            cwd: utils::ROOT.to_string(),
            history: History::new(),
            initial,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn current_dir(&self) -> Result<&Directory> {
        resolve_dir(&self.tree, &self.cwd).ok_or_else(|| FsError::NotADirectory {
            path: self.cwd.clone(),
        })
    }

    /// Applies `change` to the current directory and records the tree as it was before.
    /// Preconditions must be checked before calling: `change` cannot fail.
    fn commit<F: FnOnce(&mut Directory)>(&mut self, change: F) -> Result<()> {
        let snapshot = self.tree.clone();
        let dir = resolve_dir_mut(&mut self.tree, &self.cwd).ok_or_else(|| FsError::NotADirectory {
            path: self.cwd.clone(),
        })?;
        change(dir);
        self.history.push(snapshot);
        Ok(())
    }

    fn create(&mut self, name: &str, entry: Entry) -> Result<()> {
        if name.is_empty() {
            debug!("create rejected: empty name");
            return Err(FsError::InvalidName);
        }
        let path = utils::join(&self.cwd, name);
        if self.current_dir()?.child(name).is_some() {
            debug!("create rejected: {path} already exists");
            return Err(FsError::AlreadyExists { path });
        }
        self.commit(|dir| {
            dir.children.insert(name.to_string(), entry);
        })?;
        debug!(history = self.history.len(), "created {path}");
        Ok(())
    }

    fn revalidate_cwd(&mut self) {
        if resolve_dir(&self.tree, &self.cwd).is_none() {
            debug!("{} vanished, back to {}", self.cwd, utils::ROOT);
            self.cwd = utils::ROOT.to_string();
        }
    }
}

impl Default for TreeFS {
    fn default() -> Self {
        Self::new()
    }
}

impl FsBackend for TreeFS {
    /// Returns current working directory.
    fn cwd(&self) -> &str {
        &self.cwd
    }

    fn tree(&self) -> &Directory {
        &self.tree
    }

    fn resolve(&self, path: &str) -> Option<Node<'_>> {
        resolve(&self.tree, path)
    }

    /// Returns the immediate children of the current directory.
    ///
    /// Directories come before files; each group is ordered by name. The order is derived
    /// on every call, never stored.
    fn ls(&self) -> Vec<&Entry> {
        self.current_dir()
            .map(Directory::sorted)
            .unwrap_or_default()
    }

    /// Changes the current working directory to its child `name`.
    /// An error is returned, and cwd kept, if the target is missing or is a file.
    fn cd(&mut self, name: &str) -> Result<()> {
        let target = utils::join(&self.cwd, name);
        self.goto(&target)
    }

    /// Changes the current working directory to the absolute `path`.
    fn goto(&mut self, path: &str) -> Result<()> {
        let Some(target) = utils::normalize(path) else {
            debug!("goto rejected: {path} is not absolute");
            return Err(FsError::NotFound {
                path: path.to_string(),
            });
        };
        match resolve(&self.tree, &target) {
            Some(entry) if entry.is_dir() => {
                debug!("cwd {} -> {target}", self.cwd);
                self.cwd = target;
                Ok(())
            }
            Some(_) => {
                debug!("goto rejected: {target} not a directory");
                Err(FsError::NotADirectory { path: target })
            }
            None => {
                debug!("goto rejected: {target} does not exist");
                Err(FsError::NotFound { path: target })
            }
        }
    }

    /// Creates an empty directory in the current directory.
    fn mkdir(&mut self, name: &str) -> Result<()> {
        self.create(name, Directory::new(name).into())
    }

    /// Creates an empty file in the current directory.
    fn mkfile(&mut self, name: &str) -> Result<()> {
        self.create(name, File::new(name, "").into())
    }

    /// Removes a file or directory from the current directory.
    /// Directories are removed with all their contents, without confirmation.
    fn rm(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            debug!("rm rejected: empty name");
            return Err(FsError::InvalidName);
        }
        let path = utils::join(&self.cwd, name);
        if self.current_dir()?.child(name).is_none() {
            debug!("rm rejected: {path} does not exist");
            return Err(FsError::NotFound { path });
        }
        self.commit(|dir| {
            dir.children.remove(name);
        })?;
        debug!(history = self.history.len(), "removed {path}");
        Ok(())
    }

    /// Reads the content of a file in the current directory.
    fn read(&self, name: &str) -> Result<&str> {
        let path = utils::join(&self.cwd, name);
        match resolve(&self.tree, &path) {
            Some(Node::File(file)) => Ok(&file.content),
            Some(Node::Directory(_)) => Err(FsError::IsADirectory { path }),
            None => Err(FsError::NotFound { path }),
        }
    }

    /// Restores the most recent snapshot. Only that one snapshot is consumed; there is no redo.
    /// If cwd does not exist as a directory in the restored tree, it falls back to `~`.
    fn undo(&mut self) -> Result<()> {
        let Some(snapshot) = self.history.pop() else {
            debug!("undo rejected: empty history");
            return Err(FsError::NothingToUndo);
        };
        self.tree = snapshot;
        self.revalidate_cwd();
        debug!(history = self.history.len(), "undo");
        Ok(())
    }

    fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    fn reset(&mut self) {
        self.tree = self.initial.clone();
        self.cwd = utils::ROOT.to_string();
        self.history.clear();
        debug!("reset to the initial tree");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tree with one directory of each kind of interest:
    /// `~/home/user/config.txt`, `~/etc`, `~/readme.md`.
    fn setup_test_vfs() -> TreeFS {
        TreeFS::with_tree(
            Directory::new("~")
                .with(
                    Directory::new("home")
                        .with(
                            Directory::new("user")
                                .with(File::new("config.txt", "Config content").into())
                                .into(),
                        )
                        .into(),
                )
                .with(Directory::new("etc").into())
                .with(File::new("readme.md", "Project docs").into()),
        )
    }

    mod creations {
        use super::*;

        #[test]
        fn test_new_tree_fs() {
            let fs = TreeFS::new();
            assert_eq!(fs.cwd(), "~");
            assert!(!fs.can_undo());
            assert_eq!(fs.tree().name, "~");
            assert!(fs.exists("~/documents/clue.txt"));
        }

        #[test]
        fn test_with_tree_renames_root() {
            let fs = TreeFS::with_tree(Directory::new("home"));
            assert_eq!(fs.tree().name, "~");
            assert!(fs.ls().is_empty());
        }
    }

    mod cd {
        use super::*;

        #[test]
        fn test_cd_child() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.cd("home")?;
            assert_eq!(vfs.cwd(), "~/home");
            vfs.cd("user")?;
            assert_eq!(vfs.cwd(), "~/home/user");
            Ok(())
        }

        #[test]
        fn test_cd_nested_name() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.cd("home/user")?;
            assert_eq!(vfs.cwd(), "~/home/user");
            Ok(())
        }

        #[test]
        fn test_cd_nonexistent_is_noop() {
            let mut vfs = setup_test_vfs();
            let result = vfs.cd("nonexistent");
            assert_eq!(
                result,
                Err(FsError::NotFound {
                    path: "~/nonexistent".to_string()
                })
            );
            assert_eq!(vfs.cwd(), "~");
        }

        #[test]
        fn test_cd_file_is_noop() {
            let mut vfs = setup_test_vfs();
            let result = vfs.cd("readme.md");
            assert!(matches!(result, Err(FsError::NotADirectory { .. })));
            assert_eq!(vfs.cwd(), "~");
        }

        #[test]
        fn test_cd_does_not_touch_history() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.cd("home")?;
            assert!(!vfs.can_undo());
            Ok(())
        }
    }

    mod goto {
        use super::*;

        #[test]
        fn test_goto_absolute() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.goto("~/home/user")?;
            assert_eq!(vfs.cwd(), "~/home/user");
            vfs.goto("~")?;
            assert_eq!(vfs.cwd(), "~");
            Ok(())
        }

        #[test]
        fn test_goto_normalizes() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.goto("~/home//user/")?;
            assert_eq!(vfs.cwd(), "~/home/user");
            vfs.goto("~/")?;
            assert_eq!(vfs.cwd(), "~");
            Ok(())
        }

        #[test]
        fn test_goto_invalid_is_noop() {
            let mut vfs = setup_test_vfs();
            vfs.goto("~/home").unwrap();
            assert!(vfs.goto("~/home/user/config.txt").is_err());
            assert!(vfs.goto("~/missing").is_err());
            assert!(vfs.goto("home").is_err());
            assert!(vfs.goto("..").is_err());
            assert_eq!(vfs.cwd(), "~/home");
        }
    }

    mod ls {
        use super::*;

        #[test]
        fn test_ls_root() {
            let vfs = setup_test_vfs();
            let names: Vec<_> = vfs.ls().iter().map(|e| e.name()).collect();
            assert_eq!(names, vec!["etc", "home", "readme.md"]);
        }

        #[test]
        fn test_ls_directories_first() {
            let mut vfs = TreeFS::with_tree(Directory::new("~"));
            for name in ["b.txt", "z", "a.txt", "y"] {
                if name.ends_with(".txt") {
                    vfs.mkfile(name).unwrap();
                } else {
                    vfs.mkdir(name).unwrap();
                }
            }
            let names: Vec<_> = vfs.ls().iter().map(|e| e.name()).collect();
            assert_eq!(names, vec!["y", "z", "a.txt", "b.txt"]);
        }

        #[test]
        fn test_ls_empty_directory() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.cd("etc")?;
            assert!(vfs.ls().is_empty());
            Ok(())
        }
    }

    mod mkdir_mkfile {
        use super::*;

        #[test]
        fn test_mkdir() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.mkdir("docs")?;
            assert!(vfs.resolve("~/docs").unwrap().is_dir());
            assert_eq!(vfs.history().len(), 1);
            Ok(())
        }

        #[test]
        fn test_mkfile_is_empty() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.cd("etc")?;
            vfs.mkfile("hosts")?;
            assert_eq!(vfs.read("hosts")?, "");
            assert!(vfs.resolve("~/etc/hosts").unwrap().is_file());
            Ok(())
        }

        #[test]
        fn test_create_existing_is_noop() {
            let mut vfs = setup_test_vfs();
            let before = vfs.tree().clone();

            assert_eq!(
                vfs.mkdir("etc"),
                Err(FsError::AlreadyExists {
                    path: "~/etc".to_string()
                })
            );
            assert!(matches!(vfs.mkfile("etc"), Err(FsError::AlreadyExists { .. })));
            assert!(matches!(vfs.mkdir("readme.md"), Err(FsError::AlreadyExists { .. })));
            assert!(matches!(vfs.mkfile("readme.md"), Err(FsError::AlreadyExists { .. })));

            assert_eq!(vfs.tree(), &before);
            assert!(!vfs.can_undo());
        }

        #[test]
        fn test_create_empty_name_is_noop() {
            let mut vfs = setup_test_vfs();
            let before = vfs.tree().clone();
            assert_eq!(vfs.mkdir(""), Err(FsError::InvalidName));
            assert_eq!(vfs.mkfile(""), Err(FsError::InvalidName));
            assert_eq!(vfs.tree(), &before);
            assert!(!vfs.can_undo());
        }

        #[test]
        fn test_create_name_with_separator() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.mkfile("a/b")?;
            assert!(vfs.tree().child("a/b").is_some());
            assert!(vfs.resolve("~/a/b").is_none());
            vfs.rm("a/b")?;
            assert!(vfs.tree().child("a/b").is_none());
            Ok(())
        }
    }

    mod rm {
        use super::*;

        #[test]
        fn test_rm_file() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.rm("readme.md")?;
            assert!(!vfs.exists("~/readme.md"));
            assert_eq!(vfs.history().len(), 1);
            Ok(())
        }

        #[test]
        fn test_rm_directory_recursively() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.rm("home")?;
            assert!(!vfs.exists("~/home"));
            assert!(!vfs.exists("~/home/user/config.txt"));
            Ok(())
        }

        #[test]
        fn test_rm_nonexistent_is_noop() {
            let mut vfs = setup_test_vfs();
            let before = vfs.tree().clone();
            assert_eq!(
                vfs.rm("missing"),
                Err(FsError::NotFound {
                    path: "~/missing".to_string()
                })
            );
            assert_eq!(vfs.rm(""), Err(FsError::InvalidName));
            assert_eq!(vfs.tree(), &before);
            assert!(!vfs.can_undo());
        }

        #[test]
        fn test_rm_only_in_cwd() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.cd("home")?;
            assert!(vfs.rm("readme.md").is_err());
            assert!(vfs.exists("~/readme.md"));
            Ok(())
        }
    }

    mod read {
        use super::*;

        #[test]
        fn test_read_file() -> Result<()> {
            let mut vfs = setup_test_vfs();
            assert_eq!(vfs.read("readme.md")?, "Project docs");
            vfs.cd("home/user")?;
            assert_eq!(vfs.read("config.txt")?, "Config content");
            Ok(())
        }

        #[test]
        fn test_read_directory() {
            let vfs = setup_test_vfs();
            assert_eq!(
                vfs.read("etc"),
                Err(FsError::IsADirectory {
                    path: "~/etc".to_string()
                })
            );
        }

        #[test]
        fn test_read_missing() {
            let vfs = setup_test_vfs();
            assert!(matches!(vfs.read("nope.txt"), Err(FsError::NotFound { .. })));
        }
    }

    mod undo {
        use super::*;

        #[test]
        fn test_undo_empty_history() {
            let mut vfs = setup_test_vfs();
            let before = vfs.tree().clone();
            assert_eq!(vfs.undo(), Err(FsError::NothingToUndo));
            assert_eq!(vfs.tree(), &before);
            assert_eq!(vfs.cwd(), "~");
        }

        #[test]
        fn test_undo_n_mutations() -> Result<()> {
            let mut vfs = setup_test_vfs();
            let original = vfs.tree().clone();

            vfs.mkdir("a")?;
            vfs.cd("a")?;
            vfs.mkfile("b")?;
            vfs.goto("~")?;
            vfs.rm("readme.md")?;
            assert_eq!(vfs.history().len(), 3);

            for _ in 0..3 {
                vfs.undo()?;
            }
            assert_eq!(vfs.tree(), &original);
            assert!(!vfs.can_undo());

            assert_eq!(vfs.undo(), Err(FsError::NothingToUndo));
            assert_eq!(vfs.tree(), &original);
            Ok(())
        }

        #[test]
        fn test_create_remove_round_trip() -> Result<()> {
            let mut vfs = setup_test_vfs();
            let original = vfs.tree().clone();
            vfs.mkfile("x")?;
            vfs.rm("x")?;
            vfs.undo()?;
            assert!(vfs.exists("~/x"));
            vfs.undo()?;
            assert_eq!(vfs.tree(), &original);
            Ok(())
        }

        #[test]
        fn test_undo_resets_vanished_cwd() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.mkdir("a")?;
            vfs.cd("a")?;
            vfs.undo()?;
            assert_eq!(vfs.cwd(), "~");
            Ok(())
        }

        #[test]
        fn test_undo_keeps_valid_cwd() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.cd("home")?;
            vfs.mkdir("a")?;
            vfs.undo()?;
            assert_eq!(vfs.cwd(), "~/home");
            Ok(())
        }

        #[test]
        fn test_undo_restores_removed_subtree() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.rm("home")?;
            vfs.undo()?;
            assert_eq!(
                vfs.resolve("~/home/user/config.txt")
                    .and_then(Node::as_file)
                    .map(|f| f.content.as_str()),
                Some("Config content")
            );
            Ok(())
        }

        #[test]
        fn test_snapshot_not_aliased() -> Result<()> {
            let mut vfs = setup_test_vfs();
            let original = vfs.tree().clone();
            vfs.mkdir("a")?;

            vfs.cd("a")?;
            vfs.mkfile("inner")?;
            vfs.mkdir("deeper")?;
            vfs.undo()?;
            vfs.undo()?;
            assert!(vfs.resolve("~/a").unwrap().as_dir().unwrap().children.is_empty());

            vfs.undo()?;
            assert_eq!(vfs.tree(), &original);
            Ok(())
        }

        #[test]
        fn test_commit_without_cwd_records_nothing() {
            let mut vfs = setup_test_vfs();
            let before = vfs.tree().clone();
            vfs.cwd = "~/gone".to_string();
            assert_eq!(
                vfs.commit(|dir| dir.children.clear()),
                Err(FsError::NotADirectory {
                    path: "~/gone".to_string()
                })
            );
            assert_eq!(vfs.tree(), &before);
            assert!(!vfs.can_undo());
        }

        #[test]
        fn test_restored_tree_not_aliased() -> Result<()> {
            let mut vfs = setup_test_vfs();
            vfs.mkdir("a")?;
            vfs.mkdir("b")?;
            vfs.undo()?;
            // mutating the restored tree must not leak into the remaining snapshot
            vfs.mkfile("c")?;
            vfs.undo()?;
            vfs.undo()?;
            assert!(!vfs.exists("~/a"));
            assert!(!vfs.exists("~/c"));
            Ok(())
        }
    }

    mod reset {
        use super::*;

        #[test]
        fn test_reset() -> Result<()> {
            let mut vfs = setup_test_vfs();
            let original = vfs.tree().clone();
            vfs.cd("home")?;
            vfs.rm("user")?;
            vfs.mkdir("other")?;
            vfs.reset();
            assert_eq!(vfs.tree(), &original);
            assert_eq!(vfs.cwd(), "~");
            assert!(!vfs.can_undo());
            Ok(())
        }
    }
}
