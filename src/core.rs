use crate::error::FsError;
use crate::vfs::{Directory, Entry, Node};

/// Operations a simulated file system offers to its consumers (the command widget,
/// the tutorial runner, a graphical explorer).
///
/// Names are resolved relative to the current working directory, paths are absolute
/// and start with `~`. Every method returning `Err` leaves the file system unchanged.
pub trait FsBackend {
    /// Returns the current working directory, always an existing directory.
    fn cwd(&self) -> &str;

    /// Returns the whole tree: the `~` directory.
    fn tree(&self) -> &Directory;

    /// Resolves an absolute path.
    fn resolve(&self, path: &str) -> Option<Node<'_>>;

    /// Checks if an absolute `path` exists.
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }

    /// Lists the current directory: directories first, then files, each by name.
    fn ls(&self) -> Vec<&Entry>;

    /// Enters the child directory `name` of the current directory.
    fn cd(&mut self, name: &str) -> Result<()>;

    /// Jumps to the absolute directory `path`.
    fn goto(&mut self, path: &str) -> Result<()>;

    /// Creates an empty directory `name` in the current directory.
    fn mkdir(&mut self, name: &str) -> Result<()>;

    /// Creates an empty file `name` in the current directory.
    fn mkfile(&mut self, name: &str) -> Result<()>;

    /// Removes the child `name` of the current directory, with its whole subtree.
    fn rm(&mut self, name: &str) -> Result<()>;

    /// Returns the content of the file `name` in the current directory.
    fn read(&self, name: &str) -> Result<&str>;

    /// Restores the tree as it was before the last committed mutation.
    fn undo(&mut self) -> Result<()>;

    fn can_undo(&self) -> bool;

    /// Restores the initial tree, the root as cwd, and forgets the history.
    fn reset(&mut self);
}

pub type Result<T> = std::result::Result<T, FsError>;

pub mod utils {
    //! Helpers for `~`-rooted slash-separated paths.

    /// Name and path of the home directory.
    pub const ROOT: &str = "~";

    /// Splits an absolute path into its segment names.
    /// Returns `None` if `path` does not start at `~`.
    /// Empty segments (doubled or trailing `/`) are skipped.
    pub fn segments(path: &str) -> Option<Vec<&str>> {
        let rest = path.strip_prefix(ROOT)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }
        Some(rest.split('/').filter(|s| !s.is_empty()).collect())
    }

    /// Returns the canonical form of an absolute path: `~` or `~/a/b`.
    pub fn normalize(path: &str) -> Option<String> {
        let segments = segments(path)?;
        Some(segments.iter().fold(ROOT.to_string(), |acc, s| join(&acc, s)))
    }

    /// Appends `name` to the directory path `dir`.
    pub fn join(dir: &str, name: &str) -> String {
        if dir == ROOT {
            format!("{ROOT}/{name}")
        } else {
            format!("{dir}/{name}")
        }
    }

    /// Returns the path of the enclosing directory. The root is its own parent.
    pub fn parent(path: &str) -> String {
        match path.rfind('/') {
            Some(pos) if pos > 0 => path[..pos].to_string(),
            _ => ROOT.to_string(),
        }
    }

}
