//! Path resolution: walks the tree from the root along the segments of an absolute path.

use crate::core::utils;
use crate::vfs::{Directory, Node};

/// Resolves `path` against `root`, the `~` directory.
///
/// `~` and `~/` resolve to `root` itself. A segment that is missing, or that would
/// have to descend through a file, fails the resolution. Paths that do not start
/// at `~` never resolve. `.` and `..` have no special meaning.
pub fn resolve<'a>(root: &'a Directory, path: &str) -> Option<Node<'a>> {
    let segments = utils::segments(path)?;
    let mut node = Node::Directory(root);
    for segment in segments {
        node = node.as_dir()?.child(segment)?.into();
    }
    Some(node)
}

/// Like [`resolve`], but only succeeds on directories.
pub fn resolve_dir<'a>(root: &'a Directory, path: &str) -> Option<&'a Directory> {
    resolve(root, path)?.as_dir()
}

pub(crate) fn resolve_dir_mut<'a>(root: &'a mut Directory, path: &str) -> Option<&'a mut Directory> {
    let segments = utils::segments(path)?;
    let mut dir = root;
    for segment in segments {
        dir = dir.children.get_mut(segment)?.as_dir_mut()?;
    }
    Some(dir)
}
