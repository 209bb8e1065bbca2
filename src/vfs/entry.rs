use std::collections::BTreeMap;

use crate::core::utils;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryType {
    Directory,
    File,
}

/// A node of the tree: a file or a directory.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    File(File),
    Directory(Directory),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::File(file) => &file.name,
            Entry::Directory(dir) => &dir.name,
        }
    }

    pub fn entry_type(&self) -> EntryType {
        match self {
            Entry::File(_) => EntryType::File,
            Entry::Directory(_) => EntryType::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        self.entry_type() == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type() == EntryType::Directory
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Directory(_) => None,
        }
    }

    pub fn as_dir(&self) -> Option<&Directory> {
        match self {
            Entry::Directory(dir) => Some(dir),
            Entry::File(_) => None,
        }
    }

    pub fn as_dir_mut(&mut self) -> Option<&mut Directory> {
        match self {
            Entry::Directory(dir) => Some(dir),
            Entry::File(_) => None,
        }
    }
}

/// Borrowed view of a node. Unlike `&Entry` it can also point at the root,
/// which is held as a bare [`Directory`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Node<'a> {
    File(&'a File),
    Directory(&'a Directory),
}

impl<'a> Node<'a> {
    pub fn name(self) -> &'a str {
        match self {
            Node::File(file) => &file.name,
            Node::Directory(dir) => &dir.name,
        }
    }

    pub fn is_file(self) -> bool {
        matches!(self, Node::File(_))
    }

    pub fn is_dir(self) -> bool {
        matches!(self, Node::Directory(_))
    }

    pub fn as_file(self) -> Option<&'a File> {
        match self {
            Node::File(file) => Some(file),
            Node::Directory(_) => None,
        }
    }

    pub fn as_dir(self) -> Option<&'a Directory> {
        match self {
            Node::Directory(dir) => Some(dir),
            Node::File(_) => None,
        }
    }
}

impl<'a> From<&'a Entry> for Node<'a> {
    fn from(entry: &'a Entry) -> Self {
        match entry {
            Entry::File(file) => Node::File(file),
            Entry::Directory(dir) => Node::Directory(dir),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub name: String,
    pub content: String,
}

impl File {
    pub fn new<N: Into<String>, C: Into<String>>(name: N, content: C) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A directory owns its children, keyed by name.
///
/// There are no parent pointers and no shared nodes, so `clone()` yields a
/// structurally independent copy of the whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    pub name: String,
    pub children: BTreeMap<String, Entry>,
}

impl Directory {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            children: BTreeMap::new(),
        }
    }

    /// Builder helper: adds `entry` as a child and returns the directory.
    pub fn with(mut self, entry: Entry) -> Self {
        self.children.insert(entry.name().to_string(), entry);
        self
    }

    pub fn child(&self, name: &str) -> Option<&Entry> {
        self.children.get(name)
    }

    /// Children in display order: directories first, then files, each group by name.
    pub fn sorted(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.children.values().collect();
        entries.sort_by(|a, b| {
            a.entry_type()
                .cmp(&b.entry_type())
                .then_with(|| a.name().cmp(b.name()))
        });
        entries
    }

    /// Depth-first pre-order walk of everything below this directory.
    /// `path` is the absolute path of `self`; yielded paths are built on it.
    /// Direct children are at depth 1.
    pub fn walk(&self, path: &str) -> Vec<Walked<'_>> {
        let mut out = Vec::new();
        self.walk_into(path, 1, &mut out);
        out
    }

    fn walk_into<'a>(&'a self, path: &str, depth: usize, out: &mut Vec<Walked<'a>>) {
        for entry in self.sorted() {
            let entry_path = utils::join(path, entry.name());
            if let Entry::Directory(dir) = entry {
                out.push(Walked {
                    path: entry_path.clone(),
                    depth,
                    entry,
                });
                dir.walk_into(&entry_path, depth + 1, out);
            } else {
                out.push(Walked {
                    path: entry_path,
                    depth,
                    entry,
                });
            }
        }
    }
}

/// One step of [`Directory::walk`].
#[derive(Debug, Clone, PartialEq)]
pub struct Walked<'a> {
    pub path: String,
    pub depth: usize,
    pub entry: &'a Entry,
}

impl From<File> for Entry {
    fn from(file: File) -> Self {
        Entry::File(file)
    }
}

impl From<Directory> for Entry {
    fn from(dir: Directory) -> Self {
        Entry::Directory(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_dir() -> Directory {
        Directory::new("~")
            .with(File::new("b.txt", "").into())
            .with(Directory::new("z").with(File::new("inner.txt", "x").into()).into())
            .with(File::new("a.txt", "").into())
            .with(Directory::new("y").into())
    }

    #[test]
    fn test_entry_kind() {
        let file: Entry = File::new("a.txt", "hello").into();
        assert!(file.is_file());
        assert!(!file.is_dir());
        assert_eq!(file.entry_type(), EntryType::File);
        assert_eq!(file.as_file().unwrap().content, "hello");
        assert!(file.as_dir().is_none());

        let dir: Entry = Directory::new("docs").into();
        assert!(dir.is_dir());
        assert_eq!(dir.name(), "docs");
        assert!(dir.as_file().is_none());
    }

    #[test]
    fn test_sorted_directories_first() {
        let dir = setup_dir();
        let names: Vec<_> = dir.sorted().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["y", "z", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_walk() {
        let dir = setup_dir();
        let paths: Vec<_> = dir.walk("~").into_iter().map(|w| w.path).collect();
        assert_eq!(
            paths,
            vec!["~/y", "~/z", "~/z/inner.txt", "~/a.txt", "~/b.txt"]
        );
    }

    #[test]
    fn test_walk_depth_ignores_slash_in_names() {
        let dir = Directory::new("~")
            .with(Directory::new("a/b").with(File::new("c", "").into()).into());
        let steps: Vec<_> = dir
            .walk("~")
            .into_iter()
            .map(|w| (w.entry.name().to_string(), w.depth))
            .collect();
        assert_eq!(steps, vec![("a/b".to_string(), 1), ("c".to_string(), 2)]);
    }

    #[test]
    fn test_node_view() {
        let root = setup_dir();
        let node = Node::Directory(&root);
        assert!(node.is_dir());
        assert_eq!(node.name(), "~");
        let child: Node = root.child("a.txt").unwrap().into();
        assert!(child.is_file());
        assert_eq!(child.as_file().unwrap().name, "a.txt");
        assert!(child.as_dir().is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = setup_dir();
        let mut copy = original.clone();
        copy.children
            .get_mut("z")
            .and_then(Entry::as_dir_mut)
            .unwrap()
            .children
            .clear();
        assert_ne!(original, copy);
        assert!(original.child("z").unwrap().as_dir().unwrap().child("inner.txt").is_some());
    }
}
