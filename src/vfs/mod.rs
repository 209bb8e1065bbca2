mod entry;
mod history;
pub mod resolve;
mod tree_fs;

pub use entry::{Directory, Entry, EntryType, File, Node, Walked};
pub use history::History;
pub use tree_fs::TreeFS;
