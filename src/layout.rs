//! The tree every session starts from.

use crate::core::utils::ROOT;
use crate::vfs::{Directory, File};

pub const CLUE: &str = "The next step is to create a secret vault. Make a new directory called \"vault\" inside your current directory (~/documents).";

/// Builds the initial home directory.
pub fn initial_tree() -> Directory {
    Directory::new(ROOT)
        .with(
            Directory::new("projects")
                .with(
                    Directory::new("game-engine")
                        .with(File::new("README.md", "Project setup instructions.").into())
                        .into(),
                )
                .into(),
        )
        .with(
            Directory::new("documents")
                .with(File::new("clue.txt", CLUE).into())
                .into(),
        )
        .with(Directory::new("mystery_box").into())
        .with(File::new("useless_file.txt", "This file is not useful. You can delete it.").into())
}
