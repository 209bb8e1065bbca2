//! The scripted tutorial: a fixed sequence of tasks checked against the file system.
//!
//! A task only inspects the tree and the current path, it never changes them.

use tracing::info;

use crate::core::FsBackend;
use crate::vfs::resolve::resolve;
use crate::vfs::{Directory, Node};

pub struct Task {
    pub title: &'static str,
    pub description: &'static str,
    pub hint: &'static str,
    pub success: &'static str,
    pub check: fn(&Directory, &str) -> bool,
}

impl Task {
    pub fn is_done(&self, tree: &Directory, cwd: &str) -> bool {
        (self.check)(tree, cwd)
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task").field("title", &self.title).finish()
    }
}

fn is_dir_at(tree: &Directory, path: &str) -> bool {
    resolve(tree, path).is_some_and(Node::is_dir)
}

fn is_file_at(tree: &Directory, path: &str) -> bool {
    resolve(tree, path).is_some_and(Node::is_file)
}

pub static TASKS: [Task; 5] = [
    Task {
        title: "Task 1: The First Step",
        description: "Welcome, agent. Your mission begins in the 'documents' folder. Enter it.",
        hint: "How do you usually open folders? Try `cd`.",
        success: "Excellent. You're in. Now, let's find the first clue.",
        check: |_, cwd| cwd == "~/documents",
    },
    Task {
        title: "Task 2: Find the Clue",
        description: "There's a file in this directory. Read 'clue.txt'. It will tell you what to do next to complete this task.",
        hint: "You can view a file's contents with `cat`.",
        success: "Good work. A secure vault is essential for any secret agent.",
        check: |tree, _| is_dir_at(tree, "~/documents/vault"),
    },
    Task {
        title: "Task 3: Plant the Secret",
        description: "Now, inside the new 'vault' directory, create a file named 'secrets.txt'.",
        hint: "Enter the vault first, then create an empty file with `touch`.",
        success: "The secret is planted. But we need to cover our tracks.",
        check: |tree, _| is_file_at(tree, "~/documents/vault/secrets.txt"),
    },
    Task {
        title: "Task 4: Clean Up",
        description: "There's a 'useless_file.txt' in the home directory ('~'). Navigate back there and delete it.",
        hint: "`cd ~` takes you home, `rm` deletes.",
        success: "No trace left behind. Your final task is to find your escape route.",
        check: |tree, _| resolve(tree, "~/useless_file.txt").is_none(),
    },
    Task {
        title: "Task 5: The Escape",
        description: "The escape route is hidden in the 'mystery_box' directory. Navigate into it and create a file called 'escape_plan.txt' to signal you are ready.",
        hint: "Remember how you created a file before?",
        success: "Mission Accomplished! You've mastered the file system and successfully escaped. Congratulations!",
        check: |tree, _| is_file_at(tree, "~/mystery_box/escape_plan.txt"),
    },
];

/// Progress through a task list.
#[derive(Debug)]
pub struct Quest {
    tasks: &'static [Task],
    index: usize,
    completed: bool,
    finished: bool,
}

impl Quest {
    pub fn new() -> Self {
        Self {
            tasks: &TASKS,
            index: 0,
            completed: false,
            finished: false,
        }
    }

    /// Starts at task `index` (0-based), clamped to the last task.
    pub fn starting_at(mut self, index: usize) -> Self {
        self.index = index.min(self.tasks.len().saturating_sub(1));
        self
    }

    pub fn current(&self) -> Option<&'static Task> {
        if self.finished {
            None
        } else {
            self.tasks.get(self.index)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn hint(&self) -> Option<&'static str> {
        self.current().map(|task| task.hint)
    }

    /// Runs the current task's check against `fs`. Returns true once it is satisfied.
    /// A completed task stays completed until `advance()`.
    pub fn check<B: FsBackend>(&mut self, fs: &B) -> bool {
        let Some(task) = self.current() else {
            return false;
        };
        if !self.completed && task.is_done(fs.tree(), fs.cwd()) {
            info!("completed {:?}", task.title);
            self.completed = true;
        }
        self.completed
    }

    /// Moves to the next task. After the last one the quest is finished.
    pub fn advance(&mut self) {
        if self.finished {
            return;
        }
        self.completed = false;
        if self.index + 1 < self.tasks.len() {
            self.index += 1;
        } else {
            self.finished = true;
        }
    }
}

impl Default for Quest {
    fn default() -> Self {
        Self::new()
    }
}
