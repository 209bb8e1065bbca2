//! Line-oriented command widget over a [`FsBackend`].
//!
//! Each input line is parsed into a [`Command`], run against the file system, and
//! answered with text the front end prints below the prompt.

use thiserror::Error;
use tracing::debug;

use crate::core::{FsBackend, utils};
use crate::error::FsError;
use crate::vfs::{Entry, Node};

pub const HELP: &str = "\
ls              list the current directory
cd <dir>        enter a directory (`..` for the parent, `~/...` for an absolute path)
pwd             print the current directory
tree            show everything below the current directory
mkdir <name>    create a directory
touch <name>    create an empty file
rm <name>       remove a file or a directory with its contents
cat <file>      print the content of a file
undo            revert the last change
history         list the lines entered so far
!!              run the previous line again
reset           start over from the initial tree
clear           clear the screen
help            show this help";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Ls,
    Cd(String),
    Pwd,
    Tree,
    Mkdir(String),
    Touch(String),
    Rm(String),
    Cat(String),
    Undo,
    Reset,
    History,
    Clear,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("command not found: {0}")]
    UnknownCommand(String),
    #[error("{0}: missing operand")]
    MissingOperand(String),
}

impl Command {
    /// Parses a line. The first word names the command, the rest of the line (trimmed)
    /// is its operand, so names may contain spaces.
    pub fn parse(line: &str) -> Result<Command, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Empty);
        }
        let (word, operand) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let required = || {
            if operand.is_empty() {
                Err(ParseError::MissingOperand(word.to_string()))
            } else {
                Ok(operand.to_string())
            }
        };
        let command = match word {
            "ls" => Command::Ls,
            "cd" => Command::Cd(required()?),
            "pwd" => Command::Pwd,
            "tree" => Command::Tree,
            "mkdir" => Command::Mkdir(required()?),
            "touch" => Command::Touch(required()?),
            "rm" => Command::Rm(required()?),
            "cat" => Command::Cat(required()?),
            "undo" => Command::Undo,
            "reset" => Command::Reset,
            "history" => Command::History,
            "help" => Command::Help,
            w if w.eq_ignore_ascii_case("clear") => Command::Clear,
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

/// What the front end should do with the result of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text (possibly empty).
    Output(String),
    /// Wipe the scrollback.
    Clear,
}

/// The answer to one input line: the command it parsed to, if any, and what to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub command: Option<Command>,
    pub outcome: Outcome,
}

impl Outcome {
    fn text<S: Into<String>>(text: S) -> Self {
        Outcome::Output(text.into())
    }

    fn silent() -> Self {
        Outcome::Output(String::new())
    }
}

/// Entered lines, most recent first.
#[derive(Debug, Default, Clone)]
pub struct Recall {
    entries: Vec<String>,
}

impl Recall {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a line. A line entered before moves to the front instead of repeating.
    pub fn push(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.entries.retain(|e| e != line);
        self.entries.insert(0, line.to_string());
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.first().map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

pub struct Shell<B: FsBackend> {
    fs: B,
    recall: Recall,
}

impl<B: FsBackend> Shell<B> {
    pub fn new(fs: B) -> Self {
        Self {
            fs,
            recall: Recall::new(),
        }
    }

    pub fn fs(&self) -> &B {
        &self.fs
    }

    pub fn recall(&self) -> &Recall {
        &self.recall
    }

    pub fn prompt(&self) -> String {
        format!("{} $ ", self.fs.cwd())
    }

    /// Records, parses and runs one input line.
    ///
    /// `!!` runs the most recent recorded line again and is not recorded itself.
    pub fn execute(&mut self, line: &str) -> Reply {
        if line.trim() == "!!" {
            return match self.recall.last().map(str::to_string) {
                Some(previous) => {
                    debug!("repeat {previous:?}");
                    self.execute(&previous)
                }
                None => Reply {
                    command: None,
                    outcome: Outcome::text("!!: event not found"),
                },
            };
        }

        self.recall.push(line);
        match Command::parse(line) {
            Ok(command) => {
                let outcome = self.run(&command);
                Reply {
                    command: Some(command),
                    outcome,
                }
            }
            Err(e) => {
                debug!("parse error: {e}");
                Reply {
                    command: None,
                    outcome: Outcome::text(e.to_string()),
                }
            }
        }
    }

    fn run(&mut self, command: &Command) -> Outcome {
        debug!(?command, cwd = self.fs.cwd(), "run");
        match command {
            Command::Empty => Outcome::silent(),
            Command::Ls => Outcome::text(self.ls()),
            Command::Cd(target) => match self.cd(target) {
                Ok(()) => Outcome::silent(),
                Err(_) => Outcome::text(format!("cd: no such directory: {target}")),
            },
            Command::Pwd => Outcome::text(self.fs.cwd()),
            Command::Tree => Outcome::text(self.tree()),
            Command::Mkdir(name) => Self::report("mkdir", self.fs.mkdir(name)),
            Command::Touch(name) => Self::report("touch", self.fs.mkfile(name)),
            Command::Rm(name) => Self::report("rm", self.fs.rm(name)),
            Command::Cat(name) => match self.fs.read(name) {
                Ok(content) => Outcome::text(content),
                Err(e) => Outcome::text(format!("cat: {e}")),
            },
            Command::Undo => Self::report("undo", self.fs.undo()),
            Command::Reset => {
                self.fs.reset();
                Outcome::silent()
            }
            Command::History => Outcome::text(self.history()),
            Command::Clear => Outcome::Clear,
            Command::Help => Outcome::text(HELP),
        }
    }

    fn report(name: &str, result: Result<(), FsError>) -> Outcome {
        match result {
            Ok(()) => Outcome::silent(),
            Err(e) => Outcome::text(format!("{name}: {e}")),
        }
    }

    fn cd(&mut self, target: &str) -> Result<(), FsError> {
        if target == ".." {
            let parent = utils::parent(self.fs.cwd());
            self.fs.goto(&parent)
        } else if utils::segments(target).is_some() {
            self.fs.goto(target)
        } else {
            self.fs.cd(target)
        }
    }

    fn ls(&self) -> String {
        self.fs
            .ls()
            .iter()
            .map(|entry| display_name(entry))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn tree(&self) -> String {
        let cwd = self.fs.cwd();
        let Some(dir) = self.fs.resolve(cwd).and_then(Node::as_dir) else {
            return String::new();
        };
        let mut lines = vec![format!("{cwd}/")];
        for step in dir.walk(cwd) {
            lines.push(format!("{}{}", "  ".repeat(step.depth), display_name(step.entry)));
        }
        lines.join("\n")
    }

    /// Recorded lines, oldest first, numbered like a shell history.
    fn history(&self) -> String {
        self.recall
            .entries()
            .iter()
            .rev()
            .enumerate()
            .map(|(i, line)| format!("{:>4}  {line}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn display_name(entry: &Entry) -> String {
    if entry.is_dir() {
        format!("{}/", entry.name())
    } else {
        entry.name().to_string()
    }
}
