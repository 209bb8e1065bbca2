use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::{debug, info};

use fs_escape::quest::Quest;
use fs_escape::shell::{Command, Outcome, Shell};
use fs_escape::TreeFS;

use crate::cli::RuntimeConfig;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Terminal front end: a prompt loop over the command widget, with the tutorial on top.
pub struct App {
    shell: Shell<TreeFS>,
    quest: Option<Quest>,
    config: RuntimeConfig,
}

impl App {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            shell: Shell::new(TreeFS::new()),
            quest: Self::new_quest(&config),
            config,
        }
    }

    fn new_quest(config: &RuntimeConfig) -> Option<Quest> {
        config
            .tutorial
            .then(|| Quest::new().starting_at(config.first_task))
    }

    /// Reads commands line by line until `exit` or the end of `input`.
    pub fn run<R: BufRead, W: Write>(mut self, input: R, mut out: W) -> anyhow::Result<()> {
        writeln!(out, "File System Escape. Type `help` for commands, `hint` for a hint, `exit` to leave.")?;
        self.show_task(&mut out)?;
        self.prompt(&mut out)?;

        for line in input.lines() {
            let line = line.context("failed to read input")?;
            if !self.handle(line.trim(), &mut out)? {
                break;
            }
            self.prompt(&mut out)?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Handles one line. Returns false when the user asked to leave.
    fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> anyhow::Result<bool> {
        match line {
            "exit" | "quit" => return Ok(false),
            "hint" => {
                match self.quest.as_ref().and_then(Quest::hint) {
                    Some(hint) => writeln!(out, "HINT: {hint}")?,
                    None => writeln!(out, "No hint available.")?,
                }
                return Ok(true);
            }
            _ => {}
        }

        let reply = self.shell.execute(line);
        match &reply.outcome {
            Outcome::Output(text) if !text.is_empty() => writeln!(out, "{text}")?,
            Outcome::Output(_) => {}
            Outcome::Clear => write!(out, "{CLEAR_SCREEN}")?,
        }

        if reply.command == Some(Command::Reset) {
            debug!("tutorial restarted");
            self.quest = Self::new_quest(&self.config);
            self.show_task(out)?;
        }
        self.check_task(out)?;
        Ok(true)
    }

    fn check_task<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        let Some(quest) = self.quest.as_mut() else {
            return Ok(());
        };
        if !quest.check(self.shell.fs()) {
            return Ok(());
        }
        if let Some(task) = quest.current() {
            writeln!(out, "Task complete! {}", task.success)?;
        }
        quest.advance();
        if quest.is_finished() {
            info!("tutorial finished");
            writeln!(out, "You escaped. The sandbox stays open; `reset` to play again.")?;
            return Ok(());
        }
        self.show_task(out)
    }

    fn show_task<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        if let Some(task) = self.quest.as_ref().and_then(Quest::current) {
            writeln!(out, "\n== {} ==\n{}\n", task.title, task.description)?;
        }
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        write!(out, "{}", self.shell.prompt())?;
        out.flush()?;
        Ok(())
    }
}
