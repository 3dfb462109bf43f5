//! Interactive menu loop.
//!
//! Generic over any line-oriented input and any writer so the whole session
//! can be driven from tests with in-memory buffers.

use activity_core::{TaskStore, parse_due_datetime};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::config::ConsoleSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleState {
    AwaitingChoice,
    Adding,
    Removing,
    Displaying,
    Exiting,
}

impl ConsoleState {
    /// Map a menu line to the state it selects; `None` for an invalid choice.
    pub fn from_choice(line: &str) -> Option<Self> {
        match line.trim().parse::<i64>().ok()? {
            1 => Some(Self::Adding),
            2 => Some(Self::Removing),
            3 => Some(Self::Displaying),
            4 => Some(Self::Exiting),
            _ => None,
        }
    }
}

const MENU: &str = "\nMenu:\n\
                    1. Add Activity Name\n\
                    2. Remove Activity Name\n\
                    3. Display Activity Name\n\
                    4. Exit\n";

pub struct Console<R, W> {
    input: R,
    output: W,
    store: TaskStore,
    settings: ConsoleSection,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, settings: ConsoleSection) -> Self {
        Self {
            input,
            output,
            store: TaskStore::new(),
            settings,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user picks Exit or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to the Activity logger :)")?;

        // One task is collected before the menu is ever shown.
        let mut state = ConsoleState::Adding;

        loop {
            debug!(?state, "console step");
            state = match state {
                ConsoleState::AwaitingChoice => self.await_choice()?,
                ConsoleState::Adding => self.add()?,
                ConsoleState::Removing => self.remove()?,
                ConsoleState::Displaying => self.display()?,
                ConsoleState::Exiting => {
                    writeln!(self.output, "Exiting program.")?;
                    self.output.flush()?;
                    return Ok(());
                }
            };
        }
    }

    fn await_choice(&mut self) -> Result<ConsoleState> {
        write!(self.output, "{MENU}")?;
        let Some(line) = self.prompt("Enter your choice: ")? else {
            return Ok(ConsoleState::Exiting);
        };

        match ConsoleState::from_choice(&line) {
            Some(next) => Ok(next),
            None => {
                debug!(input = %line, "invalid menu choice");
                writeln!(self.output, "Invalid choice.")?;
                Ok(ConsoleState::AwaitingChoice)
            }
        }
    }

    fn add(&mut self) -> Result<ConsoleState> {
        let Some(name) = self.prompt("Enter task Activity Name: ")? else {
            return Ok(ConsoleState::Exiting);
        };
        let Some(date) = self.prompt("Enter due date (YYYY-MM-DD): ")? else {
            return Ok(ConsoleState::Exiting);
        };
        let Some(time) = self.prompt("Enter due time (HH:MM): ")? else {
            return Ok(ConsoleState::Exiting);
        };

        self.store.add(name, parse_due_datetime(&date, &time));
        writeln!(self.output, "Activity Name added successfully.")?;
        Ok(ConsoleState::AwaitingChoice)
    }

    fn remove(&mut self) -> Result<ConsoleState> {
        let Some(name) = self.prompt("Enter the name of the Activity to remove: ")? else {
            return Ok(ConsoleState::Exiting);
        };

        match self.store.remove(&name) {
            Ok(_) => writeln!(self.output, "Activity Name removed successfully.")?,
            Err(e) => {
                debug!(error = ?e, "remove rejected");
                writeln!(self.output, "{e}")?;
            }
        }
        Ok(ConsoleState::AwaitingChoice)
    }

    fn display(&mut self) -> Result<ConsoleState> {
        if self.store.is_empty() {
            writeln!(self.output, "No tasks in the Activity logger.")?;
            return Ok(ConsoleState::AwaitingChoice);
        }

        writeln!(self.output, "To-Do List:")?;
        for (i, task) in self.store.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, task)?;
        }

        if self.settings.show_next_due
            && let Some(next) = self.store.next_due()
        {
            writeln!(self.output, "Next due: {next}")?;
        }
        Ok(ConsoleState::AwaitingChoice)
    }

    /// Print `label`, read one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut s = String::new();
        if self.input.read_line(&mut s)? == 0 {
            debug!(label, "end of input");
            return Ok(None);
        }
        Ok(Some(s.trim_end_matches(['\r', '\n']).to_string()))
    }
}
