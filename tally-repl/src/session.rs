//! REPL session
//!
//! Reads one command per line, runs it against the calculator and writes
//! the reply. Input and output are generic so the loop can be driven from
//! tests.

use crate::command::Command;
use std::io::{self, BufRead, Write};
use tally::{Calculator, Value};
use tracing::{error, info, warn};

const PROMPT: &str = "Enter operation (e.g., 1 1 add or 4 sqrt): ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session<W: Write> {
    calc: Calculator,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(calc: Calculator, out: W) -> Self {
        Self { calc, out }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "Simple Calculator with Plugin Support.")?;
        writeln!(
            self.out,
            "Type 'exit' to quit, 'history' to view history, 'menu' to view available commands."
        )?;
        writeln!(
            self.out,
            "Commands: 'save_history' to save, 'load_history' to load, 'clear_history' to clear, 'undo' to undo."
        )
    }

    /// Run until `exit` or end of input
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        loop {
            write!(self.out, "{}", PROMPT)?;
            self.out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(self.out)?;
                info!("Input closed, leaving the REPL.");
                return Ok(());
            }
            if self.handle_line(&line)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        match Command::parse(line) {
            Ok(cmd) => self.execute(cmd),
            Err(e) => {
                error!(input = %line.trim(), error = %e, "could not parse input");
                writeln!(self.out, "Error: {}", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn execute(&mut self, cmd: Command) -> io::Result<Flow> {
        match cmd {
            Command::Empty => {}
            Command::Exit => {
                info!("User exited the REPL.");
                return Ok(Flow::Exit);
            }
            Command::Menu => self.menu()?,
            Command::History => {
                let history = self.calc.get_history();
                if history.is_empty() {
                    info!("User requested history, but it was empty.");
                    writeln!(self.out, "No history available.")?;
                } else {
                    info!("User requested history.");
                    for entry in history {
                        writeln!(self.out, "{}", entry)?;
                    }
                }
            }
            Command::SaveHistory => match self.calc.save_history() {
                Ok(()) => {
                    info!("User saved the calculation history.");
                    writeln!(self.out, "History saved.")?;
                }
                Err(e) => self.persistence_error("save", &e)?,
            },
            Command::LoadHistory => match self.calc.load_history() {
                Ok(()) => {
                    info!("User loaded the calculation history.");
                    writeln!(self.out, "History loaded.")?;
                    for entry in self.calc.get_history() {
                        writeln!(self.out, "{}", entry)?;
                    }
                }
                Err(e) => self.persistence_error("load", &e)?,
            },
            Command::ClearHistory => match self.calc.clear_history() {
                Ok(()) => {
                    info!("User cleared the calculation history.");
                    writeln!(self.out, "History cleared.")?;
                }
                Err(e) => self.persistence_error("clear", &e)?,
            },
            Command::Undo => match self.calc.undo_last() {
                Some(entry) => {
                    info!(entry = %entry, "User undid the last operation.");
                    writeln!(self.out, "Undone: {}", entry)?;
                }
                None => {
                    info!("User attempted to undo, but no operations were available.");
                    writeln!(self.out, "No operations to undo.")?;
                }
            },
            Command::Calculate { a, b, operation } => {
                match self.calc.calculate_and_log(a, b, &operation) {
                    Value::Number(n) => {
                        if let Some(entry) = self.calc.history().entries().last() {
                            info!(entry = %entry, "User performed calculation.");
                        }
                        writeln!(self.out, "Result: {}", n)?;
                    }
                    Value::Error(e) => {
                        warn!(operation = %operation, code = e.code(), error = %e, "calculation failed");
                        writeln!(self.out, "Error: {}", e)?;
                    }
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "Available operations: {}", self.calc.operations().join(", "))?;
        for op in self.calc.describe_operations() {
            writeln!(self.out, "  {:<16} {} [{}]", op.meta.usage, op.meta.description, op.origin)?;
        }
        Ok(())
    }

    fn persistence_error(&mut self, action: &str, e: &tally::HistoryError) -> io::Result<()> {
        error!(action, error = %e, "history persistence failed");
        writeln!(self.out, "Error: could not {} history: {}", action, e)
    }
}
