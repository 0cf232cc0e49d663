//! REPL input parsing

use tally::Operand;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Exit,
    Menu,
    History,
    SaveHistory,
    LoadHistory,
    ClearHistory,
    Undo,
    /// `a op` or `a b op`; for the unary form `b` is `Missing`
    Calculate {
        a: Operand,
        b: Operand,
        operation: String,
    },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid input format")]
    InvalidFormat,
}

impl Command {
    /// Keywords are case-insensitive. Operand tokens that are not numbers
    /// are kept as text so the calculator reports them.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let keyword = match line.to_lowercase().as_str() {
            "" => Some(Command::Empty),
            "exit" => Some(Command::Exit),
            "menu" => Some(Command::Menu),
            "history" => Some(Command::History),
            "save_history" => Some(Command::SaveHistory),
            "load_history" => Some(Command::LoadHistory),
            "clear_history" => Some(Command::ClearHistory),
            "undo" => Some(Command::Undo),
            _ => None,
        };
        if let Some(cmd) = keyword {
            return Ok(cmd);
        }

        match line.split_whitespace().collect::<Vec<&str>>().as_slice() {
            [a, operation] => Ok(Command::Calculate {
                a: Operand::parse(a),
                b: Operand::Missing,
                operation: operation.to_string(),
            }),
            [a, b, operation] => Ok(Command::Calculate {
                a: Operand::parse(a),
                b: Operand::parse(b),
                operation: operation.to_string(),
            }),
            _ => Err(ParseError::InvalidFormat),
        }
    }
}
