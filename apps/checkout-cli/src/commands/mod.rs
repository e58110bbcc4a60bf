//! # Checkout Commands
//!
//! One line of input is one command. Each command maps to a control on
//! the checkout form.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── Command parsing
//! ├── order.rs    ◄─── "+" / "-" buttons on a product row
//! └── catalog.rs  ◄─── Initial load and reload
//! ```
//!
//! ## Grammar
//! ```text
//! ┌──────────────────────┬───────────────────────────────────────────────┐
//! │  add <id>   | + <id> │  Order one more unit of a product             │
//! │  remove <id>| - <id> │  Order one less unit of a product             │
//! │  show                │  Redraw the form                              │
//! │  reload              │  Fetch the catalog again after a failure      │
//! │  help                │  List commands                                │
//! │  quit       | exit   │  Leave the session                            │
//! └──────────────────────┴───────────────────────────────────────────────┘
//! ```
//! `+4` and `+ 4` are both accepted.

pub mod catalog;
pub mod order;

use std::str::FromStr;

use checkout_core::ProductId;

use crate::error::AppError;

/// Printed by `help`.
pub const HELP: &str = "\
Commands:
  add <id>, + <id>      order one more unit
  remove <id>, - <id>   order one less unit
  show                  redraw the form
  reload                retry loading the catalog
  help                  show this help
  quit, exit            leave";

/// A parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add(ProductId),
    Remove(ProductId),
    Show,
    Reload,
    Help,
    Quit,
}

/// Whether the session keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

impl Command {
    /// Whether a successful run of this command changes what the form shows.
    pub fn redraws(&self) -> bool {
        matches!(
            self,
            Command::Add(_) | Command::Remove(_) | Command::Show | Command::Reload
        )
    }
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();

        // "+4" / "-4" shorthand without a space
        if let Some(rest) = line.strip_prefix('+') {
            return Ok(Command::Add(parse_id(rest)?));
        }
        if let Some(rest) = line.strip_prefix('-') {
            return Ok(Command::Remove(parse_id(rest)?));
        }

        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        if parts.next().is_some() {
            return Err(AppError::invalid_command(format!(
                "Too many arguments: '{line}'"
            )));
        }

        let command = match (verb.as_str(), arg) {
            ("add", Some(id)) => Command::Add(parse_id(id)?),
            ("remove" | "rm", Some(id)) => Command::Remove(parse_id(id)?),
            ("add" | "remove" | "rm", None) => {
                return Err(AppError::invalid_command(format!(
                    "'{verb}' needs a product id"
                )))
            }
            ("show", None) => Command::Show,
            ("reload", None) => Command::Reload,
            ("help" | "?", None) => Command::Help,
            ("quit" | "exit" | "q", None) => Command::Quit,
            _ => {
                return Err(AppError::invalid_command(format!(
                    "Unknown command '{line}' (type `help`)"
                )))
            }
        };

        Ok(command)
    }
}

fn parse_id(raw: &str) -> Result<ProductId, AppError> {
    raw.parse::<ProductId>()
        .map_err(|e| AppError::invalid_command(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn parse(line: &str) -> Result<Command, AppError> {
        line.parse()
    }

    #[test]
    fn test_parse_order_commands() {
        assert_eq!(parse("add 4").unwrap(), Command::Add(ProductId::new(4)));
        assert_eq!(parse("+ 4").unwrap(), Command::Add(ProductId::new(4)));
        assert_eq!(parse("+4").unwrap(), Command::Add(ProductId::new(4)));
        assert_eq!(parse("  ADD 12 ").unwrap(), Command::Add(ProductId::new(12)));

        assert_eq!(parse("remove 2").unwrap(), Command::Remove(ProductId::new(2)));
        assert_eq!(parse("- 2").unwrap(), Command::Remove(ProductId::new(2)));
        assert_eq!(parse("-2").unwrap(), Command::Remove(ProductId::new(2)));
    }

    #[test]
    fn test_parse_form_commands() {
        assert_eq!(parse("show").unwrap(), Command::Show);
        assert_eq!(parse("reload").unwrap(), Command::Reload);
        assert_eq!(parse("help").unwrap(), Command::Help);
        assert_eq!(parse("quit").unwrap(), Command::Quit);
        assert_eq!(parse("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        for line in ["buy 3", "add", "add x", "+", "- -1", "show 3", "add 1 2"] {
            let err = parse(line).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidCommand, "line: {line}");
        }
    }

    #[test]
    fn test_redraws() {
        assert!(Command::Add(ProductId::new(1)).redraws());
        assert!(Command::Show.redraws());
        assert!(!Command::Help.redraws());
        assert!(!Command::Quit.redraws());
    }
}
