//! Input handling - parse user input and commands

use anyhow::{bail, Result};

/// Parsed user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    /// Chat text to send to everyone
    Text(String),

    /// Toggle the typing indicator: `:typing on|off`
    Typing(bool),

    /// Disconnect: `:quit`
    Quit,

    /// Blank line
    Empty,
}

/// Parse a line of user input
pub fn parse_input(line: &str) -> Result<ParsedInput> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Ok(ParsedInput::Empty);
    }

    // Control command: :command args
    if let Some(rest) = trimmed.strip_prefix(':') {
        let mut parts = rest.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let arg = parts.next();

        return match (command, arg) {
            ("quit" | "q", None) => Ok(ParsedInput::Quit),
            ("typing", Some("on")) => Ok(ParsedInput::Typing(true)),
            ("typing", Some("off")) => Ok(ParsedInput::Typing(false)),
            ("typing", _) => bail!("Usage: :typing on|off"),
            _ => bail!("Unknown command: :{}", command),
        };
    }

    Ok(ParsedInput::Text(line.trim_end_matches(['\r', '\n']).to_string()))
}
