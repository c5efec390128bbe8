use podium::{MenuCommand, TeamId};
use std::fmt;

/// Commands accepted on the text command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Run a move or removal on a named team
    Arrange { team_id: TeamId, command: MenuCommand },
    /// Return every ranked team to the pool
    Reset,
    /// Submit the current standings
    Finalize,
    /// Cancel an in-flight submission
    Cancel,
    /// Fetch the participant list again
    Reload,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Rank is not a number between 1 and the slot count.
    InvalidRank(String),
    /// Command needs a team id.
    MissingTeam(&'static str),
    /// Move command missing its rank.
    MissingRank,
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRank(value) => write!(
                f,
                "Invalid rank '{}'. Must be a positive number (e.g., 'move owls 1')",
                value
            ),
            Self::MissingTeam(command) => {
                write!(f, "'{}' requires a team id (e.g., '{} owls')", command, command)
            }
            Self::MissingRank => write!(f, "Move requires a rank (e.g., 'move owls 3')"),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Press Tab to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a command string into a ConsoleCommand.
///
/// Ranks are 1-indexed as shown in the UI and converted to 0-based slots.
/// Whether a rank exists is decided by the arrangement, not here.
///
/// # Examples
///
/// ```
/// use podium::{MenuCommand, TeamId};
/// use podium_client::commands::{ConsoleCommand, parse_command};
///
/// assert_eq!(parse_command("reset"), Ok(ConsoleCommand::Reset));
/// assert_eq!(
///     parse_command("move owls 1"),
///     Ok(ConsoleCommand::Arrange {
///         team_id: TeamId::new("owls"),
///         command: MenuCommand::MoveToSlot(0),
///     })
/// );
/// ```
pub fn parse_command(input: &str) -> Result<ConsoleCommand, ParseError> {
    let trimmed = input.trim();

    // Try single-word commands first
    match trimmed {
        "reset" => return Ok(ConsoleCommand::Reset),
        "finalize" | "submit" => return Ok(ConsoleCommand::Finalize),
        "cancel" => return Ok(ConsoleCommand::Cancel),
        "reload" => return Ok(ConsoleCommand::Reload),
        _ => {}
    }

    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    match parts.first() {
        Some(&"move") => parse_move_command(&parts),
        Some(&"remove") => parse_remove_command(&parts),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse a move command: "move TEAM RANK"
fn parse_move_command(parts: &[&str]) -> Result<ConsoleCommand, ParseError> {
    let team = parts.get(1).ok_or(ParseError::MissingTeam("move"))?;
    let rank = parts.get(2).ok_or(ParseError::MissingRank)?;
    let rank = rank
        .parse::<usize>()
        .ok()
        .filter(|rank| *rank > 0)
        .ok_or_else(|| ParseError::InvalidRank(rank.to_string()))?;

    Ok(ConsoleCommand::Arrange {
        team_id: TeamId::new(team),
        command: MenuCommand::MoveToSlot(rank - 1),
    })
}

/// Parse a remove command: "remove TEAM"
fn parse_remove_command(parts: &[&str]) -> Result<ConsoleCommand, ParseError> {
    let team = parts.get(1).ok_or(ParseError::MissingTeam("remove"))?;
    Ok(ConsoleCommand::Arrange {
        team_id: TeamId::new(team),
        command: MenuCommand::RemoveToPool,
    })
}
