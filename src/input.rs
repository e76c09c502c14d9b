//! Text commands accepted by the terminal front end.

use std::str::FromStr;

use crate::engine::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Restart,
    Quit,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?} (try w/a/s/d, up/down/left/right, restart, quit)")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Accepts `w/a/s/d`, `k/h/j/l`, direction names, `r`/`restart` and `q`/`quit`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(ParseCommandError::Empty);
        }
        let cmd = match token.to_ascii_lowercase().as_str() {
            "w" | "k" | "up" => Command::Move(Move::Up),
            "s" | "j" | "down" => Command::Move(Move::Down),
            "a" | "h" | "left" => Command::Move(Move::Left),
            "d" | "l" | "right" => Command::Move(Move::Right),
            "r" | "restart" => Command::Restart,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(token.to_string())),
        };
        Ok(cmd)
    }
}

/// Parse a whitespace- or comma-separated list of commands.
///
/// ```
/// use grid_2048::engine::Move;
/// use grid_2048::input::{parse_script, Command};
/// let cmds = parse_script("left, up d\nq").unwrap();
/// assert_eq!(cmds[0], Command::Move(Move::Left));
/// assert_eq!(cmds.len(), 4);
/// ```
pub fn parse_script(script: &str) -> Result<Vec<Command>, ParseCommandError> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|tok| !tok.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_moves() {
        assert_eq!("w".parse(), Ok(Command::Move(Move::Up)));
        assert_eq!("A".parse(), Ok(Command::Move(Move::Left)));
        assert_eq!(" down ".parse(), Ok(Command::Move(Move::Down)));
        assert_eq!("l".parse(), Ok(Command::Move(Move::Right)));
        assert_eq!("Right".parse(), Ok(Command::Move(Move::Right)));
    }

    #[test]
    fn it_parses_controls() {
        assert_eq!("r".parse(), Ok(Command::Restart));
        assert_eq!("QUIT".parse(), Ok(Command::Quit));
    }

    #[test]
    fn it_rejects_garbage() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "jump".parse::<Command>(),
            Err(ParseCommandError::Unknown("jump".to_string()))
        );
    }

    #[test]
    fn it_parses_scripts() {
        assert_eq!(parse_script("").unwrap(), vec![]);
        assert_eq!(
            parse_script("w,,a  s,d").unwrap(),
            vec![
                Command::Move(Move::Up),
                Command::Move(Move::Left),
                Command::Move(Move::Down),
                Command::Move(Move::Right),
            ]
        );
        assert_eq!(
            parse_script("up x"),
            Err(ParseCommandError::Unknown("x".to_string()))
        );
    }
}
