use std::str::FromStr;

use matrix_repair_core::{
    ChallengeInput, Coord, GameError, Target, parse_answer, parse_letter, parse_logic_answer,
    parse_throw,
};
use thiserror::Error;

pub const HELP: &str = "\
Commands (rows and columns count from 1):
  select R [C]   attack row R, or cell R,C
  back           leave the current challenge
  throw X        rock, paper or scissors (r/p/s)
  guess L        guess a letter
  number N       answer an arithmetic or symbol puzzle
  logic S M      sign bit S (0 or 1) and magnitude M
  answer N       type the repaired value of the cell
  next           go to the next level
  restart        start over
  show           redraw the grid
  help           this text
  quit           leave the game";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Select(Target),
    Back,
    Play(ChallengeInput),
    Answer(String),
    Next,
    Restart,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command {0:?}, type help for a list")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// 1-based on the command line, 0-based in the core.
fn parse_coord(text: &str) -> Result<Coord, CommandError> {
    match text.parse::<Coord>() {
        Ok(value) if value > 0 => Ok(value - 1),
        _ => Err(GameError::InvalidCoords.into()),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        use CommandError::Usage;

        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Self::Show);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("select" | "s", [row]) => Self::Select(Target::Row(parse_coord(row)?)),
            ("select" | "s", [row, col]) => {
                Self::Select(Target::Cell((parse_coord(row)?, parse_coord(col)?)))
            }
            ("select" | "s", _) => return Err(Usage("select R [C]")),
            ("back" | "b", []) => Self::Back,
            ("throw" | "t", [throw]) => Self::Play(ChallengeInput::Throw(parse_throw(throw)?)),
            ("throw" | "t", _) => return Err(Usage("throw rock|paper|scissors")),
            ("guess" | "g", [letter]) => {
                Self::Play(ChallengeInput::Letter(parse_letter(letter)?))
            }
            ("guess" | "g", _) => return Err(Usage("guess L")),
            ("number" | "n", [number]) => Self::Play(ChallengeInput::Number(parse_answer(number)?)),
            ("number" | "n", _) => return Err(Usage("number N")),
            ("logic" | "l", [sign, magnitude]) => {
                Self::Play(ChallengeInput::Logic(parse_logic_answer(sign, magnitude)?))
            }
            ("logic" | "l", _) => return Err(Usage("logic S M")),
            ("answer" | "a", [answer]) => Self::Answer((*answer).into()),
            ("answer" | "a", _) => return Err(Usage("answer N")),
            ("next", []) => Self::Next,
            ("restart", []) => Self::Restart,
            ("show", []) => Self::Show,
            ("help" | "?", _) => Self::Help,
            ("quit" | "exit" | "q", _) => Self::Quit,
            _ => return Err(CommandError::Unknown(line.trim().into())),
        };
        Ok(command)
    }
}
