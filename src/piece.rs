use std::fmt;
use std::str::FromStr;

use derive_new::new;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::force::Force;


pub const EMPTY_SQUARE_CODE: &str = "e";
pub const NON_EXISTENT_SQUARE_CODE: &str = "E";

// FEN letter reserved for a square that is not part of the board (yet).
pub const NON_EXISTENT_FEN_LETTER: char = 'E';

// Any ASCII letter is a valid piece kind: the board does not know chess rules, so it doesn't
// restrict itself to the classic six. Kind is always stored uppercase.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, new, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Piece {
    pub force: Force,
    pub kind: char,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SquareContent {
    Piece(Piece),
    Empty,
    // Placeholder for a square the board could grow into.
    NonExistent,
}

impl Piece {
    pub fn from_fen_letter(ch: char) -> Option<Self> {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        Some(Piece {
            force: Force::from_fen_letter(ch),
            kind: ch.to_ascii_uppercase(),
        })
    }

    // Two-character code: force prefix followed by uppercase kind, e.g. "bP".
    pub fn from_code(code: &str) -> Option<Self> {
        let (force, kind) = code.chars().collect_tuple()?;
        if !kind.is_ascii_uppercase() {
            return None;
        }
        Some(Piece { force: Force::from_code(force)?, kind })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.force.to_code(), self.kind)
    }
}

impl FromStr for Piece {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Piece::from_code(s).ok_or_else(|| format!("invalid piece code: {s}"))
    }
}

impl From<Piece> for String {
    fn from(piece: Piece) -> Self { piece.to_string() }
}

impl TryFrom<String> for Piece {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl SquareContent {
    pub fn is_piece(self) -> bool { matches!(self, SquareContent::Piece(_)) }
    pub fn is_empty(self) -> bool { matches!(self, SquareContent::Empty) }
    pub fn is_non_existent(self) -> bool { matches!(self, SquareContent::NonExistent) }

    pub fn piece(self) -> Option<Piece> {
        match self {
            SquareContent::Piece(piece) => Some(piece),
            SquareContent::Empty | SquareContent::NonExistent => None,
        }
    }
}

impl From<Piece> for SquareContent {
    fn from(piece: Piece) -> Self { SquareContent::Piece(piece) }
}

impl fmt::Display for SquareContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareContent::Piece(piece) => write!(f, "{piece}"),
            SquareContent::Empty => f.write_str(EMPTY_SQUARE_CODE),
            SquareContent::NonExistent => f.write_str(NON_EXISTENT_SQUARE_CODE),
        }
    }
}

impl FromStr for SquareContent {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            EMPTY_SQUARE_CODE => Ok(SquareContent::Empty),
            NON_EXISTENT_SQUARE_CODE => Ok(SquareContent::NonExistent),
            _ => Ok(SquareContent::Piece(s.parse()?)),
        }
    }
}

impl From<SquareContent> for String {
    fn from(content: SquareContent) -> Self { content.to_string() }
}

impl TryFrom<String> for SquareContent {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}
