use serde::{Deserialize, Serialize};
use strum::EnumIter;


#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumIter, Serialize, Deserialize,
)]
pub enum Force {
    White,
    Black,
}

impl Force {
    // Prefix used in two-character piece codes, e.g. 'w' in "wP".
    pub fn to_code(self) -> char {
        match self {
            Force::White => 'w',
            Force::Black => 'b',
        }
    }
    pub fn from_code(ch: char) -> Option<Self> {
        match ch {
            'w' => Some(Force::White),
            'b' => Some(Force::Black),
            _ => None,
        }
    }

    // FEN letter case: uppercase is white, lowercase is black.
    pub fn from_fen_letter(ch: char) -> Self {
        if ch.is_ascii_uppercase() { Force::White } else { Force::Black }
    }
}
