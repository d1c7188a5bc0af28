// Decoder for the extended FEN-like position notation.
//
// Differences from classic FEN notation:
//   - Only the piece placement field is used. Everything after the first space is ignored.
//   - Any letter is a piece (uppercase is white, lowercase is black), except for 'E' which is
//     a non-existent square.
//   - Digit runs may be longer than one digit: "r10r" is a rook, ten empty squares and a rook.
//   - A row containing '#' is rank 8. Rows above it get ranks 9, 10, etc. Without the marker the
//     first row is rank 8.
//   - A '$' marks where file 'a' starts. Squares before it are labelled 'A', 'B', ... counting
//     backwards from 'a'. Without the marker the first square is file 'a'.
//
// The notation is not validated. In particular, rows are expected to have equal length.
//
// Improvement potential. A row without any squares is dropped, but it still counts when looking
// for the '#' marker, so the ranks of all rows below it are off by one. Consider either emitting
// the row or treating such input as an error.

use itertools::Itertools;
use lazy_static::lazy_static;
use log::warn;
use regex_lite::Regex;

use crate::coord::{File, Rank};
use crate::grid::{Grid, Square};
use crate::piece::{NON_EXISTENT_FEN_LETTER, Piece, SquareContent};


pub const ROW_SEPARATOR: char = '/';
pub const RANK_EIGHT_MARKER: char = '#';
pub const FILE_A_MARKER: char = '$';

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Token {
    EmptyRun(usize),
    NonExistent,
    Piece(Piece),
}

impl Token {
    fn num_squares(self) -> usize {
        match self {
            Token::EmptyRun(n) => n,
            Token::NonExistent | Token::Piece(_) => 1,
        }
    }

    fn content(self) -> SquareContent {
        match self {
            Token::EmptyRun(_) => SquareContent::Empty,
            Token::NonExistent => SquareContent::NonExistent,
            Token::Piece(piece) => SquareContent::Piece(piece),
        }
    }
}

// Returns `None` if the row has no tokens at all.
fn tokenize(row_notation: &str) -> Option<Vec<Token>> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(r"\d+|[a-zA-Z]").unwrap();
    }
    let mut matched_any = false;
    let tokens = TOKEN_RE
        .find_iter(row_notation)
        .filter_map(|m| {
            matched_any = true;
            let s = m.as_str();
            if s.starts_with(|ch: char| ch.is_ascii_digit()) {
                match s.parse::<usize>() {
                    Ok(n) => Some(Token::EmptyRun(n)),
                    Err(err) => {
                        warn!("Ignoring empty square run \"{s}\" in \"{row_notation}\": {err}");
                        None
                    }
                }
            } else {
                // The regex guarantees a single ASCII letter here.
                let ch = s.chars().next()?;
                if ch == NON_EXISTENT_FEN_LETTER {
                    Some(Token::NonExistent)
                } else {
                    Piece::from_fen_letter(ch).map(Token::Piece)
                }
            }
        })
        .collect_vec();
    matched_any.then_some(tokens)
}

fn first_row_rank(row_notations: &[&str]) -> Rank {
    match row_notations.iter().position(|row| row.contains(RANK_EIGHT_MARKER)) {
        Some(idx) => Rank::EIGHTH + idx as i32,
        None => Rank::EIGHTH,
    }
}

fn first_square_file(row_notation: &str) -> File {
    let Some(marker_pos) = row_notation.find(FILE_A_MARKER) else {
        return File::A;
    };
    let squares_before_marker: usize = tokenize(&row_notation[..marker_pos])
        .unwrap_or_default()
        .into_iter()
        .map(Token::num_squares)
        .sum();
    File::A - squares_before_marker as i32
}

fn decode_row(row_notation: &str, tokens: &[Token], rank: Rank) -> Vec<Square> {
    let mut file = first_square_file(row_notation);
    let mut row = Vec::new();
    for &token in tokens {
        for _ in 0..token.num_squares() {
            row.push(Square::new(token.content(), file, rank));
            file = file + 1;
        }
    }
    row
}

// Decodes the notation into rows of labelled squares, top row first. No padding is applied.
pub fn decode_rows(notation: &str) -> Vec<Vec<Square>> {
    let placement = notation.split(' ').next().unwrap_or_default();
    let row_notations = placement.split(ROW_SEPARATOR).collect_vec();
    let mut rank = first_row_rank(&row_notations);
    let mut rows = Vec::new();
    for row_notation in row_notations {
        let Some(tokens) = tokenize(row_notation) else {
            warn!("Dropping row \"{row_notation}\" without squares in \"{notation}\"");
            continue;
        };
        rows.push(decode_row(row_notation, &tokens, rank));
        rank = rank - 1;
    }
    rows
}

pub fn decode_position(notation: &str) -> Grid { Grid::from_rows(decode_rows(notation)) }
