use std::collections::HashMap;
use std::ops;

use itertools::Itertools;
use ndarray::{Array2, ArrayView1};
use serde::Serialize;

use crate::coord::{Coord, File, Location, Rank};
use crate::force::Force;
use crate::piece::SquareContent;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Square {
    pub content: SquareContent,
    pub file: File,
    pub rank: Rank,
}

impl Square {
    pub fn new(content: SquareContent, file: File, rank: Rank) -> Self {
        Square { content, file, rank }
    }
    pub fn non_existent(file: File, rank: Rank) -> Self {
        Square::new(SquareContent::NonExistent, file, rank)
    }
    pub fn location(&self) -> Location { Location::new(self.file, self.rank) }
    pub fn is_non_existent(&self) -> bool { self.content.is_non_existent() }
}

// Rectangular board: every row always has the same number of squares.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Grid {
    data: Array2<Square>,
}

impl Grid {
    pub fn empty() -> Self {
        Grid {
            data: Array2::from_shape_fn((0, 0), |_| Square::non_existent(File::A, Rank::FIRST)),
        }
    }

    pub fn from_array(data: Array2<Square>) -> Self { Grid { data } }

    // Rows are expected to have equal length. This is not validated in release builds: missing
    // cells are filled with non-existent squares so that the grid stays rectangular, but the
    // resulting labels are unspecified.
    pub fn from_rows(rows: Vec<Vec<Square>>) -> Self {
        debug_assert!(
            rows.iter().map(Vec::len).all_equal(),
            "ragged rows: {:?}",
            rows.iter().map(Vec::len).collect_vec()
        );
        let num_rows = rows.len();
        let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        if num_rows == 0 || num_cols == 0 {
            return Grid::empty();
        }
        let widest = rows.iter().max_by_key(|row| row.len()).unwrap_or(&rows[0]);
        let mut fallback_rank = widest[0].rank;
        let row_ranks = rows
            .iter()
            .map(|row| {
                let rank = row.first().map_or(fallback_rank, |sq| sq.rank);
                fallback_rank = rank - 1;
                rank
            })
            .collect_vec();
        let data = Array2::from_shape_fn((num_rows, num_cols), |(r, c)| {
            rows[r]
                .get(c)
                .copied()
                .unwrap_or_else(|| Square::non_existent(widest[c].file, row_ranks[r]))
        });
        Grid { data }
    }

    pub fn num_rows(&self) -> usize { self.data.nrows() }
    pub fn num_cols(&self) -> usize { self.data.ncols() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    pub fn get(&self, coord: Coord) -> Option<&Square> { self.data.get((coord.row, coord.col)) }

    pub fn row(&self, row: usize) -> ArrayView1<'_, Square> { self.data.row(row) }
    pub fn col(&self, col: usize) -> ArrayView1<'_, Square> { self.data.column(col) }
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, Square>> {
        self.data.rows().into_iter()
    }

    pub fn squares(&self) -> impl Iterator<Item = (Coord, &Square)> {
        self.data.indexed_iter().map(|((row, col), sq)| (Coord::new(row, col), sq))
    }

    pub fn is_row_non_existent(&self, row: usize) -> bool {
        row < self.num_rows() && self.data.row(row).iter().all(Square::is_non_existent)
    }
    pub fn is_col_non_existent(&self, col: usize) -> bool {
        col < self.num_cols() && self.data.column(col).iter().all(Square::is_non_existent)
    }

    // Compact text form, one line per row: FEN letters for pieces, '.' for empty squares and
    // '-' for non-existent squares.
    pub fn render(&self) -> String {
        self.rows()
            .map(|row| row.iter().map(|sq| render_square(sq.content)).collect::<String>())
            .join("\n")
    }
}

fn render_square(content: SquareContent) -> char {
    match content {
        SquareContent::Piece(piece) => match piece.force {
            Force::White => piece.kind.to_ascii_uppercase(),
            Force::Black => piece.kind.to_ascii_lowercase(),
        },
        SquareContent::Empty => '.',
        SquareContent::NonExistent => '-',
    }
}

impl ops::Index<Coord> for Grid {
    type Output = Square;
    #[track_caller]
    fn index(&self, pos: Coord) -> &Self::Output {
        let (num_rows, num_cols) = (self.num_rows(), self.num_cols());
        self.data
            .get((pos.row, pos.col))
            .unwrap_or_else(|| panic!("{}", out_of_bound_message(pos, num_rows, num_cols)))
    }
}

impl ops::IndexMut<Coord> for Grid {
    #[track_caller]
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output {
        let (num_rows, num_cols) = (self.num_rows(), self.num_cols());
        self.data
            .get_mut((pos.row, pos.col))
            .unwrap_or_else(|| panic!("{}", out_of_bound_message(pos, num_rows, num_cols)))
    }
}

fn out_of_bound_message(pos: Coord, num_rows: usize, num_cols: usize) -> String {
    format!(
        "Coord ({}, {}) is out of bound for {}x{} grid",
        pos.row, pos.col, num_rows, num_cols
    )
}


// Location label to grid position, for every square currently in the grid.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct LocationIndex {
    coords: HashMap<Location, Coord>,
}

impl LocationIndex {
    pub fn build(grid: &Grid) -> Self {
        LocationIndex {
            coords: grid.squares().map(|(coord, sq)| (sq.location(), coord)).collect(),
        }
    }

    pub fn get(&self, location: Location) -> Option<Coord> { self.coords.get(&location).copied() }
    pub fn len(&self) -> usize { self.coords.len() }
    pub fn is_empty(&self) -> bool { self.coords.is_empty() }
}
