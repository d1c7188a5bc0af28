// Grows the board with a border of non-existent squares, so that the player can add squares to the
// board by materializing them.
//
// For each edge:
//   - `unit_coverage`: how many of the outermost `add_unit` rows (or columns) are already
//     entirely non-existent;
//   - `frame_padding`: how far the grid already extends beyond the canonical a1-h8 frame;
//   - the edge is topped up to one full add unit, but the total padding beyond the frame may
//     not exceed the extend limit for the axis.

use anyhow::ensure;
use log::debug;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;
use crate::coord::{File, NUM_CANONICAL_COLS, NUM_CANONICAL_ROWS, Rank};
use crate::grid::{Grid, Square};


// The block of squares the player adds to the board in one go: `x` columns wide, `y` rows tall.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct AddUnit {
    pub x: usize,
    pub y: usize,
}

impl AddUnit {
    pub const SINGLE: AddUnit = AddUnit { x: 1, y: 1 };

    pub fn new(x: usize, y: usize) -> anyhow::Result<Self> {
        let unit = AddUnit { x, y };
        unit.validate()?;
        Ok(unit)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.x > 0 && self.y > 0, "add unit must be positive, got {}x{}", self.x, self.y);
        Ok(())
    }

    pub fn is_single(self) -> bool { self == AddUnit::SINGLE }
}

impl Default for AddUnit {
    fn default() -> Self { AddUnit::SINGLE }
}


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Edges<T> {
    pub top: T,
    pub bottom: T,
    pub left: T,
    pub right: T,
}

// Number of outermost rows/columns (looking no further than the add unit) that are entirely
// non-existent. A row or column that is only partially non-existent doesn't count.
pub fn unit_coverage(grid: &Grid, horizontal: AddUnit, vertical: AddUnit) -> Edges<usize> {
    let (num_rows, num_cols) = (grid.num_rows(), grid.num_cols());
    let top_n = vertical.y.min(num_rows);
    let side_n = horizontal.x.min(num_cols);
    Edges {
        top: (0..top_n).filter(|&r| grid.is_row_non_existent(r)).count(),
        bottom: (num_rows - top_n..num_rows).filter(|&r| grid.is_row_non_existent(r)).count(),
        left: (0..side_n).filter(|&c| grid.is_col_non_existent(c)).count(),
        right: (num_cols - side_n..num_cols).filter(|&c| grid.is_col_non_existent(c)).count(),
    }
}

// How far the grid reaches beyond the canonical frame on each side, judging by where rank 8
// (in the first column) and file 'a' (in the first row) are. Zero padding if either is missing.
// Can be negative if the grid is smaller than the frame.
pub fn frame_padding(grid: &Grid) -> Edges<i64> {
    if grid.is_empty() {
        return Edges::default();
    }
    let eighth_rank_row = grid.col(0).iter().position(|sq| sq.rank == Rank::EIGHTH);
    let a_file_col = grid.row(0).iter().position(|sq| sq.file == File::A);
    let (Some(eighth_rank_row), Some(a_file_col)) = (eighth_rank_row, a_file_col) else {
        return Edges::default();
    };
    let (num_rows, num_cols) = (grid.num_rows() as i64, grid.num_cols() as i64);
    Edges {
        top: eighth_rank_row as i64,
        bottom: num_rows - (NUM_CANONICAL_ROWS as i64 + eighth_rank_row as i64),
        left: a_file_col as i64,
        right: num_cols - (NUM_CANONICAL_COLS as i64 + a_file_col as i64),
    }
}

fn clamp_to_limit(existing: i64, to_add: i64, limit: usize) -> i64 {
    let limit = limit as i64;
    if existing + to_add > limit { limit - existing } else { to_add }
}

// Padding that `pad_grid` would add with the given config. Never negative and never above the
// extend limit of the axis.
pub fn padding_to_add(grid: &Grid, config: &BoardConfig) -> Edges<usize> {
    let coverage = unit_coverage(grid, config.horizontal_add_unit, config.vertical_add_unit);
    let existing = frame_padding(grid);
    let (h_unit, v_unit) = (config.horizontal_add_unit, config.vertical_add_unit);
    let (h_limit, v_limit) = (config.horizontal_extend_limit, config.vertical_extend_limit);
    let vertical = |existing, coverage: usize| {
        let to_add = v_unit.y as i64 - coverage as i64;
        clamp_to_limit(existing, to_add, v_limit).clamp(0, v_limit as i64) as usize
    };
    let horizontal = |existing, coverage: usize| {
        let to_add = h_unit.x as i64 - coverage as i64;
        clamp_to_limit(existing, to_add, h_limit).clamp(0, h_limit as i64) as usize
    };
    Edges {
        top: vertical(existing.top, coverage.top),
        bottom: vertical(existing.bottom, coverage.bottom),
        left: horizontal(existing.left, coverage.left),
        right: horizontal(existing.right, coverage.right),
    }
}

// Each new square is labelled as a continuation of the row (for left/right padding) or of the
// top-left/bottom-left square (for top/bottom padding).
fn pad_sides(grid: &Grid, left: usize, right: usize) -> Grid {
    let (num_rows, num_cols) = (grid.num_rows(), grid.num_cols());
    let data = Array2::from_shape_fn((num_rows, left + num_cols + right), |(r, c)| {
        let row = grid.row(r);
        let rank = row[0].rank;
        if c < left {
            Square::non_existent(row[0].file - (left - c) as i32, rank)
        } else if c < left + num_cols {
            row[c - left]
        } else {
            Square::non_existent(row[num_cols - 1].file + (c - left - num_cols + 1) as i32, rank)
        }
    });
    Grid::from_array(data)
}

fn pad_ends(grid: &Grid, top: usize, bottom: usize) -> Grid {
    let (num_rows, num_cols) = (grid.num_rows(), grid.num_cols());
    let first_file = grid.row(0)[0].file;
    let top_rank = grid.row(0)[0].rank;
    let bottom_rank = grid.row(num_rows - 1)[0].rank;
    let data = Array2::from_shape_fn((top + num_rows + bottom, num_cols), |(r, c)| {
        let file = first_file + c as i32;
        if r < top {
            Square::non_existent(file, top_rank + (top - r) as i32)
        } else if r < top + num_rows {
            grid.row(r - top)[c]
        } else {
            Square::non_existent(file, bottom_rank - (r - top - num_rows + 1) as i32)
        }
    });
    Grid::from_array(data)
}

// Returns the padded grid and the amount of padding added on each edge.
pub fn pad_grid(grid: &Grid, config: &BoardConfig) -> (Grid, Edges<usize>) {
    if grid.is_empty() {
        return (grid.clone(), Edges::default());
    }
    let added = padding_to_add(grid, config);
    let padded = pad_ends(&pad_sides(grid, added.left, added.right), added.top, added.bottom);
    debug!(
        "Padded {}x{} grid to {}x{} (top {}, bottom {}, left {}, right {})",
        grid.num_rows(),
        grid.num_cols(),
        padded.num_rows(),
        padded.num_cols(),
        added.top,
        added.bottom,
        added.left,
        added.right
    );
    (padded, added)
}
