// For every non-existent square, the block of non-existent squares that would be materialized
// together with it.

use std::collections::HashMap;

use serde::Serialize;

use crate::coord::{Coord, Location};
use crate::grid::{Grid, Square};
use crate::padding::AddUnit;


// Candidate blocks are tried in this order; the first one that fits wins. Each entry is
// (vertical step, horizontal step): down-right, up-right, down-left, up-left.
const DIRECTIONS: [(isize, isize); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct UnitIndex {
    units: HashMap<Location, Vec<Coord>>,
}

impl UnitIndex {
    pub fn build(grid: &Grid, horizontal: AddUnit, vertical: AddUnit) -> Self {
        let units = grid
            .squares()
            .filter(|(_, sq)| sq.is_non_existent())
            .map(|(coord, sq)| {
                let add_unit = governing_add_unit(sq, horizontal, vertical);
                (sq.location(), find_unit(grid, coord, add_unit))
            })
            .collect();
        UnitIndex { units }
    }

    // Empty if the location is unknown, is not a non-existent square, or cannot be materialized
    // as a full block right now.
    pub fn get(&self, location: Location) -> &[Coord] {
        self.units.get(&location).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, location: Location) -> bool { self.units.contains_key(&location) }
    pub fn len(&self) -> usize { self.units.len() }
    pub fn is_empty(&self) -> bool { self.units.is_empty() }
}

// Squares above rank 8 or below rank 1 grow the board vertically, everything else grows it
// horizontally. Rank is checked first, so corner squares use the vertical unit.
pub fn governing_add_unit(square: &Square, horizontal: AddUnit, vertical: AddUnit) -> AddUnit {
    if square.rank.is_canonical() { horizontal } else { vertical }
}

// Block of `x` columns by `y` rows with `corner` as one of its corners, going in the given
// direction. Squares are listed column by column. Coords may fall outside of the grid.
fn candidate(
    corner: Coord, add_unit: AddUnit, (d_row, d_col): (isize, isize),
) -> Option<Vec<Coord>> {
    let mut coords = Vec::with_capacity(add_unit.x * add_unit.y);
    for i in 0..add_unit.x as isize {
        for j in 0..add_unit.y as isize {
            coords.push(corner.offset(j * d_row, i * d_col)?);
        }
    }
    Some(coords)
}

fn is_materializable(grid: &Grid, coords: &[Coord]) -> bool {
    coords
        .iter()
        .all(|&coord| grid.get(coord).is_some_and(Square::is_non_existent))
}

pub fn find_unit(grid: &Grid, coord: Coord, add_unit: AddUnit) -> Vec<Coord> {
    if add_unit.is_single() {
        return vec![coord];
    }
    DIRECTIONS
        .into_iter()
        .filter_map(|direction| candidate(coord, add_unit, direction))
        .find(|coords| is_materializable(grid, coords))
        .unwrap_or_default()
}
