use log::debug;
use serde::Serialize;

use crate::config::BoardConfig;
use crate::coord::{Coord, Location};
use crate::diff::{PieceMap, piece_map};
use crate::fen::decode_position;
use crate::grid::{Grid, LocationIndex, Square};
use crate::padding::pad_grid;
use crate::unit::UnitIndex;


// Immutable snapshot of the board: the padded grid and everything derived from it. Any change
// produces a new snapshot via `rebuild`, so the indices never go stale.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct BoardState {
    grid: Grid,
    locations: LocationIndex,
    units: UnitIndex,
}

impl BoardState {
    pub fn empty() -> Self {
        BoardState {
            grid: Grid::empty(),
            locations: LocationIndex::default(),
            units: UnitIndex::default(),
        }
    }

    pub fn from_position(notation: &str, config: &BoardConfig) -> Self {
        Self::rebuild(decode_position(notation), config)
    }

    // Pads the grid and recomputes both indices.
    pub fn rebuild(grid: Grid, config: &BoardConfig) -> Self {
        let (grid, _) = pad_grid(&grid, config);
        let locations = LocationIndex::build(&grid);
        let units = UnitIndex::build(&grid, config.horizontal_add_unit, config.vertical_add_unit);
        debug!(
            "Rebuilt board: {}x{}, {} non-existent squares",
            grid.num_rows(),
            grid.num_cols(),
            units.len()
        );
        BoardState { grid, locations, units }
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn locations(&self) -> &LocationIndex { &self.locations }
    pub fn units(&self) -> &UnitIndex { &self.units }

    pub fn num_rows(&self) -> usize { self.grid.num_rows() }
    pub fn num_cols(&self) -> usize { self.grid.num_cols() }

    pub fn coord(&self, location: Location) -> Option<Coord> { self.locations.get(location) }
    pub fn square(&self, coord: Coord) -> Option<&Square> { self.grid.get(coord) }
    pub fn square_at(&self, location: Location) -> Option<&Square> {
        self.grid.get(self.coord(location)?)
    }
    pub fn unit(&self, location: Location) -> &[Coord] { self.units.get(location) }

    pub fn piece_map(&self) -> PieceMap { piece_map(&self.grid) }
}

impl Default for BoardState {
    fn default() -> Self { BoardState::empty() }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::padding::AddUnit;
    use crate::piece::SquareContent;

    fn loc(s: &str) -> Location { s.parse().unwrap() }

    #[test]
    fn start_position_without_extension() {
        let notation = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let state = BoardState::from_position(notation, &BoardConfig::default());
        assert_eq!(state.grid(), &decode_position(notation));
        assert!(state.units().is_empty());
        assert_eq!(state.locations().len(), 64);
    }

    #[test]
    fn indices_follow_padding() {
        let config = BoardConfig {
            horizontal_add_unit: AddUnit::new(2, 2).unwrap(),
            vertical_add_unit: AddUnit::new(2, 2).unwrap(),
            horizontal_extend_limit: 2,
            vertical_extend_limit: 2,
            ..BoardConfig::default()
        };
        let state = BoardState::from_position("8/8/8/8/8/8/8/8", &config);
        assert_eq!((state.num_rows(), state.num_cols()), (12, 12));
        assert_eq!(state.coord(loc("B10")), Some(Coord::new(0, 0)));
        assert_eq!(state.coord(loc("a8")), Some(Coord::new(2, 2)));
        assert_eq!(state.square_at(loc("a8")).unwrap().content, SquareContent::Empty);
        assert_eq!(state.square_at(loc("j-1")).unwrap().content, SquareContent::NonExistent);
        // 12 * 12 - 8 * 8
        assert_eq!(state.units().len(), 80);
        assert_eq!(state.unit(loc("B10")).len(), 4);
        assert_eq!(state.unit(loc("a8")), &[] as &[Coord]);
    }

    #[test]
    fn empty_position() {
        let state = BoardState::from_position("", &BoardConfig::default());
        assert_eq!(state, BoardState::empty());
        assert_eq!(state.num_cols(), 0);
        assert_eq!(state.square_at(loc("a1")), None);
    }
}
