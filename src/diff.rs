use std::collections::BTreeMap;

use serde::Serialize;

use crate::coord::Location;
use crate::grid::Grid;
use crate::piece::{Piece, SquareContent};


pub type PieceMap = BTreeMap<Location, SquareContent>;

pub fn piece_map(grid: &Grid) -> PieceMap {
    grid.squares().map(|(_, sq)| (sq.location(), sq.content)).collect()
}

// Per-location difference between two snapshots. A piece that moved shows up twice: in `removed`
// at its source and in `added` at its destination.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct Diff {
    pub added: PieceMap,
    pub removed: PieceMap,
}

impl Diff {
    pub fn between(old: &PieceMap, new: &PieceMap) -> Self {
        let changed = |from: &PieceMap, to: &PieceMap| -> PieceMap {
            from.iter()
                .filter(|&(location, content)| to.get(location) != Some(content))
                .map(|(&location, &content)| (location, content))
                .collect()
        };
        Diff {
            added: changed(new, old),
            removed: changed(old, new),
        }
    }

    pub fn is_empty(&self) -> bool { self.added.is_empty() && self.removed.is_empty() }

    // Where did the piece removed from `source` go? Looks for the same piece among the added
    // ones, or for a location accepted by `is_promotion` (called with source, candidate
    // destination and the removed piece). Locations are checked in board order, row by row from
    // the top, so the first match is the one closest to the top-left corner.
    pub fn find_destination(
        &self, source: Location, is_promotion: impl Fn(Location, Location, Piece) -> bool,
    ) -> Option<Location> {
        let piece = self.removed.get(&source)?.piece()?;
        self.added
            .iter()
            .find(|&(&dest, &content)| {
                content == SquareContent::Piece(piece) || is_promotion(source, dest, piece)
            })
            .map(|(&dest, _)| dest)
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fen::decode_position;

    fn loc(s: &str) -> Location { s.parse().unwrap() }

    fn map(entries: &[(&str, &str)]) -> PieceMap {
        entries.iter().map(|(l, c)| (loc(l), c.parse().unwrap())).collect()
    }

    fn no_promotion(_: Location, _: Location, _: Piece) -> bool { false }

    #[test]
    fn identical_maps() {
        let pieces = piece_map(&decode_position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"));
        assert_eq!(Diff::between(&pieces, &pieces), Diff::default());
    }

    #[test]
    fn removed_key() {
        let diff = Diff::between(&map(&[("a1", "wR")]), &PieceMap::new());
        assert_eq!(diff.removed, map(&[("a1", "wR")]));
        assert_eq!(diff.added, PieceMap::new());
    }

    #[test]
    fn added_key() {
        let diff = Diff::between(&PieceMap::new(), &map(&[("A9", "E")]));
        assert_eq!(diff.added, map(&[("A9", "E")]));
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn move_is_removal_plus_addition() {
        let old = piece_map(&decode_position("4/4/P3/4"));
        let new = piece_map(&decode_position("4/P3/4/4"));
        let diff = Diff::between(&old, &new);
        assert_eq!(diff.removed, map(&[("a6", "wP"), ("a7", "e")]));
        assert_eq!(diff.added, map(&[("a6", "e"), ("a7", "wP")]));
        assert_eq!(diff.find_destination(loc("a6"), no_promotion), Some(loc("a7")));
        // Not a piece.
        assert_eq!(diff.find_destination(loc("a7"), no_promotion), None);
        // Not removed.
        assert_eq!(diff.find_destination(loc("b8"), no_promotion), None);
    }

    #[test]
    fn destination_search_follows_board_order() {
        let old = piece_map(&decode_position("4/4/4/1P2"));
        let new = piece_map(&decode_position("3P/4/P3/4"));
        let diff = Diff::between(&old, &new);
        assert_eq!(diff.find_destination(loc("b5"), no_promotion), Some(loc("d8")));
    }

    #[test]
    fn promotion_destination() {
        let old = piece_map(&decode_position("4/P3/4/4"));
        let new = piece_map(&decode_position("Q3/4/4/4"));
        let diff = Diff::between(&old, &new);
        assert_eq!(diff.find_destination(loc("a7"), no_promotion), None);
        let is_promotion = |_: Location, dest: Location, piece: Piece| {
            piece.kind == 'P' && dest.rank.to_one_based() == 8
        };
        assert_eq!(diff.find_destination(loc("a7"), is_promotion), Some(loc("a8")));
    }
}
