// Owner of the board state shown to the player.
//
// The board is driven by two events: a new position arrives from outside (`on_position`), and the
// animation window ends (`on_timer`). Time is passed in explicitly; the host is expected to call
// `on_timer` at `next_deadline` or later.
//
// An animation whose deadline has passed counts as finished even if `on_timer` hasn't been called
// yet: it is completed lazily by the next `on_position`.
//
// State machine on a new position:
//   - if the position is the echo of a move applied locally, it is adopted immediately without
//     animation;
//   - if an animation is in flight, it is cancelled and the new position is adopted immediately;
//   - otherwise the diff is published and the new position is adopted when the animation window
//     ends.
//
// Queries never fail: unknown or malformed locations produce neutral results.

use std::mem;

use anyhow::Context;
use instant::Instant;
use log::trace;

use crate::board_state::BoardState;
use crate::config::BoardConfig;
use crate::coord::{Coord, Location};
use crate::diff::Diff;
use crate::grid::Square;
use crate::piece::{Piece, SquareContent};


#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UpdateOutcome {
    // The position confirms a move that was already applied locally. Adopted without animation.
    AdoptedManualMove,
    // The position arrived during an animation. The animation was cancelled and the position
    // adopted immediately.
    AdoptedInterruptingAnimation,
    // The diff was published. The position will be adopted once `deadline` is reached.
    AnimationStarted { deadline: Instant },
}

#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerOutcome {
    NothingPending,
    NotYet,
    Adopted,
}

#[derive(Debug)]
enum AnimationState {
    Idle,
    Pending { deadline: Instant, candidate: BoardState },
}

#[derive(Debug)]
pub struct BoardStateStore {
    config: BoardConfig,
    board: BoardState,
    diff: Diff,
    animation: AnimationState,
    manual_move_override: bool,
}

impl BoardStateStore {
    pub fn new(config: BoardConfig) -> anyhow::Result<Self> {
        config.validate().context("cannot create board state store")?;
        Ok(BoardStateStore {
            config,
            board: BoardState::empty(),
            diff: Diff::default(),
            animation: AnimationState::Idle,
            manual_move_override: false,
        })
    }

    pub fn config(&self) -> &BoardConfig { &self.config }

    pub fn on_position(&mut self, notation: &str, now: Instant) -> UpdateOutcome {
        let candidate = BoardState::from_position(notation, &self.config);
        self.finish_expired_animation(now);

        if self.manual_move_override {
            trace!("Adopting echoed local move: {notation}");
            self.manual_move_override = false;
            self.animation = AnimationState::Idle;
            self.board = candidate;
            return UpdateOutcome::AdoptedManualMove;
        }

        if self.is_waiting_for_animation(now) {
            trace!("Cancelling animation in favor of: {notation}");
            self.animation = AnimationState::Idle;
            self.board = candidate;
            return UpdateOutcome::AdoptedInterruptingAnimation;
        }

        self.diff = Diff::between(&self.board.piece_map(), &candidate.piece_map());
        let deadline = now + self.config.animation_duration;
        trace!(
            "Animating to {notation}: {} added, {} removed",
            self.diff.added.len(),
            self.diff.removed.len()
        );
        self.animation = AnimationState::Pending { deadline, candidate };
        UpdateOutcome::AnimationStarted { deadline }
    }

    pub fn on_timer(&mut self, now: Instant) -> TimerOutcome {
        if matches!(self.animation, AnimationState::Idle) {
            TimerOutcome::NothingPending
        } else if self.finish_expired_animation(now) {
            TimerOutcome::Adopted
        } else {
            TimerOutcome::NotYet
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.animation {
            AnimationState::Idle => None,
            AnimationState::Pending { deadline, .. } => Some(*deadline),
        }
    }

    pub fn is_waiting_for_animation(&self, now: Instant) -> bool {
        matches!(self.animation, AnimationState::Pending { deadline, .. } if now < deadline)
    }

    pub fn manual_move_override(&self) -> bool { self.manual_move_override }
    pub fn set_manual_move_override(&mut self, value: bool) { self.manual_move_override = value; }

    pub fn board(&self) -> &BoardState { &self.board }
    pub fn diff(&self) -> &Diff { &self.diff }
    pub fn num_rows(&self) -> usize { self.board.num_rows() }
    pub fn num_cols(&self) -> usize { self.board.num_cols() }
    pub fn square(&self, row: usize, col: usize) -> Option<&Square> {
        self.board.square(Coord::new(row, col))
    }

    pub fn location_coord(&self, location: &str) -> Option<Coord> {
        self.board.coord(Location::from_algebraic(location)?)
    }

    // `None` unless there is a real piece at the location.
    pub fn piece(&self, location: &str) -> Option<Piece> {
        self.content(location)?.piece()
    }

    pub fn is_non_existent(&self, location: &str) -> bool {
        self.content(location).is_some_and(SquareContent::is_non_existent)
    }

    pub fn unit(&self, location: &str) -> &[Coord] {
        match Location::from_algebraic(location) {
            Some(location) => self.board.unit(location),
            None => &[],
        }
    }

    // Grid offset (row delta, col delta) that the piece at `source` should travel during the
    // current animation. `None` if there is no animation or the piece didn't go anywhere visible.
    pub fn animation_offset(
        &self, source: &str, now: Instant,
        is_promotion: impl Fn(Location, Location, Piece) -> bool,
    ) -> Option<(isize, isize)> {
        if !self.is_waiting_for_animation(now) {
            return None;
        }
        let source = Location::from_algebraic(source)?;
        let dest = self.diff.find_destination(source, is_promotion)?;
        Some(self.board.coord(dest)? - self.board.coord(source)?)
    }

    // Moves a piece on the local board, ahead of confirmation. The next position is expected to
    // echo this move and is adopted without animation. Returns false (and does nothing) if there
    // is no piece at `from` or if `to` is not on the board.
    pub fn move_piece(&mut self, from: &str, to: &str, piece: Piece) -> bool {
        let (Some(from), Some(to)) = (self.location_coord(from), self.location_coord(to)) else {
            return false;
        };
        if !self.board.grid()[from].content.is_piece() || self.board.grid()[to].is_non_existent() {
            return false;
        }
        let mut grid = self.board.grid().clone();
        grid[from].content = SquareContent::Empty;
        grid[to].content = SquareContent::Piece(piece);
        self.board = BoardState::rebuild(grid, &self.config);
        self.manual_move_override = true;
        true
    }

    // Turns the block of non-existent squares containing `location` into empty squares and
    // regrows the padding around them. Returns false (and does nothing) if the location is not a
    // non-existent square.
    pub fn materialize_unit(&mut self, location: &str) -> bool {
        let Some(location) = Location::from_algebraic(location) else {
            return false;
        };
        if !self.board.square_at(location).is_some_and(Square::is_non_existent) {
            return false;
        }
        let mut grid = self.board.grid().clone();
        for &coord in self.board.unit(location) {
            grid[coord].content = SquareContent::Empty;
        }
        trace!("Materializing {} squares at {location}", self.board.unit(location).len());
        self.board = BoardState::rebuild(grid, &self.config);
        true
    }

    // Adopts the pending candidate if its deadline has been reached. Returns whether it did.
    fn finish_expired_animation(&mut self, now: Instant) -> bool {
        if self.is_waiting_for_animation(now) {
            return false;
        }
        let AnimationState::Pending { candidate, .. } =
            mem::replace(&mut self.animation, AnimationState::Idle)
        else {
            return false;
        };
        trace!("Animation finished");
        self.board = candidate;
        true
    }

    fn content(&self, location: &str) -> Option<SquareContent> {
        let location = Location::from_algebraic(location)?;
        Some(self.board.square_at(location)?.content)
    }
}
