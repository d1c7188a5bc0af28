#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board_state;
pub mod config;
pub mod coord;
pub mod diff;
pub mod fen;
pub mod force;
pub mod grid;
pub mod padding;
pub mod piece;
pub mod store;
pub mod unit;

pub use board_state::BoardState;
pub use config::BoardConfig;
pub use coord::{Coord, File, Location, Rank};
pub use diff::{Diff, PieceMap};
pub use force::Force;
pub use grid::{Grid, Square};
pub use padding::AddUnit;
pub use piece::{Piece, SquareContent};
pub use store::{BoardStateStore, TimerOutcome, UpdateOutcome};
