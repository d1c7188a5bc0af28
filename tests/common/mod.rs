// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::time::Duration;

use extensible_board::{AddUnit, BoardConfig, BoardStateStore, TimerOutcome, UpdateOutcome};
use indoc::indoc;
use instant::Instant;


#[allow(dead_code)]
pub const START_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[allow(dead_code)]
pub const START_POSITION_RENDERED: &str = indoc! {"
    rnbqkbnr
    pppppppp
    ........
    ........
    ........
    ........
    PPPPPPPP
    RNBQKBNR"};

#[allow(dead_code)]
pub fn init_logging() { let _ = env_logger::builder().is_test(true).try_init(); }

#[allow(dead_code)]
pub fn extensible_config(unit: AddUnit, limit: usize) -> BoardConfig {
    BoardConfig {
        horizontal_add_unit: unit,
        vertical_add_unit: unit,
        horizontal_extend_limit: limit,
        vertical_extend_limit: limit,
        animation_duration: Duration::from_millis(100),
    }
}

#[allow(dead_code)]
pub fn new_store(config: BoardConfig) -> BoardStateStore {
    init_logging();
    BoardStateStore::new(config).unwrap()
}

// Feeds the position and lets the animation run to completion.
#[allow(dead_code)]
pub fn settle(store: &mut BoardStateStore, notation: &str, now: Instant) {
    let outcome = store.on_position(notation, now);
    assert!(matches!(outcome, UpdateOutcome::AnimationStarted { .. }), "{outcome:?}");
    let deadline = store.next_deadline().unwrap();
    assert_eq!(store.on_timer(deadline), TimerOutcome::Adopted);
}

#[allow(dead_code)]
pub fn render(store: &BoardStateStore) -> String { store.board().grid().render() }
