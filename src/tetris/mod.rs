//! Tetris simulation
//!
//! Grid, pieces, and the falling/locking state machine. Pure and
//! deterministic; the drop timer advances only through explicit ticks.

pub mod state;
pub mod tick;

pub use state::{
    collides, empty_grid, rotate_matrix, Grid, Piece, PieceKind, TetrisEvent, TetrisState, COLS,
    LINES_PER_LEVEL, ROWS,
};
pub use tick::{tick, TetrisInput};
