//! Tetris grid, piece, and state types

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Grid width in cells
pub const COLS: i32 = 10;
/// Grid height in cells
pub const ROWS: i32 = 20;
/// Cumulative cleared lines required per level
pub const LINES_PER_LEVEL: u32 = 10;
/// Drop interval at level 1, in milliseconds
pub const START_DROP_INTERVAL_MS: f32 = 800.0;
/// Interval reduction per level
pub const DROP_INTERVAL_STEP_MS: f32 = 80.0;
/// Fastest allowed drop interval
pub const MIN_DROP_INTERVAL_MS: f32 = 100.0;

/// The seven tetromino kinds. A kind owns its spawn shape and neon color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Spawn-orientation shape matrix (square, side 2-4)
    pub fn shape(self) -> Vec<Vec<u8>> {
        match self {
            PieceKind::I => vec![
                vec![0, 0, 0, 0],
                vec![1, 1, 1, 1],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
            ],
            PieceKind::J => vec![vec![1, 0, 0], vec![1, 1, 1], vec![0, 0, 0]],
            PieceKind::L => vec![vec![0, 0, 1], vec![1, 1, 1], vec![0, 0, 0]],
            PieceKind::O => vec![vec![1, 1], vec![1, 1]],
            PieceKind::S => vec![vec![0, 1, 1], vec![1, 1, 0], vec![0, 0, 0]],
            PieceKind::T => vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 0, 0]],
            PieceKind::Z => vec![vec![1, 1, 0], vec![0, 1, 1], vec![0, 0, 0]],
        }
    }

    /// Neon palette color for the renderer
    pub fn color(self) -> &'static str {
        match self {
            PieceKind::I => "#8be9fd",
            PieceKind::J => "#bd93f9",
            PieceKind::L => "#ffb86c",
            PieceKind::O => "#f1fa8c",
            PieceKind::S => "#50fa7b",
            PieceKind::T => "#ff79c6",
            PieceKind::Z => "#8bd6ff",
        }
    }
}

/// The falling piece: a shape matrix anchored at a grid cell. `y` starts at
/// -1 so pieces enter from above the visible grid.
#[derive(Debug, Clone)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Vec<Vec<u8>>,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// New piece in spawn orientation, horizontally centered, above the grid
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = kind.shape();
        let width = shape[0].len() as i32;
        Self {
            kind,
            shape,
            x: (COLS - width) / 2,
            y: -1,
        }
    }

    /// Roll a uniformly random piece
    pub fn random(rng: &mut Pcg32) -> Self {
        let kind = PieceKind::ALL[rng.random_range(0..PieceKind::ALL.len())];
        Piece::spawn(kind)
    }
}

/// Playfield: `ROWS` rows of `COLS` cells, each empty or tagged with the
/// kind that locked into it.
pub type Grid = Vec<Vec<Option<PieceKind>>>;

/// All-empty playfield
pub fn empty_grid() -> Grid {
    vec![vec![None; COLS as usize]; ROWS as usize]
}

/// True if any occupied cell of the piece leaves the column/row bounds or
/// overlaps an occupied grid cell. Cells above the grid (gy < 0) are legal.
pub fn collides(grid: &Grid, piece: &Piece) -> bool {
    for (y, row) in piece.shape.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            if cell == 0 {
                continue;
            }
            let gx = piece.x + x as i32;
            let gy = piece.y + y as i32;
            if gx < 0 || gx >= COLS || gy >= ROWS {
                return true;
            }
            if gy >= 0 && grid[gy as usize][gx as usize].is_some() {
                return true;
            }
        }
    }
    false
}

/// 90° clockwise rotation of a square matrix
pub fn rotate_matrix(m: &[Vec<u8>]) -> Vec<Vec<u8>> {
    let n = m.len();
    let mut res = vec![vec![0u8; n]; n];
    for (y, row) in m.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            res[x][n - 1 - y] = cell;
        }
    }
    res
}

/// Tick outcomes the frontend reacts to (audio cues, HUD refresh)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrisEvent {
    Move,
    Rotate,
    HardDrop,
    LineClear,
    GameOver,
}

/// Complete Tetris game state
#[derive(Debug, Clone)]
pub struct TetrisState {
    pub grid: Grid,
    pub current: Piece,
    pub next: Piece,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: f32,
    pub drop_counter_ms: f32,
    pub paused: bool,
    pub game_over: bool,
    pub rng: Pcg32,
    pub events: Vec<TetrisEvent>,
}

impl TetrisState {
    /// Fresh game: empty grid, current and next pieces rolled
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let current = Piece::random(&mut rng);
        let next = Piece::random(&mut rng);
        Self {
            grid: empty_grid(),
            current,
            next,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: START_DROP_INTERVAL_MS,
            drop_counter_ms: 0.0,
            paused: false,
            game_over: false,
            rng,
            events: Vec::new(),
        }
    }

    /// Full reset in place, keeping the RNG stream
    pub fn reset(&mut self) {
        self.grid = empty_grid();
        self.current = Piece::random(&mut self.rng);
        self.next = Piece::random(&mut self.rng);
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = START_DROP_INTERVAL_MS;
        self.drop_counter_ms = 0.0;
        self.paused = false;
        self.game_over = false;
    }

    /// Take accumulated events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<TetrisEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_are_square() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            let n = shape.len();
            assert!((2..=4).contains(&n));
            for row in &shape {
                assert_eq!(row.len(), n);
            }
        }
    }

    #[test]
    fn test_spawn_is_centered_above_grid() {
        let piece = Piece::spawn(PieceKind::I);
        assert_eq!(piece.x, 3); // (10 - 4) / 2
        assert_eq!(piece.y, -1);
        let piece = Piece::spawn(PieceKind::O);
        assert_eq!(piece.x, 4); // (10 - 2) / 2
    }

    #[test]
    fn test_rotate_matrix_quarter_turn() {
        let m = vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 0, 0]];
        let r = rotate_matrix(&m);
        assert_eq!(r, vec![vec![0, 1, 0], vec![0, 1, 1], vec![0, 1, 0]]);
        // Four quarter turns come back around
        let mut m4 = m.clone();
        for _ in 0..4 {
            m4 = rotate_matrix(&m4);
        }
        assert_eq!(m4, m);
    }

    #[test]
    fn test_collides_bounds_and_cells() {
        let grid = empty_grid();
        let mut piece = Piece::spawn(PieceKind::O);
        assert!(!collides(&grid, &piece));

        piece.x = -1;
        assert!(collides(&grid, &piece));
        piece.x = COLS - 1;
        assert!(collides(&grid, &piece)); // right column out of bounds
        piece.x = COLS - 2;
        assert!(!collides(&grid, &piece));

        piece.y = ROWS - 2;
        assert!(!collides(&grid, &piece)); // resting on the floor
        piece.y = ROWS - 1;
        assert!(collides(&grid, &piece));

        // Occupied cell blocks even when in bounds
        let mut grid = empty_grid();
        grid[5][4] = Some(PieceKind::T);
        let mut piece = Piece::spawn(PieceKind::O);
        piece.y = 5;
        assert!(collides(&grid, &piece));
    }

    #[test]
    fn test_cells_above_grid_are_legal() {
        let grid = empty_grid();
        let piece = Piece::spawn(PieceKind::O); // y = -1, top row above grid
        assert!(!collides(&grid, &piece));
    }
}
