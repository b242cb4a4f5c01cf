//! Tetris update: manual moves, gravity, locking, line clears

use super::state::{
    collides, rotate_matrix, Piece, TetrisEvent, TetrisState, COLS,
    DROP_INTERVAL_STEP_MS, LINES_PER_LEVEL, MIN_DROP_INTERVAL_MS, ROWS,
};

/// One-shot input intents for a single tick. Manual moves apply immediately
/// and are never gated by the drop timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TetrisInput {
    pub left: bool,
    pub right: bool,
    pub rotate: bool,
    pub soft_drop: bool,
    pub hard_drop: bool,
    pub pause: bool,
    pub restart: bool,
}

/// Advance the game by `dt_ms` elapsed milliseconds, applying inputs first
pub fn tick(state: &mut TetrisState, input: &TetrisInput, dt_ms: f32) {
    if input.restart {
        state.reset();
        return;
    }
    if input.pause && !state.game_over {
        state.paused = !state.paused;
    }
    if state.paused || state.game_over {
        // Further input is inert until an external reset
        return;
    }

    if input.left {
        state.move_piece(-1);
    }
    if input.right {
        state.move_piece(1);
    }
    if input.rotate {
        state.rotate_piece();
    }
    if input.soft_drop {
        state.soft_drop();
    }
    if input.hard_drop && !state.game_over {
        state.hard_drop();
    }
    if state.game_over {
        return;
    }

    // Gravity: level-dependent interval, reset after each descent
    state.drop_counter_ms += dt_ms;
    if state.drop_counter_ms > state.drop_interval_ms {
        state.current.y += 1;
        if collides(&state.grid, &state.current) {
            state.current.y -= 1;
            state.lock_current();
        }
        state.drop_counter_ms = 0.0;
    }
}

impl TetrisState {
    /// Shift the piece horizontally; reverted on collision.
    /// Returns whether the move committed.
    pub fn move_piece(&mut self, dir: i32) -> bool {
        self.current.x += dir;
        if collides(&self.grid, &self.current) {
            self.current.x -= dir;
            false
        } else {
            self.events.push(TetrisEvent::Move);
            true
        }
    }

    /// Rotate 90°, trying the wall-kick offsets +1, then -2 (net -1), then
    /// +1 back to the original column. On total failure the piece keeps its
    /// pre-rotation shape and position. Returns whether the rotation
    /// committed.
    pub fn rotate_piece(&mut self) -> bool {
        let before = self.current.shape.clone();
        self.current.shape = rotate_matrix(&self.current.shape);
        if collides(&self.grid, &self.current) {
            self.current.x += 1;
            if collides(&self.grid, &self.current) {
                self.current.x -= 2;
                if collides(&self.grid, &self.current) {
                    self.current.x += 1;
                    self.current.shape = before;
                    return false;
                }
            }
        }
        self.events.push(TetrisEvent::Rotate);
        true
    }

    /// Descend one row; locking when the descent collides
    pub fn soft_drop(&mut self) {
        self.current.y += 1;
        if collides(&self.grid, &self.current) {
            self.current.y -= 1;
            self.lock_current();
        }
    }

    /// Descend until collision, then lock without waiting for the timer
    pub fn hard_drop(&mut self) {
        loop {
            self.current.y += 1;
            if collides(&self.grid, &self.current) {
                self.current.y -= 1;
                break;
            }
        }
        self.lock_current();
        self.events.push(TetrisEvent::HardDrop);
    }

    /// Commit the piece into the grid, clear lines, spawn the successor
    pub fn lock_current(&mut self) {
        for (y, row) in self.current.shape.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                let gx = self.current.x + x as i32;
                let gy = self.current.y + y as i32;
                if (0..ROWS).contains(&gy) && (0..COLS).contains(&gx) {
                    self.grid[gy as usize][gx as usize] = Some(self.current.kind);
                }
            }
        }
        self.clear_lines();
        self.spawn_piece();
    }

    /// Remove full rows bottom-to-top, inserting empty rows at the top, and
    /// apply scoring/leveling.
    pub fn clear_lines(&mut self) {
        let mut cleared = 0u32;
        let mut y = ROWS as usize;
        while y > 0 {
            y -= 1;
            if self.grid[y].iter().all(|c| c.is_some()) {
                self.grid.remove(y);
                self.grid.insert(0, vec![None; COLS as usize]);
                cleared += 1;
                y += 1; // rows shifted down; re-check this index
            }
        }
        if cleared > 0 {
            self.lines += cleared;
            self.score += (cleared as u64) * 100 * self.level as u64;
            self.events.push(TetrisEvent::LineClear);
            if self.lines >= self.level * LINES_PER_LEVEL {
                self.level += 1;
                self.drop_interval_ms =
                    (self.drop_interval_ms - DROP_INTERVAL_STEP_MS).max(MIN_DROP_INTERVAL_MS);
            }
        }
    }

    /// Promote the pre-rolled next piece; an immediately colliding spawn is
    /// game over.
    pub fn spawn_piece(&mut self) {
        let kind = self.next.kind;
        self.next = Piece::random(&mut self.rng);
        self.current = Piece::spawn(kind);
        if collides(&self.grid, &self.current) {
            self.game_over = true;
            self.events.push(TetrisEvent::GameOver);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetris::state::{empty_grid, PieceKind, START_DROP_INTERVAL_MS};

    fn state_with(kind: PieceKind) -> TetrisState {
        let mut state = TetrisState::new(1);
        state.current = Piece::spawn(kind);
        state
    }

    /// Fill a row except the given columns
    fn fill_row(state: &mut TetrisState, y: usize, holes: &[i32]) {
        for x in 0..COLS {
            if !holes.contains(&x) {
                state.grid[y][x as usize] = Some(PieceKind::Z);
            }
        }
    }

    #[test]
    fn test_move_commits_and_rejects() {
        let mut state = state_with(PieceKind::O);
        let x0 = state.current.x;
        assert!(state.move_piece(1));
        assert_eq!(state.current.x, x0 + 1);

        // Pin against the left wall
        state.current.x = 0;
        assert!(!state.move_piece(-1));
        assert_eq!(state.current.x, 0);
        assert!(state.events.contains(&TetrisEvent::Move));
    }

    #[test]
    fn test_gravity_descends_after_interval() {
        let mut state = state_with(PieceKind::T);
        let y0 = state.current.y;
        tick(&mut state, &TetrisInput::default(), 500.0);
        assert_eq!(state.current.y, y0); // 500 < 800
        tick(&mut state, &TetrisInput::default(), 400.0);
        assert_eq!(state.current.y, y0 + 1);
        assert_eq!(state.drop_counter_ms, 0.0);
    }

    #[test]
    fn test_soft_drop_locks_on_floor() {
        let mut state = state_with(PieceKind::O);
        state.current.y = ROWS - 2; // resting on the floor
        state.soft_drop();
        // Piece locked into the bottom rows and a fresh one spawned
        assert_eq!(state.current.y, -1);
        let bottom = &state.grid[(ROWS - 1) as usize];
        assert!(bottom.iter().any(|c| c.is_some()));
    }

    #[test]
    fn test_hard_drop_locks_immediately() {
        let mut state = state_with(PieceKind::O);
        state.hard_drop();
        assert!(state.events.contains(&TetrisEvent::HardDrop));
        let bottom = &state.grid[(ROWS - 1) as usize];
        assert_eq!(bottom.iter().filter(|c| c.is_some()).count(), 2);
        assert_eq!(
            state.grid[(ROWS - 2) as usize]
                .iter()
                .filter(|c| c.is_some())
                .count(),
            2
        );
    }

    #[test]
    fn test_single_line_clear_scores_and_compacts() {
        let mut state = state_with(PieceKind::O);
        let y = (ROWS - 1) as usize;
        fill_row(&mut state, y, &[4, 5]);
        fill_row(&mut state, y - 1, &[4, 5, 6, 7]); // partial row above
        state.current.x = 4;

        state.hard_drop();

        // Bottom row was full, got removed; the partial row compacted down
        assert_eq!(state.lines, 1);
        assert_eq!(state.score, 100); // 1 * 100 * level 1
        assert!(state.events.contains(&TetrisEvent::LineClear));
        assert!(state.grid[0].iter().all(|c| c.is_none()));
        let new_bottom = &state.grid[y];
        // Compacted row: old y-1 content plus the locked O cells at 4,5
        assert!(new_bottom[3].is_some());
        assert!(new_bottom[4].is_some());
        assert!(new_bottom[6].is_none());
    }

    #[test]
    fn test_level_up_shortens_interval_with_floor() {
        let mut state = state_with(PieceKind::O);
        state.lines = LINES_PER_LEVEL - 1;
        let y = (ROWS - 1) as usize;
        fill_row(&mut state, y, &[4, 5]);
        state.current.x = 4;
        state.hard_drop();
        assert_eq!(state.level, 2);
        assert_eq!(
            state.drop_interval_ms,
            START_DROP_INTERVAL_MS - DROP_INTERVAL_STEP_MS
        );

        // Interval clamps at the floor no matter how many levels pass
        state.grid = empty_grid();
        state.drop_interval_ms = MIN_DROP_INTERVAL_MS + 10.0;
        state.lines = state.level * LINES_PER_LEVEL - 1;
        fill_row(&mut state, y, &[4, 5]);
        state.current = Piece::spawn(PieceKind::O);
        state.current.x = 4;
        state.hard_drop();
        assert_eq!(state.drop_interval_ms, MIN_DROP_INTERVAL_MS);
    }

    #[test]
    fn test_rotation_plain_commit() {
        let mut state = state_with(PieceKind::T);
        state.current.y = 5;
        let x0 = state.current.x;
        assert!(state.rotate_piece());
        assert_eq!(state.current.x, x0);
        assert_eq!(
            state.current.shape,
            vec![vec![0, 1, 0], vec![0, 1, 1], vec![0, 1, 0]]
        );
    }

    #[test]
    fn test_wall_kick_shifts_right() {
        // Vertical I (occupies matrix column 2) at x=3, y=5: cells gx=5,
        // gy=5..=8. Rotating yields a horizontal bar in matrix row 2, cells
        // gy=7, gx=3..=6. A filled cell at (7,3) blocks offset 0; the +1
        // kick (gx=4..=7) is free and commits.
        let mut state = state_with(PieceKind::I);
        state.current.shape = rotate_matrix(&state.current.shape);
        state.current.y = 5;
        state.grid[7][3] = Some(PieceKind::Z);
        let x0 = state.current.x;

        let committed = state.rotate_piece();
        assert!(committed);
        assert_eq!(state.current.x, x0 + 1);
    }

    #[test]
    fn test_wall_kick_net_minus_one_at_right_wall() {
        // Vertical I hugging the right wall (column gx=9 at x=7). The
        // rotated bar spans gx=7..=10: offset 0 and +1 leave the grid, the
        // -2 step (net -1) fits.
        let mut state = state_with(PieceKind::I);
        state.current.shape = rotate_matrix(&state.current.shape);
        state.current.x = 7;
        state.current.y = 5;

        let committed = state.rotate_piece();
        assert!(committed);
        assert_eq!(state.current.x, 6);
    }

    #[test]
    fn test_wall_kick_exhaustion_keeps_piece_unchanged() {
        let mut state = state_with(PieceKind::T);
        state.current.y = 5;
        let shape0 = state.current.shape.clone();
        let x0 = state.current.x;

        // Wall the piece in so the rotation collides at 0, +1 and -1
        for y in 4..9 {
            for x in 0..COLS {
                state.grid[y][x as usize] = Some(PieceKind::Z);
            }
        }
        let committed = state.rotate_piece();
        assert!(!committed);
        assert_eq!(state.current.shape, shape0);
        assert_eq!(state.current.x, x0);
    }

    #[test]
    fn test_spawn_into_occupied_center_is_game_over() {
        let mut state = state_with(PieceKind::O);
        // Occupy the spawn rows across the center columns
        for x in 3..7 {
            state.grid[0][x] = Some(PieceKind::Z);
            state.grid[1][x] = Some(PieceKind::Z);
        }
        state.spawn_piece();
        assert!(state.game_over);
        assert!(state.events.contains(&TetrisEvent::GameOver));

        // Ticking is now inert
        let y0 = state.current.y;
        tick(&mut state, &TetrisInput::default(), 10_000.0);
        assert_eq!(state.current.y, y0);
        let moved = TetrisInput {
            left: true,
            ..Default::default()
        };
        let x0 = state.current.x;
        tick(&mut state, &moved, 16.0);
        assert_eq!(state.current.x, x0);
    }

    #[test]
    fn test_reset_restores_run() {
        let mut state = state_with(PieceKind::O);
        state.score = 900;
        state.level = 3;
        state.lines = 25;
        state.game_over = true;
        state.drop_interval_ms = 200.0;
        let input = TetrisInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, 16.0);
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.drop_interval_ms, START_DROP_INTERVAL_MS);
        assert!(state.grid.iter().flatten().all(|c| c.is_none()));
    }

    #[test]
    fn test_pause_stops_gravity() {
        let mut state = state_with(PieceKind::T);
        let toggle = TetrisInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &toggle, 16.0);
        assert!(state.paused);
        let y0 = state.current.y;
        tick(&mut state, &TetrisInput::default(), 5_000.0);
        assert_eq!(state.current.y, y0);
        tick(&mut state, &toggle, 16.0);
        assert!(!state.paused);
    }
}
