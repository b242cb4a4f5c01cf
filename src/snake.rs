//! Snake simulation
//!
//! Fixed-cadence grid game: the frontend timer fires `step` at the current
//! `step_interval_ms`, which shortens as the snake eats.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Board size in cells
pub const GRID: i32 = 20;
/// Cell size in logical pixels (renderer)
pub const CELL_PX: f64 = 20.0;
/// Step interval at the start of a run
pub const START_INTERVAL_MS: u32 = 150;
/// Fastest allowed step interval
pub const MIN_INTERVAL_MS: u32 = 60;
/// Interval reduction applied every third food
pub const INTERVAL_STEP_MS: u32 = 10;

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }
}

/// Complete Snake game state
#[derive(Debug, Clone)]
pub struct SnakeState {
    /// Body segments, head first
    pub body: Vec<Cell>,
    /// None until the first turn; the snake sits still without a direction
    pub dir: Option<Direction>,
    pub food: Cell,
    pub score: u32,
    pub step_interval_ms: u32,
    pub game_over: bool,
    pub rng: Pcg32,
}

impl SnakeState {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let food = random_food(&mut rng);
        Self {
            body: vec![Cell::new(9, 10)],
            dir: None,
            food,
            score: 0,
            step_interval_ms: START_INTERVAL_MS,
            game_over: false,
            rng,
        }
    }

    /// Restore the initial state, keeping the RNG stream
    pub fn reset(&mut self) {
        self.body = vec![Cell::new(9, 10)];
        self.dir = None;
        self.food = random_food(&mut self.rng);
        self.score = 0;
        self.step_interval_ms = START_INTERVAL_MS;
        self.game_over = false;
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Change direction; a 180° reversal is rejected
    pub fn turn(&mut self, dir: Direction) {
        if let Some(current) = self.dir {
            if current.is_opposite(dir) {
                return;
            }
        }
        self.dir = Some(dir);
    }

    /// Advance one cell in the current direction. Does nothing until the
    /// first turn, or after game over.
    pub fn step(&mut self) {
        if self.game_over {
            return;
        }
        let Some(dir) = self.dir else { return };

        let (dx, dy) = dir.delta();
        let head = self.head();
        let new_head = Cell::new(head.x + dx, head.y + dy);

        if new_head == self.food {
            self.score += 1;
            self.food = random_food(&mut self.rng);
            if self.score % 3 == 0 && self.step_interval_ms > MIN_INTERVAL_MS {
                self.step_interval_ms -= INTERVAL_STEP_MS;
            }
        } else {
            self.body.pop();
        }

        let out_of_bounds =
            new_head.x < 0 || new_head.y < 0 || new_head.x >= GRID || new_head.y >= GRID;
        if out_of_bounds || self.body.contains(&new_head) {
            self.game_over = true;
            return;
        }

        self.body.insert(0, new_head);
    }
}

/// Food spawns in columns/rows 0..19; the last column and row stay empty
fn random_food(rng: &mut Pcg32) -> Cell {
    Cell::new(rng.random_range(0..19), rng.random_range(0..19))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_sits_still_without_direction() {
        let mut state = SnakeState::new(1);
        state.step();
        assert_eq!(state.body, vec![Cell::new(9, 10)]);
        assert!(!state.game_over);
    }

    #[test]
    fn test_movement_and_no_growth() {
        let mut state = SnakeState::new(1);
        state.food = Cell::new(0, 0); // out of the way
        state.turn(Direction::Right);
        state.step();
        assert_eq!(state.head(), Cell::new(10, 10));
        assert_eq!(state.body.len(), 1);
    }

    #[test]
    fn test_reversal_rejected() {
        let mut state = SnakeState::new(1);
        state.turn(Direction::Right);
        state.turn(Direction::Left);
        assert_eq!(state.dir, Some(Direction::Right));
        // Perpendicular turns are fine
        state.turn(Direction::Up);
        assert_eq!(state.dir, Some(Direction::Up));
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = SnakeState::new(1);
        state.food = Cell::new(10, 10);
        state.turn(Direction::Right);
        state.step();
        assert_eq!(state.score, 1);
        assert_eq!(state.body.len(), 2);
        assert_eq!(state.head(), Cell::new(10, 10));
    }

    #[test]
    fn test_speed_up_every_third_food() {
        let mut state = SnakeState::new(1);
        state.turn(Direction::Right);
        for i in 0..3 {
            state.food = Cell::new(state.head().x + 1, state.head().y);
            state.step();
            assert_eq!(state.score, i + 1);
        }
        assert_eq!(state.step_interval_ms, START_INTERVAL_MS - INTERVAL_STEP_MS);
    }

    #[test]
    fn test_speed_floor() {
        let mut state = SnakeState::new(1);
        state.step_interval_ms = MIN_INTERVAL_MS;
        state.score = 2; // next food is the third
        state.food = Cell::new(10, 10);
        state.turn(Direction::Right);
        state.step();
        assert_eq!(state.step_interval_ms, MIN_INTERVAL_MS);
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let mut state = SnakeState::new(1);
        state.body = vec![Cell::new(0, 10)];
        state.food = Cell::new(5, 5);
        state.turn(Direction::Left);
        state.step();
        assert!(state.game_over);
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut state = SnakeState::new(1);
        // A hook of body the head will run into
        state.body = vec![
            Cell::new(5, 5),
            Cell::new(5, 6),
            Cell::new(6, 6),
            Cell::new(6, 5),
            Cell::new(6, 4),
        ];
        state.food = Cell::new(0, 0);
        state.dir = Some(Direction::Right);
        state.step();
        assert!(state.game_over);
    }

    #[test]
    fn test_moving_into_vacated_tail_is_safe() {
        let mut state = SnakeState::new(1);
        // 2x2 loop: head at (5,5), tail at (5,6); moving down enters the
        // tail cell that empties this same step.
        state.body = vec![
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 6),
            Cell::new(5, 6),
        ];
        state.food = Cell::new(0, 0);
        state.dir = Some(Direction::Down);
        state.step();
        assert!(!state.game_over);
        assert_eq!(state.head(), Cell::new(5, 6));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = SnakeState::new(1);
        state.turn(Direction::Right);
        state.step();
        state.score = 9;
        state.game_over = true;
        state.reset();
        assert_eq!(state.body, vec![Cell::new(9, 10)]);
        assert_eq!(state.score, 0);
        assert_eq!(state.dir, None);
        assert!(!state.game_over);
        assert_eq!(state.step_interval_ms, START_INTERVAL_MS);
    }

    #[test]
    fn test_game_over_halts_steps() {
        let mut state = SnakeState::new(1);
        state.body = vec![Cell::new(0, 10)];
        state.turn(Direction::Left);
        state.step();
        assert!(state.game_over);
        let body = state.body.clone();
        state.step();
        assert_eq!(state.body, body);
    }
}
