//! Asteroids simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit elapsed-time input, clamped by the caller contract
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{
    Asteroid, AsteroidsEvent, AsteroidsState, Bullet, Particle, Ship, BULLET_LIFE_FRAMES,
    SHIP_INVULN_FRAMES, SHIP_RADIUS, SPLIT_RADIUS_THRESHOLD, START_LIVES,
};
pub use tick::{tick, AsteroidsInput, MAX_FRAME_MS};
