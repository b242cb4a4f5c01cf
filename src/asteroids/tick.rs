//! Per-frame Asteroids update
//!
//! Advances the whole scene given the held input intents and the elapsed
//! milliseconds since the previous frame.

use glam::Vec2;
use rand::Rng;

use super::state::{
    wrap_position, Asteroid, AsteroidsEvent, AsteroidsState, Bullet, Particle, Ship,
    PARTICLE_LIFE_FRAMES, SPLIT_RADIUS_THRESHOLD,
};

/// Elapsed time is clamped to this to avoid huge jumps after a stall
pub const MAX_FRAME_MS: f32 = 40.0;

/// Turn rate in radians per millisecond
const TURN_RATE: f32 = 0.004;
/// Thrust ramp per millisecond while held
const THRUST_RAMP: f32 = 0.0015;
/// Thrust decay per millisecond while released
const THRUST_DECAY: f32 = 0.002;
/// Thrust scalar cap
const THRUST_MAX: f32 = 0.12;
/// Acceleration factor applied along the heading
const THRUST_ACCEL: f32 = 0.02;
/// Per-frame velocity damping (drag)
const VEL_DAMPING: f32 = 0.998;
/// Minimum milliseconds between shots
const SHOT_COOLDOWN_MS: f32 = 200.0;
/// Bullet muzzle speed, added to the ship velocity
const BULLET_SPEED: f32 = 6.0;
/// Particles emitted per destruction
const EXPLOSION_PARTICLES: usize = 10;

/// Held input intents for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct AsteroidsInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub shoot: bool,
    /// One-shot: toggle pause
    pub pause: bool,
    /// One-shot: restart the run
    pub restart: bool,
}

/// Advance the game by one frame of `dt_ms` elapsed milliseconds
pub fn tick(state: &mut AsteroidsState, input: &AsteroidsInput, dt_ms: f32) {
    if input.restart {
        state.reset();
        return;
    }
    if input.pause {
        state.paused = !state.paused;
    }
    if state.paused {
        return;
    }

    let dt = dt_ms.min(MAX_FRAME_MS);

    steer_ship(state, input, dt);
    fire(state, input, dt);
    integrate(state);
    resolve_bullet_hits(state);
    resolve_ship_hits(state);

    // Level up once the field is clear
    if state.asteroids.is_empty() {
        state.level += 1;
        state.populate_level();
    }
}

fn steer_ship(state: &mut AsteroidsState, input: &AsteroidsInput, dt: f32) {
    let ship = &mut state.ship;
    if input.turn_left {
        ship.angle -= TURN_RATE * dt;
    }
    if input.turn_right {
        ship.angle += TURN_RATE * dt;
    }

    if input.thrust {
        ship.thrust = (ship.thrust + THRUST_RAMP * dt).min(THRUST_MAX);
    } else {
        ship.thrust = (ship.thrust - THRUST_DECAY * dt).max(0.0);
    }
    let heading = ship.heading();
    ship.vel += heading * ship.thrust * THRUST_ACCEL * dt;
}

fn fire(state: &mut AsteroidsState, input: &AsteroidsInput, dt: f32) {
    let ship = &mut state.ship;
    ship.shot_cooldown_ms = (ship.shot_cooldown_ms - dt).max(0.0);
    if input.shoot && ship.shot_cooldown_ms <= 0.0 {
        ship.shot_cooldown_ms = SHOT_COOLDOWN_MS;
        state.bullets.push(Bullet {
            pos: ship.nose(),
            vel: ship.heading() * BULLET_SPEED + ship.vel,
            life_frames: super::BULLET_LIFE_FRAMES,
        });
        state.events.push(AsteroidsEvent::Shoot);
    }
}

/// Move everything by its velocity, wrap the wrappable, expire the mortal
fn integrate(state: &mut AsteroidsState) {
    let (w, h) = (state.width, state.height);

    let ship = &mut state.ship;
    ship.pos += ship.vel;
    ship.vel *= VEL_DAMPING;
    wrap_position(&mut ship.pos, ship.radius, w, h);
    ship.invuln_frames = ship.invuln_frames.saturating_sub(1);

    for b in &mut state.bullets {
        b.pos += b.vel;
        b.life_frames -= 1;
        // Bullets wrap as points
        wrap_position(&mut b.pos, 0.0, w, h);
    }
    state.bullets.retain(|b| b.life_frames > 0);

    for a in &mut state.asteroids {
        a.pos += a.vel;
        wrap_position(&mut a.pos, a.radius, w, h);
    }

    // Particles drift off-screen rather than wrapping
    for p in &mut state.particles {
        p.pos += p.vel;
        p.life_frames -= 1;
    }
    state.particles.retain(|p| p.life_frames > 0);
}

/// Bullet vs asteroid: first match wins per bullet, both are destroyed
fn resolve_bullet_hits(state: &mut AsteroidsState) {
    let mut i = 0;
    while i < state.bullets.len() {
        let bullet_pos = state.bullets[i].pos;
        let hit = state
            .asteroids
            .iter()
            .position(|a| bullet_pos.distance(a.pos) < a.radius);
        if let Some(j) = hit {
            state.bullets.swap_remove(i);
            let destroyed = state.asteroids.swap_remove(j);
            destroy_asteroid(state, &destroyed);
        } else {
            i += 1;
        }
    }
}

/// Award score, split large rocks, emit debris
fn destroy_asteroid(state: &mut AsteroidsState, a: &Asteroid) {
    state.score += (100.0 * (60.0 / a.radius)).floor() as u64;
    state.events.push(AsteroidsEvent::Explosion);

    if a.radius > SPLIT_RADIUS_THRESHOLD {
        for _ in 0..2 {
            let jitter = Vec2::new(
                state.rng.random_range(-6.0..6.0),
                state.rng.random_range(-6.0..6.0),
            );
            state.asteroids.push(Asteroid {
                pos: a.pos + jitter,
                vel: Vec2::new(
                    state.rng.random_range(-1.2..1.2),
                    state.rng.random_range(-1.2..1.2),
                ),
                radius: a.radius / 2.0,
                angle: state.rng.random_range(0.0..std::f32::consts::TAU),
                verts: state.rng.random_range(6..10),
            });
        }
    }

    for _ in 0..EXPLOSION_PARTICLES {
        state.particles.push(Particle {
            pos: a.pos,
            vel: Vec2::new(
                state.rng.random_range(-2.0..2.0),
                state.rng.random_range(-2.0..2.0),
            ),
            life_frames: PARTICLE_LIFE_FRAMES,
        });
    }
}

/// Ship vs asteroid, skipped entirely while invulnerable
fn resolve_ship_hits(state: &mut AsteroidsState) {
    if state.ship.invuln_frames > 0 {
        return;
    }
    let ship_pos = state.ship.pos;
    let ship_r = state.ship.radius;
    let hit = state
        .asteroids
        .iter()
        .position(|a| ship_pos.distance(a.pos) < a.radius + ship_r * 0.6);
    if let Some(j) = hit {
        state.asteroids.swap_remove(j);
        state.events.push(AsteroidsEvent::ShipHit);
        state.lives = state.lives.saturating_sub(1);
        state.ship = Ship::spawn(state.width, state.height);
        if state.lives == 0 {
            // Out of lives: the whole run resets as if newly started
            state.reset();
        }
    }
}
