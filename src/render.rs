//! Canvas-2D drawing for the game demos
//!
//! Pure read-only views over the game states. The neon look comes from
//! shadow-blurred strokes; the asteroid outlines are re-jittered every frame
//! for flicker, so they draw from a throwaway rng rather than the sim's.

use std::f64::consts::TAU;

use rand::Rng;
use web_sys::CanvasRenderingContext2d;

use crate::asteroids::AsteroidsState;
use crate::snake::{CELL_PX, SnakeState};
use crate::tetris::{COLS, ROWS, Piece, TetrisState};

/// Tetris cell edge in canvas pixels
pub const BLOCK_SIZE: f64 = 30.0;

fn with_glow(ctx: &CanvasRenderingContext2d, color: &str, blur: f64, draw: impl FnOnce()) {
    ctx.save();
    ctx.set_shadow_color(color);
    ctx.set_shadow_blur(blur);
    draw();
    ctx.restore();
}

// === Asteroids ===

pub fn draw_asteroids(ctx: &CanvasRenderingContext2d, state: &AsteroidsState) {
    let w = state.width as f64;
    let h = state.height as f64;
    ctx.clear_rect(0.0, 0.0, w, h);

    // fixed star pattern
    ctx.set_fill_style_str("rgba(255,255,255,0.02)");
    for i in 0..60 {
        let x = ((i * 97) as f64) % w;
        let y = ((i * 53) as f64) % h;
        ctx.fill_rect(x, y, 1.0, 1.0);
    }

    let mut flicker = rand::rng();
    for asteroid in &state.asteroids {
        ctx.save();
        let _ = ctx.translate(asteroid.pos.x as f64, asteroid.pos.y as f64);
        let r = asteroid.radius as f64;
        with_glow(ctx, "rgba(139,92,255,0.9)", 12.0, || {
            ctx.begin_path();
            for i in 0..asteroid.verts {
                let ang = TAU / asteroid.verts as f64 * i as f64;
                let rad = r * (0.75 + flicker.random::<f64>() * 0.5);
                let px = ang.cos() * rad;
                let py = ang.sin() * rad;
                if i == 0 {
                    ctx.move_to(px, py);
                } else {
                    ctx.line_to(px, py);
                }
            }
            ctx.close_path();
            ctx.set_line_width((r / 20.0).max(2.0));
            ctx.set_stroke_style_str("rgba(139,92,255,0.95)");
            ctx.stroke();
        });
        ctx.restore();
    }

    draw_ship(ctx, state);

    for bullet in &state.bullets {
        with_glow(ctx, "rgba(110,240,255,0.95)", 8.0, || {
            ctx.begin_path();
            let _ = ctx.arc(bullet.pos.x as f64, bullet.pos.y as f64, 2.0, 0.0, TAU);
            ctx.set_fill_style_str("rgba(110,240,255,0.95)");
            ctx.fill();
        });
    }

    for particle in &state.particles {
        let alpha = (particle.life_frames as f64 / 80.0).clamp(0.0, 1.0);
        ctx.set_global_alpha(alpha);
        ctx.set_fill_style_str("rgba(255,120,180,0.95)");
        ctx.fill_rect(particle.pos.x as f64, particle.pos.y as f64, 2.0, 2.0);
        ctx.set_global_alpha(1.0);
    }

    // vignette
    ctx.save();
    ctx.begin_path();
    ctx.rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str("rgba(0,0,0,0.06)");
    ctx.fill();
    ctx.restore();
}

fn draw_ship(ctx: &CanvasRenderingContext2d, state: &AsteroidsState) {
    let ship = &state.ship;
    let r = ship.radius as f64;
    ctx.save();
    let _ = ctx.translate(ship.pos.x as f64, ship.pos.y as f64);
    let _ = ctx.rotate(ship.angle as f64);

    // blink while invulnerable
    if ship.invuln_frames % 18 < 9 {
        with_glow(ctx, "rgba(110,240,255,0.95)", 16.0, || {
            ctx.begin_path();
            ctx.move_to(r, 0.0);
            ctx.line_to(-r * 0.6, r * 0.8);
            ctx.line_to(-r * 0.6, -r * 0.8);
            ctx.close_path();
            ctx.set_line_width(2.0);
            ctx.set_stroke_style_str("rgba(110,240,255,0.95)");
            ctx.stroke();
        });
    }

    if ship.thrust > 0.001 {
        ctx.begin_path();
        ctx.move_to(-r * 0.6, -r * 0.3);
        ctx.line_to(-r * 1.4, 0.0);
        ctx.line_to(-r * 0.6, r * 0.3);
        ctx.close_path();
        ctx.set_fill_style_str("rgba(255,110,199,0.08)");
        ctx.fill();
        with_glow(ctx, "rgba(255,110,199,0.9)", 18.0, || {
            ctx.begin_path();
            ctx.move_to(-r * 0.6, -r * 0.28);
            ctx.line_to(-r * 1.2, 0.0);
            ctx.line_to(-r * 0.6, r * 0.28);
            ctx.close_path();
            ctx.set_line_width(2.0);
            ctx.set_stroke_style_str("rgba(255,110,199,0.9)");
            ctx.stroke();
        });
    }
    ctx.restore();
}

// === Tetris ===

pub fn draw_tetris(ctx: &CanvasRenderingContext2d, state: &TetrisState) {
    let w = COLS as f64 * BLOCK_SIZE;
    let h = ROWS as f64 * BLOCK_SIZE;
    ctx.clear_rect(0.0, 0.0, w, h);

    ctx.set_stroke_style_str("rgba(255,255,255,0.02)");
    for x in 0..=COLS {
        ctx.begin_path();
        ctx.move_to(x as f64 * BLOCK_SIZE, 0.0);
        ctx.line_to(x as f64 * BLOCK_SIZE, h);
        ctx.stroke();
    }
    for y in 0..=ROWS {
        ctx.begin_path();
        ctx.move_to(0.0, y as f64 * BLOCK_SIZE);
        ctx.line_to(w, y as f64 * BLOCK_SIZE);
        ctx.stroke();
    }

    for (y, row) in state.grid.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if let Some(kind) = cell {
                draw_block(ctx, x as f64, y as f64, kind.color(), false);
            }
        }
    }

    if !state.game_over {
        draw_piece_blocks(ctx, &state.current);
    }

    if state.game_over {
        ctx.set_fill_style_str("rgba(3,6,14,0.8)");
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str("white");
        ctx.set_font("28px system-ui");
        ctx.set_text_align("center");
        let _ = ctx.fill_text("GAME OVER", w / 2.0, h / 2.0 - 10.0);
        ctx.set_font("14px system-ui");
        let _ = ctx.fill_text("Presiona R para reiniciar", w / 2.0, h / 2.0 + 18.0);
    }
}

fn draw_piece_blocks(ctx: &CanvasRenderingContext2d, piece: &Piece) {
    let color = piece.kind.color();
    for (y, row) in piece.shape.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            if cell != 0 {
                let gx = piece.x + x as i32;
                let gy = piece.y + y as i32;
                if gy >= 0 {
                    draw_block(ctx, gx as f64, gy as f64, color, true);
                }
            }
        }
    }
}

fn draw_block(ctx: &CanvasRenderingContext2d, gx: f64, gy: f64, color: &str, neon: bool) {
    let x = gx * BLOCK_SIZE;
    let y = gy * BLOCK_SIZE;
    ctx.set_fill_style_str(color);
    ctx.fill_rect(x + 1.0, y + 1.0, BLOCK_SIZE - 2.0, BLOCK_SIZE - 2.0);
    // top highlight
    ctx.set_fill_style_str("rgba(255,255,255,0.12)");
    ctx.fill_rect(x + 4.0, y + 4.0, BLOCK_SIZE - 8.0, (BLOCK_SIZE - 8.0) / 2.0);
    ctx.set_stroke_style_str("rgba(255,255,255,0.06)");
    ctx.stroke_rect(x + 0.5, y + 0.5, BLOCK_SIZE - 1.0, BLOCK_SIZE - 1.0);
    if neon {
        ctx.set_shadow_color(color);
        ctx.set_shadow_blur(12.0);
        ctx.set_fill_style_str(color);
        ctx.fill_rect(x + 1.0, y + 1.0, BLOCK_SIZE - 2.0, BLOCK_SIZE - 2.0);
        ctx.set_shadow_blur(0.0);
    }
}

/// Preview pane for the queued piece, centred in a 4x4 block area
pub fn draw_tetris_next(ctx: &CanvasRenderingContext2d, state: &TetrisState, width: f64, height: f64) {
    ctx.clear_rect(0.0, 0.0, width, height);
    let m = &state.next.shape;
    let size = BLOCK_SIZE;
    let offset_x = ((4 - m[0].len() as i32) / 2) as f64 * size;
    let offset_y = ((4 - m.len() as i32) / 2) as f64 * size;
    let color = state.next.kind.color();
    for (y, row) in m.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            if cell != 0 {
                let px = offset_x + x as f64 * size;
                let py = offset_y + y as f64 * size;
                ctx.set_fill_style_str(color);
                ctx.fill_rect(px + 2.0, py + 2.0, size - 4.0, size - 4.0);
                ctx.set_fill_style_str("rgba(255,255,255,0.12)");
                ctx.fill_rect(px + 6.0, py + 6.0, size - 8.0, (size - 8.0) / 2.0);
            }
        }
    }
}

// === Snake ===

pub fn draw_snake(ctx: &CanvasRenderingContext2d, state: &SnakeState, width: f64, height: f64) {
    ctx.set_fill_style_str("#2b2b2b60");
    ctx.fill_rect(0.0, 0.0, width, height);

    for (i, cell) in state.body.iter().enumerate() {
        let x = cell.x as f64 * CELL_PX;
        let y = cell.y as f64 * CELL_PX;
        ctx.set_fill_style_str(if i == 0 { "#00ff99" } else { "#00cc7a" });
        ctx.fill_rect(x, y, CELL_PX, CELL_PX);
        ctx.set_stroke_style_str("#1e1e1e");
        ctx.stroke_rect(x, y, CELL_PX, CELL_PX);
    }

    ctx.set_fill_style_str("#f00");
    ctx.fill_rect(
        state.food.x as f64 * CELL_PX,
        state.food.y as f64 * CELL_PX,
        CELL_PX,
        CELL_PX,
    );

    if state.game_over {
        ctx.set_fill_style_str("rgba(0,0,0,0.7)");
        ctx.fill_rect(0.0, 0.0, width, height);
        ctx.set_fill_style_str("#fff");
        ctx.set_font("30px Arial");
        ctx.set_text_align("center");
        let _ = ctx.fill_text("GAME OVER", width / 2.0, height / 2.0);
        ctx.set_font("20px Arial");
        let _ = ctx.fill_text(
            &format!("Puntaje: {}", state.score),
            width / 2.0,
            height / 2.0 + 30.0,
        );
        let _ = ctx.fill_text("Pulsa R para reiniciar", width / 2.0, height / 2.0 + 60.0);
    }
}
