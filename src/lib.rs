//! Neon Arcade - a collection of neon-styled browser arcade demos
//!
//! Core modules:
//! - `asteroids`, `tetris`, `snake`: deterministic game simulations, stepped
//!   by explicit tick functions so tests never need real time
//! - `calculator`, `login`: the non-game widgets
//! - `melody`: the background music sequencer (pure)
//! - `audio`, `render`: WebAudio and canvas-2D glue (wasm32 only)
//! - `settings`: persisted audio preferences

pub mod asteroids;
pub mod calculator;
pub mod login;
pub mod melody;
pub mod settings;
pub mod snake;
pub mod tetris;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use calculator::Calculator;
pub use settings::Settings;
