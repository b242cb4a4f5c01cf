//! Audio glue using the Web Audio API
//!
//! Every effect is a transient oscillator+gain pair; nothing is sampled or
//! loaded. Audio may be blocked until a user gesture, so every call degrades
//! silently on failure.

use web_sys::{AudioContext, BiquadFilterType, GainNode, OscillatorNode, OscillatorType};

use crate::melody::MelodySequencer;

/// Effect tones shared across the demos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Asteroids: bullet fired
    Shoot,
    /// Asteroids: asteroid or ship destroyed
    Explosion,
    /// Tetris: horizontal move committed
    Move,
    /// Tetris: rotation committed
    Rotate,
    /// Tetris: one or more rows cleared
    LineClear,
    /// Tetris: hard drop locked
    Drop,
    /// Tetris: spawn blocked, run over
    GameOver,
}

/// Owns the AudioContext plus the persistent engine/ambient nodes
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Thrust engine tone, running continuously at zero gain
    engine: Option<(OscillatorNode, GainNode)>,
    sound_enabled: bool,
    music_enabled: bool,
    melody: MelodySequencer,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            engine: None,
            sound_enabled: true,
            music_enabled: true,
            melody: MelodySequencer::new(),
        }
    }

    /// Resume the context (required after a user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.music_enabled = enabled;
        if enabled {
            self.melody.rewind();
        }
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    /// Play a transient effect tone
    pub fn play(&self, effect: SoundEffect) {
        if !self.sound_enabled {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Shoot => self.play_shoot(ctx),
            SoundEffect::Explosion => self.play_explosion(ctx),
            SoundEffect::Move => self.play_move(ctx),
            SoundEffect::Rotate => self.play_rotate(ctx),
            SoundEffect::LineClear => self.play_line_clear(ctx),
            SoundEffect::Drop => self.play_drop(ctx),
            SoundEffect::GameOver => self.play_game_over(ctx),
        }
    }

    /// Step the background melody: one short square note per call, on the
    /// frontend's fixed melody interval.
    pub fn play_melody_note(&mut self) {
        if !self.music_enabled || !self.sound_enabled {
            return;
        }
        let freq = self.melody.next_freq();
        let Some(ctx) = &self.ctx else { return };
        let Some((osc, gain)) = create_osc(ctx, freq, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value(0.02);
        gain.gain().linear_ramp_to_value_at_time(0.02, t + 0.08).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + 0.28)
            .ok();
        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Track the ship's thrust with the persistent engine tone
    pub fn set_thrust(&mut self, thrust: f32) {
        if self.engine.is_none() {
            self.engine = self.start_engine();
        }
        let Some((osc, gain)) = &self.engine else { return };
        let level = if self.sound_enabled {
            0.0012 * (thrust * 6.0).min(1.0)
        } else {
            0.0
        };
        gain.gain().set_value(level.max(0.0));
        osc.frequency().set_value(70.0 + thrust * 260.0);
    }

    /// Start the low ambient pad behind the Asteroids field
    pub fn start_ambient(&self) {
        let Some(ctx) = &self.ctx else { return };
        let Some(osc) = ctx.create_oscillator().ok() else {
            return;
        };
        let Some(gain) = ctx.create_gain().ok() else { return };
        let Some(filter) = ctx.create_biquad_filter().ok() else {
            return;
        };
        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(80.0);
        filter.set_type(BiquadFilterType::Lowpass);
        filter.frequency().set_value(800.0);
        gain.gain().set_value(0.0009);
        if osc.connect_with_audio_node(&filter).is_err() {
            return;
        }
        if filter.connect_with_audio_node(&gain).is_err() {
            return;
        }
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }
        let t = ctx.current_time();
        gain.gain().linear_ramp_to_value_at_time(0.0028, t + 2.0).ok();
        osc.start().ok();
    }

    fn start_engine(&self) -> Option<(OscillatorNode, GainNode)> {
        let ctx = self.ctx.as_ref()?;
        let (osc, gain) = create_osc(ctx, 90.0, OscillatorType::Sawtooth)?;
        gain.gain().set_value(0.0);
        osc.start().ok()?;
        Some((osc, gain))
    }

    // === Effect generators ===

    /// Short high beep
    fn play_shoot(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = create_osc(ctx, 900.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value(0.0009);
        osc.start().ok();
        osc.stop_with_when(t + 0.07).ok();
    }

    /// Two detuned low oscillators into one gain
    fn play_explosion(&self, ctx: &AudioContext) {
        let Some((osc1, gain)) = create_osc(ctx, 200.0, OscillatorType::Sawtooth) else {
            return;
        };
        let Some(osc2) = ctx.create_oscillator().ok() else {
            return;
        };
        osc2.set_type(OscillatorType::Square);
        osc2.frequency().set_value(140.0);
        if osc2.connect_with_audio_node(&gain).is_err() {
            return;
        }
        let t = ctx.current_time();
        gain.gain().set_value(0.002);
        osc1.start().ok();
        osc2.start().ok();
        osc1.stop_with_when(t + 0.12).ok();
        osc2.stop_with_when(t + 0.12).ok();
    }

    fn play_move(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = create_osc(ctx, 600.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value(0.02);
        osc.start().ok();
        osc.stop_with_when(t + 0.05).ok();
    }

    fn play_rotate(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = create_osc(ctx, 900.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value(0.03);
        osc.start().ok();
        osc.stop_with_when(t + 0.07).ok();
    }

    /// Rising sweep
    fn play_line_clear(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = create_osc(ctx, 400.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value(0.06);
        osc.frequency()
            .linear_ramp_to_value_at_time(900.0, t + 0.12)
            .ok();
        osc.start().ok();
        osc.stop_with_when(t + 0.14).ok();
    }

    fn play_drop(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = create_osc(ctx, 200.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value(0.04);
        osc.start().ok();
        osc.stop_with_when(t + 0.06).ok();
    }

    /// Long falling tone
    fn play_game_over(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = create_osc(ctx, 120.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value(0.1);
        osc.frequency()
            .exponential_ramp_to_value_at_time(40.0, t + 0.9)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + 1.2)
            .ok();
        osc.start().ok();
        osc.stop_with_when(t + 1.2).ok();
    }
}

/// Oscillator routed through a fresh gain node into the destination
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}
