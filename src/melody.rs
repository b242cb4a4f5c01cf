//! Background melody sequencer
//!
//! A Korobeiniki-ish loop for Tetris, stepped by an independent fixed-cadence
//! timer that is fully decoupled from the game tick. The sequencer only hands
//! out frequencies; spawning audio nodes is the frontend's job.

/// Note names used by the melody
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Note {
    A4,
    B4,
    C5,
    D5,
    E5,
    F5,
    G5,
}

impl Note {
    /// Fundamental frequency in Hz
    pub fn freq(self) -> f32 {
        match self {
            Note::A4 => 440.0,
            Note::B4 => 494.0,
            Note::C5 => 523.0,
            Note::D5 => 587.0,
            Note::E5 => 659.0,
            Note::F5 => 698.0,
            Note::G5 => 784.0,
        }
    }
}

/// Milliseconds between melody steps
pub const MELODY_STEP_MS: u32 = 180;

/// The 16-step loop (note, nominal eighth duration)
pub const MELODY: [(Note, u8); 16] = [
    (Note::E5, 8),
    (Note::B4, 8),
    (Note::C5, 8),
    (Note::D5, 8),
    (Note::C5, 8),
    (Note::B4, 8),
    (Note::A4, 8),
    (Note::A4, 8),
    (Note::C5, 8),
    (Note::E5, 8),
    (Note::D5, 8),
    (Note::C5, 8),
    (Note::B4, 8),
    (Note::C5, 8),
    (Note::D5, 8),
    (Note::E5, 8),
];

/// Cycling position in the melody loop
#[derive(Debug, Clone, Copy, Default)]
pub struct MelodySequencer {
    position: usize,
}

impl MelodySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frequency of the next note, advancing the loop
    pub fn next_freq(&mut self) -> f32 {
        let (note, _) = MELODY[self.position % MELODY.len()];
        self.position += 1;
        note.freq()
    }

    /// Rewind to the top of the loop
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequencer_cycles() {
        let mut seq = MelodySequencer::new();
        let first: Vec<f32> = (0..MELODY.len()).map(|_| seq.next_freq()).collect();
        let second: Vec<f32> = (0..MELODY.len()).map(|_| seq.next_freq()).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], Note::E5.freq());
        assert_eq!(first[6], Note::A4.freq());
    }

    #[test]
    fn test_rewind() {
        let mut seq = MelodySequencer::new();
        seq.next_freq();
        seq.next_freq();
        seq.rewind();
        assert_eq!(seq.next_freq(), Note::E5.freq());
    }
}
