//! Audible feedback for game events.
//!
//! The shell reports each event as a [`Cue`]. A [`Feedback`] sink decides
//! what to do with it. [`TerminalBell`] turns cues into terminal bell
//! pulses: one per "on" segment of the cue's vibration pattern when haptics
//! are enabled, and one per tone when sound is enabled. A cue with a
//! vibration pattern cancels whatever is left of the previous one, and
//! pulses due at the same instant ring once.

use std::collections::VecDeque;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

const BEL: &[u8] = b"\x07";

/// A game event worth signalling to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// A mark was placed.
    Move,
    /// The game was won.
    Win,
    /// The game ended in a tie.
    Tie,
    /// The board was reset.
    Reset,
}

/// A beep: frequency and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    /// Pitch in hertz.
    pub frequency_hz: u32,
    /// Length in milliseconds.
    pub duration_ms: u64,
}

impl Cue {
    /// Alternating on/off durations in milliseconds, starting with "on".
    pub fn vibration_pattern(self) -> &'static [u64] {
        match self {
            Cue::Move => &[50],
            Cue::Win => &[100, 50, 100, 50, 200],
            Cue::Tie => &[],
            Cue::Reset => &[100],
        }
    }

    /// The beep played for this cue, if any.
    pub fn tone(self) -> Option<Tone> {
        let (frequency_hz, duration_ms) = match self {
            Cue::Move => (800, 100),
            Cue::Win => (1000, 300),
            Cue::Tie => (400, 200),
            Cue::Reset => return None,
        };
        Some(Tone {
            frequency_hz,
            duration_ms,
        })
    }

    /// Offsets from the cue at which each "on" segment starts.
    fn pulse_offsets(self) -> Vec<Duration> {
        let mut offsets = Vec::new();
        let mut elapsed = 0;
        for (i, ms) in self.vibration_pattern().iter().enumerate() {
            if i % 2 == 0 {
                offsets.push(Duration::from_millis(elapsed));
            }
            elapsed += ms;
        }
        offsets
    }
}

/// Receives cues from the shell.
pub trait Feedback {
    /// Signals `cue`, which happened at `now`.
    fn cue(&mut self, cue: Cue, now: Instant);

    /// Emits anything that has come due by `now`.
    fn tick(&mut self, _now: Instant) {}
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Feedback for Silent {
    fn cue(&mut self, _cue: Cue, _now: Instant) {}
}

/// Rings the terminal bell on a schedule derived from each cue.
#[derive(Debug)]
pub struct TerminalBell<W> {
    out: W,
    sound: bool,
    haptics: bool,
    pending: VecDeque<Instant>,
    last_rung: Option<Instant>,
}

impl<W: Write> TerminalBell<W> {
    /// Creates a bell writing to `out`.
    pub fn new(out: W, sound: bool, haptics: bool) -> Self {
        Self {
            out,
            sound,
            haptics,
            pending: VecDeque::new(),
            last_rung: None,
        }
    }

    /// Number of pulses scheduled but not yet rung.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn ring(&mut self, due: Instant) {
        if self.last_rung == Some(due) {
            return;
        }
        self.last_rung = Some(due);
        if let Err(e) = self.out.write_all(BEL).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Failed to ring terminal bell");
        }
    }
}

impl<W: Write> Feedback for TerminalBell<W> {
    #[instrument(skip(self, now))]
    fn cue(&mut self, cue: Cue, now: Instant) {
        let mut times: Vec<Instant> = if self.haptics && !cue.vibration_pattern().is_empty() {
            if !self.pending.is_empty() {
                debug!(cancelled = self.pending.len(), "New pattern replaces pending pulses");
            }
            self.pending.clear();
            cue.pulse_offsets().into_iter().map(|offset| now + offset).collect()
        } else {
            self.pending.drain(..).collect()
        };
        if self.sound && cue.tone().is_some() {
            times.push(now);
        }
        times.sort();
        times.dedup();
        debug!(scheduled = times.len(), "Bell pulses scheduled");
        self.pending = times.into();
        self.tick(now);
    }

    fn tick(&mut self, now: Instant) {
        while let Some(due) = self.pending.front().copied().filter(|due| *due <= now) {
            self.pending.pop_front();
            self.ring(due);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bells(out: &[u8]) -> usize {
        out.iter().filter(|b| **b == 0x07).count()
    }

    #[test]
    fn test_win_pattern_pulses_over_time() {
        let start = Instant::now();
        let mut bell = TerminalBell::new(Vec::new(), false, true);

        bell.cue(Cue::Win, start);
        assert_eq!(bell.pending(), 2);

        bell.tick(start + Duration::from_millis(150));
        assert_eq!(bell.pending(), 1);

        bell.tick(start + Duration::from_millis(300));
        assert_eq!(bell.pending(), 0);
        assert_eq!(bells(&bell.into_inner()), 3);
    }

    #[test]
    fn test_sound_and_haptics_share_the_first_pulse() {
        let start = Instant::now();
        let mut bell = TerminalBell::new(Vec::new(), true, true);
        bell.cue(Cue::Move, start);
        assert_eq!(bells(&bell.into_inner()), 1);
    }

    #[test]
    fn test_move_and_win_at_the_same_instant_ring_once() {
        let start = Instant::now();
        let mut bell = TerminalBell::new(Vec::new(), false, true);
        bell.cue(Cue::Move, start);
        bell.cue(Cue::Win, start);
        assert_eq!(bell.pending(), 2);
        bell.tick(start + Duration::from_secs(1));
        assert_eq!(bells(&bell.into_inner()), 3);

        let mut loud = TerminalBell::new(Vec::new(), true, true);
        loud.cue(Cue::Move, start);
        loud.cue(Cue::Win, start);
        assert_eq!(bells(&loud.into_inner()), 1);
    }

    #[test]
    fn test_reset_cancels_rest_of_win_pattern() {
        let start = Instant::now();
        let mut bell = TerminalBell::new(Vec::new(), false, true);
        bell.cue(Cue::Win, start);
        assert_eq!(bell.pending(), 2);

        bell.cue(Cue::Reset, start + Duration::from_millis(10));
        assert_eq!(bell.pending(), 0);

        bell.tick(start + Duration::from_secs(1));
        assert_eq!(bells(&bell.into_inner()), 2);
    }

    #[test]
    fn test_tie_keeps_pending_pulses() {
        let start = Instant::now();
        let mut bell = TerminalBell::new(Vec::new(), false, true);
        bell.cue(Cue::Win, start);
        bell.cue(Cue::Tie, start);
        assert_eq!(bell.pending(), 2);
    }

    #[test]
    fn test_tie_rings_only_with_sound() {
        let start = Instant::now();
        let mut quiet = TerminalBell::new(Vec::new(), false, true);
        quiet.cue(Cue::Tie, start);
        assert_eq!(bells(&quiet.into_inner()), 0);

        let mut loud = TerminalBell::new(Vec::new(), true, false);
        loud.cue(Cue::Tie, start);
        assert_eq!(bells(&loud.into_inner()), 1);
    }

    #[test]
    fn test_disabled_bell_stays_silent() {
        let start = Instant::now();
        let mut bell = TerminalBell::new(Vec::new(), false, false);
        for cue in [Cue::Move, Cue::Win, Cue::Tie, Cue::Reset] {
            bell.cue(cue, start);
        }
        bell.tick(start + Duration::from_secs(1));
        assert!(bell.into_inner().is_empty());
    }

    #[test]
    fn test_reset_has_no_tone() {
        assert_eq!(Cue::Reset.tone(), None);
        assert_eq!(Cue::Win.tone().map(|t| t.frequency_hz), Some(1000));
    }
}
