use std::io::{self, Write};

use crate::game::Feedback;

// Waveforms alternate off/on durations in milliseconds, starting with "off"
pub const CORRECT_BUZZ_PATTERN: &[u64] = &[100, 100, 100, 100, 100, 100];
pub const PANIC_BUZZ_PATTERN: &[u64] = &[0, 200];
pub const GAME_OVER_BUZZ_PATTERN: &[u64] = &[0, 2000];
pub const NO_BUZZ_PATTERN: &[u64] = &[0];

/// Waveform for a feedback cue
pub fn buzz_pattern(feedback: Feedback) -> &'static [u64] {
    match feedback {
        Feedback::Correct => CORRECT_BUZZ_PATTERN,
        Feedback::Panic => PANIC_BUZZ_PATTERN,
        Feedback::GameOver => GAME_OVER_BUZZ_PATTERN,
        Feedback::None => NO_BUZZ_PATTERN,
    }
}

/// Number of "on" segments in a waveform
pub fn pulse_count(pattern: &[u64]) -> usize {
    pattern
        .iter()
        .skip(1)
        .step_by(2)
        .filter(|duration| **duration > 0)
        .count()
}

pub trait Haptics {
    fn buzz(&mut self, pattern: &[u64]);
}

/// Stand-in for a vibrator: rings the terminal bell once per pulse
#[derive(Debug, Clone, Copy)]
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Haptics for TerminalBell {
    fn buzz(&mut self, pattern: &[u64]) {
        tracing::debug!("Buzz {:?} (enabled: {})", pattern, self.enabled);
        if !self.enabled {
            return;
        }

        let mut stderr = io::stderr();
        for _ in 0..pulse_count(pattern) {
            let _ = stderr.write_all(b"\x07");
        }
        let _ = stderr.flush();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Haptics double remembering every pattern it was asked to play
    #[derive(Debug, Default)]
    pub(crate) struct RecordingHaptics {
        pub patterns: Vec<Vec<u64>>,
    }

    impl Haptics for RecordingHaptics {
        fn buzz(&mut self, pattern: &[u64]) {
            self.patterns.push(pattern.to_vec());
        }
    }

    #[test]
    fn test_pattern_mapping() {
        assert_eq!(buzz_pattern(Feedback::Correct), CORRECT_BUZZ_PATTERN);
        assert_eq!(buzz_pattern(Feedback::Panic), PANIC_BUZZ_PATTERN);
        assert_eq!(buzz_pattern(Feedback::GameOver), GAME_OVER_BUZZ_PATTERN);
        assert_eq!(buzz_pattern(Feedback::None), NO_BUZZ_PATTERN);
    }

    #[test]
    fn test_pulse_counts() {
        // Correct is a short triple pulse, the others a single pulse
        assert_eq!(pulse_count(CORRECT_BUZZ_PATTERN), 3);
        assert_eq!(pulse_count(PANIC_BUZZ_PATTERN), 1);
        assert_eq!(pulse_count(GAME_OVER_BUZZ_PATTERN), 1);
        assert_eq!(pulse_count(NO_BUZZ_PATTERN), 0);
    }

    #[test]
    fn test_game_over_is_longest_pulse() {
        let longest = |p: &[u64]| p.iter().skip(1).step_by(2).copied().max().unwrap_or(0);
        assert!(longest(GAME_OVER_BUZZ_PATTERN) > longest(PANIC_BUZZ_PATTERN));
        assert!(longest(PANIC_BUZZ_PATTERN) > longest(CORRECT_BUZZ_PATTERN));
    }
}
