//! Elapsed play-time formatting.

use std::fmt;
use std::time::Duration;

/// Elapsed play time split into whole minutes and leftover seconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlayTime {
    pub minutes: u64,
    pub seconds: u64,
}

impl PlayTime {
    /// Truncate `elapsed` to whole seconds, then split by 60.
    pub fn from_elapsed(elapsed: Duration) -> Self {
        let total = elapsed.as_secs();
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }

    /// Total whole seconds.
    pub fn total_seconds(&self) -> u64 {
        self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for PlayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time played: {} minutes, {} seconds.",
            self.minutes, self.seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_minutes_and_seconds() {
        let t = PlayTime::from_elapsed(Duration::from_secs(125));
        assert_eq!(t, PlayTime { minutes: 2, seconds: 5 });
        assert_eq!(t.to_string(), "Time played: 2 minutes, 5 seconds.");
    }

    #[test]
    fn truncates_fractional_seconds() {
        let t = PlayTime::from_elapsed(Duration::from_millis(59_999));
        assert_eq!(t, PlayTime { minutes: 0, seconds: 59 });
        let t = PlayTime::from_elapsed(Duration::from_millis(60_000));
        assert_eq!(t, PlayTime { minutes: 1, seconds: 0 });
        assert_eq!(t.total_seconds(), 60);
    }

    #[test]
    fn zero_elapsed() {
        let t = PlayTime::from_elapsed(Duration::ZERO);
        assert_eq!(t.to_string(), "Time played: 0 minutes, 0 seconds.");
    }
}
