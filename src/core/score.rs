//! Score tracking: moves, elapsed time, stars.

use serde::{Deserialize, Serialize};

/// Elapsed game time in whole seconds.
///
/// Displays as `mm:ss`; seconds roll over into minutes at 60.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElapsedTime(pub u32);

impl ElapsedTime {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    #[must_use]
    pub const fn as_secs(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0 / 60
    }

    #[must_use]
    pub const fn seconds(self) -> u32 {
        self.0 % 60
    }

    /// One second later.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes(), self.seconds())
    }
}

/// Per-game counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreState {
    /// Resolved pairs so far.
    pub moves: u32,
    /// Time since the first selection.
    pub elapsed: ElapsedTime,
    /// Stars lost to move thresholds.
    pub stars_lost: u8,
}

impl ScoreState {
    /// Stars remaining out of `starting`.
    #[must_use]
    pub fn stars_remaining(&self, starting: u8) -> u8 {
        starting.saturating_sub(self.stars_lost)
    }
}

/// Final result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSummary {
    pub time: ElapsedTime,
    pub moves: u32,
    pub stars_remaining: u8,
}

impl std::fmt::Display for GameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plural = |n: u32, word: &str| {
            if n == 1 {
                format!("{} {}", n, word)
            } else {
                format!("{} {}s", n, word)
            }
        };
        write!(
            f,
            "Completed in {} with {} and {}",
            self.time,
            plural(self.moves, "move"),
            plural(u32::from(self.stars_remaining), "star"),
        )
    }
}
