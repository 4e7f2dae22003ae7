use serde::{Deserialize, Serialize};
use std::fmt;

pub const SCORE_MIN: u8 = 0;
pub const SCORE_MAX: u8 = 100;

/// An integer in [0, 100]. Every constructor clamps, so an out-of-range
/// value cannot be built outside of deserialization, which rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: Score = Score(SCORE_MIN);
    pub const MAX: Score = Score(SCORE_MAX);

    pub fn clamped(value: i64) -> Self {
        Score(value.clamp(SCORE_MIN as i64, SCORE_MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn shift(self, delta: i64) -> Self {
        Self::clamped(self.0 as i64 + delta)
    }

    pub fn is_above(self, threshold: u8) -> bool {
        self.0 > threshold
    }

    pub fn is_below(self, threshold: u8) -> bool {
        self.0 < threshold
    }
}

impl Default for Score {
    fn default() -> Self {
        Score(50)
    }
}

impl TryFrom<i64> for Score {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < SCORE_MIN as i64 || value > SCORE_MAX as i64 {
            return Err(format!(
                "value {} is out of range (must be between {} and {})",
                value, SCORE_MIN, SCORE_MAX
            ));
        }
        Ok(Score(value as u8))
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
