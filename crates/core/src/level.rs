use crate::error::GenerationError;
use crate::profile::{MAX_SCORE, MIN_SCORE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A discrete difficulty tier selecting which curriculum slice a student gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Basic,
    Intermediate,
    Advanced,
    Expert,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Basic,
        Level::Intermediate,
        Level::Advanced,
        Level::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Basic => "basic",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
            Level::Expert => "expert",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == wanted)
            .ok_or_else(|| GenerationError::invalid("level", format!("unsupported value '{}'", s)))
    }
}

/// Maps scores and the predicted success rate onto a [`Level`].
pub struct LevelClassifier;

impl LevelClassifier {
    /// Evaluates the decision table in order, keyed on the current score and
    /// the gap to the target.
    ///
    /// Out-of-range input (including NaN) does not fail: it classifies as
    /// [`Level::Basic`]. The success rate only takes part in that range check.
    pub fn classify(current_score: f64, target_score: f64, success_rate: f64) -> Level {
        let scores = MIN_SCORE..=MAX_SCORE;
        if !scores.contains(&current_score)
            || !scores.contains(&target_score)
            || !(0.0..=1.0).contains(&success_rate)
        {
            return Level::Basic;
        }

        let score_gap = target_score - current_score;
        if current_score < 5.0 {
            Level::Basic
        } else if current_score < 7.0 {
            if score_gap > 2.0 {
                Level::Basic
            } else {
                Level::Intermediate
            }
        } else if current_score < 8.5 {
            if score_gap > 1.5 {
                Level::Intermediate
            } else {
                Level::Advanced
            }
        } else if score_gap > 1.0 {
            Level::Advanced
        } else {
            Level::Expert
        }
    }
}
