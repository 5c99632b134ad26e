//! Learning Path Result Types
//!
//! The shapes produced by a generation run: one `LearningPathResult` holding a
//! `WeekPlan` per week, each holding exactly seven `DailyPlan`s.

use crate::level::Level;
use crate::profile::{Grade, LearningStyle, Subject};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Theory content emitted once the curriculum has been fully consumed.
pub const REVIEW_MARKER: &str = "Ôn tập và củng cố kiến thức";

/// Theory content for the rest days of the `Weekdays` policy.
pub const WEEKEND_MARKER: &str = "Ôn tập và nghỉ ngơi";

/// Every week has exactly this many daily plans.
pub const DAYS_PER_WEEK: u32 = 7;

/// How a day's study time is divided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSplit {
    pub theory_hours: f64,
    pub practice_hours: f64,
}

impl TimeSplit {
    /// Splits `daily_hours` by the style's theory ratio. Practice gets the
    /// remainder so the two parts always add back up to `daily_hours`.
    pub fn for_style(style: LearningStyle, daily_hours: f64) -> Self {
        let theory_hours = daily_hours * style.theory_ratio();
        Self {
            theory_hours,
            practice_hours: daily_hours - theory_hours,
        }
    }
}

/// Which calendar days draw new theory content from the curriculum.
///
/// `AllWeek` is the primary behaviour. `Weekdays` is an alternate policy
/// (5 study days, 2 review/rest days) that is only used when explicitly
/// configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudyDays {
    #[default]
    AllWeek,
    Weekdays,
}

impl StudyDays {
    /// Whether the 0-based day of a week advances the curriculum.
    pub fn is_study_day(&self, day_index: u32) -> bool {
        match self {
            StudyDays::AllWeek => true,
            StudyDays::Weekdays => day_index < 5,
        }
    }
}

impl FromStr for StudyDays {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all-week" | "all_week" | "7" => Ok(StudyDays::AllWeek),
            "weekdays" | "5" => Ok(StudyDays::Weekdays),
            other => Err(format!("'{}' is not a study-day policy", other)),
        }
    }
}

/// Metadata about the lesson a day is built around.
///
/// `completed` is always `false`: generation is single-pass and never marks progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDetail {
    pub topic: Option<String>,
    pub lesson: Option<String>,
    pub estimated_hours: f64,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub date: NaiveDate,
    /// One entry: either "Topic - Lesson" or a review marker.
    pub theory_topics: Vec<String>,
    pub practice_exercises: Vec<String>,
    pub theory_hours: f64,
    pub practice_hours: f64,
    pub learning_resources: Vec<String>,
    pub topic_details: TopicDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    /// 1-based.
    pub week_number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub level: Level,
    pub predicted_success_rate: f64,
    pub daily_plans: Vec<DailyPlan>,
}

/// The full schedule for one student profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPathResult {
    pub subject: Subject,
    pub grade: Grade,
    pub level: Level,
    pub predicted_success_rate: f64,
    pub daily_study_hours: f64,
    pub learning_style: LearningStyle,
    pub weeks: Vec<WeekPlan>,
}

impl LearningPathResult {
    /// Iterates over every daily plan in calendar order.
    pub fn days(&self) -> impl Iterator<Item = &DailyPlan> {
        self.weeks.iter().flat_map(|w| w.daily_plans.iter())
    }
}
