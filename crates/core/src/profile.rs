//! Student Profile and Input Validation
//!
//! This module defines the closed sets of subjects, grades and learning styles the
//! engine understands, the typed `StudentProfile` every generation run starts from,
//! and the `ProfileValidator` that turns loosely-typed request input into one.

use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest accepted score on the 10-point scale.
pub const MIN_SCORE: f64 = 0.0;
/// Highest accepted score on the 10-point scale.
pub const MAX_SCORE: f64 = 10.0;
/// Longest schedule that can be generated, about ten years.
pub const MAX_DURATION_WEEKS: u32 = 520;

/// The subjects a learning path can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Physics,
    Chemistry,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Math, Subject::Physics, Subject::Chemistry];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
        }
    }
}

/// School stage: lower secondary (`thcs`) or upper secondary (`thpt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Thcs,
    Thpt,
}

impl Grade {
    pub const ALL: [Grade; 2] = [Grade::Thcs, Grade::Thpt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Thcs => "thcs",
            Grade::Thpt => "thpt",
        }
    }
}

/// How the student prefers to split study time between theory and practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Practical,
    Theory,
    Combined,
}

impl LearningStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningStyle::Practical => "practical",
            LearningStyle::Theory => "theory",
            LearningStyle::Combined => "combined",
        }
    }

    /// Parses a learning style, mapping anything unrecognized to `Combined`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "practical" => LearningStyle::Practical,
            "theory" => LearningStyle::Theory,
            _ => LearningStyle::Combined,
        }
    }

    /// Fraction of the daily study time spent on theory.
    pub fn theory_ratio(&self) -> f64 {
        match self {
            LearningStyle::Practical => 0.3,
            LearningStyle::Theory => 0.7,
            LearningStyle::Combined => 0.5,
        }
    }
}

macro_rules! impl_display_from_str {
    ($ty:ty, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = GenerationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| {
                        GenerationError::invalid($field, format!("unsupported value '{}'", s))
                    })
            }
        }
    };
}

impl_display_from_str!(Subject, "subject");
impl_display_from_str!(Grade, "grade");

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request for a learning path.
///
/// Profiles are built fresh per request and never mutated once the engine
/// receives them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub subject: Subject,
    pub grade: Grade,
    pub current_score: f64,
    pub target_score: f64,
    pub duration_weeks: u32,
    pub daily_study_hours: f64,
    pub learning_style: LearningStyle,
}

/// Loosely-typed profile fields as they arrive from an outer boundary
/// (HTTP body, command line), after numeric coercion but before range checks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileInput {
    pub subject: String,
    pub grade: String,
    pub current_score: f64,
    pub target_score: f64,
    pub duration_weeks: i64,
    pub daily_study_hours: f64,
    pub learning_style: String,
}

/// Checks the domain constraints on profile inputs.
pub struct ProfileValidator;

impl ProfileValidator {
    /// Fails unless both `subject` and `grade` belong to their allowed sets.
    pub fn validate(subject: &str, grade: &str) -> Result<(Subject, Grade), GenerationError> {
        Ok((subject.parse()?, grade.parse()?))
    }

    /// Both scores must lie in `[0, 10]`.
    pub fn validate_scores(current_score: f64, target_score: f64) -> Result<(), GenerationError> {
        check_score("current_score", current_score)?;
        check_score("target_score", target_score)
    }

    /// Duration must lie in `1..=MAX_DURATION_WEEKS`; daily hours must be
    /// strictly positive and finite.
    pub fn validate_time(duration_weeks: i64, daily_study_hours: f64) -> Result<u32, GenerationError> {
        if duration_weeks <= 0 {
            return Err(GenerationError::invalid(
                "duration_weeks",
                format!("must be greater than 0, got {}", duration_weeks),
            ));
        }
        let weeks = u32::try_from(duration_weeks)
            .ok()
            .filter(|w| *w <= MAX_DURATION_WEEKS)
            .ok_or_else(|| {
                GenerationError::invalid(
                    "duration_weeks",
                    format!("must be at most {}, got {}", MAX_DURATION_WEEKS, duration_weeks),
                )
            })?;
        if !daily_study_hours.is_finite() || daily_study_hours <= 0.0 {
            return Err(GenerationError::invalid(
                "daily_study_hours",
                format!("must be greater than 0, got {}", daily_study_hours),
            ));
        }
        Ok(weeks)
    }

    /// Runs every check and, only if all pass, builds the typed profile.
    pub fn validate_input(input: &ProfileInput) -> Result<StudentProfile, GenerationError> {
        let (subject, grade) = Self::validate(&input.subject, &input.grade)?;
        Self::validate_scores(input.current_score, input.target_score)?;
        let duration_weeks = Self::validate_time(input.duration_weeks, input.daily_study_hours)?;

        Ok(StudentProfile {
            subject,
            grade,
            current_score: input.current_score,
            target_score: input.target_score,
            duration_weeks,
            daily_study_hours: input.daily_study_hours,
            learning_style: LearningStyle::parse_lenient(&input.learning_style),
        })
    }

    /// Re-checks the numeric bounds of an already-typed profile.
    pub fn check_profile(profile: &StudentProfile) -> Result<(), GenerationError> {
        Self::validate_scores(profile.current_score, profile.target_score)?;
        Self::validate_time(i64::from(profile.duration_weeks), profile.daily_study_hours)?;
        Ok(())
    }
}

fn check_score(field: &'static str, value: f64) -> Result<(), GenerationError> {
    // NaN fails the range test as well.
    if (MIN_SCORE..=MAX_SCORE).contains(&value) {
        Ok(())
    } else {
        Err(GenerationError::invalid(
            field,
            format!("must be within [{}, {}], got {}", MIN_SCORE, MAX_SCORE, value),
        ))
    }
}
