//! API Request and Response Models
//!
//! This module defines the JSON shapes of the HTTP boundary and the numeric
//! coercion applied to incoming profile fields before they reach the engine.

use serde::{Deserialize, Serialize};
use studypath_core::curriculum::TopicBreakdown;
use studypath_core::profile::ProfileInput;
use studypath_core::schedule::{LearningPathResult, StudyDays};
use utoipa::ToSchema;
use uuid::Uuid;

/// A field that may arrive either as a JSON number or as a numeric string.
#[derive(Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    fn as_text(&self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }

    fn as_number(&self, field: &str) -> Result<f64, String> {
        match self {
            FieldValue::Number(n) => Ok(*n),
            FieldValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("Invalid numeric value for {}: '{}'", field, s)),
        }
    }

    fn as_whole_number(&self, field: &str) -> Result<i64, String> {
        let value = match self {
            FieldValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("Invalid whole number for {}: '{}'", field, s))?,
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => *n as i64,
            FieldValue::Number(n) => {
                return Err(format!("Invalid whole number for {}: {}", field, n));
            }
        };
        Ok(value)
    }
}

/// The body of a learning-path request. Every field is required; the numeric
/// ones accept numbers or numeric strings.
#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
pub struct GeneratePathPayload {
    #[schema(example = "math")]
    pub subject: Option<FieldValue>,
    #[schema(example = "thpt")]
    pub grade: Option<FieldValue>,
    #[schema(example = 6.5)]
    pub current_score: Option<FieldValue>,
    #[schema(example = 8.5)]
    pub target_score: Option<FieldValue>,
    #[schema(example = 8)]
    pub duration_weeks: Option<FieldValue>,
    #[schema(example = 2)]
    pub daily_study_hours: Option<FieldValue>,
    #[schema(example = "combined")]
    pub learning_style: Option<FieldValue>,
}

fn required<'a>(value: &'a Option<FieldValue>, field: &str) -> Result<&'a FieldValue, String> {
    value.as_ref().ok_or_else(|| format!("Missing field {}", field))
}

impl GeneratePathPayload {
    /// Checks presence of every field and coerces the numeric ones.
    ///
    /// Range checks are left to the engine's validator.
    pub fn into_input(self) -> Result<ProfileInput, String> {
        Ok(ProfileInput {
            subject: required(&self.subject, "subject")?.as_text(),
            grade: required(&self.grade, "grade")?.as_text(),
            current_score: required(&self.current_score, "current_score")?
                .as_number("current_score")?,
            target_score: required(&self.target_score, "target_score")?
                .as_number("target_score")?,
            duration_weeks: required(&self.duration_weeks, "duration_weeks")?
                .as_whole_number("duration_weeks")?,
            daily_study_hours: required(&self.daily_study_hours, "daily_study_hours")?
                .as_number("daily_study_hours")?,
            learning_style: required(&self.learning_style, "learning_style")?.as_text(),
        })
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct GeneratePathResponse {
    pub success: bool,
    #[schema(value_type = String, format = Uuid)]
    pub path_id: Uuid,
    #[schema(value_type = Object)]
    pub learning_path: LearningPathResult,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct CurriculumResponse {
    #[schema(value_type = Object)]
    pub breakdown: TopicBreakdown,
    pub lesson_count: usize,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    pub model_ready: bool,
    #[schema(value_type = String, example = "all-week")]
    pub study_days: StudyDays,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}
