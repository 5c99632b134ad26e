//! Error kinds surfaced by the learning-path engine.

use crate::level::Level;
use crate::profile::{Grade, Subject};

/// The failure signal returned by [`crate::planner::ScheduleBuilder::generate_learning_path`].
///
/// Generation never partially succeeds: any of these aborts the run before a
/// single `WeekPlan` is handed back to the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// An input field is outside its domain (unknown subject, score out of range, ...).
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },
    /// The success-rate predictor could not produce a value.
    #[error("Success rate prediction unavailable: {0}")]
    PredictionUnavailable(String),
    /// No usable curriculum exists for the resolved key.
    #[error("No curriculum available for {subject}/{grade}/{level}")]
    CurriculumUnavailable {
        subject: Subject,
        grade: Grade,
        level: Level,
    },
}

impl GenerationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors reported by a [`crate::predictor::SuccessRatePredictor`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictorError {
    #[error("success model is not initialized")]
    NotReady,
    #[error("prediction failed: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_display() {
        let err = GenerationError::invalid("current_score", "must be within [0, 10]");
        assert_eq!(
            err.to_string(),
            "Invalid value for field 'current_score': must be within [0, 10]"
        );

        let err = GenerationError::CurriculumUnavailable {
            subject: Subject::Physics,
            grade: Grade::Thcs,
            level: Level::Expert,
        };
        assert_eq!(
            err.to_string(),
            "No curriculum available for physics/thcs/expert"
        );
    }

    #[test]
    fn test_predictor_error_display() {
        assert_eq!(
            PredictorError::NotReady.to_string(),
            "success model is not initialized"
        );
        assert_eq!(
            PredictorError::Failed("boom".into()).to_string(),
            "prediction failed: boom"
        );
    }
}
