//! Learning-path generation engine.
//!
//! Given a `StudentProfile`, the engine predicts a success rate, classifies the
//! student into a difficulty `Level`, resolves the curriculum for that level and
//! lays it out as a multi-week schedule of daily plans.

pub mod curriculum;
pub mod cursor;
pub mod error;
pub mod level;
pub mod planner;
pub mod predictor;
pub mod profile;
pub mod schedule;

pub use error::{GenerationError, PredictorError};
pub use level::Level;
pub use planner::ScheduleBuilder;
pub use profile::{Grade, LearningStyle, StudentProfile, Subject};
pub use schedule::LearningPathResult;
