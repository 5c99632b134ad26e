//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the shared,
//! clonable handles every handler needs: the schedule builder (which also
//! owns the curriculum repository) and the success-model handle.

use crate::config::Config;
use std::sync::Arc;
use studypath_core::{
    ScheduleBuilder,
    curriculum::CurriculumRepository,
    predictor::{FileModelLoader, LazyPredictor, SuccessRatePredictor},
};

/// The success-model handle used by the service.
pub type ServicePredictor = LazyPredictor<FileModelLoader>;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub builder: ScheduleBuilder,
    pub predictor: Arc<ServicePredictor>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the builder to the given predictor and repository, honouring the
    /// configured study-day policy.
    pub fn new(
        config: Config,
        predictor: Arc<ServicePredictor>,
        curriculum: Arc<dyn CurriculumRepository>,
    ) -> Self {
        let builder = ScheduleBuilder::new(
            predictor.clone() as Arc<dyn SuccessRatePredictor>,
            curriculum,
        )
        .with_study_days(config.study_days);

        Self {
            builder,
            predictor,
            config: Arc::new(config),
        }
    }
}
