//! Success Rate Prediction
//!
//! This module defines the predictor contract the engine consumes, the success
//! model it ships with, and `LazyPredictor`, a handle that loads the model either
//! at startup or on first use, with at most one load in flight at a time.

use crate::error::PredictorError;
use crate::profile::{Grade, LearningStyle, StudentProfile, Subject};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// The feature tuple a prediction is made from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionFeatures {
    pub subject: Subject,
    pub current_score: f64,
    pub target_score: f64,
    pub duration_weeks: u32,
    pub daily_study_hours: f64,
    pub learning_style: LearningStyle,
    pub grade: Grade,
}

impl From<&StudentProfile> for PredictionFeatures {
    fn from(profile: &StudentProfile) -> Self {
        Self {
            subject: profile.subject,
            current_score: profile.current_score,
            target_score: profile.target_score,
            duration_weeks: profile.duration_weeks,
            daily_study_hours: profile.daily_study_hours,
            learning_style: profile.learning_style,
            grade: profile.grade,
        }
    }
}

/// Maps a feature tuple to the probability that the student reaches the target score.
///
/// The engine treats implementations as black boxes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuccessRatePredictor: Send + Sync {
    /// Returns a probability in `[0, 1]`, or `PredictorError::NotReady` if the
    /// underlying model has not been initialized yet.
    async fn predict(&self, features: &PredictionFeatures) -> Result<f64, PredictorError>;

    /// Makes a best-effort attempt to initialize the model.
    async fn ensure_ready(&self) -> Result<(), PredictorError> {
        Ok(())
    }
}

/// Per-style multipliers applied to the combined factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleFactors {
    pub theory: f64,
    pub practical: f64,
    pub combined: f64,
}

impl StyleFactors {
    fn for_style(&self, style: LearningStyle) -> f64 {
        match style {
            LearningStyle::Theory => self.theory,
            LearningStyle::Practical => self.practical,
            LearningStyle::Combined => self.combined,
        }
    }
}

/// Parameters of the closed-form success model.
///
/// `rate = (base_success + score_factor + time_factor) * style_factor / 3`, where
/// `score_factor = 1 - gap / score_scale` and
/// `time_factor = min(weeks * hours / time_budget_hours, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessModel {
    pub base_success: f64,
    pub score_scale: f64,
    pub time_budget_hours: f64,
    pub style_factors: StyleFactors,
}

impl Default for SuccessModel {
    fn default() -> Self {
        Self {
            base_success: 0.5,
            score_scale: 10.0,
            time_budget_hours: 40.0,
            style_factors: StyleFactors {
                theory: 0.9,
                practical: 0.85,
                combined: 1.0,
            },
        }
    }
}

impl SuccessModel {
    /// Evaluates the model, clamped to `[0, 1]` and rounded to two decimals.
    pub fn success_rate(&self, features: &PredictionFeatures) -> f64 {
        let score_gap = features.target_score - features.current_score;
        let score_factor = 1.0 - score_gap / self.score_scale;
        let study_hours = f64::from(features.duration_weeks) * features.daily_study_hours;
        let time_factor = (study_hours / self.time_budget_hours).min(1.0);
        let style_factor = self.style_factors.for_style(features.learning_style);

        let rate = (self.base_success + score_factor + time_factor) * style_factor / 3.0;
        (rate.clamp(0.0, 1.0) * 100.0).round() / 100.0
    }

    fn check(&self) -> Result<()> {
        anyhow::ensure!(
            self.score_scale > 0.0 && self.time_budget_hours > 0.0,
            "score_scale and time_budget_hours must be positive"
        );
        Ok(())
    }
}

#[async_trait]
impl SuccessRatePredictor for SuccessModel {
    async fn predict(&self, features: &PredictionFeatures) -> Result<f64, PredictorError> {
        let rate = self.success_rate(features);
        if rate.is_finite() {
            Ok(rate)
        } else {
            Err(PredictorError::Failed(format!("model produced {}", rate)))
        }
    }
}

/// Produces a ready-to-use [`SuccessModel`].
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self) -> Result<SuccessModel>;
}

/// Loads model parameters from a JSON file, or uses the defaults when no path is set.
#[derive(Debug, Clone, Default)]
pub struct FileModelLoader {
    path: Option<PathBuf>,
}

impl FileModelLoader {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ModelLoader for FileModelLoader {
    async fn load(&self) -> Result<SuccessModel> {
        let model = match &self.path {
            Some(path) => {
                let json = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read model file {}", path.display()))?;
                serde_json::from_str::<SuccessModel>(&json)
                    .with_context(|| format!("Invalid model file {}", path.display()))?
            }
            None => SuccessModel::default(),
        };
        model.check()?;
        Ok(model)
    }
}

/// A predictor handle whose model is loaded exactly once.
///
/// The model lives in a `OnceCell`: readers see either no model or a fully
/// loaded one, and concurrent `ensure_ready` calls share a single load. A failed
/// load leaves the cell empty so a later call can try again.
pub struct LazyPredictor<L: ModelLoader> {
    loader: L,
    model: OnceCell<SuccessModel>,
}

impl<L: ModelLoader> LazyPredictor<L> {
    /// Builds an uninitialized handle; the first `ensure_ready` performs the load.
    pub fn deferred(loader: L) -> Self {
        Self {
            loader,
            model: OnceCell::new(),
        }
    }

    /// Loads the model immediately, failing if it cannot be loaded.
    pub async fn initialize(loader: L) -> Result<Self> {
        let predictor = Self::deferred(loader);
        predictor
            .load_once()
            .await
            .context("Failed to initialize success model")?;
        Ok(predictor)
    }

    pub fn is_ready(&self) -> bool {
        self.model.initialized()
    }

    async fn load_once(&self) -> Result<&SuccessModel> {
        self.model
            .get_or_try_init(|| async {
                let model = self.loader.load().await?;
                info!(?model, "Success model loaded");
                Ok::<_, anyhow::Error>(model)
            })
            .await
    }
}

#[async_trait]
impl<L: ModelLoader> SuccessRatePredictor for LazyPredictor<L> {
    async fn predict(&self, features: &PredictionFeatures) -> Result<f64, PredictorError> {
        match self.model.get() {
            Some(model) => model.predict(features).await,
            None => Err(PredictorError::NotReady),
        }
    }

    async fn ensure_ready(&self) -> Result<(), PredictorError> {
        self.load_once().await.map(|_| ()).map_err(|e| {
            warn!(error = ?e, "Success model initialization failed");
            PredictorError::Failed(format!("{:#}", e))
        })
    }
}
