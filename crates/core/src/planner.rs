//! Learning Path Generation
//!
//! This module implements `ScheduleBuilder`, the orchestrator that turns a
//! `StudentProfile` into a week-by-week schedule. It validates the profile, asks
//! the predictor for a success rate, classifies the student into a level, snapshots
//! the curriculum for that level, and then walks a cursor over the topic breakdown
//! to lay out seven daily plans per week.

use crate::curriculum::{CurriculumRepository, TopicBreakdown};
use crate::cursor::CurriculumCursor;
use crate::error::{GenerationError, PredictorError};
use crate::level::{Level, LevelClassifier};
use crate::predictor::{PredictionFeatures, SuccessRatePredictor};
use crate::profile::{ProfileValidator, StudentProfile};
use crate::schedule::{
    DAYS_PER_WEEK, DailyPlan, LearningPathResult, REVIEW_MARKER, StudyDays, TimeSplit,
    TopicDetail, WEEKEND_MARKER, WeekPlan,
};
use chrono::{Days, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Everything a run reads from the curriculum, fetched before the day loop starts.
struct CurriculumSnapshot {
    breakdown: TopicBreakdown,
    /// Index `w` holds the practice slice for week `w + 1`.
    weekly_practice: Vec<Vec<String>>,
    resources: Vec<String>,
}

/// Builds learning paths from a predictor and a curriculum source.
///
/// The builder holds no per-request state and can be shared across tasks; each
/// call to [`ScheduleBuilder::generate_learning_path`] owns its own cursor.
#[derive(Clone)]
pub struct ScheduleBuilder {
    predictor: Arc<dyn SuccessRatePredictor>,
    repository: Arc<dyn CurriculumRepository>,
    start_date: Option<NaiveDate>,
    study_days: StudyDays,
}

impl ScheduleBuilder {
    pub fn new(
        predictor: Arc<dyn SuccessRatePredictor>,
        repository: Arc<dyn CurriculumRepository>,
    ) -> Self {
        Self {
            predictor,
            repository,
            start_date: None,
            study_days: StudyDays::default(),
        }
    }

    /// Pins the first day of week 1. Without it, each run starts today (local time).
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_study_days(mut self, study_days: StudyDays) -> Self {
        self.study_days = study_days;
        self
    }

    pub fn repository(&self) -> &Arc<dyn CurriculumRepository> {
        &self.repository
    }

    /// Generates the full learning path for `profile`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for out-of-range profile values,
    /// `PredictionUnavailable` if no success rate can be obtained, and
    /// `CurriculumUnavailable` if the resolved level has no topics. No partial
    /// result is ever returned.
    #[instrument(
        name = "generate_learning_path",
        skip_all,
        fields(subject = %profile.subject, grade = %profile.grade, weeks = profile.duration_weeks)
    )]
    pub async fn generate_learning_path(
        &self,
        profile: &StudentProfile,
    ) -> Result<LearningPathResult, GenerationError> {
        ProfileValidator::check_profile(profile)?;

        let success_rate = self.predict_success_rate(profile).await?;
        let level =
            LevelClassifier::classify(profile.current_score, profile.target_score, success_rate);
        info!(%level, success_rate, "Student classified");

        let snapshot = self.load_snapshot(profile, level).await?;
        let start_date = self
            .start_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let weeks = lay_out_weeks(
            profile,
            level,
            success_rate,
            &snapshot,
            start_date,
            self.study_days,
        )?;

        info!(
            %level,
            weeks = weeks.len(),
            lessons = snapshot.breakdown.lesson_count(),
            "Learning path generated"
        );

        Ok(LearningPathResult {
            subject: profile.subject,
            grade: profile.grade,
            level,
            predicted_success_rate: success_rate,
            daily_study_hours: profile.daily_study_hours,
            learning_style: profile.learning_style,
            weeks,
        })
    }

    /// Asks the predictor for a rate, making one initialization attempt if the
    /// model is not ready yet.
    async fn predict_success_rate(&self, profile: &StudentProfile) -> Result<f64, GenerationError> {
        let features = PredictionFeatures::from(profile);
        let rate = match self.predictor.predict(&features).await {
            Ok(rate) => rate,
            Err(PredictorError::NotReady) => {
                warn!("Success model not ready; attempting initialization");
                self.predictor
                    .ensure_ready()
                    .await
                    .map_err(prediction_unavailable)?;
                self.predictor
                    .predict(&features)
                    .await
                    .map_err(prediction_unavailable)?
            }
            Err(e) => return Err(prediction_unavailable(e)),
        };

        // Finite but out-of-range rates are left to the classifier's fallback.
        if !rate.is_finite() {
            return Err(GenerationError::PredictionUnavailable(format!(
                "predictor returned {}",
                rate
            )));
        }
        Ok(rate)
    }

    async fn load_snapshot(
        &self,
        profile: &StudentProfile,
        level: Level,
    ) -> Result<CurriculumSnapshot, GenerationError> {
        let (subject, grade) = (profile.subject, profile.grade);
        let unavailable = |e: anyhow::Error| {
            warn!(error = ?e, %subject, %grade, %level, "Curriculum lookup failed");
            GenerationError::CurriculumUnavailable {
                subject,
                grade,
                level,
            }
        };

        let breakdown = self
            .repository
            .get_topic_breakdown(subject, grade, level)
            .await
            .map_err(unavailable)?;
        if breakdown.is_empty() {
            warn!(%subject, %grade, %level, "Topic breakdown is empty");
            return Err(GenerationError::CurriculumUnavailable {
                subject,
                grade,
                level,
            });
        }

        let total_weeks = profile.duration_weeks;
        let mut weekly_practice = Vec::with_capacity(total_weeks as usize);
        for week_number in 1..=total_weeks {
            let items = self
                .repository
                .get_practice_exercises(subject, week_number, total_weeks, level, grade)
                .await
                .map_err(unavailable)?;
            weekly_practice.push(items);
        }

        let resources = self
            .repository
            .get_learning_resources(subject, grade, level)
            .await
            .map_err(unavailable)?;

        Ok(CurriculumSnapshot {
            breakdown,
            weekly_practice,
            resources,
        })
    }
}

fn prediction_unavailable(err: PredictorError) -> GenerationError {
    GenerationError::PredictionUnavailable(err.to_string())
}

fn offset_date(start: NaiveDate, days: u64) -> Result<NaiveDate, GenerationError> {
    start.checked_add_days(Days::new(days)).ok_or_else(|| {
        GenerationError::invalid("duration_weeks", "schedule runs past the supported calendar range")
    })
}

/// The synchronous day loop. All curriculum data comes from `snapshot`.
fn lay_out_weeks(
    profile: &StudentProfile,
    level: Level,
    success_rate: f64,
    snapshot: &CurriculumSnapshot,
    start_date: NaiveDate,
    study_days: StudyDays,
) -> Result<Vec<WeekPlan>, GenerationError> {
    let split = TimeSplit::for_style(profile.learning_style, profile.daily_study_hours);
    let mut cursor = CurriculumCursor::new();
    let mut weeks = Vec::with_capacity(profile.duration_weeks as usize);

    for week_number in 1..=profile.duration_weeks {
        let week_start = offset_date(start_date, u64::from(week_number - 1) * 7)?;
        let week_end = offset_date(week_start, u64::from(DAYS_PER_WEEK - 1))?;
        let practice = snapshot
            .weekly_practice
            .get(week_number as usize - 1)
            .cloned()
            .unwrap_or_default();

        let mut daily_plans = Vec::with_capacity(DAYS_PER_WEEK as usize);
        for day_index in 0..DAYS_PER_WEEK {
            let date = offset_date(week_start, u64::from(day_index))?;

            let (content, topic_details) = if !study_days.is_study_day(day_index) {
                (WEEKEND_MARKER.to_string(), review_detail(&split))
            } else {
                let next = cursor.advance(&snapshot.breakdown);
                if next.is_some() && cursor.is_exhausted(&snapshot.breakdown) {
                    info!(%date, week_number, "Last lesson scheduled; later days are review");
                }
                match next {
                    Some((topic, lesson)) => {
                        let estimated_hours = lesson
                            .completion_minutes
                            .map(|m| f64::from(m) / 60.0)
                            .unwrap_or(split.theory_hours);
                        (
                            format!("{} - {}", topic.name, lesson.name),
                            TopicDetail {
                                topic: Some(topic.name.clone()),
                                lesson: Some(lesson.name.clone()),
                                estimated_hours,
                                completed: false,
                            },
                        )
                    }
                    None => (REVIEW_MARKER.to_string(), review_detail(&split)),
                }
            };

            daily_plans.push(DailyPlan {
                date,
                theory_topics: vec![content],
                practice_exercises: practice.clone(),
                theory_hours: split.theory_hours,
                practice_hours: split.practice_hours,
                learning_resources: snapshot.resources.clone(),
                topic_details,
            });
        }

        debug!(week_number, %week_start, %week_end, "Week laid out");
        weeks.push(WeekPlan {
            week_number,
            start_date: week_start,
            end_date: week_end,
            level,
            predicted_success_rate: success_rate,
            daily_plans,
        });
    }

    if !cursor.is_exhausted(&snapshot.breakdown) {
        info!(
            topic_index = cursor.topic_index(),
            lesson_index = cursor.lesson_index(),
            "Schedule ended before the curriculum was covered"
        );
    }

    Ok(weeks)
}

fn review_detail(split: &TimeSplit) -> TopicDetail {
    TopicDetail {
        topic: None,
        lesson: None,
        estimated_hours: split.theory_hours,
        completed: false,
    }
}
