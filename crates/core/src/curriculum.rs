//! Curriculum Repository
//!
//! This module provides the ordered topic → lesson structure, the weekly practice
//! pool and the learning resources for every (subject, grade, level) key. It serves
//! as the content source the schedule builder lays out across a learning path.

use crate::level::Level;
use crate::profile::{Grade, Subject};
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// The catalog shipped with the crate, used when no external catalog is configured.
const BUILTIN_CATALOG: &str = include_str!("../data/curriculum.json");

/// A single lesson, ordered within its topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub name: String,
    /// Expected time to work through the lesson, when the catalog knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_minutes: Option<u32>,
}

impl Lesson {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            completion_minutes: None,
        }
    }
}

/// A named topic with its ordered lessons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl Topic {
    pub fn new(name: impl Into<String>, lessons: Vec<Lesson>) -> Self {
        Self {
            name: name.into(),
            lessons,
        }
    }
}

/// The ordered topics for one (subject, grade, level) key.
///
/// A breakdown is fetched once per generation run and treated as an immutable
/// snapshot from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicBreakdown {
    pub subject: Subject,
    pub grade: Grade,
    pub level: Level,
    pub topics: Vec<Topic>,
}

impl TopicBreakdown {
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Total number of lessons across all topics.
    pub fn lesson_count(&self) -> usize {
        self.topics.iter().map(|t| t.lessons.len()).sum()
    }
}

/// Defines the contract for any source of curriculum content.
///
/// This abstraction allows the engine to run against the embedded catalog, a
/// catalog loaded from disk, or a test double, while every lookup stays a pure,
/// idempotent read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurriculumRepository: Send + Sync {
    /// Resolves the ordered topics and lessons for a key.
    ///
    /// An unknown key yields an empty breakdown rather than an error.
    async fn get_topic_breakdown(
        &self,
        subject: Subject,
        grade: Grade,
        level: Level,
    ) -> Result<TopicBreakdown>;

    /// Returns the practice items for one week of a learning path.
    ///
    /// The exercise pool for the key is cut into `total_weeks` contiguous,
    /// non-overlapping slices and the slice for the 1-based `week_number` is
    /// returned; out-of-range weeks yield an empty list.
    async fn get_practice_exercises(
        &self,
        subject: Subject,
        week_number: u32,
        total_weeks: u32,
        level: Level,
        grade: Grade,
    ) -> Result<Vec<String>>;

    /// Returns the static, ordered resource list for a key.
    async fn get_learning_resources(
        &self,
        subject: Subject,
        grade: Grade,
        level: Level,
    ) -> Result<Vec<String>>;
}

/// Cuts `pool` into `total_weeks` slices of `max(len / total_weeks, 1)` items and
/// returns the slice for `week_number`.
pub fn weekly_slice(pool: &[String], week_number: u32, total_weeks: u32) -> Vec<String> {
    if week_number == 0 || total_weeks == 0 {
        return Vec::new();
    }
    let per_week = (pool.len() / total_weeks as usize).max(1);
    let start = (week_number as usize - 1).saturating_mul(per_week);
    if start >= pool.len() {
        return Vec::new();
    }
    let end = (start + per_week).min(pool.len());
    pool[start..end].to_vec()
}

/// One structured catalog record: everything the engine needs for a single key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub subject: Subject,
    pub grade: Grade,
    pub level: Level,
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub exercises: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
}

/// A serializable set of catalog records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurriculumCatalog {
    pub entries: Vec<CatalogEntry>,
}

impl CurriculumCatalog {
    /// Parses the catalog embedded in the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG).context("Embedded curriculum catalog is malformed")
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json).context("Failed to parse curriculum catalog")?;
        Ok(catalog)
    }

    /// Reads and parses a catalog file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read curriculum catalog {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid curriculum catalog {}", path.display()))
    }
}

type CatalogKey = (Subject, Grade, Level);

/// A `CurriculumRepository` backed by in-memory catalog records.
#[derive(Debug, Clone, Default)]
pub struct CatalogRepository {
    entries: HashMap<CatalogKey, CatalogEntry>,
}

impl CatalogRepository {
    /// Indexes a catalog by key.
    ///
    /// # Errors
    ///
    /// Fails if two records share the same (subject, grade, level) key.
    pub fn new(catalog: CurriculumCatalog) -> Result<Self> {
        let mut entries = HashMap::with_capacity(catalog.entries.len());
        for entry in catalog.entries {
            let key = (entry.subject, entry.grade, entry.level);
            if entries.insert(key, entry).is_some() {
                bail!(
                    "Duplicate curriculum entry for {}/{}/{}",
                    key.0,
                    key.1,
                    key.2
                );
            }
        }
        info!(entries = entries.len(), "Curriculum catalog indexed");
        Ok(Self { entries })
    }

    /// A repository over the embedded catalog.
    pub fn builtin() -> Result<Self> {
        Self::new(CurriculumCatalog::builtin()?)
    }

    /// A repository over a catalog file, or the embedded catalog when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::new(CurriculumCatalog::from_path(path)?),
            None => Self::builtin(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, subject: Subject, grade: Grade, level: Level) -> Option<&CatalogEntry> {
        let entry = self.entries.get(&(subject, grade, level));
        if entry.is_none() {
            debug!(%subject, %grade, %level, "No catalog entry for key");
        }
        entry
    }
}

#[async_trait]
impl CurriculumRepository for CatalogRepository {
    async fn get_topic_breakdown(
        &self,
        subject: Subject,
        grade: Grade,
        level: Level,
    ) -> Result<TopicBreakdown> {
        let topics = self
            .entry(subject, grade, level)
            .map(|e| e.topics.clone())
            .unwrap_or_default();
        Ok(TopicBreakdown {
            subject,
            grade,
            level,
            topics,
        })
    }

    async fn get_practice_exercises(
        &self,
        subject: Subject,
        week_number: u32,
        total_weeks: u32,
        level: Level,
        grade: Grade,
    ) -> Result<Vec<String>> {
        Ok(self
            .entry(subject, grade, level)
            .map(|e| weekly_slice(&e.exercises, week_number, total_weeks))
            .unwrap_or_default())
    }

    async fn get_learning_resources(
        &self,
        subject: Subject,
        grade: Grade,
        level: Level,
    ) -> Result<Vec<String>> {
        Ok(self
            .entry(subject, grade, level)
            .map(|e| e.resources.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn pool(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("ex{}", i)).collect()
    }

    fn small_catalog() -> CurriculumCatalog {
        CurriculumCatalog {
            entries: vec![CatalogEntry {
                subject: Subject::Math,
                grade: Grade::Thcs,
                level: Level::Basic,
                topics: vec![
                    Topic::new("Fractions", vec![Lesson::new("Intro"), Lesson::new("Drill")]),
                    Topic::new("Ratios", vec![Lesson::new("Intro")]),
                ],
                exercises: pool(5),
                resources: vec!["Textbook".into(), "Video".into()],
            }],
        }
    }

    #[test]
    fn test_weekly_slice_partitions_contiguously() {
        let items = pool(6);
        assert_eq!(weekly_slice(&items, 1, 3), vec!["ex1", "ex2"]);
        assert_eq!(weekly_slice(&items, 2, 3), vec!["ex3", "ex4"]);
        assert_eq!(weekly_slice(&items, 3, 3), vec!["ex5", "ex6"]);
        assert!(weekly_slice(&items, 4, 3).is_empty());
    }

    #[test]
    fn test_weekly_slice_uses_at_least_one_item() {
        // 5 items over 8 weeks: one per week, then nothing left.
        let items = pool(5);
        assert_eq!(weekly_slice(&items, 1, 8), vec!["ex1"]);
        assert_eq!(weekly_slice(&items, 5, 8), vec!["ex5"]);
        assert!(weekly_slice(&items, 6, 8).is_empty());
    }

    #[test]
    fn test_weekly_slice_drops_remainder() {
        // 5 items over 2 weeks: 2 per week, the 5th is never scheduled.
        let items = pool(5);
        assert_eq!(weekly_slice(&items, 1, 2), vec!["ex1", "ex2"]);
        assert_eq!(weekly_slice(&items, 2, 2), vec!["ex3", "ex4"]);
    }

    #[test]
    fn test_weekly_slice_degenerate_arguments() {
        let items = pool(3);
        assert!(weekly_slice(&items, 0, 3).is_empty());
        assert!(weekly_slice(&items, 1, 0).is_empty());
        assert!(weekly_slice(&[], 1, 1).is_empty());
    }

    #[tokio::test]
    async fn test_catalog_repository_lookups() {
        let repo = CatalogRepository::new(small_catalog()).unwrap();

        let breakdown = repo
            .get_topic_breakdown(Subject::Math, Grade::Thcs, Level::Basic)
            .await
            .unwrap();
        assert_eq!(breakdown.topics.len(), 2);
        assert_eq!(breakdown.lesson_count(), 3);
        assert_eq!(breakdown.topics[0].name, "Fractions");

        let week_two = repo
            .get_practice_exercises(Subject::Math, 2, 2, Level::Basic, Grade::Thcs)
            .await
            .unwrap();
        assert_eq!(week_two, vec!["ex3", "ex4"]);

        let resources = repo
            .get_learning_resources(Subject::Math, Grade::Thcs, Level::Basic)
            .await
            .unwrap();
        assert_eq!(resources, vec!["Textbook", "Video"]);
    }

    #[tokio::test]
    async fn test_unknown_key_is_empty_not_an_error() {
        let repo = CatalogRepository::new(small_catalog()).unwrap();
        let breakdown = repo
            .get_topic_breakdown(Subject::Physics, Grade::Thpt, Level::Expert)
            .await
            .unwrap();
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.subject, Subject::Physics);
        assert!(
            repo.get_learning_resources(Subject::Physics, Grade::Thpt, Level::Expert)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let mut catalog = small_catalog();
        catalog.entries.push(catalog.entries[0].clone());
        let err = CatalogRepository::new(catalog).unwrap_err();
        assert!(err.to_string().contains("Duplicate curriculum entry for math/thcs/basic"));
    }

    #[test]
    fn test_builtin_catalog_covers_every_key() {
        let repo = CatalogRepository::builtin().expect("Embedded catalog should parse");
        assert_eq!(
            repo.len(),
            Subject::ALL.len() * Grade::ALL.len() * Level::ALL.len()
        );
        for entry in repo.entries.values() {
            assert!(!entry.topics.is_empty());
            assert!(entry.topics.iter().all(|t| !t.lessons.is_empty()));
            assert!(!entry.exercises.is_empty());
            assert!(!entry.resources.is_empty());
        }
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&small_catalog()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let repo = CatalogRepository::load(Some(file.path())).unwrap();
        assert_eq!(repo.len(), 1);

        let missing = CatalogRepository::load(Some(Path::new("/nonexistent/catalog.json")));
        assert!(missing.is_err());
    }

    #[test]
    fn test_catalog_parses_optional_fields() {
        let json = r#"{"entries":[{"subject":"chemistry","grade":"thpt","level":"advanced",
            "topics":[{"name":"Kinetics","lessons":[{"name":"Rates","completion_minutes":50}]}]}]}"#;
        let catalog = CurriculumCatalog::from_json_str(json).unwrap();
        let entry = &catalog.entries[0];
        assert_eq!(entry.topics[0].lessons[0].completion_minutes, Some(50));
        assert!(entry.exercises.is_empty());
        assert!(entry.resources.is_empty());
    }
}
