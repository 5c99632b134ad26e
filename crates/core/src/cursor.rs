use crate::curriculum::{Lesson, Topic, TopicBreakdown};

/// Generation-local position in a [`TopicBreakdown`].
///
/// The cursor only moves forward. Once every lesson has been handed out it is
/// exhausted for good: there is no wraparound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurriculumCursor {
    topic_index: usize,
    lesson_index: usize,
}

impl CurriculumCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topic_index(&self) -> usize {
        self.topic_index
    }

    pub fn lesson_index(&self) -> usize {
        self.lesson_index
    }

    /// Returns the next lesson in declaration order and consumes it.
    ///
    /// Topics without lessons are stepped over. `None` means the breakdown is
    /// exhausted, and every later call returns `None` as well.
    pub fn advance<'a>(&mut self, breakdown: &'a TopicBreakdown) -> Option<(&'a Topic, &'a Lesson)> {
        loop {
            let topic = breakdown.topics.get(self.topic_index)?;
            match topic.lessons.get(self.lesson_index) {
                Some(lesson) => {
                    self.lesson_index += 1;
                    if self.lesson_index >= topic.lessons.len() {
                        self.lesson_index = 0;
                        self.topic_index += 1;
                    }
                    return Some((topic, lesson));
                }
                None => {
                    self.lesson_index = 0;
                    self.topic_index += 1;
                }
            }
        }
    }

    pub fn is_exhausted(&self, breakdown: &TopicBreakdown) -> bool {
        breakdown.topics[self.topic_index.min(breakdown.topics.len())..]
            .iter()
            .all(|t| t.lessons.is_empty())
    }
}
